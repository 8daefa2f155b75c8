use nalgebra::Point3;

/// A formally charged group located at the centroid of its contributing atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargedGroup {
    pub positive: bool,
    pub coordinates: Point3<f64>,
    /// Contributing atom indices, sorted and free of duplicates.
    pub indices: Vec<usize>,
}

impl ChargedGroup {
    pub fn new(positive: bool, coordinates: Point3<f64>, mut indices: Vec<usize>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self {
            positive,
            coordinates,
            indices,
        }
    }

    pub fn is_negative(&self) -> bool {
        !self.positive
    }

    /// The lowest contributing index, used to look up the group's residue.
    pub fn anchor(&self) -> Option<usize> {
        self.indices.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_sorted_and_deduplicated() {
        let group = ChargedGroup::new(false, Point3::origin(), vec![9, 3, 9, 5]);
        assert_eq!(group.indices, vec![3, 5, 9]);
        assert_eq!(group.anchor(), Some(3));
        assert!(group.is_negative());
    }
}
