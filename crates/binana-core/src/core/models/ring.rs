use crate::core::utils::geometry;
use nalgebra::{Point3, Unit, Vector3};
use std::collections::BTreeSet;

/// A planar aromatic ring with geometry fixed at perception time.
#[derive(Debug, Clone, PartialEq)]
pub struct AromaticRing {
    /// Member atom indices in cycle order.
    pub indices: Vec<usize>,
    pub center: Point3<f64>,
    pub normal: Unit<Vector3<f64>>,
    /// Largest centre-to-member distance.
    pub radius: f64,
}

impl AromaticRing {
    /// Builds a ring from its members and their coordinates (same order).
    ///
    /// Returns `None` when fewer than three points are given or they do not
    /// span a plane.
    pub fn from_points(indices: Vec<usize>, points: &[Point3<f64>]) -> Option<Self> {
        if indices.len() != points.len() {
            return None;
        }
        let center = geometry::centroid(points)?;
        let normal = geometry::plane_normal(points)?;
        let radius = points
            .iter()
            .map(|p| geometry::distance(p, &center))
            .fold(0.0, f64::max);
        Some(Self {
            indices,
            center,
            normal,
            radius,
        })
    }

    pub fn project(&self, point: &Point3<f64>) -> Point3<f64> {
        geometry::project_onto_plane(point, &self.center, &self.normal)
    }

    /// Whether `point` projects onto the ring plane within `radius + padding`
    /// of the centre.
    pub fn projects_within(&self, point: &Point3<f64>, padding: f64) -> bool {
        geometry::distance(&self.project(point), &self.center) < self.radius + padding
    }

    /// Angle between the two ring normals, folded into `[0, 90]`.
    pub fn normal_angle_to(&self, other: &AromaticRing) -> f64 {
        let angle = geometry::angle_between(&self.normal, &other.normal);
        angle.min(180.0 - angle)
    }

    pub fn index_set(&self) -> BTreeSet<usize> {
        self.indices.iter().copied().collect()
    }

    pub fn first_index(&self) -> Option<usize> {
        self.indices.first().copied()
    }
}
