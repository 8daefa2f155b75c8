use nalgebra::{Matrix3, Point3, Unit, Vector3};

#[inline]
pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    nalgebra::distance(a, b)
}

#[inline]
pub fn magnitude(p: &Point3<f64>) -> f64 {
    p.coords.norm()
}

#[inline]
pub fn average_point(a: &Point3<f64>, b: &Point3<f64>) -> Point3<f64> {
    nalgebra::center(a, b)
}

pub fn centroid<'a, I>(points: I) -> Option<Point3<f64>>
where
    I: IntoIterator<Item = &'a Point3<f64>>,
{
    let mut sum = Vector3::zeros();
    let mut count = 0usize;
    for p in points {
        sum += p.coords;
        count += 1;
    }
    (count > 0).then(|| Point3::from(sum / count as f64))
}

/// Angle in degrees between two vectors, in `[0, 180]`.
#[inline]
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.angle(b).to_degrees()
}

/// Angle in degrees at `vertex` formed by `a` and `b`.
#[inline]
pub fn bond_angle(a: &Point3<f64>, vertex: &Point3<f64>, b: &Point3<f64>) -> f64 {
    angle_between(&(a - vertex), &(b - vertex))
}

/// Signed torsion angle in degrees for the chain `p0-p1-p2-p3`, in `(-180, 180]`.
pub fn dihedral(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>, p3: &Point3<f64>) -> f64 {
    let b1 = p1 - p0;
    let b2 = p2 - p1;
    let b3 = p3 - p2;

    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);

    let y = b2.norm() * b1.dot(&n2);
    let x = n1.dot(&n2);
    y.atan2(x).to_degrees()
}

/// Least-squares plane normal through a point cloud.
///
/// The normal is the eigenvector of the coordinate covariance matrix with the
/// smallest eigenvalue. Returns `None` for fewer than three points or when the
/// eigenvector cannot be normalized.
pub fn plane_normal(points: &[Point3<f64>]) -> Option<Unit<Vector3<f64>>> {
    if points.len() < 3 {
        return None;
    }
    let center = centroid(points)?;

    let mut covariance = Matrix3::zeros();
    for p in points {
        let d = p - center;
        covariance += d * d.transpose();
    }

    let eigen = covariance.symmetric_eigen();
    let (smallest, _) = eigen
        .eigenvalues
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))?;
    let normal: Vector3<f64> = eigen.eigenvectors.column(smallest).into_owned();
    Unit::try_new(normal, 1e-12)
}

#[inline]
pub fn project_onto_plane(
    point: &Point3<f64>,
    plane_point: &Point3<f64>,
    normal: &Unit<Vector3<f64>>,
) -> Point3<f64> {
    let offset = (point - plane_point).dot(normal);
    point - normal.into_inner() * offset
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_identity() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let q = Point3::new(-4.0, 0.5, 7.25);
        assert!(f64_approx_equal(distance(&p, &q), distance(&q, &p)));
        assert!(f64_approx_equal(distance(&p, &p), 0.0));
    }

    #[test]
    fn magnitude_is_norm_of_position_vector() {
        let p = Point3::new(3.0, 4.0, 12.0);
        assert!(f64_approx_equal(magnitude(&p), 13.0));
    }

    #[test]
    fn average_point_is_equidistant_from_both_inputs() {
        let p = Point3::new(1.0, -2.0, 3.0);
        let q = Point3::new(5.0, 4.0, -1.0);
        let mid = average_point(&p, &q);
        assert!(f64_approx_equal(distance(&mid, &p), distance(&mid, &q)));
        assert!(f64_approx_equal(mid.x, 3.0));
    }

    #[test]
    fn centroid_of_empty_input_is_none() {
        let points: Vec<Point3<f64>> = Vec::new();
        assert!(centroid(&points).is_none());
    }

    #[test]
    fn bond_angle_of_right_angle_is_ninety_degrees() {
        let angle = bond_angle(
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::origin(),
            &Point3::new(0.0, 1.0, 0.0),
        );
        assert!(f64_approx_equal(angle, 90.0));
    }

    #[test]
    fn dihedral_distinguishes_cis_trans_and_sign() {
        let p0 = Point3::new(1.0, 0.0, 0.0);
        let p1 = Point3::new(0.0, 0.0, 0.0);
        let p2 = Point3::new(0.0, 1.0, 0.0);

        let cis = dihedral(&p0, &p1, &p2, &Point3::new(1.0, 1.0, 0.0));
        let trans = dihedral(&p0, &p1, &p2, &Point3::new(-1.0, 1.0, 0.0));
        let plus = dihedral(&p0, &p1, &p2, &Point3::new(0.0, 1.0, 1.0));
        let minus = dihedral(&p0, &p1, &p2, &Point3::new(0.0, 1.0, -1.0));

        assert!(f64_approx_equal(cis, 0.0));
        assert!(f64_approx_equal(trans.abs(), 180.0));
        assert!(f64_approx_equal(plus.abs(), 90.0));
        assert!(f64_approx_equal(plus, -minus));
    }

    #[test]
    fn plane_normal_of_xy_ring_is_z_axis() {
        let points: Vec<_> = (0..6)
            .map(|i| {
                let t = (60.0 * i as f64).to_radians();
                Point3::new(1.39 * t.cos(), 1.39 * t.sin(), 0.0)
            })
            .collect();
        let normal = plane_normal(&points).unwrap();
        assert!((normal.z.abs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn plane_normal_requires_three_points() {
        let points = [Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        assert!(plane_normal(&points).is_none());
    }

    #[test]
    fn projection_drops_out_of_plane_component() {
        let normal = Unit::new_normalize(Vector3::new(0.0, 0.0, 2.0));
        let projected = project_onto_plane(
            &Point3::new(1.0, 2.0, 5.0),
            &Point3::new(0.0, 0.0, 1.0),
            &normal,
        );
        assert!(f64_approx_equal(projected.x, 1.0));
        assert!(f64_approx_equal(projected.y, 2.0));
        assert!(f64_approx_equal(projected.z, 1.0));
    }
}
