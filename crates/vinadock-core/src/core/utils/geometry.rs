use nalgebra::Point3;

pub fn calculate_rmsd(coords1: &[Point3<f64>], coords2: &[Point3<f64>]) -> Option<f64> {
    if coords1.len() != coords2.len() || coords1.is_empty() {
        return None;
    }
    let n = coords1.len() as f64;
    let squared_dist_sum: f64 = coords1
        .iter()
        .zip(coords2.iter())
        .map(|(p1, p2)| (p1 - p2).norm_squared())
        .sum();
    Some((squared_dist_sum / n).sqrt())
}

/// Rounds every component of `point` to `decimals` decimal places.
pub fn round_point(point: &Point3<f64>, decimals: i32) -> Point3<f64> {
    let factor = 10f64.powi(decimals);
    point.map(|v| (v * factor).round() / factor)
}

/// Geometric center of a point set, or `None` if it is empty.
pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(nalgebra::Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rmsd_of_identical_sets_is_zero() {
        let coords = vec![Point3::new(1.0, 2.0, 3.0), Point3::new(-1.0, 0.5, 2.0)];
        assert_eq!(calculate_rmsd(&coords, &coords), Some(0.0));
    }

    #[test]
    fn rmsd_of_uniform_shift_equals_shift_length() {
        let a = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)];
        let b: Vec<_> = a.iter().map(|p| p + nalgebra::Vector3::new(3.0, 4.0, 0.0)).collect();
        let rmsd = calculate_rmsd(&a, &b).unwrap();
        assert!((rmsd - 5.0).abs() < 1e-12);
    }

    #[test]
    fn rmsd_rejects_mismatched_or_empty_sets() {
        let a = vec![Point3::origin()];
        assert_eq!(calculate_rmsd(&a, &[]), None);
        assert_eq!(calculate_rmsd(&[], &[]), None);
    }

    #[test]
    fn round_point_keeps_three_decimals() {
        let p = round_point(&Point3::new(1.23456, -0.0004, 9.9995), 3);
        assert_eq!(p, Point3::new(1.235, -0.0, 10.0));
    }

    #[test]
    fn centroid_averages_points() {
        let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0)];
        assert_eq!(centroid(&points), Some(Point3::new(1.0, 1.0, 1.0)));
        assert_eq!(centroid(&[]), None);
    }
}
