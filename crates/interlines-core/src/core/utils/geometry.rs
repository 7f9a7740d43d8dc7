use nalgebra::{Isometry3, Point3, Vector3};

/// Arithmetic mean of a set of points, `None` for an empty set.
pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

/// Offset that moves `anchor` onto the centroid of `points`.
///
/// Returns a zero vector for an empty point set so the anchor stays put.
pub fn offset_to_centroid(anchor: &Point3<f64>, points: &[Point3<f64>]) -> Vector3<f64> {
    centroid(points).map_or_else(Vector3::zeros, |center| center - anchor)
}

/// Transform mapping coordinates expressed in `from`'s local frame into `to`'s
/// local frame, where both frames are given as local-to-workspace transforms.
pub fn reframe(from: &Isometry3<f64>, to: &Isometry3<f64>) -> Isometry3<f64> {
    to.inverse() * from
}
