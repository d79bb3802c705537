use tidal_paint::Point;

/// Control-point pull toward neighbouring vertices.
const TENSION: f32 = 0.2;

/// Point on the cubic bezier `p0 -> p3` at `t`.
pub fn cubic_bezier(t: f32, p0: Point, p1: Point, p2: Point, p3: Point) -> Point {
    let u = 1.0 - t;
    let uu = u * u;
    let tt = t * t;
    let a = uu * u;
    let b = 3.0 * uu * t;
    let c = 3.0 * u * tt;
    let d = tt * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

/// Resample a polyline as a chain of cubic segments through every vertex.
///
/// Each span `p1 -> p2` gets controls derived from its neighbours
/// (`p1 + (p2 - p0) * 0.2`, `p2 - (p3 - p1) * 0.2`) and contributes
/// `segments + 1` points. Fewer than two points are returned as-is.
pub fn smooth_points(points: &[Point], segments: usize) -> Vec<Point> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let segments = segments.max(1);
    let last = points.len() - 1;
    let mut out = Vec::with_capacity(last * (segments + 1));
    for i in 0..last {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];
        let cp1 = Point::new(
            p1.x + (p2.x - p0.x) * TENSION,
            p1.y + (p2.y - p0.y) * TENSION,
        );
        let cp2 = Point::new(
            p2.x - (p3.x - p1.x) * TENSION,
            p2.y - (p3.y - p1.y) * TENSION,
        );
        for j in 0..=segments {
            let t = j as f32 / segments as f32;
            out.push(cubic_bezier(t, p1, cp1, cp2, p2));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bezier_hits_endpoints() {
        let p0 = Point::new(0.0, 0.0);
        let p3 = Point::new(10.0, 5.0);
        let c = Point::new(3.0, 9.0);
        assert_eq!(cubic_bezier(0.0, p0, c, c, p3), p0);
        assert_eq!(cubic_bezier(1.0, p0, c, c, p3), p3);
    }

    #[test]
    fn smoothing_passes_through_vertices() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 0.0),
        ];
        let out = smooth_points(&pts, 8);
        assert_eq!(out.len(), 2 * 9);
        assert_eq!(out[0], pts[0]);
        assert_eq!(out[8], pts[1]);
        assert_eq!(out[17], pts[2]);
    }

    #[test]
    fn collinear_input_stays_on_the_line() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 20.0),
        ];
        for p in smooth_points(&pts, 5) {
            assert!((p.x - p.y).abs() < 1e-4);
        }
    }

    #[test]
    fn short_input_is_unchanged() {
        let one = [Point::new(1.0, 2.0)];
        assert_eq!(smooth_points(&one, 10), one.to_vec());
        assert!(smooth_points(&[], 10).is_empty());
    }
}
