//! Polyline and polygon paths

use smallvec::SmallVec;

/// A 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Path command
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Close,
}

/// A 2D path composed of commands
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: SmallVec<[PathCommand; 16]>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open polyline through `points`. Empty input gives an empty path.
    pub fn polyline(points: &[Point]) -> Self {
        let mut path = Path::new();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            path.commands.push(PathCommand::MoveTo(*first));
            path.commands.extend(iter.map(|p| PathCommand::LineTo(*p)));
        }
        path
    }

    /// Closed polygon through `points`.
    pub fn polygon(points: &[Point]) -> Self {
        let mut path = Self::polyline(points);
        if !path.is_empty() {
            path.commands.push(PathCommand::Close);
        }
        path
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Number of vertices visited.
    pub fn vertex_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| !matches!(c, PathCommand::Close))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_closes_polyline() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ];
        let path = Path::polygon(&pts);
        assert!(path.is_closed());
        assert_eq!(path.vertex_count(), 3);
        assert!(!Path::polyline(&pts).is_closed());
    }

    #[test]
    fn empty_polygon_stays_empty() {
        assert!(Path::polygon(&[]).is_empty());
    }
}
