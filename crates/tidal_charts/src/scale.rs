/// Linear map from a data domain onto a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    pub fn new(domain_min: f64, domain_max: f64, range_min: f32, range_max: f32) -> Self {
        Self {
            domain_min,
            domain_max,
            range_min,
            range_max,
        }
    }

    pub fn map(&self, value: f64) -> f32 {
        let d = self.domain_max - self.domain_min;
        if d.abs() < 1e-12 {
            return self.range_min;
        }
        let t = (value - self.domain_min) / d;
        self.range_min + (t * (self.range_max - self.range_min) as f64) as f32
    }

    /// `count` evenly spaced values, endpoints included.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let n = count.max(2);
        let span = self.domain_max - self.domain_min;
        (0..n)
            .map(|i| self.domain_min + span * (i as f64 / (n - 1) as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_include_endpoints() {
        let s = LinearScale::new(10.0, 20.0, 0.0, 100.0);
        let t = s.ticks(6);
        assert_eq!(t.len(), 6);
        assert_eq!(t[0], 10.0);
        assert_eq!(t[5], 20.0);
    }

    #[test]
    fn map_handles_descending_range() {
        let s = LinearScale::new(0.0, 100.0, 200.0, 100.0);
        assert!((s.map(50.0) - 150.0).abs() < 1e-4);
    }

    #[test]
    fn flat_domain_maps_to_range_start() {
        let s = LinearScale::new(5.0, 5.0, 10.0, 20.0);
        assert_eq!(s.map(5.0), 10.0);
    }
}
