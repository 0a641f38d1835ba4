use glam::DVec2;

/// The impact points collected on one screen for a traced bundle, with the
/// radial statistics used as image quality measures.
///
/// All statistics return `None` on an empty spot; a spot with no points has
/// no meaningful size.
#[derive(Debug, Clone, Default)]
pub struct Spot {
    pub points: Vec<DVec2>,
}

impl Spot {
    pub fn new() -> Self {
        Self { points: vec![] }
    }

    pub fn add_point(&mut self, point: DVec2) {
        self.points.push(point)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn centroid(&self) -> Option<DVec2> {
        if self.points.is_empty() {
            return None;
        }

        let sum = self
            .points
            .iter()
            .fold(DVec2::ZERO, |acc, point| acc + *point);
        Some(sum / self.points.len() as f64)
    }

    /// RMS radial spread about the centroid.
    pub fn rms_radius(&self) -> Option<f64> {
        self.centroid().and_then(|c| self.rms_about(c))
    }

    /// RMS distance to an arbitrary target point.
    pub fn rms_about(&self, target: DVec2) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }

        let sum = self
            .points
            .iter()
            .fold(0.0, |acc, point| acc + point.distance_squared(target));
        Some((sum / self.points.len() as f64).sqrt())
    }

    /// Largest distance from the centroid.
    pub fn max_radius(&self) -> Option<f64> {
        let c = self.centroid()?;
        Some(
            self.points
                .iter()
                .fold(0.0, |acc, point| f64::max(acc, point.distance(c))),
        )
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::Spot;

    fn square_spot() -> Spot {
        let mut spot = Spot::new();
        for point in [
            DVec2::new(1., 1.),
            DVec2::new(1., 3.),
            DVec2::new(3., 1.),
            DVec2::new(3., 3.),
        ] {
            spot.add_point(point);
        }
        spot
    }

    #[test]
    fn centroid() {
        let eps = 1e-12;
        let spot = square_spot();

        assert!(spot.centroid().unwrap().distance_squared(DVec2::new(2., 2.)) < eps);
    }

    #[test]
    fn radii() {
        let eps = 1e-12;
        let spot = square_spot();
        // Every corner sits sqrt(2) from the centroid
        let r = f64::sqrt(2.);

        assert!((spot.rms_radius().unwrap() - r).abs() < eps);
        assert!((spot.max_radius().unwrap() - r).abs() < eps);
        assert!((spot.rms_about(DVec2::ZERO).unwrap() - f64::sqrt(10.)).abs() < eps);
    }

    #[test]
    fn empty_spot_has_no_statistics() {
        let spot = Spot::new();

        assert!(spot.is_empty());
        assert!(spot.centroid().is_none());
        assert!(spot.rms_radius().is_none());
        assert!(spot.max_radius().is_none());
        assert!(spot.rms_about(DVec2::ZERO).is_none());
    }
}
