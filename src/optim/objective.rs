use glam::DVec2;

use crate::{error::Error, math::stat::Spot, scene::Scene, surface::SurfaceId};

/// The scalar measure taken of a screen spot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpotMetric {
    /// RMS radial spread about the spot centroid.
    RmsRadius,
    /// Largest distance from the spot centroid.
    MaxRadius,
    /// RMS distance to a target point in screen coordinates.
    RmsAbout(DVec2),
}

impl SpotMetric {
    pub fn measure(&self, spot: &Spot) -> Option<f64> {
        match self {
            SpotMetric::RmsRadius => spot.rms_radius(),
            SpotMetric::MaxRadius => spot.max_radius(),
            SpotMetric::RmsAbout(target) => spot.rms_about(*target),
        }
    }
}

/// An image quality objective on one screen of a scene.
#[derive(Debug, Clone, Copy)]
pub struct Objective {
    pub screen: SurfaceId,
    pub metric: SpotMetric,
}

impl Objective {
    pub fn new(screen: SurfaceId, metric: SpotMetric) -> Self {
        Self { screen, metric }
    }

    /// Spawn the scene's sources, trace the bundle and measure the spot.
    ///
    /// Rays that escape or stop on total internal reflection never reach the
    /// screen; when none survives the objective is undefined and the
    /// evaluation fails with [`Error::EmptySpot`].
    pub fn evaluate(&self, scene: &Scene) -> Result<f64, Error> {
        let mut rays = scene.spawn();
        scene.trace_bundle(&mut rays);
        let spot = scene.spot(self.screen, &rays)?;
        self.metric
            .measure(&spot)
            .ok_or(Error::EmptySpot(self.screen))
    }
}
