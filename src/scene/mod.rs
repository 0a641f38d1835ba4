pub mod source;

pub use source::{JitteredDisk, PointSource, RingSource, Source, SpiralSource};

use log::debug;
use rayon::iter::{IntoParallelRefMutIterator, ParallelIterator};

use crate::{
    error::Error,
    math::stat::Spot,
    ray::{Outcome, Ray},
    surface::{Element, Interaction, SurfaceId},
};

/// An ordered optical sequence plus the sources that feed it.
///
/// Surfaces are met in declaration order, the sequential convention: folded
/// systems list a surface once per pass. The scene is immutable while rays
/// are traced; only the optimizer mutates surfaces, between bundles.
#[derive(Default)]
pub struct Scene {
    surfaces: Vec<Element>,
    sources: Vec<Box<dyn Source + Send + Sync>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a surface to the sequence and return its id.
    pub fn insert_surface(&mut self, surface: impl Into<Element>) -> SurfaceId {
        self.surfaces.push(surface.into());
        SurfaceId(self.surfaces.len() - 1)
    }

    /// Register a ray source.
    pub fn insert_source<S: Source + Send + Sync + 'static>(&mut self, source: S) {
        self.sources.push(Box::new(source))
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&Element> {
        self.surfaces.get(id.0)
    }

    pub fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut Element> {
        self.surfaces.get_mut(id.0)
    }

    pub fn surfaces(&self) -> &[Element] {
        &self.surfaces
    }

    /// The rays of every source, in declaration order.
    pub fn spawn(&self) -> Vec<Ray> {
        self.sources.iter().flat_map(|source| source.rays()).collect()
    }

    /// Propagate one ray through the sequence.
    ///
    /// Each surface interaction appends exactly one position to the ray path;
    /// a missed surface terminates the ray as escaped without appending. A
    /// ray that clears every surface stays in flight.
    pub fn trace(&self, ray: &mut Ray) {
        for (i, surface) in self.surfaces.iter().enumerate() {
            if ray.outcome().is_terminal() {
                break;
            }
            let id = SurfaceId(i);

            let Some(hit) = surface.intersect(ray) else {
                ray.terminate(Outcome::Escaped { surface: id });
                break;
            };

            ray.advance_to(hit.point);
            match surface.interact(ray.direction(), &hit) {
                Interaction::Deflect(direction) => ray.set_direction(direction),
                Interaction::Absorb(local) => ray.terminate(Outcome::Absorbed {
                    screen: id,
                    hit: local,
                }),
                Interaction::TotalInternalReflection => {
                    ray.terminate(Outcome::TotalInternalReflection { surface: id })
                }
            }
        }
    }

    /// Trace every ray of a bundle independently.
    pub fn trace_bundle(&self, rays: &mut [Ray]) {
        for ray in rays.iter_mut() {
            self.trace(ray);
        }
        self.log_bundle(rays);
    }

    /// [`Self::trace_bundle`] on the rayon pool. Rays never interact, so the
    /// result is identical to the sequential trace.
    pub fn par_trace_bundle(&self, rays: &mut [Ray]) {
        rays.par_iter_mut().for_each(|ray| self.trace(ray));
        self.log_bundle(rays);
    }

    fn log_bundle(&self, rays: &[Ray]) {
        let (mut absorbed, mut escaped, mut reflected) = (0usize, 0usize, 0usize);
        for ray in rays {
            match ray.outcome() {
                Outcome::Absorbed { .. } => absorbed += 1,
                Outcome::Escaped { .. } => escaped += 1,
                Outcome::TotalInternalReflection { .. } => reflected += 1,
                Outcome::InFlight => {}
            }
        }
        debug!(
            target: "trace",
            "bundle of {}: {} absorbed, {} escaped, {} internally reflected",
            rays.len(),
            absorbed,
            escaped,
            reflected
        );
    }

    /// Gather the intercepts recorded on one screen, in ray order.
    pub fn spot(&self, screen: SurfaceId, rays: &[Ray]) -> Result<Spot, Error> {
        match self.surfaces.get(screen.0) {
            None => return Err(Error::UnknownSurface(screen)),
            Some(element) if !element.is_screen() => return Err(Error::NotAScreen(screen)),
            Some(_) => {}
        }

        let mut spot = Spot::new();
        for ray in rays {
            if let Outcome::Absorbed { screen: s, hit } = ray.outcome() {
                if s == screen {
                    spot.add_point(hit);
                }
            }
        }
        Ok(spot)
    }
}
