//! Sequential optical ray tracing with a small derivative-free design optimizer.
//!
//! A [`Scene`] holds refracting, reflecting and absorbing surfaces in the
//! order light is meant to meet them. Rays spawned by the scene's sources are
//! propagated surface by surface, each ray keeping its full position history
//! and a terminal [`Outcome`]. Impact points collected on a screen form a
//! [`Spot`](math::stat::Spot), whose radial statistics serve as the objective
//! of [`optim::minimize`], a bounded compass search over exposed surface
//! parameters (curvature radius, aperture, axial position, refractive index).

pub mod error;
pub mod glass;
pub mod math;
pub mod optim;
pub mod ray;
pub mod scene;
pub mod surface;
pub mod utils;

pub use error::Error;
pub use glass::Glass;
pub use math::stat::Spot;
pub use optim::{minimize, Minimum, Objective, Options, Param, SpotMetric, Status};
pub use ray::{Outcome, Ray};
pub use scene::{JitteredDisk, PointSource, RingSource, Scene, Source, SpiralSource};
pub use surface::{
    Element, PlaneMirror, Screen, SphereLens, SphereMirror, SurfaceField, SurfaceId,
};
