use thiserror::Error;

use crate::surface::{SurfaceField, SurfaceId};

/// Errors shared by scene construction, parameter handles and the optimizer.
///
/// Ray terminations (escape, absorption, total internal reflection) are not
/// errors; they are recorded on the ray as its [`Outcome`](crate::Outcome).
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Parameter '{label}' value {value} outside bounds [{lo}, {hi}]")]
    OutOfBounds {
        label: String,
        value: f64,
        lo: f64,
        hi: f64,
    },

    #[error("No surface with id {0:?}")]
    UnknownSurface(SurfaceId),

    #[error("Surface {0:?} is not a screen")]
    NotAScreen(SurfaceId),

    #[error("A {kind} has no {field:?} field")]
    NoSuchField {
        kind: &'static str,
        field: SurfaceField,
    },

    #[error("No rays reached screen {0:?}, objective is undefined")]
    EmptySpot(SurfaceId),

    #[error("Optimizer called with an empty parameter list")]
    NoParameters,
}
