use crate::{
    error::Error,
    scene::Scene,
    surface::{SurfaceField, SurfaceId},
};

/// A handle binding one mutable surface field for the optimizer.
///
/// Handles are plain data; they hold no reference into the scene. Bounds are
/// inclusive and enforced on every `set`, never by clamping.
#[derive(Debug, Clone)]
pub struct Param {
    pub label: String,
    pub surface: SurfaceId,
    pub field: SurfaceField,
    pub bounds: Option<(f64, f64)>,
}

impl Param {
    pub fn new(label: impl Into<String>, surface: SurfaceId, field: SurfaceField) -> Self {
        Self {
            label: label.into(),
            surface,
            field,
            bounds: None,
        }
    }

    pub fn bounded(
        label: impl Into<String>,
        surface: SurfaceId,
        field: SurfaceField,
        lo: f64,
        hi: f64,
    ) -> Self {
        Self {
            label: label.into(),
            surface,
            field,
            bounds: Some((lo, hi)),
        }
    }

    /// Current value of the bound field.
    pub fn get(&self, scene: &Scene) -> Result<f64, Error> {
        let element = scene
            .surface(self.surface)
            .ok_or(Error::UnknownSurface(self.surface))?;
        element.field(self.field).ok_or(Error::NoSuchField {
            kind: element.kind(),
            field: self.field,
        })
    }

    /// Write `value` through the handle. Fails without touching the scene
    /// when the value is out of bounds or would make the surface invalid.
    pub fn set(&self, scene: &mut Scene, value: f64) -> Result<(), Error> {
        if let Some((lo, hi)) = self.bounds {
            if value < lo || value > hi {
                return Err(Error::OutOfBounds {
                    label: self.label.clone(),
                    value,
                    lo,
                    hi,
                });
            }
        }
        scene
            .surface_mut(self.surface)
            .ok_or(Error::UnknownSurface(self.surface))?
            .set_field(self.field, value)
    }
}
