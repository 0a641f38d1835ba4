use glam::DVec3;

use crate::{error::Error, math::vec::RefrReflVecExt, ray::Ray};

use super::{cap_hit, plane_hit, Element, Hit, Interaction};

/// A flat specular mirror, optionally bounded by a radial aperture around its
/// reference point. Without an aperture the mirror is an infinite plane.
#[derive(Debug, Clone)]
pub struct PlaneMirror {
    pub(crate) point: DVec3,
    pub(crate) normal: DVec3,
    pub(crate) aperture: Option<f64>,
}

impl PlaneMirror {
    pub fn new(point: DVec3, normal: DVec3) -> Result<Self, Error> {
        let mirror = Self {
            point,
            normal: normal.normalize_or_zero(),
            aperture: None,
        };
        mirror.validate()?;
        Ok(mirror)
    }

    pub fn bounded(point: DVec3, normal: DVec3, aperture: f64) -> Result<Self, Error> {
        let mirror = Self {
            point,
            normal: normal.normalize_or_zero(),
            aperture: Some(aperture),
        };
        mirror.validate()?;
        Ok(mirror)
    }

    pub fn point(&self) -> DVec3 {
        self.point
    }

    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    pub fn aperture(&self) -> Option<f64> {
        self.aperture
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if !self.normal.is_normalized() {
            return Err(Error::InvalidGeometry(
                "mirror normal must be a nonzero vector".into(),
            ));
        }
        if let Some(aperture) = self.aperture {
            if !(aperture.is_finite() && aperture > 0.0) {
                return Err(Error::InvalidGeometry(format!(
                    "aperture radius {aperture} must be finite and positive"
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn intersect(&self, ray: &Ray) -> Option<Hit> {
        plane_hit(self.point, self.normal, self.aperture, ray)
    }

    pub(crate) fn interact(&self, direction: DVec3, hit: &Hit) -> Interaction {
        Interaction::Deflect(direction.reflect(hit.normal))
    }
}

impl From<PlaneMirror> for Element {
    fn from(mirror: PlaneMirror) -> Self {
        Element::Mirror(mirror)
    }
}

/// A spherical mirror cap, reflecting about the local sphere normal. Same
/// vertex and signed curvature conventions as a lens face, but the radius
/// must be nonzero.
#[derive(Debug, Clone)]
pub struct SphereMirror {
    pub(crate) vertex: DVec3,
    pub(crate) axis: DVec3,
    pub(crate) radius: f64,
    pub(crate) aperture: f64,
}

impl SphereMirror {
    pub fn new(vertex: DVec3, axis: DVec3, radius: f64, aperture: f64) -> Result<Self, Error> {
        let mirror = Self {
            vertex,
            axis: axis.normalize_or_zero(),
            radius,
            aperture,
        };
        mirror.validate()?;
        Ok(mirror)
    }

    pub fn vertex(&self) -> DVec3 {
        self.vertex
    }

    pub fn axis(&self) -> DVec3 {
        self.axis
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn aperture(&self) -> f64 {
        self.aperture
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if !self.axis.is_normalized() {
            return Err(Error::InvalidGeometry(
                "mirror axis must be a nonzero vector".into(),
            ));
        }
        if !(self.radius.is_finite() && self.radius != 0.0) {
            return Err(Error::InvalidGeometry(format!(
                "sphere mirror curvature radius {} must be finite and nonzero",
                self.radius
            )));
        }
        if !(self.aperture.is_finite() && self.aperture > 0.0) {
            return Err(Error::InvalidGeometry(format!(
                "aperture radius {} must be finite and positive",
                self.aperture
            )));
        }
        if self.aperture > self.radius.abs() {
            return Err(Error::InvalidGeometry(format!(
                "aperture radius {} exceeds curvature radius magnitude {}",
                self.aperture,
                self.radius.abs()
            )));
        }
        Ok(())
    }

    pub(crate) fn intersect(&self, ray: &Ray) -> Option<Hit> {
        cap_hit(self.vertex, self.axis, self.radius, self.aperture, ray)
    }

    pub(crate) fn interact(&self, direction: DVec3, hit: &Hit) -> Interaction {
        Interaction::Deflect(direction.reflect(hit.normal))
    }
}

impl From<SphereMirror> for Element {
    fn from(mirror: SphereMirror) -> Self {
        Element::SphereMirror(mirror)
    }
}
