use glam::DVec3;

use crate::{error::Error, math::vec::RefrReflVecExt, ray::Ray};

use super::{cap_hit, plane_hit, Element, Hit, Interaction};

/// A spherical refracting surface.
///
/// The sphere touches `vertex` and its center lies at `vertex + radius *
/// axis`; a positive radius therefore curves away from an incoming ray that
/// travels along the axis. `radius == 0.0` is a flat interface. Rays are bent
/// from the `n_before` medium into the `n_after` medium, so a lens body is
/// declared as two faces with mirrored index pairs.
#[derive(Debug, Clone)]
pub struct SphereLens {
    pub(crate) vertex: DVec3,
    pub(crate) axis: DVec3,
    pub(crate) radius: f64,
    pub(crate) aperture: f64,
    pub(crate) n_before: f64,
    pub(crate) n_after: f64,
}

impl SphereLens {
    pub fn new(
        vertex: DVec3,
        axis: DVec3,
        radius: f64,
        aperture: f64,
        n_before: f64,
        n_after: f64,
    ) -> Result<Self, Error> {
        let lens = Self {
            vertex,
            axis: axis.normalize_or_zero(),
            radius,
            aperture,
            n_before,
            n_after,
        };
        lens.validate()?;
        Ok(lens)
    }

    /// A face on the z axis, vertex at `z`, oriented along +Z.
    pub fn coaxial(
        z: f64,
        radius: f64,
        aperture: f64,
        n_before: f64,
        n_after: f64,
    ) -> Result<Self, Error> {
        Self::new(
            DVec3::new(0., 0., z),
            DVec3::Z,
            radius,
            aperture,
            n_before,
            n_after,
        )
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

    pub fn n_before(&self) -> f64 {
        self.n_before
    }

    pub fn n_after(&self) -> f64 {
        self.n_after
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if !self.axis.is_normalized() {
            return Err(Error::InvalidGeometry(
                "lens axis must be a nonzero vector".into(),
            ));
        }
        if !self.radius.is_finite() {
            return Err(Error::InvalidGeometry(format!(
                "curvature radius {} is not finite",
                self.radius
            )));
        }
        if !(self.aperture.is_finite() && self.aperture > 0.0) {
            return Err(Error::InvalidGeometry(format!(
                "aperture radius {} must be finite and positive",
                self.aperture
            )));
        }
        if self.radius != 0.0 && self.aperture > self.radius.abs() {
            return Err(Error::InvalidGeometry(format!(
                "aperture radius {} exceeds curvature radius magnitude {}",
                self.aperture,
                self.radius.abs()
            )));
        }
        for n in [self.n_before, self.n_after] {
            if !(n.is_finite() && n >= 1.0) {
                return Err(Error::InvalidGeometry(format!(
                    "refractive index {n} must be finite and >= 1"
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn intersect(&self, ray: &Ray) -> Option<Hit> {
        if self.radius == 0.0 {
            plane_hit(self.vertex, self.axis, Some(self.aperture), ray)
        } else {
            cap_hit(self.vertex, self.axis, self.radius, self.aperture, ray)
        }
    }

    pub(crate) fn interact(&self, direction: DVec3, hit: &Hit) -> Interaction {
        if self.n_before == self.n_after {
            // Matched media pass through bitwise unchanged
            return Interaction::Deflect(direction);
        }

        match direction.refract(hit.normal, self.n_before / self.n_after) {
            Some(refracted) => Interaction::Deflect(refracted),
            None => Interaction::TotalInternalReflection,
        }
    }
}

impl From<SphereLens> for Element {
    fn from(lens: SphereLens) -> Self {
        Element::Lens(lens)
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::SphereLens;
    use crate::{ray::Ray, surface::Interaction};

    #[test]
    fn convex_face_hits_near_cap() {
        let eps = 1e-12;
        let lens = SphereLens::coaxial(0.0, 0.5, 0.1, 1.0, 1.5).unwrap();
        let h = 0.05;
        let ray = Ray::new(DVec3::new(h, 0., -1.), DVec3::Z);

        let hit = lens.intersect(&ray).unwrap();
        // Sagitta of the near cap, not the far side of the sphere
        let sagitta = 0.5 - f64::sqrt(0.25 - h * h);
        assert!((hit.point.z - sagitta).abs() < eps);
        assert!(hit.normal.dot(ray.direction()) < 0.0);
        assert!(hit.normal.is_normalized());
    }

    #[test]
    fn concave_face_hits_far_cap() {
        let eps = 1e-12;
        let lens = SphereLens::coaxial(0.0, -0.5, 0.1, 1.0, 1.5).unwrap();
        let h = 0.05;
        let ray = Ray::new(DVec3::new(h, 0., -1.), DVec3::Z);

        let hit = lens.intersect(&ray).unwrap();
        // The cap bulges towards the ray, in front of the vertex plane
        let sagitta = -(0.5 - f64::sqrt(0.25 - h * h));
        assert!((hit.point.z - sagitta).abs() < eps);
        assert!(hit.normal.dot(ray.direction()) < 0.0);
    }

    #[test]
    fn aperture_miss() {
        let lens = SphereLens::coaxial(0.0, 0.5, 0.1, 1.0, 1.5).unwrap();
        let ray = Ray::new(DVec3::new(0.2, 0., -1.), DVec3::Z);

        assert!(lens.intersect(&ray).is_none());
    }

    #[test]
    fn flat_face_refracts_as_plane() {
        let eps = 1e-12;
        let lens = SphereLens::coaxial(0.0, 0.0, 0.1, 1.0, 1.5).unwrap();
        let (s, c) = f64::sin_cos(30f64.to_radians());
        let ray = Ray::new(DVec3::new(-s, 0., -c), DVec3::new(s, 0., c));

        let hit = lens.intersect(&ray).unwrap();
        assert!(hit.point.distance_squared(DVec3::ZERO) < eps);

        let Interaction::Deflect(out) = lens.interact(ray.direction(), &hit) else {
            panic!("expected refraction");
        };
        // Snell: sin(theta_t) = sin(30 deg) / 1.5
        assert!((out.x - s / 1.5).abs() < eps);
        assert!(out.z > 0.0);
        assert!(out.is_normalized());
    }

    #[test]
    fn matched_media_do_not_bend() {
        let lens = SphereLens::coaxial(0.0, 0.5, 0.1, 1.4, 1.4).unwrap();
        let ray = Ray::new(DVec3::new(0.05, 0., -1.), DVec3::new(0.1, 0., 1.));

        let hit = lens.intersect(&ray).unwrap();
        assert_eq!(
            lens.interact(ray.direction(), &hit),
            Interaction::Deflect(ray.direction())
        );
    }

    #[test]
    fn total_internal_reflection_past_critical_angle() {
        let lens = SphereLens::coaxial(0.0, 0.0, 1.0, 1.5, 1.0).unwrap();
        let (s, c) = f64::sin_cos(45f64.to_radians());
        let steep = Ray::new(DVec3::new(-s, 0., -c), DVec3::new(s, 0., c));

        let hit = lens.intersect(&steep).unwrap();
        assert_eq!(
            lens.interact(steep.direction(), &hit),
            Interaction::TotalInternalReflection
        );

        // Below the critical angle the same face refracts
        let (s, c) = f64::sin_cos(30f64.to_radians());
        let shallow = Ray::new(DVec3::new(-s, 0., -c), DVec3::new(s, 0., c));
        let hit = lens.intersect(&shallow).unwrap();
        assert!(matches!(
            lens.interact(shallow.direction(), &hit),
            Interaction::Deflect(_)
        ));
    }

    #[test]
    fn rejects_impossible_geometry() {
        assert!(SphereLens::coaxial(0.0, 0.5, 0.6, 1.0, 1.5).is_err());
        assert!(SphereLens::coaxial(0.0, 0.5, -0.1, 1.0, 1.5).is_err());
        assert!(SphereLens::coaxial(0.0, 0.5, 0.1, 0.5, 1.5).is_err());
        assert!(SphereLens::coaxial(0.0, f64::NAN, 0.1, 1.0, 1.5).is_err());
        assert!(SphereLens::new(DVec3::ZERO, DVec3::ZERO, 0.5, 0.1, 1.0, 1.5).is_err());
        // Aperture equal to the radius magnitude is a full hemisphere, still valid
        assert!(SphereLens::coaxial(0.0, 0.5, 0.5, 1.0, 1.5).is_ok());
    }
}
