//! The surfaces a scene is made of:
//! - spherical refracting lens faces (flat when the curvature radius is zero)
//! - plane and sphere mirrors
//! - absorbing screens
//!
//! The physical taxonomy is closed, so surfaces are a tagged enum rather than
//! trait objects; each variant supplies its intersection test and its effect
//! on a hitting ray.

pub mod lens;
pub mod mirror;
pub mod screen;

pub use lens::SphereLens;
pub use mirror::{PlaneMirror, SphereMirror};
pub use screen::Screen;

use glam::{DVec2, DVec3};

use crate::{error::Error, math::vec::Vec3SameDirExt, ray::Ray};

/// Index of a surface in its scene's declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub usize);

/// Smallest accepted hit distance, so a ray never re-intersects the point it
/// just left.
pub const MIN_HIT: f64 = 1e-9;

/// A forward intersection along a ray.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub t: f64,
    pub point: DVec3,
    /// Unit surface normal at `point`, oriented against the incoming ray.
    pub normal: DVec3,
}

/// What a surface does to the ray that hit it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    /// Continue with a new direction.
    Deflect(DVec3),
    /// Terminate at a screen, keeping the intercept in its local frame.
    Absorb(DVec2),
    /// Refraction has no real solution; the ray stops here.
    TotalInternalReflection,
}

/// The numeric surface fields a parameter handle can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceField {
    /// Signed curvature radius.
    Radius,
    /// Aperture radius.
    Aperture,
    /// Refractive index on the transmitted side of a lens face.
    IndexAfter,
    /// Position of the surface reference point along its own axis or normal.
    AxialPosition,
}

/// One surface of the optical sequence.
#[derive(Debug, Clone)]
pub enum Element {
    Lens(SphereLens),
    Mirror(PlaneMirror),
    SphereMirror(SphereMirror),
    Screen(Screen),
}

impl Element {
    /// Closest valid forward intersection, or `None` for a miss.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        match self {
            Element::Lens(lens) => lens.intersect(ray),
            Element::Mirror(mirror) => mirror.intersect(ray),
            Element::SphereMirror(mirror) => mirror.intersect(ray),
            Element::Screen(screen) => screen.intersect(ray),
        }
    }

    /// Effect of this surface on a ray travelling along `direction` that
    /// produced `hit`. Pure; the caller applies it to the ray.
    pub fn interact(&self, direction: DVec3, hit: &Hit) -> Interaction {
        match self {
            Element::Lens(lens) => lens.interact(direction, hit),
            Element::Mirror(mirror) => mirror.interact(direction, hit),
            Element::SphereMirror(mirror) => mirror.interact(direction, hit),
            Element::Screen(screen) => screen.interact(hit),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Element::Lens(_) => "lens",
            Element::Mirror(_) => "plane mirror",
            Element::SphereMirror(_) => "sphere mirror",
            Element::Screen(_) => "screen",
        }
    }

    pub fn is_screen(&self) -> bool {
        matches!(self, Element::Screen(_))
    }

    /// Read a bindable field, `None` where the variant does not carry it.
    pub fn field(&self, field: SurfaceField) -> Option<f64> {
        use SurfaceField::*;
        match (self, field) {
            (Element::Lens(l), Radius) => Some(l.radius()),
            (Element::Lens(l), Aperture) => Some(l.aperture()),
            (Element::Lens(l), IndexAfter) => Some(l.n_after()),
            (Element::Lens(l), AxialPosition) => Some(l.vertex().dot(l.axis())),

            (Element::Mirror(m), Aperture) => m.aperture(),
            (Element::Mirror(m), AxialPosition) => Some(m.point().dot(m.normal())),

            (Element::SphereMirror(m), Radius) => Some(m.radius()),
            (Element::SphereMirror(m), Aperture) => Some(m.aperture()),
            (Element::SphereMirror(m), AxialPosition) => Some(m.vertex().dot(m.axis())),

            (Element::Screen(s), AxialPosition) => Some(s.point().dot(s.normal())),

            _ => None,
        }
    }

    /// Write a bindable field, re-validating the whole surface. On any error
    /// the surface is left unchanged.
    pub fn set_field(&mut self, field: SurfaceField, value: f64) -> Result<(), Error> {
        let mut updated = self.clone();
        updated.apply_field(field, value)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn apply_field(&mut self, field: SurfaceField, value: f64) -> Result<(), Error> {
        use SurfaceField::*;
        match (self, field) {
            (Element::Lens(l), Radius) => l.radius = value,
            (Element::Lens(l), Aperture) => l.aperture = value,
            (Element::Lens(l), IndexAfter) => l.n_after = value,
            (Element::Lens(l), AxialPosition) => {
                l.vertex += (value - l.vertex.dot(l.axis)) * l.axis
            }

            (Element::Mirror(m), Aperture) if m.aperture.is_some() => m.aperture = Some(value),
            (Element::Mirror(m), AxialPosition) => {
                m.point += (value - m.point.dot(m.normal)) * m.normal
            }

            (Element::SphereMirror(m), Radius) => m.radius = value,
            (Element::SphereMirror(m), Aperture) => m.aperture = value,
            (Element::SphereMirror(m), AxialPosition) => {
                m.vertex += (value - m.vertex.dot(m.axis)) * m.axis
            }

            (Element::Screen(s), AxialPosition) => {
                s.point += (value - s.point.dot(s.normal)) * s.normal
            }

            (element, field) => {
                return Err(Error::NoSuchField {
                    kind: element.kind(),
                    field,
                })
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), Error> {
        match self {
            Element::Lens(lens) => lens.validate(),
            Element::Mirror(mirror) => mirror.validate(),
            Element::SphereMirror(mirror) => mirror.validate(),
            Element::Screen(_) => Ok(()),
        }
    }
}

/// Ray-plane intersection with an optional radial aperture about `point`.
/// `normal` must be unit length.
pub(crate) fn plane_hit(
    point: DVec3,
    normal: DVec3,
    aperture: Option<f64>,
    ray: &Ray,
) -> Option<Hit> {
    let denom = ray.direction().dot(normal);
    if denom.abs() < f64::EPSILON * 64.0 {
        return None;
    }

    let t = (point - ray.position()).dot(normal) / denom;
    if t < MIN_HIT {
        return None;
    }

    let p = ray.at(t);
    if let Some(aperture) = aperture {
        let rel = p - point;
        let r2 = rel.length_squared() - rel.dot(normal).powi(2);
        if r2 > aperture * aperture {
            return None;
        }
    }

    Some(Hit {
        t,
        point: p,
        normal: normal.same_direction(-ray.direction()),
    })
}

/// Intersection with the cap cut out of the sphere of signed curvature
/// `radius` touching `vertex`, bounded by `aperture` around the axis.
/// `axis` must be unit length and `radius` nonzero.
pub(crate) fn cap_hit(
    vertex: DVec3,
    axis: DVec3,
    radius: f64,
    aperture: f64,
    ray: &Ray,
) -> Option<Hit> {
    let center = vertex + radius * axis;
    let d = ray.direction();
    let o = ray.position() - center;

    let a = d.length_squared();
    let b_half = o.dot(d);
    let c = o.length_squared() - radius * radius;

    let discriminant_quarter = b_half * b_half - a * c;
    if discriminant_quarter < 0.0 {
        return None;
    }

    let sqrt_d = f64::sqrt(discriminant_quarter);
    // The cap around the vertex is the near or the far side of the sphere
    // depending on approach direction and curvature sign
    let use_near = (d.dot(axis) > 0.0) ^ (radius < 0.0);
    let t = if use_near {
        (-b_half - sqrt_d) / a
    } else {
        (-b_half + sqrt_d) / a
    };
    if t < MIN_HIT {
        return None;
    }

    let point = ray.at(t);
    let rel = point - vertex;
    let r2 = rel.length_squared() - rel.dot(axis).powi(2);
    if r2 > aperture * aperture {
        return None;
    }

    Some(Hit {
        t,
        point,
        normal: (point - center).normalize().same_direction(-d),
    })
}
