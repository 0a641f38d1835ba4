use glam::{DVec2, DVec3};

use crate::{error::Error, ray::Ray};

use super::{plane_hit, Element, Hit, Interaction};

/// An unbounded absorbing plane that records where rays land.
///
/// Intercepts are reported in a 2D frame spanned by two axes orthogonal to
/// the normal and centered on `point`. The frame is fixed at construction, so
/// intercept coordinates stay comparable while the screen is moved along its
/// normal during optimization.
#[derive(Debug, Clone)]
pub struct Screen {
    pub(crate) point: DVec3,
    pub(crate) normal: DVec3,
    e1: DVec3,
    e2: DVec3,
}

impl Screen {
    pub fn new(point: DVec3, normal: DVec3) -> Result<Self, Error> {
        let normal = normal.normalize_or_zero();
        if !normal.is_normalized() {
            return Err(Error::InvalidGeometry(
                "screen normal must be a nonzero vector".into(),
            ));
        }
        let (e1, e2) = normal.any_orthonormal_pair();
        Ok(Self {
            point,
            normal,
            e1,
            e2,
        })
    }

    pub fn point(&self) -> DVec3 {
        self.point
    }

    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// The screen-local coordinates of a world-space point.
    pub fn local(&self, p: DVec3) -> DVec2 {
        let rel = p - self.point;
        DVec2::new(rel.dot(self.e1), rel.dot(self.e2))
    }

    pub(crate) fn intersect(&self, ray: &Ray) -> Option<Hit> {
        plane_hit(self.point, self.normal, None, ray)
    }

    pub(crate) fn interact(&self, hit: &Hit) -> Interaction {
        Interaction::Absorb(self.local(hit.point))
    }
}

impl From<Screen> for Element {
    fn from(screen: Screen) -> Self {
        Element::Screen(screen)
    }
}
