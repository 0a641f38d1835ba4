pub use glam::{DVec2, DVec3};

pub trait RefrReflVecExt {
    fn refract(self, normal: DVec3, eta: f64) -> Option<DVec3>;
    fn reflect(self, normal: DVec3) -> DVec3;
}

impl RefrReflVecExt for DVec3 {
    fn reflect(self, normal: DVec3) -> DVec3 {
        self - (2.0 * self.dot(normal) * normal)
    }

    /// Vector form of Snell's law. `normal` must be unit length and oriented
    /// against `self`, `eta` is the ratio of the indices on the incident and
    /// transmitted sides. `None` when the angle is past critical.
    fn refract(self, normal: DVec3, eta: f64) -> Option<DVec3> {
        let cosi = -self.dot(normal);
        let k = 1. - eta * eta * (1. - cosi * cosi);

        if k < 0. {
            None
        } else {
            Some(eta * self + (eta * cosi - f64::sqrt(k)) * normal)
        }
    }
}

pub trait Vec3SameDirExt {
    fn same_direction(self, other: Self) -> Self;
}

impl Vec3SameDirExt for DVec3 {
    /// Return self if self and other point in the same general direction
    /// (self.dot(other) > 0.0), else -self
    fn same_direction(self, other: Self) -> Self {
        if self.dot(other) > 0.0 {
            self
        } else {
            -self
        }
    }
}
