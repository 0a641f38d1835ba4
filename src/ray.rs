use glam::{DVec2, DVec3};

use crate::surface::SurfaceId;

/// Why a ray stopped, or [`Outcome::InFlight`] while it has not.
///
/// A ray that clears every surface of its scene without being absorbed stays
/// `InFlight`; `Escaped` marks the surface that failed to produce a valid
/// forward intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    InFlight,
    /// Stopped on a screen, with the intercept in the screen's local frame.
    Absorbed { screen: SurfaceId, hit: DVec2 },
    /// No valid forward intersection with this surface.
    Escaped { surface: SurfaceId },
    /// Refraction at this surface had no real solution.
    TotalInternalReflection { surface: SurfaceId },
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InFlight)
    }
}

/// A light ray with its full position history.
///
/// The path is append-only and starts at the origin; the last entry is the
/// current position. Once an outcome other than `InFlight` is recorded, the
/// ray is frozen and further updates are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    direction: DVec3,
    path: Vec<DVec3>,
    outcome: Outcome,
}

impl Ray {
    /// `direction` must be nonzero; it is stored normalized.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        let direction = direction.normalize_or_zero();
        debug_assert!(direction.is_normalized(), "ray direction must be nonzero");
        Self {
            direction,
            path: vec![origin],
            outcome: Outcome::InFlight,
        }
    }

    pub fn position(&self) -> DVec3 {
        // The path is seeded with the origin and append-only
        self.path[self.path.len() - 1]
    }

    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    pub fn path(&self) -> &[DVec3] {
        &self.path
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn at(&self, t: f64) -> DVec3 {
        self.position() + t * self.direction
    }

    /// Append `point` to the path. Ignored on a terminated ray.
    pub fn advance_to(&mut self, point: DVec3) {
        if self.outcome.is_terminal() {
            return;
        }
        self.path.push(point);
    }

    /// Redirect the ray; `direction` must be nonzero and is stored
    /// normalized. Ignored on a terminated ray.
    pub fn set_direction(&mut self, direction: DVec3) {
        if self.outcome.is_terminal() {
            return;
        }
        let direction = direction.normalize_or_zero();
        debug_assert!(direction.is_normalized(), "ray direction must be nonzero");
        if direction.is_normalized() {
            self.direction = direction;
        }
    }

    /// Record a terminal outcome. The first one sticks.
    pub fn terminate(&mut self, outcome: Outcome) {
        if self.outcome.is_terminal() {
            return;
        }
        self.outcome = outcome;
    }
}
