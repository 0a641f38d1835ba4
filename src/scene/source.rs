use std::f64::consts::TAU;

use glam::DVec3;
use rand::{
    distributions::{Distribution, Uniform},
    rngs::StdRng,
    Rng, SeedableRng,
};

use crate::ray::Ray;

/// Spawns the rays of one bundle, in a deterministic order.
pub trait Source {
    fn rays(&self) -> Vec<Ray>;
}

/// Uniform polar sampling of the unit disk.
pub struct UnitDisk;
impl Distribution<[f64; 2]> for UnitDisk {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> [f64; 2] {
        let uniform = Uniform::new(0., 1.);
        let phi = TAU * uniform.sample(rng);
        let r = f64::sqrt(uniform.sample(rng));
        let (s, c) = f64::sin_cos(phi);
        [r * c, r * s]
    }
}

/// A collimated bundle filling a disk along an angular spiral.
///
/// Ray `i` sits at angle `i * TAU / rays_per_turn` and radius
/// `radius * i / count`, so the first ray rides the chief axis.
pub struct SpiralSource {
    pub center: DVec3,
    pub direction: DVec3,
    pub radius: f64,
    pub count: usize,
    pub rays_per_turn: usize,
}

impl SpiralSource {
    pub fn new(center: DVec3, direction: DVec3, radius: f64, count: usize) -> Self {
        Self {
            center,
            direction,
            radius,
            count,
            rays_per_turn: 20,
        }
    }
}

impl Source for SpiralSource {
    fn rays(&self) -> Vec<Ray> {
        let (e1, e2) = self.direction.normalize().any_orthonormal_pair();
        (0..self.count)
            .map(|i| {
                let theta = TAU * i as f64 / self.rays_per_turn as f64;
                let r = self.radius * i as f64 / self.count as f64;
                let (s, c) = f64::sin_cos(theta);
                Ray::new(self.center + r * (c * e1 + s * e2), self.direction)
            })
            .collect()
    }
}

/// A collimated bundle on concentric rings, plus the chief ray.
pub struct RingSource {
    pub center: DVec3,
    pub direction: DVec3,
    pub radius: f64,
    pub rings: usize,
    pub rays_per_ring: usize,
}

impl Source for RingSource {
    fn rays(&self) -> Vec<Ray> {
        let (e1, e2) = self.direction.normalize().any_orthonormal_pair();
        let mut rays = vec![Ray::new(self.center, self.direction)];
        for ring in 1..=self.rings {
            let r = self.radius * ring as f64 / self.rings as f64;
            for k in 0..self.rays_per_ring {
                let theta = TAU * k as f64 / self.rays_per_ring as f64;
                let (s, c) = f64::sin_cos(theta);
                rays.push(Ray::new(self.center + r * (c * e1 + s * e2), self.direction));
            }
        }
        rays
    }
}

/// A point-diverging bundle: directions spiral out in angle from the chief
/// axis up to `half_angle` radians.
pub struct PointSource {
    pub position: DVec3,
    pub direction: DVec3,
    pub half_angle: f64,
    pub count: usize,
    pub rays_per_turn: usize,
}

impl PointSource {
    pub fn new(position: DVec3, direction: DVec3, half_angle: f64, count: usize) -> Self {
        Self {
            position,
            direction,
            half_angle,
            count,
            rays_per_turn: 20,
        }
    }
}

impl Source for PointSource {
    fn rays(&self) -> Vec<Ray> {
        let axis = self.direction.normalize();
        let (e1, e2) = axis.any_orthonormal_pair();
        (0..self.count)
            .map(|i| {
                let psi = TAU * i as f64 / self.rays_per_turn as f64;
                let phi = self.half_angle * i as f64 / self.count as f64;
                let (sp, cp) = f64::sin_cos(phi);
                let (s, c) = f64::sin_cos(psi);
                Ray::new(self.position, cp * axis + sp * (c * e1 + s * e2))
            })
            .collect()
    }
}

/// A collimated bundle with seeded random disk sampling. The same seed always
/// spawns the same bundle.
pub struct JitteredDisk {
    pub center: DVec3,
    pub direction: DVec3,
    pub radius: f64,
    pub count: usize,
    pub seed: u64,
}

impl Source for JitteredDisk {
    fn rays(&self) -> Vec<Ray> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let (e1, e2) = self.direction.normalize().any_orthonormal_pair();
        (0..self.count)
            .map(|_| {
                let [x, y] = UnitDisk.sample(&mut rng);
                Ray::new(
                    self.center + self.radius * (x * e1 + y * e2),
                    self.direction,
                )
            })
            .collect()
    }
}
