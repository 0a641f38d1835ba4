//! Sellmeier dispersion for a few stock optical glasses, used to pick the
//! fixed index pair of a surface for a design wavelength.
//!
//! Coefficients from M. N. Polyanskiy, "Refractive index database",
//! https://refractiveindex.info

/// Fraunhofer d line, the usual design wavelength, in meters.
pub const D_LINE: f64 = 587.6e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glass {
    Bk7,
    Baf10,
    Bak1,
    Fk51a,
}

impl Glass {
    /// Sellmeier B coefficients and C coefficients in square micrometers.
    fn coefficients(self) -> ([f64; 3], [f64; 3]) {
        match self {
            Glass::Bk7 => (
                [1.03961212, 0.231792344, 1.01046945],
                [0.00600069867, 0.0200179144, 103.560653],
            ),
            Glass::Baf10 => (
                [1.5851495, 0.143559385, 1.08521269],
                [0.00926681282, 0.0424489805, 105.613573],
            ),
            Glass::Bak1 => (
                [1.12365662, 0.309276848, 0.881511957],
                [0.00644742752, 0.0222284402, 107.297751],
            ),
            Glass::Fk51a => (
                [0.971247817, 0.216901417, 0.904651666],
                [0.00472301995, 0.0153575612, 168.68133],
            ),
        }
    }

    /// Refractive index at `wavelength` in meters.
    pub fn index_at(self, wavelength: f64) -> f64 {
        let (b, c) = self.coefficients();
        let l = (wavelength * 1e6).powi(2);
        f64::sqrt(1. + b[0] * l / (l - c[0]) + b[1] * l / (l - c[1]) + b[2] * l / (l - c[2]))
    }
}
