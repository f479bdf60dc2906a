#![allow(non_upper_case_globals)]

//! Convenience functions and constructs to handle minutiae associated with
//! conversion to and from the natural units of a harmonic oscillator.
//!
//! Concrete physical constants are taken from NIST.

use std::f64::consts::PI;

/// Planck constant (kg m^2 s^-1)
pub const h: f64 = 6.62607015e-34;
//             +/- 0 (exact)

/// reduced Planck constant (kg m^2 s^-1)
pub const hbar: f64 = h / 2.0 / PI;
//                +/- 0 (exact)

/// unified atomic mass unit (kg)
pub const mu: f64 = 1.66053906660e-27;
//              +/- 0.00000000050e-27

/// Natural scaling factors of an oscillator of given mass and (angular)
/// frequency, relative to some base unit system.
///
/// Constructor methods produce scaling constants whose numerical values are
/// represented in the base unit system.
///
/// See [`docs/units`][crate::docs#units] for more information.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OscUnits {
    /// Particle mass.
    pub m: f64,
    /// Angular frequency of the oscillator.
    pub omega: f64,
    /// Length scale, `√(ħ / m ω)`.
    pub a: f64,
    /// Energy scale, `ħ ω`.
    pub e: f64,
    /// Time scale, `1 / ω`.
    pub t: f64,
}

impl OscUnits {
    /// Construct from a mass and angular frequency given in
    /// meters/kilograms/seconds (MKS) units.
    pub fn from_mks(mass: f64, omega: f64) -> Self {
        Self {
            m: mass,
            omega,
            a: (hbar / mass / omega).sqrt(),
            e: hbar * omega,
            t: omega.recip(),
        }
    }

    /// Convert a quantity with dimensions of length in the base unit system to
    /// natural units.
    pub fn to_nat_length<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.a.recip()
    }

    /// Convert a dimensionless quantity to one with length units in the base
    /// unit system.
    pub fn from_nat_length<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.a
    }

    /// Convert a dimensionless quantity to one with energy units in the base
    /// unit system.
    pub fn from_nat_energy<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.e
    }

    /// Convert a quantity with dimensions of time in the base unit system to
    /// natural units.
    pub fn to_nat_time<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.t.recip()
    }

    /// Convert a dimensionless quantity to one with time units in the base
    /// unit system.
    pub fn from_nat_time<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray as nd;

    #[test]
    fn oscillator_scales() {
        let mass = 171.0 * mu;
        let omega = 2.0 * PI * 30e3;
        let uu = OscUnits::from_mks(mass, omega);
        // ground state energy ħω/2 = m ω² a² / 2 at the ground-state width
        assert_relative_eq!(mass * omega.powi(2) * uu.a.powi(2), uu.e, max_relative = 1e-12);
        assert_relative_eq!(uu.e, h * 30e3, max_relative = 1e-12);
        assert_relative_eq!(uu.t * omega, 1.0, max_relative = 1e-15);
    }

    #[test]
    fn conversions() {
        let uu = OscUnits::from_mks(171.0 * mu, 2.0 * PI * 30e3);
        // one oscillation period is 2π natural time units
        assert_relative_eq!(uu.to_nat_time(1.0 / 30e3), 2.0 * PI, max_relative = 1e-12);
        assert_relative_eq!(uu.from_nat_time(2.0 * PI), 1.0 / 30e3, max_relative = 1e-12);
        // level spacing is one natural energy unit
        assert_relative_eq!(uu.from_nat_energy(1.0), hbar * uu.omega, max_relative = 1e-12);
        let x: nd::Array1<f64> = nd::array![0.0, 1e-7, -3e-7];
        let back: nd::Array1<f64> = uu.from_nat_length(uu.to_nat_length(&x));
        for (b, x) in back.iter().zip(&x) {
            assert_relative_eq!(*b, *x, max_relative = 1e-12);
        }
    }
}
