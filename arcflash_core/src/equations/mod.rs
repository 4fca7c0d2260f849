//! # Arc-Flash Model Equations
//!
//! The empirical equations of the arc-flash model, each a pure function
//! parameterized only by its inputs and its coefficient vector. Keeping
//! them in one place enables:
//! - Verification against the published coefficient tables
//! - One canonical form per model (no per-tier copies)
//! - Consistent domain checks on every logarithm
//!
//! ## Modules
//!
//! - [`arc_current`] - Intermediate arc current at one voltage tier
//! - [`incident_energy`] - Intermediate incident energy and arc-flash boundary
//! - [`variation`] - Arc current variation factor and reduced arc current
//! - [`interpolation`] - Piecewise-linear interpolation across voltage tiers
//! - [`registry`] - Equation metadata and tracking for audit trails
//!
//! ## Units
//!
//! - Current: kA
//! - Gap, distance: mm
//! - Duration: ms
//! - Voltage: kV
//! - Energy: J/cm²
//!
//! ## References
//!
//! - ABNT NBR 17227:2023, Arc-flash hazard calculation
//! - IEEE 1584-2018, Guide for Performing Arc-Flash Hazard Calculations

pub mod arc_current;
pub mod incident_energy;
pub mod interpolation;
pub mod registry;
pub mod variation;

use crate::errors::{CalcError, CalcResult};

// Re-export commonly used items
pub use arc_current::intermediate_arc_current;
pub use incident_energy::{
    arc_flash_boundary, distance_for_energy, incident_energy, BOUNDARY_ENERGY_J_CM2,
    REFERENCE_DURATION_MS, REFERENCE_ENERGY_J_CM2,
};
pub use interpolation::{interpolate, BREAKPOINT_HIGH_KV, BREAKPOINT_LOW_KV, MAX_VOLTAGE_KV};
pub use variation::{reduced_arc_current, variation_factor};

pub use registry::{
    CodeReference, Equation, EquationCategory, EquationMetadata, EquationTracker, EquationUsage,
    Variable, ALL_EQUATIONS, generate_equations_markdown,
};

/// Base-10 logarithm that rejects non-positive or non-finite operands.
pub(crate) fn log10_checked(x: f64, operation: &str) -> CalcResult<f64> {
    if x > 0.0 && x.is_finite() {
        Ok(x.log10())
    } else {
        Err(CalcError::domain_violation(operation, x))
    }
}

/// Evaluate `c[0]·x^(n-1) + c[1]·x^(n-2) + ... + c[n-1]` (Horner form).
#[inline]
pub(crate) fn polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log10_checked() {
        assert_eq!(log10_checked(100.0, "test").unwrap(), 2.0);
        assert_eq!(log10_checked(0.0, "test").unwrap_err().error_code(), "DOMAIN_VIOLATION");
        assert!(log10_checked(-1.0, "test").is_err());
        assert!(log10_checked(f64::INFINITY, "test").is_err());
        assert!(log10_checked(f64::NAN, "test").is_err());
    }

    #[test]
    fn test_polynomial_horner() {
        // 2x² + 3x + 4 at x = 2 -> 18
        assert_eq!(polynomial(&[2.0, 3.0, 4.0], 2.0), 18.0);
        assert_eq!(polynomial(&[], 5.0), 0.0);
    }
}
