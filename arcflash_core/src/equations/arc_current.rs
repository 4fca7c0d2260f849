//! # Intermediate Arc Current
//!
//! Arc current at one voltage tier from the bolted fault current and the
//! electrode gap.
//!
//! ## Formula
//!
//! ```text
//! lg Ia = (k1 + k2·lg Ibf + k3·lg G) + lg(k4·Ibf⁶ + k5·Ibf⁵ + ... + k9·Ibf + k10)
//! Ia    = 10^(lg Ia)
//! ```
//!
//! The logarithmic fit and the polynomial correction add in log space,
//! which is the same as scaling `10^(k1 + k2·lg Ibf + k3·lg G)` by the
//! polynomial.
//!
//! ## Example
//!
//! ```rust
//! use arcflash_core::coefficients::CurrentCoefficients;
//! use arcflash_core::equations::intermediate_arc_current;
//!
//! let k = CurrentCoefficients([
//!     -0.04287, 1.035, -0.083, 0.0, 0.0, -4.783e-9, 1.962e-6, -2.29e-4, 3.141e-3, 1.092,
//! ]);
//! let ia = intermediate_arc_current(4.85, 152.0, &k).unwrap();
//! assert!((ia - 3.374).abs() < 0.005);
//! ```

use super::{log10_checked, polynomial};
use crate::coefficients::CurrentCoefficients;
use crate::errors::{CalcError, CalcResult};

/// Logarithmic term `k1 + k2·lg Ibf + k3·lg G`
pub fn log_base(ibf_ka: f64, gap_mm: f64, k: &CurrentCoefficients) -> CalcResult<f64> {
    Ok(k.k(1) + k.k(2) * log10_checked(ibf_ka, "lg Ibf")? + k.k(3) * log10_checked(gap_mm, "lg G")?)
}

/// Sixth-degree correction polynomial `k4·Ibf⁶ + ... + k10`
pub fn correction_polynomial(ibf_ka: f64, k: &CurrentCoefficients) -> f64 {
    polynomial(&k.0[3..], ibf_ka)
}

/// Intermediate arc current (kA) at one voltage tier.
///
/// # Arguments
///
/// * `ibf_ka` - Bolted fault current (kA)
/// * `gap_mm` - Electrode gap (mm)
/// * `k` - Current coefficients k1..k10 for the tier
///
/// # Errors
///
/// - `InvalidInput` if `ibf_ka` or `gap_mm` is not positive
/// - `DomainViolation` if the correction polynomial is not positive
pub fn intermediate_arc_current(ibf_ka: f64, gap_mm: f64, k: &CurrentCoefficients) -> CalcResult<f64> {
    if !ibf_ka.is_finite() || ibf_ka <= 0.0 {
        return Err(CalcError::invalid_input(
            "fault_current_ka",
            ibf_ka.to_string(),
            "Bolted fault current must be positive",
        ));
    }
    if !gap_mm.is_finite() || gap_mm <= 0.0 {
        return Err(CalcError::invalid_input(
            "gap_mm",
            gap_mm.to_string(),
            "Electrode gap must be positive",
        ));
    }

    let exponent = log_base(ibf_ka, gap_mm, k)?
        + log10_checked(correction_polynomial(ibf_ka, k), "lg(current correction polynomial)")?;
    Ok(10f64.powf(exponent))
}
