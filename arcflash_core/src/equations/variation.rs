//! # Arc Current Variation
//!
//! The arcing current fluctuates; a reduced arc current is computed from
//! the final (interpolated) arc current so protective-device clearing time
//! can be re-checked at the lower current.
//!
//! ## Formulas
//!
//! ```text
//! VarCf  = k11·V⁶ + k12·V⁵ + k13·V⁴ + k14·V³ + k15·V² + k16·V + k17
//! Ia_min = Ia · (1 − 0.5·VarCf)
//! ```

use super::polynomial;
use crate::coefficients::VariationCoefficients;

/// Arc current variation factor VarCf at the system voltage (kV).
pub fn variation_factor(system_voltage_kv: f64, k: &VariationCoefficients) -> f64 {
    polynomial(&k.0, system_voltage_kv)
}

/// Reduced ("minimum") arc current from the final arc current and VarCf.
pub fn reduced_arc_current(ia_final_ka: f64, var_cf: f64) -> f64 {
    ia_final_ka * (1.0 - 0.5 * var_cf)
}
