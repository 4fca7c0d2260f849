//! # Intermediate Incident Energy and Arc-Flash Boundary
//!
//! Incident energy at the working distance for one voltage tier, and its
//! inverse: the distance at which the energy falls to a threshold.
//!
//! ## Formulas
//!
//! ```text
//! den = k4·Ibf⁷ + k5·Ibf⁶ + k6·Ibf⁵ + k7·Ibf⁴ + k8·Ibf³ + k9·Ibf² + k10·Ibf
//! X   = k1 + k2·lg G + k3·Ia/den + k11·lg Ibf + k13·lg Ia + lg(1/CF)
//!
//! E   = (12.552 / 50) · T · 10^(X + k12·lg D)              [J/cm²]
//! D   = 10^((lg(E_t / ((12.552 / 50) · T)) − X) / k12)     [mm]
//! ```
//!
//! `k3·Ia/den` is taken as zero when `den` is zero (configurations whose
//! polynomial coefficients are all zero). The boundary uses
//! `E_t = 5.0 J/cm²` (1.2 cal/cm²).
//!
//! T is in milliseconds and is normalized by the 50 ms reference duration.
//!
//! ## Example
//!
//! ```rust
//! use arcflash_core::coefficients::{CoefficientTable, ElectrodeConfiguration, VoltageTier};
//! use arcflash_core::equations::{arc_flash_boundary, incident_energy, BOUNDARY_ENERGY_J_CM2};
//!
//! let row = CoefficientTable::standard()
//!     .tier(ElectrodeConfiguration::Vcb, VoltageTier::V2700)
//!     .unwrap();
//! let e = incident_energy(4.19, 4.85, 152.0, 914.4, 197.0, &row.energy, 1.298).unwrap();
//! let afb = arc_flash_boundary(4.19, 4.85, 152.0, 197.0, &row.energy, 1.298).unwrap();
//!
//! // Energy at the boundary distance is the threshold energy
//! let at_boundary = incident_energy(4.19, 4.85, 152.0, afb, 197.0, &row.energy, 1.298).unwrap();
//! assert!((at_boundary - BOUNDARY_ENERGY_J_CM2).abs() < 1e-9);
//! assert!(e < BOUNDARY_ENERGY_J_CM2 && afb < 914.4);
//! ```

use super::{log10_checked, polynomial};
use crate::coefficients::EnergyCoefficients;
use crate::errors::{CalcError, CalcResult};

/// Reference arc energy constant (J/cm²)
pub const REFERENCE_ENERGY_J_CM2: f64 = 12.552;

/// Reference arc duration (ms)
pub const REFERENCE_DURATION_MS: f64 = 50.0;

/// Incident energy defining the arc-flash boundary (J/cm², = 1.2 cal/cm²)
pub const BOUNDARY_ENERGY_J_CM2: f64 = 5.0;

/// Energy delivered per unit of `10^exponent` for a given duration
#[inline]
fn duration_scale(duration_ms: f64) -> f64 {
    REFERENCE_ENERGY_J_CM2 / REFERENCE_DURATION_MS * duration_ms
}

/// Seventh-degree denominator polynomial, zero constant term
pub fn denominator_polynomial(ibf_ka: f64, k: &EnergyCoefficients) -> f64 {
    ibf_ka * polynomial(&k.0[3..10], ibf_ka)
}

/// Exponent `X` of the energy equation, everything except `k12·lg D`.
pub fn exponent_without_distance(
    ia_ka: f64,
    ibf_ka: f64,
    gap_mm: f64,
    k: &EnergyCoefficients,
    cf: f64,
) -> CalcResult<f64> {
    let den = denominator_polynomial(ibf_ka, k);
    let current_term = if den == 0.0 { 0.0 } else { k.k(3) * ia_ka / den };

    Ok(k.k(1)
        + k.k(2) * log10_checked(gap_mm, "lg G")?
        + current_term
        + k.k(11) * log10_checked(ibf_ka, "lg Ibf")?
        + k.k(13) * log10_checked(ia_ka, "lg Ia")?
        + log10_checked(1.0 / cf, "lg(1/CF)")?)
}

fn check_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), reason))
    }
}

/// Intermediate incident energy (J/cm²) at one voltage tier.
///
/// # Arguments
///
/// * `ia_ka` - Intermediate arc current for the same tier (kA)
/// * `ibf_ka` - Bolted fault current (kA)
/// * `gap_mm` - Electrode gap (mm)
/// * `distance_mm` - Working distance (mm)
/// * `duration_ms` - Arc duration (ms)
/// * `k` - Energy coefficients k1..k13 for the tier
/// * `cf` - Enclosure correction factor
pub fn incident_energy(
    ia_ka: f64,
    ibf_ka: f64,
    gap_mm: f64,
    distance_mm: f64,
    duration_ms: f64,
    k: &EnergyCoefficients,
    cf: f64,
) -> CalcResult<f64> {
    check_positive("working_distance_mm", distance_mm, "Working distance must be positive")?;
    check_positive("arc_duration_ms", duration_ms, "Arc duration must be positive")?;

    let exponent = exponent_without_distance(ia_ka, ibf_ka, gap_mm, k, cf)?
        + k.k(12) * log10_checked(distance_mm, "lg D")?;
    Ok(duration_scale(duration_ms) * 10f64.powf(exponent))
}

/// Distance (mm) at which the incident energy equals `target_j_cm2`.
///
/// # Errors
///
/// `InvalidModel` if k12 is zero: the model then has no distance dependency
/// and cannot be inverted.
pub fn distance_for_energy(
    target_j_cm2: f64,
    ia_ka: f64,
    ibf_ka: f64,
    gap_mm: f64,
    duration_ms: f64,
    k: &EnergyCoefficients,
    cf: f64,
) -> CalcResult<f64> {
    check_positive("target_energy_j_cm2", target_j_cm2, "Target energy must be positive")?;
    check_positive("arc_duration_ms", duration_ms, "Arc duration must be positive")?;

    let k12 = k.k(12);
    if k12 == 0.0 {
        return Err(CalcError::invalid_model(
            "Energy coefficient k12 is zero; boundary distance cannot be solved",
        ));
    }

    let energy_ratio = log10_checked(target_j_cm2 / duration_scale(duration_ms), "lg(E / (12.552/50 · T))")?;
    let exponent = exponent_without_distance(ia_ka, ibf_ka, gap_mm, k, cf)?;
    Ok(10f64.powf((energy_ratio - exponent) / k12))
}

/// Arc-flash boundary (mm) at one voltage tier.
///
/// The distance at which incident energy is [`BOUNDARY_ENERGY_J_CM2`].
pub fn arc_flash_boundary(
    ia_ka: f64,
    ibf_ka: f64,
    gap_mm: f64,
    duration_ms: f64,
    k: &EnergyCoefficients,
    cf: f64,
) -> CalcResult<f64> {
    distance_for_energy(BOUNDARY_ENERGY_J_CM2, ia_ka, ibf_ka, gap_mm, duration_ms, k, cf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coefficients::{CoefficientTable, ElectrodeConfiguration, VoltageTier};
    use proptest::prelude::*;

    fn energy_row(configuration: ElectrodeConfiguration, tier: VoltageTier) -> EnergyCoefficients {
        CoefficientTable::standard().tier(configuration, tier).unwrap().energy
    }

    #[test]
    fn test_vcb_tiers_at_validated_point() {
        // Ibf = 4.85 kA, G = 152 mm, D = 914.4 mm, T = 197 ms, CF = 1.2981875 (EES 37.5 in)
        let cases = [
            (VoltageTier::V600, 3.372782, 2.8086, 637.36),
            (VoltageTier::V2700, 4.190686, 4.1951, 817.62),
            (VoltageTier::V14300, 4.566090, 4.7315, 882.77),
        ];
        for (tier, ia, e_expected, afb_expected) in cases {
            let k = energy_row(ElectrodeConfiguration::Vcb, tier);
            let e = incident_energy(ia, 4.85, 152.0, 914.4, 197.0, &k, 1.2981875).unwrap();
            let afb = arc_flash_boundary(ia, 4.85, 152.0, 197.0, &k, 1.2981875).unwrap();
            assert!((e - e_expected).abs() < 1e-3, "{}: E = {}", tier, e);
            assert!((afb - afb_expected).abs() < 0.05, "{}: AFB = {}", tier, afb);
        }
    }

    #[test]
    fn test_energy_scales_linearly_with_duration() {
        let k = energy_row(ElectrodeConfiguration::Hcb, VoltageTier::V600);
        let e1 = incident_energy(20.0, 30.0, 25.0, 457.2, 50.0, &k, 1.0).unwrap();
        let e2 = incident_energy(20.0, 30.0, 25.0, 457.2, 100.0, &k, 1.0).unwrap();
        assert!((e2 / e1 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_denominator_drops_current_term() {
        let mut k = energy_row(ElectrodeConfiguration::Vcb, VoltageTier::V600);
        for i in 3..10 {
            k.0[i] = 0.0;
        }
        assert_eq!(denominator_polynomial(4.85, &k), 0.0);

        let x = exponent_without_distance(3.37, 4.85, 152.0, &k, 1.0).unwrap();
        let expected = k.k(1) + k.k(2) * 152f64.log10() + k.k(11) * 4.85f64.log10() + k.k(13) * 3.37f64.log10();
        assert!((x - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_k12_is_invalid_model() {
        let mut k = energy_row(ElectrodeConfiguration::Vcb, VoltageTier::V600);
        k.0[11] = 0.0;
        let err = arc_flash_boundary(3.37, 4.85, 152.0, 197.0, &k, 1.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_MODEL");
        assert!(err.to_string().contains("k12"));
    }

    #[test]
    fn test_non_positive_cf_is_domain_violation() {
        let k = energy_row(ElectrodeConfiguration::Vcb, VoltageTier::V600);
        let err = incident_energy(3.37, 4.85, 152.0, 914.4, 197.0, &k, 0.0).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_VIOLATION");
        let err = incident_energy(3.37, 4.85, 152.0, 914.4, 197.0, &k, -1.2).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_VIOLATION");
    }

    #[test]
    fn test_invalid_distance_and_duration() {
        let k = energy_row(ElectrodeConfiguration::Vcb, VoltageTier::V600);
        let err = incident_energy(3.37, 4.85, 152.0, 0.0, 197.0, &k, 1.0).unwrap_err();
        assert!(err.to_string().contains("working_distance_mm"));
        let err = arc_flash_boundary(3.37, 4.85, 152.0, -5.0, &k, 1.0).unwrap_err();
        assert!(err.to_string().contains("arc_duration_ms"));
    }

    proptest! {
        #[test]
        fn prop_distance_round_trip(
            config_index in 0usize..5,
            tier_index in 0usize..3,
            ibf in 1.0f64..60.0,
            gap in 10.0f64..160.0,
            distance in 150.0f64..3000.0,
            duration in 10.0f64..2000.0,
            cf in 0.5f64..2.0,
        ) {
            let configuration = ElectrodeConfiguration::ALL[config_index];
            let tier = VoltageTier::ALL[tier_index];
            let row = CoefficientTable::standard().tier(configuration, tier).unwrap();
            let ia = crate::equations::intermediate_arc_current(ibf, gap, &row.current).unwrap();

            let e = incident_energy(ia, ibf, gap, distance, duration, &row.energy, cf).unwrap();
            let solved = distance_for_energy(e, ia, ibf, gap, duration, &row.energy, cf).unwrap();
            prop_assert!((solved - distance).abs() / distance < 1e-6, "D = {}, solved = {}", distance, solved);
        }

        #[test]
        fn prop_boundary_energy_is_threshold(
            ibf in 1.0f64..60.0,
            duration in 10.0f64..2000.0,
        ) {
            let row = CoefficientTable::standard()
                .tier(ElectrodeConfiguration::Vcbb, VoltageTier::V14300)
                .unwrap();
            let ia = crate::equations::intermediate_arc_current(ibf, 152.0, &row.current).unwrap();
            let afb = arc_flash_boundary(ia, ibf, 152.0, duration, &row.energy, 1.1).unwrap();
            let e = incident_energy(ia, ibf, 152.0, afb, duration, &row.energy, 1.1).unwrap();
            prop_assert!((e - BOUNDARY_ENERGY_J_CM2).abs() / BOUNDARY_ENERGY_J_CM2 < 1e-6);
        }
    }
}
