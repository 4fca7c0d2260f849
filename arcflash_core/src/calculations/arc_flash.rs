//! # Arc-Flash Evaluation
//!
//! Orchestrates one complete arc-flash hazard evaluation: the enclosure
//! correction, the three voltage-tier evaluations, interpolation to the
//! system voltage, the reduced arc current and the PPE category.
//!
//! ## Procedure
//!
//! 1. Validate the input
//! 2. Compute the enclosure correction factor once (CF = 1 in open air)
//! 3. For each tier (600 V, 2700 V, 14300 V): arc current, then incident
//!    energy and arc-flash boundary from that tier's arc current
//! 4. Interpolate current, energy and boundary independently at the
//!    system voltage
//! 5. Variation factor and reduced arc current from the final current
//! 6. Convert the energy to cal/cm² and classify
//!
//! Any failing step aborts the evaluation; no partial result is returned.
//!
//! ## Example
//!
//! ```rust
//! use arcflash_core::calculations::arc_flash::{calculate, CalculationInput};
//! use arcflash_core::coefficients::ElectrodeConfiguration;
//! use arcflash_core::enclosure::{EnclosureClass, EnclosureGeometry};
//! use arcflash_core::hazard::PpeCategory;
//! use arcflash_core::units::{KiloAmps, KiloVolts, Millimeters, Milliseconds};
//!
//! let input = CalculationInput {
//!     label: "SWGR-1".to_string(),
//!     fault_current_ka: KiloAmps(4.85),
//!     gap_mm: Millimeters(152.0),
//!     working_distance_mm: Millimeters(914.4),
//!     arc_duration_ms: Milliseconds(197.0),
//!     system_voltage_kv: KiloVolts(13.8),
//!     electrode_configuration: ElectrodeConfiguration::Vcb,
//!     enclosure: EnclosureGeometry::new(1143.0, 762.0, 762.0),
//!     enclosure_class: EnclosureClass::Typical,
//! };
//!
//! let result = calculate(&input).unwrap();
//! println!("Arc current: {:.3}", result.arc_current_final_ka);
//! println!("Incident energy: {:.2}", result.incident_energy_final_cal_cm2);
//! println!("Boundary: {:.0}", result.arc_flash_boundary_final_mm);
//! assert_eq!(result.ppe_category, PpeCategory::Category0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::coefficients::{CoefficientTable, ElectrodeConfiguration, VoltageTier};
use crate::enclosure::{correction_factor, EnclosureClass, EnclosureGeometry, EES_FIT_RANGE_IN};
use crate::equations::{
    arc_flash_boundary, incident_energy, intermediate_arc_current, interpolate, reduced_arc_current,
    variation_factor, Equation, EquationTracker, BREAKPOINT_HIGH_KV, BREAKPOINT_LOW_KV,
};
use crate::errors::{CalcError, CalcResult};
use crate::hazard::{classify, PpeCategory};
use crate::units::{CalPerCm2, Inches, JoulesPerCm2, KiloAmps, KiloVolts, Millimeters, Milliseconds};

/// Smallest bolted fault current accepted (exclusive)
pub const MIN_FAULT_CURRENT_KA: f64 = 0.1;

/// Supported system voltage range (inclusive)
pub const VOLTAGE_RANGE_KV: (f64, f64) = (0.208, 15.0);

/// Durations below this are almost certainly seconds entered as milliseconds
const SUSPICIOUS_DURATION_MS: f64 = 1.0;

/// Input parameters for one arc-flash evaluation.
///
/// Field names carry their units. Duration is always milliseconds; convert
/// a clearing time in seconds with `Milliseconds::from(Seconds(..))`.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "SWGR-1",
///   "fault_current_ka": 4.85,
///   "gap_mm": 152.0,
///   "working_distance_mm": 914.4,
///   "arc_duration_ms": 197.0,
///   "system_voltage_kv": 13.8,
///   "electrode_configuration": "VCB",
///   "enclosure": { "height_mm": 1143.0, "width_mm": 762.0, "depth_mm": 762.0 },
///   "enclosure_class": "typical"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// User label for this evaluation (e.g., "SWGR-1", "MCC-2 bucket 4")
    #[serde(default)]
    pub label: String,

    /// Bolted fault current, must exceed 0.1 kA
    pub fault_current_ka: KiloAmps,

    /// Electrode gap
    pub gap_mm: Millimeters,

    /// Working distance from the arc to the worker
    pub working_distance_mm: Millimeters,

    /// Arc duration (protective device clearing time)
    pub arc_duration_ms: Milliseconds,

    /// System voltage, 0.208 to 15.0 kV
    pub system_voltage_kv: KiloVolts,

    /// Electrode configuration, always given explicitly
    pub electrode_configuration: ElectrodeConfiguration,

    /// Enclosure interior dimensions
    pub enclosure: EnclosureGeometry,

    #[serde(default)]
    pub enclosure_class: EnclosureClass,
}

fn check_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), reason));
    }
    Ok(())
}

impl CalculationInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        let ibf = self.fault_current_ka.0;
        if !ibf.is_finite() || ibf <= MIN_FAULT_CURRENT_KA {
            return Err(CalcError::invalid_input(
                "fault_current_ka",
                ibf.to_string(),
                format!("Bolted fault current must exceed {} kA", MIN_FAULT_CURRENT_KA),
            ));
        }

        check_positive("gap_mm", self.gap_mm.0, "Electrode gap must be positive")?;
        check_positive(
            "working_distance_mm",
            self.working_distance_mm.0,
            "Working distance must be positive",
        )?;
        check_positive("arc_duration_ms", self.arc_duration_ms.0, "Arc duration must be positive")?;

        let v = self.system_voltage_kv.0;
        let (v_min, v_max) = VOLTAGE_RANGE_KV;
        if !(v_min..=v_max).contains(&v) {
            return Err(CalcError::invalid_input(
                "system_voltage_kv",
                v.to_string(),
                format!("System voltage must be between {} and {} kV", v_min, v_max),
            ));
        }

        self.enclosure.validate()?;

        if self.arc_duration_ms.0 < SUSPICIOUS_DURATION_MS {
            warn!(
                arc_duration_ms = self.arc_duration_ms.0,
                "Arc duration below 1 ms; was a time in seconds supplied?"
            );
        }

        Ok(())
    }
}

/// Arc current, incident energy and boundary at one voltage tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntermediateResult {
    pub tier: VoltageTier,
    pub arc_current_ka: KiloAmps,
    /// Kept in J/cm²; converted only in the final result
    pub incident_energy_j_cm2: JoulesPerCm2,
    pub arc_flash_boundary_mm: Millimeters,
}

/// Results of one arc-flash evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalResult {
    /// Label from the input
    pub label: String,

    /// Arc current interpolated at the system voltage
    pub arc_current_final_ka: KiloAmps,

    /// Reduced (minimum) arc current, for re-checking device clearing time
    pub arc_current_reduced_ka: KiloAmps,

    /// Incident energy at the working distance
    pub incident_energy_final_cal_cm2: CalPerCm2,

    /// Distance at which incident energy falls to 1.2 cal/cm²
    pub arc_flash_boundary_final_mm: Millimeters,

    /// Required protective equipment category
    pub ppe_category: PpeCategory,

    /// Incident energy before unit conversion
    pub incident_energy_final_j_cm2: JoulesPerCm2,

    /// Enclosure correction factor applied at every tier
    pub correction_factor: f64,

    /// Equivalent enclosure size, `None` in open air
    pub equivalent_enclosure_size_in: Option<Inches>,

    /// Arc current variation factor at the system voltage
    pub variation_factor: f64,

    /// Per-tier values in tier order (600 V, 2700 V, 14300 V)
    pub tiers: [IntermediateResult; 3],
}

impl FinalResult {
    /// Whether energized work may proceed with rated equipment
    pub fn energized_work_permitted(&self) -> bool {
        self.ppe_category.energized_work_permitted()
    }

    /// Whether the working distance lies inside the arc-flash boundary
    pub fn within_boundary(&self, working_distance: Millimeters) -> bool {
        working_distance.0 < self.arc_flash_boundary_final_mm.0
    }
}

/// Arc-flash engine bound to one coefficient table.
///
/// The engine holds no mutable state; evaluations are independent and the
/// engine may be shared freely between threads.
#[derive(Debug, Clone, Copy)]
pub struct ArcFlashEngine<'t> {
    table: &'t CoefficientTable,
}

impl ArcFlashEngine<'static> {
    /// Engine over the built-in NBR 17227 coefficients
    pub fn standard() -> Self {
        ArcFlashEngine::new(CoefficientTable::standard())
    }
}

impl<'t> ArcFlashEngine<'t> {
    pub fn new(table: &'t CoefficientTable) -> Self {
        ArcFlashEngine { table }
    }

    /// The coefficient table this engine evaluates with
    pub fn table(&self) -> &'t CoefficientTable {
        self.table
    }

    /// Evaluate one input.
    pub fn evaluate(&self, input: &CalculationInput) -> CalcResult<FinalResult> {
        let mut tracker = EquationTracker::new();
        self.evaluate_traced(input, &mut tracker)
    }

    /// Evaluate one input, recording every equation used into `tracker`.
    ///
    /// Nothing is recorded if the evaluation fails.
    pub fn evaluate_traced(&self, input: &CalculationInput, tracker: &mut EquationTracker) -> CalcResult<FinalResult> {
        input.validate()?;

        let mut local = EquationTracker::new();
        let configuration = input.electrode_configuration;
        let v = input.system_voltage_kv.0;

        let (cf, ees) = self.correction(input, &mut local)?;

        let tiers = [
            self.evaluate_tier(input, VoltageTier::V600, cf, &mut local)?,
            self.evaluate_tier(input, VoltageTier::V2700, cf, &mut local)?,
            self.evaluate_tier(input, VoltageTier::V14300, cf, &mut local)?,
        ];
        let [t600, t2700, t14300] = tiers;

        if v > BREAKPOINT_HIGH_KV {
            local.record(Equation::InterpolationHighSegment, "system voltage");
        } else if v > BREAKPOINT_LOW_KV {
            local.record(Equation::InterpolationLowSegment, "system voltage");
        }

        let ia_final = interpolate(v, t600.arc_current_ka.0, t2700.arc_current_ka.0, t14300.arc_current_ka.0);
        let e_final = interpolate(
            v,
            t600.incident_energy_j_cm2.0,
            t2700.incident_energy_j_cm2.0,
            t14300.incident_energy_j_cm2.0,
        );
        let afb_final = interpolate(
            v,
            t600.arc_flash_boundary_mm.0,
            t2700.arc_flash_boundary_mm.0,
            t14300.arc_flash_boundary_mm.0,
        );

        let var_cf = variation_factor(v, &self.table.variation(configuration)?);
        let ia_min = reduced_arc_current(ia_final, var_cf);
        local.record(Equation::ArcCurrentVariationFactor, "system voltage");
        local.record(Equation::ReducedArcCurrent, "final arc current");

        let energy_j = JoulesPerCm2(e_final);
        let energy_cal = CalPerCm2::from(energy_j);
        let category = classify(energy_cal);
        local.record(Equation::EnergyUnitConversion, "final incident energy");
        local.record(Equation::PpeCategorySelection, "final incident energy");

        info!(
            label = %input.label,
            configuration = %configuration,
            system_voltage_kv = v,
            arc_current_ka = ia_final,
            reduced_arc_current_ka = ia_min,
            incident_energy_cal_cm2 = energy_cal.0,
            arc_flash_boundary_mm = afb_final,
            category = %category,
            "Arc-flash evaluation complete"
        );

        tracker.merge(local);

        Ok(FinalResult {
            label: input.label.clone(),
            arc_current_final_ka: KiloAmps(ia_final),
            arc_current_reduced_ka: KiloAmps(ia_min),
            incident_energy_final_cal_cm2: energy_cal,
            arc_flash_boundary_final_mm: Millimeters(afb_final),
            ppe_category: category,
            incident_energy_final_j_cm2: energy_j,
            correction_factor: cf,
            equivalent_enclosure_size_in: ees,
            variation_factor: var_cf,
            tiers,
        })
    }

    /// Enclosure correction factor and equivalent enclosure size.
    fn correction(&self, input: &CalculationInput, tracker: &mut EquationTracker) -> CalcResult<(f64, Option<Inches>)> {
        let configuration = input.electrode_configuration;
        let class = input.enclosure_class;

        let Some(b) = self.table.correction(configuration, class)? else {
            debug!(configuration = %configuration, "Open-air configuration, CF = 1");
            return Ok((1.0, None));
        };

        let ees = input.enclosure.equivalent_size()?;
        let (fit_min, fit_max) = EES_FIT_RANGE_IN;
        if ees.0 < fit_min || ees.0 > fit_max {
            warn!(
                equivalent_enclosure_size_in = ees.0,
                "Equivalent enclosure size outside the {}-{} in fit range", fit_min, fit_max
            );
        }

        let cf = correction_factor(ees.0, class, &b).map_err(|e| e.with_context(configuration.code(), None))?;
        tracker.record(Equation::EquivalentEnclosureSize, "enclosure");
        tracker.record(
            match class {
                EnclosureClass::Typical => Equation::CorrectionFactorTypical,
                EnclosureClass::Shallow => Equation::CorrectionFactorShallow,
            },
            "enclosure",
        );

        debug!(
            configuration = %configuration,
            class = %class,
            equivalent_enclosure_size_in = ees.0,
            correction_factor = cf,
            "Enclosure correction"
        );

        Ok((cf, Some(ees)))
    }

    /// Arc current, energy and boundary at one tier.
    fn evaluate_tier(
        &self,
        input: &CalculationInput,
        tier: VoltageTier,
        cf: f64,
        tracker: &mut EquationTracker,
    ) -> CalcResult<IntermediateResult> {
        let configuration = input.electrode_configuration;
        let in_tier = |e: CalcError| e.with_context(configuration.code(), Some(tier.label()));

        let row = self.table.tier(configuration, tier)?;
        let ibf = input.fault_current_ka.0;
        let gap = input.gap_mm.0;
        let duration = input.arc_duration_ms.0;

        let ia = intermediate_arc_current(ibf, gap, &row.current).map_err(in_tier)?;
        let energy = incident_energy(
            ia,
            ibf,
            gap,
            input.working_distance_mm.0,
            duration,
            &row.energy,
            cf,
        )
        .map_err(in_tier)?;
        let boundary = arc_flash_boundary(ia, ibf, gap, duration, &row.energy, cf).map_err(in_tier)?;

        let context = format!("{} tier", tier.label());
        tracker.record(Equation::IntermediateArcCurrent, context.as_str());
        tracker.record(Equation::IntermediateIncidentEnergy, context.as_str());
        tracker.record(Equation::IntermediateArcFlashBoundary, context);

        debug!(
            configuration = %configuration,
            tier = tier.label(),
            arc_current_ka = ia,
            incident_energy_j_cm2 = energy,
            arc_flash_boundary_mm = boundary,
            "Tier evaluated"
        );

        Ok(IntermediateResult {
            tier,
            arc_current_ka: KiloAmps(ia),
            incident_energy_j_cm2: JoulesPerCm2(energy),
            arc_flash_boundary_mm: Millimeters(boundary),
        })
    }
}

/// Evaluate with the built-in coefficient table.
pub fn calculate(input: &CalculationInput) -> CalcResult<FinalResult> {
    ArcFlashEngine::standard().evaluate(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coefficients::{CurrentCoefficients, EnergyCoefficients};

    fn switchgear_input() -> CalculationInput {
        CalculationInput {
            label: "SWGR-1".to_string(),
            fault_current_ka: KiloAmps(4.85),
            gap_mm: Millimeters(152.0),
            working_distance_mm: Millimeters(914.4),
            arc_duration_ms: Milliseconds(197.0),
            system_voltage_kv: KiloVolts(13.8),
            electrode_configuration: ElectrodeConfiguration::Vcb,
            enclosure: EnclosureGeometry::new(1143.0, 762.0, 762.0),
            enclosure_class: EnclosureClass::Typical,
        }
    }

    #[test]
    fn test_vcb_medium_voltage_switchgear() {
        let result = calculate(&switchgear_input()).unwrap();

        assert!((result.correction_factor - 1.2981875).abs() < 1e-9);
        assert!((result.equivalent_enclosure_size_in.unwrap().0 - 37.5).abs() < 1e-9);

        assert!((result.tiers[0].arc_current_ka.0 - 3.37278).abs() < 1e-4);
        assert!((result.tiers[1].incident_energy_j_cm2.0 - 4.19508).abs() < 1e-4);
        assert!((result.tiers[2].arc_flash_boundary_mm.0 - 882.766).abs() < 1e-2);

        assert!((result.arc_current_final_ka.0 - 4.549909).abs() < 1e-4);
        assert!((result.incident_energy_final_j_cm2.0 - 4.708335).abs() < 1e-4);
        assert!((result.incident_energy_final_cal_cm2.0 - 1.125319).abs() < 1e-4);
        assert!((result.arc_flash_boundary_final_mm.0 - 879.9585).abs() < 1e-2);
        assert!((result.variation_factor - 0.031316).abs() < 1e-6);
        assert!((result.arc_current_reduced_ka.0 - 4.478666).abs() < 1e-4);
        assert_eq!(result.ppe_category, PpeCategory::Category0);
        assert_eq!(result.label, "SWGR-1");
    }

    #[test]
    fn test_final_current_between_upper_tiers() {
        let result = calculate(&switchgear_input()).unwrap();
        let ia = result.arc_current_final_ka.0;
        assert!(ia > result.tiers[1].arc_current_ka.0);
        assert!(ia < result.tiers[2].arc_current_ka.0);
    }

    #[test]
    fn test_boundary_interpolated_not_derived() {
        // The final boundary is the interpolation of tier boundaries, so the
        // final energy at the final boundary is not exactly the threshold
        let result = calculate(&switchgear_input()).unwrap();
        let expected = interpolate(
            13.8,
            result.tiers[0].arc_flash_boundary_mm.0,
            result.tiers[1].arc_flash_boundary_mm.0,
            result.tiers[2].arc_flash_boundary_mm.0,
        );
        assert_eq!(result.arc_flash_boundary_final_mm.0, expected);
        assert!(result.within_boundary(Millimeters(600.0)));
        assert!(!result.within_boundary(Millimeters(914.4)));
    }

    #[test]
    fn test_low_voltage_uses_600_v_tier() {
        let mut input = switchgear_input();
        input.system_voltage_kv = KiloVolts(0.48);
        let result = calculate(&input).unwrap();

        assert_eq!(result.arc_current_final_ka, result.tiers[0].arc_current_ka);
        assert_eq!(result.incident_energy_final_j_cm2, result.tiers[0].incident_energy_j_cm2);
        assert!((result.variation_factor - 0.021033).abs() < 1e-6);
    }

    #[test]
    fn test_open_air_uses_unit_correction() {
        let mut input = switchgear_input();
        input.electrode_configuration = ElectrodeConfiguration::Voa;
        let result = calculate(&input).unwrap();

        assert_eq!(result.correction_factor, 1.0);
        assert_eq!(result.equivalent_enclosure_size_in, None);
        assert!((result.arc_current_final_ka.0 - 4.131727).abs() < 1e-4);
        assert!((result.incident_energy_final_cal_cm2.0 - 0.919156).abs() < 1e-4);
        assert!((result.arc_flash_boundary_final_mm.0 - 769.5101).abs() < 1e-2);
    }

    #[test]
    fn test_shallow_panel_uses_reciprocal_correction() {
        // Low-voltage panelboard, 355.6 x 304.8 x 203.2 mm, so EES = H = 14 in
        let input = CalculationInput {
            label: "PNL-1".to_string(),
            fault_current_ka: KiloAmps(10.0),
            gap_mm: Millimeters(25.0),
            working_distance_mm: Millimeters(457.2),
            arc_duration_ms: Milliseconds(100.0),
            system_voltage_kv: KiloVolts(0.48),
            electrode_configuration: ElectrodeConfiguration::Vcb,
            enclosure: EnclosureGeometry::new(355.6, 304.8, 203.2),
            enclosure_class: EnclosureClass::Shallow,
        };
        let mut tracker = EquationTracker::new();
        let result = ArcFlashEngine::standard().evaluate_traced(&input, &mut tracker).unwrap();

        assert!((result.equivalent_enclosure_size_in.unwrap().0 - 14.0).abs() < 1e-9);
        // 1 / (0.002222·196 − 0.02556·14 + 0.6222)
        assert!((result.correction_factor - 1.4288327).abs() < 1e-6);
        assert!((result.arc_current_final_ka.0 - 8.287999).abs() < 1e-4);
        assert!((result.incident_energy_final_j_cm2.0 - 5.433678).abs() < 1e-4);
        assert!((result.incident_energy_final_cal_cm2.0 - 1.29868).abs() < 1e-4);
        assert!((result.arc_flash_boundary_final_mm.0 - 481.6282).abs() < 1e-2);
        assert_eq!(result.ppe_category, PpeCategory::Category1);

        let used = tracker.unique_equations();
        assert!(used.contains(&Equation::CorrectionFactorShallow));
        assert!(!used.contains(&Equation::CorrectionFactorTypical));

        // The same box rated typical gets a smaller correction and more energy
        let typical = calculate(&CalculationInput {
            enclosure_class: EnclosureClass::Typical,
            ..input
        })
        .unwrap();
        assert!(typical.correction_factor < result.correction_factor);
        assert!(typical.incident_energy_final_j_cm2.0 > result.incident_energy_final_j_cm2.0);
    }

    #[test]
    fn test_non_positive_correction_names_configuration() {
        // A 50 mm high VCBB box drives the shallow quadratic negative
        let input = CalculationInput {
            label: String::new(),
            fault_current_ka: KiloAmps(10.0),
            gap_mm: Millimeters(25.0),
            working_distance_mm: Millimeters(457.2),
            arc_duration_ms: Milliseconds(100.0),
            system_voltage_kv: KiloVolts(0.48),
            electrode_configuration: ElectrodeConfiguration::Vcbb,
            enclosure: EnclosureGeometry::new(50.0, 50.0, 100.0),
            enclosure_class: EnclosureClass::Shallow,
        };
        assert!(input.validate().is_ok());

        let mut tracker = EquationTracker::new();
        let err = ArcFlashEngine::standard().evaluate_traced(&input, &mut tracker).unwrap_err();
        match &err {
            CalcError::InvalidModel { configuration, tier, reason } => {
                assert_eq!(configuration.as_deref(), Some("VCBB"));
                assert_eq!(tier.as_deref(), None);
                assert!(reason.contains("shallow"), "{}", reason);
            }
            other => panic!("Expected InvalidModel, got {:?}", other),
        }
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_high_energy_is_dangerous() {
        let input = CalculationInput {
            label: "MCC-1".to_string(),
            fault_current_ka: KiloAmps(25.0),
            gap_mm: Millimeters(25.0),
            working_distance_mm: Millimeters(457.2),
            arc_duration_ms: Milliseconds(500.0),
            system_voltage_kv: KiloVolts(0.48),
            electrode_configuration: ElectrodeConfiguration::Hcb,
            enclosure: EnclosureGeometry::new(508.0, 508.0, 508.0),
            enclosure_class: EnclosureClass::Typical,
        };
        let result = calculate(&input).unwrap();
        assert!(result.incident_energy_final_cal_cm2.0 > 40.0);
        assert_eq!(result.ppe_category, PpeCategory::Dangerous);
        assert!(!result.energized_work_permitted());
    }

    #[test]
    fn test_invalid_inputs() {
        let mut input = switchgear_input();
        input.fault_current_ka = KiloAmps(0.1);
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");

        let mut input = switchgear_input();
        input.system_voltage_kv = KiloVolts(15.5);
        let err = calculate(&input).unwrap_err();
        assert!(err.to_string().contains("system_voltage_kv"));

        let mut input = switchgear_input();
        input.system_voltage_kv = KiloVolts(0.2);
        assert!(calculate(&input).is_err());

        let mut input = switchgear_input();
        input.gap_mm = Millimeters(0.0);
        assert!(calculate(&input).unwrap_err().to_string().contains("gap_mm"));

        let mut input = switchgear_input();
        input.arc_duration_ms = Milliseconds(f64::NAN);
        assert!(calculate(&input).unwrap_err().to_string().contains("arc_duration_ms"));
    }

    #[test]
    fn test_voltage_range_limits_accepted() {
        let mut input = switchgear_input();
        input.system_voltage_kv = KiloVolts(0.208);
        assert!(calculate(&input).is_ok());
        input.system_voltage_kv = KiloVolts(15.0);
        assert!(calculate(&input).is_ok());
    }

    #[test]
    fn test_missing_tier_names_configuration_and_tier() {
        let standard = CoefficientTable::standard().clone();
        let mut table = standard.clone().without_configuration(ElectrodeConfiguration::Vcb);
        for tier in [VoltageTier::V600, VoltageTier::V2700] {
            let row = standard.tier(ElectrodeConfiguration::Vcb, tier).unwrap();
            table = table.with_tier(ElectrodeConfiguration::Vcb, tier, row.current, row.energy);
        }
        // Enclosure and variation rows were removed with the configuration;
        // restore them from the standard table
        table.enclosure = standard.enclosure.clone();
        table.variation = standard.variation.clone();

        let engine = ArcFlashEngine::new(&table);
        let mut tracker = EquationTracker::new();
        let err = engine.evaluate_traced(&switchgear_input(), &mut tracker).unwrap_err();

        match &err {
            CalcError::InvalidModel { configuration, tier, .. } => {
                assert_eq!(configuration.as_deref(), Some("VCB"));
                assert_eq!(tier.as_deref(), Some("14300 V"));
            }
            other => panic!("Expected InvalidModel, got {:?}", other),
        }
        // No partial results leak into the tracker
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_zero_k12_reports_tier() {
        let standard = CoefficientTable::standard();
        let row = standard.tier(ElectrodeConfiguration::Vcb, VoltageTier::V2700).unwrap();
        let mut energy = row.energy.0;
        energy[11] = 0.0;
        let table = standard.clone().with_tier(
            ElectrodeConfiguration::Vcb,
            VoltageTier::V2700,
            CurrentCoefficients(row.current.0),
            EnergyCoefficients(energy),
        );

        let err = ArcFlashEngine::new(&table).evaluate(&switchgear_input()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_MODEL");
        assert!(err.to_string().contains("for VCB at 2700 V"));
    }

    #[test]
    fn test_traced_evaluation_records_equations() {
        let mut tracker = EquationTracker::new();
        ArcFlashEngine::standard()
            .evaluate_traced(&switchgear_input(), &mut tracker)
            .unwrap();

        let used = tracker.unique_equations();
        assert!(used.contains(&Equation::CorrectionFactorTypical));
        assert!(used.contains(&Equation::InterpolationHighSegment));
        assert!(!used.contains(&Equation::InterpolationLowSegment));
        assert!(used.contains(&Equation::PpeCategorySelection));

        let tier_records = tracker
            .usages()
            .iter()
            .filter(|u| u.equation == Equation::IntermediateArcCurrent)
            .count();
        assert_eq!(tier_records, 3);
    }

    #[test]
    fn test_input_json() {
        let json = r#"{
            "fault_current_ka": 4.85,
            "gap_mm": 152.0,
            "working_distance_mm": 914.4,
            "arc_duration_ms": 197.0,
            "system_voltage_kv": 13.8,
            "electrode_configuration": "VCB",
            "enclosure": { "height_mm": 1143.0, "width_mm": 762.0, "depth_mm": 762.0 }
        }"#;
        let input: CalculationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.label, "");
        assert_eq!(input.enclosure_class, EnclosureClass::Typical);
        assert_eq!(input.fault_current_ka, KiloAmps(4.85));

        let result = calculate(&input).unwrap();
        let out = serde_json::to_value(&result).unwrap();
        assert_eq!(out["ppe_category"], "Category0");
        assert_eq!(out["tiers"][2]["tier"], "14300");
    }

    #[test]
    fn test_input_json_requires_configuration() {
        let json = r#"{
            "fault_current_ka": 4.85,
            "gap_mm": 152.0,
            "working_distance_mm": 914.4,
            "arc_duration_ms": 197.0,
            "system_voltage_kv": 13.8,
            "enclosure": { "height_mm": 1143.0, "width_mm": 762.0, "depth_mm": 762.0 }
        }"#;
        let err = serde_json::from_str::<CalculationInput>(json).unwrap_err();
        assert!(err.to_string().contains("electrode_configuration"), "{}", err);
    }
}
