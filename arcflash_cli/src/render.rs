//! Text rendering of results.
//!
//! Values are printed from the result fields as computed, with the unit
//! labels of their types.

use std::fmt;

use arcflash_core::calculations::SweepPoint;
use arcflash_core::{CalculationInput, FinalResult};

use crate::equipment::EQUIPMENT;

const RULE: &str = "═══════════════════════════════════════════════";

/// Full evaluation report for one input
pub struct Report<'a> {
    pub input: &'a CalculationInput,
    pub result: &'a FinalResult,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Report { input, result } = self;
        writeln!(f, "{}", RULE)?;
        if result.label.is_empty() {
            writeln!(f, "  ARC-FLASH HAZARD EVALUATION")?;
        } else {
            writeln!(f, "  ARC-FLASH HAZARD EVALUATION: {}", result.label)?;
        }
        writeln!(f, "{}", RULE)?;
        writeln!(f)?;

        writeln!(f, "Input:")?;
        writeln!(f, "  Fault current:    {:.2}", input.fault_current_ka)?;
        writeln!(f, "  System voltage:   {:.3}", input.system_voltage_kv)?;
        writeln!(f, "  Electrode gap:    {:.1}", input.gap_mm)?;
        writeln!(f, "  Working distance: {:.1}", input.working_distance_mm)?;
        writeln!(f, "  Arc duration:     {:.1}", input.arc_duration_ms)?;
        writeln!(
            f,
            "  Configuration:    {} ({})",
            input.electrode_configuration,
            input.electrode_configuration.description()
        )?;
        writeln!(
            f,
            "  Enclosure:        {:.1} x {:.1} x {:.1}, {}",
            input.enclosure.height_mm, input.enclosure.width_mm, input.enclosure.depth_mm, input.enclosure_class
        )?;
        writeln!(f)?;

        match result.equivalent_enclosure_size_in {
            Some(ees) => writeln!(f, "Enclosure correction: EES = {:.2}, CF = {:.4}", ees, result.correction_factor)?,
            None => writeln!(f, "Enclosure correction: open air, CF = 1")?,
        }
        writeln!(f)?;

        writeln!(f, "Tier values:")?;
        for tier in &result.tiers {
            writeln!(
                f,
                "  {:>8}: Ia = {:.3}  E = {:.3}  AFB = {:.1}",
                tier.tier.label(),
                tier.arc_current_ka,
                tier.incident_energy_j_cm2,
                tier.arc_flash_boundary_mm
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Results:")?;
        writeln!(f, "  Arc current:         {:.3}", result.arc_current_final_ka)?;
        writeln!(
            f,
            "  Reduced arc current: {:.3} (VarCf = {:.5})",
            result.arc_current_reduced_ka, result.variation_factor
        )?;
        writeln!(
            f,
            "  Incident energy:     {:.3} ({:.3})",
            result.incident_energy_final_cal_cm2, result.incident_energy_final_j_cm2
        )?;
        writeln!(f, "  Arc-flash boundary:  {:.1}", result.arc_flash_boundary_final_mm)?;
        writeln!(f)?;

        writeln!(f, "{}", RULE)?;
        let prohibited = if result.energized_work_permitted() {
            ""
        } else {
            " - energized work prohibited"
        };
        writeln!(f, "  PPE: {}{}", result.ppe_category, prohibited)?;
        writeln!(f, "{}", RULE)
    }
}

/// One line per swept voltage; failed points show their error inline
pub struct SweepTable<'a>(pub &'a [SweepPoint]);

impl fmt::Display for SweepTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>10}  {:>12}  {:>14}  {:>12}  {}",
            "V (kV)", "Ia (kA)", "E (cal/cm²)", "AFB (mm)", "PPE"
        )?;
        for point in self.0 {
            match &point.result {
                Ok(r) => writeln!(
                    f,
                    "{:>10.3}  {:>12.3}  {:>14.3}  {:>12.1}  {}",
                    point.system_voltage_kv.0,
                    r.arc_current_final_ka.0,
                    r.incident_energy_final_cal_cm2.0,
                    r.arc_flash_boundary_final_mm.0,
                    r.ppe_category
                )?,
                Err(e) => writeln!(f, "{:>10.3}  error: {}", point.system_voltage_kv.0, e)?,
            }
        }
        Ok(())
    }
}

/// Listing of the equipment-class defaults
pub struct EquipmentTable;

impl fmt::Display for EquipmentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<22} {:>8} {:>10}  {:<24} Description",
            "Key", "Gap mm", "Dist mm", "H x W x D mm"
        )?;
        for e in EQUIPMENT {
            let depth = match e.depth_qualifier {
                Some(q) => q.to_string(),
                None => e.depth_mm.to_string(),
            };
            let size = format!("{} x {} x {}", e.height_mm, e.width_mm, depth);
            writeln!(
                f,
                "{:<22} {:>8} {:>10}  {:<24} {}",
                e.key, e.gap_mm, e.working_distance_mm, size, e.description
            )?;
        }
        Ok(())
    }
}
