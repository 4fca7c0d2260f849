//! # Voltage Sweep
//!
//! Evaluates copies of one input across a set of system voltages. Each
//! point is an independent evaluation, so a failing point (for example a
//! voltage out of range) does not affect the others.
//!
//! ```rust
//! use arcflash_core::calculations::arc_flash::{ArcFlashEngine, CalculationInput};
//! use arcflash_core::calculations::sweep::{sweep_voltage, voltage_range};
//! use arcflash_core::coefficients::ElectrodeConfiguration;
//! use arcflash_core::enclosure::{EnclosureClass, EnclosureGeometry};
//! use arcflash_core::units::{KiloAmps, KiloVolts, Millimeters, Milliseconds};
//!
//! let base = CalculationInput {
//!     label: "MCC-1".to_string(),
//!     fault_current_ka: KiloAmps(20.0),
//!     gap_mm: Millimeters(25.0),
//!     working_distance_mm: Millimeters(457.2),
//!     arc_duration_ms: Milliseconds(100.0),
//!     system_voltage_kv: KiloVolts(0.48),
//!     electrode_configuration: ElectrodeConfiguration::Vcb,
//!     enclosure: EnclosureGeometry::new(660.4, 660.4, 660.4),
//!     enclosure_class: EnclosureClass::Typical,
//! };
//!
//! let voltages = voltage_range(KiloVolts(0.48), KiloVolts(13.8), 5).unwrap();
//! let points = sweep_voltage(&ArcFlashEngine::standard(), &base, &voltages);
//! assert_eq!(points.len(), 5);
//! assert!(points.iter().all(|p| p.result.is_ok()));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::arc_flash::{ArcFlashEngine, CalculationInput, FinalResult};
use crate::errors::{CalcError, CalcResult};
use crate::units::KiloVolts;

/// One evaluated sweep point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub system_voltage_kv: KiloVolts,
    pub result: Result<FinalResult, CalcError>,
}

/// Evaluate `base` at each voltage.
///
/// Results are returned in the order of `voltages`.
pub fn sweep_voltage(engine: &ArcFlashEngine<'_>, base: &CalculationInput, voltages: &[KiloVolts]) -> Vec<SweepPoint> {
    voltages
        .iter()
        .map(|&v| {
            let input = CalculationInput {
                system_voltage_kv: v,
                ..base.clone()
            };
            let result = engine.evaluate(&input);
            if let Err(e) = &result {
                debug!(system_voltage_kv = v.0, error = %e, "Sweep point failed");
            }
            SweepPoint {
                system_voltage_kv: v,
                result,
            }
        })
        .collect()
}

/// `steps` evenly spaced voltages from `start` to `end` inclusive.
pub fn voltage_range(start: KiloVolts, end: KiloVolts, steps: usize) -> CalcResult<Vec<KiloVolts>> {
    if steps < 2 {
        return Err(CalcError::invalid_input(
            "steps",
            steps.to_string(),
            "A sweep needs at least two points",
        ));
    }
    if !start.0.is_finite() || !end.0.is_finite() {
        return Err(CalcError::invalid_input(
            "voltage_range",
            format!("{}..{}", start.0, end.0),
            "Sweep limits must be finite",
        ));
    }

    let step = (end.0 - start.0) / (steps - 1) as f64;
    Ok((0..steps)
        .map(|i| {
            if i == steps - 1 {
                end
            } else {
                KiloVolts(start.0 + step * i as f64)
            }
        })
        .collect())
}
