//! # Coefficient Table
//!
//! Empirical model coefficients keyed by electrode configuration and
//! voltage tier. The table is plain data: it is built once, validated, and
//! passed by reference to the engine, so tests can substitute their own
//! sets without touching global state.
//!
//! ## Contents
//!
//! - Arc current coefficients k1..k10, one vector per (configuration, tier)
//! - Incident energy coefficients k1..k13, one vector per (configuration, tier)
//! - Enclosure correction coefficients b1..b3 per (configuration, enclosure class),
//!   present only for enclosed configurations
//! - Current-variation coefficients k11..k17 per configuration
//!
//! ## Example
//!
//! ```rust
//! use arcflash_core::coefficients::{CoefficientTable, ElectrodeConfiguration, VoltageTier};
//!
//! let table = CoefficientTable::standard();
//! let row = table.tier(ElectrodeConfiguration::Vcb, VoltageTier::V600).unwrap();
//! assert_eq!(row.current.k(1), -0.04287);
//! ```

mod nbr17227;

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::enclosure::EnclosureClass;
use crate::errors::{CalcError, CalcResult};

static STANDARD: Lazy<CoefficientTable> = Lazy::new(nbr17227::table);

// ============================================================================
// Keys
// ============================================================================

/// Electrode configuration of the arcing fault.
///
/// ## JSON Serialization
///
/// Serializes to the short code: `"VCB"`, `"VCBB"`, `"HCB"`, `"VOA"`, `"HOA"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElectrodeConfiguration {
    /// Vertical conductors inside a metal box
    #[serde(rename = "VCB")]
    Vcb,
    /// Vertical conductors terminated in an insulating barrier, inside a box
    #[serde(rename = "VCBB")]
    Vcbb,
    /// Horizontal conductors inside a metal box
    #[serde(rename = "HCB")]
    Hcb,
    /// Vertical conductors in open air
    #[serde(rename = "VOA")]
    Voa,
    /// Horizontal conductors in open air
    #[serde(rename = "HOA")]
    Hoa,
}

impl ElectrodeConfiguration {
    /// All configurations, in table order
    pub const ALL: [ElectrodeConfiguration; 5] = [
        ElectrodeConfiguration::Vcb,
        ElectrodeConfiguration::Vcbb,
        ElectrodeConfiguration::Hcb,
        ElectrodeConfiguration::Voa,
        ElectrodeConfiguration::Hoa,
    ];

    /// Short code as printed in the standard
    pub fn code(&self) -> &'static str {
        match self {
            ElectrodeConfiguration::Vcb => "VCB",
            ElectrodeConfiguration::Vcbb => "VCBB",
            ElectrodeConfiguration::Hcb => "HCB",
            ElectrodeConfiguration::Voa => "VOA",
            ElectrodeConfiguration::Hoa => "HOA",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ElectrodeConfiguration::Vcb => "Vertical conductors in a box",
            ElectrodeConfiguration::Vcbb => "Vertical conductors in a box, terminated in a barrier",
            ElectrodeConfiguration::Hcb => "Horizontal conductors in a box",
            ElectrodeConfiguration::Voa => "Vertical conductors in open air",
            ElectrodeConfiguration::Hoa => "Horizontal conductors in open air",
        }
    }

    /// Open-air configurations have no enclosure correction (CF = 1).
    pub fn is_open_air(&self) -> bool {
        matches!(self, ElectrodeConfiguration::Voa | ElectrodeConfiguration::Hoa)
    }
}

impl fmt::Display for ElectrodeConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ElectrodeConfiguration {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElectrodeConfiguration::ALL
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "electrode_configuration",
                    s,
                    "Expected one of VCB, VCBB, HCB, VOA, HOA",
                )
            })
    }
}

/// Reference voltage at which the empirical model is fit directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VoltageTier {
    /// 600 V
    #[serde(rename = "600")]
    V600,
    /// 2700 V
    #[serde(rename = "2700")]
    V2700,
    /// 14300 V
    #[serde(rename = "14300")]
    V14300,
}

impl VoltageTier {
    /// All tiers in ascending voltage order
    pub const ALL: [VoltageTier; 3] = [VoltageTier::V600, VoltageTier::V2700, VoltageTier::V14300];

    /// Tier voltage in volts
    pub fn volts(&self) -> u32 {
        match self {
            VoltageTier::V600 => 600,
            VoltageTier::V2700 => 2700,
            VoltageTier::V14300 => 14300,
        }
    }

    /// Tier voltage in kilovolts
    pub fn kv(&self) -> f64 {
        f64::from(self.volts()) / 1000.0
    }

    /// Display label (e.g., "600 V")
    pub fn label(&self) -> &'static str {
        match self {
            VoltageTier::V600 => "600 V",
            VoltageTier::V2700 => "2700 V",
            VoltageTier::V14300 => "14300 V",
        }
    }
}

impl fmt::Display for VoltageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Coefficient Vectors
// ============================================================================

/// Arc current coefficients k1..k10.
///
/// A fixed-length array, so every coefficient is always present; zero is
/// a valid value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrentCoefficients(pub [f64; 10]);

/// Incident energy coefficients k1..k13.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnergyCoefficients(pub [f64; 13]);

/// Current-variation coefficients k11..k17 (`k(1)` is k11).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariationCoefficients(pub [f64; 7]);

/// Enclosure correction coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectionCoefficients {
    pub b1: f64,
    pub b2: f64,
    pub b3: f64,
}

macro_rules! one_based_access {
    ($type:ty) => {
        impl $type {
            /// Coefficient by its 1-based index as numbered in the standard.
            ///
            /// # Panics
            ///
            /// Panics if `n` is 0 or beyond the vector length.
            #[inline]
            pub fn k(&self, n: usize) -> f64 {
                self.0[n - 1]
            }

            fn all_finite(&self) -> bool {
                self.0.iter().all(|v| v.is_finite())
            }
        }
    };
}

one_based_access!(CurrentCoefficients);
one_based_access!(EnergyCoefficients);
one_based_access!(VariationCoefficients);

impl CorrectionCoefficients {
    fn all_finite(&self) -> bool {
        self.b1.is_finite() && self.b2.is_finite() && self.b3.is_finite()
    }
}

// ============================================================================
// Table Rows
// ============================================================================

/// Current and energy coefficients for one (configuration, tier) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierRow {
    pub configuration: ElectrodeConfiguration,
    pub tier: VoltageTier,
    pub current: CurrentCoefficients,
    pub energy: EnergyCoefficients,
}

/// Correction coefficients for one (configuration, enclosure class) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnclosureRow {
    pub configuration: ElectrodeConfiguration,
    pub class: EnclosureClass,
    pub coefficients: CorrectionCoefficients,
}

/// Current-variation coefficients for one configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationRow {
    pub configuration: ElectrodeConfiguration,
    pub coefficients: VariationCoefficients,
}

// ============================================================================
// Coefficient Table
// ============================================================================

/// Complete set of model coefficients.
///
/// ## JSON Shape
///
/// ```json
/// {
///   "tiers": [
///     { "configuration": "VCB", "tier": "600",
///       "current": [-0.04287, 1.035, ...], "energy": [0.753364, ...] }
///   ],
///   "enclosure": [
///     { "configuration": "VCB", "class": "typical",
///       "coefficients": { "b1": -0.000302, "b2": 0.03441, "b3": 0.4325 } }
///   ],
///   "variation": [
///     { "configuration": "VCB", "coefficients": [0, 0, 0, 0, -0.0001, 0.0022, 0.02] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientTable {
    pub tiers: Vec<TierRow>,
    pub enclosure: Vec<EnclosureRow>,
    pub variation: Vec<VariationRow>,
}

impl CoefficientTable {
    /// The built-in NBR 17227 table, constructed on first use.
    pub fn standard() -> &'static CoefficientTable {
        &STANDARD
    }

    /// Parse and validate a table from JSON.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let table: CoefficientTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Read, parse and validate a table from a JSON file.
    pub fn from_json_file(path: &Path) -> CalcResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        Self::from_json(&json)
    }

    /// Serialize the table to pretty JSON.
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check structural invariants.
    ///
    /// - no (configuration, tier) pair appears twice
    /// - a configuration that appears at all appears at every tier
    /// - no duplicate enclosure or variation rows
    /// - every coefficient is finite
    ///
    /// A configuration that is absent entirely is allowed; evaluating it
    /// fails later with a lookup miss.
    pub fn validate(&self) -> CalcResult<()> {
        let mut seen = HashSet::new();
        for row in &self.tiers {
            if !seen.insert((row.configuration, row.tier)) {
                return Err(CalcError::invalid_model_for(
                    row.configuration.code(),
                    Some(row.tier.label()),
                    "Duplicate coefficient set",
                ));
            }
            if !row.current.all_finite() || !row.energy.all_finite() {
                return Err(CalcError::invalid_model_for(
                    row.configuration.code(),
                    Some(row.tier.label()),
                    "Coefficient is not a finite number",
                ));
            }
        }

        for configuration in ElectrodeConfiguration::ALL {
            let present: Vec<VoltageTier> = VoltageTier::ALL
                .iter()
                .copied()
                .filter(|t| seen.contains(&(configuration, *t)))
                .collect();
            if !present.is_empty() && present.len() != VoltageTier::ALL.len() {
                let missing = VoltageTier::ALL
                    .iter()
                    .find(|t| !present.contains(*t))
                    .map(|t| t.label())
                    .unwrap_or_default();
                return Err(CalcError::invalid_model_for(
                    configuration.code(),
                    Some(missing),
                    "Configuration is missing a voltage tier",
                ));
            }
        }

        let mut seen_enclosure = HashSet::new();
        for row in &self.enclosure {
            if !seen_enclosure.insert((row.configuration, row.class)) {
                return Err(CalcError::invalid_model_for(
                    row.configuration.code(),
                    None,
                    format!("Duplicate {} enclosure coefficients", row.class),
                ));
            }
            if !row.coefficients.all_finite() {
                return Err(CalcError::invalid_model_for(
                    row.configuration.code(),
                    None,
                    "Enclosure coefficient is not a finite number",
                ));
            }
        }

        let mut seen_variation = HashSet::new();
        for row in &self.variation {
            if !seen_variation.insert(row.configuration) {
                return Err(CalcError::invalid_model_for(
                    row.configuration.code(),
                    None,
                    "Duplicate current-variation coefficients",
                ));
            }
            if !row.coefficients.all_finite() {
                return Err(CalcError::invalid_model_for(
                    row.configuration.code(),
                    None,
                    "Current-variation coefficient is not a finite number",
                ));
            }
        }

        Ok(())
    }

    /// Coefficients for one (configuration, tier) pair.
    pub fn tier(&self, configuration: ElectrodeConfiguration, tier: VoltageTier) -> CalcResult<&TierRow> {
        self.tiers
            .iter()
            .find(|r| r.configuration == configuration && r.tier == tier)
            .ok_or_else(|| {
                CalcError::invalid_model_for(configuration.code(), Some(tier.label()), "No coefficient set in table")
            })
    }

    /// Enclosure correction coefficients.
    ///
    /// Returns `Ok(None)` for open-air configurations, which take no
    /// correction.
    pub fn correction(
        &self,
        configuration: ElectrodeConfiguration,
        class: EnclosureClass,
    ) -> CalcResult<Option<CorrectionCoefficients>> {
        if configuration.is_open_air() {
            return Ok(None);
        }
        self.enclosure
            .iter()
            .find(|r| r.configuration == configuration && r.class == class)
            .map(|r| Some(r.coefficients))
            .ok_or_else(|| {
                CalcError::invalid_model_for(
                    configuration.code(),
                    None,
                    format!("No {} enclosure correction coefficients in table", class),
                )
            })
    }

    /// Current-variation coefficients for a configuration.
    pub fn variation(&self, configuration: ElectrodeConfiguration) -> CalcResult<VariationCoefficients> {
        self.variation
            .iter()
            .find(|r| r.configuration == configuration)
            .map(|r| r.coefficients)
            .ok_or_else(|| {
                CalcError::invalid_model_for(configuration.code(), None, "No current-variation coefficients in table")
            })
    }

    /// Replace (or insert) the coefficients for one (configuration, tier) pair.
    pub fn with_tier(
        mut self,
        configuration: ElectrodeConfiguration,
        tier: VoltageTier,
        current: CurrentCoefficients,
        energy: EnergyCoefficients,
    ) -> Self {
        let row = TierRow {
            configuration,
            tier,
            current,
            energy,
        };
        match self
            .tiers
            .iter_mut()
            .find(|r| r.configuration == configuration && r.tier == tier)
        {
            Some(existing) => *existing = row,
            None => self.tiers.push(row),
        }
        self
    }

    /// Remove every row for a configuration.
    pub fn without_configuration(mut self, configuration: ElectrodeConfiguration) -> Self {
        self.tiers.retain(|r| r.configuration != configuration);
        self.enclosure.retain(|r| r.configuration != configuration);
        self.variation.retain(|r| r.configuration != configuration);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_is_complete() {
        let table = CoefficientTable::standard();
        table.validate().unwrap();
        assert_eq!(table.tiers.len(), 15);

        for configuration in ElectrodeConfiguration::ALL {
            for tier in VoltageTier::ALL {
                assert!(table.tier(configuration, tier).is_ok(), "{} {}", configuration, tier);
            }
            assert!(table.variation(configuration).is_ok());
            for class in [EnclosureClass::Typical, EnclosureClass::Shallow] {
                let cf = table.correction(configuration, class).unwrap();
                assert_eq!(cf.is_none(), configuration.is_open_air());
            }
        }
    }

    #[test]
    fn test_vcb_600_current_row() {
        let row = CoefficientTable::standard()
            .tier(ElectrodeConfiguration::Vcb, VoltageTier::V600)
            .unwrap();
        assert_eq!(
            row.current.0,
            [-0.04287, 1.035, -0.083, 0.0, 0.0, -4.783e-9, 1.962e-6, -2.29e-4, 3.141e-3, 1.092]
        );
        // k12 (distance exponent) must be non-zero for the boundary inversion
        assert_eq!(row.energy.k(12), -1.598);
    }

    #[test]
    fn test_variation_matches_table_5() {
        let var = CoefficientTable::standard()
            .variation(ElectrodeConfiguration::Hoa)
            .unwrap();
        assert_eq!(var.0, [0.0, 0.0, 0.0, 0.0, -0.0001, 0.0022, 0.02]);
    }

    #[test]
    fn test_lookup_miss_names_configuration_and_tier() {
        let table = CoefficientTable::standard()
            .clone()
            .without_configuration(ElectrodeConfiguration::Vcbb);
        table.validate().unwrap();

        let err = table
            .tier(ElectrodeConfiguration::Vcbb, VoltageTier::V2700)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_MODEL");
        assert!(err.to_string().contains("VCBB"));
        assert!(err.to_string().contains("2700 V"));
    }

    #[test]
    fn test_duplicate_row_rejected() {
        let mut table = CoefficientTable::standard().clone();
        let dup = table.tiers[0].clone();
        table.tiers.push(dup);
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_partial_configuration_rejected() {
        let mut table = CoefficientTable::standard().clone();
        table
            .tiers
            .retain(|r| !(r.configuration == ElectrodeConfiguration::Hcb && r.tier == VoltageTier::V14300));
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("14300 V"));
    }

    #[test]
    fn test_with_tier_replaces_row() {
        let zeros = EnergyCoefficients([0.0; 13]);
        let row = CoefficientTable::standard()
            .tier(ElectrodeConfiguration::Vcb, VoltageTier::V600)
            .unwrap()
            .clone();
        let table = CoefficientTable::standard()
            .clone()
            .with_tier(ElectrodeConfiguration::Vcb, VoltageTier::V600, row.current, zeros);
        assert_eq!(table.tiers.len(), 15);
        let replaced = table.tier(ElectrodeConfiguration::Vcb, VoltageTier::V600).unwrap();
        assert_eq!(replaced.energy, zeros);
    }

    #[test]
    fn test_json_roundtrip() {
        let json = CoefficientTable::standard().to_json().unwrap();
        assert!(json.contains("\"configuration\": \"VCBB\""));
        assert!(json.contains("\"tier\": \"14300\""));
        let parsed = CoefficientTable::from_json(&json).unwrap();
        assert_eq!(&parsed, CoefficientTable::standard());
    }

    #[test]
    fn test_json_wrong_vector_length_rejected() {
        let json = r#"{
            "tiers": [{ "configuration": "VCB", "tier": "600",
                        "current": [1, 2, 3], "energy": [0,0,0,0,0,0,0,0,0,0,0,0,0] }],
            "enclosure": [],
            "variation": []
        }"#;
        let err = CoefficientTable::from_json(json).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_configuration_from_str() {
        assert_eq!("vcbb".parse::<ElectrodeConfiguration>().unwrap(), ElectrodeConfiguration::Vcbb);
        assert_eq!(" HOA ".parse::<ElectrodeConfiguration>().unwrap(), ElectrodeConfiguration::Hoa);
        assert!("XYZ".parse::<ElectrodeConfiguration>().is_err());
    }

    #[test]
    fn test_tier_voltages() {
        assert_eq!(VoltageTier::V600.kv(), 0.6);
        assert_eq!(VoltageTier::V2700.kv(), 2.7);
        assert_eq!(VoltageTier::V14300.kv(), 14.3);
    }
}
