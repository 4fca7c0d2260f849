//! # Enclosure Geometry and Correction Factor
//!
//! Converts enclosure dimensions into the equivalent enclosure size (EES)
//! and evaluates the enclosure correction factor (CF) that scales incident
//! energy for box size and type.
//!
//! ## Formulas
//!
//! ```text
//! EES = (H + W) / 2 / 25.4          if D > 203.2 mm
//! EES = H / 25.4                    otherwise
//!
//! quad = b1·EES² + b2·EES + b3
//! CF   = quad                       typical enclosure
//! CF   = 1 / quad                   shallow enclosure
//! ```
//!
//! ## Example
//!
//! ```rust
//! use arcflash_core::coefficients::CorrectionCoefficients;
//! use arcflash_core::enclosure::{correction_factor, EnclosureClass};
//!
//! let b = CorrectionCoefficients { b1: -0.0003, b2: 0.03441, b3: 0.4325 };
//! let cf = correction_factor(36.0, EnclosureClass::Typical, &b).unwrap();
//! assert!((cf - 1.2837).abs() < 0.005);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coefficients::CorrectionCoefficients;
use crate::errors::{CalcError, CalcResult};
use crate::units::{Inches, KiloVolts, Millimeters};

/// Depth at or below which only the height enters the equivalent size (8 in)
pub const SHALLOW_DEPTH_MM: f64 = 203.2;

/// Height and width below which a low-voltage box may be shallow (20 in)
pub const SHALLOW_FACE_MM: f64 = 508.0;

/// Voltage below which an enclosure may be classed as shallow
pub const SHALLOW_MAX_KV: f64 = 0.6;

/// Range of equivalent enclosure size covered by the correction-factor fit
pub const EES_FIT_RANGE_IN: (f64, f64) = (20.0, 49.0);

/// Enclosure class used by the correction-factor model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnclosureClass {
    /// Typical enclosure
    #[default]
    Typical,
    /// Shallow enclosure (low voltage, small face, depth ≤ 8 in)
    Shallow,
}

impl fmt::Display for EnclosureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnclosureClass::Typical => f.write_str("typical"),
            EnclosureClass::Shallow => f.write_str("shallow"),
        }
    }
}

impl FromStr for EnclosureClass {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "typical" => Ok(EnclosureClass::Typical),
            "shallow" => Ok(EnclosureClass::Shallow),
            _ => Err(CalcError::invalid_input(
                "enclosure_class",
                s,
                "Expected 'typical' or 'shallow'",
            )),
        }
    }
}

/// Enclosure interior dimensions.
///
/// ## JSON Example
///
/// ```json
/// { "height_mm": 1143.0, "width_mm": 762.0, "depth_mm": 762.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnclosureGeometry {
    /// Interior height
    pub height_mm: Millimeters,
    /// Interior width
    pub width_mm: Millimeters,
    /// Interior depth
    pub depth_mm: Millimeters,
}

impl EnclosureGeometry {
    /// Create a geometry from raw millimeter values
    pub fn new(height_mm: f64, width_mm: f64, depth_mm: f64) -> Self {
        EnclosureGeometry {
            height_mm: Millimeters(height_mm),
            width_mm: Millimeters(width_mm),
            depth_mm: Millimeters(depth_mm),
        }
    }

    /// Validate that every dimension is positive and finite.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("enclosure.height_mm", self.height_mm.0),
            ("enclosure.width_mm", self.width_mm.0),
            ("enclosure.depth_mm", self.depth_mm.0),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Enclosure dimension must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Whether the enclosure is deep enough for the two-dimensional size metric
    pub fn is_deep(&self) -> bool {
        self.depth_mm.0 > SHALLOW_DEPTH_MM
    }

    /// Equivalent enclosure size in inches.
    pub fn equivalent_size(&self) -> CalcResult<Inches> {
        self.validate()?;
        let size_mm = if self.is_deep() {
            (self.height_mm + self.width_mm) / 2.0
        } else {
            self.height_mm
        };
        Ok(size_mm.into())
    }

    /// Suggest an enclosure class from geometry and system voltage.
    ///
    /// Shallow applies only below 600 V, to boxes whose height and width
    /// are both under 508 mm and whose depth is at most 203.2 mm.
    pub fn suggested_class(&self, system_voltage: KiloVolts) -> EnclosureClass {
        let small_face = self.height_mm.0 < SHALLOW_FACE_MM && self.width_mm.0 < SHALLOW_FACE_MM;
        if system_voltage.0 < SHALLOW_MAX_KV && small_face && !self.is_deep() {
            EnclosureClass::Shallow
        } else {
            EnclosureClass::Typical
        }
    }
}

/// Enclosure correction factor.
///
/// # Arguments
///
/// * `ees_in` - Equivalent enclosure size (in)
/// * `class` - Enclosure class
/// * `b` - Correction coefficients b1..b3
///
/// # Errors
///
/// `InvalidModel` when the quadratic is zero for a shallow enclosure, where
/// it would be inverted, and when the resulting factor is not a positive
/// finite number for either class.
pub fn correction_factor(ees_in: f64, class: EnclosureClass, b: &CorrectionCoefficients) -> CalcResult<f64> {
    let quad = b.b1 * ees_in * ees_in + b.b2 * ees_in + b.b3;
    let cf = match class {
        EnclosureClass::Typical => quad,
        EnclosureClass::Shallow => {
            if quad == 0.0 {
                return Err(CalcError::invalid_model(format!(
                    "Shallow enclosure correction b1·EES² + b2·EES + b3 is zero at EES = {} in",
                    ees_in
                )));
            }
            1.0 / quad
        }
    };
    if !cf.is_finite() || cf <= 0.0 {
        return Err(CalcError::invalid_model(format!(
            "Correction factor {} is not positive at EES = {} in ({} enclosure)",
            cf, ees_in, class
        )));
    }
    Ok(cf)
}
