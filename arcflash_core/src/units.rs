//! # Unit Types
//!
//! Type-safe wrappers for the quantities the arc-flash model consumes and
//! produces. They are plain f64 newtypes that serialize as bare numbers.
//!
//! ## Units Used
//!
//! The empirical model is fit in a fixed mix of units, so Arcflash keeps
//! exactly those units internally:
//! - Current: kiloamperes (kA)
//! - Voltage: kilovolts (kV)
//! - Length: millimeters (mm); enclosure size in inches (in)
//! - Time: milliseconds (ms)
//! - Incident energy: J/cm² internally, cal/cm² only when reported
//!
//! ## Example
//!
//! ```rust
//! use arcflash_core::units::{CalPerCm2, Inches, JoulesPerCm2, Millimeters, Milliseconds, Seconds};
//!
//! let depth = Millimeters(203.2);
//! let depth_in: Inches = depth.into();
//! assert!((depth_in.0 - 8.0).abs() < 1e-12);
//!
//! // Arc duration always enters the model in milliseconds
//! let clearing: Milliseconds = Seconds(0.197).into();
//! assert!((clearing.0 - 197.0).abs() < 1e-9);
//!
//! let energy: CalPerCm2 = JoulesPerCm2(4.184).into();
//! assert!((energy.0 - 1.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Joules per calorie (thermochemical)
pub const JOULES_PER_CALORIE: f64 = 4.184;

// ============================================================================
// Electrical Units
// ============================================================================

/// Current in kiloamperes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloAmps(pub f64);

/// Voltage in kilovolts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloVolts(pub f64);

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Millimeters> for Inches {
    fn from(mm: Millimeters) -> Self {
        Inches(mm.0 / MM_PER_INCH)
    }
}

impl From<Inches> for Millimeters {
    fn from(inches: Inches) -> Self {
        Millimeters(inches.0 * MM_PER_INCH)
    }
}

// ============================================================================
// Time Units
// ============================================================================

/// Duration in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Milliseconds(pub f64);

/// Duration in seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seconds(pub f64);

impl From<Seconds> for Milliseconds {
    fn from(s: Seconds) -> Self {
        Milliseconds(s.0 * 1000.0)
    }
}

impl From<Milliseconds> for Seconds {
    fn from(ms: Milliseconds) -> Self {
        Seconds(ms.0 / 1000.0)
    }
}

// ============================================================================
// Energy Density Units
// ============================================================================

/// Incident energy in joules per square centimeter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoulesPerCm2(pub f64);

/// Incident energy in calories per square centimeter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalPerCm2(pub f64);

impl From<JoulesPerCm2> for CalPerCm2 {
    fn from(j: JoulesPerCm2) -> Self {
        CalPerCm2(j.0 / JOULES_PER_CALORIE)
    }
}

impl From<CalPerCm2> for JoulesPerCm2 {
    fn from(cal: CalPerCm2) -> Self {
        JoulesPerCm2(cal.0 * JOULES_PER_CALORIE)
    }
}

// ============================================================================
// Arithmetic and Display (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_unit {
    ($type:ty, $label:expr) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match f.precision() {
                    Some(p) => write!(f, "{:.*} {}", p, self.0, $label),
                    None => write!(f, "{} {}", self.0, $label),
                }
            }
        }

        impl $type {
            /// Unit label used when rendering this quantity
            pub const LABEL: &'static str = $label;
        }
    };
}

impl_unit!(KiloAmps, "kA");
impl_unit!(KiloVolts, "kV");
impl_unit!(Millimeters, "mm");
impl_unit!(Inches, "in");
impl_unit!(Milliseconds, "ms");
impl_unit!(Seconds, "s");
impl_unit!(JoulesPerCm2, "J/cm²");
impl_unit!(CalPerCm2, "cal/cm²");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_inches() {
        let inches: Inches = Millimeters(508.0).into();
        assert!((inches.0 - 20.0).abs() < 1e-12);
        let back: Millimeters = inches.into();
        assert!((back.0 - 508.0).abs() < 1e-9);
    }

    #[test]
    fn test_seconds_to_milliseconds() {
        let ms: Milliseconds = Seconds(0.05).into();
        assert!((ms.0 - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_joules_to_calories() {
        let cal: CalPerCm2 = JoulesPerCm2(5.0).into();
        assert!((cal.0 - 1.195).abs() < 0.001);
    }

    #[test]
    fn test_arithmetic() {
        let a = KiloAmps(10.0);
        let b = KiloAmps(4.0);
        assert_eq!((a + b).0, 14.0);
        assert_eq!((a - b).0, 6.0);
        assert_eq!((a * 0.5).0, 5.0);
        assert_eq!((a / 4.0).0, 2.5);
    }

    #[test]
    fn test_display_keeps_unit_label() {
        assert_eq!(format!("{:.2}", KiloAmps(3.3728)), "3.37 kA");
        assert_eq!(format!("{:.1}", Millimeters(914.4)), "914.4 mm");
        assert_eq!(CalPerCm2::LABEL, "cal/cm²");
    }

    #[test]
    fn test_serialization() {
        let v = KiloVolts(13.8);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "13.8");

        let roundtrip: KiloVolts = serde_json::from_str(&json).unwrap();
        assert_eq!(v, roundtrip);
    }
}
