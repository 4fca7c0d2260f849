//! # PPE Category Classification
//!
//! Maps the final incident energy to a personal protective equipment
//! category. Band limits are inclusive on the lower category, so exactly
//! 8.0 cal/cm² is Category 2 and anything above it is Category 3.
//!
//! | Incident energy (cal/cm²) | Category |
//! |---------------------------|----------|
//! | E ≤ 1.2                   | 0        |
//! | 1.2 < E ≤ 4               | 1        |
//! | 4 < E ≤ 8                 | 2        |
//! | 8 < E ≤ 25                | 3        |
//! | 25 < E ≤ 40               | 4        |
//! | E > 40                    | Dangerous|
//!
//! ```rust
//! use arcflash_core::hazard::{classify, PpeCategory};
//! use arcflash_core::units::CalPerCm2;
//!
//! assert_eq!(classify(CalPerCm2(8.0)), PpeCategory::Category2);
//! assert_eq!(classify(CalPerCm2(8.0001)), PpeCategory::Category3);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::units::CalPerCm2;

/// Protective equipment category for a given incident energy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PpeCategory {
    /// Below the second-degree burn threshold
    Category0,
    Category1,
    Category2,
    Category3,
    Category4,
    /// Above 40 cal/cm²; energized work prohibited without a special procedure
    Dangerous,
}

impl PpeCategory {
    /// All categories in ascending order of severity
    pub const ALL: [PpeCategory; 6] = [
        PpeCategory::Category0,
        PpeCategory::Category1,
        PpeCategory::Category2,
        PpeCategory::Category3,
        PpeCategory::Category4,
        PpeCategory::Dangerous,
    ];

    /// Inclusive upper bound of the band in cal/cm², `None` for the open top band
    pub fn upper_bound(&self) -> Option<CalPerCm2> {
        match self {
            PpeCategory::Category0 => Some(CalPerCm2(1.2)),
            PpeCategory::Category1 => Some(CalPerCm2(4.0)),
            PpeCategory::Category2 => Some(CalPerCm2(8.0)),
            PpeCategory::Category3 => Some(CalPerCm2(25.0)),
            PpeCategory::Category4 => Some(CalPerCm2(40.0)),
            PpeCategory::Dangerous => None,
        }
    }

    /// Display label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            PpeCategory::Category0 => "Risk Category 0",
            PpeCategory::Category1 => "Category 1",
            PpeCategory::Category2 => "Category 2",
            PpeCategory::Category3 => "Category 3",
            PpeCategory::Category4 => "Category 4",
            PpeCategory::Dangerous => "Dangerous",
        }
    }

    /// Whether energized work may proceed with the category's equipment
    pub fn energized_work_permitted(&self) -> bool {
        !matches!(self, PpeCategory::Dangerous)
    }
}

impl fmt::Display for PpeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a final incident energy.
///
/// A NaN energy falls through every band and is classed `Dangerous`.
pub fn classify(energy: CalPerCm2) -> PpeCategory {
    PpeCategory::ALL
        .into_iter()
        .find(|category| match category.upper_bound() {
            Some(bound) => energy.0 <= bound.0,
            None => true,
        })
        .unwrap_or(PpeCategory::Dangerous)
}
