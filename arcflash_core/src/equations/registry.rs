//! # Equation Registry
//!
//! Central registry of every equation used in an arc-flash evaluation.
//! Each equation has metadata including its standard reference, formula and
//! variable definitions.
//!
//! ## Architecture
//!
//! The registry provides:
//! - Type-safe equation identification via the `Equation` enum
//! - Full metadata for reports and audit trails
//! - Serialization support for JSON export
//!
//! ## Usage
//!
//! ```rust
//! use arcflash_core::equations::registry::{Equation, EquationTracker};
//!
//! // Track equation usage during calculation
//! let mut tracker = EquationTracker::new();
//! tracker.record(Equation::IntermediateArcCurrent, "600 V tier");
//!
//! // Get metadata for a report appendix
//! let meta = Equation::IntermediateArcCurrent.metadata();
//! println!("Formula: {}", meta.formula_plain);
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Reference to the standard an equation comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// ABNT NBR 17227
    Nbr17227 { year: u16, item: &'static str },
    /// IEEE 1584 - Guide for Performing Arc-Flash Hazard Calculations
    Ieee1584 { year: u16, item: &'static str },
    /// NFPA 70E - Standard for Electrical Safety in the Workplace
    Nfpa70e { year: u16, item: &'static str },
    /// Unit conversion (no specific standard reference needed)
    UnitConversion,
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Nbr17227 { year, item } => format!("ABNT NBR 17227:{}, {}", year, item),
            CodeReference::Ieee1584 { year, item } => format!("IEEE 1584-{}, {}", year, item),
            CodeReference::Nfpa70e { year, item } => format!("NFPA 70E-{}, {}", year, item),
            CodeReference::UnitConversion => "Unit Conversion".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::Nbr17227 { .. } => "NBR 17227",
            CodeReference::Ieee1584 { .. } => "IEEE 1584",
            CodeReference::Nfpa70e { .. } => "NFPA 70E",
            CodeReference::UnitConversion => "Conversion",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in the reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Arc current and its variation
    ArcCurrent,
    /// Enclosure size and correction factor
    EnclosureCorrection,
    /// Incident energy at the working distance
    IncidentEnergy,
    /// Arc-flash boundary distance
    ArcFlashBoundary,
    /// Combining tiers at the system voltage
    Interpolation,
    /// PPE category selection
    HazardClassification,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::ArcCurrent => "Arc Current",
            EquationCategory::EnclosureCorrection => "Enclosure Correction",
            EquationCategory::IncidentEnergy => "Incident Energy",
            EquationCategory::ArcFlashBoundary => "Arc-Flash Boundary",
            EquationCategory::Interpolation => "Voltage Interpolation",
            EquationCategory::HazardClassification => "Hazard Classification",
        }
    }

    /// Sort order in the reference document (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::ArcCurrent => 1,
            EquationCategory::EnclosureCorrection => 2,
            EquationCategory::IncidentEnergy => 3,
            EquationCategory::ArcFlashBoundary => 4,
            EquationCategory::Interpolation => 5,
            EquationCategory::HazardClassification => 6,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "Ia", "G", "T")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "kA", "mm", "ms")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for a model equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Standard reference
    pub reference: CodeReference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used by the arc-flash engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// Ia = 10^(k1 + k2 lg Ibf + k3 lg G + lg(poly6(Ibf)))
    IntermediateArcCurrent,
    /// VarCf = poly6(V)
    ArcCurrentVariationFactor,
    /// Ia_min = Ia (1 - 0.5 VarCf)
    ReducedArcCurrent,
    /// EES from height/width/depth
    EquivalentEnclosureSize,
    /// CF = b1 EES^2 + b2 EES + b3
    CorrectionFactorTypical,
    /// CF = 1 / (b1 EES^2 + b2 EES + b3)
    CorrectionFactorShallow,
    /// E = 12.552/50 T 10^(...)
    IntermediateIncidentEnergy,
    /// Distance where E = 5.0 J/cm^2
    IntermediateArcFlashBoundary,
    /// Linear interpolation between 600 V and 2700 V tiers
    InterpolationLowSegment,
    /// Linear interpolation between 2700 V and 14300 V tiers
    InterpolationHighSegment,
    /// cal/cm^2 = J/cm^2 / 4.184
    EnergyUnitConversion,
    /// PPE category bands
    PpeCategorySelection,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::IntermediateArcCurrent => EquationMetadata {
                name: "Intermediate Arc Current",
                description: "Arc current at one voltage tier from bolted fault current and electrode gap",
                formula_plain: "Ia = 10^(k1 + k2*lg(Ibf) + k3*lg(G) + lg(k4*Ibf^6 + k5*Ibf^5 + ... + k9*Ibf + k10))",
                reference: CodeReference::Nbr17227 { year: 2023, item: "Equation 1" },
                variables: vec![
                    Variable::new("Ia", "Intermediate arc current", "kA"),
                    Variable::new("Ibf", "Bolted fault current", "kA"),
                    Variable::new("G", "Electrode gap", "mm"),
                    Variable::new("k1..k10", "Current coefficients for configuration and tier", "-"),
                ],
                assumptions: vec![
                    "Evaluated at each of the 600 V, 2700 V and 14300 V tiers",
                    "Logarithmic fit and polynomial correction add in log space",
                ],
                category: EquationCategory::ArcCurrent,
                source_module: "equations/arc_current.rs",
                source_function: "intermediate_arc_current",
            },

            Equation::ArcCurrentVariationFactor => EquationMetadata {
                name: "Arc Current Variation Factor",
                description: "Voltage-dependent factor describing arc current fluctuation",
                formula_plain: "VarCf = k11*V^6 + k12*V^5 + k13*V^4 + k14*V^3 + k15*V^2 + k16*V + k17",
                reference: CodeReference::Nbr17227 { year: 2023, item: "Equation 2, Table 5" },
                variables: vec![
                    Variable::new("VarCf", "Arc current variation factor", "-"),
                    Variable::new("V", "System voltage", "kV"),
                ],
                assumptions: vec!["Same coefficients for every electrode configuration"],
                category: EquationCategory::ArcCurrent,
                source_module: "equations/variation.rs",
                source_function: "variation_factor",
            },

            Equation::ReducedArcCurrent => EquationMetadata {
                name: "Reduced Arc Current",
                description: "Lower bound of the arc current used to re-check device clearing time",
                formula_plain: "Ia_min = Ia * (1 - 0.5 * VarCf)",
                reference: CodeReference::Nbr17227 { year: 2023, item: "Equation 2" },
                variables: vec![
                    Variable::new("Ia_min", "Reduced arc current", "kA"),
                    Variable::new("Ia", "Final arc current at the system voltage", "kA"),
                ],
                assumptions: vec!["Computed from the interpolated arc current, not per tier"],
                category: EquationCategory::ArcCurrent,
                source_module: "equations/variation.rs",
                source_function: "reduced_arc_current",
            },

            Equation::EquivalentEnclosureSize => EquationMetadata {
                name: "Equivalent Enclosure Size",
                description: "Single linear dimension summarizing the enclosure for the CF model",
                formula_plain: "EES = (H + W)/2 / 25.4 if D > 203.2 mm, else H / 25.4",
                reference: CodeReference::Ieee1584 { year: 2018, item: "Enclosure size correction factor" },
                variables: vec![
                    Variable::new("EES", "Equivalent enclosure size", "in"),
                    Variable::new("H", "Enclosure height", "mm"),
                    Variable::new("W", "Enclosure width", "mm"),
                    Variable::new("D", "Enclosure depth", "mm"),
                ],
                assumptions: vec!["Shallow boxes (D <= 8 in) use the height only"],
                category: EquationCategory::EnclosureCorrection,
                source_module: "enclosure.rs",
                source_function: "EnclosureGeometry::equivalent_size",
            },

            Equation::CorrectionFactorTypical => EquationMetadata {
                name: "Correction Factor (Typical Enclosure)",
                description: "Enclosure size correction for typical enclosures",
                formula_plain: "CF = b1*EES^2 + b2*EES + b3",
                reference: CodeReference::Ieee1584 { year: 2018, item: "Table 7" },
                variables: vec![
                    Variable::new("CF", "Enclosure correction factor", "-"),
                    Variable::new("b1..b3", "Correction coefficients for configuration", "-"),
                ],
                assumptions: vec![
                    "Enclosed configurations only (VCB, VCBB, HCB); CF = 1 in open air",
                    "CF must be positive",
                ],
                category: EquationCategory::EnclosureCorrection,
                source_module: "enclosure.rs",
                source_function: "correction_factor",
            },

            Equation::CorrectionFactorShallow => EquationMetadata {
                name: "Correction Factor (Shallow Enclosure)",
                description: "Enclosure size correction for shallow enclosures",
                formula_plain: "CF = 1 / (b1*EES^2 + b2*EES + b3)",
                reference: CodeReference::Ieee1584 { year: 2018, item: "Table 7" },
                variables: vec![
                    Variable::new("CF", "Enclosure correction factor", "-"),
                    Variable::new("b1..b3", "Correction coefficients for configuration", "-"),
                ],
                assumptions: vec!["Quadratic must be non-zero to invert", "CF must be positive"],
                category: EquationCategory::EnclosureCorrection,
                source_module: "enclosure.rs",
                source_function: "correction_factor",
            },

            Equation::IntermediateIncidentEnergy => EquationMetadata {
                name: "Intermediate Incident Energy",
                description: "Incident energy at the working distance for one voltage tier",
                formula_plain: "E = 12.552/50 * T * 10^(k1 + k2*lg(G) + k3*Ia/(k4*Ibf^7 + ... + k10*Ibf) + k11*lg(Ibf) + k12*lg(D) + k13*lg(Ia) + lg(1/CF))",
                reference: CodeReference::Nbr17227 { year: 2023, item: "Equations 3 to 6" },
                variables: vec![
                    Variable::new("E", "Intermediate incident energy", "J/cm^2"),
                    Variable::new("T", "Arc duration", "ms"),
                    Variable::new("D", "Working distance", "mm"),
                    Variable::new("k1..k13", "Energy coefficients for configuration and tier", "-"),
                ],
                assumptions: vec![
                    "Current term taken as zero when the denominator polynomial is zero",
                    "Kept in J/cm^2 until the final report",
                ],
                category: EquationCategory::IncidentEnergy,
                source_module: "equations/incident_energy.rs",
                source_function: "incident_energy",
            },

            Equation::IntermediateArcFlashBoundary => EquationMetadata {
                name: "Intermediate Arc-Flash Boundary",
                description: "Distance at which incident energy equals 5.0 J/cm^2 for one voltage tier",
                formula_plain: "AFB = 10^((lg(5.0 / (12.552/50 * T)) - X) / k12)",
                reference: CodeReference::Nbr17227 { year: 2023, item: "Equations 7 to 10" },
                variables: vec![
                    Variable::new("AFB", "Intermediate arc-flash boundary", "mm"),
                    Variable::new("X", "Energy exponent without the k12*lg(D) term", "-"),
                ],
                assumptions: vec!["k12 must be non-zero"],
                category: EquationCategory::ArcFlashBoundary,
                source_module: "equations/incident_energy.rs",
                source_function: "arc_flash_boundary",
            },

            Equation::InterpolationLowSegment => EquationMetadata {
                name: "Interpolation 600 V to 2700 V",
                description: "Value at a system voltage between 0.6 kV and 2.7 kV",
                formula_plain: "x = x600 + (x2700 - x600) * (V - 0.6) / 2.1",
                reference: CodeReference::Nbr17227 { year: 2023, item: "Interpolation between voltage tiers" },
                variables: vec![
                    Variable::new("x", "Arc current, incident energy or boundary", "-"),
                    Variable::new("V", "System voltage", "kV"),
                ],
                assumptions: vec!["At or below 0.6 kV the 600 V tier value is used directly"],
                category: EquationCategory::Interpolation,
                source_module: "equations/interpolation.rs",
                source_function: "interpolate",
            },

            Equation::InterpolationHighSegment => EquationMetadata {
                name: "Interpolation 2700 V to 14300 V",
                description: "Value at a system voltage above 2.7 kV",
                formula_plain: "x = x2700 + (x14300 - x2700) * (V - 2.7) / 11.6",
                reference: CodeReference::Nbr17227 { year: 2023, item: "Interpolation between voltage tiers" },
                variables: vec![
                    Variable::new("x", "Arc current, incident energy or boundary", "-"),
                    Variable::new("V", "System voltage, at most 15 kV", "kV"),
                ],
                assumptions: vec!["Each quantity is interpolated independently"],
                category: EquationCategory::Interpolation,
                source_module: "equations/interpolation.rs",
                source_function: "interpolate",
            },

            Equation::EnergyUnitConversion => EquationMetadata {
                name: "Incident Energy Unit Conversion",
                description: "Converts the final incident energy to cal/cm^2 for reporting",
                formula_plain: "E_cal = E_J / 4.184",
                reference: CodeReference::UnitConversion,
                variables: vec![
                    Variable::new("E_cal", "Incident energy", "cal/cm^2"),
                    Variable::new("E_J", "Incident energy", "J/cm^2"),
                ],
                assumptions: vec!["Applied once, to the final interpolated energy"],
                category: EquationCategory::IncidentEnergy,
                source_module: "units.rs",
                source_function: "CalPerCm2::from",
            },

            Equation::PpeCategorySelection => EquationMetadata {
                name: "PPE Category Selection",
                description: "Maps final incident energy to a protective equipment category",
                formula_plain: "E <= 1.2: 0; <= 4: 1; <= 8: 2; <= 25: 3; <= 40: 4; > 40: dangerous",
                reference: CodeReference::Nfpa70e { year: 2012, item: "PPE categories by incident energy" },
                variables: vec![Variable::new("E", "Final incident energy", "cal/cm^2")],
                assumptions: vec!["Band limits are inclusive on the lower category"],
                category: EquationCategory::HazardClassification,
                source_module: "hazard.rs",
                source_function: "classify",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories in document order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![
            ArcCurrent,
            EnclosureCorrection,
            IncidentEnergy,
            ArcFlashBoundary,
            Interpolation,
            HazardClassification,
        ];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::IntermediateArcCurrent,
    Equation::ArcCurrentVariationFactor,
    Equation::ReducedArcCurrent,
    Equation::EquivalentEnclosureSize,
    Equation::CorrectionFactorTypical,
    Equation::CorrectionFactorShallow,
    Equation::IntermediateIncidentEnergy,
    Equation::IntermediateArcFlashBoundary,
    Equation::InterpolationLowSegment,
    Equation::InterpolationHighSegment,
    Equation::EnergyUnitConversion,
    Equation::PpeCategorySelection,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being used in a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationUsage {
    /// The equation that was used
    pub equation: Equation,
    /// Context describing where it was used (e.g., "2700 V tier")
    pub context: String,
}

impl EquationUsage {
    /// Create a new equation usage record
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
        }
    }
}

/// Collector for equation usage during an evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    /// Get all recorded usages
    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.usages.is_empty()
    }

    /// Get unique equations used, in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Group unique equations by category, in document order
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }

    /// Merge another tracker into this one
    pub fn merge(&mut self, other: EquationTracker) {
        self.usages.extend(other.usages);
    }
}

// ============================================================================
// Markdown Generation
// ============================================================================

/// Generate a markdown reference of every equation in the registry.
///
/// ```rust
/// use arcflash_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Arcflash Equations Reference"));
/// assert!(markdown.contains("## Incident Energy"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(r#"# Arcflash Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists every formula used in an Arcflash evaluation.
Each equation includes its formula, standard reference, source location, and assumptions.

## Units

| Quantity | Unit |
|----------|------|
| Current | kA |
| Voltage | kV |
| Gap, distance, enclosure dimensions | mm |
| Equivalent enclosure size | in |
| Arc duration | ms |
| Incident energy (intermediate) | J/cm² |
| Incident energy (reported) | cal/cm² |

---

"#);

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}
