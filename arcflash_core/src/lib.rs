//! # arcflash_core - Arc-Flash Hazard Calculation Engine
//!
//! `arcflash_core` computes arc current, incident energy, arc-flash boundary
//! and PPE category for electrical equipment following the NBR 17227 /
//! IEEE 1584 empirical model. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Injected data**: Coefficients are a value passed to the engine, never global mutable state
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types naming the failing field, configuration and tier
//!
//! ## Quick Start
//!
//! ```rust
//! use arcflash_core::{ArcFlashEngine, CalculationInput, ElectrodeConfiguration};
//! use arcflash_core::enclosure::{EnclosureClass, EnclosureGeometry};
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
//! let result = ArcFlashEngine::standard().evaluate(&input).unwrap();
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("ppe_category"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The engine, its input/result types and voltage sweeps
//! - [`coefficients`] - Coefficient table and the built-in NBR 17227 data
//! - [`enclosure`] - Enclosure geometry and correction factor
//! - [`equations`] - Model equations and the equation registry
//! - [`hazard`] - PPE category classification
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod coefficients;
pub mod enclosure;
pub mod equations;
pub mod errors;
pub mod hazard;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{ArcFlashEngine, CalculationInput, FinalResult, IntermediateResult};
pub use coefficients::{CoefficientTable, ElectrodeConfiguration, VoltageTier};
pub use errors::{CalcError, CalcResult};
pub use hazard::PpeCategory;
