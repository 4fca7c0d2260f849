//! # Arc-Flash Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`arc_flash`] - Complete hazard evaluation at one system voltage
//! - [`sweep`] - The same evaluation repeated across system voltages

pub mod arc_flash;
pub mod sweep;

// Re-export commonly used types
pub use arc_flash::{calculate, ArcFlashEngine, CalculationInput, FinalResult, IntermediateResult};
pub use sweep::{sweep_voltage, voltage_range, SweepPoint};
