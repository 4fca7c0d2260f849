//! # Voltage Interpolation
//!
//! Combines the three per-tier values into a value at the actual system
//! voltage. The same rule is applied separately to arc current, incident
//! energy and arc-flash boundary.
//!
//! ## Formula
//!
//! ```text
//! V ≤ 0.6          x = x600
//! 0.6 < V ≤ 2.7    x = x600  + (x2700  − x600)  · (V − 0.6) / 2.1
//! 2.7 < V          x = x2700 + (x14300 − x2700) · (V − 2.7) / 11.6
//! ```
//!
//! Between 14.3 and 15 kV the upper segment extrapolates past the 14.3 kV
//! tier value. V above 15 kV is treated as 15 kV.
//!
//! ## Example
//!
//! ```rust
//! use arcflash_core::equations::interpolate;
//!
//! assert_eq!(interpolate(0.6, 1.0, 2.0, 3.0), 1.0);
//! assert_eq!(interpolate(2.7, 1.0, 2.0, 3.0), 2.0);
//! assert!((interpolate(1.65, 1.0, 2.0, 3.0) - 1.5).abs() < 1e-12);
//! ```

/// Lower breakpoint (kV)
pub const BREAKPOINT_LOW_KV: f64 = 0.6;

/// Upper breakpoint (kV)
pub const BREAKPOINT_HIGH_KV: f64 = 2.7;

/// Highest system voltage covered by the model (kV)
pub const MAX_VOLTAGE_KV: f64 = 15.0;

const LOW_SPAN_KV: f64 = 2.1;
const HIGH_SPAN_KV: f64 = 11.6;

/// Weighted form `a·(1 − t) + b·t`, exact at `t = 0` and `t = 1`
#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Interpolate a per-tier quantity at the system voltage (kV).
pub fn interpolate(system_voltage_kv: f64, value_600: f64, value_2700: f64, value_14300: f64) -> f64 {
    let v = system_voltage_kv.min(MAX_VOLTAGE_KV);
    if v <= BREAKPOINT_LOW_KV {
        value_600
    } else if v <= BREAKPOINT_HIGH_KV {
        lerp(value_600, value_2700, (v - BREAKPOINT_LOW_KV) / LOW_SPAN_KV)
    } else {
        lerp(value_2700, value_14300, (v - BREAKPOINT_HIGH_KV) / HIGH_SPAN_KV)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_breakpoints_are_exact() {
        assert_eq!(interpolate(0.6, 3.37, 4.19, 4.57), 3.37);
        assert_eq!(interpolate(2.7, 3.37, 4.19, 4.57), 4.19);
        assert_eq!(interpolate(0.208, 3.37, 4.19, 4.57), 3.37);
    }

    #[test]
    fn test_upper_segment_reaches_14300_tier() {
        let v = interpolate(14.3, 1.0, 2.0, 3.0);
        assert!((v - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_upper_segment_extrapolates_past_14300_tier() {
        // t = 12.3 / 11.6 at the 15 kV cap
        let x = interpolate(15.0, 0.0, 0.0, 4.6);
        assert!((x - 4.6 * 12.3 / 11.6).abs() < 1e-12);
        assert!(x > 4.6);

        let mid = interpolate(14.65, 1.0, 2.0, 3.0);
        assert!((mid - (2.0 + 11.95 / 11.6)).abs() < 1e-12);
    }

    #[test]
    fn test_voltage_capped_at_15_kv() {
        assert_eq!(interpolate(15.0, 1.0, 2.0, 3.0), interpolate(40.0, 1.0, 2.0, 3.0));
    }

    #[test]
    fn test_13_8_kv_between_upper_tiers() {
        let (ia600, ia2700, ia14300) = (3.3728, 4.1907, 4.5661);
        let ia = interpolate(13.8, ia600, ia2700, ia14300);
        assert!(ia > ia2700 && ia < ia14300, "Ia = {}", ia);
        assert!((ia - 4.5499).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_breakpoints_hold_for_any_values(a in -1e6f64..1e6, b in -1e6f64..1e6, c in -1e6f64..1e6) {
            prop_assert_eq!(interpolate(BREAKPOINT_LOW_KV, a, b, c), a);
            prop_assert_eq!(interpolate(BREAKPOINT_HIGH_KV, a, b, c), b);
        }

        #[test]
        fn prop_continuous_at_breakpoints(a in -1e3f64..1e3, b in -1e3f64..1e3, c in -1e3f64..1e3) {
            let eps = 1e-9;
            for bp in [BREAKPOINT_LOW_KV, BREAKPOINT_HIGH_KV] {
                let below = interpolate(bp - eps, a, b, c);
                let above = interpolate(bp + eps, a, b, c);
                prop_assert!((above - below).abs() < 1e-5, "jump at {}: {} -> {}", bp, below, above);
            }
        }

        #[test]
        fn prop_result_within_segment_bounds(v in 0.208f64..=14.3, a in 0.0f64..100.0, b in 0.0f64..100.0, c in 0.0f64..100.0) {
            let x = interpolate(v, a, b, c);
            let (lo, hi) = if v <= BREAKPOINT_HIGH_KV { (a.min(b), a.max(b)) } else { (b.min(c), b.max(c)) };
            prop_assert!(x >= lo - 1e-9 && x <= hi + 1e-9);
        }

        #[test]
        fn prop_linear_beyond_14300_tier(v in 14.3f64..=15.0, b in 0.0f64..100.0, c in 0.0f64..100.0) {
            let x = interpolate(v, 0.0, b, c);
            let expected = b + (c - b) * (v - BREAKPOINT_HIGH_KV) / HIGH_SPAN_KV;
            prop_assert!((x - expected).abs() < 1e-9, "{} != {}", x, expected);
        }
    }
}
