//! Equipment-class defaults (IEEE 1584-2018 Table 8).
//!
//! Typical electrode gap, working distance and enclosure size per class of
//! equipment. Where the table qualifies depth only as "≤ 8 in" or "> 8 in",
//! each side is its own entry; the deep variant uses 254 mm (10 in).

use serde::Serialize;

/// Default geometry for one class of equipment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquipmentClass {
    /// Lookup key used by `--equipment`
    pub key: &'static str,
    pub description: &'static str,
    pub gap_mm: f64,
    pub working_distance_mm: f64,
    pub height_mm: f64,
    pub width_mm: f64,
    pub depth_mm: f64,
    /// Depth as qualified in the source table, when it is a comparison
    pub depth_qualifier: Option<&'static str>,
}

const fn class(
    key: &'static str,
    description: &'static str,
    gap_mm: f64,
    working_distance_mm: f64,
    hwd_mm: [f64; 3],
    depth_qualifier: Option<&'static str>,
) -> EquipmentClass {
    EquipmentClass {
        key,
        description,
        gap_mm,
        working_distance_mm,
        height_mm: hwd_mm[0],
        width_mm: hwd_mm[1],
        depth_mm: hwd_mm[2],
        depth_qualifier,
    }
}

/// Equipment classes, in table order
pub const EQUIPMENT: &[EquipmentClass] = &[
    class("swgr-15kv", "15 kV switchgear", 152.0, 914.4, [1143.0, 762.0, 762.0], None),
    class("mcc-15kv", "15 kV MCC", 152.0, 914.4, [914.4, 914.4, 914.4], None),
    class("swgr-5kv", "5 kV switchgear", 104.0, 914.4, [914.4, 914.4, 914.4], None),
    class("swgr-5kv-large", "5 kV switchgear (large)", 104.0, 914.4, [1143.0, 762.0, 762.0], None),
    class("mcc-5kv", "5 kV MCC", 104.0, 914.4, [660.4, 660.4, 660.4], None),
    class("swgr-lv", "Low-voltage switchgear", 32.0, 609.6, [508.0, 508.0, 508.0], None),
    class(
        "mcc-lv-shallow",
        "Low-voltage MCC and panelboard (shallow)",
        25.0,
        457.2,
        [355.6, 304.8, 203.2],
        Some("≤ 203.2 mm"),
    ),
    class(
        "mcc-lv-deep",
        "Low-voltage MCC and panelboard (deep)",
        25.0,
        457.2,
        [355.6, 304.8, 254.0],
        Some("> 203.2 mm"),
    ),
    class(
        "junction-box-shallow",
        "Cable junction box (shallow)",
        13.0,
        457.2,
        [355.6, 304.8, 203.2],
        Some("≤ 203.2 mm"),
    ),
    class(
        "junction-box-deep",
        "Cable junction box (deep)",
        13.0,
        457.2,
        [355.6, 304.8, 254.0],
        Some("> 203.2 mm"),
    ),
];

/// Find an equipment class by key (case-insensitive)
pub fn lookup(key: &str) -> Option<&'static EquipmentClass> {
    EQUIPMENT.iter().find(|e| e.key.eq_ignore_ascii_case(key.trim()))
}

/// Comma-separated list of every key, for error messages
pub fn known_keys() -> String {
    EQUIPMENT.iter().map(|e| e.key).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<_> = EQUIPMENT.iter().map(|e| e.key).collect();
        assert_eq!(keys.len(), EQUIPMENT.len());
    }

    #[test]
    fn test_lookup() {
        let swgr = lookup("SWGR-15KV").unwrap();
        assert_eq!(swgr.gap_mm, 152.0);
        assert_eq!(swgr.working_distance_mm, 914.4);
        assert!(lookup("transformer").is_none());
    }

    #[test]
    fn test_depth_variants_straddle_shallow_limit() {
        let shallow = lookup("mcc-lv-shallow").unwrap();
        let deep = lookup("mcc-lv-deep").unwrap();
        assert!(shallow.depth_mm <= 203.2);
        assert!(deep.depth_mm > 203.2);
        assert_eq!(shallow.gap_mm, deep.gap_mm);
    }

    #[test]
    fn test_all_dimensions_positive() {
        for e in EQUIPMENT {
            for v in [e.gap_mm, e.working_distance_mm, e.height_mm, e.width_mm, e.depth_mm] {
                assert!(v > 0.0, "{} has a non-positive dimension", e.key);
            }
        }
    }
}
