//! Built-in NBR 17227:2023 coefficient data
//!
//! The values are identical to IEEE 1584-2018 Tables 1, 3, 4, 5 and 7,
//! which NBR 17227 adopts. The current-variation set is NBR 17227 Table 5
//! and is shared by every electrode configuration.
//!
//! Layout of each tier entry: `(tier, current k1..k10, energy k1..k13)`.

use super::{
    CoefficientTable, CorrectionCoefficients, CurrentCoefficients, EnclosureRow,
    EnergyCoefficients, TierRow, VariationCoefficients, VariationRow,
    ElectrodeConfiguration as Ec, VoltageTier as Vt,
};
use crate::enclosure::EnclosureClass;

type TierData = (Vt, [f64; 10], [f64; 13]);

// Polynomial columns shared between configurations (k4..k10 of the current
// table, reused in the energy tables).
const POLY_VCB_600: [f64; 7] = [0.0, 0.0, -4.783e-9, 1.962e-6, -0.000229, 0.003141, 1.092];
const POLY_VCB_HV: [f64; 7] = [-1.557e-12, 4.556e-10, -4.186e-8, 8.346e-7, 5.482e-5, -0.003191, 0.9729];
const POLY_VCBB_600: [f64; 7] = [0.0, 0.0, -5.767e-9, 2.524e-6, -0.00034, 0.01187, 1.013];
const POLY_VCBB_HV: [f64; 7] = [0.0, -9.204e-11, 2.901e-8, -3.262e-6, 0.0001569, -0.004003, 0.9825];
const POLY_HCB_600: [f64; 7] = [0.0, 0.0, -5.382e-9, 2.316e-6, -0.000302, 0.0091, 0.9725];
const POLY_HCB_2700: [f64; 7] = [0.0, 0.0, 4.859e-10, -1.814e-7, -9.128e-6, -0.0007, 0.9881];
const POLY_HCB_14300: [f64; 7] = [0.0, -5.043e-11, 2.233e-8, -3.046e-6, 0.000116, -0.001145, 0.9839];
const POLY_HOA_600: [f64; 7] = [0.0, 0.0, -3.895e-9, 1.641e-6, -0.000197, 0.002615, 1.1];
const POLY_HOA_HV: [f64; 7] = [0.0, 0.0, 7.859e-10, -1.914e-7, -9.128e-6, -0.0007, 0.9981];

const fn current(head: [f64; 3], poly: [f64; 7]) -> [f64; 10] {
    [
        head[0], head[1], head[2], poly[0], poly[1], poly[2], poly[3], poly[4], poly[5], poly[6],
    ]
}

const fn energy(head: [f64; 3], poly: [f64; 7], tail: [f64; 3]) -> [f64; 13] {
    [
        head[0], head[1], head[2], poly[0], poly[1], poly[2], poly[3], poly[4], poly[5], poly[6],
        tail[0], tail[1], tail[2],
    ]
}

const VCB: [TierData; 3] = [
    (
        Vt::V600,
        current([-0.04287, 1.035, -0.083], POLY_VCB_600),
        energy([0.753364, 0.566, 1.752636], POLY_VCB_600, [0.0, -1.598, 0.957]),
    ),
    (
        Vt::V2700,
        current([0.0065, 1.001, -0.024], POLY_VCB_HV),
        energy([2.40021, 0.165, 0.354202], POLY_VCB_HV, [0.0, -1.569, 0.9778]),
    ),
    (
        Vt::V14300,
        current([0.005795, 1.015, -0.011], POLY_VCB_HV),
        energy([3.825917, 0.11, -0.999749], POLY_VCB_HV, [0.0, -1.568, 0.99]),
    ),
];

const VCBB: [TierData; 3] = [
    (
        Vt::V600,
        current([-0.017432, 0.98, -0.05], POLY_VCBB_600),
        energy([3.068459, 0.26, -0.098107], POLY_VCBB_600, [-0.06, -1.809, 1.19]),
    ),
    (
        Vt::V2700,
        current([0.002823, 0.995, -0.0125], POLY_VCBB_HV),
        energy([3.870592, 0.185, -0.736618], POLY_VCBB_HV, [0.0, -1.742, 1.09]),
    ),
    (
        Vt::V14300,
        current([0.014827, 1.01, -0.01], POLY_VCBB_HV),
        energy([3.644309, 0.215, -0.585522], POLY_VCBB_HV, [0.0, -1.677, 1.06]),
    ),
];

const HCB: [TierData; 3] = [
    (
        Vt::V600,
        current([0.054922, 0.988, -0.11], POLY_HCB_600),
        energy([4.073745, 0.344, -0.370259], POLY_HCB_600, [0.0, -2.03, 1.036]),
    ),
    (
        Vt::V2700,
        current([0.001011, 1.003, -0.0249], POLY_HCB_2700),
        energy([3.486391, 0.177, -0.193101], POLY_HCB_2700, [0.027, -1.723, 1.055]),
    ),
    (
        Vt::V14300,
        current([0.008693, 0.999, -0.02], POLY_HCB_14300),
        energy([3.044516, 0.125, 0.245106], POLY_HCB_14300, [0.0, -1.655, 1.084]),
    ),
];

const VOA: [TierData; 3] = [
    (
        Vt::V600,
        current([0.043785, 1.04, -0.18], POLY_VCB_600),
        energy([0.679294, 0.746, 1.222636], POLY_VCB_600, [0.0, -1.598, 0.997]),
    ),
    (
        Vt::V2700,
        current([-0.02395, 1.006, -0.0188], POLY_VCB_HV),
        energy([3.880724, 0.105, -1.906033], POLY_VCB_HV, [0.0, -1.515, 1.115]),
    ),
    (
        Vt::V14300,
        current([0.005371, 1.0102, -0.029], POLY_VCB_HV),
        energy([3.405454, 0.12, -0.93245], POLY_VCB_HV, [0.0, -1.534, 0.979]),
    ),
];

const HOA: [TierData; 3] = [
    (
        Vt::V600,
        current([0.111147, 1.008, -0.24], POLY_HOA_600),
        energy([3.470417, 0.465, -0.261863], POLY_HOA_600, [0.0, -1.99, 1.04]),
    ),
    (
        Vt::V2700,
        current([0.000435, 1.006, -0.038], POLY_HOA_HV),
        energy([3.616266, 0.149, -0.761561], POLY_HOA_HV, [0.0, -1.639, 1.078]),
    ),
    (
        Vt::V14300,
        current([0.000904, 0.999, -0.02], POLY_HOA_HV),
        energy([2.04049, 0.177, 1.005092], POLY_HOA_HV, [-0.05, -1.633, 1.151]),
    ),
];

/// Enclosure correction coefficients b1, b2, b3 (enclosed configurations only)
const ENCLOSURE: [(Ec, EnclosureClass, [f64; 3]); 6] = [
    (Ec::Vcb, EnclosureClass::Typical, [-0.000302, 0.03441, 0.4325]),
    (Ec::Vcbb, EnclosureClass::Typical, [-0.0002976, 0.032, 0.479]),
    (Ec::Hcb, EnclosureClass::Typical, [-0.0001923, 0.01935, 0.6899]),
    (Ec::Vcb, EnclosureClass::Shallow, [0.002222, -0.02556, 0.6222]),
    (Ec::Vcbb, EnclosureClass::Shallow, [-0.002778, 0.1194, -0.2778]),
    (Ec::Hcb, EnclosureClass::Shallow, [-0.0005556, 0.03722, 0.4778]),
];

/// Current-variation coefficients k11..k17
const VARIATION: [f64; 7] = [0.0, 0.0, 0.0, 0.0, -0.0001, 0.0022, 0.02];

/// Build the complete standard table.
pub(super) fn table() -> CoefficientTable {
    let sets: [(Ec, &[TierData; 3]); 5] = [
        (Ec::Vcb, &VCB),
        (Ec::Vcbb, &VCBB),
        (Ec::Hcb, &HCB),
        (Ec::Voa, &VOA),
        (Ec::Hoa, &HOA),
    ];

    let tiers = sets
        .iter()
        .flat_map(|(configuration, data)| {
            data.iter().map(move |(tier, cur, en)| TierRow {
                configuration: *configuration,
                tier: *tier,
                current: CurrentCoefficients(*cur),
                energy: EnergyCoefficients(*en),
            })
        })
        .collect();

    let enclosure = ENCLOSURE
        .iter()
        .map(|(configuration, class, b)| EnclosureRow {
            configuration: *configuration,
            class: *class,
            coefficients: CorrectionCoefficients {
                b1: b[0],
                b2: b[1],
                b3: b[2],
            },
        })
        .collect();

    let variation = Ec::ALL
        .iter()
        .map(|configuration| VariationRow {
            configuration: *configuration,
            coefficients: VariationCoefficients(VARIATION),
        })
        .collect();

    CoefficientTable {
        tiers,
        enclosure,
        variation,
    }
}
