//! Single-precision argument reduction by pi/2.
//!
//! Everything runs in f64, so a single residual value is enough (no tail).
//! Small multiples of pi/2 cover the moderate band directly; the medium band
//! uses the rint trick with a 25+53-bit pi/2; huge arguments reuse the
//! Payne-Hanek core with one limb.

use super::reduce::rem_pio2_core;

const TOINT: f64 = 1.5 / f64::EPSILON; // 0x1.8p52, rounds to integer under RN

const INVPIO2: f64 = 6.36619772367581382433e-01; // 0x3FE45F30, 0x6DC9C883
const PIO2_1: f64 = 1.57079631090164184570e+00; // first 25 bits of pi/2
const PIO2_1T: f64 = 1.58932547735281966916e-08; // pi/2 - PIO2_1

// Small multiples of pi/2 rounded to double precision.
const PIO2: f64 = core::f64::consts::FRAC_PI_2;
const S1PIO2: f64 = 1.0 * PIO2;
const S2PIO2: f64 = 2.0 * PIO2;
const S3PIO2: f64 = 3.0 * PIO2;
const S4PIO2: f64 = 4.0 * PIO2;

/// Reduces finite `x` with |x| > pi/4 to `(n, y)` with
/// `x ~ n*(pi/2) + y` and |y| <= pi/4, `y` in double precision.
pub(super) fn rem_pio2f(x: f32) -> (i32, f64) {
    let x64 = x as f64;
    let ix = x.to_bits() & 0x7fff_ffff;
    let sign = (x.to_bits() >> 31) != 0;

    // moderate band: |x| <= 9pi/4, quadrant by direct comparison
    if ix <= 0x40e2_31d5 {
        let (n, mult) = if ix <= 0x4016_cbe3 {
            (1, S1PIO2) // |x| <= 3pi/4
        } else if ix <= 0x407b_53d1 {
            (2, S2PIO2) // |x| <= 5pi/4
        } else if ix <= 0x40af_eddf {
            (3, S3PIO2) // |x| <= 7pi/4
        } else {
            (4, S4PIO2)
        };
        return if sign {
            (-n, x64 + mult)
        } else {
            (n, x64 - mult)
        };
    }

    // medium band: |x| < 2^28*(pi/2), 25+53 bit pi/2 is enough
    if ix < 0x4dc9_0fdb {
        let f_n = x64 * INVPIO2 + TOINT - TOINT;
        return (f_n as i32, x64 - f_n * PIO2_1 - f_n * PIO2_1T);
    }

    // large band: one 24-bit limb through the Payne-Hanek core.
    // Caller has already filtered inf/NaN.
    let e0 = ((ix >> 23) as i32) - (0x7f + 23); // ilogb(|x|) - 23
    let tx = [f32::from_bits(ix - ((e0 as u32) << 23)) as f64];
    let mut ty = [0.0f64; 2];
    let n = rem_pio2_core(&tx, &mut ty, e0, 0);
    if sign {
        (-n, -ty[0])
    } else {
        (n, ty[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    fn check_reduction(x: f32) {
        let (n, y) = rem_pio2f(x);
        assert!(
            y.abs() <= FRAC_PI_4 + 1e-7,
            "residual out of range for x={x}: n={n} y={y}"
        );
        let rebuilt = (n as f64) * core::f64::consts::FRAC_PI_2 + y;
        assert!(
            (rebuilt - x as f64).abs() < 1e-6 * (x.abs() as f64).max(1.0),
            "x={x} n={n} rebuilt={rebuilt}"
        );
    }

    #[test]
    fn residual_stays_within_quarter_pi() {
        let inputs = [
            0.8f32, -0.8, 1.0, 2.0, 3.0, -3.0, 4.0, 5.0, 6.0, -6.0, 7.0, 10.0, 100.0, 1e4, -1e4,
            1e6,
        ];
        for &x in &inputs {
            check_reduction(x);
        }
        for k in 1..100 {
            check_reduction((k as f32) * core::f32::consts::FRAC_PI_2);
        }
    }

    #[test]
    fn moderate_band_quadrants() {
        // one point per quadrant on each side of zero
        let cases: [(f32, i32); 8] = [
            (1.0, 1),
            (-1.0, -1),
            (3.0, 2),
            (-3.0, -2),
            (4.5, 3),
            (-4.5, -3),
            (6.0, 4),
            (-6.0, -4),
        ];
        for &(x, expected_n) in &cases {
            let (n, _) = rem_pio2f(x);
            assert_eq!(n, expected_n, "quadrant for x={x}");
        }
    }

    #[test]
    fn huge_band_matches_wide_reduction() {
        // past 2^28*(pi/2) only the Payne-Hanek path can be right
        for &x in &[1e10f32, -1e10, 1e20, 1e30, 3.4e38] {
            let (n, y) = rem_pio2f(x);
            let (s, c) = (y.sin(), y.cos());
            let rebuilt = match n & 3 {
                0 => s,
                1 => c,
                2 => -s,
                _ => -c,
            };
            let s_ref = (x as f64).sin();
            assert!(
                (rebuilt - s_ref).abs() < 1e-7,
                "x={x}: composed sin={rebuilt} wide sin={s_ref}"
            );
        }
    }
}
