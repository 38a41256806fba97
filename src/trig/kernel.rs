//! Double-precision sine/cosine kernels on [-pi/4, pi/4].
//!
//! fdlibm __kernel_sin / __kernel_cos. Both kernels are driven off the same
//! z = x*x, so evaluating the pair costs one shared power series setup plus
//! two Horner chains.

use super::{hi_word, with_hi_lo};

const HALF: f64 = 5.00000000000000000000e-01;
const ONE: f64 = 1.00000000000000000000e+00;

// Minimax coefficients for sin(x)/x - 1 in even powers of x, |x| <= pi/4.
const S1: f64 = -1.66666666666666324348e-01; // 0xBFC55555_55555549
const S2: f64 = 8.33333333332248946124e-03; // 0x3F811111_1110F8A6
const S3: f64 = -1.98412698298579493134e-04; // 0xBF2A01A0_19C161D5
const S4: f64 = 2.75573137070700676789e-06; // 0x3EC71DE3_57B1FE7D
const S5: f64 = -2.50507602534068634195e-08; // 0xBE5AE5E6_8A2B9CEB
const S6: f64 = 1.58969099521155010221e-10; // 0x3DE5D93A_5ACFD57C

// Minimax coefficients for cos(x) - (1 - x*x/2), |x| <= pi/4.
const C1: f64 = 4.16666666666666019037e-02; // 0x3FA55555_5555554C
const C2: f64 = -1.38888888888741095749e-03; // 0xBF56C16C_16C15177
const C3: f64 = 2.48015872894767294178e-05; // 0x3EFA01A0_19CB1590
const C4: f64 = -2.75573143513906633035e-07; // 0xBE927E4F_809C52AD
const C5: f64 = 2.08757232129817482790e-09; // 0x3E21EE9E_BDB4B1C4
const C6: f64 = -1.13596475577881948265e-11; // 0xBDA8FAE9_BE8838D4

/// Sine of `x + y` for |x| <= pi/4, where `y` is the low-order tail of the
/// reduced argument. `iy == 0` means the argument came straight from the
/// caller and carries no tail.
#[inline(always)]
pub(super) fn kernel_sin(x: f64, y: f64, iy: i32) -> f64 {
    let ix = hi_word(x) & 0x7fff_ffff;
    if ix < 0x3e40_0000 {
        // |x| < 2^-27: sin(x) ~ x; the cast raises inexact for x != 0
        if (x as i32) == 0 {
            return x;
        }
    }
    let z = x * x;
    let v = z * x;
    let r = S2 + z * (S3 + z * (S4 + z * (S5 + z * S6)));
    if iy == 0 {
        x + v * (S1 + z * r)
    } else {
        x - ((z * (HALF * y - v * r) - y) - v * S1)
    }
}

/// Cosine of `x + y` for |x| <= pi/4. The `1 - z/2` head is split off and
/// recombined last so the correction terms never cancel against it.
#[inline(always)]
pub(super) fn kernel_cos(x: f64, y: f64) -> f64 {
    let ix = hi_word(x) & 0x7fff_ffff;
    if ix < 0x3e40_0000 {
        // |x| < 2^-27: cos(x) ~ 1
        if (x as i32) == 0 {
            return ONE;
        }
    }
    let z = x * x;
    let r = z * (C1 + z * (C2 + z * (C3 + z * (C4 + z * (C5 + z * C6)))));
    if ix < 0x3fd3_3333 {
        // |x| < 0.3
        ONE - (HALF * z - (z * r - x * y))
    } else {
        // 1 - z/2 loses bits here; peel off qx ~ x/4 and fold it back in
        let qx = if ix > 0x3fe9_0000 {
            // x > 0.78125
            0.28125
        } else {
            // qx = x/4 with the low 32 bits cleared
            with_hi_lo(ix - 0x0020_0000, 0)
        };
        let hz = HALF * z - qx;
        let a = ONE - qx;
        a - (hz - (z * r - x * y))
    }
}
