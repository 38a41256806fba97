//! Entry points and the shared classification/dispatch driver.
//!
//! The reference implementations keep two near-identical source files, one
//! per precision. Here the common shape lives in [`sincos_of`], generic over
//! a precision trait that supplies the bit thresholds, the reduced-residual
//! representation and the kernel/reducer hooks; the trait is implemented
//! exactly twice.

use core::ops::Neg;

use super::kernel::{kernel_cos, kernel_sin};
use super::kernelf::{kernel_cosf, kernel_sinf};
use super::quadrant::rotate;
use super::reduce::rem_pio2;
use super::reducef::rem_pio2f;
use super::{force_eval, force_eval_f32, hi_word};

pub(super) trait SinCosArg: Copy + Neg<Output = Self> {
    /// What this precision's range reduction hands to the kernels.
    type Reduced: Copy;

    const ONE: Self;
    /// |x| below this: sin(x) = x, cos(x) = 1 to working precision.
    const TINY_BITS: u32;
    /// |x| below this is subnormal (controls which flag the tiny path raises).
    const SUBNORM_BITS: u32;
    /// Bit pattern of pi/4 (high word for f64).
    const PIO4_BITS: u32;
    /// Exponent-all-ones threshold: inf or NaN at or above.
    const EXP_BITS: u32;

    fn abs_top(self) -> u32;
    fn is_zero(self) -> bool;
    /// Raises inexact (and underflow when subnormal) for the tiny path.
    fn raise_tiny_flags(self, subnormal: bool);
    /// `x - x`: NaN for non-finite input, raising invalid only for infinity.
    fn nan_pair(self) -> (Self, Self);
    fn unreduced(self) -> Self::Reduced;
    fn reduce(self) -> (i32, Self::Reduced);
    fn kernels(r: Self::Reduced) -> (Self, Self);
}

/// Computes `(sin x, cos x)` in one pass: classify, reduce once, run both
/// kernels over the shared residual, rotate by the quadrant.
#[inline(always)]
pub(super) fn sincos_of<T: SinCosArg>(x: T) -> (T, T) {
    let ix = x.abs_top();

    // |x| <= pi/4: no reduction
    if ix <= T::PIO4_BITS {
        if x.is_zero() {
            // exact zero short-circuits ahead of the kernels so the cosine
            // comes back as exact 1.0 and the sine keeps the sign of zero
            return (x, T::ONE);
        }
        if ix < T::TINY_BITS {
            x.raise_tiny_flags(ix < T::SUBNORM_BITS);
            return (x, T::ONE);
        }
        return T::kernels(x.unreduced());
    }

    // inf or NaN
    if ix >= T::EXP_BITS {
        return x.nan_pair();
    }

    let (n, r) = x.reduce();
    let (ks, kc) = T::kernels(r);
    rotate(n, ks, kc)
}

impl SinCosArg for f64 {
    // (residual, tail, tail-present flag) for the double kernels
    type Reduced = (f64, f64, i32);

    const ONE: Self = 1.0;
    const TINY_BITS: u32 = 0x3e46_a09e; // 2^-27 * sqrt(2)
    const SUBNORM_BITS: u32 = 0x0010_0000;
    const PIO4_BITS: u32 = 0x3fe9_21fb;
    const EXP_BITS: u32 = 0x7ff0_0000;

    #[inline(always)]
    fn abs_top(self) -> u32 {
        hi_word(self) & 0x7fff_ffff
    }

    #[inline(always)]
    fn is_zero(self) -> bool {
        self == 0.0
    }

    #[inline(always)]
    fn raise_tiny_flags(self, subnormal: bool) {
        let x1p120 = f64::from_bits(0x4770_0000_0000_0000); // 2^120
        if subnormal {
            force_eval(self / x1p120);
        } else {
            force_eval(self + x1p120);
        }
    }

    #[inline(always)]
    fn nan_pair(self) -> (Self, Self) {
        // volatile read keeps inf - inf from being folded to a constant,
        // so the invalid flag is raised at run time
        let v = unsafe { core::ptr::read_volatile(&self) };
        let rv = v - v;
        (rv, rv)
    }

    #[inline(always)]
    fn unreduced(self) -> Self::Reduced {
        (self, 0.0, 0)
    }

    #[inline(always)]
    fn reduce(self) -> (i32, Self::Reduced) {
        let (n, y0, y1) = rem_pio2(self);
        (n, (y0, y1, 1))
    }

    #[inline(always)]
    fn kernels((y0, y1, iy): Self::Reduced) -> (Self, Self) {
        (kernel_sin(y0, y1, iy), kernel_cos(y0, y1))
    }
}

impl SinCosArg for f32 {
    // single double-precision residual, no tail
    type Reduced = f64;

    const ONE: Self = 1.0;
    const TINY_BITS: u32 = 0x3980_0000; // 2^-12
    const SUBNORM_BITS: u32 = 0x0080_0000;
    const PIO4_BITS: u32 = 0x3f49_0fda;
    const EXP_BITS: u32 = 0x7f80_0000;

    #[inline(always)]
    fn abs_top(self) -> u32 {
        self.to_bits() & 0x7fff_ffff
    }

    #[inline(always)]
    fn is_zero(self) -> bool {
        self == 0.0
    }

    #[inline(always)]
    fn raise_tiny_flags(self, subnormal: bool) {
        let x1p120 = f32::from_bits(0x7b80_0000); // 2^120
        if subnormal {
            force_eval_f32(self / x1p120);
        } else {
            force_eval_f32(self + x1p120);
        }
    }

    #[inline(always)]
    fn nan_pair(self) -> (Self, Self) {
        let v = unsafe { core::ptr::read_volatile(&self) };
        let rv = v - v;
        (rv, rv)
    }

    #[inline(always)]
    fn unreduced(self) -> Self::Reduced {
        self as f64
    }

    #[inline(always)]
    fn reduce(self) -> (i32, Self::Reduced) {
        rem_pio2f(self)
    }

    #[inline(always)]
    fn kernels(y: Self::Reduced) -> (Self, Self) {
        (kernel_sinf(y), kernel_cosf(y))
    }
}

/// Simultaneous sine and cosine of `x` (radians).
///
/// Returns `(sin x, cos x)`. For infinite `x` both slots are NaN and the
/// invalid-operation flag is raised; NaN propagates to both slots.
pub fn sincos(x: f64) -> (f64, f64) {
    sincos_of(x)
}

/// Simultaneous sine and cosine of `x` (radians), single precision.
pub fn sincosf(x: f32) -> (f32, f32) {
    sincos_of(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrant_composition_round_trip() {
        // one representative per quadrant
        let base = 0.3f64;
        for k in 0..4 {
            let x = base + (k as f64) * core::f64::consts::FRAC_PI_2;
            let (s, c) = sincos(x);
            assert!((s - x.sin()).abs() < 1e-15, "sin quadrant {k}");
            assert!((c - x.cos()).abs() < 1e-15, "cos quadrant {k}");
        }
    }

    #[test]
    fn small_path_skips_reduction() {
        // pi/4 itself stays on the direct kernel path
        let x = f64::from_bits(0x3fe9_21fb_5444_2d18);
        let (s, c) = sincos(x);
        assert!((s - x.sin()).abs() < 3e-16);
        assert!((c - x.cos()).abs() < 3e-16);
    }
}
