//! Single-precision sine/cosine kernels.
//!
//! msun k_sinf / k_cosf: shorter polynomials than the double kernels,
//! evaluated entirely in f64 so the intermediate rounding never shows up in
//! the narrowed result. The residual from reduction is already an f64, so
//! there is no tail argument here.

// |sin(x)/x - s(x)| < 2^-37.5 on [-pi/4, pi/4].
const S1: f64 = -0.166666666416265235595; // -0x15555554cbac77.0p-55
const S2: f64 = 0.0083333293858894631756; // 0x111110896efbb2.0p-59
const S3: f64 = -0.000198393348360966317347; // -0x1a00f9e2cae774.0p-65
const S4: f64 = 0.0000027183114939898219064; // 0x16cd878c3b46a7.0p-71

// |cos(x) - c(x)| < 2^-34.1 on [-pi/4, pi/4].
const C0: f64 = -0.499999997251031003120; // -0x1ffffffd0c5e81.0p-54
const C1: f64 = 0.0416666233237390631894; // 0x155553e1053a42.0p-57
const C2: f64 = -0.00138867637746099294692; // -0x16c087e80f1e27.0p-62
const C3: f64 = 0.0000243904487962774090654; // 0x199342e0ee5069.0p-68

#[inline(always)]
pub(super) fn kernel_sinf(x: f64) -> f32 {
    let z = x * x;
    let w = z * z;
    let r = S3 + z * S4;
    let s = z * x;
    ((x + s * (S1 + z * S2)) + s * w * r) as f32
}

#[inline(always)]
pub(super) fn kernel_cosf(x: f64) -> f32 {
    let z = x * x;
    let w = z * z;
    let r = C2 + z * C3;
    (((1.0 + z * C0) + w * C1) + (w * z) * r) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn kernelf_pair_identity_on_reduced_range() {
        for i in 0..=512 {
            let x = -FRAC_PI_4 + (i as f64) * (2.0 * FRAC_PI_4 / 512.0);
            let s = kernel_sinf(x) as f64;
            let c = kernel_cosf(x) as f64;
            let identity = s * s + c * c;
            assert!(
                (identity - 1.0).abs() < 1e-6,
                "identity failed for x={x}: got {identity}"
            );
        }
    }

    #[test]
    fn kernelf_matches_wide_reference() {
        for i in 0..=512 {
            let x = -FRAC_PI_4 + (i as f64) * (2.0 * FRAC_PI_4 / 512.0);
            let s = kernel_sinf(x);
            let c = kernel_cosf(x);
            assert!((s as f64 - x.sin()).abs() <= 2.0 * f32::EPSILON as f64, "sin at {x}");
            assert!((c as f64 - x.cos()).abs() <= 2.0 * f32::EPSILON as f64, "cos at {x}");
        }
    }
}
