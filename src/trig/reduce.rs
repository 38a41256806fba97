//! Double-precision argument reduction by pi/2.
//!
//! fdlibm __ieee754_rem_pio2 plus the Payne-Hanek core (__kernel_rem_pio2,
//! 24-bit limbs). The residual comes back as a high/low pair so callers can
//! fold the tail into the kernels; the quadrant is the raw `n` with
//! `x ~ n*(pi/2) + y_hi + y_lo`.

use super::{floor_f64, hi_word, lo_word, scalbn, with_hi_lo};

/// 2/pi in 24-bit hex digits, enough for the largest finite double.
const TWO_OVER_PI: [u32; 66] = [
    0xa2f983, 0x6e4e44, 0x1529fc, 0x2757d1, 0xf534dd, 0xc0db62,
    0x95993c, 0x439041, 0xfe5163, 0xabdebb, 0xc561b7, 0x246e3a,
    0x424dd2, 0xe00649, 0x2eea09, 0xd1921c, 0xfe1deb, 0x1cb129,
    0xa73ee8, 0x8235f5, 0x2ebb44, 0x84e99c, 0x7026b4, 0x5f7e41,
    0x3991d6, 0x398353, 0x39f49c, 0x845f8b, 0xbdf928, 0x3b1ff8,
    0x97ffde, 0x05980f, 0xef2f11, 0x8b5a0a, 0x6d1f6d, 0x367ecf,
    0x27cb09, 0xb74f46, 0x3f669e, 0x5fea2d, 0x7527ba, 0xc7ebe5,
    0xf17b3d, 0x0739f7, 0x8a5292, 0xea6bfb, 0x5fb11f, 0x8d5d08,
    0x560330, 0x46fc7b, 0x6babf0, 0xcfbc20, 0x9af436, 0x1da9e3,
    0x91615e, 0xe61b08, 0x659985, 0x5f14a0, 0x68408d, 0xffd880,
    0x4d7327, 0x310606, 0x1556ca, 0x73a8c9, 0x60e27b, 0xc08c6b,
];

/// High words of the first 32 multiples of pi/2, used to spot the multiples
/// that need a second reduction step in the medium band.
const NPIO2_HW: [u32; 32] = [
    0x3ff921fb, 0x400921fb, 0x4012d97c, 0x401921fb, 0x401f6a7a, 0x4022d97c,
    0x4025fdbb, 0x402921fb, 0x402c463a, 0x402f6a7a, 0x4031475c, 0x4032d97c,
    0x40346b9c, 0x4035fdbb, 0x40378fdb, 0x403921fb, 0x403ab41b, 0x403c463a,
    0x403dd85a, 0x403f6a7a, 0x40407e4c, 0x4041475c, 0x4042106c, 0x4042d97c,
    0x4043a28c, 0x40446b9c, 0x404534ac, 0x4045fdbb, 0x4046c6cb, 0x40478fdb,
    0x404858eb, 0x404921fb,
];

const HALF: f64 = 5.00000000000000000000e-01;
const TWO24: f64 = 1.67772160000000000000e+07; // 2^24
const TWON24: f64 = 5.96046447753906250000e-08; // 2^-24
const INVPIO2: f64 = f64::from_bits(0x3fe4_5f30_6dc9_c883); // 53 bits of 2/pi

// pi/2 split into three pieces, each with 33 zero trailing bits, so that
// n * piece is exact for the medium-band n.
const PIO2_1: f64 = 1.57079632673412561417e+00; // 0x3FF921FB54400000
const PIO2_1T: f64 = 6.07710050650619224932e-11; // 0x3DD0B4611A626331
const PIO2_2: f64 = 6.07710050630396597660e-11; // 0x3DD0B4611A600000
const PIO2_2T: f64 = 2.02226624879595063154e-21; // 0x3BA3198A2E037073
const PIO2_3: f64 = 2.02226624871116645580e-21; // 0x3BA3198A2E000000
const PIO2_3T: f64 = 8.47842766036889956997e-32; // 0x397B839A252049C1

/// pi/2 in 24-bit chunks for the Payne-Hanek back-multiplication.
const PIO2_CHUNKS: [f64; 8] = [
    1.57079625129699707031e+00,
    7.54978941586159635335e-08,
    5.39030252995776476554e-15,
    3.28200341580791294123e-22,
    1.27065575308067607349e-29,
    1.22933308981111328932e-36,
    2.73370053816464559624e-44,
    2.16741683877804819444e-51,
];

/// Guard-digit counts per output precision (single, double, extended, quad).
const INIT_JK: [i32; 4] = [2, 3, 4, 6];

/// Payne-Hanek reduction core over 24-bit limbs.
///
/// `x` holds 1..=3 positive limbs of the scaled argument (each an integer
/// value below 2^24 except the last), `e0` is its exponent offset, `prec`
/// selects the guard-digit count from `INIT_JK`. Writes the residual into
/// `y` (high then low) and returns the quadrant in the low three bits.
pub(super) fn rem_pio2_core(x: &[f64], y: &mut [f64; 2], e0: i32, prec: usize) -> i32 {
    let mut iq = [0i32; 20];
    let mut f = [0f64; 20];
    let mut fq = [0f64; 20];
    let mut q = [0f64; 20];

    let jk = INIT_JK[prec];
    let jp = jk;

    let jx = x.len() as i32 - 1;
    let jv = ((e0 - 3) / 24).max(0);
    let mut q0 = e0 - 24 * (jv + 1);

    // set up the f[] limbs of 2/pi aligned with x
    let mut j = jv - jx;
    let m = jx + jk;
    for i in 0..=(m as usize) {
        f[i] = if j < 0 {
            0.0
        } else {
            TWO_OVER_PI[j as usize] as f64
        };
        j += 1;
    }

    let jx_us = jx as usize;
    for i in 0..=(jk as usize) {
        let mut fw = 0.0;
        for jj in 0..=jx_us {
            fw += x[jj] * f[(jx + (i as i32) - (jj as i32)) as usize];
        }
        q[i] = fw;
    }

    let mut jz = jk;

    'recompute: loop {
        // distill q[] into 24-bit integer limbs iq[], last to first
        let mut z = q[jz as usize];
        let mut i = 0;
        let mut jj = jz;
        while jj > 0 {
            let fw = ((TWON24 * z) as i32) as f64;
            iq[i] = (z - TWO24 * fw) as i32;
            z = q[(jj - 1) as usize] + fw;
            i += 1;
            jj -= 1;
        }

        // quadrant and fractional part
        z = scalbn(z, q0);
        z -= 8.0 * floor_f64(z * 0.125);
        let mut n = z as i32;
        z -= n as f64;

        let mut ih = 0;
        if q0 > 0 {
            let head = iq[(jz - 1) as usize] >> (24 - q0);
            n += head;
            iq[(jz - 1) as usize] -= head << (24 - q0);
            ih = iq[(jz - 1) as usize] >> (23 - q0);
        } else if q0 == 0 {
            ih = iq[(jz - 1) as usize] >> 23;
        } else if z >= 0.5 {
            ih = 2;
        }

        // fraction >= 0.5: go to the next multiple and negate the remainder
        if ih > 0 {
            n += 1;
            let mut carry = 0;
            for limb in iq.iter_mut().take(jz as usize) {
                if carry == 0 {
                    if *limb != 0 {
                        carry = 1;
                        *limb = 0x100_0000 - *limb;
                    }
                } else {
                    *limb = 0x0ff_ffff - *limb;
                }
            }
            if q0 > 0 {
                match q0 {
                    1 => iq[(jz - 1) as usize] &= 0x7fffff,
                    2 => iq[(jz - 1) as usize] &= 0x3fffff,
                    _ => {}
                }
            }
            if ih == 2 {
                z = 1.0 - z;
                if carry != 0 {
                    z -= scalbn(1.0, q0);
                }
            }
        }

        // exact multiple of pi/2? then more limbs of 2/pi are needed
        if z == 0.0 {
            let mut tail = 0;
            for i in ((jk as usize)..=(jz as usize - 1)).rev() {
                tail |= iq[i];
            }
            if tail == 0 {
                let mut k = 1;
                while iq[(jk - k) as usize] == 0 {
                    k += 1;
                }
                for ii in (jz + 1)..=(jz + k) {
                    f[(jx + ii) as usize] = TWO_OVER_PI[(jv + ii) as usize] as f64;
                    let mut fw = 0.0;
                    for jj in 0..=jx_us {
                        fw += x[jj] * f[(jx + ii - (jj as i32)) as usize];
                    }
                    q[ii as usize] = fw;
                }
                jz += k;
                continue 'recompute;
            }
        }

        // chop off trailing zero limbs, or break z into a fresh limb
        if z == 0.0 {
            jz -= 1;
            q0 -= 24;
            while iq[jz as usize] == 0 {
                jz -= 1;
                q0 -= 24;
            }
        } else {
            z = scalbn(z, -q0);
            if z >= TWO24 {
                let fw = ((TWON24 * z) as i32) as f64;
                iq[jz as usize] = (z - TWO24 * fw) as i32;
                jz += 1;
                q0 += 24;
                iq[jz as usize] = fw as i32;
            } else {
                iq[jz as usize] = z as i32;
            }
        }

        // convert the integer limbs back to floating chunks
        let mut fw = scalbn(1.0, q0);
        for i in (0..=(jz as usize)).rev() {
            q[i] = fw * (iq[i] as f64);
            fw *= TWON24;
        }

        // multiply by pi/2 chunkwise
        for i in (0..=(jz as usize)).rev() {
            let mut acc = 0.0;
            let mut k = 0usize;
            while k <= (jp as usize) && k <= (jz as usize - i) {
                acc += PIO2_CHUNKS[k] * q[i + k];
                k += 1;
            }
            fq[jz as usize - i] = acc;
        }

        // compress fq[] into a high/low residual pair
        let mut hi = 0.0;
        for i in (0..=(jz as usize)).rev() {
            hi += fq[i];
        }
        y[0] = if ih == 0 { hi } else { -hi };
        let mut lo = fq[0] - hi;
        for i in 1..=(jz as usize) {
            lo += fq[i];
        }
        y[1] = if ih == 0 { lo } else { -lo };

        return n & 7;
    }
}

/// Reduces finite `x` with |x| > pi/4 to `(n, y_hi, y_lo)` with
/// `x ~ n*(pi/2) + y_hi + y_lo` and |y_hi| <= pi/4.
pub(super) fn rem_pio2(x: f64) -> (i32, f64, f64) {
    let hx = hi_word(x) as i32;
    let ix = (hx & 0x7fff_ffff) as u32;

    // |x| < 3pi/4: n is +-1, subtract one pi/2 directly
    if ix < 0x4002_d97cu32 {
        if hx > 0 {
            let z = x - PIO2_1;
            if ix != 0x3ff9_21fbu32 {
                let y0 = z - PIO2_1T;
                let y1 = (z - y0) - PIO2_1T;
                (1, y0, y1)
            } else {
                // x is close to pi/2 itself; use the second pi/2 piece
                let z2 = z - PIO2_2;
                let y0 = z2 - PIO2_2T;
                let y1 = (z2 - y0) - PIO2_2T;
                (1, y0, y1)
            }
        } else {
            let z = x + PIO2_1;
            if ix != 0x3ff9_21fbu32 {
                let y0 = z + PIO2_1T;
                let y1 = (z - y0) + PIO2_1T;
                (-1, y0, y1)
            } else {
                let z2 = z + PIO2_2;
                let y0 = z2 + PIO2_2T;
                let y1 = (z2 - y0) + PIO2_2T;
                (-1, y0, y1)
            }
        }
    } else if ix <= 0x4139_21fbu32 {
        // medium band, |x| <= 2^19*(pi/2): n from rounding x*2/pi
        // unfused on purpose: mul_add is not available in core, and n only
        // needs to be the nearest integer
        let t = if hx < 0 { -x } else { x };
        let n = (t * INVPIO2 + HALF) as i32;
        let fn_ = n as f64;

        let mut r = t - fn_ * PIO2_1;
        let mut w = fn_ * PIO2_1T;
        let mut y0 = r - w;

        if n >= 32 || ix == NPIO2_HW[(n - 1) as usize] {
            // x sits near a multiple of pi/2; the first subtraction
            // cancelled, so take more pieces of pi/2
            let j = (ix >> 20) as i32;
            let mut i = j - (((hi_word(y0) >> 20) & 0x7ff) as i32);
            if i > 16 {
                let t2 = r;
                w = fn_ * PIO2_2;
                r = t2 - w;
                w = fn_ * PIO2_2T - ((t2 - r) - w);
                y0 = r - w;
                i = j - (((hi_word(y0) >> 20) & 0x7ff) as i32);
                if i > 49 {
                    let t3 = r;
                    w = fn_ * PIO2_3;
                    r = t3 - w;
                    w = fn_ * PIO2_3T - ((t3 - r) - w);
                    y0 = r - w;
                }
            }
        }

        let y1 = (r - y0) - w;
        if hx < 0 {
            (-n, -y0, -y1)
        } else {
            (n, y0, y1)
        }
    } else {
        // large band: split |x| into three 24-bit limbs and run the core.
        // Caller has already filtered inf/NaN.
        let e0 = ((ix >> 20) as i32) - 1046; // ilogb(|x|) - 23
        let mut z = with_hi_lo(ix - ((e0 as u32) << 20), lo_word(x));

        let mut tx = [0.0f64; 3];
        for limb in tx.iter_mut().take(2) {
            *limb = (z as i32) as f64;
            z = (z - *limb) * TWO24;
        }
        tx[2] = z;

        let mut nx = 3;
        while nx > 1 && tx[nx - 1] == 0.0 {
            nx -= 1;
        }

        let mut yy = [0.0f64; 2];
        let n = rem_pio2_core(&tx[..nx], &mut yy, e0, 2);
        if hx < 0 {
            (-n, -yy[0], -yy[1])
        } else {
            (n, yy[0], yy[1])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn check_reduction(x: f64) {
        let (n, y0, y1) = rem_pio2(x);
        assert!(
            y0.abs() <= FRAC_PI_4 + 1e-10,
            "residual out of range for x={x}: n={n} y0={y0}"
        );
        assert!(y1.abs() <= y0.abs() * 1e-10 + 1e-25, "tail too big for x={x}");
    }

    #[test]
    fn residual_stays_within_quarter_pi() {
        let inputs = [
            0.8, -0.8, 1.0, 2.0, 3.0, 4.0, 6.0, 10.0, -10.0, 100.0, 1e4, 1e6, -1e6, 1e10, 1e16,
            1e300, -1e300,
        ];
        for &x in &inputs {
            check_reduction(x);
        }
        for k in 1..200 {
            check_reduction((k as f64) * FRAC_PI_2);
            check_reduction(-(k as f64) * FRAC_PI_2);
        }
    }

    #[test]
    fn medium_band_reconstructs_argument() {
        for &x in &[2.0, 3.0, 10.0, 50.0, 1000.0, 123456.0] {
            let (n, y0, y1) = rem_pio2(x);
            let rebuilt = (n as f64) * FRAC_PI_2 + y0 + y1;
            assert!(
                (rebuilt - x).abs() < 1e-9 * x.abs().max(1.0),
                "x={x} n={n} rebuilt={rebuilt}"
            );
        }
    }

    #[test]
    fn medium_band_picks_nearest_multiple() {
        // n comes from truncating x*(2/pi) + 0.5 with plain (unfused)
        // arithmetic; it has to land on the nearest multiple of pi/2
        let cases: [(f64, i32); 5] = [
            (2.4, 2),
            (100.0, 64),
            (-100.0, -64),
            (3216.0, 2047),
            (1e5, 63662),
        ];
        for &(x, expected_n) in &cases {
            let (n, y0, _) = rem_pio2(x);
            assert_eq!(n, expected_n, "quadrant count for x={x}");
            assert!(y0.abs() <= FRAC_PI_4 + 1e-10, "residual for x={x}");
        }
    }

    #[test]
    fn near_pi_over_two_uses_extra_pieces() {
        // pi/2 lands in the |x| < 3pi/4 band; its high word matches pi/2's
        // exactly, so the branch switches to the second split piece PIO2_2
        // and leaves a clean double-double residual.
        let (n, y0, y1) = rem_pio2(FRAC_PI_2);
        assert_eq!(n, 1);
        assert!(y0.abs() < 1e-16, "y0={y0}");
        assert!(y1.abs() < 1e-32, "y1={y1}");
    }

    #[test]
    fn sign_is_carried_through() {
        for &x in &[2.0, 10.0, 1e6, 1e300] {
            let (n_pos, y0_pos, _) = rem_pio2(x);
            let (n_neg, y0_neg, _) = rem_pio2(-x);
            assert_eq!(n_neg, -n_pos, "quadrant sign for x={x}");
            assert_eq!(y0_neg.to_bits(), (-y0_pos).to_bits(), "residual sign for x={x}");
        }
    }
}
