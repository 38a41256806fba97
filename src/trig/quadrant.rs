//! Quadrant composition shared by both precisions.

use core::ops::Neg;

/// Rotates a kernel result `(sin r, cos r)` into the final pair for an
/// argument `r + n*(pi/2)`. Negative `n` is fine: `& 3` on two's-complement
/// picks the same quadrant as `n mod 4`.
#[inline(always)]
pub(super) fn rotate<T: Neg<Output = T>>(n: i32, s: T, c: T) -> (T, T) {
    match n & 3 {
        0 => (s, c),
        1 => (c, -s),
        2 => (-s, -c),
        _ => (-c, s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_table_is_exact() {
        let (s, c) = (0.25f64, 0.75f64);
        assert_eq!(rotate(0, s, c), (0.25, 0.75));
        assert_eq!(rotate(1, s, c), (0.75, -0.25));
        assert_eq!(rotate(2, s, c), (-0.25, -0.75));
        assert_eq!(rotate(3, s, c), (-0.75, 0.25));
    }

    #[test]
    fn rotation_wraps_modulo_four() {
        let (s, c) = (0.25f64, 0.75f64);
        for n in [4, 5, 6, 7, 100, 101] {
            assert_eq!(rotate(n, s, c), rotate(n - 4, s, c), "n={n}");
        }
    }

    #[test]
    fn rotation_handles_negative_quadrants() {
        let (s, c) = (0.25f64, 0.75f64);
        assert_eq!(rotate(-1, s, c), rotate(3, s, c));
        assert_eq!(rotate(-2, s, c), rotate(2, s, c));
        assert_eq!(rotate(-3, s, c), rotate(1, s, c));
        assert_eq!(rotate(-4, s, c), rotate(0, s, c));
    }
}
