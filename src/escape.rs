//! The escape-time kernel.

use num::Complex;

/// Count how many times `z = z * z + c` can be applied, starting from
/// zero, before the magnitude of `z` passes 2.  The magnitude is
/// checked *before* each step, so the count is the number of completed
/// steps prior to the one that would be taken from an escaped `z`.
/// Points that never escape within `max_iter` steps report `max_iter`.
///
/// `|z| > 2` is tested as `|z|^2 > 4` to avoid the square root.
#[inline]
pub fn escape_count(c: Complex<f64>, max_iter: u32) -> u32 {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    for n in 0..max_iter {
        if z.norm_sqr() > 4.0 {
            return n;
        }
        z = z * z + c;
    }
    max_iter
}
