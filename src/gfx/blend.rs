//! Per-pixel compositing.
//!
//! [`blend`] is the single primitive behind both layer mixing and the blur
//! that softens the shadow map.

use super::buffer::Bounds;

/// Halving-and-sum blend of two packed ARGB colors.
///
/// `0` is the transparent sentinel: blending it with anything returns the
/// other operand untouched. Otherwise each channel is `(a >> 1) + (b >> 1)`,
/// dropping the low bit of precision.
#[inline]
pub fn blend(a: u32, b: u32) -> u32 {
    if a == 0 {
        return b;
    }

    let aa = (a >> 24) as u8;
    let ar = (a >> 16) as u8;
    let ag = (a >> 8) as u8;
    let ab = a as u8;

    let ba = (b >> 24) as u8;
    let br = (b >> 16) as u8;
    let bg = (b >> 8) as u8;
    let bb = b as u8;

    // Each operand is halved first, so the sums cannot overflow u8.
    let fa = (aa >> 1) + (ba >> 1);
    let fr = (ar >> 1) + (br >> 1);
    let fg = (ag >> 1) + (bg >> 1);
    let fb = (ab >> 1) + (bb >> 1);

    (fa as u32) << 24 | (fr as u32) << 16 | (fg as u32) << 8 | fb as u32
}

/// 4-tap box blur: one horizontal pass across each row, then one vertical
/// pass down each column, both built from repeated [`blend`]. In-place,
/// front-to-back, so earlier taps feed later ones the way the scan order
/// dictates.
pub fn blur(pixels: &mut [u32], bounds: Bounds) {
    let w = bounds.width as usize;
    let h = bounds.height as usize;

    for y in 0..h {
        let row = y * w;
        for x in 0..w.saturating_sub(4) {
            pixels[row + x] = blend(
                blend(pixels[row + x], pixels[row + x + 1]),
                blend(pixels[row + x + 2], pixels[row + x + 3]),
            );
        }
    }

    for x in 0..w {
        for y in 0..h.saturating_sub(4) {
            pixels[y * w + x] = blend(
                blend(pixels[y * w + x], pixels[(y + 1) * w + x]),
                blend(pixels[(y + 2) * w + x], pixels[(y + 3) * w + x]),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use crate::gfx::buffer::ImageBuffer;
    use proptest::prelude::*;

    #[test]
    fn test_transparent_sentinel_passthrough() {
        for b in [0u32, 1, 0xff00_00ff, 0xffff_ffff, 0x8040_2010] {
            assert_eq!(blend(0, b), b);
        }
    }

    #[test]
    fn test_self_blend_even_channels_exact() {
        // All channels divisible by 2: halving loses nothing
        let c = 0x8844_2210;
        assert_eq!(blend(c, c), c);
    }

    #[test]
    fn test_self_blend_odd_channels_round_down() {
        // 0xff >> 1 + 0xff >> 1 = 0xfe: within one unit per channel
        assert_eq!(blend(0xffff_ffff, 0xffff_ffff), 0xfefe_fefe);
    }

    #[test]
    fn test_blur_spreads_a_point() {
        let mut arena = Arena::new(64 * 1024);
        let mut buf = ImageBuffer::create(Bounds::new(16, 16), &mut arena).unwrap();
        let px = buf.pixels_mut(&mut arena);
        px[8 * 16 + 8] = 0xffff_ffff;
        blur(px, Bounds::new(16, 16));
        // The point bled into its row neighborhood
        assert_ne!(px[8 * 16 + 7], 0);
        // Far corner untouched
        assert_eq!(px[0], 0);
    }

    proptest! {
        #[test]
        fn prop_blend_commutative(a in any::<u32>(), b in any::<u32>()) {
            // Nonzero operands: halving-and-sum is symmetric
            prop_assume!(a != 0 && b != 0);
            prop_assert_eq!(blend(a, b), blend(b, a));
        }

        #[test]
        fn prop_blend_channels_within_one_of_average(a in any::<u32>(), b in any::<u32>()) {
            prop_assume!(a != 0);
            let out = blend(a, b);
            for shift in [0u32, 8, 16, 24] {
                let ca = (a >> shift) as u8 as i32;
                let cb = (b >> shift) as u8 as i32;
                let co = (out >> shift) as u8 as i32;
                let avg = (ca + cb) / 2;
                prop_assert!((co - avg).abs() <= 1);
            }
        }
    }
}
