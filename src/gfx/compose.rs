//! Resolution-independent frame composition.
//!
//! Layers the simulation-resolution buffers into the externally supplied
//! destination: background, shadow blended on top, opaque sprites
//! overwriting both, and the HUD bar stamped across the top rows last.

use super::blend::blend;
use super::buffer::{Bounds, ImageBuffer};
use crate::arena::Arena;

/// Compose one full output frame into `dest`, overwriting every pixel.
///
/// `stage`, `shadow` and `foreground` share the simulation bounds and are
/// nearest-neighbor resampled with independent per-axis ratios. Sprites are
/// opaque overlays: a nonzero foreground pixel replaces the blended result
/// outright. The HUD bar is overlaid unconditionally afterwards, resampled
/// along x only.
pub fn compose(
    dest: &mut [u32],
    dest_bounds: Bounds,
    stage: &ImageBuffer,
    shadow: &ImageBuffer,
    foreground: &ImageBuffer,
    hud: &ImageBuffer,
    arena: &Arena,
) {
    debug_assert_eq!(stage.bounds, shadow.bounds);
    debug_assert_eq!(stage.bounds, foreground.bounds);
    debug_assert!(dest.len() >= dest_bounds.area());
    if dest_bounds.is_empty() || stage.bounds.is_empty() {
        return;
    }

    let dw = dest_bounds.width as usize;
    let dh = dest_bounds.height as usize;
    let sw = stage.bounds.width as usize;
    let sh = stage.bounds.height as usize;

    let ratio_x = sw as f32 / dw as f32;
    let ratio_y = sh as f32 / dh as f32;

    let stage_px = stage.pixels(arena);
    let shadow_px = shadow.pixels(arena);
    let fg_px = foreground.pixels(arena);

    let mut current_y = 0.0_f32;
    for y in 0..dh {
        let sy = (current_y as usize).min(sh - 1);
        let mut current_x = 0.0_f32;
        for x in 0..dw {
            let sx = (current_x as usize).min(sw - 1);
            let idx = sy * sw + sx;

            let mut result = stage_px[idx];
            result = blend(shadow_px[idx], result);
            let sprite = fg_px[idx];
            if sprite != 0 {
                result = sprite;
            }
            dest[y * dw + x] = result;
            current_x += ratio_x;
        }
        current_y += ratio_y;
    }

    overlay_hud(dest, dest_bounds, hud, arena);
}

/// Stamp the fixed-height HUD bar across the top of the output,
/// overwriting whatever was composed there. Horizontal resample only.
fn overlay_hud(dest: &mut [u32], dest_bounds: Bounds, hud: &ImageBuffer, arena: &Arena) {
    if hud.bounds.is_empty() {
        return;
    }

    let dw = dest_bounds.width as usize;
    let hw = hud.bounds.width as usize;
    let rows = (hud.bounds.height as usize).min(dest_bounds.height as usize);
    let ratio_x = hw as f32 / dw as f32;

    let hud_px = hud.pixels(arena);
    for y in 0..rows {
        let mut current_x = 0.0_f32;
        for x in 0..dw {
            let sx = (current_x as usize).min(hw - 1);
            dest[y * dw + x] = hud_px[y * hw + sx];
            current_x += ratio_x;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Layers {
        arena: Arena,
        stage: ImageBuffer,
        shadow: ImageBuffer,
        foreground: ImageBuffer,
    }

    fn layers(bounds: Bounds) -> Layers {
        let mut arena = Arena::new(1024 * 1024);
        let stage = ImageBuffer::create(bounds, &mut arena).unwrap();
        let shadow = ImageBuffer::create(bounds, &mut arena).unwrap();
        let foreground = ImageBuffer::create(bounds, &mut arena).unwrap();
        Layers { arena, stage, shadow, foreground }
    }

    #[test]
    fn test_background_passes_through_where_nothing_else_is() {
        let bounds = Bounds::new(8, 8);
        let mut l = layers(bounds);
        l.stage.pixels_mut(&mut l.arena).fill(0xff11_2233);

        let mut dest = vec![0_u32; bounds.area()];
        compose(
            &mut dest,
            bounds,
            &l.stage,
            &l.shadow,
            &l.foreground,
            &ImageBuffer::empty(),
            &l.arena,
        );
        // Shadow cells are all 0, the transparent sentinel: no darkening
        assert!(dest.iter().all(|&p| p == 0xff11_2233));
    }

    #[test]
    fn test_shadow_blends_and_sprite_overwrites() {
        let bounds = Bounds::new(4, 4);
        let mut l = layers(bounds);
        l.stage.pixels_mut(&mut l.arena).fill(0xff44_4444);
        l.shadow.pixels_mut(&mut l.arena)[5] = 0xff22_2222;
        l.foreground.pixels_mut(&mut l.arena)[6] = 0xffaa_bbcc;

        let mut dest = vec![0_u32; bounds.area()];
        compose(
            &mut dest,
            bounds,
            &l.stage,
            &l.shadow,
            &l.foreground,
            &ImageBuffer::empty(),
            &l.arena,
        );

        assert_eq!(dest[5], blend(0xff22_2222, 0xff44_4444));
        // Sprites are opaque overlays, never blended
        assert_eq!(dest[6], 0xffaa_bbcc);
        assert_eq!(dest[0], 0xff44_4444);
    }

    #[test]
    fn test_upscale_doubles_pixels() {
        let src_bounds = Bounds::new(2, 2);
        let mut l = layers(src_bounds);
        {
            let px = l.stage.pixels_mut(&mut l.arena);
            px.copy_from_slice(&[1, 2, 3, 4]);
        }

        let dest_bounds = Bounds::new(4, 4);
        let mut dest = vec![0_u32; dest_bounds.area()];
        compose(
            &mut dest,
            dest_bounds,
            &l.stage,
            &l.shadow,
            &l.foreground,
            &ImageBuffer::empty(),
            &l.arena,
        );

        #[rustfmt::skip]
        let expected = [
            1, 1, 2, 2,
            1, 1, 2, 2,
            3, 3, 4, 4,
            3, 3, 4, 4,
        ];
        assert_eq!(dest, expected);
    }

    #[test]
    fn test_hud_overwrites_top_rows() {
        let bounds = Bounds::new(4, 4);
        let mut l = layers(bounds);
        l.stage.pixels_mut(&mut l.arena).fill(0xff44_4444);
        // Sprite under the bar must not survive the overlay
        l.foreground.pixels_mut(&mut l.arena)[1] = 0xffaa_bbcc;

        let mut hud = ImageBuffer::create_owned(Bounds::new(4, 1));
        hud.pixels_mut(&mut l.arena).fill(0xff00_ff00);

        let mut dest = vec![0_u32; bounds.area()];
        compose(&mut dest, bounds, &l.stage, &l.shadow, &l.foreground, &hud, &l.arena);

        assert!(dest[..4].iter().all(|&p| p == 0xff00_ff00));
        assert!(dest[4..].iter().all(|&p| p == 0xff44_4444));
    }
}
