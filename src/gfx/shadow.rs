//! Point-light shadow projection.
//!
//! Every opaque foreground pixel is projected through the light onto the
//! shadow plane with similar triangles, then the discrete result is blurred
//! to hide the aliasing the integer projection leaves behind.

use glam::Vec3;

use super::blend::blur;
use super::buffer::ImageBuffer;
use crate::arena::Arena;
use crate::consts::{FOREGROUND_DEPTH, SHADOW_COLOR};

/// Scan pass only: project opaque foreground pixels into `shadow`.
/// Last write wins when two pixels land on the same cell.
pub fn project_shadows(
    shadow: &mut ImageBuffer,
    foreground: &ImageBuffer,
    light: Vec3,
    arena: &mut Arena,
) {
    debug_assert_eq!(shadow.bounds, foreground.bounds);
    let bounds = foreground.bounds;
    let w = bounds.width as usize;
    let h = bounds.height as usize;

    // The sprite plane sits FOREGROUND_DEPTH units above the shadow plane.
    let delta_z = light.z - FOREGROUND_DEPTH;

    let (shadow_px, fg_px) = shadow.pixels_pair_mut(foreground, arena);
    for y in 0..h {
        for x in 0..w {
            if fg_px[y * w + x] == 0 {
                continue;
            }
            let step_x = (x as f32 - light.x) / delta_z;
            let step_y = (y as f32 - light.y) / delta_z;
            let end_x = light.x + step_x * (delta_z + FOREGROUND_DEPTH);
            let end_y = light.y + step_y * (delta_z + FOREGROUND_DEPTH);

            let xi = end_x as i32;
            let yi = end_y as i32;
            if xi >= 0 && (xi as usize) < w && yi >= 0 && (yi as usize) < h {
                shadow_px[yi as usize * w + xi as usize] = SHADOW_COLOR;
            }
        }
    }
}

/// Full shadow pass: projection scan followed by the 4-tap blur in both
/// directions. The caller clears `shadow` before each tick.
pub fn cast_shadows(
    shadow: &mut ImageBuffer,
    foreground: &ImageBuffer,
    light: Vec3,
    arena: &mut Arena,
) {
    project_shadows(shadow, foreground, light, arena);
    let bounds = shadow.bounds;
    blur(shadow.pixels_mut(arena), bounds);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::buffer::Bounds;

    fn scene_buffers(arena: &mut Arena) -> (ImageBuffer, ImageBuffer) {
        let bounds = Bounds::new(320, 240);
        let fg = ImageBuffer::create(bounds, arena).unwrap();
        let sg = ImageBuffer::create(bounds, arena).unwrap();
        (fg, sg)
    }

    #[test]
    fn test_single_pixel_projects_where_the_triangles_say() {
        let mut arena = Arena::new(2 * 1024 * 1024);
        let (mut fg, mut sg) = scene_buffers(&mut arena);
        let light = Vec3::new(160.0, 120.0, 240.0);

        fg.pixels_mut(&mut arena)[100 * 320 + 200] = 0xffff_ffff;
        project_shadows(&mut sg, &fg, light, &mut arena);

        // dz = 200; step = (200-160)/200 = 0.2, (100-120)/200 = -0.1
        // end = 160 + 0.2*240 = 208, 120 - 0.1*240 = 96
        let px = sg.pixels(&arena);
        for (i, &cell) in px.iter().enumerate() {
            if i == 96 * 320 + 208 {
                assert_eq!(cell, SHADOW_COLOR);
            } else {
                assert_eq!(cell, 0, "stray shadow at index {i}");
            }
        }
    }

    #[test]
    fn test_projection_off_the_buffer_is_dropped() {
        let mut arena = Arena::new(2 * 1024 * 1024);
        let (mut fg, mut sg) = scene_buffers(&mut arena);
        // Light close to the corner pushes the projection past the edge
        let light = Vec3::new(0.0, 0.0, 240.0);

        fg.pixels_mut(&mut arena)[239 * 320 + 319] = 0xffff_ffff;
        project_shadows(&mut sg, &fg, light, &mut arena);
        assert!(sg.pixels(&arena).iter().all(|&c| c == 0));
    }

    #[test]
    fn test_cast_blurs_the_projection() {
        let mut arena = Arena::new(2 * 1024 * 1024);
        let (mut fg, mut sg) = scene_buffers(&mut arena);
        let light = Vec3::new(160.0, 120.0, 240.0);

        fg.pixels_mut(&mut arena)[100 * 320 + 200] = 0xffff_ffff;
        cast_shadows(&mut sg, &fg, light, &mut arena);

        // Blur smeared the single projected pixel across its neighbors
        let px = sg.pixels(&arena);
        let hits = px.iter().filter(|&&c| c != 0).count();
        assert!(hits > 1);
    }
}
