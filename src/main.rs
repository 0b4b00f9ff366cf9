//! Shadowplay headless demo driver.
//!
//! Stands in for the host environment: owns the destination pixel buffer,
//! measures frame time, scripts a direction code and runs the cooperative
//! update loop. Presentation is out of scope; the finished frames and the
//! FPS/MPF figures are the whole output.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context;

use shadowplay::control::ControlFlags;
use shadowplay::{FrameClock, FrameInput, Scene, Settings};

/// Frames the demo runs before stopping itself.
const DEMO_FRAMES: u32 = 600;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(settings_path.as_deref());

    let mut scene = Scene::new(&settings).context("allocating scene buffers from the arena")?;

    let flags = ControlFlags::new();
    let dest_bounds = settings.dest_bounds();
    let mut dest = vec![0_u32; dest_bounds.area()];
    let mut clock = FrameClock::new();

    log::info!(
        "running {} frames at {}x{}",
        DEMO_FRAMES,
        dest_bounds.width,
        dest_bounds.height
    );

    let mut frame = 0_u32;
    while flags.is_running() && frame < DEMO_FRAMES {
        // Scripted input: sweep through the four directions
        flags.set_direction_code(((frame / 120) % 4) as i32);

        let elapsed = clock.tick();
        let input = FrameInput {
            elapsed_millis: elapsed,
            fps: clock.fps(),
            direction: flags.direction(),
        };
        scene.advance(&input, &mut dest, dest_bounds);

        if frame % 60 == 0 {
            log::info!("FPS: {:.0}  MPF: {:.2}", clock.fps(), clock.millis_per_frame());
        }

        frame += 1;
        // Pacing only; also the only point where a stop request lands
        thread::sleep(Duration::from_millis(1));
    }

    log::info!("demo finished after {frame} frames");
    Ok(())
}
