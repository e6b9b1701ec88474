//! Debug capture: run a fixed number of frames, save the last one and exit

use std::path::Path;

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy::render::view::screenshot::{Screenshot, ScreenshotCaptured, save_to_disk};

/// Frames the renderer needs before the picture is complete (pipelines compile lazily)
pub const RENDER_WARMUP_FRAMES: u32 = 10;

/// Frames to wait for the capture before exiting anyway
const CAPTURE_TIMEOUT_FRAMES: u32 = 10;

const OUTPUT_DIR: &str = "output";
const OUTPUT_PATH: &str = "output/exit_frame.png";

/// What the capture counter wants done this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStep {
    Wait,
    Capture,
    /// The capture never reported back
    GiveUp,
}

/// Frame budget of a `--debug` run
#[derive(Resource, Debug, Clone, Default)]
pub struct DebugMode {
    pub enabled: bool,
    /// Frames to run once the warm-up is over
    pub frames_after_warmup: u32,
    pub frame_count: u32,
    pub screenshot_triggered: bool,
}

impl DebugMode {
    pub fn new(frames: Option<u32>) -> Self {
        Self {
            enabled: frames.is_some(),
            frames_after_warmup: frames.unwrap_or_default(),
            ..default()
        }
    }

    /// Warm-up plus requested frames
    pub fn total_frames(&self) -> u32 {
        RENDER_WARMUP_FRAMES + self.frames_after_warmup
    }

    /// Advance one frame
    pub fn tick(&mut self) -> CaptureStep {
        self.frame_count += 1;
        let total = self.total_frames();
        if self.frame_count > total + CAPTURE_TIMEOUT_FRAMES {
            CaptureStep::GiveUp
        } else if self.frame_count >= total && !self.screenshot_triggered {
            self.screenshot_triggered = true;
            CaptureStep::Capture
        } else {
            CaptureStep::Wait
        }
    }
}

fn request_capture(commands: &mut Commands) {
    if let Err(err) = std::fs::create_dir_all(Path::new(OUTPUT_DIR)) {
        error!("Cannot create {}: {}", OUTPUT_DIR, err);
    }
    info!("Saving final frame to {}", OUTPUT_PATH);

    commands
        .spawn(Screenshot::primary_window())
        .observe(save_to_disk(OUTPUT_PATH))
        .observe(|_: On<ScreenshotCaptured>, mut exit: MessageWriter<AppExit>| {
            info!("Final frame captured");
            exit.write(AppExit::Success);
        });
}

fn count_debug_frames(
    mut commands: Commands,
    mut mode: ResMut<DebugMode>,
    mut exit: MessageWriter<AppExit>,
) {
    let step = mode.tick();
    debug!("Debug frame {}/{}", mode.frame_count, mode.total_frames());

    match step {
        CaptureStep::Wait => {}
        CaptureStep::Capture => request_capture(&mut commands),
        CaptureStep::GiveUp => {
            warn!("No frame captured after {} extra frames, exiting", CAPTURE_TIMEOUT_FRAMES);
            exit.write(AppExit::Success);
        }
    }
}

/// Installs [`DebugMode`] and, when enabled, the frame counter
pub struct DebugCapturePlugin {
    pub frames: Option<u32>,
}

impl Plugin for DebugCapturePlugin {
    fn build(&self, app: &mut App) {
        let mode = DebugMode::new(self.frames);
        if mode.enabled {
            info!(
                "Debug run: {} warm-up + {} frame(s), then capture to {}",
                RENDER_WARMUP_FRAMES, mode.frames_after_warmup, OUTPUT_PATH
            );
        }
        app.insert_resource(mode).add_systems(
            Update,
            count_debug_frames.run_if(|mode: Res<DebugMode>| mode.enabled),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_without_frames() {
        let mode = DebugMode::new(None);
        assert!(!mode.enabled);
        assert_eq!(mode.total_frames(), RENDER_WARMUP_FRAMES);
    }

    #[test]
    fn test_total_frames_adds_warmup() {
        let mode = DebugMode::new(Some(5));
        assert!(mode.enabled);
        assert_eq!(mode.total_frames(), 15);
    }

    #[test]
    fn test_capture_requested_once_on_last_frame() {
        let mut mode = DebugMode::new(Some(1));
        let captures: Vec<u32> = (1..=20)
            .filter(|_| mode.tick() == CaptureStep::Capture)
            .collect();
        assert_eq!(captures, vec![11]);
        assert!(mode.screenshot_triggered);
    }

    #[test]
    fn test_gives_up_after_capture_window() {
        let mut mode = DebugMode::new(Some(0));
        for _ in 0..20 {
            assert_ne!(mode.tick(), CaptureStep::GiveUp);
        }
        assert_eq!(mode.tick(), CaptureStep::GiveUp);
    }
}
