//! Anchor Spin entry point
//!
//! Runs the frame loop headless against the simulated tracking service, with
//! a scripted UI thread driving the slider and the position lock.

use std::process::ExitCode;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anchor_spin::sim::{CursorUpdate, FrameState, tick};
use anchor_spin::tracking::SimulatedTracker;
use anchor_spin::{Settings, StartupError, UiBridge};

/// Demo instance holding all state owned by the frame thread
struct Demo {
    state: FrameState,
    tracker: SimulatedTracker,
    bridge: Arc<UiBridge>,
    // Run statistics
    placed_frames: u32,
    lost_frames: u32,
    locked_frames: u32,
}

impl Demo {
    fn new(settings: &Settings) -> Result<Self, StartupError> {
        let tracker = SimulatedTracker::start(settings.seed, settings.plane_count)?;
        Ok(Self {
            state: FrameState::from_settings(settings),
            tracker,
            bridge: Arc::new(UiBridge::new(settings.initial_slider)),
            placed_frames: 0,
            lost_frames: 0,
            locked_frames: 0,
        })
    }

    /// One tracking-service frame event
    fn frame(&mut self, frame: u32) {
        self.tracker.advance(frame);
        let input = self.bridge.drain();
        match tick(&mut self.state, &input, &self.tracker) {
            CursorUpdate::Placed(_) => self.placed_frames += 1,
            CursorUpdate::Lost => self.lost_frames += 1,
            CursorUpdate::Locked => self.locked_frames += 1,
        }
    }

    fn log_status(&self) {
        let cursor = self.state.scene.cursor();
        let sphere = &self.state.scene.sphere().transform;
        let (yaw, _, _) = self
            .state
            .scene
            .box_object()
            .transform
            .rotation
            .to_euler(glam::EulerRot::YXZ);
        log::info!(
            "frame {:>4} | cursor {} {:.2?}{} | sphere z={:+.3} scale={:.2} | box yaw={:+.2}",
            self.state.frame,
            if cursor.is_enabled() { "on " } else { "off" },
            cursor.transform().translation.to_array(),
            if self.state.locked { " [locked]" } else { "" },
            sphere.translation.z,
            sphere.scale.x,
            yaw,
        );
    }

    fn log_summary(&self) {
        log::info!(
            "Done after {} frames: placed {}, no surface {}, locked {}",
            self.state.frame,
            self.placed_frames,
            self.lost_frames,
            self.locked_frames
        );
    }
}

/// Scripted overlay: sweep the slider and press the lock button twice
fn spawn_ui(bridge: Arc<UiBridge>, settings: &Settings) -> thread::JoinHandle<()> {
    let frames = settings.frames;
    let interval = Duration::from_millis(settings.frame_interval_ms);
    thread::spawn(move || {
        let lock_at = frames / 3;
        let unlock_at = 2 * frames / 3;
        for step in 0..frames {
            // Triangle wave 0 → 1 → 0 over 240 steps
            let phase = (step % 240) as f32 / 120.0;
            bridge.set_slider(if phase <= 1.0 { phase } else { 2.0 - phase });

            if step == lock_at || step == unlock_at {
                log::info!("UI: lock button pressed");
                bridge.toggle_lock();
            }
            thread::sleep(interval);
        }
    })
}

fn run(settings: Settings) -> Result<(), StartupError> {
    let mut demo = Demo::new(&settings)?;
    let ui = spawn_ui(Arc::clone(&demo.bridge), &settings);
    let interval = Duration::from_millis(settings.frame_interval_ms);

    log::info!("Anchor Spin running for {} frames", settings.frames);
    for frame in 0..settings.frames {
        demo.frame(frame);
        if frame % settings.log_every == 0 {
            demo.log_status();
        }
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }

    if ui.join().is_err() {
        log::warn!("UI thread panicked");
    }
    demo.log_status();
    demo.log_summary();
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Anchor Spin starting...");

    let result = Settings::load().and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
