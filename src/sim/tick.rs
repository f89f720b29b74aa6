//! The per-frame update
//!
//! One call per tracking-service frame event: apply lock toggles, place the
//! cursor, then animate. Runs synchronously on the frame thread.

use serde::{Deserialize, Serialize};

use super::animation::{AnimationState, animate};
use super::cursor::{CursorUpdate, update_cursor};
use crate::scene::Scene;
use crate::settings::Settings;
use crate::tracking::SurfaceTracker;

/// UI signals consumed by a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Slider value, nominally in [0, 1]
    pub slider: f32,
    /// Lock toggle events received since the previous frame
    pub toggle_lock: u32,
}

/// Everything the frame loop owns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameState {
    pub scene: Scene,
    pub animation: AnimationState,
    /// Position lock: when set the cursor is frozen
    pub locked: bool,
    /// Clamp slider input to [0, 1] before use
    pub clamp_slider: bool,
    /// Frames processed so far
    pub frame: u64,
    /// Whether the last slider value seen was out of range (for warn-once)
    #[serde(skip)]
    slider_out_of_range: bool,
}

impl Default for FrameState {
    fn default() -> Self {
        Self::new(Scene::compose())
    }
}

impl FrameState {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            animation: AnimationState::default(),
            locked: false,
            clamp_slider: false,
            frame: 0,
            slider_out_of_range: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut state = Self::new(Scene::compose());
        state.locked = settings.start_locked;
        state.clamp_slider = settings.clamp_slider;
        state
    }

    /// Flip the position lock
    pub fn toggle_lock(&mut self) {
        self.locked = !self.locked;
        log::debug!(
            "Frame {}: position {}",
            self.frame,
            if self.locked { "locked" } else { "unlocked" }
        );
    }

    /// Slider value the animation will see
    fn effective_slider(&mut self, slider: f32) -> f32 {
        let in_range = (0.0..=1.0).contains(&slider);
        if !in_range && !self.slider_out_of_range {
            log::warn!(
                "Slider value {} outside [0, 1]{}",
                slider,
                if self.clamp_slider { ", clamping" } else { "" }
            );
        }
        self.slider_out_of_range = !in_range;

        if self.clamp_slider {
            slider.clamp(0.0, 1.0)
        } else {
            slider
        }
    }
}

/// Advance one frame: lock toggles, cursor placement, then animation
pub fn tick<T>(state: &mut FrameState, input: &TickInput, tracker: &T) -> CursorUpdate
where
    T: SurfaceTracker + ?Sized,
{
    for _ in 0..input.toggle_lock {
        state.toggle_lock();
    }

    let cursor = update_cursor(&mut state.scene, tracker, state.locked);

    let slider = state.effective_slider(input.slider);
    let (box_object, sphere) = state.scene.animated_mut();
    animate(&mut state.animation, box_object, sphere, slider);

    state.frame += 1;
    cursor
}
