//! UI → frame loop signals
//!
//! The overlay runs on its own thread. The slider is last-value-wins and the
//! lock toggle is counted so no press is dropped. Relaxed atomics suffice:
//! a frame seeing a slightly stale slider is fine.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::sim::TickInput;

/// Shared between the UI thread (writer) and the frame thread (reader)
#[derive(Debug, Default)]
pub struct UiBridge {
    /// f32 bits of the latest slider value
    slider_bits: AtomicU32,
    /// Toggle presses not yet consumed by a frame
    pending_toggles: AtomicU32,
}

impl UiBridge {
    pub fn new(initial_slider: f32) -> Self {
        Self {
            slider_bits: AtomicU32::new(initial_slider.to_bits()),
            pending_toggles: AtomicU32::new(0),
        }
    }

    /// Publish a new slider value (passed through unvalidated)
    pub fn set_slider(&self, value: f32) {
        self.slider_bits.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Latest slider value
    pub fn slider(&self) -> f32 {
        f32::from_bits(self.slider_bits.load(Ordering::Relaxed))
    }

    /// Record one press of the lock toggle
    pub fn toggle_lock(&self) {
        self.pending_toggles.fetch_add(1, Ordering::Relaxed);
    }

    /// Take everything the next frame should see
    pub fn drain(&self) -> TickInput {
        TickInput {
            slider: self.slider(),
            toggle_lock: self.pending_toggles.swap(0, Ordering::Relaxed),
        }
    }
}
