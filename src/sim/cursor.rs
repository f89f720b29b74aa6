//! Surface cursor placement
//!
//! Casts the viewer's forward ray into the tracked planes and snaps the
//! cursor to the nearest hit. No hit is an ordinary outcome, not an error.

use crate::scene::Scene;
use crate::tracking::{AlignmentFilter, Ray, SurfaceHit, SurfaceTracker};

/// What the cursor step did this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorUpdate {
    /// Position lock held; cursor untouched
    Locked,
    /// Snapped to a surface
    Placed(SurfaceHit),
    /// No surface along the ray; cursor disabled in place
    Lost,
}

/// Update the scene cursor from the tracker unless `locked`
pub fn update_cursor<T>(scene: &mut Scene, tracker: &T, locked: bool) -> CursorUpdate
where
    T: SurfaceTracker + ?Sized,
{
    if locked {
        return CursorUpdate::Locked;
    }

    let ray = Ray::forward_from(&tracker.viewer_pose());
    let was_enabled = scene.cursor().is_enabled();

    match tracker.raycast(&ray, AlignmentFilter::Any) {
        Some(hit) => {
            let local = scene.anchor.localize(&hit.transform);
            scene.cursor_mut().place(local);
            if !was_enabled {
                log::debug!(
                    "Cursor found {:?} surface {} at {:.2}m",
                    hit.alignment,
                    hit.plane_id,
                    hit.distance
                );
            }
            CursorUpdate::Placed(hit)
        }
        None => {
            scene.cursor_mut().disable();
            if was_enabled {
                log::debug!("Cursor lost surface");
            }
            CursorUpdate::Lost
        }
    }
}
