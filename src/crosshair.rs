//! Crosshair drag handling for one rendering surface per view.
//!
//! A drag is a small state machine: idle until a primary-button press lands
//! near the crosshair, then dragging the center, the vertical line or the
//! horizontal line until the pointer is released. Deltas are measured frame
//! to frame, not from the drag origin, and every move re-derives the world
//! position through the shared viewer state so all three views stay in sync.
//!
//! Sessions are keyed by an explicit surface id with mount/unmount lifecycle
//! hooks, so cleanup is deterministic instead of tied to garbage collection.

use crate::enums::{DragMode, Orientation};
use crate::geometry::CanvasPoint;
use crate::viewer::ViewerState;

use std::collections::HashMap;

/// Pointer-to-center distance below which a drag grabs the center marker.
pub const CENTER_THRESHOLD: f32 = 10.0;
/// Perpendicular distance below which a drag grabs a crosshair line.
pub const LINE_THRESHOLD: f32 = 7.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
}

/// Snapshot of a pointer event. `position` is `None` when the surface
/// cannot report a pointer position; handlers treat that as a no-op.
#[derive(Clone, Copy, Debug)]
pub struct PointerInput {
    pub button: PointerButton,
    pub position: Option<CanvasPoint>,
}

impl PointerInput {
    pub fn primary(x: f32, y: f32) -> Self {
        Self {
            button: PointerButton::Primary,
            position: Some(CanvasPoint { x, y }),
        }
    }
}

/// Transient drag bookkeeping for one surface. `drag == None` is the idle
/// state; the start position is kept across pointer-up so the next press
/// reuses the same slot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragSession {
    pub drag: Option<DragMode>,
    pub start_x: f32,
    pub start_y: f32,
}

/// Identity of one rendering surface (one per view instance).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Drag-handling controller. Owns every surface's `DragSession`; nothing
/// else reads them.
#[derive(Default)]
pub struct CrosshairActivity {
    sessions: HashMap<SurfaceId, DragSession>,
}

impl CrosshairActivity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface. Call when the view instance is created.
    pub fn mount(&mut self, surface: SurfaceId) {
        self.sessions.entry(surface).or_default();
    }

    /// Drop a surface's session entirely. Call when the view instance goes
    /// away.
    pub fn unmount(&mut self, surface: SurfaceId) {
        self.sessions.remove(&surface);
    }

    pub fn session(&self, surface: SurfaceId) -> Option<&DragSession> {
        self.sessions.get(&surface)
    }

    /// Hit-test a primary-button press against the view's crosshair and
    /// open a drag session on a hit. A miss deletes the session.
    pub fn on_pointer_down(
        &mut self,
        surface: SurfaceId,
        input: &PointerInput,
        orientation: Orientation,
        state: &ViewerState,
    ) {
        if input.button != PointerButton::Primary {
            return;
        }
        let Some(pointer) = input.position else {
            return;
        };

        let crosshair = state.crosshair(orientation);
        let dist_to_vertical = (pointer.x - crosshair.x).abs();
        let dist_to_horizontal = (pointer.y - crosshair.y).abs();
        let dist_to_center = (dist_to_vertical.powi(2) + dist_to_horizontal.powi(2)).sqrt();

        let mode = if dist_to_center < CENTER_THRESHOLD {
            Some(DragMode::Center)
        } else if dist_to_vertical < LINE_THRESHOLD {
            Some(DragMode::Vertical)
        } else if dist_to_horizontal < LINE_THRESHOLD {
            Some(DragMode::Horizontal)
        } else {
            None
        };

        match mode {
            Some(drag) => {
                self.sessions.insert(
                    surface,
                    DragSession {
                        drag: Some(drag),
                        start_x: pointer.x,
                        start_y: pointer.y,
                    },
                );
            }
            None => {
                self.sessions.remove(&surface);
            }
        }
    }

    /// Advance an active drag. The delta is restricted to the dragged axis,
    /// the recorded start position is re-anchored to the new pointer
    /// position, and the shared state re-synchronizes all views.
    pub fn on_pointer_move(
        &mut self,
        surface: SurfaceId,
        input: &PointerInput,
        orientation: Orientation,
        state: &mut ViewerState,
    ) {
        let Some(session) = self.sessions.get_mut(&surface) else {
            return;
        };
        let Some(mode) = session.drag else {
            return;
        };
        let Some(pointer) = input.position else {
            return;
        };

        let delta = match mode {
            DragMode::Center => {
                let delta = (pointer.x - session.start_x, pointer.y - session.start_y);
                session.start_x = pointer.x;
                session.start_y = pointer.y;
                delta
            }
            DragMode::Vertical => {
                let delta = (pointer.x - session.start_x, 0.0);
                session.start_x = pointer.x;
                delta
            }
            DragMode::Horizontal => {
                let delta = (0.0, pointer.y - session.start_y);
                session.start_y = pointer.y;
                delta
            }
        };

        state.apply_crosshair_delta(orientation, delta);
    }

    /// End a drag, keeping the session's bookkeeping for the next press.
    pub fn on_pointer_up(&mut self, surface: SurfaceId) {
        if let Some(session) = self.sessions.get_mut(&surface) {
            session.drag = None;
        }
    }

    /// End every in-flight drag. Hook this to a window-level pointer-up so
    /// a release outside the canvas still terminates the gesture.
    pub fn cancel_all(&mut self) {
        for session in self.sessions.values_mut() {
            session.drag = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{CanvasSize, Spacing, VolumeGeometry};
    use crate::viewer::ViewerState;

    const SURFACE: SurfaceId = SurfaceId(1);

    /// Viewer whose axial crosshair sits exactly at canvas (50, 50): a
    /// 100-voxel cube with unit spacing on a square 100x100 canvas.
    fn state_with_centered_crosshair() -> ViewerState {
        let geometry = VolumeGeometry::new(
            100,
            100,
            100,
            Spacing {
                x: 1.0,
                y: 1.0,
                z: 1.0,
            },
        );
        let mut state = ViewerState::new(geometry);
        state.set_canvas_size(
            Orientation::Axial,
            CanvasSize {
                width: 100.0,
                height: 100.0,
            },
        );
        state
    }

    #[test]
    fn press_near_center_starts_center_drag() {
        let state = state_with_centered_crosshair();
        let mut activity = CrosshairActivity::new();

        // Distance 5 from (50, 50), inside the 10px center threshold.
        activity.on_pointer_down(
            SURFACE,
            &PointerInput::primary(55.0, 50.0),
            Orientation::Axial,
            &state,
        );
        let session = activity.session(SURFACE).expect("session created");
        assert_eq!(session.drag, Some(DragMode::Center));
        assert_eq!(session.start_x, 55.0);
        assert_eq!(session.start_y, 50.0);
    }

    #[test]
    fn press_near_vertical_line_starts_vertical_drag() {
        let state = state_with_centered_crosshair();
        let mut activity = CrosshairActivity::new();

        // (52, 100): ~50.04 from the center, but 2px from the vertical line.
        activity.on_pointer_down(
            SURFACE,
            &PointerInput::primary(52.0, 100.0),
            Orientation::Axial,
            &state,
        );
        assert_eq!(
            activity.session(SURFACE).and_then(|s| s.drag),
            Some(DragMode::Vertical)
        );
    }

    #[test]
    fn press_near_horizontal_line_starts_horizontal_drag() {
        let state = state_with_centered_crosshair();
        let mut activity = CrosshairActivity::new();

        activity.on_pointer_down(
            SURFACE,
            &PointerInput::primary(5.0, 53.0),
            Orientation::Axial,
            &state,
        );
        assert_eq!(
            activity.session(SURFACE).and_then(|s| s.drag),
            Some(DragMode::Horizontal)
        );
    }

    #[test]
    fn press_far_from_crosshair_deletes_session() {
        let state = state_with_centered_crosshair();
        let mut activity = CrosshairActivity::new();
        activity.mount(SURFACE);

        activity.on_pointer_down(
            SURFACE,
            &PointerInput::primary(10.0, 90.0),
            Orientation::Axial,
            &state,
        );
        assert!(activity.session(SURFACE).is_none());
    }

    #[test]
    fn secondary_button_is_ignored() {
        let state = state_with_centered_crosshair();
        let mut activity = CrosshairActivity::new();

        activity.on_pointer_down(
            SURFACE,
            &PointerInput {
                button: PointerButton::Secondary,
                position: Some(CanvasPoint { x: 50.0, y: 50.0 }),
            },
            Orientation::Axial,
            &state,
        );
        assert!(activity.session(SURFACE).is_none());
    }

    #[test]
    fn missing_pointer_position_is_a_no_op() {
        let mut state = state_with_centered_crosshair();
        let mut activity = CrosshairActivity::new();

        activity.on_pointer_down(
            SURFACE,
            &PointerInput {
                button: PointerButton::Primary,
                position: None,
            },
            Orientation::Axial,
            &state,
        );
        assert!(activity.session(SURFACE).is_none());

        // Same for move without a position mid-drag.
        activity.on_pointer_down(
            SURFACE,
            &PointerInput::primary(50.0, 50.0),
            Orientation::Axial,
            &state,
        );
        let world_before = state.world();
        activity.on_pointer_move(
            SURFACE,
            &PointerInput {
                button: PointerButton::Primary,
                position: None,
            },
            Orientation::Axial,
            &mut state,
        );
        assert_eq!(state.world(), world_before);
    }

    #[test]
    fn vertical_drag_ignores_y_motion() {
        let mut state = state_with_centered_crosshair();
        let mut activity = CrosshairActivity::new();

        activity.on_pointer_down(
            SURFACE,
            &PointerInput::primary(52.0, 100.0),
            Orientation::Axial,
            &state,
        );
        let y_before = state.crosshair(Orientation::Axial).y;

        // Wild Y motion; only X may move the crosshair.
        for (x, y) in [(60.0, 10.0), (65.0, 95.0), (70.0, 40.0)] {
            activity.on_pointer_move(
                SURFACE,
                &PointerInput::primary(x, y),
                Orientation::Axial,
                &mut state,
            );
            assert!((state.crosshair(Orientation::Axial).y - y_before).abs() < 1e-3);
        }
        assert!(state.crosshair(Orientation::Axial).x > 52.0);
    }

    #[test]
    fn center_drag_uses_frame_to_frame_deltas() {
        let mut state = state_with_centered_crosshair();
        let mut activity = CrosshairActivity::new();

        activity.on_pointer_down(
            SURFACE,
            &PointerInput::primary(50.0, 50.0),
            Orientation::Axial,
            &state,
        );
        activity.on_pointer_move(
            SURFACE,
            &PointerInput::primary(60.0, 55.0),
            Orientation::Axial,
            &mut state,
        );

        // The start position re-anchors on every move.
        let session = activity.session(SURFACE).expect("session");
        assert_eq!(session.start_x, 60.0);
        assert_eq!(session.start_y, 55.0);

        let crosshair = state.crosshair(Orientation::Axial);
        assert!((crosshair.x - 60.0).abs() < 0.51);
        assert!((crosshair.y - 55.0).abs() < 0.51);
    }

    #[test]
    fn pointer_up_ends_drag_but_keeps_session() {
        let mut state = state_with_centered_crosshair();
        let mut activity = CrosshairActivity::new();

        activity.on_pointer_down(
            SURFACE,
            &PointerInput::primary(50.0, 50.0),
            Orientation::Axial,
            &state,
        );
        activity.on_pointer_up(SURFACE);

        let session = activity.session(SURFACE).expect("session retained");
        assert_eq!(session.drag, None);
        assert_eq!(session.start_x, 50.0);

        // Moves after release are no-ops.
        let world_before = state.world();
        activity.on_pointer_move(
            SURFACE,
            &PointerInput::primary(80.0, 80.0),
            Orientation::Axial,
            &mut state,
        );
        assert_eq!(state.world(), world_before);
    }

    #[test]
    fn cancel_all_terminates_every_drag() {
        let state = state_with_centered_crosshair();
        let mut activity = CrosshairActivity::new();
        let other = SurfaceId(2);

        activity.on_pointer_down(
            SURFACE,
            &PointerInput::primary(50.0, 50.0),
            Orientation::Axial,
            &state,
        );
        activity.on_pointer_down(
            other,
            &PointerInput::primary(50.0, 50.0),
            Orientation::Axial,
            &state,
        );

        activity.cancel_all();
        assert_eq!(activity.session(SURFACE).and_then(|s| s.drag), None);
        assert_eq!(activity.session(other).and_then(|s| s.drag), None);
    }

    #[test]
    fn unmount_removes_session() {
        let state = state_with_centered_crosshair();
        let mut activity = CrosshairActivity::new();

        activity.on_pointer_down(
            SURFACE,
            &PointerInput::primary(50.0, 50.0),
            Orientation::Axial,
            &state,
        );
        activity.unmount(SURFACE);
        assert!(activity.session(SURFACE).is_none());
    }
}
