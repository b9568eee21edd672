//! Shared viewer state for the three orthogonal views.
//!
//! One `WorldPoint` is the single source of truth for "where the crosshair
//! points". Per-view crosshair positions are projections of that point and
//! are computed on read, never stored, so the views cannot drift apart.

use crate::enums::{Orientation, SliceStep};
use crate::geometry::{CanvasPoint, CanvasSize, PanOffset, VolumeGeometry, VoxelPoint, WorldPoint};
use crate::transform::{self, ViewParams};

pub const ZOOM_MIN: f32 = 0.1;
pub const ZOOM_MAX: f32 = 10.0;
pub const ZOOM_STEP: f32 = 0.2;
pub const ZOOM_WHEEL_STEP: f32 = 0.1;

pub const DEFAULT_CANVAS_SIZE: CanvasSize = CanvasSize {
    width: 500.0,
    height: 200.0,
};

/// One value per orthogonal view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerView<T> {
    pub axial: T,
    pub coronal: T,
    pub sagittal: T,
}

impl<T> PerView<T> {
    pub fn get(&self, orientation: Orientation) -> &T {
        match orientation {
            Orientation::Axial => &self.axial,
            Orientation::Coronal => &self.coronal,
            Orientation::Sagittal => &self.sagittal,
        }
    }

    pub fn get_mut(&mut self, orientation: Orientation) -> &mut T {
        match orientation {
            Orientation::Axial => &mut self.axial,
            Orientation::Coronal => &mut self.coronal,
            Orientation::Sagittal => &mut self.sagittal,
        }
    }
}

impl<T: Clone> PerView<T> {
    pub fn splat(value: T) -> Self {
        Self {
            axial: value.clone(),
            coronal: value.clone(),
            sagittal: value,
        }
    }
}

/// Mutable state shared by the three views: the crosshair world position,
/// derived slice indices, and per-view zoom, pan and canvas size.
///
/// Writes are serialized by construction (one pointer, one drag at a time),
/// so no locking is required; `update_world_and_slices` is idempotent and
/// has no side effect beyond storing the new coordinate.
pub struct ViewerState {
    geometry: VolumeGeometry,
    world: WorldPoint,
    slices: PerView<u32>,
    canvas_sizes: PerView<CanvasSize>,
    zooms: PerView<f32>,
    pans: PerView<PanOffset>,
}

impl ViewerState {
    /// Create a viewer with the crosshair centered in the volume.
    pub fn new(geometry: VolumeGeometry) -> Self {
        let mut state = Self {
            geometry,
            world: WorldPoint {
                x: 0.0,
                y: 0.0,
                z: 0.0,
            },
            slices: PerView::splat(0),
            canvas_sizes: PerView::splat(DEFAULT_CANVAS_SIZE),
            zooms: PerView::splat(1.0),
            pans: PerView::splat(PanOffset::default()),
        };
        state.update_world_and_slices(geometry.center_world());
        state
    }

    pub fn geometry(&self) -> &VolumeGeometry {
        &self.geometry
    }

    pub fn world(&self) -> WorldPoint {
        self.world
    }

    /// Nearest voxel to the current world position.
    pub fn voxel(&self) -> VoxelPoint {
        self.geometry.world_to_voxel(self.world)
    }

    pub fn slice(&self, orientation: Orientation) -> u32 {
        *self.slices.get(orientation)
    }

    pub fn zoom(&self, orientation: Orientation) -> f32 {
        *self.zooms.get(orientation)
    }

    pub fn pan(&self, orientation: Orientation) -> PanOffset {
        *self.pans.get(orientation)
    }

    pub fn canvas_size(&self, orientation: Orientation) -> CanvasSize {
        *self.canvas_sizes.get(orientation)
    }

    pub fn set_canvas_size(&mut self, orientation: Orientation, size: CanvasSize) {
        *self.canvas_sizes.get_mut(orientation) = size;
    }

    /// Transform parameters for a view, derived from the latest canvas size.
    pub fn view_params(&self, orientation: Orientation) -> ViewParams {
        transform::view_params(orientation, &self.geometry, self.canvas_size(orientation))
    }

    /// Crosshair position of a view, projected from the shared world point.
    pub fn crosshair(&self, orientation: Orientation) -> CanvasPoint {
        let params = self.view_params(orientation);
        transform::world_to_canvas(
            self.world,
            &params,
            self.zoom(orientation),
            self.pan(orientation),
            orientation,
        )
    }

    /// Store a new world position and re-derive every view's slice index.
    /// Out-of-range input is clamped, never rejected.
    pub fn update_world_and_slices(&mut self, world: WorldPoint) {
        let validated = transform::validate_coordinates(world, &self.geometry);
        self.world = validated;

        for orientation in Orientation::ALL {
            let index = transform::world_to_slice_index(validated, orientation, &self.geometry);
            let max = i64::from(self.geometry.slice_count(orientation).saturating_sub(1));
            *self.slices.get_mut(orientation) = index.clamp(0, max) as u32;
        }

        tracing::debug!(
            x = validated.x,
            y = validated.y,
            z = validated.z,
            "world position updated"
        );
    }

    /// Jump the crosshair to a voxel.
    pub fn jump_to_voxel(&mut self, voxel: VoxelPoint) {
        self.update_world_and_slices(self.geometry.voxel_to_world(voxel));
    }

    /// Move the crosshair to a clicked canvas position in one view.
    pub fn move_to_canvas_point(&mut self, orientation: Orientation, point: CanvasPoint) {
        let params = self.view_params(orientation);
        let world = transform::canvas_to_world(
            point,
            &params,
            self.zoom(orientation),
            self.pan(orientation),
            orientation,
            &self.geometry,
            self.slice(orientation),
        );
        self.update_world_and_slices(world);
    }

    /// Shift one view's crosshair by a canvas-space delta and re-synchronize
    /// all three views from the resulting world point. Drives the live-drag
    /// path of the interaction controller.
    pub fn apply_crosshair_delta(&mut self, orientation: Orientation, delta: (f32, f32)) {
        let current = self.crosshair(orientation);
        let target = CanvasPoint {
            x: current.x + delta.0,
            y: current.y + delta.1,
        };
        self.move_to_canvas_point(orientation, target);
    }

    /// Step one view's slice forward or back and move the world point with it.
    pub fn step_slice(&mut self, orientation: Orientation, step: SliceStep) {
        let current = self.slice(orientation);
        let max = self.geometry.slice_count(orientation).saturating_sub(1);
        let next = match step {
            SliceStep::Next if current < max => current + 1,
            SliceStep::Prev if current > 0 => current - 1,
            _ => return,
        };

        let position = self.geometry.slice_world_position(orientation, next);
        let mut world = self.world;
        match orientation {
            Orientation::Axial => world.z = position,
            Orientation::Coronal => world.y = position,
            Orientation::Sagittal => world.x = position,
        }
        self.update_world_and_slices(world);
    }

    /// Change a view's zoom while keeping the world point under `point`
    /// stationary, compensating with pan.
    pub fn zoom_to_point(&mut self, orientation: Orientation, point: CanvasPoint, new_zoom: f32) {
        let new_zoom = new_zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        let current_zoom = self.zoom(orientation);
        if new_zoom == current_zoom {
            return;
        }

        let params = self.view_params(orientation);
        let pan = self.pan(orientation);
        let world_at_point = transform::canvas_to_world(
            point,
            &params,
            current_zoom,
            pan,
            orientation,
            &self.geometry,
            self.slice(orientation),
        );
        let expected =
            transform::world_to_canvas(world_at_point, &params, new_zoom, pan, orientation);

        *self.pans.get_mut(orientation) = PanOffset {
            x: pan.x + point.x - expected.x,
            y: pan.y + point.y - expected.y,
        };
        *self.zooms.get_mut(orientation) = new_zoom;
    }

    /// Wheel zoom toward the pointer position.
    pub fn wheel_zoom(&mut self, orientation: Orientation, point: CanvasPoint, zoom_in: bool) {
        let step = if zoom_in {
            ZOOM_WHEEL_STEP
        } else {
            -ZOOM_WHEEL_STEP
        };
        self.zoom_to_point(orientation, point, self.zoom(orientation) + step);
    }

    /// Button zoom, anchored on the crosshair so it stays put on screen.
    pub fn increment_zoom(&mut self, orientation: Orientation, zoom_in: bool) {
        let step = if zoom_in { ZOOM_STEP } else { -ZOOM_STEP };
        let anchor = self.crosshair(orientation);
        self.zoom_to_point(orientation, anchor, self.zoom(orientation) + step);
    }

    /// Restore a view to zoom 1 with no pan.
    pub fn reset_view(&mut self, orientation: Orientation) {
        *self.zooms.get_mut(orientation) = 1.0;
        *self.pans.get_mut(orientation) = PanOffset::default();
    }
}
