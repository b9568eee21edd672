//! Stateless conversions between world space and per-view canvas space.
//!
//! All three views share one transform pipeline: the plane projection of the
//! volume is letterboxed into the canvas preserving its aspect ratio, zoom
//! scales around the midpoint of that fitted rectangle (not the canvas
//! midpoint), and pan translates the result in canvas pixels. The inverse
//! direction undoes the steps in reverse order, so a canvas point converted
//! to world and back lands on the same pixel.

use crate::enums::Orientation;
use crate::geometry::{
    CanvasPoint, CanvasSize, DisplayBounds, PanOffset, VolumeGeometry, WorldPoint,
};

/// Per-view transform parameters, derived fresh from the volume geometry and
/// the current canvas size on every use. Never cached across resizes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewParams {
    /// Plane extent along screen X, in mm.
    pub image_width: f32,
    /// Plane extent along screen Y, in mm.
    pub image_height: f32,
    pub canvas: CanvasSize,
    /// Aspect-preserving, centered fit of the plane into the canvas,
    /// before zoom and pan are applied.
    pub display: DisplayBounds,
}

/// Compute the fit-to-canvas parameters for one view.
pub fn view_params(
    orientation: Orientation,
    geometry: &VolumeGeometry,
    canvas: CanvasSize,
) -> ViewParams {
    let (image_width, image_height) = geometry.plane_extent_mm(orientation);
    ViewParams {
        image_width,
        image_height,
        canvas,
        display: fit_to_canvas(image_width, image_height, canvas),
    }
}

/// Letterbox an image into a canvas, preserving aspect ratio and centering.
/// A wider-than-canvas image fills the width, a taller one fills the height.
pub fn fit_to_canvas(image_width: f32, image_height: f32, canvas: CanvasSize) -> DisplayBounds {
    let image_aspect = image_width / image_height;
    let canvas_aspect = canvas.width / canvas.height;

    if image_aspect > canvas_aspect {
        let height = canvas.width / image_aspect;
        DisplayBounds {
            left: 0.0,
            top: (canvas.height - height) / 2.0,
            width: canvas.width,
            height,
        }
    } else {
        let width = canvas.height * image_aspect;
        DisplayBounds {
            left: (canvas.width - width) / 2.0,
            top: 0.0,
            width,
            height: canvas.height,
        }
    }
}

/// Screen rectangle the image occupies once zoom and pan are applied.
pub fn display_bounds_zoomed(params: &ViewParams, zoom: f32, pan: PanOffset) -> DisplayBounds {
    DisplayBounds {
        left: params.display.left + pan.x,
        top: params.display.top + pan.y,
        width: params.display.width * zoom,
        height: params.display.height * zoom,
    }
}

fn plane_world(world: WorldPoint, orientation: Orientation) -> (f32, f32) {
    match orientation {
        Orientation::Axial => (world.x, world.y),
        Orientation::Coronal => (world.x, world.z),
        Orientation::Sagittal => (world.y, world.z),
    }
}

/// Project a world point onto a view's canvas.
pub fn world_to_canvas(
    world: WorldPoint,
    params: &ViewParams,
    zoom: f32,
    pan: PanOffset,
    orientation: Orientation,
) -> CanvasPoint {
    let (world_x, world_y) = plane_world(world, orientation);

    let display_x = world_x / params.image_width * params.display.width;
    let display_y = world_y / params.image_height * params.display.height;

    let center_x = params.display.width / 2.0;
    let center_y = params.display.height / 2.0;
    let zoomed_x = (display_x - center_x) * zoom + center_x;
    let zoomed_y = (display_y - center_y) * zoom + center_y;

    CanvasPoint {
        x: zoomed_x + params.display.left + pan.x,
        y: zoomed_y + params.display.top + pan.y,
    }
}

/// Recover the world point under a canvas position. The out-of-plane axis
/// is taken from the view's current slice index.
pub fn canvas_to_world(
    point: CanvasPoint,
    params: &ViewParams,
    zoom: f32,
    pan: PanOffset,
    orientation: Orientation,
    geometry: &VolumeGeometry,
    slice: u32,
) -> WorldPoint {
    let zoomed_x = point.x - params.display.left - pan.x;
    let zoomed_y = point.y - params.display.top - pan.y;

    let center_x = params.display.width / 2.0;
    let center_y = params.display.height / 2.0;
    let display_x = (zoomed_x - center_x) / zoom + center_x;
    let display_y = (zoomed_y - center_y) / zoom + center_y;

    let world_x = display_x / params.display.width * params.image_width;
    let world_y = display_y / params.display.height * params.image_height;

    let out_of_plane = geometry.slice_world_position(orientation, slice);
    match orientation {
        Orientation::Axial => WorldPoint {
            x: world_x,
            y: world_y,
            z: out_of_plane,
        },
        Orientation::Coronal => WorldPoint {
            x: world_x,
            y: out_of_plane,
            z: world_y,
        },
        Orientation::Sagittal => WorldPoint {
            x: out_of_plane,
            y: world_x,
            z: world_y,
        },
    }
}

/// Nearest slice index along a view's out-of-plane axis. May fall outside
/// the volume; callers clamp against `VolumeGeometry::slice_count`.
pub fn world_to_slice_index(
    world: WorldPoint,
    orientation: Orientation,
    geometry: &VolumeGeometry,
) -> i64 {
    let index = match orientation {
        Orientation::Axial => world.z / geometry.spacing.z,
        Orientation::Coronal => world.y / geometry.spacing.y,
        Orientation::Sagittal => world.x / geometry.spacing.x,
    };
    index.round() as i64
}

/// Clamp a world point into the volume. Out-of-range input is silently
/// clamped rather than rejected, so every drag produces a usable point.
pub fn validate_coordinates(world: WorldPoint, geometry: &VolumeGeometry) -> WorldPoint {
    let max = geometry.max_world();
    WorldPoint {
        x: world.x.clamp(0.0, max.x),
        y: world.y.clamp(0.0, max.y),
        z: world.z.clamp(0.0, max.z),
    }
}
