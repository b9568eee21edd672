//! Coordinate frames and volume geometry.
//!
//! Three frames are used throughout the crate:
//!  - voxel space: integer indices into the volume array
//!  - world space: millimeters, `voxel * spacing`, origin at voxel (0,0,0)
//!  - canvas space: per-view screen pixels after fit, zoom and pan

use crate::enums::Orientation;

use serde::{Deserialize, Serialize};

/// Physical size of one voxel in millimeters, per axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Voxel counts of a volume along X, Y and Z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeSize {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

/// Integer position inside the volume. Invariant: each axis is within
/// `[0, size)` for the volume it refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoxelPoint {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

/// Physical position in millimeters. Derived from a voxel position and
/// never stored independently of it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Screen-space position inside one view's canvas.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

/// Per-view pan offset in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PanOffset {
    pub x: f32,
    pub y: f32,
}

/// Rectangle the fitted image occupies inside a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayBounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Immutable geometry of a loaded study: voxel counts plus spacing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VolumeGeometry {
    /// Voxel count along X.
    pub width: u32,
    /// Voxel count along Y.
    pub height: u32,
    /// Voxel count along Z.
    pub depth: u32,
    pub spacing: Spacing,
}

impl VolumeGeometry {
    pub fn new(width: u32, height: u32, depth: u32, spacing: Spacing) -> Self {
        Self {
            width,
            height,
            depth,
            spacing,
        }
    }

    pub fn from_parts(size: VolumeSize, spacing: Spacing) -> Self {
        Self::new(size.width, size.height, size.depth, spacing)
    }

    /// Physical extents of the 2D projection shown by a view, in mm.
    /// Axial projects X×Y, coronal X×Z, sagittal Y×Z.
    pub fn plane_extent_mm(&self, orientation: Orientation) -> (f32, f32) {
        let x = self.width as f32 * self.spacing.x;
        let y = self.height as f32 * self.spacing.y;
        let z = self.depth as f32 * self.spacing.z;
        match orientation {
            Orientation::Axial => (x, y),
            Orientation::Coronal => (x, z),
            Orientation::Sagittal => (y, z),
        }
    }

    /// Number of slices along a view's out-of-plane axis.
    pub fn slice_count(&self, orientation: Orientation) -> u32 {
        match orientation {
            Orientation::Axial => self.depth,
            Orientation::Coronal => self.height,
            Orientation::Sagittal => self.width,
        }
    }

    /// World position of a slice along a view's out-of-plane axis.
    pub fn slice_world_position(&self, orientation: Orientation, slice: u32) -> f32 {
        match orientation {
            Orientation::Axial => slice as f32 * self.spacing.z,
            Orientation::Coronal => slice as f32 * self.spacing.y,
            Orientation::Sagittal => slice as f32 * self.spacing.x,
        }
    }

    pub fn voxel_to_world(&self, voxel: VoxelPoint) -> WorldPoint {
        WorldPoint {
            x: voxel.x as f32 * self.spacing.x,
            y: voxel.y as f32 * self.spacing.y,
            z: voxel.z as f32 * self.spacing.z,
        }
    }

    /// Nearest voxel for a world position, clamped into the volume.
    pub fn world_to_voxel(&self, world: WorldPoint) -> VoxelPoint {
        let clamp_axis = |value: f32, spacing: f32, count: u32| -> u32 {
            let index = (value / spacing).round();
            let max = count.saturating_sub(1) as f32;
            index.clamp(0.0, max) as u32
        };
        VoxelPoint {
            x: clamp_axis(world.x, self.spacing.x, self.width),
            y: clamp_axis(world.y, self.spacing.y, self.height),
            z: clamp_axis(world.z, self.spacing.z, self.depth),
        }
    }

    /// World center of the volume, used as the initial crosshair position.
    pub fn center_world(&self) -> WorldPoint {
        WorldPoint {
            x: self.width as f32 * self.spacing.x / 2.0,
            y: self.height as f32 * self.spacing.y / 2.0,
            z: self.depth as f32 * self.spacing.z / 2.0,
        }
    }

    /// Largest valid world coordinate per axis, `(n - 1) * spacing`.
    pub fn max_world(&self) -> WorldPoint {
        WorldPoint {
            x: (self.width.saturating_sub(1)) as f32 * self.spacing.x,
            y: (self.height.saturating_sub(1)) as f32 * self.spacing.y,
            z: (self.depth.saturating_sub(1)) as f32 * self.spacing.z,
        }
    }
}
