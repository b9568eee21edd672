//! # mpr-crosshair library
//!
//! Crosshair synchronization and coordinate transforms for orthogonal
//! multi-planar (MPR) medical image viewers.
//!
//! A CBCT or CT study is shown as three mutually orthogonal 2D views:
//!  - Axial
//!  - Coronal
//!  - Sagittal
//!
//! All three views share one crosshair, a single voxel position that every
//! view projects onto its own canvas. This crate owns the math and state
//! that keep those projections consistent while the user drags:
//!  - conversions between voxel, world (mm) and per-view canvas space,
//!    including aspect-preserving fit, zoom about the fitted image center
//!    and pan ([`transform`])
//!  - the shared viewer state with the single source-of-truth world point
//!    and derived slice indices ([`viewer`])
//!  - the per-surface drag state machine bound to pointer events
//!    ([`crosshair`])
//!  - a declarative crosshair overlay for an external 2D renderer
//!    ([`render`])
//!  - a worker thread that computes all three views' screen coordinates
//!    off the host thread, with stale-response discarding ([`worker`])
//!
//! Volumes are loaded from DICOM series via [`VolumeLoader`] and sliced in
//! the three medical axes; anisotropic coronal and sagittal slices are
//! resampled so their physical aspect ratio is preserved.
//!
//! # Examples
//!
//! ## Dragging the crosshair in the axial view
//!
//! ```
//! use mpr_crosshair::{
//!     CanvasSize, CrosshairActivity, Orientation, PointerInput, Spacing, SurfaceId,
//!     ViewerState, VolumeGeometry,
//! };
//!
//! let geometry = VolumeGeometry::new(512, 512, 200, Spacing { x: 0.3, y: 0.3, z: 0.5 });
//! let mut viewer = ViewerState::new(geometry);
//! viewer.set_canvas_size(
//!     Orientation::Axial,
//!     CanvasSize { width: 800.0, height: 600.0 },
//! );
//!
//! let mut activity = CrosshairActivity::new();
//! let surface = SurfaceId(0);
//! activity.mount(surface);
//!
//! // Grab the center marker and drag it 12px to the right: the coronal and
//! // sagittal slice indices follow the shared world position.
//! let center = viewer.crosshair(Orientation::Axial);
//! activity.on_pointer_down(
//!     surface,
//!     &PointerInput::primary(center.x, center.y),
//!     Orientation::Axial,
//!     &viewer,
//! );
//! activity.on_pointer_move(
//!     surface,
//!     &PointerInput::primary(center.x + 12.0, center.y),
//!     Orientation::Axial,
//!     &mut viewer,
//! );
//! activity.on_pointer_up(surface);
//! ```

pub mod crosshair;
pub mod enums;
pub mod geometry;
mod interpolator;
pub mod render;
pub mod transform;
pub mod viewer;
pub mod volume;
pub mod volume_loader;
pub mod worker;

pub use crosshair::{
    CENTER_THRESHOLD, CrosshairActivity, DragSession, LINE_THRESHOLD, PointerButton, PointerInput,
    SurfaceId,
};
pub use enums::{CrosshairElement, DragMode, Orientation, SliceStep, SortBy};
pub use geometry::{
    CanvasPoint, CanvasSize, DisplayBounds, PanOffset, Spacing, VolumeGeometry, VolumeSize,
    VoxelPoint, WorldPoint,
};
pub use render::{CrosshairLayer, Shape, ViewColors, view_colors};
pub use viewer::{PerView, ViewerState};
pub use volume::Volume;
pub use volume_loader::{VolumeLoader, VolumeLoaderError};
pub use worker::{
    CrosshairWorker, ScreenCoordRequest, ScreenCoordResponse, ScreenCoordSet, ViewScreenCoord,
    WorkerError, WorkerResponse,
};
