//! Background computation of crosshair screen coordinates.
//!
//! The live-drag path converts coordinates synchronously; this worker covers
//! the bulk case (initial load, programmatic jump to a voxel, window resize)
//! where all three views are recomputed at once off the host thread.
//!
//! The message schema mirrors the viewer wire protocol: a request carries
//! `voxelCoords`, `volumeSize`, `spacing`, `canvasSize`, `zoom` and
//! `panOffset`; the response is either `{success: true, data}` or
//! `{success: false, error}`. Responses carry the id of the request that
//! produced them, and the host keeps only the latest one, so overlapping
//! requests (rapid resizes) cannot apply out of order.

use crate::enums::Orientation;
use crate::geometry::{CanvasSize, DisplayBounds, PanOffset, Spacing, VolumeGeometry, VolumeSize, VoxelPoint};
use crate::transform;

use crossbeam_channel::{Receiver, Sender, unbounded};
use serde::{Deserialize, Serialize};
use std::io;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkerError {
    #[error("Missing required parameters")]
    MissingParameters,
}

/// Request for the screen positions of one voxel in all three views.
///
/// Geometry fields are optional so that an incomplete message is reported
/// as a failed response instead of a deserialization error; `zoom` defaults
/// to 1 and `panOffset` to zero when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScreenCoordRequest {
    pub voxel_coords: Option<VoxelPoint>,
    pub volume_size: Option<VolumeSize>,
    pub spacing: Option<Spacing>,
    pub canvas_size: Option<CanvasSize>,
    pub zoom: f32,
    pub pan_offset: PanOffset,
}

impl Default for ScreenCoordRequest {
    fn default() -> Self {
        Self {
            voxel_coords: None,
            volume_size: None,
            spacing: None,
            canvas_size: None,
            zoom: 1.0,
            pan_offset: PanOffset::default(),
        }
    }
}

/// Crosshair position of one view in screen pixels, plus the slice index
/// and the rectangle the zoomed image occupies on that canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewScreenCoord {
    pub screen_x: f32,
    pub screen_y: f32,
    pub slice: u32,
    pub display_bounds: DisplayBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenCoordSet {
    pub axial: ViewScreenCoord,
    pub coronal: ViewScreenCoord,
    pub sagittal: ViewScreenCoord,
}

/// Wire-level response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenCoordResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ScreenCoordSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScreenCoordResponse {
    fn ok(data: ScreenCoordSet) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(error: &WorkerError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }

    pub fn into_result(self) -> Result<ScreenCoordSet, String> {
        if self.success {
            self.data.ok_or_else(|| "empty response".to_string())
        } else {
            Err(self.error.unwrap_or_else(|| "unknown error".to_string()))
        }
    }
}

/// Pure computation behind the worker. Holds no state between calls, so it
/// is safe to invoke repeatedly with changing canvas sizes.
pub fn compute_screen_coords(
    request: &ScreenCoordRequest,
) -> Result<ScreenCoordSet, WorkerError> {
    let voxel = request.voxel_coords.ok_or(WorkerError::MissingParameters)?;
    let size = request.volume_size.ok_or(WorkerError::MissingParameters)?;
    let spacing = request.spacing.ok_or(WorkerError::MissingParameters)?;
    let canvas = request.canvas_size.ok_or(WorkerError::MissingParameters)?;

    let geometry = VolumeGeometry::from_parts(size, spacing);
    let world = geometry.voxel_to_world(voxel);

    let project = |orientation: Orientation, slice: u32| -> ViewScreenCoord {
        let params = transform::view_params(orientation, &geometry, canvas);
        let point = transform::world_to_canvas(
            world,
            &params,
            request.zoom,
            request.pan_offset,
            orientation,
        );
        ViewScreenCoord {
            screen_x: point.x,
            screen_y: point.y,
            slice,
            display_bounds: transform::display_bounds_zoomed(
                &params,
                request.zoom,
                request.pan_offset,
            ),
        }
    };

    Ok(ScreenCoordSet {
        axial: project(Orientation::Axial, voxel.z),
        coronal: project(Orientation::Coronal, voxel.y),
        sagittal: project(Orientation::Sagittal, voxel.x),
    })
}

struct WorkerRequest {
    id: u64,
    payload: ScreenCoordRequest,
}

/// Response paired with the id of the request that produced it.
#[derive(Debug, Clone)]
pub struct WorkerResponse {
    pub id: u64,
    pub response: ScreenCoordResponse,
}

/// Handle to the dedicated worker thread. Dropping the handle closes the
/// request channel, which terminates the thread.
pub struct CrosshairWorker {
    requests: Option<Sender<WorkerRequest>>,
    responses: Receiver<WorkerResponse>,
    last_issued: u64,
    thread: Option<JoinHandle<()>>,
}

impl CrosshairWorker {
    pub fn spawn() -> io::Result<Self> {
        let (request_tx, request_rx) = unbounded::<WorkerRequest>();
        let (response_tx, response_rx) = unbounded::<WorkerResponse>();

        let thread = std::thread::Builder::new()
            .name("crosshair-worker".into())
            .spawn(move || worker_loop(request_rx, response_tx))?;

        Ok(Self {
            requests: Some(request_tx),
            responses: response_rx,
            last_issued: 0,
            thread: Some(thread),
        })
    }

    /// Queue a computation and return its request id. The id is monotonic;
    /// only the response matching the most recent id is ever surfaced.
    pub fn request(&mut self, payload: ScreenCoordRequest) -> u64 {
        self.last_issued += 1;
        let id = self.last_issued;
        if let Some(tx) = &self.requests
            && tx.send(WorkerRequest { id, payload }).is_err()
        {
            tracing::warn!(id, "crosshair worker thread is gone, request dropped");
        }
        id
    }

    /// Non-blocking poll: drains everything received so far and returns the
    /// response for the latest issued request, discarding stale ones.
    pub fn latest(&self) -> Option<WorkerResponse> {
        let mut latest = None;
        for response in self.responses.try_iter() {
            if response.id == self.last_issued {
                latest = Some(response);
            } else {
                tracing::debug!(id = response.id, "discarding stale worker response");
            }
        }
        latest
    }

    /// Block until the response for the latest issued request arrives,
    /// discarding stale responses along the way.
    pub fn wait_latest(&self, timeout: Duration) -> Option<WorkerResponse> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.checked_duration_since(Instant::now())?;
            match self.responses.recv_timeout(remaining) {
                Ok(response) if response.id == self.last_issued => return Some(response),
                Ok(response) => {
                    tracing::debug!(id = response.id, "discarding stale worker response");
                }
                Err(_) => return None,
            }
        }
    }
}

impl Drop for CrosshairWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        self.requests.take();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn worker_loop(requests: Receiver<WorkerRequest>, responses: Sender<WorkerResponse>) {
    for WorkerRequest { id, payload } in requests.iter() {
        tracing::debug!(id, "computing screen coordinates");
        let response = match compute_screen_coords(&payload) {
            Ok(data) => ScreenCoordResponse::ok(data),
            Err(error) => {
                tracing::warn!(id, %error, "rejecting screen coordinate request");
                ScreenCoordResponse::err(&error)
            }
        };
        if responses.send(WorkerResponse { id, response }).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> ScreenCoordRequest {
        ScreenCoordRequest {
            voxel_coords: Some(VoxelPoint { x: 256, y: 256, z: 100 }),
            volume_size: Some(VolumeSize {
                width: 512,
                height: 512,
                depth: 200,
            }),
            spacing: Some(Spacing {
                x: 0.3,
                y: 0.3,
                z: 0.5,
            }),
            canvas_size: Some(CanvasSize {
                width: 800.0,
                height: 600.0,
            }),
            zoom: 1.0,
            pan_offset: PanOffset::default(),
        }
    }

    #[test]
    fn center_voxel_projects_to_display_center() {
        let coords = compute_screen_coords(&full_request()).expect("valid request");

        // Axial plane is 153.6 x 153.6 mm, letterboxed into 800x600 as a
        // 600x600 square offset 100px from the left. The volume center
        // lands in the middle of that square.
        assert!((coords.axial.screen_x - 400.0).abs() < 1e-3);
        assert!((coords.axial.screen_y - 300.0).abs() < 1e-3);
        assert_eq!(coords.axial.slice, 100);
        assert_eq!(coords.coronal.slice, 256);
        assert_eq!(coords.sagittal.slice, 256);

        assert!((coords.axial.display_bounds.left - 100.0).abs() < 1e-3);
        assert!((coords.axial.display_bounds.top - 0.0).abs() < 1e-3);
        assert!((coords.axial.display_bounds.width - 600.0).abs() < 1e-3);
        assert!((coords.axial.display_bounds.height - 600.0).abs() < 1e-3);
    }

    #[test]
    fn missing_spacing_is_reported_not_thrown() {
        let request = ScreenCoordRequest {
            spacing: None,
            ..full_request()
        };

        let error = compute_screen_coords(&request).expect_err("spacing is required");
        assert_eq!(error, WorkerError::MissingParameters);
        assert_eq!(error.to_string(), "Missing required parameters");

        let response = ScreenCoordResponse::err(&error);
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Missing required parameters"));
    }

    #[test]
    fn request_deserializes_from_wire_format() {
        let request: ScreenCoordRequest = serde_json::from_str(
            r#"{
                "voxelCoords": {"x": 10, "y": 20, "z": 30},
                "volumeSize": {"width": 100, "height": 100, "depth": 50},
                "spacing": {"x": 0.5, "y": 0.5, "z": 0.7},
                "canvasSize": {"width": 500, "height": 200}
            }"#,
        )
        .expect("wire request parses");

        assert_eq!(request.zoom, 1.0);
        assert_eq!(request.pan_offset, PanOffset::default());
        assert!(compute_screen_coords(&request).is_ok());
    }

    #[test]
    fn malformed_wire_request_round_trips_as_failure() {
        let request: ScreenCoordRequest =
            serde_json::from_str(r#"{"voxelCoords": {"x": 1, "y": 2, "z": 3}}"#)
                .expect("partial request parses");
        let response = match compute_screen_coords(&request) {
            Ok(data) => ScreenCoordResponse::ok(data),
            Err(error) => ScreenCoordResponse::err(&error),
        };

        let json = serde_json::to_string(&response).expect("serializes");
        assert!(json.contains(r#""success":false"#));
        assert!(json.contains("Missing required parameters"));
    }

    #[test]
    fn worker_thread_answers_requests() {
        let mut worker = CrosshairWorker::spawn().expect("spawn worker");
        worker.request(full_request());

        let response = worker
            .wait_latest(Duration::from_secs(5))
            .expect("worker responds");
        assert_eq!(response.id, 1);
        let coords = response.response.into_result().expect("success");
        assert!((coords.axial.screen_x - 400.0).abs() < 1e-3);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut worker = CrosshairWorker::spawn().expect("spawn worker");
        worker.request(full_request());
        let mut resized = full_request();
        resized.canvas_size = Some(CanvasSize {
            width: 1200.0,
            height: 600.0,
        });
        let latest_id = worker.request(resized);

        let response = worker
            .wait_latest(Duration::from_secs(5))
            .expect("worker responds");
        assert_eq!(response.id, latest_id);
        // The 1200x600 canvas centers the square display at x = 600.
        let coords = response.response.into_result().expect("success");
        assert!((coords.axial.screen_x - 600.0).abs() < 1e-3);
        assert!(worker.latest().is_none());
    }
}
