use std::sync::Arc;

use crate::assets::decode::SourceImage;
use crate::crop::aspect::AspectLock;
use crate::crop::capture::{CaptureGuard, NoCapture, PointerCapture};
use crate::crop::extract::{CroppedImage, extract_region};
use crate::crop::geometry::apply_drag;
use crate::crop::handle::Handle;
use crate::crop::region::CropRegion;
use crate::foundation::core::Point;
use crate::foundation::error::{StudioError, StudioResult};

/// Rendered size of the element the crop overlay is laid over, in display pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContainerSize {
    /// Width in display pixels.
    pub width: f64,
    /// Height in display pixels.
    pub height: f64,
}

impl ContainerSize {
    /// Create a validated container size.
    pub fn new(width: f64, height: f64) -> StudioResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(StudioError::validation(format!(
                "container size must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Width / height.
    pub fn aspect(self) -> f64 {
        self.width / self.height
    }

    /// Map a container-relative pixel position to percent.
    pub fn to_percent(self, pos: Point) -> Point {
        Point::new(pos.x / self.width * 100.0, pos.y / self.height * 100.0)
    }
}

/// Pointer input delivered to a [`CropSession`], positions in container pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PointerEvent {
    /// A press on `handle`.
    Down {
        /// Grabbed handle.
        handle: Handle,
        /// Pointer position.
        pos: Point,
    },
    /// Pointer motion anywhere in the document.
    Move {
        /// Pointer position.
        pos: Point,
    },
    /// Pointer released.
    Up,
    /// The platform aborted the gesture (e.g. touch cancel).
    Cancel,
}

/// Externally visible lifecycle phase of a [`CropSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CropPhase {
    /// Created, no source yet.
    Idle,
    /// Showing a region, no gesture in progress.
    Open,
    /// A drag is in progress.
    Dragging,
    /// Confirmed or cancelled; terminal.
    Closed,
}

#[derive(Debug)]
enum CropState {
    Idle,
    Open,
    Dragging {
        handle: Handle,
        anchor: Point,
        _capture: CaptureGuard,
    },
    Closed,
}

/// One interactive crop over one source image.
///
/// `Idle -> begin -> Open -> pointer down -> Dragging -> pointer up -> Open -> confirm|cancel ->
/// Closed`. Pointer events are applied in the order received and each move is measured from the
/// previous pointer sample.
pub struct CropSession {
    state: CropState,
    region: CropRegion,
    lock: AspectLock,
    container: ContainerSize,
    source: SourceImage,
    capture: Arc<dyn PointerCapture>,
}

impl CropSession {
    /// Create an idle session laid over `container`.
    pub fn new(container: ContainerSize) -> Self {
        Self {
            state: CropState::Idle,
            region: CropRegion::default(),
            lock: AspectLock::Free,
            container,
            source: SourceImage::pending(),
            capture: Arc::new(NoCapture),
        }
    }

    /// Use `capture` to route pointer events globally while dragging.
    pub fn with_capture(mut self, capture: Arc<dyn PointerCapture>) -> Self {
        self.capture = capture;
        self
    }

    /// Open the session over `source` with the default region.
    ///
    /// Calling `begin` on an open session restarts it, ending any drag.
    pub fn begin(&mut self, source: SourceImage) -> StudioResult<()> {
        if matches!(self.state, CropState::Closed) {
            return Err(StudioError::validation("crop session is closed"));
        }
        self.state = CropState::Open;
        self.region = CropRegion::default();
        tracing::debug!(
            natural_width = source.natural_width(),
            natural_height = source.natural_height(),
            "crop session opened"
        );
        self.source = source;
        Ok(())
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> CropPhase {
        match self.state {
            CropState::Idle => CropPhase::Idle,
            CropState::Open => CropPhase::Open,
            CropState::Dragging { .. } => CropPhase::Dragging,
            CropState::Closed => CropPhase::Closed,
        }
    }

    /// The current region in percent.
    pub fn region(&self) -> CropRegion {
        self.region
    }

    /// The lock applied to resizes.
    pub fn aspect_lock(&self) -> AspectLock {
        self.lock
    }

    /// Change the resize constraint. The current region is left as is.
    pub fn set_aspect_lock(&mut self, lock: AspectLock) {
        self.lock = lock;
    }

    /// The container the overlay is laid over.
    pub fn container(&self) -> ContainerSize {
        self.container
    }

    /// Update the container's rendered size, e.g. after a layout change.
    pub fn set_container(&mut self, container: ContainerSize) {
        self.container = container;
    }

    /// The source being cropped.
    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    /// Swap in the source once it has finished loading. The region is kept.
    pub fn replace_source(&mut self, source: SourceImage) {
        self.source = source;
    }

    /// Press on `handle` at `pos`.
    pub fn pointer_down(&mut self, handle: Handle, pos: Point) -> bool {
        self.handle_event(PointerEvent::Down { handle, pos })
    }

    /// Move the pointer to `pos`.
    pub fn pointer_move(&mut self, pos: Point) -> bool {
        self.handle_event(PointerEvent::Move { pos })
    }

    /// Release the pointer.
    pub fn pointer_up(&mut self) -> bool {
        self.handle_event(PointerEvent::Up)
    }

    /// Apply one pointer event. Returns `true` when the region or phase changed.
    pub fn handle_event(&mut self, event: PointerEvent) -> bool {
        let state = std::mem::replace(&mut self.state, CropState::Idle);
        let (next, changed) = self.transition(state, event);
        self.state = next;
        changed
    }

    fn transition(&mut self, state: CropState, event: PointerEvent) -> (CropState, bool) {
        match (state, event) {
            (CropState::Open, PointerEvent::Down { handle, pos }) => {
                tracing::debug!(?handle, "drag started");
                let dragging = CropState::Dragging {
                    handle,
                    anchor: self.container.to_percent(pos),
                    _capture: CaptureGuard::acquire(Arc::clone(&self.capture)),
                };
                (dragging, true)
            }
            (dragging @ CropState::Dragging { .. }, PointerEvent::Down { handle, .. }) => {
                tracing::debug!(?handle, "ignoring pointer down during an active drag");
                (dragging, false)
            }
            (
                CropState::Dragging {
                    handle,
                    anchor,
                    _capture,
                },
                PointerEvent::Move { pos },
            ) => {
                let current = self.container.to_percent(pos);
                let next = apply_drag(
                    self.region,
                    handle,
                    current - anchor,
                    self.lock,
                    self.container.aspect(),
                );
                let changed = next != self.region;
                self.region = next;
                let dragging = CropState::Dragging {
                    handle,
                    anchor: current,
                    _capture,
                };
                (dragging, changed)
            }
            (CropState::Dragging { handle, .. }, PointerEvent::Up | PointerEvent::Cancel) => {
                tracing::debug!(?handle, region = ?self.region, "drag ended");
                (CropState::Open, true)
            }
            (state, _) => (state, false),
        }
    }

    /// Extract the current region from the source at natural resolution.
    ///
    /// An in-progress drag is ended first. On success the session is closed; on failure it stays
    /// open so the caller can retry once the source has loaded.
    #[tracing::instrument(skip(self), fields(region = ?self.region))]
    pub fn confirm(&mut self) -> StudioResult<CroppedImage> {
        match self.state {
            CropState::Idle => return Err(StudioError::validation("crop session has not begun")),
            CropState::Closed => return Err(StudioError::validation("crop session is closed")),
            CropState::Open | CropState::Dragging { .. } => {}
        }
        if matches!(self.state, CropState::Dragging { .. }) {
            tracing::debug!("ending drag before confirm");
            self.state = CropState::Open;
        }

        match extract_region(&self.source, &self.region) {
            Ok(out) => {
                self.state = CropState::Closed;
                tracing::info!(rect = ?out.rect, "crop confirmed");
                Ok(out)
            }
            Err(err) => {
                tracing::warn!(%err, "crop extraction failed");
                Err(err)
            }
        }
    }

    /// Discard the session without producing a raster.
    pub fn cancel(&mut self) {
        if !matches!(self.state, CropState::Closed) {
            tracing::debug!("crop session cancelled");
        }
        self.state = CropState::Closed;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/crop/session.rs"]
mod tests;
