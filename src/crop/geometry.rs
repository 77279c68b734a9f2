use crate::crop::aspect::AspectLock;
use crate::crop::handle::Handle;
use crate::crop::region::{CropRegion, EPSILON, MIN_SIZE};
use crate::foundation::core::Vec2;

/// Apply one incremental pointer delta (in percent) to `region`.
///
/// Never fails: every result is clamped back into the region invariants. A delta that cannot be
/// honored (non-finite input, or a locked ratio with no room at the current position) leaves the
/// region unchanged.
pub fn apply_drag(
    region: CropRegion,
    handle: Handle,
    delta: Vec2,
    lock: AspectLock,
    container_aspect: f64,
) -> CropRegion {
    if !delta.x.is_finite() || !delta.y.is_finite() {
        return region;
    }
    match (handle, lock.ratio_factor(container_aspect)) {
        (Handle::Move, _) => translate(region, delta),
        (_, None) => resize_free(region, handle, delta),
        (_, Some(factor)) if factor.is_finite() && factor > 0.0 => {
            resize_locked(region, handle, delta.x, factor)
        }
        (_, Some(_)) => region,
    }
}

/// Translate the region, keeping it inside the container.
pub fn translate(region: CropRegion, delta: Vec2) -> CropRegion {
    CropRegion {
        x: bound(region.x + delta.x, 0.0, 100.0 - region.width),
        y: bound(region.y + delta.y, 0.0, 100.0 - region.height),
        ..region
    }
}

/// Resize each edge named by `handle` independently.
///
/// The edge opposite a dragged `n`/`w` edge stays where it was: the origin is recomputed from it
/// after the size has been clamped.
pub fn resize_free(region: CropRegion, handle: Handle, delta: Vec2) -> CropRegion {
    let mut out = region;

    if handle.west() {
        let right = region.right();
        out.width = bound(region.width - delta.x, MIN_SIZE, right);
        out.x = right - out.width;
    }
    if handle.east() {
        out.width = bound(region.width + delta.x, MIN_SIZE, 100.0 - region.x);
    }
    if handle.north() {
        let bottom = region.bottom();
        out.height = bound(region.height - delta.y, MIN_SIZE, bottom);
        out.y = bottom - out.height;
    }
    if handle.south() {
        out.height = bound(region.height + delta.y, MIN_SIZE, 100.0 - region.y);
    }

    out
}

/// Resize with `height = width * factor`, anchored at the corner opposite `handle`.
///
/// Width leads: only the horizontal delta is used. Growth is limited by the space between the
/// anchor and the container edges on both axes; the vertical limit is converted to a width limit
/// through `factor` so the ratio holds exactly at the boundary.
pub fn resize_locked(region: CropRegion, handle: Handle, dx: f64, factor: f64) -> CropRegion {
    let east = handle.east();
    let south = handle.south();
    let right = region.right();
    let bottom = region.bottom();

    let target_w = if east {
        region.width + dx
    } else {
        region.width - dx
    };
    let room_w = if east { 100.0 - region.x } else { right };
    let room_h = if south { 100.0 - region.y } else { bottom };

    let min_w = MIN_SIZE.max(MIN_SIZE / factor);
    let max_w = room_w.min(room_h / factor);
    if min_w > max_w + EPSILON {
        tracing::debug!(
            min_w,
            max_w,
            "no width satisfies the locked ratio here, region unchanged"
        );
        return region;
    }

    let width = bound(target_w, min_w, max_w);
    let height = (width * factor).min(room_h);
    let x = if east { region.x } else { right - width };
    let y = if south { region.y } else { bottom - height };

    CropRegion {
        x,
        y,
        width,
        height,
    }
}

// `hi` wins when the bounds cross, unlike `f64::clamp` which panics.
fn bound(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

#[cfg(test)]
#[path = "../../tests/unit/crop/geometry.rs"]
mod tests;
