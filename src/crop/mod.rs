//! Region Selector: interactive crop geometry in percentage space and pixel extraction.
//!
//! A [`session::CropSession`] tracks a [`region::CropRegion`] expressed as percentages of the
//! container it is displayed in. Pointer gestures move or resize the region through
//! [`geometry::apply_drag`]; [`session::CropSession::confirm`] converts the region to pixels
//! against the source's natural size and extracts the raster.

/// Aspect-ratio presets and locks.
pub mod aspect;
/// Pointer capture acquired for the lifetime of a drag.
pub mod capture;
/// Pixel extraction of a crop region.
pub mod extract;
/// Pure move/resize math.
pub mod geometry;
/// Drag handles.
pub mod handle;
/// The crop region value type.
pub mod region;
/// The interactive session state machine.
pub mod session;
