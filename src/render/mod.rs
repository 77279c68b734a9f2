//! CPU drawing surface used by the motion synthesizer.

/// Affine image drawing into a frame.
pub mod cpu;
/// Frame buffer type.
pub mod frame;
