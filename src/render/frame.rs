use crate::foundation::core::Canvas;
use crate::foundation::error::{StudioError, StudioResult};

/// A rendered frame as RGBA8 pixels.
///
/// Frames produced by the motion synthesizer are **premultiplied alpha**; the `premultiplied`
/// flag makes this explicit at sink boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Allocate a transparent premultiplied frame for `canvas`.
    pub fn transparent(canvas: Canvas) -> StudioResult<Self> {
        if canvas.is_empty() {
            return Err(StudioError::validation("frame canvas must be non-empty"));
        }
        let len = (canvas.width as usize)
            .checked_mul(canvas.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| StudioError::validation("frame buffer size overflow"))?;
        Ok(Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0u8; len],
            premultiplied: true,
        })
    }

    /// Frame dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Premultiplied RGBA of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}
