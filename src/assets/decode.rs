use std::path::Path;
use std::sync::Arc;

use crate::assets::data_uri::DataUri;
use crate::foundation::error::{StudioError, StudioResult};

/// A decoded raster with straight-alpha RGBA8 pixels.
///
/// The natural dimensions are the unscaled pixel size of the raster. A source that has not
/// finished loading reports `0x0`.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pixels: Arc<image::RgbaImage>,
}

impl SourceImage {
    /// Wrap an already-decoded straight-alpha raster.
    pub fn from_rgba(pixels: image::RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    /// A placeholder for a source whose pixels are not available yet.
    pub fn pending() -> Self {
        Self::from_rgba(image::RgbaImage::new(0, 0))
    }

    /// Natural (unscaled) width in pixels.
    pub fn natural_width(&self) -> u32 {
        self.pixels.width()
    }

    /// Natural (unscaled) height in pixels.
    pub fn natural_height(&self) -> u32 {
        self.pixels.height()
    }

    /// Return `true` once the natural dimensions are known.
    pub fn is_loaded(&self) -> bool {
        self.natural_width() > 0 && self.natural_height() > 0
    }

    /// Borrow the straight-alpha pixels.
    pub fn pixels(&self) -> &image::RgbaImage {
        &self.pixels
    }

    /// Copy the pixels into a premultiplied RGBA8 buffer, row-major, tightly packed.
    pub fn to_premultiplied_rgba8(&self) -> Vec<u8> {
        let mut out = self.pixels.as_raw().clone();
        premultiply_rgba8_in_place(&mut out);
        out
    }
}

/// Decode encoded image bytes (PNG, JPEG, ...) into a [`SourceImage`].
pub fn decode_image(bytes: &[u8]) -> StudioResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| StudioError::load(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(StudioError::load("decoded image has no pixels"));
    }
    Ok(SourceImage::from_rgba(rgba))
}

/// Read and decode an image file.
pub fn load_image_path(path: &Path) -> StudioResult<SourceImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| StudioError::load(format!("read image '{}': {e}", path.display())))?;
    decode_image(&bytes)
}

/// Decode an image carried in a `data:` URI.
pub fn decode_data_uri(uri: &str) -> StudioResult<SourceImage> {
    let parsed = DataUri::parse(uri).map_err(|e| StudioError::load(e.to_string()))?;
    let bytes = parsed
        .decode_payload()
        .map_err(|e| StudioError::load(e.to_string()))?;
    decode_image(&bytes)
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
