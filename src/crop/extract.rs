use std::path::Path;

use anyhow::Context as _;

use crate::assets::data_uri::{DataUri, encode_png, encode_png_data_uri};
use crate::assets::decode::SourceImage;
use crate::crop::region::CropRegion;
use crate::foundation::core::PixelRect;
use crate::foundation::error::{StudioError, StudioResult};

/// A raster cut out of a source image.
#[derive(Clone, Debug)]
pub struct CroppedImage {
    /// Pixel rectangle in the source's natural coordinates.
    pub rect: PixelRect,
    /// Straight-alpha pixels of exactly `rect`.
    pub image: image::RgbaImage,
}

impl CroppedImage {
    /// Encode as a lossless `data:image/png;base64,...` URI.
    pub fn to_data_uri(&self) -> StudioResult<DataUri> {
        encode_png_data_uri(&self.image)
    }

    /// Encode as PNG bytes.
    pub fn to_png(&self) -> StudioResult<Vec<u8>> {
        encode_png(&self.image)
    }

    /// Write a PNG file, creating the parent directory if needed.
    pub fn save_png(&self, path: &Path) -> StudioResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let bytes = self.to_png()?;
        std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Extract `region` from `source` at the source's natural resolution.
///
/// Fails with [`StudioError::Extraction`] when the source has no natural size yet or the region
/// maps to an empty pixel rectangle.
pub fn extract_region(source: &SourceImage, region: &CropRegion) -> StudioResult<CroppedImage> {
    if !source.is_loaded() {
        return Err(StudioError::extraction(
            "source image has not finished loading (natural size is 0)",
        ));
    }
    let rect = region.to_pixel_rect(source.natural_width(), source.natural_height());
    if rect.is_empty() {
        return Err(StudioError::extraction(format!(
            "cannot acquire a {}x{} extraction surface",
            rect.width, rect.height
        )));
    }
    (rect.width as usize)
        .checked_mul(rect.height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| StudioError::extraction("extraction surface size overflow"))?;

    let image =
        image::imageops::crop_imm(source.pixels(), rect.x, rect.y, rect.width, rect.height)
            .to_image();
    Ok(CroppedImage { rect, image })
}

#[cfg(test)]
#[path = "../../tests/unit/crop/extract.rs"]
mod tests;
