use crate::foundation::core::{Affine, Canvas, Point};
use crate::foundation::error::{StudioError, StudioResult};
use crate::render::frame::FrameRGBA;

/// A premultiplied RGBA8 image ready to be drawn.
#[derive(Clone, Debug)]
pub struct PremulImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub data: Vec<u8>,
}

impl PremulImage {
    /// Wrap a premultiplied buffer, checking its length.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> StudioResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| StudioError::validation("image buffer size overflow"))?;
        if width == 0 || height == 0 || data.len() != expected {
            return Err(StudioError::validation(
                "premultiplied image expects non-empty width*height*4 bytes",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    fn texel(&self, x: i64, y: i64) -> [f32; 4] {
        let x = x.clamp(0, i64::from(self.width) - 1) as usize;
        let y = y.clamp(0, i64::from(self.height) - 1) as usize;
        let i = (y * self.width as usize + x) * 4;
        [
            f32::from(self.data[i]),
            f32::from(self.data[i + 1]),
            f32::from(self.data[i + 2]),
            f32::from(self.data[i + 3]),
        ]
    }
}

/// Map `image` onto the full `canvas`, then scale by `scale` about the canvas center.
pub fn fit_and_scale_about_center(image: &PremulImage, canvas: Canvas, scale: f64) -> Affine {
    let c = canvas.center().to_vec2();
    let fit = Affine::scale_non_uniform(
        f64::from(canvas.width) / f64::from(image.width),
        f64::from(canvas.height) / f64::from(image.height),
    );
    Affine::translate(c) * Affine::scale(scale) * Affine::translate(-c) * fit
}

/// Draw `image` into `dst` through `transform` (image pixel space to frame pixel space).
///
/// Bilinear sampling in premultiplied space. Frame pixels whose center maps outside the image
/// are left untouched; `dst` is not cleared.
pub fn draw_image(dst: &mut FrameRGBA, image: &PremulImage, transform: Affine) -> StudioResult<()> {
    if !dst.premultiplied {
        return Err(StudioError::validation(
            "draw_image expects a premultiplied frame",
        ));
    }
    if dst.width == 0
        || dst.height == 0
        || dst.data.len() != (dst.width as usize) * (dst.height as usize) * 4
    {
        return Err(StudioError::validation(
            "draw_image expects a non-empty frame of width*height*4 bytes",
        ));
    }
    let det = transform.determinant();
    if !det.is_finite() || det.abs() < f64::EPSILON {
        return Err(StudioError::validation("draw transform is not invertible"));
    }
    let inv = transform.inverse();
    let iw = f64::from(image.width);
    let ih = f64::from(image.height);
    let width = dst.width as usize;

    for (row_i, row) in dst.data.chunks_exact_mut(width * 4).enumerate() {
        for (col_i, px) in row.chunks_exact_mut(4).enumerate() {
            let p = inv * Point::new(col_i as f64 + 0.5, row_i as f64 + 0.5);
            if p.x < 0.0 || p.y < 0.0 || p.x >= iw || p.y >= ih {
                continue;
            }
            px.copy_from_slice(&sample_bilinear(image, p.x - 0.5, p.y - 0.5));
        }
    }
    Ok(())
}

fn sample_bilinear(image: &PremulImage, u: f64, v: f64) -> [u8; 4] {
    let x0 = u.floor();
    let y0 = v.floor();
    let fx = (u - x0) as f32;
    let fy = (v - y0) as f32;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let a = image.texel(x0, y0);
    let b = image.texel(x0 + 1, y0);
    let c = image.texel(x0, y0 + 1);
    let d = image.texel(x0 + 1, y0 + 1);

    let mut out = [0u8; 4];
    for ch in 0..4 {
        let top = a[ch] + (b[ch] - a[ch]) * fx;
        let bottom = c[ch] + (d[ch] - c[ch]) * fx;
        out[ch] = (top + (bottom - top) * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
