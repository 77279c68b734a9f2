use std::time::Duration;

use crate::assets::decode::SourceImage;
use crate::config::MotionOpts;
use crate::foundation::core::Canvas;
use crate::foundation::error::{StudioError, StudioResult};
use crate::motion::breathe::{Breathing, output_canvas, progress};
use crate::render::cpu::{PremulImage, draw_image, fit_and_scale_about_center};
use crate::render::frame::FrameRGBA;

/// Progress and zoom of one drawn frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSample {
    /// Fraction of the recording elapsed, in `[0, 1]`.
    pub progress: f64,
    /// Zoom about the canvas center.
    pub scale: f64,
}

/// Drawing state for one synthesis call: the premultiplied source and the output surface.
#[derive(Debug)]
pub struct MotionJob {
    image: PremulImage,
    frame: FrameRGBA,
    breathing: Breathing,
    duration: Duration,
}

impl MotionJob {
    /// Prepare a job for `source`, sizing the surface from `opts.max_dim`.
    pub fn new(source: &SourceImage, opts: &MotionOpts) -> StudioResult<Self> {
        if !source.is_loaded() {
            return Err(StudioError::load("source image has no pixel data"));
        }
        let (w, h) = (source.natural_width(), source.natural_height());
        let canvas = output_canvas(w, h, opts.max_dim)?;
        let image = PremulImage::new(w, h, source.to_premultiplied_rgba8())?;
        Ok(Self {
            image,
            frame: FrameRGBA::transparent(canvas)?,
            breathing: Breathing {
                amplitude: opts.amplitude,
            },
            duration: opts.duration(),
        })
    }

    /// Output surface size.
    pub fn canvas(&self) -> Canvas {
        self.frame.canvas()
    }

    /// Clear the surface and redraw the source for `elapsed`.
    pub fn render_at(&mut self, elapsed: Duration) -> StudioResult<FrameSample> {
        let progress = progress(elapsed, self.duration);
        let scale = self.breathing.scale_at(progress);
        let transform = fit_and_scale_about_center(&self.image, self.frame.canvas(), scale);
        self.frame.clear();
        draw_image(&mut self.frame, &self.image, transform)?;
        Ok(FrameSample { progress, scale })
    }

    /// The most recently drawn frame.
    pub fn frame(&self) -> &FrameRGBA {
        &self.frame
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/job.rs"]
mod tests;
