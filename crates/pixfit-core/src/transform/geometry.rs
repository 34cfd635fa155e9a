//! Contain-fit placement math.
//!
//! All functions here are pure and testable without decoding or encoding
//! anything.

/// Where a source image lands on the target canvas.
///
/// Values are exact (fractional); [`Placement::to_pixels`] snaps them to the
/// pixel grid for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Uniform scale factor applied to both axes
    pub scale: f64,
    pub scaled_width: f64,
    pub scaled_height: f64,
    /// Horizontal padding on each side
    pub offset_x: f64,
    /// Vertical padding on each side
    pub offset_y: f64,
}

/// A placement snapped to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Compute the contain-fit placement of `source` inside `target`.
///
/// `scale = min(target_w / source_w, target_h / source_h)`, so the whole
/// source fits without cropping and keeps its aspect ratio. The scaled image
/// is centered on both axes.
///
/// Returns `None` when any dimension is zero.
///
/// # Examples
/// ```
/// # use pixfit_core::transform::contain_placement;
/// let p = contain_placement((400, 200), (200, 200)).unwrap();
/// assert_eq!(p.scale, 0.5);
/// assert_eq!((p.scaled_width, p.scaled_height), (200.0, 100.0));
/// assert_eq!((p.offset_x, p.offset_y), (0.0, 50.0));
/// ```
pub fn contain_placement(source: (u32, u32), target: (u32, u32)) -> Option<Placement> {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;
    if src_w == 0 || src_h == 0 || tgt_w == 0 || tgt_h == 0 {
        return None;
    }

    let (src_w, src_h) = (f64::from(src_w), f64::from(src_h));
    let (tgt_w, tgt_h) = (f64::from(tgt_w), f64::from(tgt_h));

    let scale = (tgt_w / src_w).min(tgt_h / src_h);
    // The limiting axis is pinned to the target edge so rounding error can
    // never push it past the canvas.
    let scaled_width = if tgt_w / src_w <= tgt_h / src_h {
        tgt_w
    } else {
        (src_w * scale).min(tgt_w)
    };
    let scaled_height = if tgt_h / src_h <= tgt_w / src_w {
        tgt_h
    } else {
        (src_h * scale).min(tgt_h)
    };

    Some(Placement {
        scale,
        scaled_width,
        scaled_height,
        offset_x: (tgt_w - scaled_width) / 2.0,
        offset_y: (tgt_h - scaled_height) / 2.0,
    })
}

impl Placement {
    /// Snap to whole pixels inside a canvas of `target` size.
    ///
    /// Scaled edges round to nearest (at least 1px, at most the canvas edge);
    /// offsets round to nearest and never push the image off the canvas.
    pub fn to_pixels(&self, target: (u32, u32)) -> PixelRect {
        let (tgt_w, tgt_h) = target;
        let width = snap(self.scaled_width, tgt_w);
        let height = snap(self.scaled_height, tgt_h);
        PixelRect {
            x: (self.offset_x.round().max(0.0) as u32).min(tgt_w - width),
            y: (self.offset_y.round().max(0.0) as u32).min(tgt_h - height),
            width,
            height,
        }
    }
}

fn snap(value: f64, limit: u32) -> u32 {
    (value.round() as u32).clamp(1, limit.max(1))
}
