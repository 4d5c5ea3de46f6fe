/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Pan/zoom transform between screen space and canvas space.
//!
//! The map is affine: `screen = canvas * scale + offset`. The viewport also
//! owns redraw scheduling; every mutating call raises a redraw request which
//! the app drains with [`Viewport::take_redraw_request`].

use euclid::default::{Point2D, Rect, Size2D, Vector2D};
use serde::{Deserialize, Serialize};

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 5.0;
/// Scale multiplier for one wheel notch towards the user.
pub const WHEEL_ZOOM_IN: f64 = 1.1;
pub const WHEEL_ZOOM_OUT: f64 = 0.9;
/// Padding used by the "reset view" shortcut.
pub const RESET_VIEW_PADDING: f64 = 100.0;

pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return MIN_SCALE;
    }
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Wheel delta to zoom factor. Negative `delta_y` (scrolling up) zooms in.
pub fn wheel_zoom_factor(delta_y: f64) -> f64 {
    if delta_y < 0.0 { WHEEL_ZOOM_IN } else { WHEEL_ZOOM_OUT }
}

/// Plain transform state, separated from redraw bookkeeping so it can be
/// compared and logged.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone)]
pub struct Viewport {
    transform: ViewTransform,
    /// Pixel size of the drawing surface.
    canvas_size: Size2D<f64>,
    redraw_requested: bool,
}

impl Viewport {
    pub fn new(canvas_size: Size2D<f64>) -> Self {
        Self {
            transform: ViewTransform::IDENTITY,
            canvas_size,
            redraw_requested: false,
        }
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    pub fn offset(&self) -> Vector2D<f64> {
        Vector2D::new(self.transform.offset_x, self.transform.offset_y)
    }

    pub fn canvas_size(&self) -> Size2D<f64> {
        self.canvas_size
    }

    pub fn set_canvas_size(&mut self, size: Size2D<f64>) {
        if self.canvas_size != size {
            self.canvas_size = size;
            self.request_redraw();
        }
    }

    /// Replace the transform wholesale, clamping the scale.
    pub fn set_transform(&mut self, transform: ViewTransform) {
        self.transform = ViewTransform {
            scale: clamp_scale(transform.scale),
            ..transform
        };
        self.request_redraw();
    }

    pub fn screen_to_canvas(&self, screen: Point2D<f64>) -> Point2D<f64> {
        let t = self.transform;
        Point2D::new(
            (screen.x - t.offset_x) / t.scale,
            (screen.y - t.offset_y) / t.scale,
        )
    }

    pub fn canvas_to_screen(&self, canvas: Point2D<f64>) -> Point2D<f64> {
        let t = self.transform;
        Point2D::new(
            canvas.x * t.scale + t.offset_x,
            canvas.y * t.scale + t.offset_y,
        )
    }

    pub fn canvas_rect_to_screen(&self, rect: Rect<f64>) -> Rect<f64> {
        Rect::new(
            self.canvas_to_screen(rect.origin),
            rect.size * self.transform.scale,
        )
    }

    /// Canvas-space rectangle currently covered by the drawing surface.
    pub fn visible_canvas_rect(&self) -> Rect<f64> {
        let top_left = self.screen_to_canvas(Point2D::origin());
        let size = self.canvas_size / self.transform.scale;
        Rect::new(top_left, size)
    }

    /// Multiply the scale by `factor`, keeping the canvas point under `pivot`
    /// fixed on screen. Returns `false` when the clamped scale did not change,
    /// in which case nothing is touched.
    pub fn zoom(&mut self, pivot: Point2D<f64>, factor: f64) -> bool {
        let next_scale = clamp_scale(self.transform.scale * factor);
        if next_scale == self.transform.scale {
            return false;
        }
        let anchor = self.screen_to_canvas(pivot);
        self.transform = ViewTransform {
            scale: next_scale,
            offset_x: pivot.x - anchor.x * next_scale,
            offset_y: pivot.y - anchor.y * next_scale,
        };
        self.request_redraw();
        true
    }

    /// Add a screen-space delta to the offset, independent of scale.
    pub fn pan(&mut self, delta: Vector2D<f64>) {
        self.transform.offset_x += delta.x;
        self.transform.offset_y += delta.y;
        self.request_redraw();
    }

    /// Fit the bounding box of `rects`, grown by `padding` on every side,
    /// into the drawing surface and center it. With no rects the transform
    /// resets to identity.
    ///
    /// The fitted scale is clamped like any other scale, so very large or
    /// very small boxes stay centered but may not fill the surface exactly.
    pub fn fit_to_rects<I>(&mut self, rects: I, padding: f64) -> ViewTransform
    where
        I: IntoIterator<Item = Rect<f64>>,
    {
        let Some(bounds) = bounding_box(rects) else {
            self.set_transform(ViewTransform::IDENTITY);
            return self.transform;
        };
        let padded = bounds.inflate(padding, padding);
        let raw_scale = (self.canvas_size.width / padded.size.width)
            .min(self.canvas_size.height / padded.size.height);
        let scale = if raw_scale.is_finite() {
            clamp_scale(raw_scale)
        } else {
            MAX_SCALE
        };
        let center = padded.center();
        self.set_transform(ViewTransform {
            scale,
            offset_x: self.canvas_size.width / 2.0 - center.x * scale,
            offset_y: self.canvas_size.height / 2.0 - center.y * scale,
        });
        self.transform
    }

    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Return and clear the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}

fn bounding_box<I>(rects: I) -> Option<Rect<f64>>
where
    I: IntoIterator<Item = Rect<f64>>,
{
    rects.into_iter().reduce(|acc, rect| acc.union(&rect))
}
