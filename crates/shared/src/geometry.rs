//! Screen-space geometry for the illustrated map.
//!
//! All rectangles are in client (viewport) pixels, as reported by the
//! browser's bounding-rect measurements. Pin positions are percentages of
//! the rendered image rectangle, so they survive resizes and pans unchanged.

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }

    pub fn scaled(&self, factor: f64) -> Size {
        Size {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Rect {
            left,
            top,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// An element that has not been laid out yet reports a zero-sized rect.
    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Clamp a percentage into [0, 100]. NaN collapses to 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

pub fn is_percent(value: f64) -> bool {
    (0.0..=100.0).contains(&value)
}

/// Convert a client-space point into percentages of `image`'s rendered size.
///
/// The result is not clamped. Returns `None` when the image has no measured
/// size yet.
pub fn client_to_image_percent(client: Point, image: Rect) -> Option<(f64, f64)> {
    if !image.is_measured() {
        return None;
    }
    let x = (client.x - image.left) / image.width * 100.0;
    let y = (client.y - image.top) / image.height * 100.0;
    Some((x, y))
}

/// Where a pin at (`x`%, `y`%) lands, relative to the container's top-left.
///
/// The caller anchors the marker bottom-centre on this point.
pub fn pin_anchor(image: Rect, container: Rect, x: f64, y: f64) -> Option<Point> {
    if !image.is_measured() || !container.is_measured() {
        return None;
    }
    Some(Point {
        x: image.left + image.width * x / 100.0 - container.left,
        y: image.top + image.height * y / 100.0 - container.top,
    })
}
