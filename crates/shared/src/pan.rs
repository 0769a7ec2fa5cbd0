//! Panning the illustrated map inside a fixed viewport.
//!
//! The background image is rendered larger than its container (by
//! [`DEFAULT_MAP_SCALE`]) and translated by a [`MapPosition`]. Offsets are
//! always clamped so no empty space shows around the image.

use crate::geometry::{Point, Size};
use crate::models::MapPosition;

/// Rendered image size relative to the container.
pub const DEFAULT_MAP_SCALE: f64 = 1.7;

/// Movement below this (in pixels) is treated as a click, not a drag.
pub const MOUSE_DRAG_THRESHOLD: f64 = 3.0;

/// Touch is less precise than a mouse, so it gets a larger dead zone.
pub const TOUCH_DRAG_THRESHOLD: f64 = 8.0;

/// Size the image renders at for a given container.
pub fn rendered_image_size(container: Size, scale: f64) -> Size {
    container.scaled(scale)
}

/// Offset that centres `image` inside `container`.
pub fn centered_offset(container: Size, image: Size) -> MapPosition {
    MapPosition {
        x: -(image.width - container.width) / 2.0,
        y: -(image.height - container.height) / 2.0,
    }
}

/// Valid offset range for the current container and image sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl PanBounds {
    /// `max = 0`, `min = container - image` on each axis.
    ///
    /// When the image is smaller than the container on an axis the image is
    /// centred on that axis and cannot be panned along it.
    pub fn new(container: Size, image: Size) -> Self {
        let (min_x, max_x) = axis_bounds(container.width, image.width);
        let (min_y, max_y) = axis_bounds(container.height, image.height);
        PanBounds {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    pub fn clamp(&self, offset: MapPosition) -> MapPosition {
        MapPosition {
            x: offset.x.clamp(self.min_x, self.max_x),
            y: offset.y.clamp(self.min_y, self.max_y),
        }
    }

    pub fn contains(&self, offset: MapPosition) -> bool {
        (self.min_x..=self.max_x).contains(&offset.x) && (self.min_y..=self.max_y).contains(&offset.y)
    }

    pub fn pannable_x(&self) -> bool {
        self.min_x < self.max_x
    }

    pub fn pannable_y(&self) -> bool {
        self.min_y < self.max_y
    }
}

fn axis_bounds(container: f64, image: f64) -> (f64, f64) {
    let min = container - image;
    if min > 0.0 {
        let centred = min / 2.0;
        (centred, centred)
    } else {
        (min, 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

impl PointerKind {
    fn drag_threshold(self) -> f64 {
        match self {
            PointerKind::Mouse => MOUSE_DRAG_THRESHOLD,
            PointerKind::Touch => TOUCH_DRAG_THRESHOLD,
        }
    }
}

/// Map pan gesture: `Idle -> Dragging -> Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PanState {
    #[default]
    Idle,
    Dragging {
        kind: PointerKind,
        origin: Point,
        start_offset: MapPosition,
        moved: bool,
    },
}

/// What a finished gesture amounted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanRelease {
    /// No gesture was in progress.
    None,
    /// Pointer went down and up without passing the drag threshold.
    Click(Point),
    /// The map was panned.
    Dragged,
}

impl PanState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, PanState::Dragging { .. })
    }

    /// Whether the current gesture has moved past the drag threshold.
    pub fn has_moved(&self) -> bool {
        matches!(self, PanState::Dragging { moved: true, .. })
    }

    /// Mouse pointer-down on the map.
    pub fn press(offset: MapPosition, pointer: Point) -> Self {
        PanState::Dragging {
            kind: PointerKind::Mouse,
            origin: pointer,
            start_offset: offset,
            moved: false,
        }
    }

    /// Touch start. Anything other than exactly one touch point leaves the
    /// state unchanged.
    pub fn touch_start(self, touches: &[Point], offset: MapPosition) -> Self {
        match touches {
            [only] => PanState::Dragging {
                kind: PointerKind::Touch,
                origin: *only,
                start_offset: offset,
                moved: false,
            },
            _ => self,
        }
    }

    /// Pointer moved. Returns the new state and, once the gesture counts as a
    /// drag, the clamped offset to apply.
    ///
    /// `bounds` is `None` while the container or image has not been measured;
    /// the event is then dropped and the next move retries.
    pub fn drag(self, pointer: Point, bounds: Option<PanBounds>) -> (Self, Option<MapPosition>) {
        let PanState::Dragging {
            kind,
            origin,
            start_offset,
            moved,
        } = self
        else {
            return (self, None);
        };
        let Some(bounds) = bounds else {
            return (self, None);
        };

        let dx = pointer.x - origin.x;
        let dy = pointer.y - origin.y;
        let threshold = kind.drag_threshold();
        let moved = moved || dx.abs() > threshold || dy.abs() > threshold;
        let next = PanState::Dragging {
            kind,
            origin,
            start_offset,
            moved,
        };
        if !moved {
            return (next, None);
        }

        let proposed = MapPosition {
            x: start_offset.x + dx,
            y: start_offset.y + dy,
        };
        (next, Some(bounds.clamp(proposed)))
    }

    /// Touch move. Multi-touch is ignored.
    pub fn touch_move(
        self,
        touches: &[Point],
        bounds: Option<PanBounds>,
    ) -> (Self, Option<MapPosition>) {
        match (self, touches) {
            (
                PanState::Dragging {
                    kind: PointerKind::Touch,
                    ..
                },
                [only],
            ) => self.drag(*only, bounds),
            _ => (self, None),
        }
    }

    /// Pointer-up, pointer-leave or touch-end.
    pub fn release(self) -> (Self, PanRelease) {
        let outcome = match self {
            PanState::Idle => PanRelease::None,
            PanState::Dragging { moved: true, .. } => PanRelease::Dragged,
            PanState::Dragging { origin, .. } => PanRelease::Click(origin),
        };
        (PanState::Idle, outcome)
    }
}
