//! Edit-mode interactions with pins: dragging, click-to-add and the pin
//! editor. Only available while edit mode is on.

use crate::geometry::{clamp_percent, client_to_image_percent, is_percent, Point, Rect};
use crate::models::Pin;

#[derive(Debug, Clone, PartialEq)]
struct PinDrag {
    pin_id: String,
    last: Option<(f64, f64)>,
}

/// Pin editor contents: which pin is open and which store it will link to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinDraft {
    pub pin_id: String,
    pub store_id: String,
}

/// Position update for a pin under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct PinMove {
    pub pin_id: String,
    pub x: f64,
    pub y: f64,
}

/// Where a new pin should be created after a click in adding mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewPinPlacement {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinClick {
    /// Click that ended a pin drag.
    Ignore,
    /// Edit mode: the editor was opened for this pin.
    OpenEditor(PinDraft),
    /// Normal mode: show the store modal for this pin.
    ShowInfo(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PinEditState {
    edit_mode: bool,
    adding: bool,
    drag: Option<PinDrag>,
    editor: Option<PinDraft>,
    just_dragged: bool,
}

impl PinEditState {
    pub fn new(edit_mode: bool) -> Self {
        PinEditState {
            edit_mode,
            ..Default::default()
        }
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn adding(&self) -> bool {
        self.adding
    }

    pub fn editor(&self) -> Option<&PinDraft> {
        self.editor.as_ref()
    }

    pub fn dragging_pin(&self) -> Option<&str> {
        self.drag.as_ref().map(|d| d.pin_id.as_str())
    }

    pub fn toggle_edit_mode(&mut self) {
        self.edit_mode = !self.edit_mode;
        self.adding = false;
        self.drag = None;
        self.editor = None;
    }

    /// No-op outside edit mode.
    pub fn toggle_adding(&mut self) {
        if !self.edit_mode {
            return;
        }
        self.adding = !self.adding;
        self.drag = None;
        self.editor = None;
    }

    pub fn can_drag_pins(&self) -> bool {
        self.edit_mode && !self.adding
    }

    /// Pointer-down on a pin. Returns true when the pin captured the
    /// gesture, in which case the map must not start panning.
    pub fn press_pin(&mut self, pin_id: &str) -> bool {
        if !self.can_drag_pins() {
            return false;
        }
        self.drag = Some(PinDrag {
            pin_id: pin_id.to_string(),
            last: None,
        });
        self.just_dragged = false;
        true
    }

    /// Pointer-move while a pin is held. Returns the clamped position, or
    /// `None` when no pin is held or the image has not been measured.
    pub fn drag_to(&mut self, pointer: Point, image: Rect) -> Option<PinMove> {
        let drag = self.drag.as_mut()?;
        let (x, y) = client_to_image_percent(pointer, image)?;
        let (x, y) = (clamp_percent(x), clamp_percent(y));
        drag.last = Some((x, y));
        Some(PinMove {
            pin_id: drag.pin_id.clone(),
            x,
            y,
        })
    }

    /// Pointer-up. Returns the final position to persist if the pin moved.
    pub fn release(&mut self) -> Option<PinMove> {
        let drag = self.drag.take()?;
        let (x, y) = drag.last?;
        self.just_dragged = true;
        Some(PinMove {
            pin_id: drag.pin_id,
            x,
            y,
        })
    }

    /// Click on a pin. `store_id` is the store the pin currently links to.
    pub fn click_pin(&mut self, pin_id: &str, store_id: &str) -> PinClick {
        if std::mem::take(&mut self.just_dragged) {
            return PinClick::Ignore;
        }
        if self.edit_mode && !self.adding {
            let draft = PinDraft {
                pin_id: pin_id.to_string(),
                store_id: store_id.to_string(),
            };
            self.editor = Some(draft.clone());
            return PinClick::OpenEditor(draft);
        }
        PinClick::ShowInfo(pin_id.to_string())
    }

    /// Click on the map background in adding mode. Positions outside the
    /// image are rejected and leave adding mode on.
    pub fn click_map(&mut self, pointer: Point, image: Rect) -> Option<NewPinPlacement> {
        if !(self.edit_mode && self.adding) {
            return None;
        }
        let (x, y) = client_to_image_percent(pointer, image)?;
        if !is_percent(x) || !is_percent(y) {
            return None;
        }
        self.adding = false;
        Some(NewPinPlacement { x, y })
    }

    pub fn open_editor(&mut self, pin_id: &str, store_id: &str) {
        if self.edit_mode {
            self.editor = Some(PinDraft {
                pin_id: pin_id.to_string(),
                store_id: store_id.to_string(),
            });
        }
    }

    pub fn select_store(&mut self, store_id: &str) {
        if let Some(draft) = self.editor.as_mut() {
            draft.store_id = store_id.to_string();
        }
    }

    /// Close the editor and hand back the draft to persist.
    pub fn save(&mut self) -> Option<PinDraft> {
        self.editor.take()
    }

    /// Close the editor and return the id of the pin to delete.
    pub fn delete(&mut self) -> Option<String> {
        self.editor.take().map(|d| d.pin_id)
    }

    pub fn cancel(&mut self) {
        self.editor = None;
    }
}

/// Apply a move to the matching pin, clamping its position.
pub fn apply_move(pins: &mut [Pin], mv: &PinMove) -> bool {
    match pins.iter_mut().find(|p| p.id == mv.pin_id) {
        Some(pin) => {
            pin.set_position(mv.x, mv.y);
            true
        }
        None => false,
    }
}
