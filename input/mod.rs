/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Input handling for the canvas.
//!
//! Keyboard shortcuts are handled here. Pointer interaction (drag, pan,
//! resize, zoom, selection) is handled by [`interaction::InteractionMachine`].

pub mod interaction;

use crate::app::CanvasIntent;
use crate::graph::arrange::ArrangeDirection;

/// Keys the canvas reacts to. Everything else arrives as `Character` or
/// `Other` and is ignored unless a modifier combination claims it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Enter,
    Escape,
    Tab,
    Space,
    Delete,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Other,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
        alt: false,
    };
}

/// Keyboard actions collected from one key press.
///
/// This struct decouples input detection from action application (pure
/// state mutation), making actions testable.
#[derive(Default, Debug, PartialEq)]
pub struct KeyboardActions {
    pub undo: bool,
    pub redo: bool,
    pub save: bool,
    pub copy: bool,
    pub paste: bool,
    pub delete_selected: bool,
    pub close_popups: bool,
    pub toggle_tool: bool,
    pub reset_view: bool,
    pub new_workspace: bool,
    pub arrange: Option<ArrangeDirection>,
    pub submit_edit: bool,
    pub cancel_edit: bool,
}

/// Map a key press to actions. While the URL field has focus only Enter and
/// Escape are routed, and both go to the field.
pub fn collect_actions(key: Key, modifiers: Modifiers, editing: bool) -> KeyboardActions {
    let mut actions = KeyboardActions::default();

    if editing {
        match key {
            Key::Enter => actions.submit_edit = true,
            Key::Escape => actions.cancel_edit = true,
            _ => {},
        }
        return actions;
    }

    if modifiers.ctrl {
        match key {
            Key::Character(c) => match c.to_ascii_lowercase() {
                'z' => actions.undo = true,
                'y' => actions.redo = true,
                's' => actions.save = true,
                'c' => actions.copy = true,
                'v' => actions.paste = true,
                'n' => actions.new_workspace = true,
                _ => {},
            },
            Key::ArrowLeft => actions.arrange = Some(ArrangeDirection::Left),
            Key::ArrowRight => actions.arrange = Some(ArrangeDirection::Right),
            Key::ArrowUp => actions.arrange = Some(ArrangeDirection::Top),
            Key::ArrowDown => actions.arrange = Some(ArrangeDirection::Bottom),
            _ => {},
        }
        return actions;
    }

    match key {
        Key::Delete => actions.delete_selected = true,
        Key::Escape => actions.close_popups = true,
        Key::Tab => {
            actions.toggle_tool = true;
            actions.close_popups = true;
        },
        Key::Space => actions.reset_view = true,
        _ => {},
    }
    actions
}

/// Convert keyboard actions to intents, in a fixed order.
pub fn intents_from_actions(actions: &KeyboardActions) -> Vec<CanvasIntent> {
    let mut intents = Vec::new();

    if actions.submit_edit {
        intents.push(CanvasIntent::SubmitEdit);
    }
    if actions.cancel_edit {
        intents.push(CanvasIntent::CancelEdit);
    }
    if actions.close_popups {
        intents.push(CanvasIntent::ClosePopups);
    }
    if actions.toggle_tool {
        intents.push(CanvasIntent::ToggleTool);
    }
    if actions.undo {
        intents.push(CanvasIntent::Undo);
    }
    if actions.redo {
        intents.push(CanvasIntent::Redo);
    }
    if actions.save {
        intents.push(CanvasIntent::SaveWorkspace);
    }
    if actions.copy {
        intents.push(CanvasIntent::CopySelected);
    }
    if actions.paste {
        intents.push(CanvasIntent::PasteAtPointer);
    }
    if actions.delete_selected {
        intents.push(CanvasIntent::DeleteSelected);
    }
    if actions.reset_view {
        intents.push(CanvasIntent::FitView);
    }
    if actions.new_workspace {
        intents.push(CanvasIntent::NewWorkspace);
    }
    if let Some(direction) = actions.arrange {
        intents.push(CanvasIntent::Arrange(direction));
    }

    intents
}
