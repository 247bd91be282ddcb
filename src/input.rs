use egui::{Context, Key, KeyboardShortcut, Modifiers, Pos2, Rect};

pub const UNDO_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
pub const REDO_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(
    Modifiers {
        alt: false,
        ctrl: false,
        shift: true,
        mac_cmd: false,
        command: true,
    },
    Key::Z,
);
pub const REDO_SHORTCUT_ALT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Press,
    Move,
    Release,
    /// The pointer left the canvas
    Leave,
}

/// A pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub point: Pos2,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, point: Pos2) -> Self {
        Self { kind, point }
    }
}

/// Everything the canvas reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Undo,
    Redo,
}

/// Turns raw egui input into canvas events.
///
/// Tracks whether the pointer was over the canvas in the previous frame so it
/// can synthesize `Leave` events, and translates positions into canvas-local
/// coordinates.
#[derive(Debug)]
pub struct InputHandler {
    canvas_rect: Rect,
    last_pointer_pos: Option<Pos2>,
    was_inside: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            last_pointer_pos: None,
            was_inside: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn to_local(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Process this frame's input. `pointer_over_canvas` should come from the
    /// canvas widget's response so windows on top of the canvas block it.
    pub fn process_input(&mut self, ctx: &Context, pointer_over_canvas: bool) -> Vec<InputEvent> {
        let mut events = Vec::new();

        // Redo first: the undo shortcut would also match Cmd+Shift+Z
        ctx.input_mut(|input| {
            if input.consume_shortcut(&REDO_SHORTCUT) || input.consume_shortcut(&REDO_SHORTCUT_ALT) {
                events.push(InputEvent::Redo);
            } else if input.consume_shortcut(&UNDO_SHORTCUT) {
                events.push(InputEvent::Undo);
            }
        });

        ctx.input(|input| {
            let hover = input.pointer.hover_pos();
            let inside = pointer_over_canvas && hover.is_some_and(|pos| self.canvas_rect.contains(pos));

            if self.was_inside && !inside {
                if let Some(pos) = hover.or(self.last_pointer_pos) {
                    events.push(pointer(PointerKind::Leave, self.to_local(pos)));
                }
            }

            if let Some(pos) = hover.filter(|_| inside) {
                let local = self.to_local(pos);
                let pressed = input.pointer.primary_pressed();
                if pressed {
                    events.push(pointer(PointerKind::Press, local));
                } else if Some(pos) != self.last_pointer_pos {
                    events.push(pointer(PointerKind::Move, local));
                }
                if input.pointer.primary_released() {
                    events.push(pointer(PointerKind::Release, local));
                }
            }

            self.was_inside = inside;
            self.last_pointer_pos = hover;
        });

        events
    }
}

fn pointer(kind: PointerKind, point: Pos2) -> InputEvent {
    InputEvent::Pointer(PointerEvent::new(kind, point))
}
