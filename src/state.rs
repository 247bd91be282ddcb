use log::{debug, warn};

use crate::drawing_log::DrawingLog;
use crate::input::{PointerEvent, PointerKind};
use crate::tools::ActiveTool;

/// What the pointer is currently doing on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,
    /// A marker stroke follows the pointer
    Drawing,
    /// A sticker ghost follows the pointer
    Placing,
    /// A committed sticker was picked up and follows the pointer
    Dragging,
}

impl InteractionState {
    pub fn is_active(self) -> bool {
        self != Self::Idle
    }
}

/// Pointer state machine driving the drawing log.
///
/// ```text
/// Idle --press(sticker hit, marker tool)--> Dragging
/// Idle --press(marker tool)-------------> Drawing
/// Idle --press(sticker tool)------------> Placing
/// Active --move--> Active
/// Active --release--> Idle   (commit)
/// Active --leave--> Idle     (commit stroke or drag, discard ghost)
/// ```
#[derive(Debug, Default)]
pub struct Interaction {
    state: InteractionState,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Forget the current gesture, e.g. after the log was cleared under it.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
    }

    /// Feed one pointer event. Returns true if the log changed and the
    /// canvas needs to be redrawn.
    pub fn handle(&mut self, event: PointerEvent, tool: &ActiveTool, log: &mut DrawingLog) -> bool {
        let PointerEvent { kind, point } = event;
        let before = self.state;

        let changed = match (self.state, kind) {
            (InteractionState::Idle, PointerKind::Press) => {
                self.state = self.press(point, tool, log);
                true
            }
            (InteractionState::Idle, _) => false,
            (_, PointerKind::Press) => {
                warn!("Ignoring press while {:?}", self.state);
                false
            }
            (_, PointerKind::Move) => {
                if log.update_in_progress(|command| command.drag_to(point)).is_none() {
                    // The in-progress command was dropped elsewhere (clear)
                    self.state = InteractionState::Idle;
                    return false;
                }
                true
            }
            (_, PointerKind::Release) => {
                log.update_in_progress(|command| command.drag_to(point));
                self.state = InteractionState::Idle;
                log.finish().is_some()
            }
            (state, PointerKind::Leave) => {
                self.state = InteractionState::Idle;
                self.leave(state, point, log)
            }
        };

        if before != self.state {
            debug!("{before:?} --{kind:?}--> {:?}", self.state);
        }
        changed
    }

    fn press(&self, point: egui::Pos2, tool: &ActiveTool, log: &mut DrawingLog) -> InteractionState {
        // A selected sticker glyph always places a new sticker; only the
        // marker can pick up existing ones.
        if !tool.is_sticker() {
            if let Some(index) = log.hit_sticker(point) {
                if log.lift_sticker(index).is_some() {
                    return InteractionState::Dragging;
                }
            }
        }

        let command = tool.start_command(point);
        let state = if command.is_preview() {
            InteractionState::Placing
        } else {
            InteractionState::Drawing
        };
        log.begin(command);
        state
    }

    fn leave(&self, state: InteractionState, point: egui::Pos2, log: &mut DrawingLog) -> bool {
        match state {
            InteractionState::Drawing => {
                log.update_in_progress(|command| command.drag_to(point));
                log.finish().is_some()
            }
            // Stays where it was last dragged to
            InteractionState::Dragging => log.finish().is_some(),
            // A ghost is only a tentative placement
            InteractionState::Placing => log.cancel().is_some(),
            InteractionState::Idle => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::DrawCommand;
    use crate::sticker::Sticker;
    use egui::{Color32, Pos2, pos2};

    fn marker() -> ActiveTool {
        ActiveTool::Marker {
            thickness: 2.0,
            color: Color32::BLACK,
        }
    }

    fn sticker_tool() -> ActiveTool {
        ActiveTool::Sticker {
            glyph: "⭐".to_owned(),
            rotation: 0.1,
            size: 20.0,
        }
    }

    fn event(kind: PointerKind, x: f32, y: f32) -> PointerEvent {
        PointerEvent::new(kind, pos2(x, y))
    }

    #[test]
    fn idle_ignores_everything_but_press() {
        let mut interaction = Interaction::new();
        let mut log = DrawingLog::new();
        for kind in [PointerKind::Move, PointerKind::Release, PointerKind::Leave] {
            assert!(!interaction.handle(event(kind, 1.0, 1.0), &marker(), &mut log));
        }
        assert_eq!(log.revision(), 0);
    }

    #[test]
    fn marker_gesture_commits_a_stroke() {
        let mut interaction = Interaction::new();
        let mut log = DrawingLog::new();
        let tool = marker();

        interaction.handle(event(PointerKind::Press, 0.0, 0.0), &tool, &mut log);
        assert_eq!(interaction.state(), InteractionState::Drawing);
        interaction.handle(event(PointerKind::Move, 5.0, 5.0), &tool, &mut log);
        assert!(log.is_empty());
        interaction.handle(event(PointerKind::Release, 10.0, 10.0), &tool, &mut log);

        assert_eq!(interaction.state(), InteractionState::Idle);
        match log.commands() {
            [DrawCommand::Stroke(stroke)] => assert_eq!(
                stroke.points(),
                &[pos2(0.0, 0.0), pos2(5.0, 5.0), pos2(10.0, 10.0)]
            ),
            other => panic!("unexpected log {other:?}"),
        }
    }

    #[test]
    fn second_press_while_active_is_ignored() {
        let mut interaction = Interaction::new();
        let mut log = DrawingLog::new();
        let tool = marker();

        interaction.handle(event(PointerKind::Press, 0.0, 0.0), &tool, &mut log);
        assert!(!interaction.handle(event(PointerKind::Press, 3.0, 3.0), &tool, &mut log));
        assert_eq!(interaction.state(), InteractionState::Drawing);
    }

    #[test]
    fn leaving_discards_ghost_but_commits_stroke() {
        let mut interaction = Interaction::new();
        let mut log = DrawingLog::new();

        interaction.handle(event(PointerKind::Press, 0.0, 0.0), &sticker_tool(), &mut log);
        assert_eq!(interaction.state(), InteractionState::Placing);
        interaction.handle(event(PointerKind::Leave, 300.0, 0.0), &sticker_tool(), &mut log);
        assert!(log.is_empty());
        assert!(log.in_progress().is_none());

        interaction.handle(event(PointerKind::Press, 0.0, 0.0), &marker(), &mut log);
        interaction.handle(event(PointerKind::Leave, 300.0, 0.0), &marker(), &mut log);
        assert_eq!(log.len(), 1);
        assert_eq!(interaction.state(), InteractionState::Idle);
    }

    #[test]
    fn sticker_placement_commits_at_release_point() {
        let mut interaction = Interaction::new();
        let mut log = DrawingLog::new();
        let tool = sticker_tool();

        interaction.handle(event(PointerKind::Press, 1.0, 1.0), &tool, &mut log);
        interaction.handle(event(PointerKind::Move, 2.0, 2.0), &tool, &mut log);
        interaction.handle(event(PointerKind::Release, 40.0, 50.0), &tool, &mut log);

        let stickers: Vec<&Sticker> = log.stickers().collect();
        assert_eq!(stickers.len(), 1);
        assert_eq!(stickers[0].position(), pos2(40.0, 50.0));
        assert_eq!(stickers[0].rotation(), 0.1);
    }

    #[test]
    fn marker_press_on_sticker_drags_it() {
        let mut interaction = Interaction::new();
        let mut log = DrawingLog::new();
        let id = log.commit(Sticker::new(pos2(50.0, 50.0), "🪐", 0.0, 20.0).into());

        interaction.handle(event(PointerKind::Press, 55.0, 55.0), &marker(), &mut log);
        assert_eq!(interaction.state(), InteractionState::Dragging);
        interaction.handle(event(PointerKind::Move, 70.0, 70.0), &marker(), &mut log);
        interaction.handle(event(PointerKind::Release, 80.0, 90.0), &marker(), &mut log);

        assert_eq!(log.len(), 1);
        assert_eq!(log.commands()[0].id(), id);
        let position: Option<Pos2> = log.stickers().next().map(Sticker::position);
        assert_eq!(position, Some(pos2(80.0, 90.0)));
    }

    #[test]
    fn leaving_during_drag_keeps_last_position() {
        let mut interaction = Interaction::new();
        let mut log = DrawingLog::new();
        log.commit(Sticker::new(pos2(50.0, 50.0), "🪐", 0.0, 20.0).into());

        interaction.handle(event(PointerKind::Press, 50.0, 50.0), &marker(), &mut log);
        interaction.handle(event(PointerKind::Move, 60.0, 60.0), &marker(), &mut log);
        interaction.handle(event(PointerKind::Leave, 999.0, 60.0), &marker(), &mut log);

        assert_eq!(log.stickers().next().map(Sticker::position), Some(pos2(60.0, 60.0)));
    }

    #[test]
    fn sticker_tool_never_drags() {
        let mut interaction = Interaction::new();
        let mut log = DrawingLog::new();
        log.commit(Sticker::new(pos2(50.0, 50.0), "🪐", 0.0, 20.0).into());

        interaction.handle(event(PointerKind::Press, 50.0, 50.0), &sticker_tool(), &mut log);
        assert_eq!(interaction.state(), InteractionState::Placing);
        interaction.handle(event(PointerKind::Release, 50.0, 50.0), &sticker_tool(), &mut log);
        assert_eq!(log.stickers().count(), 2);
    }

    #[test]
    fn clear_mid_gesture_returns_to_idle_on_next_move() {
        let mut interaction = Interaction::new();
        let mut log = DrawingLog::new();

        interaction.handle(event(PointerKind::Press, 0.0, 0.0), &marker(), &mut log);
        log.clear();
        assert!(!interaction.handle(event(PointerKind::Move, 1.0, 1.0), &marker(), &mut log));
        assert_eq!(interaction.state(), InteractionState::Idle);
        assert!(log.is_empty());
    }
}
