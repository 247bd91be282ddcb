use egui::{Color32, Pos2, pos2};
use sticker_sketchpad::{
    ActiveTool, DrawCommand, DrawingLog, Interaction, InteractionState, PointerEvent, PointerKind,
};

fn marker() -> ActiveTool {
    ActiveTool::Marker {
        thickness: 2.0,
        color: Color32::BLUE,
    }
}

fn sticker_tool() -> ActiveTool {
    ActiveTool::Sticker {
        glyph: "⭐".to_owned(),
        rotation: 0.1,
        size: 20.0,
    }
}

fn send(interaction: &mut Interaction, log: &mut DrawingLog, tool: &ActiveTool, kind: PointerKind, p: Pos2) -> bool {
    interaction.handle(PointerEvent::new(kind, p), tool, log)
}

#[test]
fn test_press_drag_release_commits_one_stroke() {
    let mut log = DrawingLog::new();
    let mut interaction = Interaction::new();
    let tool = marker();

    send(&mut interaction, &mut log, &tool, PointerKind::Press, pos2(10.0, 10.0));
    assert_eq!(interaction.state(), InteractionState::Drawing);
    send(&mut interaction, &mut log, &tool, PointerKind::Move, pos2(20.0, 10.0));
    send(&mut interaction, &mut log, &tool, PointerKind::Move, pos2(30.0, 10.0));
    assert!(log.is_empty());
    send(&mut interaction, &mut log, &tool, PointerKind::Release, pos2(40.0, 10.0));

    assert_eq!(interaction.state(), InteractionState::Idle);
    assert_eq!(log.len(), 1);
    let DrawCommand::Stroke(stroke) = &log.commands()[0] else {
        panic!("expected a stroke");
    };
    assert_eq!(stroke.points().first(), Some(&pos2(10.0, 10.0)));
    assert_eq!(stroke.points().last(), Some(&pos2(40.0, 10.0)));
}

#[test]
fn test_sticker_placement_and_leave() {
    let mut log = DrawingLog::new();
    let mut interaction = Interaction::new();
    let tool = sticker_tool();

    // Leaving discards the ghost
    send(&mut interaction, &mut log, &tool, PointerKind::Press, pos2(50.0, 50.0));
    assert_eq!(interaction.state(), InteractionState::Placing);
    send(&mut interaction, &mut log, &tool, PointerKind::Leave, pos2(60.0, 60.0));
    assert!(log.is_empty());
    assert!(log.in_progress().is_none());

    // Releasing places it where the pointer ended up
    send(&mut interaction, &mut log, &tool, PointerKind::Press, pos2(50.0, 50.0));
    send(&mut interaction, &mut log, &tool, PointerKind::Move, pos2(70.0, 80.0));
    send(&mut interaction, &mut log, &tool, PointerKind::Release, pos2(70.0, 80.0));
    let sticker = log.commands()[0].as_sticker().expect("sticker committed");
    assert_eq!(sticker.position(), pos2(70.0, 80.0));
    assert_eq!(sticker.rotation(), 0.1);
}

#[test]
fn test_marker_drags_existing_sticker_to_the_top() {
    let mut log = DrawingLog::new();
    let mut interaction = Interaction::new();

    send(&mut interaction, &mut log, &sticker_tool(), PointerKind::Press, pos2(50.0, 50.0));
    send(&mut interaction, &mut log, &sticker_tool(), PointerKind::Release, pos2(50.0, 50.0));
    send(&mut interaction, &mut log, &marker(), PointerKind::Press, pos2(0.0, 0.0));
    send(&mut interaction, &mut log, &marker(), PointerKind::Release, pos2(100.0, 100.0));
    assert_eq!(log.len(), 2);
    let sticker_id = log.commands()[0].id();

    send(&mut interaction, &mut log, &marker(), PointerKind::Press, pos2(55.0, 55.0));
    assert_eq!(interaction.state(), InteractionState::Dragging);
    send(&mut interaction, &mut log, &marker(), PointerKind::Move, pos2(120.0, 30.0));
    send(&mut interaction, &mut log, &marker(), PointerKind::Leave, pos2(300.0, 300.0));

    // Moved, not duplicated, and now drawn last
    assert_eq!(log.len(), 2);
    assert_eq!(log.stickers().count(), 1);
    let moved = &log.commands()[1];
    assert_eq!(moved.id(), sticker_id);
    assert_eq!(moved.as_sticker().map(|s| s.position()), Some(pos2(120.0, 30.0)));
}

#[test]
fn test_sticker_tool_never_drags() {
    let mut log = DrawingLog::new();
    let mut interaction = Interaction::new();
    let tool = sticker_tool();

    send(&mut interaction, &mut log, &tool, PointerKind::Press, pos2(50.0, 50.0));
    send(&mut interaction, &mut log, &tool, PointerKind::Release, pos2(50.0, 50.0));
    send(&mut interaction, &mut log, &tool, PointerKind::Press, pos2(50.0, 50.0));
    assert_eq!(interaction.state(), InteractionState::Placing);
    send(&mut interaction, &mut log, &tool, PointerKind::Release, pos2(51.0, 51.0));

    assert_eq!(log.stickers().count(), 2);
}

#[test]
fn test_events_while_idle_are_ignored() {
    let mut log = DrawingLog::new();
    let mut interaction = Interaction::new();
    let tool = marker();

    assert!(!send(&mut interaction, &mut log, &tool, PointerKind::Move, pos2(1.0, 1.0)));
    assert!(!send(&mut interaction, &mut log, &tool, PointerKind::Release, pos2(1.0, 1.0)));
    assert!(!send(&mut interaction, &mut log, &tool, PointerKind::Leave, pos2(1.0, 1.0)));
    assert!(log.is_empty());
    assert_eq!(log.revision(), 0);
}

#[test]
fn test_undoing_a_drag_keeps_the_sticker() {
    let mut log = DrawingLog::new();
    let mut interaction = Interaction::new();
    let tool = marker();
    log.commit(sticker_sketchpad::Sticker::new(pos2(50.0, 50.0), "⭐", 0.0, 20.0).into());

    send(&mut interaction, &mut log, &tool, PointerKind::Press, pos2(50.0, 50.0));
    send(&mut interaction, &mut log, &tool, PointerKind::Move, pos2(70.0, 70.0));
    send(&mut interaction, &mut log, &tool, PointerKind::Release, pos2(90.0, 90.0));
    assert_eq!(log.stickers().next().map(|s| s.position()), Some(pos2(90.0, 90.0)));

    assert!(log.undo());
    assert_eq!(log.stickers().count(), 1);
    assert_eq!(log.stickers().next().map(|s| s.position()), Some(pos2(50.0, 50.0)));

    // Undoing again removes the original placement
    assert!(log.undo());
    assert!(log.is_empty());
}

#[test]
fn test_click_on_sticker_center_changes_nothing() {
    let mut log = DrawingLog::new();
    let mut interaction = Interaction::new();
    let tool = marker();
    let first = log.commit(sticker_sketchpad::Sticker::new(pos2(50.0, 50.0), "⭐", 0.0, 20.0).into());
    log.commit(sticker_sketchpad::Stroke::from_points(vec![pos2(0.0, 0.0), pos2(9.0, 9.0)], 2.0, Color32::RED).into());
    log.undo();

    send(&mut interaction, &mut log, &tool, PointerKind::Press, pos2(50.0, 50.0));
    send(&mut interaction, &mut log, &tool, PointerKind::Release, pos2(50.0, 50.0));

    assert_eq!(log.commands()[0].id(), first);
    assert!(log.can_redo());
}
