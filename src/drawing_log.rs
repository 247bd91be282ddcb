use egui::Pos2;
use log::debug;

use crate::command::{CommandId, DrawCommand};
use crate::sticker::Sticker;
use crate::surface::Surface;

/// Where a dragged sticker came from, so undoing the drag can put it back.
#[derive(Debug, Clone, PartialEq)]
struct StickerMove {
    index: usize,
    from: Pos2,
    /// The move that had placed the sticker at `index`, if any
    previous: Option<Box<StickerMove>>,
}

/// The authoritative, ordered history of everything drawn on the canvas.
///
/// Order of `commands()` is z-order: later entries are drawn on top. Undone
/// commands sit in a redo buffer until they are redone or a new commit
/// discards them. At most one uncommitted command (a stroke being drawn, a
/// sticker being placed or dragged) is tracked next to the history; it is
/// drawn last but never part of it.
///
/// Dragging a sticker is one undoable step: the sticker goes to the top at
/// its new position, and undo puts it back where it was.
///
/// Every mutation bumps [`DrawingLog::revision`], which is how the UI knows a
/// redraw is due.
#[derive(Debug, Default)]
pub struct DrawingLog {
    committed: Vec<DrawCommand>,
    /// Parallel to `committed`
    moves: Vec<Option<StickerMove>>,
    redo_buffer: Vec<DrawCommand>,
    /// Parallel to `redo_buffer`
    redo_moves: Vec<Option<StickerMove>>,
    in_progress: Option<DrawCommand>,
    /// Set while the in-progress command is a lifted sticker
    lifted: Option<StickerMove>,
    revision: u64,
}

impl DrawingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `command` to the history and drop the redo buffer.
    ///
    /// A sticker preview is stored as the sticker it stands for.
    pub fn commit(&mut self, command: DrawCommand) -> CommandId {
        self.commit_entry(command, None)
    }

    fn commit_entry(&mut self, command: DrawCommand, moved: Option<StickerMove>) -> CommandId {
        let command = command.into_committed();
        let id = command.id();
        debug!("commit {} {:?}", command.kind(), id);

        self.committed.push(command);
        self.moves.push(moved);
        if !self.redo_buffer.is_empty() {
            debug!("discarding {} redoable command(s)", self.redo_buffer.len());
            self.redo_buffer.clear();
            self.redo_moves.clear();
        }
        self.bump();
        id
    }

    /// Move the newest command to the redo buffer. Returns false when there
    /// was nothing to undo.
    ///
    /// Undoing a sticker drag puts the sticker back at its old slot and
    /// position instead of removing it.
    pub fn undo(&mut self) -> bool {
        let Some(command) = self.committed.pop() else {
            return false;
        };
        let moved = self.moves.pop().flatten();
        debug!("undo {} {:?}", command.kind(), command.id());

        if let (Some(mv), Some(sticker)) = (&moved, command.as_sticker()) {
            let mut restored = sticker.clone();
            restored.reposition(mv.from);
            let index = mv.index.min(self.committed.len());
            self.committed.insert(index, restored.into());
            self.moves.insert(index, mv.previous.as_deref().cloned());
        }

        self.redo_buffer.push(command);
        self.redo_moves.push(moved);
        self.bump();
        true
    }

    /// Put the most recently undone command back on top. Returns false when
    /// the redo buffer is empty.
    pub fn redo(&mut self) -> bool {
        let Some(command) = self.redo_buffer.pop() else {
            return false;
        };
        let moved = self.redo_moves.pop().flatten();
        debug!("redo {} {:?}", command.kind(), command.id());

        if moved.is_some() {
            // Take the sticker out of the slot undo put it back into
            let id = command.id();
            if let Some(index) = self.committed.iter().rposition(|c| c.id() == id) {
                self.committed.remove(index);
                self.moves.remove(index);
            }
        }

        self.committed.push(command);
        self.moves.push(moved);
        self.bump();
        true
    }

    /// Forget everything: history, redo buffer and any in-progress command.
    pub fn clear(&mut self) {
        debug!(
            "clear ({} committed, {} redoable)",
            self.committed.len(),
            self.redo_buffer.len()
        );
        self.committed.clear();
        self.moves.clear();
        self.redo_buffer.clear();
        self.redo_moves.clear();
        self.in_progress = None;
        self.lifted = None;
        self.bump();
    }

    /// Redraw `surface` from scratch: every committed command oldest first,
    /// then the in-progress command on top.
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear();
        self.render_committed(surface);
        if let Some(command) = &self.in_progress {
            command.render(surface);
        }
    }

    /// Replay only the committed history, without clearing first.
    pub fn render_committed(&self, surface: &mut dyn Surface) {
        for command in &self.committed {
            command.render(surface);
        }
    }

    /// Index of the topmost committed sticker containing `point`.
    pub fn hit_sticker(&self, point: Pos2) -> Option<usize> {
        self.committed
            .iter()
            .rposition(|command| command.as_sticker().is_some_and(|s| s.contains_point(point)))
    }

    /// Lift the sticker at `index` out of the history so it can be dragged.
    /// It becomes the in-progress command. Finishing puts it on top if it
    /// moved, or back into its slot if it did not.
    pub fn lift_sticker(&mut self, index: usize) -> Option<CommandId> {
        let from = self.committed.get(index)?.as_sticker()?.position();
        self.restore_lifted();

        let command = self.committed.remove(index);
        let previous = self.moves.remove(index).map(Box::new);
        let id = command.id();
        debug!("lift sticker {id:?} from position {index}");
        self.in_progress = Some(command);
        self.lifted = Some(StickerMove { index, from, previous });
        self.bump();
        Some(id)
    }

    /// Make `command` the in-progress command, replacing any previous one.
    pub fn begin(&mut self, command: DrawCommand) {
        self.restore_lifted();
        if let Some(previous) = self.in_progress.replace(command) {
            debug!("replaced unfinished {} {:?}", previous.kind(), previous.id());
        }
        self.bump();
    }

    /// Mutate the in-progress command, if there is one.
    pub fn update_in_progress<R>(&mut self, f: impl FnOnce(&mut DrawCommand) -> R) -> Option<R> {
        let result = f(self.in_progress.as_mut()?);
        self.bump();
        Some(result)
    }

    /// Commit the in-progress command.
    ///
    /// A lifted sticker that was not moved goes back into its old slot
    /// without touching the redo buffer.
    pub fn finish(&mut self) -> Option<CommandId> {
        let command = self.in_progress.take()?;
        let Some(mv) = self.lifted.take() else {
            return Some(self.commit(command));
        };

        let unmoved = command.as_sticker().is_some_and(|s| s.position() == mv.from);
        if unmoved {
            let id = command.id();
            self.put_back(command, mv);
            Some(id)
        } else {
            Some(self.commit_entry(command, Some(mv)))
        }
    }

    /// Drop the in-progress command without committing it. A lifted sticker
    /// is put back where it was instead, and `None` is returned.
    pub fn cancel(&mut self) -> Option<DrawCommand> {
        let command = self.in_progress.take()?;
        if let Some(mv) = self.lifted.take() {
            self.put_back(command, mv);
            return None;
        }
        debug!("cancel {} {:?}", command.kind(), command.id());
        self.bump();
        Some(command)
    }

    fn restore_lifted(&mut self) {
        if let (Some(mv), Some(command)) = (self.lifted.take(), self.in_progress.take()) {
            self.put_back(command, mv);
        }
    }

    fn put_back(&mut self, mut command: DrawCommand, mv: StickerMove) {
        command.drag_to(mv.from);
        let index = mv.index.min(self.committed.len());
        debug!("put sticker {:?} back at position {index}", command.id());
        self.committed.insert(index, command);
        self.moves.insert(index, mv.previous.map(|previous| *previous));
        self.bump();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.committed
    }

    /// Undone commands, most recently undone last.
    pub fn redo_buffer(&self) -> &[DrawCommand] {
        &self.redo_buffer
    }

    pub fn in_progress(&self) -> Option<&DrawCommand> {
        self.in_progress.as_ref()
    }

    pub fn stickers(&self) -> impl Iterator<Item = &Sticker> {
        self.committed.iter().filter_map(DrawCommand::as_sticker)
    }

    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_buffer.is_empty()
    }

    /// Changes whenever the log is mutated.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
