//! # Drag Reordering
//!
//! Turns a drag gesture over the rendered block list into a full id
//! sequence for `reorderBlocks`.
//!
//! ```text
//! start(id, pointer) → move_to(pointer)* → drop_into(store)
//!                          ↓
//!              closest_center → over id
//! ```
//!
//! Reordering works on ids, never indices, so a property edit that lands
//! mid-drag cannot shift the target.

use crate::commands::{CommandOutcome, MutationError};
use crate::store::EditorStore;
use funnel_model::BlockId;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance_squared(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Layout box of a rendered block
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Drop target whose center is nearest to `point`; ties go to the earlier rect
pub fn closest_center(point: Point, rects: &[(BlockId, Rect)]) -> Option<&BlockId> {
    rects
        .iter()
        .map(|(id, rect)| (id, point.distance_squared(rect.center())))
        .fold(None, |best: Option<(&BlockId, f64)>, (id, distance)| match best {
            Some((_, best_distance)) if best_distance <= distance => best,
            _ => Some((id, distance)),
        })
        .map(|(id, _)| id)
}

/// Move `active` to the position of `over`, shifting the blocks between.
/// `None` when nothing would change.
pub fn move_id(ids: &[BlockId], active: &BlockId, over: &BlockId) -> Option<Vec<BlockId>> {
    if active == over {
        return None;
    }
    let from = ids.iter().position(|id| id == active)?;
    let to = ids.iter().position(|id| id == over)?;

    let mut next = ids.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    Some(next)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardMove {
    Up,
    Down,
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    id: BlockId,
    origin: Point,
    pointer: Point,
    over: Option<BlockId>,
}

/// Pointer/keyboard drag state for one block list
#[derive(Debug, Clone, Default)]
pub struct DragController {
    layout: Vec<(BlockId, Rect)>,
    active: Option<ActiveDrag>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the measured block boxes, in render order
    pub fn set_layout(&mut self, layout: Vec<(BlockId, Rect)>) {
        self.layout = layout;
    }

    pub fn active(&self) -> Option<&BlockId> {
        self.active.as_ref().map(|drag| &drag.id)
    }

    pub fn over(&self) -> Option<&BlockId> {
        self.active.as_ref().and_then(|drag| drag.over.as_ref())
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Pick up `id`. Returns false if the block has no layout box.
    pub fn start(&mut self, id: BlockId, pointer: Point) -> bool {
        if !self.layout.iter().any(|(candidate, _)| candidate == &id) {
            return false;
        }

        tracing::debug!(id = %id, "Drag started");
        self.active = Some(ActiveDrag {
            over: Some(id.clone()),
            id,
            origin: pointer,
            pointer,
        });
        true
    }

    /// Track the pointer; returns the block currently under the dragged one
    pub fn move_to(&mut self, pointer: Point) -> Option<&BlockId> {
        let layout = &self.layout;
        let drag = self.active.as_mut()?;
        drag.pointer = pointer;

        let (_, rect) = layout.iter().find(|(id, _)| id == &drag.id)?;
        let dragged = rect.translate(pointer.x - drag.origin.x, pointer.y - drag.origin.y);
        drag.over = closest_center(dragged.center(), layout).cloned();
        drag.over.as_ref()
    }

    /// Abandon the drag without reordering
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Finish the drag against `ids`; `None` for a drop in place or
    /// outside any target
    pub fn end(&mut self, ids: &[BlockId]) -> Option<Vec<BlockId>> {
        let drag = self.active.take()?;
        let over = drag.over?;
        move_id(ids, &drag.id, &over)
    }

    /// Finish the drag and submit the new sequence to `store`
    pub fn drop_into(&mut self, store: &mut EditorStore) -> Result<CommandOutcome, MutationError> {
        match self.end(&store.block_ids()) {
            Some(sequence) => {
                store.reorder_blocks(&sequence)?;
                Ok(CommandOutcome::Applied)
            }
            None => Ok(CommandOutcome::Ignored),
        }
    }
}

/// Sequence with `id` shifted one slot up or down
pub fn keyboard_move(ids: &[BlockId], id: &BlockId, direction: KeyboardMove) -> Option<Vec<BlockId>> {
    let index = ids.iter().position(|candidate| candidate == id)?;
    let target = match direction {
        KeyboardMove::Up => index.checked_sub(1)?,
        KeyboardMove::Down => index + 1,
    };
    let over = ids.get(target)?;
    move_id(ids, id, over)
}
