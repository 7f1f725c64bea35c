//! Pointer input normalization and session sequencing.

use crate::shapes::Element;
use crate::tools::{BeginOutcome, ToolManager};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Pointer event in client (screen) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    /// The pointer left the canvas element.
    Leave,
}

/// Result of feeding one pointer event to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerAction {
    /// Stray or disallowed event; nothing changed.
    Ignored,
    /// The in-progress element changed and should be redrawn.
    Redraw,
    /// A session finished; the element must be committed.
    Commit(Element),
    /// A session finished without producing an element.
    Discarded,
    /// The Text tool wants a label for `anchor`.
    TextRequested { anchor: Point },
}

/// Converts client coordinates into canvas-local ones and sequences
/// start/move/end events into tool sessions.
#[derive(Debug, Clone)]
pub struct PointerInputController {
    /// Screen offset of the canvas' bounding rect.
    origin: Point,
    /// Canvas size in canvas units.
    size: Size,
    /// Last in-bounds canvas-local pointer position.
    last_position: Option<Point>,
}

impl PointerInputController {
    pub fn new(size: Size) -> Self {
        Self {
            origin: Point::ZERO,
            size,
            last_position: None,
        }
    }

    /// Update the canvas' screen offset (e.g. after layout or scroll).
    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn canvas_origin(&self) -> Point {
        self.origin
    }

    pub fn canvas_rect(&self) -> Rect {
        self.size.to_rect()
    }

    pub fn last_position(&self) -> Option<Point> {
        self.last_position
    }

    /// Convert a client position into canvas-local coordinates.
    pub fn to_local(&self, client: Point) -> Point {
        client - self.origin.to_vec2()
    }

    /// Whether a canvas-local position lies on the canvas.
    pub fn contains(&self, local: Point) -> bool {
        local.x >= 0.0 && local.y >= 0.0 && local.x <= self.size.width && local.y <= self.size.height
    }

    /// Pointer pressed at canvas-local `pos`.
    pub fn on_start(&mut self, pos: Point, tools: &mut ToolManager) -> PointerAction {
        if !self.contains(pos) {
            return PointerAction::Ignored;
        }
        match tools.begin(pos) {
            BeginOutcome::Ignored => PointerAction::Ignored,
            BeginOutcome::SessionOpened => {
                self.last_position = Some(pos);
                log::debug!("{} session opened at ({}, {})", tools.current_tool(), pos.x, pos.y);
                PointerAction::Redraw
            }
            BeginOutcome::TextRequested { anchor } => {
                self.last_position = Some(pos);
                PointerAction::TextRequested { anchor }
            }
        }
    }

    /// Pointer moved to canvas-local `pos`.
    ///
    /// Leaving the canvas bounds mid-drag ends the session at the last
    /// in-bounds position.
    pub fn on_move(&mut self, pos: Point, tools: &mut ToolManager) -> PointerAction {
        if !tools.is_drawing() {
            return PointerAction::Ignored;
        }
        if !self.contains(pos) {
            log::debug!("pointer left canvas mid-draw; finalizing session");
            return self.on_end(None, tools);
        }
        self.last_position = Some(pos);
        tools.update(pos);
        PointerAction::Redraw
    }

    /// Pointer released, at `pos` when known.
    pub fn on_end(&mut self, pos: Option<Point>, tools: &mut ToolManager) -> PointerAction {
        if !tools.is_drawing() {
            return PointerAction::Ignored;
        }
        let end = match pos {
            Some(p) if self.contains(p) => Some(p),
            _ => self.last_position,
        };
        if let Some(p) = end {
            self.last_position = Some(p);
        }
        match tools.end(end) {
            Some(element) => PointerAction::Commit(element),
            None => PointerAction::Discarded,
        }
    }

    /// Pointer left the canvas element.
    pub fn on_leave(&mut self, tools: &mut ToolManager) -> PointerAction {
        self.on_end(None, tools)
    }

    /// Translate a client-space event and dispatch it.
    pub fn handle(&mut self, event: PointerEvent, tools: &mut ToolManager) -> PointerAction {
        match event {
            PointerEvent::Down { x, y } => self.on_start(self.to_local(Point::new(x, y)), tools),
            PointerEvent::Move { x, y } => self.on_move(self.to_local(Point::new(x, y)), tools),
            PointerEvent::Up { x, y } => self.on_end(Some(self.to_local(Point::new(x, y))), tools),
            PointerEvent::Leave => self.on_leave(tools),
        }
    }

    /// Offset between client and canvas space.
    pub fn offset(&self) -> Vec2 {
        self.origin.to_vec2()
    }
}
