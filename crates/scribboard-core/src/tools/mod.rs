//! Tool system for the whiteboard.
//!
//! The [`ToolManager`] owns the active tool, the active color and the
//! transient session state. It turns pointer positions into elements but
//! never touches the scene; finished elements are handed back to the caller
//! for committing.

use crate::shapes::{
    Arrow, Element, ElementId, Ellipse, Rectangle, SerializableColor, Stroke, TextLabel,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Select,
    #[default]
    Pen,
    Rectangle,
    Ellipse,
    Arrow,
    Text,
}

impl ToolKind {
    /// All tools in toolbar order.
    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::Select,
            ToolKind::Pen,
            ToolKind::Rectangle,
            ToolKind::Ellipse,
            ToolKind::Arrow,
            ToolKind::Text,
        ]
    }

    /// Get display name for UI.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Pen => "pen",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Ellipse => "ellipse",
            ToolKind::Arrow => "arrow",
            ToolKind::Text => "text",
        }
    }

    /// Whether pointer-down on this tool opens a drag session.
    pub fn opens_session(self) -> bool {
        matches!(
            self,
            ToolKind::Pen | ToolKind::Rectangle | ToolKind::Ellipse | ToolKind::Arrow
        )
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for an unknown tool name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tool {0:?}")]
pub struct ParseToolError(pub String);

impl FromStr for ToolKind {
    type Err = ParseToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseToolError(s.to_string()))
    }
}

/// An element under construction between pointer-down and pointer-up.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawSession {
    tool: ToolKind,
    id: ElementId,
    color: SerializableColor,
    /// First anchor: stroke start, `corner1`, `center` or `tail`.
    anchor: Point,
    /// Second anchor for shape tools; `None` until the first move.
    current: Option<Point>,
    /// Accumulated pen points.
    points: Vec<Point>,
}

impl DrawSession {
    fn begin(tool: ToolKind, color: SerializableColor, pos: Point) -> Self {
        Self {
            tool,
            id: Uuid::new_v4(),
            color,
            anchor: pos,
            current: None,
            points: if tool == ToolKind::Pen { vec![pos] } else { Vec::new() },
        }
    }

    fn update(&mut self, pos: Point) {
        if self.tool == ToolKind::Pen {
            self.points.push(pos);
        } else {
            self.current = Some(pos);
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// The second anchor, once the pointer has moved.
    pub fn current(&self) -> Option<Point> {
        self.current
    }

    /// Pen points collected so far.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The element as it would look if committed now.
    ///
    /// `None` while a shape tool is still missing its second anchor.
    pub fn preview(&self) -> Option<Element> {
        match self.tool {
            ToolKind::Pen => Some(Element::Stroke(Stroke::with_id(
                self.id,
                self.points.clone(),
                self.color,
            ))),
            _ => self.current.and_then(|second| self.build(second)),
        }
    }

    /// Fix the second anchor and produce the finished element.
    ///
    /// Without an end position the last known second anchor is used, falling
    /// back to the first anchor for a click without a drag.
    fn finish(mut self, end: Option<Point>) -> Option<Element> {
        if self.tool == ToolKind::Pen {
            return Some(Element::Stroke(Stroke::with_id(self.id, self.points, self.color)));
        }
        if let Some(end) = end {
            self.current = Some(end);
        }
        let second = self.current.unwrap_or(self.anchor);
        self.build(second)
    }

    fn build(&self, second: Point) -> Option<Element> {
        let (id, color, first) = (self.id, self.color, self.anchor);
        match self.tool {
            ToolKind::Rectangle => Some(Element::Rectangle(Rectangle::with_id(id, first, second, color))),
            ToolKind::Ellipse => Some(Element::Ellipse(Ellipse::with_id(id, first, second, color))),
            ToolKind::Arrow => Some(Element::Arrow(Arrow::with_id(id, first, second, color))),
            ToolKind::Pen | ToolKind::Select | ToolKind::Text => None,
        }
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ToolState {
    /// Waiting for pointer-down.
    #[default]
    Idle,
    /// A drag session is open.
    Drawing(DrawSession),
    /// The Text tool was clicked; waiting for the host to deliver the label.
    AwaitingText {
        anchor: Point,
        color: SerializableColor,
    },
}

/// What happened to a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BeginOutcome {
    /// Nothing changed.
    Ignored,
    /// A drag session was opened.
    SessionOpened,
    /// The host should ask the user for text to place at `anchor`.
    TextRequested { anchor: Point },
}

/// Manages the current tool and its state.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    current_tool: ToolKind,
    /// Color applied to new elements.
    current_color: SerializableColor,
    /// Current state of the tool.
    state: ToolState,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new(ToolKind::default(), SerializableColor::black())
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new(tool: ToolKind, color: SerializableColor) -> Self {
        Self {
            current_tool: tool,
            current_color: color,
            state: ToolState::Idle,
        }
    }

    pub fn current_tool(&self) -> ToolKind {
        self.current_tool
    }

    pub fn current_color(&self) -> SerializableColor {
        self.current_color
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    /// Set the current tool.
    ///
    /// Any open session or pending text request is dropped without
    /// committing. Returns true if something was discarded.
    pub fn set_tool(&mut self, tool: ToolKind) -> bool {
        let discarded = self.cancel();
        if discarded {
            log::debug!("discarded open {} session on tool switch", self.current_tool);
        }
        self.current_tool = tool;
        discarded
    }

    /// Set the color for elements started from now on.
    pub fn set_color(&mut self, color: SerializableColor) {
        self.current_color = color;
    }

    /// Begin a tool interaction.
    pub fn begin(&mut self, pos: Point) -> BeginOutcome {
        if !self.is_idle() {
            return BeginOutcome::Ignored;
        }
        match self.current_tool {
            ToolKind::Select => BeginOutcome::Ignored,
            ToolKind::Text => {
                self.state = ToolState::AwaitingText {
                    anchor: pos,
                    color: self.current_color,
                };
                BeginOutcome::TextRequested { anchor: pos }
            }
            tool => {
                self.state = ToolState::Drawing(DrawSession::begin(tool, self.current_color, pos));
                BeginOutcome::SessionOpened
            }
        }
    }

    /// Update the open session. Returns false if no session is open.
    pub fn update(&mut self, pos: Point) -> bool {
        match &mut self.state {
            ToolState::Drawing(session) => {
                session.update(pos);
                true
            }
            _ => false,
        }
    }

    /// End the open session and return the element to commit.
    pub fn end(&mut self, pos: Option<Point>) -> Option<Element> {
        if !self.is_drawing() {
            return None;
        }
        match std::mem::take(&mut self.state) {
            ToolState::Drawing(session) => session.finish(pos),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Resolve a pending text request.
    ///
    /// Empty or missing text produces no element.
    pub fn submit_text(&mut self, text: Option<String>) -> Option<Element> {
        let ToolState::AwaitingText { anchor, color } = self.state else {
            return None;
        };
        self.state = ToolState::Idle;
        text.filter(|t| !t.is_empty())
            .map(|t| Element::Text(TextLabel::new(anchor, t, color)))
    }

    /// Cancel the current interaction. Returns true if anything was open.
    pub fn cancel(&mut self) -> bool {
        !matches!(std::mem::take(&mut self.state), ToolState::Idle)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, ToolState::Idle)
    }

    /// Check if a drag session is open.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, ToolState::Drawing(_))
    }

    pub fn is_awaiting_text(&self) -> bool {
        matches!(self.state, ToolState::AwaitingText { .. })
    }

    /// Get the open session, if any.
    pub fn session(&self) -> Option<&DrawSession> {
        match &self.state {
            ToolState::Drawing(session) => Some(session),
            _ => None,
        }
    }

    /// Get the preview element for the current interaction.
    pub fn preview(&self) -> Option<Element> {
        self.session().and_then(DrawSession::preview)
    }
}
