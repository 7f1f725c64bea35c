//! The whiteboard instance: sole owner of scene, history and tool state.

use crate::config::WhiteboardConfig;
use crate::history::HistoryManager;
use crate::input::{PointerAction, PointerEvent, PointerInputController};
use crate::scene::Scene;
use crate::shapes::{Element, SerializableColor};
use crate::tools::{ToolKind, ToolManager};
use kurbo::Point;

/// What the host should do after an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventOutcome {
    /// Nothing visible changed.
    Ignored,
    /// Scene or live element changed; rerun the render pipeline.
    Redraw,
    /// Ask the user for a text label, then call [`Whiteboard::submit_text`].
    TextRequested { anchor: Point },
}

impl EventOutcome {
    pub fn needs_redraw(self) -> bool {
        matches!(self, EventOutcome::Redraw)
    }
}

/// A drawing surface.
///
/// Scene and history are created together with a single empty snapshot and
/// live as long as the whiteboard. All mutation goes through the pointer and
/// toolbar methods below.
#[derive(Debug, Clone)]
pub struct Whiteboard {
    config: WhiteboardConfig,
    scene: Scene,
    history: HistoryManager,
    tools: ToolManager,
    input: PointerInputController,
}

impl Default for Whiteboard {
    fn default() -> Self {
        Self::new(WhiteboardConfig::default())
    }
}

impl Whiteboard {
    /// Create a whiteboard with an empty scene.
    pub fn new(config: WhiteboardConfig) -> Self {
        let scene = Scene::new();
        let history = HistoryManager::new(scene.clone()).with_limit(config.history_limit);
        let tools = ToolManager::new(config.initial_tool, config.initial_color);
        let input = PointerInputController::new(config.size());
        log::debug!(
            "whiteboard {:?} created ({}x{}, tool={})",
            config.title,
            config.width,
            config.height,
            config.initial_tool
        );
        Self {
            config,
            scene,
            history,
            tools,
            input,
        }
    }

    pub fn config(&self) -> &WhiteboardConfig {
        &self.config
    }

    /// The committed elements currently displayed.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool()
    }

    pub fn color(&self) -> SerializableColor {
        self.tools.current_color()
    }

    /// The uncommitted element being drawn, if it has enough geometry.
    pub fn live_element(&self) -> Option<Element> {
        self.tools.preview()
    }

    pub fn is_drawing(&self) -> bool {
        self.tools.is_drawing()
    }

    pub fn is_awaiting_text(&self) -> bool {
        self.tools.is_awaiting_text()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Pointer boundary ---

    /// Update the canvas' screen offset used to localize client coordinates.
    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.input.set_canvas_origin(origin);
    }

    pub fn pointer_down(&mut self, client: Point) -> EventOutcome {
        self.handle_pointer(PointerEvent::Down {
            x: client.x,
            y: client.y,
        })
    }

    pub fn pointer_move(&mut self, client: Point) -> EventOutcome {
        self.handle_pointer(PointerEvent::Move {
            x: client.x,
            y: client.y,
        })
    }

    pub fn pointer_up(&mut self, client: Point) -> EventOutcome {
        self.handle_pointer(PointerEvent::Up {
            x: client.x,
            y: client.y,
        })
    }

    pub fn pointer_leave(&mut self) -> EventOutcome {
        self.handle_pointer(PointerEvent::Leave)
    }

    /// Feed one client-space pointer event through the input controller.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> EventOutcome {
        match self.input.handle(event, &mut self.tools) {
            PointerAction::Ignored => EventOutcome::Ignored,
            PointerAction::Redraw | PointerAction::Discarded => EventOutcome::Redraw,
            PointerAction::Commit(element) => {
                self.commit(element);
                EventOutcome::Redraw
            }
            PointerAction::TextRequested { anchor } => EventOutcome::TextRequested { anchor },
        }
    }

    /// Deliver the answer to a text request; `None` means cancelled.
    pub fn submit_text(&mut self, text: Option<String>) -> EventOutcome {
        if !self.tools.is_awaiting_text() {
            return EventOutcome::Ignored;
        }
        match self.tools.submit_text(text) {
            Some(element) => {
                self.commit(element);
                EventOutcome::Redraw
            }
            None => {
                log::debug!("text request cancelled");
                EventOutcome::Ignored
            }
        }
    }

    // --- Toolbar boundary ---

    /// Switch tools, discarding any open session.
    pub fn select_tool(&mut self, tool: ToolKind) -> EventOutcome {
        let discarded = self.tools.set_tool(tool);
        log::debug!("tool -> {}", tool);
        if discarded {
            EventOutcome::Redraw
        } else {
            EventOutcome::Ignored
        }
    }

    pub fn set_color(&mut self, color: SerializableColor) {
        self.tools.set_color(color);
    }

    /// Step back one snapshot. Returns true if the scene changed.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(scene) => {
                self.scene = scene.clone();
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot. Returns true if the scene changed.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(scene) => {
                self.scene = scene.clone();
                true
            }
            None => false,
        }
    }

    /// Replace the scene with an empty one. Undoable like any commit.
    pub fn clear(&mut self) {
        self.replace_scene(Scene::new());
    }

    fn commit(&mut self, element: Element) {
        log::debug!("commit {} (scene now {} elements)", element.kind_name(), self.scene.len() + 1);
        let next = self.scene.with_appended(element);
        self.replace_scene(next);
    }

    fn replace_scene(&mut self, scene: Scene) {
        self.history.commit(scene.clone());
        self.scene = scene;
    }
}
