//! Headless application shell.

use crate::script::{Script, ScriptEvent};
use scribboard_core::{ConfigError, EventOutcome, Point, Whiteboard, WhiteboardConfig};
use scribboard_render::{export::sanitize_title, ExportService, RendererError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("Failed to serialize scene: {0}")]
    SceneDump(#[source] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// Files written by one export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPaths {
    pub png: PathBuf,
    pub scene: PathBuf,
}

/// Drives a whiteboard from script events and writes exports to a directory.
pub struct App {
    board: Whiteboard,
    exporter: ExportService,
    out_dir: PathBuf,
    exports: Vec<ExportPaths>,
    /// File stems already written during this run.
    used_stems: HashSet<String>,
    /// Events that changed what a host would display.
    redraws: usize,
}

impl App {
    /// Create the whiteboard for `config`. Fails if the configured font
    /// cannot be loaded.
    pub fn new(config: WhiteboardConfig, out_dir: impl Into<PathBuf>) -> AppResult<Self> {
        let board = Whiteboard::new(config);
        let exporter = ExportService::for_whiteboard(&board)?;
        Ok(Self {
            board,
            exporter,
            out_dir: out_dir.into(),
            exports: Vec::new(),
            used_stems: HashSet::new(),
            redraws: 0,
        })
    }

    pub fn board(&self) -> &Whiteboard {
        &self.board
    }

    pub fn exports(&self) -> &[ExportPaths] {
        &self.exports
    }

    /// Number of applied events that asked the host to redraw.
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    /// Apply one event to the whiteboard.
    pub fn apply(&mut self, event: &ScriptEvent) -> AppResult<()> {
        let outcome = match event {
            ScriptEvent::CanvasOrigin { x, y } => {
                self.board.set_canvas_origin(Point::new(*x, *y));
                EventOutcome::Ignored
            }
            ScriptEvent::SelectTool { tool } => self.board.select_tool(*tool),
            ScriptEvent::SetColor { color } => {
                self.board.set_color(*color);
                EventOutcome::Ignored
            }
            ScriptEvent::PointerDown { x, y } => self.board.pointer_down(Point::new(*x, *y)),
            ScriptEvent::PointerMove { x, y } => self.board.pointer_move(Point::new(*x, *y)),
            ScriptEvent::PointerUp { x, y } => self.board.pointer_up(Point::new(*x, *y)),
            ScriptEvent::PointerLeave => self.board.pointer_leave(),
            ScriptEvent::Text { text } => self.board.submit_text(Some(text.clone())),
            ScriptEvent::CancelText => self.board.submit_text(None),
            ScriptEvent::Undo => redraw_if(self.board.undo()),
            ScriptEvent::Redo => redraw_if(self.board.redo()),
            ScriptEvent::Clear => {
                self.board.clear();
                EventOutcome::Redraw
            }
            ScriptEvent::Export { name } => {
                self.export(name.as_deref())?;
                EventOutcome::Ignored
            }
        };
        match outcome {
            EventOutcome::TextRequested { anchor } => {
                log::debug!("text requested at ({}, {})", anchor.x, anchor.y);
            }
            outcome if outcome.needs_redraw() => {
                self.redraws += 1;
                log::trace!("redraw #{} after {:?}", self.redraws, event);
            }
            _ => {}
        }
        Ok(())
    }

    /// Replay every event in order. Exports once at the end when the script
    /// never asks for one.
    pub fn run(&mut self, script: &Script) -> AppResult<&[ExportPaths]> {
        for event in &script.events {
            self.apply(event)?;
        }
        if !script.has_export() {
            self.export(None)?;
        }
        Ok(&self.exports)
    }

    /// Write the current scene as `<stem>.png` and `<stem>.scene.json`.
    ///
    /// A stem already written during this run gets the first free numeric
    /// suffix, so no export overwrites an earlier one.
    pub fn export(&mut self, name: Option<&str>) -> AppResult<ExportPaths> {
        let base = sanitize_title(name.unwrap_or(&self.board.config().title));
        let mut stem = base.clone();
        let mut n = 1;
        while self.used_stems.contains(&stem) {
            n += 1;
            stem = format!("{base}-{n}");
        }
        self.used_stems.insert(stem.clone());

        std::fs::create_dir_all(&self.out_dir)?;
        let mut image = self.exporter.export(&self.board)?;
        image.filename = format!("{stem}.png");
        let png = image.save_to(&self.out_dir)?;

        let scene = self.out_dir.join(format!("{stem}.scene.json"));
        let json = self.board.scene().to_json().map_err(AppError::SceneDump)?;
        std::fs::write(&scene, json)?;
        log::info!("Wrote scene to {}", scene.display());

        let paths = ExportPaths { png, scene };
        self.exports.push(paths.clone());
        Ok(paths)
    }
}

fn redraw_if(changed: bool) -> EventOutcome {
    if changed {
        EventOutcome::Redraw
    } else {
        EventOutcome::Ignored
    }
}

/// Load `config` and `script`, replay, and write exports into `out_dir`.
pub fn run_files(config: &Path, script: &Path, out_dir: &Path) -> AppResult<Vec<ExportPaths>> {
    let config = WhiteboardConfig::load(config)?;
    let script = Script::load(script)?;
    let mut app = App::new(config, out_dir)?;
    Ok(app.run(&script)?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribboard_core::ToolKind;

    fn app(dir: &Path) -> App {
        let config = WhiteboardConfig {
            title: "Team Board".to_string(),
            width: 64,
            height: 48,
            ..WhiteboardConfig::default()
        };
        App::new(config, dir).unwrap()
    }

    #[test]
    fn test_events_drive_board() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        for event in [
            ScriptEvent::SelectTool { tool: ToolKind::Rectangle },
            ScriptEvent::PointerDown { x: 2.0, y: 2.0 },
            ScriptEvent::PointerMove { x: 30.0, y: 20.0 },
            ScriptEvent::PointerUp { x: 30.0, y: 20.0 },
            ScriptEvent::Undo,
            ScriptEvent::Redo,
        ] {
            app.apply(&event).unwrap();
        }
        assert_eq!(app.board().scene().len(), 1);
        assert!(app.exports().is_empty());
        assert_eq!(app.redraw_count(), 5);
    }

    #[test]
    fn test_quiet_events_do_not_count_redraws() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        for event in [
            ScriptEvent::CanvasOrigin { x: 4.0, y: 4.0 },
            ScriptEvent::Undo,
            ScriptEvent::PointerMove { x: 9.0, y: 9.0 },
            ScriptEvent::SelectTool { tool: ToolKind::Text },
            ScriptEvent::PointerDown { x: 9.0, y: 9.0 },
        ] {
            app.apply(&event).unwrap();
        }
        assert_eq!(app.redraw_count(), 0);
    }

    #[test]
    fn test_text_events() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.apply(&ScriptEvent::SelectTool { tool: ToolKind::Text }).unwrap();
        app.apply(&ScriptEvent::PointerDown { x: 5.0, y: 5.0 }).unwrap();
        app.apply(&ScriptEvent::CancelText).unwrap();
        app.apply(&ScriptEvent::PointerDown { x: 5.0, y: 5.0 }).unwrap();
        app.apply(&ScriptEvent::Text { text: "ok".into() }).unwrap();
        assert_eq!(app.board().scene().len(), 1);
    }

    #[test]
    fn test_export_writes_png_and_scene() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        let first = app.export(None).unwrap();
        let second = app.export(None).unwrap();

        assert_eq!(first.png, dir.path().join("team_board.png"));
        assert_eq!(first.scene, dir.path().join("team_board.scene.json"));
        assert_eq!(second.png, dir.path().join("team_board-2.png"));
        assert!(first.png.exists());
        assert!(second.scene.exists());
    }

    #[test]
    fn test_explicit_name_never_overwrites_suffixed_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.export(None).unwrap();
        let suffixed = app.export(None).unwrap();
        let named = app.export(Some("team_board-2")).unwrap();

        assert_eq!(suffixed.png, dir.path().join("team_board-2.png"));
        assert_ne!(named.png, suffixed.png);
        assert_eq!(named.png, dir.path().join("team_board-2-2.png"));
        assert_eq!(app.export(None).unwrap().png, dir.path().join("team_board-3.png"));
    }

    #[test]
    fn test_scene_dump_error_is_not_a_script_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AppError::SceneDump(source);
        assert!(err.to_string().starts_with("Failed to serialize scene"));
    }

    #[test]
    fn test_run_exports_at_end_without_export_event() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        let script = Script {
            events: vec![ScriptEvent::Clear],
        };
        let exports = app.run(&script).unwrap();
        assert_eq!(exports.len(), 1);
        assert!(exports[0].png.exists());
    }
}
