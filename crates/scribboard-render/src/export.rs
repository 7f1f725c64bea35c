//! PNG export of the committed scene.

use crate::pipeline::render;
use crate::raster::Rasterizer;
use crate::renderer::{RenderResult, RenderStyle, Renderer};
use image::RgbaImage;
use scribboard_core::Whiteboard;
use std::path::{Path, PathBuf};

/// Fallback file stem when a title has no usable characters.
pub const DEFAULT_EXPORT_NAME: &str = "whiteboard";

/// An encoded snapshot of a whiteboard.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    /// Suggested file name, derived from the whiteboard title.
    pub filename: String,
    pub width: u32,
    pub height: u32,
    /// PNG-encoded bytes.
    pub png: Vec<u8>,
}

impl ExportedImage {
    /// Write the PNG into `dir` under [`Self::filename`].
    pub fn save_to(&self, dir: impl AsRef<Path>) -> RenderResult<PathBuf> {
        let path = dir.as_ref().join(&self.filename);
        std::fs::write(&path, &self.png)?;
        log::info!("Exported PNG to: {}", path.display());
        Ok(path)
    }
}

/// Turn a title into a safe file stem.
///
/// Lowercases, keeps ASCII alphanumerics, `-` and `_`, and replaces every
/// other character with `_`.
pub fn sanitize_title(title: &str) -> String {
    let name: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if name.is_empty() {
        DEFAULT_EXPORT_NAME.to_string()
    } else {
        name
    }
}

/// Export file name for a title.
pub fn export_filename(title: &str) -> String {
    format!("{}.png", sanitize_title(title))
}

/// Encode RGBA8 pixels as PNG.
pub fn encode_png(image: &RgbaImage) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(image.as_raw())?;
    }
    Ok(png_data)
}

/// Renders whiteboards to PNG.
///
/// Only committed elements are exported; an in-progress drag is not part
/// of the picture.
pub struct ExportService {
    rasterizer: Rasterizer,
    style: RenderStyle,
}

impl ExportService {
    /// Build a service for `board`'s size and style, loading its font if set.
    pub fn for_whiteboard(board: &Whiteboard) -> RenderResult<Self> {
        let config = board.config();
        Ok(Self {
            rasterizer: Rasterizer::from_config(config)?,
            style: RenderStyle::from_config(config),
        })
    }

    /// Build a service from an existing rasterizer.
    pub fn new(rasterizer: Rasterizer, style: RenderStyle) -> Self {
        Self { rasterizer, style }
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Render the current scene and encode it.
    pub fn export(&mut self, board: &Whiteboard) -> RenderResult<ExportedImage> {
        let list = render(board.scene(), None, &self.style);
        self.rasterizer.draw(&list);
        let image = self.rasterizer.image();
        let png = encode_png(image)?;
        let exported = ExportedImage {
            filename: export_filename(&board.config().title),
            width: image.width(),
            height: image.height(),
            png,
        };
        log::info!(
            "Exported {} ({}x{}, {} elements)",
            exported.filename,
            exported.width,
            exported.height,
            board.scene().len()
        );
        Ok(exported)
    }
}

/// One-shot export of `board`.
pub fn export(board: &Whiteboard) -> RenderResult<ExportedImage> {
    ExportService::for_whiteboard(board)?.export(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribboard_core::{Point, ToolKind, WhiteboardConfig};

    fn small_board(title: &str) -> Whiteboard {
        Whiteboard::new(WhiteboardConfig {
            title: title.to_string(),
            width: 32,
            height: 24,
            ..WhiteboardConfig::default()
        })
    }

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("Sprint Retro 2024!"), "sprint_retro_2024_");
        assert_eq!(sanitize_title("my-board_v2"), "my-board_v2");
        assert_eq!(sanitize_title("Café"), "caf_");
        assert_eq!(sanitize_title(""), "whiteboard");
        assert_eq!(export_filename("Plan"), "plan.png");
    }

    #[test]
    fn test_export_encodes_png() {
        let board = small_board("Demo");
        let exported = export(&board).unwrap();
        assert_eq!(exported.filename, "demo.png");
        assert_eq!((exported.width, exported.height), (32, 24));
        assert_eq!(&exported.png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_export_leaves_board_untouched() {
        let mut board = small_board("Demo");
        board.select_tool(ToolKind::Rectangle);
        board.pointer_down(Point::new(2.0, 2.0));
        board.pointer_move(Point::new(20.0, 20.0));
        let scene = board.scene().clone();
        let history_len = board.history().len();

        export(&board).unwrap();

        assert_eq!(board.scene(), &scene);
        assert_eq!(board.history().len(), history_len);
        assert!(board.is_drawing());
    }

    #[test]
    fn test_live_session_is_not_exported() {
        let mut board = small_board("Demo");
        let blank = export(&board).unwrap();
        board.select_tool(ToolKind::Pen);
        board.pointer_down(Point::new(2.0, 2.0));
        board.pointer_move(Point::new(20.0, 20.0));
        assert_eq!(export(&board).unwrap().png, blank.png);
    }

    #[test]
    fn test_save_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let exported = export(&small_board("Saved Board")).unwrap();
        let path = exported.save_to(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "saved_board.png");
        assert_eq!(std::fs::read(path).unwrap(), exported.png);
    }
}
