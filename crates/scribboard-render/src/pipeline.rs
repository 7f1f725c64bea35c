//! Scene to display list translation.
//!
//! The pipeline is a pure function of its inputs: the same scene, live
//! element and style always produce the same command sequence.

use crate::renderer::RenderStyle;
use kurbo::{Point, Rect};
use scribboard_core::shapes::{Arrow, Element, ElementTrait, Stroke};
use scribboard_core::{Scene, SerializableColor};

/// A single drawing instruction in canvas pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface.
    Clear(SerializableColor),
    /// Connected line segments through `points`.
    Polyline {
        points: Vec<Point>,
        color: SerializableColor,
        width: f64,
    },
    /// Filled disc, used for single-point pen strokes.
    Dot {
        center: Point,
        radius: f64,
        color: SerializableColor,
    },
    /// Rectangle outline.
    StrokeRect {
        rect: Rect,
        color: SerializableColor,
        width: f64,
    },
    /// Circle outline.
    StrokeCircle {
        center: Point,
        radius: f64,
        color: SerializableColor,
        width: f64,
    },
    /// Single line segment.
    Line {
        from: Point,
        to: Point,
        color: SerializableColor,
        width: f64,
    },
    /// Text whose baseline starts at `anchor`.
    Text {
        anchor: Point,
        text: String,
        size: f64,
        color: SerializableColor,
    },
}

/// Ordered list of draw commands for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

/// Build the display list for a frame.
///
/// Clears to the background, draws the scene in order, then the live
/// element on top. Incomplete elements are skipped.
pub fn render(scene: &Scene, live: Option<&Element>, style: &RenderStyle) -> DisplayList {
    let mut list = DisplayList::new();
    list.push(DrawCommand::Clear(style.background_color.into()));
    for element in scene.iter().chain(live) {
        emit_element(&mut list, element, style);
    }
    list
}

/// Append the commands for one element.
pub fn emit_element(list: &mut DisplayList, element: &Element, style: &RenderStyle) {
    if !element.is_complete() {
        log::trace!("skipping incomplete {}", element.kind_name());
        return;
    }
    let width = style.stroke_width;
    match element {
        Element::Stroke(stroke) => emit_stroke(list, stroke, width),
        Element::Rectangle(rect) => list.push(DrawCommand::StrokeRect {
            rect: rect.as_rect(),
            color: rect.color,
            width,
        }),
        Element::Ellipse(ellipse) => list.push(DrawCommand::StrokeCircle {
            center: ellipse.center,
            radius: ellipse.radius(),
            color: ellipse.color,
            width,
        }),
        Element::Arrow(arrow) => emit_arrow(list, arrow, width),
        Element::Text(label) => list.push(DrawCommand::Text {
            anchor: label.anchor,
            text: label.text.clone(),
            size: style.font_size,
            color: label.color,
        }),
    }
}

fn emit_stroke(list: &mut DisplayList, stroke: &Stroke, width: f64) {
    if stroke.is_dot() {
        list.push(DrawCommand::Dot {
            center: stroke.points[0],
            radius: width / 2.0,
            color: stroke.color,
        });
    } else {
        list.push(DrawCommand::Polyline {
            points: stroke.points.clone(),
            color: stroke.color,
            width,
        });
    }
}

fn emit_arrow(list: &mut DisplayList, arrow: &Arrow, width: f64) {
    let (left, right) = arrow.wings();
    for (from, to) in [(arrow.tail, arrow.head), (arrow.head, left), (arrow.head, right)] {
        list.push(DrawCommand::Line {
            from,
            to,
            color: arrow.color,
            width,
        });
    }
}
