use scribboard_core::shapes::{Element, ElementTrait};
use scribboard_core::{EventOutcome, Point, ToolKind, Whiteboard, WhiteboardConfig, MIN_HISTORY_LIMIT};

fn board() -> Whiteboard {
    Whiteboard::new(WhiteboardConfig {
        history_limit: None,
        ..WhiteboardConfig::default()
    })
}

fn draw(board: &mut Whiteboard, tool: ToolKind, points: &[(f64, f64)]) {
    board.select_tool(tool);
    let (first, rest) = points.split_first().expect("at least one point");
    board.pointer_down(Point::new(first.0, first.1));
    for p in rest {
        board.pointer_move(Point::new(p.0, p.1));
    }
    let last = points.last().unwrap();
    board.pointer_up(Point::new(last.0, last.1));
}

#[test]
fn undo_then_redo_restores_scene_for_every_step() {
    let mut board = board();
    draw(&mut board, ToolKind::Pen, &[(1.0, 1.0), (2.0, 3.0)]);
    draw(&mut board, ToolKind::Rectangle, &[(10.0, 10.0), (40.0, 30.0)]);
    draw(&mut board, ToolKind::Ellipse, &[(100.0, 100.0), (120.0, 100.0)]);
    draw(&mut board, ToolKind::Arrow, &[(5.0, 200.0), (90.0, 220.0)]);
    board.clear();

    while board.can_undo() {
        let before = board.scene().clone();
        assert!(board.undo());
        assert!(board.redo());
        assert_eq!(board.scene(), &before);
        assert!(board.undo());
    }
    assert!(board.scene().is_empty());
}

#[test]
fn commit_after_undo_discards_redo_branch() {
    let mut board = board();
    draw(&mut board, ToolKind::Pen, &[(0.0, 0.0), (5.0, 5.0)]);
    draw(&mut board, ToolKind::Pen, &[(10.0, 0.0), (15.0, 5.0)]);
    draw(&mut board, ToolKind::Pen, &[(20.0, 0.0), (25.0, 5.0)]);

    board.undo();
    board.undo();
    assert!(board.can_redo());

    draw(&mut board, ToolKind::Rectangle, &[(50.0, 50.0), (60.0, 60.0)]);
    assert!(!board.can_redo());
    assert!(!board.redo());
    assert_eq!(board.scene().len(), 2);
    assert_eq!(board.history().len(), 3);
}

#[test]
fn pen_session_commits_exact_points() {
    let mut board = board();
    draw(&mut board, ToolKind::Pen, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);

    let Some(Element::Stroke(stroke)) = board.scene().last() else {
        panic!("expected a stroke");
    };
    assert_eq!(
        stroke.points,
        vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)]
    );
}

#[test]
fn rectangle_uses_final_end_position() {
    let mut board = board();
    board.select_tool(ToolKind::Rectangle);
    board.pointer_down(Point::new(5.0, 5.0));
    for p in [(90.0, 10.0), (20.0, 300.0), (7.0, 7.0)] {
        board.pointer_move(Point::new(p.0, p.1));
    }
    board.pointer_up(Point::new(50.0, 40.0));

    let Some(Element::Rectangle(rect)) = board.scene().last() else {
        panic!("expected a rectangle");
    };
    assert_eq!(rect.corner1, Point::new(5.0, 5.0));
    assert_eq!(rect.corner2, Point::new(50.0, 40.0));
}

#[test]
fn tool_switch_mid_session_adds_nothing() {
    let mut board = board();
    for tool in [ToolKind::Pen, ToolKind::Rectangle, ToolKind::Ellipse, ToolKind::Arrow] {
        board.select_tool(tool);
        board.pointer_down(Point::new(10.0, 10.0));
        board.pointer_move(Point::new(30.0, 30.0));
        board.select_tool(ToolKind::Select);
        board.pointer_up(Point::new(30.0, 30.0));
    }
    assert!(board.scene().is_empty());
    assert!(!board.can_undo());
}

#[test]
fn clear_then_undo_restores_previous_scene() {
    let mut board = board();
    draw(&mut board, ToolKind::Ellipse, &[(100.0, 100.0), (130.0, 140.0)]);
    board.select_tool(ToolKind::Text);
    board.pointer_down(Point::new(20.0, 20.0));
    board.submit_text(Some("note".to_string()));
    let before = board.scene().clone();

    board.clear();
    assert!(board.scene().is_empty());
    board.undo();
    assert_eq!(board.scene(), &before);
}

#[test]
fn clear_then_undo_holds_at_smallest_history_limit() {
    let config = WhiteboardConfig::from_json(&format!(r#"{{"history_limit": {MIN_HISTORY_LIMIT}}}"#)).unwrap();
    let mut board = Whiteboard::new(config);
    draw(&mut board, ToolKind::Pen, &[(1.0, 1.0), (8.0, 8.0)]);
    draw(&mut board, ToolKind::Rectangle, &[(10.0, 10.0), (20.0, 20.0)]);
    let before = board.scene().clone();

    board.clear();
    assert!(board.undo());
    assert_eq!(board.scene(), &before);
}

#[test]
fn unvalidated_tiny_limit_still_undoes_clear() {
    let mut board = Whiteboard::new(WhiteboardConfig {
        history_limit: Some(1),
        ..WhiteboardConfig::default()
    });
    draw(&mut board, ToolKind::Pen, &[(1.0, 1.0), (8.0, 8.0)]);
    let before = board.scene().clone();

    board.clear();
    assert!(board.undo());
    assert_eq!(board.scene(), &before);
}

#[test]
fn select_tool_never_draws() {
    let mut board = board();
    board.select_tool(ToolKind::Select);
    assert_eq!(board.pointer_down(Point::new(1.0, 1.0)), EventOutcome::Ignored);
    assert_eq!(board.pointer_move(Point::new(9.0, 9.0)), EventOutcome::Ignored);
    assert_eq!(board.pointer_up(Point::new(9.0, 9.0)), EventOutcome::Ignored);
    assert!(board.scene().is_empty());
}

#[test]
fn leaving_canvas_never_leaves_dangling_session() {
    let mut board = board();
    board.select_tool(ToolKind::Arrow);
    board.pointer_down(Point::new(10.0, 10.0));
    board.pointer_move(Point::new(60.0, 60.0));
    assert_eq!(board.pointer_leave(), EventOutcome::Redraw);
    assert!(!board.is_drawing());

    let Some(Element::Arrow(arrow)) = board.scene().last() else {
        panic!("expected an arrow");
    };
    assert_eq!(arrow.head, Point::new(60.0, 60.0));
    assert_eq!(board.pointer_leave(), EventOutcome::Ignored);
}

#[test]
fn element_colors_follow_active_color() {
    let mut board = board();
    board.set_color("#ff8800".parse().unwrap());
    draw(&mut board, ToolKind::Pen, &[(0.0, 0.0), (1.0, 1.0)]);
    assert_eq!(board.scene().last().unwrap().color().to_hex(), "#ff8800");
}
