use std::{cell::RefCell, rc::Rc};

use egui::Vec2;
use egui_graph_manager::{
    AlertCategory, AlertPresenter, GraphEdge, GraphModel, GraphNode, RadialGraphView,
    TextAnchor, DEFAULT_MESSAGE, DEFAULT_TITLE,
};

fn star(leaves: usize) -> GraphModel {
    let mut nodes = vec![GraphNode::top("root", "Root")];
    let mut edges = Vec::new();
    for i in 0..leaves {
        let id = format!("n{i}");
        nodes.push(GraphNode::new(id.clone(), format!("Leaf {i}")));
        edges.push(GraphEdge::new("root", id));
    }
    GraphModel::new(nodes, edges)
}

#[test]
fn test_leaves_spread_around_the_circle() {
    let view = RadialGraphView::new(Vec2::new(600., 600.), &star(4));
    let tree = view.tree();

    let mut angles: Vec<f32> = (0..4)
        .map(|i| tree.node(&format!("n{i}")).expect("leaf").x)
        .collect();
    angles.sort_by(f32::total_cmp);
    for pair in angles.windows(2) {
        assert!((pair[1] - pair[0] - 90.).abs() < 1e-3);
    }

    let anchors: Vec<TextAnchor> = (0..4)
        .map(|i| {
            view.scene()
                .nodes
                .get(&format!("n{i}"))
                .and_then(|n| n.label.as_ref())
                .expect("label")
                .anchor
        })
        .collect();
    assert!(anchors.contains(&TextAnchor::Start));
    assert!(anchors.contains(&TextAnchor::End));
}

#[test]
fn test_removed_node_leaves_the_scene() {
    let model = star(3);
    let mut view = RadialGraphView::new(Vec2::new(600., 600.), &model);
    assert_eq!(view.scene().nodes.len(), 4);

    model
        .edges()
        .expect("edges")
        .retain(|e| e.rangenode_id != "n1");
    assert!(view.is_dirty());
    view.redraw(None, true);

    assert_eq!(view.scene().nodes.len(), 3);
    assert!(!view.scene().nodes.contains(&"n1".to_string()));
    assert!(!view.scene().links.contains(&"n1".to_string()));
}

#[test]
fn test_zoom_and_pan_sequence() {
    let mut view = RadialGraphView::new(Vec2::new(600., 400.), &star(2));
    let event = view.zoom_behavior().zoom_to(2., None);
    view.redraw(Some(event), false);
    assert_eq!(view.metadata().scale, 2.);
    assert_eq!(view.layout_size()[1], 2000.);

    let event = view.zoom_behavior().pan_by(Vec2::new(10., 20.));
    view.redraw(Some(event), false);
    assert_eq!(view.metadata().scale, 2.);
    assert_eq!(view.metadata().translate(), Vec2::new(310., 220.));
}

#[test]
fn test_alert_from_bad_response_uses_defaults() {
    let alert = AlertPresenter::from_response(AlertCategory::Danger, Some("<html/>"), None, None);
    assert!(alert.is_active());
    assert_eq!(alert.title.get(), DEFAULT_TITLE);
    assert_eq!(alert.message.get(), DEFAULT_MESSAGE);
    assert!(alert.confirm.is_none() && alert.cancel.is_none());
}

#[test]
fn test_alert_confirm_closes_then_calls_back() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let (s_confirm, s_active) = (Rc::clone(&seen), Rc::clone(&seen));
    let mut alert = AlertPresenter::from_response(
        "warning".parse().expect("category"),
        Some(r#"{"title": "Delete?", "message": "This removes the branch."}"#),
        None,
        Some(Box::new(move || s_confirm.borrow_mut().push("confirmed"))),
    );
    alert.active.subscribe(move |active| {
        if !*active {
            s_active.borrow_mut().push("closed");
        }
    });

    assert_eq!(alert.category.get(), AlertCategory::Warning);
    assert_eq!(alert.title.get(), "Delete?");
    assert!(!alert.cancel());
    assert!(alert.confirm());
    assert!(!alert.is_active());
    assert_eq!(*seen.borrow(), vec!["closed", "confirmed"]);
}
