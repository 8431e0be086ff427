use egui_graph_manager::{
    ErrorPayload, GraphData, GraphEdge, GraphModel, GraphNode, NodeData, SettingsLayout,
    SettingsNavigation, SettingsStyle,
};

const GRAPH: &str = r#"{
    "nodes": [
        {"nodeid": "r", "name": "Root", "istopnode": true, "ontologyclass": "E22"},
        {"nodeid": "a", "name": "A"},
        {"nodeid": "b"}
    ],
    "edges": [
        {"edgeid": "e1", "domainnode_id": "r", "rangenode_id": "a"},
        {"domainnode_id": "r", "rangenode_id": "b", "ontologyproperty": "P1"}
    ],
    "metadata": {"version": 3}
}"#;

#[test]
fn test_graph_json_ignores_unknown_fields() {
    let model = GraphModel::from_json(GRAPH).expect("parse graph");

    let nodes = model.nodes().expect("nodes").get();
    assert_eq!(nodes.len(), 3);
    assert!(nodes[0].istopnode);
    assert_eq!(nodes[2].name.get(), "");

    let edges = model.edges().expect("edges").get();
    assert_eq!(edges[0].edgeid.as_deref(), Some("e1"));
    assert_eq!(edges[1].edgeid, None);
}

#[test]
fn test_model_to_data_reflects_mutations() {
    let model = GraphModel::from_json(GRAPH).expect("parse graph");
    model
        .nodes()
        .expect("nodes")
        .push(GraphNode::new("c", "C"));
    model
        .edges()
        .expect("edges")
        .push(GraphEdge::new("a", "c"));

    let data = model.to_data();
    assert_eq!(data.nodes.len(), 4);
    assert_eq!(
        data.nodes[3],
        NodeData {
            nodeid: "c".to_string(),
            name: "C".to_string(),
            istopnode: false,
        }
    );

    let json = serde_json::to_string(&data).expect("serialize graph");
    let back: GraphData = serde_json::from_str(&json).expect("deserialize graph");
    assert_eq!(back, data);
    assert!(!json.contains("\"edgeid\":null"));
}

#[test]
fn test_malformed_graph_is_an_error() {
    assert!(GraphModel::from_json("{\"nodes\": 5}").is_err());
    assert!(GraphModel::from_json("not json").is_err());
}

#[test]
fn test_error_payload_partial() {
    let p = ErrorPayload::from_json(r#"{"message": "only a message", "code": 500}"#)
        .expect("parse payload");
    assert_eq!(p.title, None);
    assert_eq!(p.message.as_deref(), Some("only a message"));
}

#[test]
fn test_settings_roundtrip() {
    let layout = SettingsLayout::default().with_size(500.).with_label_chars(20.);
    let json = serde_json::to_string(&layout).expect("serialize layout");
    let back: SettingsLayout = serde_json::from_str(&json).expect("deserialize layout");
    assert_eq!(back, layout);

    let style: SettingsStyle = serde_json::from_str(r#"{"font_size": 14.0}"#).expect("style");
    assert_eq!(style.font_size, 14.);
    assert_eq!(style.marker_radius, SettingsStyle::default().marker_radius);

    let nav = SettingsNavigation::default().with_scale_extent(0.5, 4.);
    let back: SettingsNavigation =
        serde_json::from_str(&serde_json::to_string(&nav).expect("serialize nav"))
            .expect("deserialize nav");
    assert_eq!(back, nav);
}
