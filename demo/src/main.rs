use eframe::{run_native, App, CreationContext, Frame, NativeOptions};
use egui::{CentralPanel, Context, ScrollArea, SidePanel, Vec2};
use egui_graph_manager::{
    AlertCategory, AlertPresenter, GraphEdge, GraphModel, GraphNode, RadialGraphView,
};
use log::{error, info};
use rand::Rng;

const APP_NAME: &str = "Graph Manager";

const SAMPLE_GRAPH: &str = r#"{
  "nodes": [
    {"nodeid": "root", "name": "Information Resource", "istopnode": true},
    {"nodeid": "a", "name": "Production"},
    {"nodeid": "b", "name": "Acquisition"},
    {"nodeid": "c", "name": "Physical Description"},
    {"nodeid": "a1", "name": "Production Event"},
    {"nodeid": "a2", "name": "Production Technique Type"},
    {"nodeid": "b1", "name": "Acquisition Date"},
    {"nodeid": "c1", "name": "Dimensions"},
    {"nodeid": "c2", "name": "Material"},
    {"nodeid": "c3", "name": "Inscription with a rather long descriptive name"}
  ],
  "edges": [
    {"domainnode_id": "root", "rangenode_id": "a"},
    {"domainnode_id": "root", "rangenode_id": "b"},
    {"domainnode_id": "root", "rangenode_id": "c"},
    {"domainnode_id": "a", "rangenode_id": "a1"},
    {"domainnode_id": "a", "rangenode_id": "a2"},
    {"domainnode_id": "b", "rangenode_id": "b1"},
    {"domainnode_id": "c", "rangenode_id": "c1"},
    {"domainnode_id": "c", "rangenode_id": "c2"},
    {"domainnode_id": "c", "rangenode_id": "c3"}
  ]
}"#;

const SAMPLE_ERROR: &str =
    r#"{"title": "Unable to save node", "message": "The node is referenced by other data."}"#;

pub struct GraphManagerApp {
    model: GraphModel,
    view: RadialGraphView,
    alerts: Vec<AlertPresenter>,
    added: usize,
}

impl GraphManagerApp {
    fn new(_: &CreationContext<'_>) -> Self {
        let model = GraphModel::from_json(SAMPLE_GRAPH).unwrap_or_else(|err| {
            error!("sample graph is broken: {err}");
            GraphModel::default()
        });
        let view = RadialGraphView::new(Vec2::new(800., 600.), &model);
        Self {
            model,
            view,
            alerts: Vec::new(),
            added: 0,
        }
    }

    fn add_random_child(&mut self) {
        let (Some(nodes), Some(edges)) = (self.model.nodes(), self.model.edges()) else {
            return;
        };
        let ids: Vec<String> = nodes.with(|n| n.iter().map(|n| n.nodeid.clone()).collect());
        if ids.is_empty() {
            return;
        }

        let parent = ids[rand::rng().random_range(0..ids.len())].clone();
        self.added += 1;
        let id = format!("new-{}", self.added);
        info!("adding `{id}` under `{parent}`");

        nodes.push(GraphNode::new(id.clone(), format!("New node {}", self.added)));
        edges.push(GraphEdge::new(parent, id));
    }

    fn remove_added(&mut self) {
        let (Some(nodes), Some(edges)) = (self.model.nodes(), self.model.edges()) else {
            return;
        };
        nodes.retain(|n| !n.nodeid.starts_with("new-"));
        edges.retain(|e| !e.rangenode_id.starts_with("new-"));
    }

    fn push_alerts(&mut self) {
        self.alerts.push(AlertPresenter::from_response(
            AlertCategory::Danger,
            Some(SAMPLE_ERROR),
            Some(Box::new(|| info!("delete cancelled"))),
            Some(Box::new(|| info!("delete confirmed"))),
        ));
        self.alerts.push(AlertPresenter::from_response(
            AlertCategory::Warning,
            Some("<html>502 Bad Gateway</html>"),
            None,
            None,
        ));
        self.alerts.push(AlertPresenter::simple(AlertCategory::Info, None));
    }

    fn draw_section_graph(&mut self, ui: &mut egui::Ui) {
        ui.heading("Graph");
        if ui.button("add random child").clicked() {
            self.add_random_child();
        }
        if ui.button("remove added nodes").clicked() {
            self.remove_added();
        }
        if ui.button("reset view").clicked() {
            let event = self.view.zoom_behavior().reset();
            self.view.redraw(Some(event), false);
        }

        let mut nav = self.view.zoom_behavior().settings().clone();
        let before = nav.clone();
        ui.checkbox(&mut nav.zoom_and_pan_enabled, "zoom and pan");
        ui.add(egui::Slider::new(&mut nav.zoom_speed, 0.01..=0.5).text("zoom speed"));
        if nav != before {
            self.view.zoom_behavior().set_settings(nav);
        }

        ui.separator();
        let meta = self.view.metadata();
        ui.label(format!("scale: {:.2}", meta.scale));
        ui.label(format!("offset: {:.0}, {:.0}", meta.offset.x, meta.offset.y));
        ui.label(format!("nodes: {}", self.view.scene().nodes.len()));
        ui.label(format!("links: {}", self.view.scene().links.len()));
        ui.label(format!("layout: {:.2}ms", self.view.last_layout_time_ms()));
    }

    fn draw_section_alerts(&mut self, ui: &mut egui::Ui) {
        ui.heading("Alerts");
        if ui.button("show sample alerts").clicked() {
            self.push_alerts();
        }
        ScrollArea::vertical().show(ui, |ui| {
            for alert in &mut self.alerts {
                ui.add(alert);
                ui.add_space(6.);
            }
        });
        self.alerts.retain(AlertPresenter::is_active);
    }
}

impl App for GraphManagerApp {
    fn update(&mut self, ctx: &Context, _: &mut Frame) {
        SidePanel::right("right_panel")
            .min_width(260.)
            .show(ctx, |ui| {
                self.draw_section_graph(ui);
                ui.separator();
                self.draw_section_alerts(ui);
            });

        CentralPanel::default().show(ctx, |ui| {
            ui.add(&mut self.view);
        });
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let native_options = NativeOptions::default();
    run_native(
        APP_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(GraphManagerApp::new(cc)))),
    )
}
