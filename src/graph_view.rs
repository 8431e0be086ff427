use std::{cell::Cell, collections::HashSet, rc::Rc};

use egui::{Response, Sense, Ui, Vec2, Widget};
use instant::Instant;
use log::{debug, trace, warn};

use crate::{
    draw::{DrawContext, Drawer},
    layouts::{radial::ChildrenFn, radial_separation, Tree, TreeLayout},
    metadata::Metadata,
    model::{GraphEdge, GraphModel, GraphNode},
    navigation::{ZoomBehavior, ZoomEvent},
    observable::{ObservableVec, Subscription},
    scene::{LabelVisual, LinkVisual, NodeVisual, Scene, TextAnchor},
    settings::{SettingsLayout, SettingsNavigation, SettingsStyle},
};

#[cfg(feature = "events")]
use crate::events::{Event, PayloadPan, PayloadRebuild, PayloadZoom};
#[cfg(feature = "events")]
use crossbeam::channel::Sender;

/// Cuts `name` to `max_chars` characters and appends `ellipsis` when it is longer
/// than `max_chars`. Fractional limits compare exactly and cut at the floor.
pub fn truncate_label(name: &str, max_chars: f32, ellipsis: &str) -> String {
    let len = name.chars().count();
    if len as f32 > max_chars {
        let keep = max_chars.max(0.).floor() as usize;
        let mut out: String = name.chars().take(keep).collect();
        out.push_str(ellipsis);
        return out;
    }
    name.to_string()
}

/// Labels on the left half of the circle are end anchored and turned upright.
pub fn text_anchor(angle_deg: f32) -> TextAnchor {
    if angle_deg < 180. {
        TextAnchor::Start
    } else {
        TextAnchor::End
    }
}

/// Radial tree drawing of a [`GraphModel`] with pan and zoom.
///
/// The view only reads the model. Node and edge mutations mark the view dirty and
/// the widget rebuilds the diagram on its next frame; hosts that drive the view
/// without egui call [`RadialGraphView::redraw`] with `force` themselves.
///
/// Zoom changes rebuild the layout with its radius scaled by the zoom factor so
/// the spacing between nodes grows with zoom. Pure panning only moves the
/// diagram group.
pub struct RadialGraphView {
    nodes: ObservableVec<GraphNode>,
    edges: ObservableVec<GraphEdge>,
    subscriptions: (Subscription, Subscription),
    dirty: Rc<Cell<bool>>,

    viewport: Vec2,
    diameter: f32,

    layout: TreeLayout,
    tree: Tree,
    scene: Scene,
    zoom: ZoomBehavior,

    settings_layout: SettingsLayout,
    settings_style: SettingsStyle,

    last_layout_time_ms: f32,

    #[cfg(feature = "events")]
    events_publisher: Option<Sender<Event>>,
}

impl std::fmt::Debug for RadialGraphView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadialGraphView")
            .field("viewport", &self.viewport)
            .field("transform", &self.scene.transform)
            .field("nodes", &self.scene.nodes.len())
            .field("links", &self.scene.links.len())
            .finish_non_exhaustive()
    }
}

impl Drop for RadialGraphView {
    fn drop(&mut self) {
        self.nodes.unsubscribe(self.subscriptions.0);
        self.edges.unsubscribe(self.subscriptions.1);
    }
}

impl RadialGraphView {
    /// Binds to the model and draws the initial diagram for a viewport of the given
    /// size. Missing node or edge collections are replaced by empty ones.
    pub fn new(viewport: Vec2, model: &GraphModel) -> Self {
        Self::with_settings(
            viewport,
            model,
            SettingsLayout::default(),
            SettingsStyle::default(),
            SettingsNavigation::default(),
        )
    }

    pub fn with_settings(
        viewport: Vec2,
        model: &GraphModel,
        settings_layout: SettingsLayout,
        settings_style: SettingsStyle,
        settings_navigation: SettingsNavigation,
    ) -> Self {
        let nodes = model.nodes().cloned().unwrap_or_default();
        let edges = model.edges().cloned().unwrap_or_default();

        let dirty = Rc::new(Cell::new(false));
        let subscriptions = {
            let (d_nodes, d_edges) = (Rc::clone(&dirty), Rc::clone(&dirty));
            (
                nodes.subscribe(move |_| d_nodes.set(true)),
                edges.subscribe(move |_| d_edges.set(true)),
            )
        };

        let layout = tree_layout(&nodes, &edges, settings_layout.size);

        let mut view = Self {
            nodes,
            edges,
            subscriptions,
            dirty,
            viewport,
            diameter: viewport.x.min(viewport.y),
            layout,
            tree: Tree::default(),
            scene: Scene {
                height: viewport.y,
                ..Scene::default()
            },
            zoom: ZoomBehavior::new(settings_navigation),
            settings_layout,
            settings_style,
            last_layout_time_ms: 0.,

            #[cfg(feature = "events")]
            events_publisher: None,
        };

        view.render();
        view.resize(viewport);
        view
    }

    /// Publishes pan, zoom and rebuild events to the channel.
    #[cfg(feature = "events")]
    pub fn with_events(mut self, events_publisher: Sender<Event>) -> Self {
        self.events_publisher = Some(events_publisher);
        self
    }

    /// Lays out the tree from the top node and syncs node and link visuals.
    ///
    /// Without a top node the diagram is emptied.
    pub fn render(&mut self) {
        let root = self
            .nodes
            .with(|nodes| nodes.iter().rev().find(|n| n.istopnode).cloned());

        match root {
            Some(root) => {
                let start = Instant::now();
                self.tree = self.layout.compute(&root);
                self.last_layout_time_ms = start.elapsed().as_secs_f32() * 1000.;
            }
            None => {
                warn!("no top node among {} nodes, rendering empty diagram", self.nodes.len());
                self.tree = Tree::default();
            }
        }

        self.render_links();
        self.render_nodes();
    }

    /// Adds a marker group for every node that has none yet and drops groups of
    /// nodes that left the tree. Existing groups are kept as they are.
    pub fn render_nodes(&mut self) {
        let join = self
            .scene
            .nodes
            .join(self.tree.nodes().map(|n| n.id.clone()));

        let mut entered = Vec::with_capacity(join.enter.len());
        for id in join.enter {
            let Some(n) = self.tree.node(&id) else {
                continue;
            };
            let visual = NodeVisual::from_tree_node(n, self.settings_style.marker_radius);
            self.scene.nodes.insert(id.clone(), visual);
            entered.push(id);
        }

        self.render_node_text(&entered);
    }

    /// Attaches labels to the given freshly created node groups.
    pub fn render_node_text(&mut self, ids: &[String]) {
        let max_chars = self.settings_layout.label_chars * self.scene.transform.scale;

        for id in ids {
            let Some(n) = self.tree.node(id) else {
                continue;
            };
            let anchor = text_anchor(n.x);
            let label = LabelVisual {
                text: n.name.with(|name| {
                    truncate_label(name, max_chars, &self.settings_layout.ellipsis)
                }),
                anchor,
                flipped: anchor == TextAnchor::End,
                offset: self.settings_style.label_offset,
            };
            if let Some(visual) = self.scene.nodes.get_mut(id) {
                visual.label = Some(label);
            }
        }
    }

    /// Adds a path for every new parent child link and removes paths of links
    /// that are gone. Links are keyed by their target node.
    pub fn render_links(&mut self) {
        let links: Vec<(String, LinkVisual)> = self
            .tree
            .links()
            .map(|l| {
                (
                    l.target.id.clone(),
                    LinkVisual {
                        source: l.source.id.clone(),
                        points: l.diagonal(),
                    },
                )
            })
            .collect();

        let join = self.scene.links.join(links.iter().map(|(k, _)| k.clone()));
        let enter: HashSet<_> = join.enter.into_iter().collect();
        for (k, v) in links {
            if enter.contains(&k) {
                self.scene.links.insert(k, v);
            }
        }
    }

    /// Applies a gesture. Scale or translation missing from the event, a zero
    /// scale and non-finite values keep their previous values. The diagram is rebuilt when `force` is set or the scale
    /// changed, otherwise only the group transform moves.
    pub fn redraw(&mut self, event: Option<ZoomEvent>, force: bool) {
        let previous = self.scene.transform.clone();

        if let Some(e) = event {
            if let Some(scale) = e.scale.filter(|s| s.is_finite() && *s != 0.) {
                self.scene.transform.scale = scale;
            }
            if let Some(translate) = e.translate.filter(|t| t.is_finite()) {
                self.scene.transform.offset = translate;
            }
        }

        if self.scene.transform.center.is_none() {
            self.scene.transform.center = Some(self.viewport / 2.);
        }

        self.publish_transform_changes(&previous);

        if force || previous.scale != self.scene.transform.scale {
            let scale = self.scene.transform.scale;
            self.scene.clear();
            self.layout = tree_layout(&self.nodes, &self.edges, self.settings_layout.size * scale);
            self.render();
            debug!(
                "rebuilt radial diagram at scale {scale}: {} nodes, {} links in {:.2}ms",
                self.scene.nodes.len(),
                self.scene.links.len(),
                self.last_layout_time_ms
            );
            self.publish_rebuild(force);
        } else {
            trace!("moved radial diagram to {:?}", self.scene.transform.offset);
        }
    }

    /// Matches the diagram to a new viewport size and recenters it. The layout is
    /// left alone.
    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.scene.height = viewport.y;
        self.scene.transform.center = Some(viewport / 2.);
    }

    /// Forces a rebuild on the next frame.
    pub fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn metadata(&self) -> &Metadata {
        &self.scene.transform
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Smaller side of the viewport the view was created with.
    pub fn diameter(&self) -> f32 {
        self.diameter
    }

    /// Radius the layout currently spans.
    pub fn layout_size(&self) -> [f32; 2] {
        self.layout.size()
    }

    pub fn last_layout_time_ms(&self) -> f32 {
        self.last_layout_time_ms
    }

    pub fn zoom_behavior(&mut self) -> &mut ZoomBehavior {
        &mut self.zoom
    }

    #[allow(unused_variables, clippy::unused_self)]
    fn publish_transform_changes(&self, previous: &Metadata) {
        #[cfg(feature = "events")]
        {
            let current = &self.scene.transform;
            let diff = current.offset - previous.offset;
            if diff != Vec2::ZERO {
                self.publish_event(Event::Pan(PayloadPan {
                    diff: diff.into(),
                    new_offset: current.offset.into(),
                }));
            }
            if current.scale != previous.scale {
                self.publish_event(Event::Zoom(PayloadZoom {
                    diff: current.scale - previous.scale,
                    new_scale: current.scale,
                }));
            }
        }
    }

    #[allow(unused_variables, clippy::unused_self)]
    fn publish_rebuild(&self, forced: bool) {
        #[cfg(feature = "events")]
        self.publish_event(Event::Rebuild(PayloadRebuild {
            nodes: self.scene.nodes.len(),
            links: self.scene.links.len(),
            forced,
        }));
    }

    #[cfg(feature = "events")]
    fn publish_event(&self, event: Event) {
        if let Some(sender) = &self.events_publisher {
            if let Err(err) = sender.send(event) {
                warn!("dropping radial view event: {err}");
            }
        }
    }
}

impl Widget for &mut RadialGraphView {
    fn ui(self, ui: &mut Ui) -> Response {
        let (resp, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());

        if resp.rect.size() != self.viewport {
            self.resize(resp.rect.size());
        }

        if self.dirty.replace(false) {
            self.redraw(None, true);
        }

        let center = self.scene.transform.center.unwrap_or(self.viewport / 2.);
        if let Some(event) = self.zoom.handle(ui, &resp, center) {
            self.redraw(Some(event), false);
        }

        let ctx = DrawContext {
            ctx: ui.ctx(),
            painter: &painter,
            style: &self.settings_style,
            meta: &self.scene.transform,
            origin: resp.rect.left_top().to_vec2(),
        };
        Drawer::new(&self.scene, &ctx).draw();

        resp
    }
}

/// Layout deriving each node's children from the edges leaving it.
fn tree_layout(
    nodes: &ObservableVec<GraphNode>,
    edges: &ObservableVec<GraphEdge>,
    radius: f32,
) -> TreeLayout {
    let (nodes, edges) = (nodes.clone(), edges.clone());
    let children: ChildrenFn = Box::new(move |d: &GraphNode| {
        let nodes = nodes.borrow();
        edges.with(|edges| {
            edges
                .iter()
                .filter(|e| e.domainnode_id == d.nodeid)
                .filter_map(|e| nodes.iter().find(|n| n.nodeid == e.rangenode_id).cloned())
                .collect::<Vec<_>>()
        })
    });

    TreeLayout::new(children)
        .with_size([360., radius])
        .with_separation(Box::new(radial_separation))
}
