mod alert;
mod draw;
mod error;
mod graph_view;
mod join;
mod metadata;
mod model;
mod navigation;
mod observable;
mod scene;
mod settings;

pub mod layouts;

#[cfg(feature = "events")]
pub mod events;

pub use self::alert::{
    AlertAction, AlertCallback, AlertCategory, AlertPresenter, ErrorPayload, DEFAULT_MESSAGE,
    DEFAULT_TITLE,
};
pub use self::draw::{category_colors, DrawContext, Drawer, Layer, Layers};
pub use self::error::{Error, Result};
pub use self::graph_view::{text_anchor, truncate_label, RadialGraphView};
pub use self::join::{Join, Selection};
pub use self::metadata::Metadata;
pub use self::model::{GraphData, GraphEdge, GraphModel, GraphNode, NodeData, NodeId};
pub use self::navigation::{ZoomBehavior, ZoomEvent};
pub use self::observable::{Observable, ObservableVec, Subscription};
pub use self::scene::{LabelVisual, LinkVisual, NodeVisual, Scene, TextAnchor};
pub use self::settings::{SettingsLayout, SettingsNavigation, SettingsStyle};
