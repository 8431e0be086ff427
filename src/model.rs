use serde::{Deserialize, Serialize};

use crate::{error::Error, observable::Observable, observable::ObservableVec};

/// Stable node identifier. The server hands these out as uuid strings.
pub type NodeId = String;

/// Node as the view reads it. `name` stays observable so renames can be picked up
/// on the next render.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub nodeid: NodeId,
    pub name: Observable<String>,
    pub istopnode: bool,
}

impl GraphNode {
    pub fn new(nodeid: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            nodeid: nodeid.into(),
            name: Observable::new(name.into()),
            istopnode: false,
        }
    }

    pub fn top(nodeid: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            istopnode: true,
            ..Self::new(nodeid, name)
        }
    }
}

/// Directed edge, the range node is a child of the domain node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edgeid: Option<String>,
    pub domainnode_id: NodeId,
    pub rangenode_id: NodeId,
}

impl GraphEdge {
    pub fn new(domainnode_id: impl Into<NodeId>, rangenode_id: impl Into<NodeId>) -> Self {
        Self {
            edgeid: None,
            domainnode_id: domainnode_id.into(),
            rangenode_id: rangenode_id.into(),
        }
    }
}

/// Serialized node record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    pub nodeid: NodeId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub istopnode: bool,
}

impl From<NodeData> for GraphNode {
    fn from(d: NodeData) -> Self {
        Self {
            nodeid: d.nodeid,
            name: Observable::new(d.name),
            istopnode: d.istopnode,
        }
    }
}

impl From<&GraphNode> for NodeData {
    fn from(n: &GraphNode) -> Self {
        Self {
            nodeid: n.nodeid.clone(),
            name: n.name.get(),
            istopnode: n.istopnode,
        }
    }
}

/// Graph json as sent by the server. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<NodeData>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

/// Externally owned node and edge collections consumed by
/// [`crate::RadialGraphView`]. Either collection may be missing.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    nodes: Option<ObservableVec<GraphNode>>,
    edges: Option<ObservableVec<GraphEdge>>,
}

impl GraphModel {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self {
            nodes: Some(ObservableVec::from(nodes)),
            edges: Some(ObservableVec::from(edges)),
        }
    }

    pub fn with_nodes(mut self, nodes: ObservableVec<GraphNode>) -> Self {
        self.nodes = Some(nodes);
        self
    }

    pub fn with_edges(mut self, edges: ObservableVec<GraphEdge>) -> Self {
        self.edges = Some(edges);
        self
    }

    pub fn nodes(&self) -> Option<&ObservableVec<GraphNode>> {
        self.nodes.as_ref()
    }

    pub fn edges(&self) -> Option<&ObservableVec<GraphEdge>> {
        self.edges.as_ref()
    }

    /// Parses the server's graph json.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if `json` does not describe a graph.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let data: GraphData = serde_json::from_str(json)?;
        Ok(Self::from(data))
    }

    /// Snapshot of the current collections in their serialized form.
    pub fn to_data(&self) -> GraphData {
        GraphData {
            nodes: self
                .nodes
                .as_ref()
                .map(|n| n.with(|items| items.iter().map(NodeData::from).collect()))
                .unwrap_or_default(),
            edges: self.edges.as_ref().map(ObservableVec::get).unwrap_or_default(),
        }
    }
}

impl From<GraphData> for GraphModel {
    fn from(data: GraphData) -> Self {
        Self::new(
            data.nodes.into_iter().map(GraphNode::from).collect(),
            data.edges,
        )
    }
}
