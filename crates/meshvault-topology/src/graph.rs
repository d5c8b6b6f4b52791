//! Topology - the peers and links shown on the network view
//!
//! A topology is validated once, when it is built. After that only node and
//! edge activity and node file counts change; the shape is fixed.

use std::collections::{BTreeSet, HashMap};

use meshvault_core::{MeshError, MeshResult, NodeId, Point, TopologyFault};

/// A participant in the storage network
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Position on the surface, in pixels
    pub position: Point,
    pub active: bool,
    /// Number of files this node holds
    pub file_count: u32,
    /// Peers this node reports being connected to
    pub neighbors: BTreeSet<NodeId>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            position: Point::new(x, y),
            active: true,
            file_count: 0,
            neighbors: BTreeSet::new(),
        }
    }

    pub fn with_files(mut self, file_count: u32) -> Self {
        self.file_count = file_count;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_neighbors<I, N>(mut self, neighbors: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        self.neighbors = neighbors.into_iter().map(Into::into).collect();
        self
    }
}

/// Undirected link between two nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub active: bool,
}

impl Edge {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            active: true,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// True if this edge joins `a` and `b`, in either direction
    pub fn connects(&self, a: &NodeId, b: &NodeId) -> bool {
        (&self.from == a && &self.to == b) || (&self.from == b && &self.to == a)
    }
}

/// Summary counts shown next to the network view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopologyStats {
    pub active_nodes: usize,
    pub offline_nodes: usize,
    pub active_connections: usize,
    pub total_files: u64,
}

/// Validated node and edge set
#[derive(Debug, Clone)]
pub struct Topology {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    /// node id -> position in `nodes`
    index: HashMap<NodeId, usize>,
}

impl Topology {
    /// Validate and build a topology.
    ///
    /// Fails with `InvalidTopology` on a duplicate node id, an edge whose
    /// endpoint is unknown, an edge joining a node to itself, or a neighbor
    /// entry naming an unknown node.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> MeshResult<Self> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(TopologyFault::DuplicateNode(node.id.clone()).into());
            }
        }

        for node in &nodes {
            if let Some(neighbor) = node.neighbors.iter().find(|n| !index.contains_key(*n)) {
                return Err(TopologyFault::DanglingNeighbor {
                    node: node.id.clone(),
                    neighbor: neighbor.clone(),
                }
                .into());
            }
        }

        for edge in &edges {
            for endpoint in [&edge.from, &edge.to] {
                if !index.contains_key(endpoint) {
                    return Err(TopologyFault::DanglingEdge {
                        from: edge.from.clone(),
                        to: edge.to.clone(),
                        missing: endpoint.clone(),
                    }
                    .into());
                }
            }
            if edge.from == edge.to {
                return Err(TopologyFault::SelfLoop(edge.from.clone()).into());
            }
        }

        Ok(Self {
            nodes,
            edges,
            index,
        })
    }

    /// The five-node reference network shown on the dashboard
    pub fn sample() -> Self {
        let nodes = vec![
            Node::new("node-1", 150.0, 100.0)
                .with_files(42)
                .with_neighbors(["node-2", "node-3"]),
            Node::new("node-2", 350.0, 180.0)
                .with_files(28)
                .with_neighbors(["node-1", "node-3", "node-4"]),
            Node::new("node-3", 250.0, 280.0)
                .with_files(35)
                .with_neighbors(["node-1", "node-2"]),
            Node::new("node-4", 450.0, 120.0)
                .with_active(false)
                .with_neighbors(["node-2"]),
            Node::new("node-5", 200.0, 350.0)
                .with_files(19)
                .with_neighbors(["node-3"]),
        ];
        let edges = vec![
            Edge::new("node-1", "node-2"),
            Edge::new("node-1", "node-3"),
            Edge::new("node-2", "node-3"),
            Edge::new("node-2", "node-4").with_active(false),
            Edge::new("node-3", "node-5"),
        ];

        Self {
            index: nodes
                .iter()
                .enumerate()
                .map(|(i, n)| (n.id.clone(), i))
                .collect(),
            nodes,
            edges,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn has_node(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Positions of both endpoints of an edge
    pub fn endpoints(&self, edge: &Edge) -> Option<(Point, Point)> {
        let from = self.node(&edge.from)?.position;
        let to = self.node(&edge.to)?.position;
        Some((from, to))
    }

    /// Mark a node online or offline
    pub fn set_node_active(&mut self, id: &NodeId, active: bool) -> MeshResult<()> {
        self.node_mut(id)?.active = active;
        Ok(())
    }

    pub fn set_file_count(&mut self, id: &NodeId, file_count: u32) -> MeshResult<()> {
        self.node_mut(id)?.file_count = file_count;
        Ok(())
    }

    /// Mark the edge between `a` and `b` (either direction) active or not
    pub fn set_edge_active(&mut self, a: &NodeId, b: &NodeId, active: bool) -> MeshResult<()> {
        let edge = self
            .edges
            .iter_mut()
            .find(|e| e.connects(a, b))
            .ok_or_else(|| MeshError::EdgeNotFound {
                from: a.clone(),
                to: b.clone(),
            })?;
        edge.active = active;
        Ok(())
    }

    pub fn stats(&self) -> TopologyStats {
        let active_nodes = self.nodes.iter().filter(|n| n.active).count();
        TopologyStats {
            active_nodes,
            offline_nodes: self.nodes.len() - active_nodes,
            active_connections: self.edges.iter().filter(|e| e.active).count(),
            total_files: self.nodes.iter().map(|n| u64::from(n.file_count)).sum(),
        }
    }

    fn node_mut(&mut self, id: &NodeId) -> MeshResult<&mut Node> {
        match self.index.get(id) {
            Some(&i) => Ok(&mut self.nodes[i]),
            None => Err(MeshError::NodeNotFound(id.clone())),
        }
    }
}
