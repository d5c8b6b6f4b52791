//! Error types for meshvault

use thiserror::Error;

use crate::NodeId;

/// Reasons a node/edge set is rejected at initialization
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyFault {
    #[error("duplicate node id {0}")]
    DuplicateNode(NodeId),

    #[error("edge {from} -> {to} references unknown node {missing}")]
    DanglingEdge {
        from: NodeId,
        to: NodeId,
        missing: NodeId,
    },

    #[error("node {node} lists unknown neighbor {neighbor}")]
    DanglingNeighbor { node: NodeId, neighbor: NodeId },

    #[error("edge loops back onto node {0}")]
    SelfLoop(NodeId),
}

/// Core meshvault errors
#[derive(Error, Debug)]
pub enum MeshError {
    // Topology errors
    #[error("Invalid topology: {0}")]
    InvalidTopology(#[from] TopologyFault),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Edge not found: {from} <-> {to}")]
    EdgeNotFound { from: NodeId, to: NodeId },

    // Runtime errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Tracing setup failed: {0}")]
    Tracing(String),
}

impl MeshError {
    /// True for errors raised while validating a topology
    pub fn is_invalid_topology(&self) -> bool {
        matches!(self, MeshError::InvalidTopology(_))
    }
}

/// Result type for meshvault operations
pub type MeshResult<T> = Result<T, MeshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_converts_into_invalid_topology() {
        let fault = TopologyFault::DanglingEdge {
            from: NodeId::new("node-1"),
            to: NodeId::new("node-9"),
            missing: NodeId::new("node-9"),
        };
        let err: MeshError = fault.into();

        assert!(err.is_invalid_topology());
        assert_eq!(
            err.to_string(),
            "Invalid topology: edge node-1 -> node-9 references unknown node node-9"
        );
    }

    #[test]
    fn test_other_errors_are_not_topology() {
        let err = MeshError::NodeNotFound(NodeId::new("node-7"));
        assert!(!err.is_invalid_topology());
    }
}
