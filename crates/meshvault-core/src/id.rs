//! Identity types for meshvault
//!
//! Nodes are named by human-readable strings (`node-1`), transfers by a
//! 64-bit counter handed out by the simulator.

use std::fmt;

/// Separator between the node kind prefix and its short label
pub const NODE_ID_SEPARATOR: char = '-';

/// Node identity - unique within a topology
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeId(String);

impl NodeId {
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form used as the on-canvas label: the segment after the first
    /// separator (`node-1` -> `1`). Ids without a separator label as themselves.
    pub fn short_label(&self) -> &str {
        let mut parts = self.0.split(NODE_ID_SEPARATOR);
        let head = parts.next().unwrap_or_default();
        match parts.next() {
            Some(label) => label,
            None => head,
        }
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        NodeId(id)
    }
}

/// Transfer identity - handle returned by `submit`, never reused
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TransferId(pub u64);

impl TransferId {
    pub const ZERO: TransferId = TransferId(0);

    #[inline]
    pub fn new(id: u64) -> Self {
        TransferId(id)
    }

    /// The identifier after this one
    #[inline]
    pub fn next(self) -> Self {
        TransferId(self.0.wrapping_add(1))
    }
}

impl fmt::Debug for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transfer({})", self.0)
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_label_takes_segment_after_separator() {
        assert_eq!(NodeId::new("node-1").short_label(), "1");
        assert_eq!(NodeId::new("node-12-eu").short_label(), "12");
    }

    #[test]
    fn test_short_label_without_separator() {
        assert_eq!(NodeId::new("gateway").short_label(), "gateway");
        assert_eq!(NodeId::new("").short_label(), "");
    }

    #[test]
    fn test_transfer_id_next() {
        let id = TransferId::ZERO;
        assert_eq!(id.next(), TransferId::new(1));
        assert_eq!(format!("{:?}", id.next()), "Transfer(1)");
    }

    proptest::proptest! {
        #[test]
        fn prop_short_label_never_contains_separator(
            prefix in "[a-z]{1,8}",
            rest in "[a-z0-9-]{0,12}",
        ) {
            let id = NodeId::new(format!("{prefix}-{rest}"));
            proptest::prop_assert!(!id.short_label().contains(NODE_ID_SEPARATOR));
            proptest::prop_assert!(id.as_str().contains(id.short_label()));
        }
    }
}
