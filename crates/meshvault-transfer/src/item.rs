//! Transfer items and their lifecycle

use meshvault_core::TransferId;

use crate::Digest;

/// Progress value of a finished item
pub const PROGRESS_COMPLETE: f64 = 100.0;

/// Item lifecycle: Pending -> InProgress -> {Completed | Failed}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl TransferStatus {
    /// Completed and Failed items are never touched by a tick again
    pub fn is_terminal(self) -> bool {
        matches!(self, TransferStatus::Completed | TransferStatus::Failed)
    }
}

/// What a caller hands to `submit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub name: String,
    pub size_bytes: u64,
}

impl TransferRequest {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }
}

/// A unit of simulated work.
/// INVARIANT: status == Completed implies progress == 100 and digest is set
#[derive(Debug, Clone, PartialEq)]
pub struct TransferItem {
    pub(crate) id: TransferId,
    pub(crate) name: String,
    pub(crate) size_bytes: u64,
    pub(crate) progress: f64,
    pub(crate) status: TransferStatus,
    pub(crate) digest: Option<Digest>,
}

impl TransferItem {
    /// A fresh item at zero progress
    pub fn new(id: TransferId, request: TransferRequest) -> Self {
        Self {
            id,
            name: request.name,
            size_bytes: request.size_bytes,
            progress: 0.0,
            status: TransferStatus::Pending,
            digest: None,
        }
    }

    /// Pending -> InProgress. Returns false for any other state.
    pub fn begin(&mut self) -> bool {
        if self.status == TransferStatus::Pending {
            self.status = TransferStatus::InProgress;
            true
        } else {
            false
        }
    }

    /// Move a non-terminal item to Failed. Progress is kept as it was.
    pub fn fail(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = TransferStatus::Failed;
        true
    }

    pub fn id(&self) -> TransferId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Size in mebibytes, for display
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0 / 1024.0
    }

    /// Percentage in [0, 100]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn status(&self) -> TransferStatus {
        self.status
    }

    pub fn digest(&self) -> Option<&Digest> {
        self.digest.as_ref()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> TransferItem {
        TransferItem::new(TransferId::new(1), TransferRequest::new("paper.pdf", 2 * 1024 * 1024))
    }

    #[test]
    fn test_lifecycle_begin() {
        let mut item = item();
        assert_eq!(item.status(), TransferStatus::Pending);
        assert!(item.begin());
        assert_eq!(item.status(), TransferStatus::InProgress);
        assert!(!item.begin());
    }

    #[test]
    fn test_fail_is_terminal() {
        let mut item = item();
        item.begin();
        assert!(item.fail());
        assert!(item.is_terminal());
        assert!(!item.fail());
        assert!(item.digest().is_none());
    }

    #[test]
    fn test_size_mb() {
        assert_eq!(item().size_mb(), 2.0);
    }
}
