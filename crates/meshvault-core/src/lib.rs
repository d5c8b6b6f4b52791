//! meshvault Core - Fundamental types and primitives
//!
//! This crate defines the types shared by the live-operations engines:
//! - Identifiers (NodeId, TransferId)
//! - Surface geometry (Point)
//! - Cooperative cancellation (CancelFlag)
//! - Error types

pub mod cancel;
pub mod error;
pub mod geometry;
pub mod id;

pub use cancel::*;
pub use error::*;
pub use geometry::*;
pub use id::*;
