//! meshvault Transfer - Upload progress simulation
//!
//! No bytes move. Each tick every in-flight item gains a bounded random
//! amount of progress until it reaches 100 and completes:
//! - Item: a submitted unit of work and its status
//! - Advance: the pure per-item transition
//! - Increment: where per-tick progress comes from (random, fixed, scripted)
//! - Digest: the opaque fingerprint minted on completion
//! - Notify: completion callbacks
//! - Simulator: the queue, ticked by an external scheduler

pub mod advance;
pub mod digest;
pub mod increment;
pub mod item;
pub mod notify;
pub mod simulator;

pub use advance::*;
pub use digest::*;
pub use increment::*;
pub use item::*;
pub use notify::*;
pub use simulator::*;
