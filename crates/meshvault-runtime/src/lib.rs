//! meshvault Runtime - Live operations loop
//!
//! Composes the two engines behind one surface:
//! 1. Frame interval -> topology renderer tick
//! 2. Transfer interval -> transfer simulator tick
//! 3. Shutdown -> stop both, report
//!
//! Both intervals are polled from a single task, so ticks never overlap.

pub mod config;
pub mod live;
pub mod observability;

pub use config::*;
pub use live::*;
pub use observability::*;
