//! Dataset entity models and shared list primitives.

pub mod measure;
pub mod pagination;
pub mod store;
pub mod task;
pub mod threat;
