//! lodtree-loader - On-demand chunk loading support
//!
//! A renderer walking an octree asks for many chunks per frame. This crate
//! provides the request types it sends and a [`DelayQueue`] that holds
//! requests back briefly so ones that go out of view can be cancelled
//! before any work is done.

pub mod delay_queue;
pub mod request;

pub use delay_queue::{DEFAULT_DELAY_MS, DelayQueue, SubmitFn};
pub use request::{ChunkKey, ChunkRequest};
