//! # Sequencing Core
//!
//! Clip-pool allocation and edit-list generation. This is the algorithmic
//! heart of the crate: windowing source videos into candidate segments,
//! shuffling each pool once, and round-robin drawing through the shuffled
//! order with cursors shared across the whole batch so segment reuse is
//! minimized and evenly spread.

pub mod edit_list;
pub mod pool;

pub use edit_list::{generate_edit_lists, EditList, EditListEntry};
pub use pool::{build_clip_pools, CandidateSegment, ClipPool, PoolCursors};
