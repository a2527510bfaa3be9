//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - node counts for move generation
//! - `executor.rs` - move application and state bookkeeping
//! - `edge_cases.rs` - special positions and rule corners
//! - `proptest.rs` - property-based tests over random self-play

mod executor;
