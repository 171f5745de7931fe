//! Algoscope Core
//!
//! Step-trace generation for classic teaching algorithms.
//!
//! # Simulate, then replay
//!
//! A tracer runs an algorithm to completion over a private copy of its
//! input and records a [`Trace`]: an ordered list of immutable
//! [`TraceStep`]s, each holding a full snapshot of the structure, the
//! role markers (comparing, sorted, visited, ...) of every entry, a
//! human-readable description and the reference code line to highlight.
//! Playback only ever reads a trace; it never runs the algorithm.
//!
//! # Families
//!
//! - Sorting: bubble, quick, merge, insertion, selection
//! - Searching: linear, binary
//! - Tree traversal: in-order, pre-order, post-order, BFS, DFS
//! - Graphs: BFS, DFS, Dijkstra
//!
//! Initial structures come from [`builders`], which own all validation and
//! all randomness. Tracers are deterministic: the same input always yields
//! an identical trace.

mod catalogue;
mod error;
mod step;

pub mod builders;
pub mod tracers;

pub use catalogue::{
    Algorithm, AlgorithmInfo, GraphAlgorithm, SearchAlgorithm, SortAlgorithm, TreeTraversal,
};
pub use error::{Error, Result};
pub use step::{
    Auxiliary, Distance, DistanceEntry, Element, GraphEntry, Marked, Role, Roles, SearchWindow,
    Snapshot, StepKind, Trace, TraceMetrics, TraceStep, TreeEntry,
};
pub use tracers::{GraphParams, Tracer};
