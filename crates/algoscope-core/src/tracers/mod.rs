//! Tracers: run an algorithm once and record every intermediate state.
//!
//! A tracer never mutates its input and never fails. Parameters are
//! validated before tracing (see [`GraphParams::new`]); an empty structure
//! yields a single terminal step.

pub mod graph;
pub mod searching;
pub mod sorting;
pub mod tree;

pub use graph::GraphParams;

use crate::builders::{Bst, Graph};
use crate::catalogue::{GraphAlgorithm, SearchAlgorithm, SortAlgorithm, TreeTraversal};
use crate::step::Trace;

/// An algorithm that can be traced over a structure.
///
/// ```
/// use algoscope_core::{SortAlgorithm, Tracer};
///
/// let trace = SortAlgorithm::Bubble.trace(&[5, 3, 8, 1], &());
/// assert_eq!(trace.last().unwrap().snapshot.values(), vec![1, 3, 5, 8]);
/// ```
pub trait Tracer {
    /// The structure the algorithm runs over.
    type Structure: ?Sized;
    /// Extra per-run parameters, such as a search target.
    type Params;

    fn trace(&self, structure: &Self::Structure, params: &Self::Params) -> Trace;
}

impl Tracer for SortAlgorithm {
    type Structure = [u32];
    type Params = ();

    fn trace(&self, values: &[u32], _: &()) -> Trace {
        sorting::trace(*self, values)
    }
}

impl Tracer for SearchAlgorithm {
    type Structure = [u32];
    type Params = u32;

    fn trace(&self, values: &[u32], target: &u32) -> Trace {
        searching::trace(*self, values, *target)
    }
}

impl Tracer for TreeTraversal {
    type Structure = Bst;
    type Params = ();

    fn trace(&self, tree: &Bst, _: &()) -> Trace {
        tree::trace(*self, tree)
    }
}

impl Tracer for GraphAlgorithm {
    type Structure = Graph;
    type Params = GraphParams;

    fn trace(&self, graph: &Graph, params: &GraphParams) -> Trace {
        graph::trace(*self, graph, params)
    }
}
