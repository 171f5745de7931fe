//! Trace steps: immutable snapshots of one algorithm run.
//!
//! A [`Trace`] is produced once by a tracer and never mutated afterwards.
//! Every step carries a full copy of the structure (not a diff), so any
//! step can be rendered without replaying the ones before it.

use crate::builders::{NodeId, NodeLabel};
use crate::catalogue::Algorithm;

/// Role markers attached to snapshot entries.
///
/// Roles are not mutually exclusive: an element can be `Selected` and
/// `Sorted` in the same step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Role {
    // Sequences
    Comparing,
    Swapping,
    Sorted,
    Pivot,
    Selected,
    // Search
    Checking,
    Found,
    InRange,
    // Trees and graphs
    Visiting,
    Visited,
    Start,
    End,
}

impl Role {
    /// Every role in declaration order.
    pub const ALL: [Role; 12] = [
        Role::Comparing,
        Role::Swapping,
        Role::Sorted,
        Role::Pivot,
        Role::Selected,
        Role::Checking,
        Role::Found,
        Role::InRange,
        Role::Visiting,
        Role::Visited,
        Role::Start,
        Role::End,
    ];

    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// A small set of [`Role`]s stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "Vec<Role>", from = "Vec<Role>"))]
pub struct Roles(u16);

impl Roles {
    /// The empty set.
    pub const NONE: Self = Self(0);

    /// Set containing a single role.
    pub const fn only(role: Role) -> Self {
        Self(role.bit())
    }

    /// Return a copy with `role` added.
    pub const fn with(self, role: Role) -> Self {
        Self(self.0 | role.bit())
    }

    /// Return a copy with `role` added when `cond` holds.
    pub const fn with_if(self, role: Role, cond: bool) -> Self {
        if cond {
            self.with(role)
        } else {
            self
        }
    }

    pub fn insert(&mut self, role: Role) {
        self.0 |= role.bit();
    }

    pub const fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the roles in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |r| self.contains(*r))
    }
}

impl From<Roles> for Vec<Role> {
    fn from(roles: Roles) -> Self {
        roles.iter().collect()
    }
}

impl From<Vec<Role>> for Roles {
    fn from(roles: Vec<Role>) -> Self {
        roles.into_iter().collect()
    }
}

impl FromIterator<Role> for Roles {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter().fold(Roles::NONE, Roles::with)
    }
}

/// A snapshot entry together with its role markers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marked<T> {
    pub item: T,
    pub roles: Roles,
}

impl<T> Marked<T> {
    pub fn new(item: T, roles: Roles) -> Self {
        Self { item, roles }
    }

    pub fn has(&self, role: Role) -> bool {
        self.roles.contains(role)
    }
}

/// An element of an array being sorted or searched.
///
/// `id` is the element's position in the input and stays attached to the
/// value as it moves, so a renderer can animate the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    pub id: usize,
    pub value: u32,
}

/// A tree node as it appears in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeEntry {
    pub id: NodeId,
    pub value: u32,
}

/// A tentative shortest-path distance.
///
/// `Finite` orders before `Infinite`, so the derived ordering is the one
/// Dijkstra needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Distance {
    Finite(u32),
    Infinite,
}

impl Distance {
    pub const fn finite(self) -> Option<u32> {
        match self {
            Distance::Finite(d) => Some(d),
            Distance::Infinite => None,
        }
    }

    pub const fn is_infinite(self) -> bool {
        matches!(self, Distance::Infinite)
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{d}"),
            Distance::Infinite => write!(f, "∞"),
        }
    }
}

/// A graph node as it appears in a snapshot.
///
/// `distance` is only populated by shortest-path traces.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphEntry {
    pub label: NodeLabel,
    pub distance: Option<Distance>,
}

/// Inclusive binary search window. `left > right` means the window is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchWindow {
    pub left: i64,
    pub right: i64,
    pub mid: Option<i64>,
}

/// Copy of the traced structure at one step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "camelCase"))]
pub enum Snapshot {
    Sequence {
        elements: Vec<Marked<Element>>,
    },
    Search {
        elements: Vec<Marked<Element>>,
        window: Option<SearchWindow>,
    },
    Tree {
        nodes: Vec<Marked<TreeEntry>>,
        current: Option<NodeId>,
        visited: Vec<NodeId>,
    },
    Graph {
        nodes: Vec<Marked<GraphEntry>>,
        current: Option<NodeLabel>,
        visited: Vec<NodeLabel>,
    },
}

impl Snapshot {
    /// Number of entries in the snapshot.
    pub fn len(&self) -> usize {
        match self {
            Snapshot::Sequence { elements } | Snapshot::Search { elements, .. } => elements.len(),
            Snapshot::Tree { nodes, .. } => nodes.len(),
            Snapshot::Graph { nodes, .. } => nodes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Role sets of every entry, in snapshot order.
    pub fn roles(&self) -> Vec<Roles> {
        match self {
            Snapshot::Sequence { elements } | Snapshot::Search { elements, .. } => {
                elements.iter().map(|e| e.roles).collect()
            }
            Snapshot::Tree { nodes, .. } => nodes.iter().map(|n| n.roles).collect(),
            Snapshot::Graph { nodes, .. } => nodes.iter().map(|n| n.roles).collect(),
        }
    }

    /// Positions of the entries carrying `role`.
    pub fn positions_with(&self, role: Role) -> Vec<usize> {
        self.roles()
            .into_iter()
            .enumerate()
            .filter(|(_, roles)| roles.contains(role))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles().iter().any(|r| r.contains(role))
    }

    /// Array elements for sequence and search snapshots.
    pub fn elements(&self) -> Option<&[Marked<Element>]> {
        match self {
            Snapshot::Sequence { elements } | Snapshot::Search { elements, .. } => Some(elements),
            _ => None,
        }
    }

    /// Element values in position order; empty for trees and graphs.
    pub fn values(&self) -> Vec<u32> {
        self.elements()
            .map(|els| els.iter().map(|e| e.item.value).collect())
            .unwrap_or_default()
    }

    /// Visit order so far for tree and graph snapshots.
    pub fn visited_len(&self) -> usize {
        match self {
            Snapshot::Tree { visited, .. } => visited.len(),
            Snapshot::Graph { visited, .. } => visited.len(),
            _ => 0,
        }
    }
}

/// One entry of the shortest-path side channel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceEntry {
    pub node: NodeLabel,
    pub distance: Distance,
}

/// Algorithm-specific side channel. At most one is attached to a step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "items", rename_all = "camelCase"))]
pub enum Auxiliary {
    /// Queue contents, front first.
    Queue(Vec<String>),
    /// Stack contents, bottom first.
    Stack(Vec<String>),
    /// Best-known distance per node, in node input order.
    Distances(Vec<DistanceEntry>),
}

/// What happened at a step. Drives statistics and lets a renderer pick an
/// animation without parsing the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum StepKind {
    Start,
    Compare,
    Swap,
    Select,
    Pivot,
    Divide,
    Merge,
    Place,
    Check,
    Narrow,
    Found,
    NotFound,
    Descend,
    Visit,
    Enqueue,
    Push,
    Relax,
    Finish,
}

impl StepKind {
    /// Steps that evaluate one comparison against the data.
    pub const fn is_comparison(self) -> bool {
        matches!(self, StepKind::Compare | StepKind::Check)
    }

    /// Steps that end a trace.
    pub const fn is_terminal(self) -> bool {
        matches!(self, StepKind::Finish | StepKind::Found | StepKind::NotFound)
    }
}

/// One immutable snapshot of simulation state plus a description.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TraceStep {
    pub kind: StepKind,
    pub description: String,
    /// Index into the algorithm's reference code lines.
    pub highlight: Option<usize>,
    pub snapshot: Snapshot,
    pub auxiliary: Option<Auxiliary>,
}

/// Counters tallied while the algorithm ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceMetrics {
    pub comparisons: usize,
    pub swaps: usize,
}

/// The full ordered list of steps produced by one simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    algorithm: Algorithm,
    steps: Vec<TraceStep>,
    metrics: TraceMetrics,
}

impl Trace {
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<&TraceStep> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The terminal step, if any step was recorded.
    pub fn last(&self) -> Option<&TraceStep> {
        self.steps.last()
    }

    pub fn metrics(&self) -> TraceMetrics {
        self.metrics
    }

    /// Position of the element marked `Found` in the terminal step.
    pub fn found_index(&self) -> Option<usize> {
        let last = self.last()?;
        if last.kind != StepKind::Found {
            return None;
        }
        last.snapshot.positions_with(Role::Found).first().copied()
    }
}

/// Accumulates steps for a tracer and tallies metrics as they are pushed.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    steps: Vec<TraceStep>,
    metrics: TraceMetrics,
}

impl Recorder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(
        &mut self,
        kind: StepKind,
        highlight: Option<usize>,
        description: String,
        snapshot: Snapshot,
        auxiliary: Option<Auxiliary>,
    ) {
        if kind.is_comparison() {
            self.metrics.comparisons += 1;
        }
        if kind == StepKind::Swap {
            self.metrics.swaps += 1;
        }
        self.steps.push(TraceStep {
            kind,
            description,
            highlight,
            snapshot,
            auxiliary,
        });
    }

    pub(crate) fn finish(self, algorithm: impl Into<Algorithm>) -> Trace {
        Trace {
            algorithm: algorithm.into(),
            steps: self.steps,
            metrics: self.metrics,
        }
    }
}
