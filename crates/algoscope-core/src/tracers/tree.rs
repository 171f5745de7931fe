//! Binary tree traversal tracers.
//!
//! The recursive orders are computed as a pure list of [`Event`]s and then
//! folded into steps, so no visited list is threaded through the recursion.
//! BFS and DFS run the usual queue and stack loops and expose the pending
//! values as an auxiliary channel.

use std::collections::VecDeque;

use crate::builders::{Bst, NodeId};
use crate::catalogue::TreeTraversal;
use crate::step::{Auxiliary, Marked, Recorder, Role, Roles, Snapshot, StepKind, Trace, TreeEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn name(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Descend { from: NodeId, side: Side },
    Visit(NodeId),
}

/// Record `order` over `tree`.
pub fn trace(order: TreeTraversal, tree: &Bst) -> Trace {
    let mut rec = Recorder::new();
    let Some(root) = tree.root() else {
        rec.push(
            StepKind::Finish,
            None,
            "Tree is empty: nothing to traverse".to_string(),
            snapshot(tree, None, &[]),
            None,
        );
        return rec.finish(order);
    };

    let visited = match order {
        TreeTraversal::InOrder | TreeTraversal::PreOrder | TreeTraversal::PostOrder => {
            replay(tree, order, &walk(tree, root, order), &mut rec)
        }
        TreeTraversal::Bfs => breadth_first(tree, root, &mut rec),
        TreeTraversal::Dfs => depth_first(tree, root, &mut rec),
    };

    let path = visited
        .iter()
        .map(|&id| tree.value(id).to_string())
        .collect::<Vec<_>>()
        .join(" → ");
    rec.push(
        StepKind::Finish,
        None,
        format!("Traversal complete: {path}"),
        snapshot(tree, None, &visited),
        None,
    );
    rec.finish(order)
}

fn snapshot(tree: &Bst, current: Option<NodeId>, visited: &[NodeId]) -> Snapshot {
    let nodes = tree
        .ids()
        .map(|id| {
            let roles = Roles::NONE
                .with_if(Role::Visiting, current == Some(id))
                .with_if(Role::Visited, visited.contains(&id));
            Marked::new(
                TreeEntry {
                    id,
                    value: tree.value(id),
                },
                roles,
            )
        })
        .collect();
    Snapshot::Tree {
        nodes,
        current,
        visited: visited.to_vec(),
    }
}

/// Events of a recursive traversal rooted at `id`.
fn walk(tree: &Bst, id: NodeId, order: TreeTraversal) -> Vec<Event> {
    let subtree = |child: Option<NodeId>, side: Side| -> Vec<Event> {
        match child {
            Some(child) => {
                let mut events = vec![Event::Descend { from: id, side }];
                events.extend(walk(tree, child, order));
                events
            }
            None => Vec::new(),
        }
    };
    let left = subtree(tree.left(id), Side::Left);
    let right = subtree(tree.right(id), Side::Right);
    let visit = vec![Event::Visit(id)];

    match order {
        TreeTraversal::PreOrder => [visit, left, right].concat(),
        TreeTraversal::PostOrder => [left, right, visit].concat(),
        _ => [left, visit, right].concat(),
    }
}

/// Reference code line for a recursive traversal event.
fn line(order: TreeTraversal, event: Event) -> usize {
    match (order, event) {
        (TreeTraversal::PreOrder, Event::Visit(_)) => 2,
        (TreeTraversal::PreOrder, Event::Descend { side: Side::Left, .. }) => 3,
        (TreeTraversal::PostOrder, Event::Descend { side: Side::Left, .. }) => 2,
        (TreeTraversal::PostOrder, Event::Descend { side: Side::Right, .. }) => 3,
        (TreeTraversal::PostOrder, Event::Visit(_)) => 4,
        (_, Event::Descend { side: Side::Left, .. }) => 2,
        (_, Event::Visit(_)) => 3,
        (_, Event::Descend { side: Side::Right, .. }) => 4,
    }
}

fn replay(tree: &Bst, order: TreeTraversal, events: &[Event], rec: &mut Recorder) -> Vec<NodeId> {
    let mut visited = Vec::with_capacity(tree.len());
    for &event in events {
        let highlight = Some(line(order, event));
        match event {
            Event::Descend { from, side } => rec.push(
                StepKind::Descend,
                highlight,
                format!("Moving to {} child of {}", side.name(), tree.value(from)),
                snapshot(tree, Some(from), &visited),
                None,
            ),
            Event::Visit(id) => {
                visited.push(id);
                rec.push(
                    StepKind::Visit,
                    highlight,
                    format!("Visiting node {}", tree.value(id)),
                    snapshot(tree, Some(id), &visited),
                    None,
                );
            }
        }
    }
    visited
}

fn breadth_first(tree: &Bst, root: NodeId, rec: &mut Recorder) -> Vec<NodeId> {
    let pending = |queue: &VecDeque<NodeId>| {
        Some(Auxiliary::Queue(
            queue.iter().map(|&id| tree.value(id).to_string()).collect(),
        ))
    };
    let mut queue = VecDeque::from([root]);
    let mut visited = Vec::with_capacity(tree.len());
    rec.push(
        StepKind::Start,
        Some(1),
        "Starting BFS traversal - adding root to queue".to_string(),
        snapshot(tree, None, &visited),
        pending(&queue),
    );

    while let Some(id) = queue.pop_front() {
        visited.push(id);
        rec.push(
            StepKind::Visit,
            Some(4),
            format!("Visiting node {} (dequeued from front)", tree.value(id)),
            snapshot(tree, Some(id), &visited),
            pending(&queue),
        );
        for (child, side, highlight) in [
            (tree.left(id), Side::Left, 5),
            (tree.right(id), Side::Right, 6),
        ] {
            if let Some(child) = child {
                queue.push_back(child);
                rec.push(
                    StepKind::Enqueue,
                    Some(highlight),
                    format!("Adding {} child {} to queue", side.name(), tree.value(child)),
                    snapshot(tree, Some(id), &visited),
                    pending(&queue),
                );
            }
        }
    }
    visited
}

fn depth_first(tree: &Bst, root: NodeId, rec: &mut Recorder) -> Vec<NodeId> {
    let pending = |stack: &[NodeId]| {
        Some(Auxiliary::Stack(
            stack.iter().map(|&id| tree.value(id).to_string()).collect(),
        ))
    };
    let mut stack = vec![root];
    let mut visited = Vec::with_capacity(tree.len());
    rec.push(
        StepKind::Start,
        Some(1),
        "Starting DFS traversal - adding root to stack".to_string(),
        snapshot(tree, None, &visited),
        pending(&stack),
    );

    while let Some(id) = stack.pop() {
        visited.push(id);
        rec.push(
            StepKind::Visit,
            Some(4),
            format!("Visiting node {} (popped from stack)", tree.value(id)),
            snapshot(tree, Some(id), &visited),
            pending(&stack),
        );
        // Right first so the left child is popped next.
        for (child, side, highlight) in [
            (tree.right(id), Side::Right, 5),
            (tree.left(id), Side::Left, 6),
        ] {
            if let Some(child) = child {
                stack.push(child);
                rec.push(
                    StepKind::Push,
                    Some(highlight),
                    format!("Adding {} child {} to stack", side.name(), tree.value(child)),
                    snapshot(tree, Some(id), &visited),
                    pending(&stack),
                );
            }
        }
    }
    visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn visit_values(tree: &Bst, trace: &Trace) -> Vec<u32> {
        match &trace.last().unwrap().snapshot {
            Snapshot::Tree { visited, .. } => visited.iter().map(|&id| tree.value(id)).collect(),
            other => panic!("unexpected snapshot {other:?}"),
        }
    }

    fn check_visits_once(tree: &Bst, trace: &Trace) {
        let visits: Vec<NodeId> = trace
            .steps()
            .iter()
            .filter(|s| s.kind == StepKind::Visit)
            .filter_map(|s| match &s.snapshot {
                Snapshot::Tree { current, .. } => *current,
                _ => None,
            })
            .collect();
        assert_eq!(visits.len(), tree.len());
        let mut sorted = visits.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), tree.len());
        assert_eq!(trace.last().unwrap().snapshot.visited_len(), tree.len());
    }

    #[test]
    fn in_order_example() {
        let tree = Bst::from_values(&[50, 30, 70, 20, 40]).unwrap();
        let trace = trace(TreeTraversal::InOrder, &tree);
        assert_eq!(visit_values(&tree, &trace), vec![20, 30, 40, 50, 70]);
        assert_eq!(
            trace.last().unwrap().description,
            "Traversal complete: 20 → 30 → 40 → 50 → 70"
        );
    }

    #[test]
    fn textbook_orders_on_sample_tree() {
        let tree = Bst::sample();
        let order = |t| visit_values(&tree, &trace(t, &tree));
        assert_eq!(
            order(TreeTraversal::PreOrder),
            vec![50, 30, 20, 10, 25, 40, 35, 45, 70, 60, 80]
        );
        assert_eq!(
            order(TreeTraversal::PostOrder),
            vec![10, 25, 20, 35, 45, 40, 30, 60, 80, 70, 50]
        );
        assert_eq!(
            order(TreeTraversal::Bfs),
            vec![50, 30, 70, 20, 40, 60, 80, 10, 25, 35, 45]
        );
        assert_eq!(order(TreeTraversal::Dfs), order(TreeTraversal::PreOrder));
    }

    #[test]
    fn every_traversal_visits_each_node_once() {
        let tree = Bst::sample();
        for order in TreeTraversal::ALL {
            check_visits_once(&tree, &trace(order, &tree));
        }
    }

    #[test]
    fn bfs_exposes_queue_contents() {
        let tree = Bst::from_values(&[2, 1, 3]).unwrap();
        let trace = trace(TreeTraversal::Bfs, &tree);
        let first = trace.get(0).unwrap();
        assert_eq!(first.kind, StepKind::Start);
        assert_eq!(first.auxiliary, Some(Auxiliary::Queue(vec!["2".into()])));
        let enqueued = trace.get(3).unwrap();
        assert_eq!(enqueued.kind, StepKind::Enqueue);
        assert_eq!(
            enqueued.auxiliary,
            Some(Auxiliary::Queue(vec!["1".into(), "3".into()]))
        );
        assert!(trace.last().unwrap().auxiliary.is_none());
    }

    #[test]
    fn recursive_steps_use_order_specific_lines() {
        let tree = Bst::from_values(&[2, 1]).unwrap();
        let lines = |t| -> Vec<Option<usize>> {
            trace(t, &tree).steps().iter().map(|s| s.highlight).collect()
        };
        assert_eq!(lines(TreeTraversal::InOrder), vec![Some(2), Some(3), Some(3), None]);
        assert_eq!(lines(TreeTraversal::PreOrder), vec![Some(2), Some(3), Some(2), None]);
        assert_eq!(lines(TreeTraversal::PostOrder), vec![Some(2), Some(4), Some(4), None]);
    }

    #[test]
    fn empty_tree_is_terminal_only() {
        for order in TreeTraversal::ALL {
            let trace = trace(order, &Bst::new());
            assert_eq!(trace.len(), 1);
            assert_eq!(trace.last().unwrap().kind, StepKind::Finish);
        }
    }

    proptest! {
        #[test]
        fn prop_traversals_cover_the_tree(values in prop::collection::hash_set(1u32..=999, 0..20)) {
            let values: Vec<u32> = values.into_iter().collect();
            let tree = Bst::from_values(&values).unwrap();
            for order in TreeTraversal::ALL {
                let trace = trace(order, &tree);
                check_visits_once(&tree, &trace);
            }
            let mut sorted = values.clone();
            sorted.sort_unstable();
            let in_order = trace(TreeTraversal::InOrder, &tree);
            prop_assert_eq!(visit_values(&tree, &in_order), sorted);
        }
    }
}
