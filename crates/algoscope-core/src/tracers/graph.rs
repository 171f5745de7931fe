//! Graph traversal and shortest-path tracers.
//!
//! Neighbours are enumerated in edge insertion order. Dijkstra selects the
//! unvisited node with the smallest tentative distance, breaking ties by
//! node input order, and stops once only unreachable nodes remain.

use std::collections::VecDeque;

use crate::builders::Graph;
use crate::catalogue::GraphAlgorithm;
use crate::error::Result;
use crate::step::{
    Auxiliary, Distance, DistanceEntry, GraphEntry, Marked, Recorder, Role, Roles, Snapshot,
    StepKind, Trace,
};

/// Validated endpoints for a graph trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphParams {
    start: usize,
    end: Option<usize>,
}

impl GraphParams {
    /// Resolve endpoint labels against `graph`.
    ///
    /// Unknown labels are rejected here, before any tracing happens.
    pub fn new(graph: &Graph, start: &str, end: Option<&str>) -> Result<Self> {
        let start = graph.require(start)?;
        let end = end.map(|label| graph.require(label)).transpose()?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> Option<usize> {
        self.end
    }
}

/// Record `algorithm` over `graph` from the start node in `params`.
pub fn trace(algorithm: GraphAlgorithm, graph: &Graph, params: &GraphParams) -> Trace {
    let view = View { graph, params };
    let mut rec = Recorder::new();

    if params.start >= graph.len() {
        let description = if graph.is_empty() {
            "Graph is empty: nothing to explore"
        } else {
            "Start node is not in the graph"
        };
        rec.push(
            StepKind::Finish,
            None,
            description.to_string(),
            view.snapshot(None, &[], None),
            None,
        );
        return rec.finish(algorithm);
    }

    match algorithm {
        GraphAlgorithm::Bfs => breadth_first(&view, &mut rec),
        GraphAlgorithm::Dfs => depth_first(&view, &mut rec),
        GraphAlgorithm::Dijkstra => dijkstra(&view, &mut rec),
    }
    rec.finish(algorithm)
}

struct View<'a> {
    graph: &'a Graph,
    params: &'a GraphParams,
}

impl View<'_> {
    fn label(&self, node: usize) -> String {
        self.graph.label(node).to_string()
    }

    fn labels(&self, nodes: impl IntoIterator<Item = usize>) -> Vec<String> {
        nodes.into_iter().map(|n| self.label(n)).collect()
    }

    fn snapshot(
        &self,
        current: Option<usize>,
        visited: &[usize],
        distances: Option<&[Distance]>,
    ) -> Snapshot {
        let nodes = self
            .graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let roles = Roles::NONE
                    .with_if(Role::Visiting, current == Some(i))
                    .with_if(Role::Visited, visited.contains(&i))
                    .with_if(Role::Start, self.params.start == i)
                    .with_if(Role::End, self.params.end == Some(i));
                let entry = GraphEntry {
                    label: label.clone(),
                    distance: distances.map(|d| d[i]),
                };
                Marked::new(entry, roles)
            })
            .collect();
        Snapshot::Graph {
            nodes,
            current: current.map(|c| self.graph.label(c).clone()),
            visited: visited.iter().map(|&v| self.graph.label(v).clone()).collect(),
        }
    }

    fn distance_table(&self, distances: &[Distance]) -> Option<Auxiliary> {
        Some(Auxiliary::Distances(
            self.graph
                .nodes()
                .iter()
                .zip(distances)
                .map(|(node, &distance)| DistanceEntry {
                    node: node.clone(),
                    distance,
                })
                .collect(),
        ))
    }
}

fn breadth_first(view: &View<'_>, rec: &mut Recorder) {
    let graph = view.graph;
    let start = view.params.start;
    let mut queue = VecDeque::from([start]);
    let mut visited = Vec::with_capacity(graph.len());
    let pending =
        |queue: &VecDeque<usize>| Some(Auxiliary::Queue(view.labels(queue.iter().copied())));

    rec.push(
        StepKind::Start,
        Some(1),
        format!("Starting BFS from node {}", view.label(start)),
        view.snapshot(None, &visited, None),
        pending(&queue),
    );

    while let Some(current) = queue.pop_front() {
        if visited.contains(&current) {
            continue;
        }
        visited.push(current);
        rec.push(
            StepKind::Visit,
            Some(6),
            format!("Visiting node {}", view.label(current)),
            view.snapshot(Some(current), &visited, None),
            pending(&queue),
        );

        for (neighbor, _) in graph.neighbors(current) {
            if visited.contains(&neighbor) || queue.contains(&neighbor) {
                continue;
            }
            queue.push_back(neighbor);
            rec.push(
                StepKind::Enqueue,
                Some(9),
                format!("Adding neighbor {} to queue", view.label(neighbor)),
                view.snapshot(Some(current), &visited, None),
                pending(&queue),
            );
        }
    }

    rec.push(
        StepKind::Finish,
        None,
        format!(
            "BFS traversal completed! Order: {}",
            view.labels(visited.iter().copied()).join(" → ")
        ),
        view.snapshot(None, &visited, None),
        None,
    );
}

fn depth_first(view: &View<'_>, rec: &mut Recorder) {
    let graph = view.graph;
    let start = view.params.start;
    let mut stack = vec![start];
    let mut visited = Vec::with_capacity(graph.len());
    let pending = |stack: &[usize]| Some(Auxiliary::Stack(view.labels(stack.iter().copied())));

    rec.push(
        StepKind::Start,
        Some(1),
        format!("Starting DFS from node {}", view.label(start)),
        view.snapshot(None, &visited, None),
        pending(&stack),
    );

    while let Some(current) = stack.pop() {
        if visited.contains(&current) {
            continue;
        }
        visited.push(current);
        rec.push(
            StepKind::Visit,
            Some(6),
            format!("Visiting node {}", view.label(current)),
            view.snapshot(Some(current), &visited, None),
            pending(&stack),
        );

        for (neighbor, _) in graph.neighbors(current) {
            if visited.contains(&neighbor) || stack.contains(&neighbor) {
                continue;
            }
            stack.push(neighbor);
            rec.push(
                StepKind::Push,
                Some(9),
                format!("Adding neighbor {} to stack", view.label(neighbor)),
                view.snapshot(Some(current), &visited, None),
                pending(&stack),
            );
        }
    }

    rec.push(
        StepKind::Finish,
        None,
        format!(
            "DFS traversal completed! Order: {}",
            view.labels(visited.iter().copied()).join(" → ")
        ),
        view.snapshot(None, &visited, None),
        None,
    );
}

fn dijkstra(view: &View<'_>, rec: &mut Recorder) {
    let graph = view.graph;
    let start = view.params.start;
    let n = graph.len();
    let mut distances = vec![Distance::Infinite; n];
    let mut previous: Vec<Option<usize>> = vec![None; n];
    let mut done = vec![false; n];
    let mut visited = Vec::with_capacity(n);
    distances[start] = Distance::Finite(0);

    rec.push(
        StepKind::Start,
        Some(4),
        format!("Initializing distances from {}", view.label(start)),
        view.snapshot(None, &visited, Some(&distances)),
        view.distance_table(&distances),
    );

    loop {
        let Some(current) = (0..n).filter(|&i| !done[i]).min_by_key(|&i| (distances[i], i)) else {
            break;
        };
        let Distance::Finite(base) = distances[current] else {
            break;
        };
        done[current] = true;
        visited.push(current);
        rec.push(
            StepKind::Visit,
            Some(8),
            format!("Visiting node {} with distance {base}", view.label(current)),
            view.snapshot(Some(current), &visited, Some(&distances)),
            view.distance_table(&distances),
        );

        for (neighbor, weight) in graph.neighbors(current) {
            if done[neighbor] {
                continue;
            }
            let candidate = base.saturating_add(weight);
            if Distance::Finite(candidate) < distances[neighbor] {
                distances[neighbor] = Distance::Finite(candidate);
                previous[neighbor] = Some(current);
                rec.push(
                    StepKind::Relax,
                    Some(12),
                    format!("Updated distance to {}: {candidate}", view.label(neighbor)),
                    view.snapshot(Some(current), &visited, Some(&distances)),
                    view.distance_table(&distances),
                );
            }
        }
    }

    let mut description = "Dijkstra's algorithm completed!".to_string();
    if let Some(end) = view.params.end {
        match distances[end] {
            Distance::Finite(total) => {
                let mut path = vec![end];
                while let Some(prev) = previous[path[path.len() - 1]] {
                    path.push(prev);
                }
                path.reverse();
                description.push_str(&format!(
                    " Shortest path: {} (distance {total})",
                    view.labels(path).join(" → ")
                ));
            }
            Distance::Infinite => description.push_str(&format!(
                " {} is unreachable from {}",
                view.label(end),
                view.label(start)
            )),
        }
    }
    rec.push(
        StepKind::Finish,
        None,
        description,
        view.snapshot(None, &visited, Some(&distances)),
        None,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params(graph: &Graph, start: &str) -> GraphParams {
        GraphParams::new(graph, start, None).unwrap()
    }

    fn final_visited(trace: &Trace) -> Vec<String> {
        match &trace.last().unwrap().snapshot {
            Snapshot::Graph { visited, .. } => visited.iter().map(|l| l.to_string()).collect(),
            other => panic!("unexpected snapshot {other:?}"),
        }
    }

    fn final_distances(trace: &Trace) -> Vec<Distance> {
        match &trace.last().unwrap().snapshot {
            Snapshot::Graph { nodes, .. } => {
                nodes.iter().map(|n| n.item.distance.unwrap()).collect()
            }
            other => panic!("unexpected snapshot {other:?}"),
        }
    }

    fn reachable(graph: &Graph, start: usize) -> Vec<bool> {
        let mut seen = vec![false; graph.len()];
        let mut stack = vec![start];
        while let Some(n) = stack.pop() {
            if std::mem::replace(&mut seen[n], true) {
                continue;
            }
            stack.extend(graph.neighbors(n).map(|(m, _)| m));
        }
        seen
    }

    /// Bellman-Ford relaxation, used as the brute-force reference.
    fn shortest_paths(graph: &Graph, start: usize) -> Vec<Distance> {
        let mut dist = vec![Distance::Infinite; graph.len()];
        dist[start] = Distance::Finite(0);
        for _ in 0..graph.len() {
            for e in graph.edges() {
                for (a, b) in [(e.from, e.to), (e.to, e.from)] {
                    if let Distance::Finite(d) = dist[a] {
                        if Distance::Finite(d + e.weight) < dist[b] {
                            dist[b] = Distance::Finite(d + e.weight);
                        }
                    }
                }
            }
        }
        dist
    }

    fn triangle() -> Graph {
        let mut graph = Graph::new();
        for label in ["A", "B", "C"] {
            graph.add_node(label).unwrap();
        }
        graph.add_edge("A", "B", 1).unwrap();
        graph.add_edge("B", "C", 1).unwrap();
        graph.add_edge("A", "C", 5).unwrap();
        graph
    }

    #[test]
    fn dijkstra_triangle_example() {
        let graph = triangle();
        let trace = trace(GraphAlgorithm::Dijkstra, &graph, &params(&graph, "A"));
        assert_eq!(
            final_distances(&trace),
            vec![Distance::Finite(0), Distance::Finite(1), Distance::Finite(2)]
        );
        assert!(trace.last().unwrap().auxiliary.is_none());
    }

    #[test]
    fn sample_graph_orders() {
        let graph = Graph::sample();
        let p = params(&graph, "A");
        assert_eq!(
            final_visited(&trace(GraphAlgorithm::Bfs, &graph, &p)),
            vec!["A", "B", "D", "C", "E", "F", "G"]
        );
        assert_eq!(
            final_visited(&trace(GraphAlgorithm::Dfs, &graph, &p)),
            vec!["A", "D", "E", "F", "G", "C", "B"]
        );
    }

    #[test]
    fn dijkstra_reports_path_to_end() {
        let graph = Graph::sample();
        let p = GraphParams::new(&graph, "A", Some("G")).unwrap();
        let trace = trace(GraphAlgorithm::Dijkstra, &graph, &p);
        let last = trace.last().unwrap();
        assert!(
            last.description.ends_with("Shortest path: A → B → C → G (distance 9)"),
            "{}",
            last.description
        );
        let ends = last.snapshot.positions_with(Role::End);
        assert_eq!(ends, vec![6]);
    }

    #[test]
    fn unreachable_nodes_keep_infinite_distance() {
        let mut graph = triangle();
        graph.add_node("Z").unwrap();
        let p = GraphParams::new(&graph, "A", Some("Z")).unwrap();

        let trace = trace(GraphAlgorithm::Dijkstra, &graph, &p);
        assert_eq!(final_distances(&trace)[3], Distance::Infinite);
        assert!(trace.last().unwrap().description.ends_with("Z is unreachable from A"));

        let bfs = trace_bfs_visited(&graph, &p);
        assert!(!bfs.contains(&"Z".to_string()));
    }

    fn trace_bfs_visited(graph: &Graph, p: &GraphParams) -> Vec<String> {
        final_visited(&trace(GraphAlgorithm::Bfs, graph, p))
    }

    #[test]
    fn traversals_expose_pending_nodes() {
        let graph = triangle();
        let p = params(&graph, "A");
        let bfs = trace(GraphAlgorithm::Bfs, &graph, &p);
        assert_eq!(bfs.get(0).unwrap().auxiliary, Some(Auxiliary::Queue(vec!["A".into()])));
        let dfs = trace(GraphAlgorithm::Dfs, &graph, &p);
        assert_eq!(dfs.get(0).unwrap().auxiliary, Some(Auxiliary::Stack(vec!["A".into()])));
    }

    #[test]
    fn unknown_start_is_rejected_before_tracing() {
        let graph = triangle();
        assert!(GraphParams::new(&graph, "Q", None).is_err());
        assert!(GraphParams::new(&graph, "A", Some("Q")).is_err());
    }

    #[test]
    fn stale_params_yield_terminal_only() {
        let graph = triangle();
        let p = params(&graph, "C");
        for algorithm in GraphAlgorithm::ALL {
            let trace = trace(algorithm, &Graph::new(), &p);
            assert_eq!(trace.len(), 1);
            assert!(trace.last().unwrap().kind.is_terminal());
        }
    }

    fn arb_graph() -> impl Strategy<Value = Graph> {
        (1usize..8)
            .prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n, 1u32..=9), 0..16)))
            .prop_map(|(n, edges)| {
                let mut graph = Graph::new();
                for i in 0..n {
                    graph.add_node(char::from(b'A' + i as u8).to_string()).unwrap();
                }
                for (a, b, w) in edges {
                    let (a, b) = (graph.label(a).to_string(), graph.label(b).to_string());
                    // Self-loops and repeated pairs are rejected; skip them.
                    let _ = graph.add_edge(&a, &b, w);
                }
                graph
            })
    }

    proptest! {
        #[test]
        fn prop_traversals_visit_reachable_set_once(graph in arb_graph()) {
            let p = params(&graph, "A");
            let expected: Vec<bool> = reachable(&graph, 0);
            for algorithm in GraphAlgorithm::ALL {
                let trace = trace(algorithm, &graph, &p);
                let visits: Vec<&Snapshot> = trace
                    .steps()
                    .iter()
                    .filter(|s| s.kind == StepKind::Visit)
                    .map(|s| &s.snapshot)
                    .collect();
                let mut seen = vec![false; graph.len()];
                for snapshot in visits {
                    let Snapshot::Graph { current: Some(label), .. } = snapshot else {
                        panic!("visit step without current node");
                    };
                    let i = graph.index_of(label.as_str()).unwrap();
                    prop_assert!(!seen[i], "{} visited twice", label);
                    seen[i] = true;
                }
                prop_assert_eq!(&seen, &expected);
            }
        }

        #[test]
        fn prop_dijkstra_matches_brute_force(graph in arb_graph()) {
            let p = params(&graph, "A");
            let trace = trace(GraphAlgorithm::Dijkstra, &graph, &p);
            prop_assert_eq!(final_distances(&trace), shortest_paths(&graph, 0));
        }

        #[test]
        fn prop_finalized_distances_never_change(graph in arb_graph()) {
            let p = params(&graph, "A");
            let trace = trace(GraphAlgorithm::Dijkstra, &graph, &p);
            let mut finalized: Vec<Option<Distance>> = vec![None; graph.len()];
            for step in trace.steps() {
                let Snapshot::Graph { nodes, visited, .. } = &step.snapshot else {
                    continue;
                };
                for label in visited {
                    let i = graph.index_of(label.as_str()).unwrap();
                    let d = nodes[i].item.distance.unwrap();
                    match finalized[i] {
                        Some(prev) => prop_assert_eq!(prev, d),
                        None => finalized[i] = Some(d),
                    }
                }
            }
        }
    }
}
