//! Sorting tracers: bubble, quick, merge, insertion and selection sort.
//!
//! Every tracer sorts a private working copy of [`Element`]s. Swap steps
//! show the array after the exchange with both positions marked
//! `Swapping`; merge sort lays out the not-yet-merged remainder after the
//! merged prefix, so every snapshot is a permutation of the input.

use crate::catalogue::SortAlgorithm;
use crate::step::{Element, Marked, Recorder, Role, Roles, Snapshot, StepKind, Trace};

/// Record the full run of `algorithm` over `values`.
pub fn trace(algorithm: SortAlgorithm, values: &[u32]) -> Trace {
    let mut arr: Vec<Element> = values
        .iter()
        .enumerate()
        .map(|(id, &value)| Element { id, value })
        .collect();
    let mut rec = Recorder::new();

    match algorithm {
        SortAlgorithm::Bubble => bubble(&mut arr, &mut rec),
        SortAlgorithm::Quick => {
            let mut settled = vec![false; arr.len()];
            let len = arr.len();
            quick(&mut arr, &mut rec, &mut settled, 0, len);
        }
        SortAlgorithm::Merge => {
            if arr.len() > 1 {
                let right = arr.len() - 1;
                merge_sort(&mut arr, &mut rec, 0, right);
            }
        }
        SortAlgorithm::Insertion => insertion(&mut arr, &mut rec),
        SortAlgorithm::Selection => selection(&mut arr, &mut rec),
    }

    let description = if arr.is_empty() {
        "Nothing to sort: the array is empty".to_string()
    } else {
        "Array is completely sorted!".to_string()
    };
    rec.push(
        StepKind::Finish,
        None,
        description,
        snapshot(&arr, |_| Roles::only(Role::Sorted)),
        None,
    );
    rec.finish(algorithm)
}

fn snapshot(arr: &[Element], roles: impl Fn(usize) -> Roles) -> Snapshot {
    Snapshot::Sequence {
        elements: arr
            .iter()
            .enumerate()
            .map(|(k, &el)| Marked::new(el, roles(k)))
            .collect(),
    }
}

fn bubble(arr: &mut [Element], rec: &mut Recorder) {
    let n = arr.len();
    for i in 0..n.saturating_sub(1) {
        let sorted_from = n - i;
        for j in 0..n - i - 1 {
            rec.push(
                StepKind::Compare,
                Some(2),
                format!("Comparing elements {} and {}", arr[j].value, arr[j + 1].value),
                snapshot(arr, |k| {
                    Roles::NONE
                        .with_if(Role::Comparing, k == j || k == j + 1)
                        .with_if(Role::Sorted, k >= sorted_from)
                }),
                None,
            );
            if arr[j].value > arr[j + 1].value {
                arr.swap(j, j + 1);
                rec.push(
                    StepKind::Swap,
                    Some(3),
                    format!("Swapping {} and {}", arr[j + 1].value, arr[j].value),
                    snapshot(arr, |k| {
                        Roles::NONE
                            .with_if(Role::Swapping, k == j || k == j + 1)
                            .with_if(Role::Sorted, k >= sorted_from)
                    }),
                    None,
                );
            }
        }
        let placed = n - i - 1;
        rec.push(
            StepKind::Place,
            Some(0),
            format!("Element {} is in correct position", arr[placed].value),
            snapshot(arr, |k| Roles::NONE.with_if(Role::Sorted, k >= placed)),
            None,
        );
    }
}

/// Lomuto quicksort over the half-open range `lo..hi`.
fn quick(arr: &mut [Element], rec: &mut Recorder, settled: &mut [bool], lo: usize, hi: usize) {
    if hi <= lo {
        return;
    }
    if hi - lo == 1 {
        settled[lo] = true;
        return;
    }

    let p = hi - 1;
    let pivot = arr[p].value;
    rec.push(
        StepKind::Pivot,
        Some(2),
        format!("Choosing pivot element: {pivot}"),
        snapshot(arr, |k| {
            Roles::NONE
                .with_if(Role::Pivot, k == p)
                .with_if(Role::Sorted, settled[k])
        }),
        None,
    );

    let mut i = lo;
    for j in lo..p {
        rec.push(
            StepKind::Compare,
            Some(3),
            format!("Comparing {} with pivot {pivot}", arr[j].value),
            snapshot(arr, |k| {
                Roles::NONE
                    .with_if(Role::Comparing, k == j)
                    .with_if(Role::Pivot, k == p)
                    .with_if(Role::Sorted, settled[k])
            }),
            None,
        );
        if arr[j].value < pivot {
            if i != j {
                let (a, b) = (arr[i].value, arr[j].value);
                arr.swap(i, j);
                rec.push(
                    StepKind::Swap,
                    Some(4),
                    format!("Swapping {a} and {b}"),
                    snapshot(arr, |k| {
                        Roles::NONE
                            .with_if(Role::Swapping, k == i || k == j)
                            .with_if(Role::Pivot, k == p)
                            .with_if(Role::Sorted, settled[k])
                    }),
                    None,
                );
            }
            i += 1;
        }
    }

    if i != p {
        arr.swap(i, p);
        rec.push(
            StepKind::Swap,
            Some(5),
            format!("Placing pivot {pivot} in correct position"),
            snapshot(arr, |k| {
                Roles::NONE
                    .with_if(Role::Swapping, k == i || k == p)
                    .with_if(Role::Sorted, settled[k])
            }),
            None,
        );
    }
    settled[i] = true;
    rec.push(
        StepKind::Place,
        Some(6),
        format!("Pivot {pivot} is final at position {i}"),
        snapshot(arr, |k| Roles::NONE.with_if(Role::Sorted, settled[k])),
        None,
    );

    quick(arr, rec, settled, lo, i);
    quick(arr, rec, settled, i + 1, hi);
}

/// Top-down merge sort over the inclusive range `left..=right`.
fn merge_sort(arr: &mut [Element], rec: &mut Recorder, left: usize, right: usize) {
    if left >= right {
        return;
    }
    let mid = (left + right) / 2;
    rec.push(
        StepKind::Divide,
        Some(2),
        format!("Dividing array from {left} to {right}"),
        snapshot(arr, |k| Roles::NONE.with_if(Role::Selected, (left..=right).contains(&k))),
        None,
    );
    merge_sort(arr, rec, left, mid);
    merge_sort(arr, rec, mid + 1, right);
    merge(arr, rec, left, mid, right);
}

fn merge(arr: &mut [Element], rec: &mut Recorder, left: usize, mid: usize, right: usize) {
    let left_run = arr[left..=mid].to_vec();
    let right_run = arr[mid + 1..=right].to_vec();
    let (mut i, mut j, mut k) = (0, 0, left);

    while i < left_run.len() && j < right_run.len() {
        lay_out(arr, k, &left_run[i..], &right_run[j..]);
        let lhs = k;
        let rhs = k + (left_run.len() - i);
        rec.push(
            StepKind::Compare,
            Some(5),
            format!(
                "Merging: comparing {} and {}",
                left_run[i].value, right_run[j].value
            ),
            snapshot(arr, |x| {
                Roles::NONE
                    .with_if(Role::Comparing, x == lhs || x == rhs)
                    .with_if(Role::Selected, (left..=right).contains(&x))
            }),
            None,
        );
        if left_run[i].value <= right_run[j].value {
            arr[k] = left_run[i];
            i += 1;
        } else {
            arr[k] = right_run[j];
            j += 1;
        }
        k += 1;
    }
    lay_out(arr, k, &left_run[i..], &right_run[j..]);

    rec.push(
        StepKind::Merge,
        Some(6),
        format!("Merged subarray from {left} to {right}"),
        snapshot(arr, |_| Roles::NONE),
        None,
    );
}

/// Write the unmerged remainders of both runs after the merged prefix.
fn lay_out(arr: &mut [Element], at: usize, rest_left: &[Element], rest_right: &[Element]) {
    for (slot, el) in arr[at..].iter_mut().zip(rest_left.iter().chain(rest_right)) {
        *slot = *el;
    }
}

fn insertion(arr: &mut [Element], rec: &mut Recorder) {
    for i in 1..arr.len() {
        let key = arr[i].value;
        rec.push(
            StepKind::Select,
            Some(1),
            format!("Selecting element {key} to insert"),
            snapshot(arr, |k| {
                Roles::NONE
                    .with_if(Role::Selected, k == i)
                    .with_if(Role::Sorted, k < i)
            }),
            None,
        );

        let mut j = i;
        while j > 0 {
            let at = j;
            rec.push(
                StepKind::Compare,
                Some(2),
                format!("Comparing {} with {key}", arr[at - 1].value),
                snapshot(arr, |k| {
                    Roles::NONE
                        .with_if(Role::Comparing, k == at - 1)
                        .with_if(Role::Selected, k == at)
                        .with_if(Role::Sorted, k <= i && k != at)
                }),
                None,
            );
            if arr[at - 1].value <= key {
                break;
            }
            arr.swap(at - 1, at);
            rec.push(
                StepKind::Swap,
                Some(3),
                format!("Shifting {} one place right", arr[at].value),
                snapshot(arr, |k| {
                    Roles::NONE
                        .with_if(Role::Swapping, k == at - 1 || k == at)
                        .with_if(Role::Sorted, k <= i && k != at - 1)
                }),
                None,
            );
            j -= 1;
        }

        rec.push(
            StepKind::Place,
            Some(5),
            format!("Inserted {key} at position {j}"),
            snapshot(arr, |k| Roles::NONE.with_if(Role::Sorted, k <= i)),
            None,
        );
    }
}

fn selection(arr: &mut [Element], rec: &mut Recorder) {
    let n = arr.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        rec.push(
            StepKind::Select,
            Some(1),
            format!("Finding minimum element from position {i}"),
            snapshot(arr, |k| {
                Roles::NONE
                    .with_if(Role::Selected, k == i)
                    .with_if(Role::Sorted, k < i)
            }),
            None,
        );

        for j in i + 1..n {
            let current_min = min;
            rec.push(
                StepKind::Compare,
                Some(3),
                format!(
                    "Comparing {} with current minimum {}",
                    arr[j].value, arr[current_min].value
                ),
                snapshot(arr, |k| {
                    Roles::NONE
                        .with_if(Role::Comparing, k == j || k == current_min)
                        .with_if(Role::Selected, k == i)
                        .with_if(Role::Sorted, k < i)
                }),
                None,
            );
            if arr[j].value < arr[min].value {
                min = j;
            }
        }

        if min != i {
            let (a, b) = (arr[i].value, arr[min].value);
            arr.swap(i, min);
            rec.push(
                StepKind::Swap,
                Some(4),
                format!("Swapping {a} with minimum {b}"),
                snapshot(arr, |k| {
                    Roles::NONE
                        .with_if(Role::Swapping, k == i || k == min)
                        .with_if(Role::Sorted, k < i)
                }),
                None,
            );
        }

        rec.push(
            StepKind::Place,
            Some(0),
            format!("Element {} is in correct position", arr[i].value),
            snapshot(arr, |k| Roles::NONE.with_if(Role::Sorted, k <= i)),
            None,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::TraceStep;
    use proptest::prelude::*;

    fn ids(step: &TraceStep) -> Vec<usize> {
        step.snapshot
            .elements()
            .unwrap()
            .iter()
            .map(|e| e.item.id)
            .collect()
    }

    fn check_invariants(values: &[u32], trace: &Trace) {
        let mut expected = values.to_vec();
        expected.sort_unstable();

        let last = trace.last().expect("trace is never empty");
        assert_eq!(last.kind, StepKind::Finish);
        assert_eq!(last.snapshot.values(), expected);
        assert!(last.auxiliary.is_none());
        assert_eq!(last.snapshot.positions_with(Role::Sorted).len(), values.len());

        for step in trace.steps() {
            assert_eq!(step.snapshot.len(), values.len());
            // Every snapshot is a permutation of the input elements.
            let mut seen = ids(step);
            seen.sort_unstable();
            assert_eq!(seen, (0..values.len()).collect::<Vec<_>>());
        }

        let comparing = trace
            .steps()
            .iter()
            .filter(|s| s.snapshot.has_role(Role::Comparing))
            .count();
        assert_eq!(trace.metrics().comparisons, comparing);

        let swaps = trace.steps().iter().filter(|s| s.kind == StepKind::Swap).count();
        assert_eq!(trace.metrics().swaps, swaps);
    }

    fn check_swaps_exchange(trace: &Trace) {
        for pair in trace.steps().windows(2) {
            let (prev, step) = (&pair[0], &pair[1]);
            if step.kind != StepKind::Swap {
                continue;
            }
            let marked = step.snapshot.positions_with(Role::Swapping);
            assert_eq!(marked.len(), 2, "{}", step.description);
            let (a, b) = (marked[0], marked[1]);
            let (before, after) = (ids(prev), ids(step));
            assert_eq!(before[a], after[b]);
            assert_eq!(before[b], after[a]);
            for k in (0..before.len()).filter(|&k| k != a && k != b) {
                assert_eq!(before[k], after[k]);
            }
        }
    }

    #[test]
    fn bubble_sort_example() {
        let trace = trace(SortAlgorithm::Bubble, &[5, 3, 8, 1]);
        assert!(trace.len() > 0);
        let last = trace.last().unwrap();
        assert_eq!(last.snapshot.values(), vec![1, 3, 5, 8]);
        assert!(last
            .snapshot
            .elements()
            .unwrap()
            .iter()
            .all(|e| e.has(Role::Sorted)));
        // 3 + 2 + 1 comparisons for four elements.
        assert_eq!(trace.metrics().comparisons, 6);
    }

    #[test]
    fn all_algorithms_sort_the_example() {
        let values = [38, 27, 43, 3, 9, 82, 10, 27];
        for algorithm in SortAlgorithm::ALL {
            let trace = trace(algorithm, &values);
            check_invariants(&values, &trace);
            check_swaps_exchange(&trace);
        }
    }

    #[test]
    fn empty_and_single_inputs_yield_terminal_only() {
        for algorithm in SortAlgorithm::ALL {
            let empty = trace(algorithm, &[]);
            assert_eq!(empty.len(), 1);
            assert!(empty.last().unwrap().snapshot.is_empty());

            let single = trace(algorithm, &[7]);
            assert_eq!(single.len(), 1);
            assert_eq!(single.last().unwrap().snapshot.values(), vec![7]);
        }
    }

    #[test]
    fn already_sorted_input_has_no_swaps() {
        let quadratic = [
            SortAlgorithm::Bubble,
            SortAlgorithm::Insertion,
            SortAlgorithm::Selection,
        ];
        for algorithm in quadratic {
            let trace = trace(algorithm, &[1, 2, 3, 4, 5]);
            assert_eq!(trace.metrics().swaps, 0, "{algorithm:?}");
        }
    }

    #[test]
    fn insertion_sort_compares_until_key_fits() {
        // Inserting 1 into [2, 3]: compares with 3 and 2, no failing compare.
        let trace = trace(SortAlgorithm::Insertion, &[2, 3, 1]);
        // i=1: compare 2<=3 (break) -> 1; i=2: compare 3, compare 2 -> 2.
        assert_eq!(trace.metrics().comparisons, 3);
        assert_eq!(trace.metrics().swaps, 2);
    }

    #[test]
    fn quick_sort_marks_pivots() {
        let trace = trace(SortAlgorithm::Quick, &[4, 1, 3]);
        let pivot_steps: Vec<_> = trace
            .steps()
            .iter()
            .filter(|s| s.kind == StepKind::Pivot)
            .collect();
        assert!(!pivot_steps.is_empty());
        for step in pivot_steps {
            assert_eq!(step.snapshot.positions_with(Role::Pivot).len(), 1);
        }
    }

    #[test]
    fn merge_sort_divides_before_merging() {
        let trace = trace(SortAlgorithm::Merge, &[2, 1]);
        let kinds: Vec<StepKind> = trace.steps().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![StepKind::Divide, StepKind::Compare, StepKind::Merge, StepKind::Finish]
        );
    }

    #[test]
    fn consecutive_step_kinds_change_highlight() {
        for algorithm in SortAlgorithm::ALL {
            let trace = trace(algorithm, &[9, 4, 7, 1, 8, 2]);
            for pair in trace.steps().windows(2) {
                if pair[0].kind != pair[1].kind {
                    assert_ne!(
                        pair[0].highlight,
                        pair[1].highlight,
                        "{algorithm:?}: {:?} -> {:?}",
                        pair[0].kind,
                        pair[1].kind
                    );
                }
            }
        }
    }

    proptest! {
        #[test]
        fn prop_sorts_any_input(values in prop::collection::vec(1u32..=999, 0..30)) {
            for algorithm in SortAlgorithm::ALL {
                let trace = trace(algorithm, &values);
                check_invariants(&values, &trace);
                check_swaps_exchange(&trace);
            }
        }

        #[test]
        fn prop_tracing_is_deterministic(values in prop::collection::vec(1u32..=999, 0..20)) {
            for algorithm in SortAlgorithm::ALL {
                prop_assert_eq!(trace(algorithm, &values), trace(algorithm, &values));
            }
        }
    }
}
