//! Linear and binary search tracers.

use crate::catalogue::SearchAlgorithm;
use crate::step::{
    Element, Marked, Recorder, Role, Roles, SearchWindow, Snapshot, StepKind, Trace,
};

/// Record a search for `target` in `values`.
///
/// Binary search expects `values` sorted ascending; [`SearchData`]
/// keeps it that way whenever binary search is selected.
///
/// With duplicates, linear search reports the first matching index.
/// Binary search reports whichever match its midpoint lands on first,
/// which need not be the leftmost.
///
/// [`SearchData`]: crate::builders::SearchData
pub fn trace(algorithm: SearchAlgorithm, values: &[u32], target: u32) -> Trace {
    let arr: Vec<Element> = values
        .iter()
        .enumerate()
        .map(|(id, &value)| Element { id, value })
        .collect();
    let mut rec = Recorder::new();

    match algorithm {
        SearchAlgorithm::Linear => linear(&arr, target, &mut rec),
        SearchAlgorithm::Binary => {
            debug_assert!(
                values.windows(2).all(|w| w[0] <= w[1]),
                "binary search input must be sorted"
            );
            binary(&arr, target, &mut rec)
        }
    }
    rec.finish(algorithm)
}

fn snapshot(
    arr: &[Element],
    window: Option<SearchWindow>,
    roles: impl Fn(usize) -> Roles,
) -> Snapshot {
    Snapshot::Search {
        elements: arr
            .iter()
            .enumerate()
            .map(|(k, &el)| Marked::new(el, roles(k)))
            .collect(),
        window,
    }
}

fn linear(arr: &[Element], target: u32, rec: &mut Recorder) {
    for (i, el) in arr.iter().enumerate() {
        rec.push(
            StepKind::Check,
            Some(1),
            format!("Checking index {i}: {} == {target}?", el.value),
            snapshot(arr, None, |k| Roles::NONE.with_if(Role::Checking, k == i)),
            None,
        );
        if el.value == target {
            rec.push(
                StepKind::Found,
                Some(2),
                format!("Found {target} at index {i}!"),
                snapshot(arr, None, |k| Roles::NONE.with_if(Role::Found, k == i)),
                None,
            );
            return;
        }
    }
    rec.push(
        StepKind::NotFound,
        Some(5),
        format!("{target} not found in the array"),
        snapshot(arr, None, |_| Roles::NONE),
        None,
    );
}

fn binary(arr: &[Element], target: u32, rec: &mut Recorder) {
    let mut left: i64 = 0;
    let mut right: i64 = arr.len() as i64 - 1;

    while left <= right {
        let mid = left + (right - left) / 2;
        let window = SearchWindow {
            left,
            right,
            mid: Some(mid),
        };
        let at = mid as usize;
        let value = arr[at].value;
        rec.push(
            StepKind::Check,
            Some(2),
            format!("Checking middle index {mid}: {value} (range {left}-{right})"),
            snapshot(arr, Some(window), |k| {
                Roles::NONE
                    .with_if(Role::Checking, k == at)
                    .with_if(Role::InRange, in_window(k, left, right))
            }),
            None,
        );

        if value == target {
            rec.push(
                StepKind::Found,
                Some(3),
                format!("Found {target} at index {mid}!"),
                snapshot(arr, Some(window), |k| Roles::NONE.with_if(Role::Found, k == at)),
                None,
            );
            return;
        }

        let (highlight, description) = if value < target {
            left = mid + 1;
            (4, format!("{value} < {target}, searching right half"))
        } else {
            right = mid - 1;
            (5, format!("{value} > {target}, searching left half"))
        };
        let narrowed = SearchWindow {
            left,
            right,
            mid: None,
        };
        rec.push(
            StepKind::Narrow,
            Some(highlight),
            description,
            snapshot(arr, Some(narrowed), |k| {
                Roles::NONE.with_if(Role::InRange, in_window(k, left, right))
            }),
            None,
        );
    }

    rec.push(
        StepKind::NotFound,
        Some(7),
        format!("{target} not found in the array"),
        snapshot(
            arr,
            Some(SearchWindow {
                left,
                right,
                mid: None,
            }),
            |_| Roles::NONE,
        ),
        None,
    );
}

fn in_window(k: usize, left: i64, right: i64) -> bool {
    let k = k as i64;
    left <= k && k <= right
}
