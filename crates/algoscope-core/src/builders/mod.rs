//! Structure builders: the initial data structures handed to tracers.
//!
//! Builders validate everything. A failed call returns an [`Error`] and
//! leaves the structure exactly as it was; randomness lives here and never
//! in a tracer.

mod array;
mod graph;
mod linear;
mod tree;

pub use array::{ArrayBuilder, SearchData};
pub use graph::{Edge, Graph, NodeLabel, MAX_GRAPH_NODES};
pub use linear::{Operation, OperationKind, ValueQueue, ValueStack, HISTORY_LIMIT};
pub use tree::{Bst, NodeId, SAMPLE_TREE};

use crate::error::{Error, Result};

/// Smallest accepted input value.
pub const MIN_VALUE: u32 = 1;

/// Largest accepted input value.
pub const MAX_VALUE: u32 = 999;

/// Maximum element count for arrays being sorted or searched.
pub const MAX_ARRAY_LEN: usize = 50;

/// Maximum node count for binary search trees.
pub const MAX_TREE_NODES: usize = 20;

/// Parse a comma- or whitespace-separated list of integers.
///
/// Every token must be an integer in `MIN_VALUE..=MAX_VALUE`, and there
/// must be between one and `cap` of them.
///
/// ```
/// use algoscope_core::builders::parse_values;
///
/// assert_eq!(parse_values("5, 3 8,1", 50).unwrap(), vec![5, 3, 8, 1]);
/// assert!(parse_values("5, x", 50).is_err());
/// ```
pub fn parse_values(text: &str, cap: usize) -> Result<Vec<u32>> {
    let values = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(parse_value)
        .collect::<Result<Vec<_>>>()?;

    if values.is_empty() {
        return Err(Error::invalid(format!(
            "enter numbers ({MIN_VALUE}-{MAX_VALUE}) separated by commas or spaces"
        )));
    }
    if values.len() > cap {
        return Err(Error::invalid(format!("maximum {cap} elements allowed")));
    }
    Ok(values)
}

/// Parse and range-check a single value.
pub fn parse_value(token: &str) -> Result<u32> {
    let value: u32 = token
        .trim()
        .parse()
        .map_err(|_| Error::invalid(format!("'{}' is not a number", token.trim())))?;
    check_value(value)
}

pub(crate) fn check_value(value: u32) -> Result<u32> {
    if (MIN_VALUE..=MAX_VALUE).contains(&value) {
        Ok(value)
    } else {
        Err(Error::invalid(format!(
            "{value} is outside {MIN_VALUE}-{MAX_VALUE}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_separators() {
        assert_eq!(parse_values(" 1,2  3,\n4 ", 50).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn rejects_blank_input() {
        assert!(matches!(parse_values("  , ", 50), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(parse_values("0", 50).is_err());
        assert!(parse_values("1000", 50).is_err());
        assert!(parse_values("-4", 50).is_err());
        assert_eq!(parse_values("1 999", 50).unwrap(), vec![1, 999]);
    }

    #[test]
    fn enforces_cap() {
        let text = (1..=21).map(|v| v.to_string()).collect::<Vec<_>>().join(",");
        assert_eq!(
            parse_values(&text, MAX_TREE_NODES),
            Err(Error::InvalidInput("maximum 20 elements allowed".into()))
        );
        assert_eq!(parse_values(&text, MAX_ARRAY_LEN).unwrap().len(), 21);
    }
}
