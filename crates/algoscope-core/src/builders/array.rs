//! Array builders for the sorting and searching families.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{check_value, parse_values, MAX_ARRAY_LEN};
use crate::catalogue::SearchAlgorithm;
use crate::error::{Error, Result};

/// Random sorting arrays draw from this range.
const RANDOM_SORT_VALUES: std::ops::RangeInclusive<u32> = 10..=309;

/// Random linear-search arrays draw from this range.
const RANDOM_SEARCH_VALUES: std::ops::RangeInclusive<u32> = 1..=100;

/// Size of generated search arrays.
const RANDOM_SEARCH_LEN: usize = 20;

/// An editable array of values, capped at [`MAX_ARRAY_LEN`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayBuilder {
    values: Vec<u32>,
}

impl ArrayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already validated values.
    pub fn from_values(values: Vec<u32>) -> Result<Self> {
        if values.len() > MAX_ARRAY_LEN {
            return Err(Error::invalid(format!("maximum {MAX_ARRAY_LEN} elements allowed")));
        }
        for &v in &values {
            check_value(v)?;
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replace the contents with values parsed from user text.
    pub fn load_text(&mut self, text: &str) -> Result<()> {
        self.values = parse_values(text, MAX_ARRAY_LEN)?;
        Ok(())
    }

    /// Replace the contents with `size` random values.
    pub fn randomize<R: Rng + ?Sized>(&mut self, size: usize, rng: &mut R) -> Result<()> {
        if size == 0 || size > MAX_ARRAY_LEN {
            return Err(Error::invalid(format!("array size must be 1-{MAX_ARRAY_LEN}")));
        }
        self.values = (0..size).map(|_| rng.gen_range(RANDOM_SORT_VALUES)).collect();
        Ok(())
    }

    /// Append one value.
    pub fn append(&mut self, value: u32) -> Result<()> {
        let value = check_value(value)?;
        if self.values.len() >= MAX_ARRAY_LEN {
            return Err(Error::invalid(format!("maximum {MAX_ARRAY_LEN} elements allowed")));
        }
        self.values.push(value);
        Ok(())
    }

    /// Drop the last value. Does nothing on an empty array.
    pub fn remove_last(&mut self) -> Option<u32> {
        self.values.pop()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// Array plus target for the searching family.
///
/// While binary search is selected the values are kept in ascending order,
/// so the tracer can rely on sorted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchData {
    values: Vec<u32>,
    algorithm: SearchAlgorithm,
    target: u32,
}

impl Default for SearchData {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            algorithm: SearchAlgorithm::default(),
            target: 50,
        }
    }
}

impl SearchData {
    pub fn new(algorithm: SearchAlgorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn algorithm(&self) -> SearchAlgorithm {
        self.algorithm
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Switch algorithm, sorting the data when binary search needs it.
    pub fn set_algorithm(&mut self, algorithm: SearchAlgorithm) {
        self.algorithm = algorithm;
        self.normalize();
    }

    pub fn set_target(&mut self, target: u32) -> Result<()> {
        self.target = check_value(target)?;
        Ok(())
    }

    /// Replace the contents with values parsed from user text.
    ///
    /// The target moves to the first value unless the caller already chose
    /// one away from the default.
    pub fn load_text(&mut self, text: &str) -> Result<()> {
        let values = parse_values(text, MAX_ARRAY_LEN)?;
        self.values = values;
        self.normalize();
        if self.target == Self::default().target {
            if let Some(&first) = self.values.first() {
                self.target = first;
            }
        }
        Ok(())
    }

    /// Generate demo data for the current algorithm and pick a target
    /// from it.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.values = match self.algorithm {
            SearchAlgorithm::Binary => (1..=RANDOM_SEARCH_LEN as u32).map(|i| i * 5).collect(),
            SearchAlgorithm::Linear => (0..RANDOM_SEARCH_LEN)
                .map(|_| rng.gen_range(RANDOM_SEARCH_VALUES))
                .collect(),
        };
        if let Some(&target) = self.values.choose(rng) {
            self.target = target;
        }
    }

    pub fn append(&mut self, value: u32) -> Result<()> {
        let value = check_value(value)?;
        if self.values.len() >= MAX_ARRAY_LEN {
            return Err(Error::invalid(format!("maximum {MAX_ARRAY_LEN} elements allowed")));
        }
        self.values.push(value);
        self.normalize();
        Ok(())
    }

    pub fn remove_last(&mut self) -> Option<u32> {
        self.values.pop()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    fn normalize(&mut self) {
        if self.algorithm.requires_sorted() {
            self.values.sort_unstable();
        }
    }
}
