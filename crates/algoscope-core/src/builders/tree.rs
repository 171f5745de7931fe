//! Binary search tree stored in an arena.
//!
//! Nodes are addressed by [`NodeId`], their index in insertion order.
//! Duplicate values are ignored, as in a textbook BST without counts.

use rand::Rng;

use super::{check_value, parse_values, MAX_TREE_NODES};
use crate::error::{Error, Result};

/// Values of the sample tree offered to learners.
pub const SAMPLE_TREE: [u32; 11] = [50, 30, 70, 20, 40, 60, 80, 10, 25, 35, 45];

/// Arena index of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
struct BstNode {
    value: u32,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// A binary search tree of at most [`MAX_TREE_NODES`] distinct values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bst {
    nodes: Vec<BstNode>,
    root: Option<NodeId>,
}

impl Bst {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree by inserting `values` in order.
    pub fn from_values(values: &[u32]) -> Result<Self> {
        let mut tree = Self::new();
        for &value in values {
            tree.insert(value)?;
        }
        Ok(tree)
    }

    /// Parse user text and build a fresh tree from it.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_values(&parse_values(text, MAX_TREE_NODES)?)
    }

    /// The fixed eleven-node sample tree.
    pub fn sample() -> Self {
        let mut tree = Self::new();
        for value in SAMPLE_TREE {
            tree.insert_unchecked(value);
        }
        tree
    }

    /// A tree of 8 to 17 distinct values in 1..=100.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let size = rng.gen_range(8..=17);
        let mut values: Vec<u32> = Vec::with_capacity(size);
        while values.len() < size {
            let value = rng.gen_range(1..=100);
            if !values.contains(&value) {
                values.push(value);
            }
        }
        let mut tree = Self::new();
        for value in values {
            tree.insert_unchecked(value);
        }
        tree
    }

    /// Insert a value. Returns `Ok(false)` when the value is already
    /// present; the tree is unchanged in that case.
    pub fn insert(&mut self, value: u32) -> Result<bool> {
        let value = check_value(value)?;
        if self.contains(value) {
            return Ok(false);
        }
        if self.nodes.len() >= MAX_TREE_NODES {
            return Err(Error::invalid(format!("maximum {MAX_TREE_NODES} nodes allowed")));
        }
        self.insert_unchecked(value);
        Ok(true)
    }

    fn insert_unchecked(&mut self, value: u32) {
        let id = NodeId(self.nodes.len());
        let Some(mut current) = self.root else {
            self.root = Some(id);
            self.nodes.push(BstNode {
                value,
                left: None,
                right: None,
            });
            return;
        };
        loop {
            let node = &mut self.nodes[current.0];
            if value == node.value {
                return;
            }
            let link = if value < node.value {
                &mut node.left
            } else {
                &mut node.right
            };
            match *link {
                Some(next) => current = next,
                None => {
                    *link = Some(id);
                    break;
                }
            }
        }
        self.nodes.push(BstNode {
            value,
            left: None,
            right: None,
        });
    }

    pub fn contains(&self, value: u32) -> bool {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            if value == node.value {
                return true;
            }
            current = if value < node.value { node.left } else { node.right };
        }
        false
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Value stored at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    pub fn value(&self, id: NodeId) -> u32 {
        self.nodes[id.0].value
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].left
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].right
    }

    /// All node ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Height in edges of the longest root-to-leaf path; 0 for a single
    /// node, `None` for an empty tree.
    pub fn height(&self) -> Option<usize> {
        fn depth(tree: &Bst, id: NodeId) -> usize {
            let left = tree.left(id).map(|l| 1 + depth(tree, l)).unwrap_or(0);
            let right = tree.right(id).map(|r| 1 + depth(tree, r)).unwrap_or(0);
            left.max(right)
        }
        self.root.map(|root| depth(self, root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn insert_places_values_by_order() {
        let tree = Bst::from_values(&[50, 30, 70, 20, 40]).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(tree.value(root), 50);
        let left = tree.left(root).unwrap();
        assert_eq!(tree.value(left), 30);
        assert_eq!(tree.value(tree.left(left).unwrap()), 20);
        assert_eq!(tree.value(tree.right(left).unwrap()), 40);
        assert_eq!(tree.value(tree.right(root).unwrap()), 70);
    }

    #[test]
    fn duplicates_are_ignored() {
        let mut tree = Bst::from_values(&[5, 3, 5, 3]).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.insert(5), Ok(false));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn node_cap_is_enforced() {
        let values: Vec<u32> = (1..=20).collect();
        let mut tree = Bst::from_values(&values).unwrap();
        assert!(matches!(tree.insert(21), Err(Error::InvalidInput(_))));
        assert_eq!(tree.len(), 20);
        // A duplicate is still fine at the cap.
        assert_eq!(tree.insert(1), Ok(false));
    }

    #[test]
    fn sample_tree_shape() {
        let tree = Bst::sample();
        assert_eq!(tree.len(), SAMPLE_TREE.len());
        assert_eq!(tree.height(), Some(3));
    }

    #[test]
    fn random_tree_has_distinct_values() {
        let mut rng = StdRng::seed_from_u64(42);
        let tree = Bst::random(&mut rng);
        assert!((8..=17).contains(&tree.len()));
        let mut values: Vec<u32> = tree.ids().map(|id| tree.value(id)).collect();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), tree.len());
    }

    #[test]
    fn from_text_rejects_bad_tokens() {
        assert!(Bst::from_text("10 20 abc").is_err());
        assert_eq!(Bst::from_text("10 20").unwrap().len(), 2);
    }
}
