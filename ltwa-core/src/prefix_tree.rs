//! Bucketed prefix tree over the promiscuously normalized alphabet
//!
//! A keyed multimap: `add(key, value)` attaches a value to a key, and
//! `get(query)` returns every value whose key is a prefix of `query`,
//! possibly with false positives (buckets may hold longer residuals), never
//! false negatives. Downstream matching is exact, so over-approximation is
//! fine and keeps the tree shallow.
//!
//! Nodes are bucketed: a dense 27-slot child array (the alphabet is
//! `[a-z ]` after promiscuous normalization) plus an overflow bucket of
//! `(residual_key, value)` pairs that terminate at the node. A node only
//! grows children once its bucket overflows, which keeps allocation count
//! low for the many patterns sharing short common prefixes.

/// Bucket capacity before a node is split.
const MAX_NODE_SIZE: usize = 5;

const ALPHABET: usize = 27;

#[inline]
fn slot(c: char) -> Option<usize> {
    match c {
        'a'..='z' => Some(c as usize - 'a' as usize),
        ' ' => Some(26),
        _ => None,
    }
}

#[derive(Debug, Clone)]
struct Node<T> {
    children: [Option<Box<Node<T>>>; ALPHABET],
    /// Pairs of (residual key, value) deposited at this node.
    bucket: Vec<(Vec<char>, T)>,
    /// Whether this node has ever been split. Once split, inserts walk
    /// into (possibly fresh) children instead of depositing here.
    split: bool,
}

impl<T> Node<T> {
    fn new() -> Self {
        Self {
            children: std::array::from_fn(|_| None),
            bucket: Vec::new(),
            split: false,
        }
    }
}

/// A bucketed prefix-tree multimap.
#[derive(Debug, Clone)]
pub struct PrefixTree<T> {
    root: Node<T>,
    len: usize,
}

impl<T> Default for PrefixTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PrefixTree<T> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: Node::new(),
            len: 0,
        }
    }

    /// Number of entries added.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Attaches `value` under `key`.
    pub fn add(&mut self, key: &str, value: T) {
        let key: Vec<char> = key.chars().collect();
        Self::insert_at(&mut self.root, &key, value);
        self.len += 1;
    }

    fn insert_at(node: &mut Node<T>, key: &[char], value: T) {
        let Some((&c, rest)) = key.split_first() else {
            // Empty residuals always live in the bucket; they cannot be
            // pushed further down.
            node.bucket.push((Vec::new(), value));
            return;
        };
        let Some(s) = slot(c) else {
            node.bucket.push((key.to_vec(), value));
            if node.bucket.len() > MAX_NODE_SIZE && !node.split {
                Self::split_node(node);
            }
            return;
        };
        if node.children[s].is_none() && node.split {
            node.children[s] = Some(Box::new(Node::new()));
        }
        match node.children[s].as_deref_mut() {
            Some(child) => Self::insert_at(child, rest, value),
            None => {
                node.bucket.push((key.to_vec(), value));
                if node.bucket.len() > MAX_NODE_SIZE {
                    Self::split_node(node);
                }
            }
        }
    }

    fn split_node(node: &mut Node<T>) {
        node.split = true;
        let pairs = std::mem::take(&mut node.bucket);
        for (residual, value) in pairs {
            if residual.is_empty() || slot(residual[0]).is_none() {
                node.bucket.push((residual, value));
            } else {
                // The node is now marked split, so this descends into a
                // (possibly fresh) child and may cascade further splits.
                Self::insert_at(node, &residual, value);
            }
        }
    }

    /// Returns every value whose key is a prefix of `query`, plus possible
    /// false positives from buckets holding longer residuals.
    pub fn get(&self, query: &[char]) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::new();
        let mut node = &self.root;
        out.extend(node.bucket.iter().map(|(_, v)| v.clone()));
        for &c in query {
            let Some(s) = slot(c) else { break };
            let Some(child) = node.children[s].as_deref() else {
                break;
            };
            node = child;
            out.extend(node.bucket.iter().map(|(_, v)| v.clone()));
        }
        out
    }
}
