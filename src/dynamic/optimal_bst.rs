//! Optimal binary search tree construction.
//!
//! Keys are sorted by name and their weights normalized to access
//! probabilities. The expected search cost counts the root at depth 1, so a
//! single key with probability `p` costs `p`.

use std::fmt;

use log::debug;

use crate::config::Limits;
use crate::error::{Error, Result};

/// A named key with a non-negative access weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedKey {
    pub name: String,
    pub weight: f64,
}

impl WeightedKey {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// Node of a reconstructed optimal tree. Keys are indices into
/// [`OptimalBst::keys`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BstNode {
    pub key: usize,
    pub left: Option<Box<BstNode>>,
    pub right: Option<Box<BstNode>>,
}

/// Result of the optimal BST recurrence.
///
/// `cost` and `root` are `n x n`; only cells with `i <= j` are filled, the
/// lower triangle stays at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimalBst {
    /// Keys sorted by name.
    pub keys: Vec<String>,
    /// Access probability of each sorted key; sums to 1.
    pub probabilities: Vec<f64>,
    /// `cost[i][j]` is the minimum expected search cost over keys `i..=j`.
    pub cost: Vec<Vec<f64>>,
    /// `root[i][j]` is the key chosen as root of the subtree over `i..=j`.
    pub root: Vec<Vec<usize>>,
}

impl OptimalBst {
    /// Minimum expected search cost over all keys.
    pub fn min_cost(&self) -> f64 {
        self.cost[0][self.keys.len() - 1]
    }

    /// Rebuilds the optimal tree from the root table.
    pub fn tree(&self) -> BstNode {
        self.subtree(0, self.keys.len() - 1)
    }

    fn subtree(&self, i: usize, j: usize) -> BstNode {
        let k = self.root[i][j];
        BstNode {
            key: k,
            left: (k > i).then(|| Box::new(self.subtree(i, k - 1))),
            right: (k < j).then(|| Box::new(self.subtree(k + 1, j))),
        }
    }

    /// Depth of `name` in the optimal tree, counting the root as 1.
    pub fn depth_of(&self, name: &str) -> Option<usize> {
        let target = self.keys.binary_search_by(|k| k.as_str().cmp(name)).ok()?;
        let mut node = self.tree();
        let mut depth = 1;
        loop {
            if node.key == target {
                return Some(depth);
            }
            let next = if target < node.key {
                node.left
            } else {
                node.right
            };
            node = *next?;
            depth += 1;
        }
    }

    /// Expected search cost recomputed from the tree shape, `Σ p(k) · depth(k)`.
    pub fn expected_cost(&self) -> f64 {
        fn walk(node: &BstNode, depth: usize, p: &[f64]) -> f64 {
            let here = p[node.key] * depth as f64;
            let left = node.left.as_ref().map_or(0.0, |n| walk(n, depth + 1, p));
            let right = node.right.as_ref().map_or(0.0, |n| walk(n, depth + 1, p));
            here + left + right
        }
        walk(&self.tree(), 1, &self.probabilities)
    }
}

impl fmt::Display for OptimalBst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.keys.len();
        writeln!(f, "cost")?;
        for i in 0..n {
            for j in 0..n {
                if j < i {
                    write!(f, " {:>8}", "-")?;
                } else {
                    write!(f, " {:>8.2}", self.cost[i][j])?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "root")?;
        for i in 0..n {
            for j in 0..n {
                if j < i {
                    write!(f, " {:>8}", "-")?;
                } else {
                    write!(f, " {:>8}", self.keys[self.root[i][j]])?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "minimum expected cost: {:.4}", self.min_cost())
    }
}

/// Builds the optimal BST tables for the given keys.
///
/// # Examples
///
/// ```
/// use dynprog::dynamic::optimal_bst::{optimal_bst, WeightedKey};
///
/// let keys = vec![
///     WeightedKey::new("c", 1.0),
///     WeightedKey::new("a", 1.0),
///     WeightedKey::new("b", 1.0),
/// ];
/// let bst = optimal_bst(&keys).unwrap();
/// assert!((bst.min_cost() - 5.0 / 3.0).abs() < 1e-12);
/// assert_eq!(bst.keys[bst.root[0][2]], "b");
/// ```
pub fn optimal_bst(keys: &[WeightedKey]) -> Result<OptimalBst> {
    optimal_bst_with_limits(keys, &Limits::default())
}

/// Same as [`optimal_bst`] with caller-supplied bounds.
pub fn optimal_bst_with_limits(keys: &[WeightedKey], limits: &Limits) -> Result<OptimalBst> {
    limits.validate()?;
    let n = keys.len();
    if n == 0 || n > limits.max_keys {
        return Err(Error::out_of_range("number of keys", n, 1, limits.max_keys));
    }

    let mut sorted = keys.to_vec();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    validate_keys(&sorted)?;

    let total: f64 = sorted.iter().map(|k| k.weight).sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(Error::degenerate(format!(
            "total weight must be positive, got {}",
            total
        )));
    }
    let p: Vec<f64> = sorted.iter().map(|k| k.weight / total).collect();

    let (cost, root) = fill_tables(&p);
    let bst = OptimalBst {
        keys: sorted.into_iter().map(|k| k.name).collect(),
        probabilities: p,
        cost,
        root,
    };
    debug!(
        "optimal bst over {} keys: cost {:.4}, root {}",
        n,
        bst.min_cost(),
        bst.keys[bst.root[0][n - 1]]
    );
    Ok(bst)
}

fn validate_keys(sorted: &[WeightedKey]) -> Result<()> {
    for key in sorted {
        if !key.weight.is_finite() || key.weight < 0.0 {
            return Err(Error::invalid_input(format!(
                "weight of '{}' must be a non-negative number, got {}",
                key.name, key.weight
            )));
        }
    }
    if let Some(pair) = sorted.windows(2).find(|w| w[0].name == w[1].name) {
        return Err(Error::invalid_input(format!(
            "duplicate key '{}'",
            pair[0].name
        )));
    }
    Ok(())
}

/// Interval DP over the sorted probabilities.
///
/// Sub-ranges that fall outside `[i, j]` (left of the first key or right of
/// the last) contribute zero. On equal cost the lowest `k` is kept.
fn fill_tables(p: &[f64]) -> (Vec<Vec<f64>>, Vec<Vec<usize>>) {
    let n = p.len();
    let mut cost = vec![vec![0.0_f64; n]; n];
    let mut root = vec![vec![0_usize; n]; n];

    // prefix[i] = p[0] + ... + p[i-1]
    let mut prefix = vec![0.0_f64; n + 1];
    for i in 0..n {
        prefix[i + 1] = prefix[i] + p[i];
        cost[i][i] = p[i];
        root[i][i] = i;
    }

    for length in 2..=n {
        for i in 0..=n - length {
            let j = i + length - 1;
            let weight = prefix[j + 1] - prefix[i];
            let mut best = f64::INFINITY;
            let mut best_k = i;
            for k in i..=j {
                let left = if k > i { cost[i][k - 1] } else { 0.0 };
                let right = if k < j { cost[k + 1][j] } else { 0.0 };
                let candidate = left + right;
                if candidate < best {
                    best = candidate;
                    best_k = k;
                }
            }
            cost[i][j] = best + weight;
            root[i][j] = best_k;
        }
    }

    (cost, root)
}
