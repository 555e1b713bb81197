//! Matrix-chain multiplication ordering.

use std::fmt;

use log::debug;
use ndarray::Array2;

use crate::config::Limits;
use crate::error::{Error, Result};

/// Optimal evaluation order for a chain of matrices.
///
/// For `m` matrices, `cost` and `split` are `m x m`; only the upper triangle
/// (`i <= j`) is meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixChain {
    /// `dims[i]` is the row count of matrix `i`, `dims[i + 1]` its column count.
    pub dims: Vec<u64>,
    /// `cost[i][j]` is the minimum number of scalar multiplications for `A(i+1)..A(j+1)`.
    pub cost: Vec<Vec<u64>>,
    /// `split[i][j]` is the `k` such that the product is split after matrix `k`.
    pub split: Vec<Vec<usize>>,
}

impl MatrixChain {
    /// Number of matrices in the chain.
    pub fn matrix_count(&self) -> usize {
        self.dims.len() - 1
    }

    /// Minimum scalar multiplications for the whole chain.
    pub fn min_cost(&self) -> u64 {
        self.cost[0][self.matrix_count() - 1]
    }

    /// Fully parenthesized order for the whole chain, e.g. `"(A1 × (A2 × A3))"`.
    pub fn order(&self) -> String {
        self.parenthesize(0, self.matrix_count() - 1)
    }

    /// Parenthesized order for the sub-chain `i..=j` (0-based, inclusive),
    /// or `None` if `i > j` or `j` is not a matrix index.
    pub fn order_range(&self, i: usize, j: usize) -> Option<String> {
        (i <= j && j < self.matrix_count()).then(|| self.parenthesize(i, j))
    }

    fn parenthesize(&self, i: usize, j: usize) -> String {
        if i == j {
            return format!("A{}", i + 1);
        }
        let k = self.split[i][j];
        format!("({} × {})", self.parenthesize(i, k), self.parenthesize(k + 1, j))
    }
}

impl fmt::Display for MatrixChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.matrix_count();
        write!(f, "{:>6}", "")?;
        for j in 0..n {
            write!(f, " {:>10}", format!("A{}", j + 1))?;
        }
        writeln!(f)?;
        for i in 0..n {
            write!(f, "{:>6}", format!("A{}", i + 1))?;
            for j in 0..n {
                if j < i {
                    write!(f, " {:>10}", "-")?;
                } else {
                    write!(f, " {:>10}", self.cost[i][j])?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "minimum cost: {}", self.min_cost())?;
        write!(f, "order: {}", self.order())
    }
}

/// Computes the cheapest parenthesization of a matrix chain.
///
/// `dims` has one more entry than there are matrices: matrix `i` is
/// `dims[i] x dims[i + 1]`. Uses [`Limits::default`] for the allowed chain
/// length.
///
/// # Examples
///
/// ```
/// use dynprog::dynamic::matrix_chain::matrix_chain_order;
///
/// let chain = matrix_chain_order(&[10, 20, 30]).unwrap();
/// assert_eq!(chain.min_cost(), 6000);
/// assert_eq!(chain.order(), "(A1 × A2)");
/// ```
pub fn matrix_chain_order(dims: &[u64]) -> Result<MatrixChain> {
    matrix_chain_order_with_limits(dims, &Limits::default())
}

/// Same as [`matrix_chain_order`] with caller-supplied bounds.
pub fn matrix_chain_order_with_limits(dims: &[u64], limits: &Limits) -> Result<MatrixChain> {
    limits.validate()?;
    let matrices = dims.len().saturating_sub(1);
    if matrices < limits.min_matrices || matrices > limits.max_matrices {
        return Err(Error::out_of_range(
            "number of matrices",
            matrices,
            limits.min_matrices,
            limits.max_matrices,
        ));
    }
    validate_dims(dims)?;

    let (cost, split) = fill_tables(dims)?;
    let chain = MatrixChain {
        dims: dims.to_vec(),
        cost,
        split,
    };
    debug!(
        "matrix chain of {} matrices: cost {} via {}",
        matrices,
        chain.min_cost(),
        chain.order()
    );
    Ok(chain)
}

fn validate_dims(dims: &[u64]) -> Result<()> {
    if let Some(pos) = dims.iter().position(|&d| d == 0) {
        return Err(Error::invalid_input(format!(
            "dimension {} must be greater than 0",
            pos
        )));
    }
    Ok(())
}

/// Fills the cost and split tables.
///
/// Sub-chains are processed by increasing length, so both halves of every
/// candidate split are already final when a cell is computed. On equal cost
/// the smallest `k` is kept.
fn fill_tables(dims: &[u64]) -> Result<(Vec<Vec<u64>>, Vec<Vec<usize>>)> {
    let n = dims.len() - 1;
    let mut m = vec![vec![0_u64; n]; n];
    let mut s = vec![vec![0_usize; n]; n];

    let overflow = || Error::invalid_input("multiplication cost overflows u64");

    for chain_length in 2..=n {
        for i in 0..=n - chain_length {
            let j = i + chain_length - 1;
            m[i][j] = u64::MAX;
            for k in i..j {
                let q = dims[i]
                    .checked_mul(dims[k + 1])
                    .and_then(|v| v.checked_mul(dims[j + 1]))
                    .and_then(|v| v.checked_add(m[i][k]))
                    .and_then(|v| v.checked_add(m[k + 1][j]))
                    .ok_or_else(overflow)?;
                if q < m[i][j] {
                    m[i][j] = q;
                    s[i][j] = k;
                }
            }
        }
    }

    Ok((m, s))
}

/// Multiplies a chain of matrices in the optimal order.
///
/// Returns an error if the chain is empty, contains an empty dimension, or
/// two neighbouring matrices are not conformable. The chain length is not
/// bounded by [`Limits`].
///
/// # Examples
///
/// ```
/// use dynprog::dynamic::matrix_chain::evaluate_chain;
/// use ndarray::array;
///
/// let a = array![[1.0, 2.0]];
/// let b = array![[3.0], [4.0]];
/// let c = array![[2.0, 0.5]];
/// let product = evaluate_chain(&[a, b, c]).unwrap();
/// assert_eq!(product, array![[22.0, 5.5]]);
/// ```
pub fn evaluate_chain(matrices: &[Array2<f64>]) -> Result<Array2<f64>> {
    let first = matrices
        .first()
        .ok_or_else(|| Error::invalid_input("no matrices provided"))?;

    let mut dims = Vec::with_capacity(matrices.len() + 1);
    dims.push(first.nrows() as u64);
    for (idx, mat) in matrices.iter().enumerate() {
        if dims[idx] != mat.nrows() as u64 {
            return Err(Error::invalid_input(format!(
                "matrix {} has {} rows but the previous matrix has {} columns",
                idx + 1,
                mat.nrows(),
                dims[idx]
            )));
        }
        dims.push(mat.ncols() as u64);
    }
    validate_dims(&dims)?;

    if matrices.len() == 1 {
        return Ok(first.clone());
    }

    let (_, s) = fill_tables(&dims)?;
    Ok(multiply_chain_rec(matrices, &s, 0, matrices.len() - 1))
}

/// Recursively multiply sub-chains based on split table.
fn multiply_chain_rec(
    matrices: &[Array2<f64>],
    s: &[Vec<usize>],
    i: usize,
    j: usize,
) -> Array2<f64> {
    if i == j {
        return matrices[i].clone();
    }
    let k = s[i][j];
    let left = multiply_chain_rec(matrices, s, i, k);
    let right = multiply_chain_rec(matrices, s, k + 1, j);
    left.dot(&right)
}
