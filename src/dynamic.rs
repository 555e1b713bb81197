//! Dynamic-programming calculators.
//!
//! Each calculator is a pure function: it validates its input, fills its
//! tables from scratch and returns them. Nothing is cached between calls.

pub mod equipment_replacement;
pub mod matrix_chain;
pub mod optimal_bst;
pub mod series_probability;

// Re-export the calculators with descriptive names
pub use equipment_replacement::{
    plan_equipment_replacement, plan_equipment_replacement_with_limits, ReplacementProblem,
    ReplacementSchedule,
};
pub use matrix_chain::{
    evaluate_chain, matrix_chain_order, matrix_chain_order_with_limits, MatrixChain,
};
pub use optimal_bst::{optimal_bst, optimal_bst_with_limits, BstNode, OptimalBst, WeightedKey};
pub use series_probability::{
    series_win_probability, series_win_probability_with_limits, SeriesConfig, SeriesOutcome,
};
