//! Probability that team A wins a best-of-`n` series.
//!
//! The state `(a, b)` means A still needs `a` wins and B still needs `b`
//! wins. Which venue the next game is played at depends on how many games
//! have already been played, which is recoverable from the state itself.

use std::fmt;

use log::debug;

use crate::config::Limits;
use crate::error::{Error, Result};

/// Parameters of a series between team A and team B.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesConfig {
    /// Maximum number of games in the series.
    pub max_games: usize,
    /// Probability that A wins a game played at home.
    pub p_home: f64,
    /// Probability that A wins a game played away.
    pub p_away: f64,
    /// `home_games[g]` is true when A is at home for game `g` (0-based).
    pub home_games: Vec<bool>,
}

impl SeriesConfig {
    /// A series in which A plays every game at home.
    pub fn all_home(max_games: usize, p_home: f64, p_away: f64) -> Self {
        Self {
            max_games,
            p_home,
            p_away,
            home_games: vec![true; max_games],
        }
    }
}

/// Win-probability table for a series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesOutcome {
    /// Wins a team needs to clinch, `ceil(n / 2)`.
    pub wins_needed: usize,
    /// `table[a][b]` is A's probability of winning the series from state
    /// `(a, b)`. The cell `(0, 0)` has no meaning and is `None`.
    pub table: Vec<Vec<Option<f64>>>,
    /// Probability that A wins the series from the start.
    pub p_a: f64,
    /// Probability that B wins the series from the start.
    pub p_b: f64,
}

impl SeriesOutcome {
    /// A's win probability from state `(a, b)`, or `None` for `(0, 0)` and
    /// states outside the table.
    pub fn probability(&self, a: usize, b: usize) -> Option<f64> {
        self.table.get(a)?.get(b).copied().flatten()
    }
}

impl fmt::Display for SeriesOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4}", "a\\b")?;
        for b in 0..=self.wins_needed {
            write!(f, " {:>8}", b)?;
        }
        writeln!(f)?;
        for (a, row) in self.table.iter().enumerate() {
            write!(f, "{:>4}", a)?;
            for cell in row {
                match cell {
                    Some(p) => write!(f, " {:>8.4}", p)?,
                    None => write!(f, " {:>8}", "-")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "P(A) = {:.4}, P(B) = {:.4}", self.p_a, self.p_b)
    }
}

/// Computes A's probability of winning the series from every state.
///
/// # Examples
///
/// ```
/// use dynprog::dynamic::series_probability::{series_win_probability, SeriesConfig};
///
/// let config = SeriesConfig {
///     max_games: 1,
///     p_home: 0.6,
///     p_away: 0.4,
///     home_games: vec![false],
/// };
/// let outcome = series_win_probability(&config).unwrap();
/// assert_eq!(outcome.wins_needed, 1);
/// assert_eq!(outcome.p_a, 0.4);
/// ```
pub fn series_win_probability(config: &SeriesConfig) -> Result<SeriesOutcome> {
    series_win_probability_with_limits(config, &Limits::default())
}

/// Same as [`series_win_probability`] with caller-supplied bounds.
pub fn series_win_probability_with_limits(
    config: &SeriesConfig,
    limits: &Limits,
) -> Result<SeriesOutcome> {
    limits.validate()?;
    validate(config, limits)?;

    let n = config.max_games;
    let wins_needed = n.div_ceil(2);
    let mut table = vec![vec![Some(0.0_f64); wins_needed + 1]; wins_needed + 1];
    table[0][0] = None;
    for b in 1..=wins_needed {
        table[0][b] = Some(1.0);
    }

    // Rows are filled top to bottom and left to right, so (a-1, b) and
    // (a, b-1) are always available.
    for a in 1..=wins_needed {
        for b in 1..=wins_needed {
            let games_played = (wins_needed - a) + (wins_needed - b);
            if games_played >= n {
                // Unreachable: no games left and nobody has clinched.
                continue;
            }
            let p_win = if config.home_games[games_played] {
                config.p_home
            } else {
                config.p_away
            };
            let win = table[a - 1][b].unwrap_or(0.0);
            let lose = table[a][b - 1].unwrap_or(0.0);
            table[a][b] = Some(p_win * win + (1.0 - p_win) * lose);
        }
    }

    let p_a = table[wins_needed][wins_needed].unwrap_or(0.0);
    let outcome = SeriesOutcome {
        wins_needed,
        table,
        p_a,
        p_b: 1.0 - p_a,
    };
    debug!(
        "best-of-{} series: P(A) = {:.4}, P(B) = {:.4}",
        n, outcome.p_a, outcome.p_b
    );
    Ok(outcome)
}

fn validate(config: &SeriesConfig, limits: &Limits) -> Result<()> {
    if config.max_games == 0 || config.max_games > limits.max_games {
        return Err(Error::out_of_range(
            "number of games",
            config.max_games,
            1,
            limits.max_games,
        ));
    }
    for (field, p) in [
        ("home win probability", config.p_home),
        ("away win probability", config.p_away),
    ] {
        // NaN fails both comparisons and is rejected here too.
        if !(p > 0.0 && p < 1.0) {
            return Err(Error::out_of_range(field, p, "0 (exclusive)", "1 (exclusive)"));
        }
    }
    if config.home_games.len() != config.max_games {
        return Err(Error::invalid_input(format!(
            "expected {} home/away flags, got {}",
            config.max_games,
            config.home_games.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_best_of_one_home() {
        let outcome = series_win_probability(&SeriesConfig::all_home(1, 0.7, 0.2)).unwrap();
        assert_eq!(outcome.wins_needed, 1);
        assert_eq!(outcome.table.len(), 2);
        assert_relative_eq!(outcome.p_a, 0.7);
        assert_relative_eq!(outcome.p_b, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_best_of_one_away() {
        let config = SeriesConfig {
            max_games: 1,
            p_home: 0.7,
            p_away: 0.2,
            home_games: vec![false],
        };
        let outcome = series_win_probability(&config).unwrap();
        assert_relative_eq!(outcome.p_a, 0.2);
    }

    #[test]
    fn test_boundaries() {
        let outcome = series_win_probability(&SeriesConfig::all_home(7, 0.6, 0.5)).unwrap();
        assert_eq!(outcome.wins_needed, 4);
        assert_eq!(outcome.probability(0, 0), None);
        for k in 1..=4 {
            assert_eq!(outcome.probability(0, k), Some(1.0));
            assert_eq!(outcome.probability(k, 0), Some(0.0));
        }
        assert_eq!(outcome.probability(5, 1), None);
    }

    #[test]
    fn test_best_of_three_constant_probability() {
        // P(A wins 2 of 3) with p = 0.6: p^2 + 2 p^2 (1 - p) = 0.648
        let outcome = series_win_probability(&SeriesConfig::all_home(3, 0.6, 0.3)).unwrap();
        assert_abs_diff_eq!(outcome.p_a, 0.648, epsilon = 1e-12);
    }

    #[test]
    fn test_venue_changes_probability() {
        // Games: home, away, home. A wins with
        // ph*pr + ph*(1-pr)*ph + (1-ph)*pr*ph
        let (ph, pr) = (0.7, 0.4);
        let config = SeriesConfig {
            max_games: 3,
            p_home: ph,
            p_away: pr,
            home_games: vec![true, false, true],
        };
        let outcome = series_win_probability(&config).unwrap();
        let expected = ph * pr + ph * (1.0 - pr) * ph + (1.0 - ph) * pr * ph;
        assert_abs_diff_eq!(outcome.p_a, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_even_series_length() {
        // Best-of-4 still needs 2 wins, the same as best-of-3.
        let outcome = series_win_probability(&SeriesConfig::all_home(4, 0.5, 0.5)).unwrap();
        assert_eq!(outcome.wins_needed, 2);
        assert_abs_diff_eq!(outcome.p_a, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(outcome.p_a + outcome.p_b, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_symmetric_probability_is_half() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in (1..=11).step_by(2) {
            let flags: Vec<bool> = (0..n).map(|_| rng.gen_bool(0.5)).collect();
            let config = SeriesConfig {
                max_games: n,
                p_home: 0.5,
                p_away: 0.5,
                home_games: flags,
            };
            let outcome = series_win_probability(&config).unwrap();
            assert_abs_diff_eq!(outcome.p_a, 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_idempotent() {
        let mut rng = StdRng::seed_from_u64(42);
        let flags: Vec<bool> = (0..7).map(|_| rng.gen_bool(0.5)).collect();
        let config = SeriesConfig {
            max_games: 7,
            p_home: rng.gen_range(0.05..0.95),
            p_away: rng.gen_range(0.05..0.95),
            home_games: flags,
        };
        let first = series_win_probability(&config).unwrap();
        let second = series_win_probability(&config).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.p_a.to_bits(), second.p_a.to_bits());
    }

    #[test]
    fn test_rejects_out_of_range_probabilities() {
        for p in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
            let result = series_win_probability(&SeriesConfig::all_home(5, p, 0.5));
            assert!(matches!(result, Err(Error::OutOfRange { .. })));
            let result = series_win_probability(&SeriesConfig::all_home(5, 0.5, p));
            assert!(matches!(result, Err(Error::OutOfRange { .. })));
        }
    }

    #[test]
    fn test_rejects_bad_game_counts() {
        assert!(matches!(
            series_win_probability(&SeriesConfig::all_home(0, 0.5, 0.5)),
            Err(Error::OutOfRange { .. })
        ));
        assert!(matches!(
            series_win_probability(&SeriesConfig::all_home(12, 0.5, 0.5)),
            Err(Error::OutOfRange { .. })
        ));
        let config = SeriesConfig {
            max_games: 5,
            p_home: 0.5,
            p_away: 0.5,
            home_games: vec![true; 3],
        };
        assert!(matches!(
            series_win_probability(&config),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_display() {
        let outcome = series_win_probability(&SeriesConfig::all_home(3, 0.6, 0.3)).unwrap();
        let text = outcome.to_string();
        assert!(text.contains("P(A) = 0.6480"));
        assert!(text.contains("P(B) = 0.3520"));
    }
}
