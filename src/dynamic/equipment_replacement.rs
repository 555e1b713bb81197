//! Equipment replacement scheduling.
//!
//! Equipment bought at the start of year `t` and kept until year `x` costs
//! its purchase price plus the maintenance of every year of use, minus its
//! resale value at age `x - t`. `G(t)` is the cheapest way to cover the
//! horizon from year `t` to year `T`, and `G(T) = 0`.

use std::fmt;

use log::{debug, trace, warn};

use crate::config::Limits;
use crate::error::{Error, Result};

/// Input of the replacement problem.
///
/// `maintenance_cost[a]` and `resale_value[a]` describe equipment of age
/// `a + 1` years.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplacementProblem {
    /// Purchase price of new equipment (P).
    pub initial_cost: f64,
    /// Project horizon in years (T).
    pub project_term: usize,
    /// Maximum service life in years (L).
    pub max_life: usize,
    pub maintenance_cost: Vec<f64>,
    pub resale_value: Vec<f64>,
    /// Yearly inflation applied to the purchase price, if enabled.
    pub inflation_rate: Option<f64>,
}

/// Solved replacement problem.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplacementSchedule {
    /// Horizon after clamping.
    pub horizon: usize,
    /// Service life after clamping.
    pub life: usize,
    /// Maintenance costs resized to `life`.
    pub maintenance_cost: Vec<f64>,
    /// Resale values resized to `life`.
    pub resale_value: Vec<f64>,
    /// Purchase price used for equipment bought in year `t`, for `t < horizon`.
    pub purchase_price: Vec<f64>,
    /// `cost[t]` is the minimum cost of covering years `t..horizon`.
    pub cost: Vec<f64>,
    /// `choices[t]` lists every year `x` at which the equipment bought in
    /// year `t` can be replaced at minimum cost. Empty for `t = horizon`.
    pub choices: Vec<Vec<usize>>,
    /// Optimal plans as the sequence of purchase years, ending at `horizon`.
    pub plans: Vec<Vec<usize>>,
    /// True when more optimal plans exist than were enumerated.
    pub truncated: bool,
}

impl ReplacementSchedule {
    /// Minimum cost of covering the whole horizon, `G(0)`.
    pub fn min_cost(&self) -> f64 {
        self.cost[0]
    }

    /// Cost of owning equipment from year `t` to year `x`.
    ///
    /// Returns `None` when `x` is not a valid replacement year for `t`.
    pub fn segment_cost(&self, t: usize, x: usize) -> Option<f64> {
        if x <= t || x - t > self.life || x > self.horizon {
            return None;
        }
        let age = x - t;
        let maintenance: f64 = self.maintenance_cost[..age].iter().sum();
        Some(self.purchase_price[t] + maintenance - self.resale_value[age - 1])
    }

    /// Total cost of a plan given as purchase years ending at the horizon.
    ///
    /// Returns `None` if the plan does not start at 0, does not end at the
    /// horizon, or keeps equipment longer than its service life.
    pub fn plan_cost(&self, plan: &[usize]) -> Option<f64> {
        if plan.first() != Some(&0) || plan.last() != Some(&self.horizon) {
            return None;
        }
        plan.windows(2)
            .map(|w| self.segment_cost(w[0], w[1]))
            .sum()
    }
}

impl fmt::Display for ReplacementSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>6} {:>12}  {}", "t", "G(t)", "next replacement")?;
        for (t, g) in self.cost.iter().enumerate() {
            let next = if self.choices[t].is_empty() {
                "-".to_string()
            } else {
                self.choices[t]
                    .iter()
                    .map(|x| x.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            writeln!(f, "{:>6} {:>12.2}  {}", t, g, next)?;
        }
        write!(
            f,
            "{} optimal plan(s){}",
            self.plans.len(),
            if self.truncated { " (truncated)" } else { "" }
        )
    }
}

/// Solves the replacement problem and enumerates the optimal plans.
///
/// The horizon is clamped to [`Limits::max_project_term`] and the service
/// life to `1..=`[`Limits::max_equipment_life`]. The maintenance and resale
/// tables are truncated or zero-padded to the service life.
///
/// # Examples
///
/// ```
/// use dynprog::dynamic::equipment_replacement::{plan_equipment_replacement, ReplacementProblem};
///
/// let problem = ReplacementProblem {
///     initial_cost: 1000.0,
///     project_term: 4,
///     max_life: 4,
///     maintenance_cost: vec![100.0, 150.0, 200.0, 250.0],
///     resale_value: vec![800.0, 600.0, 400.0, 200.0],
///     inflation_rate: None,
/// };
/// let schedule = plan_equipment_replacement(&problem).unwrap();
/// assert_eq!(schedule.cost[4], 0.0);
/// assert_eq!(schedule.cost[3], 300.0);
/// assert_eq!(schedule.plans, vec![vec![0, 1, 2, 3, 4]]);
/// ```
pub fn plan_equipment_replacement(problem: &ReplacementProblem) -> Result<ReplacementSchedule> {
    plan_equipment_replacement_with_limits(problem, &Limits::default())
}

/// Same as [`plan_equipment_replacement`] with caller-supplied bounds.
pub fn plan_equipment_replacement_with_limits(
    problem: &ReplacementProblem,
    limits: &Limits,
) -> Result<ReplacementSchedule> {
    limits.validate()?;
    let horizon = problem.project_term.min(limits.max_project_term);
    let life = problem.max_life.clamp(1, limits.max_equipment_life);
    if horizon != problem.project_term || life != problem.max_life {
        warn!(
            "clamped horizon {} -> {} and life {} -> {}",
            problem.project_term, horizon, problem.max_life, life
        );
    }

    let maintenance_cost = resized(&problem.maintenance_cost, life);
    let resale_value = resized(&problem.resale_value, life);
    validate(problem, &maintenance_cost, &resale_value)?;

    let mut schedule = ReplacementSchedule {
        horizon,
        life,
        maintenance_cost,
        resale_value,
        purchase_price: vec![0.0; horizon],
        cost: vec![f64::INFINITY; horizon + 1],
        choices: vec![Vec::new(); horizon + 1],
        plans: Vec::new(),
        truncated: false,
    };
    schedule.cost[horizon] = 0.0;

    // Walking backwards, the price compounds once after each year.
    let mut price = problem.initial_cost;
    for t in (0..horizon).rev() {
        schedule.purchase_price[t] = price;

        let mut best = f64::INFINITY;
        let mut best_xs: Vec<usize> = Vec::new();
        for x in t + 1..=(t + life).min(horizon) {
            let age = x - t;
            let maintenance: f64 = schedule.maintenance_cost[..age].iter().sum();
            let c = price + maintenance - schedule.resale_value[age - 1] + schedule.cost[x];
            if c < best {
                best = c;
                best_xs = vec![x];
            } else if c == best {
                trace!("year {}: replacing at {} ties at {:.2}", t, x, best);
                best_xs.push(x);
            }
        }
        schedule.cost[t] = best;
        schedule.choices[t] = best_xs;

        if let Some(rate) = problem.inflation_rate {
            price += price * rate;
        }
    }

    if let Some(t) = schedule.cost.iter().position(|c| !c.is_finite()) {
        return Err(Error::degenerate(format!(
            "cost from year {} overflows; reduce the initial cost or inflation rate",
            t
        )));
    }

    let mut current = Vec::with_capacity(horizon + 1);
    collect_plans(&mut schedule, limits.max_plans, 0, &mut current);
    if schedule.truncated {
        warn!("stopped enumerating optimal plans at {}", limits.max_plans);
    }

    debug!(
        "replacement over {} years (life {}): cost {:.2}, {} plan(s)",
        horizon,
        life,
        schedule.min_cost(),
        schedule.plans.len()
    );
    Ok(schedule)
}

/// Copies `values` into a vector of exactly `len` entries, padding with 0.
fn resized(values: &[f64], len: usize) -> Vec<f64> {
    let mut out: Vec<f64> = values.iter().copied().take(len).collect();
    out.resize(len, 0.0);
    out
}

fn validate(problem: &ReplacementProblem, maintenance: &[f64], resale: &[f64]) -> Result<()> {
    if !problem.initial_cost.is_finite() || problem.initial_cost <= 0.0 {
        return Err(Error::invalid_input(format!(
            "initial cost must be a positive number, got {}",
            problem.initial_cost
        )));
    }
    if let Some(age) = maintenance.iter().position(|v| !v.is_finite()) {
        return Err(Error::invalid_input(format!(
            "maintenance cost at age {} is not a number",
            age + 1
        )));
    }
    if let Some(age) = resale.iter().position(|v| !v.is_finite()) {
        return Err(Error::invalid_input(format!(
            "resale value at age {} is not a number",
            age + 1
        )));
    }
    if let Some(rate) = problem.inflation_rate {
        if !rate.is_finite() || rate <= -1.0 {
            return Err(Error::invalid_input(format!(
                "inflation rate must be greater than -1, got {}",
                rate
            )));
        }
    }
    Ok(())
}

/// Depth-first walk over `choices` from year `t`, stopping at `cap` plans.
fn collect_plans(
    schedule: &mut ReplacementSchedule,
    cap: usize,
    t: usize,
    current: &mut Vec<usize>,
) {
    if schedule.plans.len() >= cap {
        schedule.truncated = true;
        return;
    }
    current.push(t);
    if t == schedule.horizon {
        schedule.plans.push(current.clone());
    } else {
        let next = schedule.choices[t].clone();
        for x in next {
            collect_plans(schedule, cap, x, current);
        }
    }
    current.pop();
}
