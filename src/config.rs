//! Input bounds for the calculators.
//!
//! The defaults match the sizes the calculators are meant for: small,
//! hand-entered problems. Callers that need different bounds can build a
//! [`Limits`] directly or deserialize one from JSON; any field left out
//! keeps its default.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Allowed sizes for each calculator's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Limits {
    /// Maximum number of keys for the optimal BST (minimum is 1).
    pub max_keys: usize,
    /// Minimum number of matrices in a chain.
    pub min_matrices: usize,
    /// Maximum number of matrices in a chain.
    pub max_matrices: usize,
    /// Maximum length of a series in games (minimum is 1).
    pub max_games: usize,
    /// Upper clamp for the equipment replacement horizon, in years.
    pub max_project_term: usize,
    /// Upper clamp for the equipment service life, in years (minimum is 1).
    pub max_equipment_life: usize,
    /// Cap on the number of tied-optimal replacement plans enumerated.
    pub max_plans: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_keys: 10,
            min_matrices: 2,
            max_matrices: 10,
            max_games: 11,
            max_project_term: 30,
            max_equipment_life: 10,
            max_plans: 200,
        }
    }
}

impl Limits {
    /// Parses limits from a JSON object, filling missing fields with defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynprog::config::Limits;
    ///
    /// let limits = Limits::from_json(r#"{ "maxKeys": 20 }"#).unwrap();
    /// assert_eq!(limits.max_keys, 20);
    /// assert_eq!(limits.max_plans, 200);
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        let limits: Limits =
            serde_json::from_str(text).map_err(|e| Error::malformed(e.to_string()))?;
        limits.validate()?;
        Ok(limits)
    }

    /// Checks that every bound describes a non-empty range.
    pub fn validate(&self) -> Result<()> {
        if self.max_keys == 0 {
            return Err(Error::invalid_input("maxKeys must be at least 1"));
        }
        if self.min_matrices == 0 || self.min_matrices > self.max_matrices {
            return Err(Error::invalid_input(
                "matrix bounds must satisfy 1 <= minMatrices <= maxMatrices",
            ));
        }
        if self.max_games == 0 {
            return Err(Error::invalid_input("maxGames must be at least 1"));
        }
        if self.max_equipment_life == 0 {
            return Err(Error::invalid_input("maxEquipmentLife must be at least 1"));
        }
        if self.max_plans == 0 {
            return Err(Error::invalid_input("maxPlans must be at least 1"));
        }
        Ok(())
    }
}
