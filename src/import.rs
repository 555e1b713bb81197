//! JSON documents accepted by the calculators.
//!
//! Each document mirrors the file a user can load instead of typing the
//! values in. Parsing checks structure only (valid JSON, required fields,
//! field types); numeric validation is left to the calculator the document
//! is converted for. Reading the file is the caller's job.

use serde::{Deserialize, Serialize};

use crate::dynamic::optimal_bst::WeightedKey;
use crate::dynamic::series_probability::SeriesConfig;
use crate::error::{Error, Result};

fn parse<'a, T: Deserialize<'a>>(text: &'a str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| Error::malformed(e.to_string()))
}

/// Keys and weights for the optimal BST, `{ "names": [...], "weights": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BstDocument {
    pub names: Vec<String>,
    pub weights: Vec<f64>,
}

impl BstDocument {
    /// # Examples
    ///
    /// ```
    /// use dynprog::import::BstDocument;
    ///
    /// let doc = BstDocument::from_json(r#"{ "names": ["b", "a"], "weights": [1, 3] }"#).unwrap();
    /// let keys = doc.into_keys().unwrap();
    /// assert_eq!(keys[1].name, "a");
    /// assert_eq!(keys[1].weight, 3.0);
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        parse(text)
    }

    /// Pairs names with weights in document order.
    pub fn into_keys(self) -> Result<Vec<WeightedKey>> {
        if self.names.len() != self.weights.len() {
            return Err(Error::malformed(format!(
                "{} names but {} weights",
                self.names.len(),
                self.weights.len()
            )));
        }
        Ok(self
            .names
            .into_iter()
            .zip(self.weights)
            .map(|(name, weight)| WeightedKey { name, weight })
            .collect())
    }
}

/// Chain dimensions for matrix-chain ordering, `{ "dimensions": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainDocument {
    pub dimensions: Vec<u64>,
}

impl ChainDocument {
    pub fn from_json(text: &str) -> Result<Self> {
        parse(text)
    }

    pub fn into_dims(self) -> Vec<u64> {
        self.dimensions
    }
}

/// Series parameters, `{ "n": 7, "ph": 0.6, "pr": 0.5, "homeGames": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDocument {
    pub n: usize,
    pub ph: f64,
    pub pr: f64,
    pub home_games: Vec<bool>,
}

impl SeriesDocument {
    pub fn from_json(text: &str) -> Result<Self> {
        parse(text)
    }

    pub fn into_config(self) -> SeriesConfig {
        SeriesConfig {
            max_games: self.n,
            p_home: self.ph,
            p_away: self.pr,
            home_games: self.home_games,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamic::matrix_chain::matrix_chain_order;
    use crate::dynamic::optimal_bst::optimal_bst;
    use crate::dynamic::series_probability::series_win_probability;

    #[test]
    fn test_bst_document() {
        let doc =
            BstDocument::from_json(r#"{"names":["a","b","c"],"weights":[1,1,1]}"#).unwrap();
        let bst = optimal_bst(&doc.into_keys().unwrap()).unwrap();
        assert_eq!(bst.root[0][2], 1);
    }

    #[test]
    fn test_bst_document_missing_field() {
        let result = BstDocument::from_json(r#"{"names":["a"]}"#);
        assert!(matches!(result, Err(Error::Malformed(_))));
    }

    #[test]
    fn test_bst_document_length_mismatch() {
        let doc = BstDocument::from_json(r#"{"names":["a","b"],"weights":[1]}"#).unwrap();
        assert!(matches!(doc.into_keys(), Err(Error::Malformed(_))));
    }

    #[test]
    fn test_bst_document_non_numeric_weight() {
        let result = BstDocument::from_json(r#"{"names":["a"],"weights":["heavy"]}"#);
        assert!(matches!(result, Err(Error::Malformed(_))));
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(
            ChainDocument::from_json("10 20 30"),
            Err(Error::Malformed(_))
        ));
    }

    #[test]
    fn test_chain_document() {
        let doc = ChainDocument::from_json(r#"{"dimensions":[30,35,15,5,10,20,25]}"#).unwrap();
        let chain = matrix_chain_order(&doc.into_dims()).unwrap();
        assert_eq!(chain.min_cost(), 15125);
    }

    #[test]
    fn test_chain_document_rejects_negative_dimension() {
        let result = ChainDocument::from_json(r#"{"dimensions":[10,-5,30]}"#);
        assert!(matches!(result, Err(Error::Malformed(_))));
    }

    #[test]
    fn test_series_document() {
        let doc = SeriesDocument::from_json(
            r#"{"n":3,"ph":0.6,"pr":0.6,"homeGames":[true,false,true]}"#,
        )
        .unwrap();
        let outcome = series_win_probability(&doc.into_config()).unwrap();
        assert!((outcome.p_a - 0.648).abs() < 1e-12);
    }

    #[test]
    fn test_series_document_requires_home_games() {
        let result = SeriesDocument::from_json(r#"{"n":3,"ph":0.6,"pr":0.6}"#);
        assert!(matches!(result, Err(Error::Malformed(_))));
    }
}
