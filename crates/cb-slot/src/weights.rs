//! Weight table construction and override merging

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::symbols::{BOMB_SYMBOLS, DEFAULT_WEIGHTS};

/// Mapping from symbol identifier to a non-negative draw weight.
///
/// Tables are value types: they are rebuilt from their source on every
/// generation request (live-editable config, no cache) and mutated only on
/// request-local working copies. The builtin table keeps the invariant that
/// the total weight is positive; merging enforces it by falling back to the
/// builtin table when an override would drive the total to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable {
    weights: BTreeMap<String, f64>,
}

impl WeightTable {
    /// The builtin default table.
    pub fn builtin() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS
                .iter()
                .map(|(s, w)| (s.to_string(), *w))
                .collect(),
        }
    }

    /// Build a table from explicit entries. Mainly useful for tests and
    /// programmatic setups; no fallback is applied.
    pub fn from_entries<S, I>(entries: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, f64)>,
    {
        Self {
            weights: entries
                .into_iter()
                .map(|(s, w)| (s.into(), w))
                .collect(),
        }
    }

    /// Merge a parsed override document over the builtin defaults.
    ///
    /// The document's `symbols` object is keyed by symbol name; each entry
    /// must be an object carrying a `probability` (preferred) or `weight`
    /// field. Entries that fail numeric coercion or are negative are skipped,
    /// never fatal. Accepted entries overwrite the default weight or add a
    /// previously unknown symbol. A merged total of zero discards the whole
    /// override.
    pub fn from_override(doc: &Value) -> Self {
        let mut merged = Self::builtin();

        let Some(symbols) = doc.get("symbols").and_then(Value::as_object) else {
            return merged;
        };

        for (name, entry) in symbols {
            let Some(fields) = entry.as_object() else {
                log::debug!("skipping non-object weight entry for {name}");
                continue;
            };
            let raw = fields.get("probability").or_else(|| fields.get("weight"));
            let Some(weight) = raw.and_then(coerce_weight) else {
                log::debug!("skipping non-numeric weight entry for {name}");
                continue;
            };
            if weight < 0.0 {
                log::debug!("skipping negative weight entry for {name}");
                continue;
            }
            merged.weights.insert(name.clone(), weight);
        }

        // An all-zero table would make weighted sampling ill-defined.
        if merged.total() <= 0.0 {
            log::warn!("weight overrides sum to zero, using builtin table");
            return Self::builtin();
        }

        merged
    }

    /// Load overrides from a JSON file, merging over the builtin defaults.
    ///
    /// An absent, unreadable, or syntactically invalid file yields the
    /// builtin table unchanged. Nothing is propagated to the caller; the
    /// player-facing surface must always have a usable table.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                log::debug!("weight overrides not readable at {}: {e}", path.display());
                return Self::builtin();
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(doc) => Self::from_override(&doc),
            Err(e) => {
                log::warn!("invalid JSON in {}: {e}", path.display());
                Self::builtin()
            }
        }
    }

    /// Scale the bomb-category weights in place.
    ///
    /// Non-finite or negative multipliers normalize to 1.0 (no-op); this is
    /// the permissive-coercion rule for player-facing parameters. Call only
    /// on a request-local working copy.
    pub fn apply_bomb_multiplier(&mut self, multiplier: f64) {
        let m = normalize_multiplier(multiplier);
        if m == 1.0 {
            return;
        }
        for bomb in BOMB_SYMBOLS {
            if let Some(w) = self.weights.get_mut(bomb) {
                *w *= m;
            }
        }
    }

    /// Weight for a symbol, if present.
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.weights.get(symbol).copied()
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Iterate entries in deterministic (sorted) order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(s, w)| (s.as_str(), *w))
    }

    /// Number of symbols in the table.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Check if the table has no symbols.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Normalize a bomb multiplier: anything non-finite or negative becomes the
/// neutral 1.0 rather than an error.
pub fn normalize_multiplier(raw: f64) -> f64 {
    if raw.is_finite() && raw >= 0.0 { raw } else { 1.0 }
}

fn coerce_weight(value: &Value) -> Option<f64> {
    let w = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => *b as u8 as f64,
        _ => return None,
    };
    w.is_finite().then_some(w)
}
