//! Database settings that influence predicate optimization.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Optimizer switches of a database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbSettings {
    /// Use `col IS NULL` as an index lookup of the NULL key
    pub optimize_is_null: bool,
    /// Merge `a = x OR a = y` into `a IN(x, y)`
    pub optimize_or: bool,
    /// Derive `a = c` from `a = b AND b = c`
    pub optimize_two_equals: bool,
    /// Compare strings ignoring case
    pub ignore_case: bool,
}

impl Default for DbSettings {
    fn default() -> Self {
        Self {
            optimize_is_null: true,
            optimize_or: true,
            optimize_two_equals: true,
            ignore_case: false,
        }
    }
}

impl DbSettings {
    /// Parse settings from the parameter part of a database URL, e.g.
    /// `OPTIMIZE_IS_NULL=FALSE;IGNORECASE=TRUE`.
    pub fn from_url_params(params: &str) -> Result<Self> {
        let mut settings = Self::default();
        for pair in params.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .with_context(|| format!("Missing value for setting {}", pair))?;
            settings.set(key.trim(), value.trim())?;
        }
        Ok(settings)
    }

    /// Set one setting by name (case-insensitive)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let flag = parse_bool(value).with_context(|| format!("Invalid value for {}", key))?;
        match key.to_ascii_uppercase().as_str() {
            "OPTIMIZE_IS_NULL" => self.optimize_is_null = flag,
            "OPTIMIZE_OR" => self.optimize_or = flag,
            "OPTIMIZE_TWO_EQUALS" => self.optimize_two_equals = flag,
            "IGNORECASE" | "IGNORE_CASE" => self.ignore_case = flag,
            _ => bail!("Unknown setting: {}", key),
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_uppercase().as_str() {
        "TRUE" | "1" => Ok(true),
        "FALSE" | "0" => Ok(false),
        _ => bail!("Expected TRUE or FALSE, got {}", value),
    }
}
