//! Session context for optimizing and evaluating predicates.

use std::fmt;
use std::sync::Arc;

use crate::access::{ComparePolicy, DatabaseCompareMode};
use crate::settings::DbSettings;

/// Settings and compare policy of the connection a statement runs in.
#[derive(Clone)]
pub struct Session {
    settings: DbSettings,
    compare_policy: Arc<dyn ComparePolicy>,
}

impl Session {
    /// Create a session using the database's default compare mode.
    pub fn new(settings: DbSettings) -> Self {
        let compare_policy = Arc::new(DatabaseCompareMode::new(settings.ignore_case));
        Self {
            settings,
            compare_policy,
        }
    }

    pub fn with_compare_policy(
        settings: DbSettings,
        compare_policy: Arc<dyn ComparePolicy>,
    ) -> Self {
        Self {
            settings,
            compare_policy,
        }
    }

    pub fn settings(&self) -> &DbSettings {
        &self.settings
    }

    pub fn compare_policy(&self) -> &dyn ComparePolicy {
        self.compare_policy.as_ref()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DbSettings::default())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Value;
    use crate::expression::ExpressionResult;

    #[test]
    fn test_ignore_case_setting_selects_policy() -> ExpressionResult<()> {
        let a = Value::from("Abc");
        let b = Value::from("aBC");
        assert!(!Session::default().compare_policy().are_equal(&a, &b)?);

        let session = Session::new(DbSettings {
            ignore_case: true,
            ..DbSettings::default()
        });
        assert!(session.compare_policy().are_equal(&a, &b)?);
        assert!(session.settings().ignore_case);
        Ok(())
    }
}
