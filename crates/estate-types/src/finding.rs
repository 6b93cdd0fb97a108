//! The uniform record every rule check emits.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::client::AccountKind;

/// Finding severity, highest urgency first. The discriminant order is
/// the sort order the engine guarantees, so `Ord` here is the whole
/// ranking contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical,
    RequiresSpecialist,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::RequiresSpecialist => 1,
            Severity::High => 2,
            Severity::Medium => 3,
            Severity::Low => 4,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Critical => "CRITICAL",
            Severity::RequiresSpecialist => "REQUIRES_SPECIALIST",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        };
        f.write_str(label)
    }
}

/// Which slice of the client's holdings a finding is about: one
/// account category, or the whole client ("ALL" in report output).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountScope {
    All,
    Kind(AccountKind),
}

impl AccountScope {
    pub fn label(&self) -> &str {
        match self {
            AccountScope::All => "ALL",
            AccountScope::Kind(kind) => kind.label(),
        }
    }
}

impl fmt::Display for AccountScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for AccountScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One prioritized gap, risk, or required action. Immutable once
/// built; lives only for the duration of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub account_id: Option<String>,
    pub account_type: AccountScope,
    pub rule: &'static str,
    pub issue: String,
    pub consequence: String,
    pub action: String,
}

impl Finding {
    pub fn is_client_level(&self) -> bool {
        self.account_id.is_none() && self.account_type == AccountScope::All
    }
}
