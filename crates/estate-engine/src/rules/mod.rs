//! Rule sets and the table machinery they share.
//!
//! Every rule set is a `const` table of `{code, severity, check}`
//! entries evaluated top to bottom. Table order is load-bearing: the
//! final severity sort is stable, so within one severity band findings
//! appear in table order. Adding a rule is a table edit, not a control
//! flow change.

pub mod cross_account;
pub mod family;
pub mod life_events;
pub mod rrif;
pub mod rrsp;
pub mod tfsa;

use chrono::NaiveDate;
use estate_types::{Account, AccountScope, ClientProfile, Finding, Severity};

/// Message text produced by a fired rule.
pub(crate) struct RuleText {
    pub issue: String,
    pub consequence: String,
    pub action: String,
}

impl RuleText {
    pub(crate) fn new(
        issue: impl Into<String>,
        consequence: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            issue: issue.into(),
            consequence: consequence.into(),
            action: action.into(),
        }
    }
}

/// One rule evaluated against a single account and its owner.
/// `check` returns message text when the trigger condition holds.
pub(crate) struct AccountRule {
    pub code: &'static str,
    pub severity: Severity,
    pub check: fn(&Account, &ClientProfile) -> Option<RuleText>,
}

/// One client-level rule (life events, cross-account coverage).
pub(crate) struct ClientRule {
    pub code: &'static str,
    pub severity: Severity,
    pub check: fn(&ClientProfile, NaiveDate) -> Option<RuleText>,
}

pub(crate) fn evaluate_account(
    rules: &[AccountRule],
    account: &Account,
    client: &ClientProfile,
) -> Vec<Finding> {
    rules
        .iter()
        .filter_map(|rule| {
            (rule.check)(account, client).map(|text| Finding {
                severity: rule.severity,
                account_id: account.account_id.clone(),
                account_type: AccountScope::Kind(account.kind.clone()),
                rule: rule.code,
                issue: text.issue,
                consequence: text.consequence,
                action: text.action,
            })
        })
        .collect()
}

pub(crate) fn evaluate_client(
    rules: &[ClientRule],
    client: &ClientProfile,
    today: NaiveDate,
) -> Vec<Finding> {
    rules
        .iter()
        .filter_map(|rule| {
            (rule.check)(client, today).map(|text| Finding {
                severity: rule.severity,
                account_id: None,
                account_type: AccountScope::All,
                rule: rule.code,
                issue: text.issue,
                consequence: text.consequence,
                action: text.action,
            })
        })
        .collect()
}
