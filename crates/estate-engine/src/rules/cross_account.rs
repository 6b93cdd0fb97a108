//! Cross-account coverage rules.
//!
//! "Designated" here means the account carries at least one of:
//! successor holder, successor annuitant, or primary beneficiary.
//! Accounts of unrecognized category still count: an undesignated
//! LIRA is as much of a gap as an undesignated RRSP.

use chrono::NaiveDate;
use estate_types::{ClientProfile, Finding, Severity};

use super::{evaluate_client, ClientRule, RuleText};

const CROSS_ACCOUNT_RULES: &[ClientRule] = &[
    ClientRule {
        code: "C5",
        severity: Severity::Critical,
        check: nothing_designated_anywhere,
    },
    ClientRule {
        code: "C2",
        severity: Severity::High,
        check: partial_coverage,
    },
];

pub fn check_cross_account(client: &ClientProfile) -> Vec<Finding> {
    // Reference date is irrelevant to coverage; any value works.
    evaluate_client(CROSS_ACCOUNT_RULES, client, NaiveDate::MIN)
}

fn nothing_designated_anywhere(client: &ClientProfile, _today: NaiveDate) -> Option<RuleText> {
    let fires = !client.accounts.is_empty()
        && client.accounts.iter().all(|a| !a.has_any_designation());
    fires.then(|| {
        RuleText::new(
            "No beneficiary named on any account — complete estate planning gap",
            "Your entire investment portfolio will go through probate. Maximum tax exposure on \
             all registered accounts. Maximum delays for your family. Everything becomes public \
             record through probate court. This is the worst possible estate planning outcome.",
            "This requires immediate attention across every account. Start with your RRSP or \
             RRIF — the tax consequences there are the most severe.",
        )
    })
}

fn partial_coverage(client: &ClientProfile, _today: NaiveDate) -> Option<RuleText> {
    let any_designated = client.accounts.iter().any(|a| a.has_any_designation());
    let undesignated: Vec<&str> = client
        .accounts
        .iter()
        .filter(|a| !a.has_any_designation())
        .map(|a| a.kind.label())
        .collect();
    if !any_designated || undesignated.is_empty() {
        return None;
    }
    let listed = undesignated.join(", ");
    Some(RuleText::new(
        format!("Beneficiaries named on some accounts but missing on others: {listed}"),
        "Creates a two-tier distribution. Some accounts transfer quickly and tax-efficiently \
         to your named beneficiaries. The undesignated accounts go through probate — slower, \
         more expensive, and in the case of registered accounts, with full tax exposure."
            .to_string(),
        format!("Complete beneficiary designations on: {listed}."),
    ))
}
