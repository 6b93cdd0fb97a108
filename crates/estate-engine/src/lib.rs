//! Estate-designation analysis engine.
//!
//! Evaluates one client's beneficiary and succession designations
//! against a fixed rule body and returns a prioritized findings list.
//! Evaluation is a pure function of the profile and a reference date:
//! nothing here mutates the profile, holds state between calls, or
//! performs I/O.
//!
//! Rule codes are stable short identifiers carried in every finding
//! ("T3", "R7", "C5", ...). A code is unique within its rule set, but
//! account-scoped codes may legitimately fire once per account.

pub mod money;
pub mod provinces;
pub mod rules;

use chrono::{NaiveDate, Utc};
use estate_types::{AccountKind, ClientProfile, Finding};
use tracing::debug;

/// Entry point for designation analysis.
pub struct EstateEngine;

impl EstateEngine {
    pub fn new() -> Self {
        Self
    }

    /// Analyze against today's date (UTC).
    pub fn analyze(&self, client: &ClientProfile) -> Vec<Finding> {
        self.analyze_at(client, Utc::now().date_naive())
    }

    /// Analyze against an explicit reference date. Date-derived
    /// triggers (will age, cohabitation duration) are computed from
    /// `today`, which makes results reproducible.
    pub fn analyze_at(&self, client: &ClientProfile, today: NaiveDate) -> Vec<Finding> {
        let mut findings = Vec::new();

        findings.extend(provinces::check_province(client));

        for account in &client.accounts {
            match account.kind {
                AccountKind::Tfsa => {
                    findings.extend(rules::tfsa::check_tfsa_rules(account, client))
                }
                AccountKind::Rrsp => {
                    findings.extend(rules::rrsp::check_rrsp_rules(account, client))
                }
                AccountKind::Rrif => {
                    findings.extend(rules::rrif::check_rrif_rules(account, client))
                }
                // Other categories carry no type-specific rules but
                // still count toward cross-account coverage below.
                _ => {}
            }
        }

        findings.extend(rules::life_events::check_life_events(client, today));
        findings.extend(rules::cross_account::check_cross_account(client));

        debug!(
            client = %client.name,
            accounts = client.accounts.len(),
            findings = findings.len(),
            "designation analysis complete"
        );

        // Stable sort: findings of equal severity keep the fixed
        // evaluation order above. Callers rely on that.
        findings.sort_by_key(|f| f.severity);
        findings
    }
}

impl Default for EstateEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_types::Severity;

    fn profile_from(json: serde_json::Value) -> ClientProfile {
        serde_json::from_value(json).unwrap()
    }

    fn reference_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn empty_profile_yields_only_the_will_gap() {
        let engine = EstateEngine::new();
        let client = profile_from(serde_json::json!({"name": "Blank"}));
        let findings = engine.analyze_at(&client, reference_date());

        // No accounts, no designations, no will on file.
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "L0");
        assert_eq!(findings[0].severity, Severity::High);
    }

    #[test]
    fn unrecognized_account_types_are_skipped_by_type_rules() {
        let engine = EstateEngine::new();
        let client = profile_from(serde_json::json!({
            "name": "Lee",
            "has_will": true,
            "accounts": [
                {"account_id": "L-1", "type": "LIRA", "balance": 80000}
            ]
        }));
        let findings = engine.analyze_at(&client, reference_date());

        // No T/R findings, but the account still counts as
        // undesignated for cross-account coverage.
        assert!(findings.iter().all(|f| !f.rule.starts_with('T')));
        assert!(findings.iter().all(|f| !f.rule.starts_with('R')));
        assert!(findings.iter().any(|f| f.rule == "C5"));
    }

    #[test]
    fn findings_are_sorted_by_severity_rank() {
        let engine = EstateEngine::new();
        // Quebec + ex-spouse successor + missing contingent spans the
        // severity range.
        let client = profile_from(serde_json::json!({
            "name": "Marie",
            "province": "QC",
            "has_will": true,
            "accounts": [
                {
                    "account_id": "T-9",
                    "type": "TFSA",
                    "balance": 40000,
                    "successor_holder": {
                        "name": "Luc",
                        "relationship": "spouse",
                        "is_currently_spouse": false
                    },
                    "beneficiary_primary": {"name": "Anne", "relationship": "sibling"}
                }
            ]
        }));
        let findings = engine.analyze_at(&client, reference_date());

        assert!(findings.windows(2).all(|w| w[0].severity <= w[1].severity));
        assert_eq!(findings[0].severity, Severity::Critical);
        assert!(findings.iter().any(|f| f.rule == "Q1"));
    }

    #[test]
    fn equal_severity_keeps_evaluation_order() {
        let engine = EstateEngine::new();
        // Two CRITICALs on the same account: ex-spouse successor fires
        // before successor-deceased in the TFSA table.
        let client = profile_from(serde_json::json!({
            "name": "Iris",
            "has_will": true,
            "accounts": [
                {
                    "account_id": "T-2",
                    "type": "TFSA",
                    "balance": 10000,
                    "successor_holder": {
                        "name": "Paul",
                        "is_currently_spouse": false,
                        "is_currently_alive": false
                    }
                }
            ]
        }));
        let findings = engine.analyze_at(&client, reference_date());
        let criticals: Vec<&str> = findings
            .iter()
            .filter(|f| f.severity == Severity::Critical)
            .map(|f| f.rule)
            .collect();
        assert_eq!(criticals, vec!["T3", "T6"]);
    }
}
