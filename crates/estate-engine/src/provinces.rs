//! Jurisdiction hard stop.
//!
//! Quebec succession law is civil-law: designations on registered
//! accounts work through the contract or the will, not a simple
//! designation form, so the ordinary rule body may not apply there.
//! The Q1 finding is additive: it pre-empts everything in urgency of
//! presentation but suppresses no other check.

use estate_types::{AccountScope, ClientProfile, Finding, Severity};

pub fn check_province(client: &ClientProfile) -> Vec<Finding> {
    let province = client.province.trim();
    let is_quebec =
        province.eq_ignore_ascii_case("quebec") || province.eq_ignore_ascii_case("qc");

    if !is_quebec {
        return Vec::new();
    }

    vec![Finding {
        severity: Severity::RequiresSpecialist,
        account_id: None,
        account_type: AccountScope::All,
        rule: "Q1",
        issue: "Quebec client — this analysis may be incomplete".to_string(),
        consequence: "Quebec operates under civil law, which is fundamentally different from \
            the rest of Canada. Beneficiary designations on RRSPs and RRIFs work differently — \
            they are made through the contract with the financial institution or through a will, \
            not a simple form. Rules that apply in other provinces may not apply here."
            .to_string(),
        action: "Consult a Quebec notary before making any estate planning decisions. Do not \
            rely solely on this analysis for Quebec-specific situations."
            .to_string(),
    }]
}
