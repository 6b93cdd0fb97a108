//! RRSP designation rules.
//!
//! An RRSP's full value is taxed as income in the year of death unless
//! it rolls over to a qualifying survivor, so designation gaps here
//! carry the largest dollar consequences. The succession role is the
//! successor annuitant.

use estate_types::{Account, ClientProfile, Finding, Severity};

use super::{evaluate_account, family, AccountRule, RuleText};
use crate::money;

const RRSP_RULES: &[AccountRule] = &[
    AccountRule {
        code: "R1",
        severity: Severity::High,
        check: no_designation_at_all,
    },
    AccountRule {
        code: "R3",
        severity: Severity::Critical,
        check: ex_spouse_annuitant,
    },
    AccountRule {
        code: "R3",
        severity: Severity::Critical,
        check: ex_spouse_beneficiary,
    },
    AccountRule {
        code: "R6",
        severity: Severity::Critical,
        check: annuitant_deceased,
    },
    AccountRule {
        code: "R6",
        severity: Severity::Critical,
        check: beneficiary_deceased,
    },
    AccountRule {
        code: "R2",
        severity: Severity::Medium,
        check: spouse_not_annuitant,
    },
    AccountRule {
        code: "R5",
        severity: Severity::Medium,
        check: minor_beneficiary,
    },
    AccountRule {
        code: "R4",
        severity: Severity::Medium,
        check: non_spouse_tax_exposure,
    },
    AccountRule {
        code: "C6",
        severity: Severity::Medium,
        check: no_contingent,
    },
];

pub fn check_rrsp_rules(account: &Account, client: &ClientProfile) -> Vec<Finding> {
    evaluate_account(RRSP_RULES, account, client)
}

fn no_designation_at_all(account: &Account, _client: &ClientProfile) -> Option<RuleText> {
    let fires = account.successor_annuitant.is_none() && account.beneficiary_primary.is_none();
    fires.then(|| {
        RuleText::new(
            "No beneficiary or successor annuitant named on RRSP",
            "Full RRSP value is added to your income in the year of death. On a $200,000 RRSP \
             this could mean $80,000-$100,000 in unexpected taxes. Account also enters probate \
             — delays and additional costs on top of the tax hit.",
            "If married or common-law: name your spouse as successor annuitant immediately. If \
             single: name a beneficiary. Either is far better than nothing.",
        )
    })
}

fn ex_spouse_annuitant(account: &Account, _client: &ClientProfile) -> Option<RuleText> {
    family::is_ex_spouse(account.successor_annuitant.as_ref()).then(|| {
        RuleText::new(
            "Ex-spouse still listed as successor annuitant on RRSP",
            "Ex-spouse legally receives the entire RRSP. This is ironclad — your will cannot \
             override it, courts will generally not override it. The ex-spouse keeps the money. \
             Divorce does not automatically remove this designation.",
            "Update this immediately. This is the highest priority fix for any recently \
             divorced client.",
        )
    })
}

fn ex_spouse_beneficiary(account: &Account, _client: &ClientProfile) -> Option<RuleText> {
    family::is_ex_spouse(account.beneficiary_primary.as_ref()).then(|| {
        RuleText::new(
            "Ex-spouse still listed as primary beneficiary on RRSP",
            "Ex-spouse legally receives the full RRSP value. They will also owe income tax on \
             the full amount that year — but that does not reduce what they receive. Your will \
             cannot override this designation.",
            "Update beneficiary designation immediately.",
        )
    })
}

fn annuitant_deceased(account: &Account, _client: &ClientProfile) -> Option<RuleText> {
    family::is_deceased(account.successor_annuitant.as_ref()).then(|| {
        RuleText::new(
            "Successor annuitant on RRSP is deceased",
            "The designation has failed. The full RRSP value collapses into your estate as \
             income in the year of death — maximum tax exposure plus probate delays.",
            "Name a new successor annuitant immediately. Consider a contingent beneficiary as \
             a permanent backup.",
        )
    })
}

fn beneficiary_deceased(account: &Account, _client: &ClientProfile) -> Option<RuleText> {
    family::is_deceased(account.beneficiary_primary.as_ref()).then(|| {
        RuleText::new(
            "Primary beneficiary on RRSP is deceased",
            "Designation has failed. Full RRSP value collapses into your estate as income in \
             year of death — maximum tax exposure plus probate delays. Treated as if no \
             beneficiary was ever named.",
            "Update beneficiary immediately. Consider naming a contingent beneficiary as a \
             permanent backup.",
        )
    })
}

fn spouse_not_annuitant(account: &Account, client: &ClientProfile) -> Option<RuleText> {
    family::spouse_named_beneficiary_only(account, client, account.successor_annuitant.as_ref())
        .then(|| {
            RuleText::new(
                "Spouse named as beneficiary instead of successor annuitant on RRSP",
                "Spouse receives the RRSP tax-free via spousal rollover — which is good. But \
                 the process is more complex than successor annuitant. The account closes and \
                 spouse receives a lump sum transfer rather than inheriting the account itself.",
                "Upgrade designation to successor annuitant. Cleaner transfer, same tax \
                 benefit, less administrative burden on your spouse during an already difficult \
                 time.",
            )
        })
}

fn minor_beneficiary(account: &Account, client: &ClientProfile) -> Option<RuleText> {
    family::primary_names_minor_child(account, client).then(|| {
        RuleText::new(
            "Minor child named as RRSP beneficiary",
            "Minor children cannot receive RRSP proceeds directly. A court-appointed trustee \
             controls the funds until age of majority. However — if the child is financially \
             dependent due to disability, there are favorable tax rules available that require \
             specific documentation to claim.",
            "Confirm whether the child qualifies as a financially dependent minor or disabled \
             dependent. If yes, ensure dependency is documented. If no, consider naming the \
             other parent or establishing a trust.",
        )
    })
}

fn non_spouse_tax_exposure(account: &Account, _client: &ClientProfile) -> Option<RuleText> {
    let relationship = family::taxable_non_spouse_beneficiary(account)?;
    Some(RuleText::new(
        format!(
            "Non-spouse ({relationship}) named as RRSP beneficiary — significant tax consequence"
        ),
        format!(
            "Your {relationship} receives the full RRSP value but it is added entirely to \
             their income that year. On this account balance of {} they could owe {}+ in taxes \
             the same year they receive it. This is often a complete surprise.",
            money::format_dollars(account.balance),
            money::format_dollars(money::estimated_tax(account.balance)),
        ),
        "Make sure your beneficiary understands this tax consequence. Consider life insurance \
         as a strategy to cover the tax bill, or review whether this designation still reflects \
         your intent.",
    ))
}

fn no_contingent(account: &Account, _client: &ClientProfile) -> Option<RuleText> {
    family::missing_contingent(account).then(|| {
        RuleText::new(
            "No contingent beneficiary named on RRSP",
            "If your primary beneficiary dies before you and the designation is not updated, \
             the full RRSP value collapses into your estate — maximum tax exposure and probate \
             delays.",
            "Name a contingent beneficiary. On an RRSP this is especially important given the \
             tax consequences of the account entering the estate.",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_types::{AccountKind, Designation, Relationship};

    fn rrsp(balance: f64) -> Account {
        Account {
            account_id: Some("RRSP-001".to_string()),
            kind: AccountKind::Rrsp,
            balance,
            ..Default::default()
        }
    }

    fn codes(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.rule).collect()
    }

    #[test]
    fn totally_undesignated_rrsp_fires_r1() {
        let findings = check_rrsp_rules(&rrsp(200_000.0), &ClientProfile::default());
        assert_eq!(codes(&findings), vec!["R1"]);
        assert_eq!(findings[0].severity, Severity::High);
    }

    #[test]
    fn beneficiary_alone_suppresses_r1() {
        let mut account = rrsp(200_000.0);
        account.beneficiary_primary = Some(Designation {
            relationship: Some(Relationship::Spouse),
            ..Default::default()
        });
        let findings = check_rrsp_rules(&account, &ClientProfile::default());
        assert!(!codes(&findings).contains(&"R1"));
    }

    #[test]
    fn ex_spouse_in_either_role_fires_r3() {
        let mut account = rrsp(100_000.0);
        account.successor_annuitant = Some(Designation {
            is_currently_spouse: Some(false),
            ..Default::default()
        });
        account.beneficiary_primary = Some(Designation {
            is_currently_spouse: Some(false),
            ..Default::default()
        });
        account.beneficiary_contingent = Some(Designation::default());
        let findings = check_rrsp_rules(&account, &ClientProfile::default());
        assert_eq!(codes(&findings), vec!["R3", "R3"]);
        assert!(findings.iter().all(|f| f.severity == Severity::Critical));
    }

    #[test]
    fn unknown_spouse_flag_does_not_fire_r3() {
        let mut account = rrsp(100_000.0);
        account.successor_annuitant = Some(Designation {
            is_currently_spouse: None,
            ..Default::default()
        });
        let findings = check_rrsp_rules(&account, &ClientProfile::default());
        assert!(!codes(&findings).contains(&"R3"));
    }

    #[test]
    fn r4_message_carries_the_tax_estimate() {
        let mut account = rrsp(150_000.0);
        account.beneficiary_primary = Some(Designation {
            relationship: Some(Relationship::Sibling),
            ..Default::default()
        });
        account.beneficiary_contingent = Some(Designation::default());
        let findings = check_rrsp_rules(&account, &ClientProfile::default());
        assert_eq!(codes(&findings), vec!["R4"]);
        assert!(findings[0].issue.contains("sibling"));
        assert!(findings[0].consequence.contains("$150,000"));
        assert!(findings[0].consequence.contains("$60,000"));
    }

    #[test]
    fn r4_stays_quiet_on_zero_balance() {
        let mut account = rrsp(0.0);
        account.beneficiary_primary = Some(Designation {
            relationship: Some(Relationship::Sibling),
            ..Default::default()
        });
        account.beneficiary_contingent = Some(Designation::default());
        let findings = check_rrsp_rules(&account, &ClientProfile::default());
        assert!(!codes(&findings).contains(&"R4"));
    }

    #[test]
    fn deceased_beneficiary_fires_r6() {
        let mut account = rrsp(80_000.0);
        account.beneficiary_primary = Some(Designation {
            is_currently_alive: Some(false),
            ..Default::default()
        });
        account.beneficiary_contingent = Some(Designation::default());
        let findings = check_rrsp_rules(&account, &ClientProfile::default());
        assert_eq!(codes(&findings), vec!["R6"]);
    }
}
