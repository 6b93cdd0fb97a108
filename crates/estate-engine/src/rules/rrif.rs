//! RRIF designation rules.
//!
//! Same successor-annuitant and taxation semantics as the RRSP, but
//! balances are typically larger, so this set adds the estate
//! liquidity check: a big RRIF collapsing into the estate produces a
//! tax bill the executor has to pay from somewhere.

use estate_types::{Account, ClientProfile, Finding, Severity};

use super::{evaluate_account, family, AccountRule, RuleText};
use crate::money;

/// R7 only looks at balances above this.
const LARGE_BALANCE_THRESHOLD: f64 = 100_000.0;

/// Fraction of the RRIF balance the non-registered pool must reach
/// before R7 stays quiet.
const LIQUIDITY_RATIO: f64 = 0.30;

const RRIF_RULES: &[AccountRule] = &[
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
        code: "R7",
        severity: Severity::High,
        check: liquidity_shortfall,
    },
    AccountRule {
        code: "C6",
        severity: Severity::Medium,
        check: no_contingent,
    },
];

pub fn check_rrif_rules(account: &Account, client: &ClientProfile) -> Vec<Finding> {
    evaluate_account(RRIF_RULES, account, client)
}

fn no_designation_at_all(account: &Account, _client: &ClientProfile) -> Option<RuleText> {
    let fires = account.successor_annuitant.is_none() && account.beneficiary_primary.is_none();
    fires.then(|| {
        RuleText::new(
            "No beneficiary or successor annuitant named on RRIF",
            "Full RRIF value is added to your income in the year of death — potentially the \
             largest single tax bill your estate will face. Account enters probate on top of \
             the tax hit.",
            "Name your spouse as successor annuitant immediately. If no spouse, name a \
             beneficiary. Do not leave this blank.",
        )
    })
}

fn ex_spouse_annuitant(account: &Account, _client: &ClientProfile) -> Option<RuleText> {
    family::is_ex_spouse(account.successor_annuitant.as_ref()).then(|| {
        RuleText::new(
            "Ex-spouse still listed as successor annuitant on RRIF",
            "Ex-spouse steps into your RRIF and continues receiving payments as if the account \
             were always theirs. This cannot be undone after death. Your will cannot override \
             it.",
            "Update immediately. Highest priority fix.",
        )
    })
}

fn ex_spouse_beneficiary(account: &Account, _client: &ClientProfile) -> Option<RuleText> {
    family::is_ex_spouse(account.beneficiary_primary.as_ref()).then(|| {
        RuleText::new(
            "Ex-spouse still listed as primary beneficiary on RRIF",
            "Ex-spouse legally receives the full RRIF value, and your will cannot override the \
             designation. Divorce does not automatically remove it.",
            "Update beneficiary designation immediately.",
        )
    })
}

fn annuitant_deceased(account: &Account, _client: &ClientProfile) -> Option<RuleText> {
    family::is_deceased(account.successor_annuitant.as_ref()).then(|| {
        RuleText::new(
            "Successor annuitant on RRIF is deceased",
            "The designation has failed. The full RRIF balance collapses into your estate as \
             income in the year of death. On large RRIFs this can mean a six-figure tax bill \
             with no liquid assets to pay it.",
            "Update successor annuitant immediately. Review whether your estate has enough \
             liquid assets to cover the potential tax liability.",
        )
    })
}

fn beneficiary_deceased(account: &Account, _client: &ClientProfile) -> Option<RuleText> {
    family::is_deceased(account.beneficiary_primary.as_ref()).then(|| {
        RuleText::new(
            "Primary beneficiary on RRIF is deceased",
            "Designation has failed. Full RRIF value enters estate as taxable income in year \
             of death. With no liquid assets to cover the bill, the executor may be forced to \
             sell other estate assets.",
            "Update beneficiary immediately. Given the size of most RRIFs, also review estate \
             liquidity — is there enough cash outside this account to pay the tax bill?",
        )
    })
}

fn spouse_not_annuitant(account: &Account, client: &ClientProfile) -> Option<RuleText> {
    family::spouse_named_beneficiary_only(account, client, account.successor_annuitant.as_ref())
        .then(|| {
            RuleText::new(
                "Spouse named as beneficiary instead of successor annuitant on RRIF",
                "Spouse receives the RRIF tax-free via spousal rollover, but the account \
                 closes and payments stop. A successor annuitant steps into the existing \
                 payment stream with no interruption and no paperwork burden.",
                "Upgrade designation to successor annuitant. Cleaner transfer, same tax \
                 benefit.",
            )
        })
}

fn minor_beneficiary(account: &Account, client: &ClientProfile) -> Option<RuleText> {
    family::primary_names_minor_child(account, client).then(|| {
        RuleText::new(
            "Minor child named as RRIF beneficiary",
            "Minor children cannot receive RRIF proceeds directly. A court-appointed trustee \
             controls the funds until age of majority, and the full value is taxed in your \
             estate unless the child qualifies as a financially dependent minor.",
            "Confirm whether the child qualifies as a financially dependent minor or disabled \
             dependent. If not, consider naming the other parent or establishing a trust.",
        )
    })
}

fn non_spouse_tax_exposure(account: &Account, _client: &ClientProfile) -> Option<RuleText> {
    let relationship = family::taxable_non_spouse_beneficiary(account)?;
    Some(RuleText::new(
        format!(
            "Non-spouse ({relationship}) named as RRIF beneficiary — significant tax consequence"
        ),
        format!(
            "Your {relationship} receives the full RRIF value but the tax falls on your \
             estate. On this account balance of {} the bill could reach {}+ in the year of \
             death. This is often a complete surprise.",
            money::format_dollars(account.balance),
            money::format_dollars(money::estimated_tax(account.balance)),
        ),
        "Make sure your beneficiary and executor understand this tax consequence. Consider \
         life insurance as a strategy to cover the tax bill, or review whether this \
         designation still reflects your intent.",
    ))
}

fn liquidity_shortfall(account: &Account, client: &ClientProfile) -> Option<RuleText> {
    let non_registered = family::non_registered_total(client);
    let fires = account.balance > LARGE_BALANCE_THRESHOLD
        && non_registered < account.balance * LIQUIDITY_RATIO;
    fires.then(|| {
        RuleText::new(
            "Large RRIF with insufficient liquid assets to cover potential estate tax bill",
            format!(
                "This RRIF is worth {}. If it collapses into the estate, the tax bill could \
                 reach {}+. Your non-registered assets total only {} — potentially not enough \
                 to cover it. The executor may be forced to sell assets or borrow.",
                money::format_dollars(account.balance),
                money::format_dollars(money::estimated_tax(account.balance)),
                money::format_dollars(non_registered),
            ),
            "Review estate liquidity with a financial advisor. Life insurance is often used \
             specifically to fund this tax liability.",
        )
    })
}

fn no_contingent(account: &Account, _client: &ClientProfile) -> Option<RuleText> {
    family::missing_contingent(account).then(|| {
        RuleText::new(
            "No contingent beneficiary named on RRIF",
            "If primary beneficiary predeceases you and designation is not updated, the full \
             RRIF value enters your estate as taxable income. The stakes on a RRIF are higher \
             than most accounts given the tax exposure.",
            "Name a contingent beneficiary on this account as a permanent safety net.",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_types::{AccountKind, Designation, Relationship};

    fn rrif(balance: f64) -> Account {
        Account {
            account_id: Some("RRIF-001".to_string()),
            kind: AccountKind::Rrif,
            balance,
            successor_annuitant: Some(Designation {
                relationship: Some(Relationship::Spouse),
                is_currently_spouse: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn client_with(accounts: Vec<Account>) -> ClientProfile {
        ClientProfile {
            accounts,
            ..Default::default()
        }
    }

    fn codes(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.rule).collect()
    }

    #[test]
    fn large_rrif_with_thin_liquid_pool_fires_r7() {
        let account = rrif(500_000.0);
        let liquid = Account {
            kind: AccountKind::NonRegistered,
            balance: 50_000.0,
            ..Default::default()
        };
        let client = client_with(vec![account.clone(), liquid]);
        let findings = check_rrif_rules(&account, &client);
        assert_eq!(codes(&findings), vec!["R7"]);
        assert_eq!(findings[0].severity, Severity::High);
        assert!(findings[0].consequence.contains("$500,000"));
        assert!(findings[0].consequence.contains("$200,000"));
        assert!(findings[0].consequence.contains("$50,000"));
    }

    #[test]
    fn r7_needs_balance_strictly_above_threshold() {
        let account = rrif(100_000.0);
        let client = client_with(vec![account.clone()]);
        let findings = check_rrif_rules(&account, &client);
        assert!(!codes(&findings).contains(&"R7"));
    }

    #[test]
    fn adequate_liquidity_suppresses_r7() {
        let account = rrif(500_000.0);
        let liquid = Account {
            kind: AccountKind::NonRegistered,
            balance: 150_000.0,
            ..Default::default()
        };
        let client = client_with(vec![account.clone(), liquid]);
        let findings = check_rrif_rules(&account, &client);
        assert!(!codes(&findings).contains(&"R7"));
    }

    #[test]
    fn undesignated_rrif_fires_r1() {
        let account = Account {
            account_id: Some("RRIF-002".to_string()),
            kind: AccountKind::Rrif,
            balance: 90_000.0,
            ..Default::default()
        };
        let client = client_with(vec![account.clone()]);
        let findings = check_rrif_rules(&account, &client);
        assert_eq!(codes(&findings), vec!["R1"]);
    }

    #[test]
    fn deceased_annuitant_fires_r6() {
        let mut account = rrif(300_000.0);
        account.successor_annuitant = Some(Designation {
            is_currently_alive: Some(false),
            ..Default::default()
        });
        let liquid = Account {
            kind: AccountKind::NonRegistered,
            balance: 200_000.0,
            ..Default::default()
        };
        let client = client_with(vec![account.clone(), liquid]);
        let findings = check_rrif_rules(&account, &client);
        assert_eq!(codes(&findings), vec!["R6"]);
        assert_eq!(findings[0].severity, Severity::Critical);
    }

    #[test]
    fn ex_spouse_annuitant_fires_r3_absence_does_not() {
        let mut account = rrif(200_000.0);
        account.successor_annuitant = Some(Designation {
            is_currently_spouse: Some(false),
            ..Default::default()
        });
        let liquid = Account {
            kind: AccountKind::NonRegistered,
            balance: 100_000.0,
            ..Default::default()
        };
        let client = client_with(vec![account.clone(), liquid.clone()]);
        let findings = check_rrif_rules(&account, &client);
        assert_eq!(codes(&findings), vec!["R3"]);

        // Remove the designee entirely: absence is a different gap
        // (R1), never R3.
        account.successor_annuitant = None;
        let client = client_with(vec![account.clone(), liquid]);
        let findings = check_rrif_rules(&account, &client);
        assert_eq!(codes(&findings), vec!["R1"]);
    }
}
