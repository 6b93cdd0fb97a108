//! TFSA designation rules.
//!
//! The TFSA succession role is the successor holder: a spouse or
//! common-law partner who takes over the account itself, keeping the
//! tax-free status and contribution room. A plain beneficiary only
//! receives the balance as cash.

use estate_types::{Account, ClientProfile, Finding, Severity};

use super::{evaluate_account, family, AccountRule, RuleText};

const TFSA_RULES: &[AccountRule] = &[
    AccountRule {
        code: "T1",
        severity: Severity::High,
        check: no_successor_behind_beneficiary,
    },
    AccountRule {
        code: "T3",
        severity: Severity::Critical,
        check: ex_spouse_successor,
    },
    AccountRule {
        code: "T6",
        severity: Severity::Critical,
        check: successor_deceased,
    },
    AccountRule {
        code: "T6",
        severity: Severity::Critical,
        check: beneficiary_deceased,
    },
    AccountRule {
        code: "T2",
        severity: Severity::Medium,
        check: spouse_not_successor,
    },
    AccountRule {
        code: "T5",
        severity: Severity::Medium,
        check: minor_beneficiary,
    },
    AccountRule {
        code: "C6",
        severity: Severity::Medium,
        check: no_contingent,
    },
];

pub fn check_tfsa_rules(account: &Account, client: &ClientProfile) -> Vec<Finding> {
    evaluate_account(TFSA_RULES, account, client)
}

fn no_successor_behind_beneficiary(account: &Account, _client: &ClientProfile) -> Option<RuleText> {
    let fires = account.successor_holder.is_none() && account.beneficiary_primary.is_some();
    fires.then(|| {
        RuleText::new(
            "Beneficiary named on TFSA but no successor holder",
            "Account loses tax-free status on death and enters estate — subject to probate \
             delays and tax on growth after death",
            "Name a successor holder if married or common-law. Name a beneficiary at minimum.",
        )
    })
}

fn ex_spouse_successor(account: &Account, _client: &ClientProfile) -> Option<RuleText> {
    family::is_ex_spouse(account.successor_holder.as_ref()).then(|| {
        RuleText::new(
            "Successor holder on TFSA is an ex-spouse",
            "Ex-spouse legally inherits the entire TFSA tax-free and immediately upon death. \
             Divorce does not remove this automatically. Your will cannot override it. There is \
             no recovery once it happens.",
            "Update successor holder immediately. This is the single most urgent fix in your \
             estate plan.",
        )
    })
}

fn successor_deceased(account: &Account, _client: &ClientProfile) -> Option<RuleText> {
    family::is_deceased(account.successor_holder.as_ref()).then(|| {
        RuleText::new(
            "Successor holder on TFSA is deceased",
            "The designation has failed. The account will fall into your estate as if no \
             successor holder was ever named — probate applies, tax-free status is lost on \
             post-death growth.",
            "Name a new successor holder immediately. Consider adding a contingent beneficiary \
             as a backup.",
        )
    })
}

fn beneficiary_deceased(account: &Account, _client: &ClientProfile) -> Option<RuleText> {
    family::is_deceased(account.beneficiary_primary.as_ref()).then(|| {
        RuleText::new(
            "Primary beneficiary on TFSA is deceased",
            "The designation has failed. Account falls into estate — probate, delays, and loss \
             of tax-free status on any growth after date of death.",
            "Update beneficiary to a living person immediately. Add a contingent beneficiary as \
             a backup going forward.",
        )
    })
}

fn spouse_not_successor(account: &Account, client: &ClientProfile) -> Option<RuleText> {
    family::spouse_named_beneficiary_only(account, client, account.successor_holder.as_ref())
        .then(|| {
            RuleText::new(
                "Spouse named as beneficiary instead of successor holder",
                "Spouse receives the money tax-free but the account itself closes. They lose \
                 the contribution room and tax-free status of the account. Successor holder \
                 designation would have preserved both.",
                "Upgrade designation from beneficiary to successor holder. Your spouse keeps \
                 the account itself, not just the cash.",
            )
        })
}

fn minor_beneficiary(account: &Account, client: &ClientProfile) -> Option<RuleText> {
    family::primary_names_minor_child(account, client).then(|| {
        RuleText::new(
            "Minor child named as TFSA beneficiary",
            "Minors cannot legally receive large sums directly. A court-appointed trustee will \
             control the funds until the child reaches age of majority (18 or 19 depending on \
             province). This creates legal costs and delays — and the child still gets the \
             money at 18 regardless of maturity.",
            "Consider naming the other parent as beneficiary instead, or establish a formal \
             trust with conditions for when and how the child receives the funds.",
        )
    })
}

fn no_contingent(account: &Account, _client: &ClientProfile) -> Option<RuleText> {
    family::missing_contingent(account).then(|| {
        RuleText::new(
            "No contingent beneficiary named on TFSA",
            "If your primary beneficiary dies before you and you have not updated the \
             designation, the account falls to your estate. A contingent beneficiary is a \
             backup that prevents this automatically.",
            "Name a contingent beneficiary on this account. Common choices are adult children, \
             a sibling, or a trusted person.",
        )
    })
}
