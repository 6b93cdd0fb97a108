//! Life-event rules: client-level checks correlating marriage,
//! divorce, new children, cohabitation, and will status against the
//! designations on the account collection as a whole.
//!
//! Date-derived triggers (cohabitation duration, will age) are
//! computed against the reference date the orchestrator passes in,
//! never against the wall clock directly.

use chrono::NaiveDate;
use estate_types::{Account, ClientProfile, Finding, MaritalStatus, Relationship, Severity};

use super::{evaluate_client, family, ClientRule, RuleText};

/// A child this young means the designations almost certainly predate
/// them.
const NEWBORN_AGE_MONTHS: u32 = 12;

/// Cohabitation duration at which common-law treatment typically
/// begins to apply.
const COMMON_LAW_MONTHS: i64 = 12;

/// Will age at which a review is overdue.
const STALE_WILL_YEARS: i64 = 10;

const LIFE_EVENT_RULES: &[ClientRule] = &[
    ClientRule {
        code: "L1",
        severity: Severity::High,
        check: married_without_spouse_designee,
    },
    ClientRule {
        code: "L2",
        severity: Severity::Critical,
        check: divorced_with_ex_still_named,
    },
    ClientRule {
        code: "L3",
        severity: Severity::Medium,
        check: newborn_not_reflected,
    },
    ClientRule {
        code: "L5",
        severity: Severity::Medium,
        check: common_law_partner_not_named,
    },
    ClientRule {
        code: "L0",
        severity: Severity::High,
        check: no_will,
    },
    ClientRule {
        code: "L0",
        severity: Severity::Medium,
        check: stale_will,
    },
];

pub fn check_life_events(client: &ClientProfile, today: NaiveDate) -> Vec<Finding> {
    evaluate_client(LIFE_EVENT_RULES, client, today)
}

/// Does any succession role or primary beneficiary on this account
/// carry the given relationship?
fn names_relationship(account: &Account, relationship: &Relationship) -> bool {
    [
        account.successor_holder.as_ref(),
        account.successor_annuitant.as_ref(),
        account.beneficiary_primary.as_ref(),
    ]
    .into_iter()
    .any(|designee| family::relationship_of(designee) == Some(relationship))
}

fn married_without_spouse_designee(client: &ClientProfile, _today: NaiveDate) -> Option<RuleText> {
    let fires = client.marital_status == MaritalStatus::Married
        && client.marriage_date.is_some()
        && !client
            .accounts
            .iter()
            .any(|a| names_relationship(a, &Relationship::Spouse));
    fires.then(|| {
        RuleText::new(
            "Recently married but spouse not named on any account",
            "Your new spouse has no legal claim to any of your registered accounts. In most \
             provinces marriage does not automatically update beneficiary designations. If you \
             die tomorrow your spouse may receive nothing from your investment accounts.",
            "Review and update all account designations to reflect your marriage. Update your \
             will at the same time.",
        )
    })
}

fn divorced_with_ex_still_named(client: &ClientProfile, _today: NaiveDate) -> Option<RuleText> {
    let fires = client.marital_status == MaritalStatus::Divorced
        && client.accounts.iter().any(|a| {
            family::is_ex_spouse(a.successor_holder.as_ref())
                || family::is_ex_spouse(a.successor_annuitant.as_ref())
                || family::is_ex_spouse(a.beneficiary_primary.as_ref())
        });
    fires.then(|| {
        RuleText::new(
            "Recently divorced but ex-spouse still named on one or more accounts",
            "Divorce does NOT automatically remove beneficiary designations in Canada. Your \
             ex-spouse will legally inherit every account still named in their favour. Your \
             will cannot override this. This is the most common and costly estate planning \
             mistake Canadians make.",
            "Treat this as an emergency. Update every account designation today. Do not wait.",
        )
    })
}

fn newborn_not_reflected(client: &ClientProfile, _today: NaiveDate) -> Option<RuleText> {
    let has_newborn = client
        .children
        .iter()
        .any(|child| matches!(child.age_months, Some(age) if age <= NEWBORN_AGE_MONTHS));
    // Only the beneficiary slots count here: a child cannot hold a
    // successor role, so a child-relationship successor designee is a
    // data problem, not provision for the child.
    let any_child_designee = client.accounts.iter().any(|a| {
        [
            a.beneficiary_primary.as_ref(),
            a.beneficiary_contingent.as_ref(),
        ]
        .into_iter()
        .any(|designee| family::relationship_of(designee) == Some(&Relationship::Child))
    });
    (has_newborn && !any_child_designee).then(|| {
        RuleText::new(
            "New child not reflected in any account designations",
            "Your new child receives nothing from your registered accounts by default. If your \
             will also predates the child, they may be inadequately provided for entirely. \
             There is also no formal guardian named if both parents die.",
            "Review all account designations with your new child in mind. Update your will \
             immediately and name a guardian.",
        )
    })
}

fn common_law_partner_not_named(client: &ClientProfile, today: NaiveDate) -> Option<RuleText> {
    let partner = client.current_partner.as_ref()?;

    // A start date beats the explicit duration when both are present.
    let months_together = match partner.cohabitation_start {
        Some(start) => (today - start).num_days() / 30,
        None => i64::from(partner.months_living_together.unwrap_or(0)),
    };
    if months_together < COMMON_LAW_MONTHS {
        return None;
    }

    let any_partner_designee = client
        .accounts
        .iter()
        .any(|a| names_relationship(a, &Relationship::CommonLaw));
    (!any_partner_designee).then(|| {
        RuleText::new(
            format!("Common-law partner of {months_together} months not named on any account"),
            "Your common-law partner qualifies for the same tax advantages as a married spouse \
             in Canada — but only if properly designated. Without any designation they receive \
             nothing from your registered accounts.",
            "Update designations to reflect your common-law relationship. Note that common-law \
             rules vary by province — confirm your province's definition applies to your \
             situation.",
        )
    })
}

fn no_will(client: &ClientProfile, _today: NaiveDate) -> Option<RuleText> {
    (!client.has_will).then(|| {
        RuleText::new(
            "No will on file",
            "Without a will, provincial intestacy rules decide who gets everything — not you. \
             For clients with children this also means no guardian is formally named. The \
             courts decide. Registered accounts with named beneficiaries bypass this, but \
             everything else does not.",
            "Create a will as soon as possible. This is especially urgent if you have \
             children, a common-law partner, or significant non-registered assets.",
        )
    })
}

fn stale_will(client: &ClientProfile, today: NaiveDate) -> Option<RuleText> {
    if !client.has_will {
        return None;
    }
    let updated = client.will_last_updated?;
    let years_since_update = (today - updated).num_days() / 365;
    (years_since_update >= STALE_WILL_YEARS).then(|| {
        RuleText::new(
            format!("Will has not been updated in {years_since_update} years"),
            "A will that predates major life events — marriage, divorce, children, significant \
             assets — may no longer reflect your wishes. Named executors or beneficiaries in \
             the will may have died or become estranged.",
            "Review your will with an estate lawyer. At minimum confirm the executor is still \
             willing and able, and that the beneficiaries still reflect your wishes.",
        )
    })
}
