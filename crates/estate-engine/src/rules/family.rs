//! Trigger predicates shared by the three account-category rule sets.
//!
//! The categories differ in which field holds the succession role
//! (successor holder on a TFSA, successor annuitant on RRSP/RRIF) and
//! in message wording, so each category keeps its own table; the
//! conditions behind the tables live here. All predicates read
//! through `Option`: a designation missing at any depth is absence
//! and simply fails the trigger.

use estate_types::{Account, AccountKind, ClientProfile, Designation, MaritalStatus, Relationship};

/// Explicitly flagged as no longer a spouse. `None` (unknown) does
/// not fire; only a recorded `false` does.
pub(crate) fn is_ex_spouse(designee: Option<&Designation>) -> bool {
    designee.and_then(|d| d.is_currently_spouse) == Some(false)
}

/// Explicitly flagged as deceased; `None` does not fire.
pub(crate) fn is_deceased(designee: Option<&Designation>) -> bool {
    designee.and_then(|d| d.is_currently_alive) == Some(false)
}

pub(crate) fn relationship_of(designee: Option<&Designation>) -> Option<&Relationship> {
    designee.and_then(|d| d.relationship.as_ref())
}

/// Married client who named their spouse as primary beneficiary but
/// left the succession role empty. The spouse gets the money either
/// way; the succession role would have preserved the account itself.
pub(crate) fn spouse_named_beneficiary_only(
    account: &Account,
    client: &ClientProfile,
    successor: Option<&Designation>,
) -> bool {
    client.marital_status == MaritalStatus::Married
        && relationship_of(account.beneficiary_primary.as_ref()) == Some(&Relationship::Spouse)
        && successor.is_none()
}

/// Primary beneficiary whose name exactly matches a child flagged as
/// a minor in the client's children list.
pub(crate) fn primary_names_minor_child(account: &Account, client: &ClientProfile) -> bool {
    let Some(name) = account
        .beneficiary_primary
        .as_ref()
        .and_then(|d| d.name.as_deref())
    else {
        return false;
    };
    client
        .children
        .iter()
        .any(|child| child.name == name && child.is_minor)
}

pub(crate) fn missing_contingent(account: &Account) -> bool {
    account.beneficiary_primary.is_some() && account.beneficiary_contingent.is_none()
}

/// Primary beneficiary in the non-spouse set (sibling, parent, or any
/// relationship outside the closed ones) on an account with a
/// positive balance. Spouse, common-law, and child beneficiaries are
/// excluded: those have rollover or dependent-minor paths.
pub(crate) fn taxable_non_spouse_beneficiary(account: &Account) -> Option<&Relationship> {
    let relationship = relationship_of(account.beneficiary_primary.as_ref())?;
    let non_spouse = matches!(
        relationship,
        Relationship::Sibling | Relationship::Parent | Relationship::Other(_)
    );
    (non_spouse && account.balance > 0.0).then_some(relationship)
}

/// Total balance held in the client's non-registered accounts, the
/// liquid pool available to cover an estate tax bill.
pub(crate) fn non_registered_total(client: &ClientProfile) -> f64 {
    client
        .accounts
        .iter()
        .filter(|a| a.kind == AccountKind::NonRegistered)
        .map(|a| a.balance)
        .sum()
}
