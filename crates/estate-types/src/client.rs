//! Typed client profile model.
//!
//! Every field a rule can touch is explicitly optional or defaulted:
//! a profile document with fields missing at any depth deserializes
//! cleanly, and the missing pieces read as absence to the rules. The
//! string-keyed enums (`MaritalStatus`, `Relationship`, `AccountKind`)
//! are tolerant of unrecognized labels for the same reason: an
//! unknown account type still has to be counted by the cross-account
//! coverage checks, it is only skipped by the type-specific rules.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("failed to read client file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse client JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One client as the engine sees them. Constructed externally,
/// passed by reference, never mutated by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientProfile {
    pub name: String,
    pub marital_status: MaritalStatus,
    pub marriage_date: Option<NaiveDate>,
    pub current_partner: Option<Partner>,
    pub children: Vec<Child>,
    pub has_will: bool,
    pub will_last_updated: Option<NaiveDate>,
    pub province: String,
    pub accounts: Vec<Account>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Partner {
    pub name: Option<String>,
    pub months_living_together: Option<u32>,
    pub cohabitation_start: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Child {
    pub name: String,
    pub is_minor: bool,
    pub age_months: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub account_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: AccountKind,
    pub balance: f64,
    pub successor_holder: Option<Designation>,
    pub successor_annuitant: Option<Designation>,
    pub beneficiary_primary: Option<Designation>,
    pub beneficiary_contingent: Option<Designation>,
}

impl Account {
    /// Whether the account has any post-death designation at all.
    /// This is the cross-account definition of "designated".
    pub fn has_any_designation(&self) -> bool {
        self.successor_holder.is_some()
            || self.successor_annuitant.is_some()
            || self.beneficiary_primary.is_some()
    }
}

/// A named person's relationship to an account.
///
/// The two flags are tri-state: `Some(false)` is an explicit signal
/// that the designation has gone stale (an ex-spouse, a deceased
/// designee), `None` is simply unknown. Absence of the whole
/// `Designation` means nothing was ever named, a different situation
/// from either flag value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Designation {
    pub name: Option<String>,
    pub relationship: Option<Relationship>,
    pub is_currently_spouse: Option<bool>,
    pub is_currently_alive: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    #[serde(rename = "common-law")]
    CommonLaw,
    Divorced,
    Widowed,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Relationship of a designee to the client.
///
/// Source documents use a looser vocabulary ("sister", "daughter",
/// "friend"); synonyms collapse into the closed variants and anything
/// else lands in `Other` with the original label kept for message
/// text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relationship {
    Spouse,
    CommonLaw,
    Child,
    Sibling,
    Parent,
    Other(String),
}

impl Relationship {
    pub fn label(&self) -> &str {
        match self {
            Relationship::Spouse => "spouse",
            Relationship::CommonLaw => "common-law",
            Relationship::Child => "child",
            Relationship::Sibling => "sibling",
            Relationship::Parent => "parent",
            Relationship::Other(raw) => raw,
        }
    }
}

impl From<&str> for Relationship {
    fn from(s: &str) -> Self {
        match s {
            "spouse" => Relationship::Spouse,
            "common-law" | "common_law" => Relationship::CommonLaw,
            "child" | "son" | "daughter" => Relationship::Child,
            "sibling" | "brother" | "sister" => Relationship::Sibling,
            "parent" | "mother" | "father" => Relationship::Parent,
            other => Relationship::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Relationship {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Relationship {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Relationship::from(raw.as_str()))
    }
}

/// Account category. The three registered categories carry
/// type-specific rules; `NonRegistered` feeds the liquidity check;
/// anything else is `Other` with its label preserved so coverage
/// messages can still name it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKind {
    Tfsa,
    Rrsp,
    Rrif,
    NonRegistered,
    Other(String),
}

impl AccountKind {
    pub fn label(&self) -> &str {
        match self {
            AccountKind::Tfsa => "TFSA",
            AccountKind::Rrsp => "RRSP",
            AccountKind::Rrif => "RRIF",
            AccountKind::NonRegistered => "non-registered",
            AccountKind::Other(raw) => raw,
        }
    }
}

impl Default for AccountKind {
    fn default() -> Self {
        AccountKind::Other("unknown".to_string())
    }
}

impl From<&str> for AccountKind {
    fn from(s: &str) -> Self {
        match s {
            "TFSA" => AccountKind::Tfsa,
            "RRSP" => AccountKind::Rrsp,
            "RRIF" => AccountKind::Rrif,
            "non-registered" => AccountKind::NonRegistered,
            other => AccountKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for AccountKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for AccountKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(AccountKind::from(raw.as_str()))
    }
}

/// The advisor roster document: a list of clients, each tagged with
/// the scenario label used by the batch report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientRoster {
    pub clients: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(rename = "_scenario", default)]
    pub scenario: String,
    pub client: ClientProfile,
}

impl ClientRoster {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ProfileError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_a_valid_profile() {
        let profile: ClientProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile.marital_status, MaritalStatus::Unknown);
        assert!(!profile.has_will);
        assert!(profile.accounts.is_empty());
        assert!(profile.marriage_date.is_none());
    }

    #[test]
    fn account_with_missing_fields_deserializes() {
        let account: Account = serde_json::from_str(r#"{"type": "TFSA"}"#).unwrap();
        assert_eq!(account.kind, AccountKind::Tfsa);
        assert_eq!(account.balance, 0.0);
        assert!(account.account_id.is_none());
        assert!(!account.has_any_designation());
    }

    #[test]
    fn unknown_account_type_keeps_its_label() {
        let account: Account = serde_json::from_str(r#"{"type": "LIRA"}"#).unwrap();
        assert_eq!(account.kind, AccountKind::Other("LIRA".to_string()));
        assert_eq!(account.kind.label(), "LIRA");
    }

    #[test]
    fn relationship_synonyms_collapse() {
        for raw in ["sister", "brother", "sibling"] {
            assert_eq!(Relationship::from(raw), Relationship::Sibling);
        }
        for raw in ["son", "daughter", "child"] {
            assert_eq!(Relationship::from(raw), Relationship::Child);
        }
        for raw in ["mother", "father", "parent"] {
            assert_eq!(Relationship::from(raw), Relationship::Parent);
        }
        assert_eq!(
            Relationship::from("friend"),
            Relationship::Other("friend".to_string())
        );
        assert_eq!(Relationship::from("friend").label(), "friend");
    }

    #[test]
    fn tri_state_flags_distinguish_unknown_from_false() {
        let designation: Designation =
            serde_json::from_str(r#"{"name": "Robert", "is_currently_spouse": false}"#).unwrap();
        assert_eq!(designation.is_currently_spouse, Some(false));
        assert_eq!(designation.is_currently_alive, None);
    }

    #[test]
    fn unrecognized_marital_status_is_tolerated() {
        let profile: ClientProfile =
            serde_json::from_str(r#"{"marital_status": "separated"}"#).unwrap();
        assert_eq!(profile.marital_status, MaritalStatus::Unknown);
    }

    #[test]
    fn dates_parse_from_iso_strings() {
        let profile: ClientProfile = serde_json::from_str(
            r#"{"has_will": true, "will_last_updated": "2010-03-15"}"#,
        )
        .unwrap();
        assert_eq!(
            profile.will_last_updated,
            NaiveDate::from_ymd_opt(2010, 3, 15)
        );
    }

    #[test]
    fn malformed_date_is_a_parse_error() {
        let err = serde_json::from_str::<ClientProfile>(
            r#"{"will_last_updated": "15/03/2010"}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn roster_round_trips() {
        let roster = ClientRoster::from_json(
            r#"{
                "clients": [
                    {
                        "_scenario": "recently divorced",
                        "client": {"name": "Dana", "province": "ON", "accounts": []}
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(roster.clients.len(), 1);
        assert_eq!(roster.clients[0].scenario, "recently divorced");
        assert_eq!(roster.clients[0].client.name, "Dana");
    }
}
