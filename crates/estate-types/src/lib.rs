//! Shared record shapes for the estate-designation analysis stack.
//!
//! `client` holds the typed client profile as it arrives from the
//! advisor roster document; `finding` holds the uniform record every
//! rule check emits. Both sides of the engine boundary depend on this
//! crate and nothing else shared.

pub mod client;
pub mod finding;

pub use client::{
    Account, AccountKind, Child, ClientProfile, ClientRoster, Designation, MaritalStatus, Partner,
    ProfileError, Relationship, RosterEntry,
};
pub use finding::{AccountScope, Finding, Severity};
