//! Governance vote attribution.
//!
//! Given a parsed genesis export, computes for every delegator of the top
//! bonded validators the vote weight it carries on one proposal:
//!
//! 1. [`validators`] picks the bonded set, ranks by tokens, truncates to
//!    `max_validators` and derives each validator's account address.
//! 2. [`delegation`] keeps delegations to that set and groups them per delegator.
//! 3. [`votes`] collects the weighted ballots cast on the proposal.
//! 4. [`attribution`] combines both: a delegator's own ballot wins, otherwise
//!    it inherits the ballots of the validators it delegates to, weighted by shares.
//!
//! [`engine::TallyEngine`] runs the whole pipeline as a single batch.

pub mod attribution;
pub mod delegation;
pub mod engine;
pub mod error;
pub mod validators;
pub mod votes;

pub use attribution::attribute_votes;
pub use delegation::{filter_delegations, group_by_delegator};
pub use engine::{TallyConfig, TallyEngine};
pub use error::{Stage, TallyError};
pub use validators::select_validators;
pub use votes::extract_votes;
