//! Domain types shared across every crate in the workspace.
//!
//! Validators, delegations, ballots and the per-delegator attribution records
//! produced by the governance engine and served by the lookup API.

pub mod address;
pub mod attribution;
pub mod delegation;
pub mod proposal;
pub mod snapshot;
pub mod validator;
pub mod vote;

pub use address::AddressConverter;
pub use attribution::{AttributionResult, AttributionSet, ValidatorContribution, VotedBy};
pub use delegation::{Contribution, Delegation, DelegationGroup};
pub use proposal::ProposalId;
pub use rust_decimal::Decimal;
pub use snapshot::SnapshotMeta;
pub use validator::{BondStatus, Validator};
pub use vote::{OptionWeights, VoteOption, VoteRecord};
