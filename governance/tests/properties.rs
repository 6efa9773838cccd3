//! Property tests over synthetic genesis documents, exercising the full
//! pipeline through [`TallyEngine::run`].

use std::collections::BTreeMap;

use govtally_governance::{TallyConfig, TallyEngine};
use govtally_types::{AttributionSet, Decimal, VotedBy};
use proptest::prelude::*;
use serde_json::{json, Value};

const OPTIONS: [&str; 4] = [
    "VOTE_OPTION_YES",
    "VOTE_OPTION_NO",
    "VOTE_OPTION_NO_WITH_VETO",
    "VOTE_OPTION_ABSTAIN",
];

#[derive(Clone, Debug)]
struct Fixture {
    validator_tokens: Vec<u64>,
    /// (delegator index, validator index, shares)
    delegations: Vec<(usize, usize, Decimal)>,
    /// (voter, [(option index, weight)])
    votes: Vec<(String, Vec<(usize, Decimal)>)>,
}

fn operator(i: usize) -> String {
    format!("cosmosvaloper1v{i}")
}

fn delegator(i: usize) -> String {
    format!("cosmos1d{i}")
}

fn to_account(op: &str) -> String {
    op.replace("valoper", "")
}

fn engine() -> TallyEngine<fn(&str) -> String> {
    TallyEngine::new(TallyConfig::new("848"), to_account as fn(&str) -> String)
}

impl Fixture {
    fn genesis(&self) -> Value {
        let validators: Vec<Value> = self
            .validator_tokens
            .iter()
            .enumerate()
            .map(|(i, t)| {
                json!({
                    "operator_address": operator(i),
                    "tokens": t.to_string(),
                    "status": "BOND_STATUS_BONDED"
                })
            })
            .collect();
        let delegations: Vec<Value> = self
            .delegations
            .iter()
            .map(|(d, v, shares)| {
                json!({
                    "delegator_address": delegator(*d),
                    "validator_address": operator(*v),
                    "shares": shares.to_string()
                })
            })
            .collect();
        let votes: Vec<Value> = self
            .votes
            .iter()
            .map(|(voter, opts)| {
                let options: Vec<Value> = opts
                    .iter()
                    .map(|(o, w)| json!({"option": OPTIONS[*o], "weight": w.to_string()}))
                    .collect();
                json!({"proposal_id": "848", "voter": voter, "options": options})
            })
            .collect();
        json!({
            "app_state": {
                "staking": {
                    "params": {"max_validators": self.validator_tokens.len()},
                    "validators": validators,
                    "delegations": delegations
                },
                "gov": {"votes": votes}
            }
        })
    }

    fn shares_by_delegator(&self) -> BTreeMap<String, Decimal> {
        let mut totals = BTreeMap::new();
        for (d, _, shares) in &self.delegations {
            *totals.entry(delegator(*d)).or_insert(Decimal::ZERO) += *shares;
        }
        totals
    }
}

fn decimal() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000_000, 0u32..7).prop_map(|(m, s)| Decimal::new(m, s))
}

fn weight() -> impl Strategy<Value = Decimal> {
    (0i64..=1_000, Just(3u32)).prop_map(|(m, s)| Decimal::new(m, s))
}

fn fixture() -> impl Strategy<Value = Fixture> {
    (1usize..5).prop_flat_map(|n_validators| {
        let voters = prop_oneof![
            (0..n_validators).prop_map(|i| to_account(&operator(i))),
            (0usize..6).prop_map(delegator),
        ];
        (
            prop::collection::vec(1u64..1_000_000, n_validators),
            prop::collection::vec((0usize..6, 0..n_validators, decimal()), 0..20),
            prop::collection::vec(
                (voters, prop::collection::vec((0usize..4, weight()), 0..4)),
                0..10,
            ),
        )
            .prop_map(|(validator_tokens, delegations, votes)| Fixture {
                validator_tokens,
                delegations,
                votes,
            })
    })
}

fn run(f: &Fixture) -> AttributionSet {
    engine().run(&f.genesis()).expect("fixture is well formed")
}

proptest! {
    /// Every delegator's output shares equal the sum of its delegation shares.
    #[test]
    fn shares_are_conserved(f in fixture()) {
        let results = run(&f);
        let expected = f.shares_by_delegator();
        prop_assert_eq!(results.len(), expected.len());
        for (addr, shares) in expected {
            prop_assert_eq!(results[&addr].shares, shares);
        }
    }

    /// Two runs over the same document serialise identically.
    #[test]
    fn runs_are_idempotent(f in fixture()) {
        let doc = f.genesis();
        let a = serde_json::to_vec(&engine().run(&doc).unwrap()).unwrap();
        let b = serde_json::to_vec(&engine().run(&doc).unwrap()).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Removing a delegation never raises that delegator's vote totals.
    #[test]
    fn removing_a_delegation_is_monotone(f in fixture(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!f.delegations.is_empty());
        let before = run(&f);
        let idx = pick.index(f.delegations.len());
        let removed = delegator(f.delegations[idx].0);
        let mut smaller = f.clone();
        smaller.delegations.remove(idx);
        let after = run(&smaller);

        let old = before[&removed].votes();
        if let Some(r) = after.get(&removed) {
            let new = r.votes();
            prop_assert!(new.yes <= old.yes);
            prop_assert!(new.no <= old.no);
            prop_assert!(new.no_with_veto <= old.no_with_veto);
            prop_assert!(new.abstain <= old.abstain);
        }
    }

    /// A delegator's own ballot fully determines its totals.
    #[test]
    fn direct_ballot_takes_precedence(f in fixture()) {
        let results = run(&f);
        // Last ballot per voter wins, and within it the last weight per option.
        let mut ballots: BTreeMap<String, [Decimal; 4]> = BTreeMap::new();
        for (voter, opts) in &f.votes {
            let mut w = [Decimal::ZERO; 4];
            for (o, weight) in opts {
                w[*o] = *weight;
            }
            ballots.insert(voter.clone(), w);
        }
        for (addr, r) in &results {
            match ballots.get(addr) {
                Some(w) => {
                    prop_assert_eq!(r.voted_by, VotedBy::Direct);
                    prop_assert_eq!(r.vote_yes, r.shares * w[0]);
                    prop_assert_eq!(r.vote_no, r.shares * w[1]);
                    prop_assert_eq!(r.vote_no_with_veto, r.shares * w[2]);
                    prop_assert_eq!(r.vote_abstain, r.shares * w[3]);
                }
                None => prop_assert_eq!(r.voted_by, VotedBy::Delegated),
            }
        }
    }
}
