/*!
An in-memory registry for a small election: voters are registered, some of them are
promoted to candidates, and each voter may cast exactly one ballot.

```
use voting_registry::VotingSystem;
# use voting_registry::RegistryError;

let mut system = VotingSystem::new();
system.register_voter(1, "Alice")?;
system.register_voter(2, "Bob")?;
system.register_candidate(1, "Alice")?;

let receipt = system.cast_vote(2, 1)?;
assert_eq!(receipt.to_string(), "Vote cast successfully by Bob for Alice.");
assert_eq!(system.display_results(), vec![("Alice".to_string(), 1)]);
# Ok::<(), RegistryError>(())
```

See the [manual] for the exact messages and the HTTP front end.
*/

pub mod builder;
mod config;
pub mod manual;

use log::{debug, info};
use snafu::prelude::*;

use std::collections::BTreeMap;

pub use crate::config::*;

/// The registry of voters, candidates and accepted ballots.
///
/// All the checks of an operation happen before any mutation, so a rejected
/// operation leaves the registry untouched.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct VotingSystem {
    voters: BTreeMap<VoterId, Voter>,
    candidates: BTreeMap<VoterId, Candidate>,
    logs: Vec<VoteLogEntry>,
}

impl VotingSystem {
    pub fn new() -> VotingSystem {
        VotingSystem::default()
    }

    /// Registers a new voter. Names do not need to be unique.
    pub fn register_voter(
        &mut self,
        voter_id: VoterId,
        name: &str,
    ) -> Result<Receipt, RegistryError> {
        ensure!(
            !self.voters.contains_key(&voter_id),
            DuplicateVoterSnafu { voter_id }
        );
        self.voters.insert(
            voter_id,
            Voter {
                voter_id,
                name: name.to_string(),
                has_voted: false,
            },
        );
        debug!("register_voter: {} -> {:?}", voter_id, name);
        Ok(Receipt::VoterRegistered {
            name: name.to_string(),
        })
    }

    /// Promotes an existing voter to a candidate.
    ///
    /// The name must be exactly the one under which the voter was registered.
    pub fn register_candidate(
        &mut self,
        candidate_id: VoterId,
        name: &str,
    ) -> Result<Receipt, RegistryError> {
        let voter = self.voters.get(&candidate_id).context(UnknownVoterSnafu {
            voter_id: candidate_id,
            lookup: VoterLookup::Candidacy,
        })?;
        ensure!(
            voter.name == name,
            NameMismatchSnafu { candidate_id, name }
        );
        ensure!(
            !self.candidates.contains_key(&candidate_id),
            DuplicateCandidateSnafu { candidate_id }
        );
        self.candidates.insert(
            candidate_id,
            Candidate {
                candidate_id,
                name: name.to_string(),
                votes: 0,
            },
        );
        info!("register_candidate: {} -> {:?}", candidate_id, name);
        Ok(Receipt::CandidateRegistered {
            name: name.to_string(),
        })
    }

    /// Casts the single ballot of a voter.
    ///
    /// The checks run in order: the voter exists, the candidate exists, the voter has not voted yet.
    pub fn cast_vote(
        &mut self,
        voter_id: VoterId,
        candidate_id: VoterId,
    ) -> Result<Receipt, RegistryError> {
        let voter = self.voters.get_mut(&voter_id).context(UnknownVoterSnafu {
            voter_id,
            lookup: VoterLookup::Ballot,
        })?;
        let candidate = self
            .candidates
            .get_mut(&candidate_id)
            .context(UnknownCandidateSnafu { candidate_id })?;
        ensure!(
            !voter.has_voted,
            AlreadyVotedSnafu {
                name: voter.name.clone()
            }
        );

        voter.has_voted = true;
        candidate.votes += 1;
        let entry = VoteLogEntry {
            voter: voter.name.clone(),
            candidate: candidate.name.clone(),
        };
        info!("cast_vote: {}", entry);
        self.logs.push(entry);
        Ok(Receipt::VoteCast {
            voter: voter.name.clone(),
            candidate: candidate.name.clone(),
        })
    }

    /// The current tally, one entry per candidate, ordered by candidate id.
    ///
    /// Candidates sharing a name are reported separately.
    pub fn display_results(&self) -> Vec<(String, u64)> {
        self.candidates
            .values()
            .map(|c| (c.name.clone(), c.votes))
            .collect()
    }

    /// The accepted ballots, in the order they were cast.
    pub fn display_logs(&self) -> &[VoteLogEntry] {
        &self.logs
    }

    pub fn voter(&self, voter_id: VoterId) -> Option<&Voter> {
        self.voters.get(&voter_id)
    }

    pub fn candidate(&self, candidate_id: VoterId) -> Option<&Candidate> {
        self.candidates.get(&candidate_id)
    }

    /// The candidates, ordered by id.
    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.values()
    }

    pub fn num_voters(&self) -> usize {
        self.voters.len()
    }

    pub fn num_candidates(&self) -> usize {
        self.candidates.len()
    }

    pub fn total_votes(&self) -> u64 {
        self.candidates.values().map(|c| c.votes).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn alice_and_bob() -> VotingSystem {
        let mut system = VotingSystem::new();
        system.register_voter(1, "Alice").unwrap();
        system.register_voter(2, "Bob").unwrap();
        system
    }

    #[test]
    fn register_voter_once() {
        init();
        let mut system = VotingSystem::new();
        let receipt = system.register_voter(1, "Alice").unwrap();
        assert_eq!(receipt.to_string(), "Voter Alice registered successfully.");
        let voter = system.voter(1).unwrap();
        assert_eq!(voter.name, "Alice");
        assert!(!voter.has_voted);
    }

    #[test]
    fn duplicate_voter_ignores_name() {
        init();
        let mut system = alice_and_bob();
        for name in ["Alice", "Carol", ""] {
            let err = system.register_voter(1, name).unwrap_err();
            assert_eq!(err, RegistryError::DuplicateVoter { voter_id: 1 });
            assert_eq!(err.to_string(), "Voter ID 1 already exists.");
        }
        assert_eq!(system.voter(1).unwrap().name, "Alice");
        assert_eq!(system.num_voters(), 2);
    }

    #[test]
    fn voter_names_need_not_be_unique() {
        init();
        let mut system = VotingSystem::new();
        system.register_voter(48, "BHARGAV").unwrap();
        system.register_voter(74, "BHARGAV").unwrap();
        assert_eq!(system.num_voters(), 2);
    }

    #[test]
    fn candidate_registered_then_duplicate() {
        init();
        let mut system = alice_and_bob();
        let receipt = system.register_candidate(1, "Alice").unwrap();
        assert_eq!(
            receipt.to_string(),
            "Candidate Alice registered successfully."
        );
        let err = system.register_candidate(1, "Alice").unwrap_err();
        assert_eq!(err, RegistryError::DuplicateCandidate { candidate_id: 1 });
        assert_eq!(err.to_string(), "Candidate ID 1 already exists.");
        assert_eq!(system.num_candidates(), 1);
    }

    #[test]
    fn candidate_name_mismatch() {
        init();
        let mut system = alice_and_bob();
        let err = system.register_candidate(1, "Bob").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Voter ID 1 and name 'Bob' do not match the registered voter details."
        );
        // Exact equality, no case folding.
        assert!(matches!(
            system.register_candidate(1, "alice"),
            Err(RegistryError::NameMismatch { .. })
        ));
        assert_eq!(system.num_candidates(), 0);
    }

    #[test]
    fn candidate_must_be_a_voter() {
        init();
        let mut system = alice_and_bob();
        let err = system.register_candidate(5, "Eve").unwrap_err();
        assert_eq!(
            err,
            RegistryError::UnknownVoter {
                voter_id: 5,
                lookup: VoterLookup::Candidacy
            }
        );
        assert_eq!(
            err.to_string(),
            "Invalid Voter ID: 5. Only registered voters can be candidates."
        );
    }

    #[test]
    fn name_is_checked_before_duplicates() {
        init();
        let mut system = alice_and_bob();
        system.register_candidate(1, "Alice").unwrap();
        assert!(matches!(
            system.register_candidate(1, "Bob"),
            Err(RegistryError::NameMismatch { .. })
        ));
    }

    #[test]
    fn cast_vote_once() {
        init();
        let mut system = alice_and_bob();
        system.register_candidate(1, "Alice").unwrap();

        let receipt = system.cast_vote(2, 1).unwrap();
        assert_eq!(
            receipt.to_string(),
            "Vote cast successfully by Bob for Alice."
        );
        assert_eq!(system.candidate(1).unwrap().votes, 1);
        assert!(system.voter(2).unwrap().has_voted);
        assert_eq!(system.display_logs().len(), 1);
        assert_eq!(
            system.display_logs()[0].to_string(),
            "Voter Bob voted for Alice."
        );

        let err = system.cast_vote(2, 1).unwrap_err();
        assert_eq!(
            err,
            RegistryError::AlreadyVoted {
                name: "Bob".to_string()
            }
        );
        assert_eq!(err.to_string(), "Voter Bob has already voted.");
        assert_eq!(system.candidate(1).unwrap().votes, 1);
        assert_eq!(system.display_logs().len(), 1);
    }

    #[test]
    fn cast_vote_unknown_voter() {
        init();
        let mut system = alice_and_bob();
        system.register_candidate(1, "Alice").unwrap();
        let before = system.clone();
        let err = system.cast_vote(99, 1).unwrap_err();
        assert_eq!(err.to_string(), "Voter ID 99 not found.");
        assert_eq!(system, before);
    }

    #[test]
    fn cast_vote_unknown_candidate() {
        init();
        let mut system = alice_and_bob();
        let before = system.clone();
        let err = system.cast_vote(2, 1).unwrap_err();
        assert_eq!(err, RegistryError::UnknownCandidate { candidate_id: 1 });
        assert_eq!(err.to_string(), "Candidate ID 1 not found.");
        assert!(!system.voter(2).unwrap().has_voted);
        assert_eq!(system, before);
    }

    #[test]
    fn cast_vote_checks_in_order() {
        init();
        let mut system = alice_and_bob();
        system.register_candidate(1, "Alice").unwrap();
        system.cast_vote(2, 1).unwrap();
        // Unknown voter wins over unknown candidate.
        assert!(matches!(
            system.cast_vote(99, 42),
            Err(RegistryError::UnknownVoter { .. })
        ));
        // Unknown candidate wins over already voted.
        assert!(matches!(
            system.cast_vote(2, 42),
            Err(RegistryError::UnknownCandidate { .. })
        ));
    }

    #[test]
    fn candidates_may_vote_for_themselves() {
        init();
        let mut system = alice_and_bob();
        system.register_candidate(1, "Alice").unwrap();
        system.cast_vote(1, 1).unwrap();
        assert_eq!(system.candidate(1).unwrap().votes, 1);
        assert!(system.voter(1).unwrap().has_voted);
    }

    #[test]
    fn tally_matches_ballots_and_logs() {
        init();
        let mut system = VotingSystem::new();
        for id in 1..=20 {
            system.register_voter(id, &format!("V{}", id)).unwrap();
        }
        system.register_candidate(3, "V3").unwrap();
        system.register_candidate(7, "V7").unwrap();

        let mut accepted = 0;
        for round in 0..2 {
            for id in 1..=25 {
                let cid = if (id + round) % 2 == 0 { 3 } else { 7 };
                if system.cast_vote(id, cid).is_ok() {
                    accepted += 1;
                }
            }
        }
        assert_eq!(accepted, 20);
        assert_eq!(system.total_votes(), 20);
        assert_eq!(system.display_logs().len(), 20);
        let from_results: u64 = system.display_results().iter().map(|(_, v)| v).sum();
        assert_eq!(from_results, 20);
    }

    #[test]
    fn results_are_ordered_by_candidate_id() {
        init();
        let mut system = VotingSystem::new();
        system.register_voter(9, "Zed").unwrap();
        system.register_voter(2, "Amy").unwrap();
        system.register_voter(5, "Amy").unwrap();
        system.register_candidate(9, "Zed").unwrap();
        system.register_candidate(5, "Amy").unwrap();
        system.register_candidate(2, "Amy").unwrap();
        system.cast_vote(9, 5).unwrap();

        // Duplicate names are kept apart.
        assert_eq!(
            system.display_results(),
            vec![
                ("Amy".to_string(), 0),
                ("Amy".to_string(), 1),
                ("Zed".to_string(), 0)
            ]
        );
        let ids: Vec<VoterId> = system.candidates().map(|c| c.candidate_id).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn logs_keep_casting_order() {
        init();
        let mut system = alice_and_bob();
        system.register_voter(3, "Carol").unwrap();
        system.register_candidate(1, "Alice").unwrap();
        system.register_candidate(2, "Bob").unwrap();
        system.cast_vote(3, 2).unwrap();
        system.cast_vote(1, 1).unwrap();
        system.cast_vote(2, 1).unwrap();

        let logs: Vec<String> = system
            .display_logs()
            .iter()
            .map(|e| e.to_string())
            .collect();
        assert_eq!(
            logs,
            vec![
                "Voter Carol voted for Bob.",
                "Voter Alice voted for Alice.",
                "Voter Bob voted for Alice."
            ]
        );
    }
}
