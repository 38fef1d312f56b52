// ********* Registry records ***********

use snafu::Snafu;
use std::fmt::Display;

/// Identifier of a voter. Candidates reuse the identifier of the voter they were promoted from.
pub type VoterId = u32;

/// A registered person, entitled to exactly one ballot.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Voter {
    pub voter_id: VoterId,
    pub name: String,
    /// Only ever goes from false to true, when a ballot is accepted.
    pub has_voted: bool,
}

/// A voter that can also receive votes.
///
/// The identifier and the name are always copies of the ones of an existing voter.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Candidate {
    pub candidate_id: VoterId,
    pub name: String,
    pub votes: u64,
}

/// One accepted ballot in the audit log.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct VoteLogEntry {
    pub voter: String,
    pub candidate: String,
}

impl Display for VoteLogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Voter {} voted for {}.", self.voter, self.candidate)
    }
}

// ******** Outcomes *********

/// The acknowledgement returned by a successful registry operation.
///
/// The textual form is the status message displayed to the user.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Receipt {
    VoterRegistered { name: String },
    CandidateRegistered { name: String },
    VoteCast { voter: String, candidate: String },
}

impl Display for Receipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Receipt::VoterRegistered { name } => {
                write!(f, "Voter {} registered successfully.", name)
            }
            Receipt::CandidateRegistered { name } => {
                write!(f, "Candidate {} registered successfully.", name)
            }
            Receipt::VoteCast { voter, candidate } => {
                write!(f, "Vote cast successfully by {} for {}.", voter, candidate)
            }
        }
    }
}

/// Which operation was looking up a voter that does not exist.
///
/// It only changes the wording of the message.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum VoterLookup {
    Candidacy,
    Ballot,
}

fn unknown_voter_text(lookup: VoterLookup, voter_id: VoterId) -> String {
    match lookup {
        VoterLookup::Candidacy => format!(
            "Invalid Voter ID: {}. Only registered voters can be candidates.",
            voter_id
        ),
        VoterLookup::Ballot => format!("Voter ID {} not found.", voter_id),
    }
}

/// Reasons for rejecting an operation.
///
/// A rejected operation never modifies the registry.
#[derive(Eq, PartialEq, Debug, Clone, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RegistryError {
    #[snafu(display("Voter ID {voter_id} already exists."))]
    DuplicateVoter { voter_id: VoterId },

    #[snafu(display("{}", unknown_voter_text(*lookup, *voter_id)))]
    UnknownVoter {
        voter_id: VoterId,
        lookup: VoterLookup,
    },

    #[snafu(display(
        "Voter ID {candidate_id} and name '{name}' do not match the registered voter details."
    ))]
    NameMismatch { candidate_id: VoterId, name: String },

    #[snafu(display("Candidate ID {candidate_id} already exists."))]
    DuplicateCandidate { candidate_id: VoterId },

    #[snafu(display("Candidate ID {candidate_id} not found."))]
    UnknownCandidate { candidate_id: VoterId },

    #[snafu(display("Voter {name} has already voted."))]
    AlreadyVoted { name: String },
}
