pub use crate::config::*;
use crate::VotingSystem;

use log::debug;

/// A builder for seeding a registry before it is served.
///
/// ```
/// use voting_registry::builder::Builder;
/// # use voting_registry::RegistryError;
///
/// let system = Builder::new()
///     .voters(&["Anna".to_string(), "Bob".to_string(), "Clara".to_string()])?
///     .candidates(&[1, 3])?
///     .build();
///
/// assert_eq!(system.num_voters(), 3);
/// assert_eq!(system.candidate(3).unwrap().name, "Clara");
/// # Ok::<(), RegistryError>(())
/// ```
pub struct Builder {
    pub(crate) _system: VotingSystem,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _system: VotingSystem::new(),
        }
    }

    /// Registers a single voter.
    pub fn voter(mut self, voter_id: VoterId, name: &str) -> Result<Builder, RegistryError> {
        self._system.register_voter(voter_id, name)?;
        Ok(self)
    }

    /// Registers the voters in order, with identifiers starting at 1.
    pub fn voters(mut self, names: &[String]) -> Result<Builder, RegistryError> {
        for (idx, name) in names.iter().enumerate() {
            self._system.register_voter(idx as VoterId + 1, name)?;
        }
        debug!("Builder: registered {} voters", names.len());
        Ok(self)
    }

    /// Promotes voters to candidates, under the names they were registered with.
    pub fn candidates(mut self, voter_ids: &[VoterId]) -> Result<Builder, RegistryError> {
        for &voter_id in voter_ids {
            let name = match self._system.voter(voter_id) {
                Some(voter) => voter.name.clone(),
                None => {
                    return Err(RegistryError::UnknownVoter {
                        voter_id,
                        lookup: VoterLookup::Candidacy,
                    })
                }
            };
            self._system.register_candidate(voter_id, &name)?;
        }
        Ok(self)
    }

    pub fn build(self) -> VotingSystem {
        self._system
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}
