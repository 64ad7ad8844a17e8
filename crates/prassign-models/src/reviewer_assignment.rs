use serde::{Deserialize, Serialize};

/// Maximum number of reviewer slots on a pull request.
pub const MAX_REVIEWERS: usize = 2;

/// One occupied reviewer slot on a pull request.
///
/// Slots are numbered from 1 to [`MAX_REVIEWERS`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewerAssignment {
    pub pull_request_id: String,
    pub slot: u8,
    pub reviewer_id: String,
}

impl ReviewerAssignment {
    /// Build assignments for an ordered reviewer list, starting at slot 1.
    pub fn from_reviewers(pull_request_id: &str, reviewer_ids: &[String]) -> Vec<Self> {
        reviewer_ids
            .iter()
            .enumerate()
            .map(|(idx, reviewer_id)| Self {
                pull_request_id: pull_request_id.into(),
                slot: idx as u8 + 1,
                reviewer_id: reviewer_id.clone(),
            })
            .collect()
    }
}
