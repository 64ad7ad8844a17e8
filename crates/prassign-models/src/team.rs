use serde::{Deserialize, Serialize};

use crate::User;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMember {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

impl TeamMember {
    pub fn with_team(self, team_name: &str) -> User {
        User {
            user_id: self.user_id,
            username: self.username,
            team_name: team_name.into(),
            is_active: self.is_active,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub team_name: String,
    pub members: Vec<TeamMember>,
}

impl Team {
    /// Members as users of this team.
    pub fn users(&self) -> Vec<User> {
        self.members
            .iter()
            .cloned()
            .map(|m| m.with_team(&self.team_name))
            .collect()
    }
}
