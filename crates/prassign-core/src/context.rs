use prassign_config::Config;
use prassign_database_interface::DbService;

use crate::{AssignmentEngine, CoreModule};

pub struct CoreContext<'a> {
    pub config: &'a Config,
    pub core_module: &'a CoreModule,
    pub db_service: &'a (dyn DbService + 'a),
    pub assignment_engine: &'a AssignmentEngine,
}

#[cfg(any(test, feature = "testkit"))]
pub(crate) mod tests {
    use prassign_config::Config;
    use prassign_database_interface::DbService;
    use prassign_database_memory::MemoryDb;
    use prassign_models::{Team, TeamMember};

    use crate::{AssignmentEngine, CoreContext, CoreModule};

    #[allow(dead_code)]
    pub struct CoreContextTest {
        pub config: Config,
        pub core_module: CoreModule,
        pub db_service: MemoryDb,
        pub assignment_engine: AssignmentEngine,
    }

    impl CoreContextTest {
        #[allow(dead_code)]
        pub fn new() -> Self {
            Self {
                config: Config::from_env_no_version(),
                core_module: CoreModule::builder().build(),
                db_service: MemoryDb::new(),
                assignment_engine: AssignmentEngine::new(Some(42)),
            }
        }

        #[allow(dead_code)]
        pub fn as_context(&self) -> CoreContext {
            CoreContext {
                config: &self.config,
                core_module: &self.core_module,
                db_service: &self.db_service,
                assignment_engine: &self.assignment_engine,
            }
        }

        /// Store a team whose members are `(user_id, is_active)` pairs.
        #[allow(dead_code)]
        pub async fn with_team(self, team_name: &str, members: &[(&str, bool)]) -> Self {
            self.db_service
                .teams_create(Team {
                    team_name: team_name.into(),
                    members: members
                        .iter()
                        .map(|(user_id, is_active)| TeamMember {
                            user_id: user_id.to_string(),
                            username: format!("User {user_id}"),
                            is_active: *is_active,
                        })
                        .collect(),
                })
                .await
                .unwrap();

            self
        }
    }
}
