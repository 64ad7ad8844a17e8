use pretty_assertions::assert_eq;
use prassign_database_interface::DatabaseError;
use prassign_models::Team;

use crate::{
    fixtures::{create_backend_team, member},
    testcase::db_test_case,
};

#[tokio::test]
async fn create() {
    db_test_case("team_create", |db| async move {
        let team = create_backend_team(db.as_ref()).await?;
        assert_eq!(team.team_name, "backend");
        assert_eq!(
            team.members
                .iter()
                .map(|m| m.user_id.as_str())
                .collect::<Vec<_>>(),
            vec!["u1", "u2", "u3", "u4"]
        );

        assert!(matches!(
            create_backend_team(db.as_ref()).await,
            Err(DatabaseError::TeamAlreadyExists(name)) if name == "backend"
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn create_empty() {
    db_test_case("team_create_empty", |db| async move {
        let team = db
            .teams_create(Team {
                team_name: "solo".into(),
                members: vec![],
            })
            .await?;

        assert!(team.members.is_empty());
        assert_eq!(db.teams_get("solo").await?, Some(team));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn get() {
    db_test_case("team_get", |db| async move {
        assert_eq!(db.teams_get("backend").await?, None);
        assert!(matches!(
            db.teams_get_expect("backend").await,
            Err(DatabaseError::UnknownTeam(_))
        ));

        let team = create_backend_team(db.as_ref()).await?;
        assert_eq!(db.teams_get_expect("backend").await?, team);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn create_moves_existing_members() {
    db_test_case("team_create_moves_existing_members", |db| async move {
        create_backend_team(db.as_ref()).await?;

        let mut moved = member("u3", false);
        moved.username = "Renamed".into();
        db.teams_create(Team {
            team_name: "frontend".into(),
            members: vec![moved.clone()],
        })
        .await?;

        let user = db.users_get_expect("u3").await?;
        assert_eq!(user.team_name, "frontend");
        assert_eq!(user.username, "Renamed");
        assert!(!user.is_active);

        let backend = db.teams_get_expect("backend").await?;
        assert!(backend.members.iter().all(|m| m.user_id != "u3"));

        Ok(())
    })
    .await;
}
