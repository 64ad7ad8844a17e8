use pretty_assertions::assert_eq;
use prassign_database_interface::DatabaseError;

use crate::{fixtures::create_backend_team, testcase::db_test_case};

#[tokio::test]
async fn get() {
    db_test_case("user_get", |db| async move {
        assert_eq!(db.users_get("u1").await?, None);
        assert!(matches!(
            db.users_get_expect("u1").await,
            Err(DatabaseError::UnknownUser(_))
        ));

        create_backend_team(db.as_ref()).await?;

        let user = db.users_get_expect("u1").await?;
        assert_eq!(user.team_name, "backend");
        assert!(user.is_active);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn set_is_active() {
    db_test_case("user_set_is_active", |db| async move {
        assert!(matches!(
            db.users_set_is_active("u1", false).await,
            Err(DatabaseError::UnknownUser(_))
        ));

        create_backend_team(db.as_ref()).await?;

        let user = db.users_set_is_active("u1", false).await?;
        assert!(!user.is_active);
        assert!(!db.users_get_expect("u1").await?.is_active);

        let user = db.users_set_is_active("u4", true).await?;
        assert!(user.is_active);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn list_active_in_team() {
    db_test_case("user_list_active_in_team", |db| async move {
        assert!(db.users_list_active_in_team("backend").await?.is_empty());

        create_backend_team(db.as_ref()).await?;
        db.users_set_is_active("u2", false).await?;

        let users = db.users_list_active_in_team("backend").await?;
        assert_eq!(
            users.iter().map(|u| u.user_id.as_str()).collect::<Vec<_>>(),
            vec!["u1", "u3"]
        );

        Ok(())
    })
    .await;
}
