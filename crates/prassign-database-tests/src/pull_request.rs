use pretty_assertions::assert_eq;
use prassign_database_interface::DatabaseError;
use prassign_models::{PullRequestStatus, Team};

use crate::{
    fixtures::{create_backend_team, member, pull_request},
    testcase::db_test_case,
};

#[tokio::test]
async fn create() {
    db_test_case("pull_request_create", |db| async move {
        assert!(matches!(
            db.pull_requests_create(pull_request("pr-1", "u1", &[])).await,
            Err(DatabaseError::UnknownUser(id)) if id == "u1"
        ));

        create_backend_team(db.as_ref()).await?;

        assert!(matches!(
            db.pull_requests_create(pull_request("pr-1", "u1", &["u9"])).await,
            Err(DatabaseError::UnknownUser(id)) if id == "u9"
        ));
        assert!(!db.pull_requests_exists("pr-1").await?);

        let pr = db
            .pull_requests_create(pull_request("pr-1", "u1", &["u3", "u2"]))
            .await?;
        assert_eq!(pr.status, PullRequestStatus::Open);
        assert_eq!(pr.assigned_reviewers, vec!["u3", "u2"]);
        assert!(pr.created_at.is_some());
        assert_eq!(pr.merged_at, None);
        assert!(db.pull_requests_exists("pr-1").await?);

        assert!(matches!(
            db.pull_requests_create(pull_request("pr-1", "u2", &[])).await,
            Err(DatabaseError::PullRequestAlreadyExists(id)) if id == "pr-1"
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn create_rejects_invalid_reviewers() {
    db_test_case("pull_request_create_invalid_reviewers", |db| async move {
        create_backend_team(db.as_ref()).await?;

        for reviewers in [&["u1"][..], &["u2", "u2"][..], &["u2", "u3", "u4"][..]] {
            assert!(matches!(
                db.pull_requests_create(pull_request("pr-1", "u1", reviewers))
                    .await,
                Err(DatabaseError::InvalidReviewers(_, _))
            ));
        }

        assert!(!db.pull_requests_exists("pr-1").await?);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn get() {
    db_test_case("pull_request_get", |db| async move {
        assert_eq!(db.pull_requests_get("pr-1").await?, None);
        assert!(matches!(
            db.pull_requests_get_expect("pr-1").await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));

        create_backend_team(db.as_ref()).await?;
        let pr = db
            .pull_requests_create(pull_request("pr-1", "u1", &["u2"]))
            .await?;

        assert_eq!(db.pull_requests_get("pr-1").await?, Some(pr));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn set_merged() {
    db_test_case("pull_request_set_merged", |db| async move {
        assert!(matches!(
            db.pull_requests_set_merged("pr-1").await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));

        create_backend_team(db.as_ref()).await?;
        db.pull_requests_create(pull_request("pr-1", "u1", &["u2", "u3"]))
            .await?;

        let merged = db.pull_requests_set_merged("pr-1").await?;
        assert_eq!(merged.status, PullRequestStatus::Merged);
        assert_eq!(merged.assigned_reviewers, vec!["u2", "u3"]);
        assert!(merged.merged_at.is_some());

        let merged_again = db.pull_requests_set_merged("pr-1").await?;
        assert_eq!(merged_again.merged_at, merged.merged_at);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn list_for_reviewer() {
    db_test_case("pull_request_list_for_reviewer", |db| async move {
        assert!(db.pull_requests_list_for_reviewer("u2").await?.is_empty());

        create_backend_team(db.as_ref()).await?;
        db.pull_requests_create(pull_request("pr-b", "u1", &["u2"]))
            .await?;
        db.pull_requests_create(pull_request("pr-a", "u3", &["u1", "u2"]))
            .await?;
        db.pull_requests_create(pull_request("pr-c", "u1", &["u3"]))
            .await?;
        db.pull_requests_set_merged("pr-b").await?;

        let prs = db.pull_requests_list_for_reviewer("u2").await?;
        assert_eq!(
            prs.iter()
                .map(|p| (p.pull_request_id.as_str(), p.status))
                .collect::<Vec<_>>(),
            vec![
                ("pr-b", PullRequestStatus::Merged),
                ("pr-a", PullRequestStatus::Open)
            ]
        );
        assert_eq!(prs[1].author_id, "u3");

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn long_identifiers() {
    db_test_case("pull_request_long_identifiers", |db| async move {
        let team_name = "t".repeat(300);
        let author_id = "a".repeat(300);
        let reviewer_id = "r".repeat(300);
        let pull_request_id = "p".repeat(300);

        let team = db
            .teams_create(Team {
                team_name: team_name.clone(),
                members: vec![member(&author_id, true), member(&reviewer_id, true)],
            })
            .await?;
        assert_eq!(team.members.len(), 2);

        let mut instance = pull_request(&pull_request_id, &author_id, &[&reviewer_id]);
        instance.pull_request_name = "n".repeat(1000);
        let pr = db.pull_requests_create(instance).await?;
        assert_eq!(pr.pull_request_id, pull_request_id);
        assert_eq!(pr.pull_request_name.len(), 1000);
        assert_eq!(pr.assigned_reviewers, vec![reviewer_id.clone()]);

        let reviews = db.pull_requests_list_for_reviewer(&reviewer_id).await?;
        assert_eq!(reviews.len(), 1);
        assert_eq!(
            db.users_get_expect(&author_id).await?.team_name,
            team_name
        );

        Ok(())
    })
    .await;
}
