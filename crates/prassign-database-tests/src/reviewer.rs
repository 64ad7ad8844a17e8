use pretty_assertions::assert_eq;
use prassign_database_interface::DatabaseError;

use crate::{
    fixtures::{create_backend_team, pull_request},
    testcase::db_test_case,
};

#[tokio::test]
async fn replace() {
    db_test_case("reviewer_replace", |db| async move {
        assert!(matches!(
            db.pull_requests_replace_reviewer("pr-1", "u2", "u3").await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));

        create_backend_team(db.as_ref()).await?;
        db.pull_requests_create(pull_request("pr-1", "u1", &["u2", "u3"]))
            .await?;

        db.pull_requests_replace_reviewer("pr-1", "u2", "u4").await?;

        let pr = db.pull_requests_get_expect("pr-1").await?;
        assert_eq!(pr.assigned_reviewers, vec!["u4", "u3"]);
        assert!(db.pull_requests_list_for_reviewer("u2").await?.is_empty());
        assert_eq!(db.pull_requests_list_for_reviewer("u4").await?.len(), 1);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn replace_requires_current_reviewer() {
    db_test_case("reviewer_replace_requires_current", |db| async move {
        create_backend_team(db.as_ref()).await?;
        db.pull_requests_create(pull_request("pr-1", "u1", &["u2"]))
            .await?;

        assert!(matches!(
            db.pull_requests_replace_reviewer("pr-1", "u3", "u4").await,
            Err(DatabaseError::ReviewerNotAssigned(pr, user)) if pr == "pr-1" && user == "u3"
        ));

        // Second swap on the same old reviewer loses.
        db.pull_requests_replace_reviewer("pr-1", "u2", "u3").await?;
        assert!(matches!(
            db.pull_requests_replace_reviewer("pr-1", "u2", "u4").await,
            Err(DatabaseError::ReviewerNotAssigned(_, _))
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn replace_rejects_conflicting_reviewer() {
    db_test_case("reviewer_replace_conflicting", |db| async move {
        create_backend_team(db.as_ref()).await?;
        db.pull_requests_create(pull_request("pr-1", "u1", &["u2", "u3"]))
            .await?;

        assert!(matches!(
            db.pull_requests_replace_reviewer("pr-1", "u2", "u3").await,
            Err(DatabaseError::ReviewerAlreadyAssigned(_, user)) if user == "u3"
        ));
        assert!(matches!(
            db.pull_requests_replace_reviewer("pr-1", "u2", "u9").await,
            Err(DatabaseError::UnknownUser(user)) if user == "u9"
        ));

        let pr = db.pull_requests_get_expect("pr-1").await?;
        assert_eq!(pr.assigned_reviewers, vec!["u2", "u3"]);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn replace_on_merged_is_rejected() {
    db_test_case("reviewer_replace_merged", |db| async move {
        create_backend_team(db.as_ref()).await?;
        db.pull_requests_create(pull_request("pr-1", "u1", &["u2"]))
            .await?;
        db.pull_requests_set_merged("pr-1").await?;

        assert!(matches!(
            db.pull_requests_replace_reviewer("pr-1", "u2", "u3").await,
            Err(DatabaseError::PullRequestMerged(_))
        ));
        assert!(matches!(
            db.pull_requests_replace_reviewer("pr-1", "u3", "u4").await,
            Err(DatabaseError::PullRequestMerged(_))
        ));

        let pr = db.pull_requests_get_expect("pr-1").await?;
        assert_eq!(pr.assigned_reviewers, vec!["u2"]);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn replace_rejects_author() {
    db_test_case("reviewer_replace_author", |db| async move {
        create_backend_team(db.as_ref()).await?;
        db.pull_requests_create(pull_request("pr-1", "u1", &["u2", "u3"]))
            .await?;

        assert!(matches!(
            db.pull_requests_replace_reviewer("pr-1", "u2", "u1").await,
            Err(DatabaseError::InvalidReviewers(pr, _)) if pr == "pr-1"
        ));

        let pr = db.pull_requests_get_expect("pr-1").await?;
        assert_eq!(pr.assigned_reviewers, vec!["u2", "u3"]);
        assert!(db.pull_requests_list_for_reviewer("u1").await?.is_empty());

        Ok(())
    })
    .await;
}
