//! User handlers.

use actix_web::{web, HttpResponse};
use prassign_core::use_cases::users::{
    ListUserReviewPullRequestsInterface, SetUserActiveInterface,
};
use serde::Deserialize;
use shaku::HasComponent;

use crate::{server::AppContext, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SetIsActiveJson {
    user_id: String,
    is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct UserQuery {
    user_id: String,
}

#[tracing::instrument(skip_all, fields(user_id = data.user_id, is_active = data.is_active))]
pub(crate) async fn set_user_active(
    ctx: web::Data<AppContext>,
    data: web::Json<SetIsActiveJson>,
) -> Result<HttpResponse> {
    let set_user_active: &dyn SetUserActiveInterface = ctx.core_module.resolve_ref();
    let user = set_user_active
        .run(&ctx.as_core_context(), &data.user_id, data.is_active)
        .await?;

    Ok(HttpResponse::Ok().json(user))
}

#[tracing::instrument(skip_all, fields(user_id = query.user_id))]
pub(crate) async fn list_user_reviews(
    ctx: web::Data<AppContext>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse> {
    let list_reviews: &dyn ListUserReviewPullRequestsInterface = ctx.core_module.resolve_ref();
    let pull_requests = list_reviews
        .run(&ctx.as_core_context(), &query.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user_id": query.user_id,
        "pull_requests": pull_requests,
    })))
}
