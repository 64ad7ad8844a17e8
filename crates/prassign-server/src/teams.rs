//! Team handlers.

use actix_web::{web, HttpResponse};
use prassign_core::use_cases::teams::{AddTeamInterface, GetTeamInterface};
use prassign_models::{Team, TeamMember};
use serde::Deserialize;
use shaku::HasComponent;

use crate::{server::AppContext, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TeamMemberJson {
    user_id: String,
    username: String,
    is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct AddTeamJson {
    team_name: String,
    members: Vec<TeamMemberJson>,
}

impl From<AddTeamJson> for Team {
    fn from(data: AddTeamJson) -> Self {
        Team {
            team_name: data.team_name,
            members: data
                .members
                .into_iter()
                .map(|m| TeamMember {
                    user_id: m.user_id,
                    username: m.username,
                    is_active: m.is_active,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TeamQuery {
    team_name: String,
}

#[tracing::instrument(skip_all, fields(team_name = data.team_name))]
pub(crate) async fn add_team(
    ctx: web::Data<AppContext>,
    data: web::Json<AddTeamJson>,
) -> Result<HttpResponse> {
    let add_team: &dyn AddTeamInterface = ctx.core_module.resolve_ref();
    let team = add_team
        .run(&ctx.as_core_context(), data.into_inner().into())
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({ "team": team })))
}

#[tracing::instrument(skip_all, fields(team_name = query.team_name))]
pub(crate) async fn get_team(
    ctx: web::Data<AppContext>,
    query: web::Query<TeamQuery>,
) -> Result<HttpResponse> {
    let get_team: &dyn GetTeamInterface = ctx.core_module.resolve_ref();
    let team = get_team
        .run(&ctx.as_core_context(), &query.team_name)
        .await?;

    Ok(HttpResponse::Ok().json(team))
}
