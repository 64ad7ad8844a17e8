//! Server module.

use std::time::Duration;

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web::{self, Data},
    App, HttpResponse, HttpServer,
};
use prassign_config::Config;
use prassign_core::{AssignmentEngine, CoreContext, CoreModule};
use prassign_database_interface::DbService;
use prassign_database_pg::{DbPool, PostgresDb};
use sentry_actix::Sentry;
use tracing::info;

use crate::{
    health::health_check_route,
    metrics::build_metrics_handler,
    pulls::{create_pull_request, merge_pull_request, reassign_reviewer},
    teams::{add_team, get_team},
    users::{list_user_reviews, set_user_active},
    Result, ServerError,
};

/// App context.
pub struct AppContext {
    /// Config.
    pub config: Config,
    /// Core module.
    pub core_module: CoreModule,
    /// Database adapter.
    pub db_service: Box<dyn DbService>,
    /// Reviewer selection engine.
    pub assignment_engine: AssignmentEngine,
}

impl AppContext {
    /// Create new app context.
    pub fn new(config: Config, core_module: CoreModule, pool: DbPool) -> Self {
        Self::new_with_adapters(config, core_module, Box::new(PostgresDb::new(pool)))
    }

    /// Create new app context using adapters.
    pub fn new_with_adapters(
        config: Config,
        core_module: CoreModule,
        db_service: Box<dyn DbService>,
    ) -> Self {
        let assignment_engine = AssignmentEngine::new(config.random_seed);

        Self {
            config,
            core_module,
            db_service,
            assignment_engine,
        }
    }

    /// Convert the context for the core module.
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            db_service: self.db_service.as_ref(),
            assignment_engine: &self.assignment_engine,
        }
    }
}

fn bad_request<E: std::fmt::Display>(err: E) -> actix_web::Error {
    ServerError::BadRequest {
        message: err.to_string(),
    }
    .into()
}

/// Build Actix app.
pub fn build_actix_app(
    context: Data<AppContext>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let prometheus = build_metrics_handler();

    App::new()
        .app_data(context)
        .wrap(prometheus)
        .wrap(Sentry::new())
        .wrap(Logger::default())
        .wrap(Cors::permissive())
        .service(
            web::scope("/team")
                .route("/add", web::post().to(add_team))
                .route("/get", web::get().to(get_team)),
        )
        .service(
            web::scope("/users")
                .route("/setIsActive", web::post().to(set_user_active))
                .route("/getReview", web::get().to(list_user_reviews)),
        )
        .service(
            web::scope("/pullRequest")
                .route("/create", web::post().to(create_pull_request))
                .route("/merge", web::post().to(merge_pull_request))
                .route("/reassign", web::post().to(reassign_reviewer)),
        )
        .route("/health", web::get().to(health_check_route))
        .route(
            "/",
            web::get().to(|| async {
                HttpResponse::Ok().json(serde_json::json!({"message": "Welcome on prassign!" }))
            }),
        )
        .app_data(web::JsonConfig::default().error_handler(|err, _req| bad_request(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| bad_request(err)))
}

/// Run HTTP server.
pub async fn run_server(context: AppContext) -> Result<()> {
    let address = get_bind_address(&context.config);

    info!(
        version = context.config.version,
        address = %address,
        message = "Starting server",
    );

    run_server_internal(address, context).await
}

fn get_bind_address(config: &Config) -> String {
    format!("{}:{}", config.server.bind_ip, config.server.bind_port)
}

async fn run_server_internal(ip_with_port: String, context: AppContext) -> Result<()> {
    let context = Data::new(context);
    let cloned_context = context.clone();
    let server_config = &cloned_context.config.server;

    let mut server = HttpServer::new(move || build_actix_app(context.clone()))
        .client_request_timeout(Duration::from_secs(server_config.request_timeout))
        .keep_alive(Duration::from_secs(server_config.keep_alive))
        .shutdown_timeout(server_config.shutdown_timeout);

    if let Some(workers) = server_config.workers_count {
        server = server.workers(workers as usize);
    }

    server
        .bind(ip_with_port)
        .map_err(|e| ServerError::IoError { source: e })?
        .run()
        .await
        .map_err(|e| ServerError::IoError { source: e })
}
