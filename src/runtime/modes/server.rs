//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders, from_fn},
    web,
};
use anyhow::Result;
use tracing::warn;

use crate::api::ApiSettings;
use crate::api::middleware::admin_key_guard;
use crate::api::services::{AppStartTime, admin_routes, health_routes, tracking_routes};
use crate::config::{CorsConfig, StaticConfig};
use crate::runtime::lifetime::{self, startup::RouteConfig};

/// Build CORS middleware from configuration
///
/// 未配置 allowed_origins 时允许任意来源，但不携带凭据。
fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec!["Content-Type", "Authorization", "Accept"])
        .max_age(3600);

    if cors_config.allowed_origins.is_empty()
        || cors_config.allowed_origins.iter().any(|o| o == "*")
    {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

/// 注册全部路由
///
/// 管理路由挂在管理密钥守卫之后；兑换与健康检查路由无需认证。
pub fn configure_routes(cfg: &mut web::ServiceConfig, routes: &RouteConfig) {
    cfg.service(
        web::scope(&routes.admin_prefix)
            .wrap(from_fn(admin_key_guard))
            .configure(admin_routes),
    )
    .service(web::scope(&routes.health_prefix).configure(health_routes))
    .service(web::scope(&routes.tracking_prefix).configure(tracking_routes));
}

/// Run the HTTP server
///
/// This function:
/// 1. Records startup time
/// 2. Builds the token codec and ledger backend
/// 3. Configures and starts the HTTP server
/// 4. Listens for graceful shutdown signals
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: StaticConfig) -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let tracking_service = startup.tracking_service.clone();
    let route = startup.route_config.clone();
    let settings = ApiSettings::from_config(&config);
    let cors_config = config.cors.clone();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    if config.tracking.admin_key.as_deref().is_none_or(str::is_empty) {
        warn!("tracking.admin_key not set - admin API falls back to the secret key");
    }

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(build_cors_middleware(&cors_config))
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .app_data(web::Data::new(tracking_service.clone()))
            .app_data(web::Data::new(settings.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .configure(|cfg| configure_routes(cfg, &route))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(&bind_address)?.run();

    // Wait for server or shutdown signal
    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Graceful shutdown: signal received, stopping server");
        }
    }

    Ok(())
}
