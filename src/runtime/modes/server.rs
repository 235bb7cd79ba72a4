//! Server mode
//!
//! The listener is bound before warm-up starts. Until warm-up finishes,
//! `/health/ready` and `/api/IpLocations` answer 503; a failed warm-up
//! stops the server and the process exits non-zero.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::{error, info, warn};

use crate::api::middleware::RequestIdMiddleware;
use crate::api::services::{AppStartTime, health_routes, ip_locations_routes};
use crate::config::get_config;
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// 1. Records startup time
/// 2. Connects the store
/// 3. Binds, then loads seed ranges and flips readiness
/// 4. Serves until the server exits or Ctrl+C arrives
///
/// **Note**: Configuration and logging must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let config = get_config();
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .map_err(|e| {
            error!("Server startup failed: {:#}", e);
            e
        })?;

    let store = startup.store.clone();
    let readiness = startup.readiness.clone();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    info!("Using {} CPU cores for the server", cpu_count);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(readiness.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .service(health_routes())
            .service(ip_locations_routes())
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(bind_address)?.run();
    let handle = server.handle();
    tokio::pin!(server);

    tokio::select! {
        res = &mut server => {
            res?;
            return Ok(());
        }
        res = lifetime::startup::finish_startup(&startup, &config) => {
            if let Err(e) = res {
                error!("Warm-up failed: {:#}", e);
                lifetime::shutdown::stop_server(handle.clone()).await;
                return Err(e);
            }
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            lifetime::shutdown::stop_server(handle.clone()).await;
            return Ok(());
        }
    }

    tokio::select! {
        res = &mut server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            lifetime::shutdown::stop_server(handle).await;
        }
    }

    // 释放存储连接
    drop(startup);
    info!("Store handle released, shutting down...");

    Ok(())
}
