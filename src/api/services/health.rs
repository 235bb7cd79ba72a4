use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info, trace};

use crate::runtime::lifetime::Readiness;
use crate::store::IpRangeStore;

/// 健康检查中单次 ping 的超时
const STORE_PING_TIMEOUT_SECS: u64 = 5;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthStoreCheck {
    pub status: String,
    pub backend: String,
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthChecks {
    pub store: HealthStoreCheck,
    pub ready: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u32,
    pub checks: HealthChecks,
    pub response_time_ms: u32,
}

pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        store: web::Data<Arc<IpRangeStore>>,
        readiness: web::Data<Readiness>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let backend = store.backend_name().to_string();
        let store_status = match tokio::time::timeout(
            Duration::from_secs(STORE_PING_TIMEOUT_SECS),
            store.ping(),
        )
        .await
        {
            Ok(Ok(())) => HealthStoreCheck {
                status: "healthy".to_string(),
                backend,
                error: None,
            },
            Ok(Err(e)) => {
                error!("Store health check failed: {}", e);
                HealthStoreCheck {
                    status: "unhealthy".to_string(),
                    backend,
                    error: Some(e.to_string()),
                }
            }
            Err(_) => {
                error!("Store health check timeout");
                HealthStoreCheck {
                    status: "unhealthy".to_string(),
                    backend,
                    error: Some("timeout".to_string()),
                }
            }
        };

        let now = chrono::Utc::now();
        let uptime_seconds = (now - app_start_time.start_datetime).num_seconds().max(0) as u32;
        let ready = readiness.is_ready();
        let is_healthy = store_status.status == "healthy" && ready;

        let health = HealthResponse {
            status: if is_healthy { "healthy" } else { "unhealthy" }.to_string(),
            timestamp: now.to_rfc3339(),
            uptime: uptime_seconds,
            checks: HealthChecks {
                store: store_status,
                ready,
            },
            response_time_ms: start_time.elapsed().as_millis() as u32,
        };

        info!(
            "Health check completed in {:?}, status: {}, uptime: {}s",
            start_time.elapsed(),
            health.status,
            uptime_seconds
        );

        let status = if is_healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        HttpResponse::build(status).json(health)
    }

    // 预热完成前返回 503
    pub async fn readiness_check(readiness: web::Data<Readiness>) -> impl Responder {
        trace!("Received readiness check request");

        if readiness.is_ready() {
            HttpResponse::Ok()
                .append_header(("Content-Type", "text/plain"))
                .body("OK")
        } else {
            HttpResponse::ServiceUnavailable()
                .append_header(("Content-Type", "text/plain"))
                .body("Warming up")
        }
    }

    pub async fn liveness_check() -> impl Responder {
        trace!("Received liveness check request");

        HttpResponse::NoContent().finish()
    }
}

/// Health 路由配置
pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/ready", web::get().to(HealthService::readiness_check))
        .route("/ready", web::head().to(HealthService::readiness_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/live", web::head().to(HealthService::liveness_check))
}
