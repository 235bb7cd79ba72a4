use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use tracing::{debug, error};

use crate::runtime::lifetime::Readiness;
use crate::store::{IpRangeStore, Lookup};

#[derive(Debug, Deserialize)]
pub struct IpQuery {
    pub ip: Option<String>,
}

pub struct IpLocationsService;

impl IpLocationsService {
    /// `GET /api/IpLocations?ip=1.160.0.0`
    ///
    /// - 200: 国家代码（text/plain）
    /// - 404: 非法 IP 或没有覆盖该地址的范围
    /// - 503: 预热未完成，或存储不可用（不当作 404，避免掩盖故障）
    pub async fn get_location(
        query: web::Query<IpQuery>,
        store: web::Data<Arc<IpRangeStore>>,
        readiness: web::Data<Readiness>,
    ) -> impl Responder {
        if !readiness.is_ready() {
            debug!("IpLocations request rejected during warm-up");
            return Self::error_response();
        }

        let Some(ip) = query.into_inner().ip else {
            debug!("IpLocations request without ip parameter");
            return Self::not_found_response();
        };

        match store.lookup(&ip).await {
            Ok(Lookup::Found(range)) => HttpResponse::Ok()
                .insert_header(("Content-Type", "text/plain; charset=utf-8"))
                .body(range.country),
            Ok(other) => {
                debug!("IpLocations lookup for {:?}: {:?}", ip, other);
                Self::not_found_response()
            }
            Err(e) => {
                error!("IpLocations lookup for {:?} failed: {}", ip, e);
                Self::error_response()
            }
        }
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("Not Found")
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::build(StatusCode::SERVICE_UNAVAILABLE)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("Service Unavailable")
    }
}

/// IpLocations 路由配置
pub fn ip_locations_routes() -> actix_web::Scope {
    web::scope("/api")
        .route("/IpLocations", web::get().to(IpLocationsService::get_location))
        .route("/iplocations", web::get().to(IpLocationsService::get_location))
}
