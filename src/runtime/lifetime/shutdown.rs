use std::time::Duration;

use actix_web::dev::ServerHandle;
use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// 关闭超时时间（秒）
const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// 等待 Ctrl+C
pub async fn listen_for_shutdown() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping server...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }
}

/// 优雅停止 HTTP 服务，等待进行中的请求完成
pub async fn stop_server(handle: ServerHandle) {
    match timeout(
        Duration::from_secs(SHUTDOWN_TIMEOUT_SECS),
        handle.stop(true),
    )
    .await
    {
        Ok(()) => info!("HTTP server stopped"),
        Err(_) => error!(
            "HTTP server did not stop within {} seconds",
            SHUTDOWN_TIMEOUT_SECS
        ),
    }
}
