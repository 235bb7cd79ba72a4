use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

/// 服务就绪状态：not-ready → ready，只会单向切换
///
/// 预热完成前 `/health/ready` 返回 503。
#[derive(Clone, Debug, Default)]
pub struct Readiness {
    ready: Arc<AtomicBool>,
}

impl Readiness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        if !self.ready.swap(true, Ordering::AcqRel) {
            info!("Service is ready to accept traffic");
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}
