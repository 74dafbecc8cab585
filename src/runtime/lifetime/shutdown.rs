use actix_web::dev::ServerHandle;
use tokio::signal;
use tracing::{info, warn};

/// 等待 Ctrl+C，然后优雅停止 HTTP 服务器
///
/// 历史日志每次写入都已落盘，这里不需要额外刷新。
pub async fn listen_for_shutdown(handle: ServerHandle) {
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

    handle.stop(true).await;
    info!("Server stopped");
}
