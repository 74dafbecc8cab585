use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::GatewaySettings;
use crate::config::{AuthConfig, StaticConfig};
use crate::services::LinkService;
use crate::storage::open_journal;

pub struct StartupContext {
    pub link_service: Arc<LinkService>,
    pub gateway: GatewaySettings,
    pub credentials: AuthConfig,
}

/// 准备服务器启动的上下文
/// 打开历史日志并回放到内存，读取网关设置
pub fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let journal = open_journal(&config.storage).context("Failed to open journal")?;
    info!("Using journal backend: {}", journal.backend_name());

    let link_service =
        Arc::new(LinkService::open(journal).context("Failed to restore link history")?);
    info!(
        "Restored {} codes from journal",
        link_service.store().code_count()
    );

    if !config.auth.is_configured() {
        warn!("Basic auth credentials not set: /list and /create are disabled");
    }

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        link_service,
        gateway: GatewaySettings::from_config(&config.confirm),
        credentials: config.auth.clone(),
    })
}
