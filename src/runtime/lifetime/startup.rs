use crate::config::AppConfig;
use crate::errors::{GradebookError, Result};
use crate::registrar::RegistrarNotifier;
use crate::registrar::notifier::MemoryRegistrar;
use crate::registrar::register::get_registrar_plugin;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

use super::seed;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub registrar: Arc<dyn RegistrarNotifier>,
}

async fn construct_registrar(name: &str) -> Result<Arc<dyn RegistrarNotifier>> {
    let constructor = get_registrar_plugin(name).ok_or_else(|| {
        GradebookError::registrar_plugin_not_found(format!(
            "Registrar transport '{name}' not found in registry"
        ))
    })?;
    let notifier = constructor().await?;
    Ok(Arc::from(notifier))
}

/// 创建 registrar 通知器，配置的传输不可用时回退到内存实现
pub async fn create_registrar() -> Arc<dyn RegistrarNotifier> {
    let config = AppConfig::get();
    let notifier_type = &config.registrar.notifier_type;

    warn!("Attempting to create {} registrar transport", notifier_type);

    match construct_registrar(notifier_type).await {
        Ok(registrar) => {
            warn!("Successfully created {} registrar transport", registrar.name());
            registrar
        }
        Err(e) => {
            warn!("Failed to create {} registrar: {}", notifier_type, e);
            warn!("Falling back to memory registrar");
            Arc::new(MemoryRegistrar::default())
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储、演示数据和 registrar
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        crate::registrar::register::debug_registrar_registry();
        debug!("Debug mode: Registrar registry is enabled");
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    if AppConfig::get().seed.enabled {
        seed::seed_if_empty(&storage).await;
    }

    let registrar = create_registrar().await;
    warn!("Registrar transport initialized");

    StartupContext { storage, registrar }
}
