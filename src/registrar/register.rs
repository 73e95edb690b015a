use crate::errors::Result;
use crate::registrar::RegistrarNotifier;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

pub type BoxedRegistrarFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn RegistrarNotifier>>> + Send>>;
pub type RegistrarConstructor = Arc<dyn Fn() -> BoxedRegistrarFuture + Send + Sync>;

static REGISTRAR_REGISTRY: Lazy<RwLock<HashMap<String, RegistrarConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// 在进程启动时注册 registrar 传输插件
#[macro_export]
macro_rules! declare_registrar_plugin {
    ($name:expr, $notifier:ty) => {
        #[ctor::ctor]
        unsafe fn __register_registrar_plugin() {
            $crate::registrar::register::register_registrar_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let notifier = <$notifier>::new()?;
                        Ok::<_, $crate::errors::GradebookError>(
                            Box::new(notifier) as Box<dyn $crate::registrar::RegistrarNotifier>
                        )
                    }) as $crate::registrar::register::BoxedRegistrarFuture
                }),
            );
        }
    };
}

pub fn register_registrar_plugin<S: Into<String>>(name: S, constructor: RegistrarConstructor) {
    let name = name.into();
    let mut registry = REGISTRAR_REGISTRY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    registry.insert(name, constructor);
}

pub fn get_registrar_plugin(name: &str) -> Option<RegistrarConstructor> {
    REGISTRAR_REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .get(name)
        .cloned()
}

pub fn debug_registrar_registry() {
    let registry = REGISTRAR_REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if registry.is_empty() {
        tracing::debug!("No registrar plugins registered.");
    } else {
        tracing::debug!("Registered registrar plugins:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_transports_are_registered() {
        assert!(get_registrar_plugin("memory").is_some());
        assert!(get_registrar_plugin("redis").is_some());
        assert!(get_registrar_plugin("carrier-pigeon").is_none());
    }

    #[test]
    fn registry_survives_a_poisoned_lock() {
        let _ = std::thread::spawn(|| {
            let _guard = REGISTRAR_REGISTRY.write().unwrap();
            panic!("poison registry");
        })
        .join();
        assert!(REGISTRAR_REGISTRY.is_poisoned());

        assert!(get_registrar_plugin("memory").is_some());
        debug_registrar_registry();
    }
}
