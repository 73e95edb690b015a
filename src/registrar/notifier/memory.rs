use std::collections::VecDeque;
use std::sync::Mutex;

use tracing::{debug, info};

use crate::config::AppConfig;
use crate::declare_registrar_plugin;
use crate::errors::Result;
use crate::registrar::{RegistrarEvent, RegistrarMessage, RegistrarNotifier};

declare_registrar_plugin!("memory", MemoryRegistrar);

/// 进程内的 registrar 通道，保留最近的若干条消息
pub struct MemoryRegistrar {
    history: Mutex<VecDeque<RegistrarMessage>>,
    capacity: usize,
}

impl Default for MemoryRegistrar {
    fn default() -> Self {
        Self::with_capacity(AppConfig::get().registrar.memory.history_size)
    }
}

impl MemoryRegistrar {
    pub fn new() -> Result<Self> {
        let registrar = Self::default();
        debug!(
            "MemoryRegistrar initialized with history size: {}",
            registrar.capacity
        );
        Ok(registrar)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity,
        }
    }

    /// 已发送的消息（由旧到新）
    pub fn history(&self) -> Vec<RegistrarMessage> {
        self.lock().iter().cloned().collect()
    }

    /// 已发送消息的事件序列
    pub fn events(&self) -> Vec<RegistrarEvent> {
        self.lock().iter().map(|m| m.event).collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<RegistrarMessage>> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RegistrarNotifier for MemoryRegistrar {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn dispatch(&self, message: RegistrarMessage) {
        info!(
            "Registrar message {} ({}) recorded in memory",
            message.id, message.event
        );
        let mut history = self.lock();
        if history.len() == self.capacity {
            history.pop_front();
        }
        history.push_back(message);
    }
}
