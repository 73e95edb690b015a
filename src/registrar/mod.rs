//! Registrar 通知
//!
//! 作业与最终成绩的变更以消息形式发送给外部的 registrar 服务。
//! 发送为即发即弃：调用方不等待投递结果，失败只记录日志。

pub mod notifier;
pub mod register;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;

use crate::errors::Result;

/// 消息事件类型（线上名称为 camelCase）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegistrarEvent {
    AddAssignment,
    UpdateAssignment,
    DeleteAssignment,
    UpdateEnrollment,
}

impl std::fmt::Display for RegistrarEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RegistrarEvent::AddAssignment => "addAssignment",
            RegistrarEvent::UpdateAssignment => "updateAssignment",
            RegistrarEvent::DeleteAssignment => "deleteAssignment",
            RegistrarEvent::UpdateEnrollment => "updateEnrollment",
        };
        write!(f, "{name}")
    }
}

/// 发送给 registrar 的消息信封
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrarMessage {
    pub id: Uuid,
    pub event: RegistrarEvent,
    pub payload: serde_json::Value,
    pub sent_at: chrono::DateTime<chrono::Utc>,
}

impl RegistrarMessage {
    pub fn new<T: Serialize>(event: RegistrarEvent, payload: &T) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            event,
            payload: serde_json::to_value(payload)?,
            sent_at: chrono::Utc::now(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Registrar 传输通道
///
/// `dispatch` 不得阻塞在投递上，实现自行处理重试与失败。
pub trait RegistrarNotifier: Send + Sync {
    fn name(&self) -> &'static str;

    fn dispatch(&self, message: RegistrarMessage);
}

/// 构造消息并发送，序列化失败只记录日志
pub fn notify<T: Serialize>(notifier: &dyn RegistrarNotifier, event: RegistrarEvent, payload: &T) {
    match RegistrarMessage::new(event, payload) {
        Ok(message) => {
            debug!(
                "Dispatching {} message {} via {}",
                event,
                message.id,
                notifier.name()
            );
            notifier.dispatch(message);
        }
        Err(e) => {
            error!("Failed to build registrar {} message: {}", event, e);
        }
    }
}
