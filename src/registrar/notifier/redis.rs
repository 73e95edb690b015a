use std::sync::Arc;

use redis::{AsyncCommands, aio::MultiplexedConnection};
use tokio::sync::OnceCell;
use tracing::{debug, error, warn};

use crate::config::AppConfig;
use crate::declare_registrar_plugin;
use crate::errors::Result;
use crate::registrar::{RegistrarMessage, RegistrarNotifier};

declare_registrar_plugin!("redis", RedisRegistrar);

/// 通过 Redis pub/sub 发布 registrar 消息
pub struct RedisRegistrar {
    inner: Arc<RedisPublisher>,
}

struct RedisPublisher {
    client: redis::Client,
    channel: String,
    connection: OnceCell<MultiplexedConnection>,
}

impl RedisPublisher {
    // 首次发布时建立连接，之后复用同一个多路复用连接
    async fn connection(&self) -> std::result::Result<MultiplexedConnection, redis::RedisError> {
        let conn = self
            .connection
            .get_or_try_init(|| self.client.get_multiplexed_async_connection())
            .await?;
        Ok(conn.clone())
    }

    async fn publish(&self, message: RegistrarMessage) {
        let payload = match message.to_json() {
            Ok(payload) => payload,
            Err(e) => {
                error!("Failed to serialize registrar message {}: {}", message.id, e);
                return;
            }
        };

        let mut conn = match self.connection().await {
            Ok(conn) => conn,
            Err(e) => {
                error!(
                    "Failed to get Redis connection, dropping registrar message {}: {}",
                    message.id, e
                );
                return;
            }
        };

        match conn
            .publish::<_, _, i64>(self.channel.as_str(), payload)
            .await
        {
            Ok(receivers) => {
                debug!(
                    "Published registrar message {} ({}) to '{}', receivers: {}",
                    message.id, message.event, self.channel, receivers
                );
            }
            Err(e) => {
                error!(
                    "Failed to publish registrar message {} ({}): {}",
                    message.id, message.event, e
                );
            }
        }
    }
}

impl RedisRegistrar {
    pub fn new() -> Result<Self> {
        let config = AppConfig::get();
        let redis_config = &config.registrar.redis;

        let client = redis::Client::open(redis_config.url.as_str())?;

        debug!(
            "RedisRegistrar created for channel '{}' at {}",
            redis_config.channel, redis_config.url
        );

        Ok(Self {
            inner: Arc::new(RedisPublisher {
                client,
                channel: redis_config.channel.clone(),
                connection: OnceCell::new(),
            }),
        })
    }
}

impl RegistrarNotifier for RedisRegistrar {
    fn name(&self) -> &'static str {
        "redis"
    }

    fn dispatch(&self, message: RegistrarMessage) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(
                "No async runtime available, dropping registrar message {}",
                message.id
            );
            return;
        };

        let publisher = self.inner.clone();
        handle.spawn(async move {
            publisher.publish(message).await;
        });
    }
}
