pub mod memory;
pub mod redis;

pub use memory::MemoryRegistrar;
pub use redis::RedisRegistrar;
