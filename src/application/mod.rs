//! 应用层
//!
//! 包含：
//! - ports: 六边形架构端口定义（CustomerRepository）

pub mod ports;

// Re-exports
pub use ports::{
    CustomerDraft, CustomerRecord, CustomerRepositoryPort, RepositoryError,
};
