//! Rodex - 客户目录 CRUD 服务
//!
//! 架构分层:
//!
//! 应用层 (application/):
//! - Ports: 仓储端口定义（CustomerRepositoryPort + 错误类型）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API（axum，/api/customers）
//! - Memory: 仓储的内存实现（种子数据 + 软删除）

pub mod application;
pub mod config;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
