//! Application State

use std::sync::Arc;

use crate::application::ports::CustomerRepositoryPort;

/// 应用状态
///
/// 所有请求处理器共享同一个仓储实例，
/// 互斥由仓储内部保证
pub struct AppState {
    pub customer_repo: Arc<dyn CustomerRepositoryPort>,
}

impl AppState {
    pub fn new(customer_repo: Arc<dyn CustomerRepositoryPort>) -> Self {
        Self { customer_repo }
    }
}
