//! Customer Repository Port - 出站端口
//!
//! 定义客户目录的抽象接口
//! 具体实现在 infrastructure 层（内存存储）

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

/// Repository 错误
///
/// NotFound 同时覆盖"不存在"和"已被软删除"两种情况，
/// 调用方无法区分（也不应区分）
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Customer with ID {0} not found")]
    NotFound(i32),

    #[error("Invalid customer input: {0}")]
    InvalidInput(String),
}

/// 客户实体（用于存储）
///
/// 字段级校验（邮箱格式、长度上限）由传输层负责，
/// 仓储只维护 id 分配与 is_active 生命周期
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub city: String,
    pub country: String,
    pub is_active: bool,
}

/// 新建客户的输入
///
/// 不含 id / is_active：两者由仓储在 add 时强制赋值
#[derive(Debug, Clone)]
pub struct CustomerDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub city: String,
    pub country: String,
}

impl CustomerDraft {
    /// 以仓储分配的 id 转为活跃记录
    pub fn into_record(self, id: i32) -> CustomerRecord {
        CustomerRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            date_of_birth: self.date_of_birth,
            city: self.city,
            country: self.country,
            is_active: true,
        }
    }
}

/// Customer Repository Port
#[async_trait]
pub trait CustomerRepositoryPort: Send + Sync {
    /// 按插入顺序获取所有活跃客户
    async fn find_all(&self) -> Vec<CustomerRecord>;

    /// 根据 ID 查找活跃客户
    ///
    /// 已软删除的记录视同不存在
    async fn find_by_id(&self, id: i32) -> Result<CustomerRecord, RepositoryError>;

    /// 按国家筛选活跃客户（忽略大小写的精确匹配）
    ///
    /// 空字符串返回空列表，不视为错误
    async fn find_by_country(&self, country: &str) -> Vec<CustomerRecord>;

    /// 活跃客户数量
    async fn count(&self) -> usize;

    /// 新增客户，返回分配的 id
    ///
    /// 输入为 None 时返回 InvalidInput，id 计数器不变
    async fn add(&self, customer: Option<CustomerDraft>) -> Result<i32, RepositoryError>;

    /// 按 record.id 整体覆盖已存储的记录（含 is_active，可借此恢复或停用）
    ///
    /// 查找不区分活跃状态；id 不存在则返回 NotFound 且不做任何修改
    async fn update(&self, customer: CustomerRecord) -> Result<(), RepositoryError>;

    /// 软删除：仅将 is_active 置为 false，记录保留
    ///
    /// 对已删除记录再次调用仍然成功（幂等）
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
}
