//! In-Memory Customer Repository Implementation

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::application::ports::{
    CustomerDraft, CustomerRecord, CustomerRepositoryPort, RepositoryError,
};

/// 记录列表与 id 计数器共用一把锁，
/// 保证"读全表"或"改一条"在单次操作粒度上互斥
struct Store {
    customers: Vec<CustomerRecord>,
    next_id: i32,
}

/// 内存客户仓储
///
/// 预置 10 条种子数据（id 1-10，全部活跃），计数器从 11 开始。
/// 删除为软删除：记录永不移除，仅翻转 is_active
pub struct InMemoryCustomerRepository {
    inner: Mutex<Store>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        let customers = seed_customers();
        let next_id = customers.len() as i32 + 1;
        Self {
            inner: Mutex::new(Store { customers, next_id }),
        }
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        // 锁内没有 await 点，也没有会 panic 的路径，中毒时直接接管
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryCustomerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerRepositoryPort for InMemoryCustomerRepository {
    async fn find_all(&self) -> Vec<CustomerRecord> {
        self.store()
            .customers
            .iter()
            .filter(|c| c.is_active)
            .cloned()
            .collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<CustomerRecord, RepositoryError> {
        self.store()
            .customers
            .iter()
            .find(|c| c.id == id && c.is_active)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn find_by_country(&self, country: &str) -> Vec<CustomerRecord> {
        if country.is_empty() {
            return Vec::new();
        }
        self.store()
            .customers
            .iter()
            .filter(|c| c.is_active && c.country.eq_ignore_ascii_case(country))
            .cloned()
            .collect()
    }

    async fn count(&self) -> usize {
        self.store().customers.iter().filter(|c| c.is_active).count()
    }

    async fn add(&self, customer: Option<CustomerDraft>) -> Result<i32, RepositoryError> {
        let draft = customer.ok_or_else(|| {
            RepositoryError::InvalidInput("customer payload is missing".to_string())
        })?;

        let mut store = self.store();
        let id = store.next_id;
        store.next_id += 1;
        store.customers.push(draft.into_record(id));

        tracing::info!(customer_id = id, "Customer added");
        Ok(id)
    }

    async fn update(&self, customer: CustomerRecord) -> Result<(), RepositoryError> {
        let mut store = self.store();
        let existing = store
            .customers
            .iter_mut()
            .find(|c| c.id == customer.id)
            .ok_or(RepositoryError::NotFound(customer.id))?;

        let id = customer.id;
        *existing = customer;

        tracing::debug!(customer_id = id, "Customer updated");
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let mut store = self.store();
        let customer = store
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RepositoryError::NotFound(id))?;

        customer.is_active = false;

        tracing::info!(customer_id = id, "Customer soft-deleted");
        Ok(())
    }
}

/// 种子数据：固定的 10 条初始客户记录
fn seed_customers() -> Vec<CustomerRecord> {
    let seed = |id: i32,
                first_name: &str,
                last_name: &str,
                email: &str,
                (y, m, d): (i32, u32, u32),
                city: &str,
                country: &str| CustomerRecord {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        // 种子日期为合法字面量
        date_of_birth: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        city: city.to_string(),
        country: country.to_string(),
        is_active: true,
    };

    vec![
        seed(1, "John", "Doe", "john.doe@email.com", (1985, 3, 15), "New York", "USA"),
        seed(2, "Jane", "Smith", "jane.smith@email.com", (1990, 7, 22), "London", "UK"),
        seed(3, "Carlos", "Rodriguez", "carlos.rodriguez@email.com", (1988, 11, 8), "Madrid", "Spain"),
        seed(4, "Marie", "Dubois", "marie.dubois@email.com", (1992, 5, 3), "Paris", "France"),
        seed(5, "Hans", "Mueller", "hans.mueller@email.com", (1983, 12, 30), "Berlin", "Germany"),
        seed(6, "Anna", "Kowalski", "anna.kowalski@email.com", (1989, 9, 14), "Warsaw", "Poland"),
        seed(7, "Luigi", "Rossi", "luigi.rossi@email.com", (1987, 4, 18), "Rome", "Italy"),
        seed(8, "Sarah", "Johnson", "sarah.johnson@email.com", (1993, 2, 25), "Toronto", "Canada"),
        seed(9, "Yuki", "Tanaka", "yuki.tanaka@email.com", (1991, 8, 11), "Tokyo", "Japan"),
        seed(10, "Pedro", "Silva", "pedro.silva@email.com", (1986, 6, 7), "São Paulo", "Brazil"),
    ]
}
