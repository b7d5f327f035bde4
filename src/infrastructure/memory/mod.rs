//! Memory Layer - In-Memory State Management
//!
//! CustomerRepositoryPort 的内存实现

mod customer_repository;

pub use customer_repository::InMemoryCustomerRepository;
