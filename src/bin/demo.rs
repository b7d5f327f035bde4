//! Rodex Demo Client
//!
//! 控制台演示客户端：按顺序调用每个客户端点，
//! 展示新增 → 修改 → 删除的完整生命周期。
//! 运行前需先启动 rodex 服务

use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use rodex::config::load_config;

/// 客户端侧的客户模型（与服务端线格式一致）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Customer {
    #[serde(default)]
    id: i32,
    first_name: String,
    last_name: String,
    email: String,
    date_of_birth: NaiveDate,
    city: String,
    country: String,
    #[serde(default = "default_active")]
    is_active: bool,
}

fn default_active() -> bool {
    true
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    let base_url = format!("{}/api/customers", config.server.public_base_url());

    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .context("Failed to build HTTP client")?;

    println!("===============================================");
    println!("Rodex Demo Client");
    println!("===============================================");
    println!();
    println!("Connecting to customer directory service...");
    println!("Base URL: {}", base_url);
    println!();

    if let Err(e) = run_demo(&client, &base_url).await {
        let is_connect = e
            .downcast_ref::<reqwest::Error>()
            .map(|e| e.is_connect() || e.is_timeout())
            .unwrap_or(false);
        if is_connect {
            println!("ERROR: Could not connect to the customer directory service.");
            println!("Make sure the rodex server is running first.");
            println!("Details: {}", e);
        } else {
            println!("ERROR: {}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}

/// 依次演示全部端点
async fn run_demo(client: &Client, base_url: &str) -> anyhow::Result<()> {
    println!("=== Customer Directory Operations Demo ===");
    println!();

    // 1. 客户总数
    println!("1. Getting total customer count...");
    let count = get_count(client, base_url).await?;
    println!("   Total customers: {}", count);
    println!();

    // 2. 所有客户
    println!("2. Getting all customers...");
    let customers = get_all(client, base_url).await?;
    println!("   Found {} customers:", customers.len());
    for c in &customers {
        println!(
            "   - {} {} ({}) from {}, {}",
            c.first_name, c.last_name, c.email, c.city, c.country
        );
    }
    println!();

    // 3. 按 ID 查询
    println!("3. Getting customer by ID (ID = 3)...");
    match get_by_id(client, base_url, 3).await? {
        Some(c) => println!(
            "   Found: {} {}, born {}",
            c.first_name, c.last_name, c.date_of_birth
        ),
        None => println!("   Customer not found."),
    }
    println!();

    // 4. 按国家筛选
    println!("4. Getting customers from USA...");
    let usa_customers = get_by_country(client, base_url, "USA").await?;
    println!("   Found {} customers from USA:", usa_customers.len());
    for c in &usa_customers {
        println!("   - {} {} from {}", c.first_name, c.last_name, c.city);
    }
    println!();

    // 5. 新增
    println!("5. Adding a new customer...");
    let draft = Customer {
        id: 0,
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: "test.user@demo.com".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1995, 1, 1)
            .context("invalid demo birth date")?,
        city: "Demo City".to_string(),
        country: "Demo Country".to_string(),
        is_active: true,
    };
    let mut created = add(client, base_url, &draft).await?;
    println!("   New customer added with ID: {}", created.id);
    println!();

    // 6. 新增后的总数
    println!("6. Getting updated customer count...");
    let count = get_count(client, base_url).await?;
    println!("   Total customers after addition: {}", count);
    println!();

    // 7. 修改
    println!("7. Updating the new customer...");
    created.city = "Updated City".to_string();
    let updated = update(client, base_url, &created).await?;
    println!(
        "   Update result: {}",
        if updated { "Success" } else { "Failed" }
    );
    println!();

    // 8. 验证修改
    println!("8. Verifying the update...");
    if let Some(c) = get_by_id(client, base_url, created.id).await? {
        println!(
            "   Updated customer: {} {} from {}",
            c.first_name, c.last_name, c.city
        );
    }
    println!();

    // 9. 删除
    println!("9. Deleting the test customer...");
    let deleted = delete(client, base_url, created.id).await?;
    println!(
        "   Delete result: {}",
        if deleted { "Success" } else { "Failed" }
    );
    println!();

    // 10. 最终总数
    println!("10. Final customer count...");
    let count = get_count(client, base_url).await?;
    println!("    Total customers after deletion: {}", count);
    println!();

    println!("=== Demo Complete ===");
    Ok(())
}

async fn get_count(client: &Client, base_url: &str) -> anyhow::Result<usize> {
    let count = client
        .get(format!("{}/count", base_url))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(count)
}

async fn get_all(client: &Client, base_url: &str) -> anyhow::Result<Vec<Customer>> {
    let customers = client
        .get(base_url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(customers)
}

async fn get_by_id(client: &Client, base_url: &str, id: i32) -> anyhow::Result<Option<Customer>> {
    let response = client.get(format!("{}/{}", base_url, id)).send().await?;
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    let customer = response.error_for_status()?.json().await?;
    Ok(Some(customer))
}

async fn get_by_country(
    client: &Client,
    base_url: &str,
    country: &str,
) -> anyhow::Result<Vec<Customer>> {
    let customers = client
        .get(format!("{}/country/{}", base_url, country))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(customers)
}

async fn add(client: &Client, base_url: &str, customer: &Customer) -> anyhow::Result<Customer> {
    let created = client
        .post(base_url)
        .json(customer)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(created)
}

async fn update(client: &Client, base_url: &str, customer: &Customer) -> anyhow::Result<bool> {
    let response = client
        .put(format!("{}/{}", base_url, customer.id))
        .json(customer)
        .send()
        .await?;
    Ok(response.status().is_success())
}

async fn delete(client: &Client, base_url: &str, id: i32) -> anyhow::Result<bool> {
    let response = client
        .delete(format!("{}/{}", base_url, id))
        .send()
        .await?;
    Ok(response.status().is_success())
}
