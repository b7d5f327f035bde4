//! Rodex - 客户目录 CRUD 服务
//!
//! - Application: ports（CustomerRepository 端口）
//! - Infrastructure: http, memory

use std::sync::Arc;

use rodex::config::{load_config, print_config};
use rodex::infrastructure::http::{AppState, HttpServer, ServerConfig};
use rodex::infrastructure::memory::InMemoryCustomerRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},rodex={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter);
    if config.log.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::info!("Rodex - Customer Directory Service");
    print_config(&config);

    // 内存仓储：启动即带 10 条种子数据
    let customer_repo = Arc::new(InMemoryCustomerRepository::new());

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(customer_repo);

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
