use cafe_server::{Config, Server, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env (可选)
    dotenv::dotenv().ok();

    // 2. 加载配置并初始化日志
    let config = Config::from_env()?;
    setup_environment(&config)?;

    print_banner();
    cafe_server::api::health::mark_started();

    tracing::info!(
        port = config.http_port,
        environment = %config.environment,
        timezone = %config.timezone,
        "Cafe server starting..."
    );

    // 3. 启动 HTTP 服务器
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
