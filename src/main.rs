use anyhow::Result;
use review_analysis::utils::logging;
use review_analysis::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 读取 .env（不存在时忽略）
    dotenvy::dotenv().ok();

    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    let output = App::initialize(config).await?.run().await?;
    println!("{}", output);

    Ok(())
}
