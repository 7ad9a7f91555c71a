//! 天线状态指标运行时：stdin 行式 JSON → 规范化 → stdout 行式 JSON。

mod ingest;

use dish_config::NodeConfig;
use dish_ingest::{JsonLinesSource, Source};
use dish_telemetry::{init_tracing, metrics};
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从配置文件或环境变量加载节点配置
    let config = NodeConfig::load()?;
    // 初始化结构化日志（stderr）
    init_tracing();
    info!(
        target: "dish.app",
        output_property = %config.output_property,
        strict = config.strict,
        include_identity = config.include_identity,
        "node_configured"
    );

    let handler = ingest::build_handler(&config);
    let source = JsonLinesSource::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    source.run(handler).await?;

    let snapshot = metrics().snapshot();
    info!(
        target: "dish.app",
        received = snapshot.messages_received,
        forwarded = snapshot.records_forwarded,
        dropped = snapshot.dropped_total(),
        fatal = snapshot.fatal_errors,
        "input_exhausted"
    );
    Ok(())
}
