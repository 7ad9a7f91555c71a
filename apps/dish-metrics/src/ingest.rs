//! 处理链路装配模块
//!
//! 把规范化节点包一层：补齐消息 ID、打开消息级 span，并按处理结果记录计数。

use dish_config::NodeConfig;
use dish_ingest::{MessageHandler, MetricsNode, Outcome, TracingDiagnostics};
use dish_normalize::Rejection;
use dish_telemetry::{
    new_message_id, record_dropped_missing_status, record_dropped_parse_failure, record_fatal,
    record_forwarded, record_message_received,
};
use domain::Message;
use std::sync::Arc;
use tracing::{debug, info_span};

/// 带计数与追踪的处理器。
pub struct InstrumentedHandler {
    inner: Arc<dyn MessageHandler>,
}

impl InstrumentedHandler {
    pub fn new(inner: Arc<dyn MessageHandler>) -> Self {
        Self { inner }
    }
}

impl MessageHandler for InstrumentedHandler {
    fn handle(&self, mut message: Message) -> Outcome {
        record_message_received();
        if message.message_id().is_none() {
            message.set_message_id(new_message_id());
        }
        let span = info_span!(
            "message",
            message_id = %message.message_id().unwrap_or_default()
        );
        let _guard = span.enter();

        let outcome = self.inner.handle(message);
        match &outcome {
            Outcome::Forwarded(_) => {
                record_forwarded();
                debug!(target: "dish.ingest", "record_forwarded");
            }
            Outcome::Dropped(Rejection::ParseFailure(_)) => {
                record_dropped_parse_failure();
                debug!(target: "dish.ingest", reason = "parse_failure", "message_dropped");
            }
            Outcome::Dropped(Rejection::MissingStatus) => {
                record_dropped_missing_status();
                debug!(target: "dish.ingest", reason = "missing_status", "message_dropped");
            }
            // 错误日志由数据源统一输出
            Outcome::Fatal(_) => record_fatal(),
        }
        outcome
    }
}

/// 按配置构建完整处理链路。
pub fn build_handler(config: &NodeConfig) -> Arc<dyn MessageHandler> {
    let node = MetricsNode::new(
        config.normalize_options(),
        config.output_property.clone(),
        Arc::new(TracingDiagnostics),
    );
    Arc::new(InstrumentedHandler::new(Arc::new(node)))
}
