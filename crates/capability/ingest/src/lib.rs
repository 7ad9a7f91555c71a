//! 消息处理节点与行式 JSON 数据源。

pub mod source;

use dish_normalize::{NormalizeError, NormalizeOptions, Normalizer, Rejection};
use domain::{Message, PathError};
use std::sync::Arc;
use tracing::warn;

pub use source::{JsonLinesSource, Source};

/// 采集错误。
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("internal fault: {0}")]
    InternalFault(String),
    #[error("output placement failed: {0}")]
    Placement(#[from] PathError),
    #[error("source error: {0}")]
    Source(String),
}

/// 单条消息的处理结果，同时作为"处理完成"信号。
#[derive(Debug)]
pub enum Outcome {
    /// 记录已写入消息，继续向下游转发。
    Forwarded(Message),
    /// 正常丢弃（不转发）。
    Dropped(Rejection),
    /// 意外故障，必须交给调用方。
    Fatal(IngestError),
}

/// 消息处理器。
pub trait MessageHandler: Send + Sync {
    fn handle(&self, message: Message) -> Outcome;
}

/// 诊断输出通道（只写，不影响控制流）。
pub trait Diagnostics: Send + Sync {
    fn warn(&self, message: &str);
}

/// 以 `tracing::warn!` 输出诊断。
#[derive(Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, message: &str) {
        warn!(target: "dish.ingest", "{message}");
    }
}

/// 天线状态指标节点：规范化 payload 并把记录写到配置的输出路径。
#[derive(Clone)]
pub struct MetricsNode {
    normalizer: Normalizer,
    output_property: String,
    diagnostics: Arc<dyn Diagnostics>,
}

impl MetricsNode {
    pub fn new(
        options: NormalizeOptions,
        output_property: impl Into<String>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            normalizer: Normalizer::new(options),
            output_property: output_property.into(),
            diagnostics,
        }
    }

    pub fn output_property(&self) -> &str {
        &self.output_property
    }
}

impl MessageHandler for MetricsNode {
    fn handle(&self, mut message: Message) -> Outcome {
        let record = match self.normalizer.normalize(message.payload()) {
            Ok(record) => record,
            Err(NormalizeError::Rejected(reason)) => {
                // 严格模式静默丢弃，非严格模式先输出一条警告
                if !self.normalizer.options().strict {
                    self.diagnostics.warn(&reason.to_string());
                }
                return Outcome::Dropped(reason);
            }
            Err(NormalizeError::InternalFault(reason)) => {
                return Outcome::Fatal(IngestError::InternalFault(reason));
            }
        };

        match message.set_path(&self.output_property, record.into_value()) {
            Ok(()) => Outcome::Forwarded(message),
            Err(err) => Outcome::Fatal(err.into()),
        }
    }
}
