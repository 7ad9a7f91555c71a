//! 追踪初始化、消息 ID 生成与处理计数。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 计数快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub messages_received: u64,
    pub records_forwarded: u64,
    pub dropped_parse_failure: u64,
    pub dropped_missing_status: u64,
    pub fatal_errors: u64,
}

impl MetricsSnapshot {
    pub fn dropped_total(&self) -> u64 {
        self.dropped_parse_failure + self.dropped_missing_status
    }
}

/// 进程内计数器。
pub struct TelemetryMetrics {
    messages_received: AtomicU64,
    records_forwarded: AtomicU64,
    dropped_parse_failure: AtomicU64,
    dropped_missing_status: AtomicU64,
    fatal_errors: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            messages_received: AtomicU64::new(0),
            records_forwarded: AtomicU64::new(0),
            dropped_parse_failure: AtomicU64::new(0),
            dropped_missing_status: AtomicU64::new(0),
            fatal_errors: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            messages_received: self.messages_received.load(Ordering::Relaxed),
            records_forwarded: self.records_forwarded.load(Ordering::Relaxed),
            dropped_parse_failure: self.dropped_parse_failure.load(Ordering::Relaxed),
            dropped_missing_status: self.dropped_missing_status.load(Ordering::Relaxed),
            fatal_errors: self.fatal_errors.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局计数器实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
///
/// 日志写到 stderr，stdout 只输出记录。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 生成新的消息 ID。
pub fn new_message_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 记录收到的消息。
pub fn record_message_received() {
    metrics().messages_received.fetch_add(1, Ordering::Relaxed);
}

/// 记录成功转发的记录。
pub fn record_forwarded() {
    metrics().records_forwarded.fetch_add(1, Ordering::Relaxed);
}

/// 记录 JSON 解析失败导致的丢弃。
pub fn record_dropped_parse_failure() {
    metrics()
        .dropped_parse_failure
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录缺少 status 导致的丢弃。
pub fn record_dropped_missing_status() {
    metrics()
        .dropped_missing_status
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录内部故障。
pub fn record_fatal() {
    metrics().fatal_errors.fetch_add(1, Ordering::Relaxed);
}
