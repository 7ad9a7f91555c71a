//! 秒数 → 可读时长（如 `1d 1h 1m 1s`）。

use crate::coerce::{coerce_number, is_truthy};
use serde_json::Value;

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

/// 只输出非零分量，按天/时/分/秒降序，以单个空格连接；全零时为 `0s`。
pub fn format_seconds(total_seconds: u64) -> String {
    let components = [
        (total_seconds / SECONDS_PER_DAY, 'd'),
        (total_seconds % SECONDS_PER_DAY / SECONDS_PER_HOUR, 'h'),
        (total_seconds % SECONDS_PER_HOUR / SECONDS_PER_MINUTE, 'm'),
        (total_seconds % SECONDS_PER_MINUTE, 's'),
    ];
    let parts: Vec<String> = components
        .into_iter()
        .filter(|(amount, _)| *amount > 0)
        .map(|(amount, unit)| format!("{amount}{unit}"))
        .collect();
    if parts.is_empty() {
        return "0s".to_string();
    }
    parts.join(" ")
}

/// 报文字段版本：缺失、假值或无法数值化时为 `0s`。
///
/// 取绝对值并截断小数部分后再分解。
pub fn format_duration(seconds: Option<&Value>) -> String {
    let Some(value) = seconds.filter(|value| is_truthy(value)) else {
        return "0s".to_string();
    };
    match coerce_number(value) {
        Some(seconds) => format_seconds(seconds.abs().trunc() as u64),
        None => "0s".to_string(),
    }
}
