//! 比特率换算（bps → Mbps）。
//!
//! 舍入规则：先换算为千分之一兆比特，再用 `f64::round`（远离零方向的四舍五入）
//! 取整，因此 `1_500` bps 得到 `0.002`，`-1_500` bps 得到 `-0.002`。

use crate::coerce::coerce_number;
use serde_json::Value;

/// bps 换算为 Mbps，保留 3 位小数；非有限输入返回 `0`。
pub fn megabits(bits_per_second: f64) -> f64 {
    if !bits_per_second.is_finite() {
        return 0.0;
    }
    (bits_per_second / 1_000.0).round() / 1_000.0
}

/// 报文字段版本：缺失、`null` 或无法数值化时返回 `0`。
pub fn to_megabits(bits_per_second: Option<&Value>) -> f64 {
    bits_per_second
        .and_then(coerce_number)
        .map(megabits)
        .unwrap_or(0.0)
}
