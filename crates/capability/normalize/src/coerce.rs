//! 宽松数值化与真值判断（与上游报文生成方的弱类型语义保持一致）。

use serde_json::{Number, Value};

/// 2^53 - 1，超过后整数无法被 f64 精确表示。
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// 真值判断：`null`、`false`、`0`、`""` 为假，其余为真。
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// 宽松数值化；无法得到有限数值时返回 `None`。
///
/// 字符串去除首尾空白后解析，空串为 `0`，支持 `0x`/`0o`/`0b` 前缀；
/// 布尔值转为 `1`/`0`；`null`、数组、对象不参与转换。
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::String(text) => parse_numeric_text(text),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }?;
    number.is_finite().then_some(number)
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            // from_str_radix 接受前导 '+'，前缀后只允许数字
            if digits.starts_with('+') {
                return None;
            }
            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }
    // 排除 "inf" / "nan" 等仅 Rust 接受的写法
    if text
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return None;
    }
    text.parse::<f64>().ok()
}

/// 数值转 JSON：整数值输出为整数，其余输出为浮点，非有限值输出 `null`。
pub fn number_value(number: f64) -> Value {
    if number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
        return Value::from(number as i64);
    }
    Number::from_f64(number)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
