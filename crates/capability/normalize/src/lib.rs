//! 卫星天线状态报文 → 扁平指标记录的规范化。

pub mod coerce;
pub mod duration;
pub mod fields;
pub mod lookup;
pub mod units;

use coerce::{coerce_number, is_truthy, number_value};
use domain::FlatRecord;
use fields::{Derivation, FIELDS, FieldSpec, IDENTITY_KEYS};
use serde_json::Value;
use std::borrow::Cow;

pub use duration::{format_duration, format_seconds};
pub use fields::field_keys;
pub use lookup::{first_present, lookup};
pub use units::{megabits, to_megabits};

/// 规范化选项。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// 为 true 时拒绝不输出诊断；为 false 时先输出一条警告。
    pub strict: bool,
    /// 是否复制 `ts`、`dish_id`、`serial`。
    pub include_identity: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            strict: true,
            include_identity: true,
        }
    }
}

/// 报文被拒绝的原因（消息被丢弃，属于正常结果）。
///
/// `Display` 即诊断通道使用的警告文本。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Failed to parse payload as JSON: {0}")]
    ParseFailure(String),
    #[error("No 'status' field found in payload")]
    MissingStatus,
}

/// 规范化错误。
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("rejected: {0}")]
    Rejected(#[from] Rejection),
    #[error("internal fault: {0}")]
    InternalFault(String),
}

/// 状态报文规范化器（无状态，可并发调用）。
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> NormalizeOptions {
        self.options
    }

    /// 规范化消息 payload。
    ///
    /// 字符串 payload 先按 JSON 解析；缺少可用的 `status` 时拒绝。
    /// 单个字段取不到值时输出 `null`，不会报错。
    pub fn normalize(&self, payload: Option<&Value>) -> Result<FlatRecord, NormalizeError> {
        let document = resolve_document(payload)?;
        let status = usable_status(&document).ok_or(Rejection::MissingStatus)?;

        let mut record = FlatRecord::new();
        for field in FIELDS {
            record.insert(field.key, resolve_field(status, field)?);
        }

        if self.options.include_identity {
            // 缺失的身份字段保持缺失，不补 null
            for key in IDENTITY_KEYS {
                if let Some(value) = document.get(key) {
                    record.insert(key, value.clone());
                }
            }
        }
        Ok(record)
    }
}

fn resolve_document(payload: Option<&Value>) -> Result<Cow<'_, Value>, Rejection> {
    match payload {
        Some(Value::String(text)) => serde_json::from_str::<Value>(text)
            .map(Cow::Owned)
            .map_err(|err| Rejection::ParseFailure(err.to_string())),
        Some(value) => Ok(Cow::Borrowed(value)),
        None => Err(Rejection::MissingStatus),
    }
}

fn usable_status(document: &Value) -> Option<&Value> {
    document
        .as_object()?
        .get("status")
        .filter(|status| is_truthy(status))
}

fn resolve_field(status: &Value, field: &FieldSpec) -> Result<Value, NormalizeError> {
    let source = first_present(status, field.candidates)?;
    let value = match field.derivation {
        Derivation::FirstPresent => source.cloned().unwrap_or(Value::Null),
        Derivation::Megabits => number_value(to_megabits(source)),
        Derivation::Uptime => source
            .filter(|value| is_truthy(value))
            .and_then(coerce_number)
            .map(number_value)
            .unwrap_or(Value::Null),
        Derivation::FriendlyDuration => match source {
            Some(seconds) => Value::String(format_duration(Some(seconds))),
            None => Value::Null,
        },
    };
    Ok(value)
}
