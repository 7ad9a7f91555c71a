use crate::path::{PathError, set_by_path};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 载荷字段名。
pub const PAYLOAD_KEY: &str = "payload";

/// 消息 ID 字段名。
pub const MESSAGE_ID_KEY: &str = "_msgid";

/// 流经处理节点的消息容器（字符串键的 JSON 对象）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message(Map<String, Value>);

impl Message {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// 构造仅包含 payload 的消息。
    pub fn with_payload(payload: Value) -> Self {
        let mut fields = Map::new();
        fields.insert(PAYLOAD_KEY.to_string(), payload);
        Self(fields)
    }

    /// 仅接受 JSON 对象作为消息容器。
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn payload(&self) -> Option<&Value> {
        self.0.get(PAYLOAD_KEY)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn message_id(&self) -> Option<&str> {
        self.0.get(MESSAGE_ID_KEY).and_then(Value::as_str)
    }

    pub fn set_message_id(&mut self, message_id: impl Into<String>) {
        self.0
            .insert(MESSAGE_ID_KEY.to_string(), Value::String(message_id.into()));
    }

    /// 按点分路径写入字段，见 [`set_by_path`]。
    pub fn set_path(&mut self, path: &str, value: Value) -> Result<(), PathError> {
        set_by_path(&mut self.0, path, value)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// 规范化后的扁平记录，字段顺序即插入顺序。
///
/// `null` 表示"无值"，与键不存在是两回事。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatRecord(Map<String, Value>);

impl FlatRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
