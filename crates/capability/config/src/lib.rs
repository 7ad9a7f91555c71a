//! 节点配置加载。

use dish_normalize::NormalizeOptions;
use serde::Deserialize;
use std::env;

/// 默认输出路径。
pub const DEFAULT_OUTPUT_PROPERTY: &str = "payload";

/// 指向 JSON 配置文件的环境变量；设置后优先于其他环境变量。
pub const CONFIG_FILE_ENV: &str = "DISH_NODE_CONFIG";

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read {0}: {1}")]
    Read(String, String),
}

/// 节点配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    /// 输出记录写入的点分路径（已去除首尾空白）。
    pub output_property: String,
    pub strict: bool,
    pub include_identity: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            output_property: DEFAULT_OUTPUT_PROPERTY.to_string(),
            strict: true,
            include_identity: true,
        }
    }
}

/// JSON 配置文件结构（字段均可省略）。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawNodeConfig {
    output_property: Option<String>,
    strict: Option<bool>,
    include_identity: Option<bool>,
}

impl NodeConfig {
    /// `DISH_NODE_CONFIG` 指向的文件存在时读取文件，否则读取环境变量。
    pub fn load() -> Result<Self, ConfigError> {
        match read_optional(&|key: &str| env::var(key).ok(), CONFIG_FILE_ENV) {
            Some(path) => Self::from_file(&path),
            None => Self::from_env(),
        }
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|err| ConfigError::Read(path.to_string(), err.to_string()))?;
        Self::from_json(&text)
    }

    /// 解析 camelCase JSON：`outputProperty`、`strict`、`includeIdentity`。
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: RawNodeConfig = serde_json::from_str(text)?;
        let defaults = Self::default();
        Ok(Self {
            output_property: raw.output_property.unwrap_or_default(),
            strict: raw.strict.unwrap_or(defaults.strict),
            include_identity: raw.include_identity.unwrap_or(defaults.include_identity),
        }
        .sanitized())
    }

    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源读取配置（测试时可传入固定映射）。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let output_property = read_optional(&lookup, "DISH_OUTPUT_PROPERTY").unwrap_or_default();
        let strict = read_bool_with_default(&lookup, "DISH_STRICT", true)?;
        let include_identity = read_bool_with_default(&lookup, "DISH_INCLUDE_IDENTITY", true)?;

        Ok(Self {
            output_property,
            strict,
            include_identity,
        }
        .sanitized())
    }

    /// 规范化器选项。
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            strict: self.strict,
            include_identity: self.include_identity,
        }
    }

    fn sanitized(mut self) -> Self {
        let trimmed = self.output_property.trim();
        self.output_property = if trimmed.is_empty() {
            DEFAULT_OUTPUT_PROPERTY.to_string()
        } else {
            trimmed.to_string()
        };
        self
    }
}

fn read_optional(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    match lookup(key) {
        Some(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default(
    lookup: &dyn Fn(&str) -> Option<String>,
    key: &str,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(value) = read_optional(lookup, key) else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid(key.to_string(), value)),
    }
}
