//! 点分路径写入（与具体记录结构无关）。

use serde_json::{Map, Value};

/// 路径错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("malformed path: {0:?}")]
    Malformed(String),
}

/// 拆分点分路径；空路径或空段视为非法。
pub fn split_path(path: &str) -> Result<Vec<&str>, PathError> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(PathError::Malformed(path.to_string()));
    }
    Ok(segments)
}

/// 在 `target` 的 `path` 位置写入 `value`。
///
/// 中间层不存在时创建空对象；遇到非对象值时直接覆盖为空对象。
/// 数组同样会被覆盖，不会按下标写入数组元素。
pub fn set_by_path(
    target: &mut Map<String, Value>,
    path: &str,
    value: Value,
) -> Result<(), PathError> {
    let segments = split_path(path)?;
    let Some((last, parents)) = segments.split_last() else {
        return Err(PathError::Malformed(path.to_string()));
    };

    let mut current = target;
    for segment in parents {
        let slot = current
            .entry(*segment)
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else {
            return Err(PathError::Malformed(path.to_string()));
        };
        current = next;
    }
    current.insert((*last).to_string(), value);
    Ok(())
}
