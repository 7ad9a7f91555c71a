use crate::NormalizeError;
use domain::split_path;
use serde_json::Value;

/// 沿点分路径取值。
///
/// 中间层缺失、为 `null` 或不是对象时视为无值；`null` 叶子同样视为无值。
pub fn lookup<'a>(root: &'a Value, path: &str) -> Result<Option<&'a Value>, NormalizeError> {
    let segments = split_path(path).map_err(|err| NormalizeError::InternalFault(err.to_string()))?;
    let mut current = root;
    for segment in segments {
        match current.as_object().and_then(|fields| fields.get(segment)) {
            Some(next) => current = next,
            None => return Ok(None),
        }
    }
    Ok((!current.is_null()).then_some(current))
}

/// 按候选顺序返回第一个存在且非 `null` 的值。
pub fn first_present<'a>(
    root: &'a Value,
    candidates: &[&str],
) -> Result<Option<&'a Value>, NormalizeError> {
    for candidate in candidates {
        if let Some(value) = lookup(root, candidate)? {
            return Ok(Some(value));
        }
    }
    Ok(None)
}
