use serde::Serialize;
use std::collections::BTreeMap;

/// 字段校验错误表（字段名 -> 提示）
///
/// 每次校验整体替换；用户修改某个字段时只清除该字段的条目。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    entries: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 仅当该字段还没有错误时写入
    pub fn insert_first(&mut self, field: &str, message: &str) {
        self.entries
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    /// 清除单个字段的错误，返回是否存在过
    pub fn clear_field(&mut self, field: &str) -> bool {
        self.entries.remove(field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 合并为一行，用于日志
    pub fn summary(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
