//! 类型化的表单字段访问层
//!
//! 每个向导用 `form_fields!` 声明自己的字段枚举，`FormData<F>` 只接受该枚举作为键，
//! 未写入的字段读取为 `FieldValue::Empty`。

use crate::error::{AppResult, WizardError};
use crate::models::{ClientRef, FieldValue, UploadedDocument};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::warn;

/// 向导字段
pub trait FormField: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// 字段在载荷 / 草稿 / 错误表中的名字
    fn key(self) -> &'static str;
    /// 声明顺序下的全部字段
    fn all() -> &'static [Self];

    fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.key() == key)
    }
}

/// 声明一个向导字段枚举
///
/// ```ignore
/// form_fields! {
///     pub enum Field {
///         SelectedClient => "selectedClient",
///         Fue => "fue",
///     }
/// }
/// ```
#[macro_export]
macro_rules! form_fields {
    ($vis:vis enum $name:ident { $($variant:ident => $key:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::wizard::FormField for $name {
            fn key(self) -> &'static str {
                match self {
                    $(Self::$variant => $key),+
                }
            }

            fn all() -> &'static [Self] {
                &[$(Self::$variant),+]
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::wizard::FormField::key(*self))
            }
        }
    };
}

static EMPTY: FieldValue = FieldValue::Empty;

/// 表单数据
#[derive(Debug, Clone, PartialEq)]
pub struct FormData<F: FormField> {
    values: BTreeMap<F, FieldValue>,
}

impl<F: FormField> Default for FormData<F> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<F: FormField> FormData<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取字段，未写入时返回 `Empty`
    pub fn get(&self, field: F) -> &FieldValue {
        self.values.get(&field).unwrap_or(&EMPTY)
    }

    pub fn set(&mut self, field: F, value: impl Into<FieldValue>) {
        self.values.insert(field, value.into());
    }

    pub fn with(mut self, field: F, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn is_filled(&self, field: F) -> bool {
        self.get(field).is_filled()
    }

    pub fn text(&self, field: F) -> &str {
        self.get(field).as_text().unwrap_or("")
    }

    pub fn number(&self, field: F) -> f64 {
        self.get(field).as_number().unwrap_or(0.0)
    }

    pub fn flag(&self, field: F) -> bool {
        self.get(field).as_bool()
    }

    pub fn files(&self, field: F) -> &[UploadedDocument] {
        self.get(field).as_files()
    }

    pub fn client(&self, field: F) -> Option<&ClientRef> {
        self.get(field).as_client()
    }

    /// 向文件字段追加一个已上传文档
    pub fn push_file(&mut self, field: F, document: UploadedDocument) {
        let mut files = self.files(field).to_vec();
        files.push(document);
        self.set(field, files);
    }

    /// 从所有文件字段中移除指定 ID 的文档，返回是否有改动
    pub fn remove_file(&mut self, document_id: &str) -> bool {
        let mut changed = false;
        for value in self.values.values_mut() {
            if let FieldValue::Files(files) = value {
                let before = files.len();
                files.retain(|d| d.id != document_id);
                changed |= files.len() != before;
            }
        }
        changed
    }

    /// 已写入的字段
    pub fn iter(&self) -> impl Iterator<Item = (F, &FieldValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    /// 生成提交载荷：包含全部声明字段，未填写的为 null
    pub fn to_payload(&self) -> JsonValue {
        let mut map = Map::new();
        for field in F::all() {
            let value = serde_json::to_value(self.get(*field)).unwrap_or(JsonValue::Null);
            map.insert(field.key().to_string(), value);
        }
        JsonValue::Object(map)
    }

    /// 转换为以字符串为键的映射（写回草稿用），跳过空值
    pub fn to_raw(&self) -> BTreeMap<String, FieldValue> {
        self.values
            .iter()
            .filter(|(_, v)| **v != FieldValue::Empty)
            .map(|(k, v)| (k.key().to_string(), v.clone()))
            .collect()
    }

    /// 从草稿中的原始映射构建，遇到未声明的字段报错
    pub fn from_raw(kind: &str, raw: &BTreeMap<String, FieldValue>) -> AppResult<Self> {
        let mut form = Self::new();
        for (key, value) in raw {
            let field = F::from_key(key).ok_or_else(|| WizardError::UnknownField {
                kind: kind.to_string(),
                key: key.clone(),
            })?;
            form.set(field, value.clone());
        }
        Ok(form)
    }

    /// 从原始映射构建，未声明的字段记录告警后忽略
    pub fn from_raw_lenient(kind: &str, raw: &BTreeMap<String, FieldValue>) -> Self {
        let mut form = Self::new();
        for (key, value) in raw {
            match F::from_key(key) {
                Some(field) => form.set(field, value.clone()),
                None => warn!("⚠️ [{}] 忽略未知字段: {}", kind, key),
            }
        }
        form
    }
}
