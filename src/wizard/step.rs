use crate::wizard::field::FormField;
use crate::wizard::rules::Condition;
use serde::{Deserialize, Serialize};

/// 步骤中的一个字段位置
#[derive(Debug, Clone)]
pub struct FieldSlot<F> {
    pub field: F,
    pub label: &'static str,
    /// 为 `None` 时总是显示
    pub visible_when: Option<Condition<F>>,
}

/// 向导步骤定义
#[derive(Debug, Clone)]
pub struct StepDef<F> {
    pub id: &'static str,
    pub title: &'static str,
    pub slots: Vec<FieldSlot<F>>,
}

impl<F: FormField> StepDef<F> {
    pub fn new(id: &'static str, title: &'static str) -> Self {
        Self {
            id,
            title,
            slots: Vec::new(),
        }
    }

    /// 总是显示的字段
    pub fn field(mut self, field: F, label: &'static str) -> Self {
        self.slots.push(FieldSlot {
            field,
            label,
            visible_when: None,
        });
        self
    }

    /// 条件显示的字段
    pub fn field_when(mut self, field: F, label: &'static str, condition: Condition<F>) -> Self {
        self.slots.push(FieldSlot {
            field,
            label,
            visible_when: Some(condition),
        });
        self
    }
}

/// 运行时步骤状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

impl Step {
    pub fn from_def<F: FormField>(def: &StepDef<F>) -> Self {
        Self {
            id: def.id.to_string(),
            title: def.title.to_string(),
            completed: false,
        }
    }
}
