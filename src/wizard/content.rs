use crate::wizard::controller::WizardController;
use crate::wizard::definition::WizardDefinition;
use crate::wizard::errors::ValidationErrors;
use crate::wizard::field::{FormData, FormField};
use crate::wizard::step::StepDef;
use serde::Serialize;
use std::fmt::Write as _;

/// 单个字段的展示
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
    pub error: Option<String>,
}

/// 当前步骤的内容：只读投影，不持有任何状态
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepContent {
    pub step_id: &'static str,
    pub title: &'static str,
    pub fields: Vec<FieldView>,
}

impl StepContent {
    /// 按条件显示规则投影一个步骤
    pub fn project<F: FormField>(def: &StepDef<F>, form: &FormData<F>, errors: &ValidationErrors) -> Self {
        let fields = def
            .slots
            .iter()
            .filter(|slot| slot.visible_when.as_ref().map_or(true, |c| c.holds(form)))
            .map(|slot| FieldView {
                key: slot.field.key(),
                label: slot.label,
                value: form.get(slot.field).summary(),
                error: errors.get(slot.field.key()).map(str::to_string),
            })
            .collect();

        Self {
            step_id: def.id,
            title: def.title,
            fields,
        }
    }

    pub fn current<W: WizardDefinition>(controller: &WizardController<W>) -> Self {
        Self::project(controller.current_step_def(), controller.form(), controller.errors())
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.key == key)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "-- {} --", self.title);
        for field in &self.fields {
            let _ = writeln!(out, "  {}: {}", field.label, field.value);
            if let Some(error) = &field.error {
                let _ = writeln!(out, "    ! {}", error);
            }
        }
        out
    }
}
