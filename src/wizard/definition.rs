use crate::models::ProcedureKind;
use crate::wizard::field::{FormData, FormField};
use crate::wizard::rules::StepRules;
use crate::wizard::step::StepDef;
use serde_json::Value as JsonValue;

/// 一个具体向导的静态描述
///
/// 控制器对所有向导通用，差异全部集中在这里：字段、步骤、每步规则与提交载荷。
pub trait WizardDefinition: Send + Sync + 'static {
    type Field: FormField;

    const KIND: ProcedureKind;

    /// 有序步骤
    fn steps() -> Vec<StepDef<Self::Field>>;

    /// 第 `step` 步的校验规则；越界时没有规则
    fn step_rules(step: usize) -> StepRules<Self::Field>;

    /// 新建时的初始表单
    fn initial_form() -> FormData<Self::Field> {
        FormData::new()
    }

    /// 提交给后端的载荷
    fn payload(form: &FormData<Self::Field>) -> JsonValue {
        form.to_payload()
    }
}
