//! 步骤校验规则

use crate::wizard::errors::ValidationErrors;
use crate::wizard::field::{FormData, FormField};
use regex::Regex;
use tracing::warn;

/// 条件（用于条件必填与条件显示）
#[derive(Debug, Clone)]
pub enum Condition<F> {
    /// 布尔字段为真
    IsTrue(F),
    /// 文本字段等于给定值
    Equals(F, &'static str),
    /// 文本字段属于给定值之一
    OneOf(F, &'static [&'static str]),
    /// 已选择实体
    ClientSelected(F),
    /// 全部条件同时成立
    All(Vec<Condition<F>>),
}

impl<F: FormField> Condition<F> {
    pub fn holds(&self, form: &FormData<F>) -> bool {
        match self {
            Condition::IsTrue(f) => form.flag(*f),
            Condition::Equals(f, expected) => form.text(*f).trim() == *expected,
            Condition::OneOf(f, options) => {
                let value = form.text(*f).trim();
                options.iter().any(|o| *o == value)
            }
            Condition::ClientSelected(f) => form.client(*f).is_some(),
            Condition::All(conditions) => conditions.iter().all(|c| c.holds(form)),
        }
    }
}

/// 单条校验规则
#[derive(Debug, Clone)]
pub enum Rule<F> {
    /// 必填（非空、非 0、非 false、非空列表）
    Required { field: F, message: &'static str },
    /// 数值必须大于 0（仅在已填写时检查，未填写交给 Required）
    Positive { field: F, message: &'static str },
    /// 文本需匹配正则（仅在已填写时检查）
    Pattern {
        field: F,
        pattern: &'static str,
        message: &'static str,
    },
    /// 条件成立时才检查的规则组
    When {
        condition: Condition<F>,
        rules: Vec<Rule<F>>,
    },
}

impl<F: FormField> Rule<F> {
    fn apply(&self, form: &FormData<F>, errors: &mut ValidationErrors) {
        match self {
            Rule::Required { field, message } => {
                if !form.is_filled(*field) {
                    errors.insert_first(field.key(), *message);
                }
            }
            Rule::Positive { field, message } => {
                let value = form.get(*field);
                if value.is_filled() && value.as_number().map_or(true, |n| n <= 0.0) {
                    errors.insert_first(field.key(), *message);
                }
            }
            Rule::Pattern {
                field,
                pattern,
                message,
            } => {
                let text = form.text(*field).trim();
                if text.is_empty() {
                    return;
                }
                match Regex::new(pattern) {
                    Ok(re) => {
                        if !re.is_match(text) {
                            errors.insert_first(field.key(), *message);
                        }
                    }
                    Err(e) => warn!("⚠️ 无效的校验正则 {}: {}", pattern, e),
                }
            }
            Rule::When { condition, rules } => {
                if condition.holds(form) {
                    for rule in rules {
                        rule.apply(form, errors);
                    }
                }
            }
        }
    }
}

/// 一个步骤的全部规则
#[derive(Debug, Clone)]
pub struct StepRules<F> {
    rules: Vec<Rule<F>>,
}

impl<F: FormField> Default for StepRules<F> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<F: FormField> StepRules<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, field: F, message: &'static str) -> Self {
        self.rules.push(Rule::Required { field, message });
        self
    }

    pub fn positive(mut self, field: F, message: &'static str) -> Self {
        self.rules.push(Rule::Positive { field, message });
        self
    }

    pub fn pattern(mut self, field: F, pattern: &'static str, message: &'static str) -> Self {
        self.rules.push(Rule::Pattern {
            field,
            pattern,
            message,
        });
        self
    }

    /// 条件规则组
    pub fn when(mut self, condition: Condition<F>, nested: StepRules<F>) -> Self {
        self.rules.push(Rule::When {
            condition,
            rules: nested.rules,
        });
        self
    }

    /// 执行全部规则，返回新的错误表
    pub fn check(&self, form: &FormData<F>) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for rule in &self.rules {
            rule.apply(form, &mut errors);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::form_fields! {
        enum F {
            EstadoCivil => "estado_civil",
            Conyuge => "conyuge_nombres",
            Email => "email",
            Area => "area",
        }
    }

    fn rules() -> StepRules<F> {
        StepRules::new()
            .required(F::EstadoCivil, "El estado civil es requerido")
            .when(
                Condition::Equals(F::EstadoCivil, "casado"),
                StepRules::new().required(F::Conyuge, "El nombre del cónyuge es requerido"),
            )
            .pattern(F::Email, r"^[^@\s]+@[^@\s]+\.[^@\s]+$", "El correo no es válido")
            .positive(F::Area, "El área debe ser mayor a 0")
    }

    #[test]
    fn test_conditional_requirement_toggles() {
        let soltero = FormData::new().with(F::EstadoCivil, "soltero");
        assert!(rules().check(&soltero).is_empty());

        let casado = FormData::new().with(F::EstadoCivil, "casado");
        let errors = rules().check(&casado);
        assert_eq!(
            errors.get("conyuge_nombres"),
            Some("El nombre del cónyuge es requerido")
        );
    }

    #[test]
    fn test_all_requires_every_condition() {
        let condition = Condition::All(vec![
            Condition::Equals(F::EstadoCivil, "casado"),
            Condition::IsTrue(F::Conyuge),
        ]);
        let form = FormData::new().with(F::EstadoCivil, "casado");
        assert!(!condition.holds(&form));
        assert!(condition.holds(&form.with(F::Conyuge, true)));
    }

    #[test]
    fn test_pattern_only_checked_when_filled() {
        let form = FormData::new().with(F::EstadoCivil, "soltero");
        assert!(rules().check(&form).get("email").is_none());

        let form = form.with(F::Email, "no-es-correo");
        assert_eq!(rules().check(&form).get("email"), Some("El correo no es válido"));
    }

    #[test]
    fn test_positive_rejects_negative_and_text() {
        let form = FormData::new().with(F::EstadoCivil, "soltero").with(F::Area, -3.0);
        assert!(rules().check(&form).contains("area"));

        let form = FormData::new().with(F::EstadoCivil, "soltero").with(F::Area, "12.5");
        assert!(!rules().check(&form).contains("area"));
    }

    #[test]
    fn test_first_error_per_field_wins() {
        let rules = StepRules::new()
            .required(F::Email, "primero")
            .required(F::Email, "segundo");
        let errors = rules.check(&FormData::new());
        assert_eq!(errors.get("email"), Some("primero"));
        assert_eq!(errors.len(), 1);
    }
}
