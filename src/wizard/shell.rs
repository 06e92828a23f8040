//! 向导外壳
//!
//! 所有向导共用的步骤指示器、提示条与导航按钮，
//! 步骤内容通过 `render` 的闭包插入。

use crate::wizard::controller::WizardController;
use crate::wizard::definition::WizardDefinition;
use crate::wizard::save::SaveState;
use serde::Serialize;
use std::fmt::Write as _;
use std::time::Instant;

/// 步骤指示器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorState {
    Completed,
    Current,
    Available,
    Locked,
}

impl IndicatorState {
    fn marker(self) -> &'static str {
        match self {
            IndicatorState::Completed => "✓",
            IndicatorState::Current => "▶",
            IndicatorState::Available => "○",
            IndicatorState::Locked => "·",
        }
    }
}

/// 步骤指示器
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepIndicator {
    pub index: usize,
    pub title: String,
    pub state: IndicatorState,
    pub clickable: bool,
}

/// 外壳视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellView {
    pub title: String,
    pub indicators: Vec<StepIndicator>,
    /// 可见时的提示条文本
    pub banner: Option<String>,
    /// 保存失败时的提示
    pub save_error: Option<String>,
    pub previous_enabled: bool,
    pub next_label: &'static str,
    pub completion: u8,
}

pub struct WizardShell;

impl WizardShell {
    /// 从控制器生成外壳视图
    pub fn view<W: WizardDefinition>(controller: &WizardController<W>) -> ShellView {
        Self::view_at(controller, Instant::now())
    }

    pub fn view_at<W: WizardDefinition>(controller: &WizardController<W>, now: Instant) -> ShellView {
        let current = controller.current_step();

        let indicators = controller
            .steps()
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let state = if index == current {
                    IndicatorState::Current
                } else if step.completed {
                    IndicatorState::Completed
                } else if controller.can_navigate_to(index) {
                    IndicatorState::Available
                } else {
                    IndicatorState::Locked
                };
                StepIndicator {
                    index,
                    title: step.title.clone(),
                    state,
                    clickable: index != current && controller.can_navigate_to(index),
                }
            })
            .collect();

        let banner = controller
            .banner()
            .is_visible_at(now)
            .then(|| controller.banner().message().to_string());

        let save_error = match controller.save_state() {
            SaveState::Failed { message, retryable } => Some(if *retryable {
                format!("No se pudo guardar: {message}. Intente nuevamente.")
            } else {
                format!("No se pudo guardar: {message}")
            }),
            _ => None,
        };

        ShellView {
            title: W::KIND.name().to_string(),
            indicators,
            banner,
            save_error,
            previous_enabled: current > 0,
            next_label: if controller.is_last_step() { "Guardar" } else { "Siguiente" },
            completion: controller.completion_percentage(),
        }
    }

    /// 渲染为文本，`content` 负责当前步骤的内容区域
    pub fn render<W, C>(controller: &WizardController<W>, content: C) -> String
    where
        W: WizardDefinition,
        C: FnOnce(&WizardController<W>) -> String,
    {
        let view = Self::view(controller);
        let mut out = String::new();

        let _ = writeln!(out, "== {} ({}%) ==", view.title, view.completion);
        for indicator in &view.indicators {
            let _ = writeln!(
                out,
                "  {} {}. {}",
                indicator.state.marker(),
                indicator.index + 1,
                indicator.title
            );
        }

        if let Some(banner) = &view.banner {
            let _ = writeln!(out, "[!] {}", banner);
        }
        if let Some(save_error) = &view.save_error {
            let _ = writeln!(out, "[x] {}", save_error);
        }

        out.push_str(&content(controller));
        if !out.ends_with('\n') {
            out.push('\n');
        }

        let previous = if view.previous_enabled { "< Anterior" } else { "" };
        let _ = writeln!(out, "{:<12}{:>12}", previous, format!("{} >", view.next_label));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcedureKind;
    use crate::wizard::controller::WizardSettings;
    use crate::wizard::rules::StepRules;
    use crate::wizard::step::StepDef;
    use std::time::Duration;

    crate::form_fields! {
        enum Field {
            Uno => "uno",
            Dos => "dos",
        }
    }

    struct Pair;

    impl WizardDefinition for Pair {
        type Field = Field;
        const KIND: ProcedureKind = ProcedureKind::ConformidadObra;

        fn steps() -> Vec<StepDef<Field>> {
            vec![
                StepDef::new("uno", "Primero").field(Field::Uno, "Uno"),
                StepDef::new("dos", "Segundo").field(Field::Dos, "Dos"),
                StepDef::new("fin", "Resumen"),
            ]
        }

        fn step_rules(step: usize) -> StepRules<Field> {
            match step {
                0 => StepRules::new().required(Field::Uno, "requerido"),
                _ => StepRules::new(),
            }
        }
    }

    #[test]
    fn test_indicators_follow_navigation_guard() {
        let c = WizardController::<Pair>::new(WizardSettings::default());
        let view = WizardShell::view(&c);

        let states: Vec<_> = view.indicators.iter().map(|i| i.state).collect();
        assert_eq!(
            states,
            vec![IndicatorState::Current, IndicatorState::Available, IndicatorState::Locked]
        );
        assert!(!view.indicators[0].clickable);
        assert!(view.indicators[1].clickable);
        assert!(!view.indicators[2].clickable);
        assert!(!view.previous_enabled);
        assert_eq!(view.next_label, "Siguiente");
    }

    #[test]
    fn test_banner_visible_only_after_failed_next() {
        let mut c = WizardController::<Pair>::new(WizardSettings::default());
        let t0 = Instant::now();
        assert!(WizardShell::view_at(&c, t0).banner.is_none());

        c.handle_next_at(t0);
        let view = WizardShell::view_at(&c, t0 + Duration::from_secs(1));
        assert_eq!(view.banner.as_deref(), Some(c.banner().message()));
        assert!(WizardShell::view_at(&c, t0 + Duration::from_secs(6)).banner.is_none());
    }

    #[test]
    fn test_render_wraps_content_slot() {
        let mut c = WizardController::<Pair>::new(WizardSettings::default());
        c.on_input_change(Field::Uno, "a");
        c.handle_next();
        c.handle_next();

        let text = WizardShell::render(&c, |ctl| format!("contenido del paso {}", ctl.current_step()));
        assert!(text.contains("Conformidad de Obra"));
        assert!(text.contains("✓ 1. Primero"));
        assert!(text.contains("contenido del paso 2"));
        assert!(text.contains("Guardar >"));
        assert!(text.contains("< Anterior"));
    }
}
