//! 通用向导状态机
//!
//! 各具体向导只提供 `WizardDefinition`，其余行为都在这里。

pub mod banner;
pub mod client_picker;
pub mod content;
pub mod controller;
pub mod definition;
pub mod errors;
pub mod field;
pub mod header;
pub mod rules;
pub mod save;
pub mod shell;
pub mod step;

pub use banner::{ValidationBanner, DEFAULT_BANNER_MESSAGE};
pub use client_picker::ClientPicker;
pub use content::{FieldView, StepContent};
pub use controller::{WizardController, WizardSettings};
pub use definition::WizardDefinition;
pub use errors::ValidationErrors;
pub use field::{FormData, FormField};
pub use header::{Header, HeaderGuard, HeaderStore};
pub use rules::{Condition, Rule, StepRules};
pub use save::SaveState;
pub use shell::{IndicatorState, ShellView, StepIndicator, WizardShell};
pub use step::{FieldSlot, Step, StepDef};
