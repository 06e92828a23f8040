use crate::models::ClientOut;
use crate::wizard::controller::WizardController;
use crate::wizard::definition::WizardDefinition;

/// 行政相对人选择器的临时状态（搜索框与弹窗），不写入表单
#[derive(Debug, Clone, Default)]
pub struct ClientPicker {
    query: String,
    modal_open: bool,
}

impl ClientPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn open(&mut self) {
        self.modal_open = true;
    }

    pub fn close(&mut self) {
        self.modal_open = false;
    }

    pub fn is_open(&self) -> bool {
        self.modal_open
    }

    /// 按名称或证件号过滤（忽略大小写），空查询返回全部
    pub fn filter<'a>(&self, clients: &'a [ClientOut]) -> Vec<&'a ClientOut> {
        let needle = self.query.trim().to_lowercase();
        clients
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.display_name().to_lowercase().contains(&needle)
                    || c.numero_documento.contains(&needle)
            })
            .collect()
    }

    /// 选中后写入表单并关闭弹窗
    pub fn select<W: WizardDefinition>(
        &mut self,
        controller: &mut WizardController<W>,
        field: W::Field,
        client: &ClientOut,
    ) {
        controller.on_input_change(field, client.to_ref());
        self.modal_open = false;
        self.query.clear();
    }
}
