//! Form state owned by the sandbox controller

use serde::{Deserialize, Serialize};
use web4::{ParamList, SignField, SignRequest, ViewCallRequest};

use crate::dispatcher::ViewOutput;

/// Which form is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Call View Method
    #[default]
    View,
    /// Sign Transaction
    Sign,
}

/// The view-call form: contract, method and editable parameter rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewForm {
    /// Contract account id
    pub contract_id: String,
    /// View method name
    pub method_name: String,
    params: ParamList,
}

impl Default for ViewForm {
    fn default() -> Self {
        Self {
            contract_id: String::new(),
            method_name: String::new(),
            params: [("", "")].into_iter().collect(),
        }
    }
}

impl ViewForm {
    /// Parameter rows, including the ones that will not be sent
    pub fn params(&self) -> &ParamList {
        &self.params
    }

    /// Append an empty row
    pub fn add_param(&mut self) {
        self.params.push("", "");
    }

    /// Drop the row at `index`; out-of-range indexes are ignored
    pub fn remove_param(&mut self, index: usize) {
        self.params.remove(index);
    }

    /// Edit the key of row `index`
    pub fn set_key(&mut self, index: usize, key: impl Into<String>) {
        if let Some(row) = self.params.get_mut(index) {
            row.0 = key.into();
        }
    }

    /// Edit the value of row `index`
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(row) = self.params.get_mut(index) {
            row.1 = value.into();
        }
    }

    /// Back to a blank form with one empty row
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Snapshot of the form as a request
    pub fn request(&self) -> ViewCallRequest {
        ViewCallRequest {
            contract_id: self.contract_id.clone(),
            method_name: self.method_name.clone(),
            params: self.params.clone(),
        }
    }
}

impl From<ViewCallRequest> for ViewForm {
    fn from(request: ViewCallRequest) -> Self {
        Self {
            contract_id: request.contract_id,
            method_name: request.method_name,
            params: request.params,
        }
    }
}

/// The sign form: one input per sign field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignForm {
    request: SignRequest,
}

impl SignForm {
    /// Edit one field
    pub fn set(&mut self, field: SignField, value: impl Into<String>) {
        self.request.set(field, value);
    }

    /// Current value of a field, if non-empty
    pub fn get(&self, field: SignField) -> Option<&str> {
        self.request.get(field)
    }

    /// Inputs in display order: field, placeholder, current value
    pub fn inputs(&self) -> impl Iterator<Item = (SignField, &'static str, &str)> {
        SignField::ALL
            .into_iter()
            .map(move |field| (field, field.placeholder(), self.get(field).unwrap_or_default()))
    }

    /// Clear every field
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The form as a request
    pub fn request(&self) -> &SignRequest {
        &self.request
    }
}

impl From<SignRequest> for SignForm {
    fn from(request: SignRequest) -> Self {
        Self { request }
    }
}

/// Everything the sandbox page shows, owned by one controller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SandboxState {
    /// Visible tab
    pub active_tab: Tab,
    /// View-call form
    pub view_form: ViewForm,
    /// Sign form
    pub sign_form: SignForm,
    /// Last URL generated by either form
    pub preview_url: Option<String>,
    /// Result of the last view call
    pub view_output: Option<ViewOutput>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use web4::GatewayRequest;

    #[test]
    fn test_view_form_starts_with_empty_row() {
        let form = ViewForm::default();
        assert_eq!(form.params().len(), 1);
        assert_eq!(form.params().get(0), Some(("", "")));
        assert_eq!(form.request().query_string(), "");
    }

    #[test]
    fn test_view_form_editing() {
        let mut form = ViewForm::default();
        form.contract_id = "my.near".to_string();
        form.method_name = "get".to_string();
        form.set_key(0, "greeting");
        form.set_value(0, "hello");
        form.add_param();
        form.set_key(1, "opts");
        form.set_value(1, "{\"x\":1}");
        form.add_param();
        form.set_key(7, "ignored");

        assert_eq!(form.params().len(), 3);
        assert_eq!(
            form.request().query_string(),
            "greeting=hello&opts.json=%7B%22x%22%3A1%7D"
        );

        form.remove_param(0);
        form.remove_param(42);
        assert_eq!(form.request().query_string(), "opts.json=%7B%22x%22%3A1%7D");

        form.reset();
        assert_eq!(form, ViewForm::default());
    }

    #[test]
    fn test_sign_form_inputs() {
        let mut form = SignForm::default();
        form.set(SignField::MethodName, "add_message");

        let inputs: Vec<_> = form.inputs().collect();
        assert_eq!(inputs.len(), 6);
        assert_eq!(inputs[0], (SignField::ContractId, "contract id", ""));
        assert_eq!(inputs[1], (SignField::MethodName, "method name", "add_message"));
        assert_eq!(inputs[5].1, "callback url");

        form.reset();
        assert_eq!(form.request(), &SignRequest::default());
    }
}
