use serde::{Deserialize, Serialize};

use crate::{GatewayRequest, endpoints::SIGN_PATH};

/// Fields of a sign request, in the order they are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignField {
    ContractId,
    MethodName,
    Args,
    Gas,
    Deposit,
    CallbackUrl,
}

impl SignField {
    pub const ALL: [SignField; 6] = [
        Self::ContractId,
        Self::MethodName,
        Self::Args,
        Self::Gas,
        Self::Deposit,
        Self::CallbackUrl,
    ];

    /// Query parameter name understood by `/web4/sign`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContractId => "web4_contract_id",
            Self::MethodName => "web4_method_name",
            Self::Args => "web4_args",
            Self::Gas => "web4_gas",
            Self::Deposit => "web4_deposit",
            Self::CallbackUrl => "web4_callback_url",
        }
    }

    /// Input placeholder: the parameter name without `web4_`, underscores as spaces
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::ContractId => "contract id",
            Self::MethodName => "method name",
            Self::Args => "args",
            Self::Gas => "gas",
            Self::Deposit => "deposit",
            Self::CallbackUrl => "callback url",
        }
    }
}

/// Redirect to the gateway signing page. Empty fields are left out of the
/// URL entirely.
///
/// Deserializes from both the short names (`contract_id`) and the wire
/// names (`web4_contract_id`), so the same type reads a JSON body or the
/// query string of a `/sign` link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignRequest {
    #[serde(alias = "web4_contract_id")]
    pub contract_id: Option<String>,
    #[serde(alias = "web4_method_name")]
    pub method_name: Option<String>,
    #[serde(alias = "web4_args", alias = "args")]
    pub args_json: Option<String>,
    #[serde(alias = "web4_gas")]
    pub gas: Option<String>,
    #[serde(alias = "web4_deposit")]
    pub deposit: Option<String>,
    #[serde(alias = "web4_callback_url")]
    pub callback_url: Option<String>,
}

impl SignRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: SignField) -> Option<&str> {
        self.slot(field).as_deref().filter(|value| !value.is_empty())
    }

    pub fn set(&mut self, field: SignField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    pub fn with(mut self, field: SignField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    fn slot(&self, field: SignField) -> &Option<String> {
        match field {
            SignField::ContractId => &self.contract_id,
            SignField::MethodName => &self.method_name,
            SignField::Args => &self.args_json,
            SignField::Gas => &self.gas,
            SignField::Deposit => &self.deposit,
            SignField::CallbackUrl => &self.callback_url,
        }
    }

    fn slot_mut(&mut self, field: SignField) -> &mut Option<String> {
        match field {
            SignField::ContractId => &mut self.contract_id,
            SignField::MethodName => &mut self.method_name,
            SignField::Args => &mut self.args_json,
            SignField::Gas => &mut self.gas,
            SignField::Deposit => &mut self.deposit,
            SignField::CallbackUrl => &mut self.callback_url,
        }
    }
}

impl GatewayRequest for SignRequest {
    fn endpoint(&self) -> String {
        SIGN_PATH.to_string()
    }

    fn query_pairs(&self) -> Vec<(String, String)> {
        SignField::ALL
            .iter()
            .filter_map(|field| {
                self.get(*field)
                    .map(|value| (field.as_str().to_string(), value.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_query_keys;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_only_method_and_args() {
        let request = SignRequest::new()
            .with(SignField::ContractId, "")
            .with(SignField::Args, "{\"text\":\"hi\"}")
            .with(SignField::MethodName, "set_greeting")
            .with(SignField::Gas, "");
        let encoded = request.encode();

        assert_eq!(
            encoded.query,
            "web4_method_name=set_greeting&web4_args=%7B%22text%22%3A%22hi%22%7D"
        );
        assert_eq!(encoded.path, format!("/web4/sign?{}", encoded.query));
        assert_eq!(encoded.params.len(), 2);
    }

    #[test]
    fn test_fields_follow_declared_order() {
        let mut request = SignRequest::new();
        for field in SignField::ALL.iter().rev() {
            request.set(*field, format!("v-{}", field.placeholder()));
        }

        assert_query_keys(
            &request.query_string(),
            &[
                "web4_contract_id",
                "web4_method_name",
                "web4_args",
                "web4_gas",
                "web4_deposit",
                "web4_callback_url",
            ],
        );
        let keys: Vec<String> = request.display_params().keys().cloned().collect();
        assert_eq!(keys[0], "web4_contract_id");
        assert_eq!(keys[5], "web4_callback_url");
    }

    #[test]
    fn test_empty_request() {
        let request = SignRequest::new();
        assert_eq!(request.path(), "/web4/sign?");
        assert!(request.display_params().is_empty());
    }

    #[test]
    fn test_callback_url_is_escaped() {
        let request = SignRequest::new()
            .with(SignField::ContractId, "guest-book.near")
            .with(SignField::Deposit, "1000000000000000000000")
            .with(SignField::CallbackUrl, "https://example.com/done?x=1");
        assert_eq!(
            request.query_string(),
            "web4_contract_id=guest-book.near&web4_deposit=1000000000000000000000&web4_callback_url=https%3A%2F%2Fexample.com%2Fdone%3Fx%3D1"
        );
    }

    #[test]
    fn test_deserialize_accepts_wire_names() {
        let short: SignRequest = serde_json::from_value(json!({
            "contract_id": "a.near",
            "args_json": "{}"
        }))
        .unwrap();
        let wire: SignRequest = serde_json::from_value(json!({
            "web4_contract_id": "a.near",
            "web4_args": "{}"
        }))
        .unwrap();
        assert_eq!(short, wire);
        assert_eq!(short.get(SignField::Args), Some("{}"));
    }
}
