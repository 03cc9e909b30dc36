use serde::{Deserialize, Serialize};

use crate::{
    GatewayRequest,
    endpoints::CONTRACT_PATH,
    params::{ParamList, encode_path_segment},
};

/// Read-only contract method call, sent as `GET /web4/contract/<id>/<method>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewCallRequest {
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub method_name: String,
    #[serde(default)]
    pub params: ParamList,
}

impl ViewCallRequest {
    pub fn new(contract_id: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            contract_id: contract_id.into(),
            method_name: method_name.into(),
            params: ParamList::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push(key, value);
        self
    }
}

impl GatewayRequest for ViewCallRequest {
    fn endpoint(&self) -> String {
        format!(
            "{CONTRACT_PATH}/{}/{}",
            encode_path_segment(&self.contract_id),
            encode_path_segment(&self.method_name)
        )
    }

    fn query_pairs(&self) -> Vec<(String, String)> {
        self.params.wire_pairs()
    }
}
