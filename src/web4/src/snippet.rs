//! Illustrative code snippets shown next to a generated URL.

use std::fmt;

use crate::{
    GatewayRequest, SignRequest, ViewCallRequest, endpoints::absolute, errors::Web4Error,
};

/// Shown before any form has been submitted.
pub const NO_FORM_DATA: &str = "// No form data available";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnippetFlavor {
    #[default]
    JavaScript,
    Curl,
}

impl SnippetFlavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JavaScript => "js",
            Self::Curl => "curl",
        }
    }
}

impl fmt::Display for SnippetFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SnippetFlavor {
    type Err = Web4Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "js" | "javascript" => Ok(Self::JavaScript),
            "curl" | "sh" => Ok(Self::Curl),
            _ => Err(Web4Error::UnsupportedSnippet(s.to_string())),
        }
    }
}

/// Snippet for a view call. The JavaScript flavour fetches the relative
/// path, as a page served by the gateway would; curl needs the absolute URL.
pub fn view_snippet(request: &ViewCallRequest, flavor: SnippetFlavor, gateway_url: &str) -> String {
    let encoded = request.encode();
    let params = encoded.params_pretty();
    match flavor {
        SnippetFlavor::JavaScript => format!(
            "// View Method Call\n\
             const response = await fetch(\"{url}\");\n\
             const result = await response.json();\n\
             \n\
             // Full parameters for reference:\n\
             const params = {params};\n\
             \n\
             // Contract: {contract}\n\
             // Method: {method}\n",
            url = encoded.path,
            contract = request.contract_id,
            method = request.method_name,
        ),
        SnippetFlavor::Curl => format!(
            "# View Method Call\n\
             curl '{url}'\n\
             \n\
             # Full parameters for reference:\n\
             {params}\n\
             \n\
             # Contract: {contract}\n\
             # Method: {method}\n",
            url = absolute(gateway_url, &encoded.path),
            params = shell_comment(&params),
            contract = request.contract_id,
            method = request.method_name,
        ),
    }
}

/// Snippet for a sign redirect.
pub fn sign_snippet(request: &SignRequest, flavor: SnippetFlavor, gateway_url: &str) -> String {
    let encoded = request.encode();
    let params = encoded.params_pretty();
    match flavor {
        SnippetFlavor::JavaScript => format!(
            "// Sign Transaction\n\
             window.location.href = \"{url}\";\n\
             \n\
             // Full parameters for reference:\n\
             const params = {params};\n\
             \n\
             // Note: This will redirect to the signing page\n",
            url = encoded.path,
        ),
        SnippetFlavor::Curl => format!(
            "# Sign Transaction\n\
             curl -I '{url}'\n\
             \n\
             # Full parameters for reference:\n\
             {params}\n\
             \n\
             # Note: This will redirect to the signing page\n",
            url = absolute(gateway_url, &encoded.path),
            params = shell_comment(&params),
        ),
    }
}

fn shell_comment(text: &str) -> String {
    text.lines()
        .map(|line| format!("# {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
