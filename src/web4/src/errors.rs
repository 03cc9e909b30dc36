#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Web4Error {
    #[error("Invalid parameter '{0}': expected KEY=VALUE")]
    InvalidParam(String),

    #[error("Unsupported snippet flavor: {0}. Supported flavors are: js, curl")]
    UnsupportedSnippet(String),
}
