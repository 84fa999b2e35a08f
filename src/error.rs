//! Structured error types for costbook.

/// All errors that can occur while loading, mutating or persisting a budget.
#[derive(Debug, thiserror::Error)]
pub enum CostbookError {
    /// JSON (de)serialization error from serde_json.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The key-value storage refused a read or write.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A value crossing the JS boundary could not be converted.
    #[error("JS interop: {0}")]
    Interop(String),

    /// The grid engine failed to mount or dispose.
    #[error("Grid engine: {0}")]
    Engine(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CostbookError>;

impl From<String> for CostbookError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for CostbookError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for CostbookError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        Self::Interop(e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<CostbookError> for wasm_bindgen::JsValue {
    fn from(e: CostbookError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_keep_their_message() {
        let err: CostbookError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("JSON: "));
    }

    #[test]
    fn strings_become_other() {
        let err = CostbookError::from("no project loaded");
        assert_eq!(err.to_string(), "no project loaded");
    }
}
