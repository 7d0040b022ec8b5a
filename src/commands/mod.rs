//! CLI command implementations.

pub mod item;
pub mod search;

pub use item::ItemCommand;
pub use search::{SearchCommand, SearchError};

/// Rendered command output and the error it reports, if any.
///
/// The text is printed either way, so a failed request still produces
/// well-formed output before the process exits non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub error: Option<String>,
}

impl CommandOutput {
    /// Converts the reported error into a process-level failure.
    pub fn into_result(self) -> anyhow::Result<()> {
        match self.error {
            Some(error) => Err(anyhow::anyhow!(error)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result() {
        let ok = CommandOutput { text: "[]".to_string(), error: None };
        assert!(ok.into_result().is_ok());

        let failed = CommandOutput { text: "Error: 500".to_string(), error: Some("500".to_string()) };
        assert_eq!(failed.into_result().unwrap_err().to_string(), "500");
    }
}
