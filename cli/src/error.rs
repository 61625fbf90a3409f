use refiner_core::commands::CommandFailure;
use refiner_core::error::{AnalysisError, FailureKind};
use std::fmt;

/// Main error type for the refiner CLI
#[derive(Debug)]
pub enum CliError {
    /// Configuration-related errors
    Config(String),
    /// File I/O errors
    Io(std::io::Error),
    /// A failed analysis round or provider call
    Analysis(CommandFailure),
    /// Invalid command usage
    Command(String),
    /// Generic errors from anyhow
    Other(anyhow::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Analysis(failure) => f.write_str(&describe_failure(failure)),
            CliError::Command(msg) => write!(f, "Command error: {msg}"),
            CliError::Other(err) => write!(f, "Error: {err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(err) => Some(err),
            CliError::Analysis(failure) => Some(failure),
            CliError::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl CliError {
    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 2,
            CliError::Io(_) => 3,
            CliError::Analysis(_) => 4,
            CliError::Command(_) => 5,
            CliError::Other(_) => 1,
        }
    }
}

/// Human-readable phrasing for a failure, with a hint on what to do next
pub fn describe_failure(failure: &CommandFailure) -> String {
    let hint = match failure.kind {
        FailureKind::Auth | FailureKind::MissingCredentials => {
            Some("Set a valid key with `refiner config set-key <KEY>`.")
        }
        FailureKind::RateLimit => Some("Please wait a moment and try again."),
        FailureKind::Server | FailureKind::Network => Some("This is usually temporary; try again."),
        FailureKind::UnsupportedBackend => {
            Some("Switch provider with `refiner config set-provider anthropic`.")
        }
        FailureKind::EmptyResponse => Some("Please try again."),
        _ => None,
    };

    let status = failure
        .status
        .map(|s| format!(" (HTTP {})", s))
        .unwrap_or_default();

    match hint {
        Some(hint) => format!("{}{}\n{}", failure.message, status, hint),
        None => format!("{}{}", failure.message, status),
    }
}

impl From<CommandFailure> for CliError {
    fn from(failure: CommandFailure) -> Self {
        CliError::Analysis(failure)
    }
}

impl From<AnalysisError> for CliError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Config(msg) => CliError::Config(msg),
            other => CliError::Analysis(other.into()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Other(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(kind: FailureKind, message: &str, status: Option<u16>) -> CommandFailure {
        CommandFailure {
            kind,
            message: message.to_string(),
            status,
        }
    }

    #[test]
    fn test_rate_limit_phrasing() {
        let text = describe_failure(&failure(
            FailureKind::RateLimit,
            "Anthropic API error: Rate limit exceeded",
            Some(429),
        ));
        assert_eq!(
            text,
            "Anthropic API error: Rate limit exceeded (HTTP 429)\nPlease wait a moment and try again."
        );
    }

    #[test]
    fn test_invalid_json_has_no_hint() {
        let text = describe_failure(&failure(
            FailureKind::InvalidJson,
            "Received invalid JSON from AI. Please try again.",
            None,
        ));
        assert_eq!(text, "Received invalid JSON from AI. Please try again.");
    }

    #[test]
    fn test_local_credential_failure_has_no_http_status() {
        let err = AnalysisError::from(refiner_llm_sdk::error::LlmError::authentication(
            "Anthropic API error: API key cannot be empty",
        ));
        let text = describe_failure(&CommandFailure::from(err));
        assert!(!text.contains("HTTP"), "{text}");
        assert!(text.starts_with("Anthropic API error: API key cannot be empty\n"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Config("x".into()).exit_code(), 2);
        assert_eq!(
            CliError::from(AnalysisError::MissingCredentials).exit_code(),
            4
        );
        assert_eq!(
            CliError::from(AnalysisError::Config("bad key".into())).exit_code(),
            2
        );
    }
}
