use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Success,
    Error,
}

/// A transient, dismissible message raised by a controller action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    /// Carries the backend's message verbatim behind an `Error: ` prefix.
    pub fn error(backend_message: &str) -> Self {
        Self {
            severity: Severity::Error,
            message: format!("Error: {backend_message}"),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
