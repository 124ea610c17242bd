use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

/// One line for the status bar.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(err: &dyn std::error::Error) -> Self {
        Self {
            text: format!("⚠️ {err}"),
            severity: Severity::Error,
        }
    }

    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn error_messages_carry_warning_prefix() {
        let err = ConfigError::UnknownDifficulty("insane".to_string());
        let msg = StatusMessage::error(&err);
        assert_eq!(msg.severity, Severity::Error);
        assert_eq!(msg.text, "⚠️ Unknown difficulty: insane");
        assert_eq!(msg.severity.css_class(), "error");
    }

    #[test]
    fn cleared_message_is_empty_info() {
        let msg = StatusMessage::cleared();
        assert!(msg.is_empty());
        assert_eq!(msg.severity, Severity::Info);
    }
}
