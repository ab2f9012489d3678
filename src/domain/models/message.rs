use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Severity declared by a message
///
/// The four named severities select an emission path on the engine.
/// Any other raw code is carried as `Unmapped` and is dropped by the
/// adapter without error.
///
/// # Examples
///
/// ```
/// use logbridge::domain::models::MessageSeverity;
///
/// assert_eq!(MessageSeverity::from(2), MessageSeverity::Warning);
/// assert_eq!(MessageSeverity::from(9999), MessageSeverity::Unmapped(9999));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SeverityRepr", into = "SeverityRepr")]
pub enum MessageSeverity {
    /// Diagnostic detail for development
    Debug,
    /// Normal operational events
    Informational,
    /// Potentially problematic situations
    Warning,
    /// Failure conditions
    Error,
    /// A raw severity code with no emission path
    Unmapped(i32),
}

impl MessageSeverity {
    /// Raw numeric code of this severity
    pub const fn code(self) -> i32 {
        match self {
            Self::Debug => 0,
            Self::Informational => 1,
            Self::Warning => 2,
            Self::Error => 3,
            Self::Unmapped(code) => code,
        }
    }

    /// Returns true when the severity has an emission path
    pub const fn is_mapped(self) -> bool {
        !matches!(self, Self::Unmapped(_))
    }
}

impl From<i32> for MessageSeverity {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::Debug,
            1 => Self::Informational,
            2 => Self::Warning,
            3 => Self::Error,
            other => Self::Unmapped(other),
        }
    }
}

impl fmt::Display for MessageSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => f.write_str("debug"),
            Self::Informational => f.write_str("informational"),
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
            Self::Unmapped(code) => write!(f, "unmapped({code})"),
        }
    }
}

/// Wire form: a lowercase name for known severities, the raw code otherwise
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SeverityRepr {
    Name(String),
    Code(i32),
}

impl TryFrom<SeverityRepr> for MessageSeverity {
    type Error = String;

    fn try_from(repr: SeverityRepr) -> Result<Self, String> {
        match repr {
            SeverityRepr::Code(code) => Ok(Self::from(code)),
            SeverityRepr::Name(name) => match name.to_lowercase().as_str() {
                "debug" => Ok(Self::Debug),
                "info" | "informational" => Ok(Self::Informational),
                "warn" | "warning" => Ok(Self::Warning),
                "error" => Ok(Self::Error),
                _ => Err(format!("unknown message severity: {name}")),
            },
        }
    }
}

impl From<MessageSeverity> for SeverityRepr {
    fn from(severity: MessageSeverity) -> Self {
        match severity {
            MessageSeverity::Unmapped(code) => Self::Code(code),
            known => Self::Name(known.to_string()),
        }
    }
}

/// A severity-tagged log message
///
/// `format` is a composite format template whose placeholders refer to
/// `values` by position (`"retrying {0} of {1}"`). Interpreting the
/// template is the engine's job; adapters pass both through untouched.
pub trait Message: Send + Sync {
    /// Declared severity of the message
    fn severity(&self) -> MessageSeverity;

    /// Composite format template
    fn format(&self) -> &str;

    /// Positional substitution values
    fn values(&self) -> &[Value];
}

/// Owned [`Message`] implementation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMessage {
    /// Declared severity
    pub severity: MessageSeverity,

    /// Composite format template
    pub format: String,

    /// Positional substitution values
    #[serde(default)]
    pub values: Vec<Value>,
}

impl LogMessage {
    /// Create a message with no substitution values
    pub fn new(severity: MessageSeverity, format: impl Into<String>) -> Self {
        Self {
            severity,
            format: format.into(),
            values: Vec::new(),
        }
    }

    /// Create a debug message
    pub fn debug(format: impl Into<String>) -> Self {
        Self::new(MessageSeverity::Debug, format)
    }

    /// Create an informational message
    pub fn info(format: impl Into<String>) -> Self {
        Self::new(MessageSeverity::Informational, format)
    }

    /// Create a warning message
    pub fn warning(format: impl Into<String>) -> Self {
        Self::new(MessageSeverity::Warning, format)
    }

    /// Create an error message
    pub fn error(format: impl Into<String>) -> Self {
        Self::new(MessageSeverity::Error, format)
    }

    /// Append one positional value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Append several positional values in order
    #[must_use]
    pub fn with_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.values.extend(values.into_iter().map(Into::into));
        self
    }
}

impl Message for LogMessage {
    fn severity(&self) -> MessageSeverity {
        self.severity
    }

    fn format(&self) -> &str {
        &self.format
    }

    fn values(&self) -> &[Value] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_severity_codes_round_trip() {
        for severity in [
            MessageSeverity::Debug,
            MessageSeverity::Informational,
            MessageSeverity::Warning,
            MessageSeverity::Error,
        ] {
            assert_eq!(MessageSeverity::from(severity.code()), severity);
            assert!(severity.is_mapped());
        }
    }

    #[test]
    fn test_unknown_code_is_unmapped() {
        let severity = MessageSeverity::from(9999);
        assert_eq!(severity, MessageSeverity::Unmapped(9999));
        assert_eq!(severity.code(), 9999);
        assert!(!severity.is_mapped());
    }

    #[test]
    fn test_severity_serde_names_and_codes() {
        assert_eq!(
            serde_json::to_value(MessageSeverity::Warning).unwrap(),
            json!("warning")
        );
        assert_eq!(
            serde_json::to_value(MessageSeverity::Unmapped(42)).unwrap(),
            json!(42)
        );

        let parsed: MessageSeverity = serde_json::from_value(json!("WARN")).unwrap();
        assert_eq!(parsed, MessageSeverity::Warning);
        let parsed: MessageSeverity = serde_json::from_value(json!("info")).unwrap();
        assert_eq!(parsed, MessageSeverity::Informational);
        let parsed: MessageSeverity = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(parsed, MessageSeverity::Error);

        assert!(serde_json::from_value::<MessageSeverity>(json!("fatal")).is_err());
    }

    #[test]
    fn test_severity_from_wire_repr() {
        assert_eq!(
            MessageSeverity::try_from(SeverityRepr::Name("Error".to_string())),
            Ok(MessageSeverity::Error)
        );
        assert_eq!(
            MessageSeverity::try_from(SeverityRepr::Code(7)),
            Ok(MessageSeverity::Unmapped(7))
        );
        assert_eq!(
            MessageSeverity::try_from(SeverityRepr::Name("fatal".to_string())),
            Err("unknown message severity: fatal".to_string())
        );
    }

    #[test]
    fn test_log_message_builder() {
        let message = LogMessage::warning("retrying {0} of {1}")
            .with_value(1)
            .with_value(3);

        assert_eq!(message.severity(), MessageSeverity::Warning);
        assert_eq!(message.format(), "retrying {0} of {1}");
        assert_eq!(message.values(), &[json!(1), json!(3)]);
    }

    #[test]
    fn test_log_message_with_values_keeps_order() {
        let message = LogMessage::info("{0} {1} {2}").with_values(["a", "b", "c"]);
        assert_eq!(message.values(), &[json!("a"), json!("b"), json!("c")]);
    }

    #[test]
    fn test_log_message_deserializes_without_values() {
        let message: LogMessage =
            serde_json::from_value(json!({ "severity": "debug", "format": "ping" })).unwrap();
        assert_eq!(message, LogMessage::debug("ping"));
    }
}
