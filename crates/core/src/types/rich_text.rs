//! Rich-text content with an explicit trusted-for-render marking.
//!
//! Backend `content` fields arrive as raw HTML strings. Rendering layers
//! must only interpolate [`RichText::Trusted`] values without further
//! escaping; the catalog client performs the marking once, centrally, when
//! a product is normalized.

use serde::{Deserialize, Serialize};

/// Rich-text content, either as received off the wire or vetted for
/// rendering.
///
/// Deserializes from a plain wire string as [`RichText::Raw`]; serializes
/// back to the inner string either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RichText {
    /// As received from the backend; must be escaped before rendering.
    Raw(String),
    /// Vetted; may be inserted into rendered output without further
    /// escaping.
    Trusted(String),
}

impl RichText {
    /// Mark the content as trusted-for-render.
    ///
    /// Idempotent: trusting an already-trusted value is a no-op.
    #[must_use]
    pub fn trust(self) -> Self {
        match self {
            Self::Raw(s) | Self::Trusted(s) => Self::Trusted(s),
        }
    }

    /// Whether the content has been marked trusted-for-render.
    #[must_use]
    pub const fn is_trusted(&self) -> bool {
        matches!(self, Self::Trusted(_))
    }

    /// The underlying text, regardless of marking.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Raw(s) | Self::Trusted(s) => s,
        }
    }
}

impl From<String> for RichText {
    fn from(s: String) -> Self {
        Self::Raw(s)
    }
}

impl From<RichText> for String {
    fn from(text: RichText) -> Self {
        match text {
            RichText::Raw(s) | RichText::Trusted(s) => s,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_trust_marks_raw_content() {
        let text = RichText::Raw("<p>hi</p>".to_string());
        assert!(!text.is_trusted());

        let trusted = text.trust();
        assert!(trusted.is_trusted());
        assert_eq!(trusted.as_str(), "<p>hi</p>");
    }

    #[test]
    fn test_trust_is_idempotent() {
        let trusted = RichText::Raw("<p>hi</p>".to_string()).trust();
        let again = trusted.clone().trust();
        assert_eq!(again, trusted);
    }

    #[test]
    fn test_deserializes_as_raw() {
        let text: RichText = serde_json::from_str("\"<b>sale</b>\"").unwrap();
        assert_eq!(text, RichText::Raw("<b>sale</b>".to_string()));
    }

    #[test]
    fn test_serializes_to_inner_string() {
        let trusted = RichText::Trusted("<b>sale</b>".to_string());
        assert_eq!(serde_json::to_string(&trusted).unwrap(), "\"<b>sale</b>\"");

        let raw = RichText::Raw("<b>sale</b>".to_string());
        assert_eq!(serde_json::to_string(&raw).unwrap(), "\"<b>sale</b>\"");
    }
}
