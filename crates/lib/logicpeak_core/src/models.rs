//! Record kinds captured by the service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{FieldValidator, Validate, ValidationErrors};
use crate::store::Record;

/// Default value of [`Lead::source`].
pub const DEFAULT_LEAD_SOURCE: &str = "contact";

/// Inquiry captured from the contact form or the chat widget.
///
/// `source` is informally one of `contact`, `chat` or `other`; any text is
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: String,
    pub source: String,
}

impl Validate for Lead {
    fn validate(value: &Value) -> Result<Self, ValidationErrors> {
        let mut v = FieldValidator::new(value);
        let name = v.optional_text("name");
        let email = v.optional_email("email");
        let message = v.required_text("message");
        let source = v.text_or_default("source", DEFAULT_LEAD_SOURCE);
        v.finish()?;

        Ok(Self {
            name,
            email,
            message,
            source,
        })
    }
}

impl Record for Lead {
    const COLLECTION: &'static str = "lead";
}

/// One user turn captured by the chat assistant widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Opaque client-generated session identifier.
    pub session_id: String,
    pub text: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Validate for ChatMessage {
    fn validate(value: &Value) -> Result<Self, ValidationErrors> {
        let mut v = FieldValidator::new(value);
        let session_id = v.required_text("session_id");
        let text = v.required_text("text");
        let name = v.optional_text("name");
        let email = v.optional_email("email");
        v.finish()?;

        Ok(Self {
            session_id,
            text,
            name,
            email,
        })
    }
}

impl Record for ChatMessage {
    const COLLECTION: &'static str = "chatmessage";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldErrorKind;
    use serde_json::json;

    #[test]
    fn lead_applies_default_source() {
        let lead = Lead::validate(&json!({ "message": "Need a quote" })).unwrap();
        assert_eq!(
            lead,
            Lead {
                name: None,
                email: None,
                message: "Need a quote".into(),
                source: "contact".into(),
            }
        );
    }

    #[test]
    fn lead_keeps_free_form_source() {
        let lead =
            Lead::validate(&json!({ "message": "hi", "source": "newsletter" })).unwrap();
        assert_eq!(lead.source, "newsletter");
    }

    #[test]
    fn lead_requires_message() {
        let err = Lead::validate(&json!({ "name": "Ada", "email": "ada@example.com" }))
            .unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert_eq!(err.errors()[0].field, "message");
        assert_eq!(err.errors()[0].kind, FieldErrorKind::Missing);
    }

    #[test]
    fn lead_rejects_malformed_email() {
        let err = Lead::validate(&json!({ "message": "hi", "email": "not-an-email" }))
            .unwrap_err();
        assert!(err.has_field("email"));
    }

    #[test]
    fn lead_ignores_unknown_fields() {
        let lead = Lead::validate(&json!({ "message": "hi", "utm": "ads" })).unwrap();
        assert_eq!(lead.message, "hi");
    }

    #[test]
    fn lead_serializes_absent_fields_as_null() {
        let lead = Lead::validate(&json!({ "message": "hi" })).unwrap();
        let value = serde_json::to_value(&lead).unwrap();
        assert_eq!(
            value,
            json!({ "name": null, "email": null, "message": "hi", "source": "contact" })
        );
    }

    #[test]
    fn chat_message_requires_session_and_text() {
        let err = ChatMessage::validate(&json!({ "name": "Ada" })).unwrap_err();
        assert!(err.has_field("session_id"));
        assert!(err.has_field("text"));
    }

    #[test]
    fn chat_message_accepts_minimal_payload() {
        let msg = ChatMessage::validate(&json!({ "session_id": "s-1", "text": "Hello" }))
            .unwrap();
        assert_eq!(msg.session_id, "s-1");
        assert_eq!(msg.text, "Hello");
        assert_eq!(msg.name, None);
        assert_eq!(msg.email, None);
    }

    #[test]
    fn collections_are_distinct() {
        assert_ne!(Lead::COLLECTION, ChatMessage::COLLECTION);
    }
}
