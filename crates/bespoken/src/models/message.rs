use super::role::Role;
use chrono::Utc;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
/// A single turn in a conversation, as sent to or received from the backend
pub struct Message {
    pub role: Role,
    pub created: i64,
    pub content: String,
}

impl Message {
    /// Create a new user message with the current timestamp
    pub fn user<S: Into<String>>(content: S) -> Self {
        Message {
            role: Role::User,
            created: Utc::now().timestamp(),
            content: content.into(),
        }
    }

    /// Create a new assistant message with the current timestamp
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Message {
            role: Role::Assistant,
            created: Utc::now().timestamp(),
            content: content.into(),
        }
    }

    /// Render the message the way it appears inside a composed backend prompt
    pub fn render(&self) -> String {
        format!("{}: {}", self.role.label(), self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_uses_upper_case_role() {
        assert_eq!(Message::user("hi").render(), "USER: hi");
        assert_eq!(Message::assistant("hello").render(), "ASSISTANT: hello");
    }

    #[test]
    fn test_serialization_uses_lowercase_role() {
        let message = Message::assistant("done");
        let value: serde_json::Value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], "assistant");
        assert_eq!(value["content"], "done");
    }
}
