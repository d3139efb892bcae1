//! History trimming for prompt assembly

use crate::agents::domain::{Message, Role};

/// Keep only the last `window_size` messages, always preserving a leading
/// system message if present.
pub fn sliding_window(messages: &[Message], window_size: usize) -> Vec<Message> {
    if messages.is_empty() {
        return Vec::new();
    }

    let mut result = Vec::new();

    let start_idx = if matches!(messages[0].role, Role::System) {
        result.push(messages[0].clone());
        1
    } else {
        0
    };

    let remaining = &messages[start_idx..];
    let take_from = remaining.len().saturating_sub(window_size);
    result.extend(remaining[take_from..].iter().cloned());

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_msg(role: Role, content: &str) -> Message {
        Message {
            role,
            content: content.to_string(),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    #[test]
    fn test_sliding_window_basic() {
        let messages = vec![
            make_msg(Role::User, "1"),
            make_msg(Role::Assistant, "2"),
            make_msg(Role::User, "3"),
            make_msg(Role::Assistant, "4"),
            make_msg(Role::User, "5"),
        ];

        let result = sliding_window(&messages, 3);
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].content, "3");
        assert_eq!(result[2].content, "5");
    }

    #[test]
    fn test_sliding_window_preserves_system() {
        let messages = vec![
            make_msg(Role::System, "system"),
            make_msg(Role::User, "1"),
            make_msg(Role::Assistant, "2"),
            make_msg(Role::User, "3"),
            make_msg(Role::Assistant, "4"),
        ];

        let result = sliding_window(&messages, 2);
        assert_eq!(result.len(), 3); // system + 2
        assert_eq!(result[0].role, Role::System);
        assert_eq!(result[1].content, "3");
        assert_eq!(result[2].content, "4");
    }

    #[test]
    fn test_sliding_window_shorter_than_window() {
        let messages = vec![make_msg(Role::User, "only")];
        let result = sliding_window(&messages, 10);
        assert_eq!(result.len(), 1);
    }
}
