use std::io;

use serde_json::Value;

use super::format::{key_value_rows, text};

pub fn render_session(command: &str, data: &Value) -> io::Result<String> {
    let signed_in = data.get("signed_in").and_then(Value::as_bool) == Some(true);
    if !signed_in {
        let message = if command == "auth logout" {
            "Signed out."
        } else {
            "Not signed in. Run `fintrack auth login <user-id>` to start a session."
        };
        return Ok(message.to_string());
    }

    let heading = if command == "auth login" {
        format!("Signed in as {}.", text(data, "user_id"))
    } else {
        format!("Session active for {}.", text(data, "user_id"))
    };
    let mut entries = Vec::new();
    let email = text(data, "email");
    if !email.is_empty() {
        entries.push(("Email", email));
    }
    entries.push(("Started", text(data, "started_at")));
    let last_active = text(data, "last_active_at");
    if !last_active.is_empty() {
        entries.push(("Last active", last_active));
    }

    let mut lines = vec![heading, String::new()];
    lines.extend(key_value_rows(&entries, 2));
    Ok(lines.join("\n"))
}

pub fn render_skipped(command: &str, data: &Value) -> String {
    [
        format!("Skipped `fintrack {command}`: {}", text(data, "message")),
        String::new(),
        "What to do next:".to_string(),
        "  1. Run `fintrack auth login <user-id>` and retry.".to_string(),
    ]
    .join("\n")
}
