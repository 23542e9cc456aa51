use fintrack_client::ClientError;
use serde_json::Value;

pub fn render_error(error: &ClientError) -> String {
    let opener = if error.is_internal() {
        "Something went wrong on our side."
    } else {
        "Something went wrong, but it's easy to fix."
    };
    let mut lines = vec![
        opener.to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    let issues = error
        .data
        .as_ref()
        .and_then(|data| data.get("issues"))
        .and_then(Value::as_array);
    if let Some(issues) = issues.filter(|issues| !issues.is_empty()) {
        lines.push(String::new());
        lines.push("Fields:".to_string());
        for issue in issues {
            let field = issue.get("field").and_then(Value::as_str).unwrap_or("?");
            let description = issue
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("");
            lines.push(format!("  - {field}: {description}"));
        }
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}
