mod error_text;
mod format;
mod json;
mod mode;
mod records_text;
mod report_text;
mod session_text;

use std::io::{self, Write};

use fintrack_client::{ClientError, SuccessEnvelope};

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

pub fn print_text(text: &str) -> io::Result<()> {
    write_stdout_line(text.trim_end())
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    if success.is_skipped() {
        return Ok(session_text::render_skipped(&success.command, &success.data));
    }

    let data = &success.data;
    match success.command.as_str() {
        "auth login" | "auth logout" | "auth status" => {
            session_text::render_session(&success.command, data)
        }
        "dashboard" => report_text::render_dashboard(data),
        "report" => report_text::render_report(data),
        "expense add" | "income add" => records_text::render_saved_transaction(data),
        "expense list" | "income list" => records_text::render_transaction_list(data),
        "expense remove" | "income remove" => records_text::render_removed(data),
        "debt add" => records_text::render_saved_debt(data),
        "debt list" => records_text::render_debt_list(data),
        "budget create" => records_text::render_saved_budget(data),
        "budget list" => records_text::render_budget_list(data),
        "reminder set" => records_text::render_saved_reminder(data),
        "reminder list" => records_text::render_reminder_list(data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}

/// A closed pipe (`fintrack report | head`) is not an error.
fn write_stdout_line(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    let written = stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.write_all(b"\n"))
        .and_then(|()| stdout.flush());
    match written {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
