mod cli;
mod dispatch;
mod output;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use fintrack_client::ClientError;
use fintrack_client::commands::auth::start_lifecycle;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "FINTRACK_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

const ROOT_HELP: &str = "fintrack - personal finance tracker

Usage:
  fintrack <command>

Start here:
  fintrack auth login <user-id>
  fintrack dashboard
  fintrack --help
";

const TOP_LEVEL_HELP: &str = "fintrack - personal finance tracker

USAGE: fintrack [--home <DIR>] <command>

Sign in first:
  fintrack auth login <user-id> --name \"Full Name\"      Start a session for a user your identity provider vouched for
  fintrack auth status                                   Show the active session
  fintrack auth logout                                   End the session

Every day:
  fintrack dashboard                                     Greeting, shortcuts, and any payment reminder due
  fintrack expense add --name N --amount A               Record an expense (category, method, date optional)
  fintrack income add --name N --amount A                Record income (type, frequency, date optional)
  fintrack report [--category TAG]                       Daily chart and budget check for this month

Planning:
  fintrack budget create --name N --amount A             Monthly limit for a category or `general`
  fintrack debt add --name N --amount A                  Track a monthly debt payment
  fintrack reminder set --name N --amount A --due-date D Alert ahead of a payment

Lists:
  fintrack expense list | income list | budget list | debt list | reminder list

Add --json to any command for machine-readable output.
Data lives in ~/.fintrack unless FINTRACK_HOME or --home says otherwise.
Set FINTRACK_LOG=debug to trace store calls on stderr.
";

/// Global flags that consume the following word.
const VALUE_FLAGS: [&str; 1] = ["--home"];

const GROUP_COMMANDS: [&str; 6] = ["auth", "expense", "income", "debt", "budget", "reminder"];

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if output::print_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => return help_exit(report_parse_error(&err, &raw_args)),
    };
    let mode = output::mode_for_command(&cli.command);

    match start_lifecycle(cli.home.as_deref()) {
        Ok(lifecycle) => {
            debug!(signed_in = lifecycle.session().is_some(), "session lifecycle started");
        }
        Err(error) => {
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(exit_code_for_error(&error));
        }
    }

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

/// Help and version requests surface from clap as errors; they are printed
/// and exit successfully.
enum ParseOutcome {
    Help,
    Failed(ExitCode),
}

fn help_exit(outcome: ParseOutcome) -> Result<ExitCode, ExitCode> {
    match outcome {
        ParseOutcome::Help => Ok(ExitCode::SUCCESS),
        ParseOutcome::Failed(code) => Err(code),
    }
}

fn report_parse_error(err: &clap::Error, raw_args: &[String]) -> ParseOutcome {
    if matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    ) {
        let text = if is_top_level_help_request(raw_args) {
            TOP_LEVEL_HELP.to_string()
        } else {
            err.to_string()
        };
        if output::print_text(&text).is_err() {
            return ParseOutcome::Failed(ExitCode::from(2));
        }
        return ParseOutcome::Help;
    }

    let command_hint = command_path_from_args(raw_args);
    let clean_message = strip_clap_boilerplate(&err.to_string());
    let parse_error =
        ClientError::invalid_argument_for_command(&clean_message, command_hint.as_deref());
    if output::print_failure(&parse_error, infer_requested_output_mode(raw_args)).is_err() {
        return ParseOutcome::Failed(ExitCode::from(2));
    }
    ParseOutcome::Failed(ExitCode::from(1))
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Drops clap's trailing usage block so the recovery steps are the only
/// guidance printed.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

/// `expense add --name x` -> `expense add`; `report --kind y` -> `report`.
fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let mut words = Vec::new();
    let mut args = raw_args.iter().skip(1).map(String::as_str);
    while let Some(arg) = args.next() {
        if VALUE_FLAGS.contains(&arg) {
            args.next();
        } else if !arg.starts_with('-') {
            words.push(arg);
        }
    }
    let mut words = words.into_iter();
    let first = words.next()?;

    if GROUP_COMMANDS.contains(&first) {
        return match words.next() {
            Some(action) if action.chars().all(|c| c.is_ascii_lowercase()) => {
                Some(format!("{first} {action}"))
            }
            _ => Some(first.to_string()),
        };
    }
    matches!(first, "dashboard" | "report").then(|| first.to_string())
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if error.is_internal() {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}
