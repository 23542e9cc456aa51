use crate::cli::{
    AuthCommand, BudgetCommand, Commands, DebtCommand, ExpenseCommand, IncomeCommand,
    ReminderCommand,
};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Auth { command } => match command {
            AuthCommand::Login { json, .. }
            | AuthCommand::Logout { json }
            | AuthCommand::Status { json } => *json,
        },
        Commands::Expense { command } => match command {
            ExpenseCommand::Add { json, .. }
            | ExpenseCommand::List { json, .. }
            | ExpenseCommand::Remove { json, .. } => *json,
        },
        Commands::Income { command } => match command {
            IncomeCommand::Add { json, .. }
            | IncomeCommand::List { json, .. }
            | IncomeCommand::Remove { json, .. } => *json,
        },
        Commands::Debt { command } => match command {
            DebtCommand::Add { json, .. } | DebtCommand::List { json } => *json,
        },
        Commands::Budget { command } => match command {
            BudgetCommand::Create { json, .. } | BudgetCommand::List { json, .. } => *json,
        },
        Commands::Reminder { command } => match command {
            ReminderCommand::Set { json, .. } | ReminderCommand::List { json } => *json,
        },
        Commands::Dashboard { json, .. } | Commands::Report { json, .. } => *json,
    };
    OutputMode::from_flag(json)
}
