use fintrack_client::commands::auth::{self, LoginOptions};
use fintrack_client::commands::budgets::{self, BudgetCreateOptions, BudgetListOptions};
use fintrack_client::commands::dashboard::{self, DashboardOptions};
use fintrack_client::commands::debts::{self, DebtAddOptions};
use fintrack_client::commands::reminders::{self, ReminderSetOptions};
use fintrack_client::commands::report::{self, ReportOptions};
use fintrack_client::commands::transactions::{
    self, ExpenseAddOptions, IncomeAddOptions, ListOptions, RemoveOptions,
};
use fintrack_client::model::TransactionKind;
use fintrack_client::validate::{BudgetForm, DebtForm, ExpenseForm, IncomeForm, ReminderForm};
use fintrack_client::{ClientResult, SuccessEnvelope};

use crate::cli::{
    AuthCommand, BudgetCommand, Cli, Commands, DebtCommand, ExpenseCommand, IncomeCommand,
    PeriodArgs, ReminderCommand,
};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    let home = cli.home.as_deref();
    match &cli.command {
        Commands::Auth { command } => match command {
            AuthCommand::Login {
                user_id,
                email,
                name,
                username,
                ..
            } => auth::login(LoginOptions {
                user_id: user_id.clone(),
                email: email.clone(),
                full_name: name.clone(),
                username: username.clone(),
                home_override: home,
            }),
            AuthCommand::Logout { .. } => auth::logout(home),
            AuthCommand::Status { .. } => auth::status(home),
        },
        Commands::Dashboard { today, .. } => dashboard::run(DashboardOptions {
            today: *today,
            home_override: home,
        }),
        Commands::Expense { command } => match command {
            ExpenseCommand::Add {
                name,
                amount,
                category,
                method,
                date,
                ..
            } => transactions::add_expense(ExpenseAddOptions {
                form: ExpenseForm {
                    name: name.clone(),
                    amount: amount.clone(),
                    category: category.clone(),
                    payment_method: method.clone(),
                    date: date.clone(),
                },
                today: None,
                home_override: home,
            }),
            ExpenseCommand::List { period, .. } => {
                list_transactions(TransactionKind::Expense, period, home)
            }
            ExpenseCommand::Remove { id, .. } => {
                remove_transaction(TransactionKind::Expense, id, home)
            }
        },
        Commands::Income { command } => match command {
            IncomeCommand::Add {
                name,
                amount,
                income_type,
                frequency,
                date,
                ..
            } => transactions::add_income(IncomeAddOptions {
                form: IncomeForm {
                    name: name.clone(),
                    amount: amount.clone(),
                    income_type: income_type.clone(),
                    frequency: frequency.clone(),
                    date: date.clone(),
                },
                today: None,
                home_override: home,
            }),
            IncomeCommand::List { period, .. } => {
                list_transactions(TransactionKind::Income, period, home)
            }
            IncomeCommand::Remove { id, .. } => {
                remove_transaction(TransactionKind::Income, id, home)
            }
        },
        Commands::Debt { command } => match command {
            DebtCommand::Add {
                name,
                amount,
                debt_type,
                start_date,
                ..
            } => debts::add(DebtAddOptions {
                form: DebtForm {
                    name: name.clone(),
                    monthly_payment: amount.clone(),
                    debt_type: debt_type.clone(),
                    start_date: start_date.clone(),
                },
                today: None,
                home_override: home,
            }),
            DebtCommand::List { .. } => debts::list(home),
        },
        Commands::Budget { command } => match command {
            BudgetCommand::Create {
                name,
                amount,
                category,
                period,
                ..
            } => budgets::create(BudgetCreateOptions {
                form: BudgetForm {
                    name: name.clone(),
                    monthly_amount: amount.clone(),
                    category: category.clone(),
                },
                month: period.month,
                year: period.year,
                today: None,
                home_override: home,
            }),
            BudgetCommand::List { period, .. } => budgets::list(BudgetListOptions {
                month: period.month,
                year: period.year,
                today: None,
                home_override: home,
            }),
        },
        Commands::Reminder { command } => match command {
            ReminderCommand::Set {
                name,
                amount,
                due_date,
                days_before,
                ..
            } => reminders::set(ReminderSetOptions {
                form: ReminderForm {
                    name: name.clone(),
                    amount: amount.clone(),
                    due_date: due_date.clone(),
                    days_before: *days_before,
                },
                home_override: home,
            }),
            ReminderCommand::List { .. } => reminders::list(home),
        },
        Commands::Report {
            kind,
            category,
            period,
            ..
        } => report::run(ReportOptions {
            kind: *kind,
            category: Some(category.clone()),
            month: period.month,
            year: period.year,
            today: None,
            home_override: home,
        }),
    }
}

fn list_transactions(
    kind: TransactionKind,
    period: &PeriodArgs,
    home: Option<&std::path::Path>,
) -> ClientResult<SuccessEnvelope> {
    transactions::list(ListOptions {
        kind,
        month: period.month,
        year: period.year,
        today: None,
        home_override: home,
    })
}

fn remove_transaction(
    kind: TransactionKind,
    id: &str,
    home: Option<&std::path::Path>,
) -> ClientResult<SuccessEnvelope> {
    transactions::remove(RemoveOptions {
        kind,
        id: id.to_string(),
        home_override: home,
    })
}
