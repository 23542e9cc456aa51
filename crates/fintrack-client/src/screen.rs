use crate::contracts::types::ScreenCard;

/// Actions offered on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    AddExpense,
    AddIncome,
    AddDebt,
    CreateBudget,
    ViewReports,
    SetReminders,
}

impl Screen {
    pub const ALL: [Self; 6] = [
        Self::AddExpense,
        Self::AddIncome,
        Self::AddDebt,
        Self::CreateBudget,
        Self::ViewReports,
        Self::SetReminders,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddExpense => "add_expense",
            Self::AddIncome => "add_income",
            Self::AddDebt => "add_debt",
            Self::CreateBudget => "create_budget",
            Self::ViewReports => "view_reports",
            Self::SetReminders => "set_reminders",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::AddExpense => "Add expenses",
            Self::AddIncome => "Add income",
            Self::AddDebt => "Add debts/loans",
            Self::CreateBudget => "Create budget",
            Self::ViewReports => "View reports",
            Self::SetReminders => "Set reminders",
        }
    }

    pub const fn command(self) -> &'static str {
        match self {
            Self::AddExpense => "fintrack expense add --help",
            Self::AddIncome => "fintrack income add --help",
            Self::AddDebt => "fintrack debt add --help",
            Self::CreateBudget => "fintrack budget create --help",
            Self::ViewReports => "fintrack report",
            Self::SetReminders => "fintrack reminder set --help",
        }
    }

    pub fn card(self) -> ScreenCard {
        ScreenCard {
            screen: self.as_str().to_string(),
            title: self.title().to_string(),
            command: self.command().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::Screen;

    #[test]
    fn every_screen_has_a_distinct_tag_and_command() {
        let tags = Screen::ALL.iter().map(|screen| screen.as_str()).collect::<HashSet<_>>();
        let commands = Screen::ALL.iter().map(|screen| screen.command()).collect::<HashSet<_>>();
        assert_eq!(tags.len(), Screen::ALL.len());
        assert_eq!(commands.len(), Screen::ALL.len());
    }
}
