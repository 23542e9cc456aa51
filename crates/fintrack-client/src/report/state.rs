use tracing::debug;

use crate::model::{CategoryFilter, Transaction};
use crate::report::aggregate::{Aggregation, aggregate};

/// Identifies one fetch. Only the most recent ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// A total computed from a complete fetch. Only `ReportState` hands these
/// out, so the budget check cannot run against a pending or stale result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettledTotal(f64);

impl SettledTotal {
    pub fn amount(self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchPhase {
    Idle,
    Pending(FetchTicket),
    Settled,
}

/// Report view state. Fetches are sequenced by generation; a result whose
/// ticket is no longer current, or that arrives after `dispose`, is dropped.
#[derive(Debug, Clone)]
pub struct ReportState {
    filter: CategoryFilter,
    generation: u64,
    phase: FetchPhase,
    disposed: bool,
    transactions: Vec<Transaction>,
    aggregation: Aggregation,
}

impl ReportState {
    pub fn new(filter: CategoryFilter) -> Self {
        Self {
            filter,
            generation: 0,
            phase: FetchPhase::Idle,
            disposed: false,
            transactions: Vec::new(),
            aggregation: Aggregation::default(),
        }
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        let ticket = FetchTicket(self.generation);
        self.phase = FetchPhase::Pending(ticket);
        ticket
    }

    /// Stores a complete fetch and returns its settled total, or `None`
    /// when the result is stale or the view is gone.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        transactions: Vec<Transaction>,
    ) -> Option<SettledTotal> {
        if self.disposed {
            debug!(ticket = ticket.0, "dropping fetch result after dispose");
            return None;
        }
        if self.phase != FetchPhase::Pending(ticket) {
            debug!(
                ticket = ticket.0,
                current = self.generation,
                "dropping stale fetch result"
            );
            return None;
        }

        self.transactions = transactions;
        self.aggregation = aggregate(&self.transactions, &self.filter);
        self.phase = FetchPhase::Settled;
        Some(SettledTotal(self.aggregation.total))
    }

    /// Re-aggregates the loaded rows. Returns `None` unless a fetch has settled.
    pub fn select_filter(&mut self, filter: CategoryFilter) -> Option<SettledTotal> {
        self.filter = filter;
        if self.disposed || self.phase != FetchPhase::Settled {
            return None;
        }
        self.aggregation = aggregate(&self.transactions, &self.filter);
        Some(SettledTotal(self.aggregation.total))
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn phase(&self) -> &FetchPhase {
        &self.phase
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn aggregation(&self) -> &Aggregation {
        &self.aggregation
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{FetchPhase, ReportState};
    use crate::model::{CategoryFilter, Transaction, TransactionKind};

    fn txn(day: u32, amount: f64, tag: &str) -> Transaction {
        Transaction {
            id: format!("exp_{day}"),
            user_id: "user_1".to_string(),
            kind: TransactionKind::Expense,
            name: "row".to_string(),
            amount,
            tag: tag.to_string(),
            method: "cash".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap_or_default(),
            created_at: "2025-06-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn only_latest_fetch_settles() {
        let mut state = ReportState::new(CategoryFilter::All);
        let first = state.begin_fetch();
        let second = state.begin_fetch();

        assert_eq!(state.complete_fetch(first, vec![txn(1, 99.0, "food")]), None);
        assert!(matches!(state.phase(), FetchPhase::Pending(_)));

        let settled = state.complete_fetch(second, vec![txn(1, 4.0, "food")]);
        assert_eq!(settled.map(|total| total.amount()), Some(4.0));
        assert_eq!(state.phase(), &FetchPhase::Settled);
        assert_eq!(state.aggregation().total, 4.0);
    }

    #[test]
    fn completing_the_same_ticket_twice_is_ignored() {
        let mut state = ReportState::new(CategoryFilter::All);
        let ticket = state.begin_fetch();
        assert!(state.complete_fetch(ticket, vec![txn(1, 4.0, "food")]).is_some());
        assert!(state.complete_fetch(ticket, Vec::new()).is_none());
        assert_eq!(state.transactions().len(), 1);
    }

    #[test]
    fn results_after_dispose_are_dropped() {
        let mut state = ReportState::new(CategoryFilter::All);
        let ticket = state.begin_fetch();
        state.dispose();
        assert!(state.complete_fetch(ticket, vec![txn(1, 4.0, "food")]).is_none());
        assert!(state.transactions().is_empty());
    }

    #[test]
    fn filter_change_before_settle_yields_no_total() {
        let mut state = ReportState::new(CategoryFilter::All);
        assert!(state.select_filter(CategoryFilter::parse("food")).is_none());

        let ticket = state.begin_fetch();
        let rows = vec![txn(1, 10.0, "food"), txn(2, 5.0, "transport")];
        assert_eq!(state.complete_fetch(ticket, rows).map(|t| t.amount()), Some(10.0));

        let transport = state.select_filter(CategoryFilter::parse("transport"));
        assert_eq!(transport.map(|t| t.amount()), Some(5.0));
        assert_eq!(state.filter(), &CategoryFilter::parse("transport"));
    }
}
