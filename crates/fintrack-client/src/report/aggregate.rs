use std::collections::HashMap;

use chrono::NaiveDate;

use crate::model::{CategoryFilter, Transaction, from_cents, to_cents};

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregation {
    /// Filtered amounts summed per date, ascending by date.
    pub chart: Vec<ChartPoint>,
    /// Unfiltered amounts summed per category, descending by amount.
    pub categories: Vec<CategoryTotal>,
    /// Sum of the filtered amounts.
    pub total: f64,
}

impl Aggregation {
    pub fn max_point_amount(&self) -> f64 {
        self.chart
            .iter()
            .map(|point| point.amount)
            .fold(0.0, f64::max)
    }

    pub fn relative_height(&self, point: &ChartPoint) -> f64 {
        relative_height(point.amount, self.max_point_amount())
    }
}

/// Bar height in `[0, 1]` against the tallest point. The denominator never
/// drops below 1, so an empty or all-zero series yields zero heights.
pub fn relative_height(amount: f64, max_amount: f64) -> f64 {
    let denominator = max_amount.max(1.0);
    (amount / denominator).clamp(0.0, 1.0)
}

pub fn aggregate(transactions: &[Transaction], filter: &CategoryFilter) -> Aggregation {
    let mut by_date: HashMap<NaiveDate, i64> = HashMap::new();
    let mut total = 0;
    for transaction in transactions
        .iter()
        .filter(|transaction| filter.matches(&transaction.tag))
    {
        let cents = to_cents(transaction.amount);
        *by_date.entry(transaction.date).or_insert(0) += cents;
        total += cents;
    }

    let mut chart = by_date
        .into_iter()
        .map(|(date, cents)| ChartPoint {
            date,
            amount: from_cents(cents),
        })
        .collect::<Vec<ChartPoint>>();
    chart.sort_by_key(|point| point.date);

    Aggregation {
        chart,
        categories: category_totals(transactions),
        total: from_cents(total),
    }
}

/// Keeps first-seen order among equal amounts.
fn category_totals(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, i64)> = Vec::new();

    for transaction in transactions {
        let category = if transaction.tag.trim().is_empty() {
            UNCATEGORIZED
        } else {
            transaction.tag.as_str()
        };
        let cents = to_cents(transaction.amount);
        match positions.get(category) {
            Some(&index) => totals[index].1 += cents,
            None => {
                positions.insert(category, totals.len());
                totals.push((category, cents));
            }
        }
    }

    totals.sort_by(|left, right| right.1.cmp(&left.1));
    totals
        .into_iter()
        .map(|(category, cents)| CategoryTotal {
            category: category.to_string(),
            amount: from_cents(cents),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{UNCATEGORIZED, aggregate, relative_height};
    use crate::model::{CategoryFilter, Transaction, TransactionKind};

    fn txn(date: &str, amount: f64, tag: &str) -> Transaction {
        Transaction {
            id: format!("exp_{date}_{tag}_{amount}"),
            user_id: "user_1".to_string(),
            kind: TransactionKind::Expense,
            name: "row".to_string(),
            amount,
            tag: tag.to_string(),
            method: "card".to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap_or_default(),
            created_at: "2025-06-01T00:00:00Z".to_string(),
        }
    }

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap_or_default()
    }

    #[test]
    fn food_filter_scenario_groups_by_date_and_totals_categories_unfiltered() {
        let rows = vec![
            txn("2025-06-01", 10.0, "food"),
            txn("2025-06-01", 5.0, "transport"),
            txn("2025-06-02", 7.0, "food"),
        ];

        let result = aggregate(&rows, &CategoryFilter::parse("food"));

        let chart = result
            .chart
            .iter()
            .map(|point| (point.date, point.amount))
            .collect::<Vec<_>>();
        assert_eq!(chart, vec![(june(1), 10.0), (june(2), 7.0)]);
        assert_eq!(result.total, 17.0);

        let categories = result
            .categories
            .iter()
            .map(|total| (total.category.as_str(), total.amount))
            .collect::<Vec<_>>();
        assert_eq!(categories, vec![("food", 17.0), ("transport", 5.0)]);
    }

    #[test]
    fn all_filter_sums_every_row_per_date() {
        let rows = vec![
            txn("2025-06-03", 4.0, "health"),
            txn("2025-06-01", 10.0, "food"),
            txn("2025-06-01", 5.0, "transport"),
        ];
        let result = aggregate(&rows, &CategoryFilter::All);
        assert_eq!(result.total, 19.0);
        assert_eq!(result.chart.len(), 2);
        assert_eq!(result.chart[0].date, june(1));
        assert_eq!(result.chart[0].amount, 15.0);
        assert_eq!(result.chart[1].date, june(3));
    }

    #[test]
    fn empty_input_yields_empty_outputs_and_zero_total() {
        let result = aggregate(&[], &CategoryFilter::All);
        assert!(result.chart.is_empty());
        assert!(result.categories.is_empty());
        assert_eq!(result.total, 0.0);
        assert_eq!(result.max_point_amount(), 0.0);
    }

    #[test]
    fn filter_with_no_matches_still_reports_category_breakdown() {
        let rows = vec![txn("2025-06-01", 10.0, "food")];
        let result = aggregate(&rows, &CategoryFilter::parse("shopping"));
        assert!(result.chart.is_empty());
        assert_eq!(result.total, 0.0);
        assert_eq!(result.categories.len(), 1);
    }

    #[test]
    fn category_totals_are_non_increasing() {
        let rows = vec![
            txn("2025-06-01", 1.0, "a"),
            txn("2025-06-02", 9.0, "b"),
            txn("2025-06-03", 4.0, "c"),
            txn("2025-06-04", 4.0, "d"),
            txn("2025-06-05", 6.0, "a"),
        ];
        let result = aggregate(&rows, &CategoryFilter::All);
        assert!(
            result
                .categories
                .windows(2)
                .all(|pair| pair[0].amount >= pair[1].amount)
        );
        assert_eq!(result.categories[0].category, "b");
    }

    #[test]
    fn blank_tags_group_as_uncategorized() {
        let rows = vec![txn("2025-06-01", 3.0, ""), txn("2025-06-02", 2.0, " ")];
        let result = aggregate(&rows, &CategoryFilter::All);
        assert_eq!(result.categories.len(), 1);
        assert_eq!(result.categories[0].category, UNCATEGORIZED);
        assert_eq!(result.categories[0].amount, 5.0);
    }

    #[test]
    fn aggregation_is_idempotent_and_leaves_input_untouched() {
        let rows = vec![
            txn("2025-06-02", 7.0, "food"),
            txn("2025-06-01", 10.0, "food"),
        ];
        let snapshot = rows.clone();
        let first = aggregate(&rows, &CategoryFilter::All);
        let second = aggregate(&rows, &CategoryFilter::All);
        assert_eq!(first, second);
        assert_eq!(rows, snapshot);
    }

    #[test]
    fn sums_land_on_whole_cents() {
        let rows = vec![
            txn("2025-06-01", 0.1, "food"),
            txn("2025-06-01", 0.2, "food"),
        ];
        let result = aggregate(&rows, &CategoryFilter::All);
        assert_eq!(result.total, 0.3);
        assert_eq!(result.chart[0].amount, 0.3);
        assert_eq!(result.categories[0].amount, 0.3);
    }

    #[test]
    fn relative_height_guards_small_denominators() {
        assert_eq!(relative_height(0.0, 0.0), 0.0);
        assert_eq!(relative_height(0.5, 0.5), 0.5);
        assert_eq!(relative_height(5.0, 10.0), 0.5);
        assert_eq!(relative_height(10.0, 10.0), 1.0);
    }
}
