//! Dashboard and finance summaries.
//!
//! Everything here is derived on demand from the other services; nothing is
//! stored.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use log::debug;
use shared::{ExpenseCategory, SystemStatus};
use std::collections::BTreeMap;

use super::cash_ledger::CashLedgerService;
use super::commands::dashboard::{DashboardOverview, FinanceOverview};
use super::errors::DomainResult;
use super::expense_service::ExpenseService;
use super::models::expense::{Expense, FixedExpense};
use super::models::sale::SaleRecord;
use super::notification_service::NotificationService;
use super::quality_service::{classify_reading, QualityService};
use super::sales_service::SalesService;
use super::visit_service::VisitService;
use crate::storage::Connection;

/// Number of weeks shown in the revenue trend
const REVENUE_TREND_WEEKS: usize = 4;

/// Overall station health from unread alerts and measurement age.
///
/// A station that was never measured is critical.
pub fn overall_status(unread_alerts: usize, days_since_last_measurement: Option<i64>) -> SystemStatus {
    let days = days_since_last_measurement.unwrap_or(i64::MAX);
    if unread_alerts > 2 || days > 7 {
        SystemStatus::Critical
    } else if unread_alerts > 0 || days > 3 {
        SystemStatus::Attention
    } else {
        SystemStatus::Optimal
    }
}

/// Sunday that starts the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Income and expense totals with per-category and weekly breakdowns.
///
/// Fixed obligations are counted once, under utilities.
pub fn summarize_finances(
    sales: &[SaleRecord],
    expenses: &[Expense],
    fixed_expenses: &[FixedExpense],
) -> FinanceOverview {
    let total_income: f64 = sales.iter().map(|s| s.total_revenue).sum();
    let variable_expenses: f64 = expenses.iter().map(|e| e.amount).sum();
    let fixed_total: f64 = fixed_expenses.iter().map(|e| e.amount).sum();
    let total_expenses = variable_expenses + fixed_total;
    let profit = total_income - total_expenses;
    let margin_percent = if total_income > 0.0 {
        Some(profit / total_income * 100.0)
    } else {
        None
    };

    let mut by_category: BTreeMap<ExpenseCategory, f64> = BTreeMap::new();
    by_category.insert(ExpenseCategory::Utilities, fixed_total);
    for expense in expenses {
        *by_category.entry(expense.category).or_insert(0.0) += expense.amount;
    }

    let mut by_week: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for sale in sales {
        *by_week.entry(week_start(sale.period_start)).or_insert(0.0) += sale.total_revenue;
    }
    let skip = by_week.len().saturating_sub(REVENUE_TREND_WEEKS);

    FinanceOverview {
        total_income,
        variable_expenses,
        fixed_expenses: fixed_total,
        total_expenses,
        profit,
        margin_percent,
        expenses_by_category: by_category.into_iter().collect(),
        weekly_revenue: by_week.into_iter().skip(skip).collect(),
    }
}

#[derive(Clone)]
pub struct DashboardService<C: Connection> {
    quality_service: QualityService<C>,
    notification_service: NotificationService<C>,
    visit_service: VisitService<C>,
    cash_ledger: CashLedgerService<C>,
    sales_service: SalesService<C>,
    expense_service: ExpenseService<C>,
}

impl<C: Connection> DashboardService<C> {
    pub fn new(
        quality_service: QualityService<C>,
        notification_service: NotificationService<C>,
        visit_service: VisitService<C>,
        cash_ledger: CashLedgerService<C>,
        sales_service: SalesService<C>,
        expense_service: ExpenseService<C>,
    ) -> Self {
        Self {
            quality_service,
            notification_service,
            visit_service,
            cash_ledger,
            sales_service,
            expense_service,
        }
    }

    pub async fn overview(&self, now: DateTime<Utc>) -> DomainResult<DashboardOverview> {
        let unread_alerts = self.notification_service.unread_alert_count().await?;
        let latest = self.quality_service.latest_reading().await?;
        let days_since_last_measurement = latest
            .as_ref()
            .map(|reading| (now - reading.timestamp).num_days());
        let latest_quality_status = latest.as_ref().map(|reading| classify_reading(reading).status);
        let pending_visit_tasks = self
            .visit_service
            .current_plan()
            .tasks
            .iter()
            .filter(|t| !t.completed)
            .count();
        let expected_cash = self.cash_ledger.compute_expected_cash().await?.expected_cash;

        let status = overall_status(unread_alerts, days_since_last_measurement);
        debug!(
            "Dashboard status {:?}: {} unread alerts, last measurement {:?} days ago",
            status, unread_alerts, days_since_last_measurement
        );
        Ok(DashboardOverview {
            status,
            unread_alerts,
            days_since_last_measurement,
            latest_quality_status,
            pending_visit_tasks,
            expected_cash,
        })
    }

    pub async fn finance(&self) -> DomainResult<FinanceOverview> {
        let sales = self.sales_service.list_sales().await?;
        let expenses = self.expense_service.list_expenses().await?;
        let fixed_expenses = self.expense_service.list_fixed_expenses().await?;
        Ok(summarize_finances(&sales, &expenses, &fixed_expenses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::UnitsSold;

    fn sale(date: NaiveDate, revenue: f64) -> SaleRecord {
        SaleRecord {
            id: format!("sale::{}", date),
            period_start: date,
            period_end: date,
            units_sold: UnitsSold::default(),
            total_revenue: revenue,
            daily_average_revenue: revenue / 7.0,
        }
    }

    fn expense(category: ExpenseCategory, amount: f64) -> Expense {
        Expense {
            id: "expense::1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            concept: "x".to_string(),
            amount,
            category,
            is_recurring: false,
            notes: None,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_overall_status_thresholds() {
        assert_eq!(overall_status(0, Some(0)), SystemStatus::Optimal);
        assert_eq!(overall_status(0, Some(3)), SystemStatus::Optimal);
        assert_eq!(overall_status(0, Some(4)), SystemStatus::Attention);
        assert_eq!(overall_status(1, Some(0)), SystemStatus::Attention);
        assert_eq!(overall_status(2, Some(7)), SystemStatus::Attention);
        assert_eq!(overall_status(3, Some(0)), SystemStatus::Critical);
        assert_eq!(overall_status(0, Some(8)), SystemStatus::Critical);
        assert_eq!(overall_status(0, None), SystemStatus::Critical);
    }

    #[test]
    fn test_week_start_is_sunday() {
        // 2025-06-01 is a Sunday
        assert_eq!(week_start(day(1)), day(1));
        assert_eq!(week_start(day(7)), day(1));
        assert_eq!(week_start(day(8)), day(8));
    }

    #[test]
    fn test_finance_summary_totals_and_margin() {
        let sales = vec![sale(day(2), 1000.0), sale(day(3), 500.0)];
        let expenses = vec![
            expense(ExpenseCategory::Supplies, 120.0),
            expense(ExpenseCategory::Utilities, 30.0),
        ];
        let fixed = vec![FixedExpense {
            id: "fixed_expense::rent".to_string(),
            concept: "Rent".to_string(),
            amount: 350.0,
            category: ExpenseCategory::Utilities,
            due_day_of_month: 1,
        }];

        let summary = summarize_finances(&sales, &expenses, &fixed);
        assert_eq!(summary.total_income, 1500.0);
        assert_eq!(summary.variable_expenses, 150.0);
        assert_eq!(summary.fixed_expenses, 350.0);
        assert_eq!(summary.total_expenses, 500.0);
        assert_eq!(summary.profit, 1000.0);
        assert_eq!(summary.margin_percent, Some(1000.0 / 1500.0 * 100.0));
        assert_eq!(
            summary.expenses_by_category,
            vec![(ExpenseCategory::Utilities, 380.0), (ExpenseCategory::Supplies, 120.0)]
        );
        assert_eq!(summary.weekly_revenue, vec![(day(1), 1500.0)]);
    }

    #[test]
    fn test_margin_absent_without_income() {
        let summary = summarize_finances(&[], &[expense(ExpenseCategory::Other, 10.0)], &[]);
        assert_eq!(summary.margin_percent, None);
        assert_eq!(summary.profit, -10.0);
    }

    #[test]
    fn test_revenue_trend_keeps_last_four_weeks() {
        let start = day(1);
        let sales: Vec<_> = (0..6)
            .map(|week| sale(start + Duration::weeks(week), 100.0 * (week + 1) as f64))
            .collect();

        let trend = summarize_finances(&sales, &[], &[]).weekly_revenue;
        assert_eq!(trend.len(), 4);
        assert_eq!(trend[0], (start + Duration::weeks(2), 300.0));
        assert_eq!(trend[3], (start + Duration::weeks(5), 600.0));
    }
}
