use shared::{CategoryTotal, DashboardSummary, FinanceSummary, WeeklyRevenue};

use crate::domain::commands::dashboard::{DashboardOverview, FinanceOverview};

pub struct DashboardMapper;

impl DashboardMapper {
    pub fn overview_to_dto(overview: DashboardOverview) -> DashboardSummary {
        DashboardSummary {
            status: overview.status,
            unread_alerts: overview.unread_alerts,
            days_since_last_measurement: overview.days_since_last_measurement,
            latest_quality_status: overview.latest_quality_status,
            pending_visit_tasks: overview.pending_visit_tasks,
            expected_cash: overview.expected_cash,
        }
    }

    pub fn finance_to_dto(finance: FinanceOverview) -> FinanceSummary {
        FinanceSummary {
            total_income: finance.total_income,
            variable_expenses: finance.variable_expenses,
            fixed_expenses: finance.fixed_expenses,
            total_expenses: finance.total_expenses,
            profit: finance.profit,
            margin_percent: finance.margin_percent,
            expenses_by_category: finance
                .expenses_by_category
                .into_iter()
                .map(|(category, amount)| CategoryTotal { category, amount })
                .collect(),
            weekly_revenue: finance
                .weekly_revenue
                .into_iter()
                .map(|(week_start, revenue)| WeeklyRevenue { week_start, revenue })
                .collect(),
        }
    }
}
