//! Sales, expenses, cash counts and prices.

use shared::{
    CashReconciliationEntry, CreateFixedExpenseRequest, ExpectedCashResponse, Expense,
    FixedExpense, PriceConfigResponse, ProductConfig, RecordExpenseRequest, RecordSaleRequest,
    SaleRecord, UpdateFixedExpenseRequest, UpsertProductRequest,
};

use crate::domain::commands::cash::ExpectedCash;
use crate::domain::commands::expenses::{
    CreateFixedExpenseCommand, RecordExpenseCommand, UpdateFixedExpenseCommand,
};
use crate::domain::commands::pricing::UpsertProductCommand;
use crate::domain::commands::sales::RecordSaleCommand;
use crate::domain::models::cash::CashReconciliationEntry as DomainCashReconciliationEntry;
use crate::domain::models::expense::{Expense as DomainExpense, FixedExpense as DomainFixedExpense};
use crate::domain::models::pricing::PriceConfig;
use crate::domain::models::sale::SaleRecord as DomainSaleRecord;

pub struct FinanceMapper;

impl FinanceMapper {
    pub fn sale_to_dto(domain: DomainSaleRecord) -> SaleRecord {
        SaleRecord {
            id: domain.id,
            period_start: domain.period_start,
            period_end: domain.period_end,
            units_sold: domain.units_sold,
            total_revenue: domain.total_revenue,
            daily_average_revenue: domain.daily_average_revenue,
        }
    }

    pub fn to_sale_command(request: RecordSaleRequest) -> RecordSaleCommand {
        RecordSaleCommand {
            date: request.date,
            large: request.large,
            small: request.small,
            by_volume: request.by_volume,
        }
    }

    pub fn expense_to_dto(domain: DomainExpense) -> Expense {
        Expense {
            id: domain.id,
            date: domain.date,
            concept: domain.concept,
            amount: domain.amount,
            category: domain.category,
            is_recurring: domain.is_recurring,
            notes: domain.notes,
        }
    }

    pub fn to_expense_command(request: RecordExpenseRequest) -> RecordExpenseCommand {
        RecordExpenseCommand {
            date: request.date,
            concept: request.concept,
            amount: request.amount,
            category: request.category,
            is_recurring: request.is_recurring,
            notes: request.notes,
        }
    }

    pub fn fixed_expense_to_dto(domain: DomainFixedExpense) -> FixedExpense {
        FixedExpense {
            id: domain.id,
            concept: domain.concept,
            amount: domain.amount,
            category: domain.category,
            due_day_of_month: domain.due_day_of_month,
        }
    }

    pub fn to_create_fixed_command(request: CreateFixedExpenseRequest) -> CreateFixedExpenseCommand {
        CreateFixedExpenseCommand {
            concept: request.concept,
            amount: request.amount,
            category: request.category,
            due_day_of_month: request.due_day_of_month,
        }
    }

    pub fn to_update_fixed_command(request: UpdateFixedExpenseRequest) -> UpdateFixedExpenseCommand {
        UpdateFixedExpenseCommand {
            concept: request.concept,
            amount: request.amount,
            due_day_of_month: request.due_day_of_month,
        }
    }

    pub fn expected_cash_to_dto(expected: ExpectedCash) -> ExpectedCashResponse {
        ExpectedCashResponse {
            checkpoint: expected.checkpoint,
            opening_cash: expected.opening_cash,
            sales_since: expected.sales_since,
            expenses_since: expected.expenses_since,
            expected_cash: expected.expected_cash,
        }
    }

    pub fn reconciliation_to_dto(domain: DomainCashReconciliationEntry) -> CashReconciliationEntry {
        CashReconciliationEntry {
            id: domain.id,
            timestamp: domain.timestamp,
            opening_cash: domain.opening_cash,
            accumulated_sales_since_last: domain.accumulated_sales_since_last,
            accumulated_expenses_since_last: domain.accumulated_expenses_since_last,
            withdrawn_amount: domain.withdrawn_amount,
            closing_cash: domain.closing_cash,
            notes: domain.notes,
        }
    }

    pub fn prices_to_dto(config: PriceConfig) -> PriceConfigResponse {
        PriceConfigResponse {
            products: config
                .products
                .into_iter()
                .map(|(id, product)| ProductConfig {
                    id,
                    unit_margin: product.unit_price - product.unit_cost,
                    name: product.name,
                    unit_price: product.unit_price,
                    unit_cost: product.unit_cost,
                    unit: product.unit,
                    active: product.active,
                })
                .collect(),
        }
    }

    pub fn to_upsert_command(product_id: String, request: UpsertProductRequest) -> UpsertProductCommand {
        UpsertProductCommand {
            product_id,
            name: request.name,
            unit_price: request.unit_price,
            unit_cost: request.unit_cost,
            unit: request.unit,
            active: request.active,
        }
    }
}
