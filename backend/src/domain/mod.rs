//! # Domain Module
//!
//! Business logic of the water station: what a visit consists of, how much
//! cash should be in the drawer, what a sale is worth and whether the water
//! is fit to sell.
//!
//! ## Module Organization
//!
//! - **visit_planner** / **visit_service**: checklist for the next visit and
//!   the in-memory session that tracks it
//! - **cash_ledger**: expected cash between counts and the count history
//! - **sales_service**: revenue of a day's sales at current prices
//! - **quality_service**: reading classification and the reading recorder
//! - **maintenance_service**: catalog, per-run step checklist, maintenance log
//! - **expense_service**, **pricing_service**, **notification_service**
//! - **dashboard_service**: derived station health and finance summaries
//!
//! ## Business Rules
//!
//! - Services validate input before any store call; a rejected call leaves
//!   the store untouched
//! - Past records are never rewritten by later changes (prices, backdated
//!   sales, new counts)
//! - Calendar days are compared with instants at local midnight
//!
//! Services are generic over [`crate::storage::Connection`] and are cheap to
//! clone; clones share session state.

pub mod cash_ledger;
pub mod catalog;
pub mod commands;
pub mod dashboard_service;
pub mod dates;
pub mod errors;
pub mod expense_service;
pub mod maintenance_service;
pub mod models;
pub mod notification_service;
pub mod pricing_service;
pub mod quality_service;
pub mod sales_service;
pub mod visit_planner;
pub mod visit_service;

pub use cash_ledger::CashLedgerService;
pub use dashboard_service::DashboardService;
pub use errors::{DomainError, DomainResult};
pub use expense_service::ExpenseService;
pub use maintenance_service::MaintenanceService;
pub use notification_service::NotificationService;
pub use pricing_service::PricingService;
pub use quality_service::{classify_reading, QualityService};
pub use sales_service::SalesService;
pub use visit_planner::{plan_visit, PlannerSettings};
pub use visit_service::VisitService;
