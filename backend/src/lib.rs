//! # Water Station Operations Backend
//!
//! Non-UI logic for running a small water purification and vending station.
//!
//! ## Architecture
//!
//! ```text
//! REST API (io::rest)
//!     ↓
//! Domain Layer (services, planner, ledger)
//!     ↓
//! Storage Layer (repository traits, CSV record store)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Build the services over one record store connection
//! - Seed first-run data (default fixed expenses)
//! - Set up the REST router with CORS and the static UI

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::config::AppConfig;
use crate::domain::{
    CashLedgerService, DashboardService, ExpenseService, MaintenanceService, NotificationService,
    PricingService, QualityService, SalesService, VisitService,
};
use crate::storage::CsvConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub quality_service: QualityService<CsvConnection>,
    pub maintenance_service: MaintenanceService<CsvConnection>,
    pub visit_service: VisitService<CsvConnection>,
    pub sales_service: SalesService<CsvConnection>,
    pub expense_service: ExpenseService<CsvConnection>,
    pub cash_ledger: CashLedgerService<CsvConnection>,
    pub pricing_service: PricingService<CsvConnection>,
    pub notification_service: NotificationService<CsvConnection>,
    pub dashboard_service: DashboardService<CsvConnection>,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up record store in {}", config.data_directory.display());
    let connection = Arc::new(CsvConnection::new(&config.data_directory)?);

    info!("Setting up domain model");
    let quality_service =
        QualityService::new(connection.clone(), config.quality.measurement_interval()?);
    let maintenance_service = MaintenanceService::new(connection.clone());
    let visit_service = VisitService::new(
        connection.clone(),
        maintenance_service.clone(),
        config.planner.settings()?,
    );
    let pricing_service = PricingService::new(connection.clone());
    let sales_service = SalesService::new(connection.clone(), pricing_service.clone());
    let expense_service = ExpenseService::new(connection.clone());
    let cash_ledger = CashLedgerService::new(connection.clone());
    let notification_service = NotificationService::new(connection);
    let dashboard_service = DashboardService::new(
        quality_service.clone(),
        notification_service.clone(),
        visit_service.clone(),
        cash_ledger.clone(),
        sales_service.clone(),
        expense_service.clone(),
    );

    expense_service.seed_default_fixed_expenses().await?;

    info!("Setting up application state");
    Ok(AppState {
        quality_service,
        maintenance_service,
        visit_service,
        sales_service,
        expense_service,
        cash_ledger,
        pricing_service,
        notification_service,
        dashboard_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Result<Router> {
    let origin = config
        .allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid allowed origin '{}'", config.allowed_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let mut router = Router::new().nest("/api", io::rest::router());
    if let Some(static_directory) = &config.static_directory {
        info!("Serving UI from {}", static_directory.display());
        router = router.fallback_service(ServeDir::new(static_directory));
    }

    Ok(router.layer(cors).with_state(app_state))
}
