//! Sale Revenue Recorder.
//!
//! A sale entry stores the units sold per product line and the revenue they
//! were worth at the prices in force when the entry was written. Changing a
//! price later never rewrites past entries.

use log::info;
use shared::UnitsSold;
use std::sync::Arc;

use super::commands::sales::RecordSaleCommand;
use super::dates::parse_local_date;
use super::errors::{DomainError, DomainResult};
use super::models::sale::{SaleRecord, DAYS_PER_PERIOD};
use super::pricing_service::PricingService;
use crate::storage::{Connection, SaleStorage};

fn unit_count(name: &str, value: i64) -> DomainResult<u32> {
    u32::try_from(value)
        .map_err(|_| DomainError::validation(format!("{} units must be between 0 and {}", name, u32::MAX)))
}

#[derive(Clone)]
pub struct SalesService<C: Connection> {
    sale_repository: C::SaleRepository,
    pricing_service: PricingService<C>,
}

impl<C: Connection> SalesService<C> {
    pub fn new(connection: Arc<C>, pricing_service: PricingService<C>) -> Self {
        Self {
            sale_repository: connection.create_sale_repository(),
            pricing_service,
        }
    }

    /// Validate and store the sales of one day
    pub async fn record_sale(&self, command: RecordSaleCommand) -> DomainResult<SaleRecord> {
        let units_sold = UnitsSold {
            large: unit_count("large", command.large)?,
            small: unit_count("small", command.small)?,
            by_volume: unit_count("by_volume", command.by_volume)?,
        };
        let date = parse_local_date(&command.date)?;

        let prices = self.pricing_service.get_config().await?;
        let total_revenue = prices
            .revenue_for(&units_sold)
            .ok_or_else(|| DomainError::validation("price configuration is incomplete"))?;

        let sale = SaleRecord {
            id: SaleRecord::generate_id(),
            period_start: date,
            period_end: date,
            units_sold,
            total_revenue,
            daily_average_revenue: total_revenue / DAYS_PER_PERIOD,
        };
        self.sale_repository.store_sale(&sale).await?;

        info!("Recorded sale {} for {}: ${:.2}", sale.id, date, total_revenue);
        Ok(sale)
    }

    pub async fn list_sales(&self) -> DomainResult<Vec<SaleRecord>> {
        Ok(self.sale_repository.list_sales().await?)
    }

    pub async fn delete_sale(&self, sale_id: &str) -> DomainResult<()> {
        if !self.sale_repository.delete_sale(sale_id).await? {
            return Err(DomainError::not_found(format!("Sale {}", sale_id)));
        }
        info!("Deleted sale {}", sale_id);
        Ok(())
    }
}
