//! Sales stored in `sales.csv`, one column per product line.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::UnitsSold;

use super::connection::{CsvConnection, SALES};
use super::table::CsvTable;
use crate::domain::dates::{format_date, parse_stored_date};
use crate::domain::models::sale::SaleRecord;
use crate::storage::traits::SaleStorage;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaleRow {
    id: String,
    period_start: String,
    period_end: String,
    units_large: u32,
    units_small: u32,
    units_by_volume: u32,
    total_revenue: f64,
    daily_average_revenue: f64,
}

impl SaleRow {
    fn from_domain(sale: &SaleRecord) -> Self {
        Self {
            id: sale.id.clone(),
            period_start: format_date(sale.period_start),
            period_end: format_date(sale.period_end),
            units_large: sale.units_sold.large,
            units_small: sale.units_sold.small,
            units_by_volume: sale.units_sold.by_volume,
            total_revenue: sale.total_revenue,
            daily_average_revenue: sale.daily_average_revenue,
        }
    }

    fn into_domain(self) -> Result<SaleRecord> {
        Ok(SaleRecord {
            period_start: parse_stored_date(&self.period_start)?,
            period_end: parse_stored_date(&self.period_end)?,
            id: self.id,
            units_sold: UnitsSold {
                large: self.units_large,
                small: self.units_small,
                by_volume: self.units_by_volume,
            },
            total_revenue: self.total_revenue,
            daily_average_revenue: self.daily_average_revenue,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SaleRepository {
    table: CsvTable<SaleRow>,
}

impl SaleRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            table: connection.table(SALES),
        }
    }
}

#[async_trait]
impl SaleStorage for SaleRepository {
    async fn store_sale(&self, sale: &SaleRecord) -> Result<()> {
        self.table.append(SaleRow::from_domain(sale))
    }

    async fn list_sales(&self) -> Result<Vec<SaleRecord>> {
        let mut sales = self
            .table
            .read_all()?
            .into_iter()
            .map(SaleRow::into_domain)
            .collect::<Result<Vec<_>>>()?;
        sales.sort_by_key(|s| s.period_start);
        Ok(sales)
    }

    async fn delete_sale(&self, sale_id: &str) -> Result<bool> {
        let removed = self.table.modify(|rows| {
            let before = rows.len();
            rows.retain(|row| row.id != sale_id);
            (rows.len() < before).then_some(())
        })?;
        Ok(removed.is_some())
    }
}
