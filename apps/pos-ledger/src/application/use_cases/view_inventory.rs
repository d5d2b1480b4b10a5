//! View Inventory Use Case

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::domain::ledger::{DailyInventory, InventoryReader};
use crate::error::StoreError;

/// Use case behind the "View Inventory" screen.
pub struct ViewInventoryUseCase<R>
where
    R: InventoryReader,
{
    reader: Arc<R>,
}

impl<R> ViewInventoryUseCase<R>
where
    R: InventoryReader,
{
    /// Create a new `ViewInventoryUseCase`.
    pub const fn new(reader: Arc<R>) -> Self {
        Self { reader }
    }

    /// The report for one calendar day.
    pub async fn for_date(&self, date: NaiveDate) -> Result<DailyInventory, StoreError> {
        let report = self.reader.daily_inventory(date).await?;
        debug!(
            %date,
            rows = report.rows.len(),
            total = %report.total_amount,
            "Inventory loaded"
        );
        Ok(report)
    }

    /// The report for the current local day.
    pub async fn today(&self) -> Result<DailyInventory, StoreError> {
        self.for_date(Local::now().date_naive()).await
    }
}
