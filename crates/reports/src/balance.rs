use serde::Serialize;
use staybook_store::columns::{booking, partner};
use staybook_store::Store;
use tracing::warn;

/// Whole-table revenue and partner balance totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSummary {
    pub revenue_total: f64,
    pub partner_receivable_total: f64,
    pub partner_payable_total: f64,
}

/// Compute the overall balance figures
///
/// Returns `None` with a diagnostic when the booking value column or
/// either partner balance column is missing.
#[must_use]
pub fn balance_summary(store: &Store) -> Option<BalanceSummary> {
    if !store.bookings().has_columns(&[booking::VALUE])
        || !store
            .partners()
            .has_columns(&[partner::RECEIVABLE, partner::PAYABLE])
    {
        warn!("balance summary unavailable");
        return None;
    }

    Some(BalanceSummary {
        revenue_total: store.bookings().column_sum(booking::VALUE),
        partner_receivable_total: store.partners().column_sum(partner::RECEIVABLE),
        partner_payable_total: store.partners().column_sum(partner::PAYABLE),
    })
}
