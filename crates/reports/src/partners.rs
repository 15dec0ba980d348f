use staybook_store::columns::{owner, partner};
use staybook_store::Store;
use staybook_table::Table;

/// Partner balances plus their column totals
#[derive(Debug, Clone)]
pub struct PartnerReport {
    pub partners: Table,
    pub receivable_total: f64,
    pub payable_total: f64,
}

/// Owner details plus the total payable to them
#[derive(Debug, Clone)]
pub struct OwnerReport {
    pub owners: Table,
    pub payable_total: f64,
}

/// Build the partner report
///
/// Requires both balance columns; when either is absent the report is
/// empty with zero totals (reported through a diagnostic, not an error).
#[must_use]
pub fn partner_report(store: &Store) -> PartnerReport {
    let table = store.partners();

    if !table.has_columns(&[partner::RECEIVABLE, partner::PAYABLE]) {
        return PartnerReport {
            partners: table.filtered(|_, _| false),
            receivable_total: 0.0,
            payable_total: 0.0,
        };
    }

    PartnerReport {
        partners: table.clone(),
        receivable_total: table.column_sum(partner::RECEIVABLE),
        payable_total: table.column_sum(partner::PAYABLE),
    }
}

/// Build the owner report
///
/// The payable total degrades to zero when the column is absent; the
/// detail table is returned either way.
#[must_use]
pub fn owner_report(store: &Store) -> OwnerReport {
    let table = store.owners();
    OwnerReport {
        owners: table.clone(),
        payable_total: table.column_sum(owner::PAYABLE),
    }
}
