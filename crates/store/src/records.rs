use crate::columns::{booking, owner, partner};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use staybook_table::{Cell, Table};

/// One stay record tying a guest to an apartment over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    #[serde(flatten)]
    pub fields: NewBooking,
}

/// Booking fields as entered through the create/edit forms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
    pub guest_name: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub apartment: Option<i64>,
    #[serde(default)]
    pub hospitality_value: f64,
    pub condominium: Option<String>,
    pub block: Option<String>,
    pub address: Option<String>,
    pub payment_status: Option<String>,
    pub amount_paid: Option<f64>,
    pub amount_due: Option<f64>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
}

/// A business counterparty with receivable/payable balances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    #[serde(flatten)]
    pub fields: NewPartner,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPartner {
    pub name: String,
    #[serde(default)]
    pub receivable: f64,
    #[serde(default)]
    pub payable: f64,
}

/// An apartment owner, tracked for payables and contact details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    #[serde(flatten)]
    pub fields: NewOwner,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewOwner {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub document: Option<String>,
    pub payable: Option<f64>,
}

fn text(table: &Table, row: usize, column: &str) -> Option<String> {
    let cell = table.value(row, column)?;
    if cell.is_null() {
        None
    } else {
        Some(cell.display())
    }
}

fn float(table: &Table, row: usize, column: &str) -> Option<f64> {
    table.value(row, column).and_then(Cell::as_float)
}

fn int(table: &Table, row: usize, column: &str) -> Option<i64> {
    table.value(row, column).and_then(Cell::as_int)
}

fn date(table: &Table, row: usize, column: &str) -> Option<NaiveDate> {
    table.value(row, column).and_then(Cell::as_date)
}

impl Booking {
    /// Read the booking at `row`, tolerating absent optional columns
    #[must_use]
    pub fn from_row(table: &Table, row: usize) -> Option<Booking> {
        table.row(row)?;
        Some(Booking {
            id: text(table, row, booking::ID).unwrap_or_default(),
            fields: NewBooking {
                guest_name: text(table, row, booking::GUEST).unwrap_or_default(),
                check_in: date(table, row, booking::CHECK_IN),
                check_out: date(table, row, booking::CHECK_OUT),
                apartment: int(table, row, booking::APARTMENT),
                hospitality_value: float(table, row, booking::VALUE).unwrap_or(0.0),
                condominium: text(table, row, booking::CONDOMINIUM),
                block: text(table, row, booking::BLOCK),
                address: text(table, row, booking::ADDRESS),
                payment_status: text(table, row, booking::STATUS),
                amount_paid: float(table, row, booking::AMOUNT_PAID),
                amount_due: float(table, row, booking::AMOUNT_DUE),
                contact_name: text(table, row, booking::CONTACT_NAME),
                contact_phone: text(table, row, booking::CONTACT_PHONE),
            },
        })
    }
}

impl NewBooking {
    /// The cell this record carries for a canonical header, if any
    pub(crate) fn cell_for(&self, header: &str, id: &str) -> Option<Cell> {
        match header {
            booking::ID => Some(Cell::from(id.to_string())),
            booking::GUEST => Some(Cell::from(self.guest_name.clone())),
            booking::CHECK_IN => Some(Cell::from(self.check_in)),
            booking::CHECK_OUT => Some(Cell::from(self.check_out)),
            booking::APARTMENT => Some(Cell::from(self.apartment)),
            booking::VALUE => Some(Cell::Float(self.hospitality_value)),
            booking::CONDOMINIUM => Some(Cell::from(self.condominium.clone())),
            booking::BLOCK => Some(Cell::from(self.block.clone())),
            booking::ADDRESS => Some(Cell::from(self.address.clone())),
            booking::STATUS => Some(Cell::from(self.payment_status.clone())),
            booking::AMOUNT_PAID => Some(Cell::from(self.amount_paid)),
            booking::AMOUNT_DUE => Some(Cell::from(self.amount_due)),
            booking::CONTACT_NAME => Some(Cell::from(self.contact_name.clone())),
            booking::CONTACT_PHONE => Some(Cell::from(self.contact_phone.clone())),
            _ => None,
        }
    }
}

impl Partner {
    #[must_use]
    pub fn from_row(table: &Table, row: usize) -> Option<Partner> {
        table.row(row)?;
        Some(Partner {
            id: text(table, row, partner::ID).unwrap_or_default(),
            fields: NewPartner {
                name: text(table, row, partner::NAME).unwrap_or_default(),
                receivable: float(table, row, partner::RECEIVABLE).unwrap_or(0.0),
                payable: float(table, row, partner::PAYABLE).unwrap_or(0.0),
            },
        })
    }
}

impl NewPartner {
    pub(crate) fn cell_for(&self, header: &str, id: &str) -> Option<Cell> {
        match header {
            partner::ID => Some(Cell::from(id.to_string())),
            partner::NAME => Some(Cell::from(self.name.clone())),
            partner::RECEIVABLE => Some(Cell::Float(self.receivable)),
            partner::PAYABLE => Some(Cell::Float(self.payable)),
            _ => None,
        }
    }
}

impl Owner {
    #[must_use]
    pub fn from_row(table: &Table, row: usize) -> Option<Owner> {
        table.row(row)?;
        Some(Owner {
            id: text(table, row, owner::ID).unwrap_or_default(),
            fields: NewOwner {
                full_name: text(table, row, owner::NAME).unwrap_or_default(),
                email: text(table, row, owner::EMAIL),
                phone: text(table, row, owner::PHONE),
                document: text(table, row, owner::DOCUMENT),
                payable: float(table, row, owner::PAYABLE),
            },
        })
    }
}

impl NewOwner {
    pub(crate) fn cell_for(&self, header: &str, id: &str) -> Option<Cell> {
        match header {
            owner::ID => Some(Cell::from(id.to_string())),
            owner::NAME => Some(Cell::from(self.full_name.clone())),
            owner::EMAIL => Some(Cell::from(self.email.clone())),
            owner::PHONE => Some(Cell::from(self.phone.clone())),
            owner::DOCUMENT => Some(Cell::from(self.document.clone())),
            owner::PAYABLE => Some(Cell::from(self.payable)),
            _ => None,
        }
    }
}
