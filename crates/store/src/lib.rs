//! Data store for staybook
//!
//! Owns the three tables the dashboard works with — bookings, partners and
//! owners — each backed by a spreadsheet file. All three are loaded
//! wholesale at startup, mutated in memory through add/update operations,
//! and flushed back to their files after every mutation.
//!
//! A missing or unreadable file degrades to an empty table with the
//! canonical headers and a logged diagnostic; it is never an error. Saves,
//! on the other hand, report their outcome explicitly so callers only
//! claim success when the flush actually happened.
//!
//! Every row carries a generated `ID` column assigned at creation (and
//! backfilled on load for files that predate it), so updates address rows
//! by identifier rather than by position.

pub mod columns;
mod error;
mod records;
mod store;

pub use error::{Result, StoreError};
pub use records::{Booking, NewBooking, NewOwner, NewPartner, Owner, Partner};
pub use store::{Store, StorePaths};
