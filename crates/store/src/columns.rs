//! Canonical column headers for the three spreadsheet files
//!
//! Loaded files are addressed by these names; a file may carry fewer
//! columns (computations degrade) or extra ones (preserved untouched).

/// Booking sheet headers
pub mod booking {
    pub const ID: &str = "ID";
    pub const GUEST: &str = "Guest Name";
    pub const CHECK_IN: &str = "Check-In";
    pub const CHECK_OUT: &str = "Check-Out";
    pub const APARTMENT: &str = "Apartment";
    pub const VALUE: &str = "Hospitality Value";
    pub const CONDOMINIUM: &str = "Condominium";
    pub const BLOCK: &str = "Block";
    pub const ADDRESS: &str = "Address";
    pub const STATUS: &str = "Payment Status";
    pub const AMOUNT_PAID: &str = "Amount Paid";
    pub const AMOUNT_DUE: &str = "Amount Due";
    pub const CONTACT_NAME: &str = "Contact Name";
    pub const CONTACT_PHONE: &str = "Contact Phone";

    pub const ALL: &[&str] = &[
        ID,
        GUEST,
        CHECK_IN,
        CHECK_OUT,
        APARTMENT,
        VALUE,
        CONDOMINIUM,
        BLOCK,
        ADDRESS,
        STATUS,
        AMOUNT_PAID,
        AMOUNT_DUE,
        CONTACT_NAME,
        CONTACT_PHONE,
    ];

    /// Column order used by the weekly report export
    pub const REPORT: &[&str] = &[
        GUEST,
        CHECK_IN,
        CHECK_OUT,
        APARTMENT,
        VALUE,
        CONDOMINIUM,
        BLOCK,
        ADDRESS,
    ];
}

/// Partner sheet headers
pub mod partner {
    pub const ID: &str = "ID";
    pub const NAME: &str = "Partner";
    pub const RECEIVABLE: &str = "Receivable";
    pub const PAYABLE: &str = "Payable";

    pub const ALL: &[&str] = &[ID, NAME, RECEIVABLE, PAYABLE];

    /// Column order used by the partner report export
    pub const REPORT: &[&str] = &[NAME, RECEIVABLE, PAYABLE];
}

/// Owner sheet headers
pub mod owner {
    pub const ID: &str = "ID";
    pub const NAME: &str = "Full Name";
    pub const EMAIL: &str = "Email";
    pub const PHONE: &str = "Phone";
    pub const DOCUMENT: &str = "Document";
    pub const PAYABLE: &str = "Payable";

    pub const ALL: &[&str] = &[ID, NAME, EMAIL, PHONE, DOCUMENT, PAYABLE];

    /// Column order used by the owner report export (Payable appended
    /// only when the loaded file carries it)
    pub const REPORT: &[&str] = &[NAME, EMAIL, PHONE, DOCUMENT];
}
