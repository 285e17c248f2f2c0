pub mod customers;
pub mod invoices;
pub mod menu;
pub mod orders;
pub mod reservations;
pub mod settings;
pub mod taxes;
