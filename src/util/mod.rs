pub mod jwt;
pub mod password;
pub mod email;
pub mod logger;
pub mod error;
pub mod filter;
pub mod invoice_pdf;
