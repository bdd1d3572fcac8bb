// Resource pool: filtering, CSV import, mock generation and the HTTP handlers.

pub mod filter;
pub mod generator;
pub mod handlers;
pub mod import;
