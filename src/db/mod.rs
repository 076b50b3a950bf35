pub mod postgres;

pub use postgres::connect_document_store;
