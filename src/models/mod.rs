mod catalog;
mod criteria;
mod filter_options;
mod movie;

pub use catalog::{CatalogPage, CatalogQuery, CatalogResponse};
pub use criteria::{SearchCriteria, SortBy};
pub use filter_options::FilterOptions;
pub use movie::MovieRecord;
