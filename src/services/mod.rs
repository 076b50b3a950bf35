pub mod engine;
pub mod filter_options;
pub mod pagination;
pub mod providers;
pub mod recommendations;

pub use engine::{filter_movies, MAX_RESULTS};
pub use filter_options::{generate_filter_options, FilterOptionsSource};
pub use pagination::{page_window, paginate, Page, PAGE_SIZE};
pub use providers::CatalogProvider;
pub use recommendations::{FallbackPolicy, Recommendations, Recommender, ResultSource};
