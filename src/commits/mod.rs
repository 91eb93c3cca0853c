pub mod aggregate;
pub mod breakdown;
pub mod exec;
pub mod fetch;
pub mod filter;
pub mod output;
pub mod select;

pub use aggregate::{aggregate, commit_url};
pub use breakdown::{breakdown, dominant_type, format_percent, Breakdown, TypeShare};
pub use fetch::{load_pipeline, Pipeline};
pub use filter::{filter_by_progress, filter_by_time};
pub use select::{select, select_with_scales, Selection};
