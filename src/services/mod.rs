pub mod providers;

pub use providers::{CineGraphProvider, RecommendationService};
