pub mod posters;
pub mod recommendations;

pub use posters::{PosterProvider, TmdbPosterProvider};
pub use recommendations::{RecommendationEngine, Recommendations};
