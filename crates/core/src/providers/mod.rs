pub mod traits;

// Feed implementations
pub mod static_feed;
