// Adapters layer: concrete implementations for external systems (storage, http, terminal).

pub mod prompt;
pub mod storage;
pub mod strava;
pub mod trmnl;
