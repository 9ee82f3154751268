// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod auth;
pub mod classifier;
pub mod history_service;
pub mod inference_service;
pub mod label_table;
pub mod like_service;
pub mod media_store;
pub mod preprocess;
pub mod rate_limit;
pub mod review_service;
pub mod user_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::TokenService;
pub use history_service::HistoryService;
pub use inference_service::{Classification, InferenceService};
pub use label_table::LabelTable;
pub use like_service::LikeService;
pub use media_store::MediaStore;
pub use rate_limit::ClassifyLimiter;
pub use review_service::ReviewService;
pub use user_service::UserService;
