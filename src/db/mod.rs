// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export database components

pub mod history_repository;
pub mod like_repository;
pub mod place_repository;
pub mod review_repository;
pub mod user_repository;

pub use history_repository::*;
pub use like_repository::*;
pub use place_repository::*;
pub use review_repository::*;
pub use user_repository::*;
