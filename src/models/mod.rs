// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod classification;
pub mod history;
pub mod like;
pub mod pagination;
pub mod place;
pub mod review;
pub mod user;

pub use classification::*;
pub use history::*;
pub use like::*;
pub use pagination::*;
pub use place::*;
pub use review::*;
pub use user::*;

use chrono::{DateTime, Utc};

/// Timestamp format used in every response body
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
