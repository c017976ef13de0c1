use chrono::DateTime;
use serde::{Deserialize, Serialize};
use soscout_api::StackExchangeUser;

/// Placeholder for fields the API left out of a record.
pub const MISSING: &str = "Null";

/// User model - the star of the show
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: u64,
    pub account_id: Option<u64>,
    pub display_name: Option<String>,
    pub reputation: u64,
    pub last_access_date: Option<i64>,
    pub age: Option<u32>,
    pub location: Option<String>,
    pub user_type: Option<String>,
}

impl User {
    /// Display name with the missing-field placeholder applied.
    pub fn name_or_missing(&self) -> &str {
        self.display_name.as_deref().unwrap_or(MISSING)
    }

    /// Last access as a calendar date-time, or the placeholder.
    pub fn last_access_display(&self) -> String {
        match self.last_access_date {
            Some(ts) => format_timestamp(ts),
            None => MISSING.to_string(),
        }
    }
}

/// Convert an API wire record into our internal model
pub fn api_user_to_user(api: StackExchangeUser) -> User {
    User {
        user_id: api.user_id,
        account_id: api.account_id,
        display_name: api.display_name,
        reputation: api.reputation,
        last_access_date: api.last_access_date,
        age: api.age,
        location: api.location,
        user_type: api.user_type,
    }
}

/// How listings and exports get ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// The form the API's `order` query parameter expects.
    pub fn api_param(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_param())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("expected 'asc' or 'desc', got '{}'", other)),
        }
    }
}

/// Pagination request for the listing endpoint
#[derive(Debug, Clone, Copy)]
pub struct ListingQuery {
    pub page: u32,
    pub pagesize: u32,
    pub order: SortOrder,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            page: 1,
            pagesize: soscout_api::MAX_PAGESIZE,
            order: SortOrder::Desc,
        }
    }
}

/// Epoch seconds to `YYYY-MM-DD HH:MM:SS` (UTC). Out-of-range values fall
/// back to the placeholder instead of panicking.
pub fn format_timestamp(epoch_secs: i64) -> String {
    match DateTime::from_timestamp(epoch_secs, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => MISSING.to_string(),
    }
}
