// API client implementation for the Stack Exchange REST API
pub mod stackexchange;

// Re-export common types
pub use stackexchange::{
    StackExchangeClient, StackExchangeError, StackExchangeUser, UsersEnvelope, MAX_PAGESIZE,
};
