//! Request decorators that attach upstream credentials.

mod api_key;

pub use api_key::ApiKey;
