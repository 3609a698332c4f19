//! Auth-domain models: app credentials, token records, and expiry checks.

pub mod credentials;
pub mod expiry;
pub mod record;

pub use credentials::*;
pub use expiry::*;
pub use record::*;
