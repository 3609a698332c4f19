//! Token records returned by successful exchanges and renewals.

// crates.io
use oauth2::{AccessToken, RefreshToken};
// self
use crate::_prelude::*;

/// Normalized token data handed back to the caller after a grant succeeds.
///
/// The client never retains records; persisting and replacing them is up to the caller.
/// `expiration_date_time` serializes as an integer Unix timestamp.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenRecord {
	/// Access token secret; redacted from `Debug` output.
	pub access_token: AccessToken,
	/// Refresh token secret, if the provider issued one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<RefreshToken>,
	/// Scope string granted by the provider.
	pub scope: String,
	/// Lifetime in seconds as reported by the provider.
	pub expires_in: i64,
	/// Absolute expiry computed from the receipt instant plus `expires_in`.
	#[serde(with = "time::serde::timestamp")]
	pub expiration_date_time: OffsetDateTime,
}
impl TokenRecord {
	/// Returns the expiry as a Unix timestamp in whole seconds.
	pub fn expiration_timestamp(&self) -> i64 {
		self.expiration_date_time.unix_timestamp()
	}

	/// Returns `true` unless the expiry lies strictly after `instant`.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expiration_date_time <= instant
	}

	/// Returns the refresh token value, if one was issued.
	pub fn refresh_secret(&self) -> Option<&str> {
		self.refresh_token.as_ref().map(|token| token.secret().as_str())
	}
}
