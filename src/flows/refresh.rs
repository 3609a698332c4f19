//! Refresh token renewals.

// crates.io
use oauth2::RefreshToken;
// self
use crate::{
	_prelude::*,
	auth::TokenRecord,
	flows::TokenClient,
	http::TokenHttpClient,
	oauth::TokenGrant,
	obs::FlowKind,
};

impl<C> TokenClient<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Trades a refresh token for a fresh token record.
	///
	/// Shares the error taxonomy of
	/// [`request_access_token`](TokenClient::request_access_token). The returned record
	/// carries a refresh token only when the provider rotated it; otherwise the caller keeps
	/// using the one it already stores.
	pub async fn renew_access_token(&self, refresh_token: &str) -> Result<TokenRecord> {
		let grant = TokenGrant::RefreshToken(RefreshToken::new(refresh_token.to_owned()));

		self.exchange(FlowKind::Refresh, "renew_access_token", grant).await
	}
}
