//! Login links and authorization-code exchanges.
//!
//! Apps send merchants to [`TokenClient::login_url`]; after consent the platform
//! redirects back with a one-time `code` that [`TokenClient::request_access_token`]
//! trades for a [`TokenRecord`].

// crates.io
use oauth2::AuthorizationCode;
// self
use crate::{
	_prelude::*,
	auth::TokenRecord,
	config::EndpointsError,
	error::ConfigError,
	flows::TokenClient,
	http::TokenHttpClient,
	oauth::TokenGrant,
	obs::FlowKind,
};

impl<C> TokenClient<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Builds the app login link for `account_id`.
	///
	/// The link has the shape `{login}/{account_id}/app/login/client_id/{client_id}`. No
	/// network call is made and the output depends only on the inputs.
	///
	/// Reserved characters in `account_id` are percent-encoded. The dot segments `.` and
	/// `..` cannot be escaped in a URL path (`%2E` is decoded as a dot), so such ids are
	/// dropped and the link points at `{login}/app/login/client_id/{client_id}`, which is
	/// where a browser lands for the unescaped link as well.
	pub fn login_url(&self, account_id: impl Display) -> Result<Url> {
		let mut url = self.endpoints.login.clone();
		let account_id = account_id.to_string();

		url.path_segments_mut()
			.map_err(|_| {
				ConfigError::from(EndpointsError::CannotBeABase {
					endpoint: "login",
					url: self.endpoints.login.to_string(),
				})
			})?
			.pop_if_empty()
			.extend([
				account_id.as_str(),
				"app",
				"login",
				"client_id",
				self.credentials.client_id(),
			]);

		Ok(url)
	}

	/// Exchanges an authorization code for a token record.
	///
	/// # Errors
	///
	/// - [`Error::Transport`] when the endpoint cannot be reached or answers with a
	///   non-success status.
	/// - [`Error::Protocol`] when the payload carries an OAuth `error`.
	/// - [`Error::ResponseParse`] when the payload is not a valid token response.
	pub async fn request_access_token(&self, code: &str) -> Result<TokenRecord> {
		let grant = TokenGrant::AuthorizationCode(AuthorizationCode::new(code.to_owned()));

		self.exchange(FlowKind::AuthorizationCode, "request_access_token", grant).await
	}
}
