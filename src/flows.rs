//! Token flows built on a single [`TokenClient`].

pub mod authorization_code;
pub mod refresh;

mod common;

// self
use crate::{
	_prelude::*,
	auth::{self, Credentials, TokenExpiry},
	clock::{Clock, SystemClock},
	config::Endpoints,
	http::TokenHttpClient,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Token client specialized for the crate's default reqwest transport.
pub type ReqwestTokenClient = TokenClient<ReqwestHttpClient>;

/// Client for the Misisipy authorization server.
///
/// The client owns the app credentials, endpoint configuration, clock, and HTTP transport.
/// It keeps no per-call state: every grant performs exactly one POST and hands the
/// resulting [`TokenRecord`](crate::auth::TokenRecord) back to the caller, who is
/// responsible for storing it.
#[derive(Clone)]
pub struct TokenClient<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// HTTP client used for every outbound token request.
	pub http_client: Arc<C>,
	/// App credentials sent with every grant.
	pub credentials: Credentials,
	/// Token and login endpoints.
	pub endpoints: Endpoints,
	/// Clock used to stamp and check expirations.
	pub clock: Arc<dyn Clock>,
}
impl<C> TokenClient<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(credentials: Credentials, http_client: impl Into<Arc<C>>) -> Self {
		Self {
			http_client: http_client.into(),
			credentials,
			endpoints: Endpoints::default(),
			clock: Arc::new(SystemClock),
		}
	}

	/// Replaces the default Misisipy endpoints.
	pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
		self.endpoints = endpoints;

		self
	}

	/// Replaces the system clock.
	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;

		self
	}

	/// Reports whether `record` must be renewed.
	///
	/// Returns `false` only when the record carries an expiry strictly after the client's
	/// current time; missing or unreadable expiries count as expired.
	pub fn is_token_expired<R>(&self, record: &R) -> bool
	where
		R: ?Sized + TokenExpiry,
	{
		auth::is_expired_at(record, self.clock.now())
	}
}
#[cfg(feature = "reqwest")]
impl TokenClient<ReqwestHttpClient> {
	/// Creates a client for the app identified by `client_id` and `client_secret`.
	///
	/// The client provisions its own reqwest transport, which does not follow redirects, and
	/// targets the default Misisipy endpoints; use [`TokenClient::with_endpoints`] to point it
	/// elsewhere.
	///
	/// # Errors
	///
	/// Returns [`Error::Config`] when the reqwest client cannot be built (for example when
	/// the TLS backend fails to initialize).
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
		Ok(Self::with_http_client(
			Credentials::new(client_id, client_secret),
			ReqwestHttpClient::without_redirects()?,
		))
	}
}
impl<C> Debug for TokenClient<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenClient")
			.field("client_id", &self.credentials.client_id())
			.field("endpoints", &self.endpoints)
			.field("clock", &self.clock)
			.finish()
	}
}
