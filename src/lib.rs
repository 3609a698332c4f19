//! OAuth 2.0 client for the Misisipy e-commerce platform: app login links, authorization-code
//! exchanges, refresh-token renewals, and expiry checks, with caller-owned token storage.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test`
	//! crate feature.

	pub use crate::_prelude::*;

	// crates.io
	use oauth2::{
		HttpClientError, HttpRequest, HttpResponse,
		http::{StatusCode, header::CONTENT_TYPE},
	};
	// self
	use crate::{
		auth::Credentials,
		clock::FixedClock,
		flows::TokenClient,
		http::{TokenHttpClient, TransportFuture},
	};

	/// Client identifier used by test fixtures.
	pub const CLIENT_ID: &str = "client-fixture";
	/// Client secret used by test fixtures.
	pub const CLIENT_SECRET: &str = "secret-fixture";
	/// Unix timestamp the fixture clock starts at.
	pub const FIXTURE_NOW: i64 = 1_700_000_000;

	/// Request captured by [`StubHttpClient`].
	#[derive(Clone, Debug, PartialEq, Eq)]
	pub struct RecordedRequest {
		/// HTTP method.
		pub method: String,
		/// Target URI.
		pub uri: String,
		/// `Content-Type` header, if any.
		pub content_type: Option<String>,
		/// Decoded form body, in wire order.
		pub form: Vec<(String, String)>,
	}

	/// Error type for [`StubHttpClient`]; never produced.
	#[derive(Debug, ThisError)]
	#[error("Stub transport failure.")]
	pub struct StubTransportError;

	/// In-memory transport that records requests and replays a canned response.
	#[derive(Clone, Debug)]
	pub struct StubHttpClient {
		status: u16,
		body: String,
		requests: Arc<Mutex<Vec<RecordedRequest>>>,
	}
	impl StubHttpClient {
		/// Replies to every request with `status` and `body`.
		pub fn respond(status: u16, body: impl Into<String>) -> Self {
			Self { status, body: body.into(), requests: Default::default() }
		}

		/// Returns every request received so far.
		pub fn requests(&self) -> Vec<RecordedRequest> {
			self.requests.lock().clone()
		}
	}
	impl Default for StubHttpClient {
		fn default() -> Self {
			Self::respond(200, "{}")
		}
	}
	impl TokenHttpClient for StubHttpClient {
		type TransportError = StubTransportError;

		fn execute(&self, request: HttpRequest) -> TransportFuture<'_, StubTransportError> {
			Box::pin(async move {
				let form = url::form_urlencoded::parse(request.body())
					.map(|(key, value)| (key.into_owned(), value.into_owned()))
					.collect();

				self.requests.lock().push(RecordedRequest {
					method: request.method().to_string(),
					uri: request.uri().to_string(),
					content_type: request
						.headers()
						.get(CONTENT_TYPE)
						.and_then(|value| value.to_str().ok())
						.map(str::to_owned),
					form,
				});

				let mut response = HttpResponse::new(self.body.clone().into_bytes());

				*response.status_mut() = StatusCode::from_u16(self.status)
					.map_err(|e| HttpClientError::<StubTransportError>::Other(e.to_string()))?;

				Ok(response)
			})
		}
	}

	/// Clock frozen at [`FIXTURE_NOW`].
	pub fn fixed_clock() -> FixedClock {
		FixedClock::at_unix(FIXTURE_NOW).expect("Fixture timestamp must be in range.")
	}

	/// Builds a [`TokenClient`] over `stub` with the fixture credentials.
	pub fn stub_client(stub: StubHttpClient) -> TokenClient<StubHttpClient> {
		TokenClient::with_http_client(Credentials::new(CLIENT_ID, CLIENT_SECRET), stub)
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
