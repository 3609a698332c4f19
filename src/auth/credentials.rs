//! Application credentials issued by the Misisipy partner portal.

// crates.io
use oauth2::{ClientId, ClientSecret};
// self
use crate::_prelude::*;

/// Client identifier and secret shared by every token request.
///
/// The secret is redacted from `Debug` output by [`ClientSecret`].
#[derive(Clone, Debug, Deserialize)]
pub struct Credentials {
	/// Public client identifier of the app.
	pub client_id: ClientId,
	/// Private client secret of the app.
	pub client_secret: ClientSecret,
}
impl Credentials {
	/// Wraps a client id/secret pair.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: ClientId::new(client_id.into()),
			client_secret: ClientSecret::new(client_secret.into()),
		}
	}

	/// Returns the client identifier as a string slice.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// Returns the client secret. Callers must avoid logging it.
	pub fn client_secret(&self) -> &str {
		self.client_secret.secret()
	}
}
