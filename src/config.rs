//! Endpoint configuration for the Misisipy authorization server and login page.

// self
use crate::_prelude::*;

/// Token endpoint used by every grant unless overridden.
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://misisipy.auth0.com/oauth/token";
/// Base URL that app login links are built from.
pub const DEFAULT_LOGIN_BASE: &str = "https://misisipy.com/";

/// Errors raised while validating [`Endpoints`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum EndpointsError {
	/// Endpoints must use HTTPS unless they point at a loopback host.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Login links append path segments, so the base must be hierarchical.
	#[error("The {endpoint} endpoint cannot be used as a base URL: {url}.")]
	CannotBeABase {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Token and login endpoints consumed by [`TokenClient`](crate::flows::TokenClient).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
	/// Token endpoint receiving authorization-code and refresh-token grants.
	pub token: Url,
	/// Base URL for app login links.
	pub login: Url,
}
impl Endpoints {
	/// Validates and assembles a custom endpoint set.
	pub fn new(token: Url, login: Url) -> Result<Self, EndpointsError> {
		let endpoints = Self { token, login };

		endpoints.validate()?;

		Ok(endpoints)
	}

	/// Checks the invariants enforced by [`Endpoints::new`].
	///
	/// Useful after deserializing an endpoint set from caller configuration.
	pub fn validate(&self) -> Result<(), EndpointsError> {
		validate_endpoint("token", &self.token)?;
		validate_endpoint("login", &self.login)?;

		if self.login.cannot_be_a_base() {
			return Err(EndpointsError::CannotBeABase {
				endpoint: "login",
				url: self.login.to_string(),
			});
		}

		Ok(())
	}
}
impl Default for Endpoints {
	fn default() -> Self {
		Self {
			token: Url::parse(DEFAULT_TOKEN_ENDPOINT)
				.expect("Default token endpoint constant must be a valid URL."),
			login: Url::parse(DEFAULT_LOGIN_BASE)
				.expect("Default login base constant must be a valid URL."),
		}
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), EndpointsError> {
	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ => Err(EndpointsError::InsecureEndpoint { endpoint: name, url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(url::Host::Ipv4(addr)) => addr.is_loopback(),
		Some(url::Host::Ipv6(addr)) => addr.is_loopback(),
		None => false,
	}
}
