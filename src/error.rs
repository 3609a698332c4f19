//! Client-level error types shared by the token flows, transport, and configuration layers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token endpoint could not be reached or answered with a non-success status.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token endpoint answered successfully but the payload reports an OAuth error.
	#[error(transparent)]
	Protocol(#[from] ProtocolError),
	/// Token endpoint payload does not match the expected schema.
	#[error(transparent)]
	ResponseParse(#[from] ResponseParseError),
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Endpoint configuration is invalid.
	#[error(transparent)]
	Endpoints(#[from] crate::config::EndpointsError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures: HTTP status, network, or I/O.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Token endpoint answered with a non-success HTTP status.
	#[error("Auth url returned with status code {status}.")]
	Status {
		/// HTTP status code returned by the token endpoint.
		status: u16,
		/// OAuth error carried by the response body, when it decodes as one.
		#[source]
		provider: Option<ProtocolError>,
	},
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the token endpoint.")]
	Io(#[from] std::io::Error),
	/// HTTP client failed for a reason it could only describe as text.
	#[error("HTTP client error occurred while calling the token endpoint: {message}.")]
	Other {
		/// Transport-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Returns the HTTP status code, if the failure carried one.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// OAuth error reported by the provider inside a response body.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("[{code}] {description}")]
pub struct ProtocolError {
	/// Provider error code (the `error` field).
	pub code: String,
	/// Human-readable description (the `error_description` field).
	pub description: String,
}

/// Token endpoint payloads that could not be turned into a token record.
#[derive(Debug, ThisError)]
pub enum ResponseParseError {
	/// Body is not JSON, carries trailing content, or misses required fields.
	#[error("Token endpoint returned a malformed response at `{path}`.")]
	Malformed {
		/// JSON path of the failure; `.` for the document root.
		path: String,
		/// Underlying JSON error.
		#[source]
		source: serde_json::Error,
	},
	/// `expires_in` pushes the expiration past the representable range.
	#[error("The expires_in value {expires_in} exceeds the supported range.")]
	ExpirationOutOfRange {
		/// Raw `expires_in` returned by the provider.
		expires_in: i64,
	},
}
impl From<serde_path_to_error::Error<serde_json::Error>> for ResponseParseError {
	fn from(error: serde_path_to_error::Error<serde_json::Error>) -> Self {
		Self::Malformed { path: error.path().to_string(), source: error.into_inner() }
	}
}
