//! Token endpoint wire format: grant forms, request construction, and response schemas.

pub use oauth2;

// crates.io
use oauth2::{
	AccessToken, AuthorizationCode, HttpRequest, HttpResponse, RefreshToken,
	http::{
		Method, Request,
		header::{ACCEPT, CONTENT_TYPE},
	},
};
use serde::de::{Deserializer, Error as DeError};
use serde_json::Value;
use url::form_urlencoded::Serializer as FormSerializer;
// self
use crate::{
	_prelude::*,
	auth::{Credentials, TokenRecord},
	error::{ConfigError, ProtocolError, ResponseParseError, TransportError},
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Grant presented to the token endpoint.
#[derive(Debug)]
pub enum TokenGrant {
	/// One-time code obtained from the login redirect.
	AuthorizationCode(AuthorizationCode),
	/// Refresh token from a previous exchange.
	RefreshToken(RefreshToken),
}
impl TokenGrant {
	/// Returns the `grant_type` form value.
	pub const fn grant_type(&self) -> &'static str {
		match self {
			TokenGrant::AuthorizationCode(_) => "authorization_code",
			TokenGrant::RefreshToken(_) => "refresh_token",
		}
	}

	/// Builds the form parameters sent for this grant, in wire order.
	pub fn form_params<'a>(&'a self, credentials: &'a Credentials) -> [(&'static str, &'a str); 4] {
		let (key, value) = match self {
			TokenGrant::AuthorizationCode(code) => ("code", code.secret().as_str()),
			TokenGrant::RefreshToken(token) => ("refresh_token", token.secret().as_str()),
		};

		[
			("client_id", credentials.client_id()),
			("client_secret", credentials.client_secret()),
			(key, value),
			("grant_type", self.grant_type()),
		]
	}
}

/// Builds the form-encoded POST for `grant`.
pub fn build_token_request(
	token_endpoint: &Url,
	credentials: &Credentials,
	grant: &TokenGrant,
) -> Result<HttpRequest> {
	let body = FormSerializer::new(String::new())
		.extend_pairs(grant.form_params(credentials))
		.finish();
	let request = Request::builder()
		.method(Method::POST)
		.uri(token_endpoint.as_str())
		.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
		.header(ACCEPT, JSON_CONTENT_TYPE)
		.body(body.into_bytes())
		.map_err(ConfigError::from)?;

	Ok(request)
}

/// Successful token endpoint payload.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
	/// Issued access token.
	pub access_token: AccessToken,
	/// Refresh token, when the provider rotates or issues one.
	#[serde(default)]
	pub refresh_token: Option<RefreshToken>,
	/// Granted scope; providers may omit it when unchanged.
	#[serde(default)]
	pub scope: String,
	/// Lifetime in seconds, coerced from an integer, float, or numeric string.
	#[serde(deserialize_with = "deserialize_seconds")]
	pub expires_in: i64,
}
impl TokenResponse {
	/// Converts the payload into a record whose expiry is anchored at `received_at`.
	pub fn into_record(self, received_at: OffsetDateTime) -> Result<TokenRecord> {
		let expires_in = self.expires_in;
		let expiration_date_time = received_at
			.unix_timestamp()
			.checked_add(expires_in)
			.and_then(|timestamp| OffsetDateTime::from_unix_timestamp(timestamp).ok())
			.ok_or(ResponseParseError::ExpirationOutOfRange { expires_in })?;

		Ok(TokenRecord {
			access_token: self.access_token,
			refresh_token: self.refresh_token,
			scope: self.scope,
			expires_in,
			expiration_date_time,
		})
	}
}

/// OAuth error payload.
///
/// Both fields are kept as raw JSON so providers sending numeric codes still surface as
/// protocol errors.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorResponse {
	/// Provider error code.
	pub error: Value,
	/// Human-readable description; empty when omitted or null.
	#[serde(default)]
	pub error_description: Value,
}
impl From<ErrorResponse> for ProtocolError {
	fn from(response: ErrorResponse) -> Self {
		Self { code: render(response.error), description: render(response.error_description) }
	}
}

/// Classifies a raw token endpoint response.
///
/// Non-success statuses become [`TransportError::Status`], bodies carrying a non-null
/// `error` become [`ProtocolError`], and everything else must match [`TokenResponse`].
pub fn decode_token_response(response: &HttpResponse) -> Result<TokenResponse> {
	let status = response.status();

	if !status.is_success() {
		return Err(TransportError::Status {
			status: status.as_u16(),
			provider: decode_error_body(response.body()),
		}
		.into());
	}

	let mut deserializer = serde_json::Deserializer::from_slice(response.body());
	let value: Value = decode(&mut deserializer)?;

	deserializer
		.end()
		.map_err(|source| ResponseParseError::Malformed { path: ".".into(), source })?;

	if has_error(&value) {
		let error: ErrorResponse = decode(value)?;

		return Err(ProtocolError::from(error).into());
	}

	Ok(decode(value)?)
}

fn decode<'de, D, T>(deserializer: D) -> Result<T, ResponseParseError>
where
	D: Deserializer<'de, Error = serde_json::Error>,
	T: Deserialize<'de>,
{
	serde_path_to_error::deserialize(deserializer).map_err(ResponseParseError::from)
}

fn has_error(value: &Value) -> bool {
	value.get("error").is_some_and(|error| !error.is_null())
}

// Strings render bare, null renders empty, anything else as compact JSON.
fn render(value: Value) -> String {
	match value {
		Value::String(text) => text,
		Value::Null => String::new(),
		other => other.to_string(),
	}
}

fn decode_error_body(body: &[u8]) -> Option<ProtocolError> {
	let value = serde_json::from_slice::<Value>(body).ok()?;

	if !has_error(&value) {
		return None;
	}

	serde_json::from_value::<ErrorResponse>(value).ok().map(ProtocolError::from)
}

fn deserialize_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Seconds {
		Integer(i64),
		Float(f64),
		Text(String),
	}

	let seconds = match Seconds::deserialize(deserializer)? {
		Seconds::Integer(value) => value,
		Seconds::Float(value) if value.is_finite() && value.abs() < i64::MAX as f64 =>
			value.trunc() as i64,
		Seconds::Float(value) => {
			return Err(DeError::custom(format!("expires_in {value} is not a usable number")));
		},
		Seconds::Text(text) => text
			.trim()
			.parse::<i64>()
			.map_err(|_| DeError::custom(format!("expires_in {text:?} is not numeric")))?,
	};

	if seconds < 0 {
		return Err(DeError::custom("expires_in must not be negative"));
	}

	Ok(seconds)
}
