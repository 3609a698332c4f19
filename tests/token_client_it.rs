// std
use std::{
	fmt::{Display, Formatter, Result as FmtResult},
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};
// crates.io
use serde_json::json;
use time::{Duration, OffsetDateTime};
// self
use misisipy_auth::{
	auth::{Credentials, TokenRecord},
	clock::FixedClock,
	error::{Error, ProtocolError, ResponseParseError, TransportError},
	flows::TokenClient,
	http::{TokenHttpClient, TransportFuture},
	oauth::oauth2::{HttpClientError, HttpRequest, HttpResponse, http::StatusCode},
};

const CLIENT_ID: &str = "app-001";
const CLIENT_SECRET: &str = "app-secret";
const T: i64 = 1_735_689_600;

#[derive(Debug)]
struct ConnectionReset;
impl Display for ConnectionReset {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("connection reset by peer")
	}
}
impl std::error::Error for ConnectionReset {}

/// Replays a canned reply and counts how often it was hit.
struct ScriptedHttpClient {
	reply: Option<(u16, &'static str)>,
	calls: AtomicUsize,
}
impl ScriptedHttpClient {
	fn replying(status: u16, body: &'static str) -> Self {
		Self { reply: Some((status, body)), calls: AtomicUsize::new(0) }
	}

	fn unreachable() -> Self {
		Self { reply: None, calls: AtomicUsize::new(0) }
	}

	fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}
impl TokenHttpClient for ScriptedHttpClient {
	type TransportError = ConnectionReset;

	fn execute(&self, _request: HttpRequest) -> TransportFuture<'_, ConnectionReset> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let reply = self.reply;

		Box::pin(async move {
			let (status, body) =
				reply.ok_or_else(|| HttpClientError::Reqwest(Box::new(ConnectionReset)))?;
			let mut response = HttpResponse::new(body.as_bytes().to_vec());

			*response.status_mut() =
				StatusCode::from_u16(status).expect("Scripted status should be valid.");

			Ok(response)
		})
	}
}

fn clock() -> Arc<FixedClock> {
	Arc::new(FixedClock::at_unix(T).expect("Fixture timestamp should be in range."))
}

fn client(
	transport: Arc<ScriptedHttpClient>,
	clock: Arc<FixedClock>,
) -> TokenClient<ScriptedHttpClient> {
	TokenClient::with_http_client(Credentials::new(CLIENT_ID, CLIENT_SECRET), transport)
		.with_clock(clock)
}

#[test]
fn login_url_embeds_account_and_client_ids_without_network() {
	let transport = Arc::new(ScriptedHttpClient::unreachable());
	let client = client(transport.clone(), clock());

	for account_id in ["1", "42", "store-xyz"] {
		let url = client.login_url(account_id).expect("Login URL should build.");

		assert_eq!(
			url.as_str(),
			format!("https://misisipy.com/{account_id}/app/login/client_id/{CLIENT_ID}")
		);
		assert_eq!(url, client.login_url(account_id).expect("Login URL should build."));
	}

	assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn server_errors_fail_both_grants_with_the_status() {
	let client = client(Arc::new(ScriptedHttpClient::replying(500, "")), clock());
	let exchange = client.request_access_token("code").await;
	let renewal = client.renew_access_token("refresh").await;

	for result in [exchange, renewal] {
		let err = result.expect_err("A 500 response should fail.");

		assert!(matches!(
			err,
			Error::Transport(TransportError::Status { status: 500, provider: None })
		));
	}
}

#[tokio::test]
async fn oauth_errors_fail_both_grants_with_code_and_description() {
	let client = client(
		Arc::new(ScriptedHttpClient::replying(
			200,
			r#"{"error":"invalid_grant","error_description":"bad code"}"#,
		)),
		clock(),
	);
	let exchange = client.request_access_token("code").await;
	let renewal = client.renew_access_token("refresh").await;

	for result in [exchange, renewal] {
		let err = result.expect_err("An OAuth error payload should fail.");

		assert_eq!(err.to_string(), "[invalid_grant] bad code");

		let Error::Protocol(ProtocolError { code, description }) = err else {
			panic!("Expected a protocol error, got {err:?}.");
		};

		assert_eq!(code, "invalid_grant");
		assert_eq!(description, "bad code");
	}
}

#[tokio::test]
async fn successful_exchange_anchors_expiry_at_the_clock() {
	let transport = Arc::new(ScriptedHttpClient::replying(
		200,
		r#"{"access_token":"abc","expires_in":3600,"scope":"read"}"#,
	));
	let client = client(transport.clone(), clock());
	let record = client.request_access_token("code").await.expect("Exchange should succeed.");

	assert_eq!(record.access_token.secret(), "abc");
	assert_eq!(record.scope, "read");
	assert_eq!(record.expires_in, 3600);
	assert_eq!(record.expiration_timestamp(), T + 3600);
	assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn renewal_computes_expiry_the_same_way() {
	let clock = clock();
	let client = client(
		Arc::new(ScriptedHttpClient::replying(
			200,
			r#"{"access_token":"abc","expires_in":3600,"scope":"read"}"#,
		)),
		clock.clone(),
	);

	clock.advance(Duration::seconds(10));

	let record = client.renew_access_token("refresh").await.expect("Renewal should succeed.");

	assert_eq!(record.expiration_timestamp(), T + 10 + 3600);
}

#[tokio::test]
async fn expiry_check_follows_the_clock() {
	let clock = clock();
	let client = client(
		Arc::new(ScriptedHttpClient::replying(
			200,
			r#"{"access_token":"abc","expires_in":3600,"scope":"read"}"#,
		)),
		clock.clone(),
	);
	let record = client.request_access_token("code").await.expect("Exchange should succeed.");

	assert!(!client.is_token_expired(&record));

	clock.set(OffsetDateTime::from_unix_timestamp(T + 3600).expect("Timestamp should be valid."));

	assert!(client.is_token_expired(&record));

	clock.advance(Duration::seconds(1));

	assert!(client.is_token_expired(&record));
	assert!(client.is_token_expired(&json!({ "access_token": "abc", "scope": "read" })));
}

#[tokio::test]
async fn persisted_records_round_trip_through_json() {
	let clock = clock();
	let client = client(
		Arc::new(ScriptedHttpClient::replying(
			200,
			r#"{"access_token":"abc","refresh_token":"def","expires_in":3600,"scope":"read"}"#,
		)),
		clock.clone(),
	);
	let record = client.request_access_token("code").await.expect("Exchange should succeed.");
	let stored = serde_json::to_value(&record).expect("Record should serialize.");

	assert_eq!(stored["expiration_date_time"], T + 3600);
	assert!(!client.is_token_expired(&stored));

	let restored: TokenRecord =
		serde_json::from_value(stored).expect("Record should deserialize.");

	assert_eq!(restored.refresh_secret(), Some("def"));
	assert_eq!(restored.expiration_date_time, record.expiration_date_time);
}

#[tokio::test]
async fn malformed_bodies_are_parse_errors() {
	for body in [
		"not json",
		r#"{"scope":"read","expires_in":3600}"#,
		r#"{"access_token":"abc"}"#,
		r#"{"access_token":"a","expires_in":60,"scope":"s"} <html>garbage"#,
	] {
		let client = client(Arc::new(ScriptedHttpClient::replying(200, body)), clock());
		let exchange = client.request_access_token("code").await;
		let renewal = client.renew_access_token("refresh").await;

		for result in [exchange, renewal] {
			let err = result.expect_err("Bad bodies should fail.");

			assert!(
				matches!(err, Error::ResponseParse(ResponseParseError::Malformed { .. })),
				"Unexpected error for {body:?}: {err:?}."
			);
		}
	}
}

#[tokio::test]
async fn unreachable_endpoints_are_transport_errors() {
	let transport = Arc::new(ScriptedHttpClient::unreachable());
	let client = client(transport.clone(), clock());
	let err =
		client.renew_access_token("refresh").await.expect_err("Network failures should fail.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	assert_eq!(transport.calls(), 1);
}
