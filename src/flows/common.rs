//! Shared token exchange path used by both grants.

// self
use crate::{
	_prelude::*,
	auth::TokenRecord,
	flows::TokenClient,
	http::{self, TokenHttpClient},
	oauth::{self, TokenGrant},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<C> TokenClient<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Posts `grant` to the token endpoint and normalizes the response.
	///
	/// The receipt instant is read from the clock once the response is back, truncated to
	/// whole seconds, and used as the anchor for `expiration_date_time`.
	pub(crate) async fn exchange(
		&self,
		kind: FlowKind,
		stage: &'static str,
		grant: TokenGrant,
	) -> Result<TokenRecord> {
		let span = FlowSpan::new(kind, stage);

		obs::record_flow_outcome(kind, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request =
					oauth::build_token_request(&self.endpoints.token, &self.credentials, &grant)?;
				let response =
					self.http_client.execute(request).await.map_err(http::map_transport_error)?;
				let received_at = self.clock.now();

				oauth::decode_token_response(&response)?.into_record(received_at)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(kind, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(kind, FlowOutcome::Failure),
		}

		result
	}
}
