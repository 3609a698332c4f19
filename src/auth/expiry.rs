//! Expiry lookups shared by typed records and caller-persisted JSON maps.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, auth::TokenRecord};

/// Field name holding the absolute expiry in persisted token maps.
pub const EXPIRATION_FIELD: &str = "expiration_date_time";

/// Anything that can report when a token stops being valid.
pub trait TokenExpiry {
	/// Returns the absolute expiry, or `None` when it is unknown.
	fn expiration_date_time(&self) -> Option<OffsetDateTime>;
}
impl TokenExpiry for TokenRecord {
	fn expiration_date_time(&self) -> Option<OffsetDateTime> {
		Some(self.expiration_date_time)
	}
}
impl TokenExpiry for Map<String, Value> {
	fn expiration_date_time(&self) -> Option<OffsetDateTime> {
		self.get(EXPIRATION_FIELD).and_then(timestamp_from_value)
	}
}
impl TokenExpiry for Value {
	fn expiration_date_time(&self) -> Option<OffsetDateTime> {
		self.as_object().and_then(TokenExpiry::expiration_date_time)
	}
}
impl<T> TokenExpiry for Option<T>
where
	T: TokenExpiry,
{
	fn expiration_date_time(&self) -> Option<OffsetDateTime> {
		self.as_ref().and_then(TokenExpiry::expiration_date_time)
	}
}

/// Returns `true` unless `expiry` is known and lies strictly after `now`.
pub fn is_expired_at<R>(record: &R, now: OffsetDateTime) -> bool
where
	R: ?Sized + TokenExpiry,
{
	!matches!(record.expiration_date_time(), Some(expiry) if expiry > now)
}

// Integers, floats (truncated), and numeric strings are all accepted.
fn timestamp_from_value(value: &Value) -> Option<OffsetDateTime> {
	let seconds = match value {
		Value::Number(number) =>
			number.as_i64().or_else(|| number.as_f64().and_then(truncate_seconds))?,
		Value::String(text) => {
			let text = text.trim();

			text.parse::<i64>()
				.ok()
				.or_else(|| text.parse::<f64>().ok().and_then(truncate_seconds))?
		},
		_ => return None,
	};

	OffsetDateTime::from_unix_timestamp(seconds).ok()
}

fn truncate_seconds(value: f64) -> Option<i64> {
	if value.is_finite() && (i64::MIN as f64..=i64::MAX as f64).contains(&value) {
		Some(value.trunc() as i64)
	} else {
		None
	}
}
