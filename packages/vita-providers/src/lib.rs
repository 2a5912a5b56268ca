mod error;
pub mod scorer;

pub use error::{Error, Result};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName};
use serde_json::{Map, Value};

pub fn auth_headers(api_key: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(AUTHORIZATION, format!("Bearer {api_key}").parse()?);

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "Default header values must be strings.".to_string(),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn auth_headers_carry_bearer_and_defaults() {
		let mut defaults = Map::new();

		defaults.insert("x-vita-tenant".to_string(), Value::String("acme".to_string()));

		let headers = auth_headers("key-123", &defaults).expect("headers must build");

		assert_eq!(headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()), Some("Bearer key-123"));
		assert_eq!(headers.get("x-vita-tenant").and_then(|v| v.to_str().ok()), Some("acme"));
	}

	#[test]
	fn non_string_default_header_is_rejected() {
		let mut defaults = Map::new();

		defaults.insert("x-bad".to_string(), Value::Bool(true));

		assert!(auth_headers("key", &defaults).is_err());
	}
}
