// std
use std::time::Duration as StdDuration;

// crates.io
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

// self
use crate::{Error, Result};

/// The ranked result may never carry more identifiers than this.
pub const MAX_RANKED: usize = 10;

const EVALUATOR_PREAMBLE: &str = "\
You are a resume scoring assistant. Return only the 10 best resumeIds with all the matching according to the query.

JSON format:
{
  \"top_resume_ids\": [...],
  \"completed_at\": \"ISO\"
}
";

/// The oracle's structured verdict. Treated as untrusted: callers must still
/// intersect `top_resume_ids` with the candidate pool.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ScorerVerdict {
	#[serde(default)]
	pub top_resume_ids: Vec<String>,
	#[serde(default)]
	pub completed_at: Option<String>,
}

/// One chat-completions call scoring a candidate pool against a query. The pool
/// arrives pre-bounded, so the serialized payload size is already capped.
pub async fn score(
	cfg: &vita_config::ScorerProviderConfig,
	query: &str,
	candidates: &Value,
) -> Result<ScorerVerdict> {
	let client = Client::builder().timeout(StdDuration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"response_format": { "type": "json_object" },
		"messages": [
			{ "role": "system", "content": EVALUATOR_PREAMBLE },
			{ "role": "user", "content": format!("Query: {query}\n\nResumes: {candidates}") },
		],
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_scorer_response(json)
}

fn parse_scorer_response(json: Value) -> Result<ScorerVerdict> {
	let content = json
		.get("choices")
		.and_then(|choices| choices.get(0))
		.and_then(|choice| choice.get("message"))
		.and_then(|message| message.get("content"))
		.and_then(Value::as_str)
		.ok_or_else(|| Error::InvalidResponse {
			message: "Scorer response is missing choices[0].message.content.".to_string(),
		})?;
	let mut verdict: ScorerVerdict =
		serde_json::from_str(content).map_err(|_| Error::InvalidResponse {
			message: "Scorer content is not the expected JSON object.".to_string(),
		})?;

	verdict.top_resume_ids.truncate(MAX_RANKED);

	Ok(verdict)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn chat_response(content: &str) -> Value {
		serde_json::json!({ "choices": [ { "message": { "content": content } } ] })
	}

	#[test]
	fn parses_verdict_from_choice_content() {
		let json = chat_response(
			r#"{ "top_resume_ids": ["r2", "r1"], "completed_at": "2026-08-23T10:00:00Z" }"#,
		);
		let verdict = parse_scorer_response(json).expect("verdict must parse");

		assert_eq!(verdict.top_resume_ids, vec!["r2".to_string(), "r1".to_string()]);
		assert_eq!(verdict.completed_at.as_deref(), Some("2026-08-23T10:00:00Z"));
	}

	#[test]
	fn truncates_overlong_id_lists() {
		let ids = (0..15).map(|i| format!("\"r{i}\"")).collect::<Vec<_>>().join(",");
		let json = chat_response(&format!(r#"{{ "top_resume_ids": [{ids}] }}"#));
		let verdict = parse_scorer_response(json).expect("verdict must parse");

		assert_eq!(verdict.top_resume_ids.len(), MAX_RANKED);
	}

	#[test]
	fn missing_fields_default_to_empty() {
		let verdict = parse_scorer_response(chat_response("{}")).expect("verdict must parse");

		assert!(verdict.top_resume_ids.is_empty());
		assert!(verdict.completed_at.is_none());
	}

	#[test]
	fn malformed_content_is_an_invalid_response() {
		assert!(parse_scorer_response(chat_response("not json")).is_err());
		assert!(parse_scorer_response(serde_json::json!({ "choices": [] })).is_err());
	}
}
