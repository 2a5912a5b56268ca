use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use vita_config::Config;

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_value() -> Value {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.")
}

fn render(value: &Value) -> String {
	toml::to_string(value).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("vita_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> vita_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = vita_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn set_search_field(value: &mut Value, field: &str, new: Value) {
	value
		.as_table_mut()
		.and_then(|root| root.get_mut("search"))
		.and_then(Value::as_table_mut)
		.expect("Template config must include [search].")
		.insert(field.to_string(), new);
}

#[test]
fn template_config_loads() {
	let cfg = load_payload(render(&sample_value())).expect("Template config must load.");

	assert_eq!(cfg.search.default_top_k, 50);
	assert_eq!(cfg.search.default_strictness, "balanced");
	assert_eq!(cfg.mail.signature, "Sent by Vita");
}

#[test]
fn strictness_is_normalized_to_lowercase() {
	let mut value = sample_value();

	set_search_field(&mut value, "default_strictness", Value::String("Strict".to_string()));

	let cfg = load_payload(render(&value)).expect("Upper-cased strictness must normalize.");

	assert_eq!(cfg.search.default_strictness, "strict");
}

#[test]
fn unknown_strictness_is_rejected() {
	let mut value = sample_value();

	set_search_field(&mut value, "default_strictness", Value::String("fuzzy".to_string()));

	let err = load_payload(render(&value)).expect_err("Expected strictness validation error.");

	assert!(
		err.to_string().contains("search.default_strictness must be one of"),
		"Unexpected error: {err}"
	);
}

#[test]
fn max_ranked_is_capped_at_ten() {
	let mut value = sample_value();

	set_search_field(&mut value, "max_ranked", Value::Integer(11));

	let err = load_payload(render(&value)).expect_err("Expected max_ranked validation error.");

	assert!(
		err.to_string().contains("search.max_ranked must be in the range 1-10."),
		"Unexpected error: {err}"
	);
}

#[test]
fn scorer_api_key_must_be_non_empty() {
	let mut value = sample_value();

	value
		.as_table_mut()
		.and_then(|root| root.get_mut("providers"))
		.and_then(Value::as_table_mut)
		.and_then(|providers| providers.get_mut("scorer"))
		.and_then(Value::as_table_mut)
		.expect("Template config must include [providers.scorer].")
		.insert("api_key".to_string(), Value::String("  ".to_string()));

	let err = load_payload(render(&value)).expect_err("Expected api_key validation error.");

	assert!(
		err.to_string().contains("providers.scorer.api_key must be non-empty."),
		"Unexpected error: {err}"
	);
}

#[test]
fn vocabulary_aliases_are_lowercased() {
	let mut payload = render(&sample_value());

	payload.push_str("\n[vocabulary.countries]\nindonesia = [\"Indonesian\", \"INDONESIA\"]\n");

	let cfg = load_payload(payload).expect("Vocabulary override must load.");
	let vocabulary = cfg.vocabulary.expect("Vocabulary override must be present.");
	let aliases = vocabulary.countries.get("indonesia").expect("Override term must survive.");

	assert_eq!(aliases, &vec!["indonesian".to_string(), "indonesia".to_string()]);
}

#[test]
fn vocabulary_empty_alias_is_rejected() {
	let mut payload = render(&sample_value());

	payload.push_str("\n[vocabulary.skills]\nsql = [\"mysql\", \"\"]\n");

	let err = load_payload(payload).expect_err("Expected empty-alias validation error.");

	assert!(
		err.to_string().contains("vocabulary.skills entry \"sql\" contains an empty alias."),
		"Unexpected error: {err}"
	);
}

#[test]
fn missing_config_file_reports_path() {
	let mut path = env::temp_dir();

	path.push("vita_config_test_missing.toml");

	let err = vita_config::load(&path).expect_err("Expected read error for missing file.");

	assert!(err.to_string().contains("Failed to read config file"), "Unexpected error: {err}");
}
