use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	pub search: Search,
	#[serde(default)]
	pub mail: Mail,
	pub vocabulary: Option<VocabularyOverrides>,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
	/// Budget for one store retrieval; distinct from (and usually smaller than) the
	/// scorer timeout, which covers the higher-latency oracle call.
	#[serde(default = "default_store_timeout_ms")]
	pub query_timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub scorer: ScorerProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct ScorerProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	#[serde(default = "default_top_k")]
	pub default_top_k: u32,
	#[serde(default = "default_pool_limit")]
	pub pool_limit: u32,
	#[serde(default = "default_strictness")]
	pub default_strictness: String,
	#[serde(default = "default_max_ranked")]
	pub max_ranked: u32,
}

#[derive(Debug, Deserialize)]
pub struct Mail {
	#[serde(default = "default_signature")]
	pub signature: String,
}

/// Per-deployment vocabulary extensions. Keys are canonical lower-cased terms;
/// values replace the built-in alias set for that term. `skill_families` keys are
/// family labels and values are the substring markers that route a requested skill
/// into that family under balanced strictness.
#[derive(Debug, Default, Deserialize)]
pub struct VocabularyOverrides {
	#[serde(default)]
	pub countries: HashMap<String, Vec<String>>,
	#[serde(default)]
	pub skills: HashMap<String, Vec<String>>,
	#[serde(default)]
	pub titles: HashMap<String, Vec<String>>,
	#[serde(default)]
	pub skill_families: HashMap<String, Vec<String>>,
}

impl Default for Mail {
	fn default() -> Self {
		Self { signature: default_signature() }
	}
}

fn default_store_timeout_ms() -> u64 {
	5_000
}

fn default_top_k() -> u32 {
	50
}

fn default_pool_limit() -> u32 {
	50
}

fn default_strictness() -> String {
	"balanced".to_string()
}

fn default_max_ranked() -> u32 {
	10
}

fn default_signature() -> String {
	"Sent by Vita".to_string()
}
