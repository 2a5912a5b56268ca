mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, Mail, Postgres, Providers, ScorerProviderConfig, Search, Service, Storage,
	VocabularyOverrides,
};

use std::{fs, path::Path};

pub const STRICTNESS_MODES: [&str; 3] = ["strict", "balanced", "relaxed"];

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.postgres.query_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.query_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.scorer.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.scorer.api_key must be non-empty.".to_string(),
		});
	}
	if cfg.providers.scorer.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.scorer.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if !cfg.providers.scorer.temperature.is_finite() || cfg.providers.scorer.temperature < 0.0 {
		return Err(Error::Validation {
			message: "providers.scorer.temperature must be a finite non-negative number."
				.to_string(),
		});
	}
	if cfg.search.default_top_k == 0 {
		return Err(Error::Validation {
			message: "search.default_top_k must be greater than zero.".to_string(),
		});
	}
	if cfg.search.pool_limit == 0 {
		return Err(Error::Validation {
			message: "search.pool_limit must be greater than zero.".to_string(),
		});
	}
	if !(1..=10).contains(&cfg.search.max_ranked) {
		return Err(Error::Validation {
			message: "search.max_ranked must be in the range 1-10.".to_string(),
		});
	}
	if !STRICTNESS_MODES.contains(&cfg.search.default_strictness.as_str()) {
		return Err(Error::Validation {
			message: "search.default_strictness must be one of strict, balanced, or relaxed."
				.to_string(),
		});
	}
	if cfg.mail.signature.trim().is_empty() {
		return Err(Error::Validation { message: "mail.signature must be non-empty.".to_string() });
	}

	if let Some(vocabulary) = cfg.vocabulary.as_ref() {
		for (label, table) in [
			("countries", &vocabulary.countries),
			("skills", &vocabulary.skills),
			("titles", &vocabulary.titles),
			("skill_families", &vocabulary.skill_families),
		] {
			for (term, aliases) in table {
				if term.trim().is_empty() {
					return Err(Error::Validation {
						message: format!("vocabulary.{label} contains an empty term."),
					});
				}
				if aliases.iter().any(|alias| alias.trim().is_empty()) {
					return Err(Error::Validation {
						message: format!(
							"vocabulary.{label} entry {term:?} contains an empty alias."
						),
					});
				}
			}
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.search.default_strictness = cfg.search.default_strictness.trim().to_lowercase();

	if let Some(vocabulary) = cfg.vocabulary.as_mut() {
		for table in
			[&mut vocabulary.countries, &mut vocabulary.skills, &mut vocabulary.titles]
		{
			let lowered = table
				.drain()
				.map(|(term, aliases)| {
					let aliases = aliases
						.into_iter()
						.map(|alias| alias.trim().to_lowercase())
						.collect::<Vec<_>>();

					(term.trim().to_lowercase(), aliases)
				})
				.collect();

			*table = lowered;
		}
	}
}
