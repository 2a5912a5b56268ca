use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_K: u32 = 50;

/// Governs how job-title and skill clauses combine; see `filter::compile`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
	/// Every requested title and every requested skill must match.
	Strict,
	/// At least one title must match; skills are grouped into families and every
	/// family must be satisfied.
	#[default]
	Balanced,
	/// At least one title and at least one skill must match.
	Relaxed,
}

impl Strictness {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_lowercase().as_str() {
			"strict" => Some(Self::Strict),
			"balanced" => Some(Self::Balanced),
			"relaxed" => Some(Self::Relaxed),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Strict => "strict",
			Self::Balanced => "balanced",
			Self::Relaxed => "relaxed",
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchCriteria {
	pub query: String,
	pub country: Option<String>,
	pub min_experience_years: Option<f64>,
	pub max_experience_years: Option<f64>,
	pub job_titles: Vec<String>,
	pub skills: Vec<String>,
	pub top_k: u32,
	pub strictness: Strictness,
}

impl Default for SearchCriteria {
	fn default() -> Self {
		Self {
			query: String::new(),
			country: None,
			min_experience_years: None,
			max_experience_years: None,
			job_titles: Vec::new(),
			skills: Vec::new(),
			top_k: DEFAULT_TOP_K,
			strictness: Strictness::default(),
		}
	}
}

impl SearchCriteria {
	/// The text handed to the scoring oracle. Falls back to the requested skills
	/// when the free-text query is blank, then to a fixed placeholder.
	pub fn effective_query(&self) -> String {
		let trimmed = self.query.trim();

		if !trimmed.is_empty() {
			return trimmed.to_string();
		}

		let skills =
			self.skills.iter().map(|skill| skill.trim()).filter(|skill| !skill.is_empty());
		let joined = skills.collect::<Vec<_>>().join(" / ");

		if joined.is_empty() { "resume search".to_string() } else { joined }
	}

	pub fn validate(&self) -> Result<(), CriteriaError> {
		if self.top_k == 0 {
			return Err(CriteriaError::NonPositiveTopK);
		}
		for bound in [self.min_experience_years, self.max_experience_years].into_iter().flatten() {
			if !bound.is_finite() || bound < 0.0 {
				return Err(CriteriaError::NegativeExperienceBound);
			}
		}
		if let (Some(min), Some(max)) = (self.min_experience_years, self.max_experience_years)
			&& min > max
		{
			return Err(CriteriaError::InvertedExperienceBounds);
		}

		Ok(())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CriteriaError {
	NonPositiveTopK,
	NegativeExperienceBound,
	InvertedExperienceBounds,
}

impl Display for CriteriaError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::NonPositiveTopK => write!(f, "topK must be a positive integer."),
			Self::NegativeExperienceBound =>
				write!(f, "experience bounds must be finite non-negative numbers."),
			Self::InvertedExperienceBounds =>
				write!(f, "minimum experience must not exceed maximum experience."),
		}
	}
}

impl std::error::Error for CriteriaError {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn strictness_defaults_to_balanced() {
		assert_eq!(Strictness::default(), Strictness::Balanced);
		assert_eq!(Strictness::parse(" Relaxed "), Some(Strictness::Relaxed));
		assert_eq!(Strictness::parse("fuzzy"), None);
	}

	#[test]
	fn effective_query_falls_back_to_skills_then_placeholder() {
		let mut criteria = SearchCriteria::default();

		assert_eq!(criteria.effective_query(), "resume search");

		criteria.skills = vec!["sql".to_string(), " python ".to_string()];

		assert_eq!(criteria.effective_query(), "sql / python");

		criteria.query = "senior backend engineer".to_string();

		assert_eq!(criteria.effective_query(), "senior backend engineer");
	}

	#[test]
	fn validate_rejects_bad_bounds() {
		let mut criteria = SearchCriteria::default();

		criteria.min_experience_years = Some(-1.0);

		assert_eq!(criteria.validate(), Err(CriteriaError::NegativeExperienceBound));

		criteria.min_experience_years = Some(5.0);
		criteria.max_experience_years = Some(3.0);

		assert_eq!(criteria.validate(), Err(CriteriaError::InvertedExperienceBounds));

		criteria.max_experience_years = Some(8.0);

		assert!(criteria.validate().is_ok());

		criteria.top_k = 0;

		assert_eq!(criteria.validate(), Err(CriteriaError::NonPositiveTopK));
	}

	#[test]
	fn criteria_deserializes_camel_case_with_defaults() {
		let criteria: SearchCriteria = serde_json::from_str(
			r#"{ "query": "data engineer", "minExperienceYears": 3, "jobTitles": ["software developer"] }"#,
		)
		.expect("criteria must deserialize");

		assert_eq!(criteria.top_k, DEFAULT_TOP_K);
		assert_eq!(criteria.strictness, Strictness::Balanced);
		assert_eq!(criteria.min_experience_years, Some(3.0));
	}
}
