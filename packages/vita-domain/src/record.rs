use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A résumé document as stored, camelCase field names included. Fields absent
/// from a stored document deserialize to their empty defaults.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateRecord {
	pub resume_id: String,
	pub name: String,
	pub full_name: Option<String>,
	pub email: String,
	pub contact_no: String,
	pub location: String,
	pub country: String,
	pub job_experiences: Vec<JobExperience>,
	pub skills: Vec<Skill>,
	pub keywords: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobExperience {
	pub title: String,
	pub duration: DurationYears,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
	pub skill_name: String,
}

/// Duration as stored: a numeric-or-string-or-null scalar. Anything that does
/// not parse as a number counts as zero, never as an error.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct DurationYears(pub Value);

impl DurationYears {
	pub fn years(value: f64) -> Self {
		Self(serde_json::json!(value))
	}

	pub fn as_years(&self) -> f64 {
		match &self.0 {
			Value::Number(number) => number.as_f64().unwrap_or(0.0),
			Value::String(raw) => raw.trim().parse().unwrap_or(0.0),
			_ => 0.0,
		}
	}
}

impl CandidateRecord {
	pub fn total_experience_years(&self) -> f64 {
		self.job_experiences.iter().map(|job| job.duration.as_years()).sum()
	}

	/// The name to show in listings: `name` when present, else `fullName`.
	pub fn display_name(&self) -> &str {
		if !self.name.trim().is_empty() {
			return self.name.as_str();
		}

		self.full_name.as_deref().unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn mixed_durations_sum_tolerantly() {
		let record: CandidateRecord = serde_json::from_str(
			r#"{
				"resumeId": "r1",
				"name": "Jane Doe",
				"jobExperiences": [
					{ "title": "Engineer", "duration": "2" },
					{ "title": "Analyst", "duration": "bad" },
					{ "title": "Intern", "duration": null }
				]
			}"#,
		)
		.expect("record must deserialize");

		assert_eq!(record.total_experience_years(), 2.0);
	}

	#[test]
	fn numeric_durations_are_accepted() {
		let record: CandidateRecord = serde_json::from_str(
			r#"{ "jobExperiences": [ { "duration": 1.5 }, { "duration": "3.5" } ] }"#,
		)
		.expect("record must deserialize");

		assert_eq!(record.total_experience_years(), 5.0);
	}

	#[test]
	fn missing_fields_default_to_empty() {
		let record: CandidateRecord =
			serde_json::from_str(r#"{ "resumeId": "r2" }"#).expect("record must deserialize");

		assert_eq!(record.resume_id, "r2");
		assert!(record.skills.is_empty());
		assert!(record.keywords.is_empty());
		assert_eq!(record.total_experience_years(), 0.0);
	}

	#[test]
	fn display_name_prefers_name_over_full_name() {
		let mut record = CandidateRecord::default();

		record.full_name = Some("Jonathan Smith".to_string());

		assert_eq!(record.display_name(), "Jonathan Smith");

		record.name = "John Smith".to_string();

		assert_eq!(record.display_name(), "John Smith");
	}
}
