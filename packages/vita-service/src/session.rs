use std::collections::HashMap;

use vita_domain::{
	listing::{self, ParsedListing},
	name_index::NameIndex,
};

use crate::jobs::JobMatchCount;

/// Per-session caches owned by the caller. Single-writer: the caller
/// serializes concurrent mutation.
#[derive(Debug, Default)]
pub struct SessionState {
	pub name_index: NameIndex,
	pub job_match_counts: HashMap<String, u64>,
	listings: HashMap<String, ParsedListing>,
}

impl SessionState {
	/// Parses a rendered text blob at most once per content key, so repeated
	/// renders of the same blob are idempotent. Every candidate and sidecar
	/// entry that carries an identifier feeds the session name index.
	pub fn parsed(&mut self, text: &str) -> &ParsedListing {
		let key = listing::content_key(text);
		let parsed = self.listings.entry(key).or_insert_with(|| listing::parse(text));

		for candidate in &parsed.candidates {
			if let Some(resume_id) = candidate.resume_id.as_deref() {
				self.name_index.insert(&candidate.name, resume_id);
			}
		}
		for entry in listing::extract_meta(text) {
			if let Some(resume_id) = entry.resume_id.as_deref() {
				self.name_index.insert(&entry.name, resume_id);
			}
		}

		parsed
	}

	pub fn cached(&self, text: &str) -> Option<&ParsedListing> {
		self.listings.get(&listing::content_key(text))
	}

	pub fn record_job_match_counts(&mut self, counts: &[JobMatchCount]) {
		for count in counts {
			self.job_match_counts.insert(count.resume_id.clone(), count.jobs_matched);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const LISTING: &str = "Here are some candidates:\n\nJohn Smith\nEmail: j@x.com\n\
		Contact No: 1\nLocation: Jakarta\nExperience: 2 years\nSkills: SQL\n\n\
		These candidates fit.\n\n<!--RESUME_META:[{\"name\":\"John Smith\",\"resumeId\":\"r1\"},{\"name\":\"Jane Doe\",\"resumeId\":\"r2\"}]-->";

	#[test]
	fn parsed_caches_by_content_key_and_indexes_names() {
		let mut session = SessionState::default();

		assert!(session.cached(LISTING).is_none());

		let first = session.parsed(LISTING).clone();
		let second = session.parsed(LISTING).clone();

		assert_eq!(first, second);
		assert!(session.cached(LISTING).is_some());
		// Both the matched candidate and the sidecar-only entry are indexed.
		assert_eq!(
			session.name_index.exact("john smith").map(|hit| hit.resume_id.as_str()),
			Some("r1")
		);
		assert_eq!(
			session.name_index.exact("jane doe").map(|hit| hit.resume_id.as_str()),
			Some("r2")
		);
	}

	#[test]
	fn job_match_counts_accumulate() {
		let mut session = SessionState::default();

		session.record_job_match_counts(&[
			JobMatchCount { resume_id: "r1".to_string(), jobs_matched: 3 },
			JobMatchCount { resume_id: "r2".to_string(), jobs_matched: 0 },
		]);
		session.record_job_match_counts(&[JobMatchCount {
			resume_id: "r1".to_string(),
			jobs_matched: 4,
		}]);

		assert_eq!(session.job_match_counts.get("r1"), Some(&4));
		assert_eq!(session.job_match_counts.get("r2"), Some(&0));
	}
}
