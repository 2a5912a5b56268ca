use std::{collections::HashSet, time::Duration};

use serde::Serialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::warn;

use vita_domain::{criteria::SearchCriteria, filter, record::CandidateRecord};
use vita_providers::scorer::ScorerVerdict;

use crate::{Error, Result, VitaService};

/// Distinct from a store failure so operators can tell "no matches" apart from
/// "system unavailable".
pub const NO_MATCH_MESSAGE: &str = "No resumes match the criteria.";
pub const NO_CONFIDENT_MATCH_MESSAGE: &str = "No confident matches after ranking.";

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
	pub message: String,
	pub results_count: usize,
	/// Ranked records, in candidate-pool order.
	pub results: Vec<CandidateRecord>,
	pub ranked_ids: Vec<String>,
	pub pool_count: usize,
	pub completed_at: String,
}

impl VitaService {
	/// Runs the two-stage pipeline: compile the criteria, retrieve a bounded
	/// candidate pool, then re-rank through the scoring oracle. Only a store
	/// failure aborts; oracle failures degrade to an empty ranked result.
	pub async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResponse> {
		criteria
			.validate()
			.map_err(|err| Error::InvalidRequest { message: err.to_string() })?;

		let compiled = filter::compile(criteria, &self.vocabulary);
		let limit = criteria.top_k.min(self.cfg.search.pool_limit);
		let budget = Duration::from_millis(self.cfg.storage.postgres.query_timeout_ms);
		let pool = match tokio::time::timeout(budget, self.store.retrieve(&compiled, limit)).await
		{
			Ok(retrieved) => retrieved?,
			Err(_) =>
				return Err(Error::Store {
					message: "Record store retrieval timed out.".to_string(),
				}),
		};

		if pool.is_empty() {
			return Ok(SearchResponse {
				message: NO_MATCH_MESSAGE.to_string(),
				results_count: 0,
				results: Vec::new(),
				ranked_ids: Vec::new(),
				pool_count: 0,
				completed_at: now_rfc3339(),
			});
		}

		let query = criteria.effective_query();
		let verdict = self.rank(&query, &pool).await;
		let ranked_ids =
			sanitize_ranked(&verdict.top_resume_ids, &pool, self.cfg.search.max_ranked as usize);
		let results = pool
			.iter()
			.filter(|candidate| ranked_ids.contains(&candidate.resume_id))
			.cloned()
			.collect::<Vec<_>>();
		let message = if results.is_empty() {
			NO_CONFIDENT_MATCH_MESSAGE.to_string()
		} else {
			format!("Found {} matching resumes.", results.len())
		};

		Ok(SearchResponse {
			message,
			results_count: results.len(),
			results,
			ranked_ids,
			pool_count: pool.len(),
			completed_at: verdict.completed_at.unwrap_or_else(now_rfc3339),
		})
	}

	/// Abandons the whole pipeline at the caller's deadline. Partial work is
	/// discarded entirely, never surfaced as a degraded result.
	pub async fn search_with_deadline(
		&self,
		criteria: &SearchCriteria,
		deadline: Duration,
	) -> Result<SearchResponse> {
		match tokio::time::timeout(deadline, self.search(criteria)).await {
			Ok(result) => result,
			Err(_) => Err(Error::DeadlineExceeded {
				message: "Search abandoned at the caller deadline.".to_string(),
			}),
		}
	}

	async fn rank(&self, query: &str, pool: &[CandidateRecord]) -> ScorerVerdict {
		let candidates = match serde_json::to_value(pool) {
			Ok(candidates) => candidates,
			Err(err) => {
				warn!(error = %err, "Candidate pool serialization failed; returning no ranked matches.");

				return ScorerVerdict::default();
			},
		};

		match self.scorer.score(&self.cfg.providers.scorer, query, &candidates).await {
			Ok(verdict) => verdict,
			Err(err) => {
				warn!(error = %err, "Scoring oracle failed; returning no ranked matches.");

				ScorerVerdict::default()
			},
		}
	}
}

/// The non-negotiable gate on oracle output: keep only identifiers present in
/// the candidate pool, drop duplicates, cap the count.
fn sanitize_ranked(ranked: &[String], pool: &[CandidateRecord], max: usize) -> Vec<String> {
	let pool_ids = pool.iter().map(|candidate| candidate.resume_id.as_str()).collect::<HashSet<_>>();
	let mut seen = HashSet::new();

	ranked
		.iter()
		.filter(|resume_id| pool_ids.contains(resume_id.as_str()))
		.filter(|resume_id| seen.insert(resume_id.as_str()))
		.take(max)
		.cloned()
		.collect()
}

fn now_rfc3339() -> String {
	OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn pool_of(ids: &[&str]) -> Vec<CandidateRecord> {
		ids.iter()
			.map(|resume_id| CandidateRecord {
				resume_id: resume_id.to_string(),
				..CandidateRecord::default()
			})
			.collect()
	}

	#[test]
	fn sanitize_drops_foreign_ids() {
		let pool = pool_of(&["r1", "r2", "r3"]);
		let ranked =
			["r9", "r2", "r1", "r7"].iter().map(|id| id.to_string()).collect::<Vec<_>>();

		assert_eq!(sanitize_ranked(&ranked, &pool, 10), vec![
			"r2".to_string(),
			"r1".to_string()
		]);
	}

	#[test]
	fn sanitize_dedups_and_caps() {
		let pool = pool_of(&["r1", "r2", "r3"]);
		let ranked = ["r1", "r1", "r2", "r3"].iter().map(|id| id.to_string()).collect::<Vec<_>>();

		assert_eq!(sanitize_ranked(&ranked, &pool, 2), vec![
			"r1".to_string(),
			"r2".to_string()
		]);
	}

	#[test]
	fn sanitize_of_empty_verdict_is_empty() {
		assert!(sanitize_ranked(&[], &pool_of(&["r1"]), 10).is_empty());
	}
}
