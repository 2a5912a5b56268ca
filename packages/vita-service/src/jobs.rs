use std::{collections::HashMap, sync::Arc};

use serde::Serialize;
use tokio::task::JoinSet;

use crate::{Error, Result, VitaService};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatchCount {
	pub resume_id: String,
	pub jobs_matched: u64,
}

impl VitaService {
	/// One independent store read per identifier, fanned out concurrently.
	/// Completions arrive unordered and are matched back by identifier; the
	/// output follows the input order.
	pub async fn job_match_counts(&self, resume_ids: &[String]) -> Result<Vec<JobMatchCount>> {
		let mut tasks = JoinSet::new();

		for resume_id in resume_ids {
			let store = Arc::clone(&self.store);
			let resume_id = resume_id.clone();

			tasks.spawn(async move {
				let count = store.job_match_count(&resume_id).await;

				(resume_id, count)
			});
		}

		let mut counts = HashMap::new();

		while let Some(joined) = tasks.join_next().await {
			let (resume_id, count) = joined.map_err(|err| Error::Store {
				message: format!("Job match fan-out task failed: {err}"),
			})?;

			counts.insert(resume_id, count?);
		}

		Ok(resume_ids
			.iter()
			.map(|resume_id| JobMatchCount {
				resume_id: resume_id.clone(),
				jobs_matched: counts.get(resume_id).copied().unwrap_or(0),
			})
			.collect())
	}
}
