pub mod jobs;
pub mod mail;
pub mod reconcile;
pub mod search;
pub mod session;

mod error;

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

pub use error::{Error, Result};
pub use jobs::JobMatchCount;
pub use search::SearchResponse;

use vita_config::{Config, ScorerProviderConfig};
use vita_domain::{filter::CompiledFilter, record::CandidateRecord, vocabulary::Vocabulary};
use vita_providers::scorer::{self, ScorerVerdict};
use vita_storage::{
	db::Db,
	resumes::{self, NameRecord, StoredIdentity},
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Record-store seam. The default implementation is Postgres-backed; the
/// testkit substitutes an in-memory store behind the same object.
pub trait CandidateStore
where
	Self: Send + Sync,
{
	fn retrieve<'a>(
		&'a self,
		filter: &'a CompiledFilter,
		limit: u32,
	) -> BoxFuture<'a, vita_storage::Result<Vec<CandidateRecord>>>;

	fn find_by_natural_key<'a>(
		&'a self,
		email: &'a str,
		contact_no: &'a str,
	) -> BoxFuture<'a, vita_storage::Result<Option<StoredIdentity>>>;

	fn find_by_name<'a>(
		&'a self,
		name: &'a str,
	) -> BoxFuture<'a, vita_storage::Result<Option<NameRecord>>>;

	fn job_match_count<'a>(
		&'a self,
		resume_id: &'a str,
	) -> BoxFuture<'a, vita_storage::Result<u64>>;
}

/// Scoring-oracle seam.
pub trait Scorer
where
	Self: Send + Sync,
{
	fn score<'a>(
		&'a self,
		cfg: &'a ScorerProviderConfig,
		query: &'a str,
		candidates: &'a Value,
	) -> BoxFuture<'a, vita_providers::Result<ScorerVerdict>>;
}

pub struct PgCandidateStore {
	pub db: Arc<Db>,
}
impl CandidateStore for PgCandidateStore {
	fn retrieve<'a>(
		&'a self,
		filter: &'a CompiledFilter,
		limit: u32,
	) -> BoxFuture<'a, vita_storage::Result<Vec<CandidateRecord>>> {
		Box::pin(resumes::retrieve(&self.db, filter, limit))
	}

	fn find_by_natural_key<'a>(
		&'a self,
		email: &'a str,
		contact_no: &'a str,
	) -> BoxFuture<'a, vita_storage::Result<Option<StoredIdentity>>> {
		Box::pin(resumes::find_by_natural_key(&self.db, email, contact_no))
	}

	fn find_by_name<'a>(
		&'a self,
		name: &'a str,
	) -> BoxFuture<'a, vita_storage::Result<Option<NameRecord>>> {
		Box::pin(resumes::find_by_name(&self.db, name))
	}

	fn job_match_count<'a>(
		&'a self,
		resume_id: &'a str,
	) -> BoxFuture<'a, vita_storage::Result<u64>> {
		Box::pin(resumes::job_match_count(&self.db, resume_id))
	}
}

pub struct DefaultScorer;
impl Scorer for DefaultScorer {
	fn score<'a>(
		&'a self,
		cfg: &'a ScorerProviderConfig,
		query: &'a str,
		candidates: &'a Value,
	) -> BoxFuture<'a, vita_providers::Result<ScorerVerdict>> {
		Box::pin(scorer::score(cfg, query, candidates))
	}
}

pub struct VitaService {
	pub cfg: Config,
	pub vocabulary: Vocabulary,
	pub store: Arc<dyn CandidateStore>,
	pub scorer: Arc<dyn Scorer>,
}
impl VitaService {
	pub fn new(cfg: Config, db: Db) -> Self {
		let store = Arc::new(PgCandidateStore { db: Arc::new(db) });

		Self::with_components(cfg, store, Arc::new(DefaultScorer))
	}

	pub fn with_components(
		cfg: Config,
		store: Arc<dyn CandidateStore>,
		scorer: Arc<dyn Scorer>,
	) -> Self {
		let vocabulary = Vocabulary::from_config(cfg.vocabulary.as_ref());

		Self { cfg, vocabulary, store, scorer }
	}
}
