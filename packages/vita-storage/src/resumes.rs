use serde_json::Value;

use vita_domain::{filter::CompiledFilter, record::CandidateRecord};

use crate::{
	Error, Result,
	db::Db,
	sql::{self, Bind},
};

/// The fields copied onto a record during natural-key backfill.
#[derive(Clone, Debug)]
pub struct StoredIdentity {
	pub resume_id: String,
	pub keywords: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct NameRecord {
	pub resume_id: String,
	pub display_name: String,
}

/// Retrieves the candidate pool for a compiled filter. The cap is applied
/// server-side and internal-only fields are projected away before
/// deserialization.
pub async fn retrieve(db: &Db, filter: &CompiledFilter, limit: u32) -> Result<Vec<CandidateRecord>> {
	if limit == 0 {
		return Err(Error::InvalidArgument("limit must be greater than zero".to_string()));
	}

	let predicate = sql::render(filter.expr());
	let query_sql = format!(
		"SELECT doc - 'embedding' AS doc FROM resumes WHERE {} LIMIT ${}",
		predicate.clause,
		predicate.binds.len() + 1
	);
	let mut query = sqlx::query_scalar::<_, Value>(&query_sql);

	for bind in &predicate.binds {
		query = match bind {
			Bind::Text(value) => query.bind(value.clone()),
			Bind::TextList(values) => query.bind(values.clone()),
			Bind::Number(value) => query.bind(*value),
		};
	}

	let docs = query.bind(i64::from(limit)).fetch_all(&db.pool).await?;

	docs.into_iter()
		.map(|doc| {
			serde_json::from_value(doc).map_err(|err| Error::InvalidDocument(err.to_string()))
		})
		.collect()
}

/// Looks a record up by its `(email, contactNo)` natural key. Documents without
/// a resumeId cannot backfill anything and come back as no match.
pub async fn find_by_natural_key(
	db: &Db,
	email: &str,
	contact_no: &str,
) -> Result<Option<StoredIdentity>> {
	let doc: Option<Value> = sqlx::query_scalar(
		"SELECT doc FROM resumes WHERE doc->>'email' = $1 AND doc->>'contactNo' = $2 LIMIT 1",
	)
	.bind(email)
	.bind(contact_no)
	.fetch_optional(&db.pool)
	.await?;
	let Some(doc) = doc else {
		return Ok(None);
	};
	let resume_id =
		doc.get("resumeId").and_then(Value::as_str).unwrap_or_default().to_string();

	if resume_id.is_empty() {
		return Ok(None);
	}

	let keywords = doc
		.get("keywords")
		.and_then(Value::as_array)
		.map(|entries| {
			entries.iter().filter_map(Value::as_str).map(str::to_string).collect()
		})
		.unwrap_or_default();

	Ok(Some(StoredIdentity { resume_id, keywords }))
}

/// Case-insensitive name lookup over `name` and `fullName`. The query is
/// escaped, so it matches as a literal substring rather than as a pattern.
pub async fn find_by_name(db: &Db, name: &str) -> Result<Option<NameRecord>> {
	let pattern = regex::escape(name.trim());

	if pattern.is_empty() {
		return Ok(None);
	}

	let row: Option<(String, String)> = sqlx::query_as(
		"SELECT doc->>'resumeId', coalesce(doc->>'name', doc->>'fullName', '') FROM resumes WHERE (doc->>'name' ~* $1 OR doc->>'fullName' ~* $1) AND doc->>'resumeId' IS NOT NULL LIMIT 1",
	)
	.bind(&pattern)
	.fetch_optional(&db.pool)
	.await?;

	Ok(row.map(|(resume_id, display_name)| NameRecord { resume_id, display_name }))
}

/// Number of matched jobs recorded for one resume; absent rows count zero.
pub async fn job_match_count(db: &Db, resume_id: &str) -> Result<u64> {
	let count: Option<i64> =
		sqlx::query_scalar("SELECT jsonb_array_length(matches) FROM resume_matches WHERE resume_id = $1")
			.bind(resume_id)
			.fetch_optional(&db.pool)
			.await?;

	Ok(count.unwrap_or(0).max(0) as u64)
}

pub async fn upsert_resume(db: &Db, record: &CandidateRecord) -> Result<()> {
	if record.resume_id.trim().is_empty() {
		return Err(Error::InvalidArgument("resumeId must be non-empty".to_string()));
	}

	let doc = serde_json::to_value(record)?;

	sqlx::query(
		"INSERT INTO resumes (resume_id, doc) VALUES ($1, $2) ON CONFLICT (resume_id) DO UPDATE SET doc = EXCLUDED.doc",
	)
	.bind(&record.resume_id)
	.bind(doc)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub async fn set_job_matches(db: &Db, resume_id: &str, job_ids: &[String]) -> Result<()> {
	let matches = Value::Array(
		job_ids.iter().map(|job_id| serde_json::json!({ "jobId": job_id })).collect(),
	);

	sqlx::query(
		"INSERT INTO resume_matches (resume_id, matches) VALUES ($1, $2) ON CONFLICT (resume_id) DO UPDATE SET matches = EXCLUDED.matches",
	)
	.bind(resume_id)
	.bind(matches)
	.execute(&db.pool)
	.await?;

	Ok(())
}
