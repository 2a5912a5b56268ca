use vita_domain::{
	listing::ListedCandidate,
	name_index::{NameHit, NameIndex, normalize_name},
};

use crate::{Result, VitaService};

impl VitaService {
	/// Fills missing identifiers on parsed candidates via the `(email,
	/// contactNo)` natural key, copying stored keywords along. A record with no
	/// store match is left without an identifier; that is not an error.
	pub async fn backfill(&self, candidates: &mut [ListedCandidate]) -> Result<()> {
		for candidate in candidates.iter_mut() {
			if candidate.resume_id.is_some() {
				continue;
			}
			if candidate.email.trim().is_empty() || candidate.contact_no.trim().is_empty() {
				continue;
			}
			if let Some(identity) =
				self.store.find_by_natural_key(&candidate.email, &candidate.contact_no).await?
			{
				candidate.resume_id = Some(identity.resume_id);

				if !identity.keywords.is_empty() {
					candidate.keywords = identity.keywords;
				}
			}
		}

		Ok(())
	}

	/// Resolves a display name to an identifier with the documented tie-break:
	/// exact session match, then substring session match, then the store.
	pub async fn resolve_by_name(
		&self,
		name: &str,
		index: &NameIndex,
	) -> Result<Option<NameHit>> {
		let normalized = normalize_name(name);

		if normalized.is_empty() {
			return Ok(None);
		}
		if let Some(hit) = index.exact(&normalized) {
			return Ok(Some(hit.clone()));
		}
		if let Some(hit) = index.substring(&normalized) {
			return Ok(Some(hit.clone()));
		}
		if let Some(record) = self.store.find_by_name(&normalized).await? {
			return Ok(Some(NameHit {
				name: record.display_name,
				resume_id: record.resume_id,
			}));
		}

		Ok(None)
	}
}
