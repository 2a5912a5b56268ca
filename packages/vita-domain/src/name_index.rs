/// Display name resolved to a record identifier, as stored under whichever
/// source resolved it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameHit {
	pub name: String,
	pub resume_id: String,
}

/// Session-scoped display-name cache. Never authoritative; the reconciler falls
/// back to the store when a name is absent here. Entries keep insertion order so
/// substring lookups have a deterministic first match.
#[derive(Clone, Debug, Default)]
pub struct NameIndex {
	entries: Vec<(String, NameHit)>,
}

impl NameIndex {
	/// Inserts or replaces the entry for a display name. Keys are normalized, so
	/// `"John  Smith"` and `"john smith"` share one slot.
	pub fn insert(&mut self, name: &str, resume_id: &str) {
		let key = normalize_name(name);

		if key.is_empty() {
			return;
		}

		let hit = NameHit { name: name.trim().to_string(), resume_id: resume_id.to_string() };

		if let Some(slot) = self.entries.iter_mut().find(|(existing, _)| *existing == key) {
			slot.1 = hit;
		} else {
			self.entries.push((key, hit));
		}
	}

	pub fn exact(&self, normalized: &str) -> Option<&NameHit> {
		self.entries.iter().find(|(key, _)| key == normalized).map(|(_, hit)| hit)
	}

	/// First entry whose normalized key contains the query as a substring.
	pub fn substring(&self, normalized: &str) -> Option<&NameHit> {
		if normalized.is_empty() {
			return None;
		}

		self.entries.iter().find(|(key, _)| key.contains(normalized)).map(|(_, hit)| hit)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Lower-cases and collapses internal whitespace.
pub fn normalize_name(raw: &str) -> String {
	raw.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}
