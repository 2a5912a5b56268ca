use std::collections::{BTreeMap, BTreeSet};

use vita_config::VocabularyOverrides;

/// Canonical lower-cased term mapped to its accepted alias spellings.
pub type SynonymTable = BTreeMap<String, Vec<String>>;

/// Immutable synonym tables injected at construction. Built-in entries cover the
/// terms observed in production traffic; config overrides replace the alias set of
/// any term they name and may add new terms.
#[derive(Clone, Debug)]
pub struct Vocabulary {
	pub countries: SynonymTable,
	pub skills: SynonymTable,
	pub titles: SynonymTable,
	/// Family label mapped to the substring markers that route a requested skill
	/// into that family under balanced strictness.
	pub skill_families: BTreeMap<String, Vec<String>>,
}

impl Default for Vocabulary {
	fn default() -> Self {
		Self {
			countries: table(&[
				("indonesia", &["indonesia"]),
				("vietnam", &["vietnam", "viet nam", "vn", "vietnamese"]),
				("united states", &["united states", "usa", "us"]),
				("malaysia", &["malaysia"]),
				("india", &["india", "ind"]),
				("singapore", &["singapore"]),
				("philippines", &["philippines", "the philippines"]),
				("australia", &["australia"]),
				("new zealand", &["new zealand"]),
				("germany", &["germany"]),
				("saudi arabia", &["saudi arabia", "ksa"]),
				("japan", &["japan"]),
				("hong kong", &["hong kong", "hong kong sar"]),
				("thailand", &["thailand"]),
				("united arab emirates", &["united arab emirates", "uae"]),
			]),
			skills: table(&[
				("sql", &["sql", "mysql", "postgresql", "mariadb", "t-sql", "microsoft sql server"]),
				("python", &["python"]),
				("javascript", &["javascript", "js", "java script"]),
				("c#", &["c#", "c sharp", "csharp"]),
				("html", &["html", "hypertext markup language"]),
			]),
			titles: table(&[
				(
					"software developer",
					&["software developer", "software dev", "softwaredeveloper", "software engineer"],
				),
				(
					"backend developer",
					&["backend developer", "backend dev", "back-end developer", "server-side developer"],
				),
				("frontend developer", &["frontend developer", "frontend dev", "front-end developer"]),
			]),
			skill_families: table(&[
				("sql", &["sql", "mysql", "postgresql", "nosql"]),
				("python", &["python", "py", "django", "flask"]),
				("javascript", &["javascript", "js", "typescript", "node"]),
			]),
		}
	}
}

impl Vocabulary {
	pub fn from_config(overrides: Option<&VocabularyOverrides>) -> Self {
		let mut vocabulary = Self::default();

		let Some(overrides) = overrides else {
			return vocabulary;
		};

		for (term, aliases) in &overrides.countries {
			vocabulary.countries.insert(term.clone(), aliases.clone());
		}
		for (term, aliases) in &overrides.skills {
			vocabulary.skills.insert(term.clone(), aliases.clone());
		}
		for (term, aliases) in &overrides.titles {
			vocabulary.titles.insert(term.clone(), aliases.clone());
		}
		for (family, markers) in &overrides.skill_families {
			let markers =
				markers.iter().map(|marker| marker.trim().to_lowercase()).collect::<Vec<_>>();

			vocabulary.skill_families.insert(family.trim().to_lowercase(), markers);
		}

		vocabulary
	}

	/// Routes a requested skill into a family when any family marker occurs as a
	/// substring of the lowered skill. Families are consulted in label order so the
	/// result is deterministic when markers overlap.
	pub fn family_of(&self, skill: &str) -> Option<&str> {
		let lowered = skill.trim().to_lowercase();

		self.skill_families
			.iter()
			.find(|(_, markers)| markers.iter().any(|marker| lowered.contains(marker.as_str())))
			.map(|(family, _)| family.as_str())
	}
}

/// Expands each term through `table`: lower-case and trim it, union in the alias
/// set when the term is a known key, and always include the term itself. Unknown
/// terms degrade to single-term matching rather than erroring.
pub fn expand(terms: &[String], table: &SynonymTable) -> BTreeSet<String> {
	let mut out = BTreeSet::new();

	for term in terms {
		let lowered = term.trim().to_lowercase();

		if lowered.is_empty() {
			continue;
		}
		if let Some(aliases) = table.get(&lowered) {
			out.extend(aliases.iter().cloned());
		}

		out.insert(lowered);
	}

	out
}

fn table(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
	entries
		.iter()
		.map(|(term, aliases)| {
			(term.to_string(), aliases.iter().map(|alias| alias.to_string()).collect())
		})
		.collect()
}
