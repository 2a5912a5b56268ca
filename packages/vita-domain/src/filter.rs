use std::collections::BTreeMap;

use crate::{
	criteria::{SearchCriteria, Strictness},
	record::CandidateRecord,
	vocabulary::{Vocabulary, expand},
};

/// Composite boolean predicate over a candidate record. Leaves hold already
/// lower-cased terms; the store renders the same tree to SQL, and
/// `CompiledFilter::matches` evaluates it in process.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterExpr {
	And(Vec<FilterExpr>),
	Or(Vec<FilterExpr>),
	/// Record country is a case-insensitive exact match to any alias.
	CountryIn(Vec<String>),
	/// Whole-word, case-insensitive match against any held job title.
	TitleWord(String),
	/// Whole-word, case-insensitive match against any skill name or keyword.
	SkillWord(String),
	MinExperience(f64),
	MaxExperience(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompiledFilter {
	expr: FilterExpr,
}

impl CompiledFilter {
	pub fn expr(&self) -> &FilterExpr {
		&self.expr
	}

	pub fn matches(&self, record: &CandidateRecord) -> bool {
		evaluate(&self.expr, record)
	}
}

/// Compiles criteria into one predicate tree. Country and experience bounds
/// contribute unconditional clauses; strictness governs only how the title and
/// skill clauses combine. Absent fields contribute no clause, so an empty
/// criteria compiles to match-everything.
pub fn compile(criteria: &SearchCriteria, vocabulary: &Vocabulary) -> CompiledFilter {
	let mut clauses = Vec::new();

	if let Some(country) = criteria.country.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
		let aliases =
			expand(&[country.to_string()], &vocabulary.countries).into_iter().collect::<Vec<_>>();

		clauses.push(FilterExpr::CountryIn(aliases));
	}
	if let Some(min) = criteria.min_experience_years {
		clauses.push(FilterExpr::MinExperience(min));
	}
	if let Some(max) = criteria.max_experience_years {
		clauses.push(FilterExpr::MaxExperience(max));
	}

	let title_groups = term_groups(&criteria.job_titles, &vocabulary.titles, FilterExpr::TitleWord);

	if !title_groups.is_empty() {
		match criteria.strictness {
			// Breadth-of-role coverage: every requested title group must match.
			Strictness::Strict => clauses.extend(title_groups),
			Strictness::Balanced | Strictness::Relaxed => clauses.push(or_of(title_groups)),
		}
	}

	match criteria.strictness {
		Strictness::Strict => {
			clauses.extend(term_groups(&criteria.skills, &vocabulary.skills, FilterExpr::SkillWord));
		},
		Strictness::Relaxed => {
			let groups = term_groups(&criteria.skills, &vocabulary.skills, FilterExpr::SkillWord);

			if !groups.is_empty() {
				clauses.push(or_of(groups));
			}
		},
		Strictness::Balanced => {
			clauses.extend(family_groups(&criteria.skills, vocabulary));
		},
	}

	CompiledFilter { expr: and_of(clauses) }
}

/// One OR-of-aliases group per requested term, blanks skipped.
fn term_groups(
	terms: &[String],
	table: &crate::vocabulary::SynonymTable,
	leaf: fn(String) -> FilterExpr,
) -> Vec<FilterExpr> {
	terms
		.iter()
		.filter(|term| !term.trim().is_empty())
		.map(|term| {
			let aliases = expand(std::slice::from_ref(term), table);

			or_of(aliases.into_iter().map(leaf).collect())
		})
		.collect()
}

/// Balanced-mode skill clauses: skills sharing a family merge into one
/// OR-of-aliases group, and a skill matching no family forms its own group.
/// Every group is AND-required.
fn family_groups(skills: &[String], vocabulary: &Vocabulary) -> Vec<FilterExpr> {
	let mut families: BTreeMap<String, Vec<String>> = BTreeMap::new();

	for skill in skills {
		let lowered = skill.trim().to_lowercase();

		if lowered.is_empty() {
			continue;
		}

		let family = vocabulary.family_of(&lowered).unwrap_or(lowered.as_str()).to_string();

		families.entry(family).or_default().push(lowered);
	}

	families
		.into_values()
		.map(|members| {
			let aliases = expand(&members, &vocabulary.skills);

			or_of(aliases.into_iter().map(FilterExpr::SkillWord).collect())
		})
		.collect()
}

fn and_of(mut clauses: Vec<FilterExpr>) -> FilterExpr {
	if clauses.len() == 1 { clauses.remove(0) } else { FilterExpr::And(clauses) }
}

fn or_of(mut clauses: Vec<FilterExpr>) -> FilterExpr {
	if clauses.len() == 1 { clauses.remove(0) } else { FilterExpr::Or(clauses) }
}

fn evaluate(expr: &FilterExpr, record: &CandidateRecord) -> bool {
	match expr {
		FilterExpr::And(nodes) => nodes.iter().all(|node| evaluate(node, record)),
		FilterExpr::Or(nodes) => nodes.iter().any(|node| evaluate(node, record)),
		FilterExpr::CountryIn(aliases) => {
			let country = record.country.trim().to_lowercase();

			aliases.iter().any(|alias| *alias == country)
		},
		FilterExpr::TitleWord(word) =>
			record.job_experiences.iter().any(|job| contains_word(&job.title, word)),
		FilterExpr::SkillWord(word) =>
			record.skills.iter().any(|skill| contains_word(&skill.skill_name, word))
				|| record.keywords.iter().any(|keyword| contains_word(keyword, word)),
		FilterExpr::MinExperience(min) => record.total_experience_years() >= *min,
		FilterExpr::MaxExperience(max) => record.total_experience_years() <= *max,
	}
}

/// Case-insensitive whole-word containment: the needle must not be flanked by
/// alphanumeric characters in the haystack.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
	if needle.is_empty() {
		return false;
	}

	let haystack = haystack.to_lowercase();
	let needle = needle.to_lowercase();
	let mut from = 0;

	while let Some(found) = haystack[from..].find(&needle) {
		let begin = from + found;
		let end = begin + needle.len();
		let left_ok =
			haystack[..begin].chars().next_back().is_none_or(|ch| !ch.is_alphanumeric());
		let right_ok = haystack[end..].chars().next().is_none_or(|ch| !ch.is_alphanumeric());

		if left_ok && right_ok {
			return true;
		}

		from = end;
	}

	false
}
