use serde::{Deserialize, Serialize};

use crate::name_index::normalize_name;

/// Introductory phrase that marks a rendered candidate listing.
pub const INTRO_MARKER: &str = "Here are some";
/// Concluding phrase; the conclusion is everything from its last occurrence.
pub const CONCLUSION_MARKER: &str = "These candidates";

const META_PREFIX: &str = "<!--RESUME_META:";
const META_SUFFIX: &str = "-->";
/// Field labels of one candidate block, in the order the grammars require.
const FIELD_LABELS: [&str; 5] = ["email:", "contact no:", "location:", "experience:", "skills:"];

/// Result of parsing one rendered text blob. `full_text` is always the verbatim
/// input; when `is_listing` is false the other fields are empty.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ParsedListing {
	pub is_listing: bool,
	pub intro: String,
	pub conclusion: String,
	pub candidates: Vec<ListedCandidate>,
	pub full_text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListedCandidate {
	pub name: String,
	pub email: String,
	pub contact_no: String,
	pub location: String,
	pub experience: Vec<String>,
	pub skills: Vec<String>,
	pub keywords: Vec<String>,
	pub resume_id: Option<String>,
}

/// One `{name, resumeId}` pair from the machine-readable sidecar annotation.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetaEntry {
	pub name: String,
	pub resume_id: Option<String>,
}

impl Default for MetaEntry {
	fn default() -> Self {
		Self { name: String::new(), resume_id: None }
	}
}

/// Identity of a rendered text blob, used to cache parses per session.
pub fn content_key(text: &str) -> String {
	blake3::hash(text.as_bytes()).to_hex().to_string()
}

/// Parses a rendered listing back into typed candidate entries. Text qualifies
/// only if it carries the introductory marker and both the Experience and Skills
/// labels; two layout grammars are tried in order and the first that yields a
/// candidate wins. Anything else comes back as a non-listing with the text
/// preserved verbatim.
pub fn parse(text: &str) -> ParsedListing {
	if !is_listing_text(text) {
		return non_listing(text);
	}

	let body = strip_meta(text);
	let lines = body.lines().collect::<Vec<_>>();
	let (mut candidates, first_block) = {
		let (plain, first) = parse_blocks(&lines, parse_plain_block);

		if plain.is_empty() { parse_blocks(&lines, parse_numbered_block) } else { (plain, first) }
	};

	if candidates.is_empty() {
		return non_listing(text);
	}

	let intro = lines[..first_block].join("\n").trim().to_string();
	let conclusion = body
		.rfind(CONCLUSION_MARKER)
		.map(|position| body[position..].trim().to_string())
		.unwrap_or_default();

	for entry in extract_meta(text) {
		let Some(resume_id) = entry.resume_id else {
			continue;
		};
		let key = normalize_name(&entry.name);

		if let Some(candidate) =
			candidates.iter_mut().find(|candidate| normalize_name(&candidate.name) == key)
		{
			candidate.resume_id = Some(resume_id);
		}
	}

	ParsedListing { is_listing: true, intro, conclusion, candidates, full_text: text.to_string() }
}

/// Parses the sidecar annotation independently of the listing grammars. Entries
/// without a resumeId and malformed payloads degrade to nothing.
pub fn extract_meta(text: &str) -> Vec<MetaEntry> {
	let Some(start) = text.find(META_PREFIX) else {
		return Vec::new();
	};
	let payload = &text[start + META_PREFIX.len()..];
	let Some(end) = payload.find(META_SUFFIX) else {
		return Vec::new();
	};

	serde_json::from_str::<Vec<MetaEntry>>(&payload[..end])
		.unwrap_or_default()
		.into_iter()
		.filter(|entry| entry.resume_id.is_some())
		.collect()
}

/// Renders the sidecar annotation for candidates that carry identifiers.
pub fn render_meta(candidates: &[ListedCandidate]) -> Option<String> {
	let entries = candidates
		.iter()
		.filter(|candidate| candidate.resume_id.is_some())
		.map(|candidate| MetaEntry {
			name: candidate.name.clone(),
			resume_id: candidate.resume_id.clone(),
		})
		.collect::<Vec<_>>();

	if entries.is_empty() {
		return None;
	}

	// MetaEntry serialization is infallible.
	let payload = serde_json::to_string(&entries).ok()?;

	Some(format!("{META_PREFIX}{payload}{META_SUFFIX}"))
}

fn is_listing_text(text: &str) -> bool {
	let lowered = text.to_lowercase();

	text.contains(INTRO_MARKER) && lowered.contains("experience:") && lowered.contains("skills:")
}

fn non_listing(text: &str) -> ParsedListing {
	ParsedListing { full_text: text.to_string(), ..ParsedListing::default() }
}

fn strip_meta(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	let mut rest = text;

	loop {
		let Some(start) = rest.find(META_PREFIX) else {
			out.push_str(rest);

			break;
		};

		out.push_str(&rest[..start]);

		let payload = &rest[start + META_PREFIX.len()..];

		match payload.find(META_SUFFIX) {
			Some(end) => rest = &payload[end + META_SUFFIX.len()..],
			None => {
				// Unterminated marker stays in the body.
				out.push_str(&rest[start..]);

				break;
			},
		}
	}

	out
}

type BlockParser = fn(&[&str], usize) -> Option<(ListedCandidate, usize)>;

fn parse_blocks(lines: &[&str], parse_block: BlockParser) -> (Vec<ListedCandidate>, usize) {
	let mut candidates = Vec::new();
	let mut first_block = lines.len();
	let mut cursor = 0;

	while cursor < lines.len() {
		if let Some((candidate, next)) = parse_block(lines, cursor) {
			if candidates.is_empty() {
				first_block = cursor;
			}

			candidates.push(candidate);
			cursor = next;
		} else {
			cursor += 1;
		}
	}

	(candidates, first_block)
}

/// Plain block grammar: a bare name line, then the five labeled lines. Blank
/// lines between the name and the fields are tolerated.
fn parse_plain_block(lines: &[&str], start: usize) -> Option<(ListedCandidate, usize)> {
	let name = plain_name_line(lines[start])?;
	let mut cursor = start + 1;
	let mut values = Vec::with_capacity(FIELD_LABELS.len());

	for label in FIELD_LABELS {
		let (value, next) = plain_field(lines, cursor, label)?;

		values.push(value);
		cursor = next;
	}

	Some((candidate_from(name, values), cursor))
}

/// Numbered/emphasized grammar: `N. **Name**` then `- **Label:** value` bullets.
fn parse_numbered_block(lines: &[&str], start: usize) -> Option<(ListedCandidate, usize)> {
	let name = numbered_name_line(lines[start])?;
	let mut cursor = start + 1;
	let mut values = Vec::with_capacity(FIELD_LABELS.len());

	for label in FIELD_LABELS {
		let (value, next) = bullet_field(lines, cursor, label)?;

		values.push(value);
		cursor = next;
	}

	Some((candidate_from(name, values), cursor))
}

fn candidate_from(name: String, mut values: Vec<String>) -> ListedCandidate {
	let skills = split_list(&values.pop().unwrap_or_default());
	let experience = split_list(&values.pop().unwrap_or_default());
	let location = values.pop().unwrap_or_default();
	let contact_no = values.pop().unwrap_or_default();
	let email = values.pop().unwrap_or_default();

	ListedCandidate {
		name,
		email,
		contact_no,
		location,
		experience,
		skills,
		keywords: Vec::new(),
		resume_id: None,
	}
}

fn split_list(raw: &str) -> Vec<String> {
	raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()).map(str::to_string).collect()
}

/// One to four capitalized, alphabetic tokens and no colon.
fn plain_name_line(raw: &str) -> Option<String> {
	let trimmed = raw.trim();

	if trimmed.is_empty() || trimmed.contains(':') {
		return None;
	}

	let tokens = trimmed.split_whitespace().collect::<Vec<_>>();

	if tokens.is_empty() || tokens.len() > 4 {
		return None;
	}
	for token in &tokens {
		let mut chars = token.chars();
		let first = chars.next()?;

		if !first.is_uppercase() {
			return None;
		}
		if !chars.all(|ch| ch.is_alphabetic() || ch == '-' || ch == '\'') {
			return None;
		}
	}

	Some(trimmed.to_string())
}

fn numbered_name_line(raw: &str) -> Option<String> {
	let trimmed = raw.trim();
	let dot = trimmed.find('.')?;

	if dot == 0 || !trimmed[..dot].chars().all(|ch| ch.is_ascii_digit()) {
		return None;
	}

	let rest = trimmed[dot + 1..].trim_start();
	let name = rest.strip_prefix("**")?.strip_suffix("**")?.trim();

	if name.is_empty() { None } else { Some(name.to_string()) }
}

fn plain_field(lines: &[&str], mut cursor: usize, label: &str) -> Option<(String, usize)> {
	while cursor < lines.len() && lines[cursor].trim().is_empty() {
		cursor += 1;
	}

	let trimmed = lines.get(cursor)?.trim();
	let prefix = trimmed.get(..label.len())?;

	if !prefix.eq_ignore_ascii_case(label) {
		return None;
	}

	Some((trimmed[label.len()..].trim().to_string(), cursor + 1))
}

fn bullet_field(lines: &[&str], mut cursor: usize, label: &str) -> Option<(String, usize)> {
	while cursor < lines.len() && lines[cursor].trim().is_empty() {
		cursor += 1;
	}

	let trimmed = lines.get(cursor)?.trim();
	let rest = trimmed.strip_prefix('-')?.trim_start().strip_prefix("**")?;
	let prefix = rest.get(..label.len())?;

	if !prefix.eq_ignore_ascii_case(label) {
		return None;
	}

	let value = rest[label.len()..].trim_start();
	let value = value.strip_prefix("**").unwrap_or(value).trim();

	Some((value.to_string(), cursor + 1))
}
