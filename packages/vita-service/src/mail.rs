use vita_domain::{
	listing::{self, ListedCandidate, ParsedListing},
	record::CandidateRecord,
};

pub const DEFAULT_INTRO: &str = "Here are the resume matches based on your criteria:";
pub const DEFAULT_CONCLUSION: &str =
	"Let me know if you need any additional information or have questions about these candidates.";

/// Intro used when building a listing directly from records. Carries the
/// listing marker so rendered output round-trips through the parser.
pub const LISTING_INTRO: &str = "Here are some candidates that match your criteria:";
pub const LISTING_CONCLUSION: &str = "These candidates matched your search criteria.";

/// Deterministic plain-text rendering of a listing: intro, one plain block per
/// candidate, conclusion, identifier sidecar when present, signature. This is
/// the core's only obligation toward the mail transport.
pub fn render_listing(listing: &ParsedListing, signature: &str) -> String {
	if !listing.is_listing {
		return format!("{}\n\n{signature}", listing.full_text.trim());
	}

	let mut lines = Vec::new();
	let intro = non_blank(&listing.intro, DEFAULT_INTRO);
	let conclusion = non_blank(&listing.conclusion, DEFAULT_CONCLUSION);

	lines.push(intro.to_string());
	lines.push(String::new());

	for candidate in &listing.candidates {
		lines.push(candidate.name.clone());
		lines.push(format!("Email: {}", candidate.email));
		lines.push(format!("Contact No: {}", candidate.contact_no));
		lines.push(format!("Location: {}", candidate.location));
		lines.push(format!("Experience: {}", candidate.experience.join(", ")));
		lines.push(format!("Skills: {}", candidate.skills.join(", ")));
		lines.push(String::new());
	}

	lines.push(conclusion.to_string());

	if let Some(meta) = listing::render_meta(&listing.candidates) {
		lines.push(String::new());
		lines.push(meta);
	}

	lines.push(String::new());
	lines.push(signature.to_string());

	lines.join("\n")
}

/// Builds a listing from ranked records, mapping job titles to the experience
/// list and skill names to the skills list.
pub fn listing_from_records(
	records: &[CandidateRecord],
	intro: Option<&str>,
	conclusion: Option<&str>,
) -> ParsedListing {
	let candidates = records
		.iter()
		.map(|record| ListedCandidate {
			name: record.display_name().to_string(),
			email: record.email.clone(),
			contact_no: record.contact_no.clone(),
			location: record.location.clone(),
			experience: record
				.job_experiences
				.iter()
				.map(|job| job.title.clone())
				.filter(|title| !title.trim().is_empty())
				.collect(),
			skills: record
				.skills
				.iter()
				.map(|skill| skill.skill_name.clone())
				.filter(|name| !name.trim().is_empty())
				.collect(),
			keywords: record.keywords.clone(),
			resume_id: if record.resume_id.is_empty() {
				None
			} else {
				Some(record.resume_id.clone())
			},
		})
		.collect();

	ParsedListing {
		is_listing: true,
		intro: intro.unwrap_or(LISTING_INTRO).to_string(),
		conclusion: conclusion.unwrap_or(LISTING_CONCLUSION).to_string(),
		candidates,
		full_text: String::new(),
	}
}

fn non_blank<'a>(value: &'a str, fallback: &'a str) -> &'a str {
	if value.trim().is_empty() { fallback } else { value }
}
