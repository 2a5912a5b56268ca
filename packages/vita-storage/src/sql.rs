use vita_domain::filter::FilterExpr;

/// Tolerant total-experience expression: durations that do not look numeric
/// count as zero, mirroring the in-process evaluation.
const EXPERIENCE_SUM_SQL: &str = "(SELECT coalesce(sum(CASE WHEN job->>'duration' ~ '^[0-9]+(\\.[0-9]+)?$' THEN (job->>'duration')::numeric ELSE 0 END), 0) FROM jsonb_array_elements(coalesce(doc->'jobExperiences', '[]'::jsonb)) AS job)";

#[derive(Clone, Debug, PartialEq)]
pub enum Bind {
	Text(String),
	TextList(Vec<String>),
	Number(f64),
}

/// One SQL boolean expression over the `doc` column plus its positional binds.
#[derive(Clone, Debug)]
pub struct SqlPredicate {
	pub clause: String,
	pub binds: Vec<Bind>,
}

/// Renders a filter tree to SQL. Placeholders are numbered from `$1` in the
/// order the binds are emitted.
pub fn render(expr: &FilterExpr) -> SqlPredicate {
	let mut binds = Vec::new();
	let clause = render_expr(expr, &mut binds);

	SqlPredicate { clause, binds }
}

fn render_expr(expr: &FilterExpr, binds: &mut Vec<Bind>) -> String {
	match expr {
		FilterExpr::And(nodes) =>
			if nodes.is_empty() {
				"TRUE".to_string()
			} else {
				let rendered =
					nodes.iter().map(|node| render_expr(node, binds)).collect::<Vec<_>>();

				format!("({})", rendered.join(" AND "))
			},
		FilterExpr::Or(nodes) =>
			if nodes.is_empty() {
				"FALSE".to_string()
			} else {
				let rendered =
					nodes.iter().map(|node| render_expr(node, binds)).collect::<Vec<_>>();

				format!("({})", rendered.join(" OR "))
			},
		FilterExpr::CountryIn(aliases) => {
			binds.push(Bind::TextList(aliases.clone()));

			format!("lower(doc->>'country') = ANY(${})", binds.len())
		},
		FilterExpr::TitleWord(word) => {
			binds.push(Bind::Text(word_pattern(word)));

			format!(
				"EXISTS (SELECT 1 FROM jsonb_array_elements(coalesce(doc->'jobExperiences', '[]'::jsonb)) AS job WHERE job->>'title' ~* ${})",
				binds.len()
			)
		},
		FilterExpr::SkillWord(word) => {
			binds.push(Bind::Text(word_pattern(word)));

			let placeholder = binds.len();

			format!(
				"(EXISTS (SELECT 1 FROM jsonb_array_elements(coalesce(doc->'skills', '[]'::jsonb)) AS skill WHERE skill->>'skillName' ~* ${placeholder}) OR EXISTS (SELECT 1 FROM jsonb_array_elements_text(coalesce(doc->'keywords', '[]'::jsonb)) AS keyword WHERE keyword ~* ${placeholder}))"
			)
		},
		FilterExpr::MinExperience(min) => {
			binds.push(Bind::Number(*min));

			format!("{EXPERIENCE_SUM_SQL} >= ${}", binds.len())
		},
		FilterExpr::MaxExperience(max) => {
			binds.push(Bind::Number(*max));

			format!("{EXPERIENCE_SUM_SQL} <= ${}", binds.len())
		},
	}
}

/// Whole-word POSIX pattern for `~*`: the term must not be flanked by
/// alphanumerics. `\m`/`\M` word anchors would reject terms like `c#`.
fn word_pattern(word: &str) -> String {
	format!("(^|[^[:alnum:]]){}([^[:alnum:]]|$)", regex::escape(word))
}
