use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre;
use tracing_subscriber::EnvFilter;

use vita_domain::criteria::{SearchCriteria, Strictness};
use vita_service::{VitaService, mail};
use vita_storage::db::Db;

#[derive(Debug, Parser)]
#[command(
	version = vita_cli::VERSION,
	rename_all = "kebab",
	styles = vita_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Free-text query forwarded to the scoring oracle. Defaults to a query
	/// derived from the requested skills.
	#[arg(long, short = 'q', value_name = "TEXT")]
	pub query: Option<String>,
	#[arg(long, value_name = "NAME")]
	pub country: Option<String>,
	#[arg(long, value_name = "YEARS")]
	pub min_experience: Option<f64>,
	#[arg(long, value_name = "YEARS")]
	pub max_experience: Option<f64>,
	#[arg(long = "title", value_name = "TITLE", num_args = 1..)]
	pub titles: Vec<String>,
	#[arg(long = "skill", value_name = "SKILL", num_args = 1..)]
	pub skills: Vec<String>,
	#[arg(long, value_name = "N")]
	pub top_k: Option<u32>,
	#[arg(long, value_name = "MODE")]
	pub strictness: Option<String>,
	/// Print the raw search response as JSON instead of the mail rendering.
	#[arg(long)]
	pub json: bool,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let cfg = vita_config::load(&args.config)?;
	let filter = EnvFilter::new(cfg.service.log_level.clone());

	tracing_subscriber::fmt().with_env_filter(filter).init();

	let strictness_raw = args.strictness.as_deref().unwrap_or(&cfg.search.default_strictness);
	let strictness = Strictness::parse(strictness_raw)
		.ok_or_else(|| eyre::eyre!("Unknown strictness mode: {strictness_raw}."))?;
	let criteria = SearchCriteria {
		query: args.query.unwrap_or_default(),
		country: args.country,
		min_experience_years: args.min_experience,
		max_experience_years: args.max_experience,
		job_titles: args.titles,
		skills: args.skills,
		top_k: args.top_k.unwrap_or(cfg.search.default_top_k),
		strictness,
	};
	let db = Db::connect(&cfg.storage.postgres).await?;

	db.ensure_schema().await?;

	tracing::info!(
		top_k = criteria.top_k,
		strictness = strictness.as_str(),
		"Running search."
	);

	let service = VitaService::new(cfg, db);
	let response = service.search(&criteria).await?;

	if args.json {
		let json = serde_json::to_string_pretty(&response)?;

		println!("{json}");

		return Ok(());
	}

	if response.results.is_empty() {
		println!("{}", response.message);

		return Ok(());
	}

	let listing = mail::listing_from_records(&response.results, None, None);
	let rendered = mail::render_listing(&listing, &service.cfg.mail.signature);

	println!("{rendered}");

	Ok(())
}
