// crates.io
use clap::Parser;
// self
use vita_search::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = Args::parse();
	vita_search::run(args).await
}
