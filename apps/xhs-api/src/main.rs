use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = xhs_api::Args::parse();

	xhs_api::run(args).await
}
