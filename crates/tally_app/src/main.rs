use clap::Parser;
use tally_app::app::{run_cli, Cli};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    if let Err(err) = run_cli(cli) {
        eprintln!("tally: {err:#}");
        std::process::exit(1);
    }
}
