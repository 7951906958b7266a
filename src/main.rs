use clap::Parser;

use staticd::cli::Args;
use staticd::config::Config;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut cfg = Config::load(args.config.as_deref())?;
    args.apply(&mut cfg)?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(cfg.log_level()?)
        .init();

    staticd::server::run(&cfg)
}
