use crate::cli::Args;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub fn init(args: &Args) {
    let env_filter = EnvFilter::try_new(&args.log_filter).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid log filter `{}`: {e}", args.log_filter);
        EnvFilter::default().add_directive(LevelFilter::INFO.into())
    });
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .init();
}
