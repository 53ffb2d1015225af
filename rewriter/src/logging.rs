use crate::config::Config;
use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const OWN_CRATES: [&str; 2] = ["nightly_rewriter", "nightly_descriptor"];

/// Logs go to stderr; `RUST_LOG` applies unless `--debug` asks for more.
pub fn init(config: &Config) -> Result<()> {
    let mut filter = EnvFilter::builder()
        .with_default_directive(config.all_log_level().into())
        .from_env_lossy();
    if config.log_level() > config.all_log_level() {
        for krate in OWN_CRATES {
            filter = filter.add_directive(format!("{}={}", krate, config.log_level()).parse()?);
        }
    }

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}
