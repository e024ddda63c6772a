use bucketize::config::{usage, Cli};
use bucketize::Config;
use clap::Parser;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    bucketize::ui::init_logging().map_err(|e| anyhow::anyhow!("cannot install logger: {}", e))?;
    info!("bucketize v{}", bucketize::VERSION);

    // Convert CLI args to Config - this validates immediately
    let config = match Config::try_from(cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            error!("aborting because of errors");
            println!("\n{}", usage());
            return Err(e.into());
        }
    };
    config.log_options();

    if let Err(e) = bucketize::commands::run(&config) {
        error!("{}", e);
        error!("aborting because of errors");
        return Err(e.into());
    }

    Ok(())
}
