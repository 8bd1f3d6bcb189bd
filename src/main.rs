use anyhow::Result;

use doclib_client::app::App;
use doclib_client::config::Config;
use doclib_client::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so logging verbosity can honor it
    let config = Config::load();
    logging::init(config.verbose_logging);

    // Initialize and run the application
    App::initialize(config)?.run().await?;

    Ok(())
}
