//! The `check` command: verify Transparent Classroom credentials.

use tracing::{error, info};

use slate_core::config::Config;
use slate_core::connectors::RosterSource;
use slate_core::connectors::transparent_classroom::TransparentClassroomClient;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::from_env();
    config.upstream.validate()?;

    let client = TransparentClassroomClient::new(&config.upstream);

    println!("Testing connection to {}", config.upstream.url_base);
    match client.test_connection().await {
        Ok(()) => {
            println!("Connection test: SUCCESS");
            info!("Connection test passed");
            Ok(())
        }
        Err(e) => {
            println!("Connection test: FAILED - {e}");
            error!("Connection test failed: {e}");
            Err(e.into())
        }
    }
}
