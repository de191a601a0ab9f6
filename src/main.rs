use std::{fs::OpenOptions, sync::Mutex};

use mempool_dashboard::configuration::get_configuration;
use mempool_dashboard::startup::Application;
use mempool_dashboard::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration()?;

    // stdout belongs to the terminal UI, logs go to a file instead
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&configuration.application.log_file)?;
    let subscriber = get_subscriber("mempool_dashboard".into(), "info".into(), Mutex::new(log_file));
    init_subscriber(subscriber);

    let application = Application::build(configuration)?;
    if let Err(e) = application.run_until_stopped().await {
        tracing::error!(error.cause_chain = ?e, "mempool dashboard stopped");
        return Err(e);
    }
    Ok(())
}
