use std::sync::Arc;

use salary_records::service::{self, RecordService};
use salary_records::telemetry;
use salary_records::ServiceConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env()?;
    telemetry::init_logging(config.log_format);

    tracing::info!(
        max_page_size = ?config.max_page_size,
        max_upload_bytes = config.max_upload_bytes,
        "starting records server"
    );

    let records = Arc::new(RecordService::in_memory().with_config(&config));
    service::serve(records, &config.bind_addr).await?;
    Ok(())
}
