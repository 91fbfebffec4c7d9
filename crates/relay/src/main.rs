use std::process::ExitCode;

use anyhow::Context;
use tracing::error;

use stockrelay::{InvocationContext, ProcessContext, RelayHandler};
use stockrelay_infra::aws::load_sdk_config;
use stockrelay_infra::{PostgresInventorySource, RelayConfig, SnsTopicPublisher, SqsMessageQueue};

/// Parse the optional trigger payload given as the first argument.
fn parse_event(arg: Option<String>) -> anyhow::Result<serde_json::Value> {
    match arg {
        Some(raw) => serde_json::from_str(&raw).context("event payload must be valid JSON"),
        None => Ok(serde_json::json!({})),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    stockrelay_observability::init();

    let event = match parse_event(std::env::args().nth(1)) {
        Ok(event) => event,
        Err(err) => {
            error!(error = %format!("{:#}", err), "invalid invocation payload");
            return ExitCode::FAILURE;
        }
    };

    let mut ctx = ProcessContext::new();

    let config = match RelayConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            ctx.fail(err);
            return ctx.exit_code();
        }
    };

    let sdk_config = load_sdk_config(config.region.clone()).await;
    let handler = RelayHandler::new(
        PostgresInventorySource::new(config.database.clone()),
        SqsMessageQueue::from_sdk_config(&sdk_config, config.queue_url.clone()),
        SnsTopicPublisher::from_sdk_config(&sdk_config, config.topic_arn.clone()),
    );

    handler.handle(event, &mut ctx).await;
    ctx.exit_code()
}
