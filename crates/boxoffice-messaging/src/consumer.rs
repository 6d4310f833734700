//! Event-log consumer construction.

use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use tracing::info;

use boxoffice_core::config::MessagingConfig;
use boxoffice_core::error::AppError;
use boxoffice_core::result::AppResult;

/// Build a stream consumer subscribed to the given topics.
///
/// Auto-commit is disabled: the caller commits each message only after its
/// database transaction settles, so an aborted transaction leaves the
/// offset uncommitted and the message is redelivered (at-least-once).
pub fn build_stream_consumer(
    config: &MessagingConfig,
    topics: &[&str],
) -> AppResult<StreamConsumer> {
    let consumer: StreamConsumer = ClientConfig::new()
        .set("bootstrap.servers", &config.brokers)
        .set("client.id", &config.client_id)
        .set("group.id", &config.group_id)
        .set("enable.auto.commit", "false")
        .set("auto.offset.reset", "earliest")
        .set("session.timeout.ms", "6000")
        .set("enable.partition.eof", "false")
        .create()
        .map_err(|e| AppError::messaging(format!("Failed to create consumer: {e}")))?;

    consumer
        .subscribe(topics)
        .map_err(|e| AppError::messaging(format!("Failed to subscribe to {topics:?}: {e}")))?;

    info!(
        group_id = %config.group_id,
        ?topics,
        "Kafka consumer subscribed"
    );
    Ok(consumer)
}
