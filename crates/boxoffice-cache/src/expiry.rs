//! Expired-key notification subscription.
//!
//! Redis keyspace notifications (`notify-keyspace-events Ex`) publish the
//! name of every expired key on `__keyevent@<db>__:expired`. The expiry
//! signaler consumes this stream and translates seat-lock expirations into
//! event-log messages. Notifications are fire-and-forget on the Redis
//! side; missed ones are recovered by the reconciler.

use futures::{Stream, StreamExt};

use boxoffice_core::result::AppResult;

use crate::client::map_redis_error;

/// Subscribe to expired-key notifications.
///
/// Opens a dedicated pub/sub connection (the multiplexed manager cannot
/// carry subscriptions) and returns a stream of expired key names.
/// The stream ends when the connection drops; callers re-subscribe.
pub async fn subscribe_expired_keys(
    url: &str,
    pattern: &str,
) -> AppResult<impl Stream<Item = String>> {
    let client = redis::Client::open(url)
        .map_err(|e| map_redis_error("Failed to create Redis client for pub/sub", e))?;

    let mut pubsub = client
        .get_async_pubsub()
        .await
        .map_err(|e| map_redis_error("Failed to open pub/sub connection", e))?;

    pubsub
        .psubscribe(pattern)
        .await
        .map_err(|e| map_redis_error("Failed to subscribe to expired-key pattern", e))?;

    Ok(pubsub
        .into_on_message()
        .filter_map(|msg| async move { msg.get_payload::<String>().ok() }))
}
