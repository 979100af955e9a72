//! Continuation-token pagination driver
//!
//! Two forms over the same loop: a lazy stream that fetches the next page
//! only when the current one is exhausted, and an eager collector with an
//! all-or-nothing contract. Both follow tokens until the store returns an
//! empty one; there is no assumed maximum page count.

use super::{BoundaryType, DataService, Page};
use crate::error::Result;
use crate::model::Event;
use crate::transport::Transport;
use async_stream::try_stream;
use chrono::{DateTime, Utc};
use futures::Stream;

/// Store-documented cap on events returned by a single non-paged data call.
/// A capped response is still complete from the client's perspective; use
/// the paged operations to traverse larger windows.
pub const SINGLE_CALL_EVENT_CAP: usize = 250_000;

impl<T: Transport> DataService<T> {
    /// Lazily traverse a window page by page, yielding events in ascending
    /// timestamp order.
    ///
    /// Memory stays bounded by `page_size` regardless of window width. The
    /// first failed fetch ends the stream with that error.
    pub fn paged_events<'a>(
        &'a self,
        stream_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        boundary: BoundaryType,
        page_size: usize,
    ) -> impl Stream<Item = Result<Event>> + 'a {
        let stream_id = stream_id.to_string();
        try_stream! {
            let mut token = String::new();
            loop {
                let page = self
                    .window_values_paged(&stream_id, start, end, boundary, page_size, &token)
                    .await?;
                let Page { results, continuation_token } = page;
                for event in results {
                    yield event;
                }
                if continuation_token.is_empty() {
                    break;
                }
                token = continuation_token;
            }
        }
    }

    /// Traverse a whole window through the paged operation and return the
    /// concatenated events.
    ///
    /// All-or-nothing: the first page failure aborts the traversal and
    /// surfaces that error; nothing accumulated so far is returned.
    pub async fn collect_window(
        &self,
        stream_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        boundary: BoundaryType,
        page_size: usize,
    ) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        let mut token = String::new();

        loop {
            let page = self
                .window_values_paged(stream_id, start, end, boundary, page_size, &token)
                .await?;
            let Page {
                results,
                continuation_token,
            } = page;
            events.extend(results);
            if continuation_token.is_empty() {
                break;
            }
            token = continuation_token;
        }

        tracing::debug!(stream_id, total = events.len(), "Window traversal complete");
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{numeric_events, service, window_end, window_start};
    use super::*;
    use crate::error::Error;
    use crate::transport::MockTransport;
    use futures::{StreamExt, TryStreamExt};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_four_events_page_size_two_takes_exactly_two_fetches() {
        let all = numeric_events(&[100.0, -30.0, 20.0, 7.5]);
        let mock = MockTransport::new();
        mock.enqueue_json(json!({
            "Results": &all[0..2],
            "ContinuationToken": "cursor-a"
        }));
        mock.enqueue_json(json!({
            "Results": &all[2..4],
            "ContinuationToken": ""
        }));
        let service = service(mock);

        let events = service
            .collect_window(
                "pump-01",
                window_start(),
                window_end(),
                BoundaryType::Inside,
                2,
            )
            .await
            .unwrap();

        assert_eq!(service.transport().request_count(), 2);
        assert_eq!(events.len(), 4);

        // Ascending order preserved across page boundaries, no duplicates
        let timestamps: Vec<_> = events.iter().map(|e| e.timestamp()).collect();
        let mut deduped = timestamps.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), 4);
        assert!(timestamps.windows(2).all(|p| p[0] < p[1]));
    }

    #[tokio::test]
    async fn test_page_size_one_requires_one_fetch_per_event() {
        let all = numeric_events(&[1.0, 2.0, 3.0]);
        let mock = MockTransport::new();
        mock.enqueue_json(json!({ "Results": &all[0..1], "ContinuationToken": "a" }));
        mock.enqueue_json(json!({ "Results": &all[1..2], "ContinuationToken": "b" }));
        mock.enqueue_json(json!({ "Results": &all[2..3] }));
        let service = service(mock);

        let events = service
            .collect_window(
                "pump-01",
                window_start(),
                window_end(),
                BoundaryType::Inside,
                1,
            )
            .await
            .unwrap();

        assert_eq!(service.transport().request_count(), 3);
        assert_eq!(events.len(), 3);
    }

    #[tokio::test]
    async fn test_continuation_token_is_threaded_between_fetches() {
        let all = numeric_events(&[1.0, 2.0]);
        let mock = MockTransport::new();
        mock.enqueue_json(json!({ "Results": &all[0..1], "ContinuationToken": "cursor-a" }));
        mock.enqueue_json(json!({ "Results": &all[1..2], "ContinuationToken": "" }));
        let service = service(mock);

        service
            .collect_window(
                "pump-01",
                window_start(),
                window_end(),
                BoundaryType::Inside,
                1,
            )
            .await
            .unwrap();

        let sent = service.transport().requests();
        let token_of = |i: usize| {
            sent[i]
                .query
                .iter()
                .find(|(n, _)| n == "continuationToken")
                .map(|(_, v)| v.clone())
        };
        assert_eq!(token_of(0), None);
        assert_eq!(token_of(1), Some("cursor-a".to_string()));
    }

    #[tokio::test]
    async fn test_paged_traversal_matches_single_window_call() {
        let all = numeric_events(&[4.0, 8.0, 15.0, 16.0, 23.0]);
        let mock = MockTransport::new();
        // Single non-paged call
        mock.enqueue_json(Value::Array(all.clone()));
        // Same data served as three pages
        mock.enqueue_json(json!({ "Results": &all[0..2], "ContinuationToken": "a" }));
        mock.enqueue_json(json!({ "Results": &all[2..4], "ContinuationToken": "b" }));
        mock.enqueue_json(json!({ "Results": &all[4..5] }));
        let service = service(mock);

        let whole = service
            .window_values("pump-01", window_start(), window_end())
            .await
            .unwrap();
        let paged = service
            .collect_window(
                "pump-01",
                window_start(),
                window_end(),
                BoundaryType::Inside,
                2,
            )
            .await
            .unwrap();

        assert_eq!(whole, paged);
    }

    #[tokio::test]
    async fn test_first_error_aborts_with_nothing_returned() {
        let all = numeric_events(&[1.0, 2.0]);
        let mock = MockTransport::new();
        mock.enqueue_json(json!({ "Results": &all[0..1], "ContinuationToken": "a" }));
        mock.enqueue_error(Error::Transport("connection reset".to_string()));
        let service = service(mock);

        let result = service
            .collect_window(
                "pump-01",
                window_start(),
                window_end(),
                BoundaryType::Inside,
                1,
            )
            .await;

        assert!(matches!(result, Err(Error::Transport(_))));
        assert_eq!(service.transport().request_count(), 2);
    }

    #[tokio::test]
    async fn test_lazy_stream_yields_same_sequence_as_collector() {
        let all = numeric_events(&[1.0, 2.0, 3.0, 4.0]);
        let mock = MockTransport::new();
        mock.enqueue_json(json!({ "Results": &all[0..2], "ContinuationToken": "a" }));
        mock.enqueue_json(json!({ "Results": &all[2..4] }));
        mock.enqueue_json(json!({ "Results": &all[0..2], "ContinuationToken": "a" }));
        mock.enqueue_json(json!({ "Results": &all[2..4] }));
        let service = service(mock);

        let streamed: Vec<Event> = service
            .paged_events(
                "pump-01",
                window_start(),
                window_end(),
                BoundaryType::Inside,
                2,
            )
            .try_collect()
            .await
            .unwrap();
        let collected = service
            .collect_window(
                "pump-01",
                window_start(),
                window_end(),
                BoundaryType::Inside,
                2,
            )
            .await
            .unwrap();

        assert_eq!(streamed, collected);
    }

    #[tokio::test]
    async fn test_lazy_stream_fetches_only_what_is_polled() {
        let all = numeric_events(&[1.0, 2.0, 3.0, 4.0]);
        let mock = MockTransport::new();
        mock.enqueue_json(json!({ "Results": &all[0..2], "ContinuationToken": "a" }));
        mock.enqueue_json(json!({ "Results": &all[2..4] }));
        let service = service(mock);

        let stream = service.paged_events(
            "pump-01",
            window_start(),
            window_end(),
            BoundaryType::Inside,
            2,
        );
        futures::pin_mut!(stream);

        // Two events come out of the first page without touching the second
        stream.next().await.unwrap().unwrap();
        stream.next().await.unwrap().unwrap();
        assert_eq!(service.transport().request_count(), 1);

        stream.next().await.unwrap().unwrap();
        assert_eq!(service.transport().request_count(), 2);
    }

    #[tokio::test]
    async fn test_lazy_stream_surfaces_page_error() {
        let mock = MockTransport::new();
        mock.enqueue_error(Error::Transport("connection reset".to_string()));
        let service = service(mock);

        let result: Result<Vec<Event>> = service
            .paged_events(
                "pump-01",
                window_start(),
                window_end(),
                BoundaryType::Inside,
                2,
            )
            .try_collect()
            .await;

        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
