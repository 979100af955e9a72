//! Query engine: the five retrieval operations against a stream
//!
//! All operations share a [`Transport`], translate their parameters into one
//! request each, and convert wire payloads through the [`Event`] boundary
//! validation. Results come back in ascending timestamp order; the store
//! enforces that, this layer never re-sorts.

mod paging;

pub use paging::SINGLE_CALL_EVENT_CAP;

use crate::error::{Error, Result};
use crate::model::{roundtrip_timestamp, Event, WireEvent};
use crate::transport::{Request, Response, Transport};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Policy for whether range endpoints are inclusive or strict.
///
/// Sent to the store as a numeric query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryType {
    /// Strict range: only events exactly inside the window
    Exact,
    /// Inclusive of events exactly at the start and end indices
    #[default]
    Inside,
    /// Extended outward to the nearest events beyond each endpoint
    Outside,
}

impl BoundaryType {
    pub(crate) fn as_query_value(self) -> &'static str {
        match self {
            BoundaryType::Exact => "0",
            BoundaryType::Inside => "1",
            BoundaryType::Outside => "2",
        }
    }
}

/// One bounded batch of events plus the cursor for the next batch.
///
/// An empty continuation token means this was the final page; that is
/// success, never an error.
#[derive(Debug, Clone)]
pub struct Page {
    pub results: Vec<Event>,
    pub continuation_token: String,
}

impl Page {
    /// Whether this page ends the window
    pub fn is_last(&self) -> bool {
        self.continuation_token.is_empty()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WirePage {
    // A final page may omit Results the same way it omits ContinuationToken
    #[serde(default)]
    results: Vec<WireEvent>,
    #[serde(default)]
    continuation_token: Option<String>,
}

/// Window events in tabular form: column headers plus one row of cell
/// values per event.
///
/// The store shapes the table; this client decodes it without interpreting
/// the cells.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventTable {
    #[serde(default)]
    pub columns: Vec<TableColumn>,
    #[serde(default)]
    pub rows: Vec<Vec<serde_json::Value>>,
}

/// One column header of an [`EventTable`]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableColumn {
    pub name: String,
}

/// A server-side predicate over event fields, e.g. `Value lt 5`.
///
/// The store evaluates the expression; this client only formats it, with
/// locale-independent numeric literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter(String);

impl Filter {
    /// `Value lt <threshold>`
    pub fn value_lt(threshold: f64) -> Self {
        Self(format!("Value lt {}", threshold))
    }

    /// `Value gt <threshold>`
    pub fn value_gt(threshold: f64) -> Self {
        Self(format!("Value gt {}", threshold))
    }

    /// `Value eq <threshold>`
    pub fn value_eq(threshold: f64) -> Self {
        Self(format!("Value eq {}", threshold))
    }

    /// A raw predicate expression, passed through verbatim
    pub fn raw(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only data service for a tenant namespace.
///
/// The store caps any single non-paged call at 250,000 events; a capped
/// response is complete as far as this client is concerned. Use the paged
/// operations to traverse beyond the cap.
pub struct DataService<T> {
    transport: Arc<T>,
    base_path: String,
}

impl<T: Transport> DataService<T> {
    /// Create a data service scoped to a tenant and namespace
    pub fn new(
        transport: Arc<T>,
        tenant_id: impl AsRef<str>,
        namespace_id: impl AsRef<str>,
    ) -> Self {
        Self {
            transport,
            base_path: format!(
                "api/v1/Tenants/{}/Namespaces/{}",
                tenant_id.as_ref(),
                namespace_id.as_ref()
            ),
        }
    }

    pub(crate) fn data_path(&self, stream_id: &str) -> String {
        format!("{}/Streams/{}/Data", self.base_path, stream_id)
    }

    /// All events with timestamps in `[start, end]`, ascending
    pub async fn window_values(
        &self,
        stream_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>> {
        validate_window(start, end)?;
        tracing::debug!(stream_id, %start, %end, "Window query");

        let request = Request::get(self.data_path(stream_id))
            .query("startIndex", roundtrip_timestamp(&start))
            .query("endIndex", roundtrip_timestamp(&end));

        let response = self.transport.send(request).await?;
        decode_events(&response)
    }

    /// Window events in tabular form, one row per event
    pub async fn window_table(
        &self,
        stream_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<EventTable> {
        validate_window(start, end)?;
        tracing::debug!(stream_id, %start, %end, "Window table query");

        let request = Request::get(self.data_path(stream_id))
            .query("startIndex", roundtrip_timestamp(&start))
            .query("endIndex", roundtrip_timestamp(&end))
            .query("form", "table");

        let response = self.transport.send(request).await?;
        response.json()
    }

    /// One page of at most `count` window events, resuming at
    /// `continuation_token` (empty token starts from the window beginning)
    pub async fn window_values_paged(
        &self,
        stream_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        boundary: BoundaryType,
        count: usize,
        continuation_token: &str,
    ) -> Result<Page> {
        validate_window(start, end)?;
        validate_count(count)?;
        tracing::debug!(stream_id, count, token = continuation_token, "Paged window query");

        let mut request = Request::get(self.data_path(stream_id))
            .query("startIndex", roundtrip_timestamp(&start))
            .query("endIndex", roundtrip_timestamp(&end))
            .query("boundaryType", boundary.as_query_value())
            .query("count", count.to_string());
        if !continuation_token.is_empty() {
            request = request.query("continuationToken", continuation_token);
        }

        let response = self.transport.send(request).await?;
        let wire: WirePage = response.json()?;

        Ok(Page {
            results: wire
                .results
                .into_iter()
                .map(Event::try_from)
                .collect::<Result<_>>()?,
            continuation_token: wire.continuation_token.unwrap_or_default(),
        })
    }

    /// Up to `count` consecutive events forward in time from `start`
    pub async fn range_values(
        &self,
        stream_id: &str,
        start: DateTime<Utc>,
        count: usize,
    ) -> Result<Vec<Event>> {
        validate_count(count)?;
        tracing::debug!(stream_id, %start, count, "Range query");

        let request = Request::get(self.data_path(stream_id))
            .query("startIndex", roundtrip_timestamp(&start))
            .query("count", count.to_string());

        let response = self.transport.send(request).await?;
        decode_events(&response)
    }

    /// Exactly `count` evenly spaced samples across `[start, end]`, computed
    /// by the store via interpolation or, outside known data, extrapolation
    pub async fn interpolated_values(
        &self,
        stream_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        count: usize,
    ) -> Result<Vec<Event>> {
        validate_window(start, end)?;
        validate_count(count)?;
        tracing::debug!(stream_id, count, "Interpolated query");

        let request = Request::get(format!("{}/Interpolated", self.data_path(stream_id)))
            .query("startIndex", roundtrip_timestamp(&start))
            .query("endIndex", roundtrip_timestamp(&end))
            .query("count", count.to_string());

        let response = self.transport.send(request).await?;
        decode_events(&response)
    }

    /// Window events additionally matched by a server-side predicate
    pub async fn filtered_values(
        &self,
        stream_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        boundary: BoundaryType,
        filter: &Filter,
    ) -> Result<Vec<Event>> {
        validate_window(start, end)?;
        tracing::debug!(stream_id, filter = filter.as_str(), "Filtered query");

        let request = Request::get(self.data_path(stream_id))
            .query("startIndex", roundtrip_timestamp(&start))
            .query("endIndex", roundtrip_timestamp(&end))
            .query("boundaryType", boundary.as_query_value())
            .query("filter", filter.as_str());

        let response = self.transport.send(request).await?;
        decode_events(&response)
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &Arc<T> {
        &self.transport
    }
}

fn validate_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<()> {
    if end < start {
        return Err(Error::Validation(format!(
            "window end {} precedes start {}",
            roundtrip_timestamp(&end),
            roundtrip_timestamp(&start)
        )));
    }
    Ok(())
}

fn validate_count(count: usize) -> Result<()> {
    if count == 0 {
        return Err(Error::Validation("count must be at least 1".to_string()));
    }
    Ok(())
}

fn decode_events(response: &Response) -> Result<Vec<Event>> {
    let wire: Vec<WireEvent> = response.json()?;
    wire.into_iter().map(Event::try_from).collect()
}
