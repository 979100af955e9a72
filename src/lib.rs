//! Tempest - read-only client for a remote time-series event store
//!
//! Tempest authenticates against the store, resolves a named stream, and
//! retrieves its events through five query modes: bounded window, paginated
//! window, bounded range, interpolated/extrapolated sampling, and filtered
//! predicate queries.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     Query services                         │
//! │  ┌──────────────────────────┐  ┌────────────────────────┐  │
//! │  │      DataService         │  │    MetadataService     │  │
//! │  │  window / paged window   │  │    stream resolution   │  │
//! │  │  range / interpolated    │  └───────────┬────────────┘  │
//! │  │  filtered / pagination   │              │               │
//! │  └────────────┬─────────────┘              │               │
//! └───────────────┼────────────────────────────┼───────────────┘
//!                 └──────────────┬─────────────┘
//!                 ┌──────────────▼─────────────┐
//!                 │     VerbosityTransport     │  accept-verbosity header
//!                 ├────────────────────────────┤
//!                 │       HttpTransport        │  gzip + bearer auth
//!                 └──────────────┬─────────────┘
//!                                ▼
//!                          remote store
//! ```
//!
//! Events are heterogeneous: a numeric reading, or a categorical system
//! state (e.g. a sensor fault) standing in for one. The wire shape is
//! all-optional; [`Event`] makes the split structural and is produced by
//! validation at the deserialization boundary.
//!
//! ## Modules
//!
//! - [`model`]: event record, quality flags, stream metadata
//! - [`transport`]: transport trait, HTTP implementation, verbosity decorator
//! - [`query`]: the five retrieval operations and the pagination driver
//! - [`metadata`]: stream metadata lookup
//! - [`config`]: store connection settings

pub mod config;
pub mod error;
pub mod metadata;
pub mod model;
pub mod query;
pub mod transport;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use metadata::MetadataService;
pub use model::{Event, QualityFlags, Stream, WireEvent};
pub use query::{
    BoundaryType, DataService, EventTable, Filter, Page, TableColumn, SINGLE_CALL_EVENT_CAP,
};
pub use transport::{ClientCredentials, HttpTransport, Transport, VerbosityTransport};
