//! Verbosity header decorator
//!
//! The store honors an `accept-verbosity` request header: `verbose` keeps
//! metadata-bearing null fields in responses, `non-verbose` drops them.
//! Toggling the flag is how a caller chooses a terse vs. rich payload shape
//! without separate endpoints.

use super::{Request, Response, Transport};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};

pub(crate) const VERBOSITY_HEADER: &str = "accept-verbosity";

/// Transport decorator tagging every outgoing request with a verbosity
/// preference.
///
/// The flag is per-instance state, read on each send; a change takes effect
/// on the next request. Callers running concurrent query sequences with
/// different verbosity need independent instances.
pub struct VerbosityTransport<T> {
    inner: T,
    verbose: AtomicBool,
}

impl<T> VerbosityTransport<T> {
    /// Wrap a transport, defaulting to verbose responses
    pub fn new(inner: T) -> Self {
        Self::with_verbosity(inner, true)
    }

    /// Wrap a transport with an explicit initial verbosity
    pub fn with_verbosity(inner: T, verbose: bool) -> Self {
        Self {
            inner,
            verbose: AtomicBool::new(verbose),
        }
    }

    /// Set the verbosity applied to subsequent requests
    pub fn set_verbose(&self, verbose: bool) {
        self.verbose.store(verbose, Ordering::Relaxed);
    }

    /// Current verbosity preference
    pub fn is_verbose(&self) -> bool {
        self.verbose.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl<T: Transport> Transport for VerbosityTransport<T> {
    async fn send(&self, request: Request) -> Result<Response> {
        // Adds, never replaces: a header the caller set explicitly wins
        let request = if request.has_header(VERBOSITY_HEADER) {
            request
        } else {
            let value = if self.is_verbose() {
                "verbose"
            } else {
                "non-verbose"
            };
            request.header(VERBOSITY_HEADER, value)
        };

        self.inner.send(request).await
    }
}
