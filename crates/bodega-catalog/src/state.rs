//! # Fetch State
//!
//! The `{data, loading, error}` triple the storefront binds to.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   FetchState Lifecycle                      │
//! │                                                             │
//! │   idle ──begin()──► loading=true, error=None                │
//! │                          │                                  │
//! │              ┌───────────┴───────────┐                      │
//! │          resolve(Ok)             resolve(Err)               │
//! │              │                       │                      │
//! │      data=Some(payload)      error=Some(message)            │
//! │      loading=false           loading=false                  │
//! │                              (previous data kept)           │
//! │                                                             │
//! │   Loading ALWAYS resets on resolve. A fetch that fails      │
//! │   must never leave the UI stuck on a spinner.               │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;

use crate::error::CatalogResult;

/// Observable state of one in-flight or settled fetch.
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> FetchState<T> {
    /// Creates an idle state with no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a fetch as started: loading on, previous error cleared.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Settles the state with a fetch outcome.
    ///
    /// Success stores the payload; failure stores the collapsed display
    /// string and keeps any previously fetched data. Either way the
    /// loading flag resets.
    pub fn resolve(&mut self, result: CatalogResult<T>) {
        match result {
            Ok(data) => self.data = Some(data),
            Err(e) => self.error = Some(e.to_string()),
        }
        self.loading = false;
    }

    /// Runs one whole fetch cycle: begin, await, resolve.
    pub async fn track<F>(&mut self, fut: F)
    where
        F: Future<Output = CatalogResult<T>>,
    {
        self.begin();
        let result = fut.await;
        self.resolve(result);
    }

    /// The last successfully fetched payload, if any.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Consumes the state, yielding the payload.
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Whether a fetch is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The display string of the last failure, if the last fetch failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
