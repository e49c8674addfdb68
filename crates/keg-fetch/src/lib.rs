//! Source archive fetching for the keg installer.
//!
//! The install pipeline consumes fetching as an opaque capability behind
//! the [`Fetcher`] trait; [`ArchiveFetcher`] is the bundled implementation
//! (`http`/`https` via ureq, `file` for local archives). No retry policy
//! lives here -- a failed fetch is surfaced to the caller as terminal for
//! that install attempt.

pub mod fetcher;
