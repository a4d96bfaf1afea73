//! globeway-cli
//! ============
//!
//! Command-line interface for the `globeway-core` country catalog.
//!
//! This crate primarily provides a binary (`globeway`). We include a small
//! library target so that docs.rs renders a documentation page and shows this
//! overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install globeway-cli
//! globeway --help
//! globeway stats
//! globeway country BR --economy
//! globeway --lang pt countries --region Europe
//! ```
//!
//! For programmatic access to the loader, search and enrichment APIs, use the
//! [`globeway-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable.
