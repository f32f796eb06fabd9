//! # huntctl-siem -- SIEM search client
//!
//! Typed access to SIEM search backends for running hunt queries against
//! live telemetry. Splunk is the first and currently only backend; the
//! connection configuration comes from environment variables so tokens
//! stay out of the workspace tree.
//!
//! ## Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/services/server/info` | Connectivity check |
//! | GET    | `/services/data/indexes` | List searchable indexes |
//! | POST   | `/services/search/jobs` | Oneshot SPL search |

#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod splunk;

pub use config::SplunkConfig;
pub use error::SiemError;
pub use splunk::{SearchRequest, SearchResults, ServerInfo, SplunkClient};
