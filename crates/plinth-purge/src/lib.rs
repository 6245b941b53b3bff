//! Best-effort upstream cache invalidation for published artifacts.
//!
//! After an artifact is (re)published, the CDN in front of the platform may
//! still hold the previous version. [`CachePurger`] asks the CDN to drop its
//! copy of the artifact's URL. The call is best-effort by construction: the
//! [`Notifier`] interface cannot fail, every problem is logged and
//! discarded, and ingestion never depends on the outcome.

pub use config::PurgeConfig;
pub use error::{Error, Result};
pub use notifier::{CachePurger, Notifier};

mod config;
mod error;
mod notifier;
