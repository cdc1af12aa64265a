//! Session renewal orchestrator for OpenID Connect clients.
//!
//! A renewal runs either as a refresh-token exchange or as a silent iframe round-trip. Only one
//! renewal is in flight at a time. The iframe round-trip is bounded by a timeout and timed-out
//! attempts are retried with linear backoff before one definitive result is surfaced.
//!
//! The entry point is [`refresher::SessionRefresher::force_refresh_session`]. Everything the
//! orchestrator talks to (discovery, strategies, session state, the completion signal) is injected
//! through the narrow traits in [`discovery`], [`strategy`], [`session`], [`flow`], and
//! [`completion`].

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod callback;
pub mod completion;
pub mod config;
pub mod discovery;
pub mod error;
pub mod flow;
pub mod guard;
pub mod obs;
pub mod refresher;
pub mod retry;
pub mod session;
pub mod strategy;

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;
#[cfg(test)] use color_eyre as _;
