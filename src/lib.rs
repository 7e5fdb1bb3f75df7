//! Sequential Open Banking account-information (AISP) client for sandbox walkthroughs: app
//! token, account-access consent, auto-approved authorization, user token, and account reads.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod aisp;
pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod render;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		io::Write,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(feature = "cli")]
use {clap as _, color_eyre as _, tokio as _, tracing_subscriber as _};
#[cfg(test)] use {httpmock as _, tokio as _};
