//! Transparent OAuth 2.0 bearer decorator for HTTP transports: acquire an authorization-code token
//! on first use, attach it to every request, and refresh it once when the API answers `401`.
//!
//! Wrap any [`http::HttpTransport`] in a [`transport::AuthenticatingTransport`] and send requests
//! through it exactly as you would through the inner transport:
//!
//! ```no_run
//! # async fn demo() -> oauth2_authenticator::error::Result<()> {
//! use oauth2_authenticator::{config::OAuthConfig, http::HttpRequest, transport::AuthenticatingTransport};
//!
//! let config = OAuthConfig::new("accounts.zoho.com", "client-id", "client-secret", "grant-code")?;
//! let transport = AuthenticatingTransport::new(config)?;
//! let request = HttpRequest::new(Vec::new());
//! let response = transport.send(request).await?;
//!
//! println!("API answered with HTTP {}.", response.status());
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod transport;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
