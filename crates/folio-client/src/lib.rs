//! Resource Client for the portfolio backend.
//!
//! Every call goes through a single [`Dispatcher`], which attaches the bearer
//! token, runs the one-shot refresh cycle on `401`, and reports `403`/`404`
//! as notifications. [`PortfolioApi`] layers typed resource operations on
//! top of it.
//!
//! ```rust,ignore
//! let session = SessionContext::hydrate(FileSessionStore::new(path));
//! let transport = HttpTransport::new(ClientConfig::new("http://localhost:5000/api"))?;
//! let api = PortfolioApi::new(Dispatcher::new(transport, session, notifier));
//! let profile = api.get_profile().await?;
//! ```

pub mod api;
pub mod dispatch;
pub mod error;
pub mod request;
pub mod session;
pub mod transport;

pub use api::PortfolioApi;
pub use dispatch::Dispatcher;
pub use error::{ClientError, StoreError};
pub use request::{ApiRequest, FormPart, Method, RequestBody};
pub use session::{FileSessionStore, MemorySessionStore, SessionContext, SessionStore};
pub use transport::{ClientConfig, HttpTransport, RawResponse, Transport};

#[cfg(test)]
mod tests;
