//! Google Docs and Drive adapter.
//!
//! [`GoogleAuth`] obtains an OAuth access token (cached, refreshed, or via the
//! installed-app consent flow) and [`GoogleDrive`] implements
//! [`DocumentStore`](crate::store::DocumentStore) over the REST APIs.

mod auth;
mod drive;
mod ids;
pub mod types;

pub use auth::{ClientSecrets, GoogleAuth, GoogleToken, SCOPES};
pub use drive::GoogleDrive;
pub use ids::extract_id;
