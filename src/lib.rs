//! Typed client bindings for the `flickr.photosets.*` API methods.
//!
//! Each operation is a single synchronous call: required inputs are
//! validated locally, marshaled into wire parameters, sent through a
//! pluggable [`transport::Invoke`] collaborator, and the structured
//! response is materialized into owned result types. There is no
//! retry, caching, or rate limiting here; those belong to the
//! transport or the caller.
//!
//! ```no_run
//! use flickr_photosets::{Client, PhotoListOptions};
//!
//! # fn main() -> flickr_photosets::Result<()> {
//! let client = Client::rest("api-key", Some("secret".to_owned()));
//! let created = client.create("A day out", None, "1234")?;
//! client.add_photo(&created.id, "5678")?;
//! let page = client.get_photos(&created.id, None, &PhotoListOptions::default())?;
//! println!("{} photos", page.total);
//! # Ok(())
//! # }
//! ```

mod builders;
pub mod client;
pub mod document;
pub mod error;
pub mod params;
mod photosets;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_util;

pub use crate::client::Client;
pub use crate::document::{Document, Node};
pub use crate::error::{is_api_error, Error, Result};
pub use crate::params::{join_ids, ParamSet};
pub use crate::transport::{Invoke, PreparedCall, RestTransport, REST_ENDPOINT};
pub use crate::types::{
    ContextPhoto, CreatedPhotoset, Photo, PhotoContext, PhotoListOptions, Photoset, PhotosList,
};
