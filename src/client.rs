//! Client handle and the single-shot call pipeline.

use std::sync::Arc;

use tracing::debug;

use crate::document::Document;
use crate::error::Result;
use crate::params::ParamSet;
use crate::transport::{Invoke, RestTransport};

/// Handle for issuing photosets operations over a transport.
///
/// Cloning is cheap and clones share the transport. Every operation is
/// a self-contained marshal → prepare → invoke → materialize sequence
/// with no state carried between calls, so a `Client` may be used from
/// multiple threads concurrently.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Invoke>,
}

impl Client {
    /// Wraps an arbitrary transport. Test doubles enter here.
    pub fn new(transport: Arc<dyn Invoke>) -> Self {
        Self { transport }
    }

    /// Builds a client over the HTTP REST transport. A secret is only
    /// needed for operations that sign their requests.
    pub fn rest(api_key: impl Into<String>, secret: Option<String>) -> Self {
        Self::new(Arc::new(RestTransport::new(api_key, secret)))
    }

    /// One remote call: finalize the parameter set, prepare, invoke.
    /// The document comes back owned; it is dropped when the operation
    /// finishes materializing its result.
    pub(crate) fn call(&self, method: &str, params: ParamSet) -> Result<Document> {
        debug!(method, params = params.len(), signed = params.sign(), "call");
        let prepared = self.transport.prepare(method, &params)?;
        self.transport.invoke(&prepared)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}
