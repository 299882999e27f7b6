//! Call invoker boundary: request preparation, signing, and the single
//! synchronous round trip.

use std::time::Duration;

use md5::{Digest, Md5};
use tracing::{debug, warn};

use crate::document::Document;
use crate::error::{Error, Result};
use crate::params::ParamSet;

/// Default REST endpoint.
pub const REST_ENDPOINT: &str = "https://api.flickr.com/services/rest/";

/// Prefix every remote method name carries.
pub const METHOD_PREFIX: &str = "flickr.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A finalized request: method plus the complete wire parameter list,
/// including `method`, `api_key`, and `api_sig` where applicable.
/// Buffered by `prepare`, consumed by `invoke`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCall {
    pub method: String,
    pub params: Vec<(String, String)>,
}

impl PreparedCall {
    /// Value of the first wire parameter with the given name, if any.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// The transport collaborator. `prepare` validates and buffers without
/// side effects; `invoke` performs exactly one synchronous round trip.
/// The client never retries; retry policy, if any, belongs here.
pub trait Invoke: Send + Sync {
    fn prepare(&self, method: &str, params: &ParamSet) -> Result<PreparedCall>;
    fn invoke(&self, call: &PreparedCall) -> Result<Document>;
}

/// HTTP transport for the REST endpoint, with flickcurl-style legacy
/// request signing (`api_sig` = MD5 over the shared secret followed by
/// the name-sorted parameter pairs).
pub struct RestTransport {
    endpoint: String,
    api_key: String,
    secret: Option<String>,
    agent: ureq::Agent,
}

impl RestTransport {
    pub fn new(api_key: impl Into<String>, secret: Option<String>) -> Self {
        Self {
            endpoint: REST_ENDPOINT.to_owned(),
            api_key: api_key.into(),
            secret,
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        }
    }

    /// Overrides the REST endpoint. Intended for recorded-response
    /// servers in tests.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Invoke for RestTransport {
    fn prepare(&self, method: &str, params: &ParamSet) -> Result<PreparedCall> {
        if !method.starts_with(METHOD_PREFIX) {
            return Err(Error::InvalidArgument(format!(
                "method `{method}` is not a {METHOD_PREFIX}* method"
            )));
        }
        if self.api_key.is_empty() {
            return Err(Error::MissingArgument("api_key"));
        }

        let mut wire: Vec<(String, String)> = Vec::with_capacity(params.len() + 3);
        wire.push(("method".to_owned(), method.to_owned()));
        wire.push(("api_key".to_owned(), self.api_key.clone()));
        for (name, value) in params.iter() {
            wire.push((name.to_owned(), value.to_owned()));
        }

        if params.sign() {
            let secret = self
                .secret
                .as_deref()
                .ok_or(Error::MissingArgument("secret"))?;
            let base = signature_base(secret, &wire);
            let mut hasher = Md5::new();
            hasher.update(base.as_bytes());
            wire.push(("api_sig".to_owned(), hex::encode(hasher.finalize())));
        }

        Ok(PreparedCall {
            method: method.to_owned(),
            params: wire,
        })
    }

    fn invoke(&self, call: &PreparedCall) -> Result<Document> {
        debug!(method = %call.method, params = call.params.len(), "invoking");

        let mut request = self.agent.get(&self.endpoint);
        for (name, value) in &call.params {
            request = request.query(name, value);
        }
        let response = request.call().map_err(|err| match err {
            ureq::Error::Status(code, _) => {
                Error::transport(format!("unexpected HTTP status {code}"))
            }
            ureq::Error::Transport(err) => Error::transport(err.to_string()),
        })?;
        let body = response
            .into_string()
            .map_err(|err| Error::transport(format!("reading response body: {err}")))?;

        let doc = Document::parse(&body)?;
        check_envelope(&doc)?;
        Ok(doc)
    }
}

/// Rejects `stat="fail"` envelopes, surfacing the remote error code.
pub(crate) fn check_envelope(doc: &Document) -> Result<()> {
    match doc.eval("/rsp/@stat").as_deref() {
        Some("ok") => Ok(()),
        Some("fail") => {
            let code = doc
                .eval("/rsp/err/@code")
                .and_then(|c| c.parse().ok())
                .unwrap_or(0);
            let message = doc.eval("/rsp/err/@msg").unwrap_or_default();
            warn!(code, %message, "remote api failure");
            Err(Error::api(code, message))
        }
        other => Err(Error::malformed(format!(
            "missing or unknown rsp stat {other:?}"
        ))),
    }
}

/// Signing base string: the secret followed by every parameter pair,
/// sorted by name, concatenated without separators.
fn signature_base(secret: &str, wire: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = wire.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    let mut base = String::from(secret);
    for (name, value) in sorted {
        base.push_str(name);
        base.push_str(value);
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> RestTransport {
        RestTransport::new("key123", Some("shhh".to_owned()))
    }

    #[test]
    fn prepare_prefixes_method_and_api_key() {
        let mut params = ParamSet::new();
        params.push("photoset_id", "72157600");
        let call = transport()
            .prepare("flickr.photosets.getInfo", &params)
            .unwrap();
        assert_eq!(call.param("method"), Some("flickr.photosets.getInfo"));
        assert_eq!(call.param("api_key"), Some("key123"));
        assert_eq!(call.param("photoset_id"), Some("72157600"));
        assert_eq!(call.param("api_sig"), None);
    }

    #[test]
    fn prepare_rejects_foreign_method_names() {
        let err = transport()
            .prepare("photosets.getInfo", &ParamSet::new())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn signed_calls_carry_a_signature() {
        let mut params = ParamSet::signed();
        params.push("photoset_id", "72157600");
        params.push("photo_id", "1234");
        let call = transport()
            .prepare("flickr.photosets.addPhoto", &params)
            .unwrap();
        let sig = call.param("api_sig").expect("api_sig present");
        assert_eq!(sig.len(), 32);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));

        // Deterministic, and sensitive to the secret.
        let again = transport()
            .prepare("flickr.photosets.addPhoto", &params)
            .unwrap();
        assert_eq!(call, again);
        let other = RestTransport::new("key123", Some("other".to_owned()))
            .prepare("flickr.photosets.addPhoto", &params)
            .unwrap();
        assert_ne!(call.param("api_sig"), other.param("api_sig"));
    }

    #[test]
    fn signing_without_a_secret_fails_before_any_io() {
        let transport = RestTransport::new("key123", None);
        let err = transport
            .prepare("flickr.photosets.delete", &ParamSet::signed())
            .unwrap_err();
        assert!(matches!(err, Error::MissingArgument("secret")));
    }

    #[test]
    fn signature_base_sorts_by_name() {
        let wire = vec![
            ("method".to_owned(), "flickr.photosets.addPhoto".to_owned()),
            ("api_key".to_owned(), "key123".to_owned()),
            ("photoset_id".to_owned(), "7".to_owned()),
        ];
        assert_eq!(
            signature_base("shhh", &wire),
            "shhhapi_keykey123methodflickr.photosets.addPhotophotoset_id7"
        );
    }

    #[test]
    fn envelope_failure_maps_to_api_error() {
        let doc = Document::parse(
            r#"<rsp stat="fail"><err code="1" msg="Photoset not found"/></rsp>"#,
        )
        .unwrap();
        let err = check_envelope(&doc).unwrap_err();
        assert!(matches!(err, Error::Api { code: 1, .. }));
    }

    #[test]
    fn envelope_missing_stat_is_malformed() {
        let doc = Document::parse("<rsp></rsp>").unwrap();
        assert!(matches!(
            check_envelope(&doc).unwrap_err(),
            Error::MalformedResponse(_)
        ));
    }
}
