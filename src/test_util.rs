use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::document::Document;
use crate::error::{Error, Result};
use crate::params::ParamSet;
use crate::transport::{check_envelope, Invoke, PreparedCall};

/// In-process transport double. Counts prepare/invoke traffic and
/// replays a fixed response body, so operation tests can assert wire
/// fidelity and failure containment without any network.
pub(crate) struct StubTransport {
    response: std::result::Result<String, ()>,
    prepared: AtomicUsize,
    invoked: AtomicUsize,
    last: Mutex<Option<PreparedCall>>,
}

impl StubTransport {
    pub fn ok(xml: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(xml.to_owned()),
            prepared: AtomicUsize::new(0),
            invoked: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            response: Err(()),
            prepared: AtomicUsize::new(0),
            invoked: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn prepared(&self) -> usize {
        self.prepared.load(Ordering::SeqCst)
    }

    pub fn invoked(&self) -> usize {
        self.invoked.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> PreparedCall {
        self.last
            .lock()
            .unwrap()
            .clone()
            .expect("no call was prepared")
    }
}

impl Invoke for StubTransport {
    fn prepare(&self, method: &str, params: &ParamSet) -> Result<PreparedCall> {
        self.prepared.fetch_add(1, Ordering::SeqCst);
        let mut wire = vec![("method".to_owned(), method.to_owned())];
        for (name, value) in params.iter() {
            wire.push((name.to_owned(), value.to_owned()));
        }
        let call = PreparedCall {
            method: method.to_owned(),
            params: wire,
        };
        *self.last.lock().unwrap() = Some(call.clone());
        Ok(call)
    }

    fn invoke(&self, _call: &PreparedCall) -> Result<Document> {
        self.invoked.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(xml) => {
                let doc = Document::parse(xml)?;
                check_envelope(&doc)?;
                Ok(doc)
            }
            Err(()) => Err(Error::transport("stub transport failure")),
        }
    }
}

pub(crate) const EMPTY_OK: &str = r#"<rsp stat="ok"/>"#;
