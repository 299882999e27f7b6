//! Per-call parameter accumulation.
//!
//! Each operation builds a fresh [`ParamSet`], so two in-flight calls
//! never share mutable state. Finalization is expressed by moving the
//! set into the transport pipeline.

/// Wire parameters for one remote call, in insertion order, plus the
/// signing-required flag declared by the operation.
#[derive(Debug, Clone, Default)]
pub struct ParamSet {
    params: Vec<(&'static str, String)>,
    sign: bool,
}

impl ParamSet {
    /// Starts an unsigned parameter set.
    pub fn new() -> Self {
        Self {
            params: Vec::new(),
            sign: false,
        }
    }

    /// Starts a parameter set for a call that must be signed.
    pub fn signed() -> Self {
        Self {
            params: Vec::new(),
            sign: true,
        }
    }

    /// Appends a parameter. Names are fixed per operation and form part
    /// of the remote service's contract.
    pub fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.params.push((name, value.into()));
    }

    /// Appends a parameter only when a value is present. Unset optional
    /// inputs produce no outgoing parameter at all.
    pub fn push_opt(&mut self, name: &'static str, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.push(name, value);
        }
    }

    pub fn sign(&self) -> bool {
        self.sign
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.params.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// Value of the first parameter with the given name, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Joins an ordered sequence of identifiers with the wire delimiter.
///
/// An empty sequence yields an empty string. Identifiers must not
/// themselves contain a comma; the remote service has no escaping
/// convention for them.
pub fn join_ids<S: AsRef<str>>(ids: &[S]) -> String {
    let mut out = String::new();
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(id.as_ref());
    }
    out
}
