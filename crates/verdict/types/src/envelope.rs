//! Status envelopes pairing an HTTP status code with an optional payload.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::ops::Deref;
use thiserror::Error;

use crate::errors::ErrorList;

/// Status constants used by the convention.
pub mod status {
    pub const OK: u16 = 200;
    pub const CREATED: u16 = 201;
    pub const NO_CONTENT: u16 = 204;
    pub const SEE_OTHER: u16 = 303;
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

/// Payload slot of a [`StatusEnvelope`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// No payload.
    #[default]
    Empty,

    /// A success value, or an arbitrary object whose string form is a
    /// message when carried on an error-status envelope.
    Json(serde_json::Value),

    /// Accumulated validation failures.
    Errors(ErrorList),
}

impl Payload {
    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Empty)
    }

    /// The payload's string form, used when a message is needed.
    ///
    /// JSON strings yield their text, other JSON values their compact
    /// rendering, error lists their aggregate message. Empty payloads and
    /// payloads whose rendering is empty yield `None`.
    pub fn message(&self) -> Option<String> {
        let text = match self {
            Payload::Empty => return None,
            Payload::Json(serde_json::Value::Null) => return None,
            Payload::Json(serde_json::Value::String(s)) => s.clone(),
            Payload::Json(value) => value.to_string(),
            Payload::Errors(errors) => errors.aggregate_message(),
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Json(value)
    }
}

impl From<ErrorList> for Payload {
    fn from(errors: ErrorList) -> Self {
        Payload::Errors(errors)
    }
}

/// What a request handler hands back to the response-writing boundary.
///
/// `status` and `payload` are fixed at construction; `location` and
/// `content_location` are response metadata a handler may set afterwards.
/// Construction is total: any status code and any payload combine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusEnvelope {
    status: u16,
    payload: Payload,

    /// Redirect target, written as the `Location` header by a target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Written as the `Content-Location` header by a target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_location: Option<String>,
}

impl StatusEnvelope {
    /// Envelope with no payload.
    pub fn new(status: u16) -> Self {
        Self::with_payload(status, Payload::Empty)
    }

    /// Envelope with the given payload.
    pub fn with_payload(status: u16, payload: impl Into<Payload>) -> Self {
        Self {
            status,
            payload: payload.into(),
            location: None,
            content_location: None,
        }
    }

    /// 200 with a success value.
    pub fn ok(value: serde_json::Value) -> Self {
        Self::with_payload(status::OK, Payload::Json(value))
    }

    /// 201 with no payload.
    pub fn created() -> Self {
        Self::new(status::CREATED)
    }

    /// 204 with no payload.
    pub fn no_content() -> Self {
        Self::new(status::NO_CONTENT)
    }

    /// 303 pointing at `location`.
    pub fn redirect(location: impl Into<String>) -> Self {
        let mut envelope = Self::new(status::SEE_OTHER);
        envelope.location = Some(location.into());
        envelope
    }

    /// 400 with no payload.
    pub fn bad_request() -> Self {
        Self::new(status::BAD_REQUEST)
    }

    /// 404 with no payload.
    pub fn not_found() -> Self {
        Self::new(status::NOT_FOUND)
    }

    /// 500 with no payload.
    pub fn server_error() -> Self {
        Self::new(status::INTERNAL_SERVER_ERROR)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Whether the status classifies as an error (>= 400).
    pub fn is_error(&self) -> bool {
        self.status >= status::BAD_REQUEST
    }

    /// Whether the status classifies as a redirect (300..400).
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// The payload's success value, when it holds one.
    pub fn value(&self) -> Option<&serde_json::Value> {
        match &self.payload {
            Payload::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The payload's validation failures, when it holds them.
    pub fn errors(&self) -> Option<&ErrorList> {
        match &self.payload {
            Payload::Errors(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<u16> for StatusEnvelope {
    fn from(status: u16) -> Self {
        Self::new(status)
    }
}

impl From<ErrorList> for StatusEnvelope {
    fn from(errors: ErrorList) -> Self {
        Self::with_payload(status::BAD_REQUEST, Payload::Errors(errors))
    }
}

/// Misuse of a narrowing accessor. Surfaced at the call site, never
/// swallowed; the envelope itself is left untouched.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Narrowing accessor used on an envelope with no payload.
    #[error("envelope has no payload")]
    EmptyPayload,

    /// A success accessor used while the payload holds validation errors.
    #[error("payload holds validation errors, not a success value")]
    ErrorsPayload,

    /// The payload does not deserialize as the declared type.
    #[error("payload does not match the declared type: {0}")]
    Narrow(#[from] serde_json::Error),
}

/// A [`StatusEnvelope`] with caller-declared payload types.
///
/// Wrapping changes nothing at runtime; it only records which types the
/// caller expects the payload slot to narrow to. `E` defaults to a raw
/// JSON value for the success-typed-only variant.
pub struct TypedEnvelope<T, E = serde_json::Value> {
    inner: StatusEnvelope,
    _narrow: PhantomData<fn() -> (T, E)>,
}

impl<T, E> TypedEnvelope<T, E> {
    pub fn new(inner: StatusEnvelope) -> Self {
        Self {
            inner,
            _narrow: PhantomData,
        }
    }

    pub fn into_inner(self) -> StatusEnvelope {
        self.inner
    }
}

impl<T: DeserializeOwned, E> TypedEnvelope<T, E> {
    /// Narrow the payload to the declared success type.
    pub fn success_value(&self) -> Result<T, EnvelopeError> {
        match self.inner.payload() {
            Payload::Empty => Err(EnvelopeError::EmptyPayload),
            Payload::Errors(_) => Err(EnvelopeError::ErrorsPayload),
            Payload::Json(value) => Ok(serde_json::from_value(value.clone())?),
        }
    }
}

impl<T, E: DeserializeOwned> TypedEnvelope<T, E> {
    /// Narrow the payload to the declared error type.
    pub fn error_value(&self) -> Result<E, EnvelopeError> {
        match self.inner.payload() {
            Payload::Empty => Err(EnvelopeError::EmptyPayload),
            Payload::Json(value) => Ok(serde_json::from_value(value.clone())?),
            Payload::Errors(errors) => {
                let value = serde_json::to_value(errors)?;
                Ok(serde_json::from_value(value)?)
            }
        }
    }
}

impl<T, E> Deref for TypedEnvelope<T, E> {
    type Target = StatusEnvelope;

    fn deref(&self) -> &StatusEnvelope {
        &self.inner
    }
}

impl<T, E> From<StatusEnvelope> for TypedEnvelope<T, E> {
    fn from(inner: StatusEnvelope) -> Self {
        Self::new(inner)
    }
}

impl<T, E> From<TypedEnvelope<T, E>> for StatusEnvelope {
    fn from(typed: TypedEnvelope<T, E>) -> Self {
        typed.into_inner()
    }
}

impl<T, E> Clone for TypedEnvelope<T, E> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<T, E> std::fmt::Debug for TypedEnvelope<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TypedEnvelope").field(&self.inner).finish()
    }
}
