//! The translate function: one request in, one response out.
//!
//! Requests and responses use a serverless-style envelope so the same
//! handler serves both the HTTP adapter and JSON-wrapped invocations.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ppt_translate_core::types::DEFAULT_TARGET_LANGUAGE;
use ppt_translate_core::{LanguagePair, TranslationOptions, Translator};
use ppt_translate_pptx::{PptxTranslator, PPTX_CONTENT_TYPE};
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Shared state for every request.
#[derive(Clone)]
pub struct AppState {
    /// Provider used for every batch.
    pub translator: Arc<dyn Translator>,

    /// Batching and rewriting options.
    pub options: TranslationOptions,
}

impl AppState {
    /// Create the state.
    pub fn new(translator: Arc<dyn Translator>, options: TranslationOptions) -> Self {
        Self {
            translator,
            options,
        }
    }
}

/// An inbound invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRequest {
    /// HTTP method, e.g. `POST`.
    pub http_method: String,

    /// Query parameters; `source` and `target` are read.
    #[serde(default, deserialize_with = "null_as_default")]
    pub query_string_parameters: HashMap<String, String>,

    /// Request body, base64 encoded when `is_base64_encoded` is set.
    #[serde(default)]
    pub body: Option<String>,

    /// Whether `body` is base64.
    #[serde(default)]
    pub is_base64_encoded: bool,
}

/// Body of a [`FunctionResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// No content.
    Empty,
    /// Plain text.
    Text(String),
    /// Binary content; base64 encoded when serialized.
    Binary(Vec<u8>),
}

/// An outbound response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionResponse {
    /// HTTP status code.
    pub status_code: u16,

    /// Response headers.
    pub headers: BTreeMap<String, String>,

    /// Response body.
    pub body: ResponseBody,
}

impl FunctionResponse {
    /// A response with the given status and no headers.
    pub fn new(status_code: u16, body: ResponseBody) -> Self {
        Self {
            status_code,
            headers: BTreeMap::new(),
            body,
        }
    }

    /// A plain text response.
    pub fn text(status_code: u16, body: impl Into<String>) -> Self {
        Self::new(status_code, ResponseBody::Text(body.into()))
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Header value by exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

impl Serialize for FunctionResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Envelope<'a> {
            status_code: u16,
            headers: &'a BTreeMap<String, String>,
            body: Cow<'a, str>,
            is_base64_encoded: bool,
        }

        let (body, is_base64_encoded) = match &self.body {
            ResponseBody::Empty => (Cow::Borrowed(""), false),
            ResponseBody::Text(text) => (Cow::Borrowed(text.as_str()), false),
            ResponseBody::Binary(bytes) => (Cow::Owned(BASE64.encode(bytes)), true),
        };

        Envelope {
            status_code: self.status_code,
            headers: &self.headers,
            body,
            is_base64_encoded,
        }
        .serialize(serializer)
    }
}

/// Handle a JSON-style invocation.
pub async fn translate_function(state: &AppState, request: FunctionRequest) -> FunctionResponse {
    let body = match request.body {
        Some(body) if request.is_base64_encoded => match BASE64.decode(body.trim()) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::warn!("Rejected request with invalid base64 body: {}", e);
                return FunctionResponse::text(400, "Invalid base64 body");
            }
        },
        Some(body) => Some(body.into_bytes()),
        None => None,
    };

    respond(
        state,
        &request.http_method,
        &request.query_string_parameters,
        body.as_deref(),
    )
    .await
}

/// Dispatch on the method and translate the document in `body`.
pub async fn respond(
    state: &AppState,
    method: &str,
    params: &HashMap<String, String>,
    body: Option<&[u8]>,
) -> FunctionResponse {
    if method.eq_ignore_ascii_case("OPTIONS") {
        return preflight_response();
    }
    if !method.eq_ignore_ascii_case("POST") {
        return FunctionResponse::text(405, "Use POST with PPTX binary body.");
    }

    let body = match body {
        Some(body) if !body.is_empty() => body,
        _ => return FunctionResponse::text(400, "Empty body"),
    };

    let languages = LanguagePair::from_options(
        params.get("source").map(String::as_str),
        params.get("target").map(String::as_str),
    );

    let pptx = PptxTranslator::new(state.translator.as_ref(), state.options.clone());
    match pptx.translate(body, &languages).await {
        Ok(translated) => FunctionResponse::new(200, ResponseBody::Binary(translated.bytes))
            .with_header("Content-Type", PPTX_CONTENT_TYPE)
            .with_header("Content-Disposition", attachment_disposition(languages.target())),
        Err(e) => {
            log::error!("Translation request failed: {}", e);
            FunctionResponse::text(500, e.to_string())
        }
    }
}

/// `Content-Disposition` value for a translated package.
///
/// The target code comes from the caller; anything other than ASCII
/// letters, digits and `-` falls back to the default target.
fn attachment_disposition(target: &str) -> String {
    let valid = !target.is_empty()
        && target
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    let target = if valid { target } else { DEFAULT_TARGET_LANGUAGE };
    format!("attachment; filename=\"translated_{}.pptx\"", target)
}

/// Answer a CORS preflight request.
fn preflight_response() -> FunctionResponse {
    FunctionResponse::new(204, ResponseBody::Empty)
        .with_header("Access-Control-Allow-Origin", "*")
        .with_header("Access-Control-Allow-Methods", "POST,OPTIONS")
        .with_header("Access-Control-Allow-Headers", "*")
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
