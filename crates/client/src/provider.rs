//! Client for the free Google Translate endpoint.
//!
//! A batch is sent as one request: the texts are joined with a separator
//! token, translated as a single string, and split again on the same token.

use crate::transport::{HttpTransport, ReqwestTransport};
use async_trait::async_trait;
use ppt_translate_core::{Error, LanguagePair, Result, Translator};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default provider endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Client identifier sent with every request.
pub const DEFAULT_CLIENT_ID: &str = "gtx";

/// Token placed between texts of one batch.
pub const DEFAULT_SEPARATOR: &str = "|||SEP|||";

/// Provider connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Endpoint URL.
    pub endpoint: String,

    /// Value of the `client` query parameter.
    pub client_id: String,

    /// Separator token between batched texts.
    pub separator: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl ProviderConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Use a different separator token.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::ConfigError("Provider endpoint cannot be empty".to_string()));
        }
        if self.separator.is_empty() {
            return Err(Error::ConfigError("Separator token cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// [`Translator`] that talks to the Google Translate endpoint.
pub struct GoogleTranslator<T = ReqwestTransport> {
    transport: T,
    config: ProviderConfig,
}

impl GoogleTranslator<ReqwestTransport> {
    /// Create a translator that uses a `reqwest` client.
    pub fn from_config(config: ProviderConfig) -> Result<Self> {
        Ok(Self::with_transport(ReqwestTransport::new()?, config))
    }
}

impl<T: HttpTransport> GoogleTranslator<T> {
    /// Create a translator over any transport.
    pub fn with_transport(transport: T, config: ProviderConfig) -> Self {
        Self { transport, config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Join texts into the single query string sent to the provider.
    pub fn join_texts(&self, texts: &[String]) -> String {
        texts.join(&format!("\n{}\n", self.config.separator))
    }

    /// Split a translated query string back into texts.
    ///
    /// The newline placed on each side of a separator by [`Self::join_texts`]
    /// is removed when the provider kept it.
    pub fn split_translation(&self, joined: &str) -> Vec<String> {
        let parts: Vec<&str> = joined.split(self.config.separator.as_str()).collect();
        let last = parts.len() - 1;

        parts
            .iter()
            .enumerate()
            .map(|(idx, part)| {
                let mut part = *part;
                if idx > 0 {
                    part = part.strip_prefix('\n').unwrap_or(part);
                }
                if idx < last {
                    part = part.strip_suffix('\n').unwrap_or(part);
                }
                part.to_string()
            })
            .collect()
    }
}

#[async_trait]
impl<T: HttpTransport> Translator for GoogleTranslator<T> {
    async fn translate_batch(
        &self,
        texts: &[String],
        languages: &LanguagePair,
    ) -> Result<Vec<String>> {
        let query = self.join_texts(texts);
        let params = [
            ("client", self.config.client_id.as_str()),
            ("sl", languages.source()),
            ("tl", languages.target()),
            ("dt", "t"),
            ("q", query.as_str()),
        ];

        let response = self.transport.get(&self.config.endpoint, &params).await?;
        if !response.is_success() {
            log::warn!(
                "Translation provider answered {} for a batch of {} texts",
                response.status,
                texts.len()
            );
            return Err(Error::ProviderStatus {
                status: response.status,
            });
        }

        let joined = parse_translation(&response.body)?;
        Ok(self.split_translation(&joined))
    }
}

/// Concatenate the translated chunks of a provider response.
///
/// The body is a nested array whose first element lists
/// `[translated, original, ...]` tuples.
fn parse_translation(body: &str) -> Result<String> {
    let data: Value = serde_json::from_str(body)
        .map_err(|e| Error::ResponseError(format!("Invalid provider response: {}", e)))?;

    let joined = data
        .get(0)
        .and_then(Value::as_array)
        .map(|chunks| {
            chunks
                .iter()
                .filter_map(|chunk| chunk.get(0).and_then(Value::as_str))
                .collect::<String>()
        })
        .unwrap_or_default();

    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportResponse;
    use std::sync::Mutex;

    /// Returns a canned response and records every query.
    struct StubTransport {
        status: u16,
        body: String,
        requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl StubTransport {
        fn new(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn param(&self, key: &str) -> Option<String> {
            let requests = self.requests.lock().unwrap();
            let (_, params) = requests.last()?;
            params.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        }
    }

    #[async_trait]
    impl HttpTransport for StubTransport {
        async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<TransportResponse> {
            let params = query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            self.requests.lock().unwrap().push((url.to_string(), params));
            Ok(TransportResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn translator(status: u16, body: &str) -> GoogleTranslator<StubTransport> {
        GoogleTranslator::with_transport(StubTransport::new(status, body), ProviderConfig::default())
    }

    #[test]
    fn test_join_texts() {
        let t = translator(200, "");
        assert_eq!(
            t.join_texts(&texts(&["Hello", "World"])),
            "Hello\n|||SEP|||\nWorld"
        );
        assert_eq!(t.join_texts(&texts(&["Only"])), "Only");
    }

    #[test]
    fn test_split_removes_join_padding() {
        let t = translator(200, "");
        assert_eq!(
            t.split_translation("Привет\n|||SEP|||\nМир\n|||SEP|||\n!"),
            vec!["Привет", "Мир", "!"]
        );
        assert_eq!(t.split_translation("a|||SEP|||b"), vec!["a", "b"]);
        assert_eq!(t.split_translation("line\n\n|||SEP|||\n\nx"), vec!["line\n", "\nx"]);
        assert_eq!(t.split_translation(""), vec![""]);
    }

    #[test]
    fn test_parse_translation() {
        let body = r#"[[["Привет\n|||SEP|||\n","Hello\n|||SEP|||\n",null,null,10],["Мир","World",null,null,10]],null,"en"]"#;
        assert_eq!(parse_translation(body).unwrap(), "Привет\n|||SEP|||\nМир");
    }

    #[test]
    fn test_parse_translation_without_chunks() {
        assert_eq!(parse_translation(r#"[null,null,"en"]"#).unwrap(), "");
        assert_eq!(parse_translation("[]").unwrap(), "");
    }

    #[test]
    fn test_parse_translation_rejects_garbage() {
        let err = parse_translation("<html>blocked</html>").unwrap_err();
        assert!(matches!(err, Error::ResponseError(_)));
    }

    #[test]
    fn test_config_validate() {
        assert!(ProviderConfig::default().validate().is_ok());
        assert!(ProviderConfig::new().with_endpoint(" ").validate().is_err());
        assert!(ProviderConfig::new().with_separator("").validate().is_err());
    }

    #[tokio::test]
    async fn test_translate_batch() {
        let body = r#"[[["Привет\n|||SEP|||\n","Hello\n|||SEP|||\n"],["Мир","World"]],null,"en"]"#;
        let t = translator(200, body);

        let out = t
            .translate_batch(&texts(&["Hello", "World"]), &LanguagePair::new("EN", "RU"))
            .await
            .unwrap();

        assert_eq!(out, vec!["Привет", "Мир"]);
        assert_eq!(t.transport.param("client").as_deref(), Some("gtx"));
        assert_eq!(t.transport.param("sl").as_deref(), Some("en"));
        assert_eq!(t.transport.param("tl").as_deref(), Some("ru"));
        assert_eq!(t.transport.param("dt").as_deref(), Some("t"));
        assert_eq!(t.transport.param("q").as_deref(), Some("Hello\n|||SEP|||\nWorld"));

        let requests = t.transport.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, DEFAULT_ENDPOINT);
    }

    #[tokio::test]
    async fn test_garbled_separator_yields_fewer_texts() {
        let body = r#"[[["Привет | | | SEP | | | Мир","x"]],null,"en"]"#;
        let t = translator(200, body);

        let out = t
            .translate_batch(&texts(&["Hello", "World"]), &LanguagePair::default())
            .await
            .unwrap();

        assert_eq!(out.len(), 1);
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let t = translator(503, "Service Unavailable");

        let err = t
            .translate_batch(&texts(&["Hello"]), &LanguagePair::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ProviderStatus { status: 503 }));
        assert_eq!(err.to_string(), "Translation provider error 503");
    }
}
