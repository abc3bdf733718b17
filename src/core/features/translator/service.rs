use async_trait::async_trait;
use reqwest::Client;

use super::types::{Language, TranslationRequest, TranslationResponse};
use crate::shared::error::{AppError, AppResult};
use crate::shared::settings::AppSettings;

/// External translation capability.
#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Return the language code the service detects for `text`.
    async fn detect(&self, text: &str) -> AppResult<String>;

    async fn translate(&self, request: &TranslationRequest) -> AppResult<TranslationResponse>;
}

/// Client for the unofficial Google Translate endpoint (`client=gtx`).
pub struct GoogleTranslator {
    http: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(settings: &AppSettings) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout())
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
        })
    }

    fn url(&self, source: Option<Language>, target: Language, text: &str) -> String {
        let source_code = source.map(Language::code).unwrap_or("auto");
        format!(
            "{}?client=gtx&sl={}&tl={}&dt=t&q={}",
            self.endpoint,
            source_code,
            target.code(),
            urlencoding::encode(text)
        )
    }

    async fn fetch(&self, url: &str) -> AppResult<serde_json::Value> {
        let res = self.http.get(url).send().await?;
        if !res.status().is_success() {
            return Err(AppError::Network(format!("Google API Error: {}", res.status())));
        }
        res.json()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to parse JSON: {}", e)))
    }
}

#[async_trait]
impl TranslationService for GoogleTranslator {
    async fn detect(&self, text: &str) -> AppResult<String> {
        // Detection rides on a regular auto-source request; the target is irrelevant.
        let raw_json = self.fetch(&self.url(None, Language::English, text)).await?;
        parse_detected(&raw_json)
            .ok_or_else(|| AppError::Validation("Missing detected language in response".to_string()))
    }

    async fn translate(&self, request: &TranslationRequest) -> AppResult<TranslationResponse> {
        let url = self.url(request.source, request.target, &request.text);
        let raw_json = self.fetch(&url).await?;
        parse_translation(&raw_json)
    }
}

/// Detected source language code, found at index 2 of the response.
pub fn parse_detected(raw_json: &serde_json::Value) -> Option<String> {
    raw_json
        .get(2)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Parse nested array: `[[["Translated", "Original", ...], ...], null, "en", ...]`
pub fn parse_translation(raw_json: &serde_json::Value) -> AppResult<TranslationResponse> {
    let sentences = raw_json
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| AppError::Validation("Invalid response format from Google".to_string()))?;

    let mut translated = String::new();
    for sentence in sentences {
        if let Some(segment) = sentence.get(0).and_then(|v| v.as_str()) {
            translated.push_str(segment);
        }
    }

    Ok(TranslationResponse { translated })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
    }

    /// Answer one request on a loopback port with `response`, after `delay`.
    async fn serve_once(response: String, delay: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            tokio::time::sleep(delay).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{}/translate_a/single", addr)
    }

    /// Same client as `GoogleTranslator::new`, minus any proxy from the environment.
    fn translator_at(endpoint: String, timeout_secs: u64) -> GoogleTranslator {
        let settings = AppSettings {
            endpoint,
            timeout_secs,
            ..AppSettings::default()
        };
        let http = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout())
            .no_proxy()
            .build()
            .unwrap();
        GoogleTranslator {
            http,
            endpoint: settings.endpoint,
        }
    }

    fn english_to_korean(text: &str) -> TranslationRequest {
        TranslationRequest {
            text: text.to_string(),
            source: Some(Language::English),
            target: Language::Korean,
        }
    }

    fn translator() -> GoogleTranslator {
        let settings = AppSettings {
            endpoint: "http://localhost:1/single".to_string(),
            ..AppSettings::default()
        };
        GoogleTranslator::new(&settings).unwrap()
    }

    #[test]
    fn test_parse_concatenates_segments() {
        let body = json!([
            [
                ["안녕하세요. ", "Hello. ", null, null, 10],
                ["세계", "world", null, null, 10]
            ],
            null,
            "en"
        ]);
        let response = parse_translation(&body).unwrap();
        assert_eq!(response.translated, "안녕하세요. 세계");
        assert_eq!(parse_detected(&body).as_deref(), Some("en"));
    }

    #[test]
    fn test_parse_skips_non_text_segments() {
        let body = json!([[["hello", "안녕", null], [null, null, "annyeong"]], null, "ko"]);
        let response = parse_translation(&body).unwrap();
        assert_eq!(response.translated, "hello");
    }

    #[test]
    fn test_parse_rejects_malformed_body() {
        let err = parse_translation(&json!({ "error": "quota" })).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_parse_detected_missing() {
        assert_eq!(parse_detected(&json!([[["x", "y"]], null])), None);
    }

    #[test]
    fn test_url_encodes_text_and_languages() {
        let url = translator().url(Some(Language::English), Language::Korean, "hello world & more");
        assert_eq!(
            url,
            "http://localhost:1/single?client=gtx&sl=en&tl=ko&dt=t&q=hello%20world%20%26%20more"
        );
        let auto = translator().url(None, Language::English, "안녕");
        assert!(auto.contains("sl=auto&tl=en"));
    }

    #[tokio::test]
    async fn test_detect_reads_language_over_http() {
        let body = r#"[[["hi","안녕",null,null,10]],null,"ko"]"#;
        let endpoint = serve_once(http_response("200 OK", body), Duration::ZERO).await;
        let code = translator_at(endpoint, 5).detect("안녕").await.unwrap();
        assert_eq!(code, "ko");
    }

    #[tokio::test]
    async fn test_translate_over_http() {
        let body = r#"[[["안녕 ","hello ",null,null,10],["세계","world",null,null,10]],null,"en"]"#;
        let endpoint = serve_once(http_response("200 OK", body), Duration::ZERO).await;
        let response = translator_at(endpoint, 5)
            .translate(&english_to_korean("hello world"))
            .await
            .unwrap();
        assert_eq!(response.translated, "안녕 세계");
    }

    #[tokio::test]
    async fn test_server_error_status_is_network_error() {
        let endpoint = serve_once(http_response("500 Internal Server Error", ""), Duration::ZERO).await;
        let err = translator_at(endpoint, 5).detect("hello").await.unwrap_err();
        assert!(matches!(err, AppError::Network(_)), "got {:?}", err);

        let endpoint = serve_once(http_response("429 Too Many Requests", "{}"), Duration::ZERO).await;
        let err = translator_at(endpoint, 5)
            .translate(&english_to_korean("hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Network(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_detect_without_language_field_is_validation_error() {
        let endpoint = serve_once(http_response("200 OK", r#"[[["x","y"]],null]"#), Duration::ZERO).await;
        let err = translator_at(endpoint, 5).detect("y").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_non_json_body_is_validation_error() {
        let endpoint = serve_once(http_response("200 OK", "<html>blocked</html>"), Duration::ZERO).await;
        let err = translator_at(endpoint, 5).detect("hello").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_stalled_server_times_out_as_network_error() {
        let body = r#"[[["x","y"]],null,"en"]"#;
        let endpoint = serve_once(http_response("200 OK", body), Duration::from_secs(5)).await;
        let err = translator_at(endpoint, 1).detect("y").await.unwrap_err();
        assert!(matches!(err, AppError::Network(_)), "got {:?}", err);
    }
}
