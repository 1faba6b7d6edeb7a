//! Metadata retrieval and project downloads over HTTP
//!
//! Metadata can also come from a local JSON file, which is enough for
//! inspecting dependencies offline. Downloads always go to the service.

use crate::action::Action;
use crate::error::{Error, Result};
use crate::metadata::MetadataDocument;
use crate::request::RequestParameters;
use crate::service::ServiceConfig;
use anyhow::Context;
use reqwest::header::{ACCEPT, CONTENT_DISPOSITION};
use std::path::PathBuf;
use tokio::fs;
use url::Url;

/// Media type the service answers with the v2.2 metadata format
pub const METADATA_MEDIA_TYPE: &str = "application/vnd.initializr.v2.2+json";

/// Where the metadata document is read from
#[derive(Debug, Clone)]
enum MetadataSource {
    Remote(Url),
    Local(PathBuf),
}

/// Resolve the service root: explicit override, then the config's env var, then its default
pub fn resolve_service_url<C: ServiceConfig>(
    config: &C,
    override_url: Option<&str>,
) -> anyhow::Result<Url> {
    let url_str = match override_url {
        Some(url) => url.to_string(),
        None => std::env::var(config.service_url_env())
            .unwrap_or_else(|_| config.default_service_url().to_string()),
    };
    Url::parse(&url_str).with_context(|| format!("Invalid service URL: {}", url_str))
}

/// A generated file as returned by the service
#[derive(Debug, Clone)]
pub struct Download {
    pub action: Action,
    /// File name announced by the service, or the action's default
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Initializr client - handles metadata retrieval and generation requests
pub struct InitializrClient {
    base_url: Url,
    metadata_source: MetadataSource,
    client: reqwest::Client,
}

impl InitializrClient {
    /// Create a new client with a custom user agent
    pub fn new(base_url: Url, user_agent: &str) -> Self {
        Self {
            metadata_source: MetadataSource::Remote(base_url.clone()),
            base_url,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Create a client from a service config, honouring an explicit URL override
    pub fn from_config<C: ServiceConfig>(
        config: &C,
        override_url: Option<&str>,
    ) -> anyhow::Result<Self> {
        let base_url = resolve_service_url(config, override_url)?;
        Ok(Self::new(base_url, config.user_agent()))
    }

    /// Read metadata from a local JSON file instead of the service
    pub fn with_metadata_file(mut self, path: PathBuf) -> Self {
        self.metadata_source = MetadataSource::Local(path);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a URL by appending a path segment, preserving query parameters
    fn build_url(base: &Url, path_segment: &str) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::download(base.as_str(), "URL cannot have path segments"))?
            .pop_if_empty()
            .push(path_segment);
        Ok(url)
    }

    /// Fetch and validate the metadata document
    pub async fn fetch_metadata(&self) -> Result<MetadataDocument> {
        match &self.metadata_source {
            MetadataSource::Remote(url) => {
                tracing::debug!(%url, "fetching metadata");
                let response = self
                    .client
                    .get(url.clone())
                    .header(ACCEPT, METADATA_MEDIA_TYPE)
                    .send()
                    .await
                    .map_err(|e| Error::retrieval(url.as_str(), e))?;

                if !response.status().is_success() {
                    return Err(Error::retrieval(
                        url.as_str(),
                        format!("HTTP {}", response.status()),
                    ));
                }

                let content = response
                    .text()
                    .await
                    .map_err(|e| Error::retrieval(url.as_str(), e))?;
                tracing::debug!(bytes = content.len(), "metadata received");
                MetadataDocument::from_json(&content, url.as_str())
            }
            MetadataSource::Local(path) => {
                let location = path.display().to_string();
                tracing::debug!(path = %location, "reading metadata file");
                let content = fs::read_to_string(path)
                    .await
                    .map_err(|e| Error::retrieval(&location, e))?;
                MetadataDocument::from_json(&content, &location)
            }
        }
    }

    /// Request a generated project or build file.
    ///
    /// Each parameter is form-encoded on the wire, so free text such as a
    /// description containing `&` or `+` reaches the service intact.
    pub async fn fetch_download(
        &self,
        action: Action,
        parameters: &RequestParameters,
    ) -> Result<Download> {
        let mut url = Self::build_url(&self.base_url, action.path())?;
        {
            let mut query = url.query_pairs_mut();
            for (param, value) in parameters.iter() {
                query.append_pair(param.as_str(), value);
            }
        }
        tracing::debug!(%url, request = %parameters, "requesting generation");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::download(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::download(
                url.as_str(),
                format!("HTTP {}{}", status, error_detail(&body)),
            ));
        }

        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| action.path().to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::download(url.as_str(), e))?
            .to_vec();
        tracing::debug!(file_name = %file_name, bytes = bytes.len(), "download received");

        Ok(Download {
            action,
            file_name,
            bytes,
        })
    }
}

/// The service reports failures as JSON with a `message` field
fn error_detail(body: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());

    if message.is_empty() {
        String::new()
    } else {
        format!(": {}", message)
    }
}

/// Extract a bare file name from a `Content-Disposition` header value
fn filename_from_disposition(value: &str) -> Option<String> {
    let raw = value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))?;
    let name = raw.trim_matches('"');
    let name = name.rsplit(['/', '\\']).next().unwrap_or(name);

    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::model::tests::FIXTURE;
    use crate::request::RequestParam;
    use mockito::Matcher;

    fn parameters(project_type: &str, rest: &[(RequestParam, &str)]) -> RequestParameters {
        let mut parameters = RequestParameters::new(project_type);
        for (param, value) in rest {
            parameters.push(*param, *value);
        }
        parameters
    }

    fn client_for(server: &mockito::Server) -> InitializrClient {
        InitializrClient::new(Url::parse(&server.url()).unwrap(), "spell-test")
    }

    #[tokio::test]
    async fn test_fetch_metadata_sends_accept_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("accept", METADATA_MEDIA_TYPE)
            .with_status(200)
            .with_header("content-type", METADATA_MEDIA_TYPE)
            .with_body(FIXTURE)
            .create_async()
            .await;

        let metadata = client_for(&server).fetch_metadata().await.unwrap();

        mock.assert_async().await;
        assert_eq!(metadata.languages.values.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_metadata_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .with_status(503)
            .create_async()
            .await;

        let err = client_for(&server).fetch_metadata().await.unwrap_err();

        assert!(matches!(err, Error::Retrieval { .. }));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_fetch_metadata_malformed_document() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .with_status(200)
            .with_body(r#"{"dependencies": {"values": []}}"#)
            .create_async()
            .await;

        let err = client_for(&server).fetch_metadata().await.unwrap_err();
        assert!(matches!(err, Error::Retrieval { .. }));
    }

    #[tokio::test]
    async fn test_fetch_metadata_from_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.json");
        std::fs::write(&path, FIXTURE).unwrap();

        let client = InitializrClient::new(Url::parse("http://localhost:1").unwrap(), "spell-test")
            .with_metadata_file(path);
        let metadata = client.fetch_metadata().await.unwrap();

        assert_eq!(metadata.dependencies.values.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_metadata_missing_local_file() {
        let client = InitializrClient::new(Url::parse("http://localhost:1").unwrap(), "spell-test")
            .with_metadata_file(PathBuf::from("/nonexistent/metadata.json"));

        let err = client.fetch_metadata().await.unwrap_err();
        assert!(matches!(err, Error::Retrieval { .. }));
    }

    #[tokio::test]
    async fn test_fetch_download_uses_action_path_and_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/starter.zip")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("type".into(), "maven-project".into()),
                Matcher::UrlEncoded("description".into(), "Demo project".into()),
                Matcher::UrlEncoded("dependencies".into(), "web,data-jpa".into()),
            ]))
            .with_status(200)
            .with_header("content-disposition", "attachment; filename=\"demo.zip\"")
            .with_body(b"zip-bytes")
            .create_async()
            .await;

        let download = client_for(&server)
            .fetch_download(
                Action::ProjectArchive,
                &parameters(
                    "maven-project",
                    &[
                        (RequestParam::Description, "Demo project"),
                        (RequestParam::Dependencies, "web,data-jpa"),
                    ],
                ),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(download.file_name, "demo.zip");
        assert_eq!(download.bytes, b"zip-bytes");
    }

    #[tokio::test]
    async fn test_fetch_download_encodes_free_text_values() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/starter.zip")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("type".into(), "maven-project".into()),
                Matcher::UrlEncoded("description".into(), "R&D C++ tool".into()),
                Matcher::UrlEncoded("packaging".into(), "jar".into()),
            ]))
            .with_status(200)
            .with_body(b"zip-bytes")
            .create_async()
            .await;

        let request = parameters(
            "maven-project",
            &[
                (RequestParam::Description, "R&D C++ tool"),
                (RequestParam::Packaging, "jar"),
            ],
        );
        let download = client_for(&server)
            .fetch_download(Action::ProjectArchive, &request)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(download.bytes, b"zip-bytes");
        assert_eq!(
            request.to_query_string(),
            "?type=maven-project&description=R&D C++ tool&packaging=jar"
        );
    }

    #[tokio::test]
    async fn test_fetch_download_falls_back_to_action_file_name() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/pom.xml")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<project/>")
            .create_async()
            .await;

        let download = client_for(&server)
            .fetch_download(Action::MavenPom, &parameters("maven-build", &[]))
            .await
            .unwrap();

        assert_eq!(download.file_name, "pom.xml");
    }

    #[tokio::test]
    async fn test_fetch_download_reports_service_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/starter.zip")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"status":400,"message":"Invalid Spring Boot version '1.0.0'"}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .fetch_download(
                Action::ProjectArchive,
                &parameters("maven-project", &[(RequestParam::BootVersion, "1.0.0")]),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Download { .. }));
        assert!(err.to_string().contains("Invalid Spring Boot version '1.0.0'"));
    }

    #[test]
    fn test_filename_from_disposition() {
        assert_eq!(
            filename_from_disposition("attachment; filename=\"demo.zip\""),
            Some("demo.zip".to_string())
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=build.gradle"),
            Some("build.gradle".to_string())
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=\"../../etc/passwd\""),
            Some("passwd".to_string())
        );
        assert_eq!(filename_from_disposition("attachment"), None);
        assert_eq!(filename_from_disposition("attachment; filename=\"..\""), None);
    }

    #[test]
    fn test_resolve_service_url_prefers_override() {
        #[derive(Clone)]
        struct TestConfig;
        impl ServiceConfig for TestConfig {
            fn name(&self) -> &'static str {
                "test"
            }
            fn display_name(&self) -> &'static str {
                "Test"
            }
            fn default_service_url(&self) -> &'static str {
                "https://start.spring.io"
            }
            fn service_url_env(&self) -> &'static str {
                "SPELL_TEST_UNSET_SERVICE_URL"
            }
            fn docs_url(&self) -> &'static str {
                "https://docs.spring.io"
            }
        }

        let url = resolve_service_url(&TestConfig, Some("http://localhost:8080")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/");

        let url = resolve_service_url(&TestConfig, None).unwrap();
        assert_eq!(url.host_str(), Some("start.spring.io"));

        assert!(resolve_service_url(&TestConfig, Some("not a url")).is_err());
    }
}
