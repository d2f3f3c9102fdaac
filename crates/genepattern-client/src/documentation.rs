//! Module documentation retrieval.
//!
//! Looks the module up in the task listing, follows its documentation link
//! and turns the asset into plain text. The listing call is the only
//! authenticated request and the only step whose failure is an error; every
//! later problem becomes a [`DocumentationUnavailable`] diagnostic.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::api::tasks::ModuleSummary;
use crate::auth::CallContext;
use crate::client::GenePatternClient;
use crate::error::ClientResult;

const PDF: &str = "application/pdf";
const OCTET_STREAM: &str = "application/octet-stream";

/// Extracts text from a PDF, one string per page in page order.
pub trait PageTextExtractor: Send + Sync + fmt::Debug {
    fn extract_pages(&self, pdf: &[u8]) -> Result<Vec<String>, ExtractionError>;
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not parse PDF: {0}")]
    Parse(String),

    #[error("could not extract text from page {page}: {message}")]
    Page { page: u32, message: String },
}

/// [`PageTextExtractor`] backed by `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfExtractor;

impl PageTextExtractor for LopdfExtractor {
    fn extract_pages(&self, pdf: &[u8]) -> Result<Vec<String>, ExtractionError> {
        let document =
            lopdf::Document::load_mem(pdf).map_err(|e| ExtractionError::Parse(e.to_string()))?;
        document
            .get_pages()
            .keys()
            .map(|&page| {
                document
                    .extract_text(&[page])
                    .map_err(|e| ExtractionError::Page {
                        page,
                        message: e.to_string(),
                    })
            })
            .collect()
    }
}

/// Documentation text for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDocumentation {
    pub module: String,
    pub lsid: String,
    pub url: String,
    pub media_type: String,
    pub text: String,
}

/// Why documentation could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentationUnavailable {
    #[error("module '{module}' was not found in the task listing")]
    ModuleNotFound { module: String },

    #[error("module '{module}' has no documentation link")]
    NoDocumentationLink { module: String },

    #[error("could not fetch documentation from {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    #[error("documentation at {url} has unsupported media type '{media_type}'")]
    UnsupportedMediaType { url: String, media_type: String },

    #[error("could not extract text from documentation at {url}: {reason}")]
    ExtractionFailed { url: String, reason: String },
}

impl DocumentationUnavailable {
    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ModuleNotFound { .. } => "module_not_found",
            Self::NoDocumentationLink { .. } => "no_documentation_link",
            Self::FetchFailed { .. } => "fetch_failed",
            Self::UnsupportedMediaType { .. } => "unsupported_media_type",
            Self::ExtractionFailed { .. } => "extraction_failed",
        }
    }
}

/// Outcome of [`GenePatternClient::get_module_documentation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentationLookup {
    Found(ModuleDocumentation),
    Unavailable(DocumentationUnavailable),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MediaKind {
    Pdf,
    Text,
    Unsupported,
}

/// Resolve the media type of a fetched asset.
///
/// Uses the `Content-Type` essence unless it is missing or generic, in which
/// case the URL's file extension decides.
fn detect_media_type(content_type: Option<&str>, url: &Url) -> String {
    let essence = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if !essence.is_empty() && essence != OCTET_STREAM && essence != "binary/octet-stream" {
        return essence;
    }

    let extension = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => PDF,
        "html" | "htm" => "text/html",
        "txt" | "text" => "text/plain",
        "md" => "text/markdown",
        "xml" => "text/xml",
        _ => OCTET_STREAM,
    }
    .to_string()
}

fn classify(media_type: &str) -> MediaKind {
    if media_type == PDF {
        MediaKind::Pdf
    } else if media_type.starts_with("text/") || media_type.contains("html") {
        MediaKind::Text
    } else {
        MediaKind::Unsupported
    }
}

/// UTF-8 first, then ISO-8859-1, which maps every byte to the char of the same value.
fn decode_text(data: &[u8], url: &Url) -> String {
    match String::from_utf8(data.to_vec()) {
        Ok(text) => text,
        Err(err) => {
            warn!(%url, "Documentation is not valid UTF-8, decoding as Latin-1");
            err.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

/// Join a possibly relative link onto the server base URL.
fn resolve_link(base: &Url, link: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(link)
}

impl GenePatternClient {
    /// Fetch a module's documentation as plain text.
    ///
    /// `module` is a name or LSID; a version-less LSID matches any version.
    /// Only the authenticated listing call can fail with an error.
    pub async fn get_module_documentation(
        &self,
        ctx: &CallContext,
        module: &str,
    ) -> ClientResult<DocumentationLookup> {
        let listing = self.get_module_listing(ctx).await?;
        let Some(entry) = listing
            .all_modules
            .into_iter()
            .find(|m| m.is_identified_by(module))
        else {
            return Ok(unavailable(DocumentationUnavailable::ModuleNotFound {
                module: module.to_string(),
            }));
        };

        Ok(match self.documentation_for(entry).await {
            Ok(doc) => DocumentationLookup::Found(doc),
            Err(reason) => unavailable(reason),
        })
    }

    async fn documentation_for(
        &self,
        entry: ModuleSummary,
    ) -> Result<ModuleDocumentation, DocumentationUnavailable> {
        let link = entry
            .documentation
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or_else(|| DocumentationUnavailable::NoDocumentationLink {
                module: entry.name.clone(),
            })?;

        let url = resolve_link(self.base_url(), link).map_err(|e| {
            DocumentationUnavailable::FetchFailed {
                url: link.to_string(),
                reason: e.to_string(),
            }
        })?;

        let (content_type, data) = self.fetch_asset(&url).await?;
        let media_type = detect_media_type(content_type.as_deref(), &url);
        debug!(module = %entry.name, %url, %media_type, size = data.len(), "Fetched module documentation");

        let text = match classify(&media_type) {
            MediaKind::Pdf => self.extract_pdf(&url, data).await?,
            MediaKind::Text => decode_text(&data, &url),
            MediaKind::Unsupported => {
                return Err(DocumentationUnavailable::UnsupportedMediaType {
                    url: url.to_string(),
                    media_type,
                })
            }
        };

        Ok(ModuleDocumentation {
            module: entry.name,
            lsid: entry.lsid,
            url: url.to_string(),
            media_type,
            text,
        })
    }

    /// Unauthenticated GET of a documentation asset.
    async fn fetch_asset(
        &self,
        url: &Url,
    ) -> Result<(Option<String>, Bytes), DocumentationUnavailable> {
        let fetch_failed = |reason: String| DocumentationUnavailable::FetchFailed {
            url: url.to_string(),
            reason,
        };

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| fetch_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_failed(format!("HTTP status {}", status.as_u16())));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let data = response
            .bytes()
            .await
            .map_err(|e| fetch_failed(e.to_string()))?;
        Ok((content_type, data))
    }

    async fn extract_pdf(&self, url: &Url, data: Bytes) -> Result<String, DocumentationUnavailable> {
        let extractor = Arc::clone(&self.extractor);
        let extraction = tokio::task::spawn_blocking(move || extractor.extract_pages(&data)).await;

        let failed = |reason: String| DocumentationUnavailable::ExtractionFailed {
            url: url.to_string(),
            reason,
        };
        match extraction {
            Ok(Ok(pages)) => Ok(pages.join("\n")),
            Ok(Err(e)) => Err(failed(e.to_string())),
            Err(join) => Err(failed(join.to_string())),
        }
    }
}

fn unavailable(reason: DocumentationUnavailable) -> DocumentationLookup {
    warn!(reason = reason.code(), "{reason}");
    DocumentationLookup::Unavailable(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_content_type_wins() {
        let u = url("http://gp/gp/getTaskDoc.jsp?name=X");
        assert_eq!(detect_media_type(Some("application/pdf"), &u), "application/pdf");
        assert_eq!(
            detect_media_type(Some("Text/HTML; charset=ISO-8859-1"), &u),
            "text/html"
        );
    }

    #[test]
    fn test_generic_content_type_falls_back_to_extension() {
        let u = url("http://gp/gp/docs/PreprocessDataset.PDF");
        assert_eq!(detect_media_type(Some("application/octet-stream"), &u), PDF);
        assert_eq!(detect_media_type(None, &u), PDF);
        assert_eq!(
            detect_media_type(None, &url("http://gp/doc/readme.htm")),
            "text/html"
        );
        assert_eq!(detect_media_type(None, &url("http://gp/doc/x")), OCTET_STREAM);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(PDF), MediaKind::Pdf);
        assert_eq!(classify("text/plain"), MediaKind::Text);
        assert_eq!(classify("application/xhtml+xml"), MediaKind::Text);
        assert_eq!(classify("application/zip"), MediaKind::Unsupported);
    }

    #[test]
    fn test_decode_utf8() {
        let u = url("http://gp/doc.txt");
        assert_eq!(decode_text("Größe".as_bytes(), &u), "Größe");
    }

    #[test]
    fn test_decode_latin1_fallback() {
        let u = url("http://gp/doc.txt");
        // "café" in ISO-8859-1; 0xE9 alone is invalid UTF-8.
        assert_eq!(decode_text(&[0x63, 0x61, 0x66, 0xE9], &u), "café");
        assert_eq!(decode_text(&[0xFF, 0x41], &u), "ÿA");
    }

    #[test]
    fn test_resolve_relative_and_absolute_links() {
        let base = url("http://localhost:8080/gp");
        assert_eq!(
            resolve_link(&base, "/gp/getTaskDoc.jsp?name=X").unwrap().as_str(),
            "http://localhost:8080/gp/getTaskDoc.jsp?name=X"
        );
        assert_eq!(
            resolve_link(&base, "docs/X.pdf").unwrap().as_str(),
            "http://localhost:8080/gp/docs/X.pdf"
        );
        assert_eq!(
            resolve_link(&base, "https://cdn.example.org/X.pdf").unwrap().as_str(),
            "https://cdn.example.org/X.pdf"
        );
    }

    #[test]
    fn test_unavailable_codes() {
        let reason = DocumentationUnavailable::UnsupportedMediaType {
            url: "http://gp/x.zip".to_string(),
            media_type: "application/zip".to_string(),
        };
        assert_eq!(reason.code(), "unsupported_media_type");
        assert!(reason.to_string().contains("application/zip"));
    }

    #[test]
    fn test_lopdf_rejects_garbage() {
        let err = LopdfExtractor.extract_pages(b"not a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::Parse(_)));
    }
}
