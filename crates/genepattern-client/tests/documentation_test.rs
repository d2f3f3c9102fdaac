use std::sync::Arc;

use genepattern_client::{
    CallContext, ClientConfig, ClientError, DocumentationLookup, DocumentationUnavailable,
    ExtractionError, GenePatternClient, PageTextExtractor, StaticCredentialProvider,
};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const LSID: &str = "urn:lsid:broad.mit.edu:cancer.software.genepattern.module.analysis:00020";

/// Returns canned pages and records the bytes it was handed.
#[derive(Debug)]
struct CannedPages {
    pages: Vec<&'static str>,
    expected_input: &'static [u8],
}

impl PageTextExtractor for CannedPages {
    fn extract_pages(&self, pdf: &[u8]) -> Result<Vec<String>, ExtractionError> {
        if pdf != self.expected_input {
            return Err(ExtractionError::Parse("unexpected input".to_string()));
        }
        Ok(self.pages.iter().map(|p| p.to_string()).collect())
    }
}

#[derive(Debug)]
struct BrokenPdf;

impl PageTextExtractor for BrokenPdf {
    fn extract_pages(&self, _pdf: &[u8]) -> Result<Vec<String>, ExtractionError> {
        Err(ExtractionError::Page {
            page: 2,
            message: "bad content stream".to_string(),
        })
    }
}

fn listing(documentation: Value) -> Value {
    json!({
        "all_modules": [
            {
                "name": "ConsensusClustering",
                "lsid": format!("{LSID}:7"),
                "description": "Resampling-based clustering",
                "tags": ["Clustering"],
                "documentation": documentation
            },
            {
                "name": "PreprocessDataset",
                "lsid": "urn:lsid:broad.mit.edu:cancer.software.genepattern.module.analysis:00002:6",
                "tags": []
            }
        ],
        "all_categories": [{"name": "Clustering"}, {"name": "Preprocess & Utilities"}]
    })
}

async fn mount_listing(server: &MockServer, documentation: Value) {
    Mock::given(method("GET"))
        .and(path("/gp/rest/v1/tasks/all.json"))
        .and(header("authorization", "Bearer k"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(documentation)))
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> GenePatternClient {
    let config = ClientConfig::new(format!("{}/gp", server.uri()));
    GenePatternClient::new(&config, Arc::new(StaticCredentialProvider::new("k"))).unwrap()
}

fn unauthenticated(req: &Request) -> bool {
    !req.headers.contains_key("authorization")
}

fn expect_unavailable(lookup: DocumentationLookup) -> DocumentationUnavailable {
    match lookup {
        DocumentationLookup::Unavailable(reason) => reason,
        DocumentationLookup::Found(doc) => panic!("Expected unavailable, got {doc:?}"),
    }
}

#[tokio::test]
async fn test_pdf_pages_joined_in_order() {
    let server = MockServer::start().await;
    mount_listing(&server, json!("/gp/docs/ConsensusClustering.pdf")).await;

    Mock::given(method("GET"))
        .and(path("/gp/docs/ConsensusClustering.pdf"))
        .and(unauthenticated)
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"%PDF-fake".to_vec(), "application/pdf"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).with_page_extractor(Arc::new(CannedPages {
        pages: vec!["Page one", "Page two", "Page three"],
        expected_input: b"%PDF-fake",
    }));

    let lookup = client
        .get_module_documentation(&CallContext::empty(), "ConsensusClustering")
        .await
        .unwrap();
    match lookup {
        DocumentationLookup::Found(doc) => {
            assert_eq!(doc.text, "Page one\nPage two\nPage three");
            assert_eq!(doc.media_type, "application/pdf");
            assert_eq!(doc.lsid, format!("{LSID}:7"));
            assert!(doc.url.ends_with("/gp/docs/ConsensusClustering.pdf"));
        }
        DocumentationLookup::Unavailable(reason) => panic!("Expected documentation, got {reason}"),
    }
}

#[tokio::test]
async fn test_versionless_lsid_and_extension_fallback() {
    let server = MockServer::start().await;
    mount_listing(&server, json!("/gp/docs/ConsensusClustering.pdf")).await;

    Mock::given(method("GET"))
        .and(path("/gp/docs/ConsensusClustering.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"%PDF-fake".to_vec(), "application/octet-stream"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).with_page_extractor(Arc::new(CannedPages {
        pages: vec!["only page"],
        expected_input: b"%PDF-fake",
    }));

    let lookup = client
        .get_module_documentation(&CallContext::empty(), LSID)
        .await
        .unwrap();
    assert!(matches!(lookup, DocumentationLookup::Found(ref d) if d.text == "only page"));
}

#[tokio::test]
async fn test_html_latin1_fallback() {
    let server = MockServer::start().await;
    mount_listing(&server, json!("/gp/getTaskDoc.jsp?name=ConsensusClustering")).await;

    // "Résumé" encoded as ISO-8859-1.
    let body = vec![b'R', 0xE9, b's', b'u', b'm', 0xE9];
    Mock::given(method("GET"))
        .and(path("/gp/getTaskDoc.jsp"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .mount(&server)
        .await;

    let lookup = client_for(&server)
        .get_module_documentation(&CallContext::empty(), "ConsensusClustering")
        .await
        .unwrap();
    match lookup {
        DocumentationLookup::Found(doc) => {
            assert_eq!(doc.text, "Résumé");
            assert_eq!(doc.media_type, "text/html");
        }
        DocumentationLookup::Unavailable(reason) => panic!("Expected documentation, got {reason}"),
    }
}

#[tokio::test]
async fn test_unsupported_media_type() {
    let server = MockServer::start().await;
    mount_listing(&server, json!("/gp/docs/ConsensusClustering.zip")).await;

    Mock::given(method("GET"))
        .and(path("/gp/docs/ConsensusClustering.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"PK".to_vec(), "application/zip"))
        .mount(&server)
        .await;

    let reason = expect_unavailable(
        client_for(&server)
            .get_module_documentation(&CallContext::empty(), "ConsensusClustering")
            .await
            .unwrap(),
    );
    assert_eq!(reason.code(), "unsupported_media_type");
}

#[tokio::test]
async fn test_module_not_found() {
    let server = MockServer::start().await;
    mount_listing(&server, json!("/gp/docs/x.pdf")).await;

    let reason = expect_unavailable(
        client_for(&server)
            .get_module_documentation(&CallContext::empty(), "NoSuchModule")
            .await
            .unwrap(),
    );
    assert_eq!(
        reason,
        DocumentationUnavailable::ModuleNotFound {
            module: "NoSuchModule".to_string()
        }
    );
}

#[tokio::test]
async fn test_missing_documentation_link() {
    let server = MockServer::start().await;
    mount_listing(&server, Value::Null).await;

    let reason = expect_unavailable(
        client_for(&server)
            .get_module_documentation(&CallContext::empty(), "PreprocessDataset")
            .await
            .unwrap(),
    );
    assert_eq!(reason.code(), "no_documentation_link");
}

#[tokio::test]
async fn test_asset_fetch_failure_is_diagnostic() {
    let server = MockServer::start().await;
    mount_listing(&server, json!("/gp/docs/ConsensusClustering.pdf")).await;

    Mock::given(method("GET"))
        .and(path("/gp/docs/ConsensusClustering.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let reason = expect_unavailable(
        client_for(&server)
            .get_module_documentation(&CallContext::empty(), "ConsensusClustering")
            .await
            .unwrap(),
    );
    assert_eq!(reason.code(), "fetch_failed");
    assert!(reason.to_string().contains("404"));
}

#[tokio::test]
async fn test_extraction_failure_is_diagnostic() {
    let server = MockServer::start().await;
    mount_listing(&server, json!("/gp/docs/ConsensusClustering.pdf")).await;

    Mock::given(method("GET"))
        .and(path("/gp/docs/ConsensusClustering.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"%PDF".to_vec(), "application/pdf"))
        .mount(&server)
        .await;

    let client = client_for(&server).with_page_extractor(Arc::new(BrokenPdf));
    let reason = expect_unavailable(
        client
            .get_module_documentation(&CallContext::empty(), "ConsensusClustering")
            .await
            .unwrap(),
    );
    assert_eq!(reason.code(), "extraction_failed");
    assert!(reason.to_string().contains("page 2"));
}

#[tokio::test]
async fn test_listing_failure_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gp/rest/v1/tasks/all.json"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_module_documentation(&CallContext::empty(), "ConsensusClustering")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::ApiError { status: 401, .. }));
}

#[tokio::test]
async fn test_listing_helpers() {
    let server = MockServer::start().await;
    mount_listing(&server, json!("/gp/docs/x.pdf")).await;
    let client = client_for(&server);
    let ctx = CallContext::empty();

    let names = client.list_module_names(&ctx).await.unwrap();
    assert_eq!(names, vec!["ConsensusClustering", "PreprocessDataset"]);

    let categories = client.list_module_categories(&ctx).await.unwrap();
    assert_eq!(categories, vec!["Clustering", "Preprocess & Utilities"]);

    let matches = client.filter_modules(&ctx, "Clustering").await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].name, "ConsensusClustering");

    let by_lsid = client.filter_modules(&ctx, "00002:6").await.unwrap();
    assert_eq!(by_lsid.len(), 1);
    assert_eq!(by_lsid[0].name, "PreprocessDataset");
}

#[tokio::test]
async fn test_null_tags_entry_does_not_break_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gp/rest/v1/tasks/all.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "all_modules": [
                {"name": "LegacyModule", "lsid": null, "tags": null},
                {
                    "name": "ConsensusClustering",
                    "lsid": format!("{LSID}:7"),
                    "tags": ["Clustering"],
                    "documentation": "/gp/docs/ConsensusClustering.html"
                }
            ],
            "all_categories": [{"name": "Clustering"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gp/docs/ConsensusClustering.html"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"<p>docs</p>".to_vec(), "text/html"))
        .mount(&server)
        .await;
    let client = client_for(&server);
    let ctx = CallContext::empty();

    let names = client.list_module_names(&ctx).await.unwrap();
    assert_eq!(names, vec!["LegacyModule", "ConsensusClustering"]);

    let matches = client.filter_modules(&ctx, "Clustering").await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].name, "ConsensusClustering");

    let lookup = client
        .get_module_documentation(&ctx, "ConsensusClustering")
        .await
        .unwrap();
    match lookup {
        DocumentationLookup::Found(doc) => assert_eq!(doc.text, "<p>docs</p>"),
        DocumentationLookup::Unavailable(reason) => panic!("Expected documentation, got {reason}"),
    }
}
