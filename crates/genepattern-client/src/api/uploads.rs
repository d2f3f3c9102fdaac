//! Chunked upload families under `/v1/upload`.
//!
//! Three protocols share one property: the server owns the session. Every
//! method here forwards a single step keyed by the caller's token, upload id
//! or chunk number. Ordering, retries and integrity checks are the caller's
//! business.
//!
//! - Server-side multipart: start → chunk* → status → assemble.
//! - S3 multipart: start → presigned URL per part (the caller PUTs the bytes
//!   to S3 directly) → complete with the collected ETags.
//! - Resumable chunks: check whether a chunk exists → upload it.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::CallContext;
use crate::client::GenePatternClient;
use crate::error::ClientResult;
use crate::request::{ApiRequest, MultipartBody};
use crate::response::ApiResponse;

/// A finished S3 part, as listed in the completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedPart {
    #[serde(rename = "PartNumber")]
    pub part_number: u32,
    #[serde(rename = "ETag")]
    pub etag: String,
}

/// Chunk metadata for the resumable protocol. Field names on the wire are
/// the `resumable*` names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumableChunk {
    pub chunk_number: u64,
    pub chunk_size: u64,
    pub current_chunk_size: u64,
    pub total_size: u64,
    pub identifier: String,
    pub filename: String,
    pub relative_path: String,
    pub total_chunks: u64,
}

impl ResumableChunk {
    fn fields(&self) -> [(&'static str, String); 8] {
        [
            ("resumableChunkNumber", self.chunk_number.to_string()),
            ("resumableChunkSize", self.chunk_size.to_string()),
            ("resumableCurrentChunkSize", self.current_chunk_size.to_string()),
            ("resumableTotalSize", self.total_size.to_string()),
            ("resumableIdentifier", self.identifier.clone()),
            ("resumableFilename", self.filename.clone()),
            ("resumableRelativePath", self.relative_path.clone()),
            ("resumableTotalChunks", self.total_chunks.to_string()),
        ]
    }
}

impl GenePatternClient {
    /// Open a server-side multipart session. The response carries the token.
    pub async fn start_multipart_upload(
        &self,
        ctx: &CallContext,
        path: &str,
        file_size: u64,
        parts: u32,
    ) -> ClientResult<ApiResponse> {
        let request = ApiRequest::post("/v1/upload/multipart/")
            .query("path", path)
            .query("fileSize", file_size)
            .query("parts", parts);
        self.dispatch(ctx, request).await
    }

    pub async fn upload_multipart_chunk(
        &self,
        ctx: &CallContext,
        token: &str,
        index: u32,
        content: Vec<u8>,
    ) -> ClientResult<ApiResponse> {
        let request = ApiRequest::put(format!("/v1/upload/multipart/{token}/{index}")).raw(content);
        self.dispatch(ctx, request).await
    }

    /// Received and missing part indices for a session.
    pub async fn get_multipart_upload_status(
        &self,
        ctx: &CallContext,
        token: &str,
    ) -> ClientResult<ApiResponse> {
        self.dispatch(ctx, ApiRequest::get(format!("/v1/upload/multipart/{token}")))
            .await
    }

    pub async fn assemble_multipart_upload(
        &self,
        ctx: &CallContext,
        token: &str,
    ) -> ClientResult<ApiResponse> {
        self.dispatch(
            ctx,
            ApiRequest::post(format!("/v1/upload/multipart/assemble/{token}")),
        )
        .await
    }

    pub async fn start_s3_multipart_upload(
        &self,
        ctx: &CallContext,
        path: &str,
        content_type: Option<&str>,
    ) -> ClientResult<ApiResponse> {
        let request = ApiRequest::post("/v1/upload/startS3MultipartUpload")
            .query("path", path)
            .query("contentType", content_type);
        self.dispatch(ctx, request).await
    }

    pub async fn get_s3_part_presigned_url(
        &self,
        ctx: &CallContext,
        upload_id: &str,
        path: &str,
        part_number: u32,
    ) -> ClientResult<ApiResponse> {
        let request = ApiRequest::get("/v1/upload/getS3MultipartUploadPresignedUrlOneChunk")
            .query("uploadId", upload_id)
            .query("path", path)
            .query("partNumber", part_number);
        self.dispatch(ctx, request).await
    }

    pub async fn complete_s3_multipart_upload(
        &self,
        ctx: &CallContext,
        upload_id: &str,
        path: &str,
        parts: &[CompletedPart],
    ) -> ClientResult<ApiResponse> {
        let body = json!({
            "uploadId": upload_id,
            "path": path,
            "parts": parts,
        });
        self.dispatch(
            ctx,
            ApiRequest::post("/v1/upload/completeS3MultipartUpload").json(body),
        )
        .await
    }

    /// Ask whether a chunk is already on the server.
    pub async fn check_resumable_chunk(
        &self,
        ctx: &CallContext,
        chunk: &ResumableChunk,
    ) -> ClientResult<ApiResponse> {
        let request = chunk
            .fields()
            .into_iter()
            .fold(ApiRequest::get("/v1/upload/resumable"), |req, (k, v)| {
                req.query(k, v)
            });
        self.dispatch(ctx, request).await
    }

    pub async fn upload_resumable_chunk(
        &self,
        ctx: &CallContext,
        chunk: &ResumableChunk,
        content: Vec<u8>,
    ) -> ClientResult<ApiResponse> {
        let form = chunk
            .fields()
            .into_iter()
            .fold(MultipartBody::new(), |form, (k, v)| form.text(k, v))
            .file("file", chunk.filename.clone(), content);
        self.dispatch(ctx, ApiRequest::post("/v1/upload/resumable").multipart(form))
            .await
    }
}
