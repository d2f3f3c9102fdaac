//! Chunked upload tool implementations: server multipart, S3 multipart and
//! resumable (Resumable.js style) chunks.

use genepattern_client::{CallContext, CompletedPart, GenePatternClient, ResumableChunk};

use super::helpers::{decode_content, render};
use super::params::{
    CompleteS3UploadParams, MultipartChunkParams, ResumableChunkParams, ResumableUploadParams,
    S3PartParams, StartMultipartParams, StartS3UploadParams, UploadTokenParams,
};

pub async fn start_multipart_upload(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: StartMultipartParams,
) -> String {
    render(
        client
            .start_multipart_upload(ctx, &params.path, params.file_size, params.parts)
            .await,
    )
}

pub async fn upload_multipart_chunk(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: MultipartChunkParams,
) -> String {
    let content =
        match decode_content("chunk_content", params.chunk_content, params.content_encoding) {
            Ok(bytes) => bytes,
            Err(e) => return e,
        };
    render(
        client
            .upload_multipart_chunk(ctx, &params.token, params.index, content)
            .await,
    )
}

pub async fn get_multipart_upload_status(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: UploadTokenParams,
) -> String {
    render(client.get_multipart_upload_status(ctx, &params.token).await)
}

pub async fn assemble_multipart_upload(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: UploadTokenParams,
) -> String {
    render(client.assemble_multipart_upload(ctx, &params.token).await)
}

pub async fn start_s3_multipart_upload(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: StartS3UploadParams,
) -> String {
    render(
        client
            .start_s3_multipart_upload(ctx, &params.path, params.content_type.as_deref())
            .await,
    )
}

pub async fn get_s3_part_presigned_url(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: S3PartParams,
) -> String {
    render(
        client
            .get_s3_part_presigned_url(ctx, &params.upload_id, &params.path, params.part_number)
            .await,
    )
}

pub async fn complete_s3_multipart_upload(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: CompleteS3UploadParams,
) -> String {
    let parts: Vec<CompletedPart> = params.parts.into_iter().map(Into::into).collect();
    render(
        client
            .complete_s3_multipart_upload(ctx, &params.upload_id, &params.path, &parts)
            .await,
    )
}

pub async fn check_resumable_chunk(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: ResumableChunkParams,
) -> String {
    let chunk = ResumableChunk::from(params);
    render(client.check_resumable_chunk(ctx, &chunk).await)
}

pub async fn upload_resumable_chunk(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: ResumableUploadParams,
) -> String {
    let content =
        match decode_content("chunk_content", params.chunk_content, params.content_encoding) {
            Ok(bytes) => bytes,
            Err(e) => return e,
        };
    let chunk = ResumableChunk::from(params.chunk);
    render(client.upload_resumable_chunk(ctx, &chunk, content).await)
}
