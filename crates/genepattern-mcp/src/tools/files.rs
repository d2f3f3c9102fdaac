//! User upload space tool implementations.

use std::path::Path;

use genepattern_client::{CallContext, GenePatternClient};

use super::helpers::{decode_content, render};
use super::params::{
    CreatePipelineParams, PathParams, RenameFileParams, TransferParams, UploadFileParams,
    UploadFromPathParams, UploadJobInputFormParams, UploadJobInputFromPathParams,
    UploadJobInputParams, UploadJobOutputParams,
};

pub async fn rename_file(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: RenameFileParams,
) -> String {
    render(client.rename_file(ctx, &params.path, &params.name).await)
}

pub async fn create_directory(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: PathParams,
) -> String {
    render(client.create_directory(ctx, &params.path).await)
}

pub async fn delete_file_or_directory(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: PathParams,
) -> String {
    render(client.delete_file_or_directory(ctx, &params.path).await)
}

pub async fn copy_file(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: TransferParams,
) -> String {
    render(
        client
            .copy_file(ctx, &params.source, &params.destination)
            .await,
    )
}

pub async fn move_file(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: TransferParams,
) -> String {
    render(
        client
            .move_file(ctx, &params.source, &params.destination)
            .await,
    )
}

pub async fn get_user_files(client: &GenePatternClient, ctx: &CallContext) -> String {
    render(client.get_user_files(ctx).await)
}

/// Binary downloads come back as a base64 envelope.
pub async fn download_item(client: &GenePatternClient, ctx: &CallContext, params: PathParams) -> String {
    render(client.download_item(ctx, &params.path).await)
}

pub async fn upload_file(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: UploadFileParams,
) -> String {
    let content = match decode_content("file_content", params.file_content, params.content_encoding) {
        Ok(bytes) => bytes,
        Err(e) => return e,
    };
    let replace = params.replace.unwrap_or(false);
    render(client.upload_file(ctx, &params.path, content, replace).await)
}

pub async fn upload_job_input_from_body(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: UploadJobInputParams,
) -> String {
    let content = match decode_content("file_content", params.file_content, params.content_encoding) {
        Ok(bytes) => bytes,
        Err(e) => return e,
    };
    render(
        client
            .upload_job_input_from_body(ctx, &params.name, content)
            .await,
    )
}

pub async fn upload_job_input_from_form(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: UploadJobInputFormParams,
) -> String {
    let content = match decode_content("file_content", params.file_content, params.content_encoding) {
        Ok(bytes) => bytes,
        Err(e) => return e,
    };
    render(
        client
            .upload_job_input_from_form(ctx, &params.file_name, content)
            .await,
    )
}

pub async fn upload_job_output(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: UploadJobOutputParams,
) -> String {
    let content = match decode_content("file_content", params.file_content, params.content_encoding) {
        Ok(bytes) => bytes,
        Err(e) => return e,
    };
    render(
        client
            .upload_job_output(ctx, &params.name, &params.jobid, content)
            .await,
    )
}

pub async fn create_pipeline(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: CreatePipelineParams,
) -> String {
    render(
        client
            .create_pipeline(ctx, &params.path, params.name.as_deref())
            .await,
    )
}

/// Reads from the filesystem of the host running this server.
pub async fn upload_file_from_path(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: UploadFromPathParams,
) -> String {
    let replace = params.replace.unwrap_or(false);
    render(
        client
            .upload_file_from_path(ctx, Path::new(&params.local_path), &params.remote_path, replace)
            .await,
    )
}

pub async fn upload_file_for_job_input(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: UploadJobInputFromPathParams,
) -> String {
    render(
        client
            .upload_file_for_job_input(ctx, Path::new(&params.local_file_path), &params.file_name)
            .await,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::params::ContentEncoding;
    use genepattern_client::{ClientConfig, StaticCredentialProvider};
    use std::sync::Arc;

    // Nothing listens here; tests that reach the network would fail loudly.
    fn offline_client() -> GenePatternClient {
        let config = ClientConfig::new("http://127.0.0.1:9/gp").with_timeout_ms(500);
        GenePatternClient::new(&config, Arc::new(StaticCredentialProvider::new("k"))).unwrap()
    }

    #[tokio::test]
    async fn test_bad_base64_short_circuits() {
        let out = upload_job_output(
            &offline_client(),
            &CallContext::empty(),
            UploadJobOutputParams {
                name: "out.txt".to_string(),
                jobid: "1".to_string(),
                file_content: "***".to_string(),
                content_encoding: Some(ContentEncoding::Base64),
            },
        )
        .await;
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["error"], "invalid_input");
    }

    #[tokio::test]
    async fn test_missing_local_file_is_io_error() {
        let out = upload_file_from_path(
            &offline_client(),
            &CallContext::empty(),
            UploadFromPathParams {
                local_path: "/nonexistent/genepattern/input.gct".to_string(),
                remote_path: "input.gct".to_string(),
                replace: None,
            },
        )
        .await;
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["error"], "io_error");
    }
}
