//! Job tool implementations.
//!
//! Async functions taking the shared client, the caller's context and a
//! param struct, returning tool output. Context extraction happens in
//! server.rs before calling these.

use genepattern_client::{CallContext, GenePatternClient, JobSearchQuery};

use super::helpers::render;
use super::params::{
    AddJobParams, GetJobParams, JobCodeParams, JobIdParams, JobSearchParams, JobTagParams,
};

pub async fn get_job_search_results(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: JobSearchParams,
) -> String {
    let search = JobSearchQuery::from(params);
    render(client.get_job_search_results(ctx, &search).await)
}

pub async fn add_job(client: &GenePatternClient, ctx: &CallContext, params: AddJobParams) -> String {
    render(client.add_job(ctx, params.job_config).await)
}

pub async fn get_job(client: &GenePatternClient, ctx: &CallContext, params: GetJobParams) -> String {
    let options = params.options();
    render(client.get_job(ctx, &params.job_id, options).await)
}

pub async fn get_job_status(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: JobIdParams,
) -> String {
    render(client.get_job_status(ctx, &params.job_id).await)
}

pub async fn terminate_job(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: JobIdParams,
) -> String {
    render(client.terminate_job(ctx, &params.job_id).await)
}

pub async fn delete_job(client: &GenePatternClient, ctx: &CallContext, params: JobIdParams) -> String {
    render(client.delete_job(ctx, &params.job_id).await)
}

pub async fn add_tag_to_job(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: JobTagParams,
) -> String {
    render(client.add_tag_to_job(ctx, params.job_no, &params.tag_text).await)
}

pub async fn remove_tag_from_job(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: JobTagParams,
) -> String {
    render(
        client
            .remove_tag_from_job(ctx, params.job_no, &params.tag_text)
            .await,
    )
}

pub async fn get_recent_jobs(client: &GenePatternClient, ctx: &CallContext) -> String {
    render(client.get_recent_jobs(ctx).await)
}

pub async fn get_incomplete_jobs(client: &GenePatternClient, ctx: &CallContext) -> String {
    render(client.get_incomplete_jobs(ctx).await)
}

pub async fn get_job_children(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: JobIdParams,
) -> String {
    render(client.get_job_children(ctx, &params.job_id).await)
}

pub async fn get_job_code(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: JobCodeParams,
) -> String {
    render(
        client
            .get_job_code(ctx, &params.job_id, params.language.as_deref())
            .await,
    )
}
