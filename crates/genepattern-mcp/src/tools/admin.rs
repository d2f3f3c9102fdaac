//! Server configuration, usage statistics, disk quota and module pinning.

use genepattern_client::{CallContext, GenePatternClient, PinRequest, SystemMessage};

use super::helpers::render;
use super::params::{
    DateRangeParams, LogMessageParams, NotifyMaxJobsParams, PinModuleParams, ServerPropertyParams,
    SetSystemMessageParams, UnpinModuleParams,
};

// ── config ──

pub async fn get_system_message(client: &GenePatternClient, ctx: &CallContext) -> String {
    render(client.get_system_message(ctx).await)
}

pub async fn set_system_message(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: SetSystemMessageParams,
) -> String {
    let message = SystemMessage::from(params);
    render(client.set_system_message(ctx, &message).await)
}

pub async fn get_server_property(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: ServerPropertyParams,
) -> String {
    render(client.get_server_property(ctx, &params.property_name).await)
}

pub async fn get_genepattern_version(client: &GenePatternClient, ctx: &CallContext) -> String {
    render(client.get_genepattern_version(ctx).await)
}

pub async fn get_current_user(client: &GenePatternClient, ctx: &CallContext) -> String {
    render(client.get_current_user(ctx).await)
}

pub async fn is_admin(client: &GenePatternClient, ctx: &CallContext) -> String {
    render(client.is_admin(ctx).await)
}

pub async fn check_is_admin(client: &GenePatternClient, ctx: &CallContext) -> String {
    render(client.check_is_admin(ctx).await)
}

pub async fn get_server_url(client: &GenePatternClient, ctx: &CallContext) -> String {
    render(client.get_server_url(ctx).await)
}

// ── usage ──

pub async fn get_user_summary_stats(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: DateRangeParams,
) -> String {
    render(
        client
            .get_user_summary_stats(ctx, &params.start_date, &params.end_date)
            .await,
    )
}

pub async fn log_client_message(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: LogMessageParams,
) -> String {
    render(
        client
            .log_client_message(ctx, &params.logname, &params.loglevel, &params.message)
            .await,
    )
}

// ── disk ──

pub async fn get_disk_info(client: &GenePatternClient, ctx: &CallContext) -> String {
    render(client.get_disk_info(ctx).await)
}

pub async fn notify_max_jobs_exceeded(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: NotifyMaxJobsParams,
) -> String {
    render(
        client
            .notify_max_jobs_exceeded(ctx, params.task_name.as_deref())
            .await,
    )
}

// ── tags ──

pub async fn get_all_tags(client: &GenePatternClient, ctx: &CallContext) -> String {
    render(client.get_all_tags(ctx).await)
}

pub async fn pin_module(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: PinModuleParams,
) -> String {
    let pin = PinRequest::new(params.user, params.lsid, params.position);
    render(client.pin_module(ctx, &pin).await)
}

pub async fn repin_module(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: PinModuleParams,
) -> String {
    let pin = PinRequest::new(params.user, params.lsid, params.position);
    render(client.repin_module(ctx, &pin).await)
}

pub async fn unpin_module(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: UnpinModuleParams,
) -> String {
    render(client.unpin_module(ctx, &params.user, &params.lsid).await)
}
