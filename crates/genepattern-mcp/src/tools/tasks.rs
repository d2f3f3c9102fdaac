//! Task (module) tool implementations.

use genepattern_client::{CallContext, DocumentationLookup, GenePatternClient};

use super::helpers::{client_error_json, render, render_value};
use super::params::{
    AllTasksParams, FilterModulesParams, GetTaskParams, ModuleDocumentationParams, TaskIdParams,
};

pub async fn get_all_tasks(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: AllTasksParams,
) -> String {
    render(client.get_all_tasks(ctx, params.include_hidden).await)
}

pub async fn get_task(client: &GenePatternClient, ctx: &CallContext, params: GetTaskParams) -> String {
    let options = params.options();
    render(client.get_task(ctx, &params.task_name_or_lsid, options).await)
}

pub async fn get_task_manifest(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: TaskIdParams,
) -> String {
    render(client.get_task_manifest(ctx, &params.task_name_or_lsid).await)
}

pub async fn get_task_eula_info(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: TaskIdParams,
) -> String {
    render(client.get_task_eula_info(ctx, &params.task_name_or_lsid).await)
}

pub async fn filter_modules(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: FilterModulesParams,
) -> String {
    render_value(client.filter_modules(ctx, &params.keyword).await)
}

pub async fn list_module_names(client: &GenePatternClient, ctx: &CallContext) -> String {
    render_value(client.list_module_names(ctx).await)
}

pub async fn list_module_categories(client: &GenePatternClient, ctx: &CallContext) -> String {
    render_value(client.list_module_categories(ctx).await)
}

/// Found documentation is returned as plain text with a short header; an
/// unavailable result is a JSON diagnostic, not an error.
pub async fn get_module_documentation(
    client: &GenePatternClient,
    ctx: &CallContext,
    params: ModuleDocumentationParams,
) -> String {
    match client.get_module_documentation(ctx, &params.module).await {
        Ok(DocumentationLookup::Found(doc)) => format!(
            "# {} ({})\nSource: {} [{}]\n\n{}",
            doc.module, doc.lsid, doc.url, doc.media_type, doc.text
        ),
        Ok(DocumentationLookup::Unavailable(reason)) => serde_json::json!({
            "documentation": null,
            "reason": reason.code(),
            "message": reason.to_string(),
        })
        .to_string(),
        Err(e) => client_error_json(&e),
    }
}
