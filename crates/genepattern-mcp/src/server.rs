//! MCP ServerHandler implementation for GenePattern.
//!
//! Every tool is a thin wrapper: it pulls the caller's [`CallContext`] out of
//! the request, then hands off to the matching function under
//! [`crate::tools`]. Tool groups:
//!
//! - **Jobs**: search, submit, inspect, terminate and tag jobs.
//! - **Tasks**: module listing, details, documentation and keyword filtering.
//! - **Files**: the user upload space, including path-based uploads.
//! - **Uploads**: server multipart, S3 multipart and resumable chunk flows.
//! - **Admin**: server config, usage stats, disk quota and module pinning.

use std::sync::Arc;

use axum::http::request::Parts;
use genepattern_client::{CallContext, GenePatternClient};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo};
use rmcp::service::RequestContext;
use rmcp::{tool, tool_handler, tool_router, RoleServer, ServerHandler};

use crate::tools::*;

/// GenePattern MCP server handler.
#[derive(Debug, Clone)]
pub struct GenePatternMcpServer {
    tool_router: ToolRouter<Self>,
    client: Arc<GenePatternClient>,
}

impl GenePatternMcpServer {
    pub fn new(client: GenePatternClient) -> Self {
        Self::with_shared_client(Arc::new(client))
    }

    pub fn with_shared_client(client: Arc<GenePatternClient>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            client,
        }
    }

    pub fn client(&self) -> &GenePatternClient {
        &self.client
    }
}

/// Inbound HTTP headers become the call context; stdio calls get an empty one.
fn call_context(context: &RequestContext<RoleServer>) -> CallContext {
    context
        .extensions
        .get::<Parts>()
        .map(|parts| CallContext::from_headers(parts.headers.clone()))
        .unwrap_or_default()
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for GenePatternMcpServer {
    fn get_info(&self) -> ServerInfo {
        let instructions = "GenePattern is a platform for running genomic analysis modules \
             (tasks) as jobs on a remote server. You help users find modules, submit and \
             monitor jobs, and manage files.\n\
             Finding modules: list_module_categories → filter_modules → get_task → \
             get_module_documentation\n\
             Running jobs: upload_file (or upload_job_input_from_body) → add_job → \
             get_job_status → get_job (output files) → download_item\n\
             Large files: start_multipart_upload → upload_multipart_chunk (per part) → \
             get_multipart_upload_status → assemble_multipart_upload. S3 and resumable \
             variants follow the same pattern.\n\
             File content parameters accept content_encoding 'utf8' (default) or 'base64'; \
             use base64 for binary data. Binary downloads come back base64-encoded.\n\
             Errors are JSON objects with an 'error' code; remote_rejection includes the \
             HTTP status and response body."
            .to_string();

        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "genepattern-mcp".to_string(),
                title: Some("GenePattern MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "MCP server exposing the GenePattern REST API: jobs, modules, \
                     files and chunked uploads"
                        .to_string(),
                ),
                icons: None,
                website_url: None,
            },
            instructions: Some(instructions),
        }
    }
}

#[tool_router(router = tool_router)]
impl GenePatternMcpServer {
    // ── Jobs ──

    #[tool(
        name = "get_job_search_results",
        description = "Search jobs visible to the current user. Filter by user, group, batch, tag, comment or module; results are paged (page defaults to 1)."
    )]
    pub async fn get_job_search_results(
        &self,
        Parameters(params): Parameters<JobSearchParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        jobs::get_job_search_results(&self.client, &call_context(&context), params).await
    }

    /// Submit a job. The configuration is forwarded to the server unchanged.
    #[tool(
        name = "add_job",
        description = "Submit a new job. job_config is the GenePattern job JSON, e.g. {\"lsid\": \"...\", \"params\": [{\"name\": \"input.file\", \"values\": [\"...\"]}]}. Returns the new job id."
    )]
    pub async fn add_job(
        &self,
        Parameters(params): Parameters<AddJobParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        jobs::add_job(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "get_job",
        description = "Get full details of a job: status, parameters, output files and child jobs."
    )]
    pub async fn get_job(
        &self,
        Parameters(params): Parameters<GetJobParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        jobs::get_job(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "get_job_status",
        description = "Get the status of a job (pending, processing, finished, error flags and status message)."
    )]
    pub async fn get_job_status(
        &self,
        Parameters(params): Parameters<JobIdParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        jobs::get_job_status(&self.client, &call_context(&context), params).await
    }

    #[tool(name = "terminate_job", description = "Terminate a running job.")]
    pub async fn terminate_job(
        &self,
        Parameters(params): Parameters<JobIdParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        jobs::terminate_job(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "delete_job",
        description = "Delete a job and its result files. This cannot be undone."
    )]
    pub async fn delete_job(
        &self,
        Parameters(params): Parameters<JobIdParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        jobs::delete_job(&self.client, &call_context(&context), params).await
    }

    #[tool(name = "add_tag_to_job", description = "Add a text tag to a job.")]
    pub async fn add_tag_to_job(
        &self,
        Parameters(params): Parameters<JobTagParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        jobs::add_tag_to_job(&self.client, &call_context(&context), params).await
    }

    #[tool(name = "remove_tag_from_job", description = "Remove a text tag from a job.")]
    pub async fn remove_tag_from_job(
        &self,
        Parameters(params): Parameters<JobTagParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        jobs::remove_tag_from_job(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "get_recent_jobs",
        description = "List the current user's most recent jobs."
    )]
    pub async fn get_recent_jobs(&self, context: RequestContext<RoleServer>) -> String {
        jobs::get_recent_jobs(&self.client, &call_context(&context)).await
    }

    #[tool(
        name = "get_incomplete_jobs",
        description = "List the current user's jobs that are pending or still running."
    )]
    pub async fn get_incomplete_jobs(&self, context: RequestContext<RoleServer>) -> String {
        jobs::get_incomplete_jobs(&self.client, &call_context(&context)).await
    }

    #[tool(
        name = "get_job_children",
        description = "List the child jobs of a pipeline job."
    )]
    pub async fn get_job_children(
        &self,
        Parameters(params): Parameters<JobIdParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        jobs::get_job_children(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "get_job_code",
        description = "Get code that reproduces a job in a client language (e.g. 'Python', 'R', 'Java'). Returned as text."
    )]
    pub async fn get_job_code(
        &self,
        Parameters(params): Parameters<JobCodeParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        jobs::get_job_code(&self.client, &call_context(&context), params).await
    }

    // ── Tasks ──

    #[tool(
        name = "get_all_tasks",
        description = "Get every installed module with its categories and suites. Large response; prefer filter_modules or list_module_names for discovery."
    )]
    pub async fn get_all_tasks(
        &self,
        Parameters(params): Parameters<AllTasksParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        tasks::get_all_tasks(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "get_task",
        description = "Get a module's details by name or LSID: parameters, properties, support files and memory settings."
    )]
    pub async fn get_task(
        &self,
        Parameters(params): Parameters<GetTaskParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        tasks::get_task(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "get_task_manifest",
        description = "Get a module's manifest (its property file) by name or LSID. Returned as text."
    )]
    pub async fn get_task_manifest(
        &self,
        Parameters(params): Parameters<TaskIdParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        tasks::get_task_manifest(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "get_task_eula_info",
        description = "Get the license agreements a module requires before it can run."
    )]
    pub async fn get_task_eula_info(
        &self,
        Parameters(params): Parameters<TaskIdParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        tasks::get_task_eula_info(&self.client, &call_context(&context), params).await
    }

    /// Matching is case-sensitive.
    #[tool(
        name = "filter_modules",
        description = "Find modules whose name, description or LSID contains the keyword, or that carry it as a tag. Case-sensitive."
    )]
    pub async fn filter_modules(
        &self,
        Parameters(params): Parameters<FilterModulesParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        tasks::filter_modules(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "list_module_names",
        description = "List the names of all installed modules."
    )]
    pub async fn list_module_names(&self, context: RequestContext<RoleServer>) -> String {
        tasks::list_module_names(&self.client, &call_context(&context)).await
    }

    #[tool(
        name = "list_module_categories",
        description = "List the module category names (e.g. 'Clustering', 'Differential Expression')."
    )]
    pub async fn list_module_categories(&self, context: RequestContext<RoleServer>) -> String {
        tasks::list_module_categories(&self.client, &call_context(&context)).await
    }

    /// Documentation assets are fetched without credentials.
    #[tool(
        name = "get_module_documentation",
        description = "Get a module's user documentation as plain text, by name or LSID. PDF documentation is converted to text. When no documentation can be retrieved the result says why."
    )]
    pub async fn get_module_documentation(
        &self,
        Parameters(params): Parameters<ModuleDocumentationParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        tasks::get_module_documentation(&self.client, &call_context(&context), params).await
    }

    // ── Files ──

    #[tool(
        name = "rename_file",
        description = "Rename a file or directory in the user upload space. The new name stays in the same directory."
    )]
    pub async fn rename_file(
        &self,
        Parameters(params): Parameters<RenameFileParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        files::rename_file(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "create_directory",
        description = "Create a directory in the user upload space. The parent directory must already exist."
    )]
    pub async fn create_directory(
        &self,
        Parameters(params): Parameters<PathParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        files::create_directory(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "delete_file_or_directory",
        description = "Delete a file or directory from the user upload space. This cannot be undone."
    )]
    pub async fn delete_file_or_directory(
        &self,
        Parameters(params): Parameters<PathParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        files::delete_file_or_directory(&self.client, &call_context(&context), params).await
    }

    #[tool(name = "copy_file", description = "Copy a file within the user upload space.")]
    pub async fn copy_file(
        &self,
        Parameters(params): Parameters<TransferParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        files::copy_file(&self.client, &call_context(&context), params).await
    }

    #[tool(name = "move_file", description = "Move a file within the user upload space.")]
    pub async fn move_file(
        &self,
        Parameters(params): Parameters<TransferParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        files::move_file(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "get_user_files",
        description = "List the files and directories in the user upload space as a tree."
    )]
    pub async fn get_user_files(&self, context: RequestContext<RoleServer>) -> String {
        files::get_user_files(&self.client, &call_context(&context)).await
    }

    #[tool(
        name = "download_item",
        description = "Download a file (or a directory as a zip). Text comes back verbatim; binary content comes back as a JSON envelope with base64 content."
    )]
    pub async fn download_item(
        &self,
        Parameters(params): Parameters<PathParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        files::download_item(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "upload_file",
        description = "Upload content to a path in the user upload space. Set replace to overwrite an existing file."
    )]
    pub async fn upload_file(
        &self,
        Parameters(params): Parameters<UploadFileParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        files::upload_file(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "upload_job_input_from_body",
        description = "Upload content as a job input file. Returns the file URL to use as a job parameter value."
    )]
    pub async fn upload_job_input_from_body(
        &self,
        Parameters(params): Parameters<UploadJobInputParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        files::upload_job_input_from_body(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "upload_job_input_from_form",
        description = "Upload content as a job input file using a multipart form. Returns the file URL."
    )]
    pub async fn upload_job_input_from_form(
        &self,
        Parameters(params): Parameters<UploadJobInputFormParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        files::upload_job_input_from_form(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "upload_job_output",
        description = "Attach content to an existing job as an output file."
    )]
    pub async fn upload_job_output(
        &self,
        Parameters(params): Parameters<UploadJobOutputParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        files::upload_job_output(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "create_pipeline",
        description = "Create a pipeline that reproduces how a job result file was produced."
    )]
    pub async fn create_pipeline(
        &self,
        Parameters(params): Parameters<CreatePipelineParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        files::create_pipeline(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "upload_file_from_path",
        description = "Upload a file from the filesystem of the machine running this server to a path in the user upload space."
    )]
    pub async fn upload_file_from_path(
        &self,
        Parameters(params): Parameters<UploadFromPathParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        files::upload_file_from_path(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "upload_file_for_job_input",
        description = "Upload a file from the filesystem of the machine running this server as a job input. Returns the file URL."
    )]
    pub async fn upload_file_for_job_input(
        &self,
        Parameters(params): Parameters<UploadJobInputFromPathParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        files::upload_file_for_job_input(&self.client, &call_context(&context), params).await
    }

    // ── Uploads ──

    #[tool(
        name = "start_multipart_upload",
        description = "Start a server-side multipart upload for a file of file_size bytes split into parts. Returns the upload token used by the other multipart tools."
    )]
    pub async fn start_multipart_upload(
        &self,
        Parameters(params): Parameters<StartMultipartParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        uploads::start_multipart_upload(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "upload_multipart_chunk",
        description = "Upload one part of a multipart upload. index is the part number the server expects."
    )]
    pub async fn upload_multipart_chunk(
        &self,
        Parameters(params): Parameters<MultipartChunkParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        uploads::upload_multipart_chunk(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "get_multipart_upload_status",
        description = "Get which parts of a multipart upload have been received and which are missing."
    )]
    pub async fn get_multipart_upload_status(
        &self,
        Parameters(params): Parameters<UploadTokenParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        uploads::get_multipart_upload_status(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "assemble_multipart_upload",
        description = "Assemble the uploaded parts into the final file once every part is received."
    )]
    pub async fn assemble_multipart_upload(
        &self,
        Parameters(params): Parameters<UploadTokenParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        uploads::assemble_multipart_upload(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "start_s3_multipart_upload",
        description = "Start a direct-to-S3 multipart upload. Returns the S3 upload id."
    )]
    pub async fn start_s3_multipart_upload(
        &self,
        Parameters(params): Parameters<StartS3UploadParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        uploads::start_s3_multipart_upload(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "get_s3_part_presigned_url",
        description = "Get a presigned URL for uploading one part of an S3 multipart upload."
    )]
    pub async fn get_s3_part_presigned_url(
        &self,
        Parameters(params): Parameters<S3PartParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        uploads::get_s3_part_presigned_url(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "complete_s3_multipart_upload",
        description = "Complete an S3 multipart upload given every part number and the ETag S3 returned for it."
    )]
    pub async fn complete_s3_multipart_upload(
        &self,
        Parameters(params): Parameters<CompleteS3UploadParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        uploads::complete_s3_multipart_upload(&self.client, &call_context(&context), params)
            .await
    }

    #[tool(
        name = "check_resumable_chunk",
        description = "Check whether a resumable-upload chunk is already on the server."
    )]
    pub async fn check_resumable_chunk(
        &self,
        Parameters(params): Parameters<ResumableChunkParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        uploads::check_resumable_chunk(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "upload_resumable_chunk",
        description = "Upload one chunk of a resumable upload together with its chunk metadata."
    )]
    pub async fn upload_resumable_chunk(
        &self,
        Parameters(params): Parameters<ResumableUploadParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        uploads::upload_resumable_chunk(&self.client, &call_context(&context), params).await
    }

    // ── Server configuration ──

    #[tool(
        name = "get_system_message",
        description = "Get the server's current system message (HTML)."
    )]
    pub async fn get_system_message(&self, context: RequestContext<RoleServer>) -> String {
        admin::get_system_message(&self.client, &call_context(&context)).await
    }

    #[tool(
        name = "set_system_message",
        description = "Set the server's system message, optionally within a time window. Admin only."
    )]
    pub async fn set_system_message(
        &self,
        Parameters(params): Parameters<SetSystemMessageParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        admin::set_system_message(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "get_server_property",
        description = "Get the value of a server configuration property."
    )]
    pub async fn get_server_property(
        &self,
        Parameters(params): Parameters<ServerPropertyParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        admin::get_server_property(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "get_genepattern_version",
        description = "Get the GenePattern server version."
    )]
    pub async fn get_genepattern_version(&self, context: RequestContext<RoleServer>) -> String {
        admin::get_genepattern_version(&self.client, &call_context(&context)).await
    }

    #[tool(
        name = "get_current_user",
        description = "Get the user the API key authenticates as."
    )]
    pub async fn get_current_user(&self, context: RequestContext<RoleServer>) -> String {
        admin::get_current_user(&self.client, &call_context(&context)).await
    }

    #[tool(
        name = "is_admin",
        description = "Report whether the current user is a server administrator."
    )]
    pub async fn is_admin(&self, context: RequestContext<RoleServer>) -> String {
        admin::is_admin(&self.client, &call_context(&context)).await
    }

    #[tool(
        name = "check_is_admin",
        description = "Report whether the current user has administrator privileges, using the is-admin endpoint."
    )]
    pub async fn check_is_admin(&self, context: RequestContext<RoleServer>) -> String {
        admin::check_is_admin(&self.client, &call_context(&context)).await
    }

    #[tool(
        name = "get_server_url",
        description = "Get the server's configured public URL."
    )]
    pub async fn get_server_url(&self, context: RequestContext<RoleServer>) -> String {
        admin::get_server_url(&self.client, &call_context(&context)).await
    }

    // ── Usage, disk, tags ──

    #[tool(
        name = "get_user_summary_stats",
        description = "Get job and user usage statistics between two dates (YYYY-MM-DD)."
    )]
    pub async fn get_user_summary_stats(
        &self,
        Parameters(params): Parameters<DateRangeParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        admin::get_user_summary_stats(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "log_client_message",
        description = "Write a message to a server-side log at the given level."
    )]
    pub async fn log_client_message(
        &self,
        Parameters(params): Parameters<LogMessageParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        admin::log_client_message(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "get_disk_info",
        description = "Get the current user's disk usage and quota."
    )]
    pub async fn get_disk_info(&self, context: RequestContext<RoleServer>) -> String {
        admin::get_disk_info(&self.client, &call_context(&context)).await
    }

    #[tool(
        name = "notify_max_jobs_exceeded",
        description = "Tell the server the user hit the maximum number of concurrent jobs."
    )]
    pub async fn notify_max_jobs_exceeded(
        &self,
        Parameters(params): Parameters<NotifyMaxJobsParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        admin::notify_max_jobs_exceeded(&self.client, &call_context(&context), params).await
    }

    #[tool(name = "get_all_tags", description = "List every job tag the current user has used.")]
    pub async fn get_all_tags(&self, context: RequestContext<RoleServer>) -> String {
        admin::get_all_tags(&self.client, &call_context(&context)).await
    }

    #[tool(
        name = "pin_module",
        description = "Pin a module to a user's favorites at the given position."
    )]
    pub async fn pin_module(
        &self,
        Parameters(params): Parameters<PinModuleParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        admin::pin_module(&self.client, &call_context(&context), params).await
    }

    #[tool(
        name = "repin_module",
        description = "Move an already pinned module to a new position."
    )]
    pub async fn repin_module(
        &self,
        Parameters(params): Parameters<PinModuleParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        admin::repin_module(&self.client, &call_context(&context), params).await
    }

    #[tool(name = "unpin_module", description = "Remove a module from a user's favorites.")]
    pub async fn unpin_module(
        &self,
        Parameters(params): Parameters<UnpinModuleParams>,
        context: RequestContext<RoleServer>,
    ) -> String {
        admin::unpin_module(&self.client, &call_context(&context), params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genepattern_client::{ClientConfig, StaticCredentialProvider};

    fn test_server() -> GenePatternMcpServer {
        let config = ClientConfig::new("http://localhost:8080/gp");
        let client =
            GenePatternClient::new(&config, Arc::new(StaticCredentialProvider::new("k"))).unwrap();
        GenePatternMcpServer::new(client)
    }

    #[test]
    fn test_server_info() {
        let info = test_server().get_info();

        assert_eq!(info.server_info.name, "genepattern-mcp");
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        let instructions = info.instructions.unwrap();
        assert!(instructions.contains("filter_modules"));
        assert!(instructions.contains("start_multipart_upload"));
        assert!(instructions.contains("base64"));
    }

    #[test]
    fn test_tool_list() {
        let server = test_server();
        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();

        assert_eq!(names.len(), 59);
        for expected in [
            "get_job_status",
            "add_job",
            "get_module_documentation",
            "upload_file",
            "start_multipart_upload",
            "complete_s3_multipart_upload",
            "upload_resumable_chunk",
            "set_system_message",
            "unpin_module",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing tool {expected}");
        }
    }

    #[test]
    fn test_tool_schemas_name_required_fields() {
        let server = test_server();
        let tools = server.tool_router.list_all();
        let upload = tools.iter().find(|t| t.name == "upload_file").unwrap();
        let required = upload.input_schema.get("required").unwrap();
        let required: Vec<&str> = required
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert!(required.contains(&"path"));
        assert!(required.contains(&"file_content"));
        assert!(!required.contains(&"replace"));
    }
}
