//! Parameter structs for all MCP tools.
//!
//! Field names are snake_case on the MCP side; the client maps them onto the
//! camelCase query names the GenePattern REST API expects.

use genepattern_client::{
    CompletedPart, JobDetailOptions, JobSearchQuery, ResumableChunk, SystemMessage,
    TaskDetailOptions,
};
use schemars::JsonSchema;
use serde::Deserialize;

/// How a string-valued file content parameter should be turned into bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentEncoding {
    /// Send the string's UTF-8 bytes.
    #[default]
    Utf8,
    /// Decode the string as standard base64 first.
    Base64,
}

// ── jobs ──

/// Parameters for the `get_job_search_results` tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct JobSearchParams {
    #[schemars(description = "Only jobs owned by this user")]
    pub user_id: Option<String>,
    #[schemars(description = "Only jobs shared with this group")]
    pub group_id: Option<String>,
    #[schemars(description = "Only jobs in this batch")]
    pub batch_id: Option<String>,
    #[schemars(description = "Only jobs carrying this tag")]
    pub tag: Option<String>,
    #[schemars(description = "Only jobs whose comment matches")]
    pub comment: Option<String>,
    #[schemars(description = "Only jobs of this module (name or LSID)")]
    pub module: Option<String>,
    #[schemars(description = "Page number, starting at 1 (default 1)")]
    pub page: Option<u32>,
    #[schemars(description = "Jobs per page (server default when omitted)")]
    pub page_size: Option<u32>,
    #[schemars(description = "Sort key for jobs")]
    pub order_by: Option<String>,
    #[schemars(description = "Sort key for each job's output files")]
    pub order_files_by: Option<String>,
    #[schemars(description = "Include child jobs of pipelines (default true)")]
    pub include_children: Option<bool>,
    #[schemars(description = "Include input parameter values (default false)")]
    pub include_input_params: Option<bool>,
    #[schemars(description = "Include output files (default true)")]
    pub include_output_files: Option<bool>,
    #[schemars(description = "Include permission details (default true)")]
    pub include_permissions: Option<bool>,
    #[schemars(description = "Pretty-print the server response (default true)")]
    pub pretty_print: Option<bool>,
}

impl From<JobSearchParams> for JobSearchQuery {
    fn from(p: JobSearchParams) -> Self {
        let defaults = JobSearchQuery::default();
        Self {
            user_id: p.user_id,
            group_id: p.group_id,
            batch_id: p.batch_id,
            tag: p.tag,
            comment: p.comment,
            module: p.module,
            page: p.page.unwrap_or(defaults.page),
            page_size: p.page_size,
            order_by: p.order_by,
            order_files_by: p.order_files_by,
            include_children: p.include_children.unwrap_or(defaults.include_children),
            include_input_params: p
                .include_input_params
                .unwrap_or(defaults.include_input_params),
            include_output_files: p
                .include_output_files
                .unwrap_or(defaults.include_output_files),
            include_permissions: p.include_permissions.unwrap_or(defaults.include_permissions),
            pretty_print: p.pretty_print.unwrap_or(defaults.pretty_print),
        }
    }
}

/// Parameters for the `add_job` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddJobParams {
    /// Job configuration, forwarded unchanged as the request body.
    #[schemars(
        description = "Job configuration object, e.g. {\"lsid\": \"urn:lsid:...\", \"params\": [{\"name\": \"input.file\", \"values\": [\"...\"]}]}"
    )]
    pub job_config: serde_json::Value,
}

/// Parameters for the `get_job` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetJobParams {
    #[schemars(description = "Job id")]
    pub job_id: String,
    #[schemars(description = "Include permission details (default false)")]
    pub include_permissions: Option<bool>,
    #[schemars(description = "Include child jobs (default true)")]
    pub include_children: Option<bool>,
    #[schemars(description = "Include input parameter values (default false)")]
    pub include_input_params: Option<bool>,
    #[schemars(description = "Include output files (default true)")]
    pub include_output_files: Option<bool>,
    #[schemars(description = "Pretty-print the server response (default true)")]
    pub pretty_print: Option<bool>,
}

impl GetJobParams {
    pub fn options(&self) -> JobDetailOptions {
        let d = JobDetailOptions::default();
        JobDetailOptions {
            include_permissions: self.include_permissions.unwrap_or(d.include_permissions),
            include_children: self.include_children.unwrap_or(d.include_children),
            include_input_params: self.include_input_params.unwrap_or(d.include_input_params),
            include_output_files: self.include_output_files.unwrap_or(d.include_output_files),
            pretty_print: self.pretty_print.unwrap_or(d.pretty_print),
        }
    }
}

/// Parameters for tools addressing a single job.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct JobIdParams {
    #[schemars(description = "Job id")]
    pub job_id: String,
}

/// Parameters for the `add_tag_to_job` and `remove_tag_from_job` tools.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct JobTagParams {
    #[schemars(description = "Job number")]
    pub job_no: i64,
    #[schemars(description = "Tag text")]
    pub tag_text: String,
}

/// Parameters for the `get_job_code` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct JobCodeParams {
    #[schemars(description = "Job id")]
    pub job_id: String,
    #[schemars(description = "Target language, e.g. 'Python', 'R', 'Java'")]
    pub language: Option<String>,
}

// ── tasks ──

/// Parameters for the `get_all_tasks` tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct AllTasksParams {
    #[schemars(description = "Also list hidden tasks")]
    pub include_hidden: Option<bool>,
}

/// Parameters for the `get_task` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetTaskParams {
    #[schemars(description = "Task name or LSID")]
    pub task_name_or_lsid: String,
    #[schemars(description = "Include task properties (default true)")]
    pub include_properties: Option<bool>,
    #[schemars(description = "Include pipeline children (default true)")]
    pub include_children: Option<bool>,
    #[schemars(description = "Include EULA information (default true)")]
    pub include_eula: Option<bool>,
    #[schemars(description = "Include support files (default true)")]
    pub include_support_files: Option<bool>,
    #[schemars(description = "Include parameter groups (default true)")]
    pub include_param_groups: Option<bool>,
    #[schemars(description = "Include memory settings (default true)")]
    pub include_memory_settings: Option<bool>,
}

impl GetTaskParams {
    pub fn options(&self) -> TaskDetailOptions {
        let d = TaskDetailOptions::default();
        TaskDetailOptions {
            include_properties: self.include_properties.unwrap_or(d.include_properties),
            include_children: self.include_children.unwrap_or(d.include_children),
            include_eula: self.include_eula.unwrap_or(d.include_eula),
            include_support_files: self.include_support_files.unwrap_or(d.include_support_files),
            include_param_groups: self.include_param_groups.unwrap_or(d.include_param_groups),
            include_memory_settings: self
                .include_memory_settings
                .unwrap_or(d.include_memory_settings),
        }
    }
}

/// Parameters for tools addressing a single task.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct TaskIdParams {
    #[schemars(description = "Task name or LSID")]
    pub task_name_or_lsid: String,
}

/// Parameters for the `filter_modules` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct FilterModulesParams {
    #[schemars(
        description = "Case-sensitive keyword matched against module name, description and LSID, or equal to one of its tags"
    )]
    pub keyword: String,
}

/// Parameters for the `get_module_documentation` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ModuleDocumentationParams {
    #[schemars(
        description = "Module name or LSID. An LSID without its trailing version matches any version"
    )]
    pub module: String,
}

// ── files ──

/// Parameters for the `rename_file` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RenameFileParams {
    #[schemars(description = "Full path of the file or directory, e.g. '/users/alice/data.txt'")]
    pub path: String,
    #[schemars(description = "New name (no directory part)")]
    pub name: String,
}

/// Parameters for tools addressing a single path.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct PathParams {
    #[schemars(description = "File or directory path")]
    pub path: String,
}

/// Parameters for the `copy_file` and `move_file` tools.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct TransferParams {
    #[schemars(description = "Source path, e.g. '/jobResults/123/output.txt'")]
    pub source: String,
    #[schemars(description = "Destination path in the user's upload space")]
    pub destination: String,
}

/// Parameters for the `upload_file` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UploadFileParams {
    #[schemars(description = "Destination path relative to the user's upload root")]
    pub path: String,
    #[schemars(description = "File content, interpreted per content_encoding")]
    pub file_content: String,
    #[schemars(description = "'utf8' (default) or 'base64'")]
    pub content_encoding: Option<ContentEncoding>,
    #[schemars(description = "Overwrite an existing file (default false)")]
    pub replace: Option<bool>,
}

/// Parameters for the `upload_job_input_from_body` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UploadJobInputParams {
    #[schemars(description = "Name of the uploaded file")]
    pub name: String,
    #[schemars(description = "File content, interpreted per content_encoding")]
    pub file_content: String,
    #[schemars(description = "'utf8' (default) or 'base64'")]
    pub content_encoding: Option<ContentEncoding>,
}

/// Parameters for the `upload_job_input_from_form` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UploadJobInputFormParams {
    #[schemars(description = "File name sent with the form part")]
    pub file_name: String,
    #[schemars(description = "File content, interpreted per content_encoding")]
    pub file_content: String,
    #[schemars(description = "'utf8' (default) or 'base64'")]
    pub content_encoding: Option<ContentEncoding>,
}

/// Parameters for the `upload_job_output` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UploadJobOutputParams {
    #[schemars(description = "Name for the output file")]
    pub name: String,
    #[schemars(description = "Id of the job the file belongs to")]
    pub jobid: String,
    #[schemars(description = "File content, interpreted per content_encoding")]
    pub file_content: String,
    #[schemars(description = "'utf8' (default) or 'base64'")]
    pub content_encoding: Option<ContentEncoding>,
}

/// Parameters for the `create_pipeline` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreatePipelineParams {
    #[schemars(description = "Job result file to build the pipeline from, e.g. '/jobResults/123/output.gct'")]
    pub path: String,
    #[schemars(description = "Pipeline name; the server generates one when omitted")]
    pub name: Option<String>,
}

/// Parameters for the `upload_file_from_path` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UploadFromPathParams {
    #[schemars(description = "Path of a file on the machine running this server")]
    pub local_path: String,
    #[schemars(description = "Destination path relative to the user's upload root")]
    pub remote_path: String,
    #[schemars(description = "Overwrite an existing file (default false)")]
    pub replace: Option<bool>,
}

/// Parameters for the `upload_file_for_job_input` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UploadJobInputFromPathParams {
    #[schemars(description = "Path of a file on the machine running this server")]
    pub local_file_path: String,
    #[schemars(description = "File name sent with the form part")]
    pub file_name: String,
}

// ── uploads ──

/// Parameters for the `start_multipart_upload` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct StartMultipartParams {
    #[schemars(description = "Destination path of the assembled file")]
    pub path: String,
    #[schemars(description = "Total file size in bytes")]
    pub file_size: u64,
    #[schemars(description = "Number of parts the file will be sent in")]
    pub parts: u32,
}

/// Parameters for the `upload_multipart_chunk` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct MultipartChunkParams {
    #[schemars(description = "Upload token returned by start_multipart_upload")]
    pub token: String,
    #[schemars(description = "Zero-based part index")]
    pub index: u32,
    #[schemars(description = "Chunk content, interpreted per content_encoding")]
    pub chunk_content: String,
    #[schemars(description = "'utf8' (default) or 'base64'; use base64 for binary data")]
    pub content_encoding: Option<ContentEncoding>,
}

/// Parameters for tools addressing a server-side multipart session.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UploadTokenParams {
    #[schemars(description = "Upload token returned by start_multipart_upload")]
    pub token: String,
}

/// Parameters for the `start_s3_multipart_upload` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct StartS3UploadParams {
    #[schemars(description = "Destination path of the uploaded file")]
    pub path: String,
    #[schemars(description = "MIME type of the file")]
    pub content_type: Option<String>,
}

/// Parameters for the `get_s3_part_presigned_url` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct S3PartParams {
    #[schemars(description = "Upload id returned by start_s3_multipart_upload")]
    pub upload_id: String,
    #[schemars(description = "Destination path of the uploaded file")]
    pub path: String,
    #[schemars(description = "One-based part number")]
    pub part_number: u32,
}

/// A finished S3 part.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct S3CompletedPartParam {
    #[schemars(description = "One-based part number")]
    pub part_number: u32,
    #[schemars(description = "ETag S3 returned for the part")]
    pub etag: String,
}

impl From<S3CompletedPartParam> for CompletedPart {
    fn from(p: S3CompletedPartParam) -> Self {
        Self {
            part_number: p.part_number,
            etag: p.etag,
        }
    }
}

/// Parameters for the `complete_s3_multipart_upload` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CompleteS3UploadParams {
    #[schemars(description = "Upload id returned by start_s3_multipart_upload")]
    pub upload_id: String,
    #[schemars(description = "Destination path of the uploaded file")]
    pub path: String,
    #[schemars(description = "Every uploaded part with its ETag")]
    pub parts: Vec<S3CompletedPartParam>,
}

/// Chunk metadata for the resumable upload tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ResumableChunkParams {
    #[schemars(description = "One-based chunk number")]
    pub chunk_number: u64,
    #[schemars(description = "Nominal chunk size in bytes")]
    pub chunk_size: u64,
    #[schemars(description = "Size of this chunk in bytes")]
    pub current_chunk_size: u64,
    #[schemars(description = "Total file size in bytes")]
    pub total_size: u64,
    #[schemars(description = "Caller-chosen identifier shared by every chunk of the file")]
    pub identifier: String,
    #[schemars(description = "File name")]
    pub filename: String,
    #[schemars(description = "Relative path of the file (defaults to filename)")]
    pub relative_path: Option<String>,
    #[schemars(description = "Total number of chunks")]
    pub total_chunks: u64,
}

impl From<ResumableChunkParams> for ResumableChunk {
    fn from(p: ResumableChunkParams) -> Self {
        let relative_path = p.relative_path.unwrap_or_else(|| p.filename.clone());
        Self {
            chunk_number: p.chunk_number,
            chunk_size: p.chunk_size,
            current_chunk_size: p.current_chunk_size,
            total_size: p.total_size,
            identifier: p.identifier,
            filename: p.filename,
            relative_path,
            total_chunks: p.total_chunks,
        }
    }
}

/// Parameters for the `upload_resumable_chunk` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ResumableUploadParams {
    #[serde(flatten)]
    pub chunk: ResumableChunkParams,
    #[schemars(description = "Chunk content, interpreted per content_encoding")]
    pub chunk_content: String,
    #[schemars(description = "'utf8' (default) or 'base64'; use base64 for binary data")]
    pub content_encoding: Option<ContentEncoding>,
}

// ── server configuration, usage, disk, tags ──

/// Parameters for the `set_system_message` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SetSystemMessageParams {
    #[schemars(description = "Message content; HTML allowed")]
    pub message: String,
    #[schemars(description = "When the message starts showing, ISO 8601 (e.g. '2025-07-18T09:00:00Z')")]
    pub start_time: Option<String>,
    #[schemars(description = "When the message stops showing, ISO 8601")]
    pub end_time: Option<String>,
    #[schemars(description = "Clear the message when the server restarts")]
    pub delete_on_restart: Option<bool>,
}

impl From<SetSystemMessageParams> for SystemMessage {
    fn from(p: SetSystemMessageParams) -> Self {
        Self {
            message: p.message,
            start: p.start_time,
            end: p.end_time,
            delete_on_restart: p.delete_on_restart,
        }
    }
}

/// Parameters for the `get_server_property` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ServerPropertyParams {
    #[schemars(description = "Property name, e.g. 'database.vendor'")]
    pub property_name: String,
}

/// Parameters for the `get_user_summary_stats` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DateRangeParams {
    #[schemars(description = "Start date, YYYY-MM-DD")]
    pub start_date: String,
    #[schemars(description = "End date, YYYY-MM-DD")]
    pub end_date: String,
}

/// Parameters for the `log_client_message` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogMessageParams {
    #[schemars(description = "Logger name")]
    pub logname: String,
    #[schemars(description = "Log level, e.g. 'info', 'warn', 'error'")]
    pub loglevel: String,
    #[schemars(description = "Message text")]
    pub message: String,
}

/// Parameters for the `notify_max_jobs_exceeded` tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct NotifyMaxJobsParams {
    #[schemars(description = "Task that was being run when the limit was hit")]
    pub task_name: Option<String>,
}

/// Parameters for the `pin_module` and `repin_module` tools.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct PinModuleParams {
    #[schemars(description = "User id")]
    pub user: String,
    #[schemars(description = "Module LSID")]
    pub lsid: String,
    #[schemars(description = "Position in the Favorites list")]
    pub position: f64,
}

/// Parameters for the `unpin_module` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UnpinModuleParams {
    #[schemars(description = "User id")]
    pub user: String,
    #[schemars(description = "Module LSID")]
    pub lsid: String,
}
