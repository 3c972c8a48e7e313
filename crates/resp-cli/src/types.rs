use std::path::PathBuf;

use resp_model::RenderPayload;

#[derive(Debug)]
pub struct ChartResult {
    pub region: String,
    /// `None` when the payload went to stdout.
    pub output: Option<PathBuf>,
    pub exports: Vec<PathBuf>,
    pub payload: RenderPayload,
}
