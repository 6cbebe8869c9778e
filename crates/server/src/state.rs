use std::path::PathBuf;

use tally_import::ProcessConfig;

/// Shared handler context: the scoped storage directories plus the
/// transform configuration. Stateless across requests beyond the
/// directories themselves.
#[derive(Debug, Clone)]
pub struct AppState {
    pub upload_dir: PathBuf,
    pub processed_dir: PathBuf,
    pub config: ProcessConfig,
}
