use std::path::PathBuf;
use std::time::Duration;

use crate::generator::GeneratorOptions;

pub struct AppConfig {
    pub store_path: PathBuf,
    /// Keep entries in memory only; nothing touches disk
    pub ephemeral: bool,
    pub log_file: PathBuf,
    pub clipboard_timeout: Duration,
    pub message_timeout: Duration,
    pub generator: GeneratorOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("passbook");

        Self {
            store_path: data_dir.join("passbook.db"),
            ephemeral: false,
            log_file: data_dir.join("passbook.log"),
            clipboard_timeout: Duration::from_secs(15),
            message_timeout: Duration::from_secs(5),
            generator: GeneratorOptions::default(),
        }
    }
}

impl AppConfig {
    /// Short name of the backing store for the status line
    pub fn store_name(&self) -> String {
        if self.ephemeral {
            return "[memory]".to_string();
        }
        self.store_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.store_path.display().to_string())
    }
}
