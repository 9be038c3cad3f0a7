pub mod config;
pub mod download;
pub mod error;
pub mod fingerprint;
pub mod model;
pub mod report;
pub mod validate;

pub use config::RunConfig;
pub use download::Downloader;
pub use error::DownloadError;
pub use fingerprint::fingerprint;
pub use model::{DiscoveredImage, DownloadRecord, DownloadSummary};
pub use validate::validate_board_url;
