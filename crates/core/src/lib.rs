pub mod api;
pub mod config;
pub mod logging;
pub mod popcorn;
pub mod testing;
pub mod torrent;

pub use api::{
    CatalogStats, Episode, GenreStat, Movie, PopcornApi, PopcornClient, PopcornError,
    ServerStatus, Show, ShowSummary,
};
pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, ClientConfig,
    ConfigError,
};
pub use logging::{init_logging, init_logging_from_config, LogLevel};
pub use popcorn::PopcornTime;
pub use torrent::{
    filter_cam_releases, is_cam_release, resolve_language, select_best, BestTorrent,
    QualityTable, SelectionPolicy, TorrentDescriptor, TorrentSelector, TorrentTable,
};
