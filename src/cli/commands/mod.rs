pub mod config;
pub mod events;
pub mod export;
pub mod init;
pub mod log;
pub mod shifts;
pub mod stamp;
pub mod status;
pub mod summary;

use crate::config::Config;
use crate::core::calculator::summary::OpenShiftPolicy;
use crate::core::ingest::IngestService;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;

/// Open the configured database behind an ingest service.
pub(crate) fn open_service(cfg: &Config) -> AppResult<IngestService<SqliteStore>> {
    let store = SqliteStore::open(&cfg.database)?;
    Ok(IngestService::with_policy(
        store,
        OpenShiftPolicy::from_flag(cfg.include_open_shift),
    ))
}
