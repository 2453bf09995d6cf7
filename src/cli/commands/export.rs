use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let service = super::open_service(cfg)?;
        let rows = ExportLogic::export(
            &service,
            cfg.default_user,
            *format,
            file,
            *force,
            &cfg.time_format,
            Utc::now(),
        )?;
        success(format!(
            "{} export completed: {} shift(s) written to {}",
            format.as_str(),
            rows,
            file
        ));
    }
    Ok(())
}
