use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ingest::SubmitOutcome;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{actions_list, error, info, success, warning};
use crate::utils::time::{parse_stamp_time, to_local_string};
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stamp {
        stamp_type,
        at,
        source,
    } = cmd
    {
        let now = Utc::now();
        let stamp_time = parse_stamp_time(at, now)?;
        let source = source.as_deref().unwrap_or(&cfg.source);

        let service = super::open_service(cfg)?;
        let user = cfg.default_user;

        match service.submit_event(user, stamp_type, stamp_time, source)? {
            SubmitOutcome::Accepted(ev) => {
                success(format!(
                    "Recorded {} at {} (#{}).",
                    ev.stamp_type,
                    to_local_string(&ev.stamp_time, &cfg.time_format),
                    ev.id
                ));
                info(format!(
                    "Allowed next: {}",
                    actions_list(&service.permitted_actions(user)?)
                ));
            }
            SubmitOutcome::Rejected(rejection) => {
                if rejection.kind.is_user_facing() {
                    warning(&rejection.message);
                    info(format!(
                        "Allowed now: {}",
                        actions_list(&rejection.permitted)
                    ));
                } else {
                    error(&rejection.message);
                }
                return Err(AppError::Rejected(rejection.message));
            }
        }
    }

    Ok(())
}
