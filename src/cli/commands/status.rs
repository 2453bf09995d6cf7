use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::attendance::describe_state;
use crate::db::store::EventStore;
use crate::errors::AppResult;
use crate::ui::messages::actions_list;
use crate::utils::colors::{CYAN, GREY, RESET, color_for_stamp};
use crate::utils::time::to_local_string;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Status) {
        let service = super::open_service(cfg)?;
        let user = cfg.default_user;

        let state = service.attendance_state(user)?;
        let none = format!("{GREY}none{RESET}");

        println!("{}• User:{} {}", CYAN, RESET, user);
        println!("{}• State:{} {}", CYAN, RESET, describe_state(&state));

        let latest_type = match state.last_stamp_type {
            Some(kind) => format!("{}{}{}", color_for_stamp(kind.as_str()), kind, RESET),
            None => none.clone(),
        };
        println!("{}• Latest stamp type:{} {}", CYAN, RESET, latest_type);

        let last_stamp = match service.store().latest_event(user)? {
            Some(ev) => format!(
                "{} at {}",
                ev.stamp_type,
                to_local_string(&ev.stamp_time, &cfg.time_format)
            ),
            None => none,
        };
        println!("{}• Last stamp:{} {}", CYAN, RESET, last_stamp);

        println!(
            "{}• Allowed now:{} {}",
            CYAN,
            RESET,
            actions_list(&state.permitted_actions())
        );
    }

    Ok(())
}
