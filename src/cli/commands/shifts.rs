use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::shift::Shift;
use crate::utils::format_duration;
use crate::utils::table::{Column, Table};
use crate::utils::time::to_local_string;
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Shifts { json } = cmd {
        let service = super::open_service(cfg)?;
        let shifts = service.shifts(cfg.default_user, Utc::now())?;

        if *json {
            let out = serde_json::to_string_pretty(&shifts)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
            return Ok(());
        }

        if shifts.is_empty() {
            println!("No shifts for user {}.", cfg.default_user);
            return Ok(());
        }

        println!("{}", render_shifts(&shifts, &cfg.time_format));
    }

    Ok(())
}

fn render_shifts(shifts: &[Shift], time_format: &str) -> String {
    let mut table = Table::new(vec![
        Column::new("#", 3),
        Column::new("Sign-in", 16),
        Column::new("Sign-out", 16),
        Column::new("Breaks", 6),
        Column::new("Break", 8),
        Column::new("Shift", 8),
        Column::new("Net", 8),
    ]);

    for (i, s) in shifts.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            to_local_string(&s.sign_in, time_format),
            s.sign_out
                .map(|t| to_local_string(&t, time_format))
                .unwrap_or_else(|| "(open)".to_string()),
            s.breaks.len().to_string(),
            format_duration(&s.total_break_time),
            format_duration(&s.total_shift_time),
            format_duration(&s.net_work_time),
        ]);
    }

    table.render()
}
