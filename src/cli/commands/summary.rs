use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::shift::{DailyTotals, RollingSummary};
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREEN, RESET};
use crate::utils::format_duration;
use crate::utils::table::{Column, Table};
use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
struct SummaryReport<'a> {
    summary: &'a RollingSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    daily: Option<&'a [DailyTotals]>,
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { days, daily, json } = cmd {
        let service = super::open_service(cfg)?;
        let user = cfg.default_user;
        let window = days.unwrap_or(cfg.summary_window_days);
        let now = Utc::now();

        let summary = service.summary(user, window, now)?;
        let breakdown = if *daily {
            Some(service.daily_breakdown(user, window, now)?)
        } else {
            None
        };

        if *json {
            let report = SummaryReport {
                summary: &summary,
                daily: breakdown.as_deref(),
            };
            let out = serde_json::to_string_pretty(&report)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
            return Ok(());
        }

        header(format!("Last {} day(s), user {}", window, user));
        let t = &summary.totals;
        println!("{}Shifts:{}      {}", CYAN, RESET, t.shift_count);
        println!("{}Shift time:{}  {}", CYAN, RESET, format_duration(&t.total_shift_time));
        println!("{}Break time:{}  {}", CYAN, RESET, format_duration(&t.total_break_time));
        println!(
            "{}Net work:{}    {}{}{}",
            CYAN,
            RESET,
            GREEN,
            format_duration(&t.net_work_time),
            RESET
        );

        if let Some(days) = breakdown {
            println!();
            let mut table = Table::new(vec![
                Column::new("Date", 10),
                Column::new("Shifts", 6),
                Column::new("Break", 8),
                Column::new("Shift", 8),
                Column::new("Net", 8),
            ]);
            for d in &days {
                table.add_row(vec![
                    d.date.to_string(),
                    d.totals.shift_count.to_string(),
                    format_duration(&d.totals.total_break_time),
                    format_duration(&d.totals.total_shift_time),
                    format_duration(&d.totals.net_work_time),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
