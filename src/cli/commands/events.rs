use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::store::FeedQuery;
use crate::errors::AppResult;
use crate::utils::table::{Column, Table};
use crate::utils::time::to_local_string;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Events {
        limit,
        offset,
        sort,
    } = cmd
    {
        let service = super::open_service(cfg)?;
        let query = FeedQuery {
            limit: *limit,
            offset: *offset,
            sort: *sort,
        };
        let events = service.feed(cfg.default_user, &query)?;

        if events.is_empty() {
            println!("No stamps for user {}.", cfg.default_user);
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("Id", 4),
            Column::new("Time", 16),
            Column::new("Type", 14),
            Column::new("Source", 6),
        ]);
        for ev in &events {
            table.add_row(vec![
                ev.id.to_string(),
                to_local_string(&ev.stamp_time, &cfg.time_format),
                ev.stamp_type.to_string(),
                ev.source.clone(),
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
