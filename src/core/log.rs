use crate::db::log::{LogEntry, load_log};
use crate::errors::AppResult;
use ansi_term::Colour;
use rusqlite::Connection;

const MAX_OP_WIDTH: usize = 40;

/// ANSI colour for each audited operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "stamp" => Colour::Green,
        "export" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// "operation (target)" cut to `max` visible characters.
fn op_target(entry: &LogEntry, max: usize) -> String {
    let raw = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    if raw.chars().count() > max {
        let mut s: String = raw.chars().take(max - 3).collect();
        s.push_str("...");
        s
    } else {
        raw
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Render the internal log table; only the operation word is coloured.
    pub fn render(entries: &[LogEntry]) -> Vec<String> {
        let op_w = entries
            .iter()
            .map(|e| op_target(e, MAX_OP_WIDTH).chars().count())
            .max()
            .unwrap_or(10);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);

        entries
            .iter()
            .map(|e| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| e.date.clone());

                let visible = op_target(e, MAX_OP_WIDTH);
                let padding = " ".repeat(op_w.saturating_sub(visible.chars().count()));
                let color = color_for_operation(&e.operation);

                let colored = match visible.split_once(' ') {
                    Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                    None => color.paint(visible.as_str()).to_string(),
                };

                format!(
                    "{:>id_w$}: {:<25} | {}{} => {}",
                    e.id,
                    date,
                    colored,
                    padding,
                    e.message,
                    id_w = id_w
                )
            })
            .collect()
    }

    pub fn print_log(conn: &Connection) -> AppResult<()> {
        let entries = load_log(conn)?;

        println!("📜 Internal log:\n");
        for line in Self::render(&entries) {
            println!("{}", line);
        }

        Ok(())
    }
}
