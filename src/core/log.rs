use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::formatting::{pad_right_visible, truncate_visible};
use ansi_term::Colour;

/// ANSI colour for a logged operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "session_start" => Colour::Green,
        "session_end" => Colour::Red,
        "start" => Colour::Cyan,
        "wait" => Colour::Yellow,
        "resume" => Colour::Blue,
        "complete" => Colour::Purple,
        "migration_applied" => Colour::Purple,
        "export" => Colour::Blue,
        "vacuum" => Colour::Cyan,
        "init" => Colour::RGB(255, 153, 51), // orange
        _ => Colour::White,
    }
}

const MAX_OP_WIDTH: usize = 60;

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            info("The internal log is empty.");
            return Ok(());
        }

        let rows: Vec<_> = entries
            .iter()
            .map(|e| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| e.date.clone());

                let op_target = if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                };

                (e, date, truncate_visible(&op_target, MAX_OP_WIDTH))
            })
            .collect();

        let id_w = rows.iter().map(|(e, _, _)| e.id.to_string().len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|(_, d, _)| d.len()).max().unwrap_or(10);
        let op_w = rows
            .iter()
            .map(|(_, _, op)| unicode_width::UnicodeWidthStr::width(op.as_str()))
            .max()
            .unwrap_or(10);

        println!("📜 Internal log:\n");

        for (entry, date, op_target) in rows {
            let color = color_for_operation(&entry.operation);

            // only the operation word is coloured; padding is computed on the plain text
            let padded = pad_right_visible(&op_target, op_w);
            let colored = match padded.split_once(' ') {
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(padded.as_str()).to_string(),
            };

            println!(
                "{:>id_w$}: {:<date_w$} | {} => {}",
                entry.id,
                date,
                colored,
                entry.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
