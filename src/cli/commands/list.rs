use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::elapsed::percentage;
use crate::db::pool::DbPool;
use crate::db::queries::{CycleFilter, load_cycles};
use crate::errors::AppResult;
use crate::export::range::parse_optional_range;
use crate::models::cycle::CycleRecord;
use crate::ui::messages::info;
use crate::utils::formatting::{bold, format_percentage};
use crate::utils::secs2readable;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        period,
        task,
        operator,
    } = cmd
    {
        let mut pool = DbPool::open(&cfg.database)?;

        let filter = CycleFilter {
            dates: parse_optional_range(period.as_deref())?,
            task: task.clone(),
            operator: operator.clone(),
        };

        let records = load_cycles(&mut pool, &filter)?;

        if records.is_empty() {
            info("No cycles found.");
            return Ok(());
        }

        print_cycles(&records, &cfg.separator_char);
    }
    Ok(())
}

fn print_cycles(records: &[CycleRecord], separator: &str) {
    let mut table = Table::new(
        ["Date", "#", "Task", "Operator", "Start", "End", "Work", "Wait", "Total", "Work %"]
            .into_iter()
            .map(Column::new)
            .collect(),
    );

    let mut work = 0.0;
    let mut wait = 0.0;

    for r in records {
        let c = &r.cycle;
        work += c.work_seconds;
        wait += c.wait_seconds;

        table.add_row(vec![
            c.start_time.format("%Y-%m-%d").to_string(),
            c.seq.to_string(),
            c.task_name.clone(),
            c.operator_str().to_string(),
            c.start_time.format("%H:%M:%S").to_string(),
            c.end_time.format("%H:%M:%S").to_string(),
            secs2readable(c.work_seconds, true),
            secs2readable(c.wait_seconds, true),
            secs2readable(c.total_seconds, true),
            format_percentage(percentage(c.work_seconds, c.work_seconds + c.wait_seconds)),
        ]);
    }

    println!("{}", table.render(separator));
    println!(
        "{} {} cycle(s) | work {} ({}) | wait {} ({})",
        bold("Total:"),
        records.len(),
        secs2readable(work, false),
        format_percentage(percentage(work, work + wait)),
        secs2readable(wait, false),
        format_percentage(percentage(wait, work + wait)),
    );
}
