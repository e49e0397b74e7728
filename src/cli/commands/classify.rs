use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::analysis::AnalysisLogic;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::formatting::format_percentage;
use crate::utils::path::expand_tilde;
use crate::utils::secs2readable;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Classify {
        input,
        fps,
        window,
        frames,
    } = cmd
    {
        let path = expand_tilde(input);
        let fps = fps.unwrap_or(cfg.frame_rate);
        let window = window.unwrap_or(cfg.classifier_window);

        let recorded = AnalysisLogic::load_frames(&path)?;
        if recorded.is_empty() {
            info(format!("No frames in {}", path.display()));
            return Ok(());
        }

        let summary = AnalysisLogic::analyze(&recorded, fps, window)?;

        if *frames {
            for (i, label) in summary.labels.iter().enumerate() {
                println!("{:>6} {:>9.3}s {}", i, i as f64 / fps, label);
            }
            println!();
        }

        header("Process Analysis Report");
        println!(
            "Frames: {} | Duration: {} | Window: {}\n",
            summary.frames,
            secs2readable(summary.duration_seconds, false),
            summary.window
        );

        let mut table = Table::new(vec![Column::new("Activity"), Column::new("Seconds")]);
        for (label, secs) in &summary.breakdown {
            table.add_row(vec![label.to_string(), format!("{:.2}", secs)]);
        }
        println!("{}", table.render(&cfg.separator_char));

        let r = &summary.report;
        println!(
            "Value-Added Time: {:.2}s ({})",
            r.value_added_seconds,
            format_percentage(r.value_added_percentage)
        );
        println!(
            "Non-Value-Added Time: {:.2}s ({})",
            r.non_value_added_seconds,
            format_percentage(r.non_value_added_percentage)
        );
    }
    Ok(())
}
