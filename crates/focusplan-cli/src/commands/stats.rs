use chrono::{Datelike, Local};
use clap::Subcommand;
use focusplan_core::storage::Database;
use serde_json::json;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Focus minutes recorded today
    Today,
    /// Focus minutes per day for a month
    Month {
        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
        /// Month 1-12 (defaults to the current month)
        #[arg(long)]
        month: Option<u32>,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let today = Local::now().date_naive();

    match action {
        StatsAction::Today => {
            let minutes = db.focus_minutes_on(today)?;
            let out = json!({
                "date": today.to_string(),
                "focus_minutes": minutes,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StatsAction::Month { year, month } => {
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| today.month());
            let days = db.focus_month(year, month)?;
            let total: u32 = days.values().sum();
            let days: serde_json::Map<_, _> = days
                .into_iter()
                .map(|(date, minutes)| (date.to_string(), json!(minutes)))
                .collect();
            let out = json!({
                "year": year,
                "month": month,
                "total_minutes": total,
                "days": days,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
