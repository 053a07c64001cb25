//! Report command implementation: occupancy, revenue, monthly and yearly
//! rollups, and the dashboard snapshot.

use chrono::{Datelike, NaiveDate};
use clap::{Args, Subcommand};

use crate::error::CliError;
use crate::utils::{
    format_amount, load_configuration, open_database, parse_date, parse_window, resolve_format,
    GlobalOptions,
};
use innkeep::output::{self, OutputFormat, Table};
use innkeep::reporting::{
    dashboard, financial_summary, growth_rate, period_occupancy, period_revenue,
    PeriodOccupancy, RevenueReport,
};
use innkeep::{Config, Database, StayRange};

/// Occupancy, revenue and dashboard reports.
#[derive(Args)]
pub struct ReportCommand {
    #[command(subcommand)]
    action: ReportAction,
}

#[derive(Subcommand)]
enum ReportAction {
    /// Occupancy over a window
    Occupancy {
        /// Window start (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// Window end (YYYY-MM-DD, exclusive)
        #[arg(long)]
        to: String,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Revenue over a window
    Revenue {
        /// Window start (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// Window end (YYYY-MM-DD, exclusive)
        #[arg(long)]
        to: String,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Monthly rollup: occupancy, revenue, growth and net profit
    Month {
        /// Month to report (YYYY-MM; defaults to the current month)
        #[arg(long)]
        month: Option<String>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Yearly rollup: revenue, growth and net profit
    Year {
        /// Year to report (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// The front-desk dashboard snapshot
    Dashboard {
        /// Day to snapshot (YYYY-MM-DD; defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn month_start(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

fn month_window(year: i32, month: u32) -> StayRange {
    let start = month_start(year, month);
    let end = if month == 12 {
        month_start(year + 1, 1)
    } else {
        month_start(year, month + 1)
    };
    StayRange::new(start, end).unwrap()
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn year_window(year: i32) -> StayRange {
    StayRange::new(month_start(year, 1), month_start(year + 1, 1)).unwrap()
}

fn parse_month(value: &str) -> Result<(i32, u32), CliError> {
    let date = NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").map_err(|_| {
        CliError::InvalidArguments(format!("invalid month '{value}', expected YYYY-MM"))
    })?;
    Ok((date.year(), date.month()))
}

fn print_occupancy(report: &PeriodOccupancy) {
    println!(
        "Occupancy {}..{}: {}% ({} of {} room-nights)",
        report.start, report.end, report.rate, report.occupied_room_nights,
        report.total_room_nights
    );
    if !report.by_room_type.is_empty() {
        let mut table = Table::new(&["TYPE", "ROOMS", "OCCUPIED", "TOTAL", "RATE"]);
        for row in &report.by_room_type {
            table.row(vec![
                row.label.clone(),
                row.total_rooms.to_string(),
                row.occupied_room_nights.to_string(),
                row.total_room_nights.to_string(),
                format!("{}%", row.rate),
            ]);
        }
        print!("{}", table.render());
    }
}

fn print_revenue(report: &RevenueReport) {
    println!(
        "Revenue {}..{}: {}",
        report.start,
        report.end,
        format_amount(report.total)
    );
    let mut table = Table::new(&["BUCKET", "AMOUNT", "SHARE"]);
    for row in &report.by_kind {
        table.row(vec![
            row.kind.clone(),
            format_amount(row.amount),
            format!("{}%", row.share),
        ]);
    }
    for row in &report.by_method {
        table.row(vec![
            row.method.to_string(),
            format_amount(row.amount),
            format!("{}%", row.share),
        ]);
    }
    print!("{}", table.render());
}

impl ReportCommand {
    /// Execute the report command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        match self.action {
            ReportAction::Occupancy { from, to, json } => {
                let window = parse_window(&from, &to)?;
                let report = period_occupancy(db.connection(), &window)?;
                match resolve_format(json, &config) {
                    OutputFormat::Json => {
                        println!("{}", output::to_json(&report).map_err(CliError::from)?);
                    }
                    OutputFormat::Human => print_occupancy(&report),
                }
                Ok(())
            }

            ReportAction::Revenue { from, to, json } => {
                let window = parse_window(&from, &to)?;
                let report = period_revenue(db.connection(), &window)?;
                match resolve_format(json, &config) {
                    OutputFormat::Json => {
                        println!("{}", output::to_json(&report).map_err(CliError::from)?);
                    }
                    OutputFormat::Human => print_revenue(&report),
                }
                Ok(())
            }

            ReportAction::Month { month, json } => {
                let (year, month) = match month {
                    Some(value) => parse_month(&value)?,
                    None => {
                        let today = chrono::Utc::now().date_naive();
                        (today.year(), today.month())
                    }
                };
                Self::rollup(
                    &db,
                    &config,
                    global,
                    month_window(year, month),
                    {
                        let (py, pm) = previous_month(year, month);
                        month_window(py, pm)
                    },
                    json,
                )
            }

            ReportAction::Year { year, json } => {
                let year = year.unwrap_or_else(|| chrono::Utc::now().year());
                Self::rollup(
                    &db,
                    &config,
                    global,
                    year_window(year),
                    year_window(year - 1),
                    json,
                )
            }

            ReportAction::Dashboard { date, json } => {
                let today = match date {
                    Some(value) => parse_date(&value)?,
                    None => chrono::Utc::now().date_naive(),
                };
                let snapshot = dashboard(db.connection(), today)?;
                match resolve_format(json, &config) {
                    OutputFormat::Json => {
                        println!("{}", output::to_json(&snapshot).map_err(CliError::from)?);
                    }
                    OutputFormat::Human => {
                        if let Some(name) = &config.property_name {
                            println!("{name} - {today}");
                        } else {
                            println!("Dashboard - {today}");
                        }
                        println!(
                            "Revenue: today {} / month {} / year {}",
                            format_amount(snapshot.revenue_today),
                            format_amount(snapshot.revenue_month),
                            format_amount(snapshot.revenue_year)
                        );
                        println!(
                            "Occupancy: today {}% / month {}%",
                            snapshot.occupancy_today, snapshot.occupancy_month
                        );
                        println!(
                            "Due today: {} check-ins, {} check-outs",
                            snapshot.arrivals_due, snapshot.departures_due
                        );
                        println!(
                            "Rooms available now: {} of {}",
                            snapshot.available_rooms, snapshot.total_rooms
                        );
                        if !snapshot.upcoming.is_empty() {
                            println!("Upcoming arrivals:");
                            let mut table = Table::new(&["ID", "ROOM", "CHECK-IN", "NIGHTS"]);
                            for entry in &snapshot.upcoming {
                                table.row(vec![
                                    entry.id().unwrap_or_default().to_string(),
                                    entry.room_id().to_string(),
                                    entry.stay().check_in().to_string(),
                                    entry.stay().nights().to_string(),
                                ]);
                            }
                            print!("{}", table.render());
                        }
                    }
                }
                Ok(())
            }
        }
    }

    /// Shared monthly/yearly rollup: occupancy + revenue + growth over the
    /// preceding window + net profit.
    fn rollup(
        db: &Database,
        config: &Config,
        _global: &GlobalOptions,
        window: StayRange,
        previous: StayRange,
        json: bool,
    ) -> Result<(), CliError> {
        let occupancy = period_occupancy(db.connection(), &window)?;
        let revenue = period_revenue(db.connection(), &window)?;
        let previous_revenue = period_revenue(db.connection(), &previous)?;
        let growth = growth_rate(revenue.total, previous_revenue.total);
        let financials = financial_summary(db.connection(), &window)?;

        match resolve_format(json, config) {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "occupancy": occupancy,
                    "revenue": revenue,
                    "growth_rate": growth,
                    "financials": financials,
                });
                println!("{}", serde_json::to_string_pretty(&value).unwrap());
            }
            OutputFormat::Human => {
                print_occupancy(&occupancy);
                print_revenue(&revenue);
                println!(
                    "Growth over previous period: {growth}% (previous total {})",
                    format_amount(previous_revenue.total)
                );
                println!(
                    "Net profit: {} (expenses {}, margin {}%)",
                    format_amount(financials.net_profit),
                    format_amount(financials.expenses),
                    financials.profit_margin
                );
            }
        }
        Ok(())
    }
}
