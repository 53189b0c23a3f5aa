use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use attendance_watch::attendance::{
    parse_count, parse_percent, AttendanceRecord, Standing, ATTENDANCE_THRESHOLD,
    DEFAULT_SAMPLE_POINTS,
};
use attendance_watch::models::StudentContact;
use attendance_watch::notify::{
    check_attendance_threshold, evaluate_roster, ConsoleSink, MemorySink, NotificationSink,
};
use attendance_watch::roster;
use attendance_watch::summary;

#[derive(Parser)]
#[command(name = "attendance-watch")]
#[command(about = "Attendance early warning tracker for student guardians", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current attendance percentage and standing
    Status {
        #[arg(long)]
        attended: String,
        #[arg(long)]
        total: String,
    },
    /// Project attendance over upcoming classes
    Project {
        #[arg(long)]
        attended: String,
        #[arg(long)]
        total: String,
        /// Classes still to be held this term
        #[arg(long)]
        future: String,
        #[arg(long, default_value_t = ATTENDANCE_THRESHOLD)]
        target: f64,
        #[arg(long, default_value_t = DEFAULT_SAMPLE_POINTS)]
        points: u32,
    },
    /// Check one reported attendance percentage and alert the guardian
    Alert {
        /// Attendance percentage as reported, e.g. 82.5
        #[arg(long)]
        attendance: String,
        #[arg(long)]
        student_name: String,
        #[arg(long)]
        student_id: Option<Uuid>,
        #[arg(long)]
        guardian_name: String,
        #[arg(long)]
        guardian_email: String,
        #[arg(long)]
        guardian_phone: Option<String>,
        #[arg(long, default_value_t = ATTENDANCE_THRESHOLD)]
        threshold: f64,
    },
    /// Evaluate a roster CSV and notify guardians below the threshold
    Check {
        #[arg(long)]
        roster: PathBuf,
        #[arg(long, default_value_t = ATTENDANCE_THRESHOLD)]
        threshold: f64,
        /// Print raised notifications as JSON instead of delivery lines
        #[arg(long)]
        json: bool,
    },
    /// Write a demo roster CSV
    SampleRoster {
        #[arg(long, default_value = "roster.csv")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let cli = Cli::parse();

    match cli.command {
        Commands::Status { attended, total } => {
            let record = AttendanceRecord::parse(&attended, &total)?;
            let percentage = record.percentage();
            println!(
                "{}/{} classes attended: {:.1}% ({})",
                record.attended(),
                record.total(),
                percentage,
                Standing::for_percentage(percentage).label()
            );
        }
        Commands::Project {
            attended,
            total,
            future,
            target,
            points,
        } => {
            let record = AttendanceRecord::parse(&attended, &total)?;
            let future = parse_count("future", &future)?;
            let needed = record.classes_needed(target)?;

            println!("Current attendance: {:.1}%", record.percentage());
            if needed == 0 {
                println!("Target of {target:.0}% already met.");
            } else {
                println!("Attend the next {needed} classes in a row to reach {target:.0}%.");
                if needed > future {
                    println!("Note: that exceeds the {future} classes still to be held.");
                }
            }

            println!();
            println!("Scenarios over the next {future} classes:");
            for scenario in record.project_scenarios(future, points)? {
                println!(
                    "- attend {:>3} of {future}: {:>5.1}% ({})",
                    scenario.additional_attended,
                    scenario.projected_percentage,
                    Standing::for_percentage(scenario.projected_percentage).label()
                );
            }
        }
        Commands::Alert {
            attendance,
            student_name,
            student_id,
            guardian_name,
            guardian_email,
            guardian_phone,
            threshold,
        } => {
            let percent = parse_percent("attendance", &attendance)?;
            let contact = StudentContact {
                id: student_id.unwrap_or_else(Uuid::new_v4),
                full_name: student_name,
                guardian_name,
                guardian_email,
                guardian_phone,
            };

            match check_attendance_threshold(percent, &contact, threshold)? {
                Some(payload) => {
                    let mut sink = ConsoleSink;
                    sink.deliver(&payload)?;
                    println!(
                        "Alert sent to {} <{}>.",
                        payload.guardian_name, payload.guardian_email
                    );
                }
                None => println!(
                    "{percent:.1}% meets the {threshold:.0}% threshold; no alert raised."
                ),
            }
        }
        Commands::Check {
            roster: roster_path,
            threshold,
            json,
        } => {
            let students = roster::load_roster(&roster_path)?;

            let mut console = ConsoleSink;
            let mut memory = MemorySink::default();
            let sink: &mut dyn NotificationSink = if json { &mut memory } else { &mut console };
            let evaluated = evaluate_roster(&students, threshold, sink)?;

            let raised: Vec<_> = evaluated
                .iter()
                .filter_map(|entry| entry.notification.as_ref())
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&raised)?);
            }

            println!();
            println!("Standing mix across {} students:", evaluated.len());
            for band in summary::summarize_standings(&evaluated) {
                println!(
                    "- {}: {} students (avg {:.1}%)",
                    band.standing.label(),
                    band.count,
                    band.avg_percentage
                );
            }

            println!();
            println!("Lowest attendance first:");
            for entry in summary::lowest_attendance_first(&evaluated).iter().take(10) {
                println!(
                    "- {} ({}) {:.1}% ({})",
                    entry.student.contact.full_name,
                    entry.student.grade,
                    entry.percentage,
                    entry.standing.label()
                );
            }

            println!();
            println!("{} guardian notifications raised.", raised.len());
        }
        Commands::SampleRoster { out } => {
            let written = roster::write_sample_roster(&out)?;
            println!("Wrote {written} students to {}.", out.display());
        }
    }

    Ok(())
}
