use log::info;
use recruit_tracker::bulk::{recalculate_all, recalculate_column};
use recruit_tracker::clock::{Clock, FixedClock, SystemClock};
use recruit_tracker::config::TrackerConfig;
use recruit_tracker::date_parser::parse_date_str;
use recruit_tracker::downloader::to_csv;
use recruit_tracker::gap::GapKind;
use recruit_tracker::loader::from_csv;
use std::env;
use std::fs;

const USAGE: &str = "Usage: recruit-tracker <input.csv> [--out <path>] [--config <path>] \
                     [--today DD/MM/YYYY] [--column candidate|client|remark]";

struct Args {
    input: String,
    out: Option<String>,
    config: Option<String>,
    today: Option<String>,
    column: Option<GapKind>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut input = None;
    let mut out = None;
    let mut config = None;
    let mut today = None;
    let mut column = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{} needs a value", flag))
        };
        match arg.as_str() {
            "--out" => out = Some(value("--out")?),
            "--config" => config = Some(value("--config")?),
            "--today" => today = Some(value("--today")?),
            "--column" => {
                let name = value("--column")?;
                column = Some(
                    GapKind::from_strng(&name).ok_or_else(|| format!("unknown column '{}'", name))?,
                );
            }
            other if other.starts_with("--") => return Err(format!("unknown flag '{}'", other)),
            other if input.is_none() => input = Some(other.to_string()),
            other => return Err(format!("unexpected argument '{}'", other)),
        }
    }

    Ok(Args {
        input: input.ok_or("missing input file")?,
        out,
        config,
        today,
        column,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let argv: Vec<String> = env::args().collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    let config = match &args.config {
        Some(path) => TrackerConfig::load(path)?,
        None => TrackerConfig::default(),
    };

    let clock = match &args.today {
        Some(text) => FixedClock(
            parse_date_str(text).ok_or_else(|| format!("invalid --today date '{}'", text))?,
        ),
        None => FixedClock(SystemClock.today()),
    };

    let mut sheet = from_csv(&args.input)?;
    info!("loaded {} ({} rows x {} columns)", args.input, sheet.rows, sheet.cols);

    let report = match args.column {
        Some(kind) => recalculate_column(&mut sheet, &config, &clock, kind)?,
        None => recalculate_all(&mut sheet, &config, &clock)?,
    };

    let out = args.out.as_deref().unwrap_or(&args.input);
    fs::write(out, to_csv(&sheet))?;

    println!(
        "{} rows scanned, {} skipped, {} cells written to {}",
        report.rows_scanned, report.rows_skipped, report.cells_written, out
    );

    Ok(())
}
