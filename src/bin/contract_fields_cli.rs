use std::{env, fs, path::PathBuf, process};

use contract_fields::{
    config::{ConfigManager, FormatterConfig},
    dates::{
        check_minimum_coverage, estimate_months_between, format_input_date, parse_input_date,
        parse_month_count, DateSpan, MonthOverflow,
    },
    fields::{LiveField, MoneyField},
    form::{
        clean_for_submit, DateTriad, DateTriadIds, FieldRegistry, InitPipeline, MemoryDocument,
        PageMode, PolicyReplicator,
    },
    format::{format_percentage, parse_percentage_number},
    init,
};

const CONFIG_ENV: &str = "CONTRACT_FIELDS_CONFIG";

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        usage_and_exit();
    };
    let rest = &args[1..];

    match command.as_str() {
        "money" => {
            let mut field = MoneyField::attach(required(rest, 0)?);
            field.on_blur();
            println!("{}", field.value());
        }
        "percent" => {
            println!(
                "{}",
                format_percentage(parse_percentage_number(required(rest, 0)?))
            );
        }
        "end-date" => {
            let start = parse_input_date(required(rest, 0)?)?;
            let months = parse_month_count(required(rest, 1)?)
                .ok_or("duration must be a whole number of months")?;
            let overflow = if has_flag(rest, "--clamp") {
                MonthOverflow::Clamp
            } else {
                MonthOverflow::Rollover
            };
            let end = DateSpan::new(start, months)
                .end_date_with(overflow)
                .ok_or("end date out of range")?;
            println!("{}", format_input_date(end));
        }
        "months" => {
            let start = parse_input_date(required(rest, 0)?)?;
            let end = parse_input_date(required(rest, 1)?)?;
            println!("{}", estimate_months_between(start, end));
        }
        "coverage" => {
            let start = parse_input_date(required(rest, 0)?)?;
            let end = parse_input_date(required(rest, 1)?)?;
            let months = parse_month_count(required(rest, 2)?)
                .ok_or("required duration must be a whole number of months")?;
            let check = check_minimum_coverage(start, end, months);
            println!("{}", serde_json::to_string_pretty(&check)?);
        }
        "form" => {
            let path = PathBuf::from(required(rest, 0)?);
            let mut config = load_config()?;
            if has_flag(rest, "--edit") {
                config.page_mode = PageMode::Edit;
            }
            if has_flag(rest, "--clamp") {
                config.month_overflow = MonthOverflow::Clamp;
            }
            let mut doc: MemoryDocument = serde_json::from_str(&fs::read_to_string(&path)?)?;
            let mut registry = FieldRegistry::new();
            InitPipeline::new(&config).run(&mut doc, &mut registry);
            if let Some(spec) = flag_value(rest, "--dates") {
                DateTriad::wire(&mut doc, parse_triad_ids(spec)?, config.month_overflow)?;
            }
            if let Some(contract_start) = flag_value(rest, "--policies") {
                PolicyReplicator::wire(&mut doc, contract_start, config.month_overflow)?;
            }
            if has_flag(rest, "--submit") {
                clean_for_submit(&mut doc, &config);
            }
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        "version" => {
            println!(
                "contract_fields {} ({} {}, {} build, {})",
                env!("CARGO_PKG_VERSION"),
                env!("CONTRACT_FIELDS_BUILD_HASH"),
                env!("CONTRACT_FIELDS_BUILD_DATE"),
                env!("CONTRACT_FIELDS_BUILD_PROFILE"),
                env!("CONTRACT_FIELDS_BUILD_TARGET"),
            );
        }
        _ => usage_and_exit(),
    }

    Ok(())
}

fn required(args: &[String], idx: usize) -> Result<&str, String> {
    args.get(idx)
        .map(String::as_str)
        .ok_or_else(|| format!("missing argument #{}", idx + 1))
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|arg| arg == flag)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
}

fn parse_triad_ids(spec: &str) -> Result<DateTriadIds, String> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [start, months, end] if parts.iter().all(|id| !id.is_empty()) => {
            Ok(DateTriadIds::new(*start, *months, *end))
        }
        _ => Err(format!("--dates expects <start>,<months>,<end> ids, got '{spec}'")),
    }
}

fn load_config() -> Result<FormatterConfig, Box<dyn std::error::Error>> {
    let manager = match env::var_os(CONFIG_ENV) {
        Some(path) => ConfigManager::new(PathBuf::from(path)),
        None => ConfigManager::default_location()?,
    };
    Ok(manager.load()?)
}

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: contract_fields_cli <command>\n\
         Commands:\n  \
         money <text>\n  \
         percent <text>\n  \
         end-date <YYYY-MM-DD> <months> [--clamp]\n  \
         months <YYYY-MM-DD> <YYYY-MM-DD>\n  \
         coverage <start> <actual-end> <required-months>\n  \
         form <document.json> [--edit] [--submit] [--clamp]\n       \
              [--dates <start>,<months>,<end>] [--policies <contract-start-id>]\n  \
         version"
    );
    process::exit(1);
}
