use clap::{Arg, Command};
use log::LevelFilter;
use phishguard::{AnalysisResult, EmailAnalyzer, EngineConfig, UrlAnalyzer};
use std::process;

fn main() {
    let matches = Command::new("phishguard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Heuristic phishing risk analyzer for URLs and email content")
        .arg(
            Arg::new("url")
                .long("url")
                .value_name("URL")
                .help("Analyze a URL for phishing indicators"),
        )
        .arg(
            Arg::new("email-file")
                .long("email-file")
                .value_name("FILE")
                .help("Analyze email body text read from a file"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Load rule corpus, thresholds, and recommendations from a YAML file"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Write the built-in configuration to a YAML file and exit")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .default_value("text")
                .help("Output format (text, json)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(path) = matches.get_one::<String>("generate-config") {
        let config = EngineConfig::default();
        if let Err(e) = config.to_file(path) {
            eprintln!("Failed to write configuration to {path}: {e}");
            process::exit(1);
        }
        println!("Configuration written to {path}");
        return;
    }

    let config = match matches.get_one::<String>("config") {
        Some(path) => match EngineConfig::from_file(path) {
            Ok(config) => {
                log::info!("Loaded configuration from {path}");
                config
            }
            Err(e) => {
                eprintln!("Failed to load configuration from {path}: {e}");
                process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    let result = if let Some(url) = matches.get_one::<String>("url") {
        UrlAnalyzer::with_config(config.url).analyze(url)
    } else if let Some(path) = matches.get_one::<String>("email-file") {
        let body = match std::fs::read_to_string(path) {
            Ok(body) => body,
            Err(e) => {
                eprintln!("Failed to read {path}: {e}");
                process::exit(1);
            }
        };
        EmailAnalyzer::with_config(config.email).analyze(&body)
    } else {
        eprintln!("Nothing to analyze: pass --url or --email-file (see --help)");
        process::exit(1);
    };

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let format = matches.get_one::<String>("format").unwrap();
    if format == "json" {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize result: {e}");
                process::exit(1);
            }
        }
    } else {
        print_text(&report);
    }
}

fn print_text(report: &AnalysisResult) {
    println!("Subject: {}", report.subject);
    println!(
        "Risk Level: {}",
        report.risk_level.to_string().to_uppercase()
    );
    println!("Risk Score: {}/100", report.risk_score);
    println!();
    println!("Indicators:");
    for group in &report.indicators {
        println!("  {}:", group.category);
        for item in &group.items {
            println!("    - {item}");
        }
    }
    println!();
    println!("Recommendations:");
    for recommendation in &report.recommendations {
        println!("  - {recommendation}");
    }
}
