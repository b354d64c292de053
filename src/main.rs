use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use std::path::Path;
use tingshuo::cli::{Cli, Commands, ConfigAction, ReportsAction};
use tingshuo::{
    Assessor, Config, FileReportStore, ReportStore, SessionInput, SessionReport, SessionSeed,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);
    log::debug!("tingshuo {}", tingshuo::version_string());

    match cli.command {
        Commands::Assess {
            input,
            seed,
            save,
            output,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let seed = seed.map_or(SessionSeed::Entropy, SessionSeed::Fixed);
            handle_assess(&config, &input, seed, save, output.as_deref(), cli.quiet)?;
        }
        Commands::Reports { action } => {
            let config = load_config(cli.config.as_deref())?;
            handle_reports_command(action, &FileReportStore::new(config.store_dir()))?;
        }
        Commands::Config { action } => {
            handle_config_command(action, cli.config.as_deref())?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "tingshuo",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// `-q` silences logging, `-v` enables info and `-vv` debug. RUST_LOG wins.
fn init_logging(quiet: bool, verbose: u8) {
    let level = match (quiet, verbose) {
        (true, _) => "off",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        // Load from custom path
        Config::load(path).with_context(|| format!("Failed to load config {}", path.display()))?
    } else {
        // Try default path, fall back to defaults
        let default_path = Config::default_path();
        Config::load_or_default(&default_path)
            .with_context(|| format!("Failed to load config {}", default_path.display()))?
    };

    // Apply environment variable overrides
    Ok(config.with_env_overrides())
}

fn handle_assess(
    config: &Config,
    input: &Path,
    seed: SessionSeed,
    save: bool,
    output: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let assessor = Assessor::from_config(config)?;
    let session = SessionInput::load(input)
        .with_context(|| format!("Failed to read session {}", input.display()))?;

    let report = assessor.assess_session(&session.session_id, &session.questions, seed)?;
    let json = report.to_json_pretty()?;

    match output {
        Some(path) => std::fs::write(path, format!("{json}\n"))
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{json}"),
    }

    if save {
        let store = FileReportStore::new(config.store_dir());
        store.save(report.session_id(), &report)?;
        if !quiet {
            eprintln!("Saved to {}", store.dir().display());
        }
    }

    if !quiet {
        print_summary(&report, config.scoring.pass_threshold);
    }
    Ok(())
}

fn print_summary(report: &SessionReport, pass_threshold: f64) {
    let total = report.questions().len();
    let score = format!("{:.1}", report.overall_score());
    let score = if report.overall_score() >= pass_threshold {
        score.green().to_string()
    } else {
        score.red().to_string()
    };
    eprintln!(
        "{} {}: overall {}, {}/{} passed",
        "Session".bold(),
        report.session_id(),
        score,
        report.passed_count(),
        total
    );

    let fallbacks = report
        .questions()
        .iter()
        .filter(|q| q.has_fallback())
        .count();
    if fallbacks > 0 {
        eprintln!(
            "{}",
            format!("{fallbacks} question(s) contain tokens without a known reading").yellow()
        );
    }
}

fn handle_reports_command(action: ReportsAction, store: &dyn ReportStore) -> Result<()> {
    match action {
        ReportsAction::List => {
            for id in store.list()? {
                println!("{id}");
            }
        }
        ReportsAction::Show { id } => {
            println!("{}", store.load(&id)?.to_json_pretty()?);
        }
        ReportsAction::Delete { id } => {
            store.delete(&id)?;
            eprintln!("{}", format!("Deleted report {id}").green());
        }
    }
    Ok(())
}

fn handle_config_command(action: ConfigAction, custom_path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(custom_path)?;
            config.validate()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Path => {
            let path = custom_path
                .map(Path::to_path_buf)
                .unwrap_or_else(Config::default_path);
            println!("{}", path.display());
        }
    }
    Ok(())
}
