//! Resume analyzer: upload a resume, get a (mock) analysis and a job match

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_analyzer::analysis::MockAnalysisEngine;
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction};
use resume_analyzer::config::Config;
use resume_analyzer::error::{Result, ResumeAnalyzerError};
use resume_analyzer::input::{validate, InputManager};
use resume_analyzer::output::formatter::{save_report_to_file, suggest_filename};
use resume_analyzer::output::{AnalysisReport, AnalysisView, ReportGenerator};
use resume_analyzer::store::{AnalysisStore, JobMatchOutcome};
use resume_analyzer::workflow::{JobMatchWorkflow, UploadWorkflow};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        if e.is_recoverable() {
            eprintln!("💡 Pick a different file or try again.");
        }
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            output,
            save,
            detailed,
        } => {
            let format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeAnalyzerError::InvalidInput)?,
                None => config.output.format,
            };
            run_analyze(&config, resume, job, job_text, format, save, detailed || config.output.detailed).await?;
        }

        Commands::Validate { resume } => {
            let file = InputManager::new().resume_file(&resume).await?;
            println!("📄 {} ({} bytes, {})", file.name, file.size_bytes, file.mime_type);
            match validate(&file) {
                Ok(()) => println!("✅ File accepted"),
                Err(e) => {
                    println!("❌ {}", e);
                    return Err(e);
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Config file: {}", config_path.display());
                println!("\nAnalysis:");
                println!("  Resume delay: {}ms", config.analysis.resume_delay_ms);
                println!("  Keyword delay: {}ms", config.analysis.keyword_delay_ms);
                println!("\nOutput:");
                println!("  Format: {:?}", config.output.format);
                println!("  Detailed: {}", config.output.detailed);
                println!("  Colors: {}", config.output.color_output);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Set { key, value }) => {
                let mut config = config;
                config.set_value(&key, &value)?;
                config.save_to(config_path)?;
                println!("✅ Set {} = {}", key, value);
            }
        },
    }

    Ok(())
}

async fn run_analyze(
    config: &Config,
    resume: PathBuf,
    job: Option<PathBuf>,
    job_text: Option<String>,
    format: resume_analyzer::config::OutputFormat,
    save: Option<PathBuf>,
    detailed: bool,
) -> Result<()> {
    let started = Instant::now();
    let mut input_manager = InputManager::new();

    let job_description = match (job, job_text) {
        (Some(path), _) => Some(input_manager.job_description(&path).await?),
        (None, text) => text,
    };
    if let Some(text) = &job_description {
        JobMatchWorkflow::check_description(text)?;
    }

    let engine = Arc::new(MockAnalysisEngine::new(&config.analysis)?);
    let store = AnalysisStore::new(engine);
    let upload = UploadWorkflow::new(store.clone());
    let job_match = JobMatchWorkflow::new(store.clone());

    let file = input_manager.resume_file(&resume).await?;
    info!("Resume: {} ({} bytes, {})", file.name, file.size_bytes, file.mime_type);

    let upload_spinner = new_spinner("Analyzing your resume...");
    let result = upload.submit(file.clone()).await;
    upload_spinner.finish_and_clear();

    if let Err(e) = result {
        let state = upload.upload_state();
        println!(
            "❌ Upload failed: {}",
            state.error_message.unwrap_or_else(|| e.to_string())
        );
        return Err(e);
    }
    println!("✅ Resume uploaded successfully: {}", file.name);

    if let Some(text) = job_description {
        let match_spinner = new_spinner("Matching against the job description...");
        let outcome = job_match.submit(&text).await;
        match_spinner.finish_and_clear();

        match outcome? {
            JobMatchOutcome::Applied(keyword_match) => {
                println!("💼 Job description keyword match: {}%", keyword_match.percentage)
            }
            JobMatchOutcome::NoActiveAnalysis => {
                println!("⚠️  {}", ResumeAnalyzerError::NoActiveAnalysis)
            }
            JobMatchOutcome::Superseded => {
                println!("⚠️  Job description match was superseded by a newer analysis")
            }
        }
    }

    let snapshot = store.snapshot();
    let elapsed = started.elapsed().as_millis() as u64;
    let report = AnalysisReport::from_snapshot(&snapshot, file.name.clone(), elapsed);
    let view = AnalysisView::from_snapshot(&snapshot);

    let generator = ReportGenerator::with_options(config.output.color_output, detailed, true, true, true);
    let rendered = match (&report, format) {
        (Some(report), format) => generator.generate_report(report, &format)?,
        (None, _) => generator.console().format_view(&view, None)?,
    };
    println!("{}", rendered);

    if let (Some(path), Some(report)) = (save, report) {
        // Saved files never carry terminal color codes.
        let plain = ReportGenerator::with_options(false, detailed, true, true, true);
        let content = plain.generate_report(&report, &format)?;
        let path = if path.is_dir() {
            path.join(suggest_filename(&format, &report.metadata.resume_file, true))
        } else {
            path
        };
        save_report_to_file(&content, &path)?;
        println!("💾 Report saved to {}", path.display());
    }

    Ok(())
}

fn new_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
