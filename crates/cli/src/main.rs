use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use triage_core::{
    build_guidance, llm_settings_from_env_values, Intake, IntakeFields, Lexicon, Sex,
    TriageLevel, TriagePipeline, TriageTables, Vitals,
};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Symptom intake triage CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Triage one intake given on the command line
    Assess {
        /// Age in years (0-120)
        #[arg(long)]
        age: i64,
        /// female, male or other
        #[arg(long)]
        sex: Sex,
        /// Patient is pregnant
        #[arg(long)]
        pregnant: bool,
        /// Hours since symptoms started
        #[arg(long)]
        duration_hours: Option<f64>,
        /// Body temperature in °C
        #[arg(long)]
        temp_c: Option<f64>,
        /// Heart rate in beats per minute
        #[arg(long)]
        hr_bpm: Option<u16>,
        /// Oxygen saturation in percent
        #[arg(long)]
        spo2: Option<u8>,
        /// Existing condition (repeatable)
        #[arg(long = "condition")]
        conditions: Vec<String>,
        /// Current medication (repeatable)
        #[arg(long = "med")]
        meds: Vec<String>,
        /// Known allergy (repeatable)
        #[arg(long = "allergy")]
        allergies: Vec<String>,
        /// Print only the JSON response
        #[arg(long)]
        json: bool,
        /// Free-text symptom description
        symptoms_text: String,
    },
    /// Triage an intake read from a JSON file
    AssessFile {
        /// Path to an intake JSON document
        path: PathBuf,
        /// Print only the JSON response
        #[arg(long)]
        json: bool,
    },
    /// Show how free text matches the symptom lexicon
    Match {
        /// Free text to score
        text: String,
    },
    /// List the symptom lexicon
    Lexicon,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(log_filter()?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Assess {
            age,
            sex,
            pregnant,
            duration_hours,
            temp_c,
            hr_bpm,
            spo2,
            conditions,
            meds,
            allergies,
            json,
            symptoms_text,
        }) => {
            let vitals = (temp_c.is_some() || hr_bpm.is_some() || spo2.is_some()).then_some(
                Vitals {
                    temp_c,
                    hr_bpm,
                    spo2,
                },
            );
            let intake = Intake::new(IntakeFields {
                age,
                sex,
                pregnant: pregnant.then_some(true),
                symptoms_text,
                onset: None,
                duration_hours,
                conditions,
                meds,
                allergies,
                vitals,
            })?;
            run_assessment(intake, json).await?;
        }
        Some(Commands::AssessFile { path, json }) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let req: api_shared::Intake = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a valid intake document", path.display()))?;
            run_assessment(Intake::try_from(req)?, json).await?;
        }
        Some(Commands::Match { text }) => {
            let lexicon = Lexicon::symptoms();
            let threshold = f64::from(lexicon.threshold());
            for s in lexicon.score(&text) {
                let marker = if s.score >= threshold { "match" } else { "-" };
                println!("{:<10} {:>6.1}  {:<5}  {}", s.code, s.score, marker, s.phrase);
            }
        }
        Some(Commands::Lexicon) => {
            let lexicon = Lexicon::symptoms();
            println!("Match threshold: {}", lexicon.threshold());
            for entry in lexicon.entries() {
                println!("{}: {}", entry.code, entry.phrases.join(", "));
            }
        }
        None => {
            println!("Use 'triage --help' for commands");
        }
    }

    Ok(())
}

/// `RUST_LOG` plus `info` for the crates this binary runs. Logs go to stderr so JSON on stdout
/// stays parseable.
fn log_filter() -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive("triage_cli=info".parse()?)
        .add_directive("triage_core=info".parse()?))
}

/// Build the pipeline from the environment and print the analysis of one intake.
async fn run_assessment(intake: Intake, json_only: bool) -> anyhow::Result<()> {
    let settings = llm_settings_from_env_values(
        std::env::var("OPENAI_API_KEY").ok(),
        std::env::var("OPENAI_BASE_URL").ok(),
        std::env::var("OPENAI_MODEL").ok(),
        std::env::var("LLM_TIMEOUT_SECS").ok(),
    )?;
    let guidance = build_guidance(settings.as_ref())?;
    let pipeline = TriagePipeline::new(Arc::new(TriageTables::default()), guidance);
    tracing::info!(mode = %pipeline.guidance_mode(), "running assessment");

    let analysis = pipeline.analyze(intake).await?;
    let level = analysis.triage.level;
    let response = api_shared::AnalyzeRes::from(analysis);

    if !json_only {
        println!("{}", banner(level));
        println!("Reason: {}", response.triage.reason);
        println!();
    }
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

fn banner(level: TriageLevel) -> String {
    format!("{} | {}", level, level.directive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assess_with_repeated_lists() {
        let cli = Cli::try_parse_from([
            "triage",
            "assess",
            "--age",
            "62",
            "--sex",
            "Male",
            "--spo2",
            "90",
            "--condition",
            "asthma",
            "--condition",
            "copd",
            "short of breath",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Assess {
                age,
                sex,
                spo2,
                conditions,
                pregnant,
                symptoms_text,
                ..
            }) => {
                assert_eq!(age, 62);
                assert_eq!(sex, Sex::Male);
                assert_eq!(spo2, Some(90));
                assert_eq!(conditions, vec!["asthma", "copd"]);
                assert!(!pregnant);
                assert_eq!(symptoms_text, "short of breath");
            }
            _ => panic!("expected assess"),
        }
    }

    #[test]
    fn rejects_unknown_sex() {
        let result = Cli::try_parse_from([
            "triage", "assess", "--age", "30", "--sex", "robot", "cough",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn log_filter_enables_info_for_workspace_crates() {
        let filter = log_filter().unwrap().to_string();
        assert!(filter.contains("triage_cli=info"));
        assert!(filter.contains("triage_core=info"));
    }

    #[test]
    fn banner_carries_directive() {
        assert_eq!(
            banner(TriageLevel::Urgent),
            "URGENT | Seek medical care within 24–48 hours."
        );
    }
}
