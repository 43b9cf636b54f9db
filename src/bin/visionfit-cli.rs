// ABOUTME: CLI binary — runs the full request-tier flow against a local photo for local testing
// ABOUTME: Mirrors the worker binary's style; useful where standing up a queue + HTTP layer is overkill
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! # VisionFit CLI
//!
//! A one-shot, synchronous runner of the whole pipeline described in §2's
//! control-flow summary, minus the queue: load a photo and the scalar
//! wizard inputs from the command line, run the vision pipeline directly
//! (no enqueue/await — this binary plays both request and worker tier),
//! validate the resulting `DataContract`, synthesize a plan, run the
//! safety audit, and print the formatted [`visionfit_server::formatter::PlanResponse`]
//! as JSON. Intended for local development and manual spec-scenario
//! verification, not for production request handling — a real deployment
//! goes through [`visionfit_server::queue`] instead (see
//! `src/bin/visionfit-worker.rs`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use tracing::info;
use visionfit_core::models::{ActivityLevel, Experience, Goal, Sex, StaticProfile, WizardInputs};
use visionfit_server::config::{AnthroRatios, PipelineConfig};
use visionfit_server::contract::{self, ValidationOutcome};
use visionfit_server::formatter::ResponseFormatter;
use visionfit_server::logging::LoggingConfig;
use visionfit_server::plan::PlanSynthesizer;
use visionfit_server::vision::reference_pipeline;

#[derive(Parser)]
#[command(name = "visionfit-cli")]
#[command(about = "Run the vision pipeline and plan synthesizer against a local photo")]
struct Args {
    /// Path to the full-body photo to analyze.
    #[arg(long)]
    photo: PathBuf,
    /// Height in centimeters, in [100, 230].
    #[arg(long)]
    height_cm: f64,
    /// Weight in kilograms, in [30, 300].
    #[arg(long)]
    weight_kg: f64,
    /// Biological sex: male, female, or non-binary.
    #[arg(long, value_parser = parse_sex)]
    sex: Sex,
    /// Date of birth, `YYYY-MM-DD`.
    #[arg(long, value_parser = parse_date)]
    date_of_birth: NaiveDate,
    /// Primary goal: muscle-gain, fat-loss, recomp, or maintenance.
    #[arg(long, value_parser = parse_goal, default_value = "maintenance")]
    goal: Goal,
    /// Training days per week, in [1, 7].
    #[arg(long, default_value_t = 4)]
    training_days: u32,
    /// Habitual activity level: sedentary, light, moderate, or high.
    #[arg(long, value_parser = parse_activity_level, default_value = "moderate")]
    activity_level: ActivityLevel,
    /// Training experience: beginner, intermediate, or advanced.
    #[arg(long, value_parser = parse_experience, default_value = "intermediate")]
    experience: Experience,
    /// Comma-separated free-text injury tokens, e.g. `"left knee pain"`.
    #[arg(long, value_delimiter = ',')]
    injuries: Vec<String>,
    /// Comma-separated free-text equipment-limitation tokens, e.g. `"no barbell"`.
    #[arg(long, value_delimiter = ',')]
    equipment_limits: Vec<String>,
    /// Most recently reported reps-in-reserve, if any.
    #[arg(long)]
    reported_rir: Option<u8>,
}

#[tokio::main]
async fn main() -> Result<()> {
    LoggingConfig::from_env().init()?;
    let args = Args::parse();

    let image_bytes = std::fs::read(&args.photo)
        .with_context(|| format!("reading photo at {}", args.photo.display()))?;

    let pipeline = reference_pipeline();
    let config = PipelineConfig::default();
    let anthro_ratios = AnthroRatios::default();

    let vision = match pipeline.run(&image_bytes, args.height_cm, args.sex, &config, anthro_ratios) {
        Ok(record) => record,
        Err(failure) => {
            anyhow::bail!("vision pipeline failed ({}): {}", failure.error.code(), failure.error.message);
        }
    };
    info!(quality = vision.quality, bf_estimate = vision.bf_estimate, "vision analysis complete");

    let profile = StaticProfile {
        user_id: uuid::Uuid::new_v4(),
        full_name: "CLI User".to_string(),
        date_of_birth: args.date_of_birth,
        sex: args.sex,
        primary_goal: args.goal,
        training_days_per_week: args.training_days,
        activity_level: args.activity_level,
        experience: args.experience,
        dietary_restrictions: Vec::new(),
    };
    let wizard = WizardInputs {
        photo_reference: args.photo.display().to_string(),
        height_cm: args.height_cm,
        weight_kg: args.weight_kg,
        smart_scale: visionfit_core::models::SmartScaleReadings::default(),
        injuries: args.injuries,
        equipment_limits: args.equipment_limits,
        user_comment: String::new(),
        reported_rir: args.reported_rir,
    };

    let outcome = contract::validate(profile, wizard, vision).map_err(|violations| {
        let rendered = violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect::<Vec<_>>()
            .join("; ");
        anyhow::anyhow!("data contract validation failed: {rendered}")
    })?;

    match outcome {
        outcome @ ValidationOutcome::KidSafe { .. } => print_kid_safe(outcome),
        ValidationOutcome::Adult(data_contract) => {
            let plan = PlanSynthesizer::synthesize(&data_contract, None, Utc::now())?;
            let response = ResponseFormatter::format(&plan);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

fn print_kid_safe(outcome: ValidationOutcome) {
    let ValidationOutcome::KidSafe { profile, wizard, vision } = outcome else {
        unreachable!("caller only passes the KidSafe variant");
    };
    let kid_plan = PlanSynthesizer::synthesize_kid_safe(&profile, &wizard, &vision, Utc::now());
    match serde_json::to_string_pretty(&kid_plan) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to serialize kid-safe plan: {e}"),
    }
}

fn parse_sex(raw: &str) -> Result<Sex, String> {
    match raw.to_ascii_lowercase().as_str() {
        "male" => Ok(Sex::Male),
        "female" => Ok(Sex::Female),
        "non-binary" | "nonbinary" => Ok(Sex::NonBinary),
        other => Err(format!("unrecognized sex {other:?} (expected male, female, or non-binary)")),
    }
}

fn parse_goal(raw: &str) -> Result<Goal, String> {
    match raw.to_ascii_lowercase().as_str() {
        "muscle-gain" | "muscle_gain" => Ok(Goal::MuscleGain),
        "fat-loss" | "fat_loss" => Ok(Goal::FatLoss),
        "recomp" => Ok(Goal::Recomp),
        "maintenance" => Ok(Goal::Maintenance),
        other => Err(format!(
            "unrecognized goal {other:?} (expected muscle-gain, fat-loss, recomp, or maintenance)"
        )),
    }
}

fn parse_activity_level(raw: &str) -> Result<ActivityLevel, String> {
    match raw.to_ascii_lowercase().as_str() {
        "sedentary" => Ok(ActivityLevel::Sedentary),
        "light" => Ok(ActivityLevel::Light),
        "moderate" => Ok(ActivityLevel::Moderate),
        "high" => Ok(ActivityLevel::High),
        other => Err(format!(
            "unrecognized activity level {other:?} (expected sedentary, light, moderate, or high)"
        )),
    }
}

fn parse_experience(raw: &str) -> Result<Experience, String> {
    match raw.to_ascii_lowercase().as_str() {
        "beginner" => Ok(Experience::Beginner),
        "intermediate" => Ok(Experience::Intermediate),
        "advanced" => Ok(Experience::Advanced),
        other => Err(format!(
            "unrecognized experience {other:?} (expected beginner, intermediate, or advanced)"
        )),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("invalid date {raw:?}: {e}"))
}
