use crate::infra::InMemorySink;
use big_five::config::AppConfig;
use big_five::error::AppError;
use big_five::workflows::assessment::{
    AssessmentBlueprint, AssessmentService, LikertValue, QuestionId, SubmissionRecord,
    SubmissionRequest, CITY_OPTIONS,
};
use big_five::workflows::delivery::sheets::sheet_row;
use big_five::workflows::eligibility::{EligibilityGate, RespondentProfile};
use big_five::workflows::roster::{RosterEntry, RosterImporter};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RosterCheckArgs {
    /// Roster CSV to check against (defaults to ROSTER_PATH)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// CNIC to look up, with or without hyphens
    pub(crate) cnic: String,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Roster CSV to admit the respondent from (defaults to ROSTER_PATH)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// CNIC of the demo respondent. Defaults to the first roster entry.
    #[arg(long)]
    pub(crate) cnic: Option<String>,
    /// Answer (1-5) given to every question
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub(crate) answer: u8,
}

pub(crate) fn run_roster_check(args: RosterCheckArgs) -> Result<(), AppError> {
    let RosterCheckArgs { roster, cnic } = args;
    let roster = RosterImporter::from_path(resolve_roster_path(roster)?)?;
    let gate = EligibilityGate::new(Arc::new(roster));

    match gate.validate_and_enrich(&cnic) {
        Ok(entry) => {
            println!("Admitted: {}", entry.identifier);
            render_entry(entry);
        }
        Err(err) => println!("Not admitted: {err}"),
    }

    Ok(())
}

pub(crate) fn print_questionnaire() {
    let blueprint = AssessmentBlueprint::standard();

    println!(
        "Big Five questionnaire ({} questions)",
        blueprint.question_count()
    );
    for (index, section) in blueprint.sections().iter().enumerate() {
        println!("\nStep {} of {}: {}", index + 1, blueprint.sections().len(), section.title);
        for question in &section.questions {
            println!("  {:>2}. {}", question.id.get(), question.text);
        }
    }

    println!("\nScale:");
    for value in LikertValue::ordered() {
        println!("  {} = {}", value.value(), value.label());
    }
    println!("Cities: {}", CITY_OPTIONS.join(", "));
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        roster,
        cnic,
        answer,
    } = args;

    let roster = Arc::new(RosterImporter::from_path(resolve_roster_path(roster)?)?);
    let cnic = match cnic.or_else(|| roster.entries().first().map(|e| e.identifier.clone())) {
        Some(cnic) => cnic,
        None => {
            println!("Roster is empty; nobody can take the assessment.");
            return Ok(());
        }
    };

    let sink = Arc::new(InMemorySink::default());
    let service = AssessmentService::new(
        roster,
        Arc::new(AssessmentBlueprint::standard()),
        sink.clone(),
    );

    println!("Big Five assessment demo");
    match service.submit(demo_request(&cnic, answer)) {
        Ok(record) => {
            render_record(&record);
            println!(
                "\n{} submission(s) held in memory; nothing was sent to the spreadsheet.",
                sink.delivered().len()
            );
        }
        Err(err) => println!("Submission rejected: {err}"),
    }

    Ok(())
}

fn demo_request(cnic: &str, answer: u8) -> SubmissionRequest {
    SubmissionRequest {
        user: RespondentProfile {
            cnic: cnic.to_string(),
            ..RespondentProfile::default()
        },
        responses: QuestionId::all().map(|id| (id.get(), answer)).collect(),
    }
}

fn resolve_roster_path(path: Option<PathBuf>) -> Result<PathBuf, AppError> {
    match path {
        Some(path) => Ok(path),
        None => Ok(AppConfig::load()?.roster.path),
    }
}

fn render_entry(entry: &RosterEntry) {
    println!("- Name: {}", entry.name);
    println!("- City: {}", entry.region);
    println!("- Dealership: {}", entry.dealership);
}

fn render_record(record: &SubmissionRecord) {
    println!(
        "- {} ({}) | {} | {}",
        record.respondent_name(),
        record.respondent_identifier(),
        record.dealership(),
        record.region()
    );
    println!("Trait scores:");
    for (kind, score) in record.scores().iter() {
        println!("  - {kind}: {score}");
    }

    let row: Vec<String> = sheet_row(record)
        .iter()
        .map(|cell| cell.as_str().unwrap_or_default().to_string())
        .collect();
    println!("Spreadsheet row: {}", row.join(" | "));
}
