use crate::infra::InMemoryLearnerRepository;
use clap::Args;
use sentilearn::error::AppError;
use sentilearn::learning::{
    render_certificate_html, CreateUserRequest, Encourager, GameResult, LearningConfig,
    LearningError, LearningService, ModuleId, ProgressEvent, QuizResult,
};
use sentilearn::sentiment::{AnalysisApproach, AnalyzeRequest, SentimentAnalyzer};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Text to score
    pub(crate) text: String,
    /// Scoring approach: `keyword` (default) or `advanced`
    #[arg(long)]
    pub(crate) approach: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Learner name used for the walkthrough
    #[arg(long, default_value = "Demo Learner")]
    pub(crate) name: String,
    /// Learner email used for the walkthrough
    #[arg(long, default_value = "learner@example.com")]
    pub(crate) email: String,
    /// Seed for the encouragement picker so runs are repeatable
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Write the issued certificate as HTML to this path
    #[arg(long)]
    pub(crate) certificate_html: Option<PathBuf>,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let analyzer = SentimentAnalyzer::new()?;
    let approach = AnalysisApproach::from_label(args.approach.as_deref());
    let request = AnalyzeRequest::new(args.text, approach);
    let (text, approach) = request.validate()?;
    let result = analyzer.analyze(text, approach)?;

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("Result unavailable: {err}"),
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        name,
        email,
        seed,
        certificate_html,
    } = args;

    let encourager = match seed {
        Some(seed) => Encourager::seeded(seed),
        None => Encourager::from_entropy(),
    };
    let service = LearningService::with_encourager(
        Arc::new(InMemoryLearnerRepository::default()),
        LearningConfig::default(),
        encourager,
    );

    println!("SentiLearn learner walkthrough");

    let new_user = CreateUserRequest::new(name, email)
        .validate()
        .map_err(LearningError::from)?;
    let registration = service.create_user(new_user)?;
    let user_id = registration.record.user.id.clone();
    println!(
        "  Registered {} <{}> as {}",
        registration.record.user.name, registration.record.user.email, user_id
    );

    let total_modules = service.config().total_modules;
    let mut events: Vec<ProgressEvent> = (1..=total_modules)
        .map(|index| ProgressEvent::ModuleCompleted {
            module_id: ModuleId(index.to_string()),
        })
        .collect();
    events.extend(demo_scored_events());

    println!("\nProgress events");
    for event in events {
        let label = describe_event(&event);
        let receipt = service.record_progress(&user_id, event)?;
        println!(
            "  {:<32} +{:>2} pts (total {:>3})  {}",
            label, receipt.points_awarded, receipt.progress.total_score, receipt.encouragement
        );
    }

    println!("\nCertificate");
    match service.generate_certificate(&user_id) {
        Ok(receipt) => {
            println!(
                "  Issued {} for {} with score {}%",
                receipt.certificate.id, receipt.certificate.course_name, receipt.certificate.score
            );
            println!("  {}", receipt.encouragement);
            if let Some(path) = certificate_html {
                std::fs::write(&path, render_certificate_html(&receipt.certificate))?;
                println!("  Certificate written to {}", path.display());
            }
        }
        Err(err) => println!("  Certificate not issued: {err}"),
    }

    let dashboard = service.dashboard(&user_id)?;
    match serde_json::to_string_pretty(&dashboard) {
        Ok(json) => println!("\nDashboard payload:\n{json}"),
        Err(err) => println!("\nDashboard payload unavailable: {err}"),
    }

    Ok(())
}

fn demo_scored_events() -> Vec<ProgressEvent> {
    vec![
        ProgressEvent::GameCompleted(GameResult {
            game_type: "emotion-match".to_string(),
            score: 9,
            total_questions: 10,
            percentage: 90.0,
        }),
        ProgressEvent::GameCompleted(GameResult {
            game_type: "speed-round".to_string(),
            score: 7,
            total_questions: 10,
            percentage: 70.0,
        }),
        ProgressEvent::QuizCompleted(QuizResult {
            score: 5,
            total_questions: 5,
            percentage: 100.0,
        }),
    ]
}

fn describe_event(event: &ProgressEvent) -> String {
    match event {
        ProgressEvent::ModuleCompleted { module_id } => format!("Completed module {module_id}"),
        ProgressEvent::GameCompleted(result) => {
            format!("Played {} ({}%)", result.game_type, result.percentage)
        }
        ProgressEvent::QuizCompleted(result) => format!("Finished quiz ({}%)", result.percentage),
        ProgressEvent::Unrecognized(kind) => format!("Logged {kind}"),
    }
}
