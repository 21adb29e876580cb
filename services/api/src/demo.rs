use crate::infra::{build_service, parse_time_filter, read_answers};
use chrono::Local;
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;
use wahl_navigator::config::{AppConfig, DatasetConfig};
use wahl_navigator::error::AppError;
use wahl_navigator::survey::{
    Answer, Importance, LevelFilters, MatchReport, QuestionFilters, QuestionView,
    SelectionOptions, TimeFilter, TopicId, UserAnswer,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DatasetArgs {
    /// JSON dataset to load instead of the configured one
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Vote sheet CSV applied on top of the dataset
    #[arg(long)]
    pub(crate) votes_csv: Option<PathBuf>,
}

impl DatasetArgs {
    fn resolve(self) -> Result<DatasetConfig, AppError> {
        let mut config = AppConfig::load()?.dataset;
        if let Some(path) = self.dataset {
            config.path = Some(path);
        }
        if let Some(path) = self.votes_csv {
            config.votes_csv = Some(path);
        }
        Ok(config)
    }
}

#[derive(Args, Debug)]
pub(crate) struct ResultsArgs {
    /// JSON file holding the answers, either a list or {"userAnswers": [...]}
    #[arg(long)]
    pub(crate) answers: PathBuf,
    #[command(flatten)]
    pub(crate) dataset: DatasetArgs,
    /// Print the JSON report instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct QuestionsArgs {
    /// Time window: all, 5years or 2years
    #[arg(long, value_parser = parse_time_filter)]
    pub(crate) time: Option<TimeFilter>,
    /// Only federal questions (combine with --state for both)
    #[arg(long)]
    pub(crate) federal: bool,
    /// Only state questions (combine with --federal for both)
    #[arg(long)]
    pub(crate) state: bool,
    /// Restrict to these topic ids; repeatable
    #[arg(long = "topic")]
    pub(crate) topics: Vec<u32>,
    /// Maximum number of questions (0 keeps the configured default)
    #[arg(long, default_value_t = 0)]
    pub(crate) count: usize,
    /// Shuffle before truncating
    #[arg(long)]
    pub(crate) randomize: bool,
    #[command(flatten)]
    pub(crate) dataset: DatasetArgs,
    /// Print JSON instead of the text listing
    #[arg(long)]
    pub(crate) json: bool,
}

impl QuestionsArgs {
    fn filters(&self) -> QuestionFilters {
        let level_filters = if self.federal || self.state {
            LevelFilters {
                federal: self.federal,
                state: self.state,
            }
        } else {
            LevelFilters::default()
        };

        QuestionFilters {
            time_filter: self.time.unwrap_or_default(),
            level_filters,
            topic_filters: self
                .topics
                .iter()
                .map(|id| (TopicId(*id), true))
                .collect::<BTreeMap<_, _>>(),
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the JSON report instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_results(args: ResultsArgs) -> Result<(), AppError> {
    let ResultsArgs {
        answers,
        dataset,
        json,
    } = args;

    let service = build_service(&dataset.resolve()?)?;
    let answers = read_answers(&answers)?;
    let report = service.calculate_results(&answers).into_report();

    if json {
        print_json(&report);
    } else {
        render_report(&report);
    }
    Ok(())
}

pub(crate) fn run_questions(args: QuestionsArgs) -> Result<(), AppError> {
    let filters = args.filters();
    let options = SelectionOptions {
        count: args.count,
        randomize: args.randomize,
    };
    let json = args.json;

    let service = build_service(&args.dataset.resolve()?)?;
    let questions = service.select_questions(&filters, options)?;

    if json {
        print_json(&questions);
    } else {
        render_questions(&questions, &filters);
    }
    Ok(())
}

/// Answers every seed question with a fixed profile and prints the resulting match.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = build_service(&DatasetConfig::default())?;
    let questions = service.questions()?;

    println!("{} seed questions", questions.len());
    render_question_views(&questions);

    let answers = demo_answers(&questions);
    let report = service.calculate_results(&answers).into_report();
    println!();
    if args.json {
        print_json(&report);
    } else {
        render_report(&report);
    }
    Ok(())
}

fn demo_answers(questions: &[QuestionView]) -> Vec<UserAnswer> {
    const PROFILE: [(Answer, Importance); 4] = [
        (Answer::Agree, Importance::High),
        (Answer::Disagree, Importance::Medium),
        (Answer::Neutral, Importance::Low),
        (Answer::Skip, Importance::Medium),
    ];

    questions
        .iter()
        .zip(PROFILE.iter().cycle())
        .map(|(view, &(answer, importance))| UserAnswer {
            question_id: view.question.id,
            answer,
            importance,
        })
        .collect()
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("JSON output unavailable: {err}"),
    }
}

fn bar(percentage: u8) -> String {
    let filled = usize::from(percentage) / 5;
    format!("{}{}", "#".repeat(filled), ".".repeat(20 - filled))
}

pub(crate) fn render_report(report: &MatchReport) {
    println!("Party match report ({})", Local::now().date_naive());
    if report.degraded {
        println!(
            "  NOTE: sample data shown, not your results ({})",
            report.degraded_reason.as_deref().unwrap_or("unknown reason")
        );
    }

    println!("\nOverall match:");
    for entry in &report.results.party_matches {
        let suffix = if entry.has_data {
            ""
        } else {
            " (no votes on your questions)"
        };
        println!(
            "  {:<40} {} {:>3}%{}",
            entry.party_name,
            bar(entry.match_percentage),
            entry.match_percentage,
            suffix
        );
    }

    if !report.results.thematic_results.is_empty() {
        println!("\nBy topic:");
        for theme in &report.results.thematic_results {
            let parties: Vec<String> = theme
                .party_results
                .iter()
                .map(|entry| format!("{} {}%", entry.party_name, entry.match_percentage))
                .collect();
            println!("  - {}: {}", theme.topic, parties.join(", "));
        }
    }

    if !report.results.key_matches.is_empty() {
        println!("\nKey matches:");
        for key in &report.results.key_matches {
            println!("  - {}", key.description);
        }
    }

    println!(
        "\n{} answered questions compared",
        report.results.user_answers_with_details.len()
    );
}

pub(crate) fn render_questions(questions: &[QuestionView], filters: &QuestionFilters) {
    println!(
        "{} questions (window: {}, federal: {}, state: {})",
        questions.len(),
        filters.time_filter.label(),
        filters.level_filters.federal,
        filters.level_filters.state
    );
    render_question_views(questions);
}

fn render_question_views(questions: &[QuestionView]) {
    for view in questions {
        println!(
            "  [{}] {} ({}, {} {})",
            view.question.id, view.question.title, view.topic, view.parliament, view.question.year
        );
        for vote in &view.party_votes {
            println!("      {:<40} {}", vote.party_name, vote.vote.label());
        }
    }
}
