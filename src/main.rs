use clap::Parser;
use colored::*;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

use minimalist_lens::api::{AdviceService, GeminiClient};
use minimalist_lens::cli::Args;
use minimalist_lens::config::{Config, JsonConfig};
use minimalist_lens::error::{LensError, Result};
use minimalist_lens::flow::{FlowController, FlowState};
use minimalist_lens::i18n::{translations, Translations};
use minimalist_lens::models::ImageData;
use minimalist_lens::store::{load_language, FilesystemStore, HistoryStore, KeyValueStore};
use minimalist_lens::ui::{render_footer, render_header, render_state};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.config_init {
        match JsonConfig::init_config_file() {
            Ok(path) => {
                println!("{}", format!("Wrote {}", path.display()).green());
                return;
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
                process::exit(1);
            }
        }
    }

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    if let Err(e) = run(args, config).await {
        eprintln!("{} {}", "Error:".red(), e);
        process::exit(1);
    }
}

async fn run(args: Args, config: Config) -> Result<()> {
    let storage = FilesystemStore::new(&config.data_dir);
    if config.verbose {
        eprintln!(
            "{}",
            format!("[store] Data directory: {}", storage.data_dir().display()).dimmed()
        );
    }

    if let Some(language) = config.language {
        minimalist_lens::store::save_language(&storage, language)?;
    }

    let archive_only = args.history || args.show.is_some() || args.delete.is_some() || args.clear_history;
    if archive_only {
        let history = HistoryStore::open_with_verbose(storage, config.verbose);
        let mut controller =
            FlowController::new(OfflineService, history).with_verbose(config.verbose);
        return run_archive(&args, &mut controller);
    }

    let Some(image_path) = args.image.as_deref() else {
        if config.language.is_some() {
            let t = translations(load_language(&storage));
            println!("{}", t.tagline.green());
            return Ok(());
        }
        print_usage();
        process::exit(1);
    };

    let image = ImageData::from_path(image_path)?;
    let client = GeminiClient::new(&config)?;
    let history = HistoryStore::open_with_verbose(storage, config.verbose);
    let mut controller = FlowController::new(client, history).with_verbose(config.verbose);

    run_journey(&mut controller, image, image_path).await
}

/// One upload -> questions -> advice journey on the terminal.
async fn run_journey<A: AdviceService, S: KeyValueStore>(
    controller: &mut FlowController<A, S>,
    image: ImageData,
    image_path: &Path,
) -> Result<()> {
    let t = controller.translations();
    print!("{}", render_header(t));
    println!();
    println!("{} {}", t.upload_btn.bold(), image_path.display().to_string().dimmed());

    loop {
        controller.select_image(image.clone())?;
        show(controller);
        controller.analyze().await?;
        show(controller);

        if !matches!(controller.state(), FlowState::Upload { .. }) {
            break;
        }
        if !wants_retry(t)? {
            return Ok(());
        }
    }

    loop {
        let questions = match controller.state() {
            FlowState::AwaitingAnswers { questions, .. } => questions.clone(),
            _ => break,
        };

        for (i, question) in questions.iter().enumerate() {
            let current = match controller.state() {
                FlowState::AwaitingAnswers { answers, .. } => answers[i].clone(),
                _ => String::new(),
            };
            if !current.trim().is_empty() {
                continue;
            }
            let answer = prompt(&format!("{}. {}\n> ", i + 1, question))?;
            controller.set_answer(i, answer)?;
        }

        match controller.submit_answers() {
            Ok(()) => {}
            Err(LensError::IncompleteAnswers) => {
                println!("{}", t.answer_required.yellow());
                continue;
            }
            Err(e) => return Err(e),
        }

        println!("{}", t.questions_btn.bold());
        show(controller);
        controller.generate_advice().await?;
        show(controller);

        if controller.error_message().is_some() && !wants_retry(t)? {
            return Ok(());
        }
    }

    print!("{}", render_footer(t));
    Ok(())
}

fn run_archive<A: AdviceService, S: KeyValueStore>(
    args: &Args,
    controller: &mut FlowController<A, S>,
) -> Result<()> {
    let t = controller.translations();

    match controller.view_history() {
        Ok(()) => {}
        Err(LensError::EmptyHistory) => {
            println!("{}", t.empty_archive.italic().dimmed());
            return Ok(());
        }
        Err(e) => return Err(e),
    }

    if args.clear_history {
        println!("{}", t.clear_total.to_uppercase().bold());
        if !args.yes {
            let answer = prompt(&format!("{} [y/N] ", t.clear_confirm))?;
            if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
                return Ok(());
            }
        }
        controller.clear_history()?;
        println!("{}", t.empty_archive.green());
        return Ok(());
    }

    if let Some(id) = args.delete.as_deref() {
        if controller.history().iter().all(|s| s.id != id) {
            return Err(LensError::SessionNotFound(id.to_string()));
        }
        controller.delete_session(id)?;
        if matches!(controller.state(), FlowState::Upload { .. }) {
            println!("{}", t.empty_archive.italic().dimmed());
            return Ok(());
        }
    }

    if let Some(id) = args.show.as_deref() {
        controller.select_session(id)?;
    }

    show(controller);
    Ok(())
}

fn show<A: AdviceService, S: KeyValueStore>(controller: &FlowController<A, S>) {
    print!(
        "{}",
        render_state(controller.state(), controller.history(), controller.translations())
    );
    let _ = io::stdout().flush();
}

/// Anything but an explicit "n" retries.
fn wants_retry(t: &Translations) -> Result<bool> {
    let answer = prompt(t.retry_prompt)?;
    Ok(!answer.trim().eq_ignore_ascii_case("n"))
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Archive commands never reach the generation service.
struct OfflineService;

impl AdviceService for OfflineService {
    async fn request_questions(
        &self,
        _image: &ImageData,
        _language: minimalist_lens::models::Language,
    ) -> Result<minimalist_lens::models::QuestionSet> {
        Err(LensError::GenerationError(
            "Generation is unavailable in archive mode".to_string(),
        ))
    }

    async fn request_advice(
        &self,
        _image: &ImageData,
        _questions: &[String],
        _answers: &[String],
        _language: minimalist_lens::models::Language,
    ) -> Result<minimalist_lens::models::AdviceResult> {
        Err(LensError::GenerationError(
            "Generation is unavailable in archive mode".to_string(),
        ))
    }
}

fn print_usage() {
    eprintln!("{}", "Usage: lens [OPTIONS] <IMAGE>".red());
    eprintln!("{}", "      --history              List archived sessions".dimmed());
    eprintln!("{}", "      --show <ID>            Show one archived session".dimmed());
    eprintln!("{}", "      --delete <ID>          Delete one archived session".dimmed());
    eprintln!("{}", "      --clear                Clear all archived sessions".dimmed());
    eprintln!("{}", "      --lang <en|zh>         Set the interface language".dimmed());
    eprintln!("{}", "      --config-init          Write an example config file".dimmed());
    eprintln!("{}", "  -v, --verbose              Print diagnostics to stderr".dimmed());
}
