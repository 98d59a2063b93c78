use crate::flow::FlowState;
use crate::i18n::Translations;
use crate::models::{Language, Session};
use chrono::Local;
use colored::*;

const SUMMARY_PREVIEW_CHARS: usize = 40;

pub fn render_header(t: &Translations) -> String {
    format!(
        "{}\n{}\n",
        t.app_title.to_uppercase().bold(),
        t.tagline.dimmed()
    )
}

pub fn render_footer(t: &Translations) -> String {
    format!("{}\n", t.footer.dimmed())
}

/// Render the screen for the current step.
pub fn render_state(state: &FlowState, history: &[Session], t: &Translations) -> String {
    let mut out = String::new();

    if let Some(failure) = state.error() {
        out.push_str(&format!("{}\n\n", failure.message(t).red()));
    }

    match state {
        FlowState::Upload { .. } => {
            out.push_str(&format!("{}\n", t.upload_title.bold()));
            out.push_str(&format!("{}\n", t.upload_desc.dimmed()));
        }
        FlowState::AnalyzingImage { .. } => {
            out.push_str(&format!("{}\n", t.loading_clutter.dimmed()));
        }
        FlowState::AwaitingAnswers {
            questions, answers, ..
        } => {
            out.push_str(&format!("{}\n", t.questions_title.bold()));
            out.push_str(&format!("{}\n\n", t.questions_subtitle.dimmed()));
            for (i, question) in questions.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, question));
                let answer = answers.get(i).map(|a| a.trim()).unwrap_or_default();
                if answer.is_empty() {
                    out.push_str(&format!("   {}\n", t.questions_placeholder.dimmed()));
                } else {
                    out.push_str(&format!("   {}\n", answer));
                }
            }
        }
        FlowState::GeneratingAdvice { .. } => {
            out.push_str(&format!("{}\n", t.loading_refining.dimmed()));
        }
        FlowState::ShowingAdvice { session } => {
            out.push_str(&render_session(session, t, false));
            out.push_str(&format!("\n{}\n", t.new_journey.dimmed()));
        }
        FlowState::Archive { selected: Some(id) } => {
            match history.iter().find(|s| &s.id == id) {
                Some(session) => out.push_str(&render_session(session, t, true)),
                None => out.push_str(&render_archive(history, t)),
            }
            out.push_str(&format!("\n{}\n", t.back_archive.dimmed()));
        }
        FlowState::Archive { selected: None } => {
            out.push_str(&render_archive(history, t));
            out.push_str(&format!("\n{}\n", t.back_start.dimmed()));
        }
    }

    out
}

/// Observation, actions and reflection of one session.
pub fn render_session(session: &Session, t: &Translations, archived: bool) -> String {
    let title = if archived {
        t.advice_archived
    } else {
        t.advice_title
    };

    let mut out = format!("{}\n", title.bold());
    if archived {
        for (question, answer) in session.pairs() {
            out.push_str(&format!("{} {}\n", "Q:".dimmed(), question));
            out.push_str(&format!("{} {}\n", "A:".dimmed(), answer));
        }
    }

    out.push_str(&format!("\n{}\n", t.observation.to_uppercase().dimmed()));
    out.push_str(&format!("\"{}\"\n", session.advice.summary.italic()));

    out.push_str(&format!("\n{}\n", t.action.to_uppercase().dimmed()));
    for tip in &session.advice.tips {
        out.push_str(&format!("  • {}\n", tip));
    }

    out.push_str(&format!("\n{}\n", t.reflection.to_uppercase().dimmed()));
    out.push_str(&format!("{}\n", session.advice.reflection));
    out
}

/// Archive list, newest first, one line per session.
pub fn render_archive(history: &[Session], t: &Translations) -> String {
    let mut out = format!("{}\n", t.archive_title.to_uppercase().bold());

    if history.is_empty() {
        out.push_str(&format!("{}\n", t.empty_archive.italic().dimmed()));
        return out;
    }

    for session in history {
        out.push_str(&format!(
            "{}  {}  {}\n",
            session.id.cyan(),
            format_date(session, session.language).dimmed(),
            preview(&session.advice.summary)
        ));
    }
    out
}

fn format_date(session: &Session, language: Language) -> String {
    let local = session.created_at.with_timezone(&Local);
    match language {
        Language::En => local.format("%b %d, %Y").to_string(),
        Language::Zh => local.format("%Y/%m/%d").to_string(),
    }
}

fn preview(summary: &str) -> String {
    let mut chars = summary.chars();
    let head: String = chars.by_ref().take(SUMMARY_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}
