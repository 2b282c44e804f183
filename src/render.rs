//! Plain-text views for CLI output. Renderers only read flow state.

use textwrap::Options;

use crate::interview::{Question, SessionHandle};
use crate::models::{
    AnswerFeedback, AnswerOutcome, Application, GapAnalysis, InterviewResults, ReadinessReport,
    ReminderDigest, ResumeAnalysis, Statistics,
};
use crate::readiness::COMPONENT_MAX;
use crate::tracker::ApplicationCard;

const WIDTH: usize = 78;
const RESUME_COMPONENT_MAX: u32 = 20;
const ANSWER_SCORE_MAX: u32 = 10;

fn wrapped(text: &str, indent: &str) -> String {
    let options = Options::new(WIDTH)
        .initial_indent(indent)
        .subsequent_indent(indent);
    textwrap::fill(text, options)
}

fn bullet(text: &str) -> String {
    let options = Options::new(WIDTH)
        .initial_indent("  - ")
        .subsequent_indent("    ");
    textwrap::fill(text, options)
}

fn heading(out: &mut String, title: &str) {
    out.push_str(&format!("\n{}\n{}\n", title, "-".repeat(title.chars().count())));
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

// --- Readiness ---

pub fn readiness(report: &ReadinessReport) -> String {
    let mut out = format!("Readiness score: {}/100 ({})\n", report.score, report.readiness_level);
    heading(&mut out, "Breakdown");
    for (label, points) in report.breakdown.components() {
        out.push_str(&format!("  {:<20} {:>2}/{}\n", label, points, COMPONENT_MAX));
    }
    if !report.feedback.is_empty() {
        heading(&mut out, "Feedback");
        for item in &report.feedback {
            out.push_str(&bullet(item));
            out.push('\n');
        }
    }
    out
}

// --- Skills gap ---

pub fn required_skills(skills: &[String]) -> String {
    if skills.is_empty() {
        return "No specific technical skills detected.\n".to_string();
    }
    format!("Required skills: {}\n", skills.join(", "))
}

pub fn gap(analysis: &GapAnalysis) -> String {
    let mut out = format!(
        "Readiness: {}% ({})\n",
        analysis.readiness_percentage, analysis.readiness_status
    );

    heading(&mut out, "Matching skills");
    if analysis.matching_skills.is_empty() {
        out.push_str("  No matching skills found\n");
    }
    for skill in &analysis.matching_skills {
        out.push_str(&format!("  + {}\n", skill));
    }

    heading(&mut out, "Missing skills");
    if analysis.missing_skills.is_empty() {
        out.push_str("  You have all required skills!\n");
    }
    for skill in &analysis.missing_skills {
        out.push_str(&format!("  - {}\n", skill));
    }

    heading(&mut out, "Recommendation");
    out.push_str(&wrapped(&analysis.recommendation, "  "));
    out.push('\n');

    heading(&mut out, "Learning resources");
    if analysis.learning_resources.is_empty() {
        out.push_str("  No learning resources needed!\n");
    }
    for (skill, resources) in &analysis.learning_resources {
        out.push_str(&format!("  {}\n", skill));
        for resource in resources {
            out.push_str(&format!("    {} [{}] {}\n", resource.name, resource.kind, resource.url));
        }
    }
    out
}

// --- Resume roast ---

pub fn resume(analysis: &ResumeAnalysis) -> String {
    let mut out = format!(
        "Resume score: {}/100 ({})\nWord count: {} words\n",
        analysis.total_score, analysis.overall_assessment, analysis.word_count
    );
    heading(&mut out, "Scores");
    for (label, points) in analysis.scores.labelled() {
        out.push_str(&format!("  {:<14} {:>2}/{}\n", label, points, RESUME_COMPONENT_MAX));
    }
    if !analysis.feedback.is_empty() {
        heading(&mut out, "Feedback");
        for item in &analysis.feedback {
            out.push_str(&bullet(item));
            out.push('\n');
        }
    }
    heading(&mut out, "Improvements");
    if analysis.improvements.is_empty() {
        out.push_str("  Your resume looks great!\n");
    }
    for improvement in &analysis.improvements {
        out.push_str(&format!("  {}\n", improvement.category));
        out.push_str(&wrapped(&format!("Problem: {}", improvement.issue), "    "));
        out.push('\n');
        out.push_str(&wrapped(&format!("Fix: {}", improvement.fix), "    "));
        out.push('\n');
    }
    out
}

// --- Tracker ---

fn days_ago(days: Option<i64>) -> String {
    match days {
        Some(days) => format!("{} days ago", days),
        None => "date unknown".to_string(),
    }
}

pub fn application_table(cards: &[ApplicationCard<'_>]) -> String {
    if cards.is_empty() {
        return "No applications yet. Add your first application to start tracking!\n".to_string();
    }
    let mut out = format!(
        "{:<26} {:<20} {:<24} {:<20} {:>9}\n",
        "ID", "COMPANY", "POSITION", "STATUS", "APPLIED"
    );
    out.push_str(&format!("{}\n", "-".repeat(103)));
    for card in cards {
        let app = card.application;
        let applied = card
            .days_since_applied
            .map(|days| format!("{}d", days))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<26} {:<20} {:<24} {:<20} {:>9}{}\n",
            truncate(&app.id.0, 26),
            truncate(&app.company, 18),
            truncate(&app.position, 22),
            app.status,
            applied,
            if card.needs_follow_up { "  follow-up!" } else { "" }
        ));
    }
    out
}

pub fn application_detail(card: &ApplicationCard<'_>) -> String {
    let app = card.application;
    let mut out = format!("{} - {}\n", app.company, app.position);
    out.push_str(&format!("ID: {}\n", app.id));
    out.push_str(&format!("Status: {}\n", app.status));
    if card.needs_follow_up {
        out.push_str("Follow-up needed!\n");
    }
    out.push_str(&format!(
        "Applied: {} ({})\n",
        app.date_applied,
        days_ago(card.days_since_applied)
    ));
    out.push_str(&format!(
        "Follow-up: {}\n",
        app.follow_up_date.as_deref().unwrap_or("N/A")
    ));
    out.push_str(&format!("Job posting: {}\n", app.job_url.as_deref().unwrap_or("N/A")));
    if let Some(notes) = &app.notes {
        out.push_str(&format!("Notes:\n{}\n", wrapped(notes, "  ")));
    }
    out
}

pub fn statistics(stats: &Statistics) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total applications: {}\n", stats.total_applications));
    out.push_str(&format!("Response rate:      {}%\n", stats.response_rate));
    out.push_str(&format!("Interviews:         {}\n", stats.interviews));
    out.push_str(&format!("Offers:             {}\n", stats.offers));
    if stats.rejections > 0 {
        out.push_str(&format!("Rejections:         {}\n", stats.rejections));
    }
    out.push_str(&format!("Pending follow-ups: {}\n", stats.pending_follow_ups));
    if !stats.status_breakdown.is_empty() {
        heading(&mut out, "By status");
        for (status, count) in &stats.status_breakdown {
            out.push_str(&format!("  {:<20} {:>4}\n", status, count));
        }
    }
    out
}

pub fn reminders(digest: &ReminderDigest) -> String {
    if digest.reminders.is_empty() {
        return "No pending follow-ups!\n".to_string();
    }
    let mut out = format!("{} follow-up(s) due\n", digest.count);
    for reminder in &digest.reminders {
        let app: &Application = &reminder.application;
        out.push_str(&format!("\n[{}] {} - {}\n", reminder.priority, app.company, app.position));
        out.push_str(&format!("  ID:            {}\n", app.id));
        out.push_str(&format!("  Applied:       {}\n", app.date_applied));
        out.push_str(&format!(
            "  Follow-up due: {}\n",
            app.follow_up_date.as_deref().unwrap_or("N/A")
        ));
        out.push_str(&format!("  Days overdue:  {}\n", reminder.days_overdue));
    }
    out
}

// --- Mock interview ---

pub fn question(session: &SessionHandle, question: &Question) -> String {
    format!(
        "{} interview for {}\nQuestion {} of {}\n\n{}\n",
        session.company,
        session.role,
        question.number,
        session.total_questions,
        wrapped(&question.text, "  ")
    )
}

pub fn feedback(feedback: &AnswerFeedback) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Content: {}/{}  Communication: {}/{}  Confidence: {}%\n",
        feedback.content_score,
        ANSWER_SCORE_MAX,
        feedback.communication_score,
        ANSWER_SCORE_MAX,
        feedback.confidence_score.round()
    ));
    out.push_str(&wrapped(&feedback.feedback, "  "));
    out.push('\n');
    if !feedback.filler_words.is_empty() {
        let fillers: Vec<String> = feedback
            .filler_words
            .iter()
            .map(|(word, count)| format!("\"{}\" ({}x)", word, count))
            .collect();
        out.push_str(&format!("Filler words: {}\n", fillers.join(", ")));
    }
    out
}

pub fn outcome(outcome: &AnswerOutcome) -> String {
    let mut out = feedback(outcome.feedback());
    if outcome.is_complete() {
        out.push_str("\nThat was the last question.\n");
    }
    out
}

pub fn interview_results(session: &SessionHandle, results: &InterviewResults) -> String {
    let scores = &results.scores;
    let mut out = format!(
        "{} interview for {} complete\nOverall score: {}\n",
        session.company,
        session.role,
        scores.overall_score.round()
    );
    out.push_str(&format!("  Content:       {}/{}\n", scores.content_avg, ANSWER_SCORE_MAX));
    out.push_str(&format!(
        "  Communication: {}/{}\n",
        scores.communication_avg, ANSWER_SCORE_MAX
    ));
    out.push_str(&format!("  Confidence:    {}%\n", scores.confidence_avg.round()));
    if !results.answers.is_empty() {
        heading(&mut out, "Answers");
        for (index, answer) in results.answers.iter().enumerate() {
            out.push_str(&format!("\nQuestion {}: {}\n", index + 1, answer.question));
            out.push_str(&format!(
                "  Content: {}/{}  Communication: {}/{}  Confidence: {}%\n",
                answer.content_score,
                ANSWER_SCORE_MAX,
                answer.communication_score,
                ANSWER_SCORE_MAX,
                answer.confidence_score.round()
            ));
        }
    }
    out
}
