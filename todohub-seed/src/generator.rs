//! Random placeholder text and dates for demo todos

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use rand::{seq::SliceRandom, Rng};

const WORDS: &[&str] = &[
    "account", "agent", "answer", "budget", "call", "campaign", "client", "company",
    "design", "draft", "email", "event", "feature", "figure", "follow", "group", "idea",
    "invoice", "issue", "meeting", "message", "method", "model", "network", "office",
    "order", "paper", "partner", "plan", "policy", "present", "price", "project",
    "quarter", "record", "report", "research", "review", "schedule", "send", "service",
    "share", "sign", "staff", "student", "summary", "system", "team", "update", "vendor",
];

/// Words per generated title
pub const TITLE_WORDS: usize = 5;

/// Sentences per generated description
pub const DESCRIPTION_SENTENCES: usize = 3;

/// One todo row ready for insertion
#[derive(Debug, Clone)]
pub struct FakeTodo {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// `words` random words, capitalized, ending in a period
pub fn sentence<R: Rng + ?Sized>(rng: &mut R, words: usize) -> String {
    let mut text = (0..words)
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ");

    if let Some(first) = text.get(..1) {
        let upper = first.to_uppercase();
        text.replace_range(..1, &upper);
    }
    text.push('.');
    text
}

/// `sentences` sentences of 4 to 10 words each
pub fn paragraph<R: Rng + ?Sized>(rng: &mut R, sentences: usize) -> String {
    (0..sentences)
        .map(|_| {
            let words = rng.gen_range(4..=10);
            sentence(rng, words)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A moment between January 1st of `now`'s year and `now`
pub fn date_time_this_year<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> DateTime<Utc> {
    let start = Utc
        .with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(now);
    let span = (now - start).num_seconds().max(0);

    start + Duration::seconds(rng.gen_range(0..=span))
}

pub fn fake_todo<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> FakeTodo {
    FakeTodo {
        title: sentence(rng, TITLE_WORDS),
        description: paragraph(rng, DESCRIPTION_SENTENCES),
        completed: rng.gen_bool(0.5),
        created_at: date_time_this_year(rng, now),
    }
}
