use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

const DEFAULT_EMOJI: &str = "📋";

// first match wins
const EMOJI_KEYWORDS: &[(&str, &[&str])] = &[
    ("🍽️", &["питан", "еда", "диет", "рацион", "nutrition", "meal", "food", "diet"]),
    ("💪", &["трениров", "упражнен", "нагрузк", "workout", "training", "exercise"]),
    ("😴", &["сон", "сна", "отдых", "восстановлен", "sleep", "rest", "recovery"]),
    ("⚠️", &["важно", "внимание", "important", "disclaimer"]),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSection {
    pub emoji: &'static str,
    pub title: String,
    pub body: String,
}

/// A recommendation split on its `###` headings.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Plan {
    /// Text before the first heading, if any.
    pub intro: Option<String>,
    pub sections: Vec<PlanSection>,
}

pub fn parse_plan(text: &str) -> Plan {
    lazy_static! {
        static ref HEADING_RE: Regex = Regex::new(r"(?m)^[ \t]*###").unwrap();
    }

    let headings: Vec<_> = HEADING_RE.find_iter(text).collect();
    let intro_end = headings.first().map_or(text.len(), |m| m.start());
    let intro = Some(text[..intro_end].trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let sections = headings
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let end = headings.get(i + 1).map_or(text.len(), |next| next.start());
            let chunk = &text[m.end()..end];
            let (title, body) = chunk.split_once('\n').unwrap_or((chunk, ""));
            let title = title.trim().to_string();
            PlanSection {
                emoji: emoji_for(&title),
                body: body.trim().to_string(),
                title,
            }
        })
        .collect();

    Plan { intro, sections }
}

pub fn emoji_for(title: &str) -> &'static str {
    let lower = title.to_lowercase();
    EMOJI_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map_or(DEFAULT_EMOJI, |&(emoji, _)| emoji)
}
