//! APA and MLA reference rendering.
//!
//! Pure functions over a `Citation`; no validation is repeated here, so an
//! author list that bypassed validation renders with an empty author clause.

use crate::model::citation::Citation;
use serde::{Deserialize, Serialize};

/// Supported reference styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationStyle {
    Apa,
    Mla,
}

impl CitationStyle {
    pub fn format(self, citation: &Citation) -> String {
        match self {
            Self::Apa => format_apa(citation),
            Self::Mla => format_mla(citation),
        }
    }
}

/// `Author (year). Title. Source[. Retrieved from url]`
pub fn format_apa(citation: &Citation) -> String {
    let authors = match citation.authors.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} & {second}"),
        [first, ..] => format!("{first} et al."),
    };

    let mut rendered = format!(
        "{authors} ({}). {}. {}",
        citation.year, citation.title, citation.source
    );
    if let Some(url) = &citation.url {
        rendered.push_str(". Retrieved from ");
        rendered.push_str(url);
    }
    rendered
}

/// `Surname, Given "Title." Source, year[. url]`
pub fn format_mla(citation: &Citation) -> String {
    let authors = match citation.authors.as_slice() {
        [] => String::new(),
        [only] => surname_first(only),
        [first, second] => format!("{}, and {second}", surname_first(first)),
        [first, ..] => format!("{}, et al.", surname_first(first)),
    };

    let mut rendered = format!(
        "{authors} \"{}.\" {}, {}",
        citation.title, citation.source, citation.year
    );
    if let Some(url) = &citation.url {
        rendered.push_str(". ");
        rendered.push_str(url);
    }
    rendered
}

/// Moves the last whitespace-separated token to the front.
///
/// A single-token name is treated as a bare surname and returned alone.
fn surname_first(name: &str) -> String {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    match tokens.split_last() {
        None => String::new(),
        Some((surname, [])) => (*surname).to_string(),
        Some((surname, given)) => format!("{surname}, {}", given.join(" ")),
    }
}
