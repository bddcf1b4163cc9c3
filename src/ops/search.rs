use std::ops::Range;

use chrono::NaiveDate;
use regex::Regex;

use crate::io::repository::{DocumentProvider, RepoError};
use crate::model::date::days_of_year;

/// A matching line of one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub date: NaiveDate,
    /// 1-based
    pub line_number: usize,
    pub line: String,
    pub spans: Vec<Range<usize>>,
}

/// Collect all non-overlapping match byte-ranges for a regex in the given text.
fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}

/// Search every entry of `year`, line by line, in date order
pub fn search_year(
    provider: &dyn DocumentProvider,
    year: i32,
    re: &Regex,
) -> Result<Vec<SearchHit>, RepoError> {
    let mut hits = Vec::new();
    for date in days_of_year(year) {
        let Some(text) = provider.read(date)? else {
            continue;
        };
        for (idx, line) in text.lines().enumerate() {
            let spans = find_matches(re, line);
            if !spans.is_empty() {
                hits.push(SearchHit {
                    date,
                    line_number: idx + 1,
                    line: line.to_string(),
                    spans,
                });
            }
        }
    }
    Ok(hits)
}
