use crate::RankedEntry;

pub const PROMPT: &str = "Enter a URL to a valid website: ";
pub const FAREWELL: &str = "Good bye!";

/// Header printed before the entries. There is intentionally no space between
/// "for" and the URL; scripts reading the output depend on this exact shape.
pub fn header_line(n: usize, url: &str) -> String {
    format!("Here are your top {n} entries for{url}:")
}

pub fn entry_line(entry: &RankedEntry) -> String {
    format!("{}: {}", entry.token, entry.count)
}

pub fn failure_line(url: &str, reason: &str) -> String {
    format!("Could not load {url}: {reason}")
}

/// Header followed by one line per entry.
pub fn render_report(url: &str, entries: &[RankedEntry]) -> Vec<String> {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(header_line(entries.len(), url));
    lines.extend(entries.iter().map(entry_line));
    lines
}
