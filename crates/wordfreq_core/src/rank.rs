use crate::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub token: String,
    pub count: u64,
}

impl RankedEntry {
    pub fn new(token: impl Into<String>, count: u64) -> Self {
        Self {
            token: token.into(),
            count,
        }
    }
}

/// Returns at most `k` entries, highest count first.
///
/// Equal counts are ordered by token in ascending byte order so the output is
/// deterministic regardless of the table's iteration order.
pub fn top_k(table: &FrequencyTable, k: usize) -> Vec<RankedEntry> {
    if k == 0 {
        return Vec::new();
    }

    let mut entries: Vec<RankedEntry> = table
        .iter()
        .map(|(token, count)| RankedEntry::new(token.as_str(), *count))
        .collect();
    entries.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.token.cmp(&b.token)));
    entries.into_iter().take(k).collect()
}
