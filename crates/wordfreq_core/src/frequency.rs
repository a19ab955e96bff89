use std::collections::HashMap;

/// Distinct token → number of occurrences. Iteration order carries no meaning.
pub type FrequencyTable = HashMap<String, u64>;

/// Counts exact (case-sensitive) token occurrences.
pub fn count<S: AsRef<str>>(tokens: &[S]) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for token in tokens {
        let token = token.as_ref();
        match table.get_mut(token) {
            Some(n) => *n += 1,
            None => {
                table.insert(token.to_owned(), 1);
            }
        }
    }
    table
}

/// Sum of all counts, i.e. the length of the token sequence the table was built from.
pub fn total_tokens(table: &FrequencyTable) -> u64 {
    table.values().sum()
}
