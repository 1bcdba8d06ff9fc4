// src/process/utils.rs

use std::collections::HashSet;

/// Concatenate a cell's text nodes and collapse runs of whitespace.
pub fn clean_cell<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let joined: String = parts.collect();
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Name `width` columns from a (possibly short or missing) header row.
///  - no header at all: `0`, `1`, ...
///  - blank or missing header cell: `Unnamed: {i}`
///  - repeats: `name.1`, `name.2`, ...
pub fn column_names(header: &[String], width: usize) -> Vec<String> {
    let mut taken = HashSet::with_capacity(width);
    (0..width)
        .map(|i| {
            let base = match header.get(i) {
                Some(h) if !h.is_empty() => h.clone(),
                _ if header.is_empty() => i.to_string(),
                _ => format!("Unnamed: {}", i),
            };
            let name = unique_name(&base, &taken);
            taken.insert(name.clone());
            name
        })
        .collect()
}

/// `base` if free, otherwise the first free `base.N`.
pub fn unique_name(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    let mut n = 1;
    loop {
        let candidate = format!("{}.{}", base, n);
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
