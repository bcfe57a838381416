//! Test fixtures and factory functions for creating test data.

use study_host::commands::{StartMode, StartRequest};

/// Generate a vocabulary CSV with a `CardID` column and `num_rows` rows.
pub fn vocab_csv(num_rows: usize) -> String {
    let mut csv = String::from("CardID,English,French\n");
    for i in 1..=num_rows {
        csv.push_str(&format!("{i},en{i},fr{i}\n"));
    }
    csv
}

/// Three-language CSV where row 2 lacks a Spanish value.
pub fn trilingual_csv() -> String {
    [
        "English,French,Spanish",
        "dog,chien,perro",
        "cat,chat,",
        "bird,oiseau,pájaro",
        "house,maison,casa",
    ]
    .join("\n")
}

/// Deterministic start request.
pub fn start(mode: StartMode) -> StartRequest {
    StartRequest {
        mode,
        ordered: None,
        seed: Some(7),
    }
}
