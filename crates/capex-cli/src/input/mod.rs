pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Structured input from `--input <file>` first, then piped stdin.
/// None means neither was given and flags should be used.
pub fn load<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    match path {
        Some(p) => file::read_input(p).map(Some),
        None => stdin::read_stdin(),
    }
}
