// Library root
// -----------
// Console client for a remote vintage-car store. The binary (`main.rs`)
// parses arguments, sets up logging and hands an `ApiClient` plus the
// terminal to the menu loop in `ui`.
//
// Module responsibilities:
// - `api`: the record type and the blocking HTTP client for the store.
// - `config`: endpoint and timeout settings.
// - `validate`: per-field checks of operator input.
// - `commands`: list/add/delete/update, sequencing prompts and requests.
// - `ui`: console seam, menu loop and table rendering.
pub mod api;
pub mod commands;
pub mod config;
pub mod ui;
pub mod validate;

#[cfg(test)]
mod test_utils;
