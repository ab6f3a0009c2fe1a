// UI layer: the numbered menu loop, table rendering and the `Console`
// seam through which every prompt and message passes. The terminal
// implementation uses `dialoguer` when a human is at the keyboard and
// plain line reads when stdin is piped.

use crate::api::{CarRecord, CarStore};
use crate::commands::Session;
use anyhow::{bail, Context, Result};
use dialoguer::Input;
use std::io::{BufRead, IsTerminal};
use std::process::ExitCode;

/// Operator-facing I/O. Prompts are given without a trailing colon.
pub trait Console {
    fn read_line(&mut self, prompt: &str) -> Result<String>;
    fn write_line(&mut self, line: &str);
}

/// Console bound to the process's stdin/stdout.
#[derive(Default)]
pub struct Terminal;

impl Console for Terminal {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            let line: String = Input::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .context("Failed to read from terminal")?;
            return Ok(line);
        }

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            bail!("Input closed");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn write_line(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Column keys and widths of the car table, in display order.
pub const COLUMNS: [(&str, usize); 5] = [
    ("id", 10),
    ("brand", 15),
    ("model", 10),
    ("production_year", 20),
    ("convertible", 15),
];

fn table_line<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cells
        .into_iter()
        .zip(COLUMNS.iter())
        .map(|(cell, (_, width))| format!("{:<width$}| ", cell.as_ref(), width = *width))
        .collect()
}

pub fn table_header() -> String {
    table_line(COLUMNS.iter().map(|(key, _)| *key))
}

pub fn table_row(car: &CarRecord) -> String {
    table_line([
        car.id.to_string(),
        car.brand.clone(),
        car.model.clone(),
        car.production_year.to_string(),
        yes_no(car.convertible).to_string(),
    ])
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "True"
    } else {
        "False"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    List,
    Add,
    Delete,
    Update,
}

impl MenuChoice {
    /// Only the bare digits 0..4 select an entry.
    pub fn parse(raw: &str) -> Option<MenuChoice> {
        match raw {
            "0" => Some(MenuChoice::Exit),
            "1" => Some(MenuChoice::List),
            "2" => Some(MenuChoice::Add),
            "3" => Some(MenuChoice::Delete),
            "4" => Some(MenuChoice::Update),
            _ => None,
        }
    }
}

fn print_menu<C: Console>(console: &mut C) {
    let rule = format!("+{}+", "-".repeat(35));
    console.write_line(&rule);
    console.write_line(&format!("|{0}Vintage Cars Database{0}|", " ".repeat(7)));
    console.write_line(&rule);
    console.write_line("M E N U");
    console.write_line("=======");
    console.write_line("1. List cars");
    console.write_line("2. Add new car");
    console.write_line("3. Delete car");
    console.write_line("4. Update car");
    console.write_line("0. Exit");
}

/// How the menu loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Operator chose "Exit".
    Bye,
    /// The store did not answer the reachability check.
    StoreUnreachable,
}

impl SessionEnd {
    pub fn exit_code(self) -> ExitCode {
        match self {
            SessionEnd::Bye => ExitCode::SUCCESS,
            SessionEnd::StoreUnreachable => ExitCode::from(1),
        }
    }
}

/// Main interactive menu. Every round starts by checking that the store
/// still answers; an unreachable store ends the session.
pub fn main_menu<S: CarStore, C: Console>(session: &mut Session<S, C>) -> Result<SessionEnd> {
    loop {
        if !session.store().probe(None).is_found() {
            session.say("Server is not responding - quitting!");
            return Ok(SessionEnd::StoreUnreachable);
        }

        print_menu(session.console());
        let raw = session.console().read_line("Enter your choice (0..4)")?;
        match MenuChoice::parse(raw.as_str()) {
            Some(MenuChoice::Exit) => {
                session.say("Bye!");
                return Ok(SessionEnd::Bye);
            }
            Some(MenuChoice::List) => session.list_cars(),
            Some(MenuChoice::Add) => session.add_car()?,
            Some(MenuChoice::Delete) => session.delete_car()?,
            Some(MenuChoice::Update) => session.update_car()?,
            None => log::debug!("ignoring menu input {:?}", raw),
        }
    }
}
