// Car operations behind the menu entries. Each one gathers fields from
// the operator, checks the store where needed and sends at most one
// write request, built only after every field was collected.

use crate::api::{CarId, CarRecord, CarStore, Probe};
use crate::ui::{table_header, table_row, Console};
use crate::validate::{
    validate_convertible, validate_identifier, validate_name, validate_production_year, Validated,
};
use anyhow::Result;

const ID_PROMPT: &str = "Car ID (empty string to exit)";
const SERVER_DOWN: &str = "Server is not responding";
const NOT_FOUND: &str = "Car ID not found";

/// Everything but the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarDetails {
    pub brand: String,
    pub model: String,
    pub production_year: u16,
    pub convertible: bool,
}

impl CarDetails {
    pub fn into_record(self, id: CarId) -> CarRecord {
        CarRecord {
            id,
            brand: self.brand,
            model: self.model,
            production_year: self.production_year,
            convertible: self.convertible,
        }
    }
}

/// One operator session against one store.
pub struct Session<S, C> {
    store: S,
    console: C,
}

impl<S: CarStore, C: Console> Session<S, C> {
    pub fn new(store: S, console: C) -> Self {
        Session { store, console }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn console(&mut self) -> &mut C {
        &mut self.console
    }

    #[cfg(test)]
    pub(crate) fn into_parts(self) -> (S, C) {
        (self.store, self.console)
    }

    pub fn say(&mut self, line: &str) {
        self.console.write_line(line);
    }

    /// Prompt once and validate. `report_invalid` decides whether a
    /// malformed answer is explained to the operator or dropped quietly
    /// like an empty one.
    fn ask<T>(
        &mut self,
        prompt: &str,
        validate: fn(&str) -> Validated<T>,
        report_invalid: bool,
    ) -> Result<Option<T>> {
        let raw = self.console.read_line(prompt)?;
        Ok(match validate(&raw) {
            Validated::Valid(value) => Some(value),
            Validated::Cancelled => None,
            Validated::Invalid(reason) => {
                log::debug!("{:?} rejected: {}", prompt, reason);
                if report_invalid {
                    self.say(&reason.to_string());
                }
                None
            }
        })
    }

    /// Brand, model, year and convertible flag, in that order. Stops at
    /// the first field that yields nothing.
    fn collect_details(&mut self) -> Result<Option<CarDetails>> {
        let Some(brand) = self.ask("Car brand (empty string to exit)", validate_name, true)? else {
            return Ok(None);
        };
        let Some(model) = self.ask("Car model (empty string to exit)", validate_name, true)? else {
            return Ok(None);
        };
        let Some(production_year) = self.ask(
            "Car production year (empty string to exit)",
            validate_production_year,
            false,
        )?
        else {
            return Ok(None);
        };
        let Some(convertible) = self.ask(
            "Is this car convertible? [y/n] (empty string to exit)",
            validate_convertible,
            false,
        )?
        else {
            return Ok(None);
        };
        Ok(Some(CarDetails {
            brand,
            model,
            production_year,
            convertible,
        }))
    }

    pub fn list_cars(&mut self) {
        match self.store.list() {
            Ok(cars) => {
                if cars.is_empty() {
                    self.say("*** Database is empty ***");
                } else {
                    self.say(&table_header());
                    for car in &cars {
                        self.say(&table_row(car));
                    }
                }
                self.say("");
            }
            Err(e) => self.say(&format!("Error retrieving cars: {}", e)),
        }
    }

    pub fn add_car(&mut self) -> Result<()> {
        let Some(id) = self.ask(ID_PROMPT, validate_identifier, false)? else {
            return Ok(());
        };
        match self.store.probe(Some(id)) {
            Probe::Absent(_) => {}
            Probe::Found => {
                self.say("Car ID already exists");
                return Ok(());
            }
            Probe::Unreachable => {
                self.say(SERVER_DOWN);
                return Ok(());
            }
        }

        let Some(details) = self.collect_details()? else {
            return Ok(());
        };
        let car = details.into_record(id);
        match self.store.create(&car) {
            Ok(()) => self.say("Car added successfully!"),
            Err(e) => self.say(&format!("Error adding car: {}", e)),
        }
        Ok(())
    }

    /// Any non-empty answer counts as an attempt; one that is not a valid
    /// identifier cannot name a stored car and is reported as not found.
    pub fn delete_car(&mut self) -> Result<()> {
        let raw = self.console.read_line(ID_PROMPT)?;
        if raw.is_empty() {
            return Ok(());
        }
        let Validated::Valid(id) = validate_identifier(&raw) else {
            self.say(NOT_FOUND);
            return Ok(());
        };
        match self.store.probe(Some(id)) {
            Probe::Found => {}
            Probe::Absent(_) => {
                self.say(NOT_FOUND);
                return Ok(());
            }
            Probe::Unreachable => {
                self.say(SERVER_DOWN);
                return Ok(());
            }
        }

        match self.store.delete(id) {
            Ok(()) => self.say("Success!"),
            Err(e) => self.say(&format!("Error deleting car: {}", e)),
        }
        Ok(())
    }

    /// Replaces the whole record; the identifier itself never changes.
    pub fn update_car(&mut self) -> Result<()> {
        let Some(id) = self.ask(ID_PROMPT, validate_identifier, false)? else {
            return Ok(());
        };
        match self.store.probe(Some(id)) {
            Probe::Found => {}
            Probe::Absent(status) => {
                log::info!("update of car {} skipped: store answered {}", id, status);
                return Ok(());
            }
            Probe::Unreachable => {
                self.say(SERVER_DOWN);
                return Ok(());
            }
        }

        let Some(details) = self.collect_details()? else {
            return Ok(());
        };
        let car = details.into_record(id);
        match self.store.replace(&car) {
            Ok(()) => self.say("Car updated successfully!"),
            Err(e) => self.say(&format!("Error updating car: {}", e)),
        }
        Ok(())
    }
}
