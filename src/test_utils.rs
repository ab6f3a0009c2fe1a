// In-memory doubles for the store and the operator console.
//
// `FakeStore` behaves like a small json-server: it keeps records keyed by
// id and answers 404 for unknown ids. Every call is recorded so tests can
// assert on exactly which remote requests were (or were not) issued.
// Single-threaded, so `RefCell`/`Cell` are enough for `&self` access.

use crate::api::{CarId, CarRecord, CarStore, Probe, StoreError};
use crate::ui::Console;
use anyhow::{anyhow, Result};
use reqwest::StatusCode;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Probe(Option<CarId>),
    List,
    Create(CarRecord),
    Replace(CarRecord),
    Delete(CarId),
}

pub struct FakeStore {
    cars: RefCell<BTreeMap<CarId, CarRecord>>,
    calls: RefCell<Vec<Call>>,
    reachable: Cell<bool>,
    probes_until_down: Cell<Option<usize>>,
    fail_writes: Cell<bool>,
}

impl Default for FakeStore {
    fn default() -> Self {
        Self {
            cars: RefCell::new(BTreeMap::new()),
            calls: RefCell::new(Vec::new()),
            reachable: Cell::new(true),
            probes_until_down: Cell::new(None),
            fail_writes: Cell::new(false),
        }
    }
}

impl FakeStore {
    pub fn with_cars(cars: impl IntoIterator<Item = CarRecord>) -> Self {
        let store = Self::default();
        store
            .cars
            .borrow_mut()
            .extend(cars.into_iter().map(|car| (car.id, car)));
        store
    }

    pub fn unreachable() -> Self {
        let store = Self::default();
        store.reachable.set(false);
        store
    }

    /// Answer `n` more probes, then behave as if the server died.
    pub fn go_down_after_probes(&self, n: usize) {
        self.probes_until_down.set(Some(n));
    }

    /// Make create/replace/delete fail with a 500.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn cars(&self) -> Vec<CarRecord> {
        self.cars.borrow().values().cloned().collect()
    }

    /// Calls that change remote state.
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Create(_) | Call::Replace(_) | Call::Delete(_)))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn guard_write(&self) -> Result<(), StoreError> {
        if !self.reachable.get() {
            return Err(unavailable());
        }
        if self.fail_writes.get() {
            return Err(StoreError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "write rejected".into(),
            });
        }
        Ok(())
    }
}

fn unavailable() -> StoreError {
    StoreError::Status {
        status: StatusCode::SERVICE_UNAVAILABLE,
        body: "store down".into(),
    }
}

fn not_found() -> StoreError {
    StoreError::Status {
        status: StatusCode::NOT_FOUND,
        body: "{}".into(),
    }
}

impl CarStore for FakeStore {
    fn probe(&self, id: Option<CarId>) -> Probe {
        self.record(Call::Probe(id));
        if let Some(left) = self.probes_until_down.get() {
            if left == 0 {
                self.reachable.set(false);
            } else {
                self.probes_until_down.set(Some(left - 1));
            }
        }
        if !self.reachable.get() {
            return Probe::Unreachable;
        }
        match id {
            None => Probe::Found,
            Some(id) if self.cars.borrow().contains_key(&id) => Probe::Found,
            Some(_) => Probe::Absent(StatusCode::NOT_FOUND),
        }
    }

    fn list(&self) -> Result<Vec<CarRecord>, StoreError> {
        self.record(Call::List);
        if !self.reachable.get() {
            return Err(unavailable());
        }
        Ok(self.cars())
    }

    fn create(&self, car: &CarRecord) -> Result<(), StoreError> {
        self.record(Call::Create(car.clone()));
        self.guard_write()?;
        let mut cars = self.cars.borrow_mut();
        if cars.contains_key(&car.id) {
            return Err(StoreError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "duplicate id".into(),
            });
        }
        cars.insert(car.id, car.clone());
        Ok(())
    }

    fn replace(&self, car: &CarRecord) -> Result<(), StoreError> {
        self.record(Call::Replace(car.clone()));
        self.guard_write()?;
        let mut cars = self.cars.borrow_mut();
        match cars.get_mut(&car.id) {
            Some(existing) => {
                *existing = car.clone();
                Ok(())
            }
            None => Err(not_found()),
        }
    }

    fn delete(&self, id: CarId) -> Result<(), StoreError> {
        self.record(Call::Delete(id));
        self.guard_write()?;
        match self.cars.borrow_mut().remove(&id) {
            Some(_) => Ok(()),
            None => Err(not_found()),
        }
    }
}

/// Console that replays canned answers and captures everything written.
#[derive(Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Answers not consumed by the code under test.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted answer for prompt {:?}", prompt))
    }

    fn write_line(&mut self, line: &str) {
        self.output.push(line.to_string());
    }
}
