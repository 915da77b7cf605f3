/*
 * Parameter Store Module
 *
 * ParameterStore owns the live SimulationParams on behalf of the UI. Writes are
 * clamped, saved to the parameter file (when one is attached) and then broadcast
 * synchronously to the listeners registered for that parameter. The simulation
 * core only ever reads the values.
 */

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::params::{ParamName, SimulationParams};
use crate::persistence;

type Listener = Box<dyn FnMut(f32)>;

#[derive(Default)]
pub struct ParameterStore {
    params: SimulationParams,
    path: Option<PathBuf>,
    listeners: HashMap<ParamName, Vec<Listener>>,
}

impl fmt::Debug for ParameterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterStore")
            .field("params", &self.params)
            .field("path", &self.path)
            .field("listeners", &self.listeners.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

impl ParameterStore {
    /// In-memory store, nothing persisted.
    pub fn new(params: SimulationParams) -> Self {
        Self {
            params: params.sanitized(),
            path: None,
            listeners: HashMap::new(),
        }
    }

    /// Store backed by a parameter file. An unreadable file is logged and replaced
    /// by the defaults on the next write.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let params = persistence::load(&path).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "could not read parameter file, using defaults");
            SimulationParams::default()
        });
        Self {
            params,
            path: Some(path),
            listeners: HashMap::new(),
        }
    }

    pub fn values(&self) -> &SimulationParams {
        &self.params
    }

    pub fn get(&self, name: ParamName) -> f32 {
        self.params.get(name)
    }

    /// Clamp and store `value`, persist the snapshot and notify listeners of `name`.
    /// Returns the stored value.
    pub fn set(&mut self, name: ParamName, value: f32) -> f32 {
        let value = self.params.set(name, value);

        if let Some(path) = &self.path {
            if let Err(err) = persistence::save(path, &self.params) {
                warn!(path = %path.display(), error = %err, "failed to save parameters");
            }
        }

        if let Some(listeners) = self.listeners.get_mut(&name) {
            for listener in listeners.iter_mut() {
                listener(value);
            }
        }
        value
    }

    /// Shift a parameter by `delta`, clamped like any other write.
    pub fn adjust(&mut self, name: ParamName, delta: f32) -> f32 {
        self.set(name, self.get(name) + delta)
    }

    /// Register a listener called with the new value after every write to `name`.
    pub fn on_change(&mut self, name: ParamName, listener: impl FnMut(f32) + 'static) {
        self.listeners.entry(name).or_default().push(Box::new(listener));
    }

    /// Write every value of `params` through `set`, so listeners fire for changed ones.
    pub fn replace_all(&mut self, params: &SimulationParams) {
        for name in ParamName::ALL {
            if self.get(name) != params.get(name) {
                self.set(name, params.get(name));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::tempdir;

    #[test]
    fn listeners_fire_for_their_parameter_only() {
        let mut store = ParameterStore::default();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        store.on_change(ParamName::NumBoids, move |value| sink.borrow_mut().push(value));

        store.set(ParamName::CohesionWeight, 2.0);
        store.set(ParamName::NumBoids, 250.0);
        store.set(ParamName::NumBoids, 5000.0);

        assert_eq!(*seen.borrow(), vec![250.0, 2000.0]);
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let mut store = ParameterStore::default();
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in 0..3 {
            let order = Rc::clone(&order);
            store.on_change(ParamName::MaxSpeed, move |_| order.borrow_mut().push(tag));
        }
        store.set(ParamName::MaxSpeed, 200.0);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn adjust_clamps_pointer_radius() {
        let mut store = ParameterStore::default();
        assert_eq!(store.adjust(ParamName::PointerRadius, 50.0), 150.0);
        assert_eq!(store.adjust(ParamName::PointerRadius, -1000.0), 10.0);
        assert_eq!(store.adjust(ParamName::PointerRadius, 10_000.0), 500.0);
    }

    #[test]
    fn writes_persist_to_the_attached_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.json");

        let mut store = ParameterStore::open(&path);
        assert_eq!(store.values(), &SimulationParams::default());
        store.set(ParamName::PredatorSpeed, 420.0);

        let reopened = ParameterStore::open(&path);
        assert_eq!(reopened.get(ParamName::PredatorSpeed), 420.0);
    }

    #[test]
    fn unreadable_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.json");
        std::fs::write(&path, "{{{").unwrap();

        let store = ParameterStore::open(&path);
        assert_eq!(store.values(), &SimulationParams::default());
    }

    #[test]
    fn replace_all_notifies_changed_values() {
        let mut store = ParameterStore::default();
        let hits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&hits);
        store.on_change(ParamName::AlignmentWeight, move |_| *counter.borrow_mut() += 1);

        let mut next = store.values().clone();
        next.alignment_weight = 3.0;
        store.replace_all(&next);
        store.replace_all(&next);

        assert_eq!(*hits.borrow(), 1);
        assert_eq!(store.values(), &next);
    }
}
