//! Concurrent metric registry.
//!
//! One readers-writer lock guards the key map, the family map, and the
//! insertion-ordered name list as a single consistency domain. Lookups after
//! warm-up take the shared lock only; creation follows the double-checked
//! slow path, so for a fixed key the initializer runs exactly once and every
//! concurrent caller converges on the same `Arc<MetricState>`. Updates to a
//! published state's atomic cells never touch this lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::{Error, Result};
use crate::label::{make_key, LabelSet};
use crate::state::{MetricKind, MetricState, MetricValue};

/// A name plus declared metadata and the insertion-ordered series sharing
/// that name. Kind, help, and unit are fixed by the first creation.
pub struct MetricFamily {
    name: String,
    help: Option<String>,
    unit: Option<String>,
    kind: MetricKind,
    metrics: Vec<Arc<MetricState>>,
}

impl MetricFamily {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    /// Series in creation order, each with a distinct label set.
    pub fn metrics(&self) -> &[Arc<MetricState>] {
        &self.metrics
    }
}

/// Boundary contract for wire-format encoders (text exposition and friends).
/// The registry reports a failed family by name; encoding must not mutate
/// metric state.
pub trait FamilyEncoder {
    fn encode(
        &mut self,
        family: &MetricFamily,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

#[derive(Default)]
struct Inner {
    /// (name, label-values) key -> series.
    states: HashMap<String, Arc<MetricState>>,
    families: HashMap<String, MetricFamily>,
    /// Family names in first-seen order; drives export ordering.
    names: Vec<String>,
}

/// Concurrency-safe name -> state map grouping series into families.
#[derive(Default)]
pub struct Registry {
    inner: RwLock<Inner>,
    sort_names: AtomicBool,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Export families in lexicographic name order instead of first-seen
    /// order. Off by default.
    pub fn set_sort_names(&self, on: bool) {
        self.sort_names.store(on, Ordering::Relaxed);
    }

    /// Resolve the series for this exact (name, label-values) identity,
    /// creating it exactly once if absent.
    ///
    /// `init` allocates the kind-specific cells and runs at most once per
    /// key, under the exclusive lock. Re-declaring an existing family under
    /// a different kind is an error; the family is never redefined.
    pub fn demand<F>(
        &self,
        name: &str,
        help: Option<&str>,
        unit: Option<&str>,
        labels: &LabelSet,
        kind: MetricKind,
        init: F,
    ) -> Result<Arc<MetricState>>
    where
        F: FnOnce() -> Result<MetricValue>,
    {
        let key = make_key(name, labels);

        // Fast path: shared lock only. The majority of calls after warm-up.
        {
            let inner = self.inner.read().map_err(|_| Error::LockPoisoned)?;
            if let Some(state) = inner.states.get(&key) {
                return checked(state, name, kind);
            }
        }

        // Slow path: re-check under the exclusive lock, then create.
        let mut inner = self.inner.write().map_err(|_| Error::LockPoisoned)?;
        if let Some(state) = inner.states.get(&key) {
            return checked(state, name, kind);
        }

        if let Some(family) = inner.families.get(name) {
            if family.kind != kind {
                return Err(Error::KindMismatch {
                    name: name.to_string(),
                    existing: family.kind,
                    requested: kind,
                });
            }
        }

        // The initializer runs before anything is registered: a rejected
        // configuration must not leave an empty family behind in the export
        // or fix the name's kind without ever producing a state.
        let state = Arc::new(MetricState::new(labels.clone(), init()?));

        if !inner.families.contains_key(name) {
            inner.names.push(name.to_string());
            inner.families.insert(
                name.to_string(),
                MetricFamily {
                    name: name.to_string(),
                    help: help.map(str::to_string),
                    unit: unit.map(str::to_string),
                    kind,
                    metrics: Vec::new(),
                },
            );
        }
        if let Some(family) = inner.families.get_mut(name) {
            family.metrics.push(state.clone());
        }
        inner.states.insert(key, state.clone());
        Ok(state)
    }

    /// Serialize every family through `encoder`, best-effort: a failing
    /// family is logged and skipped, the remaining families are still
    /// attempted, and the first failure is returned at the end.
    pub fn encode(&self, encoder: &mut dyn FamilyEncoder) -> Result<()> {
        self.encode_inner(encoder, false)
    }

    /// Serialize every family, aborting on the first failure.
    pub fn encode_strict(&self, encoder: &mut dyn FamilyEncoder) -> Result<()> {
        self.encode_inner(encoder, true)
    }

    fn encode_inner(&self, encoder: &mut dyn FamilyEncoder, strict: bool) -> Result<()> {
        let inner = self.inner.read().map_err(|_| Error::LockPoisoned)?;
        let mut names: Vec<&String> = inner.names.iter().collect();
        if self.sort_names.load(Ordering::Relaxed) {
            names.sort();
        }
        let mut first_err = None;
        for name in names {
            let Some(family) = inner.families.get(name) else {
                continue;
            };
            if let Err(source) = encoder.encode(family) {
                let err = Error::Encode {
                    family: name.clone(),
                    source,
                };
                if strict {
                    return Err(err);
                }
                tracing::warn!(family = %name, error = %err, "family skipped during export");
                if first_err.is_none() {
                    first_err = Some(err);
                }
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Kind check shared by both lookup paths: a hit under the wrong kind is a
/// misuse report, never a silent redefinition.
fn checked(state: &Arc<MetricState>, name: &str, kind: MetricKind) -> Result<Arc<MetricState>> {
    if state.kind() == kind {
        Ok(state.clone())
    } else {
        Err(Error::KindMismatch {
            name: name.to_string(),
            existing: state.kind(),
            requested: kind,
        })
    }
}
