use std::sync::{
    atomic::{AtomicU8, Ordering},
    Arc,
};

use arc_swap::ArcSwapOption;
use configs::{LaunchArgs, ModelConfig};
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{
    errors::StateError,
    key::{StateKey, StateValue},
    snapshot::StateSnapshot,
    status::ModelStatus,
};

/// Process-wide state of the backend.
///
/// Construct once at startup and share it by `Arc`. Every slot is updated on
/// its own: a reader may see one slot already changed and another not yet.
pub struct ProcessState<M> {
    args: ArcSwapOption<LaunchArgs>,
    model: ArcSwapOption<M>,
    model_status: AtomicU8,
    model_config: ArcSwapOption<ModelConfig>,
    custom: DashMap<String, serde_json::Value>,
}

impl<M> Default for ProcessState<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> ProcessState<M> {
    /// Empty state with the model marked offline.
    pub fn new() -> Self {
        Self {
            args: ArcSwapOption::empty(),
            model: ArcSwapOption::empty(),
            model_status: AtomicU8::new(ModelStatus::Offline.code()),
            model_config: ArcSwapOption::empty(),
            custom: DashMap::new(),
        }
    }

    /// Drop every stored value and mark the model offline again.
    pub fn reset(&self) {
        self.args.store(None);
        self.model.store(None);
        self.model_config.store(None);
        self.custom.clear();
        self.model_status.store(ModelStatus::Offline.code(), Ordering::Release);
        info!("process state reset");
    }

    /// Store `value` in the slot it names, replacing what was there.
    pub fn set(&self, value: StateValue<M>) {
        match value {
            StateValue::Args(args) => self.set_args(args),
            StateValue::Model(model) => self.set_model(model),
            StateValue::ModelStatus(status) => {
                self.set_model_status(status);
            }
            StateValue::ModelConfig(cfg) => self.set_model_config(cfg),
            StateValue::Custom(name, value) => self.set_custom(name, value),
        }
    }

    /// Read the slot named by `key`; `None` when nothing is stored there.
    pub fn get(&self, key: &StateKey) -> Option<StateValue<M>> {
        match key {
            StateKey::Args => self.args().map(StateValue::Args),
            StateKey::Model => self.model().map(StateValue::Model),
            StateKey::ModelStatus => Some(StateValue::ModelStatus(self.model_status())),
            StateKey::ModelConfig => self.model_config().map(StateValue::ModelConfig),
            StateKey::Custom(name) => self
                .custom(name)
                .map(|value| StateValue::Custom(name.clone(), value)),
        }
    }

    pub fn args(&self) -> Option<Arc<LaunchArgs>> {
        self.args.load_full()
    }

    pub fn set_args(&self, args: impl Into<Arc<LaunchArgs>>) {
        let args = args.into();
        debug!(key = "args", bind = %args.bind_addr(), "state slot set");
        self.args.store(Some(args));
    }

    pub fn model(&self) -> Option<Arc<M>> {
        self.model.load_full()
    }

    pub fn set_model(&self, model: impl Into<Arc<M>>) {
        self.model.store(Some(model.into()));
        debug!(key = "model", "state slot set");
    }

    /// Remove the model handle and return it, if one was stored.
    ///
    /// The status is left untouched; callers unloading a model set it
    /// themselves.
    pub fn clear_model(&self) -> Option<Arc<M>> {
        let previous = self.model.swap(None);
        if previous.is_some() {
            debug!(key = "model", "state slot cleared");
        }
        previous
    }

    pub fn model_status(&self) -> ModelStatus {
        let code = self.model_status.load(Ordering::Acquire);
        // Only valid codes are ever stored.
        ModelStatus::from_code(code).unwrap_or_default()
    }

    /// Set the status and return the previous one. Any transition is allowed.
    pub fn set_model_status(&self, status: ModelStatus) -> ModelStatus {
        let code = self.model_status.swap(status.code(), Ordering::AcqRel);
        let previous = ModelStatus::from_code(code).unwrap_or_default();
        if previous != status {
            info!(from = %previous, to = %status, "model status changed");
        }
        previous
    }

    pub fn model_config(&self) -> Option<Arc<ModelConfig>> {
        self.model_config.load_full()
    }

    pub fn set_model_config(&self, cfg: impl Into<Arc<ModelConfig>>) {
        let cfg = cfg.into();
        if let Err(e) = cfg.validate() {
            warn!(error = %e, "storing model config that fails validation");
        }
        debug!(key = "model_config", max_tokens = cfg.max_tokens, "state slot set");
        self.model_config.store(Some(cfg));
    }

    pub fn custom(&self, name: &str) -> Option<serde_json::Value> {
        self.custom.get(name).map(|entry| entry.value().clone())
    }

    /// Insert or replace a custom entry.
    ///
    /// Names of the typed slots are reserved; such a write is dropped with a
    /// warning and the typed slot is left as it was.
    pub fn set_custom(&self, name: impl Into<String>, value: impl Into<serde_json::Value>) {
        let name = name.into();
        if StateKey::is_well_known(&name) {
            warn!(key = %name, "ignoring custom entry under a reserved slot name");
            return;
        }
        debug!(key = %name, "custom state entry set");
        self.custom.insert(name, value.into());
    }

    /// Remove a custom entry; returns whether it existed.
    pub fn remove_custom(&self, name: &str) -> bool {
        self.custom.remove(name).is_some()
    }

    /// Decode a custom entry into `T`. `Ok(None)` when the entry is absent.
    pub fn custom_as<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, StateError> {
        match self.custom(name) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Names of the custom entries, sorted.
    pub fn custom_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.custom.iter().map(|entry| entry.key().clone()).collect();
        keys.sort();
        keys
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            status: self.model_status(),
            pid: std::process::id(),
            model_loaded: self.model.load().is_some(),
            model_config: self.model_config().map(|cfg| (*cfg).clone()),
            args: self.args().map(|args| (*args).clone()),
            custom_keys: self.custom_keys(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeModel {
        name: &'static str,
    }

    #[test]
    fn new_state_is_offline_and_empty() {
        let state = ProcessState::<FakeModel>::new();
        assert_eq!(state.model_status(), ModelStatus::Offline);
        assert!(state.args().is_none());
        assert!(state.model().is_none());
        assert!(state.model_config().is_none());
        assert!(state.custom_keys().is_empty());
    }

    #[test]
    fn set_model_status_returns_previous() {
        let state = ProcessState::<FakeModel>::new();
        assert_eq!(state.set_model_status(ModelStatus::Loading), ModelStatus::Offline);
        assert_eq!(state.set_model_status(ModelStatus::Working), ModelStatus::Loading);
        // no transition rules: straight back to loading is fine
        assert_eq!(state.set_model_status(ModelStatus::Loading), ModelStatus::Working);
        assert_eq!(state.model_status(), ModelStatus::Loading);
    }

    #[test]
    fn clear_model_hands_back_the_handle() {
        let state = ProcessState::<FakeModel>::new();
        state.set_model(FakeModel { name: "rwkv-4-world" });
        let model = state.clear_model().map(|m| m.name);
        assert_eq!(model, Some("rwkv-4-world"));
        assert!(state.model().is_none());
        assert!(state.clear_model().is_none());
    }

    #[test]
    fn custom_as_decodes_or_reports() {
        let state = ProcessState::<FakeModel>::new();
        state.set_custom("device", "cuda:0");
        state.set_custom("threads", 8);

        let device: Option<String> = state.custom_as("device").ok().flatten();
        assert_eq!(device.as_deref(), Some("cuda:0"));
        let threads: Option<u32> = state.custom_as("threads").ok().flatten();
        assert_eq!(threads, Some(8));
        assert!(matches!(state.custom_as::<u32>("device"), Err(StateError::Json(_))));
        assert!(matches!(state.custom_as::<u32>("missing"), Ok(None)));

        assert!(state.remove_custom("device"));
        assert!(!state.remove_custom("device"));
        assert_eq!(state.custom_keys(), vec!["threads".to_string()]);
    }

    #[test]
    fn reserved_names_stay_out_of_custom_map() {
        let state = ProcessState::<FakeModel>::new();
        state.set_custom("model", 42);
        state.set(StateValue::custom("model_status", 3));

        assert!(state.get(&StateKey::from("model")).is_none());
        assert!(state.custom("model").is_none());
        assert!(state.custom_keys().is_empty());
        assert_eq!(state.model_status(), ModelStatus::Offline);
        assert!(state.snapshot().custom_keys.is_empty());
    }

    #[test]
    fn snapshot_reflects_slots() {
        let state = ProcessState::<FakeModel>::new();
        state.set_custom("b", 1);
        state.set_custom("a", 2);
        state.set_model(FakeModel { name: "m" });
        state.set_model_status(ModelStatus::Working);

        let snap = state.snapshot();
        assert_eq!(snap.status, ModelStatus::Working);
        assert!(snap.model_loaded);
        assert!(snap.model_config.is_none());
        assert_eq!(snap.custom_keys, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(snap.pid, std::process::id());
    }
}
