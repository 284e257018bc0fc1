use std::{convert::Infallible, fmt, str::FromStr, sync::Arc};

use configs::{LaunchArgs, ModelConfig};

use crate::status::ModelStatus;

pub const ARGS: &str = "args";
pub const MODEL: &str = "model";
pub const MODEL_STATUS: &str = "model_status";
pub const MODEL_CONFIG: &str = "model_config";

/// Name of a state slot.
///
/// Parsing a string maps the well-known names to their typed slots and every
/// other name to `Custom`. Well-known names are reserved: the custom map never
/// holds an entry under them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StateKey {
    Args,
    Model,
    ModelStatus,
    ModelConfig,
    Custom(String),
}

impl StateKey {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Args => ARGS,
            Self::Model => MODEL,
            Self::ModelStatus => MODEL_STATUS,
            Self::ModelConfig => MODEL_CONFIG,
            Self::Custom(name) => name,
        }
    }

    /// True for the names of the typed slots.
    pub fn is_well_known(name: &str) -> bool {
        matches!(name, ARGS | MODEL | MODEL_STATUS | MODEL_CONFIG)
    }
}

impl From<&str> for StateKey {
    fn from(name: &str) -> Self {
        match name {
            ARGS => Self::Args,
            MODEL => Self::Model,
            MODEL_STATUS => Self::ModelStatus,
            MODEL_CONFIG => Self::ModelConfig,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl FromStr for StateKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value together with the slot it is stored in.
///
/// `M` is the model handle type chosen by the hosting application.
pub enum StateValue<M> {
    Args(Arc<LaunchArgs>),
    Model(Arc<M>),
    ModelStatus(ModelStatus),
    ModelConfig(Arc<ModelConfig>),
    Custom(String, serde_json::Value),
}

impl<M> StateValue<M> {
    pub fn key(&self) -> StateKey {
        match self {
            Self::Args(_) => StateKey::Args,
            Self::Model(_) => StateKey::Model,
            Self::ModelStatus(_) => StateKey::ModelStatus,
            Self::ModelConfig(_) => StateKey::ModelConfig,
            Self::Custom(name, _) => StateKey::from(name.as_str()),
        }
    }

    pub fn custom(name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self::Custom(name.into(), value.into())
    }
}

// `M` itself need not be Clone or Debug.
impl<M> Clone for StateValue<M> {
    fn clone(&self) -> Self {
        match self {
            Self::Args(args) => Self::Args(Arc::clone(args)),
            Self::Model(model) => Self::Model(Arc::clone(model)),
            Self::ModelStatus(status) => Self::ModelStatus(*status),
            Self::ModelConfig(cfg) => Self::ModelConfig(Arc::clone(cfg)),
            Self::Custom(name, value) => Self::Custom(name.clone(), value.clone()),
        }
    }
}

impl<M> fmt::Debug for StateValue<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Args(args) => f.debug_tuple("Args").field(args).finish(),
            Self::Model(_) => f.write_str("Model(..)"),
            Self::ModelStatus(status) => f.debug_tuple("ModelStatus").field(status).finish(),
            Self::ModelConfig(cfg) => f.debug_tuple("ModelConfig").field(cfg).finish(),
            Self::Custom(name, value) => f.debug_tuple("Custom").field(name).field(value).finish(),
        }
    }
}
