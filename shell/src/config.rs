use taskpad_core::task::{IdPolicy, StoreConfig, MAX_EVENT_CAPACITY};
use tracing::warn;

pub const ENV_ID_POLICY: &str = "TASKPAD_ID_POLICY";
pub const ENV_CONFIRM_DESTRUCTIVE: &str = "TASKPAD_CONFIRM_DESTRUCTIVE";
pub const ENV_EVENT_CAPACITY: &str = "TASKPAD_EVENT_CAPACITY";

const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Session settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub id_policy: IdPolicy,
    pub confirm_destructive: bool,
    pub event_capacity: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            id_policy: IdPolicy::default(),
            confirm_destructive: true,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl ShellConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source; unparsable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let id_policy = match lookup(ENV_ID_POLICY) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring {}: {}", ENV_ID_POLICY, e);
                defaults.id_policy
            }),
            None => defaults.id_policy,
        };

        let event_capacity = match lookup(ENV_EVENT_CAPACITY) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > MAX_EVENT_CAPACITY => {
                    warn!(
                        "Clamping {}={} to {}",
                        ENV_EVENT_CAPACITY, n, MAX_EVENT_CAPACITY
                    );
                    MAX_EVENT_CAPACITY
                }
                Ok(n) if n > 0 => n,
                _ => {
                    warn!("Ignoring {}={:?}", ENV_EVENT_CAPACITY, raw);
                    defaults.event_capacity
                }
            },
            None => defaults.event_capacity,
        };

        Self {
            id_policy,
            confirm_destructive: flag(
                lookup(ENV_CONFIRM_DESTRUCTIVE),
                defaults.confirm_destructive,
            ),
            event_capacity,
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            id_policy: self.id_policy,
            event_capacity: self.event_capacity,
        }
    }
}

fn flag(raw: Option<String>, default: bool) -> bool {
    match raw {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        None => default,
    }
}
