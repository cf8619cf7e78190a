use std::fmt::Display;

use serde::{Deserialize, Deserializer};

/// Monitoring state of a host. Codes outside 0–2 are kept as [`HostState::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    Up,
    Down,
    Unreachable,
    Other(i64),
}

impl HostState {
    pub fn code(&self) -> i64 {
        match self {
            HostState::Up => 0,
            HostState::Down => 1,
            HostState::Unreachable => 2,
            HostState::Other(code) => *code,
        }
    }

    pub fn is_problem(&self) -> bool {
        self.code() != 0
    }
}

impl From<i64> for HostState {
    fn from(code: i64) -> Self {
        match code {
            0 => HostState::Up,
            1 => HostState::Down,
            2 => HostState::Unreachable,
            other => HostState::Other(other),
        }
    }
}

impl<'de> Deserialize<'de> for HostState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(HostState::from)
    }
}

impl Display for HostState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostState::Up => f.pad("UP"),
            HostState::Down => f.pad("DOWN"),
            HostState::Unreachable => f.pad("UNREACHABLE"),
            HostState::Other(code) => f.pad(&format!("STATE({})", code)),
        }
    }
}

/// Monitoring state of a service. Codes outside 0–3 are kept as [`ServiceState::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Ok,
    Warning,
    Critical,
    Unknown,
    Other(i64),
}

impl ServiceState {
    pub fn code(&self) -> i64 {
        match self {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Critical => 2,
            ServiceState::Unknown => 3,
            ServiceState::Other(code) => *code,
        }
    }

    pub fn is_problem(&self) -> bool {
        self.code() != 0
    }
}

impl From<i64> for ServiceState {
    fn from(code: i64) -> Self {
        match code {
            0 => ServiceState::Ok,
            1 => ServiceState::Warning,
            2 => ServiceState::Critical,
            3 => ServiceState::Unknown,
            other => ServiceState::Other(other),
        }
    }
}

impl<'de> Deserialize<'de> for ServiceState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(ServiceState::from)
    }
}

impl Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceState::Ok => f.pad("OK"),
            ServiceState::Warning => f.pad("WARN"),
            ServiceState::Critical => f.pad("CRIT"),
            ServiceState::Unknown => f.pad("UNKNOWN"),
            ServiceState::Other(code) => f.pad(&format!("STATE({})", code)),
        }
    }
}
