//! Render state shared by the chart and the table

use serde::Serialize;

/// What a presentation sink should show
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum View<T> {
    /// A fetch is in flight
    Loading,
    /// Nothing to show (empty input or too few records)
    NoData,
    /// A non-empty series
    Ready(T),
}

impl<T> View<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for View<T> {
    fn default() -> Self {
        Self::NoData
    }
}
