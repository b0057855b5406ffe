use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Plot-ready view of a price series: values paired with display labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlotDataset {
    /// Legend text for the line (e.g. `BITCOIN Price (USD)`), when known.
    pub label: Option<String>,
    /// Time-of-day label for each point.
    pub labels: Vec<String>,
    /// The series values, unchanged and in input order.
    pub values: Vec<Decimal>,
}

impl PlotDataset {
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Local trend around point `index`: the next value minus the previous one.
    ///
    /// `None` for the first and last points, which lack a neighbour on one side.
    #[must_use]
    pub fn slope_at(&self, index: usize) -> Option<Decimal> {
        let prev = self.values.get(index.checked_sub(1)?)?;
        let next = self.values.get(index.checked_add(1)?)?;
        Some(*next - *prev)
    }
}

/// Output of the series aligner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alignment {
    pub dataset: PlotDataset,
    /// Price one calendar day before the latest sample, drawn as the chart's baseline.
    pub baseline: Option<Decimal>,
    /// When the alignment was produced.
    pub generated_at: DateTime<Utc>,
}
