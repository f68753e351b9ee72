//! Chart-ready tables for the violations dashboard.
//!
//! Builds the data behind the fixed set of dashboard charts: four fine-amount
//! histograms over weekday/month and five per-state mean metrics rendered as
//! a choropleth and a bar chart each. Styling and layout belong to whoever
//! consumes the serialized [`Dashboard`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analyzers::types::StateSummary;
use crate::analyzers::utility::Accumulator;
use crate::features::{AugmentedRecord, MONTH_ORDER, WEEKDAY_ORDER, weekday_name};
use crate::record::{MonetaryField, ViolationRecord};

pub const DASHBOARD_TITLE: &str = "Open Parking and Camera Violation";

/// Discrete colors assigned to histogram groups, in order.
pub const PALETTE: [&str; 14] = [
    "red", "blue", "green", "black", "gray", "#00FF98", "#00E1FF", "#C8FF00", "#0021FF",
    "#E600FF", "#FF002E", "#FFF300", "#37FF00", "#00FFFA",
];

/// Calendar axis a histogram bins on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarAxis {
    DayOfWeek,
    Month,
}

impl CalendarAxis {
    pub fn label(self) -> &'static str {
        match self {
            CalendarAxis::DayOfWeek => "Day of the Week",
            CalendarAxis::Month => "Month",
        }
    }

    /// Every category of the axis in calendar order.
    pub fn categories(self) -> Vec<&'static str> {
        match self {
            CalendarAxis::DayOfWeek => WEEKDAY_ORDER.iter().map(|d| weekday_name(*d)).collect(),
            CalendarAxis::Month => MONTH_ORDER.iter().map(|m| m.name()).collect(),
        }
    }

    fn bin(self, record: &AugmentedRecord) -> usize {
        match self {
            CalendarAxis::DayOfWeek => record.features.day_of_week.num_days_from_monday() as usize,
            CalendarAxis::Month => record.features.month.number_from_month() as usize - 1,
        }
    }
}

/// Text column used to split a histogram into colored groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Violation,
    LicenseType,
    IssuingAgency,
}

impl GroupBy {
    pub fn label(self) -> &'static str {
        match self {
            GroupBy::Violation => "Violation",
            GroupBy::LicenseType => "License Type",
            GroupBy::IssuingAgency => "Issuing Agency",
        }
    }

    fn value(self, record: &ViolationRecord) -> &str {
        match self {
            GroupBy::Violation => &record.violation,
            GroupBy::LicenseType => &record.license_type,
            GroupBy::IssuingAgency => &record.issuing_agency,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistFunc {
    Sum,
    Avg,
}

/// Definition of one fine-amount histogram.
#[derive(Debug, Clone, Copy)]
pub struct HistogramSpec {
    pub title: &'static str,
    pub axis: CalendarAxis,
    pub group_by: GroupBy,
    pub func: HistFunc,
}

pub const HISTOGRAMS: [HistogramSpec; 4] = [
    HistogramSpec {
        title: "Fine Amount per Day and Violation",
        axis: CalendarAxis::DayOfWeek,
        group_by: GroupBy::Violation,
        func: HistFunc::Sum,
    },
    HistogramSpec {
        title: "Fine Amount per Month and Violation",
        axis: CalendarAxis::Month,
        group_by: GroupBy::Violation,
        func: HistFunc::Avg,
    },
    HistogramSpec {
        title: "Fine Amount per Day and Licence Type",
        axis: CalendarAxis::DayOfWeek,
        group_by: GroupBy::LicenseType,
        func: HistFunc::Sum,
    },
    HistogramSpec {
        title: "Fine Amount per Day and Issuing Agency",
        axis: CalendarAxis::DayOfWeek,
        group_by: GroupBy::IssuingAgency,
        func: HistFunc::Sum,
    },
];

/// One colored group of a histogram: a value per axis category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color_label: String,
    pub histfunc: HistFunc,
    pub categories: Vec<&'static str>,
    pub series: Vec<HistogramSeries>,
}

impl Histogram {
    /// Bins the fine amount of every record by calendar category and group.
    ///
    /// Sums count absent fines as nothing and are zero for empty bins;
    /// averages are `None` for bins without a present fine.
    pub fn build(spec: &HistogramSpec, records: &[AugmentedRecord]) -> Self {
        let categories = spec.axis.categories();
        let mut groups: BTreeMap<&str, Vec<Accumulator>> = BTreeMap::new();

        for record in records {
            let bins = groups
                .entry(spec.group_by.value(&record.record))
                .or_insert_with(|| vec![Accumulator::default(); categories.len()]);
            bins[spec.axis.bin(record)].push(record.record.fine_amount);
        }

        let series = groups
            .into_iter()
            .map(|(name, bins)| HistogramSeries {
                name: name.to_string(),
                values: bins
                    .iter()
                    .map(|acc| match spec.func {
                        HistFunc::Sum => Some(acc.total()),
                        HistFunc::Avg => acc.mean(),
                    })
                    .collect(),
            })
            .collect();

        Histogram {
            title: spec.title.to_string(),
            x_label: spec.axis.label().to_string(),
            y_label: MonetaryField::Fine.column().to_string(),
            color_label: spec.group_by.label().to_string(),
            histfunc: spec.func,
            categories,
            series,
        }
    }
}

/// Continuous color scale paired with each monetary field's state charts.
pub fn color_scale(field: MonetaryField) -> &'static str {
    match field {
        MonetaryField::Fine => "Cividis",
        MonetaryField::Penalty => "Viridis",
        MonetaryField::Interest => "Inferno",
        MonetaryField::Reduction => "Plasma",
        MonetaryField::Payment => "Turbo",
    }
}

/// Per-state mean of one monetary field, shown as a choropleth and a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateMetric {
    pub title: String,
    pub column: String,
    pub color_scale: &'static str,
    pub states: Vec<String>,
    pub values: Vec<Option<f64>>,
}

impl StateMetric {
    pub fn build(field: MonetaryField, summaries: &[StateSummary]) -> Self {
        let column = format!("Mean {}", field.column());
        StateMetric {
            title: format!("State {column}"),
            column,
            color_scale: color_scale(field),
            states: summaries.iter().map(|s| s.state.clone()).collect(),
            values: summaries.iter().map(|s| s.field(field).mean).collect(),
        }
    }
}

/// Everything the presentation layer needs to draw the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub title: &'static str,
    pub palette: Vec<&'static str>,
    pub histograms: Vec<Histogram>,
    pub state_metrics: Vec<StateMetric>,
}

impl Dashboard {
    pub fn build(records: &[AugmentedRecord], summaries: &[StateSummary]) -> Self {
        Dashboard {
            title: DASHBOARD_TITLE,
            palette: PALETTE.to_vec(),
            histograms: HISTOGRAMS
                .iter()
                .map(|spec| Histogram::build(spec, records))
                .collect(),
            state_metrics: MonetaryField::ALL
                .iter()
                .map(|field| StateMetric::build(*field, summaries))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::aggregate::aggregate_by_state;
    use crate::features::{DatePolicy, derive_features};
    use crate::record::tests::record;

    fn sample() -> Vec<AugmentedRecord> {
        let mut rows = vec![
            // Monday, January
            record("2024-01-01T10:00:00", "NY", Some(65.0)),
            record("2024-01-01T11:00:00", "NY", None),
            // Thursday, July
            record("2024-07-04T00:00:00", "NJ", Some(115.0)),
            // Sunday, December
            record("2023-12-31T09:00:00", "NY", Some(35.0)),
        ];
        rows[2].violation = "FAIL TO STOP AT RED LIGHT".to_string();
        rows[3].license_type = "COM".to_string();
        derive_features(rows, DatePolicy::Abort).unwrap()
    }

    fn series<'a>(h: &'a Histogram, name: &str) -> &'a HistogramSeries {
        h.series.iter().find(|s| s.name == name).unwrap()
    }

    #[test]
    fn test_weekday_sum_histogram() {
        let h = Histogram::build(&HISTOGRAMS[0], &sample());

        assert_eq!(h.categories.len(), 7);
        assert_eq!(h.categories[0], "Monday");
        assert_eq!(h.x_label, "Day of the Week");
        assert_eq!(h.color_label, "Violation");

        let cleaning = series(&h, "NO PARKING-STREET CLEANING");
        assert_eq!(cleaning.values[0], Some(65.0));
        assert_eq!(cleaning.values[3], Some(0.0));
        assert_eq!(cleaning.values[6], Some(35.0));

        let red_light = series(&h, "FAIL TO STOP AT RED LIGHT");
        assert_eq!(red_light.values[3], Some(115.0));
    }

    #[test]
    fn test_month_avg_histogram() {
        let h = Histogram::build(&HISTOGRAMS[1], &sample());

        assert_eq!(h.histfunc, HistFunc::Avg);
        assert_eq!(h.categories.len(), 12);
        assert_eq!(h.categories[11], "December");

        let cleaning = series(&h, "NO PARKING-STREET CLEANING");
        // January has one present fine and one absent one.
        assert_eq!(cleaning.values[0], Some(65.0));
        assert_eq!(cleaning.values[1], None);
        assert_eq!(cleaning.values[11], Some(35.0));
    }

    #[test]
    fn test_series_sorted_by_group() {
        let h = Histogram::build(&HISTOGRAMS[2], &sample());
        let names: Vec<_> = h.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["COM", "PAS"]);
    }

    #[test]
    fn test_state_metric_follows_summary_order() {
        let records = sample();
        let summaries = aggregate_by_state(&records);
        let metric = StateMetric::build(MonetaryField::Fine, &summaries);

        assert_eq!(metric.title, "State Mean Fine Amount");
        assert_eq!(metric.color_scale, "Cividis");
        assert_eq!(metric.states, vec!["NJ", "NY"]);
        assert_eq!(metric.values, vec![Some(115.0), Some(50.0)]);

        let penalty = StateMetric::build(MonetaryField::Penalty, &summaries);
        assert_eq!(penalty.values, vec![None, None]);
    }

    #[test]
    fn test_dashboard_contains_every_chart() {
        let records = sample();
        let summaries = aggregate_by_state(&records);
        let dashboard = Dashboard::build(&records, &summaries);

        assert_eq!(dashboard.histograms.len(), 4);
        assert_eq!(dashboard.state_metrics.len(), 5);
        assert_eq!(dashboard.palette.len(), 14);

        let json = serde_json::to_value(&dashboard).unwrap();
        assert_eq!(json["title"], DASHBOARD_TITLE);
        assert_eq!(json["histograms"][1]["histfunc"], "avg");
        assert_eq!(json["state_metrics"][4]["color_scale"], "Turbo");
    }
}
