use violations_summary::analyzers::figures::Dashboard;
use violations_summary::config::Config;
use violations_summary::features::{DatePolicy, rederive};
use violations_summary::pipeline::{build_tables, initialize};
use violations_summary::record::MonetaryField;

#[test]
fn test_full_pipeline() {
    let config = Config {
        source: concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample_violations.csv")
            .to_string(),
        date_policy: DatePolicy::Abort,
    };
    let tables = initialize(&config).expect("Failed to load sample violations");

    assert_eq!(tables.records.len(), 7);

    let states: Vec<_> = tables.summaries.iter().map(|s| s.state.as_str()).collect();
    assert_eq!(states, vec!["99", "CT", "NJ", "NY"]);

    let total: usize = tables.summaries.iter().map(|s| s.violations).sum();
    assert_eq!(total, tables.records.len());

    let ny = tables.summaries.iter().find(|s| s.state == "NY").unwrap();
    assert_eq!(ny.violations, 3);
    assert_eq!(ny.field(MonetaryField::Fine).total, 180.0);
    assert_eq!(ny.field(MonetaryField::Fine).mean, Some(90.0));
    assert_eq!(ny.field(MonetaryField::Penalty).present, 1);

    let unknown = tables.summaries.iter().find(|s| s.state == "99").unwrap();
    assert_eq!(unknown.field(MonetaryField::Payment).total, 0.0);
    assert_eq!(unknown.field(MonetaryField::Payment).mean, None);

    for summary in &tables.summaries {
        for field in MonetaryField::ALL {
            let f = summary.field(field);
            match f.mean {
                Some(mean) => assert!((mean * f.present as f64 - f.total).abs() < 1e-9),
                None => assert_eq!(f.present, 0),
            }
        }
    }
}

#[test]
fn test_derived_columns_are_stable() {
    let bytes = include_bytes!("fixtures/sample_violations.csv");
    let tables = build_tables(bytes, DatePolicy::Abort).expect("Failed to build tables");

    assert_eq!(tables.records[0].day_of_week(), "Thursday");
    assert_eq!(tables.records[0].month(), "July");
    assert_eq!(tables.records[3].day_of_week(), "Wednesday");
    assert_eq!(tables.records[3].month(), "March");

    let mut records = tables.records.clone();
    rederive(&mut records).unwrap();
    assert_eq!(records, tables.records);
}

#[test]
fn test_dashboard_from_sample() {
    let bytes = include_bytes!("fixtures/sample_violations.csv");
    let tables = build_tables(bytes, DatePolicy::Abort).expect("Failed to build tables");
    let dashboard = Dashboard::build(&tables.records, &tables.summaries);

    let agencies = &dashboard.histograms[3];
    assert_eq!(agencies.color_label, "Issuing Agency");
    let names: Vec<_> = agencies.series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["DEPARTMENT OF TRANSPORTATION", "POLICE DEPARTMENT", "TRAFFIC"]
    );

    let fines = &dashboard.state_metrics[0];
    assert_eq!(fines.states, vec!["99", "CT", "NJ", "NY"]);
    assert_eq!(fines.values, vec![Some(45.0), Some(115.0), Some(50.0), Some(90.0)]);
}
