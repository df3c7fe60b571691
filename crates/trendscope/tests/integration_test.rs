//! Integration tests for Trendscope.

use std::io::Write;
use tempfile::NamedTempFile;

use trendscope::analysis::KeywordScorer;
use trendscope::insight::Criticality;
use trendscope::stats::pearson_correlation;
use trendscope::{
    CellValue, Column, ColumnKind, DatasetInput, Domain, DomainClassifier, RiskLevel, Trendscope,
    TrendAnalyzer, TrendDirection, TrendPattern, TrendscopeError, detect_domain,
};

/// Helper to create a temporary file with given content and extension.
fn create_test_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn monthly_revenue() -> Vec<f64> {
    (0..12).map(|i| 100.0 + 10.0 * i as f64).collect()
}

// =============================================================================
// Trend Analysis
// =============================================================================

#[test]
fn test_short_sequences_are_insufficient() {
    let analyzer = TrendAnalyzer::new();
    for values in [vec![], vec![Some(1.0)], vec![Some(1.0), None, Some(2.0)]] {
        let trend = analyzer.analyze(&values);
        assert_eq!(trend.direction, TrendDirection::InsufficientData);
        assert_eq!(trend.slope, 0.0);
        assert_eq!(trend.confidence, 0.0);
        assert_eq!(trend.correlation, 0.0);
        assert_eq!(trend.change_rate, 0.0);
        assert_eq!(trend.volatility, 0.0);
        assert!(trend.outliers.is_empty());
    }
}

#[test]
fn test_linear_sequence() {
    let values: Vec<Option<f64>> = (1..=20).map(|i| Some(i as f64)).collect();
    let trend = TrendAnalyzer::new().analyze(&values);

    assert_eq!(trend.direction, TrendDirection::Increasing);
    assert!((trend.correlation - 1.0).abs() < 1e-9);
    assert!(matches!(
        trend.pattern,
        TrendPattern::Linear | TrendPattern::Exponential
    ));
    assert!(trend.outliers.is_empty());
}

#[test]
fn test_long_linear_sequence_is_not_cyclical() {
    for n in [60, 100, 365] {
        let values: Vec<Option<f64>> = (1..=n).map(|i| Some(i as f64)).collect();
        let trend = TrendAnalyzer::new().analyze(&values);
        assert!(!trend.seasonality, "n={}", n);
        assert!(
            matches!(trend.pattern, TrendPattern::Linear | TrendPattern::Exponential),
            "n={} got {:?}",
            n,
            trend.pattern
        );
    }
}

#[test]
fn test_constant_sequence() {
    let values = vec![Some(5.0); 12];
    let trend = TrendAnalyzer::new().analyze(&values);

    assert_eq!(trend.direction, TrendDirection::Stable);
    assert_eq!(trend.volatility, 0.0);
    assert_eq!(trend.slope, 0.0);
}

#[test]
fn test_outlier_detection() {
    let values: Vec<Option<f64>> = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0]
        .into_iter()
        .map(Some)
        .collect();
    let trend = TrendAnalyzer::new().analyze(&values);
    assert_eq!(trend.outliers, vec![5]);
}

#[test]
fn test_change_rate_guarded_for_zero_start() {
    let values = vec![Some(0.0), Some(5.0), Some(10.0), Some(15.0)];
    let trend = TrendAnalyzer::new().analyze(&values);
    assert_eq!(trend.change_rate, 0.0);
    assert_eq!(trend.direction, TrendDirection::Increasing);
}

#[test]
fn test_pearson_properties() {
    let x = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
    let y = [2.0, 7.0, 1.0, 8.0, 2.0, 8.0, 1.0, 8.0];
    assert!((pearson_correlation(&x, &x) - 1.0).abs() < 1e-12);
    assert_eq!(pearson_correlation(&x, &y), pearson_correlation(&y, &x));
}

// =============================================================================
// Dataset Aggregation
// =============================================================================

#[test]
fn test_revenue_end_to_end() {
    let columns = vec![Column::from_f64("revenue", &monthly_revenue())];
    let insights = Trendscope::new().analyze_columns(&columns, None);

    let revenue = insights.column("revenue").expect("revenue is a key column");
    assert_eq!(revenue.criticality, Criticality::High);
    assert_eq!(revenue.trend.direction, TrendDirection::Increasing);
    assert_eq!(revenue.risk_level, RiskLevel::Good);
    assert!(
        insights
            .business_health
            .opportunities
            .iter()
            .any(|o| o.starts_with("revenue"))
    );
}

#[test]
fn test_aggregate_is_idempotent() {
    let columns = vec![
        Column::from_f64("revenue", &monthly_revenue()),
        Column::numeric(
            "cost",
            [80.0, 82.0, 79.0, 85.0, 90.0, 88.0, 95.0, 97.0, 96.0, 99.0, 105.0, 101.0]
                .into_iter()
                .map(Some),
        ),
        Column::text("region", &["north"; 12]),
    ];
    let engine = Trendscope::new();

    let first = engine.analyze_columns(&columns, Some("q4.csv"));
    let second = engine.analyze_columns(&columns, Some("q4.csv"));
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_empty_dataset_does_not_fail() {
    let insights = Trendscope::new().analyze_columns(&[], None);
    assert!(insights.key_columns.is_empty());
    assert!(insights.correlation_matrix.is_empty());
    assert_eq!(insights.data_quality.completeness, 0.0);
    assert_eq!(insights.domain_type, Domain::Customer);
}

#[test]
fn test_correlation_matrix_diagonal_and_symmetry() {
    let columns = vec![
        Column::from_f64("a", &[1.0, 2.0, 3.0, 4.0, 5.0]),
        Column::from_f64("b", &[2.0, 1.0, 4.0, 3.0, 6.0]),
        Column::numeric("c", [Some(9.0), None, Some(4.0), Some(1.0), Some(0.5)]),
    ];
    let insights = Trendscope::new().analyze_columns(&columns, None);
    let matrix = &insights.correlation_matrix;

    for a in ["a", "b", "c"] {
        assert_eq!(matrix.get(a, a), Some(1.0));
        for b in ["a", "b", "c"] {
            assert_eq!(matrix.get(a, b), matrix.get(b, a));
        }
    }
}

#[test]
fn test_decreasing_profit_is_critical() {
    let values: Vec<f64> = (0..12).map(|i| 500.0 - 25.0 * i as f64).collect();
    let insights =
        Trendscope::new().analyze_columns(&[Column::from_f64("profit", &values)], None);

    let profit = insights.column("profit").unwrap();
    assert_eq!(profit.risk_level, RiskLevel::Critical);
    assert_eq!(insights.business_health.critical_issues.len(), 1);
    assert!(!insights.business_health.recommendations.is_empty());
    assert!(!insights.summary.is_empty());
}

#[test]
fn test_insights_json_shape() {
    let columns = vec![Column::from_f64("revenue", &monthly_revenue())];
    let insights = Trendscope::new().analyze_columns(&columns, Some("sales.csv"));
    let json = serde_json::to_value(&insights).unwrap();

    assert_eq!(json["domainType"], "sales");
    assert_eq!(json["keyColumns"][0]["trend"]["direction"], "increasing");
    assert_eq!(json["keyColumns"][0]["riskLevel"], "good");
    assert_eq!(json["correlationMatrix"]["revenue"]["revenue"], 1.0);
    assert!(json["businessHealth"]["criticalIssues"].is_array());
    assert!(json["dataQuality"]["completeness"].is_number());
}

// =============================================================================
// Domain Detection
// =============================================================================

#[test]
fn test_detect_sales_domain() {
    assert_eq!(
        detect_domain(&["revenue", "sales_region"], Some("sales_report.csv")),
        Domain::Sales
    );
}

#[test]
fn test_detect_domain_without_signal() {
    assert_eq!(detect_domain(&["foo", "bar"], None), Domain::Customer);
}

#[test]
fn test_custom_domain_scorer() {
    let classifier = DomainClassifier::empty(Domain::Customer)
        .with_scorer(KeywordScorer::new(Domain::Scientific, &["assay"]));
    let engine = Trendscope::new().with_domain_classifier(classifier);

    let columns = vec![Column::from_f64("assay_signal", &[1.0, 2.0, 3.0])];
    assert_eq!(
        engine.analyze_columns(&columns, None).domain_type,
        Domain::Scientific
    );
}

// =============================================================================
// File Input
// =============================================================================

#[test]
fn test_analyze_csv_file() {
    let mut content = String::from("month,revenue,region\n");
    for (i, v) in monthly_revenue().iter().enumerate() {
        content.push_str(&format!("2024-{:02},{},north\n", i + 1, v));
    }
    let file = create_test_file(".csv", &content);

    let report = Trendscope::new()
        .analyze_file(file.path())
        .expect("Analysis failed");

    assert_eq!(report.source.row_count, 12);
    assert_eq!(report.source.column_count, 3);
    assert_eq!(report.source.format, "csv");
    assert_eq!(report.insights.key_columns.len(), 1);
    assert_eq!(report.insights.data_quality.timeliness, 1.0);
}

#[test]
fn test_analyze_tsv_auto_detect() {
    let content = "day\tusers\n1\t10\n2\t12\n3\t15\n4\t19\n";
    let file = create_test_file(".tsv", content);

    let report = Trendscope::new()
        .analyze_file(file.path())
        .expect("Analysis failed");
    assert_eq!(report.source.format, "tsv");
    assert_eq!(report.insights.key_columns.len(), 2);
}

#[test]
fn test_csv_and_json_give_same_insights() {
    let csv = "month,revenue,region\n\
               2024-01,100,north\n\
               2024-02,110,north\n\
               2024-03,NA,south\n\
               2024-04,130,south\n\
               2024-05,140,east\n";
    let json = r#"{
        "columns": [
            {"name": "month", "type": "date",
             "values": ["2024-01", "2024-02", "2024-03", "2024-04", "2024-05"]},
            {"name": "revenue", "type": "numeric", "values": [100, 110, null, 130, 140]},
            {"name": "region", "type": "text",
             "values": ["north", "north", "south", "south", "east"]}
        ]
    }"#;
    let csv_file = create_test_file(".csv", csv);

    let parser = trendscope::Parser::new();
    let (csv_input, _) = parser.parse_file(csv_file.path()).unwrap();
    let json_input = DatasetInput::from_json(json).unwrap();

    let engine = Trendscope::new();
    let from_csv = engine.analyze_columns(&csv_input.columns, Some("revenue.csv"));
    let from_json = engine.analyze_columns(&json_input.columns, Some("revenue.csv"));
    assert_eq!(from_csv, from_json);
}

#[test]
fn test_currency_and_percent_cells_are_numeric() {
    let content = "price,margin\n\"$1,200\",12%\n\"$1,250\",13%\n\"$1,300\",15%\n";
    let file = create_test_file(".csv", content);

    let report = Trendscope::new().analyze_file(file.path()).unwrap();
    let price = report.insights.column("price").unwrap();
    assert_eq!(price.valid_count, 3);
    assert_eq!(price.min, 1200.0);
    assert_eq!(price.max, 1300.0);
}

#[test]
fn test_empty_file_is_an_error() {
    let file = create_test_file(".csv", "");
    assert!(matches!(
        Trendscope::new().analyze_file(file.path()),
        Err(TrendscopeError::EmptyData(_))
    ));
}

#[test]
fn test_duplicate_columns_rejected() {
    let input = DatasetInput::new(vec![
        Column::from_f64("x", &[1.0, 2.0]),
        Column::from_f64("x", &[3.0, 4.0]),
    ]);
    assert!(matches!(
        Trendscope::new().analyze_input(&input),
        Err(TrendscopeError::InvalidInput(_))
    ));
}

#[test]
fn test_json_cell_types() {
    let input = DatasetInput::from_json(
        r#"{"columns": [{"name": "flag", "type": "categorical", "values": [true, "n/a", 3, null]}]}"#,
    )
    .unwrap();
    let column = &input.columns[0];

    assert_eq!(column.kind, ColumnKind::Text);
    assert_eq!(column.values[0], CellValue::Bool(true));
    assert_eq!(column.values[2], CellValue::Number(3.0));
    assert!(column.values[3].is_null());
    assert_eq!(column.non_null_count(), 2);
}
