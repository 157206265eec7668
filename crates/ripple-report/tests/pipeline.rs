//! Results directory → records → LaTeX, through the experiment layout.

use std::fs;
use std::path::Path;

use ripple_core::config::ReportConfig;
use ripple_core::registry::reported_result_keys;
use ripple_core::{ReportGroup, RippleError};
use ripple_report::statistics::COLUMNS;
use ripple_report::{
    ExperimentLayout, TableStyle, aggregate_statistics, histograms_in_dir, render_metric_table,
    render_threshold_figure,
};

fn results_row(network: &str) -> String {
    let mut fields = vec![network.to_string(), "100".to_string()];
    fields.extend((0..22).map(|_| "0.5".to_string()));
    fields.join(",")
}

fn is_row(line: &str) -> bool {
    line.starts_with(r"  \textbf{") && line.ends_with(r" \\")
}

fn one_experiment_config() -> ReportConfig {
    ReportConfig {
        thresholds: vec!["0.25".to_string()],
        models: vec!["model-1".to_string()],
        first_types: vec!["complete".to_string()],
        second_types: vec![],
        ..ReportConfig::default()
    }
}

fn write(path: &Path, text: &str) {
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, text).expect("write");
}

#[test]
fn tables_from_results_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let layout = ExperimentLayout::new(&tmp.path().join("results"), &tmp.path().join("plots"));
    let jobs = layout.table_jobs(&one_experiment_config());
    assert_eq!(jobs.len(), 1);
    let job = &jobs[0];

    let text = format!(
        "{}\n{}\n{}\n",
        COLUMNS.join(","),
        results_row("Dining_Table"),
        results_row("Texas")
    );
    write(&job.input, &text);

    let known = reported_result_keys();
    let stats = aggregate_statistics(&job.input, &known).expect("aggregate");
    assert_eq!(stats.len(), 10);
    assert_eq!(stats.iter().filter(|s| !s.is_empty()).count(), 1);

    let long = render_metric_table(&stats, TableStyle::Long, &job.context, &job.model);
    let short = render_metric_table(&stats, TableStyle::Short, &job.context, &job.model);

    assert_eq!(long.matches(r"\textbf{Dining Table}").count(), 1);
    assert!(!long.contains("Texas"));
    assert_eq!(long.lines().filter(|l| is_row(l)).count(), 10);
    assert_eq!(short.lines().filter(|l| is_row(l)).count(), 10);
    assert!(
        job.output(TableStyle::Short)
            .ends_with("first-experiment/complete/th-0.25/model-1-short.tex")
    );
}

#[test]
fn figures_from_thresholds_dir() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let layout = ExperimentLayout::new(&tmp.path().join("results"), &tmp.path().join("plots"));
    let jobs = layout.plot_jobs(&one_experiment_config());
    let job = &jobs[0];

    for group in ReportGroup::ALL {
        for network in group.networks() {
            write(
                &job.thresholds_dir.join(format!("{}.txt", network.result_key())),
                "Node,Threshold\n0,0.05\n1,0.55\n2,0.55\n3,1.0\n",
            );
        }
    }

    let histograms = histograms_in_dir(&job.thresholds_dir).expect("histograms");
    assert_eq!(histograms.len(), 10);

    for group in ReportGroup::ALL {
        let tex = render_threshold_figure(&histograms, group, &job.context);
        assert_eq!(tex.matches(r"\nextgroupplot").count(), 5);
        assert!(tex.contains("(0.5,0.5)"));
        assert!(tex.contains("(1,0.25)"));
        assert!(
            job.output(group)
                .ends_with(format!("th-0.25/thresholds-range-{}.tex", group.label()))
        );
    }
}

#[test]
fn bad_threshold_file_fails_the_directory() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write(&tmp.path().join("Dolphins.txt"), "Node,Threshold\n0,0.5\n");
    write(&tmp.path().join("Higgs.txt"), "Node,Threshold\n");

    let err = histograms_in_dir(tmp.path()).expect_err("must fail");
    assert!(matches!(err, RippleError::EmptyFile { .. }));
}

#[test]
fn missing_results_file_is_io_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let err = aggregate_statistics(&tmp.path().join("model-1.txt"), &["Dolphins"])
        .expect_err("must fail");
    assert!(matches!(err, RippleError::Io { .. }));
    assert_eq!(err.code().code(), "E1005");
}
