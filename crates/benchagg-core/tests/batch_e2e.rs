//! End-to-end batch runs over temporary result directories.

use std::path::Path;

use benchagg_core::{run_batch, AggregateConfig, AggregateError, Measure};
use serde_json::{json, Value};

fn result_doc(tool: &str, model: &str, spec: &str, run: i64, ttfr: f64, ttfc: f64) -> Value {
    json!({
        "result_data": {
            "run_identity": {
                "tool_name": tool,
                "tool_version": "1.0",
                "target_model": model,
                "api_style": "REST",
                "spec_reference": spec,
                "run_number": run
            },
            "metrics": {
                "acceptance": { "passrate": 0.9 },
                "reproducibility_rating": "Minor",
                "determinism_compliance": "Pass",
                "clarifications_count": 1,
                "interventions_count": 0,
                "reruns_count": 1,
                "contract_completeness_passrate": 0.8,
                "instructions_quality_rating": 70,
                "overreach_incidents_count": 0,
                "ttfr": { "minutes": ttfr },
                "ttfc": { "minutes": ttfc }
            }
        }
    })
}

fn write(dir: &Path, name: &str, doc: &Value) {
    std::fs::write(dir.join(name), serde_json::to_vec_pretty(doc).unwrap()).unwrap();
}

fn config(input: &Path, output: &Path) -> AggregateConfig {
    AggregateConfig {
        input_dir: input.to_path_buf(),
        output_dir: output.join("compiled"),
        ..AggregateConfig::default()
    }
}

#[test]
fn one_report_per_cohort() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(input.path(), "a1.json", &result_doc("Alpha", "A", "v1.0.0", 1, 10.0, 20.0));
    write(input.path(), "a2.json", &result_doc("Alpha", "A", "v1.0.0", 2, 12.0, 22.0));
    write(input.path(), "b1.json", &result_doc("Beta", "A", "v1.0.0", 1, 30.0, 60.0));
    write(input.path(), "c1.json", &result_doc("Alpha", "B", "v1.0.0", 1, 5.0, 5.0));

    let summary = run_batch(&config(input.path(), output.path())).unwrap();

    assert_eq!(summary.stats.files_seen, 4);
    assert_eq!(summary.stats.files_rejected, 0);
    assert_eq!(summary.stats.cohorts, 2);
    assert_eq!(summary.stats.reports_written, 2);

    let compiled = output.path().join("compiled");
    assert!(compiled.join("v1.0.0-ModelA-REST-Comparison.md").exists());
    assert!(compiled.join("v1.0.0-ModelB-REST-Comparison.md").exists());

    let model_a = &summary.reports[0];
    assert_eq!(model_a.cohort.target_model, "A");
    assert_eq!(model_a.tools, vec!["Alpha 1.0", "Beta 1.0"]);

    // model B holds a single record: no peers, no speed
    let model_b = &summary.reports[1];
    assert_eq!(model_b.rows[0].scores.speed, Measure::Unknown);
}

#[test]
fn bad_files_are_skipped_and_counted() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(input.path(), "good.json", &result_doc("Alpha", "A", "v1.0.0", 1, 10.0, 20.0));
    std::fs::write(input.path().join("broken.json"), "{ \"result_data\": ").unwrap();

    let mut no_model = result_doc("Beta", "A", "v1.0.0", 1, 10.0, 20.0);
    no_model["result_data"]["run_identity"]
        .as_object_mut()
        .unwrap()
        .remove("target_model");
    write(input.path(), "no-model.json", &no_model);

    write(
        input.path(),
        "bad-run.json",
        &result_doc("Gamma", "A", "v1.0.0", 3, 10.0, 20.0),
    );

    let mut out_of_range = result_doc("Delta", "A", "v1.0.0", 1, 10.0, 20.0);
    out_of_range["result_data"]["metrics"]["acceptance"]["passrate"] = json!(1.5);
    write(input.path(), "out-of-range.json", &out_of_range);

    std::fs::write(input.path().join("notes.txt"), "not a result").unwrap();

    let summary = run_batch(&config(input.path(), output.path())).unwrap();

    assert_eq!(summary.stats.files_seen, 5);
    assert_eq!(summary.stats.files_rejected, 4);
    assert_eq!(summary.stats.records_accepted, 1);
    assert_eq!(summary.stats.reports_written, 1);
    assert_eq!(summary.reports[0].tools, vec!["Alpha 1.0"]);
}

#[test]
fn spec_filter_excludes_other_versions() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(input.path(), "old.json", &result_doc("Alpha", "A", "v0.9.0", 1, 10.0, 20.0));
    write(input.path(), "new.json", &result_doc("Alpha", "A", "v1.0.0", 1, 10.0, 20.0));
    write(input.path(), "prefix.json", &result_doc("Beta", "A", "v1.0", 1, 10.0, 20.0));

    let cfg = AggregateConfig {
        spec_version: Some("v1.0.0".to_string()),
        ..config(input.path(), output.path())
    };
    let summary = run_batch(&cfg).unwrap();

    assert_eq!(summary.stats.records_accepted, 3);
    assert_eq!(summary.stats.records_filtered_out, 2);
    let reported: usize = summary.reports.iter().map(|r| r.rows.len()).sum();
    assert_eq!(
        reported + summary.stats.records_filtered_out,
        summary.stats.records_accepted
    );
    assert_eq!(summary.reports.len(), 1);
    assert_eq!(summary.reports[0].cohort.spec_reference, "v1.0.0");
}

#[test]
fn cohorts_with_clashing_file_names_keep_separate_reports() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(input.path(), "space.json", &result_doc("Alpha", "GPT 4", "v1", 1, 10.0, 20.0));
    write(input.path(), "under.json", &result_doc("Alpha", "GPT_4", "v1", 1, 10.0, 20.0));

    let cfg = AggregateConfig {
        emit_json: true,
        ..config(input.path(), output.path())
    };
    let summary = run_batch(&cfg).unwrap();

    assert_eq!(summary.stats.cohorts, 2);
    assert_eq!(summary.stats.reports_written, 2);

    let mut unique = summary.written.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 4, "{:?}", summary.written);

    let compiled = output.path().join("compiled");
    let md_files: Vec<_> = std::fs::read_dir(&compiled)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    assert_eq!(md_files.len(), 2);
    assert!(compiled.join("v1-ModelGPT_4-REST-Comparison.md").exists());

    // each cohort's report survives with its own model
    let models: Vec<String> = summary
        .written
        .iter()
        .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
        .map(|p| std::fs::read_to_string(p).unwrap())
        .map(|md| {
            md.lines()
                .find_map(|l| l.strip_prefix("- **target_model**: "))
                .unwrap()
                .to_string()
        })
        .collect();
    assert_eq!(models, vec!["GPT 4", "GPT_4"]);
}

#[test]
fn empty_input_writes_nothing() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let summary = run_batch(&config(input.path(), output.path())).unwrap();

    assert_eq!(summary.stats.files_seen, 0);
    assert!(summary.reports.is_empty());
    assert!(summary.written.is_empty());
    assert!(!output.path().join("compiled").exists());
}

#[test]
fn missing_input_dir_is_fatal() {
    let output = tempfile::tempdir().unwrap();
    let missing = output.path().join("does-not-exist");

    let err = run_batch(&config(&missing, output.path())).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AggregateError>(),
        Some(AggregateError::InputDirMissing(_))
    ));
}

#[test]
fn unwritable_output_is_fatal() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(input.path(), "a.json", &result_doc("Alpha", "A", "v1.0.0", 1, 10.0, 20.0));

    // a regular file where the output directory should be
    let blocked = output.path().join("blocked");
    std::fs::write(&blocked, "").unwrap();
    let cfg = AggregateConfig {
        output_dir: blocked.join("compiled"),
        ..config(input.path(), output.path())
    };

    let err = run_batch(&cfg).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AggregateError>(),
        Some(AggregateError::OutputUnwritable { .. })
    ));
}

#[test]
fn emit_json_writes_structured_artifact() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(input.path(), "a.json", &result_doc("Alpha", "A", "v1.0.0", 1, 10.0, 20.0));
    write(input.path(), "b.json", &result_doc("Beta", "A", "v1.0.0", 1, 30.0, 60.0));

    let cfg = AggregateConfig {
        emit_json: true,
        ..config(input.path(), output.path())
    };
    let summary = run_batch(&cfg).unwrap();
    assert_eq!(summary.written.len(), 2);

    let json_path = output
        .path()
        .join("compiled")
        .join("v1.0.0-ModelA-REST-Comparison.json");
    let artifact: Value =
        serde_json::from_str(&std::fs::read_to_string(json_path).unwrap()).unwrap();
    assert_eq!(artifact["report_id"], "v1.0.0-ModelA-REST-Comparison");
    assert_eq!(artifact["rows"][0]["scores"]["speed_S"], json!(100.0));
    assert_eq!(artifact["rows"][1]["scores"]["speed_S"], json!(0.0));
}

#[test]
fn markdown_report_carries_scores_and_sources() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(input.path(), "alpha-run1.json", &result_doc("Alpha", "A", "v1.0.0", 1, 10.0, 20.0));

    let summary = run_batch(&config(input.path(), output.path())).unwrap();
    let md = std::fs::read_to_string(&summary.written[0]).unwrap();

    assert!(md.starts_with("# Comparison Report: v1.0.0-ModelA-REST-Comparison"));
    assert!(md.contains("## Comparison Table"));
    // C = 90, R = 80, D = 100, speed Unknown in a cohort of one
    assert!(md.contains("| 90.0 | 80.0 | 100.0 |"), "{md}");
    assert!(md.contains("| Unknown |"));
    assert!(md.contains("**Run 1**: alpha-run1.json (sha256 `"));
    assert!(md.contains("**Run 2**: N/A"));
}
