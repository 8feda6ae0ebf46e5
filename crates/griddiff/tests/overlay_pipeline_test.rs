use griddiff::render::{ArrowBindings, PostProcessOptions, overlay_svg};
use griddiff::{DeltaMode, Error};

const DIFF_JSON: &str = r#"{
  "diff.VoltageLevels": [{"vl.switchesStatus-delta": ["sw1"]}],
  "diff.Branches": [{
    "branch.branchId1": "lineA",
    "branch.terminal1.p-delta": 0.5,
    "branch.terminal1.q-delta": "Nan",
    "branch.terminal1.i-delta": 0.2,
    "branch.terminal1.p-delta-percent": 25.0,
    "branch.terminal1.q-delta-percent": "Nan",
    "branch.terminal1.i-delta-percent": 10.0,
    "branch.terminal2.p-delta": 0.0,
    "branch.terminal2.q-delta": 0.0,
    "branch.terminal2.i-delta": 0.0,
    "branch.terminal2.p-delta-percent": 0.0,
    "branch.terminal2.q-delta-percent": 0.0,
    "branch.terminal2.i-delta-percent": 0.0
  }]
}"#;

const SVG: &str = r#"<svg><style>.base {}</style><g id="arrows-lineA" class="arrow arrow-active"/><g id="arrows-lineA-q" class="arrow arrow-reactive"/></svg>"#;

fn bindings() -> ArrowBindings {
    [
        ("arrows-lineA", "lineA_ONE"),
        ("arrows-lineA-q", "lineA_ONE"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn pipeline_patches_arrows_and_embeds_css_with_default_levels() {
    let out = overlay_svg(
        DIFF_JSON,
        None,
        DeltaMode::Absolute,
        SVG,
        &bindings(),
        &PostProcessOptions::default(),
    )
    .expect("overlay");

    // p-delta 0.5 exceeds the default 0.1 band; the NaN q-delta never does.
    assert!(out.contains("arrow-active-level-1"));
    assert!(out.contains("arrow-reactive-level-0"));
    // Default band color in the embedded stylesheet.
    assert!(out.contains(".arrow-active-level-1 {fill: red}"));
    assert!(out.contains(".base {}"));
}

#[test]
fn invalid_levels_document_falls_back_instead_of_failing() {
    let out = overlay_svg(
        DIFF_JSON,
        Some("{definitely not levels"),
        DeltaMode::Absolute,
        SVG,
        &bindings(),
        &PostProcessOptions::default(),
    )
    .expect("overlay");
    assert!(out.contains("arrow-active-level-1"));
}

#[test]
fn malformed_diff_result_is_a_core_error() {
    let err = overlay_svg(
        r#"{"diff.VoltageLevels": []}"#,
        None,
        DeltaMode::Absolute,
        SVG,
        &bindings(),
        &PostProcessOptions::default(),
    )
    .unwrap_err();

    match err {
        griddiff::render::OverlayError::Core(Error::MalformedDiff { message }) => {
            assert!(message.contains("diff.Branches"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
