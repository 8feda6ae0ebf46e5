use griddiff_core::{DeltaMode, DiffData, LevelClassifier, LevelsData};
use griddiff_render::{ArrowBindings, PostProcessOptions, StyleOverlay, rewrite_diagram};
use serde_json::json;

fn overlay_fixture() -> (DiffData, LevelClassifier) {
    let diff = DiffData::from_value(&json!({
        "diff.VoltageLevels": [{"vl.switchesStatus-delta": []}],
        "diff.Branches": [{
            "branch.branchId1": "lineA",
            "branch.terminal1.p-delta": 0.5,
            "branch.terminal1.q-delta": 0.05,
            "branch.terminal1.i-delta": 0.0,
            "branch.terminal1.p-delta-percent": 0.0,
            "branch.terminal1.q-delta-percent": 0.0,
            "branch.terminal1.i-delta-percent": 0.0,
            "branch.terminal2.p-delta": 0.0,
            "branch.terminal2.q-delta": 0.0,
            "branch.terminal2.i-delta": 0.0,
            "branch.terminal2.p-delta-percent": 0.0,
            "branch.terminal2.q-delta-percent": 0.0,
            "branch.terminal2.i-delta-percent": 0.0,
        }],
    }))
    .expect("diff data");
    let levels = LevelsData::parse(r#"{"levels": [{"id": 1, "i": 0.1, "v": 0.1, "c": "red"}]}"#)
        .expect("levels");
    let classifier = LevelClassifier::new(levels, DeltaMode::Absolute);
    (diff, classifier)
}

fn bindings() -> ArrowBindings {
    [("arrows-lineA", "lineA_ONE")].into_iter().collect()
}

const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><style>.wire {stroke: blue}</style><g id="arrows-lineA" class="arrow arrow-active arrow-up"><path d="M0 0 L4 4"/></g><g id="arrows-lineA2" class="arrow arrow-reactive"><path d="M0 0"/></g></svg>"#;

#[test]
fn bound_arrow_groups_get_leveled_classes() {
    let (diff, classifier) = overlay_fixture();
    let overlay = StyleOverlay::new(&diff, &classifier);
    let mut bindings = bindings();
    bindings.bind("arrows-lineA2", "lineA_ONE");

    let out = rewrite_diagram(SVG, &overlay, &bindings, &PostProcessOptions::default())
        .expect("rewrite");

    // p-delta 0.5 > 0.1 -> level 1; q-delta 0.05 -> level 0.
    assert!(out.contains(r#"class="arrow arrow-active-level-1 arrow-up""#));
    assert!(out.contains(r#"class="arrow arrow-reactive-level-0""#));
    // Geometry untouched.
    assert!(out.contains(r#"<path d="M0 0 L4 4"/>"#));
}

#[test]
fn unbound_groups_and_non_token_matches_are_untouched() {
    let (diff, classifier) = overlay_fixture();
    let overlay = StyleOverlay::new(&diff, &classifier);

    let svg = r#"<svg><style>s</style><g id="other" class="arrow arrow-active"/><g id="arrows-lineA" class="arrow-active-legend label"/></svg>"#;
    let out = rewrite_diagram(svg, &overlay, &bindings(), &PostProcessOptions::default())
        .expect("rewrite");

    // No binding for "other": default classes stay.
    assert!(out.contains(r#"<g id="other" class="arrow arrow-active"/>"#));
    // Bound group, but "arrow-active-legend" is not the exact token.
    assert!(out.contains(r#"class="arrow-active-legend label""#));
}

#[test]
fn generated_css_is_appended_to_the_existing_style_block() {
    let (diff, classifier) = overlay_fixture();
    let overlay = StyleOverlay::new(&diff, &classifier);

    let out = rewrite_diagram(SVG, &overlay, &bindings(), &PostProcessOptions::default())
        .expect("rewrite");

    // Pre-existing rules survive and the level rules come after them.
    let style_start = out.find("<style>").expect("style block");
    let style_end = out.find("</style>").expect("style close");
    let style = &out[style_start..style_end];
    let existing = style.find(".wire {stroke: blue}").expect("existing rule");
    let level0 = style
        .find(".constant-color-level-0 {stroke: black; fill: none}")
        .expect("level 0 rule");
    let level1 = style
        .find(".arrow-active-level-1 {fill: red}")
        .expect("level 1 rule");
    assert!(existing < level0 && level0 < level1);
}

#[test]
fn css_embedding_can_be_disabled() {
    let (diff, classifier) = overlay_fixture();
    let overlay = StyleOverlay::new(&diff, &classifier);

    let options = PostProcessOptions { embed_css: false };
    let out = rewrite_diagram(SVG, &overlay, &bindings(), &options).expect("rewrite");

    assert!(out.contains("<style>.wire {stroke: blue}</style>"));
    assert!(!out.contains("constant-color-level-0"));
    // Arrow patching still happens.
    assert!(out.contains("arrow-active-level-1"));
}

#[test]
fn only_the_first_style_block_receives_the_generated_css() {
    let (diff, classifier) = overlay_fixture();
    let overlay = StyleOverlay::new(&diff, &classifier);

    let svg = r#"<svg><style>.a {}</style><style>.b {}</style></svg>"#;
    let out = rewrite_diagram(svg, &overlay, &bindings(), &PostProcessOptions::default())
        .expect("rewrite");

    assert_eq!(out.matches(".arrow-active-level-0 {fill: black}").count(), 1);
    let second = out.rfind("<style>").expect("second style block");
    assert!(out[second..].starts_with("<style>.b {}</style>"));
}

#[test]
fn diagram_without_style_block_passes_through() {
    let (diff, classifier) = overlay_fixture();
    let overlay = StyleOverlay::new(&diff, &classifier);

    let svg = r#"<svg><g id="n1" class="wire constant-color"/></svg>"#;
    let out = rewrite_diagram(svg, &overlay, &bindings(), &PostProcessOptions::default())
        .expect("rewrite");
    assert_eq!(out, svg);
}
