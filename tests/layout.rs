extern crate texbox;

#[macro_use]
extern crate serde_derive;
extern crate serde_yaml;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use texbox::dimensions::Unit;
use texbox::font::backend::approx::ApproxMetrics;
use texbox::layout::{layout, LayoutNode, LayoutSettings, LayoutVariant};
use texbox::parser::parse;
use texbox::render::bbox::BBoxBackend;
use texbox::Renderer;

const LAYOUT_YAML: &str = "tests/data/layout.yaml";
const FONT_SIZE: f64 = 16.;
const ERROR_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Serialize, Deserialize)]
struct Tests(BTreeMap<String, Vec<Category>>);

#[derive(Debug, Serialize, Deserialize)]
struct Category {
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Snippets")]
    snippets: Vec<String>,
}

fn collect_tests<P: AsRef<Path>>(path: P) -> Tests {
    let file = File::open(path.as_ref()).expect("failed to open test collection");
    let reader = BufReader::new(file);
    let tests: Tests = serde_yaml::from_reader(reader).expect("failed to parse test collection");

    tests
}

fn lay_out(tex: &str) -> LayoutNode {
    let parsed = parse(tex);
    assert!(parsed.is_clean(), "{}: {:?}", tex, parsed.errors);
    layout(&parsed.root, LayoutSettings::new(&ApproxMetrics::new(), FONT_SIZE)).expect("layout failed")
}

#[test]
fn layout_collection() {
    let _ = env_logger::builder().is_test(true).try_init();
    let tests = collect_tests(LAYOUT_YAML);
    for (category, collection) in tests.0.iter() {
        for snippets in collection {
            for equation in &snippets.snippets {
                eprintln!("{} / {}: {}", category, snippets.description, equation);
                let node = lay_out(equation);

                assert!(node.total_height() >= Unit::ZERO);
                assert!(!node.glyphs().is_empty());
                // layout is deterministic
                assert_eq!(node, lay_out(equation));

                let mut backend = BBoxBackend::new();
                Renderer::new().render(&node, &mut backend);
                let ink = backend.finish().expect("nothing drawn");

                let slack = Unit::new(ERROR_TOLERANCE);
                assert!(ink.y_min >= -node.height - slack, "ink above the box: {:?}", ink);
                assert!(ink.y_max <= node.depth + slack, "ink below the box: {:?}", ink);
                assert!(ink.x_min >= -slack, "ink left of the box: {:?}", ink);
                assert!(ink.x_max <= node.width + slack, "ink right of the box: {:?}", ink);
            }
        }
    }
}

#[test]
fn bigger_font_bigger_box() {
    for tex in [r"x^2", r"\frac{a}{b}", r"\sqrt{x}", r"\begin{bmatrix} 1 \\ 2 \end{bmatrix}"] {
        let parsed = parse(tex);
        let metrics = ApproxMetrics::new();
        let small = layout(&parsed.root, LayoutSettings::new(&metrics, 10.)).unwrap();
        let large = layout(&parsed.root, LayoutSettings::new(&metrics, 20.)).unwrap();
        assert!(large.width > small.width, "{}", tex);
        assert!(large.total_height() > small.total_height(), "{}", tex);
    }
}

#[test]
fn box_tree_serializes() {
    let node = lay_out(r"\frac{\alpha}{\sqrt[3]{x}} + \begin{pmatrix} a \\ b \end{pmatrix}");
    let json = serde_json::to_value(&node).expect("failed to serialize");
    assert!(json.get("width").is_some());
    assert!(json.get("node").is_some());

    let text = serde_json::to_string(&node).unwrap();
    for glyph in node.glyphs() {
        assert!(text.contains(&glyph.glyph), "{} missing from {}", glyph.glyph, text);
    }
}

#[test]
fn matrix_row_and_column_counts() {
    let node = lay_out(r"\begin{bmatrix} 1 & 2 & 3 \\ 4 & 5 \end{bmatrix}");
    let matrix = match node.node {
        LayoutVariant::Matrix(ref matrix) => matrix,
        ref other => panic!("expected a matrix, found {:?}", other),
    };
    assert_eq!(matrix.cells.len(), 2);
    assert!(matrix.cells.iter().all(|row| row.len() == 3));
    assert_eq!(matrix.column_widths.len(), 3);
    assert_eq!(matrix.row_heights.len(), 2);
}

#[test]
fn deep_nesting_still_lays_out() {
    let metrics = ApproxMetrics::new();
    for tex in ["{".repeat(20_000), r"\frac{".repeat(10_000), r"x^{".repeat(10_000), r"\left(".repeat(10_000)] {
        let parsed = parse(&tex);
        assert!(!parsed.is_clean());
        let node = layout(&parsed.root, LayoutSettings::new(&metrics, FONT_SIZE)).unwrap();
        let mut backend = BBoxBackend::new();
        Renderer::new().render(&node, &mut backend);
    }
}

const FRAGMENTS: &[&str] = &[
    "x", "y", "12", "+", "=", "(", ")", "[", "]", "{", "}", "_", "^", "&", r"\\", ",",
    r"\frac", r"\sqrt", r"\left(", r"\right)", r"\left.", r"\middle|", r"\alpha", r"\sum",
    r"\mathbb", r"\text", r"\overline", r"\underline", r"\quad", r"\!", r"\foo",
    r"\begin{pmatrix}", r"\end{pmatrix}", r"\begin{cases}", r"\end{cases}", r"\end{matrix}", " ",
];

/// Whatever the input, parsing recovers and the tree lays out
#[test]
fn random_input_never_breaks_layout() {
    let mut rng = StdRng::seed_from_u64(0x7e7b07);
    let metrics = ApproxMetrics::new();
    for _ in 0 .. 500 {
        let length = rng.gen_range(0 .. 24);
        let tex: String = (0 .. length)
            .filter_map(|_| FRAGMENTS.choose(&mut rng).copied())
            .collect();

        let parsed = parse(&tex);
        for error in &parsed.errors {
            assert!(error.position <= tex.len(), "{:?} in {:?}", error, tex);
        }
        let node = layout(&parsed.root, LayoutSettings::new(&metrics, FONT_SIZE))
            .unwrap_or_else(|e| panic!("{:?}: {}", tex, e));
        assert!(node.height.to_unitless().is_finite() && node.depth.to_unitless().is_finite(), "{:?}", tex);

        let mut backend = BBoxBackend::new();
        Renderer::new().render(&node, &mut backend);
    }
}
