//! Tests for the indented tree renderer

use indexmap::IndexMap;
use vditree::backend::vdi_sizes;
use vditree::domain::{build_forest, render_forest, SizeExtract, VdiInfo, GIGA};

fn vdi(uuid: &str, parent: Option<&str>, size_virt: u64, size_phys: u64) -> VdiInfo {
    VdiInfo {
        uuid: uuid.to_string(),
        parent_uuid: parent.map(|p| p.to_string()),
        size_virt,
        size_phys,
    }
}

fn records(entries: Vec<VdiInfo>) -> IndexMap<String, VdiInfo> {
    entries.into_iter().map(|v| (v.uuid.clone(), v)).collect()
}

#[test]
fn given_single_root_when_rendering_then_exact_line() {
    // Arrange
    let records = records(vec![vdi("id", None, 0, 0)]);
    let forest = build_forest(&records).unwrap();
    let extract = |_: &VdiInfo| (2.5, 10.0);

    // Act
    let out = render_forest(&forest, Some(&extract));

    // Assert: virtual size first, 4-space indent, trailing newline
    assert_eq!(out, "Found 1 tree(s)\n    id(10.00G/2.50G)\n");
}

#[test]
fn given_no_size_extractor_when_rendering_then_placeholders() {
    // Arrange
    let records = records(vec![vdi("id", None, 10 * GIGA, GIGA)]);
    let forest = build_forest(&records).unwrap();
    let none: Option<&SizeExtract<VdiInfo>> = None;

    // Act
    let out = render_forest(&forest, none);

    // Assert
    assert_eq!(out, "Found 1 tree(s)\n    id(?/?)\n");
}

#[test]
fn given_zero_sizes_when_rendering_then_placeholders() {
    // Arrange
    let records = records(vec![vdi("id", None, 0, 0)]);
    let forest = build_forest(&records).unwrap();

    // Act
    let out = render_forest(&forest, Some(&vdi_sizes));

    // Assert: zero counts as unknown
    assert_eq!(out, "Found 1 tree(s)\n    id(?/?)\n");
}

#[test]
fn given_snapshot_chain_when_rendering_then_indent_grows_per_level() {
    // Arrange
    let records = records(vec![
        vdi("a", None, 10 * GIGA, 2 * GIGA + GIGA / 2),
        vdi("b", Some("a"), 10 * GIGA, GIGA / 4),
        vdi("c", Some("a"), 10 * GIGA, 0),
        vdi("d", Some("b"), 10 * GIGA, GIGA),
    ]);
    let forest = build_forest(&records).unwrap();

    // Act
    let out = render_forest(&forest, Some(&vdi_sizes));

    // Assert: depth-first pre-order, 4 spaces per level
    let expected = "\
Found 1 tree(s)
    a(10.00G/2.50G)
        b(10.00G/0.25G)
            d(10.00G/1.00G)
        c(10.00G/?)
";
    assert_eq!(out, expected);
}

#[test]
fn given_empty_forest_when_rendering_then_zero_tree_header() {
    // Arrange
    let records: IndexMap<String, VdiInfo> = IndexMap::new();
    let forest = build_forest(&records).unwrap();

    // Act
    let out = render_forest(&forest, Some(&vdi_sizes));

    // Assert
    assert_eq!(out, "Found 0 tree(s)\n");
}

#[test]
fn given_two_trees_when_rendering_then_roots_in_mapping_order() {
    // Arrange
    let records = records(vec![
        vdi("t2", None, GIGA, GIGA),
        vdi("t1", None, GIGA, GIGA),
    ]);
    let forest = build_forest(&records).unwrap();

    // Act
    let out = render_forest(&forest, Some(&vdi_sizes));

    // Assert
    assert_eq!(
        out,
        "Found 2 tree(s)\n    t2(1.00G/1.00G)\n    t1(1.00G/1.00G)\n"
    );
}
