//! Tests for forest construction

use indexmap::IndexMap;
use vditree::domain::{build_forest, DiskImage, DomainError, VdiInfo, GIGA};

fn vdi(uuid: &str, parent: Option<&str>) -> VdiInfo {
    VdiInfo {
        uuid: uuid.to_string(),
        parent_uuid: parent.map(|p| p.to_string()),
        size_virt: 10 * GIGA,
        size_phys: GIGA,
    }
}

fn records(entries: &[(&str, Option<&str>)]) -> IndexMap<String, VdiInfo> {
    entries
        .iter()
        .map(|(uuid, parent)| (uuid.to_string(), vdi(uuid, *parent)))
        .collect()
}

fn preorder_ids(forest: &vditree::domain::Forest<'_, VdiInfo>) -> Vec<String> {
    forest
        .iter()
        .map(|(_, _, node)| node.record.identifier().to_string())
        .collect()
}

#[test]
fn given_snapshot_chain_when_building_then_preorder_matches() {
    // Arrange: A is root, B and C are children of A, D is child of B
    let records = records(&[
        ("a", None),
        ("b", Some("a")),
        ("c", Some("a")),
        ("d", Some("b")),
    ]);

    // Act
    let forest = build_forest(&records).unwrap();

    // Assert
    assert_eq!(forest.len(), 4);
    assert_eq!(forest.roots().len(), 1);

    let root = forest.get(forest.roots()[0]).unwrap();
    assert_eq!(root.record.identifier(), "a");
    let child_ids: Vec<&str> = root
        .children
        .iter()
        .map(|&idx| forest.get(idx).unwrap().record.identifier())
        .collect();
    assert_eq!(child_ids, ["b", "c"]);

    assert_eq!(preorder_ids(&forest), ["a", "b", "d", "c"]);
}

#[test]
fn given_valid_input_when_building_then_every_node_reached_exactly_once() {
    // Arrange
    let records = records(&[
        ("r1", None),
        ("x", Some("r1")),
        ("r2", None),
        ("y", Some("x")),
        ("z", Some("r2")),
    ]);

    // Act
    let forest = build_forest(&records).unwrap();

    // Assert: node count preserved, traversal visits each node once
    assert_eq!(forest.len(), records.len());
    let mut visited = preorder_ids(&forest);
    assert_eq!(visited.len(), records.len());
    visited.sort();
    visited.dedup();
    assert_eq!(visited.len(), records.len());
}

#[test]
fn given_multiple_roots_when_building_then_mapping_order_kept() {
    // Arrange
    let records = records(&[("m", None), ("k", None), ("e", None)]);

    // Act
    let forest = build_forest(&records).unwrap();

    // Assert: insertion order, not sorted
    let root_ids: Vec<&str> = forest
        .roots()
        .iter()
        .map(|&idx| forest.get(idx).unwrap().record.identifier())
        .collect();
    assert_eq!(root_ids, ["m", "k", "e"]);
}

#[test]
fn given_dangling_parent_when_building_then_missing_parent_error() {
    // Arrange: Z is referenced but absent
    let records = records(&[("x", Some("z"))]);

    // Act
    let result = build_forest(&records);

    // Assert
    match result {
        Err(DomainError::MissingParent { child, parent }) => {
            assert_eq!(child, "x");
            assert_eq!(parent, "z");
        }
        other => panic!("expected MissingParent, got {other:?}"),
    }
}

#[test]
fn given_dangling_parent_in_larger_set_when_building_then_no_partial_forest() {
    // Arrange
    let records = records(&[("a", None), ("b", Some("a")), ("c", Some("gone"))]);

    // Act
    let result = build_forest(&records);

    // Assert
    assert!(matches!(
        result,
        Err(DomainError::MissingParent { ref parent, .. }) if parent == "gone"
    ));
}

#[test]
fn given_same_input_when_building_twice_then_forests_equivalent() {
    // Arrange
    let records = records(&[("a", None), ("b", Some("a")), ("c", Some("b"))]);

    // Act
    let first = build_forest(&records).unwrap();
    let second = build_forest(&records).unwrap();

    // Assert: same shape, same order
    let shape = |forest: &vditree::domain::Forest<'_, VdiInfo>| {
        forest
            .iter()
            .map(|(_, depth, node)| (depth, node.record.identifier().to_string()))
            .collect::<Vec<_>>()
    };
    assert_eq!(shape(&first), shape(&second));
}

#[test]
fn given_empty_mapping_when_building_then_empty_forest() {
    // Arrange
    let records: IndexMap<String, VdiInfo> = IndexMap::new();

    // Act
    let forest = build_forest(&records).unwrap();

    // Assert
    assert!(forest.is_empty());
    assert!(forest.roots().is_empty());
}

#[test]
fn given_self_parent_when_building_then_cycle_error() {
    // Arrange
    let records = records(&[("a", Some("a"))]);

    // Act
    let result = build_forest(&records);

    // Assert
    assert!(matches!(
        result,
        Err(DomainError::CycleDetected(ref id)) if id == "a"
    ));
}

#[test]
fn given_parent_cycle_when_building_then_cycle_error() {
    // Arrange: a <-> b loop plus an honest tree
    let records = records(&[
        ("r", None),
        ("a", Some("b")),
        ("b", Some("a")),
        ("x", Some("r")),
    ]);

    // Act
    let result = build_forest(&records);

    // Assert: first cycle member in mapping order is named
    assert!(matches!(
        result,
        Err(DomainError::CycleDetected(ref id)) if id == "a"
    ));
}

#[test]
fn given_empty_string_parent_when_building_then_treated_as_root() {
    // Arrange
    let mut records = records(&[("a", None)]);
    records.insert("b".to_string(), vdi("b", Some("")));

    // Act
    let forest = build_forest(&records).unwrap();

    // Assert
    assert_eq!(forest.roots().len(), 2);
}
