//! End-to-end resolution scenarios over declared hierarchies.

use c3l_core::{merge, C3Error};
use c3l_hierarchy::{Hierarchy, HierarchyError};
use c3l_types::ClassName;

fn names(list: &str) -> Vec<ClassName> {
    list.split_whitespace()
        .map(|n| ClassName::new(n).unwrap())
        .collect()
}

fn resolved(h: &Hierarchy, class: &str) -> String {
    h.linearize(class).unwrap().to_string()
}

/// Root; A, B, C, D, E (Root); K1(A, B, C); K2(D, B, E); K3(D, A); Z(K1, K2, K3).
fn wikipedia() -> Hierarchy {
    Hierarchy::from_toml_str(
        r#"
[[class]]
name = "Root"

[[class]]
name = "A"
parents = ["Root"]

[[class]]
name = "B"
parents = ["Root"]

[[class]]
name = "C"
parents = ["Root"]

[[class]]
name = "D"
parents = ["Root"]

[[class]]
name = "E"
parents = ["Root"]

[[class]]
name = "K1"
parents = ["A", "B", "C"]

[[class]]
name = "K2"
parents = ["D", "B", "E"]

[[class]]
name = "K3"
parents = ["D", "A"]

[[class]]
name = "Z"
parents = ["K1", "K2", "K3"]
"#,
    )
    .unwrap()
}

#[test]
fn merge_worked_examples() {
    let cases = [
        (vec!["C", "D", "A"], Some("C D A")),
        (vec!["A", "D", "C A"], Some("D C A")),
        (vec!["D Root", "B Root", "E Root", "D B E"], Some("D B E Root")),
        (vec!["C A Root", "D B Root", "C D"], Some("C A D B Root")),
        (vec!["A C", "C A", "C A"], None),
    ];

    for (inputs, expected) in cases {
        let sequences: Vec<Vec<ClassName>> = inputs.iter().map(|s| names(s)).collect();
        let result = merge(&sequences);
        match expected {
            Some(order) => assert_eq!(result.unwrap(), names(order), "{inputs:?}"),
            None => assert!(result.unwrap_err().is_inconsistent(), "{inputs:?}"),
        }
    }
}

#[test]
fn root_is_its_own_linearization() {
    assert_eq!(resolved(&wikipedia(), "Root"), "Root");
}

#[test]
fn multiple_parents_keep_declared_order() {
    let h = wikipedia();
    assert_eq!(resolved(&h, "K1"), "K1, A, B, C, Root");
    assert_eq!(resolved(&h, "K2"), "K2, D, B, E, Root");
    assert_eq!(resolved(&h, "K3"), "K3, D, A, Root");
}

#[test]
fn wikipedia_hierarchy() {
    assert_eq!(
        resolved(&wikipedia(), "Z"),
        "Z, K1, K2, K3, D, A, B, C, E, Root"
    );
}

#[test]
fn diamond() {
    let mut h = Hierarchy::new();
    h.declare::<&str>("Root", &[]).unwrap();
    h.declare("A", &["Root"]).unwrap();
    h.declare("B", &["Root"]).unwrap();
    h.declare("C1", &["A", "B"]).unwrap();
    assert_eq!(resolved(&h, "C1"), "C1, A, B, Root");
}

#[test]
fn every_class_resolves_deterministically() {
    let h = wikipedia();
    let config = Default::default();
    let first: Vec<String> = h
        .linearize_all(&config)
        .into_iter()
        .map(|(_, r)| r.unwrap().to_string())
        .collect();
    let second: Vec<String> = h
        .linearize_all(&config)
        .into_iter()
        .map(|(_, r)| r.unwrap().to_string())
        .collect();
    assert_eq!(first.len(), 10);
    assert_eq!(first, second);
}

#[test]
fn conflicting_branches_are_inconsistent() {
    let mut h = wikipedia();
    h.declare("X", &["A", "B"]).unwrap();
    h.declare("Y", &["B", "A"]).unwrap();
    h.declare("XY", &["X", "Y"]).unwrap();

    match h.linearize("XY") {
        Err(HierarchyError::Linearization(C3Error::Inconsistent { node, blocked })) => {
            assert_eq!(node.unwrap().as_str(), "XY");
            assert_eq!(blocked, names("A B"));
        }
        other => panic!("expected inconsistency, got {other:?}"),
    }
}

#[test]
fn descendant_of_inconsistent_class_fails_too() {
    let mut h = wikipedia();
    h.declare("Bad", &["Root", "A"]).unwrap();
    h.declare("Child", &["K1", "Bad"]).unwrap();
    let err = h.linearize("Child").unwrap_err();
    assert!(matches!(
        err.as_c3(),
        Some(C3Error::Inconsistent { node: Some(n), .. }) if n.as_str() == "Bad"
    ));
}

#[test]
fn redeclaring_a_name_is_rejected() {
    // Declarations are identities: a second `U` cannot shadow the first.
    let mut h = Hierarchy::new();
    h.declare::<&str>("Root", &[]).unwrap();
    h.declare("U", &["Root"]).unwrap();
    h.declare("T", &["U"]).unwrap();
    assert!(matches!(
        h.declare("U", &["T"]),
        Err(HierarchyError::DuplicateClass(_))
    ));
    assert_eq!(resolved(&h, "T"), "T, U, Root");
}

#[test]
fn snapshot_preserves_resolution() {
    let h = wikipedia();
    let restored = Hierarchy::from_bytes(&h.to_bytes().unwrap()).unwrap();
    assert_eq!(resolved(&restored, "Z"), resolved(&h, "Z"));
}
