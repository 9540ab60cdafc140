//! Tests for console tree rendering

use orgtree::domain::HierarchyBuilder;
use orgtree::tree_traits::{TreeNodeConvert, DEFAULT_TREE_DEPTH};
use orgtree::util::testing::{chain, init_test_setup};

#[test]
fn given_very_deep_chain_when_rendering_then_does_not_overflow_stack() {
    // Arrange
    init_test_setup();
    let n = 50_000;
    let mut employees = chain(n, 1000);
    employees.reverse();
    let hierarchy = HierarchyBuilder::new()
        .build(&employees)
        .unwrap()
        .into_hierarchy();

    // Act
    let rendered = hierarchy.to_tree_string(DEFAULT_TREE_DEPTH).to_string();

    // Assert
    let hidden = n as usize - 1 - DEFAULT_TREE_DEPTH;
    assert!(rendered.starts_with("First1 Last1 (1) [1000]"));
    assert!(rendered.contains(&format!("… {hidden} more levels")));
    assert_eq!(rendered.lines().count(), DEFAULT_TREE_DEPTH + 2);
}
