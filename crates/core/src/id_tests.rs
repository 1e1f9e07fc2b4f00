use super::*;

#[test]
fn ids_are_monotonically_increasing() {
    let a = ManagerId::next();
    let b = ManagerId::next();
    let c = ManagerId::next();
    assert!(a < b);
    assert!(b < c);
}

#[test]
fn ids_are_never_equal_across_allocations() {
    let a = ManagerId::next();
    let b = ManagerId::next();
    assert_ne!(a, b);
}

#[test]
fn display_includes_prefix() {
    let id = ManagerId::from_raw(42);
    assert_eq!(id.to_string(), "mgr-42");
}

#[test]
fn fixture_ids_compare_by_raw_value() {
    let low = ManagerId::from_raw(1);
    let high = ManagerId::from_raw(2);
    assert!(low < high);
}
