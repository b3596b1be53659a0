//! Tests for source position tracking.

use decaf_core::{Location, Position};

#[test]
fn test_line_position() {
    let position = Position::line(7);
    assert_eq!(position.first_line(), 7);
    assert_eq!(position.start, position.end);
}

#[test]
fn test_contains() {
    let position = Position::new(Location::new(3, 5), Location::new(4, 2));

    assert!(position.contains(Location::new(3, 9)));
    assert!(position.contains(Location::new(4, 1)));
    assert!(!position.contains(Location::new(3, 4)));
    assert!(!position.contains(Location::new(4, 3)));
}

#[test]
fn test_join() {
    let left = Position::new(Location::new(2, 4), Location::new(2, 8));
    let right = Position::new(Location::new(2, 12), Location::new(5, 1));

    let joined = left.join(right);
    assert_eq!(joined.start, Location::new(2, 4));
    assert_eq!(joined.end, Location::new(5, 1));
    assert_eq!(joined, right.join(left));
}

#[test]
fn test_display() {
    let position = Position::new(Location::new(12, 3), Location::new(12, 9));
    assert_eq!(position.to_string(), "12:3");
}
