/// Tagged value contract tests: construction, representation, comparison.
///
/// Comparison rules are dispatched on the left operand's kind, so several
/// tests check both call directions explicitly.
use threes_core::{Comparison, Kind, TaggedValue};

// ============================================================================
// Construction
// ============================================================================

#[test]
fn constructors_fix_the_kind() {
    let cases = [
        (TaggedValue::integer(9), Kind::Integer),
        (TaggedValue::unsigned(9), Kind::Unsigned),
        (TaggedValue::float32(9.0), Kind::Float32),
        (TaggedValue::float64(9.0), Kind::Float64),
        (TaggedValue::string("Test"), Kind::String),
        (TaggedValue::character('X'), Kind::Character),
        (TaggedValue::pointer(3usize as *const u8), Kind::Pointer),
        (TaggedValue::none(), Kind::None),
    ];
    for (value, kind) in cases {
        assert_eq!(value.kind(), kind, "{value:?}");
    }
}

#[test]
fn constructors_keep_the_payload() {
    assert_eq!(TaggedValue::integer(-9), TaggedValue::Integer(-9));
    assert_eq!(TaggedValue::unsigned(9), TaggedValue::Unsigned(9));
    assert_eq!(TaggedValue::string("Test"), TaggedValue::String("Test".into()));
    assert_eq!(TaggedValue::character('X'), TaggedValue::Character('X'));
}

#[test]
fn from_primitives() {
    assert_eq!(TaggedValue::from(4i32).kind(), Kind::Integer);
    assert_eq!(TaggedValue::from(4u32).kind(), Kind::Unsigned);
    assert_eq!(TaggedValue::from(4.0f32).kind(), Kind::Float32);
    assert_eq!(TaggedValue::from(4.0f64).kind(), Kind::Float64);
    assert_eq!(TaggedValue::from('c').kind(), Kind::Character);
    assert_eq!(TaggedValue::from("s").kind(), Kind::String);
    assert_eq!(TaggedValue::from(String::from("s")).kind(), Kind::String);
}

#[test]
fn numeric_kinds() {
    assert!(Kind::Integer.is_numeric());
    assert!(Kind::Unsigned.is_numeric());
    assert!(Kind::Float32.is_numeric());
    assert!(Kind::Float64.is_numeric());
    assert!(!Kind::String.is_numeric());
    assert!(!Kind::Character.is_numeric());
    assert!(!Kind::Pointer.is_numeric());
    assert!(!Kind::None.is_numeric());
}

// ============================================================================
// Representation
// ============================================================================

#[test]
fn repr_integer() {
    assert_eq!(TaggedValue::integer(3).repr(), "3");
    assert_eq!(TaggedValue::integer(-42).repr(), "-42");
    assert_eq!(TaggedValue::integer(i32::MIN).repr(), "-2147483648");
}

#[test]
fn repr_unsigned() {
    assert_eq!(TaggedValue::unsigned(80).repr(), "80");
    assert_eq!(TaggedValue::unsigned(u32::MAX).repr(), "4294967295");
}

#[test]
fn repr_floats_use_six_fraction_digits() {
    assert_eq!(TaggedValue::float32(1.5).repr(), "1.500000");
    assert_eq!(TaggedValue::float64(224.444551).repr(), "224.444551");
    assert_eq!(TaggedValue::float64(-0.25).repr(), "-0.250000");
}

#[test]
fn repr_non_finite_floats() {
    assert_eq!(TaggedValue::float64(f64::NAN).repr(), "nan");
    assert_eq!(TaggedValue::float64(-f64::NAN).repr(), "-nan");
    assert_eq!(TaggedValue::float32(f32::INFINITY).repr(), "inf");
    assert_eq!(TaggedValue::float64(f64::NEG_INFINITY).repr(), "-inf");
}

#[test]
fn repr_string_and_character_are_quoted() {
    assert_eq!(TaggedValue::string("Queue").repr(), "'Queue'");
    assert_eq!(TaggedValue::string("").repr(), "''");
    assert_eq!(TaggedValue::character('W').repr(), "'W'");
}

#[test]
fn repr_long_string_is_not_truncated() {
    let long = "a".repeat(100);
    assert_eq!(TaggedValue::string(long.clone()).repr(), format!("'{long}'"));
}

#[test]
fn repr_pointer_is_an_address_tag() {
    let repr = TaggedValue::pointer(0x1000usize as *const u8).repr();
    assert_eq!(repr, "&{0x1000}");
}

#[test]
fn repr_none() {
    assert_eq!(TaggedValue::none().repr(), "NONE");
}

#[test]
fn display_reports_success() {
    assert!(TaggedValue::integer(7).display().is_ok());
}

#[test]
fn display_trait_matches_repr() {
    let value = TaggedValue::float32(2.0);
    assert_eq!(format!("{value}"), value.repr());
}

// ============================================================================
// Numeric comparison
// ============================================================================

#[test]
fn integer_against_numerics() {
    let three = TaggedValue::integer(3);
    assert_eq!(three.compare(&TaggedValue::unsigned(1)), Comparison::Greater);
    assert_eq!(three.compare(&TaggedValue::float32(3.4)), Comparison::Less);
    assert_eq!(three.compare(&TaggedValue::float64(3.0)), Comparison::Equal);
}

#[test]
fn unsigned_against_numerics() {
    let three = TaggedValue::unsigned(3);
    assert_eq!(three.compare(&TaggedValue::float32(1.0)), Comparison::Greater);
    assert_eq!(three.compare(&TaggedValue::float64(4.0)), Comparison::Less);
    assert_eq!(three.compare(&TaggedValue::integer(3)), Comparison::Equal);
}

#[test]
fn float32_against_numerics() {
    let three = TaggedValue::float32(3.0);
    assert_eq!(three.compare(&TaggedValue::float64(1.0)), Comparison::Greater);
    assert_eq!(three.compare(&TaggedValue::unsigned(4)), Comparison::Less);
    assert_eq!(three.compare(&TaggedValue::integer(3)), Comparison::Equal);
}

#[test]
fn float64_against_numerics() {
    let three = TaggedValue::float64(3.0);
    assert_eq!(three.compare(&TaggedValue::float32(1.0)), Comparison::Greater);
    assert_eq!(three.compare(&TaggedValue::unsigned(4)), Comparison::Less);
    assert_eq!(three.compare(&TaggedValue::integer(3)), Comparison::Equal);
}

#[test]
fn negative_integer_below_unsigned() {
    assert_eq!(
        TaggedValue::integer(-1).compare(&TaggedValue::unsigned(0)),
        Comparison::Less
    );
}

#[test]
fn is_nan_only_for_nan_floats() {
    assert!(TaggedValue::float64(f64::NAN).is_nan());
    assert!(TaggedValue::float32(f32::NAN).is_nan());
    assert!(!TaggedValue::float64(1.0).is_nan());
    assert!(!TaggedValue::string("nan").is_nan());
}

#[test]
fn nan_is_incomparable() {
    let nan = TaggedValue::float64(f64::NAN);
    assert_eq!(nan.compare(&TaggedValue::integer(0)), Comparison::Different);
    assert_eq!(TaggedValue::integer(0).compare(&nan), Comparison::Different);
    assert_eq!(nan.compare(&nan.clone()), Comparison::Different);
}

#[test]
fn numerics_against_non_numerics_are_different() {
    let others = [
        TaggedValue::string("test"),
        TaggedValue::character('x'),
        TaggedValue::pointer(std::ptr::null::<u8>()),
        TaggedValue::none(),
    ];
    let numerics = [
        TaggedValue::integer(3),
        TaggedValue::unsigned(3),
        TaggedValue::float32(3.0),
        TaggedValue::float64(3.0),
    ];
    for n in &numerics {
        for o in &others {
            assert_eq!(n.compare(o), Comparison::Different, "{n:?} vs {o:?}");
            assert_eq!(o.compare(n), Comparison::Different, "{o:?} vs {n:?}");
        }
    }
}

// ============================================================================
// Characters and strings
// ============================================================================

#[test]
fn character_against_character() {
    let b = TaggedValue::character('b');
    assert_eq!(b.compare(&TaggedValue::character('a')), Comparison::Greater);
    assert_eq!(b.compare(&TaggedValue::character('b')), Comparison::Equal);
    assert_eq!(b.compare(&TaggedValue::character('c')), Comparison::Less);
}

#[test]
fn character_against_empty_string() {
    let empty = TaggedValue::string("");
    assert_eq!(TaggedValue::character('x').compare(&empty), Comparison::Greater);
    assert_eq!(TaggedValue::character('\0').compare(&empty), Comparison::Equal);
}

#[test]
fn empty_string_against_character() {
    let empty = TaggedValue::string("");
    assert_eq!(empty.compare(&TaggedValue::character('x')), Comparison::Less);
    assert_eq!(empty.compare(&TaggedValue::character('\0')), Comparison::Equal);
}

#[test]
fn character_against_string_looks_at_first_character() {
    let c = TaggedValue::character('m');
    assert_eq!(c.compare(&TaggedValue::string("a")), Comparison::Greater);
    assert_eq!(c.compare(&TaggedValue::string("zebra")), Comparison::Less);
    assert_eq!(c.compare(&TaggedValue::string("m")), Comparison::Equal);
    // Only the first character counts from this direction.
    assert_eq!(c.compare(&TaggedValue::string("moon")), Comparison::Equal);
}

#[test]
fn string_against_character() {
    let s = TaggedValue::string("test string");
    assert_eq!(s.compare(&TaggedValue::character('a')), Comparison::Greater);
    assert_eq!(s.compare(&TaggedValue::character('z')), Comparison::Less);
    // A longer string sharing the first character ranks above the character.
    assert_eq!(s.compare(&TaggedValue::character('t')), Comparison::Greater);
    assert_eq!(
        TaggedValue::string("t").compare(&TaggedValue::character('t')),
        Comparison::Equal
    );
}

#[test]
fn string_character_tie_is_asymmetric() {
    let s = TaggedValue::string("moon");
    let c = TaggedValue::character('m');
    assert_eq!(s.compare(&c), Comparison::Greater);
    assert_eq!(c.compare(&s), Comparison::Equal);
}

#[test]
fn string_against_string_is_lexicographic() {
    let abc = TaggedValue::string("abc");
    assert_eq!(abc.compare(&TaggedValue::string("abd")), Comparison::Less);
    assert_eq!(abc.compare(&TaggedValue::string("abc")), Comparison::Equal);
    assert_eq!(abc.compare(&TaggedValue::string("ab")), Comparison::Greater);
    assert_eq!(abc.compare(&TaggedValue::string("")), Comparison::Greater);
    assert_eq!(abc.compare(&TaggedValue::string("B")), Comparison::Greater);
}

#[test]
fn strings_and_characters_against_pointer_and_none() {
    let p = TaggedValue::pointer(std::ptr::null::<u8>());
    for v in [TaggedValue::string("s"), TaggedValue::character('s')] {
        assert_eq!(v.compare(&p), Comparison::Different);
        assert_eq!(v.compare(&TaggedValue::none()), Comparison::Different);
    }
}

// ============================================================================
// Pointers and None
// ============================================================================

#[test]
fn pointers_order_by_address() {
    let low = TaggedValue::pointer(0x10usize as *const u8);
    let high = TaggedValue::pointer(0x20usize as *const u8);
    assert_eq!(low.compare(&high), Comparison::Less);
    assert_eq!(high.compare(&low), Comparison::Greater);
    assert_eq!(low.compare(&low.clone()), Comparison::Equal);
}

#[test]
fn pointer_to_real_data_is_never_read() {
    let data = [1u8, 2, 3];
    let first = TaggedValue::pointer(&data[0] as *const u8);
    let second = TaggedValue::pointer(&data[1] as *const u8);
    assert_eq!(first.compare(&second), Comparison::Less);
}

#[test]
fn none_equals_only_none() {
    let none = TaggedValue::none();
    assert_eq!(none.compare(&TaggedValue::none()), Comparison::Equal);
    assert_eq!(none.compare(&TaggedValue::integer(0)), Comparison::Different);
    assert_eq!(none.compare(&TaggedValue::string("")), Comparison::Different);
}

// ============================================================================
// Comparison helpers
// ============================================================================

#[test]
fn comparison_reverse() {
    assert_eq!(Comparison::Less.reverse(), Comparison::Greater);
    assert_eq!(Comparison::Greater.reverse(), Comparison::Less);
    assert_eq!(Comparison::Equal.reverse(), Comparison::Equal);
    assert_eq!(Comparison::Different.reverse(), Comparison::Different);
}

#[test]
fn comparison_to_ordering() {
    use std::cmp::Ordering;
    assert_eq!(Comparison::Less.to_ordering(), Some(Ordering::Less));
    assert_eq!(Comparison::Different.to_ordering(), None);
    assert_eq!(Comparison::from(Ordering::Greater), Comparison::Greater);
    assert!(Comparison::Different.is_different());
    assert!(!Comparison::Equal.is_different());
}

#[test]
fn comparison_display() {
    assert_eq!(Comparison::Different.to_string(), "DIFFERENT");
    assert_eq!(Comparison::Less.to_string(), "LESS");
}
