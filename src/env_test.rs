use super::*;

#[test]
fn env_parse_falls_back_when_unset() {
    unsafe { std::env::remove_var("FOLIO_TEST_UNSET_NUMBER") };
    assert_eq!(env_parse("FOLIO_TEST_UNSET_NUMBER", 7_u32), 7);
}

#[test]
fn env_parse_falls_back_on_garbage() {
    unsafe { std::env::set_var("FOLIO_TEST_GARBAGE_NUMBER", "seven") };
    assert_eq!(env_parse("FOLIO_TEST_GARBAGE_NUMBER", 7_u32), 7);
    unsafe { std::env::remove_var("FOLIO_TEST_GARBAGE_NUMBER") };
}

#[test]
fn env_parse_reads_value() {
    unsafe { std::env::set_var("FOLIO_TEST_FLOAT", "0.25") };
    assert!((env_parse("FOLIO_TEST_FLOAT", 1.0_f32) - 0.25).abs() < f32::EPSILON);
    unsafe { std::env::remove_var("FOLIO_TEST_FLOAT") };
}

#[test]
fn env_string_ignores_blank() {
    unsafe { std::env::set_var("FOLIO_TEST_BLANK", "   ") };
    assert_eq!(env_string("FOLIO_TEST_BLANK"), None);
    unsafe { std::env::set_var("FOLIO_TEST_BLANK", " value ") };
    assert_eq!(env_string("FOLIO_TEST_BLANK").as_deref(), Some("value"));
    unsafe { std::env::remove_var("FOLIO_TEST_BLANK") };
}
