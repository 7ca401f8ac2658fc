use super::*;

#[test]
fn label_shows_count_over_limit() {
    assert_eq!(CharacterCount::new("hello", 50).label(), "5/50");
}

#[test]
fn counts_untrimmed_characters() {
    assert_eq!(CharacterCount::new("  hé  ", 10).current, 6);
}

#[test]
fn astral_characters_count_as_two_units() {
    assert_eq!(CharacterCount::new("hi 😀", 10).current, 5);
}

#[test]
fn at_eighty_percent_is_still_normal() {
    assert_eq!(CharacterCount { current: 40, max: 50 }.level(), CounterLevel::Normal);
}

#[test]
fn past_eighty_percent_warns() {
    assert_eq!(CharacterCount { current: 41, max: 50 }.level(), CounterLevel::Warning);
    assert_eq!(CharacterCount { current: 1000, max: 1000 }.level(), CounterLevel::Warning);
}

#[test]
fn past_limit_is_error() {
    assert_eq!(CharacterCount { current: 1001, max: 1000 }.level(), CounterLevel::Error);
}

#[test]
fn error_level_sorts_above_warning() {
    assert!(CounterLevel::Error > CounterLevel::Warning);
    assert!(CounterLevel::Warning > CounterLevel::Normal);
}
