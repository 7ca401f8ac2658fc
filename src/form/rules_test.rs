use super::*;

#[test]
fn contact_table_builds() {
    assert!(RuleTable::contact().is_ok());
}

#[test]
fn contact_name_rule_bounds_and_pattern() {
    let table = RuleTable::contact().unwrap();
    let rule = table.rule(FieldName::Name);
    assert!(rule.required);
    assert_eq!(rule.min_length, Some(2));
    assert_eq!(rule.max_length, Some(50));
    assert!(rule.pattern.is_some());
    assert_eq!(rule.message(FailureKind::Pattern), "Please use only letters and spaces");
}

#[test]
fn contact_email_rule_has_pattern_but_no_length_bounds() {
    let table = RuleTable::contact().unwrap();
    let rule = table.rule(FieldName::Email);
    assert_eq!(rule.min_length, None);
    assert_eq!(rule.max_length, None);
    assert_eq!(rule.message(FailureKind::Required), "Please enter your email");
}

#[test]
fn contact_subject_and_message_have_no_pattern() {
    let table = RuleTable::contact().unwrap();
    assert!(table.rule(FieldName::Subject).pattern.is_none());
    assert!(table.rule(FieldName::Message).pattern.is_none());
    assert_eq!(table.rule(FieldName::Message).max_length, Some(1000));
}

#[test]
fn missing_message_falls_back() {
    let rule = ValidationRule::required();
    assert_eq!(rule.message(FailureKind::Required), FALLBACK_MESSAGE);
}

#[test]
fn invalid_pattern_is_a_setup_error() {
    let err = ValidationRule::default().with_pattern("([unclosed").unwrap_err();
    assert!(matches!(err, SetupError::InvalidPattern(_)));
}

#[test]
fn failure_kind_keys_match_rule_vocabulary() {
    let keys = [FailureKind::Required, FailureKind::MinLength, FailureKind::MaxLength, FailureKind::Pattern]
        .map(FailureKind::as_str);
    assert_eq!(keys, ["required", "minLength", "maxLength", "pattern"]);
}
