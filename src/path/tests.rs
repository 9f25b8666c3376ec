use super::{compile, MatcherKind, PatternError};

fn names(pattern: &super::PathPattern) -> Vec<&str> {
    pattern.param_names().iter().map(|n| n.as_ref()).collect()
}

#[test]
fn test_root_path() {
    let pattern = compile("/", false, false).unwrap();
    assert!(pattern.is_match("/"));
    assert!(!pattern.is_match("/a"));
    assert!(!pattern.contains_params());
}

#[test]
fn test_components_table() {
    struct Case {
        pattern: &'static str,
        matches: &'static str,
        rejects: Option<&'static str>,
        params: &'static [&'static str],
        strict: bool,
        prefix: bool,
    }

    let case = |pattern: &'static str,
                matches: &'static str,
                rejects: Option<&'static str>,
                params: &'static [&'static str]| Case {
        pattern,
        matches,
        rejects,
        params,
        strict: false,
        prefix: false,
    };

    let cases = [
        // strict vs non-strict
        case("/abc", "/abc", None, &[]),
        case("/abc", "/abc/", None, &[]),
        Case {
            strict: true,
            ..case("/abc", "/abc", Some("/abc/"), &[])
        },
        // wildcards
        case("/abc/*/def", "/abc//def", Some("/abc//ktz"), &[]),
        case("/ab*", "/abcdef/khi", Some("/def"), &[]),
        case("/*", "/", None, &[]),
        // params
        case("/:id", "/tab", Some("/"), &["id"]),
        case("/:i_d", "/tab", Some("/"), &["i_d"]),
        case("/:i-d/abc", "/tab/abc", Some("/tab/adc"), &["i-d"]),
        case("/:id1/abc/:id2", "/tab/abc/akad", Some("/tab/adc/akad"), &["id1", "id2"]),
        // prefix
        Case {
            prefix: true,
            ..case("/abc", "/abcdef", None, &[])
        },
        case("/abc", "/abc", Some("/abcdef"), &[]),
    ];

    for c in cases {
        let pattern = compile(c.pattern, c.strict, c.prefix).unwrap();
        assert!(
            pattern.is_match(c.matches),
            "{} should match {}",
            c.pattern,
            c.matches
        );
        if let Some(rejects) = c.rejects {
            assert!(
                !pattern.is_match(rejects),
                "{} should not match {}",
                c.pattern,
                rejects
            );
        }
        assert_eq!(names(&pattern), c.params, "params of {}", c.pattern);
    }
}

#[test]
fn test_parameter_order() {
    let pattern = compile("/:a/fixed/:b", false, false).unwrap();
    assert_eq!(names(&pattern), ["a", "b"]);

    let params = pattern.extract_params("/1/fixed/2");
    assert_eq!(params.len(), 2);
    assert_eq!((params[0].0.as_ref(), params[0].1.as_str()), ("a", "1"));
    assert_eq!((params[1].0.as_ref(), params[1].1.as_str()), ("b", "2"));
}

#[test]
fn test_params_ignore_wildcards_and_groups() {
    let pattern = compile("/*/:a/(x)?/:b(\\d+)/*", false, false).unwrap();
    let params = pattern.extract_params("/any/thing/one/x/42/rest");
    let values: Vec<&str> = params.iter().map(|(_, v)| v.as_str()).collect();
    assert_eq!(values, ["one", "42"]);
}

#[test]
fn test_optional_group() {
    let pattern = compile("/a(bc)?d", false, false).unwrap();
    assert!(pattern.is_match("/ad"));
    assert!(pattern.is_match("/abcd"));
    assert!(!pattern.is_match("/abd"));
    assert_eq!(pattern.matcher().kind(), MatcherKind::Pattern);
}

#[test]
fn test_required_group_is_literal() {
    let pattern = compile("/a(bc)d", true, false).unwrap();
    assert_eq!(pattern.matcher().kind(), MatcherKind::Exact);
    assert!(pattern.is_match("/a(bc)d"));
    assert!(!pattern.is_match("/abcd"));
}

#[test]
fn test_custom_param_pattern() {
    let pattern = compile("/:id(\\d+)", false, false).unwrap();
    assert!(pattern.is_match("/12345"));
    assert!(!pattern.is_match("/abc"));
    assert_eq!(pattern.extract_params("/12345")[0].1, "12345");
}

#[test]
fn test_custom_param_pattern_with_nested_groups() {
    let pattern = compile("/:kind((cat|dog)s)/:id", false, false).unwrap();
    assert!(pattern.is_match("/cats/1"));
    assert!(!pattern.is_match("/cows/1"));
    let params = pattern.extract_params("/dogs/7");
    assert_eq!(params[0].1, "dogs");
    assert_eq!(params[1].1, "7");
}

#[test]
fn test_param_name_ends_at_literal() {
    let pattern = compile("/files/:name.json", true, false).unwrap();
    assert_eq!(names(&pattern), ["name"]);
    assert_eq!(pattern.extract_params("/files/report.json")[0].1, "report");
    assert!(!pattern.is_match("/files/report.xml"));
}

#[test]
fn test_question_mark_makes_previous_optional() {
    let pattern = compile("/colou?r", true, false).unwrap();
    assert!(pattern.is_match("/color"));
    assert!(pattern.is_match("/colour"));
    assert!(!pattern.is_match("/colouur"));
}

#[test]
fn test_duplicate_param_names_are_kept() {
    let pattern = compile("/:id/x/:id", false, false).unwrap();
    assert_eq!(names(&pattern), ["id", "id"]);
    let params = pattern.extract_params("/1/x/2");
    assert_eq!(params.len(), 2);
    assert_eq!(params[1].1, "2");
}

#[test]
fn test_simple_patterns_skip_regex() {
    assert_eq!(
        compile("/users/list", false, false).unwrap().matcher().kind(),
        MatcherKind::Exact
    );
    assert_eq!(
        compile("/api", false, true).unwrap().matcher().kind(),
        MatcherKind::Prefix
    );
    assert_eq!(compile("/*", false, false).unwrap().matcher().kind(), MatcherKind::All);
    assert!(compile("/users/list", false, false).unwrap().matcher().regex().is_none());
}

#[test]
fn test_trailing_slash_in_simple_pattern() {
    let lenient = compile("/abc/", false, false).unwrap();
    assert!(lenient.is_match("/abc"));
    assert!(lenient.is_match("/abc/"));

    let strict = compile("/abc/", true, false).unwrap();
    assert!(strict.is_match("/abc/"));
    assert!(!strict.is_match("/abc"));
}

#[test]
fn test_trailing_slash_with_params() {
    let lenient = compile("/x/:p", false, false).unwrap();
    assert!(lenient.is_match("/x/5/"));
    assert_eq!(lenient.extract_params("/x/5/")[0].1, "5");

    let strict = compile("/x/:p", true, false).unwrap();
    assert!(!strict.is_match("/x/5/"));
}

#[test]
fn test_prefix_pattern_with_params() {
    let pattern = compile("/users/:id", false, true).unwrap();
    assert!(pattern.is_match("/users/7/posts"));
    assert!(!pattern.is_match("/groups/7"));
}

#[test]
fn test_invalid_patterns() {
    assert_eq!(compile("", false, false).unwrap_err(), PatternError::Empty);
    assert_eq!(
        compile("abc", false, false).unwrap_err(),
        PatternError::MissingLeadingSlash
    );
    assert_eq!(
        compile("/a(bc", false, false).unwrap_err(),
        PatternError::UnmatchedOpen { index: 2 }
    );
    assert_eq!(
        compile("/abc)", false, false).unwrap_err(),
        PatternError::UnmatchedClose { index: 4 }
    );
    assert_eq!(
        compile("/:/x", false, false).unwrap_err(),
        PatternError::MissingParamName { index: 1 }
    );
    assert_eq!(
        compile("/:id(\\d+", false, false).unwrap_err(),
        PatternError::UnmatchedOpen { index: 4 }
    );
    assert!(matches!(
        compile("/:id([a-)", false, false).unwrap_err(),
        PatternError::InvalidRegex { .. }
    ));
}

#[test]
fn test_error_messages() {
    let err = compile("/a(bc", false, false).unwrap_err();
    assert_eq!(err.to_string(), "invalid path pattern: unmatched '(' at index 2");
}
