use proptest::prelude::*;
use routewerk::compile;

/// One template segment: a literal or a named parameter
fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}",
        "[a-z]{1,6}".prop_map(|name| format!(":{name}")),
    ]
}

fn template() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..5).prop_map(|segments| format!("/{}", segments.join("/")))
}

/// A path that matches `template`, built by filling in parameters
fn concrete(template: &str, fill: &str) -> String {
    template
        .split('/')
        .map(|part| if part.starts_with(':') { fill } else { part })
        .collect::<Vec<_>>()
        .join("/")
}

proptest! {
    #[test]
    fn lenient_patterns_tolerate_one_trailing_slash(template in template(), fill in "[a-z0-9]{1,6}") {
        let pattern = compile(&template, false, false).unwrap();
        let path = concrete(&template, &fill);
        prop_assert!(pattern.is_match(&path));
        prop_assert_eq!(pattern.is_match(&path), pattern.is_match(&format!("{path}/")));
    }

    #[test]
    fn strict_patterns_reject_trailing_slash(template in template(), fill in "[a-z0-9]{1,6}") {
        let pattern = compile(&template, true, false).unwrap();
        let path = concrete(&template, &fill);
        prop_assert!(pattern.is_match(&path));
        let slashed = format!("{path}/");
        prop_assert!(!pattern.is_match(&slashed));
    }

    #[test]
    fn extracted_params_follow_template_order(template in template(), fill in "[a-z0-9]{1,6}") {
        let pattern = compile(&template, false, false).unwrap();
        let params = pattern.extract_params(&concrete(&template, &fill));
        let names: Vec<&str> = params.iter().map(|(name, _)| name.as_ref()).collect();
        let declared: Vec<&str> = pattern.param_names().iter().map(|name| name.as_ref()).collect();
        prop_assert_eq!(names, declared);
        prop_assert!(params.iter().all(|(_, value)| value == &fill));
    }

    #[test]
    fn compile_never_panics(template in "/[a-z:*()?/]{0,12}") {
        let _ = compile(&template, false, false);
    }
}
