//! Property-based tests for exclusion matching

use mtc::ignore::{glob_match, Matcher, PatternMatcher};
use proptest::collection::vec;
use proptest::prelude::*;

/// `important.log` survives `*.log` at any depth; `other.log` never does.
#[test]
fn test_negation_law_at_any_depth() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let matcher = PatternMatcher::new(&["*.log", "!important.log"]);

    runner
        .run(&vec("[a-z]{1,8}", 0..6), |dirs: Vec<String>| {
            let prefix = if dirs.is_empty() {
                String::new()
            } else {
                format!("{}/", dirs.join("/"))
            };
            let important = format!("{}important.log", prefix);
            let other = format!("{}other.log", prefix);

            prop_assert!(!matcher.matches(&important, false));
            prop_assert!(!matcher.matches("important.log", false));
            prop_assert!(matcher.matches(&other, false));
            prop_assert!(matcher.matches("other.log", false));
            Ok(())
        })
        .unwrap();
}

/// Pattern order never changes the outcome.
#[test]
fn test_pattern_order_is_irrelevant() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(vec("[a-z]{1,4}/?", 1..4), "[a-z]{1,4}(/[a-z]{1,4}){0,3}", any::<bool>()),
            |(dirs, path, is_dir)| {
                let mut patterns: Vec<String> = dirs.clone();
                patterns.push(format!("!{}", dirs[0]));
                let forward = PatternMatcher::new(&patterns);
                patterns.reverse();
                let backward = PatternMatcher::new(&patterns);

                prop_assert_eq!(forward.matches(&path, is_dir), backward.matches(&path, is_dir));
                Ok(())
            },
        )
        .unwrap();
}

/// A wildcard-free pattern matches only itself; `*` matches anything.
#[test]
fn test_glob_literal_and_star() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&("[a-z0-9._-]{1,12}", "[a-z0-9._-]{1,12}"), |(a, b)| {
            prop_assert!(glob_match(&a, &a));
            prop_assert_eq!(glob_match(&a, &b), a == b);
            prop_assert!(glob_match("*", &b));
            let (prefix_pattern, extended) = (format!("{}*", a), format!("{}{}", a, b));
            prop_assert!(glob_match(&prefix_pattern, &extended));
            Ok(())
        })
        .unwrap();
}
