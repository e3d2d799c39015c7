// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::browser::BrowserError;
use proptest::prelude::*;

/// Page with `count` elements matching every locator
struct Elements {
    count: usize,
}

impl BrowserSession for Elements {
    fn visit(&mut self, _url: &str) -> Result<(), BrowserError> {
        Ok(())
    }

    fn find_all(&self, _locator: &Locator) -> Result<Vec<ElementHandle>, BrowserError> {
        Ok((0..self.count).map(|i| ElementHandle::new(1, i)).collect())
    }

    fn click(&mut self, _element: ElementHandle) -> Result<(), BrowserError> {
        Ok(())
    }

    fn mouse_over(&mut self, _element: ElementHandle) -> Result<(), BrowserError> {
        Ok(())
    }

    fn set_value(&mut self, _element: ElementHandle, _value: &str) -> Result<(), BrowserError> {
        Ok(())
    }

    fn text(&self, element: ElementHandle) -> Result<String, BrowserError> {
        Ok(format!("e{}", element.index() + 1))
    }

    fn value(&self, _element: ElementHandle) -> Result<String, BrowserError> {
        Ok(String::new())
    }

    fn has_attribute(&self, _element: ElementHandle, _name: &str) -> Result<bool, BrowserError> {
        Ok(false)
    }

    fn is_visible(&self, _element: ElementHandle) -> Result<bool, BrowserError> {
        Ok(true)
    }

    fn page_text(&mut self) -> Result<String, BrowserError> {
        Ok(String::new())
    }

    fn current_url(&self) -> Option<String> {
        None
    }

    fn stop(&mut self) -> Result<(), BrowserError> {
        Ok(())
    }
}

#[test]
fn test_second_of_three() {
    let browser = Elements { count: 3 };
    let handle = resolve_nth(&browser, &Locator::css("button"), Ordinal::new(2).unwrap()).unwrap();
    assert_eq!(browser.text(handle).unwrap(), "e2");
}

#[test]
fn test_fourth_of_three_reports_requested_and_found() {
    let browser = Elements { count: 3 };
    let err = resolve_nth(&browser, &Locator::css("button"), Ordinal::new(4).unwrap()).unwrap_err();
    match &err {
        StepError::ElementNotFound {
            locator,
            requested,
            found,
        } => {
            assert_eq!(locator, r#"css "button""#);
            assert_eq!(*requested, Some(4));
            assert_eq!(*found, 3);
        }
        other => panic!("expected ElementNotFound, got {:?}", other),
    }
    assert!(err.to_string().contains("requested 4, found 3"));
}

#[test]
fn test_no_matches_is_not_found() {
    let browser = Elements { count: 0 };
    let err = resolve_nth(&browser, &Locator::link("Edit"), Ordinal::FIRST).unwrap_err();
    assert!(err.to_string().contains("requested 1, found 0"));

    let err = find_one(&browser, &Locator::link("Edit")).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"The element link "Edit" was not found anywhere in the page"#
    );
}

#[test]
fn test_ordinal_zero_rejected() {
    assert!(matches!(
        Ordinal::new(0),
        Err(StepError::InvalidArgument { .. })
    ));
    assert!(matches!(
        Ordinal::parse("0"),
        Err(StepError::InvalidArgument { .. })
    ));
}

#[test]
fn test_ordinal_overflow_rejected() {
    assert!(matches!(
        Ordinal::parse("99999999999999999999999999"),
        Err(StepError::InvalidArgument { .. })
    ));
}

#[yare::parameterized(
    first = { 1, "1st" },
    second = { 2, "2nd" },
    third = { 3, "3rd" },
    fourth = { 4, "4th" },
    eleventh = { 11, "11th" },
    twelfth = { 12, "12th" },
    twenty_first = { 21, "21st" },
    hundred_thirteenth = { 113, "113th" },
)]
fn test_ordinal_display(n: usize, expected: &str) {
    assert_eq!(Ordinal::new(n).unwrap().to_string(), expected);
}

proptest! {
    #[test]
    fn prop_ordinal_selects_offset(count in 0usize..40, n in 1usize..50) {
        let browser = Elements { count };
        let result = resolve_nth(&browser, &Locator::css("li"), Ordinal::new(n).unwrap());
        if n <= count {
            let handle = result.unwrap();
            prop_assert_eq!(handle.index(), n - 1);
        } else {
            match result {
                Err(StepError::ElementNotFound { requested, found, .. }) => {
                    prop_assert_eq!(requested, Some(n));
                    prop_assert_eq!(found, count);
                }
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn prop_parse_roundtrips_digits(n in 1usize..1_000_000) {
        prop_assert_eq!(Ordinal::parse(&n.to_string()).unwrap().get(), n);
    }
}
