use crate::{USER_INFO_ELEMENT_ID, render_home};

use rnf_core::UserInfo;

use googletest::prelude::*;

#[test]
fn given_anonymous_user_then_default_greeting_without_user_info() {
    let html = render_home(None);

    assert_that!(html, contains_substring("Hello, world!"));
    assert_that!(html, not(contains_substring(USER_INFO_ELEMENT_ID)));
}

#[test]
fn given_signed_in_user_then_greeting_and_user_info_script() {
    let info = UserInfo {
        email: String::from("ada@example.com"),
        user_id: String::from("6f1c1f36-50a7-4f59-9d4e-4f2f4f3b2a10"),
    };

    let html = render_home(Some(&info));

    assert_that!(html, contains_substring("Hello, ada@example.com!"));
    assert_that!(
        html,
        contains_substring(r#"<script id="user-info" type="application/json">"#)
    );
    assert_that!(
        html,
        contains_substring(r#""userId":"6f1c1f36-50a7-4f59-9d4e-4f2f4f3b2a10""#)
    );
}

#[test]
fn given_markup_in_email_then_escaped_in_page_and_script() {
    let info = UserInfo {
        email: String::from("<b>@example.com"),
        user_id: String::from("1"),
    };

    let html = render_home(Some(&info));

    assert_that!(html, contains_substring("Hello, &lt;b&gt;@example.com!"));
    assert_that!(html, contains_substring(r#""email":"\u003cb>@example.com""#));
    assert_that!(html, not(contains_substring("<b>")));
}
