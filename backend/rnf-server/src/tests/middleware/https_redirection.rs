use crate::https_location;

use googletest::prelude::*;

#[test]
fn given_default_https_port_then_port_omitted() {
    let location = https_location("example.com", 443, "/path?x=1");

    assert_that!(location, some(eq("https://example.com/path?x=1")));
}

#[test]
fn given_custom_https_port_then_port_included() {
    let location = https_location("example.com", 8443, "/");

    assert_that!(location, some(eq("https://example.com:8443/")));
}

#[test]
fn given_host_with_http_port_then_port_replaced() {
    let location = https_location("localhost:5000", 5001, "/Account/Login");

    assert_that!(location, some(eq("https://localhost:5001/Account/Login")));
}

#[test]
fn given_invalid_host_then_none() {
    let location = https_location("bad host/name", 443, "/");

    assert_that!(location, none());
}
