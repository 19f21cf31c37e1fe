use crate::scopes;

use googletest::assert_that;
use googletest::prelude::eq;

#[test]
fn given_no_scope_when_read_then_empty() {
    assert_that!(scopes::current().len(), eq(0));
}

#[test]
fn given_nested_sync_scopes_when_read_then_outermost_first() {
    let inner = scopes::sync_scope("request", || scopes::sync_scope("handler", scopes::current));

    assert_eq!(inner, vec![String::from("request"), String::from("handler")]);
}

#[test]
fn given_scope_exited_when_read_then_restored() {
    let inside = scopes::sync_scope("request", || {
        scopes::sync_scope("handler", || ());
        scopes::current()
    });

    assert_eq!(inside, vec![String::from("request")]);
    assert!(scopes::current().is_empty());
}

#[tokio::test]
async fn given_async_scope_when_awaited_then_visible_across_await_points() {
    let seen = scopes::in_scope("GET /", async {
        tokio::task::yield_now().await;
        scopes::in_scope("home", async { scopes::current() }).await
    })
    .await;

    assert_eq!(seen, vec![String::from("GET /"), String::from("home")]);
}

#[tokio::test]
async fn given_spawned_task_when_read_then_scope_not_inherited() {
    let seen = scopes::in_scope("GET /", async {
        tokio::spawn(async { scopes::current() }).await.unwrap()
    })
    .await;

    assert!(seen.is_empty());
}
