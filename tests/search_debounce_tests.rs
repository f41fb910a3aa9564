use std::time::Duration;

use dashboard_nav::{
    app::App, command::Command, config::NavConfig, debounce::Debouncer, providers::Translations,
    tree::NavTree,
};
use tokio::time::timeout;

fn debounced_app(delay: Duration) -> (App, tokio::sync::mpsc::Receiver<dashboard_nav::debounce::Debounced<String>>) {
    let mut app = App::new(NavTree::sample(), Translations::default(), NavConfig::default());
    let (debouncer, receiver) = Debouncer::new(delay);
    app.enable_debounced_search(debouncer);
    (app, receiver)
}

#[tokio::test(start_paused = true)]
async fn test_typing_burst_applies_one_query() {
    let (mut app, mut receiver) = debounced_app(Duration::from_millis(400));
    app.apply_command(Command::StartSearch).unwrap();

    for ch in "stud".chars() {
        app.apply_command(Command::SearchInput(ch)).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert!(app.navigator.get_search_query().is_empty());

    let delivery = timeout(Duration::from_secs(1), receiver.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(delivery.value, "stud");
    assert!(app.apply_search_delivery(delivery).unwrap());
    assert_eq!(app.navigator.get_search_query(), "stud");
    assert!(receiver.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_escape_cancels_pending_query() {
    let (mut app, mut receiver) = debounced_app(Duration::from_millis(400));
    app.apply_command(Command::StartSearch).unwrap();
    app.apply_command(Command::SearchInput('x')).unwrap();
    app.apply_command(Command::EndSearch).unwrap();

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(receiver.try_recv().is_err());
    assert!(app.navigator.get_search_query().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_stale_delivery_is_ignored() {
    let (mut app, mut receiver) = debounced_app(Duration::from_millis(50));
    app.apply_command(Command::StartSearch).unwrap();
    app.apply_command(Command::SearchInput('p')).unwrap();

    let stale = receiver.recv().await.unwrap();
    app.apply_command(Command::SearchInput('a')).unwrap();

    assert!(!app.apply_search_delivery(stale).unwrap());
    assert!(app.navigator.get_search_query().is_empty());

    let fresh = receiver.recv().await.unwrap();
    assert_eq!(fresh.value, "pa");
    assert!(app.apply_search_delivery(fresh).unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_accept_search_skips_the_wait() {
    let (mut app, mut receiver) = debounced_app(Duration::from_millis(400));
    app.apply_command(Command::StartSearch).unwrap();
    for ch in "pay".chars() {
        app.apply_command(Command::SearchInput(ch)).unwrap();
    }
    app.apply_command(Command::AcceptSearch).unwrap();

    assert_eq!(app.navigator.get_search_query(), "pay");
    assert!(!app.navigator.is_searching());
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(receiver.try_recv().is_err());
}
