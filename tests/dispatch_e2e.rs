//! End-to-end dispatch tests
//!
//! These tests replay a recorded page load through an `EventBus` and
//! observe it with typed loops, the way an automation client would.

mod common;

use cdp_dispatch::cdp::{EventBus, EventSource};
use cdp_dispatch::dispatch::{each_event, DecodeFailurePolicy, EventLoop, LoopExit};
use cdp_dispatch::pattern::UrlFilter;
use cdp_dispatch::proto::network::{LoadingFailed, RequestWillBeSent};
use cdp_dispatch::proto::page::{FrameNavigated, LoadEventFired};
use cdp_dispatch::proto::runtime::ConsoleApiCalled;
use cdp_dispatch::proto::AnyEvent;
use cdp_dispatch::Error;
use common::{frames, replay, wait_for_subscribers, PAGE_LOAD_SESSION};
use futures_util::StreamExt;

/// Test 1: Filtered request tail
#[tokio::test]
async fn test_request_tail_with_url_filter() {
    let bus = EventBus::new();
    let filter = UrlFilter::new(&[r"\.js$", r"/api/"], &["tracker"]).unwrap();

    let task = {
        let bus = bus.clone();
        tokio::spawn(async move {
            let mut urls = Vec::new();
            let exit = each_event(&bus, |e: RequestWillBeSent| {
                if filter.admits(&e.request.url) {
                    urls.push(e.request.url);
                }
            })
            .await
            .unwrap();
            (exit, urls)
        })
    };

    wait_for_subscribers(&bus, 1).await;
    replay(&bus, PAGE_LOAD_SESSION);
    bus.close();

    let (exit, urls) = task.await.unwrap();
    assert_eq!(exit, LoopExit::SourceClosed);
    assert_eq!(urls, vec!["https://shop.test/app.js", "https://shop.test/api/cart"]);
    assert_eq!(bus.subscriber_count(), 0);
}

/// Test 2: Several kinds observed concurrently from one bus
#[tokio::test]
async fn test_concurrent_loops_per_event_kind() {
    let bus = EventBus::new();

    let requests = {
        let bus = bus.clone();
        tokio::spawn(async move {
            let mut ids = Vec::new();
            each_event(&bus, |e: RequestWillBeSent| ids.push(e.request_id))
                .await
                .unwrap();
            ids
        })
    };

    let console = {
        let bus = bus.clone();
        tokio::spawn(async move {
            let mut lines = Vec::new();
            each_event(&bus, |e: ConsoleApiCalled| lines.push(e.text()))
                .await
                .unwrap();
            lines
        })
    };

    let load = {
        let bus = bus.clone();
        tokio::spawn(async move {
            let mut fired_at = None;
            let exit = each_event(&bus, |e: LoadEventFired| {
                fired_at = Some(e.timestamp);
                true
            })
            .await
            .unwrap();
            (exit, fired_at)
        })
    };

    wait_for_subscribers(&bus, 3).await;
    replay(&bus, PAGE_LOAD_SESSION);

    // The load loop stops on its own; the others run until the bus closes
    let (exit, fired_at) = load.await.unwrap();
    assert_eq!(exit, LoopExit::Stopped);
    assert_eq!(fired_at, Some(1.9));
    assert_eq!(bus.subscriber_count(), 2);

    bus.close();
    // Request 5 carries a malformed payload and is skipped
    assert_eq!(requests.await.unwrap(), vec!["1", "2", "3", "4", "6"]);
    assert_eq!(console.await.unwrap(), vec!["boot"]);
}

/// Test 3: Strict decoding surfaces schema mismatches
#[tokio::test]
async fn test_strict_loop_stops_on_schema_mismatch() {
    let bus = EventBus::new();

    let strict = {
        let bus = bus.clone();
        tokio::spawn(async move {
            let mut seen = 0;
            let result = EventLoop::new(&bus)
                .decode_policy(DecodeFailurePolicy::Fail)
                .run(|_: RequestWillBeSent| seen += 1)
                .await;
            (result, seen)
        })
    };

    let failures = {
        let bus = bus.clone();
        tokio::spawn(async move {
            let mut errors = Vec::new();
            EventLoop::new(&bus)
                .decode_policy(DecodeFailurePolicy::Fail)
                .run(|e: LoadingFailed| errors.push(e.error_text))
                .await
                .unwrap();
            errors
        })
    };

    wait_for_subscribers(&bus, 2).await;
    replay(&bus, PAGE_LOAD_SESSION);
    bus.close();

    let (result, seen) = strict.await.unwrap();
    match result {
        Err(Error::Decode { method, .. }) => assert_eq!(method, "Network.requestWillBeSent"),
        other => panic!("Expected decode error, got {:?}", other),
    }
    assert_eq!(seen, 4);
    assert_eq!(failures.await.unwrap(), vec!["net::ERR_BLOCKED_BY_CLIENT"]);
}

/// Test 4: Untyped consumption through the closed event set
#[tokio::test]
async fn test_any_event_over_subscription_stream() {
    let bus = EventBus::new();
    let subscription = bus.subscribe();

    replay(&bus, PAGE_LOAD_SESSION);
    bus.close();

    let decoded: Vec<_> = subscription
        .map(|raw| AnyEvent::decode(&raw))
        .collect()
        .await;

    assert_eq!(decoded.len(), 12);
    assert_eq!(decoded.iter().filter(|d| d.is_err()).count(), 1);

    let methods: Vec<&str> = decoded
        .iter()
        .filter_map(|d| d.as_ref().ok().and_then(|e| e.as_ref()))
        .map(AnyEvent::method_name)
        .collect();
    assert_eq!(methods.first(), Some(&"Network.requestWillBeSent"));
    assert_eq!(methods.last(), Some(&"Page.loadEventFired"));

    let navigated = decoded.iter().find_map(|d| match d {
        Ok(Some(AnyEvent::FrameNavigated(FrameNavigated { frame }))) => Some(frame.clone()),
        _ => None,
    });
    let frame = navigated.expect("frame navigation recorded");
    assert!(frame.is_main());
    assert_eq!(frame.url, "https://shop.test/");
}

/// Test 5: Responses are handed back, not broadcast
#[tokio::test]
async fn test_responses_bypass_subscribers() {
    let bus = EventBus::new();
    let mut subscription = bus.subscribe();

    let responses: Vec<_> = frames(PAGE_LOAD_SESSION)
        .filter_map(|frame| bus.publish_message(frame).unwrap())
        .collect();
    assert_eq!(responses.len(), 2);

    let errors: Vec<Error> = responses
        .into_iter()
        .filter_map(|r| r.into_result().err())
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].is_nil_context());

    bus.close();
    let mut notifications = 0;
    while subscription.recv().await.is_some() {
        notifications += 1;
    }
    assert_eq!(notifications, 12);
}
