//! Common test utilities
//!
//! Shared fixtures for the integration tests: a recorded page load as CDP
//! frames, and helpers to feed it through a bus.

#![allow(dead_code)]

use cdp_dispatch::cdp::EventBus;
use std::time::Duration;

/// A recorded page load, one CDP frame per line
pub const PAGE_LOAD_SESSION: &str = r#"
{"method":"Network.requestWillBeSent","params":{"requestId":"1","loaderId":"L","documentURL":"https://shop.test/","request":{"url":"https://shop.test/","method":"GET","headers":{}},"timestamp":1.0,"type":"Document","frameId":"F"}}
{"id":1,"result":{}}
{"method":"Network.responseReceived","params":{"requestId":"1","loaderId":"L","timestamp":1.1,"type":"Document","response":{"url":"https://shop.test/","status":200,"statusText":"OK","mimeType":"text/html","headers":{}},"frameId":"F"}}
{"method":"Page.frameNavigated","params":{"frame":{"id":"F","loaderId":"L","url":"https://shop.test/","securityOrigin":"https://shop.test","mimeType":"text/html"}}}
{"method":"Network.requestWillBeSent","params":{"requestId":"2","loaderId":"L","documentURL":"https://shop.test/","request":{"url":"https://shop.test/app.js","method":"GET","headers":{}},"timestamp":1.2,"type":"Script","frameId":"F"}}
{"method":"Network.requestWillBeSent","params":{"requestId":"3","loaderId":"L","documentURL":"https://shop.test/","request":{"url":"https://shop.test/style.css","method":"GET","headers":{}},"timestamp":1.3,"type":"Stylesheet","frameId":"F"}}
{"method":"Network.requestWillBeSent","params":{"requestId":"4","loaderId":"L","documentURL":"https://shop.test/","request":{"url":"https://tracker.test/pixel.js","method":"GET","headers":{}},"timestamp":1.4,"type":"Script","frameId":"F"}}
{"method":"Runtime.consoleAPICalled","params":{"type":"log","args":[{"type":"string","value":"boot"}],"executionContextId":1,"timestamp":1700000000000.0}}
{"method":"Network.requestWillBeSent","params":{"requestId":"5","request":"this is not a request object","timestamp":1.5}}
{"method":"Network.loadingFailed","params":{"requestId":"4","timestamp":1.6,"type":"Script","errorText":"net::ERR_BLOCKED_BY_CLIENT"}}
{"id":2,"error":{"code":-32000,"message":"Cannot find context with specified id"}}
{"method":"Page.domContentEventFired","params":{"timestamp":1.7}}
{"method":"Network.requestWillBeSent","params":{"requestId":"6","loaderId":"L","documentURL":"https://shop.test/","request":{"url":"https://shop.test/api/cart","method":"POST","headers":{},"hasPostData":true},"timestamp":1.8,"type":"XHR","frameId":"F"}}
{"method":"Page.loadEventFired","params":{"timestamp":1.9}}
"#;

/// Non-empty lines of a recorded session
pub fn frames(session: &str) -> impl Iterator<Item = &str> {
    session.lines().map(str::trim).filter(|l| !l.is_empty())
}

/// Publish a recorded session on `bus`; responses are dropped
pub fn replay(bus: &EventBus, session: &str) {
    for frame in frames(session) {
        bus.publish_message(frame).expect("fixture frames are valid JSON");
    }
}

/// Wait until `count` subscriptions are attached to `bus`
pub async fn wait_for_subscribers(bus: &EventBus, count: usize) {
    tokio::time::timeout(Duration::from_secs(1), bus.wait_for_subscribers(count))
        .await
        .expect("subscribers never attached");
}
