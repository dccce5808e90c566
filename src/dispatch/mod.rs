//! # Typed event dispatch
//!
//! Turns the raw CDP event stream into calls to strongly-typed handlers.
//!
//! ## Module structure
//! - `matcher`: tag comparison and lazy payload decoding for one event
//! - `filter`: reusable predicate bound to one decode target
//! - `each`: subscription loop with handler-driven early exit and cancellation
//!
//! ## Example
//! ```rust,no_run
//! use cdp_dispatch::cdp::EventBus;
//! use cdp_dispatch::dispatch::each_event;
//! use cdp_dispatch::proto::network::RequestWillBeSent;
//!
//! # async fn example(bus: EventBus) -> cdp_dispatch::Result<()> {
//! let mut seen = 0;
//! each_event(&bus, |e: RequestWillBeSent| {
//!     println!("{} {}", e.request.method, e.request.url);
//!     seen += 1;
//!     seen == 10
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod matcher;
pub mod filter;
pub mod each;


pub use matcher::{decode_event, event_matches};
pub use filter::{DecodeFailurePolicy, EventFilter};
pub use each::{each_event, each_event_until, EventLoop, Flow, HandlerFlow, LoopExit};
