//! Request tail
//!
//! Reads CDP frames, one JSON object per line, publishes them on a private
//! [`EventBus`] and writes every admitted `Network.requestWillBeSent` as
//! `METHOD URL`. The run ends when the input ends, after `stop_after`
//! admitted requests, or when the cancellation token fires; the input is
//! abandoned in the last two cases.

use crate::cdp::EventBus;
use crate::config::Config;
use crate::dispatch::{DecodeFailurePolicy, EventLoop, LoopExit};
use crate::error::{Error, Result};
use crate::pattern::UrlFilter;
use crate::proto::network::RequestWillBeSent;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// How a tail run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailSummary {
    /// Why the dispatch loop returned
    pub exit: LoopExit,
    /// Requests written to the output
    pub printed: usize,
}

/// Filtered tail of outgoing requests
pub struct Tail {
    filter: UrlFilter,
    decode_policy: DecodeFailurePolicy,
    stop_after: Option<usize>,
}

impl Tail {
    /// Build a tail from validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            filter: config.url_filter()?,
            decode_policy: config.decode_failure,
            stop_after: config.stop_after,
        })
    }

    /// Tail `input` into `out` until it ends, the limit is reached or `cancel` fires
    pub async fn run<R, W>(
        &self,
        input: R,
        out: &mut W,
        cancel: CancellationToken,
    ) -> Result<TailSummary>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: Write,
    {
        let bus = EventBus::new();
        let reader = tokio::spawn(read_frames(bus.clone(), input));

        let stop_after = self.stop_after;
        let mut printed = 0usize;
        let exit = EventLoop::new(&bus)
            .decode_policy(self.decode_policy)
            .cancel_token(cancel)
            .run(|event: RequestWillBeSent| -> Result<bool> {
                if !self.filter.admits(&event.request.url) {
                    return Ok(false);
                }
                writeln!(out, "{} {}", event.request.method, event.request.url)?;
                printed += 1;
                Ok(stop_after.is_some_and(|limit| printed >= limit))
            })
            .await;

        // Only a finished input closes the bus; otherwise stop reading
        if matches!(exit, Ok(LoopExit::SourceClosed)) {
            reader
                .await
                .map_err(|e| Error::internal(format!("Frame reader task failed: {}", e)))??;
        } else {
            reader.abort();
        }

        let exit = exit?;
        info!("Tail finished ({:?}), {} requests printed", exit, printed);
        Ok(TailSummary { exit, printed })
    }
}

/// Publish every frame of `input` on `bus` once someone listens, then close it
async fn read_frames<R>(bus: EventBus, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    bus.wait_for_subscribers(1).await;

    let result = publish_lines(&bus, input).await;
    bus.close();
    result
}

async fn publish_lines<R>(bus: &EventBus, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match bus.publish_message(line) {
            Ok(None) => {}
            Ok(Some(response)) => {
                let id = response.id;
                if let Err(e) = response.into_result() {
                    if e.is_nil_context() {
                        debug!("Ignoring nil context error for command {}", id);
                    } else {
                        warn!("Command {} failed: {}", id, e);
                    }
                }
            }
            Err(e) => warn!("Skipping unreadable frame: {}", e),
        }
    }

    debug!("End of input");
    Ok(())
}
