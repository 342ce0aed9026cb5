use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{RequestBuilder, Url};
use reqwest_eventsource::{Event, EventSource, retry};
use tracing::debug;

use convoy_protocol::BuildEvent;

use super::BuildEvents;
use super::errors::{ApiError, StreamError};

/// SSE event name carrying a JSON event envelope.
const EVENT_MESSAGE: &str = "event";
/// SSE event name the service sends once the build's events are exhausted.
const END_MESSAGE: &str = "end";

/// Build events read from the service's server-sent event stream.
pub struct SseBuildEvents {
    source: EventSource,
    pending: Option<Result<BuildEvent, StreamError>>,
    closed: bool,
}

impl SseBuildEvents {
    /// Connect and wait for the stream to open.
    ///
    /// A rejected request surfaces as the same [`ApiError`] a plain API call
    /// would produce; nothing is retried.
    pub async fn open(request: RequestBuilder, url: &Url) -> Result<Self, ApiError> {
        let mut source = EventSource::new(request).map_err(|e| ApiError::InvalidRequest {
            message: e.to_string(),
        })?;
        source.set_retry_policy(Box::new(retry::Never));

        debug!(event = "core.api.event_stream_open_started", url = %url);

        let mut events = Self {
            source,
            pending: None,
            closed: false,
        };

        match events.source.next().await {
            Some(Ok(Event::Open)) => {}
            Some(Ok(Event::Message(message))) => {
                match decode_message(&message.event, &message.data) {
                    Some(decoded) => events.pending = Some(decoded),
                    None => events.close(),
                }
            }
            Some(Err(reqwest_eventsource::Error::InvalidStatusCode(status, response))) => {
                let body = response.text().await.unwrap_or_default();
                return Err(ApiError::from_status(status, url.as_str(), body));
            }
            Some(Err(reqwest_eventsource::Error::Transport(source))) => {
                return Err(ApiError::Connection {
                    url: url.to_string(),
                    source,
                });
            }
            Some(Err(e)) => {
                return Err(ApiError::Decode {
                    url: url.to_string(),
                    message: e.to_string(),
                });
            }
            None => {
                return Err(ApiError::Decode {
                    url: url.to_string(),
                    message: "event stream closed before it opened".to_string(),
                });
            }
        }

        debug!(event = "core.api.event_stream_open_completed", url = %url);
        Ok(events)
    }
}

/// `None` for the end-of-stream marker.
fn decode_message(kind: &str, data: &str) -> Option<Result<BuildEvent, StreamError>> {
    match kind {
        END_MESSAGE => None,
        EVENT_MESSAGE | "" | "message" => {
            Some(BuildEvent::parse(data).map_err(|e| StreamError::Decode(e.to_string())))
        }
        other => Some(Err(StreamError::Decode(format!(
            "unexpected stream message '{}'",
            other
        )))),
    }
}

#[async_trait]
impl BuildEvents for SseBuildEvents {
    async fn next_event(&mut self) -> Option<Result<BuildEvent, StreamError>> {
        if let Some(pending) = self.pending.take() {
            return Some(pending);
        }

        loop {
            if self.closed {
                return None;
            }

            match self.source.next().await {
                Some(Ok(Event::Open)) => continue,
                Some(Ok(Event::Message(message))) => {
                    match decode_message(&message.event, &message.data) {
                        Some(decoded) => return Some(decoded),
                        None => {
                            debug!(event = "core.api.event_stream_end_received");
                            self.close();
                            return None;
                        }
                    }
                }
                Some(Err(reqwest_eventsource::Error::StreamEnded)) | None => {
                    self.close();
                    return Some(Err(StreamError::Ended));
                }
                Some(Err(e)) => {
                    self.close();
                    return Some(Err(StreamError::Transport(e.to_string())));
                }
            }
        }
    }

    fn close(&mut self) {
        if !self.closed {
            self.source.close();
            self.closed = true;
        }
    }
}
