//! Renderer trait: turns one event into one line of text

use super::{error::Result, log_event::LogEvent};
use std::sync::Arc;

/// Produces a complete, newline-terminated line for an event
///
/// The layout is entirely up to the implementation. Decorators such as
/// [`DecoratingEncoder`](crate::encoders::DecoratingEncoder) only ever see
/// the finished text.
pub trait Renderer: Send + Sync {
    fn render(&self, event: &LogEvent) -> Result<String>;
    fn name(&self) -> &str;
}

impl<R: Renderer + ?Sized> Renderer for Arc<R> {
    fn render(&self, event: &LogEvent) -> Result<String> {
        (**self).render(event)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&self, event: &LogEvent) -> Result<String> {
        (**self).render(event)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
