use std::fmt;

/// A request-scoped logging interface.
///
/// `RequestLog` is obtained from [`ConsentReader::log`](crate::ConsentReader::log)
/// and borrows the reader's request ID so every event carries it as a
/// structured `request_id` field.
///
/// Cookie values are never passed through this logger verbatim; callers log
/// lengths and outcomes instead.
#[derive(Debug, Clone, Copy)]
pub struct RequestLog<'a> {
    request_id: Option<&'a str>,
}

impl<'a> RequestLog<'a> {
    /// Creates a new RequestLog.
    ///
    /// `None` marks a detached reader (no incoming request).
    pub(crate) fn new(request_id: Option<&'a str>) -> Self {
        Self { request_id }
    }

    /// Returns the request ID associated with this logger, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id
    }

    fn id(&self) -> &str {
        self.request_id.unwrap_or("-")
    }

    /// Logs a debug-level message with request ID.
    ///
    /// ```no_run
    /// # use consent_studio::ConsentReader;
    /// let reader = ConsentReader::detached();
    /// reader.log().debug(format_args!("granted {} categories", 0));
    /// ```
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(request_id = %self.id(), "{}", args);
    }

    /// Logs a trace-level message with request ID.
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        tracing::trace!(request_id = %self.id(), "{}", args);
    }
}
