//! Log event forwarder.
//!
//! Takes records from the logging pipeline and hands at most one event per
//! call to the error-tracking client:
//! 1. Level filtering
//! 2. Processors, then record formatting
//! 3. Representative selection and batch rendering (batch path only)
//! 4. Scope enrichment from the record's context
//! 5. Exception or message capture

use std::sync::OnceLock;

use serde_json::Value;
use uuid::Uuid;

use crate::client::{map_level, Breadcrumb, ErrorTracker};
use crate::error::ForwardError;
use crate::formatting::{Formatter, LineFormatter};
use crate::log_debug;
use crate::logging::structured::LogContext;
use crate::processing::Processor;
use crate::record::{coerce_user, Level, LogRecord, LOGS_KEY};
use crate::scope::EventScope;

use super::batch::select_representative;
use super::config::ForwarderConfig;

/// Extra key holding whatever context the forwarder did not consume.
pub const LOG_CONTEXT_KEY: &str = "log_context";

/// Whether a handled record continues to the next handler in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

pub struct LogEventForwarder<T> {
    client: T,
    level: Level,
    bubble: bool,
    report_exceptions: bool,
    use_formatted_message: bool,
    environment: Option<String>,
    release: Option<String>,
    processors: Vec<Box<dyn Processor>>,
    formatter: Box<dyn Formatter>,
    batch_formatter: OnceLock<Box<dyn Formatter>>,
}

impl<T: ErrorTracker> LogEventForwarder<T> {
    pub fn new(client: T) -> Self {
        Self::from_config(client, &ForwarderConfig::default())
    }

    pub fn from_config(client: T, config: &ForwarderConfig) -> Self {
        Self {
            client,
            level: config.level,
            bubble: config.bubble,
            report_exceptions: config.report_exceptions,
            use_formatted_message: config.use_formatted_message,
            environment: config.environment.clone(),
            release: config.release.clone(),
            processors: Vec::new(),
            formatter: Box::new(LineFormatter::message()),
            batch_formatter: OnceLock::new(),
        }
    }

    pub fn client(&self) -> &T {
        &self.client
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    pub fn bubble(&self) -> bool {
        self.bubble
    }

    pub fn set_bubble(&mut self, bubble: bool) {
        self.bubble = bubble;
    }

    pub fn set_report_exceptions(&mut self, report: bool) {
        self.report_exceptions = report;
    }

    pub fn set_use_formatted_message(&mut self, use_formatted: bool) {
        self.use_formatted_message = use_formatted;
    }

    pub fn set_environment(&mut self, environment: Option<&str>) {
        self.environment = environment.map(str::to_string);
    }

    pub fn set_release(&mut self, release: Option<&str>) {
        self.release = release.map(str::to_string);
    }

    /// Formatter producing each record's `formatted` text.
    pub fn set_formatter(&mut self, formatter: impl Formatter + 'static) {
        self.formatter = Box::new(formatter);
    }

    /// Formatter rendering a batch into the representative's `logs` entry.
    pub fn set_batch_formatter(&mut self, formatter: impl Formatter + 'static) {
        let formatter: Box<dyn Formatter> = Box::new(formatter);
        self.batch_formatter = OnceLock::from(formatter);
    }

    /// Falls back to the default line format on first use.
    pub fn batch_formatter(&self) -> &dyn Formatter {
        self.batch_formatter
            .get_or_init(|| Box::new(LineFormatter::default()))
            .as_ref()
    }

    /// Add a processor. The most recently pushed processor runs first.
    pub fn push_processor(&mut self, processor: impl Processor + 'static) {
        self.processors.push(Box::new(processor));
    }

    pub fn pop_processor(&mut self) -> Option<Box<dyn Processor>> {
        self.processors.pop()
    }

    pub fn is_handling(&self, level: Level) -> bool {
        level >= self.level
    }

    fn accepts(&self, record: &LogRecord) -> bool {
        self.is_handling(record.level) && (self.report_exceptions || !record.has_exception())
    }

    /// Handle a single record from the logging pipeline.
    pub fn handle(&self, record: LogRecord) -> Result<Propagation, ForwardError> {
        let ctx = LogContext::new().with_channel(&record.channel);

        if !self.is_handling(record.level) {
            log_debug!(ctx, "RECORD_BELOW_THRESHOLD", level = record.level, min = self.level);
            return Ok(Propagation::Continue);
        }

        self.process_and_write(record, &ctx)?;

        Ok(if self.bubble {
            Propagation::Continue
        } else {
            Propagation::Stop
        })
    }

    /// Handle a batch of records as one event.
    ///
    /// The highest-level record is reported; every surviving record is
    /// rendered into its `logs` context entry.
    pub fn handle_batch(&self, records: Vec<LogRecord>) -> Result<(), ForwardError> {
        let ctx = LogContext::new();
        let received = records.len();

        let records: Vec<LogRecord> = records
            .into_iter()
            .filter(|record| self.accepts(record))
            .collect();

        let index = match select_representative(&records) {
            Some(index) => index,
            None => {
                log_debug!(ctx, "BATCH_EMPTY_AFTER_FILTER", received = received);
                return Ok(());
            }
        };

        if records.len() == 1 {
            let ctx = ctx.with_channel(&records[index].channel);
            return self.process_and_write(records[index].clone(), &ctx).map(|_| ());
        }

        let processed: Vec<LogRecord> = records
            .iter()
            .cloned()
            .map(|record| self.process_record(record))
            .collect();
        let logs = self.batch_formatter().format_batch(&processed);

        let mut representative = records[index].clone();
        let ctx = ctx.with_channel(&representative.channel);
        log_debug!(
            ctx,
            "BATCH_REPRESENTATIVE",
            index = index,
            level = representative.level,
            survivors = records.len(),
            received = received,
        );

        representative
            .context
            .rest
            .insert(LOGS_KEY.to_string(), Value::String(logs));

        self.process_and_write(representative, &ctx).map(|_| ())
    }

    /// Enrich and capture one already formatted record, skipping
    /// processors. Returns the client's event id, or `None` when the
    /// record is below the threshold or dropped by the exception policy.
    pub fn forward_one(&self, record: &LogRecord) -> Result<Option<Uuid>, ForwardError> {
        let ctx = LogContext::new().with_channel(&record.channel);
        if !self.is_handling(record.level) {
            log_debug!(ctx, "RECORD_BELOW_THRESHOLD", level = record.level, min = self.level);
            return Ok(None);
        }
        self.write(record, &ctx)
    }

    pub fn add_breadcrumb(&self, breadcrumb: Breadcrumb) {
        self.client.add_breadcrumb(breadcrumb);
    }

    fn process_record(&self, record: LogRecord) -> LogRecord {
        self.processors
            .iter()
            .rev()
            .fold(record, |record, processor| processor.process(record))
    }

    fn process_and_write(
        &self,
        record: LogRecord,
        ctx: &LogContext,
    ) -> Result<Option<Uuid>, ForwardError> {
        let mut record = self.process_record(record);
        record.formatted = self.formatter.format(&record);
        self.write(&record, ctx)
    }

    fn write(&self, record: &LogRecord, ctx: &LogContext) -> Result<Option<Uuid>, ForwardError> {
        let mut context = record.context.clone();
        let exception = context.exception.take();

        if exception.is_some() && !self.report_exceptions {
            log_debug!(ctx, "EXCEPTION_RECORD_DROPPED", level = record.level);
            return Ok(None);
        }

        // Dropped when this function returns, on every path.
        let mut scope = EventScope::new();

        for (key, value) in std::mem::take(&mut context.extra) {
            scope.set_extra(&key, value);
        }
        for (key, value) in std::mem::take(&mut context.tags) {
            scope.set_tag(&key, &value);
        }
        for (key, value) in &record.extra {
            scope.set_extra(key, value.clone());
        }
        if let Some(fingerprint) = context.fingerprint.take() {
            scope.set_fingerprint(fingerprint);
        }
        if let Some(user) = context.user.take() {
            scope.set_user(coerce_user(user), false);
        }

        let logger = context
            .logger
            .take()
            .unwrap_or_else(|| record.channel.clone());

        if !context.is_empty() {
            scope.set_extra(LOG_CONTEXT_KEY, context.to_value());
        }

        let event_logger = logger.clone();
        let environment = self.environment.clone();
        let release = self.release.clone();
        let timestamp = record.datetime;
        scope.add_event_processor(move |event| {
            event.set_logger(&event_logger);
            if let Some(environment) = &environment {
                if event.environment().is_none() {
                    event.set_environment(environment);
                }
            }
            if let Some(release) = &release {
                if event.release().is_none() {
                    event.set_release(release);
                }
            }
            if let Some(timestamp) = timestamp {
                event.set_timestamp(timestamp);
            }
        });

        let event_id = match &exception {
            Some(exception) => self
                .client
                .capture_exception(&scope, exception)
                .map_err(ForwardError::capture)?,
            None => {
                let severity = map_level(record.level)?;
                let text = if self.use_formatted_message || record.message.is_empty() {
                    &record.formatted
                } else {
                    &record.message
                };
                self.client
                    .capture_message(&scope, text, severity)
                    .map_err(ForwardError::capture)?
            }
        };

        log_debug!(
            ctx,
            "EVENT_CAPTURED",
            event_id = event_id,
            logger = logger,
            exception = exception.is_some(),
        );

        Ok(Some(event_id))
    }
}
