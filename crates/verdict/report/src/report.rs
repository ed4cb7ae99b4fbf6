//! The mutable failure collector behind an error envelope.

use std::fmt;

use tracing::trace;
use verdict_types::{ErrorEntry, ErrorList, Payload, StatusEnvelope};

use crate::labels::{LabelSource, NoLabels};
use crate::path::MemberPath;
use crate::template::format_template;

/// Append-only collector of validation failures.
///
/// A report belongs to exactly one logical operation (typically one request
/// handler call); it is not synchronized. Parallel validation keeps one
/// report per worker and merges afterwards. Snapshots from
/// [`errors`](ErrorReport::errors) are independent of later mutation and
/// safe to share.
pub struct ErrorReport {
    entries: Vec<ErrorEntry>,
    include_root_segment: bool,
    labels: Box<dyn LabelSource>,
}

impl ErrorReport {
    /// An empty report. Root segments are excluded from derived keys until
    /// [`set_include_root_segment`](ErrorReport::set_include_root_segment)
    /// says otherwise, and members keep their own names as labels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether derived keys carry the root variable's name.
    pub fn include_root_segment(&self) -> bool {
        self.include_root_segment
    }

    pub fn set_include_root_segment(&mut self, include: bool) {
        self.include_root_segment = include;
    }

    /// Configure root-segment inclusion fluently.
    pub fn with_root_segment(mut self, include: bool) -> Self {
        self.include_root_segment = include;
        self
    }

    /// Inject the display-label collaborator consulted for field steps.
    pub fn with_labels(mut self, labels: impl LabelSource + 'static) -> Self {
        self.labels = Box::new(labels);
        self
    }

    /// Record a global failure. `{i}` placeholders in `template` are
    /// replaced by the display form of `args[i]`.
    pub fn add(&mut self, template: &str, args: &[&dyn fmt::Display]) {
        let message = format_template(template, args);
        self.push(ErrorEntry::new(message));
    }

    /// Record a failure under a literal member key. `None` or an empty key
    /// records a global failure.
    pub fn add_keyed(&mut self, template: &str, member: Option<&str>, args: &[&dyn fmt::Display]) {
        let message = format_template(template, args);
        let entry = match member {
            Some(member) if !member.is_empty() => ErrorEntry::with_member(message, member),
            _ => ErrorEntry::new(message),
        };
        self.push(entry);
    }

    /// Record a failure keyed by an access path.
    ///
    /// The member key comes from the shape of `path`; nothing is evaluated
    /// to produce it. `value` is the separately evaluated result of the same
    /// access, substituted at `{0}`; the derived label path (always rendered
    /// without the root segment) substitutes at `{1}`. The recorded key
    /// carries the root segment only when the report is configured to
    /// include it.
    pub fn add_path(&mut self, template: &str, path: &MemberPath, value: &dyn fmt::Display) {
        let label = path.render(false, self.labels.as_ref());
        let member = path.render(self.include_root_segment, self.labels.as_ref());
        let args: [&dyn fmt::Display; 2] = [value, &label];
        let message = format_template(template, &args);
        let entry = if member.is_empty() {
            ErrorEntry::new(message)
        } else {
            ErrorEntry::with_member(message, member)
        };
        self.push(entry);
    }

    /// Record `template` when `condition` is false. Returns `condition`, so
    /// callers can chain the check into their own control flow.
    pub fn check(&mut self, condition: bool, template: &str, args: &[&dyn fmt::Display]) -> bool {
        if !condition {
            self.add(template, args);
        }
        condition
    }

    /// Negated [`check`](ErrorReport::check): records when `condition` IS
    /// true, passes when it is false.
    pub fn check_not(&mut self, condition: bool, template: &str, args: &[&dyn fmt::Display]) -> bool {
        self.check(!condition, template, args)
    }

    /// Record the failure an error-status envelope carries.
    ///
    /// Passes iff the envelope is not an error. On failure the payload's
    /// string form becomes a global entry; an absent payload records
    /// nothing, though the check still fails.
    pub fn check_envelope(&mut self, envelope: &StatusEnvelope) -> bool {
        let passed = !envelope.is_error();
        if !passed {
            if let Some(message) = envelope.payload().message() {
                self.push(ErrorEntry::new(message));
            }
        }
        passed
    }

    /// Append every entry of a snapshot, preserving its order after the
    /// entries already recorded here.
    pub fn merge(&mut self, errors: ErrorList) {
        self.entries.extend(errors);
    }

    /// Append every entry of another report.
    pub fn merge_report(&mut self, other: &ErrorReport) {
        self.entries.extend(other.entries.iter().cloned());
    }

    /// A fresh immutable snapshot of everything recorded so far.
    pub fn errors(&self) -> ErrorList {
        self.entries.iter().cloned().collect()
    }

    /// Discard all recorded entries. Configuration (root-segment flag,
    /// label source) survives.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, entry: ErrorEntry) {
        trace!(message = %entry.message, members = ?entry.members, "recorded validation failure");
        self.entries.push(entry);
    }
}

impl Default for ErrorReport {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            include_root_segment: false,
            labels: Box::new(NoLabels),
        }
    }
}

impl fmt::Debug for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorReport")
            .field("entries", &self.entries)
            .field("include_root_segment", &self.include_root_segment)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.errors(), f)
    }
}

impl From<&ErrorReport> for StatusEnvelope {
    /// The builder→envelope bridge: 400 with the snapshot taken now.
    fn from(report: &ErrorReport) -> Self {
        StatusEnvelope::with_payload(
            verdict_types::status::BAD_REQUEST,
            Payload::Errors(report.errors()),
        )
    }
}

impl From<ErrorReport> for StatusEnvelope {
    fn from(report: ErrorReport) -> Self {
        StatusEnvelope::from(&report)
    }
}
