//! Recorded validation failures and their immutable snapshots.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One recorded validation failure.
///
/// `members` holds the form keys the failure targets (for example
/// `"email"` or `"items[0]"`). An entry with no members is *global*: it
/// belongs to the whole request rather than to a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Human-readable failure text.
    pub message: String,

    /// Form keys this failure targets; empty means the failure is global.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
}

impl ErrorEntry {
    /// Create a global entry with no member keys.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            members: Vec::new(),
        }
    }

    /// Create an entry targeting a single member key.
    pub fn with_member(message: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            members: vec![member.into()],
        }
    }

    /// Create an entry targeting several member keys at once.
    pub fn with_members(message: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            message: message.into(),
            members,
        }
    }

    /// Whether this entry has no member keys.
    pub fn is_global(&self) -> bool {
        self.members.is_empty()
    }
}

/// An ordered, immutable snapshot of recorded failures.
///
/// Snapshots never alias builder storage: mutating the report a list was
/// taken from cannot change a list already handed out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorList {
    entries: Vec<ErrorEntry>,
}

impl ErrorList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ErrorEntry> {
        self.entries.iter()
    }

    /// The message joining the DISTINCT texts of global entries, each once,
    /// in insertion order. Entries with member keys contribute nothing here;
    /// they are reported per key by [`ErrorList::registrations`].
    pub fn aggregate_message(&self) -> String {
        let mut distinct: Vec<&str> = Vec::new();
        for entry in self.entries.iter().filter(|e| e.is_global()) {
            if !distinct.contains(&entry.message.as_str()) {
                distinct.push(&entry.message);
            }
        }
        distinct.join(" ")
    }

    /// The (key, message) pairs a form-validation state store should receive.
    ///
    /// Emits the aggregate message under the global key first, then one
    /// registration per member key of every entry. A global entry whose text
    /// equals the already-emitted aggregate is skipped, so the same message
    /// is never reported twice under the global key.
    pub fn registrations(&self) -> Vec<Registration> {
        let aggregate = self.aggregate_message();
        let mut out = Vec::new();
        if !aggregate.is_empty() {
            out.push(Registration {
                member: None,
                message: aggregate.clone(),
            });
        }
        for entry in &self.entries {
            if entry.is_global() {
                if entry.message != aggregate {
                    out.push(Registration {
                        member: None,
                        message: entry.message.clone(),
                    });
                }
            } else {
                for member in &entry.members {
                    out.push(Registration {
                        member: Some(member.clone()),
                        message: entry.message.clone(),
                    });
                }
            }
        }
        out
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.aggregate_message())
    }
}

impl From<Vec<ErrorEntry>> for ErrorList {
    fn from(entries: Vec<ErrorEntry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<ErrorEntry> for ErrorList {
    fn from_iter<I: IntoIterator<Item = ErrorEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ErrorList {
    type Item = ErrorEntry;
    type IntoIter = std::vec::IntoIter<ErrorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a ErrorEntry;
    type IntoIter = std::slice::Iter<'a, ErrorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// One (key, message) pair for a form-validation state store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Target key; `None` registers under the global/catch-all key.
    pub member: Option<String>,

    /// Failure text to register.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(entries: Vec<ErrorEntry>) -> ErrorList {
        ErrorList::from(entries)
    }

    #[test]
    fn test_aggregate_excludes_keyed_entries() {
        let errors = list(vec![
            ErrorEntry::with_member("a", "x"),
            ErrorEntry::new("b"),
        ]);
        assert_eq!(errors.to_string(), "b");
    }

    #[test]
    fn test_aggregate_single_message() {
        let errors = list(vec![ErrorEntry::new("a")]);
        assert_eq!(errors.to_string(), "a");
    }

    #[test]
    fn test_aggregate_joins_distinct_messages_once() {
        let errors = list(vec![
            ErrorEntry::new("a"),
            ErrorEntry::new("a"),
            ErrorEntry::new("b"),
        ]);
        assert_eq!(errors.aggregate_message(), "a b");
    }

    #[test]
    fn test_empty_list_has_empty_aggregate() {
        assert_eq!(ErrorList::new().to_string(), "");
        assert!(ErrorList::new().registrations().is_empty());
    }

    #[test]
    fn test_registrations_suppress_aggregate_duplicate() {
        let errors = list(vec![
            ErrorEntry::with_member("a", "x"),
            ErrorEntry::new("b"),
        ]);
        assert_eq!(
            errors.registrations(),
            vec![
                Registration {
                    member: None,
                    message: "b".into()
                },
                Registration {
                    member: Some("x".into()),
                    message: "a".into()
                },
            ]
        );
    }

    #[test]
    fn test_registrations_with_two_global_messages() {
        // Neither text equals the joined aggregate, so both are re-emitted.
        let errors = list(vec![ErrorEntry::new("b"), ErrorEntry::new("c")]);
        assert_eq!(
            errors.registrations(),
            vec![
                Registration {
                    member: None,
                    message: "b c".into()
                },
                Registration {
                    member: None,
                    message: "b".into()
                },
                Registration {
                    member: None,
                    message: "c".into()
                },
            ]
        );
    }

    #[test]
    fn test_registrations_one_per_member_key() {
        let errors = list(vec![ErrorEntry::with_members(
            "a",
            vec!["x".into(), "y".into()],
        )]);
        assert_eq!(
            errors.registrations(),
            vec![
                Registration {
                    member: Some("x".into()),
                    message: "a".into()
                },
                Registration {
                    member: Some("y".into()),
                    message: "a".into()
                },
            ]
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let errors = list(vec![
            ErrorEntry::with_member("too long", "name"),
            ErrorEntry::new("missing payment method"),
        ]);
        let json = serde_json::to_string(&errors).expect("serialize");
        let back: ErrorList = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(errors, back);
    }

    #[test]
    fn test_member_keys_serialize_only_when_present() {
        let json = serde_json::to_value(ErrorEntry::new("a")).expect("serialize");
        assert_eq!(json, serde_json::json!({ "message": "a" }));
    }
}
