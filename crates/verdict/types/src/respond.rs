//! Contract between envelopes and a response-writing layer.

use crate::envelope::{Payload, StatusEnvelope};

/// What a web-framework binding must expose for an envelope to be written
/// out. Implementations set the response status, the redirect and
/// `Content-Location` headers, and record per-field validation messages in
/// whatever form-state structure the framework uses.
pub trait ResponseTarget {
    fn set_status(&mut self, status: u16);

    /// Write the redirect `Location` header.
    fn set_location(&mut self, value: &str);

    /// Write the `Content-Location` header.
    fn set_content_location(&mut self, value: &str);

    /// Record a validation message for `key`. An empty key registers under
    /// the global/catch-all key.
    fn add_field_error(&mut self, key: &str, message: &str);
}

impl StatusEnvelope {
    /// Drive a [`ResponseTarget`] from this envelope.
    ///
    /// Always sets the status; sets each header only when its value is
    /// non-empty. Error-list payloads are fed through
    /// [`registrations`](crate::ErrorList::registrations), so the
    /// aggregate/per-item duplicate suppression holds. A non-list payload on
    /// an error-status envelope registers its string form under the global
    /// key.
    pub fn apply_to(&self, target: &mut dyn ResponseTarget) {
        target.set_status(self.status());

        if let Some(location) = self.location.as_deref() {
            if !location.is_empty() {
                target.set_location(location);
            }
        }
        if let Some(content_location) = self.content_location.as_deref() {
            if !content_location.is_empty() {
                target.set_content_location(content_location);
            }
        }

        match self.payload() {
            Payload::Errors(errors) => {
                for registration in errors.registrations() {
                    target.add_field_error(
                        registration.member.as_deref().unwrap_or(""),
                        &registration.message,
                    );
                }
            }
            payload if self.is_error() => {
                if let Some(message) = payload.message() {
                    target.add_field_error("", &message);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorEntry, ErrorList};
    use serde_json::json;

    #[derive(Debug, Default)]
    struct RecordedResponse {
        status: Option<u16>,
        location: Option<String>,
        content_location: Option<String>,
        field_errors: Vec<(String, String)>,
    }

    impl ResponseTarget for RecordedResponse {
        fn set_status(&mut self, status: u16) {
            self.status = Some(status);
        }

        fn set_location(&mut self, value: &str) {
            self.location = Some(value.to_string());
        }

        fn set_content_location(&mut self, value: &str) {
            self.content_location = Some(value.to_string());
        }

        fn add_field_error(&mut self, key: &str, message: &str) {
            self.field_errors.push((key.to_string(), message.to_string()));
        }
    }

    #[test]
    fn test_apply_sets_status_and_headers() {
        let mut envelope = StatusEnvelope::redirect("/next");
        envelope.content_location = Some("/orders/7".into());

        let mut response = RecordedResponse::default();
        envelope.apply_to(&mut response);

        assert_eq!(response.status, Some(303));
        assert_eq!(response.location.as_deref(), Some("/next"));
        assert_eq!(response.content_location.as_deref(), Some("/orders/7"));
        assert!(response.field_errors.is_empty());
    }

    #[test]
    fn test_apply_skips_empty_headers() {
        let mut envelope = StatusEnvelope::new(200);
        envelope.location = Some(String::new());

        let mut response = RecordedResponse::default();
        envelope.apply_to(&mut response);

        assert_eq!(response.location, None);
    }

    #[test]
    fn test_apply_feeds_registrations_with_suppression() {
        let errors: ErrorList = vec![
            ErrorEntry::with_member("a", "x"),
            ErrorEntry::new("b"),
        ]
        .into();

        let mut response = RecordedResponse::default();
        StatusEnvelope::from(errors).apply_to(&mut response);

        assert_eq!(response.status, Some(400));
        assert_eq!(
            response.field_errors,
            vec![
                ("".to_string(), "b".to_string()),
                ("x".to_string(), "a".to_string()),
            ]
        );
    }

    #[test]
    fn test_apply_registers_plain_error_payload_globally() {
        let envelope = StatusEnvelope::with_payload(500, json!("storage offline"));

        let mut response = RecordedResponse::default();
        envelope.apply_to(&mut response);

        assert_eq!(
            response.field_errors,
            vec![("".to_string(), "storage offline".to_string())]
        );
    }

    #[test]
    fn test_apply_ignores_success_payload_body() {
        let mut response = RecordedResponse::default();
        StatusEnvelope::ok(json!({ "id": 1 })).apply_to(&mut response);

        assert_eq!(response.status, Some(200));
        assert!(response.field_errors.is_empty());
    }
}
