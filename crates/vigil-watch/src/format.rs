//! Pure formatting of delivered records into display text.

use vigil_provider::LogRecord;

/// The two display lines for one delivered record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRecord {
    /// Single-line record summary.
    pub header: String,
    /// Indented human-readable description.
    pub body: String,
}

/// Formats one record for display.
///
/// The provider identity falls back to the session's log name when the
/// record carries none; the record id falls back to the legacy event id
/// when the primary id is absent.
#[must_use]
pub fn format_record(log_name: &str, record: &LogRecord) -> FormattedRecord {
    let provider = record.provider_id.as_deref().unwrap_or(log_name);
    let record_id = record.record_id.unwrap_or(record.event_id);

    FormattedRecord {
        header: format!(
            "Event: {} |Log:{}|Provider:{}|EventID:{}|",
            record.timestamp, log_name, provider, record_id
        ),
        body: format!("    {}", record.description),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use test_case::test_case;
    use vigil_provider::Severity;

    fn record(provider_id: Option<&str>, record_id: Option<u64>, event_id: u64) -> LogRecord {
        LogRecord {
            timestamp: Utc::now(),
            log_name: "L".to_string(),
            provider_id: provider_id.map(String::from),
            record_id,
            event_id,
            description: "hello".to_string(),
            severity: Severity::Information,
        }
    }

    #[test_case(Some(5), 9, "EventID:5" ; "primary id wins")]
    #[test_case(None, 9, "EventID:9" ; "falls back to event id")]
    fn record_id_selection(record_id: Option<u64>, event_id: u64, expected: &str) {
        let formatted = format_record("L", &record(None, record_id, event_id));
        assert!(formatted.header.contains(expected), "{}", formatted.header);
    }

    #[test_case(Some("prov"), "Provider:prov" ; "record provider wins")]
    #[test_case(None, "Provider:L" ; "falls back to log name")]
    fn provider_id_selection(provider_id: Option<&str>, expected: &str) {
        let formatted = format_record("L", &record(provider_id, Some(1), 1));
        assert!(formatted.header.contains(expected), "{}", formatted.header);
    }

    #[test]
    fn exact_output_shape() {
        let record = record(None, Some(5), 0);
        let formatted = format_record("L", &record);

        assert_eq!(
            formatted.header,
            format!("Event: {} |Log:L|Provider:L|EventID:5|", record.timestamp)
        );
        assert_eq!(formatted.body, "    hello");
    }

    #[test]
    fn body_is_indented_description() {
        let mut r = record(None, Some(1), 1);
        r.description = "multi word description".to_string();
        let formatted = format_record("L", &r);
        assert_eq!(formatted.body, "    multi word description");
    }
}
