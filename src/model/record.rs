//! The sealed, immutable capsule record.

use chrono::NaiveDate;

use super::draft::Attachment;

/// A successfully submitted capsule.
///
/// Produced exactly once per draft, on the `Submitting → Succeeded`
/// transition, and owned by the workflow until a new draft is started.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CapsuleRecord {
    /// Recipient address for the future delivery.
    pub email: String,

    /// The letter body.
    pub letter: String,

    /// Calendar date of delivery.
    pub delivery_date: NaiveDate,

    /// Attachments as they stood at sealing time, previews included.
    pub attachments: Vec<Attachment>,
}

impl CapsuleRecord {
    /// Delivery date in long form, e.g. `"January 5, 2026"`.
    pub fn long_delivery_date(&self) -> String {
        self.delivery_date.format("%B %-d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_delivery_date_has_no_zero_padding() {
        let record = CapsuleRecord {
            email: "a@b.com".into(),
            letter: "hi".into(),
            delivery_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            attachments: Vec::new(),
        };
        assert_eq!(record.long_delivery_date(), "January 5, 2026");
    }

    #[test]
    fn test_record_serializes_to_json() {
        let record = CapsuleRecord {
            email: "a@b.com".into(),
            letter: "hi".into(),
            delivery_date: NaiveDate::from_ymd_opt(2030, 12, 24).unwrap(),
            attachments: Vec::new(),
        };
        let json = serde_json::to_string(&record).expect("serialize");
        assert!(json.contains("\"2030-12-24\""));
        assert!(json.contains("a@b.com"));
    }
}
