//! ListContactsHandler - Query handler for the filtered contact listing.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

use crate::domain::contact::{Contact, ContactError, ContactFilter, ContactStatus};
use crate::domain::foundation::Timestamp;
use crate::ports::ContactRepository;

/// Raw query-string filters. Dates are RFC 3339 or `YYYY-MM-DD`.
#[derive(Debug, Clone, Default)]
pub struct ListContactsQuery {
    pub status: Option<String>,
    pub company: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

pub struct ListContactsHandler {
    contacts: Arc<dyn ContactRepository>,
}

impl ListContactsHandler {
    pub fn new(contacts: Arc<dyn ContactRepository>) -> Self {
        Self { contacts }
    }

    pub async fn handle(&self, query: ListContactsQuery) -> Result<Vec<Contact>, ContactError> {
        let filter = build_filter(query)?;
        Ok(self.contacts.list(&filter).await?)
    }
}

fn build_filter(query: ListContactsQuery) -> Result<ContactFilter, ContactError> {
    let status = match non_blank(query.status) {
        Some(raw) => Some(
            ContactStatus::parse(&raw)
                .ok_or_else(|| ContactError::validation("status", "is not a known status"))?,
        ),
        None => None,
    };

    let from = non_blank(query.from)
        .map(|raw| parse_bound(&raw, NaiveTime::MIN, "from"))
        .transpose()?;
    let to = non_blank(query.to)
        .map(|raw| parse_bound(&raw, end_of_day(), "to"))
        .transpose()?;

    Ok(ContactFilter {
        status,
        company: non_blank(query.company),
        from,
        to,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

/// Parses a full timestamp, or a bare date pinned to `time_of_day`.
fn parse_bound(raw: &str, time_of_day: NaiveTime, field: &str) -> Result<Timestamp, ContactError> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(Timestamp::from_datetime(dt.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| Timestamp::from_datetime(Utc.from_utc_datetime(&date.and_time(time_of_day))))
        .map_err(|_| ContactError::validation(field, "must be a date (YYYY-MM-DD)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryContactRepository;
    use crate::domain::contact::NewContact;

    fn contact(company: &str, sent_at: Timestamp) -> Contact {
        Contact::create(
            NewContact {
                name: "Ana".to_string(),
                phone: "(11) 3333-4444".to_string(),
                company: company.to_string(),
                message: "Oi".to_string(),
                accepted_terms: true,
                accepted_news: true,
            },
            sent_at,
        )
        .unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn filters_by_company_and_date_range() {
        let repo = InMemoryContactRepository::new();
        repo.create(&contact("Acme Ltda", day(2025, 3, 1))).await.unwrap();
        repo.create(&contact("acme sa", day(2025, 3, 10))).await.unwrap();
        repo.create(&contact("Other", day(2025, 3, 5))).await.unwrap();
        let handler = ListContactsHandler::new(Arc::new(repo));

        let found = handler
            .handle(ListContactsQuery {
                company: Some("ACME".to_string()),
                from: Some("2025-03-01".to_string()),
                to: Some("2025-03-09".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].company, "Acme Ltda");
    }

    #[tokio::test]
    async fn unknown_status_is_rejected() {
        let handler = ListContactsHandler::new(Arc::new(InMemoryContactRepository::new()));
        let err = handler
            .handle(ListContactsQuery {
                status: Some("archived".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ContactError::ValidationFailed { ref field, .. } if field == "status"));
    }

    #[test]
    fn portuguese_status_alias_is_accepted() {
        let filter = build_filter(ListContactsQuery {
            status: Some("lido".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filter.status, Some(ContactStatus::Read));
    }

    #[test]
    fn blank_filters_are_ignored() {
        let filter = build_filter(ListContactsQuery {
            status: Some(" ".to_string()),
            company: Some("".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert!(filter.status.is_none());
        assert!(filter.company.is_none());
    }

    #[test]
    fn bad_date_is_rejected() {
        let err = build_filter(ListContactsQuery {
            from: Some("03/01/2025".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ContactError::ValidationFailed { ref field, .. } if field == "from"));
    }

    #[test]
    fn date_only_upper_bound_covers_whole_day() {
        let filter = build_filter(ListContactsQuery {
            to: Some("2025-03-09".to_string()),
            ..Default::default()
        })
        .unwrap();
        let to = filter.to.unwrap();
        assert!(day(2025, 3, 9).is_before(&to));
    }
}
