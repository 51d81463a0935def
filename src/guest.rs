use serde::{Deserialize, Serialize};

/// One row of the external guest sheet.
///
/// Field names on the wire are case-sensitive (`Name`, `Email`, `RSVP`,
/// `Message`). `Name` is required; the other columns default to empty when a
/// sheet row leaves them out. An absent or `null` `RSVP` deserializes as
/// `None` and counts as pending.
///
/// # Examples
///
/// ```
/// use rsvpfold::{GuestRecord, RsvpStatus};
///
/// let guest: GuestRecord =
///     serde_json::from_str(r#"{"Name":"Ana Cruz","Email":"","RSVP":"Yes","Message":""}"#)
///         .unwrap();
/// assert_eq!(guest.status(), RsvpStatus::Attending);
/// assert_eq!(guest.initials(), "AC");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Email", default)]
    pub email: String,

    #[serde(rename = "RSVP", default)]
    pub rsvp: Option<String>,

    #[serde(rename = "Message", default)]
    pub message: String,
}

impl GuestRecord {
    /// Create a record with just a name and an RSVP value.
    pub fn new(name: impl Into<String>, rsvp: Option<&str>) -> Self {
        GuestRecord {
            name: name.into(),
            rsvp: rsvp.map(str::to_string),
            ..GuestRecord::default()
        }
    }

    /// The bucket this guest falls into.
    pub fn status(&self) -> RsvpStatus {
        RsvpStatus::classify(self.rsvp.as_deref())
    }

    /// Up to two uppercase initials from the guest's name, or `"?"`.
    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .split_whitespace()
            .take(2)
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            "?".to_string()
        } else {
            initials
        }
    }
}

/// RSVP bucket of a guest record.
///
/// Only the exact literals `"Yes"` and `"No"` are recognized. Everything else
/// (absent, empty, whitespace, other casing, free text) is `Pending`.
///
/// ```
/// use rsvpfold::RsvpStatus;
///
/// assert_eq!(RsvpStatus::classify(Some("Yes")), RsvpStatus::Attending);
/// assert_eq!(RsvpStatus::classify(Some("No")), RsvpStatus::NotAttending);
/// assert_eq!(RsvpStatus::classify(Some("yes")), RsvpStatus::Pending);
/// assert_eq!(RsvpStatus::classify(None), RsvpStatus::Pending);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RsvpStatus {
    Attending,
    NotAttending,
    Pending,
}

impl RsvpStatus {
    pub fn classify(raw: Option<&str>) -> Self {
        match raw {
            Some("Yes") => RsvpStatus::Attending,
            Some("No") => RsvpStatus::NotAttending,
            _ => RsvpStatus::Pending,
        }
    }
}
