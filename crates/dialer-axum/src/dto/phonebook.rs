//! Phonebook DTO.

use chrono::NaiveDateTime;
use dialer_core::utils::timestamp::serde_datetime;
use dialer_core::{Phonebook, ResourceKind};
use serde::Serialize;

use super::UserDto;

/// `/api/v1/phonebook/` representation: owner nested, campaign by URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhonebookDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub campaign: Option<String>,
    pub user: Option<UserDto>,
    #[serde(with = "serde_datetime")]
    pub created_date: NaiveDateTime,
    #[serde(with = "serde_datetime")]
    pub updated_date: NaiveDateTime,
    pub resource_uri: String,
}

impl PhonebookDto {
    pub fn new(phonebook: Phonebook, owner: Option<UserDto>) -> Self {
        Self {
            resource_uri: ResourceKind::Phonebook.uri(phonebook.id),
            id: phonebook.id,
            name: phonebook.name,
            description: phonebook.description,
            campaign: phonebook.campaign_id.map(|id| ResourceKind::Campaign.uri(id)),
            user: owner,
            created_date: phonebook.created_date,
            updated_date: phonebook.updated_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialer_core::utils::timestamp::parse_datetime;

    #[test]
    fn test_campaign_is_a_uri() {
        let at = parse_datetime("2011-03-29 10:20:36").unwrap();
        let phonebook = Phonebook {
            id: 4,
            name: "mylittlephonebook".to_string(),
            description: String::new(),
            campaign_id: Some(1),
            user_id: 2,
            created_date: at,
            updated_date: at,
        };

        let json = serde_json::to_value(PhonebookDto::new(phonebook, None)).unwrap();
        assert_eq!(json["campaign"], "/api/v1/campaign/1/");
        assert_eq!(json["resource_uri"], "/api/v1/phonebook/4/");
        assert_eq!(json["created_date"], "2011-03-29 10:20:36");
        assert!(json["user"].is_null());
    }
}
