use crate::user::UserId;
use serde::Deserialize;

/// User payload as delivered by the identity provider's webhook.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ProviderUserData {
    pub id: Option<UserId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_addresses: Option<Vec<ProviderEmailAddress>>,
    pub image_url: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProviderEmailAddress {
    pub email_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_provider_payload_ignoring_unknown_fields() {
        let data: ProviderUserData = serde_json::from_str(
            r#"{
                "id": "user_2abc",
                "object": "user",
                "first_name": "Ada",
                "last_name": null,
                "email_addresses": [{"id": "idn_1", "email_address": "ada@example.com"}],
                "image_url": "https://img.example.com/ada.png"
            }"#,
        )
        .unwrap();

        assert_eq!(data.id, Some(UserId("user_2abc".to_string())));
        assert_eq!(data.first_name.as_deref(), Some("Ada"));
        assert_eq!(data.last_name, None);
        assert_eq!(
            data.email_addresses.unwrap()[0].email_address,
            "ada@example.com"
        );
    }

    #[test]
    fn decodes_deleted_payload_with_only_an_id() {
        let data: ProviderUserData =
            serde_json::from_str(r#"{"id": "user_2abc", "deleted": true}"#).unwrap();

        assert_eq!(data.id, Some(UserId("user_2abc".to_string())));
        assert!(data.email_addresses.is_none());
    }
}
