use crate::google_credentials::GoogleCredentials;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// What the scheduling form posts.
/// Every field is optional at this level, so that missing fields can be reported all at once
/// instead of failing on the first one during deserialization.
#[derive(Debug, Default, Getters, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppointmentRequest {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    date: Option<String>,
    time: Option<String>,
    store: Option<String>,
    market: Option<String>,
    notes: Option<String>,
    credentials: Option<GoogleCredentials>,
}

impl AppointmentRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        date: Option<String>,
        time: Option<String>,
        store: Option<String>,
        market: Option<String>,
        notes: Option<String>,
        credentials: Option<GoogleCredentials>,
    ) -> Self {
        Self {
            name,
            email,
            phone,
            date,
            time,
            store,
            market,
            notes,
            credentials,
        }
    }

    pub fn take_credentials(&mut self) -> Option<GoogleCredentials> {
        self.credentials.take()
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;

    pub fn get_complete_appointment_request() -> AppointmentRequest {
        AppointmentRequest::new(
            Some("Jon Doe".to_owned()),
            Some("jon.doe@email.com".to_owned()),
            Some("+52 55 1234 5678".to_owned()),
            Some("2025-03-14".to_owned()),
            Some("10:30".to_owned()),
            Some("Tienda Centro".to_owned()),
            Some("CDMX".to_owned()),
            None,
            None,
        )
    }

    #[test]
    fn should_deserialize_partial_request() {
        let json = r#"{"name": "Jon Doe", "store": "Tienda Centro"}"#;
        let request: AppointmentRequest = serde_json::from_str(json).unwrap();

        assert_eq!(&Some("Jon Doe".to_owned()), request.name());
        assert_eq!(&Some("Tienda Centro".to_owned()), request.store());
        assert_eq!(&None, request.email());
        assert_eq!(&None, request.credentials());
    }

    #[test]
    fn should_take_credentials() {
        let credentials = GoogleCredentials::new("access".to_owned(), None, None);
        let mut request = get_complete_appointment_request();
        request.credentials = Some(credentials.clone());

        assert_eq!(Some(credentials), request.take_credentials());
        assert_eq!(&None, request.credentials());
    }
}
