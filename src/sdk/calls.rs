use reqwest::Method;
use serde_json::Value;

use crate::Result;
use crate::transport::RestClient;

/// Outbound telephony over the platform's API-key controller.
#[derive(Clone, Debug)]
pub struct Calls {
    rest: RestClient,
}

impl Calls {
    pub(crate) const fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    /// Start an outbound call.
    ///
    /// The phone number is forwarded verbatim: the platform accepts
    /// multiple textual formats (with or without country code or
    /// separators) and the SDK performs no normalization.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails.
    pub async fn create(&self, phone_number: &str, agent_id: Option<&str>) -> Result<Value> {
        let mut query = vec![("phoneNumber", phone_number.to_string())];
        if let Some(agent_id) = agent_id {
            query.push(("agent_id", agent_id.to_string()));
        }
        self.rest.request(Method::POST, "/calls", Some(&query), None, None).await
    }

    /// Dial several numbers into a conference.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails.
    pub async fn initiate_conference(
        &self,
        to_numbers: &[String],
        conference_name: Option<&str>,
    ) -> Result<Value> {
        let mut body = serde_json::json!({ "to_numbers": to_numbers });
        if let Some(name) = conference_name {
            body["conference_name"] = Value::String(name.to_string());
        }
        self.rest.request(Method::POST, "/calls/conference", None, Some(&body), None).await
    }
}
