//! reqwest-backed implementation of the appointment API.

use reqwest::{Method, RequestBuilder, Response, StatusCode};

use crate::models::{Appointment, AppointmentChanges, AppointmentStatus, NewAppointment, Patient};

use super::types::{
    CreateAppointmentBody, DataEnvelope, ErrorBody, UpdateAppointmentBody, UpdateStatusBody,
};
use super::{ApiError, ClinicApi};

/// HTTP client for the clinic backend.
///
/// The session token, when present, rides an `x-token` header; acquiring
/// and refreshing it is the login flow's concern, not this client's.
#[derive(Debug, Clone)]
pub struct HttpClinicApi {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClinicApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: trim_trailing_slash(base_url.into()),
            token: None,
        }
    }

    /// Attach the session token sent with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.header("x-token", token),
            None => builder,
        }
    }

    /// Convert a non-success response into `ApiError::Status`, pulling
    /// the server's message out of the body when there is one.
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| default_message(status).to_string());
        Err(ApiError::Status {
            code: status.as_u16(),
            message,
        })
    }

    async fn fetch_list<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, ApiError> {
        let response = self.request(Method::GET, path).send().await?;
        let envelope: DataEnvelope<Vec<T>> = Self::check(response)
            .await?
            .json()
            .await
            .map_err(ApiError::Decode)?;
        Ok(envelope.data)
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

fn default_message(status: StatusCode) -> &'static str {
    match status.as_u16() {
        404 => "Not found",
        401 | 403 => "Not authorized",
        500..=599 => "Server error",
        _ => "Request rejected",
    }
}

impl ClinicApi for HttpClinicApi {
    async fn list_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        self.fetch_list("/admin/appo").await
    }

    async fn list_user_appointments(&self, user_id: i64) -> Result<Vec<Appointment>, ApiError> {
        self.fetch_list(&format!("/admin/appo/{user_id}")).await
    }

    async fn list_users(&self) -> Result<Vec<Patient>, ApiError> {
        self.fetch_list("/admin/users").await
    }

    async fn create_appointment(
        &self,
        request: &NewAppointment,
    ) -> Result<Appointment, ApiError> {
        let response = self
            .request(Method::POST, "/admin/appo")
            .json(&CreateAppointmentBody::from(request))
            .send()
            .await?;
        let envelope: DataEnvelope<Appointment> = Self::check(response)
            .await?
            .json()
            .await
            .map_err(ApiError::Decode)?;
        Ok(envelope.data)
    }

    async fn update_status(&self, id: i64, status: AppointmentStatus) -> Result<(), ApiError> {
        let response = self
            .request(Method::PUT, "/admin/appo/status")
            .json(&UpdateStatusBody {
                appo_id: id,
                status,
            })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update_appointment(
        &self,
        id: i64,
        changes: &AppointmentChanges,
    ) -> Result<(), ApiError> {
        let response = self
            .request(Method::PUT, &format!("/admin/appo/{id}"))
            .json(&UpdateAppointmentBody::from(changes))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_appointment(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .request(Method::DELETE, &format!("/admin/appo/{id}"))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slashes() {
        let api = HttpClinicApi::new("https://clinic.example.com/");
        assert_eq!(api.base_url(), "https://clinic.example.com");
    }

    #[test]
    fn default_messages_cover_common_statuses() {
        assert_eq!(default_message(StatusCode::NOT_FOUND), "Not found");
        assert_eq!(default_message(StatusCode::UNAUTHORIZED), "Not authorized");
        assert_eq!(
            default_message(StatusCode::INTERNAL_SERVER_ERROR),
            "Server error"
        );
        assert_eq!(default_message(StatusCode::CONFLICT), "Request rejected");
    }

    // Verify the reqwest implementation satisfies the trait seam the
    // rest of the crate is generic over. Network paths are exercised
    // through fakes in workflow/session tests.
    #[test]
    fn http_client_satisfies_clinic_api() {
        fn _accepts_clinic_api<C: ClinicApi>(_c: &C) {}
        let _: fn(&HttpClinicApi) = _accepts_clinic_api;
    }
}
