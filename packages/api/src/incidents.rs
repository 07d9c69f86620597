//! Incident endpoints: list, create (multipart), update, delete.

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use store::ClientError;

use crate::client::ApiClient;
use crate::models::{Incident, IncidentId, IncidentStatus, IncidentUpdate, NewIncident};

impl ApiClient {
    /// All incidents, newest first.
    pub async fn list_incidents(&self) -> Result<Vec<Incident>, ClientError> {
        self.send(self.request(Method::GET, "/incidents")).await
    }

    /// Upload a new report with its attachments.
    pub async fn create_incident(&self, report: &NewIncident) -> Result<Incident, ClientError> {
        let (latitude, longitude) = report.validate()?;

        let mut form = Form::new()
            .text("description", report.description.trim().to_string())
            .text("latitude", latitude.to_string())
            .text("longitude", longitude.to_string());
        for attachment in &report.attachments {
            let part = Part::bytes(attachment.bytes.clone())
                .file_name(attachment.file_name.clone())
                .mime_str(&attachment.content_type)
                .map_err(|e| ClientError::validation(format!("{}: {e}", attachment.file_name)))?;
            form = form.part("files", part);
        }

        let incident: Incident = self
            .send(self.request(Method::POST, "/incidents").multipart(form))
            .await?;
        tracing::info!(
            incident_id = incident.id,
            attachments = report.attachments.len(),
            "incident reported"
        );
        Ok(incident)
    }

    pub async fn update_incident(
        &self,
        id: IncidentId,
        update: &IncidentUpdate,
    ) -> Result<Incident, ClientError> {
        update.validate()?;
        self.send(
            self.request(Method::PUT, &format!("/incidents/{id}"))
                .json(update),
        )
        .await
    }

    /// Admin triage: change only the status.
    pub async fn update_incident_status(
        &self,
        id: IncidentId,
        status: IncidentStatus,
    ) -> Result<Incident, ClientError> {
        self.update_incident(id, &IncidentUpdate::status(status))
            .await
    }

    pub async fn delete_incident(&self, id: IncidentId) -> Result<(), ClientError> {
        self.send_empty(self.request(Method::DELETE, &format!("/incidents/{id}")))
            .await
    }
}
