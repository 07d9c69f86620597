//! # Incident reports
//!
//! [`Incident`] mirrors the backend's incident JSON, including the nested
//! media, comments, reaction counts and reviews. [`NewIncident`] and
//! [`IncidentUpdate`] are the request payloads; both validate locally so an
//! obviously bad report (no location, empty description, unsupported file)
//! never reaches the network.

use serde::{Deserialize, Serialize};
use store::{ClientError, User};

use super::feedback::{Comment, ReactionChange, ReactionCounts, ReactionType, Review};

pub type IncidentId = i64;

/// Attachment extensions the backend accepts.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "mp4", "mov", "avi"];

/// Upper bound for one incident's attachments, matching the backend limit.
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Triage state of an incident.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    #[default]
    Pending,
    #[serde(rename = "under investigation")]
    UnderInvestigation,
    Rejected,
    Resolved,
    #[serde(other)]
    Unknown,
}

impl IncidentStatus {
    /// Statuses an administrator can choose from.
    pub const ALL: [IncidentStatus; 4] = [
        Self::Pending,
        Self::UnderInvestigation,
        Self::Rejected,
        Self::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::UnderInvestigation => "under investigation",
            Self::Rejected => "rejected",
            Self::Resolved => "resolved",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .unwrap_or(Self::Unknown)
    }

    /// Short explanation shown under a report.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Pending => "Waiting for an administrator to review this report.",
            Self::UnderInvestigation => "Authorities are looking into this incident.",
            Self::Rejected => "This report was rejected.",
            Self::Resolved => "This incident has been resolved.",
            Self::Unknown => "Status unavailable.",
        }
    }
}

/// An uploaded image or video.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: i64,
    /// Stored file name under `/uploads`.
    #[serde(alias = "image_url", alias = "video_url")]
    pub url: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// An incident report with everything attached to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: IncidentId,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub status: IncidentStatus,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub images: Vec<MediaItem>,
    #[serde(default)]
    pub videos: Vec<MediaItem>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub reactions: ReactionCounts,
    /// Reactions the requesting user has already left.
    #[serde(default)]
    pub user_reactions: Vec<ReactionType>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Incident {
    /// Whether `user` may edit or delete this report.
    pub fn can_modify(&self, user: &User) -> bool {
        user.is_admin || self.user.as_ref().is_some_and(|owner| owner.id == user.id)
    }

    /// Mean of the rated reviews, each clamped to 0..=5.
    pub fn average_rating(&self) -> Option<f64> {
        let rated: Vec<u8> = self
            .reviews
            .iter()
            .filter(|r| r.rating.is_some())
            .map(|r| r.stars())
            .collect();
        if rated.is_empty() {
            return None;
        }
        let total: u32 = rated.iter().copied().map(u32::from).sum();
        Some(f64::from(total) / rated.len() as f64)
    }

    pub fn has_reacted(&self, reaction: ReactionType) -> bool {
        self.user_reactions.contains(&reaction)
    }

    /// Likes toggle; shares only ever add.
    pub fn reaction_change(&self, reaction: ReactionType) -> ReactionChange {
        match reaction {
            ReactionType::Like if self.has_reacted(ReactionType::Like) => ReactionChange::Remove,
            _ => ReactionChange::Add,
        }
    }

    pub fn reporter(&self) -> &str {
        self.user.as_ref().map(|u| u.username.as_str()).unwrap_or("unknown")
    }
}

/// A file to upload with a new incident.
#[derive(Clone, Debug, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Build from a file name, deriving the MIME type from its extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ClientError> {
        let file_name = file_name.into();
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ClientError::validation(format!(
                "Unsupported file type: {file_name}"
            )));
        }
        let content_type = match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "mp4" => "video/mp4",
            "mov" => "video/quicktime",
            _ => "video/x-msvideo",
        };
        Ok(Self {
            file_name,
            content_type: content_type.to_string(),
            bytes,
        })
    }

    pub fn is_video(&self) -> bool {
        self.content_type.starts_with("video/")
    }
}

/// Payload for `POST /incidents` (sent as multipart form data).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewIncident {
    pub description: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub attachments: Vec<Attachment>,
}

fn check_coordinates(latitude: f64, longitude: f64) -> Result<(), ClientError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ClientError::validation("Latitude must be between -90 and 90"));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ClientError::validation("Longitude must be between -180 and 180"));
    }
    Ok(())
}

impl NewIncident {
    /// Check the report before upload. Returns the location on success.
    pub fn validate(&self) -> Result<(f64, f64), ClientError> {
        if self.description.trim().is_empty() {
            return Err(ClientError::validation("Description is required"));
        }
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err(ClientError::validation("Location is required"));
        };
        check_coordinates(latitude, longitude)?;

        let total: usize = self.attachments.iter().map(|a| a.bytes.len()).sum();
        if total > MAX_UPLOAD_BYTES {
            return Err(ClientError::validation("Attachments exceed the 100 MB limit"));
        }
        Ok((latitude, longitude))
    }
}

/// Payload for `PUT /incidents/{id}`. Absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct IncidentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IncidentStatus>,
}

impl IncidentUpdate {
    pub fn status(status: IncidentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.description.as_deref().is_some_and(|d| d.trim().is_empty()) {
            return Err(ClientError::validation("Description cannot be empty"));
        }
        if self.latitude.is_some() != self.longitude.is_some() {
            return Err(ClientError::validation("Latitude and longitude must be updated together"));
        }
        if let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) {
            check_coordinates(latitude, longitude)?;
        }
        if self.status == Some(IncidentStatus::Unknown) {
            return Err(ClientError::validation("Unknown incident status"));
        }
        Ok(())
    }
}
