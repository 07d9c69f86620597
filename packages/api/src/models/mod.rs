//! Service-layer models: incidents and the feedback attached to them.

mod feedback;
mod incident;

pub use feedback::{
    Comment, NewReview, Reaction, ReactionChange, ReactionCounts, ReactionType, Review,
};
pub use incident::{
    Attachment, Incident, IncidentId, IncidentStatus, IncidentUpdate, MediaItem, NewIncident,
    ALLOWED_EXTENSIONS, MAX_UPLOAD_BYTES,
};
