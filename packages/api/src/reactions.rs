use reqwest::Method;
use serde::Serialize;
use store::ClientError;

use crate::client::ApiClient;
use crate::models::{Incident, IncidentId, Reaction, ReactionChange, ReactionType};

#[derive(Serialize)]
struct NewReaction {
    reaction_type: ReactionType,
}

impl ApiClient {
    /// Add or remove `reaction` depending on what the user already left.
    pub async fn toggle_reaction(
        &self,
        incident: &Incident,
        reaction: ReactionType,
    ) -> Result<ReactionChange, ClientError> {
        let change = incident.reaction_change(reaction);
        match change {
            ReactionChange::Add => self.add_reaction(incident.id, reaction).await.map(|_| ())?,
            ReactionChange::Remove => self.remove_reaction(incident.id, reaction).await?,
        }
        Ok(change)
    }

    /// React to an incident. The backend keeps at most one reaction per type per user.
    pub async fn add_reaction(
        &self,
        incident: IncidentId,
        reaction_type: ReactionType,
    ) -> Result<Reaction, ClientError> {
        self.send(
            self.request(Method::POST, &format!("/incidents/{incident}/reactions"))
                .json(&NewReaction { reaction_type }),
        )
        .await
    }

    pub async fn remove_reaction(
        &self,
        incident: IncidentId,
        reaction_type: ReactionType,
    ) -> Result<(), ClientError> {
        self.send_empty(self.request(
            Method::DELETE,
            &format!("/incidents/{incident}/reactions/{}", reaction_type.as_str()),
        ))
        .await
    }
}
