use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::GroupId;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "desc", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub subject_tag: Option<String>,
    pub privacy: GroupPrivacy,
    #[serde(default)]
    pub announce: bool,
    #[serde(default)]
    pub moderated: bool,
    #[serde(default)]
    pub parent_group_id: Option<GroupId>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum GroupPrivacy {
    #[serde(rename = "group_privacy_none")]
    None,
    #[serde(rename = "group_privacy_limited_archives")]
    LimitedArchives,
    #[serde(rename = "group_privacy_unlisted_public_archives")]
    UnlistedPublicArchives,
    #[serde(rename = "group_privacy_public_archives")]
    PublicArchives,
}

impl GroupPrivacy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GroupPrivacy::None => "group_privacy_none",
            GroupPrivacy::LimitedArchives => "group_privacy_limited_archives",
            GroupPrivacy::UnlistedPublicArchives => "group_privacy_unlisted_public_archives",
            GroupPrivacy::PublicArchives => "group_privacy_public_archives",
        }
    }
}

/// Sparse field-set for the `updategroup` endpoint.
///
/// Only fields explicitly set through the builder methods are emitted as
/// form keys. The server distinguishes "not provided" from "set to empty",
/// so unset fields must never appear in the body.
#[derive(Clone, Debug, Default)]
pub struct GroupUpdate {
    title: Option<String>,
    description: Option<String>,
    website: Option<String>,
    subject_tag: Option<String>,
    privacy: Option<GroupPrivacy>,
    announce: Option<bool>,
    moderated: Option<bool>,
}

impl GroupUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    #[must_use]
    pub fn subject_tag(mut self, subject_tag: impl Into<String>) -> Self {
        self.subject_tag = Some(subject_tag.into());
        self
    }

    #[must_use]
    pub const fn privacy(mut self, privacy: GroupPrivacy) -> Self {
        self.privacy = Some(privacy);
        self
    }

    #[must_use]
    pub const fn announce(mut self, announce: bool) -> Self {
        self.announce = Some(announce);
        self
    }

    #[must_use]
    pub const fn moderated(mut self, moderated: bool) -> Self {
        self.moderated = Some(moderated);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.form_pairs().is_empty()
    }

    /// The form keys and values for every explicitly set field, in a fixed
    /// order. Wire names match the group object (`desc`, not `description`).
    #[must_use]
    pub fn form_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(title) = &self.title {
            pairs.push(("title", title.clone()));
        }
        if let Some(description) = &self.description {
            pairs.push(("desc", description.clone()));
        }
        if let Some(website) = &self.website {
            pairs.push(("website", website.clone()));
        }
        if let Some(subject_tag) = &self.subject_tag {
            pairs.push(("subject_tag", subject_tag.clone()));
        }
        if let Some(privacy) = self.privacy {
            pairs.push(("privacy", privacy.as_str().to_string()));
        }
        if let Some(announce) = self.announce {
            pairs.push(("announce", announce.to_string()));
        }
        if let Some(moderated) = self.moderated {
            pairs.push(("moderated", moderated.to_string()));
        }
        pairs
    }
}
