//! Domain objects returned by the photosets operations. Everything
//! here is fully owned by the caller; nothing borrows from the parsed
//! response document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::params::ParamSet;

/// A photoset record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photoset {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Id of the photo representing the set.
    pub primary_photo_id: String,
    /// NSID of the owning user. Absent in listings scoped to one user.
    pub owner: Option<String>,
    pub photos_count: u32,
    pub url: Option<String>,
}

/// Result of creating a photoset: the new id plus the URL the remote
/// reports for it, when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPhotoset {
    pub id: String,
    pub url: Option<String>,
}

/// One photo within a set listing.
///
/// Fixed attributes the remote always sends are typed fields; anything
/// further requested via `extras` (license, date_upload, date_taken,
/// owner_name, icon_server, original_format, last_update, media)
/// lands in the `extras` map under its wire attribute name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub title: Option<String>,
    pub secret: Option<String>,
    pub server: Option<String>,
    pub farm: Option<String>,
    pub is_primary: bool,
    pub extras: BTreeMap<String, String>,
}

/// A paginated page of photos plus its page metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotosList {
    pub photos: Vec<Photo>,
    pub page: u32,
    pub pages: u32,
    pub per_page: u32,
    pub total: u32,
}

impl PhotosList {
    /// Detaches the photo vector, discarding the page metadata.
    pub fn into_photos(self) -> Vec<Photo> {
        self.photos
    }
}

/// Optional listing parameters. Unset fields are omitted from the
/// outgoing request entirely, never sent as sentinel values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoListOptions {
    /// Comma-delimited extra attributes to fetch per photo.
    pub extras: Option<String>,
    /// Photos per page; the remote defaults to 500 and caps there.
    pub per_page: Option<u32>,
    /// Page of results, 1-based; the remote defaults to 1.
    pub page: Option<u32>,
    /// Response format hint. Only the structured `rest` format can be
    /// materialized into a [`PhotosList`]; any other value is rejected
    /// before the request is sent.
    pub format: Option<String>,
}

impl PhotoListOptions {
    pub(crate) fn apply(&self, params: &mut ParamSet) {
        params.push_opt("extras", self.extras.clone());
        params.push_opt("per_page", self.per_page.map(|n| n.to_string()));
        params.push_opt("page", self.page.map(|n| n.to_string()));
        params.push_opt("format", self.format.clone());
    }
}

/// A neighbor of one photo within one set's ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextPhoto {
    pub id: String,
    pub title: Option<String>,
    pub secret: Option<String>,
    pub thumb: Option<String>,
    pub url: Option<String>,
}

/// Previous/next neighbors of a photo in a set. Either slot may be
/// legitimately empty for a photo at the edge of the set; both are
/// empty for a singleton set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoContext {
    pub previous: Option<ContextPhoto>,
    pub next: Option<ContextPhoto>,
}
