//! The `flickr.photosets.*` operations.
//!
//! Every operation is one fixed sequence: validate required inputs,
//! build the parameter set with the call's signing flag, prepare,
//! invoke, materialize the result. Required inputs are checked before
//! any transport activity; an empty required argument never reaches
//! the wire. Wire method and parameter names are the remote service's
//! contract and appear verbatim.

use crate::builders::{build_context, build_photos_list, build_photoset, build_photosets};
use crate::client::Client;
use crate::error::{Error, Result};
use crate::params::{join_ids, ParamSet};
use crate::types::{CreatedPhotoset, Photo, PhotoContext, PhotoListOptions, Photoset, PhotosList};

pub(crate) mod methods {
    pub const ADD_PHOTO: &str = "flickr.photosets.addPhoto";
    pub const CREATE: &str = "flickr.photosets.create";
    pub const DELETE: &str = "flickr.photosets.delete";
    pub const EDIT_META: &str = "flickr.photosets.editMeta";
    pub const EDIT_PHOTOS: &str = "flickr.photosets.editPhotos";
    pub const GET_CONTEXT: &str = "flickr.photosets.getContext";
    pub const GET_INFO: &str = "flickr.photosets.getInfo";
    pub const GET_LIST: &str = "flickr.photosets.getList";
    pub const GET_PHOTOS: &str = "flickr.photosets.getPhotos";
    pub const ORDER_SETS: &str = "flickr.photosets.orderSets";
    pub const REMOVE_PHOTO: &str = "flickr.photosets.removePhoto";
    pub const REMOVE_PHOTOS: &str = "flickr.photosets.removePhotos";
    pub const REORDER_PHOTOS: &str = "flickr.photosets.reorderPhotos";
    pub const SET_PRIMARY_PHOTO: &str = "flickr.photosets.setPrimaryPhoto";
}

fn required(name: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::MissingArgument(name));
    }
    Ok(())
}

fn required_ids<S: AsRef<str>>(name: &'static str, ids: &[S]) -> Result<()> {
    if ids.is_empty() {
        return Err(Error::MissingArgument(name));
    }
    Ok(())
}

impl Client {
    /// Adds a photo to the end of an existing photoset.
    ///
    /// Implements `flickr.photosets.addPhoto`.
    pub fn add_photo(&self, photoset_id: &str, photo_id: &str) -> Result<()> {
        required("photoset_id", photoset_id)?;
        required("photo_id", photo_id)?;

        let mut params = ParamSet::signed();
        params.push("photoset_id", photoset_id);
        params.push("photo_id", photo_id);

        self.call(methods::ADD_PHOTO, params)?;
        Ok(())
    }

    /// Creates a new photoset for the calling user. The primary photo
    /// must belong to that user; the description may contain limited
    /// html.
    ///
    /// Implements `flickr.photosets.create`.
    pub fn create(
        &self,
        title: &str,
        description: Option<&str>,
        primary_photo_id: &str,
    ) -> Result<CreatedPhotoset> {
        required("title", title)?;
        required("primary_photo_id", primary_photo_id)?;

        let mut params = ParamSet::signed();
        params.push("title", title);
        params.push_opt("description", description);
        params.push("primary_photo_id", primary_photo_id);

        let doc = self.call(methods::CREATE, params)?;
        let id = doc
            .eval("/rsp/photoset/@id")
            .ok_or_else(|| Error::malformed("create response without photoset id"))?;
        Ok(CreatedPhotoset {
            id,
            url: doc.eval("/rsp/photoset/@url"),
        })
    }

    /// Deletes a photoset owned by the calling user.
    ///
    /// Implements `flickr.photosets.delete`.
    pub fn delete(&self, photoset_id: &str) -> Result<()> {
        required("photoset_id", photoset_id)?;

        let mut params = ParamSet::signed();
        params.push("photoset_id", photoset_id);

        self.call(methods::DELETE, params)?;
        Ok(())
    }

    /// Modifies the title and description of a photoset.
    ///
    /// Implements `flickr.photosets.editMeta`.
    pub fn edit_meta(
        &self,
        photoset_id: &str,
        title: &str,
        description: Option<&str>,
    ) -> Result<()> {
        required("photoset_id", photoset_id)?;
        required("title", title)?;

        let mut params = ParamSet::signed();
        params.push("photoset_id", photoset_id);
        params.push("title", title);
        params.push_opt("description", description);

        self.call(methods::EDIT_META, params)?;
        Ok(())
    }

    /// Replaces the photos in a photoset. The list is sent in order,
    /// must contain the primary photo id, and replaces the existing
    /// contents wholesale; use [`Client::add_photo`] to append instead.
    ///
    /// Implements `flickr.photosets.editPhotos`.
    pub fn edit_photos<S: AsRef<str>>(
        &self,
        photoset_id: &str,
        primary_photo_id: &str,
        photo_ids: &[S],
    ) -> Result<()> {
        required("photoset_id", photoset_id)?;
        required("primary_photo_id", primary_photo_id)?;
        required_ids("photo_ids", photo_ids)?;

        let mut params = ParamSet::signed();
        params.push("photoset_id", photoset_id);
        params.push("primary_photo_id", primary_photo_id);
        params.push("photo_ids", join_ids(photo_ids));

        self.call(methods::EDIT_PHOTOS, params)?;
        Ok(())
    }

    /// Returns the photos before and after one photo within a set.
    /// Either neighbor may be absent for a photo at the edge of the
    /// set; both are absent for a singleton set.
    ///
    /// Implements `flickr.photosets.getContext`.
    pub fn get_context(&self, photo_id: &str, photoset_id: &str) -> Result<PhotoContext> {
        required("photo_id", photo_id)?;
        required("photoset_id", photoset_id)?;

        let mut params = ParamSet::new();
        params.push("photo_id", photo_id);
        params.push("photoset_id", photoset_id);

        let doc = self.call(methods::GET_CONTEXT, params)?;
        build_context(&doc)
    }

    /// Gets information about a photoset.
    ///
    /// Implements `flickr.photosets.getInfo`.
    pub fn get_info(&self, photoset_id: &str) -> Result<Photoset> {
        required("photoset_id", photoset_id)?;

        let mut params = ParamSet::new();
        params.push("photoset_id", photoset_id);

        let doc = self.call(methods::GET_INFO, params)?;
        let node = doc
            .node("/rsp/photoset")
            .ok_or_else(|| Error::malformed("info response without photoset"))?;
        build_photoset(node)
    }

    /// Returns the photosets belonging to a user, in the owner's
    /// configured ordering. With no `user_id`, the calling user is
    /// assumed.
    ///
    /// Implements `flickr.photosets.getList`.
    pub fn get_list(&self, user_id: Option<&str>) -> Result<Vec<Photoset>> {
        let mut params = ParamSet::new();
        params.push_opt("user_id", user_id);

        let doc = self.call(methods::GET_LIST, params)?;
        build_photosets(&doc, "/rsp/photosets/photoset")
    }

    /// Gets one page of the photos in a set, with pagination metadata.
    ///
    /// A privacy filter outside 1–5 is treated as unset and omitted
    /// from the request, matching the remote's documented range.
    ///
    /// Implements `flickr.photosets.getPhotos`.
    pub fn get_photos(
        &self,
        photoset_id: &str,
        privacy_filter: Option<u32>,
        options: &PhotoListOptions,
    ) -> Result<PhotosList> {
        required("photoset_id", photoset_id)?;
        if let Some(format) = options.format.as_deref() {
            if format != "rest" {
                return Err(Error::InvalidArgument(format!(
                    "unsupported response format `{format}`"
                )));
            }
        }

        let mut params = ParamSet::new();
        params.push("photoset_id", photoset_id);
        match privacy_filter {
            Some(level) if (1..=5).contains(&level) => {
                params.push("privacy_filter", level.to_string());
            }
            // Out-of-range values are unset, not an error.
            _ => {}
        }
        options.apply(&mut params);

        let doc = self.call(methods::GET_PHOTOS, params)?;
        build_photos_list(&doc, "/rsp/photoset")
    }

    /// Gets one page of the photos in a set, discarding the pagination
    /// metadata. Delegates to [`Client::get_photos`].
    pub fn photos(
        &self,
        photoset_id: &str,
        privacy_filter: Option<u32>,
        options: &PhotoListOptions,
    ) -> Result<Vec<Photo>> {
        self.get_photos(photoset_id, privacy_filter, options)
            .map(PhotosList::into_photos)
    }

    /// Sets the order of the calling user's photosets. Sets not named
    /// in the list are moved after it, ordered by their ids.
    ///
    /// Implements `flickr.photosets.orderSets`.
    pub fn order_sets<S: AsRef<str>>(&self, photoset_ids: &[S]) -> Result<()> {
        required_ids("photoset_ids", photoset_ids)?;

        let mut params = ParamSet::new();
        params.push("photoset_ids", join_ids(photoset_ids));

        self.call(methods::ORDER_SETS, params)?;
        Ok(())
    }

    /// Removes a photo from a photoset.
    ///
    /// Implements `flickr.photosets.removePhoto`.
    pub fn remove_photo(&self, photoset_id: &str, photo_id: &str) -> Result<()> {
        required("photoset_id", photoset_id)?;
        required("photo_id", photo_id)?;

        let mut params = ParamSet::signed();
        params.push("photoset_id", photoset_id);
        params.push("photo_id", photo_id);

        self.call(methods::REMOVE_PHOTO, params)?;
        Ok(())
    }

    /// Removes multiple photos from a photoset.
    ///
    /// Implements `flickr.photosets.removePhotos`.
    pub fn remove_photos<S: AsRef<str>>(&self, photoset_id: &str, photo_ids: &[S]) -> Result<()> {
        required("photoset_id", photoset_id)?;
        required_ids("photo_ids", photo_ids)?;

        let mut params = ParamSet::signed();
        params.push("photoset_id", photoset_id);
        params.push("photo_ids", join_ids(photo_ids));

        self.call(methods::REMOVE_PHOTOS, params)?;
        Ok(())
    }

    /// Reorders the photos in a photoset. Per the remote's
    /// documentation, photos not named in the list keep their original
    /// order; that behavior is the service's, carried here as stated.
    ///
    /// Implements `flickr.photosets.reorderPhotos`.
    pub fn reorder_photos<S: AsRef<str>>(&self, photoset_id: &str, photo_ids: &[S]) -> Result<()> {
        required("photoset_id", photoset_id)?;
        required_ids("photo_ids", photo_ids)?;

        let mut params = ParamSet::new();
        params.push("photoset_id", photoset_id);
        params.push("photo_ids", join_ids(photo_ids));

        self.call(methods::REORDER_PHOTOS, params)?;
        Ok(())
    }

    /// Sets the primary photo of a photoset.
    ///
    /// Implements `flickr.photosets.setPrimaryPhoto`.
    pub fn set_primary_photo(&self, photoset_id: &str, photo_id: &str) -> Result<()> {
        required("photoset_id", photoset_id)?;
        required("photo_id", photo_id)?;

        let mut params = ParamSet::signed();
        params.push("photoset_id", photoset_id);
        params.push("photo_id", photo_id);

        self.call(methods::SET_PRIMARY_PHOTO, params)?;
        Ok(())
    }
}
