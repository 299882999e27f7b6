//! Materialization of response documents into owned domain objects.

use std::collections::BTreeMap;

use tracing::debug;

use crate::document::{Document, Node};
use crate::error::{Error, Result};
use crate::types::{ContextPhoto, Photo, PhotoContext, Photoset, PhotosList};

/// Attributes of `<photo>` that map to typed fields; everything else
/// is an extra.
const PHOTO_FIELDS: [&str; 6] = ["id", "title", "secret", "server", "farm", "isprimary"];

fn count(node: &Node, attr: &str) -> u32 {
    node.attr(attr).and_then(|v| v.parse().ok()).unwrap_or(0)
}

fn opt(node: &Node, attr: &str) -> Option<String> {
    node.attr(attr).map(str::to_owned)
}

/// Builds one photoset record from a `<photoset>` element. Title and
/// description are child elements in info/list responses.
pub(crate) fn build_photoset(node: &Node) -> Result<Photoset> {
    let id = node
        .attr("id")
        .ok_or_else(|| Error::malformed("photoset element without id"))?;
    Ok(Photoset {
        id: id.to_owned(),
        title: node.child_text("title").unwrap_or_default().to_owned(),
        description: node
            .child_text("description")
            .unwrap_or_default()
            .to_owned(),
        primary_photo_id: node.attr("primary").unwrap_or_default().to_owned(),
        owner: opt(node, "owner"),
        photos_count: count(node, "photos"),
        url: opt(node, "url"),
    })
}

/// Builds every photoset matching `path`, in document order. The
/// remote returns sets in the owner's configured ordering; that order
/// is preserved as-is.
pub(crate) fn build_photosets(doc: &Document, path: &str) -> Result<Vec<Photoset>> {
    let nodes = doc.nodes(path);
    debug!(count = nodes.len(), "materializing photoset list");
    nodes.into_iter().map(build_photoset).collect()
}

pub(crate) fn build_photo(node: &Node) -> Result<Photo> {
    let id = node
        .attr("id")
        .ok_or_else(|| Error::malformed("photo element without id"))?;
    let mut extras = BTreeMap::new();
    for (name, value) in node.attrs() {
        if !PHOTO_FIELDS.contains(&name) {
            extras.insert(name.to_owned(), value.to_owned());
        }
    }
    Ok(Photo {
        id: id.to_owned(),
        title: opt(node, "title"),
        secret: opt(node, "secret"),
        server: opt(node, "server"),
        farm: opt(node, "farm"),
        is_primary: node.attr("isprimary") == Some("1"),
        extras,
    })
}

/// Builds the paginated photo list rooted at `list_path`. An absent
/// list node is a malformed response; an empty child set is a valid
/// zero-length page. Missing pagination attributes fall back to a
/// single page holding exactly the returned photos.
pub(crate) fn build_photos_list(doc: &Document, list_path: &str) -> Result<PhotosList> {
    let node = doc
        .node(list_path)
        .ok_or_else(|| Error::malformed(format!("missing list node at {list_path}")))?;
    let photos: Vec<Photo> = node
        .children_named("photo")
        .map(build_photo)
        .collect::<Result<_>>()?;
    let len = photos.len() as u32;
    Ok(PhotosList {
        page: node.attr("page").and_then(|v| v.parse().ok()).unwrap_or(1),
        pages: node.attr("pages").and_then(|v| v.parse().ok()).unwrap_or(1),
        per_page: node
            .attr("perpage")
            .and_then(|v| v.parse().ok())
            .unwrap_or(len),
        total: node
            .attr("total")
            .and_then(|v| v.parse().ok())
            .unwrap_or(len),
        photos,
    })
}

/// Builds the previous/next neighbor pair. The remote encodes an
/// absent neighbor either by omitting the element or by sending
/// `id="0"`; neither is a failure.
pub(crate) fn build_context(doc: &Document) -> Result<PhotoContext> {
    Ok(PhotoContext {
        previous: doc.node("/rsp/prevphoto").and_then(context_photo),
        next: doc.node("/rsp/nextphoto").and_then(context_photo),
    })
}

fn context_photo(node: &Node) -> Option<ContextPhoto> {
    let id = node.attr("id")?;
    if id == "0" {
        return None;
    }
    Some(ContextPhoto {
        id: id.to_owned(),
        title: opt(node, "title"),
        secret: opt(node, "secret"),
        thumb: opt(node, "thumb"),
        url: opt(node, "url"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photoset_from_info_response() {
        let doc = Document::parse(
            r#"<rsp stat="ok">
              <photoset id="72157600" owner="30525934@N00" primary="1234" photos="11">
                <title>A day out</title>
                <description>Walking the coast</description>
              </photoset>
            </rsp>"#,
        )
        .unwrap();
        let set = build_photoset(doc.node("/rsp/photoset").unwrap()).unwrap();
        assert_eq!(set.id, "72157600");
        assert_eq!(set.title, "A day out");
        assert_eq!(set.description, "Walking the coast");
        assert_eq!(set.primary_photo_id, "1234");
        assert_eq!(set.owner.as_deref(), Some("30525934@N00"));
        assert_eq!(set.photos_count, 11);
        assert_eq!(set.url, None);
    }

    #[test]
    fn photoset_without_id_is_malformed() {
        let doc = Document::parse(r#"<rsp stat="ok"><photoset primary="1"/></rsp>"#).unwrap();
        let err = build_photoset(doc.node("/rsp/photoset").unwrap()).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn photosets_preserve_remote_ordering() {
        let doc = Document::parse(
            r#"<rsp stat="ok"><photosets>
                 <photoset id="9" primary="1"><title>nine</title></photoset>
                 <photoset id="4" primary="2"><title>four</title></photoset>
               </photosets></rsp>"#,
        )
        .unwrap();
        let sets = build_photosets(&doc, "/rsp/photosets/photoset").unwrap();
        let ids: Vec<&str> = sets.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["9", "4"]);
    }

    #[test]
    fn photo_extras_capture_unclaimed_attributes() {
        let doc = Document::parse(
            r#"<rsp stat="ok"><photoset id="7">
                 <photo id="1234" secret="abc" server="2" title="dawn"
                        isprimary="1" license="4" media="photo"/>
               </photoset></rsp>"#,
        )
        .unwrap();
        let node = doc.node("/rsp/photoset").unwrap().child("photo").unwrap();
        let photo = build_photo(node).unwrap();
        assert_eq!(photo.id, "1234");
        assert!(photo.is_primary);
        assert_eq!(photo.secret.as_deref(), Some("abc"));
        assert_eq!(photo.extras.get("license").map(String::as_str), Some("4"));
        assert_eq!(photo.extras.get("media").map(String::as_str), Some("photo"));
        assert!(!photo.extras.contains_key("id"));
    }

    #[test]
    fn photos_list_reads_pagination_metadata() {
        let doc = Document::parse(
            r#"<rsp stat="ok">
              <photoset id="7" page="2" pages="5" perpage="2" total="9">
                <photo id="10"/><photo id="11"/>
              </photoset>
            </rsp>"#,
        )
        .unwrap();
        let list = build_photos_list(&doc, "/rsp/photoset").unwrap();
        assert_eq!(list.page, 2);
        assert_eq!(list.pages, 5);
        assert_eq!(list.per_page, 2);
        assert_eq!(list.total, 9);
        assert_eq!(list.photos.len(), 2);
        assert_eq!(list.photos[0].id, "10");
    }

    #[test]
    fn empty_photo_page_is_valid() {
        let doc =
            Document::parse(r#"<rsp stat="ok"><photoset id="7" page="1" pages="1" total="0"/></rsp>"#)
                .unwrap();
        let list = build_photos_list(&doc, "/rsp/photoset").unwrap();
        assert!(list.photos.is_empty());
        assert_eq!(list.total, 0);
    }

    #[test]
    fn missing_list_node_is_malformed() {
        let doc = Document::parse(r#"<rsp stat="ok"/>"#).unwrap();
        let err = build_photos_list(&doc, "/rsp/photoset").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn context_with_missing_successor() {
        let doc = Document::parse(
            r#"<rsp stat="ok">
              <prevphoto id="999" secret="aa" thumb="http://t" title="before"/>
              <nextphoto id="0" secret="" thumb="" title=""/>
            </rsp>"#,
        )
        .unwrap();
        let ctx = build_context(&doc).unwrap();
        assert_eq!(ctx.previous.as_ref().map(|p| p.id.as_str()), Some("999"));
        assert!(ctx.next.is_none());
    }

    #[test]
    fn singleton_set_has_no_neighbors_and_is_not_a_failure() {
        let doc = Document::parse(
            r#"<rsp stat="ok"><prevphoto id="0"/><nextphoto id="0"/></rsp>"#,
        )
        .unwrap();
        let ctx = build_context(&doc).unwrap();
        assert_eq!(ctx, PhotoContext::default());
    }
}
