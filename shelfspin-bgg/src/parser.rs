//! BGG XML parsers.
//!
//! Pure functions over `roxmltree` documents. [`ensure_document`] is the
//! only fallible step; the item parsers skip anything they cannot use.

use roxmltree::{Document, Node};
use shelfspin_core::{CollectionItem, GameDetail};
use shelfspin_fetch::FetchError;
use std::collections::HashMap;
use tracing::{debug, warn};

// ============================================================================
// Document
// ============================================================================

/// Parses `xml` and rejects BGG error documents.
///
/// # Errors
///
/// [`FetchError::MalformedResponse`] if the text is not well-formed XML or
/// contains an `<error>` element. The message comes from the error's
/// `<message>` child, its `message` attribute, or its own text.
pub fn ensure_document(xml: &str) -> Result<Document<'_>, FetchError> {
    let doc = Document::parse(xml).map_err(|e| {
        warn!(error = %e, len = xml.len(), "BGG response is not valid XML");
        FetchError::MalformedResponse(format!("Could not read the BGG response: {e}"))
    })?;

    if let Some(error) = doc.descendants().find(|n| n.has_tag_name("error")) {
        let message = error_message(error);
        warn!(message = %message, "BGG returned an error document");
        return Err(FetchError::MalformedResponse(message));
    }

    Ok(doc)
}

fn error_message(error: Node<'_, '_>) -> String {
    error
        .descendants()
        .find(|n| n.has_tag_name("message"))
        .map(text_content)
        .or_else(|| error.attribute("message").map(str::to_string))
        .or_else(|| Some(text_content(error)))
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "BGG returned an error".to_string())
}

/// Concatenated text of all descendant text nodes.
fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.descendants().skip(1).find(|n| n.has_tag_name(name))
}

fn items<'a, 'input: 'a>(doc: &'a Document<'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    doc.descendants().filter(|n| n.has_tag_name("item"))
}

// ============================================================================
// Collection
// ============================================================================

/// Unplayed, named items of a collection document.
///
/// An item is kept when its `numplays` text is exactly `0` and its `name` is not
/// blank. Items without an `objectid` are dropped. A blank thumbnail falls
/// back to the placeholder image.
pub fn parse_collection(doc: &Document<'_>) -> Vec<CollectionItem> {
    let mut total = 0;
    let unplayed: Vec<CollectionItem> = items(doc)
        .inspect(|_| total += 1)
        .filter_map(|item| {
            let plays = child_element(item, "numplays").map(text_content)?;
            if plays != "0" {
                return None;
            }

            let name = child_element(item, "name").map(text_content)?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }

            let Some(id) = item.attribute("objectid") else {
                debug!(name, "Skipping collection item without objectid");
                return None;
            };

            let thumbnail = child_element(item, "thumbnail")
                .map(text_content)
                .map(|t| t.trim().to_string());

            Some(CollectionItem::new(id, name, thumbnail))
        })
        .collect();

    debug!(total, unplayed = unplayed.len(), "Parsed collection");
    unplayed
}

// ============================================================================
// Details
// ============================================================================

/// Player counts keyed by item id from a `thing` document.
///
/// Items missing an `id`, or a `minplayers`/`maxplayers` value that reads
/// as a non-negative integer, are skipped.
pub fn parse_details(doc: &Document<'_>) -> HashMap<String, GameDetail> {
    let details: HashMap<String, GameDetail> = items(doc)
        .filter_map(|item| {
            let id = item.attribute("id")?;
            let min = player_value(item, "minplayers")?;
            let max = player_value(item, "maxplayers")?;
            Some((id.to_string(), GameDetail::new(min, max)))
        })
        .collect();

    debug!(count = details.len(), "Parsed game details");
    details
}

fn player_value(item: Node<'_, '_>, name: &str) -> Option<u32> {
    child_element(item, name)?
        .attribute("value")?
        .trim()
        .parse()
        .ok()
}
