//! Definition `show` action
//!
//! Runs as an ordered pipeline, each step returning early on failure:
//! find the synset, find the definition inside it, build the navigation
//! context, then render the negotiated format.

use hyper::body::Bytes;

use super::error::ActionError;
use crate::http::{Format, NotAcceptable};
use crate::model::{Definition, DefinitionId, Synset, SynsetId};
use crate::store::Store;
use crate::view::{serialize, Renderer, ShowContext};

/// Root element of the XML document
const XML_ROOT: &str = "definition";

/// Inputs of one `show` request
#[derive(Debug, Clone)]
pub struct ShowRequest<'a> {
    pub synset_id: &'a str,
    pub id: &'a str,
    /// Result of content negotiation, checked only once both records resolve
    pub format: Result<Format, NotAcceptable>,
}

/// A successfully rendered representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub format: Format,
    pub body: Bytes,
}

pub fn find_synset(store: &dyn Store, token: &str) -> Result<Synset, ActionError> {
    let id = SynsetId::parse(token).ok_or_else(|| ActionError::NotFound {
        resource: "Synset",
        id: token.to_string(),
    })?;
    Ok(store.find_synset(id)?)
}

/// Find a definition owned by `synset`
pub fn find_definition(
    store: &dyn Store,
    synset: &Synset,
    token: &str,
) -> Result<Definition, ActionError> {
    let id = DefinitionId::parse(token).ok_or_else(|| ActionError::NotFound {
        resource: "Definition",
        id: token.to_string(),
    })?;
    Ok(store.find_definition(synset.id, id)?)
}

pub fn show(
    store: &dyn Store,
    renderer: &dyn Renderer,
    req: ShowRequest<'_>,
) -> Result<Rendered, ActionError> {
    let synset = find_synset(store, req.synset_id)?;
    let definition = find_definition(store, &synset, req.id)?;

    let ctx = ShowContext {
        top_bar_synset: &synset,
        definition: &definition,
    };

    let format = req.format?;
    let body = match format {
        Format::Html => renderer.render_definition(&ctx)?,
        Format::Xml => serialize::to_xml(XML_ROOT, ctx.definition)?,
        Format::Json => serialize::to_json(ctx.definition)?,
    };

    Ok(Rendered {
        format,
        body: Bytes::from(body),
    })
}
