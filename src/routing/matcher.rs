//! Route matching module
//!
//! Matches request paths against the resource pattern
//! `/synsets/{synset_id}/definitions/{id}[.{format}]`.

/// Parameters captured from a matched path
///
/// Ids stay raw tokens; whether they name a record is the action's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch<'a> {
    DefinitionShow {
        synset_id: &'a str,
        id: &'a str,
        /// Format suffix without the dot
        extension: Option<&'a str>,
    },
}

/// Find the route for a path
pub fn match_route(path: &str) -> Option<RouteMatch<'_>> {
    let rest = path.strip_prefix('/')?;
    let mut segments = rest.split('/');

    let (Some("synsets"), Some(synset_id), Some("definitions"), Some(last), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return None;
    };

    let (id, extension) = split_extension(last);
    if synset_id.is_empty() || id.is_empty() || extension.is_some_and(str::is_empty) {
        return None;
    }

    Some(RouteMatch::DefinitionShow {
        synset_id,
        id,
        extension,
    })
}

/// Split `9.json` into `("9", Some("json"))`
fn split_extension(segment: &str) -> (&str, Option<&str>) {
    match segment.rsplit_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (segment, None),
    }
}
