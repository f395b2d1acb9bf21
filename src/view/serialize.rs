// Record serialization for the XML and JSON representations
// Both documents carry the same field set

use serde::Serialize;

use super::ViewError;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

pub fn to_json<T: Serialize>(record: &T) -> Result<String, ViewError> {
    Ok(serde_json::to_string(record)?)
}

/// Serialize under `root`, one child element per field
pub fn to_xml<T: Serialize>(root: &str, record: &T) -> Result<String, ViewError> {
    let body = quick_xml::se::to_string_with_root(root, record)
        .map_err(|e| ViewError::Xml(e.to_string()))?;
    Ok(format!("{XML_DECLARATION}{body}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::definition;
    use quick_xml::events::Event;
    use quick_xml::Reader;
    use std::collections::BTreeSet;

    /// Names of the direct children of the root element
    fn xml_fields(xml: &str) -> (String, BTreeSet<String>) {
        let mut reader = Reader::from_str(xml);
        let mut depth = 0;
        let mut root = String::new();
        let mut fields = BTreeSet::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) => {
                    let name = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                    if depth == 0 {
                        root = name;
                    } else if depth == 1 {
                        fields.insert(name);
                    }
                    depth += 1;
                }
                Event::Empty(e) if depth == 1 => {
                    fields.insert(String::from_utf8(e.name().as_ref().to_vec()).unwrap());
                }
                Event::End(_) => depth -= 1,
                Event::Eof => break,
                _ => {}
            }
        }
        (root, fields)
    }

    #[test]
    fn test_json_fields() {
        let json = to_json(&definition(9, 5, "a test definition")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], 9);
        assert_eq!(value["synset_id"], 5);
        assert_eq!(value["gloss"], "a test definition");
        assert_eq!(value["created_at"], "2012-03-14T09:26:53Z");
    }

    #[test]
    fn test_xml_well_formed_with_json_field_set() {
        let def = definition(9, 5, "fish & <chips>");
        let xml = to_xml("definition", &def).unwrap();
        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains("<gloss>fish &amp; &lt;chips"));
        assert!(xml.contains("<synset_id>5</synset_id>"));

        let (root, fields) = xml_fields(&xml);
        assert_eq!(root, "definition");

        let json: serde_json::Value = serde_json::from_str(&to_json(&def).unwrap()).unwrap();
        let json_fields: BTreeSet<String> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(fields, json_fields);
    }
}
