//! Schema descriptors: typed, ordered field lists describing a feed document.
//!
//! A [`FeedSchema`] is the single source of truth for which fields a feed
//! emits and in which order. It renders to a JSON Schema document and is
//! iterated by the serializer to project assembled feeds.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// A serialized feed (or feed item) document, keys in emission order.
pub type Document = Map<String, Value>;

/// JSON Feed format revision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecVersion {
    #[serde(rename = "1")]
    V1,
    #[default]
    #[serde(rename = "1.1")]
    V1_1,
}

impl SpecVersion {
    /// The literal `version` URL a feed of this revision carries.
    pub fn url(self) -> &'static str {
        match self {
            Self::V1 => "https://jsonfeed.org/version/1",
            Self::V1_1 => "https://jsonfeed.org/version/1.1",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "1" | "1.0" => Some(Self::V1),
            "1.1" => Some(Self::V1_1),
            _ => None,
        }
    }
}

impl std::fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V1 => f.write_str("1"),
            Self::V1_1 => f.write_str("1.1"),
        }
    }
}

/// String formats used by the feed schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    Uri,
    DateTime,
}

impl StringFormat {
    fn as_str(self) -> &'static str {
        match self {
            Self::Uri => "uri",
            Self::DateTime => "date-time",
        }
    }
}

/// The shape of a property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    String(Option<StringFormat>),
    Boolean,
    Integer,
    Object(Vec<Property>),
    Array(Box<PropertyKind>),
}

/// One declared property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub description: String,
    pub kind: PropertyKind,
    pub required: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            required: false,
        }
    }

    pub fn string(name: &str, description: &str) -> Self {
        Self::new(name, description, PropertyKind::String(None))
    }

    pub fn uri(name: &str, description: &str) -> Self {
        Self::new(name, description, PropertyKind::String(Some(StringFormat::Uri)))
    }

    pub fn date_time(name: &str, description: &str) -> Self {
        Self::new(
            name,
            description,
            PropertyKind::String(Some(StringFormat::DateTime)),
        )
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sub-properties of an object, or of the objects inside an array.
    pub fn object_properties(&self) -> Option<&[Property]> {
        match &self.kind {
            PropertyKind::Object(props) => Some(props),
            PropertyKind::Array(inner) => match inner.as_ref() {
                PropertyKind::Object(props) => Some(props),
                _ => None,
            },
            _ => None,
        }
    }

    fn to_json(&self) -> Value {
        let mut out = Map::new();
        out.insert("description".into(), Value::String(self.description.clone()));
        if let Value::Object(kind) = kind_to_json(&self.kind) {
            out.extend(kind);
        }
        if self.required {
            out.insert("required".into(), Value::Bool(true));
        }
        Value::Object(out)
    }
}

fn kind_to_json(kind: &PropertyKind) -> Value {
    match kind {
        PropertyKind::String(None) => json!({ "type": "string" }),
        PropertyKind::String(Some(format)) => json!({ "type": "string", "format": format.as_str() }),
        PropertyKind::Boolean => json!({ "type": "boolean" }),
        PropertyKind::Integer => json!({ "type": "integer" }),
        PropertyKind::Object(props) => json!({
            "type": "object",
            "properties": properties_to_json(props),
        }),
        PropertyKind::Array(inner) => json!({
            "type": "array",
            "items": kind_to_json(inner),
        }),
    }
}

fn properties_to_json(props: &[Property]) -> Value {
    Value::Object(
        props
            .iter()
            .map(|p| (p.name.clone(), p.to_json()))
            .collect(),
    )
}

/// The schema of a whole feed document.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSchema {
    /// `{content_type}_feed`
    pub title: String,
    pub version: SpecVersion,
    /// Top-level properties; order is emission order
    pub properties: Vec<Property>,
}

impl FeedSchema {
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    pub fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(|p| p.name.as_str()).collect()
    }

    /// Properties of a single feed item.
    pub fn item_properties(&self) -> &[Property] {
        self.property("items")
            .and_then(Property::object_properties)
            .unwrap_or(&[])
    }

    /// Insert a property right after `after`, or at the end if `after` is absent.
    pub fn insert_after(&mut self, after: &str, property: Property) {
        match self.properties.iter().position(|p| p.name == after) {
            Some(idx) => self.properties.insert(idx + 1, property),
            None => self.properties.push(property),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Property> {
        let idx = self.properties.iter().position(|p| p.name == name)?;
        Some(self.properties.remove(idx))
    }

    /// Render as a JSON Schema document.
    pub fn to_json(&self) -> Value {
        json!({
            "$schema": "http://json-schema.org/schema#",
            "title": self.title,
            "type": "object",
            "properties": properties_to_json(&self.properties),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FeedSchema {
        FeedSchema {
            title: "post_feed".into(),
            version: SpecVersion::V1_1,
            properties: vec![
                Property::uri("version", "Version URL.").required(),
                Property::string("title", "Name.").required(),
                Property::new(
                    "items",
                    "Items.",
                    PropertyKind::Array(Box::new(PropertyKind::Object(vec![
                        Property::string("id", "Id."),
                        Property::date_time("date_published", "Published."),
                    ]))),
                ),
            ],
        }
    }

    #[test]
    fn version_urls_and_parsing() {
        assert_eq!(SpecVersion::V1.url(), "https://jsonfeed.org/version/1");
        assert_eq!(SpecVersion::V1_1.url(), "https://jsonfeed.org/version/1.1");
        assert_eq!(SpecVersion::parse("1.1"), Some(SpecVersion::V1_1));
        assert_eq!(SpecVersion::parse("1.0"), Some(SpecVersion::V1));
        assert_eq!(SpecVersion::parse("2"), None);
    }

    #[test]
    fn json_schema_keeps_declared_order() {
        let doc = sample().to_json();
        let keys: Vec<&String> = doc["properties"].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["version", "title", "items"]);
        assert_eq!(doc["title"], "post_feed");
        assert_eq!(doc["properties"]["version"]["format"], "uri");
        assert_eq!(doc["properties"]["version"]["required"], true);
        assert_eq!(
            doc["properties"]["items"]["items"]["properties"]["date_published"]["format"],
            "date-time"
        );
    }

    #[test]
    fn item_properties_and_editing() {
        let mut schema = sample();
        let names: Vec<&str> = schema.item_properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["id", "date_published"]);

        schema.insert_after("title", Property::uri("prev_url", "Previous page."));
        assert_eq!(schema.property_names(), ["version", "title", "prev_url", "items"]);

        assert!(schema.remove("title").is_some());
        assert!(!schema.declares("title"));
        assert!(schema.remove("title").is_none());
    }
}
