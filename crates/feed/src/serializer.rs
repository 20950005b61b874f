//! Response serializer: envelope plus schema to an ordered JSON document.
//!
//! Iterates the schema's properties in declared order. A property is
//! emitted when the envelope has a non-empty value for it; undeclared
//! values never appear.

use restfeed_core::hooks::{HookArgs, Hooks};
use restfeed_core::schema::{Document, FeedSchema, Property};
use serde_json::{Map, Value};

use crate::author::AuthorRef;
use crate::envelope::{FeedEntry, FeedEnvelope, FeedItem, ItemContent};

/// Envelope fields emitted even when empty.
const ALWAYS_EMITTED: [&str; 4] = ["version", "title", "home_page_url", "feed_url"];

/// Serialize `envelope` against `schema`, running the data hooks.
pub fn serialize(
    envelope: &FeedEnvelope,
    schema: &FeedSchema,
    hooks: &Hooks,
    args: &HookArgs<'_>,
) -> Document {
    let args = args.with_schema(schema);
    let mut doc = Map::new();

    for property in &schema.properties {
        if property.name == "items" {
            let item_schema = property.object_properties().unwrap_or(&[]);
            let items = envelope
                .items
                .iter()
                .map(|entry| Value::Object(serialize_entry(entry, item_schema, hooks, &args)))
                .collect();
            doc.insert("items".into(), Value::Array(items));
            continue;
        }

        let Some(value) = envelope_value(envelope, property) else {
            continue;
        };
        if is_empty(&value) && !ALWAYS_EMITTED.contains(&property.name.as_str()) {
            continue;
        }
        doc.insert(property.name.clone(), value);
    }

    hooks.feed_data.apply(doc, &args)
}

fn serialize_entry(
    entry: &FeedEntry,
    item_schema: &[Property],
    hooks: &Hooks,
    args: &HookArgs<'_>,
) -> Document {
    let mut doc = Map::new();
    for property in item_schema {
        let Some(value) = item_value(&entry.item, property) else {
            continue;
        };
        // Tags are kept when empty: their presence marks a tagged type.
        if is_empty(&value) && !property.required && property.name != "tags" {
            continue;
        }
        doc.insert(property.name.clone(), value);
    }
    hooks.item_data.apply(doc, &args.with_item(&entry.source))
}

fn envelope_value(envelope: &FeedEnvelope, property: &Property) -> Option<Value> {
    let value = match property.name.as_str() {
        "version" => Value::String(envelope.version.url().into()),
        "title" => Value::String(envelope.title.clone()),
        "home_page_url" => Value::String(envelope.home_page_url.clone()),
        "feed_url" => Value::String(envelope.feed_url.clone()),
        "description" => Value::String(envelope.description.clone()),
        "user_comment" => Value::String(envelope.user_comment.clone()),
        "language" => Value::String(envelope.language.clone()),
        "icon" => Value::String(envelope.icon.clone()?),
        "favicon" => Value::String(envelope.favicon.clone()?),
        "prev_url" => Value::String(envelope.prev_url.clone()?),
        "next_url" => Value::String(envelope.next_url.clone()?),
        "expired" => Value::Bool(envelope.expired),
        "author" => shape_author(envelope.authors.first()?, property),
        "authors" => shape_authors(&envelope.authors, property),
        "hubs" => serde_json::to_value(&envelope.hubs).ok()?,
        _ => return None,
    };
    Some(value)
}

fn item_value(item: &FeedItem, property: &Property) -> Option<Value> {
    let string = |s: &Option<String>| s.clone().map(Value::String);
    match property.name.as_str() {
        "id" => Some(Value::String(item.id.clone())),
        "url" => Some(Value::String(item.url.clone())),
        "title" => Some(Value::String(item.title.clone())),
        "external_url" => string(&item.external_url),
        "content_html" => match &item.content {
            ItemContent::Html(html) => Some(Value::String(html.clone())),
            ItemContent::Text(_) => None,
        },
        "content_text" => match &item.content {
            ItemContent::Text(text) => Some(Value::String(text.clone())),
            ItemContent::Html(_) => None,
        },
        "summary" => string(&item.summary),
        "image" => string(&item.image),
        "banner_image" => string(&item.banner_image),
        "date_published" => string(&item.date_published),
        "date_modified" => string(&item.date_modified),
        "author" => Some(shape_author(item.authors.first()?, property)),
        "authors" => Some(shape_authors(&item.authors, property)),
        "tags" => item
            .tags
            .as_ref()
            .map(|tags| Value::Array(tags.iter().cloned().map(Value::String).collect())),
        "attachments" => serde_json::to_value(&item.attachments).ok(),
        _ => None,
    }
}

fn shape_authors(authors: &[AuthorRef], property: &Property) -> Value {
    Value::Array(authors.iter().map(|a| shape_author(a, property)).collect())
}

/// Project an author onto the declared author sub-properties.
fn shape_author(author: &AuthorRef, property: &Property) -> Value {
    let mut out = Map::new();
    let fields = [
        ("name", Some(&author.name)),
        ("url", author.url.as_ref()),
        ("avatar", author.avatar.as_ref()),
    ];
    for (name, value) in fields {
        let declared = property
            .object_properties()
            .is_none_or(|props| props.iter().any(|p| p.name == name));
        match value {
            Some(v) if declared && !v.is_empty() => {
                out.insert(name.into(), Value::String(v.clone()));
            }
            _ => {}
        }
    }
    Value::Object(out)
}

/// Falsy in the feed sense: null, false, zero, or an empty string or collection.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Hub;
    use crate::schema::build_schema;
    use chrono::Utc;
    use restfeed_core::content::ContentItem;
    use restfeed_core::request::FeedRequest;
    use restfeed_core::schema::SpecVersion;
    use serde_json::json;

    fn source(id: &str) -> ContentItem {
        ContentItem {
            id: id.into(),
            guid: format!("https://example.com/?p={id}"),
            content_type: "post".into(),
            status: Default::default(),
            url: format!("https://example.com/{id}"),
            title: format!("Item {id}"),
            content: String::new(),
            excerpt: String::new(),
            date_published: Utc::now(),
            date_modified: Utc::now(),
            author: None,
            tags: Vec::new(),
            thumbnail: None,
        }
    }

    fn jane() -> AuthorRef {
        AuthorRef {
            name: "Jane".into(),
            url: Some("https://twitter.com/jane".into()),
            avatar: None,
        }
    }

    fn entry(id: &str, content: ItemContent, tags: Option<Vec<String>>) -> FeedEntry {
        FeedEntry {
            source: source(id),
            item: FeedItem {
                id: format!("https://example.com/?p={id}"),
                url: format!("https://example.com/{id}"),
                external_url: None,
                title: format!("Item {id}"),
                content,
                summary: None,
                image: None,
                banner_image: None,
                date_published: Some("2024-05-01T10:00:00+00:00".into()),
                date_modified: None,
                authors: vec![jane()],
                tags,
                attachments: Vec::new(),
            },
        }
    }

    fn envelope(version: SpecVersion) -> FeedEnvelope {
        FeedEnvelope {
            version,
            title: "Site".into(),
            home_page_url: "https://example.com/".into(),
            feed_url: "https://example.com/wp-json/feed/v1/posts".into(),
            description: String::new(),
            user_comment: "Read me.".into(),
            icon: None,
            favicon: None,
            language: "en-US".into(),
            authors: vec![jane()],
            expired: false,
            prev_url: Some("https://example.com/wp-json/feed/v1/posts?page=1".into()),
            next_url: None,
            hubs: Vec::new(),
            items: vec![
                entry("1", ItemContent::Html("<p>One</p>".into()), Some(Vec::new())),
                entry("2", ItemContent::Text("Two".into()), None),
            ],
        }
    }

    fn run(envelope: &FeedEnvelope, schema: &FeedSchema, hooks: &Hooks) -> Document {
        let request = FeedRequest::default();
        serialize(envelope, schema, hooks, &HookArgs::new("post", &request))
    }

    #[test]
    fn emits_declared_non_empty_fields_in_schema_order() {
        let schema = build_schema("post", SpecVersion::V1_1, false);
        let doc = run(&envelope(SpecVersion::V1_1), &schema, &Hooks::new());

        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["version", "title", "home_page_url", "feed_url", "user_comment", "authors", "language", "items"]
        );
        assert_eq!(doc["version"], "https://jsonfeed.org/version/1.1");
    }

    #[test]
    fn undeclared_prev_url_is_not_emitted_until_declared() {
        let env = envelope(SpecVersion::V1_1);
        let mut schema = build_schema("post", SpecVersion::V1_1, false);
        assert!(!run(&env, &schema, &Hooks::new()).contains_key("prev_url"));

        schema.insert_after("user_comment", Property::uri("prev_url", "Previous page."));
        let doc = run(&env, &schema, &Hooks::new());
        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(keys[4..6], ["user_comment", "prev_url"]);
    }

    #[test]
    fn content_fields_are_exclusive() {
        let schema = build_schema("post", SpecVersion::V1_1, false);
        let doc = run(&envelope(SpecVersion::V1_1), &schema, &Hooks::new());
        for item in doc["items"].as_array().unwrap() {
            let html = item.get("content_html").is_some();
            let text = item.get("content_text").is_some();
            assert!(html ^ text);
        }
    }

    #[test]
    fn empty_tags_are_kept_and_absent_tags_omitted() {
        let schema = build_schema("post", SpecVersion::V1_1, false);
        let doc = run(&envelope(SpecVersion::V1_1), &schema, &Hooks::new());
        let items = doc["items"].as_array().unwrap();
        assert_eq!(items[0]["tags"], json!([]));
        assert!(items[1].get("tags").is_none());
        assert!(items[0].get("date_modified").is_none());
    }

    #[test]
    fn compatibility_duplicates_first_author() {
        let schema = build_schema("post", SpecVersion::V1_1, true);
        let doc = run(&envelope(SpecVersion::V1_1), &schema, &Hooks::new());
        assert_eq!(doc["author"], json!({"name": "Jane", "url": "https://twitter.com/jane"}));
        assert_eq!(doc["authors"][0], doc["author"]);

        let item = &doc["items"][0];
        assert_eq!(item["author"]["name"], "Jane");
        assert_eq!(item["authors"][0]["name"], "Jane");
    }

    #[test]
    fn version_1_uses_singular_author() {
        let schema = build_schema("post", SpecVersion::V1, false);
        let doc = run(&envelope(SpecVersion::V1), &schema, &Hooks::new());
        assert_eq!(doc["version"], "https://jsonfeed.org/version/1");
        assert_eq!(doc["author"]["name"], "Jane");
        assert!(doc.get("authors").is_none());
        assert!(doc.get("language").is_none());
    }

    #[test]
    fn author_is_omitted_without_authors() {
        let schema = build_schema("post", SpecVersion::V1_1, true);
        let mut env = envelope(SpecVersion::V1_1);
        env.authors.clear();
        let doc = run(&env, &schema, &Hooks::new());
        assert!(doc.get("author").is_none());
        assert!(doc.get("authors").is_none());
    }

    #[test]
    fn hubs_and_custom_properties() {
        let mut schema = build_schema("post", SpecVersion::V1_1, false);
        schema.insert_after("hubs", Property::string("_custom", "Custom."));
        let mut env = envelope(SpecVersion::V1_1);
        env.hubs.push(Hub {
            kind: "WebSub".into(),
            url: "https://hub.example.com/".into(),
        });

        let doc = run(&env, &schema, &Hooks::new());
        assert_eq!(doc["hubs"], json!([{"type": "WebSub", "url": "https://hub.example.com/"}]));
        assert!(doc.get("_custom").is_none());

        let mut hooks = Hooks::new();
        hooks.feed_data.add_global(|mut doc, _| {
            doc.insert("_custom".into(), json!("value"));
            doc
        });
        let doc = run(&env, &schema, &hooks);
        assert_eq!(doc["_custom"], "value");
    }

    #[test]
    fn data_hooks_run_typed_then_global() {
        let mut hooks = Hooks::new();
        hooks.item_data.add_for("post", |mut doc, args| {
            doc.insert("_source".into(), json!(args.item.map(|i| i.id.clone())));
            doc
        });
        hooks.feed_data.add_for("post", |mut doc, _| {
            doc.insert("_stage".into(), json!("typed"));
            doc
        });
        hooks.feed_data.add_global(|mut doc, args| {
            let prev = doc.get("_stage").cloned().unwrap_or_default();
            doc.insert("_stage".into(), json!(format!("{}+global", prev.as_str().unwrap_or(""))));
            doc.insert("_has_schema".into(), json!(args.schema.is_some()));
            doc
        });

        let schema = build_schema("post", SpecVersion::V1_1, false);
        let doc = run(&envelope(SpecVersion::V1_1), &schema, &hooks);
        assert_eq!(doc["_stage"], "typed+global");
        assert_eq!(doc["_has_schema"], true);
        assert_eq!(doc["items"][1]["_source"], "2");
    }

    #[test]
    fn falsy_values() {
        assert!(is_empty(&json!(null)));
        assert!(is_empty(&json!(false)));
        assert!(is_empty(&json!(0)));
        assert!(is_empty(&json!("")));
        assert!(is_empty(&json!([])));
        assert!(!is_empty(&json!(true)));
        assert!(!is_empty(&json!("x")));
        assert!(!is_empty(&json!([0])));
    }
}
