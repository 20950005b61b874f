//! Per-version feed schemas.
//!
//! The property list of each version is a fixed, ordered descriptor list.
//! Its order drives output field order in the serializer.

use restfeed_core::schema::{FeedSchema, Property, PropertyKind, SpecVersion};

/// Build the unhooked schema for `content_type`.
///
/// `backward_compatible` keeps the singular `author` next to `authors` in
/// version 1.1 documents. It has no effect on version 1.
pub fn build_schema(content_type: &str, version: SpecVersion, backward_compatible: bool) -> FeedSchema {
    let mut properties = vec![
        Property::uri(
            "version",
            "The URL of the version of the format the feed uses.",
        )
        .required(),
        Property::string("title", "The name of the feed.").required(),
        Property::uri(
            "home_page_url",
            "The URL of the resource that the feed describes.",
        ),
        Property::uri("feed_url", "The URL of the feed."),
        Property::string("description", "Detail on what the feed is about."),
        Property::string(
            "user_comment",
            "A description of the purpose of the feed for a person looking at the raw JSON.",
        ),
        Property::uri(
            "next_url",
            "The URL of a feed that provides the next n items.",
        ),
        Property::uri("icon", "The URL of an image for the feed suitable to be used in a timeline."),
        Property::uri("favicon", "The URL of an image for the feed suitable to be used in a source list."),
    ];

    properties.extend(author_properties(version, backward_compatible, "The feed author."));
    if version == SpecVersion::V1_1 {
        properties.push(Property::string(
            "language",
            "The primary language for the feed in the format specified in RFC 5646.",
        ));
    }

    properties.push(Property::new(
        "expired",
        "Whether or not the feed is finished.",
        PropertyKind::Boolean,
    ));
    properties.push(Property::new(
        "hubs",
        "Endpoints that can be used to subscribe to real-time notifications of changes to this feed.",
        PropertyKind::Array(Box::new(PropertyKind::Object(vec![
            Property::string("type", "The protocol used to talk with the hub."),
            Property::uri("url", "The URL of the hub."),
        ]))),
    ));
    properties.push(Property::new(
        "items",
        "The items in the feed.",
        PropertyKind::Array(Box::new(PropertyKind::Object(item_properties(
            version,
            backward_compatible,
        )))),
    ));

    FeedSchema {
        title: format!("{content_type}_feed"),
        version,
        properties,
    }
}

fn item_properties(version: SpecVersion, backward_compatible: bool) -> Vec<Property> {
    let mut properties = vec![
        Property::string("id", "Unique id for the item.").required(),
        Property::uri("url", "The URL of the resource described by the item.").required(),
        Property::uri("external_url", "The URL of a page elsewhere."),
        Property::string("title", "Plain text title.").required(),
        Property::string("content_html", "The HTML of the item."),
        Property::string("content_text", "The plain text of the item."),
        Property::string("summary", "A plain text sentence or two describing the item."),
        Property::uri("image", "The URL of the main image for the item."),
        Property::uri("banner_image", "The URL of an image to use as a banner."),
        Property::date_time("date_published", "The date the item was published."),
        Property::date_time("date_modified", "The date the item was modified."),
    ];

    properties.extend(author_properties(version, backward_compatible, "The item author."));

    properties.push(Property::new(
        "tags",
        "Tags associated with the item.",
        PropertyKind::Array(Box::new(PropertyKind::String(None))),
    ));
    properties.push(Property::new(
        "attachments",
        "Related resources.",
        PropertyKind::Array(Box::new(PropertyKind::Object(attachment_properties()))),
    ));
    properties
}

fn author_properties(version: SpecVersion, backward_compatible: bool, description: &str) -> Vec<Property> {
    let single = Property::new(
        "author",
        description,
        PropertyKind::Object(author_object()),
    );
    match version {
        SpecVersion::V1 => vec![single],
        SpecVersion::V1_1 => {
            let list = Property::new(
                "authors",
                description,
                PropertyKind::Array(Box::new(PropertyKind::Object(author_object()))),
            );
            if backward_compatible {
                vec![single, list]
            } else {
                vec![list]
            }
        }
    }
}

fn author_object() -> Vec<Property> {
    vec![
        Property::string("name", "The author's name."),
        Property::uri("url", "The URL of a site owned by the author."),
        Property::uri("avatar", "The URL for an image for the author."),
    ]
}

fn attachment_properties() -> Vec<Property> {
    vec![
        Property::uri("url", "The location of the attachment.").required(),
        Property::string("mime_type", "The type of the attachment.").required(),
        Property::string("title", "Name for the attachment."),
        Property::new("size_in_bytes", "Size of the file in bytes.", PropertyKind::Integer),
        Property::new(
            "duration_in_seconds",
            "How long the attachment takes to listen to or watch.",
            PropertyKind::Integer,
        ),
    ]
}
