//! Image and video item location and key spellings.

use mosaic_core::{MediaIntent, Modality};
use mosaic_error::NormalizeError;
use serde_json::{Map, Value};

/// Keys that may hold the list (or single object) of generated items, in
/// priority order. Only the first present key is consulted.
pub const ITEM_CONTAINERS: &[&str] = &["data", "images", "videos", "results"];

/// Accepted spellings for media references inside an item.
#[derive(Debug, Clone, Copy)]
pub struct MediaKeys {
    /// Primary media URL
    pub url: &'static [&'static str],
    /// Primary media inline payload
    pub inline: &'static [&'static str],
    /// Thumbnail URL
    pub thumbnail_url: &'static [&'static str],
    /// Thumbnail inline payload
    pub thumbnail_inline: &'static [&'static str],
    /// Generic thumbnail: a URL or payload string, or an object holding one
    pub thumbnail: &'static str,
}

/// Key spellings in priority order within each group.
pub const MEDIA_KEYS: MediaKeys = MediaKeys {
    url: &["url", "image_url", "video_url", "uri"],
    inline: &["b64_json", "b64", "base64", "bytes_base64"],
    thumbnail_url: &["thumbnail_url", "thumb_url", "poster_url"],
    thumbnail_inline: &["thumbnail_b64_json", "thumbnail_b64"],
    thumbnail: "thumbnail",
};

impl MediaKeys {
    /// True if `object` carries any recognized key with a usable value.
    pub fn recognizes(&self, object: &Map<String, Value>) -> bool {
        self.url
            .iter()
            .chain(self.inline)
            .chain(self.thumbnail_url)
            .chain(self.thumbnail_inline)
            .copied()
            .chain(std::iter::once(self.thumbnail))
            .any(|key| object.get(key).is_some_and(|v| !v.is_null()))
    }
}

/// A located media item.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Item<'a> {
    /// An object carrying media keys
    Object(&'a Map<String, Value>),
    /// A bare string standing in for the media itself
    Bare(&'a str),
}

/// Find the media item for `modality` in `raw`.
pub(crate) fn locate_item(modality: Modality, raw: &Value) -> Result<Item<'_>, NormalizeError> {
    let Some(top) = raw.as_object() else {
        return Err(NormalizeError::unrecognized(
            modality.to_string(),
            describe(raw),
        ));
    };

    let Some((container, value)) = ITEM_CONTAINERS
        .iter()
        .find_map(|key| top.get(*key).filter(|v| !v.is_null()).map(|v| (*key, v)))
    else {
        if MEDIA_KEYS.recognizes(top) {
            return Ok(Item::Object(top));
        }
        return Err(NormalizeError::unrecognized(
            modality.to_string(),
            describe(raw),
        ));
    };

    let first = match value {
        Value::Array(items) => match items.first() {
            Some(first) => first,
            None => {
                return Err(NormalizeError::media_unavailable(
                    modality.to_string(),
                    format!("`{}` is empty", container),
                ));
            }
        },
        other => other,
    };

    match first {
        Value::Object(item) => Ok(Item::Object(item)),
        Value::String(s) => match present(s) {
            Some(s) => Ok(Item::Bare(s)),
            None => Err(NormalizeError::media_unavailable(
                modality.to_string(),
                format!("`{}` holds an empty string", container),
            )),
        },
        other => Err(NormalizeError::unrecognized(
            modality.to_string(),
            format!("`{}` holds {}", container, describe(other)),
        )),
    }
}

/// Primary media of an item. Inline data wins over a URL.
pub(crate) fn primary_media(item: Item<'_>) -> Option<MediaIntent> {
    match item {
        Item::Bare(s) => Some(from_generic(s)),
        Item::Object(object) => object_media(object),
    }
}

/// Thumbnail shipped alongside an item, if any.
pub(crate) fn thumbnail_media(item: Item<'_>) -> Option<MediaIntent> {
    let Item::Object(object) = item else {
        return None;
    };
    if let Some(data) = lookup(object, MEDIA_KEYS.thumbnail_inline) {
        return Some(from_inline(data));
    }
    if let Some(url) = lookup(object, MEDIA_KEYS.thumbnail_url) {
        return Some(from_url(url));
    }
    match object.get(MEDIA_KEYS.thumbnail)? {
        Value::String(s) => present(s).map(from_generic),
        Value::Object(nested) => object_media(nested),
        _ => None,
    }
}

fn object_media(object: &Map<String, Value>) -> Option<MediaIntent> {
    if let Some(data) = lookup(object, MEDIA_KEYS.inline) {
        return Some(from_inline(data));
    }
    lookup(object, MEDIA_KEYS.url).map(from_url)
}

fn lookup<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| match object.get(*key)? {
        Value::String(s) => present(s),
        // `{"image_url": {"url": "..."}}`
        Value::Object(nested) => nested.get("url")?.as_str().and_then(present),
        _ => None,
    })
}

fn present(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn data_url_mime(s: &str) -> Option<Option<String>> {
    let rest = s.strip_prefix("data:")?;
    let (meta, _) = rest.split_once(',')?;
    Some(
        meta.split(';')
            .next()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string),
    )
}

fn from_inline(data: &str) -> MediaIntent {
    MediaIntent::Inline {
        data: data.to_string(),
        mime_hint: data_url_mime(data).flatten(),
    }
}

fn from_url(url: &str) -> MediaIntent {
    match data_url_mime(url) {
        Some(mime_hint) => MediaIntent::Inline {
            data: url.to_string(),
            mime_hint,
        },
        None => MediaIntent::Url(url.to_string()),
    }
}

fn from_generic(s: &str) -> MediaIntent {
    if s.starts_with("http://") || s.starts_with("https://") {
        MediaIntent::Url(s.to_string())
    } else {
        from_inline(s)
    }
}

/// Short description of a value for error details.
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Object(map) => format!(
            "object keys: [{}]",
            map.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
        ),
        Value::Array(items) => format!("array of {}", items.len()),
        Value::String(_) => "a string".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Null => "null".to_string(),
    }
}
