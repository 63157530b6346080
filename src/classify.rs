/// Body of a message whose attachment was left out of the export.
pub const MEDIA_PLACEHOLDER: &str = "<Media omitted>";

/// Substring present in every shared location.
pub const LOCATION_MARKER: &str = "location: https://maps.google.com";

/// Returns `true` for a media placeholder message.
///
/// `text` is the normalized body, see [`crate::models::Record::text`].
pub fn is_media(text: &str) -> bool {
    text == MEDIA_PLACEHOLDER
}

/// Returns `true` for a message sharing a location.
pub fn is_location(text: &str) -> bool {
    text.contains(LOCATION_MARKER)
}
