//! Response payloads from the Flickr REST API.

use crate::records::RemoteRecord;
use serde::{Deserialize, Deserializer};

/// Payload of `flickr.people.findByUsername`
#[derive(Debug, Clone, Deserialize)]
pub struct FlickrUser {
    pub id: String,
}

/// A photo entry of `flickr.photosets.getPhotos` with `extras=date_taken`
#[derive(Debug, Clone, Deserialize)]
pub struct FlickrPhoto {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub datetaken: String,
}

impl From<FlickrPhoto> for RemoteRecord {
    fn from(photo: FlickrPhoto) -> Self {
        RemoteRecord::new(photo.id, photo.title, photo.datetaken)
    }
}

/// Payload of `flickr.photosets.getPhotos`
#[derive(Debug, Clone, Deserialize)]
pub struct FlickrPhotoset {
    #[serde(default)]
    pub title: String,
    /// Total photos in the set, across all pages.
    #[serde(deserialize_with = "deserialize_count")]
    pub total: u32,
    /// Photos per page; only this many are present in `photo`.
    #[serde(deserialize_with = "deserialize_count")]
    pub perpage: u32,
    #[serde(default)]
    pub photo: Vec<FlickrPhoto>,
}

/// Flickr reports counts as numbers on some methods and numeric strings
/// on others.
fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct CountVisitor;

    impl<'de> Visitor<'de> for CountVisitor {
        type Value = u32;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a count as a number or numeric string")
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(value).map_err(|_| E::custom("count out of range"))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(value).map_err(|_| E::custom("count cannot be negative"))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            value
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid count: {value:?}")))
        }
    }

    deserializer.deserialize_any(CountVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photoset_accepts_numeric_counts() {
        let set: FlickrPhotoset = serde_json::from_value(serde_json::json!({
            "id": "72157",
            "title": "Holiday",
            "total": 3,
            "perpage": 500,
            "photo": []
        }))
        .unwrap();
        assert_eq!(set.total, 3);
        assert_eq!(set.perpage, 500);
    }

    #[test]
    fn test_photoset_accepts_string_counts() {
        let set: FlickrPhotoset = serde_json::from_value(serde_json::json!({
            "title": "Holiday",
            "total": "501",
            "perpage": "500"
        }))
        .unwrap();
        assert_eq!(set.total, 501);
        assert_eq!(set.perpage, 500);
        assert!(set.photo.is_empty());
    }

    #[test]
    fn test_photoset_rejects_bad_counts() {
        let result: Result<FlickrPhotoset, _> = serde_json::from_value(serde_json::json!({
            "total": "many",
            "perpage": 500
        }));
        assert!(result.is_err());

        let result: Result<FlickrPhotoset, _> = serde_json::from_value(serde_json::json!({
            "total": -1,
            "perpage": 500
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_photo_into_remote_record() {
        let photo: FlickrPhoto = serde_json::from_value(serde_json::json!({
            "id": "4809",
            "secret": "abc",
            "title": "sunset",
            "datetaken": "2019-06-19 15:02:27",
            "datetakengranularity": 0
        }))
        .unwrap();

        let record = RemoteRecord::from(photo);
        assert_eq!(record.id, "4809");
        assert_eq!(record.title, "sunset");
        assert_eq!(record.captured_at.as_str(), "2019-06-19 15:02:27");
    }
}
