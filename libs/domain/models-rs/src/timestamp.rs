// [libs/domain/models-rs/src/timestamp.rs]
//! Every instant is held internally as UTC; this module formats it to the
//! canonical display zone only at the serialization boundary (spec.md §9
//! Design Notes), mirroring the original's `Asia/Taipei` convention.

use chrono::{DateTime, Utc};
use chrono_tz::Asia::Taipei;
use serde::Serializer;

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.with_timezone(&Taipei).to_rfc3339())
}

pub mod option {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => super::serialize(dt, serializer),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_utc_midnight_as_taipei_plus_eight() {
        let utc = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let json = serde_json::to_string(&SerdeHelper(utc)).unwrap();
        assert_eq!(json, "\"2026-01-01T08:00:00+08:00\"");
    }

    #[derive(serde::Serialize)]
    struct SerdeHelper(#[serde(serialize_with = "serialize")] DateTime<Utc>);
}
