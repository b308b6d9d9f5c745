use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::record::{DNSRecord, absolute_name, relative_name};
use crate::providers::ionos::error::IonosProviderError;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ZoneDescriptor {
    pub name: String,
    pub id: String,
    #[serde(rename = "type", default)]
    pub zone_type: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ZoneDetail {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub zone_type: String,
    #[serde(default)]
    pub records: Vec<ZoneRecord>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub root_name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: String,
    #[serde(default)]
    pub change_date: String,
    pub ttl: i64,
    #[serde(default)]
    pub prio: i64,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RecordWriteRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    pub prio: i64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

/// IONOS answers 400 for TTLs below 60s, but a zero TTL must not be sent at
/// all: leaving the field out lets the zone default apply.
pub fn ionos_ttl(ttl: Duration) -> Option<u64> {
    match ttl.as_secs() {
        0 => None,
        secs => Some(secs),
    }
}

pub fn to_ionos_record(rec: &DNSRecord, zone: &str) -> RecordWriteRequest {
    RecordWriteRequest {
        name: absolute_name(&rec.name, zone),
        record_type: rec.record_type.clone(),
        content: rec.value.clone(),
        ttl: ionos_ttl(rec.ttl),
        prio: 0,
        disabled: false,
    }
}

pub fn to_dns_record(zr: &ZoneRecord, zone: &str) -> Result<DNSRecord, IonosProviderError> {
    let ttl = u64::try_from(zr.ttl)
        .map(Duration::from_secs)
        .map_err(|_| {
            IonosProviderError::Decode(format!("record {}: negative ttl {}", zr.id, zr.ttl))
        })?;

    // TXT content comes back wrapped in one layer of quotes
    let value = if zr.record_type.eq_ignore_ascii_case("TXT") {
        unquote(&zr.content).map_err(|e| {
            IonosProviderError::Decode(format!("record {}: bad TXT quoting: {e}", zr.id))
        })?
    } else {
        zr.content.clone()
    };

    Ok(DNSRecord {
        id: zr.id.clone(),
        record_type: zr.record_type.clone(),
        name: relative_name(&zr.name, zone),
        value,
        ttl,
    })
}

/// Lossless fallback for records `to_dns_record` rejects: content is kept
/// as stored and a negative TTL reads as zero. Deleting only needs the id.
pub fn to_raw_dns_record(zr: &ZoneRecord, zone: &str) -> DNSRecord {
    DNSRecord {
        id: zr.id.clone(),
        record_type: zr.record_type.clone(),
        name: relative_name(&zr.name, zone),
        value: zr.content.clone(),
        ttl: Duration::from_secs(u64::try_from(zr.ttl).unwrap_or(0)),
    }
}

fn unquote(content: &str) -> Result<String, serde_json::Error> {
    serde_json::from_str::<String>(content)
}
