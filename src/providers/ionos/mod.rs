//! IONOS DNS provider implementation

pub mod client;
pub mod error;
pub mod types;


pub use client::IonosClient;
pub use error::IonosProviderError;
pub use types::{RecordWriteRequest, ZoneDescriptor, ZoneDetail, ZoneRecord};
// --- DNSProvider trait implementation for IonosProvider ---
use std::sync::Arc;

use crate::auth::credentials::CredentialManager;
use crate::config::Config;
use crate::core::provider::DNSProvider;
use crate::core::record::{DNSRecord, absolute_name, un_fqdn};
use crate::error::Error;
use async_trait::async_trait;
use error::map_error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use types::{to_dns_record, to_ionos_record, to_raw_dns_record};

#[derive(Debug)]
pub struct IonosProvider {
    client: IonosClient,
}

impl IonosProvider {
    pub fn new(config: &Config, credentials: Arc<dyn CredentialManager>) -> Result<Self, Error> {
        let client = IonosClient::new(config, credentials.as_ref())
            .map_err(|e| map_error(e, "build client"))?;
        Ok(Self { client })
    }

    pub fn from_client(client: IonosClient) -> Self {
        Self { client }
    }

    /// Resolves a zone name, with or without trailing dot, against a fresh
    /// listing of all zones.
    async fn find_zone_by_name(
        &self,
        cancel: &CancellationToken,
        zone: &str,
    ) -> Result<ZoneDescriptor, Error> {
        let wanted = un_fqdn(zone);
        let zones = self
            .client
            .list_zones(cancel)
            .await
            .map_err(|e| map_error(e, format!("find zone {zone}")))?;
        zones
            .into_iter()
            .find(|z| z.name == wanted)
            .ok_or_else(|| Error::NotFound(format!("zone {zone}")))
    }

    async fn find_records(
        &self,
        cancel: &CancellationToken,
        zone: &ZoneDescriptor,
        record: &DNSRecord,
    ) -> Result<Vec<ZoneRecord>, Error> {
        let name = absolute_name(&record.name, &zone.name);
        self.client
            .find_records(cancel, &zone.id, &record.record_type, &name)
            .await
            .map_err(|e| {
                map_error(
                    e,
                    format!(
                        "find {} records named {name} in zone {}",
                        record.record_type, zone.name
                    ),
                )
            })
    }

    async fn update_record(
        &self,
        cancel: &CancellationToken,
        zone: &ZoneDescriptor,
        id: &str,
        record: &DNSRecord,
    ) -> Result<(), Error> {
        info!(
            zone = %zone.name,
            id,
            record_type = %record.record_type,
            name = %record.name,
            "updating record"
        );
        self.client
            .update_record(cancel, &zone.id, id, &to_ionos_record(record, &zone.name))
            .await
            .map_err(|e| map_error(e, format!("update record {id} in zone {}", zone.name)))
    }

    async fn create_or_update_record(
        &self,
        cancel: &CancellationToken,
        zone: &ZoneDescriptor,
        record: DNSRecord,
    ) -> Result<DNSRecord, Error> {
        if !record.id.is_empty() {
            self.update_record(cancel, zone, &record.id, &record).await?;
            return Ok(record);
        }
        // without a type the vendor filter is dropped and any record of that name matches
        if record.record_type.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "record {} in zone {} has neither id nor type",
                absolute_name(&record.name, &zone.name),
                zone.name
            )));
        }

        let mut existing = self.find_records(cancel, zone, &record).await?;
        match existing.len() {
            0 => {
                info!(
                    zone = %zone.name,
                    record_type = %record.record_type,
                    name = %record.name,
                    "creating record"
                );
                let context = format!(
                    "create record {} {} in zone {}",
                    record.record_type, record.name, zone.name
                );
                let created = self
                    .client
                    .create_records(cancel, &zone.id, &[to_ionos_record(&record, &zone.name)])
                    .await
                    .map_err(|e| map_error(e, context.as_str()))?;
                match created.as_slice() {
                    [one] => to_dns_record(one, &zone.name).map_err(|e| map_error(e, context)),
                    other => Err(Error::Decode(format!(
                        "{context}: expected one record to be created, got {}",
                        other.len()
                    ))),
                }
            }
            1 => {
                let found = existing.swap_remove(0);
                self.update_record(cancel, zone, &found.id, &record).await?;
                Ok(record.with_id(found.id))
            }
            count => Err(Error::AmbiguousMatch {
                record_type: record.record_type,
                name: absolute_name(&record.name, &zone.name),
                count,
            }),
        }
    }
}

#[async_trait]
impl DNSProvider for IonosProvider {
    fn name(&self) -> &str {
        "ionos"
    }

    async fn list_records(
        &self,
        cancel: &CancellationToken,
        zone: &str,
    ) -> Result<Vec<DNSRecord>, Error> {
        let zone = self.find_zone_by_name(cancel, zone).await?;
        let detail = self
            .client
            .get_zone(cancel, &zone.id, None, None)
            .await
            .map_err(|e| map_error(e, format!("get records of zone {}", zone.name)))?;

        detail
            .records
            .iter()
            .map(|r| {
                to_dns_record(r, &zone.name)
                    .map_err(|e| map_error(e, format!("list records of zone {}", zone.name)))
            })
            .collect()
    }

    async fn append_records(
        &self,
        cancel: &CancellationToken,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error> {
        let zone = self.find_zone_by_name(cancel, zone).await?;
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let reqs: Vec<RecordWriteRequest> = records
            .iter()
            .map(|r| to_ionos_record(r, &zone.name))
            .collect();
        info!(zone = %zone.name, count = reqs.len(), "creating records");

        let context = format!("create {} records in zone {}", reqs.len(), zone.name);
        let created = self
            .client
            .create_records(cancel, &zone.id, &reqs)
            .await
            .map_err(|e| map_error(e, context.as_str()))?;

        created
            .iter()
            .map(|r| to_dns_record(r, &zone.name).map_err(|e| map_error(e, context.as_str())))
            .collect()
    }

    async fn set_records(
        &self,
        cancel: &CancellationToken,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error> {
        let zone = self.find_zone_by_name(cancel, zone).await?;

        let mut results = Vec::with_capacity(records.len());
        for record in records {
            match self.create_or_update_record(cancel, &zone, record).await {
                Ok(stored) => results.push(stored),
                Err(e) => return Err(Error::partial_from(results, e)),
            }
        }
        Ok(results)
    }

    async fn delete_records(
        &self,
        cancel: &CancellationToken,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error> {
        let zone = self.find_zone_by_name(cancel, zone).await?;

        // no batch delete in the IONOS API, collect first then delete one by one
        let mut queue = Vec::new();
        for record in records {
            if !record.id.is_empty() {
                queue.push(record);
                continue;
            }
            // an unscoped lookup would match the whole zone
            if record.record_type.is_empty() || record.name.is_empty() {
                warn!(zone = %zone.name, ?record, "skipping delete without id, type or name");
                continue;
            }
            let found = self.find_records(cancel, &zone, &record).await?;
            debug!(zone = %zone.name, name = %record.name, matches = found.len(), "delete lookup");
            for zr in &found {
                let queued = to_dns_record(zr, &zone.name).unwrap_or_else(|e| {
                    warn!(zone = %zone.name, id = %zr.id, error = %e, "keeping stored content");
                    to_raw_dns_record(zr, &zone.name)
                });
                queue.push(queued);
            }
        }

        let mut deleted = Vec::with_capacity(queue.len());
        for record in queue {
            info!(zone = %zone.name, id = %record.id, "deleting record");
            if let Err(e) = self.client.delete_record(cancel, &zone.id, &record.id).await {
                let context = format!("delete record {} in zone {}", record.id, zone.name);
                return Err(Error::partial_from(deleted, map_error(e, context)));
            }
            deleted.push(record);
        }
        Ok(deleted)
    }
}
