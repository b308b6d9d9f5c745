use crate::core::record::DNSRecord;
use crate::error::Error;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Record management within a single zone.
///
/// `zone` may be given with or without the trailing dot. Every operation
/// aborts with [`Error::Cancelled`] once `cancel` fires.
#[async_trait]
pub trait DNSProvider: Send + Sync {
    fn name(&self) -> &str;

    /// All records currently in `zone`, in provider order.
    async fn list_records(
        &self,
        cancel: &CancellationToken,
        zone: &str,
    ) -> Result<Vec<DNSRecord>, Error>;

    /// Creates `records` and returns them as stored by the provider. The
    /// zone must exist even when `records` is empty.
    async fn append_records(
        &self,
        cancel: &CancellationToken,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error>;

    /// Creates or updates each record, matching on id or (type, name); a
    /// record with neither id nor type is an [`Error::InvalidArgument`].
    /// On failure the error carries the records already written.
    async fn set_records(
        &self,
        cancel: &CancellationToken,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error>;

    /// Deletes by id, or by (type, name) lookup when no id is set, and
    /// returns what was deleted. On failure the error carries the records
    /// already deleted.
    async fn delete_records(
        &self,
        cancel: &CancellationToken,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error>;
}
