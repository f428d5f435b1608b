/// Durable key/value slot scoped to the device.
///
/// `read` is called from synchronous cache lookups and must not wait on the network.
pub trait KeyValueStorePort: Send + Sync {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> anyhow::Result<()>;
    /// Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> anyhow::Result<()>;
}
