use rdkafka::metadata::MetadataBroker;

/// Identifier of a Broker in a Kafka cluster.
///
/// Kept signed as Kafka does, so that the [`crate::constants::NO_BROKER`] sentinel can be represented.
pub type BrokerId = i32;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Broker {
    pub id: BrokerId,
    pub host: String,
    pub port: u16,
}

impl From<&MetadataBroker> for Broker {
    fn from(b: &MetadataBroker) -> Self {
        Broker {
            id: b.id(),
            host: b.host().to_owned(),
            port: b.port() as u16,
        }
    }
}
