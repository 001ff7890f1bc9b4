use crate::error::Result;
use crate::model::Sample;

/// Serializes a whole batch into one text blob.
pub trait Encoder {
    fn encode(&self, samples: &[Sample]) -> Result<Vec<u8>>;
}
