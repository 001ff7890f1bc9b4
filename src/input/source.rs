use crate::error::Result;
use crate::model::Sample;

/// Where a batch of samples comes from. Implementations either return the
/// complete batch or fail; there is no partial result.
pub trait SampleSource {
    fn fetch(&self) -> Result<Vec<Sample>>;
}
