// Feature generation — pluggable generators and the registry that runs them.

pub mod generators;
pub mod registry;
pub mod traits;

pub use registry::{FeatureGeneratorRegistry, GeneratorInfo};
pub use traits::{FeatureGenerator, FeatureSet, FeatureValue};
