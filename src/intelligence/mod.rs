pub mod classifier;
pub mod extractor;
pub mod fraud_context;

pub use classifier::{classify, RiskTier};
pub use extractor::extract;
pub use fraud_context::is_fraud_context;
