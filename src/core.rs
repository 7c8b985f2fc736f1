pub mod assessment;
pub mod catalog;
pub mod investment;
pub mod period;
pub mod provider;
pub mod quote;
pub mod solar;
