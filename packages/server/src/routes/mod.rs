mod facts;
mod health;

pub use facts::facts_handler;
pub use health::health_handler;
