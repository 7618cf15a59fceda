mod client;
mod links;
mod mtbf;
mod mttr;
mod provider;
mod tests;
mod types;

pub use provider::SentryProvider;
