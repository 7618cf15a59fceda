mod sentry;

pub use sentry::SentryProvider;
