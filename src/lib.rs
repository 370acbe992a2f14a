pub mod host;
pub mod reporter;
pub mod sink;
pub mod snapshot;
