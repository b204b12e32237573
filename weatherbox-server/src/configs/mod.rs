mod settings;

pub use settings::{Gateway, GatewayAuth, Logger, Server, Settings, Store};
