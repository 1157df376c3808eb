//! Client-side access to a hub: typed gateway façade.

pub mod gateway;

pub use gateway::{GatewayResponse, HubClient, HubClientConfig};
