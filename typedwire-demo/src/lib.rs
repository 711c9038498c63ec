//! Service configuration whose gateway and storage are typed envelopes.
//!
//! The envelope types are generated by `build.rs`. A gateway is written as
//!
//! ```yaml
//! gateway:
//!   t: user
//!   v:
//!     host: localhost
//!     port: 8080
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

mod generated {
    include!(concat!(env!("OUT_DIR"), "/gateway_typedwire.rs"));
}

pub use generated::{Gateway, GatewayTyped};

/// Gateway that talks to end users over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserGateway {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub tls: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<Auth>,
}

/// Credentials presented by a user gateway. YAML writes these as `!Token ...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Auth {
    Token(String),
    Basic { user: String, password: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KafkaConfiguration {
    pub brokers: Vec<String>,
    pub topic: String,
    /// Partition number to consumer group.
    #[serde(default)]
    pub partitions: BTreeMap<u16, String>,
}

/// Gateway fed by an order stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdersGateway {
    pub kafka: KafkaConfiguration,
}

/// Storage backends. The generated file imports serde names into this module.
pub mod storage {
    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    pub struct Disk {
        pub path: String,
    }

    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    pub struct ObjectStore {
        pub bucket: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub region: Option<String>,
    }

    include!(concat!(env!("OUT_DIR"), "/storage_typedwire.rs"));
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroserviceConfig {
    pub name: String,
    pub gateway: GatewayTyped,
    /// Secondary gateways, each with its own variant.
    #[serde(default)]
    pub gateways: Vec<GatewayTyped>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    #[serde(default)]
    pub storage: Option<storage::StorageTyped>,
}
