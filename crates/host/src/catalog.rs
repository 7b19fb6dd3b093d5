// crates/host/src/catalog.rs

//! The tool packs the host can serve.

use anyhow::{bail, Result};
use mock_store_core::{Interface, Store};

#[derive(Debug)]
pub struct Domain {
    pub name: &'static str,
    pub interfaces: fn() -> Vec<Interface>,
    pub seed: fn() -> Store,
}

pub const DOMAINS: &[Domain] = &[
    Domain {
        name: hr_admin::DOMAIN,
        interfaces: hr_admin::interfaces,
        seed: hr_admin::fixtures::seed_store,
    },
    Domain {
        name: smart_home::DOMAIN,
        interfaces: smart_home::interfaces,
        seed: smart_home::fixtures::seed_store,
    },
    Domain {
        name: wiki_pages::DOMAIN,
        interfaces: wiki_pages::interfaces,
        seed: wiki_pages::fixtures::seed_store,
    },
    Domain {
        name: incident_management::DOMAIN,
        interfaces: incident_management::interfaces,
        seed: incident_management::fixtures::seed_store,
    },
];

pub fn find(name: &str) -> Result<&'static Domain> {
    match DOMAINS.iter().find(|d| d.name == name) {
        Some(domain) => Ok(domain),
        None => {
            let known: Vec<&str> = DOMAINS.iter().map(|d| d.name).collect();
            bail!("unknown domain '{}' (known: {})", name, known.join(", "))
        }
    }
}
