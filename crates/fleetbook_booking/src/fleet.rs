//! Typed vehicle reference data.
//!
//! Built once from [`FleetConfig`] at startup; every active vehicle is
//! guaranteed to have complete display metadata and a known region.

use fleetbook_common::ResourceId;
use fleetbook_config::{FleetConfig, RegionConfig, VehicleConfig};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FleetError {
    #[error("vehicle {0} is listed more than once")]
    DuplicateVehicle(String),
    #[error("region {0} is listed more than once")]
    DuplicateRegion(String),
    #[error("vehicle {id} has no {field}")]
    IncompleteVehicle { id: String, field: &'static str },
    #[error("vehicle {id} refers to unknown region {region}")]
    UnknownRegion { id: String, region: String },
    #[error("{owner} has invalid color {color:?} (expected #rrggbb or #rrggbbaa)")]
    InvalidColor { owner: String, color: String },
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Vehicle {
    pub id: ResourceId,
    pub label: String,
    pub location: String,
    pub region: String,
    pub color: String,
    pub active: bool,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
    index: HashMap<ResourceId, usize>,
    regions: Vec<Region>,
    locations: Vec<String>,
}

fn is_display_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => (hex.len() == 6 || hex.len() == 8) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

fn require(id: &str, field: &'static str, value: &str) -> Result<(), FleetError> {
    if value.trim().is_empty() {
        return Err(FleetError::IncompleteVehicle {
            id: id.to_string(),
            field,
        });
    }
    Ok(())
}

fn check_vehicle(v: &VehicleConfig, regions: &HashSet<&str>) -> Result<(), FleetError> {
    require(&v.id, "id", &v.id)?;
    if v.active {
        require(&v.id, "label", &v.label)?;
        require(&v.id, "location", &v.location)?;
        require(&v.id, "color", &v.color)?;
    }
    if !v.color.is_empty() && !is_display_color(&v.color) {
        return Err(FleetError::InvalidColor {
            owner: v.id.clone(),
            color: v.color.clone(),
        });
    }
    if !regions.contains(v.region.as_str()) {
        return Err(FleetError::UnknownRegion {
            id: v.id.clone(),
            region: v.region.clone(),
        });
    }
    Ok(())
}

impl Fleet {
    pub fn from_config(config: &FleetConfig) -> Result<Self, FleetError> {
        let mut region_names = HashSet::new();
        for RegionConfig { name, color } in &config.regions {
            if !region_names.insert(name.as_str()) {
                return Err(FleetError::DuplicateRegion(name.clone()));
            }
            if !is_display_color(color) {
                return Err(FleetError::InvalidColor {
                    owner: name.clone(),
                    color: color.clone(),
                });
            }
        }

        let mut vehicles = Vec::with_capacity(config.vehicles.len());
        let mut index = HashMap::with_capacity(config.vehicles.len());
        for v in &config.vehicles {
            check_vehicle(v, &region_names)?;
            let id = ResourceId::new(v.id.trim());
            if index.insert(id.clone(), vehicles.len()).is_some() {
                return Err(FleetError::DuplicateVehicle(v.id.clone()));
            }
            vehicles.push(Vehicle {
                id,
                label: v.label.clone(),
                location: v.location.clone(),
                region: v.region.clone(),
                color: v.color.clone(),
                active: v.active,
            });
        }

        Ok(Self {
            vehicles,
            index,
            regions: config
                .regions
                .iter()
                .map(|r| Region {
                    name: r.name.clone(),
                    color: r.color.clone(),
                })
                .collect(),
            locations: config.locations.clone(),
        })
    }

    pub fn get(&self, id: &ResourceId) -> Option<&Vehicle> {
        self.index.get(id).map(|&i| &self.vehicles[i])
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn active(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter().filter(|v| v.active)
    }

    /// Active vehicle ids in configuration order.
    pub fn active_ids(&self) -> Vec<ResourceId> {
        self.active().map(|v| v.id.clone()).collect()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn active_in_region<'a>(&'a self, region: &'a str) -> impl Iterator<Item = &'a Vehicle> + 'a {
        self.active().filter(move |v| v.region == region)
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }
}
