//! Response shapes of the upstream oilfield data API
//!
//! Every field is defaulted: the upstream returns sparse records, with
//! attributes either missing or `null`, and neither must turn a usable
//! answer into a fallback.

use serde::{Deserialize, Deserializer, Serialize};

/// Read an explicit `null` as the field's default, the same as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Label {
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WellIdRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
}

/// Project record from `/v1/project/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiProjectResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub pad_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub basin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub number_of_wells: i32,
    #[serde(rename = "wellIDs", deserialize_with = "null_as_default")]
    pub well_ids: Vec<WellIdRef>,
    #[serde(deserialize_with = "null_as_default")]
    pub field: String,
    #[serde(deserialize_with = "null_as_default")]
    pub county: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub latitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub longitude: f64,
    // Upstream spells it this way
    #[serde(rename = "groundLevelEleation", deserialize_with = "null_as_default")]
    pub ground_level_elevation: f64,
    #[serde(rename = "pumpingServicesNPTGracePeriod", deserialize_with = "null_as_default")]
    pub pumping_services_npt_grace_period: f64,
    #[serde(rename = "wirelineServicesNPTGracePeriod", deserialize_with = "null_as_default")]
    pub wireline_services_npt_grace_period: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub acceptable_chem_usage_variation: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub acceptable_chem_rate_variation: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub acceptable_sand_sieve_capture: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub unit_system: String,
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: String,
    #[serde(deserialize_with = "null_as_default")]
    pub crews: Vec<Label>,
}

impl ApiProjectResponse {
    /// Fixed project returned whenever the upstream lookup fails
    pub fn fallback(project_number: &str) -> Self {
        Self {
            pad_name: format!("Project {}", project_number),
            project_number: project_number.to_string(),
            basin: "Development Basin".to_string(),
            number_of_wells: 5,
            well_ids: (1..=5)
                .map(|i| WellIdRef {
                    id: format!("well-{}", i),
                })
                .collect(),
            field: "Mock Field".to_string(),
            county: "Mock County".to_string(),
            state: "Mock State".to_string(),
            country: "United States".to_string(),
            latitude: 40.123456,
            longitude: -104.123456,
            ground_level_elevation: 0.0,
            pumping_services_npt_grace_period: 0.0,
            wireline_services_npt_grace_period: 0.0,
            acceptable_chem_usage_variation: 0.05,
            acceptable_chem_rate_variation: 0.05,
            acceptable_sand_sieve_capture: 0.95,
            unit_system: "Imperial".to_string(),
            enabled: "true".to_string(),
            crews: vec![Label {
                label: "Mock Crew".to_string(),
            }],
        }
    }
}

/// Well record from `/v1/generalWellInformation`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiWellInformationResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub well_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(deserialize_with = "null_as_default")]
    pub api_number: String,
    pub afe_number: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub surface_latitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub surface_longitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub bid_price: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub pumping_service_companies: Vec<Label>,
    #[serde(deserialize_with = "null_as_default")]
    pub wireline_companies: Vec<Label>,
}

impl ApiWellInformationResponse {
    pub fn fallback(well_id: &str) -> Self {
        Self {
            well_name: format!("Well {}", well_id),
            color: "Manual Entry".to_string(),
            api_number: format!("API-{}", well_id),
            afe_number: None,
            surface_latitude: 40.123456,
            surface_longitude: -104.123456,
            bid_price: 0.0,
            pumping_service_companies: vec![Label {
                label: "Mock Service Company".to_string(),
            }],
            wireline_companies: vec![],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StimulationFluid {
    #[serde(deserialize_with = "null_as_default")]
    pub main_fluid_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProppantTypeMesh {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proppant_size_catalog_external: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proppant_supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proppant_commercial_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted_quantity: Option<f64>,
}

/// Completion design from `/v1/completionDesign`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiCompletionDesignResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub design_maximum_rate: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub design_maximum_pressure: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub planned_number_of_stages: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub planned_cluster_spacing: String,
    #[serde(deserialize_with = "null_as_default")]
    pub planned_completed_lateral_length: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub stimulation_fluids: Vec<StimulationFluid>,
    #[serde(deserialize_with = "null_as_default")]
    pub surface_iron_volume: String,
    #[serde(deserialize_with = "null_as_default")]
    pub overflush_volume: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hydraulic_horsepower: String,
    #[serde(deserialize_with = "null_as_default")]
    pub proppants_type_mesh: Vec<ProppantTypeMesh>,
}

impl ApiCompletionDesignResponse {
    pub fn fallback() -> Self {
        Self {
            design_maximum_rate: 96.0,
            design_maximum_pressure: 9500.0,
            planned_number_of_stages: 26,
            planned_cluster_spacing: "Manual Entry".to_string(),
            planned_completed_lateral_length: 6629.0,
            stimulation_fluids: vec![StimulationFluid {
                main_fluid_type: "Slick Water".to_string(),
            }],
            surface_iron_volume: "Manual Entry".to_string(),
            overflush_volume: "Manual Entry".to_string(),
            hydraulic_horsepower: "CALCULATED VALUE".to_string(),
            proppants_type_mesh: vec![ProppantTypeMesh {
                proppant_size_catalog_external: Some("100881".to_string()),
                proppant_supplier: Some("Manual Entry".to_string()),
                proppant_commercial_name: Some("GENOA 100 MESH".to_string()),
                unit: Some("TON".to_string()),
                unit_price: Some(66.0),
                discount: Some(0.0),
                quoted_quantity: Some(5150.0),
            }],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectLookupQuery {
    pub project_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WellLookupQuery {
    pub well_id: Option<String>,
}
