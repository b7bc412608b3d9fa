//! Operation types, sectors and the operation record itself
//!
//! Wire names match what the field crews see on screen ("NPT/DT", "Off Pad",
//! "Zipper - 1 WL log", ...), so every enum carries explicit serde renames.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of activity logged against a well
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    #[serde(rename = "PUMP")]
    Pump,
    /// Non-productive time / downtime
    #[serde(rename = "NPT/DT")]
    NonProductive,
    /// Non-pumping
    #[serde(rename = "NP")]
    NonPumping,
    #[serde(rename = "Off Pad")]
    OffPad,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Pump => "PUMP",
            OperationType::NonProductive => "NPT/DT",
            OperationType::NonPumping => "NP",
            OperationType::OffPad => "Off Pad",
        }
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OperationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PUMP" => Ok(OperationType::Pump),
            "NPT/DT" => Ok(OperationType::NonProductive),
            "NP" => Ok(OperationType::NonPumping),
            "Off Pad" => Ok(OperationType::OffPad),
            _ => Err(format!("Unknown operation type: {}", s)),
        }
    }
}

/// Physical/organizational sector an operation belongs to.
///
/// `PAD` is the wildcard: a PAD operation is ended by the next operation in
/// any sector, and a PAD operation ends the running operation of every sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    #[serde(rename = "PAD")]
    Pad,
    A,
    B,
    C,
    D,
    BackSide,
    FrontSide,
    #[serde(rename = "HP")]
    Hp,
    WellHead,
    #[serde(rename = "LPI")]
    Lpi,
    WireLine,
}

impl Sector {
    pub const ALL: [Sector; 11] = [
        Sector::Pad,
        Sector::A,
        Sector::B,
        Sector::C,
        Sector::D,
        Sector::BackSide,
        Sector::FrontSide,
        Sector::Hp,
        Sector::WellHead,
        Sector::Lpi,
        Sector::WireLine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Pad => "PAD",
            Sector::A => "A",
            Sector::B => "B",
            Sector::C => "C",
            Sector::D => "D",
            Sector::BackSide => "BackSide",
            Sector::FrontSide => "FrontSide",
            Sector::Hp => "HP",
            Sector::WellHead => "WellHead",
            Sector::Lpi => "LPI",
            Sector::WireLine => "WireLine",
        }
    }

    pub fn is_pad(&self) -> bool {
        matches!(self, Sector::Pad)
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sector::ALL
            .into_iter()
            .find(|sector| sector.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown sector: {}", s))
    }
}

/// Completion technique used on the pad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionType {
    Dual,
    Sync,
    #[serde(rename = "Zipper - 1 WL log")]
    ZipperOneLog,
    #[serde(rename = "Zipper - 2 WL log")]
    ZipperTwoLog,
    Sleeve,
    Single,
    ReFrac,
    Injector,
}

impl CompletionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionType::Dual => "Dual",
            CompletionType::Sync => "Sync",
            CompletionType::ZipperOneLog => "Zipper - 1 WL log",
            CompletionType::ZipperTwoLog => "Zipper - 2 WL log",
            CompletionType::Sleeve => "Sleeve",
            CompletionType::Single => "Single",
            CompletionType::ReFrac => "ReFrac",
            CompletionType::Injector => "Injector",
        }
    }
}

impl std::str::FromStr for CompletionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            CompletionType::Dual,
            CompletionType::Sync,
            CompletionType::ZipperOneLog,
            CompletionType::ZipperTwoLog,
            CompletionType::Sleeve,
            CompletionType::Single,
            CompletionType::ReFrac,
            CompletionType::Injector,
        ]
        .into_iter()
        .find(|ct| ct.as_str() == s)
        .ok_or_else(|| format!("Unknown completion type: {}", s))
    }
}

/// Crew members on shift when an operation was logged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Personnel {
    pub engineer: String,
    pub pump_operator: String,
    pub supervisor: String,
    pub customer_rep: String,
}

/// A timestamped event logged against one well
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub id: String,
    pub well_id: String,
    #[serde(rename = "type")]
    pub operation_type: OperationType,
    pub sector: Sector,
    pub start_time: DateTime<Utc>,
    /// Derived by the end-time resolver; `None` means the operation is ongoing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_type: Option<CompletionType>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personnel: Option<Personnel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// One row of the add/edit form.
///
/// Everything is optional on the wire so that missing fields surface as
/// validation errors instead of body rejections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationDraft {
    pub well_id: String,
    #[serde(rename = "type")]
    pub operation_type: Option<OperationType>,
    pub sector: Option<Sector>,
    pub start_time: Option<DateTime<Utc>>,
    pub stage: Option<i32>,
    pub party: Option<String>,
    pub main_event: Option<String>,
    pub completion_type: Option<CompletionType>,
    pub completed: bool,
    pub personnel: Option<Personnel>,
    pub comments: Option<String>,
}

/// Request body for POST /api/operations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOperationsRequest {
    /// Shared start time of the batch; defaults to now
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    pub operations: Vec<OperationDraft>,
}

/// Keyboard-shortcut presets of the add form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickAddPreset {
    Pump,
    Downtime,
    WellSwap,
    WellOpenClose,
}

impl QuickAddPreset {
    /// Operation type, party and main event filled in by the preset
    pub fn defaults(&self) -> (OperationType, &'static str, Option<&'static str>) {
        match self {
            QuickAddPreset::Pump => (OperationType::Pump, "LOS", Some("Frac")),
            QuickAddPreset::Downtime => (OperationType::NonProductive, "LOS", None),
            QuickAddPreset::WellSwap => {
                (OperationType::NonPumping, "LOS", Some("Well Swap (Zippering)"))
            }
            QuickAddPreset::WellOpenClose => {
                (OperationType::NonPumping, "LOS", Some("Well Open/Close"))
            }
        }
    }
}

/// Request body for POST /api/operations/quick
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickAddRequest {
    pub preset: QuickAddPreset,
    #[serde(default)]
    pub well_id: Option<String>,
    #[serde(default)]
    pub sector: Option<Sector>,
}

/// Query parameters for GET /api/operations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperationListQuery {
    pub well_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationListResponse {
    pub operations: Vec<Operation>,
    pub total: usize,
}
