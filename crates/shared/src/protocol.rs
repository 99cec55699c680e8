use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::{
    color::DEFAULT_ACCENT_COLOR,
    domain::{CatalogItem, CatalogKind, DEFAULT_CAT_SIZE},
    error::InboundError,
};

/// Where the backend listens when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:18080";
pub const MESSAGE_ENDPOINT_PATH: &str = "/api/message";

pub const DEFAULT_RESTART_MESSAGE: &str =
    "Please restart OpenBongo for this change to take effect.";

pub const CAT_SIZE_RANGE: RangeInclusive<i64> = 50..=200;
pub const UI_OFFSET_RANGE: RangeInclusive<i64> = -50..=50;
pub const SFX_VOLUME_RANGE: RangeInclusive<i64> = 0..=100;
pub const ARM_OFFSET_RANGE: RangeInclusive<f64> = -50.0..=50.0;
pub const ANIMATION_VERTICAL_OFFSET_RANGE: RangeInclusive<f64> = -100.0..=100.0;

/// Commands posted to the backend as `{"type": ..., ...fields}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundCommand {
    HideWindow,
    #[serde(rename = "openURL")]
    OpenUrl {
        url: String,
    },
    Shutdown,
    GetSelectedCatPack,
    GetSelectedHat,
    GetSelectedBonkPack,
    GetCatPacks,
    GetHats,
    GetBonkPacks,
    SelectCatPack {
        name: String,
    },
    SelectHat {
        name: String,
    },
    SelectBonkPack {
        name: String,
    },
    SetCatSize {
        size: u32,
    },
    SetAccentColor {
        color: String,
    },
    #[serde(rename = "setUIOffset")]
    SetUiOffset {
        offset: i32,
    },
    #[serde(rename = "setUIHorizontalOffset")]
    SetUiHorizontalOffset {
        offset: i32,
    },
    #[serde(rename = "setSFXVolume")]
    SetSfxVolume {
        volume: u32,
    },
    SetCatFlip {
        flipped: bool,
    },
    SetLeftArmOffset {
        #[serde(serialize_with = "integral_as_integer")]
        offset: f64,
    },
    SetRightArmOffset {
        #[serde(serialize_with = "integral_as_integer")]
        offset: f64,
    },
    SetAnimationVerticalOffset {
        #[serde(serialize_with = "integral_as_integer")]
        offset: f64,
    },
}

impl OutboundCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::HideWindow => "hideWindow",
            Self::OpenUrl { .. } => "openURL",
            Self::Shutdown => "shutdown",
            Self::GetSelectedCatPack => "getSelectedCatPack",
            Self::GetSelectedHat => "getSelectedHat",
            Self::GetSelectedBonkPack => "getSelectedBonkPack",
            Self::GetCatPacks => "getCatPacks",
            Self::GetHats => "getHats",
            Self::GetBonkPacks => "getBonkPacks",
            Self::SelectCatPack { .. } => "selectCatPack",
            Self::SelectHat { .. } => "selectHat",
            Self::SelectBonkPack { .. } => "selectBonkPack",
            Self::SetCatSize { .. } => "setCatSize",
            Self::SetAccentColor { .. } => "setAccentColor",
            Self::SetUiOffset { .. } => "setUIOffset",
            Self::SetUiHorizontalOffset { .. } => "setUIHorizontalOffset",
            Self::SetSfxVolume { .. } => "setSFXVolume",
            Self::SetCatFlip { .. } => "setCatFlip",
            Self::SetLeftArmOffset { .. } => "setLeftArmOffset",
            Self::SetRightArmOffset { .. } => "setRightArmOffset",
            Self::SetAnimationVerticalOffset { .. } => "setAnimationVerticalOffset",
        }
    }

    pub fn select(kind: CatalogKind, name: impl Into<String>) -> Self {
        let name = name.into();
        match kind {
            CatalogKind::CatPacks => Self::SelectCatPack { name },
            CatalogKind::Hats => Self::SelectHat { name },
            CatalogKind::BonkPacks => Self::SelectBonkPack { name },
        }
    }

    pub fn request_catalog(kind: CatalogKind) -> Self {
        match kind {
            CatalogKind::CatPacks => Self::GetCatPacks,
            CatalogKind::Hats => Self::GetHats,
            CatalogKind::BonkPacks => Self::GetBonkPacks,
        }
    }
}

/// Whole-valued offsets go out as JSON integers; the backend reads them with an integer pattern.
fn integral_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// An inbound payload as delivered by the host: JSON text or an already-parsed value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawMessage {
    Text(String),
    Json(Value),
}

impl From<String> for RawMessage {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for RawMessage {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Value> for RawMessage {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Backend-to-panel messages. Envelope on the wire is `{"type": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    CatPackList(Vec<CatalogItem>),
    HatList(Vec<CatalogItem>),
    BonkPackList(Vec<CatalogItem>),
    SelectedCatPack { name: String },
    SelectedHat { name: String },
    SelectedBonkPack { name: String },
    CatSize(u32),
    AccentColor(String),
    RestartRequired { message: String },
    UiOffset(i32),
    UiHorizontalOffset(i32),
    SfxVolume(u32),
    CatFlip(bool),
    LeftArmOffset(f64),
    RightArmOffset(f64),
    AnimationVerticalOffset(f64),
}

impl InboundMessage {
    pub fn parse(raw: RawMessage) -> Result<Self, InboundError> {
        let value = match raw {
            RawMessage::Text(text) => serde_json::from_str::<Value>(&text)?,
            RawMessage::Json(value) => value,
        };
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, InboundError> {
        let Value::Object(mut envelope) = value else {
            return Err(InboundError::NotAnObject);
        };
        let kind = match envelope.get("type") {
            Some(Value::String(kind)) if !kind.is_empty() => kind.clone(),
            _ => return Err(InboundError::MissingType),
        };
        let data = envelope.remove("data");
        Self::from_parts(&kind, data.as_ref())
    }

    fn from_parts(kind: &str, data: Option<&Value>) -> Result<Self, InboundError> {
        match kind {
            "catPackList" => Ok(Self::CatPackList(catalog_items(data))),
            "hatList" => Ok(Self::HatList(catalog_items(data))),
            "bonkPackList" => Ok(Self::BonkPackList(catalog_items(data))),
            "selectedCatPack" => {
                selection_name("selectedCatPack", data).map(|name| Self::SelectedCatPack { name })
            }
            "selectedHat" => {
                selection_name("selectedHat", data).map(|name| Self::SelectedHat { name })
            }
            "selectedBonkPack" => selection_name("selectedBonkPack", data)
                .map(|name| Self::SelectedBonkPack { name }),
            "catSize" => integer_in(
                "catSize",
                "size",
                // a zero size means "unset", same as a missing one
                field(data, "size").filter(|size| size.as_f64() != Some(0.0)),
                i64::from(DEFAULT_CAT_SIZE),
                CAT_SIZE_RANGE,
            )
            .map(|size| Self::CatSize(size as u32)),
            "accentColor" => Ok(Self::AccentColor(text_or(
                data,
                "color",
                DEFAULT_ACCENT_COLOR,
            ))),
            "restartRequired" => Ok(Self::RestartRequired {
                message: text_or(data, "message", DEFAULT_RESTART_MESSAGE),
            }),
            "uiOffset" => integer_in(
                "uiOffset",
                "offset",
                field(data, "offset"),
                0,
                UI_OFFSET_RANGE,
            )
            .map(|offset| Self::UiOffset(offset as i32)),
            "uiHorizontalOffset" => integer_in(
                "uiHorizontalOffset",
                "offset",
                field(data, "offset"),
                0,
                UI_OFFSET_RANGE,
            )
            .map(|offset| Self::UiHorizontalOffset(offset as i32)),
            "sfxVolume" => integer_in(
                "sfxVolume",
                "volume",
                field(data, "volume"),
                100,
                SFX_VOLUME_RANGE,
            )
            .map(|volume| Self::SfxVolume(volume as u32)),
            "catFlip" => match field(data, "flipped") {
                None => Ok(Self::CatFlip(false)),
                Some(Value::Bool(flipped)) => Ok(Self::CatFlip(*flipped)),
                Some(_) => Err(InboundError::InvalidPayload {
                    kind: "catFlip",
                    field: "flipped",
                }),
            },
            "leftArmOffset" => number_in("leftArmOffset", data, "offset", ARM_OFFSET_RANGE)
                .map(Self::LeftArmOffset),
            "rightArmOffset" => number_in("rightArmOffset", data, "offset", ARM_OFFSET_RANGE)
                .map(Self::RightArmOffset),
            "animationVerticalOffset" => number_in(
                "animationVerticalOffset",
                data,
                "offset",
                ANIMATION_VERTICAL_OFFSET_RANGE,
            )
            .map(Self::AnimationVerticalOffset),
            other => Err(InboundError::UnknownType(other.to_string())),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::CatPackList(_) => "catPackList",
            Self::HatList(_) => "hatList",
            Self::BonkPackList(_) => "bonkPackList",
            Self::SelectedCatPack { .. } => "selectedCatPack",
            Self::SelectedHat { .. } => "selectedHat",
            Self::SelectedBonkPack { .. } => "selectedBonkPack",
            Self::CatSize(_) => "catSize",
            Self::AccentColor(_) => "accentColor",
            Self::RestartRequired { .. } => "restartRequired",
            Self::UiOffset(_) => "uiOffset",
            Self::UiHorizontalOffset(_) => "uiHorizontalOffset",
            Self::SfxVolume(_) => "sfxVolume",
            Self::CatFlip(_) => "catFlip",
            Self::LeftArmOffset(_) => "leftArmOffset",
            Self::RightArmOffset(_) => "rightArmOffset",
            Self::AnimationVerticalOffset(_) => "animationVerticalOffset",
        }
    }
}

/// `null` counts as absent so the type's default applies.
fn field<'a>(data: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    data?.get(key).filter(|value| !value.is_null())
}

fn catalog_items(data: Option<&Value>) -> Vec<CatalogItem> {
    let Some(Value::Array(items)) = data else {
        return Vec::new();
    };
    items
        .iter()
        .filter(|item| item.is_object())
        .filter_map(|item| CatalogItem::deserialize(item).ok())
        .collect()
}

fn selection_name(kind: &'static str, data: Option<&Value>) -> Result<String, InboundError> {
    match field(data, "name") {
        Some(Value::String(name)) if !name.is_empty() => Ok(name.clone()),
        _ => Err(InboundError::EmptySelection { kind }),
    }
}

fn text_or(data: Option<&Value>, key: &str, default: &str) -> String {
    match field(data, key) {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        _ => default.to_string(),
    }
}

/// Range-checks the raw number, then rounds it to the nearest whole value.
fn integer_in(
    kind: &'static str,
    key: &'static str,
    raw: Option<&Value>,
    default: i64,
    range: RangeInclusive<i64>,
) -> Result<i64, InboundError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value = raw
        .as_f64()
        .ok_or(InboundError::InvalidPayload { kind, field: key })?;
    if (*range.start() as f64..=*range.end() as f64).contains(&value) {
        Ok(value.round() as i64)
    } else {
        Err(out_of_range(kind, value, &range))
    }
}

fn number_in(
    kind: &'static str,
    data: Option<&Value>,
    key: &'static str,
    range: RangeInclusive<f64>,
) -> Result<f64, InboundError> {
    let value = match field(data, key) {
        None => 0.0,
        Some(raw) => raw
            .as_f64()
            .ok_or(InboundError::InvalidPayload { kind, field: key })?,
    };
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(InboundError::OutOfRange {
            kind,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

fn out_of_range(kind: &'static str, value: f64, range: &RangeInclusive<i64>) -> InboundError {
    InboundError::OutOfRange {
        kind,
        value,
        min: *range.start() as f64,
        max: *range.end() as f64,
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
