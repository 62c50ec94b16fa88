// Copyright (c) 2025 - Cowboy AI, Inc.
//! Label Algebra
//!
//! A [`Label`] constrains one resource dimension of a service termination
//! point. Only the IEEE 802.1Q VLAN dimension is modeled.
//!
//! A label value is either a single VLAN id or a closed range `[min, max]`.
//! Ranges with equal bounds are normalised to the single value, so two labels
//! describing the same set of VLANs always compare equal.
//!
//! # Invariants
//!
//! - Every value satisfies `1 <= v <= 4095`
//! - `min <= max` for every range
//! - A constructed label is never empty; emptiness only appears as the `None`
//!   result of [`Label::intersect`]

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Label validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("Invalid VLAN value: {0} (must be 1-4095)")]
    InvalidValue(u16),

    #[error("Invalid VLAN range: {min}-{max} (min exceeds max)")]
    InvalidRange { min: u16, max: u16 },

    #[error("Malformed label value: {0:?}")]
    Malformed(String),
}

/// Resource dimension a label constrains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelType {
    /// IEEE 802.1Q VLAN tag
    EthernetVlan,
}

impl fmt::Display for LabelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelType::EthernetVlan => write!(f, "vlan"),
        }
    }
}

/// Value space of a label: one VLAN id or a closed range of them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelValue {
    Single(u16),
    Range { min: u16, max: u16 },
}

/// VLAN label value object
///
/// # Examples
///
/// ```rust
/// use nsi_topology::domain::Label;
///
/// let a = Label::vlan_range(1781, 1789).unwrap();
/// let b = Label::vlan_range(1780, 1786).unwrap();
/// assert_eq!(a.intersect(&b), Some(Label::vlan_range(1781, 1786).unwrap()));
/// assert_eq!(a.pick(), 1781);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label {
    label_type: LabelType,
    value: LabelValue,
}

impl Label {
    /// Lowest usable VLAN id
    pub const MIN_VLAN: u16 = 1;

    /// Highest usable VLAN id
    pub const MAX_VLAN: u16 = 4095;

    /// Create a single-value VLAN label
    pub fn vlan(value: u16) -> Result<Self, LabelError> {
        check_bounds(value)?;
        Ok(Self {
            label_type: LabelType::EthernetVlan,
            value: LabelValue::Single(value),
        })
    }

    /// Create a VLAN range label
    ///
    /// # Invariants
    /// - Both bounds within 1-4095
    /// - `min <= max`
    pub fn vlan_range(min: u16, max: u16) -> Result<Self, LabelError> {
        check_bounds(min)?;
        check_bounds(max)?;
        if min > max {
            return Err(LabelError::InvalidRange { min, max });
        }
        Ok(Self::from_bounds(LabelType::EthernetVlan, min, max))
    }

    /// The whole usable VLAN space, used when a request does not constrain the label
    pub fn any_vlan() -> Self {
        Self::from_bounds(LabelType::EthernetVlan, Self::MIN_VLAN, Self::MAX_VLAN)
    }

    // callers guarantee validated, ordered bounds
    fn from_bounds(label_type: LabelType, min: u16, max: u16) -> Self {
        let value = if min == max {
            LabelValue::Single(min)
        } else {
            LabelValue::Range { min, max }
        };
        Self { label_type, value }
    }

    pub fn label_type(&self) -> LabelType {
        self.label_type
    }

    pub fn value(&self) -> LabelValue {
        self.value
    }

    /// Smallest value in the label
    pub fn min(&self) -> u16 {
        match self.value {
            LabelValue::Single(v) => v,
            LabelValue::Range { min, .. } => min,
        }
    }

    /// Largest value in the label
    pub fn max(&self) -> u16 {
        match self.value {
            LabelValue::Single(v) => v,
            LabelValue::Range { max, .. } => max,
        }
    }

    /// Number of values the label admits
    pub fn len(&self) -> u32 {
        u32::from(self.max() - self.min()) + 1
    }

    /// Labels are never empty; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_single(&self) -> bool {
        matches!(self.value, LabelValue::Single(_))
    }

    pub fn contains(&self, value: u16) -> bool {
        self.min() <= value && value <= self.max()
    }

    /// Narrowest common range, or `None` when the labels do not overlap
    ///
    /// Labels of different dimensions never intersect.
    pub fn intersect(&self, other: &Label) -> Option<Label> {
        if self.label_type != other.label_type {
            return None;
        }
        let min = self.min().max(other.min());
        let max = self.max().min(other.max());
        if min > max {
            return None;
        }
        Some(Self::from_bounds(self.label_type, min, max))
    }

    /// Deterministic representative value: the smallest value in the label
    ///
    /// Callers that need distinct values for several labels on one path must
    /// pick from disjoint sub-ranges themselves.
    pub fn pick(&self) -> u16 {
        self.min()
    }

    /// Collapse the label to the value [`Label::pick`] selects
    pub fn picked(&self) -> Label {
        Self::from_bounds(self.label_type, self.pick(), self.pick())
    }
}

fn check_bounds(value: u16) -> Result<(), LabelError> {
    if !(Label::MIN_VLAN..=Label::MAX_VLAN).contains(&value) {
        return Err(LabelError::InvalidValue(value));
    }
    Ok(())
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            LabelValue::Single(v) => write!(f, "{}", v),
            LabelValue::Range { min, max } => write!(f, "{}-{}", min, max),
        }
    }
}

impl FromStr for Label {
    type Err = LabelError;

    /// Parse the NSI textual form: `"1781"` or `"1781-1789"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<u16>()
                .map_err(|_| LabelError::Malformed(s.to_string()))
        };

        match s.split_once('-') {
            Some((min, max)) => Self::vlan_range(parse(min)?, parse(max)?),
            None => Self::vlan(parse(s)?),
        }
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
