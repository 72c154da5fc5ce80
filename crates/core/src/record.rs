//! The production record: one row of embroidery work performed.

use serde::{Deserialize, Serialize};

use crate::types::{RecordId, Timestamp};

/// Sentinel worker name used when a record carries no worker at all.
pub const UNKNOWN_WORKER: &str = "Unknown";

/// One unit of recorded work for an order.
///
/// `quantity` and `stitch_count` stay free-form strings: historical data
/// contains units and annotations ("12 pcs"), and aggregation applies the
/// permissive parsing from [`crate::parse::digit_count`]. The flag fields are
/// booleans in this model; legacy files that encoded them as `"X"` markers
/// still deserialize (see [`flag`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub id: RecordId,
    pub order_id: String,
    pub worker: String,
    /// Free-form date string, not validated.
    pub date: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub stitch_count: String,

    // Position flags: where on the item the work was applied.
    #[serde(default, with = "flag")]
    pub front: bool,
    #[serde(default, with = "flag")]
    pub side: bool,
    #[serde(default, with = "flag")]
    pub back: bool,

    // Product-type flags.
    #[serde(default, with = "flag")]
    pub cap: bool,
    #[serde(default, with = "flag")]
    pub bowl: bool,
    #[serde(default, with = "flag")]
    pub visor: bool,

    // Process flags: the technique used.
    #[serde(default, with = "flag")]
    pub embroidery: bool,
    #[serde(default, with = "flag")]
    pub paint_application: bool,
    #[serde(default, with = "flag")]
    pub engraving_application: bool,

    pub created_at: Timestamp,
}

impl ProductionRecord {
    /// Build a record from caller-supplied fields, assigning id and timestamp.
    pub fn from_input(id: RecordId, created_at: Timestamp, input: RecordInput) -> Self {
        Self {
            id,
            order_id: input.order_id,
            worker: input.worker,
            date: input.date,
            quantity: input.quantity,
            stitch_count: input.stitch_count,
            front: input.front,
            side: input.side,
            back: input.back,
            cap: input.cap,
            bowl: input.bowl,
            visor: input.visor,
            embroidery: input.embroidery,
            paint_application: input.paint_application,
            engraving_application: input.engraving_application,
            created_at,
        }
    }

    /// Replace every field except `id` and `created_at`.
    pub fn apply(&mut self, input: RecordInput) {
        let id = self.id;
        let created_at = self.created_at;
        *self = Self::from_input(id, created_at, input);
    }

    /// The worker name for aggregation, falling back to the sentinel when
    /// the field is empty.
    pub fn worker_or_unknown(&self) -> &str {
        if self.worker.trim().is_empty() {
            UNKNOWN_WORKER
        } else {
            &self.worker
        }
    }
}

/// The mutable fields of a [`ProductionRecord`], as accepted on create and
/// update. `id` and `created_at` are never caller-supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordInput {
    pub order_id: String,
    pub worker: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub stitch_count: String,
    #[serde(default, with = "flag")]
    pub front: bool,
    #[serde(default, with = "flag")]
    pub side: bool,
    #[serde(default, with = "flag")]
    pub back: bool,
    #[serde(default, with = "flag")]
    pub cap: bool,
    #[serde(default, with = "flag")]
    pub bowl: bool,
    #[serde(default, with = "flag")]
    pub visor: bool,
    #[serde(default, with = "flag")]
    pub embroidery: bool,
    #[serde(default, with = "flag")]
    pub paint_application: bool,
    #[serde(default, with = "flag")]
    pub engraving_application: bool,
}

/// Serde adapter for presence-marker flags.
///
/// The legacy data files encode flags as the single-character marker `"X"`
/// (anything else, including the empty string, means unset). This module
/// serializes flags as plain booleans but accepts booleans or the legacy
/// string encoding on input, so both old and new files load.
pub mod flag {
    use serde::de::Deserializer;
    use serde::ser::Serializer;
    use serde::Deserialize;

    /// The legacy presence marker.
    pub const MARKER: &str = "X";

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlagRepr {
        Bool(bool),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match Option::<FlagRepr>::deserialize(deserializer)? {
            Some(FlagRepr::Bool(b)) => Ok(b),
            // Exact equality with the marker, per the legacy writer.
            Some(FlagRepr::Text(s)) => Ok(s == MARKER),
            None => Ok(false),
        }
    }
}

/// The three spatial positions a record can mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Front,
    Side,
    Back,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Front, Position::Side, Position::Back];

    pub fn is_set(self, record: &ProductionRecord) -> bool {
        match self {
            Position::Front => record.front,
            Position::Side => record.side,
            Position::Back => record.back,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Front => "Front",
            Position::Side => "Side",
            Position::Back => "Back",
        }
    }
}

/// The three product types a record can mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Cap,
    Bowl,
    Visor,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [ProductType::Cap, ProductType::Bowl, ProductType::Visor];

    pub fn is_set(self, record: &ProductionRecord) -> bool {
        match self {
            ProductType::Cap => record.cap,
            ProductType::Bowl => record.bowl,
            ProductType::Visor => record.visor,
        }
    }
}

/// The three processes (techniques) a record can mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Process {
    Embroidery,
    PaintApplication,
    EngravingApplication,
}

impl Process {
    pub const ALL: [Process; 3] = [
        Process::Embroidery,
        Process::PaintApplication,
        Process::EngravingApplication,
    ];

    pub fn is_set(self, record: &ProductionRecord) -> bool {
        match self {
            Process::Embroidery => record.embroidery,
            Process::PaintApplication => record.paint_application,
            Process::EngravingApplication => record.engraving_application,
        }
    }
}
