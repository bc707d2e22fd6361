//! Record schemas accepted by catalog ingestion
//!
//! These are data, not engine logic: each record kind is a checker tree
//! assembled from [`Field`] declarations. Trees are built once per run and
//! handed to the driver by reference.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::checker::{Checker, Field};
use crate::error::{FeedError, Result};
use crate::kind::PrimitiveKind;

/// Kinds of record a feed may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Artist,
    Track,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::Artist, RecordKind::Track];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Artist => "artist",
            RecordKind::Track => "track",
        }
    }

    /// Build the checker tree for this record kind
    pub fn schema(&self) -> Result<Checker> {
        match self {
            RecordKind::Artist => artist_schema(),
            RecordKind::Track => track_schema(),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "artist" => Ok(RecordKind::Artist),
            "track" => Ok(RecordKind::Track),
            other => Err(FeedError::invalid_input(format!(
                "unable to parse \"{}\", please provide either \"artist\" or \"track\" as the type",
                other
            ))),
        }
    }
}

fn extras() -> Field {
    Field::new("extras", Checker::map(PrimitiveKind::Text, PrimitiveKind::Any))
}

/// `regions` replaces the whole territory list; `regions_add` and
/// `regions_delete` patch it. A record uses one style or the other.
fn region_fields() -> Vec<Field> {
    vec![
        Field::new("regions", Checker::list(PrimitiveKind::Text))
            .disallowing(["regions_add", "regions_delete"]),
        Field::new("regions_add", Checker::list(PrimitiveKind::Text)).disallowing(["regions"]),
        Field::new("regions_delete", Checker::list(PrimitiveKind::Text)).disallowing(["regions"]),
    ]
}

/// Checker for artist records
pub fn artist_schema() -> Result<Checker> {
    let mut optional = vec![extras()];
    optional.extend(region_fields());
    optional.push(Field::boolean("takedown"));

    Checker::composite(
        vec![Field::text("id"), Field::text("name")],
        optional,
        vec![Field::boolean("published")],
    )
}

/// Checker for track records
pub fn track_schema() -> Result<Checker> {
    let artist = Checker::composite(vec![Field::text("id"), Field::text("name")], vec![], vec![])?;
    let release = Checker::composite(
        vec![Field::text("id"), Field::text("name")],
        vec![Field::integer("release_year")],
        vec![],
    )?;

    let mut optional = vec![extras(), Field::boolean("takedown")];
    optional.extend(region_fields());
    optional.extend([
        Field::text("ISRC"),
        Field::integer("release_year"),
        Field::text("audio_url"),
        Field::nested("release", release),
    ]);

    Checker::composite(
        vec![
            Field::text("type"),
            Field::text("id"),
            Field::text("name"),
            Field::nested("artist", artist),
        ],
        optional,
        vec![Field::boolean("published")],
    )
}
