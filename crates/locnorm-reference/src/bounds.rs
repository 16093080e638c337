//! Per-jurisdiction bounding boxes.

use locnorm_core::{Error, Jurisdiction, Result};
use std::collections::BTreeMap;
use std::io::Read;
use tracing::warn;

/// Axis-aligned box in degrees. `west > 0 && east < 0` means the box crosses
/// the antimeridian (Alaska's Aleutians).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Validated constructor.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Result<Self> {
        let finite = [north, south, east, west].iter().all(|v| v.is_finite());
        if !finite {
            return Err(Error::Reference("bounding box has non-finite edge".into()));
        }
        if north < south {
            return Err(Error::Reference(format!(
                "bounding box north {north} is below south {south}"
            )));
        }
        let bbox = Self {
            north,
            south,
            east,
            west,
        };
        if west >= east && !bbox.wraps_antimeridian() {
            return Err(Error::Reference(format!(
                "bounding box west {west} is not west of east {east}"
            )));
        }
        Ok(bbox)
    }

    pub fn wraps_antimeridian(&self) -> bool {
        self.west > 0.0 && self.east < 0.0
    }

    /// Inclusive containment test.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        if lat > self.north || lat < self.south {
            return false;
        }
        if self.wraps_antimeridian() {
            lon >= self.west || lon <= self.east
        } else {
            lon >= self.west && lon <= self.east
        }
    }
}

/// Boxes keyed by two-letter jurisdiction code, iterated in code order.
#[derive(Debug, Clone, Default)]
pub struct BoundsTable {
    boxes: BTreeMap<String, BoundingBox>,
}

impl BoundsTable {
    /// Parse `name,north,south,east,west` rows. `name` may be a full
    /// jurisdiction name or a code. Unknown names are skipped with a warning;
    /// an invalid box fails the load.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut table = Self::default();

        for row in rdr.records() {
            let row = row.map_err(|e| Error::Csv(e.to_string()))?;
            let name = row.get(0).unwrap_or("");
            let Some(jurisdiction) = Jurisdiction::resolve(name) else {
                warn!("Unknown jurisdiction in bounds table: {:?}", name);
                continue;
            };

            let mut edges = [0.0f64; 4];
            for (i, edge) in edges.iter_mut().enumerate() {
                let raw = row.get(i + 1).unwrap_or("");
                *edge = raw.parse().map_err(|_| {
                    Error::Reference(format!("{name}: invalid coordinate {raw:?}"))
                })?;
            }
            let [north, south, east, west] = edges;
            let bbox = BoundingBox::new(north, south, east, west)
                .map_err(|e| Error::Reference(format!("{name}: {e}")))?;
            table.insert(jurisdiction.code, bbox);
        }
        Ok(table)
    }

    pub fn insert(&mut self, code: impl Into<String>, bbox: BoundingBox) {
        self.boxes.insert(code.into(), bbox);
    }

    pub fn get(&self, code: &str) -> Option<&BoundingBox> {
        self.boxes.get(code)
    }

    /// Every code whose box contains the point, sorted.
    pub fn containing(&self, lat: f64, lon: f64) -> Vec<&str> {
        self.boxes
            .iter()
            .filter(|(_, b)| b.contains(lat, lon))
            .map(|(code, _)| code.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
