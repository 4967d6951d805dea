//! SWMM 5 binary output file reader.
//!
//! # File layout
//!
//! All integers are little-endian `i32` records, values are `f32`, dates are
//! `f64` day counts since 1899-12-30.
//!
//! ```text
//! header   magic, version, flow_units, n_subcatch, n_nodes, n_links, n_polluts
//! names    at id_pos: (len, bytes) × (n_subcatch + n_nodes + n_links + n_polluts)
//! props    at props_pos: saved input properties, then per object class
//!          (subcatch, node, link, system) a variable count and its codes
//! start    results_pos - 12: start date (f64), report step seconds (i32)
//! results  at results_pos: n_periods × [ date (f64),
//!            f32 × (n_subcatch·subcatch_vars + n_nodes·node_vars
//!                   + n_links·link_vars + sys_vars) ]
//! trailer  last 24 bytes: id_pos, props_pos, results_pos, n_periods,
//!          error_code, magic
//! ```
//!
//! Only the names, variable counts and per-period dates are read when the
//! file is opened; values are read on demand, one seek per period.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt};
use log::debug;

use sw_core::time::from_swmm_days;
use sw_core::{EntityId, EntityKind, LinkAttribute, NodeAttribute, Timestamp};

use crate::store::{ResultStore, Series};
use crate::{StoreError, StoreResult};

/// Magic number opening and closing every SWMM 5 output file.
pub const MAGIC: i32 = 516_114_522;

const RECORD: u64 = 4;
const DATE: u64 = 8;
const HEADER_BYTES: u64 = 7 * RECORD;
const TRAILER_BYTES: u64 = 6 * RECORD;

// ── Layout ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct Layout {
    version:          i32,
    flow_units:       i32,
    n_subcatch:       u64,
    n_nodes:          u64,
    n_links:          u64,
    n_polluts:        u64,
    subcatch_vars:    u64,
    node_vars:        u64,
    link_vars:        u64,
    sys_vars:         u64,
    report_step_secs: i32,
    results_pos:      u64,
    bytes_per_period: u64,
}

impl Layout {
    fn period_pos(&self, period: u64) -> u64 {
        self.results_pos + period * self.bytes_per_period
    }

    fn node_value_pos(&self, period: u64, node: u64, var: u64) -> u64 {
        self.period_pos(period)
            + DATE
            + RECORD * (self.n_subcatch * self.subcatch_vars + node * self.node_vars + var)
    }

    fn link_value_pos(&self, period: u64, link: u64, var: u64) -> u64 {
        self.period_pos(period)
            + DATE
            + RECORD
                * (self.n_subcatch * self.subcatch_vars
                    + self.n_nodes * self.node_vars
                    + link * self.link_vars
                    + var)
    }
}

// ── OutSummary ────────────────────────────────────────────────────────────────

/// Descriptive facts about an opened result file.
#[derive(Clone, Debug, PartialEq)]
pub struct OutSummary {
    pub version:          i32,
    pub flow_units:       &'static str,
    pub subcatchments:    usize,
    pub nodes:            usize,
    pub links:            usize,
    pub pollutants:       usize,
    pub periods:          usize,
    pub report_step_secs: i32,
    pub first:            Timestamp,
    pub last:             Timestamp,
}

fn flow_units_label(code: i32) -> &'static str {
    match code {
        0 => "CFS",
        1 => "GPM",
        2 => "MGD",
        3 => "CMS",
        4 => "LPS",
        5 => "MLD",
        _ => "unknown",
    }
}

// ── OutFile ───────────────────────────────────────────────────────────────────

/// An opened SWMM 5 binary output file.
pub struct OutFile {
    path:       PathBuf,
    reader:     BufReader<File>,
    layout:     Layout,
    node_names: Vec<EntityId>,
    link_names: Vec<EntityId>,
    node_index: HashMap<EntityId, u64>,
    link_index: HashMap<EntityId, u64>,
    times:      Vec<Timestamp>,
}

impl OutFile {
    /// Open `path`, validate its framing and read names and period dates.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let file_len = file.metadata()?.len();
        if file_len < HEADER_BYTES + TRAILER_BYTES {
            return Err(StoreError::Format(format!("{} is too short ({file_len} bytes)", path.display())));
        }
        let mut r = BufReader::new(file);

        // ── Header ────────────────────────────────────────────────────────
        if r.read_i32::<LittleEndian>()? != MAGIC {
            return Err(StoreError::Format("opening magic number mismatch".into()));
        }
        let version = r.read_i32::<LittleEndian>()?;
        let flow_units = r.read_i32::<LittleEndian>()?;
        let n_subcatch = read_count(&mut r, "subcatchment count")?;
        let n_nodes = read_count(&mut r, "node count")?;
        let n_links = read_count(&mut r, "link count")?;
        let n_polluts = read_count(&mut r, "pollutant count")?;

        // ── Trailer ───────────────────────────────────────────────────────
        r.seek(SeekFrom::Start(file_len - TRAILER_BYTES))?;
        let id_pos = read_count(&mut r, "name section offset")?;
        let props_pos = read_count(&mut r, "property section offset")?;
        let results_pos = read_count(&mut r, "results section offset")?;
        let n_periods = read_count(&mut r, "period count")?;
        let error_code = r.read_i32::<LittleEndian>()?;
        if r.read_i32::<LittleEndian>()? != MAGIC {
            return Err(StoreError::Format("closing magic number mismatch".into()));
        }
        if error_code != 0 {
            return Err(StoreError::Format(format!("simulation reported error code {error_code}")));
        }
        if n_periods == 0 {
            return Err(StoreError::Format("file contains no reporting periods".into()));
        }

        // ── Names ─────────────────────────────────────────────────────────
        // Each name takes at least one length record.
        let name_bytes = file_len.saturating_sub(id_pos);
        let n_names = n_subcatch + n_nodes + n_links + n_polluts;
        if id_pos >= file_len || RECORD * n_names > name_bytes {
            return Err(StoreError::Format(format!(
                "{n_names} object names do not fit in {name_bytes} bytes at offset {id_pos}"
            )));
        }
        r.seek(SeekFrom::Start(id_pos))?;
        skip_names(&mut r, n_subcatch, name_bytes)?;
        let node_names = read_names(&mut r, n_nodes, name_bytes)?;
        let link_names = read_names(&mut r, n_links, name_bytes)?;

        // ── Reported variable counts ──────────────────────────────────────
        let saved_props = (n_subcatch + 2) + (3 * n_nodes + 4) + (5 * n_links + 6);
        r.seek(SeekFrom::Start(props_pos + RECORD * saved_props))?;
        let subcatch_vars = read_count(&mut r, "subcatchment variable count")?;
        r.seek_relative((RECORD * subcatch_vars) as i64)?;
        let node_vars = read_count(&mut r, "node variable count")?;
        r.seek_relative((RECORD * node_vars) as i64)?;
        let link_vars = read_count(&mut r, "link variable count")?;
        r.seek_relative((RECORD * link_vars) as i64)?;
        let sys_vars = read_count(&mut r, "system variable count")?;

        // ── Reporting step ────────────────────────────────────────────────
        if results_pos < DATE + RECORD {
            return Err(StoreError::Format(format!("results offset {results_pos} is out of range")));
        }
        r.seek(SeekFrom::Start(results_pos - DATE - RECORD))?;
        let _start_days = r.read_f64::<LittleEndian>()?;
        let report_step_secs = r.read_i32::<LittleEndian>()?;

        let values_per_period =
            n_subcatch * subcatch_vars + n_nodes * node_vars + n_links * link_vars + sys_vars;
        let bytes_per_period = DATE + RECORD * values_per_period;
        let results_end = n_periods
            .checked_mul(bytes_per_period)
            .and_then(|n| n.checked_add(results_pos))
            .ok_or_else(|| StoreError::Format("results section size overflows".into()))?;
        if results_end > file_len - TRAILER_BYTES {
            return Err(StoreError::Format(format!(
                "results section ends at byte {results_end} but file holds {file_len} bytes"
            )));
        }

        let layout = Layout {
            version,
            flow_units,
            n_subcatch,
            n_nodes,
            n_links,
            n_polluts,
            subcatch_vars,
            node_vars,
            link_vars,
            sys_vars,
            report_step_secs,
            results_pos,
            bytes_per_period,
        };

        // ── Period dates ──────────────────────────────────────────────────
        let mut times = Vec::with_capacity(n_periods as usize);
        for p in 0..n_periods {
            r.seek(SeekFrom::Start(layout.period_pos(p)))?;
            let days = r.read_f64::<LittleEndian>()?;
            let ts = from_swmm_days(days)
                .ok_or_else(|| StoreError::Format(format!("period {p} has invalid date {days}")))?;
            times.push(ts);
        }

        debug!(
            "opened {}: {n_nodes} nodes, {n_links} links, {n_periods} periods",
            path.display()
        );

        Ok(Self {
            path,
            reader: r,
            layout,
            node_index: index_names(&node_names),
            link_index: index_names(&link_names),
            node_names,
            link_names,
            times,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn node_names(&self) -> &[EntityId] {
        &self.node_names
    }

    pub fn link_names(&self) -> &[EntityId] {
        &self.link_names
    }

    /// Reporting period timestamps, in file order.
    pub fn times(&self) -> &[Timestamp] {
        &self.times
    }

    pub fn summary(&self) -> OutSummary {
        let l = &self.layout;
        OutSummary {
            version:          l.version,
            flow_units:       flow_units_label(l.flow_units),
            subcatchments:    l.n_subcatch as usize,
            nodes:            l.n_nodes as usize,
            links:            l.n_links as usize,
            pollutants:       l.n_polluts as usize,
            periods:          self.times.len(),
            report_step_secs: l.report_step_secs,
            // `open` rejects files without periods.
            first:            self.times.first().copied().unwrap_or_default(),
            last:             self.times.last().copied().unwrap_or_default(),
        }
    }

    /// Read one value per period, positioned by `value_pos(period)`.
    fn read_series(
        reader:    &mut BufReader<File>,
        times:     &[Timestamp],
        value_pos: impl Fn(u64) -> u64,
    ) -> StoreResult<Series> {
        let mut series = Series::new();
        for (p, ts) in times.iter().enumerate() {
            reader.seek(SeekFrom::Start(value_pos(p as u64)))?;
            let v = reader.read_f32::<LittleEndian>()?;
            series.insert(*ts, f64::from(v));
        }
        Ok(series)
    }
}

impl ResultStore for OutFile {
    fn node_series(&mut self, id: &EntityId, attr: NodeAttribute) -> StoreResult<Series> {
        let node = *self.node_index.get(id).ok_or_else(|| StoreError::MissingEntity {
            kind: EntityKind::Node,
            id:   id.clone(),
        })?;
        let var = attr.index() as u64;
        if var >= self.layout.node_vars {
            return Err(StoreError::MissingParameter {
                kind: EntityKind::Node,
                name: attr.canonical_name().to_owned(),
            });
        }
        let layout = &self.layout;
        Self::read_series(&mut self.reader, &self.times, |p| layout.node_value_pos(p, node, var))
    }

    fn link_series(&mut self, id: &EntityId, attr: LinkAttribute) -> StoreResult<Series> {
        let link = *self.link_index.get(id).ok_or_else(|| StoreError::MissingEntity {
            kind: EntityKind::Link,
            id:   id.clone(),
        })?;
        let var = attr.index() as u64;
        if var >= self.layout.link_vars {
            return Err(StoreError::MissingParameter {
                kind: EntityKind::Link,
                name: attr.canonical_name().to_owned(),
            });
        }
        let layout = &self.layout;
        Self::read_series(&mut self.reader, &self.times, |p| layout.link_value_pos(p, link, var))
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn read_count<R: Read>(r: &mut R, what: &str) -> StoreResult<u64> {
    let v = r.read_i32::<LittleEndian>()?;
    u64::try_from(v).map_err(|_| StoreError::Format(format!("negative {what}: {v}")))
}

/// `count` and every name length must already be bounded by `max_bytes`.
fn read_names<R: Read>(r: &mut R, count: u64, max_bytes: u64) -> StoreResult<Vec<EntityId>> {
    let mut names = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let len = read_count(r, "name length")?;
        if len > max_bytes {
            return Err(StoreError::Format(format!("name length {len} exceeds the {max_bytes} bytes left")));
        }
        let mut buf = vec![0u8; len as usize];
        r.read_exact(&mut buf)?;
        names.push(EntityId(String::from_utf8_lossy(&buf).into_owned()));
    }
    Ok(names)
}

fn skip_names<R: Read>(r: &mut R, count: u64, max_bytes: u64) -> StoreResult<()> {
    read_names(r, count, max_bytes).map(|_| ())
}

fn index_names(names: &[EntityId]) -> HashMap<EntityId, u64> {
    let mut index = HashMap::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        index.entry(name.clone()).or_insert(i as u64);
    }
    index
}
