//! Projection of dashboard state into a displayable frame.
//!
//! Nothing here mutates state; a frame can be rebuilt on every pulse.

use crate::metrics::{self, DiskIoStat};
use crate::models::disk::Inventory;
use crate::state::{Model, SortKey};
use crate::util::human::{fmt_await, fmt_mibs, fmt_used, fmt_util};
use std::cmp::Ordering;

pub const HEADERS: [&str; 8] = ["Disk", "used", "tps", "read", "write", "discard", "await", "util"];

const HEALING_MARK:  char = '!';
const SCANNING_MARK: char = '*';

const SPINNER: [&str; 4] = ["∙∙∙", "●∙∙", "∙●∙", "∙∙●"];

/// One formatted table row.
#[derive(Debug, Clone, PartialEq)]
pub struct DiskRow {
    pub disk:    String,
    pub used:    String,
    pub tps:     String,
    pub read:    String,
    pub write:   String,
    pub discard: String,
    pub await_:  String,
    pub util:    String,
    /// Unformatted utilisation, for styling.
    pub util_pct: f64,
    pub healing:  bool,
}

impl DiskRow {
    pub fn cells(&self) -> [&str; 8] {
        [
            &self.disk, &self.used, &self.tps, &self.read,
            &self.write, &self.discard, &self.await_, &self.util,
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub spinner: &'static str,
    /// 1-indexed for display.
    pub pool:    usize,
    pub pools:   usize,
    pub sort:    &'static str,
}

impl StatusLine {
    pub fn text(&self) -> String {
        format!(
            "{} \u{25C0} Pool {} \u{25B6} | Sort By: {} (u,t,r,w,A,U)",
            self.spinner, self.pool, self.sort
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiskFrame {
    pub rows:   Vec<DiskRow>,
    /// Absent once quitting.
    pub status: Option<StatusLine>,
}

/// Derive, order and cut the rows for the selected pool.
pub fn select(model: &Model, inventory: &Inventory, interval_ms: u64, row_limit: usize) -> Vec<DiskIoStat> {
    let pool = model.view.pool;
    let mut stats: Vec<DiskIoStat> = model
        .store
        .iter()
        .filter_map(|(endpoint, curr, prev)| {
            let disk = inventory.get(endpoint)?;
            (disk.pool_index == pool).then(|| metrics::derive(disk, curr, prev, interval_ms))
        })
        .collect();

    let key = model.view.sort_key;
    stats.sort_by(|a, b| {
        let ord = compare(key, a, b);
        if key.descending() { ord.reverse() } else { ord }
    });
    stats.truncate(row_limit);
    stats
}

fn compare(key: SortKey, a: &DiskIoStat, b: &DiskIoStat) -> Ordering {
    match key {
        SortKey::Name    => a.endpoint.cmp(&b.endpoint),
        SortKey::Used    => a.used_pct.cmp(&b.used_pct),
        SortKey::Tps     => a.tps.cmp(&b.tps),
        SortKey::Await   => a.await_ms.total_cmp(&b.await_ms),
        SortKey::Util    => a.util_pct.total_cmp(&b.util_pct),
        SortKey::Read    => a.read_mibs.total_cmp(&b.read_mibs),
        SortKey::Write   => a.write_mibs.total_cmp(&b.write_mibs),
        SortKey::Discard => a.discard_mibs.total_cmp(&b.discard_mibs),
    }
}

pub fn project(model: &Model, inventory: &Inventory, interval_ms: u64, row_limit: usize) -> DiskFrame {
    let rows = select(model, inventory, interval_ms, row_limit)
        .into_iter()
        .map(|s| format_row(&s, inventory))
        .collect();

    let status = (!model.is_quitting()).then(|| StatusLine {
        spinner: SPINNER[model.pulse % SPINNER.len()],
        pool:    model.view.pool + 1,
        pools:   model.view.max_pool + 1,
        sort:    model.view.sort_key.label(),
    });

    DiskFrame { rows, status }
}

fn format_row(s: &DiskIoStat, inventory: &Inventory) -> DiskRow {
    let mut disk = s.endpoint.clone();
    let mut healing = false;
    if let Some(d) = inventory.get(&s.endpoint) {
        healing = d.healing;
        if d.healing  { disk.push(HEALING_MARK); }
        if d.scanning { disk.push(SCANNING_MARK); }
    }
    DiskRow {
        disk,
        used:    fmt_used(s.used_pct),
        tps:     s.tps.to_string(),
        read:    fmt_mibs(s.read_mibs),
        write:   fmt_mibs(s.write_mibs),
        discard: fmt_mibs(s.discard_mibs),
        await_:  fmt_await(s.await_ms),
        util:    fmt_util(s.util_pct),
        util_pct: s.util_pct,
        healing,
    }
}

/// Plain-text rendering of a frame: a padded table plus the status line.
pub fn to_text(frame: &DiskFrame) -> String {
    let mut widths = HEADERS.map(str::len);
    for row in &frame.rows {
        for (w, cell) in widths.iter_mut().zip(row.cells()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 8]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (c, w))| if i == 0 { format!("{:<w$}", c) } else { format!("{:>w$}", c) })
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = String::from("\n");
    out.push_str(&line(HEADERS));
    out.push('\n');
    for row in &frame.rows {
        out.push_str(&line(row.cells()));
        out.push('\n');
    }
    if let Some(status) = &frame.status {
        out.push('\n');
        out.push_str(&status.text());
        out.push('\n');
    }
    out
}
