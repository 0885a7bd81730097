use crate::event::{Event, EventHandler};
use crate::metrics;
use crate::models::disk::Inventory;
use crate::render::{self, DiskFrame};
use crate::state::Model;
use crate::ui::dashboard::{self, Header};
use crate::ui::theme::Theme;
use anyhow::Result;
use serde_json::json;
use std::io::Write;
use tracing::{debug, info};

pub struct App {
    pub model:     Model,
    pub inventory: Inventory,
    pub theme:     Theme,
    interval_ms:   u64,
    row_limit:     usize,
    source:        String,
}

impl App {
    pub fn new(inventory: Inventory, theme: Theme, interval_ms: u64, row_limit: usize, source: String) -> Self {
        Self {
            model: Model::new(&inventory),
            inventory,
            theme,
            interval_ms,
            row_limit,
            source,
        }
    }

    pub fn frame(&self) -> DiskFrame {
        render::project(&self.model, &self.inventory, self.interval_ms, self.row_limit)
    }

    fn apply(&mut self, event: Event) {
        let model = std::mem::take(&mut self.model);
        self.model = model.reduce(event);
    }

    // ── Main event loop ───────────────────────────────────────────────

    /// Drain events until quitting; returns the last frame drawn.
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
        events: &EventHandler,
    ) -> Result<DiskFrame> {
        loop {
            let frame = self.frame();
            let header = Header {
                source:     &self.source,
                pool_disks: self.inventory.pool_size(self.model.view.pool),
            };
            terminal.draw(|f| dashboard::render(f, &frame, &header, &self.theme))?;

            if self.model.is_quitting() {
                info!(sampled = self.model.store.len(), "dashboard stopping");
                return Ok(frame);
            }

            let event = events.next()?;
            self.apply(event);
        }
    }

    /// Headless mode: one JSON line per sample of a known disk.
    pub fn run_headless<W: Write>(&mut self, events: &EventHandler, out: &mut W) -> Result<()> {
        while !self.model.is_quitting() {
            let event = events.next()?;
            let endpoint = match &event {
                Event::Sample { endpoint, .. } => Some(endpoint.clone()),
                _ => None,
            };
            self.apply(event);

            let Some(endpoint) = endpoint else { continue };
            let (Some(disk), Some(curr)) = (self.inventory.get(&endpoint), self.model.store.current(&endpoint)) else {
                debug!(%endpoint, "sample for unknown disk");
                continue;
            };
            let s = metrics::derive(disk, curr, self.model.store.previous(&endpoint), self.interval_ms);
            let line = json!({
                "timestamp": chrono::Local::now().to_rfc3339(),
                "endpoint":  s.endpoint,
                "pool":      disk.pool_index,
                "healing":   disk.healing,
                "scanning":  disk.scanning,
                "used_pct":  s.used_pct,
                "util_pct":  s.util_pct,
                "tps":       s.tps,
                "await_ms":  s.await_ms,
                "read_mibs":    s.read_mibs,
                "write_mibs":   s.write_mibs,
                "discard_mibs": s.discard_mibs,
            });
            writeln!(out, "{}", line)?;
        }
        out.flush()?;
        Ok(())
    }
}
