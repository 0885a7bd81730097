use crate::render::{DiskFrame, StatusLine, HEADERS};
use crate::ui::theme::Theme;
use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

/// What the header shows besides the rows themselves.
pub struct Header<'a> {
    pub source:     &'a str,
    pub pool_disks: usize,
}

pub fn render(f: &mut Frame, frame: &DiskFrame, header: &Header, theme: &Theme) {
    let area = f.area();

    // Root: header | table | status
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    render_header(f, root[0], frame, header, theme);
    render_table(f, root[1], frame, theme);
    if let Some(status) = &frame.status {
        render_status(f, root[2], status, theme);
    }
}

fn render_header(f: &mut Frame, area: Rect, frame: &DiskFrame, header: &Header, theme: &Theme) {
    let now   = Local::now().format("%H:%M:%S").to_string();
    let left  = format!(" pooltop · {} ", header.source);
    let mid   = match &frame.status {
        Some(s) => format!("  {}/{} shown in pool {} ", frame.rows.len(), header.pool_disks, s.pool),
        None    => format!("  {} shown ", frame.rows.len()),
    };
    let right = format!(" {} ", now);
    let pad = (area.width as usize)
        .saturating_sub(left.chars().count() + mid.chars().count() + right.len());

    let line = Line::from(vec![
        Span::styled(left, theme.title),
        Span::styled(mid, theme.text_dim),
        Span::styled(" ".repeat(pad), theme.header),
        Span::styled(right, theme.text_dim),
    ]);
    f.render_widget(Paragraph::new(line).style(theme.header), area);
}

fn render_table(f: &mut Frame, area: Rect, frame: &DiskFrame, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled("Disk I/O", theme.title));

    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h).style(theme.column))).height(1);

    let rows: Vec<Row> = if frame.rows.is_empty() {
        vec![Row::new(vec![Cell::from("  Waiting for samples…").style(theme.text_dim)])]
    } else {
        frame.rows.iter().map(|r| {
            let label_style = if r.healing { theme.healing } else { theme.text };
            let mut cells = vec![Cell::from(r.disk.clone()).style(label_style)];
            cells.extend(r.cells()[1..7].iter().map(|c| Cell::from(c.to_string()).style(theme.text)));
            cells.push(Cell::from(r.util.clone()).style(theme.util_style(r.util_pct)));
            Row::new(cells)
        }).collect()
    };

    let label_width = frame.rows.iter()
        .map(|r| r.disk.chars().count())
        .max()
        .unwrap_or(0)
        .max(HEADERS[0].len()) as u16;

    let widths = [
        Constraint::Min(label_width),
        Constraint::Length(5),
        Constraint::Length(7),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(7),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(block);
    f.render_widget(table, area);
}

fn render_status(f: &mut Frame, area: Rect, status: &StatusLine, theme: &Theme) {
    let spans = vec![
        Span::styled(" ", theme.status_bg),
        Span::styled(status.spinner, theme.status_bg.patch(theme.spinner)),
        Span::styled(format!(" \u{25C0} Pool {}/{} \u{25B6} ", status.pool, status.pools), theme.status_bg),
        Span::styled("│ Sort By: ", theme.status_bg),
        Span::styled(status.sort, theme.status_key),
        Span::styled("  ", theme.status_bg),
        Span::styled(" ←→ ", theme.status_key), Span::styled("Pool  ", theme.status_bg),
        Span::styled(" u t r w A U ", theme.status_key), Span::styled("Sort  ", theme.status_bg),
        Span::styled(" q ", theme.status_key), Span::styled("Quit", theme.status_bg),
    ];
    f.render_widget(Paragraph::new(Line::from(spans)).style(theme.status_bg), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DiskRow;
    use crate::ui::theme::ThemeVariant;
    use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};

    fn row(disk: &str) -> DiskRow {
        DiskRow {
            disk: disk.into(), used: "10%".into(), tps: "3".into(),
            read: "1.00 MiB/s".into(), write: "0.00 MiB/s".into(), discard: "0.00 MiB/s".into(),
            await_: "2.0 ms".into(), util: "12.5%".into(), util_pct: 12.5, healing: false,
        }
    }

    fn draw_buffer(frame: &DiskFrame) -> Buffer {
        let mut term = Terminal::new(TestBackend::new(120, 10)).unwrap();
        let theme = Theme::for_variant(ThemeVariant::Default);
        let header = Header { source: "local", pool_disks: 4 };
        term.draw(|f| render(f, frame, &header, &theme)).unwrap();
        term.backend().buffer().clone()
    }

    fn draw(frame: &DiskFrame) -> String {
        draw_buffer(frame).content().iter().map(|c| c.symbol()).collect()
    }

    /// Foreground of the first cell of the line that starts with `label`.
    fn label_fg(buf: &Buffer, label: &str) -> Option<Color> {
        let first = label.chars().next()?.to_string();
        let area = buf.area;
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let here: String = (x..area.right().min(x + label.len() as u16))
                    .map(|cx| buf[(cx, y)].symbol())
                    .collect();
                if buf[(x, y)].symbol() == first && here == label {
                    return Some(buf[(x, y)].fg);
                }
            }
        }
        None
    }

    #[test]
    fn draws_rows_and_status() {
        let frame = DiskFrame {
            rows: vec![row("/dev/sda"), row("/dev/sdb!")],
            status: Some(StatusLine { spinner: "∙∙∙", pool: 1, pools: 2, sort: "util" }),
        };
        let screen = draw(&frame);
        assert!(screen.contains("/dev/sda"));
        assert!(screen.contains("/dev/sdb!"));
        assert!(screen.contains("12.5%"));
        assert!(screen.contains("Sort By: util"));
        assert!(screen.contains("2/4 shown in pool 1"));
    }

    #[test]
    fn label_style_follows_healing_flag_not_name() {
        let theme = Theme::for_variant(ThemeVariant::Default);
        let mut sick = row("/dev/sdb");
        sick.healing = true;
        sick.disk = "/dev/sdb!".into();
        let frame = DiskFrame { rows: vec![row("/dev/bang!"), sick], status: None };
        let buf = draw_buffer(&frame);
        assert_eq!(label_fg(&buf, "/dev/bang!"), theme.text.fg);
        assert_eq!(label_fg(&buf, "/dev/sdb!"), theme.healing.fg);
    }

    #[test]
    fn quitting_frame_has_no_status() {
        let frame = DiskFrame { rows: vec![row("/dev/sda")], status: None };
        let screen = draw(&frame);
        assert!(!screen.contains("Sort By"));
    }

    #[test]
    fn empty_frame_waits() {
        let frame = DiskFrame { rows: vec![], status: None };
        assert!(draw(&frame).contains("Waiting for samples"));
    }
}
