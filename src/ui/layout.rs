use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub header: Rect,
    pub pkg_list: Rect,
    pub side_top: Rect,
    pub side_bottom: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Main vertical split: header | content | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Page tabs and identity
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let header = main_chunks[0];
    let content = main_chunks[1];
    let status_bar = main_chunks[2];

    // Horizontal: package list | gap | side panels
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([Constraint::Percentage(62), Constraint::Min(28)])
        .split(content);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Min(4)])
        .split(h_chunks[1]);

    AppLayout {
        header,
        pkg_list: h_chunks[0],
        side_top: side_chunks[0],
        side_bottom: side_chunks[1],
        status_bar,
    }
}

/// Centered popup of the given percentage size, kept inside `area` and at
/// least `min_w` x `min_h` where the terminal allows.
pub fn popup_rect(area: Rect, pct_w: u16, pct_h: u16, min_w: u16, min_h: u16) -> Rect {
    let w = percent_of(area.width, pct_w)
        .max(min_w)
        .min(area.width.saturating_sub(4));
    let h = percent_of(area.height, pct_h)
        .max(min_h)
        .min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(w) / 2;
    let y = area.y + area.height.saturating_sub(h) / 2;
    Rect::new(x, y, w, h)
}

fn percent_of(len: u16, pct: u16) -> u16 {
    let scaled = u32::from(len) * u32::from(pct.min(100)) / 100;
    u16::try_from(scaled).unwrap_or(len)
}
