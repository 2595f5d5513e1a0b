use crate::app::{App, AppMode, SLOT_COLUMNS};
use crate::theme::styles::*;
use banktabs_core::Appearance;
use banktabs_domain::{GroupDescriptor, InventorySource, SlotDecision};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Configured padding pixels per terminal cell.
const PIXELS_PER_CELL: u16 = 8;

pub fn render(app: &App, frame: &mut Frame) {
    let input_height = if app.mode == AppMode::AddRemove { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(input_height),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_tabs(app, frame, chunks[0]);
    if app.mode == AppMode::AddRemove {
        render_input(app, frame, chunks[1]);
    }
    render_slots(app, frame, chunks[2]);
    render_footer(app, frame, chunks[3]);
}

/// Width of a tab control in cells: the saved width, or the label plus padding.
pub fn tab_width(name: &str, saved: Option<u32>, appearance: &Appearance) -> u32 {
    saved.unwrap_or_else(|| {
        let padding = u32::from((appearance.padding_width / PIXELS_PER_CELL).max(1));
        name.chars().count() as u32 + 2 * padding
    })
}

fn tab_label(descriptor: &GroupDescriptor, appearance: &Appearance) -> String {
    let width = tab_width(&descriptor.name, descriptor.saved_width, appearance) as usize;
    let name: String = descriptor.name.chars().take(width).collect();
    format!("{:^width$}", name, width = width)
}

fn render_tabs(app: &App, frame: &mut Frame, area: Rect) {
    let drop_target = match app.mode {
        AppMode::Drop { target } => Some(target),
        _ => None,
    };
    let show_arrows = app.config.show_reordering;

    let mut spans = Vec::new();
    for (index, descriptor) in app.session.descriptors().iter().enumerate() {
        if show_arrows && descriptor.can_move_left {
            spans.push(Span::styled("<", label_text()));
        }
        let style = if drop_target == Some(index) {
            drop_target_style()
        } else {
            tab_style(&app.palette, descriptor.is_selected, index == app.hovered_tab)
        };
        spans.push(Span::styled(
            tab_label(descriptor, &app.config.appearance),
            style,
        ));
        if show_arrows && descriptor.can_move_right {
            spans.push(Span::styled(">", label_text()));
        }
        spans.push(Span::raw(" "));
    }

    let tabs = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Bank"));
    frame.render_widget(tabs, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let input = Paragraph::new(app.input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(input_border())
            .title("Add / remove group"),
    );
    frame.render_widget(input, area);

    let cursor_x = app.input.as_str()[..app.input.cursor_pos()].chars().count() as u16;
    frame.set_cursor_position((area.x + 1 + cursor_x, area.y + 1));
}

fn render_slots(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !app.inventory.is_available() {
        return;
    }

    let cell_width = (inner.width as usize / SLOT_COLUMNS).max(1);
    let lines: Vec<Line> = app
        .slots
        .chunks(SLOT_COLUMNS)
        .enumerate()
        .map(|(row, slots)| {
            let spans: Vec<Span> = slots
                .iter()
                .enumerate()
                .map(|(column, slot)| {
                    let index = row * SLOT_COLUMNS + column;
                    let decision = app
                        .decisions
                        .get(index)
                        .copied()
                        .unwrap_or(SlotDecision::Show);
                    let text = match (slot, decision) {
                        (_, SlotDecision::Hide) | (None, _) => String::new(),
                        (Some(item), _) => item.display_name.chars().take(cell_width - 1).collect(),
                    };
                    Span::styled(
                        format!("{:<width$}", text, width = cell_width),
                        slot_style(decision, index == app.slot_cursor),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let line = match (&app.status, app.mode) {
        (Some(status), _) => Line::from(Span::styled(status.clone(), error_text())),
        (None, AppMode::Drop { .. }) => Line::from(Span::styled(
            "←/→: pick tab  ENTER: drop  ESC: cancel",
            label_text(),
        )),
        (None, AppMode::AddRemove) => Line::from(Span::styled(
            "ENTER: add or remove group  ESC: cancel",
            label_text(),
        )),
        (None, AppMode::Normal) => Line::from(Span::styled(normal_help(app), label_text())),
    };

    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn normal_help(app: &App) -> String {
    let mut help = vec!["←/→: tab", "ENTER: select", "hjkl: slot", "m: move item"];
    if app.config.allow_add_remove {
        help.push("/: add/remove");
        help.push("x: remove tab");
    }
    if app.config.show_reordering {
        help.push("</>: reorder");
    }
    if app.config.allow_resize {
        help.push("+/-: resize");
    }
    help.push("g: gray out");
    help.push("q: quit");
    help.join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_width_prefers_saved_width() {
        let appearance = Appearance::default();
        assert_eq!(tab_width("Food", Some(30), &appearance), 30);
        assert_eq!(tab_width("Food", None, &appearance), 6);

        let wide = Appearance {
            padding_width: 24,
            ..Appearance::default()
        };
        assert_eq!(tab_width("Food", None, &wide), 10);
    }

    #[test]
    fn test_tab_label_is_centred_and_truncated() {
        let descriptor = GroupDescriptor {
            name: "Runes".to_string(),
            is_selected: false,
            is_reserved: false,
            can_move_left: true,
            can_move_right: false,
            removable: true,
            saved_width: Some(3),
        };
        assert_eq!(tab_label(&descriptor, &Appearance::default()), "Run");

        let descriptor = GroupDescriptor {
            saved_width: None,
            ..descriptor
        };
        assert_eq!(tab_label(&descriptor, &Appearance::default()), " Runes ");
    }
}
