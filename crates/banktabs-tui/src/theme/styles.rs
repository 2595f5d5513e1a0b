use super::colors::*;
use banktabs_domain::SlotDecision;
use ratatui::style::{Modifier, Style};

pub fn tab_style(palette: &TabPalette, selected: bool, hovered: bool) -> Style {
    if selected {
        Style::default()
            .fg(NORMAL_TEXT)
            .bg(palette.active)
            .add_modifier(Modifier::BOLD)
    } else if hovered {
        Style::default().fg(NORMAL_TEXT).bg(palette.hovered)
    } else {
        Style::default().fg(NORMAL_TEXT).bg(palette.inactive)
    }
}

pub fn drop_target_style() -> Style {
    Style::default()
        .fg(DROP_TARGET)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn slot_style(decision: SlotDecision, under_cursor: bool) -> Style {
    let base = match decision {
        SlotDecision::Show => Style::default().fg(NORMAL_TEXT),
        SlotDecision::GrayOut => Style::default()
            .fg(GRAYED_TEXT)
            .add_modifier(Modifier::DIM),
        SlotDecision::Hide => Style::default(),
    };
    if under_cursor {
        base.bg(CURSOR_BG)
    } else {
        base
    }
}

pub fn label_text() -> Style {
    Style::default().fg(LABEL_TEXT)
}

pub fn input_border() -> Style {
    Style::default().fg(INPUT_BORDER)
}

pub fn error_text() -> Style {
    Style::default().fg(ERROR_COLOR)
}
