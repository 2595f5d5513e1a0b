use crate::app::{App, AppMode};
use crate::ui::tab_width;
use banktabs_domain::Gesture;
use crossterm::event::{KeyCode, KeyEvent};

/// Width change per `+`/`-` press, in cells.
const RESIZE_STEP: i64 = 2;

impl App {
    fn hovered_name(&self) -> Option<String> {
        self.session.store().ordering().get(self.hovered_tab).cloned()
    }

    pub fn hover_previous_tab(&mut self) {
        self.hovered_tab = self.hovered_tab.saturating_sub(1);
    }

    pub fn hover_next_tab(&mut self) {
        let last = self.session.store().len().saturating_sub(1);
        self.hovered_tab = (self.hovered_tab + 1).min(last);
    }

    pub fn click_hovered_tab(&mut self) {
        if let Some(group_name) = self.hovered_name() {
            self.dispatch(Gesture::Click { group_name });
        }
    }

    pub fn reorder_hovered_tab(&mut self, right: bool) {
        if !self.config.show_reordering {
            return;
        }
        let Some(group_name) = self.hovered_name() else {
            return;
        };
        let gesture = if right {
            Gesture::ReorderRight {
                group_name: group_name.clone(),
            }
        } else {
            Gesture::ReorderLeft {
                group_name: group_name.clone(),
            }
        };
        self.dispatch(gesture);
        self.follow(&group_name);
    }

    pub fn remove_hovered_tab(&mut self) {
        if !self.config.allow_add_remove {
            return;
        }
        if let Some(group_name) = self.hovered_name() {
            self.dispatch(Gesture::RemoveGroup { group_name });
            self.clamp_hover();
        }
    }

    pub fn resize_hovered_tab(&mut self, steps: i64) {
        if !self.config.allow_resize {
            return;
        }
        let Some(group_name) = self.hovered_name() else {
            return;
        };
        let current = tab_width(
            &group_name,
            self.session.store().column_width(&group_name),
            &self.config.appearance,
        );
        let width = (i64::from(current) + steps * RESIZE_STEP).max(1);
        self.dispatch(Gesture::Resize {
            group_name,
            width: u32::try_from(width).unwrap_or(u32::MAX),
        });
    }

    pub fn begin_add_remove(&mut self) {
        if !self.config.allow_add_remove {
            return;
        }
        self.input.clear();
        self.mode = AppMode::AddRemove;
    }

    pub fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input.clear();
                self.mode = AppMode::Normal;
            }
            KeyCode::Enter => {
                let group_name = self.input.take().trim().to_string();
                self.mode = AppMode::Normal;
                if group_name.is_empty() {
                    return;
                }
                self.dispatch(Gesture::ToggleGroup {
                    group_name: group_name.clone(),
                });
                if !self.session.store().contains(&group_name) {
                    self.clamp_hover();
                }
            }
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Char(c) => self.input.insert_char(c),
            _ => {}
        }
    }

    pub fn toggle_gray_out(&mut self) {
        let mut settings = self.session.settings();
        settings.filter.gray_out = !settings.filter.gray_out;
        if let Err(e) = self.session.update_settings(settings) {
            self.report(e);
            return;
        }
        self.config.gray_out = settings.filter.gray_out;
        self.refresh();
    }

    fn follow(&mut self, group_name: &str) {
        if let Some(position) = self.session.store().position(group_name) {
            self.hovered_tab = position;
        }
    }

    fn clamp_hover(&mut self) {
        let last = self.session.store().len().saturating_sub(1);
        self.hovered_tab = self.hovered_tab.min(last);
    }
}
