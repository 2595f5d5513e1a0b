use crate::app::{App, AppMode, SLOT_COLUMNS};
use banktabs_domain::Gesture;
use crossterm::event::{KeyCode, KeyEvent};

impl App {
    /// Move the slot cursor within the grid, stopping at the edges.
    pub fn move_slot_cursor(&mut self, dx: isize, dy: isize) {
        if self.slots.is_empty() {
            return;
        }
        let step = dx + dy * SLOT_COLUMNS as isize;
        let target = self.slot_cursor as isize + step;
        if target >= 0 && (target as usize) < self.slots.len() {
            self.slot_cursor = target as usize;
        }
    }

    /// Start dragging the item under the cursor. Empty slots cannot be dragged.
    pub fn begin_drop(&mut self) {
        if matches!(self.slots.get(self.slot_cursor), Some(Some(_))) {
            self.mode = AppMode::Drop {
                target: self.hovered_tab,
            };
        }
    }

    pub fn handle_drop_key(&mut self, key: KeyEvent, target: usize) {
        let last = self.session.store().len().saturating_sub(1);
        match key.code {
            KeyCode::Esc => self.mode = AppMode::Normal,
            KeyCode::Left => {
                self.mode = AppMode::Drop {
                    target: target.saturating_sub(1),
                }
            }
            KeyCode::Right => {
                self.mode = AppMode::Drop {
                    target: (target + 1).min(last),
                }
            }
            KeyCode::Enter => {
                self.mode = AppMode::Normal;
                let item = self.slots.get(self.slot_cursor).cloned().flatten();
                let group_name = self.session.store().ordering().get(target).cloned();
                if let (Some(item), Some(group_name)) = (item, group_name) {
                    self.dispatch(Gesture::Drop {
                        group_name,
                        item_id: item.id,
                    });
                }
            }
            _ => {}
        }
    }
}
