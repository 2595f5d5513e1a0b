use crate::events::{should_quit, Event, EventHandler};
use crate::input::InputState;
use crate::theme::TabPalette;
use crate::ui;
use banktabs_core::{AppConfig, BankTabsError, BankTabsResult, BlobStore};
use banktabs_domain::{
    BankSlot, CommandOutcome, Gesture, InventorySnapshot, InventorySource, SessionSettings,
    SlotDecision, TabSession,
};
use banktabs_persistence::{ChangeDetector, FileWatcher, JsonFileStore, PersistenceStore};
use crossterm::event::{KeyCode, KeyEvent};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Number of slots per row in the bank grid.
pub const SLOT_COLUMNS: usize = 8;

pub struct AppOptions {
    /// Where the tab state is persisted.
    pub state_file: PathBuf,
    /// Inventory snapshot to display; the bank counts as closed without one.
    pub inventory_file: Option<PathBuf>,
    pub config: AppConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    /// Typing a group name into the add/remove box.
    AddRemove,
    /// Picking the tab to drop the slot under the cursor onto.
    Drop { target: usize },
}

/// Blob slot that hands every save to a background writer task.
pub struct ChannelBlobStore {
    blob: Option<String>,
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelBlobStore {
    pub fn new(blob: Option<String>) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { blob, tx }, rx)
    }
}

impl BlobStore for ChannelBlobStore {
    fn load_blob(&self) -> Option<String> {
        self.blob.clone()
    }

    fn save_blob(&mut self, blob: &str) -> BankTabsResult<()> {
        self.tx
            .send(blob.to_string())
            .map_err(|_| BankTabsError::Internal("state writer has stopped".to_string()))?;
        self.blob = Some(blob.to_string());
        Ok(())
    }
}

pub struct App {
    pub session: TabSession<ChannelBlobStore>,
    pub inventory: InventorySnapshot,
    pub slots: Vec<BankSlot>,
    pub decisions: Vec<SlotDecision>,
    pub mode: AppMode,
    pub input: InputState,
    pub config: AppConfig,
    pub palette: TabPalette,
    /// Index into the tab ordering under the tab cursor.
    pub hovered_tab: usize,
    pub slot_cursor: usize,
    pub status: Option<String>,
    pub should_quit: bool,
    inventory_path: Option<PathBuf>,
}

impl App {
    /// Build the app around an already loaded blob and inventory. The
    /// receiver yields every blob the session saves.
    pub fn new(
        config: AppConfig,
        blob: Option<String>,
        inventory: InventorySnapshot,
    ) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (blobs, saves) = ChannelBlobStore::new(blob);
        let session = TabSession::open(blobs, SessionSettings::from(&config));
        let palette = TabPalette::from_appearance(&config.appearance);
        let mut app = Self {
            session,
            inventory,
            slots: Vec::new(),
            decisions: Vec::new(),
            mode: AppMode::Normal,
            input: InputState::new(),
            config,
            palette,
            hovered_tab: 0,
            slot_cursor: 0,
            status: None,
            should_quit: false,
            inventory_path: None,
        };
        app.hovered_tab = app
            .session
            .store()
            .position(app.session.selected_group())
            .unwrap_or(0);
        app.activate();
        (app, saves)
    }

    fn activate(&mut self) {
        match self.session.activate(&self.inventory) {
            Ok(Some(decisions)) => self.apply(decisions),
            Ok(None) => self.status = Some("Bank is not open".to_string()),
            Err(e) => self.report(e),
        }
    }

    fn apply(&mut self, decisions: Vec<SlotDecision>) {
        self.slots = self.inventory.resolve_slots();
        self.decisions = decisions;
        self.slot_cursor = self.slot_cursor.min(self.slots.len().saturating_sub(1));
    }

    pub(crate) fn refresh(&mut self) {
        if let Some(decisions) = self.session.refresh(&self.inventory) {
            self.apply(decisions);
        }
    }

    pub(crate) fn report(&mut self, error: BankTabsError) {
        tracing::error!("{}", error);
        self.status = Some(error.to_string());
    }

    /// Run one gesture through the session and show why it was refused, if it was.
    pub fn dispatch(&mut self, gesture: Gesture) {
        if !self.inventory.is_available() {
            tracing::debug!("Ignoring {:?}: bank is not open", gesture);
            return;
        }
        let command = gesture.into_command(
            &self.inventory,
            self.session.settings().mutually_exclusive,
        );
        match self.session.execute(command.as_ref()) {
            Ok(CommandOutcome::Applied) => self.status = None,
            Ok(CommandOutcome::Rejected(reason)) => self.status = Some(reason),
            Err(e) => self.report(e),
        }
        self.refresh();
    }

    /// Swap in a freshly read inventory and recompute.
    pub fn replace_inventory(&mut self, inventory: InventorySnapshot) {
        let was_available = self.inventory.is_available();
        self.inventory = inventory;
        if self.session.is_active() {
            if !self.inventory.is_available() {
                self.status = Some("Bank is not open".to_string());
            }
            self.refresh();
        } else if !was_available {
            self.status = None;
            self.activate();
        }
    }

    async fn reload_inventory(&mut self) {
        let Some(path) = self.inventory_path.clone() else {
            return;
        };
        match load_inventory(&path).await {
            Ok(inventory) => self.replace_inventory(inventory),
            Err(e) => self.report(e),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            AppMode::Normal => {
                if should_quit(&key) {
                    self.quit();
                    return;
                }
                self.handle_normal_key(key);
            }
            AppMode::AddRemove => self.handle_input_key(key),
            AppMode::Drop { target } => self.handle_drop_key(key, target),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.hover_previous_tab(),
            KeyCode::Right => self.hover_next_tab(),
            KeyCode::Enter | KeyCode::Char(' ') => self.click_hovered_tab(),
            KeyCode::Char('h') => self.move_slot_cursor(-1, 0),
            KeyCode::Char('l') => self.move_slot_cursor(1, 0),
            KeyCode::Char('k') => self.move_slot_cursor(0, -1),
            KeyCode::Char('j') => self.move_slot_cursor(0, 1),
            KeyCode::Char('m') => self.begin_drop(),
            KeyCode::Char('<') => self.reorder_hovered_tab(false),
            KeyCode::Char('>') => self.reorder_hovered_tab(true),
            KeyCode::Char('x') => self.remove_hovered_tab(),
            KeyCode::Char('+') => self.resize_hovered_tab(1),
            KeyCode::Char('-') => self.resize_hovered_tab(-1),
            KeyCode::Char('/') => self.begin_add_remove(),
            KeyCode::Char('g') => self.toggle_gray_out(),
            _ => {}
        }
    }

    /// Leave the bank: every slot is shown again before exit.
    pub fn quit(&mut self) {
        match self.session.deactivate(&self.inventory) {
            Ok(Some(decisions)) => self.decisions = decisions,
            Ok(None) => {}
            Err(e) => self.report(e),
        }
        self.should_quit = true;
    }

    pub async fn run(mut self, mut saves: mpsc::UnboundedReceiver<String>, state_file: PathBuf) -> BankTabsResult<()> {
        let store = JsonFileStore::new(&state_file);
        let writer = tokio::spawn(async move {
            while let Some(blob) = saves.recv().await {
                if let Err(e) = store.save(store.snapshot(&blob)).await {
                    tracing::error!("Failed to save tab state to {}: {}", store.path().display(), e);
                }
            }
        });

        let watcher = FileWatcher::new();
        let mut inventory_rx = None;
        if let Some(path) = self.inventory_path.clone() {
            match watcher.start_watching(path).await {
                Ok(()) => inventory_rx = Some(watcher.subscribe()),
                Err(e) => tracing::warn!("Not watching inventory file: {}", e),
            }
        }

        let mut terminal = setup_terminal()?;
        let mut events = EventHandler::new(inventory_rx);

        while !self.should_quit {
            terminal.draw(|frame| ui::render(&self, frame))?;

            match events.next().await {
                Some(Event::Key(key)) => self.handle_key(key),
                Some(Event::InventoryChanged) => {
                    tracing::debug!("Inventory file changed, reloading");
                    self.reload_inventory().await;
                }
                Some(Event::Tick) => {}
                None => break,
            }
        }

        events.stop();
        restore_terminal(&mut terminal)?;
        if watcher.is_watching() {
            watcher.stop_watching().await?;
        }

        // Closing the session closes the save channel and lets the writer drain.
        drop(self);
        if let Err(e) = writer.await {
            tracing::error!("State writer task failed: {}", e);
        }
        Ok(())
    }
}

/// Load state and inventory from disk, then run the terminal UI until quit.
pub async fn launch(options: AppOptions) -> BankTabsResult<()> {
    let store = JsonFileStore::new(&options.state_file);
    let blob = if store.exists().await {
        Some(store.load().await?.blob())
    } else {
        None
    };

    let inventory = match &options.inventory_file {
        Some(path) => load_inventory(path).await?,
        None => InventorySnapshot::closed(),
    };

    let (mut app, saves) = App::new(options.config, blob, inventory);
    app.inventory_path = options.inventory_file;
    app.run(saves, options.state_file).await
}

pub async fn load_inventory(path: &std::path::Path) -> BankTabsResult<InventorySnapshot> {
    let json = tokio::fs::read_to_string(path).await?;
    InventorySnapshot::from_json(&json).map_err(|e| {
        BankTabsError::Serialization(format!("inventory {}: {}", path.display(), e))
    })
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<(), io::Error> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use banktabs_domain::{ItemDefinition, MatchToken};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn inventory() -> InventorySnapshot {
        InventorySnapshot::new(
            vec![Some(512), Some(7), None],
            vec![ItemDefinition {
                id: 512,
                name: Some("apple".to_string()),
                name_capitalized: Some("Apple".to_string()),
            }],
        )
    }

    #[test]
    fn test_first_activation_saves_default_state() {
        let (app, mut saves) = App::new(AppConfig::default(), None, inventory());
        assert!(app.session.is_active());
        assert!(saves.try_recv().is_ok());
        assert_eq!(app.decisions, vec![SlotDecision::Show, SlotDecision::Show, SlotDecision::Hide]);
        assert_eq!(app.slots[0].as_ref().map(|i| i.display_name.as_str()), Some("Apple"));
    }

    #[test]
    fn test_closed_bank_does_not_activate() {
        let (mut app, mut saves) = App::new(AppConfig::default(), None, InventorySnapshot::closed());
        assert!(!app.session.is_active());
        assert!(saves.try_recv().is_err());
        assert_eq!(app.status.as_deref(), Some("Bank is not open"));

        app.replace_inventory(inventory());
        assert!(app.session.is_active());
        assert!(app.status.is_none());
        assert_eq!(app.decisions.len(), 3);
    }

    #[test]
    fn test_add_group_then_drop_item_onto_it() {
        let (mut app, mut saves) = App::new(AppConfig::default(), None, inventory());
        while saves.try_recv().is_ok() {}

        app.handle_key(key(KeyCode::Char('/')));
        assert_eq!(app.mode, AppMode::AddRemove);
        type_text(&mut app, "Food");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.session.store().contains("Food"));
        assert!(saves.try_recv().is_ok());

        app.handle_key(key(KeyCode::Char('m')));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.mode, AppMode::Drop { target: 1 });
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(
            app.session.store().tokens("Food"),
            Some(&[MatchToken::ById(512)][..])
        );

        // The All tab now hides the claimed apple.
        assert_eq!(app.decisions[0], SlotDecision::Hide);
        assert_eq!(app.decisions[1], SlotDecision::Show);
    }

    #[test]
    fn test_click_selects_hovered_tab() {
        let blob = r#"{"All": ["*"], "Food": ["512"]}"#.to_string();
        let (mut app, _saves) = App::new(AppConfig::default(), Some(blob), inventory());
        assert_eq!(app.session.store().ordering(), ["All", "Food"]);

        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session.selected_group(), "Food");
        assert_eq!(app.decisions, vec![SlotDecision::Show, SlotDecision::Hide, SlotDecision::Hide]);
    }

    #[test]
    fn test_reordering_requires_setting() {
        let blob = r#"{"All": ["*"], "Food": []}"#.to_string();
        let (mut app, _saves) = App::new(AppConfig::default(), Some(blob.clone()), inventory());
        app.handle_key(key(KeyCode::Char('>')));
        assert_eq!(app.session.store().ordering(), ["All", "Food"]);

        let config = AppConfig {
            show_reordering: true,
            ..AppConfig::default()
        };
        let (mut app, _saves) = App::new(config, Some(blob), inventory());
        app.handle_key(key(KeyCode::Char('>')));
        assert_eq!(app.session.store().ordering(), ["Food", "All"]);
        assert_eq!(app.hovered_tab, 1);
    }

    #[test]
    fn test_rejection_is_shown_in_status() {
        let (mut app, _saves) = App::new(AppConfig::default(), None, inventory());
        app.handle_key(key(KeyCode::Char('/')));
        type_text(&mut app, "All");
        app.handle_key(key(KeyCode::Enter));
        assert!(app.status.is_some());
        assert_eq!(app.session.store().len(), 1);
    }

    #[test]
    fn test_quit_restores_every_slot() {
        let config = AppConfig {
            gray_out: true,
            ..AppConfig::default()
        };
        let blob = r#"{"Food": ["512"], "All": ["*"]}"#.to_string();
        let (mut app, _saves) = App::new(config, Some(blob), inventory());
        assert_eq!(app.decisions[0], SlotDecision::GrayOut);

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
        assert!(!app.session.is_active());
        assert_eq!(app.decisions, vec![SlotDecision::Show; 3]);
    }
}
