//! Main application: terminal lifecycle, event loop, and key routing

use std::io;
use std::time::Duration;

use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Widget,
    Frame, Terminal,
};

use crate::config::{self, Config};
use crate::data::{BudgetStore, Currency, Database, ScheduleStore, StateStore};
use crate::project;
use crate::share;
use crate::ui::components::{
    BudgetForm, BudgetFormOutcome, BudgetFormState, BudgetTable, ConfirmationContext,
    ConfirmationDialog, ConfirmationDialogState, Prompt, PromptOutcome, PromptState, SceneForm,
    SceneFormOutcome, SceneFormState, StatusBar, StatusMessage, StripList, ViewBar,
};
use crate::ui::events::{ActiveView, InputMode};

/// Ticks (at 200ms) before a transient status message expires
const MESSAGE_TTL_TICKS: u8 = 25;

/// Main application state
pub struct App {
    config: Config,
    schedule: ScheduleStore,
    budget: BudgetStore,
    /// Active display currency; stored amounts never change with it
    currency: Currency,
    view: ActiveView,
    mode: InputMode,
    selected_scene: usize,
    selected_item: usize,
    scene_form: SceneFormState,
    budget_form: BudgetFormState,
    confirm: ConfirmationDialogState,
    import_prompt: PromptState,
    rename_prompt: PromptState,
    status_message: Option<StatusMessage>,
    message_age: u8,
    should_quit: bool,
}

impl App {
    /// Build the application from an open database, loading both stores
    pub fn new(config: Config, db: &Database) -> anyhow::Result<Self> {
        let mut schedule = ScheduleStore::new(StateStore::new(db.connection()));
        let mut budget = BudgetStore::new(StateStore::new(db.connection()));
        schedule.load()?;
        budget.load()?;
        let currency = budget.currency_or(config.default_currency)?;

        Ok(Self {
            config,
            schedule,
            budget,
            currency,
            view: ActiveView::default(),
            mode: InputMode::default(),
            selected_scene: 0,
            selected_item: 0,
            scene_form: SceneFormState::default(),
            budget_form: BudgetFormState::default(),
            confirm: ConfirmationDialogState::default(),
            import_prompt: PromptState::default(),
            rename_prompt: PromptState::default(),
            status_message: None,
            message_age: 0,
            should_quit: false,
        })
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(Duration::from_millis(200));

        loop {
            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key)?;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Err(e.into()),
                        None => break,
                    }
                }
                _ = tick.tick() => self.on_tick(),
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn on_tick(&mut self) {
        if self.status_message.is_some() {
            self.message_age = self.message_age.saturating_add(1);
            if self.message_age >= MESSAGE_TTL_TICKS {
                self.status_message = None;
            }
        }
    }

    fn set_message(&mut self, message: StatusMessage) {
        self.status_message = Some(message);
        self.message_age = 0;
    }

    // ------------------------------------------------------------------
    // Key routing
    // ------------------------------------------------------------------

    fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        match self.mode {
            InputMode::Normal => self.handle_normal_key(key)?,
            InputMode::SceneForm => self.handle_scene_form_key(key)?,
            InputMode::BudgetForm => self.handle_budget_form_key(key)?,
            InputMode::Confirm => self.handle_confirm_key(key)?,
            InputMode::ImportPath => self.handle_import_key(key)?,
            InputMode::Rename => self.handle_rename_key(key)?,
        }
        Ok(())
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => {
                self.view = match self.view {
                    ActiveView::Schedule => ActiveView::Budget,
                    ActiveView::Budget => ActiveView::Schedule,
                };
            }
            KeyCode::Char('1') => self.view = ActiveView::Schedule,
            KeyCode::Char('2') => self.view = ActiveView::Budget,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Char('a') => match self.view {
                ActiveView::Schedule => {
                    self.scene_form.open();
                    self.mode = InputMode::SceneForm;
                }
                ActiveView::Budget => {
                    self.budget_form.open(self.currency);
                    self.mode = InputMode::BudgetForm;
                }
            },
            KeyCode::Char('d') => self.request_delete(),
            KeyCode::Char('s') if self.view == ActiveView::Schedule => self.share_selected(),
            KeyCode::Char('c') if self.view == ActiveView::Budget => self.cycle_currency()?,
            KeyCode::Char('e') => self.export_project(),
            KeyCode::Char('i') => {
                self.import_prompt
                    .open("Import Project", "path/to/project.filmproj", "");
                self.mode = InputMode::ImportPath;
            }
            KeyCode::Char('r') => {
                let current = self.config.project_name.clone();
                self.rename_prompt
                    .open("Project Name", "My Film Project", &current);
                self.mode = InputMode::Rename;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_scene_form_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        match self.scene_form.handle_key(key) {
            Some(SceneFormOutcome::Submit(draft)) => {
                self.schedule.add(draft)?;
                self.selected_scene = self.schedule.len().saturating_sub(1);
                self.set_message(StatusMessage::info("Scene added"));
                self.mode = InputMode::Normal;
            }
            Some(SceneFormOutcome::Cancel) => self.mode = InputMode::Normal,
            None => {}
        }
        Ok(())
    }

    fn handle_budget_form_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        match self.budget_form.handle_key(key) {
            Some(BudgetFormOutcome::Submit {
                description,
                category,
                cost,
            }) => {
                self.budget.add(description, category, cost)?;
                self.selected_item = self.budget.len().saturating_sub(1);
                self.set_message(StatusMessage::info("Budget item added"));
                self.mode = InputMode::Normal;
            }
            // Rejected before any state change; the form stays open
            Some(BudgetFormOutcome::Invalid(message)) => {
                self.set_message(StatusMessage::error(message));
            }
            Some(BudgetFormOutcome::Cancel) => self.mode = InputMode::Normal,
            None => {}
        }
        Ok(())
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                self.confirm.toggle_selection();
            }
            KeyCode::Char('y') => {
                self.apply_confirmed_delete()?;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.confirm.hide();
                self.mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                if self.confirm.is_confirm_selected() {
                    self.apply_confirmed_delete()?;
                } else {
                    self.confirm.hide();
                    self.mode = InputMode::Normal;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_import_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        match self.import_prompt.handle_key(key) {
            Some(PromptOutcome::Accept(path)) => {
                self.mode = InputMode::Normal;
                self.import_project(path.trim());
            }
            Some(PromptOutcome::Cancel) => self.mode = InputMode::Normal,
            None => {}
        }
        Ok(())
    }

    fn handle_rename_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        match self.rename_prompt.handle_key(key) {
            Some(PromptOutcome::Accept(name)) => {
                self.mode = InputMode::Normal;
                let name = name.trim().to_string();
                if !name.is_empty() {
                    self.config.project_name = name;
                    if let Err(e) = config::save_project_name(&self.config.project_name) {
                        tracing::warn!(error = %e, "Failed to save project name");
                    }
                    self.set_message(StatusMessage::info("Project renamed"));
                }
            }
            Some(PromptOutcome::Cancel) => self.mode = InputMode::Normal,
            None => {}
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    fn move_selection(&mut self, delta: isize) {
        let (selected, len) = match self.view {
            ActiveView::Schedule => (&mut self.selected_scene, self.schedule.len()),
            ActiveView::Budget => (&mut self.selected_item, self.budget.len()),
        };
        if len == 0 {
            *selected = 0;
            return;
        }
        let new = (*selected as isize + delta).clamp(0, len as isize - 1);
        *selected = new as usize;
    }

    fn clamp_selections(&mut self) {
        self.selected_scene = self
            .selected_scene
            .min(self.schedule.len().saturating_sub(1));
        self.selected_item = self.selected_item.min(self.budget.len().saturating_sub(1));
    }

    fn request_delete(&mut self) {
        match self.view {
            ActiveView::Schedule => {
                let Some(scene) = self.schedule.scenes().get(self.selected_scene) else {
                    return;
                };
                self.confirm.show(
                    "Delete Scene",
                    format!("Are you sure you want to delete scene #{}?", scene.number),
                    ConfirmationContext::DeleteScene(scene.id),
                );
                self.mode = InputMode::Confirm;
            }
            ActiveView::Budget => {
                let Some(item) = self.budget.items().get(self.selected_item) else {
                    return;
                };
                self.confirm.show(
                    "Delete Budget Item",
                    format!("Delete \"{}\"?", item.description),
                    ConfirmationContext::DeleteBudgetItem(item.id),
                );
                self.mode = InputMode::Confirm;
            }
        }
    }

    fn apply_confirmed_delete(&mut self) -> anyhow::Result<()> {
        match self.confirm.context {
            Some(ConfirmationContext::DeleteScene(id)) => {
                self.schedule.remove(id)?;
                self.set_message(StatusMessage::info("Scene deleted"));
            }
            Some(ConfirmationContext::DeleteBudgetItem(id)) => {
                self.budget.remove(id)?;
                self.set_message(StatusMessage::info("Budget item deleted"));
            }
            None => {}
        }
        self.confirm.hide();
        self.mode = InputMode::Normal;
        self.clamp_selections();
        Ok(())
    }

    fn share_selected(&mut self) {
        let Some(scene) = self.schedule.scenes().get(self.selected_scene) else {
            return;
        };
        match share::share_scene(scene) {
            Ok(()) => self.set_message(StatusMessage::info("Scene strip copied to clipboard")),
            Err(e) => {
                tracing::warn!(error = %e, "Share failed");
                self.set_message(StatusMessage::error(format!("Could not share scene: {}", e)));
            }
        }
    }

    fn cycle_currency(&mut self) -> anyhow::Result<()> {
        self.currency = self.currency.next();
        self.budget.set_currency(self.currency)?;
        Ok(())
    }

    fn export_project(&mut self) {
        let path = project::default_export_path(&self.config.project_name);
        match project::export_project(&path, &self.config.project_name, &self.schedule, &self.budget)
        {
            Ok(()) => {
                self.set_message(StatusMessage::info(format!("Saved {}", path.display())));
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                self.set_message(StatusMessage::error(format!("Export failed: {}", e)));
            }
        }
    }

    fn import_project(&mut self, path: &str) {
        if path.is_empty() {
            return;
        }
        match project::import_project(
            std::path::Path::new(path),
            &mut self.schedule,
            &mut self.budget,
        ) {
            Ok(bundle) => {
                // Both views render from the freshly replaced stores on
                // the next frame
                self.selected_scene = 0;
                self.selected_item = 0;
                self.set_message(StatusMessage::info(format!(
                    "Loaded \"{}\"",
                    bundle.project_name
                )));
            }
            Err(e) => {
                tracing::warn!(error = %e, path, "Import failed");
                self.set_message(StatusMessage::error(format!(
                    "Could not read the project file: {}",
                    e
                )));
            }
        }
    }

    // ------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------

    fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        ViewBar::new(self.view).render(chunks[0], f.buffer_mut());
        self.draw_main(f, chunks[1]);

        StatusBar::new(
            &self.config.project_name,
            self.schedule.len(),
            self.budget.len(),
            self.currency,
            self.status_message.as_ref(),
        )
        .render(chunks[2], f.buffer_mut());

        // Overlays
        SceneForm::new(&self.scene_form).render(f.area(), f.buffer_mut());
        BudgetForm::new(&self.budget_form).render(f.area(), f.buffer_mut());
        ConfirmationDialog::new(&self.confirm).render(f.area(), f.buffer_mut());
        Prompt::new(&self.import_prompt).render(f.area(), f.buffer_mut());
        Prompt::new(&self.rename_prompt).render(f.area(), f.buffer_mut());
    }

    fn draw_main(&mut self, f: &mut Frame, area: Rect) {
        match self.view {
            ActiveView::Schedule => {
                StripList::new(self.schedule.scenes(), self.selected_scene)
                    .render(area, f.buffer_mut());
            }
            ActiveView::Budget => {
                BudgetTable::new(self.budget.items(), self.currency, self.selected_item)
                    .render(area, f.buffer_mut());
            }
        }
    }
}
