use std::mem;
use std::sync::mpsc::Receiver;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::db::{FoodStore, StoreEvent};
use crate::models::{Food, NewFood};
use crate::photos::{FilePhotoSource, PhotoSource};
use crate::selector::Selector;

use super::forms::{ConfirmFoodDelete, FoodField, FoodForm};
use super::helpers::{centered_rect, photo_caption, surface_error};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height allocation for the random-pick panel above the list.
const PICK_PANEL_HEIGHT: u16 = 8;

/// Fine-grained modes layered over the single list screen. Keeping this
/// explicit makes it easy to reason about which rendering path runs and what
/// keyboard shortcuts should do.
enum Mode {
    Normal,
    AddingFood(FoodForm),
    ConfirmDelete(ConfirmFoodDelete),
    ViewingFood(Food),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. The `foods` vector is a
/// read-through projection of the store, rebuilt whenever the subscription
/// channel reports a change.
pub struct App {
    store: FoodStore,
    events: Receiver<StoreEvent>,
    foods: Vec<Food>,
    selected: usize,
    selector: Selector,
    has_pick: bool,
    photos: FilePhotoSource,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Subscribe to the store and hydrate the initial projection.
    pub fn new(mut store: FoodStore) -> Result<Self> {
        let events = store.subscribe();
        let foods = store.list().context("failed to load foods")?;

        Ok(Self {
            store,
            events,
            foods,
            selected: 0,
            selector: Selector::new(),
            has_pick: false,
            photos: FilePhotoSource,
            mode: Mode::Normal,
            status: None,
        })
    }

    /// Drain pending change notifications; if any arrived, rebuild the
    /// projection from the store. Called once per event-loop tick and after
    /// every mutation, so the list on screen never drifts from the database.
    pub(crate) fn poll_store_events(&mut self) -> Result<()> {
        if self.events.try_iter().count() == 0 {
            return Ok(());
        }
        self.refresh_foods()
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingFood(form) => self.handle_add_food(code, form)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
            Mode::ViewingFood(food) => Self::handle_view_food(code, food),
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Home => self.select_first(),
            KeyCode::End => self.select_last(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.choose_random(),
            KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                return Ok(Mode::AddingFood(FoodForm::default()));
            }
            KeyCode::Char('-') | KeyCode::Char('d') | KeyCode::Char('D') => {
                if let Some(food) = self.current_food() {
                    let confirm = ConfirmFoodDelete::from(food);
                    self.clear_status();
                    return Ok(Mode::ConfirmDelete(confirm));
                } else {
                    self.set_status("No food selected to delete.", StatusKind::Error);
                }
            }
            KeyCode::Enter => {
                if let Some(food) = self.current_food().cloned() {
                    self.clear_status();
                    return Ok(Mode::ViewingFood(food));
                } else {
                    self.set_status("No food selected.", StatusKind::Error);
                }
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_add_food(&mut self, code: KeyCode, mut form: FoodForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.clear_status();
                return Ok(Mode::Normal);
            }
            KeyCode::Tab => form.toggle_field(),
            KeyCode::Left | KeyCode::Up => {
                if !form.active_is_text() {
                    form.cycle_option(-1);
                }
            }
            KeyCode::Right | KeyCode::Down => {
                if !form.active_is_text() {
                    form.cycle_option(1);
                }
            }
            KeyCode::Enter => match self.save_new_food(&form) {
                Ok(()) => return Ok(Mode::Normal),
                Err(err) => form.error = Some(surface_error(&err)),
            },
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::AddingFood(form))
    }

    fn handle_confirm_delete(
        &mut self,
        code: KeyCode,
        confirm: ConfirmFoodDelete,
    ) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.perform_delete(&confirm)?;
                Ok(Mode::Normal)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Ok(Mode::Normal),
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    fn handle_view_food(code: KeyCode, food: Food) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Mode::Normal,
            _ => Mode::ViewingFood(food),
        }
    }

    /// Run the selector over the current projection. The pick panel starts
    /// showing the chosen food immediately; deleting it later leaves the
    /// stored index stale, which `picked_food` guards against.
    fn choose_random(&mut self) {
        if self.foods.is_empty() {
            self.selector.pick(&self.foods);
            self.has_pick = false;
            self.set_status("No foods yet. Press '+' to add one.", StatusKind::Error);
            return;
        }

        self.selector.pick(&self.foods);
        self.has_pick = true;
        self.clear_status();
    }

    /// The food the selector last picked, or `None` when nothing was picked
    /// yet or the pick no longer points inside the list.
    fn picked_food(&self) -> Option<&Food> {
        if !self.has_pick {
            return None;
        }
        self.foods.get(self.selector.selected())
    }

    fn save_new_food(&mut self, form: &FoodForm) -> Result<()> {
        let (name, photo_input) = form.parse_inputs()?;
        let photo = self.photos.fetch(&photo_input)?;

        let food = self.store.add(NewFood {
            name,
            meal: form.meal,
            prep_time: form.prep_time,
            cook_time: form.cook_time,
            photo,
        })?;

        self.poll_store_events()?;
        self.focus_food(food.id);
        self.set_status(format!("Added {}.", food.name), StatusKind::Info);
        Ok(())
    }

    fn perform_delete(&mut self, confirm: &ConfirmFoodDelete) -> Result<()> {
        match self.store.remove(confirm.id) {
            Ok(()) => {
                self.poll_store_events()?;
                self.set_status(format!("Deleted {}.", confirm.name), StatusKind::Info);
            }
            Err(err) => {
                // A stale confirmation (row already gone) is recoverable;
                // resync the projection and tell the user.
                self.refresh_foods()?;
                self.set_status(surface_error(&anyhow::Error::from(err)), StatusKind::Error);
            }
        }
        Ok(())
    }

    /// Rebuild the projection from the store and keep the cursor in bounds.
    fn refresh_foods(&mut self) -> Result<()> {
        self.foods = self.store.list().context("failed to reload foods")?;
        if self.selected >= self.foods.len() {
            self.selected = self.foods.len().saturating_sub(1);
        }
        Ok(())
    }

    fn focus_food(&mut self, id: i64) {
        if let Some(idx) = self.foods.iter().position(|f| f.id == id) {
            self.selected = idx;
        }
    }

    fn current_food(&self) -> Option<&Food> {
        self.foods.get(self.selected)
    }

    fn move_selection(&mut self, offset: isize) {
        if self.foods.is_empty() {
            return;
        }
        let len = self.foods.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
    }

    fn select_first(&mut self) {
        if !self.foods.is_empty() {
            self.selected = 0;
        }
    }

    fn select_last(&mut self) {
        if !self.foods.is_empty() {
            self.selected = self.foods.len() - 1;
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(PICK_PANEL_HEIGHT.min(area.height)),
                Constraint::Min(0),
                Constraint::Length(footer_height),
            ])
            .split(area);

        self.draw_pick_panel(frame, chunks[0]);
        self.draw_food_list(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::AddingFood(form) => self.draw_food_form(frame, area, form),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::ViewingFood(food) => self.draw_food_detail(frame, area, food),
            Mode::Normal => {}
        }
    }

    fn draw_pick_panel(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("What to Eat?");

        let lines = if let Some(food) = self.picked_food() {
            let mut lines = vec![
                Line::from(Span::styled(
                    food.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    food.meal.label(),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(vec![
                    Span::raw(food.prep_caption()),
                    Span::raw("  "),
                    Span::raw(food.cook_caption()),
                ]),
            ];
            if let Some(photo) = &food.photo {
                lines.push(Line::from(Span::styled(
                    photo_caption(photo),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines
        } else if self.foods.is_empty() {
            vec![Line::from("Nothing recorded yet.")]
        } else {
            vec![Line::from("Press 'r' to choose a random meal.")]
        };

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
    }

    fn draw_food_list(&self, frame: &mut Frame, area: Rect) {
        if self.foods.is_empty() {
            let message = Paragraph::new("No foods yet. Press '+' to add one.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Foods"));
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = self
            .foods
            .iter()
            .map(|food| {
                let mut spans = vec![
                    Span::styled(
                        food.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", food.meal),
                        Style::default().fg(Color::DarkGray),
                    ),
                ];
                if let Some(photo) = &food.photo {
                    spans.push(Span::styled(
                        format!("  {}", photo_caption(photo)),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Foods"))
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match &self.mode {
            Mode::Normal => Line::from(vec![
                Span::styled("[r]", key_style),
                Span::raw(" Pick Random   "),
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Details   "),
                Span::styled("[+]", key_style),
                Span::raw(" Add   "),
                Span::styled("[-]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            Mode::AddingFood(_) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Field   "),
                Span::styled("[←→]", key_style),
                Span::raw(" Cycle Choice   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::ConfirmDelete(_) => Line::from(vec![
                Span::styled("[y]", key_style),
                Span::raw(" Confirm   "),
                Span::styled("[n]", key_style),
                Span::raw(" / "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::ViewingFood(_) => Line::from(vec![
                Span::styled("[Esc]", key_style),
                Span::raw(" Close"),
            ]),
        }
    }

    fn draw_food_form(&self, frame: &mut Frame, area: Rect, form: &FoodForm) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add New Food").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Name", FoodField::Name),
            form.build_line("Meal", FoodField::Meal),
            form.build_line("Time to prepare", FoodField::PrepTime),
            form.build_line("Time to cook", FoodField::CookTime),
            form.build_line("Photo", FoodField::Photo),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        // Only the text fields get a cursor; the pickers are arrow-driven.
        let (prefix, row) = match form.active {
            FoodField::Name => ("Name: ", 0),
            FoodField::Photo => ("Photo: ", 4),
            _ => return,
        };
        let cursor_x = inner.x + prefix.len() as u16 + form.value_len(form.active) as u16;
        frame.set_cursor_position((cursor_x, inner.y + row));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmFoodDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Deletion")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Delete '{}' permanently?", confirm.name)),
            Line::from("There is no undo."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_food_detail(&self, frame: &mut Frame, area: Rect, food: &Food) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Food Details").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            Line::from(Span::styled(
                food.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(food.meal.label()),
            Line::from(format!("Prepare time: {}", food.prep_time)),
            Line::from(format!("Cook time: {}", food.cook_time)),
        ];
        if let Some(photo) = &food.photo {
            lines.push(Line::from(Span::styled(
                photo_caption(photo),
                Style::default().fg(Color::DarkGray),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}
