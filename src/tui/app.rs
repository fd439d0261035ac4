use std::time::Instant;

use crate::analytics::{distribution, rank, trend, RankingEntry, TrendSeries};
use crate::dataset::RecordStore;
use crate::pipeline::{score_store, DashboardView};
use crate::scoring::{Factor, Preset, ScoreField, ScoredRecord, WeightProfile, WEIGHT_STEP};

const MAX_TREND_COUNTRIES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Rankings,
    Distribution,
    Trends,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Rankings, Tab::Distribution, Tab::Trends];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Rankings => "Rankings",
            Tab::Distribution => "Distribution",
            Tab::Trends => "Trends",
        }
    }

    pub fn next(self) -> Tab {
        match self {
            Tab::Rankings => Tab::Distribution,
            Tab::Distribution => Tab::Trends,
            Tab::Trends => Tab::Rankings,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
}

pub struct App {
    pub store: RecordStore,
    pub weights: WeightProfile,
    /// Distinct dataset years, ascending; year_idx points into it.
    pub years: Vec<i32>,
    pub year_idx: usize,
    pub field: ScoreField,
    pub tab: Tab,
    /// Full scored dataset, replaced wholesale on every weight change.
    pub scored: Vec<ScoredRecord>,
    pub view: DashboardView,
    pub table_state: ratatui::widgets::TableState,
    /// Index into Factor::ALL for the weight panel selection.
    pub selected_factor: usize,
    pub trend_countries: Vec<String>,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: RecordStore, weights: WeightProfile, field: ScoreField) -> Self {
        let years = store.years();
        let year_idx = years.len().saturating_sub(1);

        let mut app = Self {
            store,
            weights,
            years,
            year_idx,
            field,
            tab: Tab::Rankings,
            scored: Vec::new(),
            view: DashboardView {
                year: 0,
                field,
                ranking: Vec::new(),
                distribution: distribution(&[], 0, field),
            },
            table_state: ratatui::widgets::TableState::default(),
            selected_factor: 0,
            trend_countries: Vec::new(),
            input_mode: InputMode::Normal,
            flash_message: None,
            should_quit: false,
        };
        app.recompute();
        if !app.view.ranking.is_empty() {
            app.table_state.select(Some(0));
        }
        app
    }

    pub fn year(&self) -> i32 {
        self.years.get(self.year_idx).copied().unwrap_or(0)
    }

    /// Re-run the full pipeline for the current inputs. Synchronous, so the
    /// next draw always sees a consistent (weights, year, field) snapshot.
    pub fn recompute(&mut self) {
        let year = self.year();
        self.scored = score_store(&self.store, &self.weights);
        self.view = DashboardView {
            year,
            field: self.field,
            ranking: rank(&self.scored, year, self.field),
            distribution: distribution(&self.scored, year, self.field),
        };
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.view.ranking.len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            match self.table_state.selected() {
                Some(i) if i >= len => self.table_state.select(Some(len - 1)),
                None => self.table_state.select(Some(0)),
                _ => {}
            }
        }
    }

    pub fn next_row(&mut self) {
        let len = self.view.ranking.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.view.ranking.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    pub fn selected_entry(&self) -> Option<&RankingEntry> {
        self.table_state
            .selected()
            .and_then(|i| self.view.ranking.get(i))
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn year_forward(&mut self) {
        if self.year_idx + 1 < self.years.len() {
            self.year_idx += 1;
            self.recompute();
        }
    }

    pub fn year_back(&mut self) {
        if self.year_idx > 0 {
            self.year_idx -= 1;
            self.recompute();
        }
    }

    pub fn toggle_field(&mut self) {
        self.field = self.field.toggle();
        self.recompute();
        self.show_flash(format!("Score field: {}", self.field.label()));
    }

    pub fn current_factor(&self) -> Factor {
        Factor::ALL[self.selected_factor]
    }

    pub fn select_next_factor(&mut self) {
        self.selected_factor = (self.selected_factor + 1) % Factor::ALL.len();
    }

    pub fn select_previous_factor(&mut self) {
        self.selected_factor =
            (self.selected_factor + Factor::ALL.len() - 1) % Factor::ALL.len();
    }

    pub fn adjust_selected_weight(&mut self, direction: f64) {
        self.weights
            .adjust(self.current_factor(), direction * WEIGHT_STEP);
        self.recompute();
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        self.weights = preset.weights();
        self.recompute();
        self.show_flash(format!("Preset: {}", preset.name()));
    }

    /// Toggle the selected country in/out of the trend selection (capped).
    pub fn toggle_trend_country(&mut self) {
        let country = match self.selected_entry() {
            Some(entry) => entry.country.clone(),
            None => return,
        };
        if let Some(pos) = self.trend_countries.iter().position(|c| *c == country) {
            self.trend_countries.remove(pos);
            self.show_flash(format!("Removed from trends: {}", country));
        } else if self.trend_countries.len() >= MAX_TREND_COUNTRIES {
            self.show_flash(format!(
                "Trend selection is full ({} countries)",
                MAX_TREND_COUNTRIES
            ));
        } else {
            self.trend_countries.push(country.clone());
            self.show_flash(format!("Added to trends: {}", country));
        }
    }

    pub fn trend_series(&self) -> Vec<TrendSeries> {
        trend(&self.scored, &self.trend_countries, self.field)
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::types::test_record;

    fn sample_app() -> App {
        let (store, _) = RecordStore::from_records(vec![
            test_record("A", 2020, 6.0),
            test_record("B", 2020, 5.0),
            test_record("A", 2021, 6.5),
            test_record("B", 2021, 5.5),
        ]);
        App::new(store, WeightProfile::default(), ScoreField::Personalized)
    }

    #[test]
    fn test_starts_at_latest_year() {
        let app = sample_app();
        assert_eq!(app.year(), 2021);
        assert_eq!(app.view.ranking.len(), 2);
    }

    #[test]
    fn test_year_navigation_clamps() {
        let mut app = sample_app();
        app.year_forward();
        assert_eq!(app.year(), 2021);
        app.year_back();
        assert_eq!(app.year(), 2020);
        app.year_back();
        assert_eq!(app.year(), 2020);
    }

    #[test]
    fn test_tab_cycle() {
        let mut app = sample_app();
        assert_eq!(app.tab, Tab::Rankings);
        app.next_tab();
        assert_eq!(app.tab, Tab::Distribution);
        app.next_tab();
        assert_eq!(app.tab, Tab::Trends);
        app.next_tab();
        assert_eq!(app.tab, Tab::Rankings);
    }

    #[test]
    fn test_field_toggle_recomputes_view() {
        let mut app = sample_app();
        app.toggle_field();
        assert_eq!(app.field, ScoreField::Original);
        assert_eq!(app.view.field, ScoreField::Original);
    }

    #[test]
    fn test_weight_adjustment_clamps_and_recomputes() {
        let mut app = sample_app();
        let factor = app.current_factor();
        for _ in 0..30 {
            app.adjust_selected_weight(1.0);
        }
        assert_eq!(app.weights.get(factor), 100.0);
        for _ in 0..30 {
            app.adjust_selected_weight(-1.0);
        }
        assert_eq!(app.weights.get(factor), 0.0);
    }

    #[test]
    fn test_factor_selection_wraps() {
        let mut app = sample_app();
        app.select_previous_factor();
        assert_eq!(app.selected_factor, Factor::ALL.len() - 1);
        app.select_next_factor();
        assert_eq!(app.selected_factor, 0);
    }

    #[test]
    fn test_row_navigation_wraps() {
        let mut app = sample_app();
        assert_eq!(app.table_state.selected(), Some(0));
        app.next_row();
        assert_eq!(app.table_state.selected(), Some(1));
        app.next_row();
        assert_eq!(app.table_state.selected(), Some(0));
        app.previous_row();
        assert_eq!(app.table_state.selected(), Some(1));
    }

    #[test]
    fn test_trend_selection_toggles_and_caps() {
        let mut app = sample_app();
        app.toggle_trend_country();
        assert_eq!(app.trend_countries.len(), 1);
        // Toggling the same country removes it
        app.toggle_trend_country();
        assert!(app.trend_countries.is_empty());
    }

    #[test]
    fn test_preset_application() {
        let mut app = sample_app();
        app.apply_preset(Preset::Wealth);
        assert_eq!(app.weights.get(Factor::GdpPerCapita), 40.0);
        assert!(app.flash_message.is_some());
    }
}
