use crate::config::PreviewConfig;

pub const WAITING_TEXT: &str = "Waiting for preview...";
pub const EMPTY_TEXT: &str = "No preview available.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewLayout {
    Waiting,
    Empty,
    Single,
    Grid { columns: usize },
}

impl PreviewLayout {
    pub fn for_count(count: usize, container_width: f64, config: &PreviewConfig) -> Self {
        match count {
            0 => PreviewLayout::Empty,
            1 => PreviewLayout::Single,
            _ => PreviewLayout::Grid {
                columns: grid_columns(
                    container_width,
                    config.min_cell_width,
                    config.gap,
                    config.max_columns,
                    count,
                ),
            },
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            PreviewLayout::Waiting => Some(WAITING_TEXT),
            PreviewLayout::Empty => Some(EMPTY_TEXT),
            _ => None,
        }
    }
}

/// What a widget is showing: the last payloads and the layout they were
/// rendered with. Kept so a resize can lay the same payloads out again.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewState {
    previews: Option<Vec<String>>,
    layout: PreviewLayout,
}

impl Default for PreviewState {
    fn default() -> Self {
        Self {
            previews: None,
            layout: PreviewLayout::Waiting,
        }
    }
}

impl PreviewState {
    pub fn previews(&self) -> Option<&[String]> {
        self.previews.as_deref()
    }

    pub fn layout(&self) -> PreviewLayout {
        self.layout
    }

    pub fn set_previews(
        &mut self,
        previews: Option<Vec<String>>,
        container_width: f64,
        config: &PreviewConfig,
    ) -> PreviewLayout {
        let count = previews.as_ref().map_or(0, Vec::len);
        self.layout = PreviewLayout::for_count(count, container_width, config);
        self.previews = previews;
        self.layout
    }

    /// Recomputes the layout for a new width. Returns the new layout only
    /// when it differs from the current one.
    pub fn relayout(
        &mut self,
        container_width: f64,
        config: &PreviewConfig,
    ) -> Option<PreviewLayout> {
        if self.layout == PreviewLayout::Waiting {
            return None;
        }
        let count = self.previews.as_ref().map_or(0, Vec::len);
        let layout = PreviewLayout::for_count(count, container_width, config);
        if layout == self.layout {
            return None;
        }
        self.layout = layout;
        Some(layout)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Columns that fit `container_width` with cells of at least `min_cell_width`
/// plus `gap`, never more than `count` or `max_columns`, never less than one.
pub fn grid_columns(
    container_width: f64,
    min_cell_width: f64,
    gap: f64,
    max_columns: usize,
    count: usize,
) -> usize {
    let cap = count.min(max_columns).max(1);
    if !(container_width.is_finite() && container_width > 0.0) {
        // Not laid out yet.
        let square = (count as f64).sqrt().ceil() as usize;
        return square.clamp(1, cap);
    }

    let cell = (min_cell_width + gap).max(1.0);
    let fit = (container_width / cell).floor() as usize;
    fit.clamp(1, cap)
}

pub fn container_style() -> &'static str {
    "width: 100%; height: 100%; position: relative; overflow: auto; \
     box-sizing: border-box; padding: 0; \
     border: 1px solid var(--border-color, #333); \
     background-color: var(--comfy-input-bg, #222);"
}

pub fn placeholder_style() -> &'static str {
    "display: flex; align-items: center; justify-content: center; \
     width: 100%; height: 100%; box-sizing: border-box; padding: 10px; \
     color: #888; font-size: 14px;"
}

pub fn single_style() -> &'static str {
    "display: flex; align-items: center; justify-content: center; \
     width: 100%; height: 100%; box-sizing: border-box; padding: 2px;"
}

pub fn grid_style(columns: usize, gap: f64) -> String {
    format!(
        "display: grid; grid-template-columns: repeat({}, minmax(0, 1fr)); \
         gap: {}px; padding: {}px; box-sizing: border-box;",
        columns, gap, gap
    )
}

pub fn image_style(layout: PreviewLayout) -> &'static str {
    match layout {
        PreviewLayout::Single => {
            "max-width: 100%; max-height: 100%; object-fit: contain; \
             cursor: pointer; display: block;"
        }
        _ => "width: 100%; height: auto; object-fit: contain; cursor: pointer; display: block;",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod column_tests {
        use super::*;

        #[test]
        fn five_images_in_600px() {
            // min(floor(600 / 104), 5, 8)
            assert_eq!(grid_columns(600.0, 100.0, 4.0, 8, 5), 5);
        }

        #[test]
        fn capped_by_image_count() {
            assert_eq!(grid_columns(2000.0, 80.0, 4.0, 8, 3), 3);
        }

        #[test]
        fn capped_by_max_columns() {
            assert_eq!(grid_columns(2000.0, 80.0, 4.0, 8, 20), 8);
        }

        #[test]
        fn narrow_container_still_gets_one_column() {
            assert_eq!(grid_columns(50.0, 80.0, 4.0, 8, 4), 1);
        }

        #[test]
        fn width_is_floored() {
            // 300 / 84 = 3.57
            assert_eq!(grid_columns(300.0, 80.0, 4.0, 8, 10), 3);
        }

        #[test]
        fn unknown_width_falls_back_to_square_grid() {
            assert_eq!(grid_columns(0.0, 80.0, 4.0, 8, 5), 3);
            assert_eq!(grid_columns(f64::NAN, 80.0, 4.0, 8, 4), 2);
            assert_eq!(grid_columns(-10.0, 80.0, 4.0, 2, 9), 2);
        }

        #[test]
        fn zero_cell_size_does_not_divide_by_zero() {
            assert_eq!(grid_columns(600.0, 0.0, 0.0, 8, 5), 5);
        }
    }

    mod layout_tests {
        use super::*;

        #[test]
        fn zero_images_is_empty() {
            let layout = PreviewLayout::for_count(0, 600.0, &PreviewConfig::default());
            assert_eq!(layout, PreviewLayout::Empty);
            assert_eq!(layout.placeholder(), Some("No preview available."));
        }

        #[test]
        fn one_image_is_single() {
            let layout = PreviewLayout::for_count(1, 600.0, &PreviewConfig::default());
            assert_eq!(layout, PreviewLayout::Single);
            assert!(layout.placeholder().is_none());
        }

        #[test]
        fn several_images_use_config() {
            let config = PreviewConfig {
                min_cell_width: 100.0,
                ..PreviewConfig::default()
            };
            assert_eq!(
                PreviewLayout::for_count(5, 600.0, &config),
                PreviewLayout::Grid { columns: 5 }
            );
        }

        #[test]
        fn waiting_has_placeholder() {
            assert_eq!(PreviewLayout::Waiting.placeholder(), Some("Waiting for preview..."));
        }
    }

    mod state_tests {
        use super::*;

        fn payloads(count: usize) -> Option<Vec<String>> {
            Some((0..count).map(|i| format!("p{}", i)).collect())
        }

        #[test]
        fn starts_waiting_without_previews() {
            let state = PreviewState::default();
            assert_eq!(state.layout(), PreviewLayout::Waiting);
            assert!(state.previews().is_none());
        }

        #[test]
        fn same_payloads_get_new_columns_at_new_width() {
            let config = PreviewConfig::default();
            let mut state = PreviewState::default();
            // 300 / 84 = 3.57
            let layout = state.set_previews(payloads(6), 300.0, &config);
            assert_eq!(layout, PreviewLayout::Grid { columns: 3 });

            // 600 / 84 = 7.14, capped by six images
            assert_eq!(state.relayout(600.0, &config), Some(PreviewLayout::Grid { columns: 6 }));
            assert_eq!(state.layout(), PreviewLayout::Grid { columns: 6 });
            assert_eq!(state.previews().map(<[String]>::len), Some(6));
        }

        #[test]
        fn relayout_reports_nothing_when_columns_are_unchanged() {
            let config = PreviewConfig::default();
            let mut state = PreviewState::default();
            state.set_previews(payloads(6), 300.0, &config);
            assert_eq!(state.relayout(320.0, &config), None);
        }

        #[test]
        fn single_and_empty_survive_resize() {
            let config = PreviewConfig::default();
            let mut state = PreviewState::default();
            state.set_previews(payloads(1), 300.0, &config);
            assert_eq!(state.relayout(50.0, &config), None);
            assert_eq!(state.layout(), PreviewLayout::Single);

            state.set_previews(None, 300.0, &config);
            assert_eq!(state.relayout(900.0, &config), None);
            assert_eq!(state.layout(), PreviewLayout::Empty);
        }

        #[test]
        fn waiting_is_not_replaced_by_resize() {
            let mut state = PreviewState::default();
            assert_eq!(state.relayout(600.0, &PreviewConfig::default()), None);
            assert_eq!(state.layout(), PreviewLayout::Waiting);
        }

        #[test]
        fn unknown_width_then_real_width() {
            let config = PreviewConfig::default();
            let mut state = PreviewState::default();
            // not laid out yet: ceil(sqrt(4))
            assert_eq!(
                state.set_previews(payloads(4), 0.0, &config),
                PreviewLayout::Grid { columns: 2 }
            );
            assert_eq!(state.relayout(400.0, &config), Some(PreviewLayout::Grid { columns: 4 }));
        }

        #[test]
        fn clear_returns_to_waiting() {
            let config = PreviewConfig::default();
            let mut state = PreviewState::default();
            state.set_previews(payloads(2), 300.0, &config);
            state.clear();
            assert_eq!(state, PreviewState::default());
        }
    }

    mod style_tests {
        use super::*;

        #[test]
        fn grid_style_repeats_columns() {
            let style = grid_style(3, 4.0);
            assert!(style.contains("grid-template-columns: repeat(3, minmax(0, 1fr))"));
            assert!(style.contains("gap: 4px"));
        }

        #[test]
        fn single_image_fits_inside() {
            let style = image_style(PreviewLayout::Single);
            assert!(style.contains("max-width: 100%"));
            assert!(style.contains("object-fit: contain"));
        }

        #[test]
        fn grid_image_fills_cell_width() {
            let style = image_style(PreviewLayout::Grid { columns: 2 });
            assert!(style.contains("width: 100%"));
            assert!(!style.contains("max-height"));
        }
    }
}
