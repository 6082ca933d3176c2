use yomu_types::{PageResult, Source};

/// Everything the front-end needs to draw the reader
#[derive(Debug, Clone, Default)]
pub struct ReaderState {
    pub source: Option<Source>,
    pub current_page: usize,
    /// Page currently on screen. Stays in place while a newer fetch is pending or failed
    pub page: Option<PageResult>,
    /// Index of `page`, which lags `current_page` until the new page arrives
    pub displayed_page: Option<usize>,
    /// Character count of the whole source, fixed by the first response
    pub total_length: usize,
    pub loading: bool,
    pub last_error: Option<String>,
}

impl ReaderState {
    /// Number of pages at the given page size, at least one
    pub fn page_count(&self, page_size: usize) -> usize {
        self.total_length.div_ceil(page_size.max(1)).max(1)
    }

    pub fn has_next(&self, page_size: usize) -> bool {
        (self.current_page + 1) * page_size < self.total_length
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 0
    }

    /// Page number for the header: the one being loaded, else the one on screen
    pub fn shown_page(&self) -> usize {
        if self.loading {
            self.current_page
        } else {
            self.displayed_page.unwrap_or(self.current_page)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        let state = ReaderState {
            total_length: 2500,
            ..Default::default()
        };
        assert_eq!(state.page_count(1000), 3);
        assert_eq!(ReaderState::default().page_count(1000), 1);
    }

    #[test]
    fn navigation_bounds() {
        let mut state = ReaderState {
            total_length: 2500,
            ..Default::default()
        };
        assert!(!state.has_prev());
        assert!(state.has_next(1000));

        state.current_page = 2;
        assert!(state.has_prev());
        assert!(!state.has_next(1000));
    }

    #[test]
    fn shown_page_follows_what_is_on_screen() {
        let mut state = ReaderState {
            current_page: 1,
            displayed_page: Some(0),
            loading: true,
            ..Default::default()
        };
        assert_eq!(state.shown_page(), 1);

        state.loading = false;
        assert_eq!(state.shown_page(), 0);

        state.displayed_page = None;
        assert_eq!(state.shown_page(), 1);
    }
}
