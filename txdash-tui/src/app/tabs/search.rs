use crate::api::{LoadError, Loaded, SearchHits};
use crate::app::dispatch::{FetchRequest, Ticket};
use crate::app::render::Region;
use crate::app::toast::{Timing, Toast};
use crate::types::SearchResult;

use super::{log_load_failure, Effects, TabController};

const MIN_QUERY_CHARS: usize = 2;

/// Edits the search box accepts from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEdit {
    Insert(char),
    Backspace,
    Left,
    Right,
    Home,
    End,
    Clear,
}

/// Contents of the search box. The cursor counts chars, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    text: String,
    cursor: usize,
}

impl QueryInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn apply(&mut self, edit: QueryEdit) {
        let len = self.text.chars().count();
        match edit {
            QueryEdit::Insert(c) => {
                let at = self.byte_offset(self.cursor);
                self.text.insert(at, c);
                self.cursor += 1;
            }
            QueryEdit::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.text.remove(at);
                }
            }
            QueryEdit::Left => self.cursor = self.cursor.saturating_sub(1),
            QueryEdit::Right => self.cursor = (self.cursor + 1).min(len),
            QueryEdit::Home => self.cursor = 0,
            QueryEdit::End => self.cursor = len,
            QueryEdit::Clear => {
                self.text.clear();
                self.cursor = 0;
            }
        }
    }

    /// Text on either side of the cursor, for drawing the caret.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.text.split_at(self.byte_offset(self.cursor))
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

#[derive(Debug, Default)]
pub struct SearchTab {
    pub input: QueryInput,
    /// Last query actually sent; results belong to this query.
    pub query: Option<String>,
    pub results: Vec<SearchResult>,
    /// False until a response for `query` has been applied.
    pub applied: bool,
}

impl SearchTab {
    /// Returns true if a fetch was issued.
    pub fn perform_search(&mut self, query: &str, fx: &mut Effects, ticket: Ticket) -> bool {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return false;
        }

        self.query = Some(query.to_string());
        self.results.clear();
        self.applied = false;
        self.issue(query.to_string(), fx, ticket);
        true
    }

    fn issue(&self, query: String, fx: &mut Effects, ticket: Ticket) {
        fx.renders.mark(Region::SearchResults);
        fx.dispatcher.issue(
            FetchRequest::Search {
                query,
                limit: fx.limits.search_results,
            },
            ticket,
        );
    }

    pub fn submit(&mut self, fx: &mut Effects, ticket: Ticket) -> bool {
        let query = self.input.text().to_string();
        self.perform_search(&query, fx, ticket)
    }

    pub fn edit(&mut self, fx: &mut Effects, edit: QueryEdit) {
        self.input.apply(edit);
        fx.renders.mark(Region::SearchInput);
    }

    pub fn apply(&mut self, requested: &str, result: Loaded<SearchHits>, fx: &mut Effects) {
        if self.query.as_deref() != Some(requested) {
            tracing::debug!(requested, "dropping results for an older query");
            return;
        }

        self.applied = true;
        fx.renders.mark(Region::SearchResults);
        match result {
            Ok(loaded) => {
                let hits = loaded.body;
                fx.toaster.show(Toast::new(
                    format!("Found {} results", hits.count),
                    vec![Timing::new("FT.SEARCH", hits.search_ms)],
                    loaded.roundtrip_ms,
                ));
                self.results = hits.results;
            }
            Err(e) => {
                log_load_failure("search", &e);
                self.results.clear();
                if let LoadError::Backend { roundtrip_ms, .. } = e {
                    fx.toaster.show(Toast::new(
                        "Search not ready",
                        vec![Timing::new("FT.SEARCH", 0.0)],
                        roundtrip_ms,
                    ));
                }
            }
        }
    }
}

impl TabController for SearchTab {
    fn region(&self) -> Region {
        Region::SearchResults
    }

    // A search whose response was discarded while the tab was inactive is
    // sent again; otherwise there is nothing to preload.
    fn mount(&mut self, fx: &mut Effects, ticket: Ticket) {
        fx.renders.mark(Region::SearchInput);
        if let (Some(query), false) = (&self.query, self.applied) {
            tracing::debug!(query, "resending unanswered search");
            self.issue(query.clone(), fx, ticket);
        }
    }

    fn clear_selection(&mut self) {}
}
