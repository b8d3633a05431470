use std::collections::{HashMap, HashSet};

use ratatui::widgets::ListState;

use crate::source::Article;
use crate::state::NewsType;

/// Work the UI asks the event loop to hand to the state holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load { mode: NewsType, query: Option<String> },
    Save(Article),
    Delete(Article),
}

/// Results delivered back onto the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiMsg {
    /// Answer to a check made for a freshly loaded list.
    Bookmark { url: String, saved: bool },
    /// What the store holds once a bookmark write has finished.
    Settled { url: String, saved: bool },
}

pub struct App {
    /// Latest list published by the state holder, tombstones included.
    pub articles: Vec<Article>,
    /// Bookmark state per article URL.
    bookmarks: HashMap<String, bool>,
    /// URLs toggled by the user whose store write has not settled yet.
    pending: HashSet<String>,
    /// List selection state for scrolling.
    pub list_state: ListState,
    /// Active tab.
    pub mode: NewsType,
    /// Search query being typed or last submitted.
    pub query: String,
    /// Whether keystrokes go to the search bar.
    pub editing: bool,
    /// Whether the detail view is open for the selected article.
    pub show_detail: bool,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Last status message.
    pub status: String,
}

impl App {
    pub fn new() -> Self {
        Self {
            articles: Vec::new(),
            bookmarks: HashMap::new(),
            pending: HashSet::new(),
            list_state: ListState::default(),
            mode: NewsType::Breaking,
            query: String::new(),
            editing: false,
            show_detail: false,
            quit: false,
            status: "Starting…".into(),
        }
    }

    /// Replace the list with a fresh snapshot from the state holder.
    ///
    /// Bookmark flags are dropped; the caller re-checks them for the new
    /// list.
    pub fn set_articles(&mut self, articles: Vec<Article>) {
        self.articles = articles;
        self.bookmarks.clear();
        self.show_detail = false;
        let first = if self.visible_len() == 0 { None } else { Some(0) };
        self.list_state.select(first);
        self.status = format!("{} articles", self.visible_len());
    }

    /// Articles that may be displayed: provider tombstones are hidden.
    pub fn visible_articles(&self) -> Vec<&Article> {
        self.articles.iter().filter(|a| !a.is_removed()).collect()
    }

    fn visible_len(&self) -> usize {
        self.articles.iter().filter(|a| !a.is_removed()).count()
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.list_state
            .selected()
            .and_then(|i| self.visible_articles().get(i).copied())
    }

    pub fn is_saved(&self, url: &str) -> bool {
        self.bookmarks.get(url).copied().unwrap_or(false)
    }

    pub fn apply(&mut self, msg: UiMsg) {
        match msg {
            // A check may have read the store before the user's write landed.
            UiMsg::Bookmark { url, .. } if self.pending.contains(&url) => {}
            UiMsg::Bookmark { url, saved } => {
                self.bookmarks.insert(url, saved);
            }
            UiMsg::Settled { url, saved } => {
                self.pending.remove(&url);
                self.bookmarks.insert(url, saved);
            }
        }
    }

    /// Flip the bookmark on the selected article.
    ///
    /// The indicator changes immediately; the returned command performs the
    /// store write.  Check answers for the URL are ignored until the write
    /// reports back through [`UiMsg::Settled`].
    pub fn toggle_bookmark(&mut self) -> Option<Command> {
        let article = self.selected_article()?.clone();
        self.pending.insert(article.url.clone());
        if self.is_saved(&article.url) {
            self.bookmarks.insert(article.url.clone(), false);
            self.status = "Removed bookmark".into();
            Some(Command::Delete(article))
        } else {
            self.bookmarks.insert(article.url.clone(), true);
            self.status = "Saved for offline reading".into();
            Some(Command::Save(article))
        }
    }

    // -- tabs ----------------------------------------------------------------

    /// Switch to `mode` and ask for its list.
    pub fn select_tab(&mut self, mode: NewsType) -> Command {
        self.mode = mode;
        self.editing = false;
        self.show_detail = false;
        self.reload()
    }

    pub fn next_tab(&mut self) -> Command {
        let i = self.tab_index();
        self.select_tab(NewsType::ALL[(i + 1) % NewsType::ALL.len()])
    }

    pub fn previous_tab(&mut self) -> Command {
        let i = self.tab_index();
        let len = NewsType::ALL.len();
        self.select_tab(NewsType::ALL[(i + len - 1) % len])
    }

    pub fn tab_index(&self) -> usize {
        NewsType::ALL
            .iter()
            .position(|m| *m == self.mode)
            .unwrap_or(0)
    }

    /// Load command for the active tab.
    pub fn reload(&mut self) -> Command {
        self.status = format!("Loading {}…", self.mode.title().to_lowercase());
        let query = match self.mode {
            NewsType::Search => Some(self.query.clone()),
            _ => None,
        };
        Command::Load {
            mode: self.mode,
            query,
        }
    }

    // -- search --------------------------------------------------------------

    pub fn start_search(&mut self) {
        self.mode = NewsType::Search;
        self.editing = true;
        self.show_detail = false;
    }

    pub fn submit_search(&mut self) -> Command {
        self.editing = false;
        self.reload()
    }

    /// Empty the query and search for everything the provider returns for
    /// an empty query.
    pub fn clear_search(&mut self) -> Command {
        self.query.clear();
        self.editing = false;
        self.reload()
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.visible_len() == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if self.visible_len() > 0 {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.visible_len();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail && self.selected_article().is_some();
    }
}
