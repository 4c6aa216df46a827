//! The page a library render writes into.
//!
//! The pipeline never touches markup containers directly. It talks to a
//! [`PageSink`], which knows which containers the page has (`#grid`,
//! `#list`) and where the item count and debug panel go. [`StaticPage`] is
//! the sink behind the command line: it collects the results and is later
//! turned into a full HTML document by [`crate::generate::render_document`].

use crate::filter::SearchQuery;
use maud::Markup;

/// Element ids that can receive the item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Grid,
    List,
}

impl Container {
    pub fn id(&self) -> &'static str {
        match self {
            Container::Grid => "grid",
            Container::List => "list",
        }
    }
}

/// Query-string parameters of the page being rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    /// Raw `q` value as typed by the user.
    pub search_text: String,
    /// `debug` was present, with any value.
    pub debug: bool,
}

impl PageQuery {
    /// Parse a query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut search_text = None;
        let mut debug = false;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "q" if search_text.is_none() => search_text = Some(value.into_owned()),
                "debug" => debug = true,
                _ => {}
            }
        }
        PageQuery {
            search_text: search_text.unwrap_or_default(),
            debug,
        }
    }

    pub fn search(&self) -> SearchQuery {
        SearchQuery::new(&self.search_text)
    }
}

/// Output side of a render.
pub trait PageSink {
    /// The container to render into: `#grid` if the page has one, else
    /// `#list`, else none.
    fn container(&self) -> Option<Container>;

    /// Replace the container's contents with the rendered items.
    fn render_items(&mut self, container: Container, markup: Markup);

    /// Update the `#count` label.
    fn set_count(&mut self, count: usize);

    /// Replace the container's contents with an inline error.
    fn show_error(&mut self, container: Container, message: &str);

    /// Show the floating debug panel.
    fn show_debug(&mut self, text: &str);
}

/// What ended up in the container.
#[derive(Debug, Clone)]
pub enum ContainerContent {
    Empty,
    Items(Markup),
    Error(String),
}

/// In-memory page, later rendered as a standalone HTML document.
#[derive(Debug, Clone)]
pub struct StaticPage {
    pub has_grid: bool,
    pub has_list: bool,
    pub content: ContainerContent,
    pub count: Option<usize>,
    pub debug: Option<String>,
}

impl StaticPage {
    /// A page with exactly one container of the given kind.
    pub fn with_container(container: Container) -> Self {
        Self {
            has_grid: container == Container::Grid,
            has_list: container == Container::List,
            ..Self::bare()
        }
    }

    /// A page with no container at all.
    pub fn bare() -> Self {
        Self {
            has_grid: false,
            has_list: false,
            content: ContainerContent::Empty,
            count: None,
            debug: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.content {
            ContainerContent::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl PageSink for StaticPage {
    fn container(&self) -> Option<Container> {
        if self.has_grid {
            Some(Container::Grid)
        } else if self.has_list {
            Some(Container::List)
        } else {
            None
        }
    }

    fn render_items(&mut self, _container: Container, markup: Markup) {
        self.content = ContainerContent::Items(markup);
    }

    fn set_count(&mut self, count: usize) {
        self.count = Some(count);
    }

    fn show_error(&mut self, _container: Container, message: &str) {
        self.content = ContainerContent::Error(message.to_string());
    }

    fn show_debug(&mut self, text: &str) {
        self.debug = Some(text.to_string());
    }
}
