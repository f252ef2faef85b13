//! Page content and the page indicator carried in titles.

/// One field of a page.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// One unit of paginated display content.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Page {
    pub title: Option<String>,
    pub description: Option<String>,
    pub fields: Vec<PageField>,
    pub footer: Option<String>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(PageField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}

/// The ` (Page i/N)` suffix for a zero-based page index.
pub fn page_indicator(index: usize, total: usize) -> String {
    format!(" (Page {}/{})", index + 1, total)
}

/// Title with the page indicator appended once.
///
/// A title that already carries the indicator is returned unchanged, and a
/// missing title becomes the bare indicator.
pub fn indicator_title(title: Option<&str>, index: usize, total: usize) -> String {
    let indicator = page_indicator(index, total);

    match title {
        Some(title) if !title.is_empty() => {
            if title.contains(&indicator) {
                title.to_owned()
            } else {
                format!("{title}{indicator}")
            }
        }
        _ => indicator,
    }
}
