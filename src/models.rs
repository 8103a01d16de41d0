use serde::Deserialize;

use crate::entities::movie;

pub const PAGE_SIZE: u64 = 20;

/// Query string shared by the listing's GET and POST handlers.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub search: Option<String>,
    pub action: Option<String>,
    pub id: Option<String>,
}

impl ListQuery {
    pub fn params(&self) -> ListParams {
        ListParams::new(self.page.as_deref(), self.search.as_deref())
    }

    pub fn action(&self) -> Option<Action> {
        match self.action.as_deref()? {
            "delete_all" => Some(Action::DeleteAll),
            "random_all" => Some(Action::RandomAll),
            _ => None,
        }
    }

    pub fn detail_id(&self) -> Option<i32> {
        self.id.as_deref()?.trim().parse().ok()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    DeleteAll,
    RandomAll,
}

/// Fields posted by the bulk-action scripts and the detail view's delete form.
#[derive(Debug, Default, Deserialize)]
pub struct ActionForm {
    pub delete_movies: Option<String>,
    pub random_movies: Option<String>,
    pub delete_movie: Option<String>,
    pub movie_id: Option<String>,
}

impl ActionForm {
    pub fn single_delete_id(&self) -> Option<i32> {
        self.delete_movie.as_ref()?;
        self.movie_id.as_deref()?.trim().parse().ok()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListParams {
    pub page: u64,
    pub search: String,
}

impl ListParams {
    pub fn new(page: Option<&str>, search: Option<&str>) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .map_or(1, u64::from);
        let search = search.map(str::trim).unwrap_or_default().to_string();
        Self { page, search }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) * PAGE_SIZE
    }

    /// Lowercased search term, or `None` when no search was requested.
    pub fn needle(&self) -> Option<String> {
        if self.search.is_empty() { None } else { Some(fold_case(&self.search)) }
    }
}

/// Unicode lowercase used on both sides of a search comparison.
pub fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

/// Plain substring test: `%` and `_` in the term have no special meaning.
pub fn matches_search(needle: &str, fields: &[&str]) -> bool {
    fields.iter().any(|f| fold_case(f).contains(needle))
}

#[derive(Clone, Debug, PartialEq)]
pub struct MovieSummary {
    pub id: i32,
    pub name: String,
    pub tag: String,
    pub lang: String,
    pub year: String,
}

impl From<movie::Model> for MovieSummary {
    fn from(m: movie::Model) -> Self {
        Self { id: m.vod_id, name: m.vod_name, tag: m.vod_tag, lang: m.vod_lang, year: m.vod_year }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MoviePage {
    pub movies: Vec<MovieSummary>,
    pub total: u64,
    pub total_pages: u64,
    pub page: u64,
    pub offset: u64,
}

impl MoviePage {
    pub fn new(params: &ListParams, total: u64, movies: Vec<MovieSummary>) -> Self {
        Self {
            movies,
            total,
            total_pages: total.div_ceil(PAGE_SIZE),
            page: params.page,
            offset: params.offset(),
        }
    }

    /// Pages shown around the current one: two either side, clipped to the range.
    /// A page past the end is anchored on the last page.
    pub fn window(&self) -> (u64, u64) {
        let anchor = self.page.min(self.total_pages.max(1));
        let start = anchor.saturating_sub(2).max(1);
        let end = (anchor + 2).min(self.total_pages);
        (start, end)
    }

    /// Target of the "Previous" link, never past the last page.
    pub fn previous_page(&self) -> Option<u64> {
        (self.page > 1).then(|| (self.page - 1).min(self.total_pages.max(1)))
    }

    pub fn first_shown(&self) -> u64 {
        self.offset + 1
    }

    pub fn last_shown(&self) -> u64 {
        (self.offset + PAGE_SIZE).min(self.total)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

#[derive(Debug, thiserror::Error)]
pub enum IdListError {
    #[error("id list is not a JSON array of ids: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("id list is empty")]
    Empty,
    /// Offending element, as it appeared in the list.
    #[error("invalid movie id {0:?}")]
    InvalidId(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

/// Non-empty, de-duplicated set of positive record IDs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdList(Vec<i32>);

impl IdList {
    /// Decodes a JSON array such as `[3, 7, "19"]`. Any element that is not a
    /// positive integer rejects the whole list.
    pub fn parse(raw: &str) -> Result<Self, IdListError> {
        let items: Vec<RawId> = serde_json::from_str(raw)?;
        let mut ids: Vec<i32> = Vec::with_capacity(items.len());
        for item in items {
            let (id, element) = match item {
                RawId::Number(n) => (i32::try_from(n).ok().filter(|n| *n > 0), n.to_string()),
                RawId::Text(s) => {
                    let id = if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                        None
                    } else {
                        s.parse::<i32>().ok().filter(|n| *n > 0)
                    };
                    (id, s)
                },
            };
            let Some(id) = id else {
                return Err(IdListError::InvalidId(element));
            };
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        if ids.is_empty() {
            return Err(IdListError::Empty);
        }
        Ok(Self(ids))
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_and_digit_strings() {
        let ids = IdList::parse(r#"[3, "7", 19, 3]"#).unwrap();
        assert_eq!(ids.as_slice(), &[3, 7, 19]);
    }

    #[test]
    fn rejects_whole_batch_on_bad_element() {
        assert!(matches!(IdList::parse(r#"[1, "x2"]"#), Err(IdListError::InvalidId(ref e)) if e == "x2"));
        assert!(matches!(IdList::parse("[1, -4]"), Err(IdListError::InvalidId(ref e)) if e == "-4"));
        assert!(matches!(IdList::parse("[1, 0]"), Err(IdListError::InvalidId(_))));
        assert!(matches!(IdList::parse("[1, 99999999999]"), Err(IdListError::InvalidId(_))));
        assert!(matches!(IdList::parse("[1.5]"), Err(IdListError::Malformed(_))));
        assert!(matches!(IdList::parse("[null]"), Err(IdListError::Malformed(_))));
    }

    #[test]
    fn rejects_non_arrays_and_empty_lists() {
        assert!(matches!(IdList::parse("not json"), Err(IdListError::Malformed(_))));
        assert!(matches!(IdList::parse(r#"{"id": 1}"#), Err(IdListError::Malformed(_))));
        assert!(matches!(IdList::parse("[]"), Err(IdListError::Empty)));
    }

    #[test]
    fn list_params_default_and_clamp_page() {
        assert_eq!(ListParams::new(None, None).page, 1);
        assert_eq!(ListParams::new(Some("0"), None).page, 1);
        assert_eq!(ListParams::new(Some("-3"), None).page, 1);
        assert_eq!(ListParams::new(Some("abc"), None).page, 1);
        assert_eq!(ListParams::new(Some("4"), None).offset(), 60);
    }

    #[test]
    fn search_is_trimmed_and_wrapped() {
        let p = ListParams::new(None, Some("  Matrix "));
        assert_eq!(p.search, "Matrix");
        assert_eq!(p.needle().as_deref(), Some("matrix"));
        assert_eq!(ListParams::new(None, Some("   ")).needle(), None);
    }

    #[test]
    fn search_folds_unicode_case_and_keeps_wildcards_literal() {
        let needle = ListParams::new(None, Some("ĐẤU phá")).needle().unwrap();
        assert!(matches_search(&needle, &["Đấu Phá Thương Khung", "", ""]));
        assert!(!matches_search(&needle, &["Dau Pha", "dau-pha", ""]));

        assert!(matches_search("%", &["100% Wolf", "", ""]));
        assert!(!matches_search("%", &["Plain", "plain", "Plain"]));
        assert!(!matches_search("a_b", &["axb", "", ""]));
        assert!(matches_search("a_b", &["", "a_b", ""]));
    }

    #[test]
    fn page_arithmetic() {
        let params = ListParams::new(Some("2"), None);
        let page = MoviePage::new(&params, 25, Vec::new());
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.first_shown(), 21);
        assert_eq!(page.last_shown(), 25);
        assert_eq!(page.window(), (1, 2));

        let empty = MoviePage::new(&ListParams::new(None, None), 0, Vec::new());
        assert_eq!(empty.total_pages, 0);

        let mid = MoviePage::new(&ListParams::new(Some("10"), None), 400, Vec::new());
        assert_eq!(mid.window(), (8, 12));
        assert_eq!(mid.previous_page(), Some(9));

        let past = MoviePage::new(&ListParams::new(Some("9"), None), 25, Vec::new());
        assert_eq!(past.window(), (1, 2));
        assert_eq!(past.previous_page(), Some(2));

        let past_empty = MoviePage::new(&ListParams::new(Some("5"), None), 3, Vec::new());
        assert_eq!(past_empty.window(), (1, 1));
        assert_eq!(past_empty.previous_page(), Some(1));
        assert_eq!(MoviePage::new(&ListParams::new(None, None), 3, Vec::new()).previous_page(), None);
    }

    #[test]
    fn single_delete_needs_both_fields() {
        let form = ActionForm { movie_id: Some("5".into()), ..Default::default() };
        assert_eq!(form.single_delete_id(), None);
        let form = ActionForm {
            delete_movie: Some(String::new()),
            movie_id: Some("5".into()),
            ..Default::default()
        };
        assert_eq!(form.single_delete_id(), Some(5));
    }
}
