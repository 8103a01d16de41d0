use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::{
    entities::movie,
    models::{ListParams, MoviePage, Notice},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const BUTTON: &str = "text-white font-medium py-2 px-6 rounded-lg focus:outline-none focus:ring-2 focus:ring-offset-2";
const TH: &str = "px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider";
const TD: &str = "px-6 py-4 whitespace-nowrap text-sm text-gray-900";
const PAGE_LINK: &str = "relative inline-flex items-center px-4 py-2 border border-gray-300 bg-white text-sm font-medium text-gray-700 hover:bg-gray-50";
const PAGE_GAP: &str = "relative inline-flex items-center px-4 py-2 border border-gray-300 bg-white text-sm font-medium text-gray-700";
const PAGE_CURRENT: &str = "relative inline-flex items-center px-4 py-2 border border-blue-500 bg-blue-50 text-sm font-medium text-blue-600";

const SCRIPT: &str = r#"
function listUrl() { return document.body.dataset.listUrl || '/'; }

function postIds(field, ids) {
    const form = document.createElement('form');
    form.method = 'POST';
    form.action = listUrl();
    const input = document.createElement('input');
    input.type = 'hidden';
    input.name = field;
    input.value = JSON.stringify(ids.map(Number));
    form.appendChild(input);
    document.body.appendChild(form);
    form.submit();
}

function selectedIds() {
    return Array.from(document.querySelectorAll('.movie-checkbox:checked')).map(cb => cb.value);
}

function confirmDeleteAll() {
    if (confirm('Delete ALL movies? This cannot be undone.')) {
        window.location.href = '/?action=delete_all';
    }
}

function confirmRandomAll() {
    if (confirm('Randomize stats for every movie?')) {
        window.location.href = '/?action=random_all';
    }
}

function deleteMovie(id) {
    if (confirm('Delete this movie?')) { postIds('delete_movies', [id]); }
}

function deleteSelected() {
    const ids = selectedIds();
    if (ids.length === 0) { alert('Select at least one movie to delete.'); return; }
    if (confirm(`Delete ${ids.length} selected movies?`)) { postIds('delete_movies', ids); }
}

function randomSelected() {
    const ids = selectedIds();
    if (ids.length === 0) { alert('Select at least one movie to randomize.'); return; }
    if (confirm(`Randomize stats for ${ids.length} selected movies?`)) { postIds('random_movies', ids); }
}

function toggleBulkActions() {
    document.querySelectorAll('.bulk-cell').forEach(cell => cell.classList.toggle('hidden'));
}

document.addEventListener('DOMContentLoaded', () => {
    const all = document.getElementById('selectAll');
    if (all) {
        all.addEventListener('change', () => {
            document.querySelectorAll('.movie-checkbox').forEach(cb => { cb.checked = all.checked; });
        });
    }
});
"#;

/// Everything the listing page shows for one request.
pub struct ListingView<'a> {
    pub params: &'a ListParams,
    pub page: &'a MoviePage,
    pub notices: &'a [Notice],
    pub detail: Option<&'a movie::Model>,
}

pub fn listing_page(view: &ListingView<'_>) -> String {
    let list_url = list_url(view.params.page, &view.params.search);

    page(
        "Movie management",
        &list_url,
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-6xl mx-auto px-6 py-10" {
                    (header())
                    (search_form(&view.params.search))
                    @for notice in view.notices {
                        (notice_banner(notice))
                    }
                    div class="bg-white rounded-lg shadow-sm overflow-hidden" {
                        (movie_table(view.page, &view.params.search))
                        (pagination(view.page, &view.params.search))
                    }
                    @if let Some(movie) = view.detail {
                        (detail_modal(movie, &list_url))
                    }
                }
            }
        },
    )
}

pub fn error_page(message: &str) -> String {
    page(
        "Error",
        "/",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

pub fn list_url(page: u64, search: &str) -> String {
    if search.is_empty() {
        format!("/?page={page}")
    } else {
        format!("/?page={page}&search={}", urlencoding::encode(search))
    }
}

fn page(title: &str, list_url: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body data-list-url=(list_url) {
                (body)
                script { (PreEscaped(SCRIPT)) }
            }
        }
    }
    .into_string()
}

fn header() -> Markup {
    html! {
        div class="mb-6 flex justify-between items-center" {
            div {
                h1 class="text-2xl font-bold text-gray-800" { "Movie management" }
                p class="text-gray-600" { "Imported movie catalog" }
            }
            div class="flex space-x-2" {
                button type="button" onclick="confirmRandomAll()" class=(format!("bg-purple-600 hover:bg-purple-700 focus:ring-purple-500 {BUTTON}")) { "Randomize all" }
                button type="button" onclick="confirmDeleteAll()" class=(format!("bg-red-600 hover:bg-red-700 focus:ring-red-500 {BUTTON}")) { "Delete all" }
                button type="button" onclick="toggleBulkActions()" class=(format!("bg-yellow-600 hover:bg-yellow-700 focus:ring-yellow-500 {BUTTON}")) { "Select multiple" }
            }
        }
    }
}

fn search_form(search: &str) -> Markup {
    html! {
        form class="mb-4 flex gap-2" method="get" action="/" {
            input class="flex-1 rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" type="search" name="search" value=(search) placeholder="Search by name, slug or English name";
            button class=(format!("bg-blue-600 hover:bg-blue-700 focus:ring-blue-500 {BUTTON}")) type="submit" { "Search" }
        }
    }
}

fn notice_banner(notice: &Notice) -> Markup {
    let (class, message) = match notice {
        Notice::Success(m) => ("bg-green-100 border-l-4 border-green-500 text-green-700 p-4 mb-4 notice-success", m),
        Notice::Error(m) => ("bg-red-100 border-l-4 border-red-500 text-red-700 p-4 mb-4 notice-error", m),
    };
    html! {
        div class=(class) { p { (message) } }
    }
}

fn movie_table(page: &MoviePage, search: &str) -> Markup {
    html! {
        div class="overflow-x-auto" {
            table class="min-w-full divide-y divide-gray-200" {
                thead class="bg-gray-50" {
                    tr {
                        th class=(format!("bulk-cell hidden {TH}")) { input type="checkbox" id="selectAll"; }
                        th class=(TH) { "ID" }
                        th class=(TH) { "Name" }
                        th class=(TH) { "Tags" }
                        th class=(TH) { "Language" }
                        th class=(TH) { "Year" }
                        th class=(TH) { "Details" }
                        th class=(TH) {
                            span class="bulk-cell hidden" {
                                button type="button" onclick="randomSelected()" class="bg-purple-600 hover:bg-purple-700 text-white text-xs font-medium py-1 px-3 rounded mr-2" { "Randomize selected" }
                                button type="button" onclick="deleteSelected()" class="bg-red-600 hover:bg-red-700 text-white text-xs font-medium py-1 px-3 rounded" { "Delete selected" }
                            }
                        }
                    }
                }
                tbody class="bg-white divide-y divide-gray-200" {
                    @if page.movies.is_empty() {
                        tr {
                            td colspan="8" class="px-6 py-4 text-center text-gray-500" { "No movies found." }
                        }
                    } @else {
                        @for m in &page.movies {
                            tr class="hover:bg-gray-50" {
                                td class=(format!("bulk-cell hidden {TD}")) {
                                    input type="checkbox" class="movie-checkbox" value=(m.id);
                                }
                                td class=(TD) { (m.id) }
                                td class=(TD) { (m.name) }
                                td class=(TD) { (m.tag) }
                                td class=(TD) { (m.lang) }
                                td class=(TD) { (m.year) }
                                td class="px-6 py-4 whitespace-nowrap text-sm font-medium" {
                                    a class="text-blue-600 hover:text-blue-900" href=(detail_url(page.page, search, m.id)) { "Details" }
                                }
                                td class="px-6 py-4 whitespace-nowrap text-sm font-medium" {
                                    button type="button" class="text-red-600 hover:text-red-900" onclick=(format!("deleteMovie({})", m.id)) { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn pagination(page: &MoviePage, search: &str) -> Markup {
    if page.total_pages <= 1 && page.page <= 1 {
        return html! {};
    }
    let (start, end) = page.window();

    html! {
        nav class="bg-white px-4 py-3 flex items-center justify-between border-t border-gray-200 sm:px-6" aria-label="Pagination" {
            div {
                @if !page.movies.is_empty() {
                    p class="text-sm text-gray-700" {
                        "Showing " span class="font-medium" { (page.first_shown()) }
                        " to " span class="font-medium" { (page.last_shown()) }
                        " of " span class="font-medium" { (page.total) } " movies"
                    }
                }
            }
            div class="relative z-0 inline-flex rounded-md shadow-sm -space-x-px" {
                @if let Some(prev) = page.previous_page() {
                    a class=(PAGE_LINK) href=(list_url(prev, search)) { "Previous" }
                }
                @if start > 1 {
                    a class=(PAGE_LINK) href=(list_url(1, search)) { "1" }
                    @if start > 2 {
                        span class=(PAGE_GAP) { "..." }
                    }
                }
                @for i in start..=end {
                    @if i == page.page {
                        span class=(PAGE_CURRENT) aria-current="page" { (i) }
                    } @else {
                        a class=(PAGE_LINK) href=(list_url(i, search)) { (i) }
                    }
                }
                @if end < page.total_pages {
                    @if end + 1 < page.total_pages {
                        span class=(PAGE_GAP) { "..." }
                    }
                    a class=(PAGE_LINK) href=(list_url(page.total_pages, search)) { (page.total_pages) }
                }
                @if page.page < page.total_pages {
                    a class=(PAGE_LINK) href=(list_url(page.page + 1, search)) { "Next" }
                }
            }
        }
    }
}

fn detail_modal(m: &movie::Model, close_url: &str) -> Markup {
    html! {
        div id="movieDetailModal" class="fixed inset-0 bg-gray-600 bg-opacity-50 overflow-y-auto h-full w-full z-50" {
            div class="relative top-20 mx-auto p-5 border w-4/5 shadow-lg rounded-md bg-white" {
                div class="flex justify-between items-center mb-4" {
                    h3 class="text-lg font-semibold text-gray-800" { "Movie details: " (m.vod_name) }
                    a href=(close_url) class="text-gray-500 hover:text-gray-700" { "×" }
                }
                div class="grid grid-cols-1 md:grid-cols-2 gap-6" {
                    div {
                        h4 class="text-md font-medium text-gray-700 mb-2" { "Basic information" }
                        div class="bg-gray-50 p-4 rounded-lg" {
                            (field("ID", html! { (m.vod_id) }))
                            (field("Name", html! { (m.vod_name) }))
                            (field("English name", html! { (m.vod_en) }))
                            (field("Slug", html! { (m.vod_sub) }))
                            (field("Tags", html! { (m.vod_tag) }))
                            (field("Class", html! { (m.vod_class) }))
                            (field("Language", html! { (m.vod_lang) }))
                            (field("Year", html! { (m.vod_year) }))
                            (field("Country", html! { (m.vod_area) }))
                            (field("Duration", html! { (m.vod_duration) " min" }))
                        }
                    }
                    div {
                        h4 class="text-md font-medium text-gray-700 mb-2" { "Details" }
                        div class="bg-gray-50 p-4 rounded-lg" {
                            (field("Cast", html! { (m.vod_actor) }))
                            (field("Director", html! { (m.vod_director) }))
                            (field("Writer", html! { (m.vod_writer) }))
                            (field("Post-production", html! { (m.vod_behind) }))
                            (field("Total episodes", html! { (m.vod_total) }))
                            (field("Current episode", html! { (m.vod_remarks) }))
                            (field("Status", status_badge(m.is_complete())))
                            (field("Updated", html! { (format_timestamp(m.vod_time)) }))
                        }
                    }
                }
                (text_block("Synopsis", &m.vod_content))
                (text_block("Short description", &m.vod_blurb))
                div class="mt-6 flex justify-end" {
                    a href=(close_url) class=(format!("bg-gray-500 hover:bg-gray-600 focus:ring-gray-500 mr-2 {BUTTON}")) { "Close" }
                    form action=(close_url) method="post" class="inline" onsubmit="return confirm('Delete this movie?');" {
                        input type="hidden" name="movie_id" value=(m.vod_id);
                        button type="submit" name="delete_movie" value="1" class=(format!("bg-red-600 hover:bg-red-700 focus:ring-red-500 {BUTTON}")) { "Delete movie" }
                    }
                }
            }
        }
    }
}

fn field(label: &str, value: Markup) -> Markup {
    html! {
        div class="grid grid-cols-3 gap-2 mb-2" {
            div class="text-sm font-medium text-gray-500" { (label) ":" }
            div class="text-sm text-gray-900 col-span-2" { (value) }
        }
    }
}

fn status_badge(complete: bool) -> Markup {
    html! {
        @if complete {
            span class="px-2 inline-flex text-xs leading-5 font-semibold rounded-full bg-green-100 text-green-800" { "Complete" }
        } @else {
            span class="px-2 inline-flex text-xs leading-5 font-semibold rounded-full bg-yellow-100 text-yellow-800" { "Ongoing" }
        }
    }
}

fn text_block(label: &str, text: &str) -> Markup {
    html! {
        div class="mt-4" {
            h4 class="text-md font-medium text-gray-700 mb-2" { (label) }
            div class="bg-gray-50 p-4 rounded-lg" {
                p class="text-sm text-gray-900" {
                    @for (i, line) in text.lines().enumerate() {
                        @if i > 0 { br; }
                        (line)
                    }
                }
            }
        }
    }
}

fn detail_url(page: u64, search: &str, id: i32) -> String {
    format!("{}&id={id}", list_url(page, search))
}

fn format_timestamp(secs: i64) -> String {
    jiff::Timestamp::from_second(secs)
        .map(|ts| ts.to_zoned(jiff::tz::TimeZone::system()).strftime("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_else(|_| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ListParams, MovieSummary};

    fn summary(id: i32, name: &str) -> MovieSummary {
        MovieSummary { id, name: name.into(), tag: "Drama".into(), lang: "en".into(), year: "2001".into() }
    }

    #[test]
    fn list_url_encodes_search() {
        assert_eq!(list_url(2, ""), "/?page=2");
        assert_eq!(list_url(1, "a b&c"), "/?page=1&search=a%20b%26c");
    }

    #[test]
    fn movie_names_are_escaped() {
        let params = ListParams::new(None, None);
        let page = MoviePage::new(&params, 1, vec![summary(1, "<script>alert(1)</script>")]);
        let html = listing_page(&ListingView { params: &params, page: &page, notices: &[], detail: None });
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn pagination_hidden_for_single_page() {
        let params = ListParams::new(None, None);
        let page = MoviePage::new(&params, 3, vec![summary(1, "A")]);
        let html = listing_page(&ListingView { params: &params, page: &page, notices: &[], detail: None });
        assert!(!html.contains("aria-label=\"Pagination\""));
    }

    #[test]
    fn pagination_window_and_ellipses() {
        let params = ListParams::new(Some("10"), Some("x"));
        let page = MoviePage::new(&params, 400, vec![summary(1, "A")]);
        let html = listing_page(&ListingView { params: &params, page: &page, notices: &[], detail: None });
        assert!(html.contains("href=\"/?page=1&amp;search=x\""));
        assert!(html.contains("href=\"/?page=20&amp;search=x\""));
        assert!(html.contains("href=\"/?page=12&amp;search=x\""));
        assert!(!html.contains("href=\"/?page=13&amp;search=x\""));
        assert!(html.contains("Showing <span class=\"font-medium\">181</span>"));
    }

    #[test]
    fn page_past_the_end_still_links_back() {
        let params = ListParams::new(Some("5"), None);
        let page = MoviePage::new(&params, 3, Vec::new());
        let html = listing_page(&ListingView { params: &params, page: &page, notices: &[], detail: None });
        assert!(html.contains("aria-label=\"Pagination\""));
        assert!(html.contains("href=\"/?page=1\""));
        assert!(!html.contains("Showing"));
    }

    #[test]
    fn notices_render_as_banners() {
        let params = ListParams::new(None, None);
        let page = MoviePage::default();
        let notices = [Notice::Success("Deleted 3 movies.".into()), Notice::Error("boom".into())];
        let html = listing_page(&ListingView { params: &params, page: &page, notices: &notices, detail: None });
        assert!(html.contains("notice-success"));
        assert!(html.contains("Deleted 3 movies."));
        assert!(html.contains("notice-error"));
        assert!(html.contains("No movies found."));
    }

    #[test]
    fn multiline_text_gets_line_breaks() {
        let html = text_block("Synopsis", "one\ntwo").into_string();
        assert!(html.contains("one<br>two"));
    }
}
