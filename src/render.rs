//! HTML rendering of page models.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating;
//! all interpolation is escaped. The output is what the site's static HTML
//! shells expect to find in their content regions, plus a complete
//! document form for the CLI.
//!
//! Interactive behaviour (listeners, toasts, clipboard) lives outside the
//! crate. Elements it hooks into carry `data-*` attributes: `data-page` on
//! pagination buttons, `data-index` on ingredient checkboxes, `data-step` on
//! steps, `data-remove` on filter chips.

use crate::controller::Page;
use crate::present::cards::{AuthorCard, CategoryCard, EntityLink, RecipeCard};
use crate::present::detail::RecipeDetail;
use crate::present::listing::{FilterChip, Listing, PageSlot, PaginationModel};
use crate::present::page::{
    AuthorPage, CategoryPage, ErrorState, HomePage, NotFoundPage, PageModel, RecipePage,
    SiteChrome,
};
use crate::present::tags::TagCloudEntry;
use crate::seo::{SeoMeta, StructuredData};
use crate::view_state::{Action, ViewMode};
use maud::{DOCTYPE, Markup, PreEscaped, html};

// ============================================================================
// Documents
// ============================================================================

/// A complete HTML document for `page`.
pub fn render_document(page: &Page) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (render_head(&page.seo, page.structured_data.as_ref()))
            }
            body {
                (site_header(&page.chrome))
                main.main-content {
                    (render_body(&page.body))
                }
                (site_footer(&page.chrome))
            }
        }
    }
}

/// Document shown when the dataset failed to load.
pub fn render_error_document(state: &ErrorState) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (state.title) }
            }
            body {
                main.main-content {
                    (render_error(state))
                }
            }
        }
    }
}

/// Meta tags: title, description, Open Graph, Twitter card, canonical
/// link, and the JSON-LD script when present.
pub fn render_head(seo: &SeoMeta, structured_data: Option<&StructuredData>) -> Markup {
    html! {
        meta charset="UTF-8";
        meta name="viewport" content="width=device-width, initial-scale=1.0";
        title { (seo.title) }
        meta name="description" content=(seo.description);
        meta property="og:title" content=(seo.title);
        meta property="og:description" content=(seo.description);
        meta property="og:url" content=(seo.canonical_url);
        @if let Some(image) = &seo.image {
            meta property="og:image" content=(image);
        }
        meta name="twitter:title" content=(seo.title);
        meta name="twitter:description" content=(seo.description);
        @if let Some(image) = &seo.image {
            meta name="twitter:image" content=(image);
        }
        link rel="canonical" href=(seo.canonical_url);
        @if let Some(data) = structured_data {
            (json_ld(data))
        }
    }
}

/// `<script type="application/ld+json">`. A `</` inside string values is
/// escaped so the payload cannot close the script element.
pub fn json_ld(data: &StructuredData) -> Markup {
    let json = data.to_json().unwrap_or_default().replace("</", "<\\/");
    html! {
        script type="application/ld+json" { (PreEscaped(json)) }
    }
}

/// The content region for a page model.
pub fn render_body(model: &PageModel) -> Markup {
    match model {
        PageModel::Home(page) => render_home(page),
        PageModel::Recipe(page) => render_recipe(page),
        PageModel::Category(page) => render_category(page),
        PageModel::Author(page) => render_author(page),
        PageModel::NotFound(page) => render_not_found(page),
    }
}

pub fn render_error(state: &ErrorState) -> Markup {
    html! {
        div.error-state {
            h2 { (state.title) }
            p { (state.message) }
            button.btn.btn-primary onclick="location.reload()" { (state.action_label) }
        }
    }
}

// ============================================================================
// Chrome
// ============================================================================

fn site_header(chrome: &SiteChrome) -> Markup {
    html! {
        header.site-header {
            a.logo href="/" {
                @if !chrome.logo.is_empty() {
                    img src=(chrome.logo) alt=(chrome.logo_alt);
                }
                span.site-name { (chrome.site_name) }
            }
        }
    }
}

fn site_footer(chrome: &SiteChrome) -> Markup {
    html! {
        footer.site-footer {
            ul.footer-categories {
                @for link in &chrome.footer_categories {
                    li { (link_or_text(link)) }
                }
            }
        }
    }
}

fn link_or_text(link: &EntityLink) -> Markup {
    html! {
        @if let Some(href) = &link.href {
            a href=(href) { (link.label) }
        } @else {
            span { (link.label) }
        }
    }
}

fn breadcrumb(crumbs: &[EntityLink]) -> Markup {
    html! {
        nav.breadcrumb aria-label="Breadcrumb" {
            ol {
                @for crumb in crumbs {
                    @if let Some(href) = &crumb.href {
                        li { a href=(href) { (crumb.label) } }
                    } @else {
                        li aria-current="page" { (crumb.label) }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Cards
// ============================================================================

pub fn recipe_card(card: &RecipeCard) -> Markup {
    html! {
        article.recipe-card {
            a.recipe-link href=(card.href) {
                div.recipe-image {
                    img src=(card.image) alt=(card.title) loading="lazy";
                    @if card.category.href.is_some() {
                        span.recipe-category-tag { (card.category.label) }
                    }
                }
                div.recipe-info {
                    h3.recipe-title { (card.title) }
                    p.recipe-excerpt { (card.excerpt) }
                    div.recipe-meta {
                        span.recipe-author {
                            img.author-mini-avatar src=(card.author_avatar) alt=(card.author.label);
                            (card.author.label)
                        }
                        span.recipe-date {
                            time datetime=(card.date_iso) { (card.date_label) }
                        }
                    }
                    @if !card.tags.is_empty() {
                        div.recipe-tags-mini {
                            @for tag in &card.tags {
                                span.tag-mini { (tag) }
                            }
                            @if card.tag_overflow > 0 {
                                span.tag-mini { "+" (card.tag_overflow) }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn category_card(card: &CategoryCard) -> Markup {
    html! {
        div.category-card {
            a.category-link href=(card.href) {
                div.category-image {
                    @if let Some(image) = &card.image {
                        img src=(image) alt=(card.title) loading="lazy";
                    } @else {
                        div.category-placeholder {}
                    }
                }
                div.category-info {
                    h3 { (card.title) }
                    p { (card.description) }
                    span.recipe-count { (card.count_label) }
                }
            }
        }
    }
}

pub fn author_card(card: &AuthorCard) -> Markup {
    html! {
        div.author-card {
            a.author-link href=(card.href) {
                img.author-avatar src=(card.avatar) alt=(card.name) loading="lazy";
                div.author-info {
                    h3 { (card.name) }
                    p { (card.bio) }
                    span.recipe-count { (card.count_label) }
                }
            }
        }
    }
}

// ============================================================================
// Listing
// ============================================================================

fn chip_remove_target(action: &Action) -> String {
    match action {
        Action::ClearSearch => "search".to_string(),
        Action::RemoveFilter(key) => key.param().to_string(),
        other => format!("{other:?}"),
    }
}

fn filter_chips(chips: &[FilterChip]) -> Markup {
    html! {
        @if !chips.is_empty() {
            div.active-filters {
                @for chip in chips {
                    span.filter-tag {
                        (chip.label)
                        button.remove type="button" data-remove=(chip_remove_target(&chip.remove)) { "×" }
                    }
                }
            }
        }
    }
}

pub fn pagination(model: &PaginationModel) -> Markup {
    html! {
        div.pagination-container {
            @if let Some(prev) = model.previous {
                button.pagination-btn.prev-btn data-page=(prev) aria-label="Previous page" { "← Previous" }
            }
            @for slot in &model.slots {
                @match slot {
                    PageSlot::Page { number, current } => {
                        button.pagination-btn.active[*current] data-page=(number) { (number) }
                    }
                    PageSlot::Gap => {
                        span.pagination-dots { "..." }
                    }
                }
            }
            @if let Some(next) = model.next {
                button.pagination-btn.next-btn data-page=(next) aria-label="Next page" { "Next →" }
            }
        }
    }
}

pub fn render_listing(listing: &Listing) -> Markup {
    let layout = match listing.view_mode {
        ViewMode::Grid => "recipes-grid",
        ViewMode::List => "recipes-grid list-view",
    };
    html! {
        section.recipes-section {
            (filter_chips(&listing.chips))
            @if listing.no_results {
                div #no-recipes .no-results {
                    h3 { "No recipes found" }
                    p { "Try adjusting your search or filters." }
                }
            } @else {
                div class=(layout) {
                    @for card in &listing.cards {
                        (recipe_card(card))
                    }
                }
            }
            nav #pagination {
                @if let Some(model) = &listing.pagination {
                    (pagination(model))
                }
            }
        }
    }
}

pub fn tag_cloud(entries: &[TagCloudEntry]) -> Markup {
    html! {
        div.tags-cloud {
            @for entry in entries {
                a.tag-cloud-item.large[entry.large] href=(entry.href) title=(entry.title) { (entry.tag) }
            }
        }
    }
}

// ============================================================================
// Pages
// ============================================================================

fn render_home(page: &HomePage) -> Markup {
    html! {
        section.hero-stats {
            span #recipe-count { (page.stats.recipes) }
            span #category-count { (page.stats.categories) }
            span #author-count { (page.stats.authors) }
        }
        (render_listing(&page.listing))
        section.categories-section {
            h2 { "Categories" }
            div #categories-grid {
                @for card in &page.categories {
                    (category_card(card))
                }
            }
        }
        section.authors-section {
            h2 { "Authors" }
            div #authors-grid {
                @for card in &page.authors {
                    (author_card(card))
                }
            }
        }
    }
}

fn render_recipe_detail(detail: &RecipeDetail) -> Markup {
    html! {
        div.recipe-header {
            (breadcrumb(&detail.breadcrumb))
            h1 { (detail.title) }
            div.recipe-meta {
                span.recipe-author { "By " (link_or_text(&detail.author)) }
                span.recipe-date {
                    time datetime=(detail.date_iso) { (detail.date_label) }
                }
                span.recipe-category { (link_or_text(&detail.category)) }
            }
            p.recipe-excerpt { (detail.excerpt) }
        }
        div.recipe-content {
            div.recipe-image-section {
                img.recipe-main-image src=(detail.image) alt=(detail.title) loading="lazy";
            }
            div.recipe-details {
                div.recipe-section.ingredients-section {
                    h2 { "Ingredients" }
                    ul.ingredients-list {
                        @for item in &detail.ingredients {
                            li {
                                label.ingredient-item {
                                    input.ingredient-checkbox type="checkbox" data-index=(item.index);
                                    span.ingredient-text { (item.text) }
                                }
                            }
                        }
                    }
                }
                div.recipe-section.instructions-section {
                    h2 { "Instructions" }
                    ol.steps-list {
                        @for step in &detail.steps {
                            li.step-item data-step=(step.number) {
                                div.step-content { (step.text) }
                            }
                        }
                    }
                }
                @if !detail.tags.is_empty() {
                    div.recipe-section.tags-section {
                        h3 { "Tags" }
                        div.recipe-tags {
                            @for tag in &detail.tags {
                                @if let Some(href) = &tag.href {
                                    a.tag href=(href) { (tag.label) }
                                }
                            }
                        }
                    }
                }
                div.recipe-section.info-section {
                    h3 { "Recipe Information" }
                    div.info-item {
                        strong { "Difficulty" }
                        span { (detail.difficulty) }
                    }
                }
            }
        }
    }
}

fn render_recipe(page: &RecipePage) -> Markup {
    html! {
        article #recipe-detail {
            (render_recipe_detail(&page.detail))
        }
        @if !page.related.is_empty() {
            section.related-recipes {
                h2 { "You might also like" }
                div #related-recipes-grid .recipes-grid {
                    @for card in &page.related {
                        (recipe_card(card))
                    }
                }
            }
        }
    }
}

fn render_category(page: &CategoryPage) -> Markup {
    html! {
        (breadcrumb(&page.breadcrumb))
        header.category-header {
            h1 #category-title { (page.title) }
            p #category-description { (page.description) }
            div.category-stats {
                span #category-recipe-count { (page.stats.recipes) }
                span #category-authors-count { (page.stats.authors) }
            }
        }
        nav #category-nav-pills {
            @for pill in &page.pills {
                a.category-pill.active[pill.active] href=(pill.href) { (pill.label) }
            }
        }
        (render_listing(&page.listing))
        @if !page.tag_cloud.is_empty() {
            section.tags-section {
                h2 { "Popular tags in " (page.title) }
                (tag_cloud(&page.tag_cloud))
            }
        }
        @if !page.authors.is_empty() {
            section.category-authors {
                h2 { (page.title) " authors" }
                div #category-authors-grid {
                    @for card in &page.authors {
                        (author_card(card))
                    }
                }
            }
        }
        @if !page.related_categories.is_empty() {
            section.related-categories {
                h2 { "Related categories" }
                div #related-categories-grid {
                    @for card in &page.related_categories {
                        (category_card(card))
                    }
                }
            }
        }
    }
}

fn render_author(page: &AuthorPage) -> Markup {
    html! {
        (breadcrumb(&page.breadcrumb))
        header.author-header {
            img #author-avatar src=(page.avatar) alt=(page.avatar_alt);
            h1 #author-name { (page.name) }
            p #author-bio { (page.bio) }
            div.author-stats {
                span #author-recipe-count { (page.stats.recipes) }
                span #author-categories-count { (page.stats.categories) }
            }
        }
        h2 { "Recipes by " (page.name) }
        (render_listing(&page.listing))
        @if !page.related_authors.is_empty() {
            section.related-authors {
                h2 { "Other authors" }
                div #related-authors-grid {
                    @for card in &page.related_authors {
                        (author_card(card))
                    }
                }
            }
        }
    }
}

fn render_not_found(page: &NotFoundPage) -> Markup {
    html! {
        div.not-found {
            h1 { (page.title) }
            p { (page.message) }
            div.not-found-actions {
                a.btn.btn-primary href=(page.home_href) { "Go Home" }
                button.btn.btn-secondary onclick="history.back()" { "Go Back" }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PressConfig;
    use crate::controller::Controller;
    use crate::present::listing::pagination as pagination_model;
    use crate::test_helpers::*;

    fn page_for(url: &str) -> Page {
        let data = fixture_dataset();
        let config = PressConfig::default();
        Controller::enter(&data, &config, url, day(2024, 3, 20))
            .unwrap()
            .render()
    }

    #[test]
    fn document_includes_doctype_and_meta() {
        let html = render_document(&page_for("/")).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Saffron &amp; Salt</title>"));
        assert!(html.contains(r#"<link rel="canonical" href="http://localhost:8000/">"#));
        assert!(html.contains(r#"property="og:image""#));
    }

    #[test]
    fn recipe_document_embeds_json_ld() {
        let html = render_document(&page_for("/recipe.html?slug=lemon-tart")).into_string();
        assert!(html.contains(r#"<script type="application/ld+json">"#));
        assert!(html.contains(r#""@type": "Recipe""#));
        assert!(html.contains("data-index=\"0\""));
        assert!(html.contains("data-step=\"1\""));
        assert!(html.contains(r#"href="/?search=citrus""#));
    }

    #[test]
    fn json_ld_cannot_close_script() {
        let data = {
            let mut r = recipe("1", "Evil");
            r.excerpt = "</script><script>alert(1)</script>".into();
            dataset(vec![r], vec![], vec![])
        };
        let schema = crate::seo::StructuredData::Recipe(crate::seo::recipe_schema(
            &data,
            &url::Url::parse("https://x.test").unwrap(),
            &data.recipes()[0],
        ));
        let html = json_ld(&schema).into_string();
        assert!(!html.contains("</script><script>"));
        assert!(html.contains(r#"<\/script>"#));
    }

    #[test]
    fn not_found_renders_404() {
        let html = render_document(&page_for("/recipe.html?slug=ghost")).into_string();
        assert!(html.contains("404 - Page Not Found"));
        assert!(html.contains("Go Home"));
        assert!(!html.contains("application/ld+json"));
    }

    #[test]
    fn no_results_message_instead_of_grid() {
        let html = render_document(&page_for("/?search=zzz")).into_string();
        assert!(html.contains("No recipes found"));
        assert!(html.contains("Search: &quot;zzz&quot;"));
        assert!(!html.contains("recipe-card"));
    }

    #[test]
    fn pagination_marks_current_and_gaps() {
        let model = pagination_model(5, 10).unwrap();
        let html = pagination(&model).into_string();
        assert!(html.contains(r#"class="pagination-btn active" data-page="5""#));
        assert!(html.contains("pagination-dots"));
        assert!(html.contains("← Previous"));
        assert!(html.contains("Next →"));
    }

    #[test]
    fn card_shows_tag_overflow() {
        let card = RecipeCard {
            slug: "s".into(),
            title: "T".into(),
            excerpt: String::new(),
            image: "/i.jpg".into(),
            href: "/recipe.html?slug=s".into(),
            category: EntityLink::plain("Uncategorized"),
            author: EntityLink::plain("Unknown"),
            author_avatar: "/a.jpg".into(),
            tags: vec!["a".into(), "b".into(), "c".into()],
            tag_overflow: 2,
            difficulty: "Easy".into(),
            date_label: "Today".into(),
            date_iso: "2024-01-01T00:00:00Z".into(),
        };
        let html = recipe_card(&card).into_string();
        assert!(html.contains("+2"));
        // Placeholder categories are not shown on the image
        assert!(!html.contains("recipe-category-tag"));
    }

    #[test]
    fn category_page_renders_pills_and_cloud() {
        let html = render_document(&page_for("/category.html?slug=desserts")).into_string();
        assert!(html.contains(r#"class="category-pill active""#));
        assert!(html.contains(r#"class="tag-cloud-item large""#));
        assert!(html.contains("1 recipe in this category"));
    }

    #[test]
    fn list_view_class_applied() {
        let html = render_document(&page_for("/author.html?slug=ana-lima&view=list")).into_string();
        assert!(html.contains("recipes-grid list-view"));
        assert!(html.contains("Ana Lima - Author Photo"));
    }

    #[test]
    fn error_document() {
        let html = render_error_document(&ErrorState::load_failure()).into_string();
        assert!(html.contains("Something went wrong"));
        assert!(html.contains("Failed to load application data"));
        assert!(html.contains("location.reload()"));
    }

    #[test]
    fn html_escaping() {
        let link = EntityLink::plain("<b>Bold</b>");
        let html = link_or_text(&link).into_string();
        assert!(html.contains("&lt;b&gt;"));
    }
}
