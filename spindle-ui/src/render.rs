//! HTML rendering
//!
//! Server-rendered pages: vanilla HTML/CSS with a minimal inline script
//! that reloads the page on SSE events. All user data is HTML-escaped.

use crate::form::ItemForm;
use crate::view::{BucketView, CardView, CollectionView, CoverView};
use spindle_common::model::{YEAR_MAX, YEAR_MIN};
use spindle_common::MediaFormat;

/// Escape text for HTML body and attribute contexts
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the complete collection page
pub fn render_page(view: &CollectionView, form: &ItemForm) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Spindle Music Collection</title>
    <style>
        body {{
            font-family: system-ui, -apple-system, sans-serif;
            max-width: 1100px;
            margin: 40px auto;
            padding: 20px;
            line-height: 1.6;
            color: #333;
        }}
        header {{
            display: flex;
            justify-content: space-between;
            align-items: center;
            border-bottom: 2px solid #0066cc;
            padding-bottom: 10px;
            margin-bottom: 20px;
        }}
        h1 {{ margin: 0; }}
        h2 {{ color: #333; margin-top: 30px; }}
        .button {{
            display: inline-block;
            padding: 10px 20px;
            background: #0066cc;
            color: white;
            border: none;
            border-radius: 4px;
            cursor: pointer;
            font-size: 1em;
        }}
        .button:hover {{ background: #0052a3; }}
        .button:disabled {{ background: #99bbdd; cursor: default; }}
        .button.secondary {{ background: #888; }}
        .empty-collection {{
            text-align: center;
            padding: 60px 20px;
            background: #f5f5f5;
            border-radius: 8px;
        }}
        .empty-section {{ color: #777; font-style: italic; }}
        .card-grid {{
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
            gap: 16px;
        }}
        .item-card {{
            border: 1px solid #ddd;
            border-radius: 8px;
            padding: 12px;
            background: white;
        }}
        .item-card h3 {{ margin: 8px 0 4px 0; }}
        .item-card p {{ margin: 2px 0; font-size: 0.9em; }}
        .cover {{
            width: 100%;
            height: 180px;
            object-fit: cover;
            border-radius: 4px;
        }}
        .cover-placeholder {{
            display: flex;
            align-items: center;
            justify-content: center;
            background: #eee;
            color: #999;
        }}
        .format-badge {{
            display: inline-block;
            padding: 1px 8px;
            border-radius: 10px;
            background: #0066cc;
            color: white;
            font-size: 0.8em;
        }}
        .add-form {{
            background: #f5f5f5;
            border-radius: 8px;
            padding: 20px;
            margin-bottom: 30px;
        }}
        .add-form label {{ display: block; margin-top: 10px; font-weight: 600; }}
        .add-form input, .add-form select {{
            width: 100%;
            max-width: 400px;
            padding: 6px;
            border: 1px solid #ccc;
            border-radius: 4px;
        }}
        .form-actions {{ margin-top: 16px; }}
    </style>
</head>
<body>
    <header>
        <h1>Spindle Music Collection</h1>
        <form method="post" action="/form/open">
            <button class="button" type="submit">Add New Item</button>
        </form>
    </header>
{form}
{collection}
    <script>
        const events = new EventSource('/events');
        events.addEventListener('CollectionChanged', () => location.reload());
        events.addEventListener('CoverFailed', () => location.reload());
    </script>
</body>
</html>
"#,
        form = render_form(form),
        collection = render_collection(view),
    )
}

fn render_form(form: &ItemForm) -> String {
    if !form.is_visible() {
        return String::new();
    }

    let draft = form.draft();
    let disabled = if form.is_submitting() { " disabled" } else { "" };
    let (cd_selected, lp_selected) = match draft.format {
        MediaFormat::Cd => (" selected", ""),
        MediaFormat::Lp => ("", " selected"),
    };

    format!(
        r#"    <section class="add-form">
        <h2>Add New Item</h2>
        <form method="post" action="/items">
            <label for="artist">Artist</label>
            <input id="artist" name="artist" type="text" value="{artist}" required>
            <label for="album_title">Album Title</label>
            <input id="album_title" name="album_title" type="text" value="{album_title}" required>
            <label for="year_of_release">Year of Release</label>
            <input id="year_of_release" name="year_of_release" type="number" min="{year_min}" max="{year_max}" value="{year}" required>
            <label for="genre">Genre</label>
            <input id="genre" name="genre" type="text" value="{genre}" required>
            <label for="purchase_date">Purchase Date</label>
            <input id="purchase_date" name="purchase_date" type="date" value="{purchase_date}" required>
            <label for="format">Format</label>
            <select id="format" name="format">
                <option value="CD"{cd_selected}>CD</option>
                <option value="LP"{lp_selected}>LP</option>
            </select>
            <label for="cover_image_url">Cover Image URL (optional)</label>
            <input id="cover_image_url" name="cover_image_url" type="url" value="{cover}">
            <div class="form-actions">
                <button class="button" type="submit"{disabled}>Add to Collection</button>
                <button class="button secondary" type="submit" formaction="/form/cancel" formnovalidate>Cancel</button>
            </div>
        </form>
    </section>"#,
        artist = escape_html(&draft.artist),
        album_title = escape_html(&draft.album_title),
        year = escape_html(&draft.year_of_release),
        genre = escape_html(&draft.genre),
        purchase_date = escape_html(&draft.purchase_date),
        cover = escape_html(&draft.cover_image_url),
        year_min = YEAR_MIN,
        year_max = YEAR_MAX,
        cd_selected = cd_selected,
        lp_selected = lp_selected,
        disabled = disabled,
    )
}

fn render_collection(view: &CollectionView) -> String {
    match view {
        CollectionView::Empty => r#"    <section class="empty-collection">
        <h2>Your collection is empty</h2>
        <p>Register your first CD or LP to get started.</p>
        <form method="post" action="/form/open">
            <button class="button" type="submit">Add Your First Item</button>
        </form>
    </section>"#
            .to_string(),
        CollectionView::Sections { cd, lp } => {
            format!("{}\n{}", render_bucket(cd), render_bucket(lp))
        }
    }
}

fn render_bucket(bucket: &BucketView) -> String {
    let heading = format!(
        "    <h2>{} ({})</h2>",
        escape_html(bucket.title()),
        bucket.count()
    );

    if bucket.is_empty() {
        let label = bucket.format.label();
        return format!(
            "{heading}\n    <p class=\"empty-section\">No {label} items yet.</p>"
        );
    }

    let cards: Vec<String> = bucket.cards.iter().map(render_card).collect();
    format!(
        "{heading}\n    <div class=\"card-grid\">\n{}\n    </div>",
        cards.join("\n")
    )
}

fn render_card(card: &CardView) -> String {
    let item = &card.item;
    let cover = match &card.cover {
        CoverView::Image { url } => format!(
            r#"<img class="cover" src="{}" alt="Cover of {}">"#,
            escape_html(url),
            escape_html(&item.album_title)
        ),
        CoverView::Placeholder => {
            r#"<div class="cover cover-placeholder">No Cover</div>"#.to_string()
        }
    };

    format!(
        r#"        <div class="item-card">
            {cover}
            <h3>{title}</h3>
            <p>{artist}</p>
            <p>{genre}, {year}</p>
            <p>Purchased {purchase_date}</p>
            <span class="format-badge">{format}</span>
        </div>"#,
        cover = cover,
        title = escape_html(&item.album_title),
        artist = escape_html(&item.artist),
        genre = escape_html(&item.genre),
        year = item.year_of_release,
        purchase_date = item.purchase_date,
        format = item.format.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::covers::CoverTracker;
    use crate::form::ItemDraft;
    use crate::view::build_view;
    use chrono::NaiveDate;
    use spindle_common::CollectionItem;

    fn item(id: &str, artist: &str, format: MediaFormat, cover: Option<&str>) -> CollectionItem {
        CollectionItem {
            id: id.to_string(),
            artist: artist.to_string(),
            album_title: "Arrival".to_string(),
            year_of_release: 1976,
            genre: "Pop".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(1999, 1, 1).unwrap(),
            format,
            cover_image_url: cover.map(String::from),
            created_at: None,
        }
    }

    fn page(items: &[CollectionItem], form: &ItemForm) -> String {
        let mut covers = CoverTracker::new();
        for it in items {
            covers.begin(it);
        }
        render_page(&build_view(items, &covers), form)
    }

    #[test]
    fn empty_collection_renders_call_to_action() {
        let html = page(&[], &ItemForm::new());
        assert!(html.contains("Your collection is empty"));
        assert!(!html.contains("CD Collection"));
        assert!(!html.contains("LP Collection"));
    }

    #[test]
    fn sections_render_titles_with_counts() {
        let items = vec![
            item("1", "Abba", MediaFormat::Lp, None),
            item("2", "Beatles", MediaFormat::Lp, None),
        ];
        let html = page(&items, &ItemForm::new());
        assert!(html.contains("LP Collection (2)"));
        assert!(html.contains("CD Collection (0)"));
        assert!(html.contains("No CD items yet."));
    }

    #[test]
    fn hidden_form_is_not_rendered() {
        let html = page(&[], &ItemForm::new());
        assert!(!html.contains(r#"action="/items""#));
    }

    #[test]
    fn visible_form_prefills_draft_values() {
        let mut form = ItemForm::new();
        form.open();
        form.begin_submit(ItemDraft {
            artist: "Abba".to_string(),
            album_title: "Arrival".to_string(),
            year_of_release: "197X".to_string(),
            genre: "Pop".to_string(),
            purchase_date: "1999-01-01".to_string(),
            format: MediaFormat::Lp,
            cover_image_url: String::new(),
        });

        let html = page(&[], &form);
        assert!(html.contains(r#"action="/items""#));
        assert!(html.contains(r#"value="Abba""#));
        // Rejected year text survives for correction
        assert!(html.contains(r#"value="197X""#));
        assert!(html.contains(r#"<option value="LP" selected>"#));
    }

    #[test]
    fn submit_button_disabled_while_submitting() {
        let mut form = ItemForm::new();
        form.open();
        form.begin_submit(ItemDraft {
            artist: "Abba".to_string(),
            album_title: "Arrival".to_string(),
            year_of_release: "1976".to_string(),
            genre: "Pop".to_string(),
            purchase_date: "1999-01-01".to_string(),
            format: MediaFormat::Lp,
            cover_image_url: String::new(),
        });
        assert!(form.is_submitting());

        let html = page(&[], &form);
        assert!(html.contains(r#"type="submit" disabled"#));
    }

    #[test]
    fn card_covers_render_image_or_placeholder() {
        let items = vec![
            item("1", "Abba", MediaFormat::Lp, Some("http://example.com/c.jpg")),
            item("2", "Beatles", MediaFormat::Lp, None),
        ];
        let html = page(&items, &ItemForm::new());
        assert!(html.contains(r#"src="http://example.com/c.jpg""#));
        assert!(html.contains("No Cover"));
    }

    #[test]
    fn user_text_is_escaped() {
        let items = vec![item(
            "1",
            "<script>alert('x')</script>",
            MediaFormat::Cd,
            None,
        )];
        let html = page(&items, &ItemForm::new());
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn page_includes_reload_script() {
        let html = page(&[], &ItemForm::new());
        assert!(html.contains("new EventSource('/events')"));
        assert!(html.contains("CollectionChanged"));
    }
}
