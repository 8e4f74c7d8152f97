//! Profile page field extraction
//!
//! This module pulls the visible profile fields out of a fetched page:
//! - Display name (from the page title)
//! - Email address (from a mailto link, percent-decoded)
//! - Profile picture URL (resolved to an absolute URL)
//! - Self description
//! - Last-access timestamp (from the details list)
//!
//! Each field is extracted independently; a missing field never blocks
//! the others, and malformed markup is treated as "no data" rather than
//! reported as an error.

use crate::model::ProfileRecord;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Label of the details-list entry holding the last-access timestamp
const LAST_ACCESS_LABEL: &str = "Last access to site";

/// Parses a fetched profile page into a record
///
/// # Arguments
///
/// * `id` - The profile ID the page belongs to
/// * `html` - The page body
/// * `base_url` - URL the page was fetched from, for resolving relative links
///
/// # Returns
///
/// * `Some(ProfileRecord)` - At least one field was found
/// * `None` - Every optional field came back empty; privacy-blanked pages
///   and pages that are not profiles at all land here
pub fn parse_profile(id: u32, html: &str, base_url: &Url) -> Option<ProfileRecord> {
    let document = Html::parse_document(html);

    let record = ProfileRecord {
        id,
        name: extract_name(&document),
        email: extract_email(&document),
        image: extract_image(&document, base_url),
        description: extract_description(&document),
        last_access: extract_last_access(&document),
    };

    record.has_data().then_some(record)
}

/// Extracts the display name from the page title
///
/// Profile titles read "Jane Doe: Public profile"; everything before the
/// first colon is the name.
fn extract_name(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let title = document
        .select(&selector)
        .next()?
        .text()
        .collect::<String>();

    let name = title.split(':').next()?.trim().to_string();
    (!name.is_empty()).then_some(name)
}

/// Extracts the email address from the first mailto link
///
/// The platform percent-encodes addresses inside the href, so the
/// extracted value is decoded before it is kept.
fn extract_email(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"a[href*="mailto:"]"#).ok()?;
    let href = document.select(&selector).next()?.value().attr("href")?;

    let (_, encoded) = href.split_once("mailto:")?;
    let email = urlencoding::decode(encoded).ok()?.trim().to_string();
    (!email.is_empty()).then_some(email)
}

/// Extracts the profile picture URL, resolved against the page URL
fn extract_image(document: &Html, base_url: &Url) -> Option<String> {
    let selector = Selector::parse("img.userpicture").ok()?;
    let src = document.select(&selector).next()?.value().attr("src")?;

    let src = src.trim();
    if src.is_empty() {
        return None;
    }

    base_url.join(src).ok().map(|url| url.to_string())
}

/// Extracts the free-text self description
fn extract_description(document: &Html) -> Option<String> {
    let selector = Selector::parse("div.description").ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Extracts the last-access timestamp from the details list
///
/// Profile pages render this as a `<dt>Last access to site</dt>` entry
/// followed by a `<dd>` with the platform-formatted timestamp.
fn extract_last_access(document: &Html) -> Option<String> {
    let selector = Selector::parse("dt").ok()?;
    let label = document
        .select(&selector)
        .find(|dt| dt.text().collect::<String>().trim() == LAST_ACCESS_LABEL)?;

    following_dd_text(label)
}

/// Returns the text of the first `<dd>` sibling after the given element
fn following_dd_text(dt: ElementRef) -> Option<String> {
    for sibling in dt.next_siblings() {
        if let Some(element) = ElementRef::wrap(sibling) {
            if element.value().name() == "dd" {
                let text = element.text().collect::<String>().trim().to_string();
                return (!text.is_empty()).then_some(text);
            }
        }
    }
    None
}
