use crate::error::Error;
use crate::filter::{filter_matches, FilterConfig};
use crate::model::{default_results_name, Match, Results};
use crate::parser::{parse_column, parse_lines, NameTransformer};
use chrono::NaiveDateTime;
use scraper::{ElementRef, Html, Selector};

lazy_static::lazy_static! {
    static ref P: Selector = Selector::parse("p").expect("valid selector");
    static ref TABLE: Selector = Selector::parse("table").expect("valid selector");
    static ref TR: Selector = Selector::parse("tr").expect("valid selector");
    static ref TD: Selector = Selector::parse("td").expect("valid selector");
    static ref LINK: Selector = Selector::parse("a[href]").expect("valid selector");
}

/// One table row of a Moss result page, as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub first: String,
    pub second: String,
    pub lines: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MossPage {
    pub name: Option<String>,
    pub rows: Vec<RawRow>,
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>()
}

/// Pull the display name and the match rows out of a Moss result page.
///
/// The name is the third paragraph of the page (Moss puts the submission
/// comment there). The first table row is the header and is skipped.
pub fn extract_page(html: &str) -> Result<MossPage, Error> {
    let document = Html::parse_document(html);

    let name = document
        .select(&P)
        .nth(2)
        .map(|p| element_text(&p).trim().to_string())
        .filter(|name| !name.is_empty());

    let table = document
        .select(&TABLE)
        .next()
        .ok_or_else(|| Error::parse("no results table found", truncate(html)))?;

    let rows = table
        .select(&TR)
        .skip(1)
        .map(|row| extract_row(&row))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MossPage { name, rows })
}

fn extract_row(row: &ElementRef) -> Result<RawRow, Error> {
    let cells: Vec<String> = row.select(&TD).map(|td| element_text(&td)).collect();
    let [first, second, lines] = <[String; 3]>::try_from(cells).map_err(|cells| {
        Error::parse(
            format!("expected 3 cells per row, found {}", cells.len()),
            row.html(),
        )
    })?;

    let href = row
        .select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .ok_or_else(|| Error::parse("row has no match link", row.html()))?
        .to_string();

    Ok(RawRow {
        first,
        second,
        lines,
        href,
    })
}

fn truncate(text: &str) -> String {
    text.chars().take(200).collect()
}

/// Turn an extracted page into filtered [`Results`].
pub fn results_from_page(
    page: MossPage,
    transformer: &NameTransformer,
    filter: &FilterConfig,
    now: &NaiveDateTime,
) -> Result<Results, Error> {
    let matches = page
        .rows
        .into_iter()
        .map(|row| {
            Ok(Match::new(
                parse_column(&row.first, transformer)?,
                parse_column(&row.second, transformer)?,
                parse_lines(&row.lines)?,
                row.href,
            ))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let name = page.name.unwrap_or_else(|| default_results_name(now));
    Ok(Results::new(name, filter_matches(matches, filter)))
}
