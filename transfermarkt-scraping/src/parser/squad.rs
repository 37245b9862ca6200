use anyhow::{bail, Context};
use itertools::Itertools;
use log::warn;
use scraper::{ElementRef, Html, Selector};

use crate::schema::{
    AdditionalInfo, ClubId, ClubName, CountryName, LastClub, MarketValue, Player, PlayerId,
    PlayerName,
};

/// Positional contract of the roster table.  All indices are zero-based
/// positions among the cells matched in document order; the nested
/// inline-table cells of the name column count towards the generic `td`
/// positions.  Tied to the current page layout.
mod layout {
    /// Generic `td` holding the position label.
    pub const POSITION_CELL: usize = 4;
    /// `td.zentriert` holding the combined `DD/MM/YYYY (AA)` text.
    pub const BIRTH_CELL: usize = 1;
    /// `td.zentriert` holding the nationality flag images.
    pub const NATIONALITY_CELL: usize = 2;
    /// `td.zentriert` holding the `D,DD` height text.
    pub const HEIGHT_CELL: usize = 3;
    /// `td.zentriert` holding the preferred foot.
    pub const FOOT_CELL: usize = 4;
    /// `td.zentriert` holding the joined date.
    pub const JOINED_CELL: usize = 5;
    /// `td.zentriert` holding the "signed from" club, if any.
    pub const SIGNED_FROM_CELL: usize = 6;
    /// `td.zentriert` holding the contract expiry date.
    pub const CONTRACT_CELL: usize = 7;
}

/// Parses a roster page into its players, in on-page order.
///
/// A row that fails extraction is logged and skipped so that one malformed
/// row does not discard the rest of the roster.
pub fn parse(html: &Html) -> anyhow::Result<Vec<Player>> {
    let rows = html.select(selector!("tr.odd, tr.even")).collect_vec();
    if rows.is_empty() {
        bail!("No roster rows found in the document");
    }
    Ok(rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match parse_row(row) {
            Ok(player) => Some(player),
            Err(e) => {
                warn!("Skipping roster row {index}: {e:#}");
                None
            }
        })
        .collect())
}

/// Extracts one player from one `tr.odd`/`tr.even` row.
///
/// Every field degrades independently to its documented default when its
/// sub-element is missing; only the birth date cell is a hard failure.
pub fn parse_row(row: ElementRef) -> anyhow::Result<Player> {
    let (name, id) = parse_name_and_id(row);
    let (date_of_birth, age) = parse_birth_cell(row)?;
    Ok(Player::builder()
        .name(name)
        .id(id)
        .position(text_at(row, selector!("td"), layout::POSITION_CELL))
        .shirt_number(parse_shirt_number(row))
        .image(parse_image(row))
        .date_of_birth(date_of_birth)
        .age(age)
        .nationality(parse_nationality(row))
        .height(parse_height(row))
        .foot(centered_text_at(row, layout::FOOT_CELL))
        .injury(row.select(selector!("span.verletzt-table")).next().is_some())
        .captain(row.select(selector!("span.kapitaenicon-table")).next().is_some())
        .suspension(row.select(selector!("span.ausfall-1-table")).next().is_some())
        .joined(centered_text_at(row, layout::JOINED_CELL))
        .contract_until(centered_text_at(row, layout::CONTRACT_CELL))
        .market_value(parse_market_value(row))
        .last_club(parse_last_club(row))
        .additional_information(parse_additional_information(row))
        .build())
}

fn parse_name_and_id(row: ElementRef) -> (Option<PlayerName>, Option<PlayerId>) {
    let Some(link) = row.select(selector!("td.hauptlink a")).next() else {
        return (None, None);
    };
    let name = Some(element_text(link))
        .filter(|text| !text.is_empty())
        .map(PlayerName::from);
    let id = link
        .attr("href")
        .and_then(|href| href.split_once("/spieler/"))
        .map(|(_, id)| PlayerId::from(id.to_owned()));
    (name, id)
}

fn parse_birth_cell(row: ElementRef) -> anyhow::Result<(String, String)> {
    let text = centered_text_at(row, layout::BIRTH_CELL).context("Birth date cell not found")?;
    let captures = regex!(r"(\d{2}/\d{2}/\d{4})\s*\((\d+)\)")
        .captures(&text)
        .with_context(|| format!("Birth date does not match the expected pattern: {text:?}"))?;
    Ok((captures[1].to_owned(), captures[2].to_owned()))
}

fn parse_shirt_number(row: ElementRef) -> Option<String> {
    let cell = row.select(selector!("div.rn_nummer")).next()?;
    let text = element_text(cell);
    (!text.is_empty()).then_some(text)
}

fn parse_image(row: ElementRef) -> Option<String> {
    row.select(selector!("img.bilderrahmen-fixed"))
        .next()?
        .attr("data-src")
        .map(str::to_owned)
}

fn parse_nationality(row: ElementRef) -> Vec<CountryName> {
    let Some(cell) = row.select(selector!("td.zentriert")).nth(layout::NATIONALITY_CELL) else {
        return vec![];
    };
    cell.select(selector!("img.flaggenrahmen"))
        .filter_map(|flag| flag.attr("title"))
        .map(str::trim)
        .filter(|title| !title.is_empty() && *title != "N/A")
        .map(|title| CountryName::from(title.to_owned()))
        .collect()
}

fn parse_height(row: ElementRef) -> Option<String> {
    let text = centered_text_at(row, layout::HEIGHT_CELL)?;
    regex!(r"\d,\d{2}")
        .find(&text)
        .map(|height| height.as_str().to_owned())
}

fn parse_market_value(row: ElementRef) -> MarketValue {
    row.select(selector!("td.rechts"))
        .next()
        .map(element_text)
        .and_then(|text| text.parse().ok())
        .unwrap_or_default()
}

fn parse_last_club(row: ElementRef) -> Option<LastClub> {
    let cell = row.select(selector!("td.zentriert")).nth(layout::SIGNED_FROM_CELL)?;
    let link = cell.select(selector!("a")).next()?;
    Some(
        LastClub::builder()
            .signed_from_club_name(club_name_of(link))
            .signed_from_club_id(club_id_of(link))
            .signed_from_club_image_url(club_image_of(link))
            .build(),
    )
}

fn parse_additional_information(row: ElementRef) -> Option<AdditionalInfo> {
    let link = row.select(selector!("span.wechsel-kader-wappen a")).next()?;
    Some(
        AdditionalInfo::builder()
            .content(link.attr("title").map(str::to_owned))
            .info_club_name(club_name_of(link))
            .info_club_id(club_id_of(link))
            .info_club_image_url(club_image_of(link))
            .build(),
    )
}

fn club_name_of(link: ElementRef) -> Option<ClubName> {
    link.select(selector!("img"))
        .next()?
        .attr("title")
        .map(|title| ClubName::from(title.to_owned()))
}

fn club_id_of(link: ElementRef) -> Option<ClubId> {
    let href = link.attr("href")?;
    regex!(r"verein/(\d+)")
        .captures(href)
        .map(|captures| ClubId::from(captures[1].to_owned()))
}

fn club_image_of(link: ElementRef) -> Option<String> {
    link.select(selector!("img"))
        .next()?
        .attr("src")
        .map(str::to_owned)
}

fn centered_text_at(row: ElementRef, index: usize) -> Option<String> {
    text_at(row, selector!("td.zentriert"), index)
}

fn text_at(row: ElementRef, selector: &Selector, index: usize) -> Option<String> {
    let cell = row.select(selector).nth(index)?;
    let text = element_text(cell);
    (!text.is_empty()).then_some(text)
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_owned()
}
