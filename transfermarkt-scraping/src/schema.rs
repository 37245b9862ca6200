use std::str::FromStr;

use getset::{CopyGetters, Getters};
use serde::{Serialize, Serializer};
use thiserror::Error;
use typed_builder::TypedBuilder;

/// Sentinel that the original API renders for absent fields.
/// Internally absence is an `Option`; the sentinel only exists on the wire.
const NA: &str = "N/A";

#[derive(Clone, PartialEq, Eq, Debug, derive_more::From, derive_more::Display, Serialize)]
pub struct PlayerName(String);

#[derive(Clone, PartialEq, Eq, Debug, derive_more::From, derive_more::Display, Serialize)]
pub struct PlayerId(String);

#[derive(Clone, PartialEq, Eq, Debug, derive_more::From, derive_more::Display, Serialize)]
pub struct ClubName(String);

#[derive(Clone, PartialEq, Eq, Debug, derive_more::From, derive_more::Display, Serialize)]
pub struct ClubId(String);

#[derive(Clone, PartialEq, Eq, Debug, derive_more::From, derive_more::Display, Serialize)]
pub struct CountryName(String);

#[derive(Clone, PartialEq, Eq, Debug, derive_more::From, derive_more::Display, Serialize)]
pub struct Currency(String);

/// One roster row.  Fields are serialized under the names the original API
/// exposes, camelCased, with absent scalars rendered as `"N/A"` and the two
/// optional sub-objects rendered as `null`.
#[derive(Clone, PartialEq, Debug, TypedBuilder, Getters, CopyGetters, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[getset(get = "pub")]
    #[serde(serialize_with = "or_na")]
    name: Option<PlayerName>,
    #[getset(get = "pub")]
    #[serde(serialize_with = "or_na")]
    id: Option<PlayerId>,
    #[getset(get = "pub")]
    #[serde(serialize_with = "or_na")]
    position: Option<String>,
    #[getset(get = "pub")]
    #[serde(serialize_with = "or_na")]
    shirt_number: Option<String>,
    #[getset(get = "pub")]
    #[serde(serialize_with = "or_na")]
    image: Option<String>,
    #[getset(get = "pub")]
    date_of_birth: String,
    #[getset(get = "pub")]
    age: String,
    #[getset(get = "pub")]
    #[serde(serialize_with = "countries_or_na")]
    nationality: Vec<CountryName>,
    #[getset(get = "pub")]
    #[serde(serialize_with = "or_na")]
    height: Option<String>,
    #[getset(get = "pub")]
    #[serde(serialize_with = "or_na")]
    foot: Option<String>,
    #[getset(get_copy = "pub")]
    injury: bool,
    #[getset(get_copy = "pub")]
    captain: bool,
    #[getset(get_copy = "pub")]
    suspension: bool,
    #[getset(get = "pub")]
    #[serde(serialize_with = "or_na")]
    joined: Option<String>,
    #[getset(get = "pub")]
    #[serde(serialize_with = "or_na")]
    contract_until: Option<String>,
    #[getset(get = "pub")]
    market_value: MarketValue,
    #[getset(get = "pub")]
    last_club: Option<LastClub>,
    #[getset(get = "pub")]
    additional_information: Option<AdditionalInfo>,
}

/// Market value of a player.  The default (`0`, no currency) stands for an
/// unparseable or missing value cell.
#[derive(Clone, Default, PartialEq, Debug, Getters, CopyGetters, Serialize)]
pub struct MarketValue {
    #[getset(get_copy = "pub")]
    value: f64,
    #[getset(get = "pub")]
    #[serde(serialize_with = "or_na")]
    currency: Option<Currency>,
}

#[derive(PartialEq, Eq, Debug, Error)]
pub enum MarketValueParseError {
    #[error("Market value does not match the expected pattern: {0:?}")]
    PatternMismatch(String),
    #[error("Amount cannot be parsed as a number: {0}")]
    ParseFloatError(#[from] std::num::ParseFloatError),
}

impl FromStr for MarketValue {
    type Err = MarketValueParseError;

    /// Parses strings like `"4,00 mi. €"` or `"500 mil €"`, where `.` is the
    /// thousands separator and `,` the decimal separator, `mi.` scales by a
    /// million and `mil` by a thousand.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = regex!(r"^\s*([0-9][0-9.,]*)\s*(mil|mi\.?)\s*(\S+)\s*$")
            .captures(s)
            .ok_or_else(|| MarketValueParseError::PatternMismatch(s.to_owned()))?;
        let amount: f64 = captures[1].replace('.', "").replace(',', ".").parse()?;
        let scale = match &captures[2] {
            "mil" => 1_000.,
            _ => 1_000_000.,
        };
        let value = amount * scale;
        if !value.is_finite() {
            return Err(MarketValueParseError::PatternMismatch(s.to_owned()));
        }
        Ok(MarketValue {
            value,
            currency: Some(captures[3].to_owned().into()),
        })
    }
}

/// The club a player was signed from, shown in the "signed from" cell.
#[derive(Clone, PartialEq, Eq, Debug, TypedBuilder, Getters, Serialize)]
#[getset(get = "pub")]
pub struct LastClub {
    #[serde(serialize_with = "or_na")]
    signed_from_club_name: Option<ClubName>,
    #[serde(serialize_with = "or_na")]
    signed_from_club_id: Option<ClubId>,
    #[serde(serialize_with = "or_na")]
    signed_from_club_image_url: Option<String>,
}

/// Loan/transfer annotation attached to a player's name cell.
#[derive(Clone, PartialEq, Eq, Debug, TypedBuilder, Getters, Serialize)]
#[getset(get = "pub")]
pub struct AdditionalInfo {
    #[serde(serialize_with = "or_na")]
    content: Option<String>,
    #[serde(serialize_with = "or_na")]
    info_club_name: Option<ClubName>,
    #[serde(serialize_with = "or_na")]
    info_club_id: Option<ClubId>,
    #[serde(serialize_with = "or_na")]
    info_club_image_url: Option<String>,
}

fn or_na<T: Serialize, S: Serializer>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => value.serialize(serializer),
        None => NA.serialize(serializer),
    }
}

#[allow(clippy::ptr_arg)]
fn countries_or_na<S: Serializer>(
    value: &Vec<CountryName>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    if value.is_empty() {
        [NA].serialize(serializer)
    } else {
        value.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{AdditionalInfo, LastClub, MarketValue, MarketValueParseError, Player};

    #[test]
    fn test_market_value_millions() {
        let value: MarketValue = "4,00 mi. €".parse().unwrap();
        assert_eq!(value.value(), 4_000_000.);
        assert_eq!(value.currency().as_ref().unwrap().to_string(), "€");
    }

    #[test]
    fn test_market_value_thousands() {
        let value: MarketValue = "500 mil €".parse().unwrap();
        assert_eq!(value.value(), 500_000.);
        assert_eq!(value.currency().as_ref().unwrap().to_string(), "€");
    }

    #[test]
    fn test_market_value_with_thousands_separator() {
        let value: MarketValue = "1.234,56 mil €".parse().unwrap();
        assert_eq!(value.value(), 1_234_560.);
    }

    #[test]
    fn test_market_value_mismatch() {
        assert_eq!(
            "-".parse::<MarketValue>(),
            Err(MarketValueParseError::PatternMismatch("-".to_owned()))
        );
        assert!("mi. €".parse::<MarketValue>().is_err());
    }

    #[test]
    fn test_market_value_default_serialization() {
        let json = serde_json::to_string(&MarketValue::default()).unwrap();
        assert_eq!(json, r#"{"value":0.0,"currency":"N/A"}"#);
    }

    #[test]
    fn test_player_serialization_with_absent_fields() {
        let player = Player::builder()
            .name(None)
            .id(None)
            .position(None)
            .shirt_number(None)
            .image(None)
            .date_of_birth("31/01/1999".to_owned())
            .age("25".to_owned())
            .nationality(vec![])
            .height(None)
            .foot(None)
            .injury(false)
            .captain(false)
            .suspension(false)
            .joined(None)
            .contract_until(None)
            .market_value(MarketValue::default())
            .last_club(None)
            .additional_information(None)
            .build();
        assert_eq!(
            serde_json::to_value(&player).unwrap(),
            json!({
                "name": "N/A",
                "id": "N/A",
                "position": "N/A",
                "shirtNumber": "N/A",
                "image": "N/A",
                "dateOfBirth": "31/01/1999",
                "age": "25",
                "nationality": ["N/A"],
                "height": "N/A",
                "foot": "N/A",
                "injury": false,
                "captain": false,
                "suspension": false,
                "joined": "N/A",
                "contractUntil": "N/A",
                "marketValue": {"value": 0.0, "currency": "N/A"},
                "lastClub": null,
                "additionalInformation": null,
            })
        );
    }

    #[test]
    fn test_sub_object_serialization() {
        let last_club = LastClub::builder()
            .signed_from_club_name(Some("Flamengo".to_owned().into()))
            .signed_from_club_id(Some("614".to_owned().into()))
            .signed_from_club_image_url(None)
            .build();
        assert_eq!(
            serde_json::to_value(&last_club).unwrap(),
            json!({
                "signed_from_club_name": "Flamengo",
                "signed_from_club_id": "614",
                "signed_from_club_image_url": "N/A",
            })
        );

        let info = AdditionalInfo::builder()
            .content(Some("Emprestado do Flamengo".to_owned()))
            .info_club_name(Some("Flamengo".to_owned().into()))
            .info_club_id(Some("614".to_owned().into()))
            .info_club_image_url(Some("https://tmssl.akamaized.net/images/wappen/614.png".to_owned()))
            .build();
        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            json!({
                "content": "Emprestado do Flamengo",
                "info_club_name": "Flamengo",
                "info_club_id": "614",
                "info_club_image_url": "https://tmssl.akamaized.net/images/wappen/614.png",
            })
        );
    }
}
