// src/models/place.rs
// DOCUMENTATION: Place records from the two upstream catalogs
// PURPOSE: Place type parsing and the form fields clients send along with
// reviews and likes so a place can be created the first time it is touched

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use crate::errors::AppError;

/// Source catalog of a place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceType {
    /// Map/business search API
    Kakao,
    /// Tourism API
    Tour,
}

impl PlaceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceType::Kakao => "kakao",
            PlaceType::Tour => "tour",
        }
    }

    /// Parse a client-supplied type. None when the value is not a known catalog.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "kakao" => Some(PlaceType::Kakao),
            "tour" => Some(PlaceType::Tour),
            _ => None,
        }
    }
}

impl fmt::Display for PlaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tourism API content types used to bucket liked places
pub const TOUR_CONTENT_TYPES: [&str; 7] = ["12", "14", "15", "28", "32", "38", "39"];

/// Row of the tour_places table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TourPlace {
    pub id: String,
    pub title: Option<String>,
    pub address: Option<String>,
    pub areacode: Option<String>,
    pub cat1: Option<String>,
    pub cat2: Option<String>,
    pub cat3: Option<String>,
    pub content_type_id: Option<String>,
    pub createdtime: Option<String>,
    pub modifiedtime: Option<String>,
    pub image1: Option<String>,
    pub image2: Option<String>,
    pub mapx: Option<String>,
    pub mapy: Option<String>,
    pub sigungucode: Option<String>,
    pub tel: Option<String>,
    pub overview: Option<String>,
    pub zipcode: Option<String>,
    pub homepage: Option<String>,
}

/// Row of the kakao_places table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct KakaoPlace {
    pub id: String,
    pub title: Option<String>,
    pub place_url: Option<String>,
    pub category_name: Option<String>,
    pub category_group_code: Option<String>,
    pub category_group_name: Option<String>,
    pub tel: Option<String>,
    pub address: Option<String>,
    pub road_address: Option<String>,
    pub mapx: Option<String>,
    pub mapy: Option<String>,
}

/// Form body of POST /users/reviews and POST /place/like
/// DOCUMENTATION: Field names follow the upstream APIs' own JSON so the
/// client can forward a search result untouched. Everything is optional;
/// the services decide which keys are required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceForm {
    #[serde(rename = "type")]
    pub place_type: Option<String>,
    pub place_id: Option<String>,

    // review payload
    pub grade: Option<String>,
    pub text: Option<String>,

    // tourism API fields
    pub addr1: Option<String>,
    pub addr2: Option<String>,
    pub areacode: Option<String>,
    pub cat1: Option<String>,
    pub cat2: Option<String>,
    pub cat3: Option<String>,
    pub content_type_id: Option<String>,
    pub createdtime: Option<String>,
    pub modifiedtime: Option<String>,
    pub firstimage: Option<String>,
    pub firstimage2: Option<String>,
    pub mapx: Option<String>,
    pub mapy: Option<String>,
    pub sigungucode: Option<String>,
    pub tel: Option<String>,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub zipcode: Option<String>,
    pub homepage: Option<String>,

    // map API fields
    pub place_name: Option<String>,
    pub place_url: Option<String>,
    pub category_name: Option<String>,
    pub category_group_code: Option<String>,
    pub category_group_name: Option<String>,
    pub phone: Option<String>,
    pub address_name: Option<String>,
    pub road_address_name: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl PlaceForm {
    /// Place id, required by every operation taking this form
    pub fn require_place_id(&self) -> Result<String, AppError> {
        non_empty(&self.place_id).ok_or_else(|| AppError::InvalidKey("place_id".to_string()))
    }

    /// Tour place row built from the form
    pub fn to_tour_place(&self, id: &str) -> TourPlace {
        let address = [non_empty(&self.addr1), non_empty(&self.addr2)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        TourPlace {
            id: id.to_string(),
            title: self.title.clone(),
            address: Some(address).filter(|a| !a.is_empty()),
            areacode: self.areacode.clone(),
            cat1: self.cat1.clone(),
            cat2: self.cat2.clone(),
            cat3: self.cat3.clone(),
            content_type_id: self.content_type_id.clone(),
            createdtime: self.createdtime.clone(),
            modifiedtime: self.modifiedtime.clone(),
            image1: self.firstimage.clone(),
            image2: self.firstimage2.clone(),
            mapx: self.mapx.clone(),
            mapy: self.mapy.clone(),
            sigungucode: self.sigungucode.clone(),
            tel: self.tel.clone(),
            overview: self.overview.clone(),
            zipcode: self.zipcode.clone(),
            homepage: self.homepage.clone(),
        }
    }

    /// Kakao place row built from the form
    pub fn to_kakao_place(&self, id: &str) -> KakaoPlace {
        KakaoPlace {
            id: id.to_string(),
            title: self.place_name.clone(),
            place_url: self.place_url.clone(),
            category_name: self.category_name.clone(),
            category_group_code: self.category_group_code.clone(),
            category_group_name: self.category_group_name.clone(),
            tel: self.phone.clone(),
            address: self.address_name.clone(),
            road_address: self.road_address_name.clone(),
            mapx: self.x.clone(),
            mapy: self.y.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_type_parse() {
        assert_eq!(PlaceType::parse("kakao"), Some(PlaceType::Kakao));
        assert_eq!(PlaceType::parse("tour"), Some(PlaceType::Tour));
        assert_eq!(PlaceType::parse("Tour"), None);
        assert_eq!(PlaceType::parse(""), None);
        assert_eq!(PlaceType::Tour.to_string(), "tour");
    }

    #[test]
    fn test_form_decodes_from_urlencoded() {
        let form: PlaceForm = serde_urlencoded::from_str(
            "type=tour&place_id=126508&addr1=Jongno-gu&addr2=Sejong-ro&firstimage=http%3A%2F%2Fimg&content_type_id=12",
        )
        .unwrap();
        assert_eq!(form.place_type.as_deref(), Some("tour"));

        let place = form.to_tour_place(&form.require_place_id().unwrap());
        assert_eq!(place.id, "126508");
        assert_eq!(place.address.as_deref(), Some("Jongno-gu Sejong-ro"));
        assert_eq!(place.image1.as_deref(), Some("http://img"));
        assert_eq!(place.content_type_id.as_deref(), Some("12"));
    }

    #[test]
    fn test_tour_address_skips_missing_parts() {
        let form = PlaceForm {
            addr1: Some("Jeju".to_string()),
            ..Default::default()
        };
        assert_eq!(form.to_tour_place("1").address.as_deref(), Some("Jeju"));
        assert_eq!(PlaceForm::default().to_tour_place("1").address, None);
    }

    #[test]
    fn test_kakao_field_mapping() {
        let form = PlaceForm {
            place_name: Some("Gyeongbokgung".to_string()),
            phone: Some("02-3700-3900".to_string()),
            address_name: Some("161 Sajik-ro".to_string()),
            road_address_name: Some("161 Sajik-ro, Jongno-gu".to_string()),
            x: Some("126.97".to_string()),
            y: Some("37.57".to_string()),
            ..Default::default()
        };
        let place = form.to_kakao_place("8134");
        assert_eq!(place.title.as_deref(), Some("Gyeongbokgung"));
        assert_eq!(place.tel.as_deref(), Some("02-3700-3900"));
        assert_eq!(place.road_address.as_deref(), Some("161 Sajik-ro, Jongno-gu"));
        assert_eq!(place.mapx.as_deref(), Some("126.97"));
        assert_eq!(place.mapy.as_deref(), Some("37.57"));
    }

    #[test]
    fn test_missing_place_id() {
        let form = PlaceForm {
            place_id: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            form.require_place_id(),
            Err(AppError::InvalidKey(_))
        ));
    }
}
