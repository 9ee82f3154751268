// src/db/place_repository.rs
// DOCUMENTATION: Place catalog database operations
// PURPOSE: Create tour/kakao places the first time a user reviews or likes them

use crate::errors::AppError;
use crate::models::{KakaoPlace, PlaceForm, PlaceType, TourPlace};
use sqlx::PgConnection;

pub struct PlaceRepository;

impl PlaceRepository {
    /// Insert a tour place unless one with the same id exists
    /// DOCUMENTATION: Existing rows are left untouched; returns true when inserted
    pub async fn insert_tour_if_absent(
        conn: &mut PgConnection,
        place: &TourPlace,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO tour_places (
                id, title, address, areacode, cat1, cat2, cat3, content_type_id,
                createdtime, modifiedtime, image1, image2, mapx, mapy,
                sigungucode, tel, overview, zipcode, homepage
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&place.id)
        .bind(&place.title)
        .bind(&place.address)
        .bind(&place.areacode)
        .bind(&place.cat1)
        .bind(&place.cat2)
        .bind(&place.cat3)
        .bind(&place.content_type_id)
        .bind(&place.createdtime)
        .bind(&place.modifiedtime)
        .bind(&place.image1)
        .bind(&place.image2)
        .bind(&place.mapx)
        .bind(&place.mapy)
        .bind(&place.sigungucode)
        .bind(&place.tel)
        .bind(&place.overview)
        .bind(&place.zipcode)
        .bind(&place.homepage)
        .execute(conn)
        .await
        .map_err(|e| {
            log::error!("Failed to insert tour place {}: {}", place.id, e);
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Insert a kakao place unless one with the same id exists
    pub async fn insert_kakao_if_absent(
        conn: &mut PgConnection,
        place: &KakaoPlace,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO kakao_places (
                id, title, place_url, category_name, category_group_code,
                category_group_name, tel, address, road_address, mapx, mapy
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&place.id)
        .bind(&place.title)
        .bind(&place.place_url)
        .bind(&place.category_name)
        .bind(&place.category_group_code)
        .bind(&place.category_group_name)
        .bind(&place.tel)
        .bind(&place.address)
        .bind(&place.road_address)
        .bind(&place.mapx)
        .bind(&place.mapy)
        .execute(conn)
        .await
        .map_err(|e| {
            log::error!("Failed to insert kakao place {}: {}", place.id, e);
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Make sure the place referenced by a form exists in its catalog table
    pub async fn ensure_from_form(
        conn: &mut PgConnection,
        place_type: PlaceType,
        place_id: &str,
        form: &PlaceForm,
    ) -> Result<(), AppError> {
        let created = match place_type {
            PlaceType::Tour => {
                Self::insert_tour_if_absent(conn, &form.to_tour_place(place_id)).await?
            }
            PlaceType::Kakao => {
                Self::insert_kakao_if_absent(conn, &form.to_kakao_place(place_id)).await?
            }
        };

        if created {
            log::info!("Created {} place {}", place_type, place_id);
        }
        Ok(())
    }
}
