use axum::{
    extract::{Path, State},
    Json,
};

use crate::dtos::cities::validate_not_blank;
use crate::dtos::{
    CityResponse, ListCitiesQuery, ListCitiesResponse, MessageResponse, UpsertCityRequest,
    UpsertCityResponse,
};
use crate::models::City;
use crate::services::record_city_operation;
use crate::startup::AppState;
use crate::utils::{city_id, invalid, ValidatedJson, ValidatedQuery};
use service_core::error::AppError;

fn validate_name(name: &str) -> Result<(), AppError> {
    validate_not_blank(name).map_err(|e| invalid("city", e))
}

fn not_found(name: &str) -> AppError {
    AppError::NotFound(anyhow::anyhow!("City '{}' not found", name.trim()))
}

#[tracing::instrument(skip(state, payload), fields(city = %payload.city, population = payload.population))]
pub async fn upsert_city(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpsertCityRequest>,
) -> Result<Json<UpsertCityResponse>, AppError> {
    let result = upsert(&state, payload).await;
    record_city_operation("upsert", &result);
    result.map(Json)
}

async fn upsert(state: &AppState, payload: UpsertCityRequest) -> Result<UpsertCityResponse, AppError> {
    let record = City::new(&payload.city, payload.population, payload.country.as_deref());
    state.store.put(&city_id(&record.city), &record).await?;

    tracing::info!(city = %record.city, population = record.population, "Upserted city");

    Ok(UpsertCityResponse {
        message: "City upserted successfully".to_string(),
        city: record.city,
        population: record.population,
    })
}

#[tracing::instrument(skip(state))]
pub async fn get_city(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CityResponse>, AppError> {
    let result = fetch(&state, &name).await;
    record_city_operation("get", &result);
    result.map(Json)
}

async fn fetch(state: &AppState, name: &str) -> Result<CityResponse, AppError> {
    validate_name(name)?;

    match state.store.get(&city_id(name)).await? {
        Some(city) => Ok(city.into()),
        None => Err(not_found(name)),
    }
}

#[tracing::instrument(skip(state))]
pub async fn list_cities(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListCitiesQuery>,
) -> Result<Json<ListCitiesResponse>, AppError> {
    let result = list(&state, query).await;
    record_city_operation("list", &result);
    result.map(Json)
}

async fn list(state: &AppState, query: ListCitiesQuery) -> Result<ListCitiesResponse, AppError> {
    let page = state
        .store
        .search(query.offset(), query.size as u64)
        .await?;

    Ok(ListCitiesResponse {
        total: page.total,
        page: query.page,
        size: query.size,
        cities: page.cities,
    })
}

#[tracing::instrument(skip(state))]
pub async fn delete_city(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let result = remove(&state, &name).await;
    record_city_operation("delete", &result);
    result.map(Json)
}

async fn remove(state: &AppState, name: &str) -> Result<MessageResponse, AppError> {
    validate_name(name)?;

    if !state.store.delete(&city_id(name)).await? {
        return Err(not_found(name));
    }

    tracing::info!(city = %name.trim(), "Deleted city");

    Ok(MessageResponse {
        message: format!("City '{}' deleted", name.trim()),
    })
}
