use std::sync::Arc;

use actix_web::web::Data;
use actix_web::{HttpResponse, Result};

use log::{debug, error};
use serde::{Deserialize, Serialize};

use gamesite::actors::catalog::{ListCategoriesCommand, ListGamesCommand};

use crate::api::AppState;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ListingError {
    error: String,
}

/// GET /api/games: the game listing projected straight to JSON.
pub async fn games(appstate: Data<Arc<AppState>>) -> Result<HttpResponse> {
    match appstate.catalog.send(ListGamesCommand).await {
        Ok(Ok(games)) => {
            debug!("Successful return {} games to client", games.len());

            Ok(HttpResponse::Ok().json(games))
        }
        Ok(Err(error)) => {
            error!("Fail to list games: {}", error);

            Ok(HttpResponse::ServiceUnavailable().json(ListingError {
                error: error.message,
            }))
        }
        Err(error) => {
            error!("Fail to list games: {}", error);

            Ok(HttpResponse::InternalServerError().json(ListingError {
                error: format!("Failed to list games: {}", error),
            }))
        }
    }
}

/// GET /api/categories: the category listing projected straight to JSON.
pub async fn categories(appstate: Data<Arc<AppState>>) -> Result<HttpResponse> {
    match appstate.catalog.send(ListCategoriesCommand).await {
        Ok(Ok(categories)) => {
            debug!("Successful return {} categories to client", categories.len());

            Ok(HttpResponse::Ok().json(categories))
        }
        Ok(Err(error)) => {
            error!("Fail to list categories: {}", error);

            Ok(HttpResponse::ServiceUnavailable().json(ListingError {
                error: error.message,
            }))
        }
        Err(error) => {
            error!("Fail to list categories: {}", error);

            Ok(HttpResponse::InternalServerError().json(ListingError {
                error: format!("Failed to list categories: {}", error),
            }))
        }
    }
}
