use actix_cors::Cors;
use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{web, Error, HttpResponse};
use futures::{StreamExt, TryStreamExt};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::plantnet::client::{PlantNetClient, UploadedImage};

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Deserialize)]
struct LocationParams {
    latitude: Option<String>,
    longitude: Option<String>,
}

/// CORS policy for the relay; answers `OPTIONS /identify` preflights.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, static_dir: String) {
    cfg.service(web::resource("/identify").route(web::post().to(handle_identify)))
        .service(Files::new("/", static_dir).index_file("crop-disease-detector.html"));
}

/// Relays one uploaded image plus location to PlantNet and returns the
/// upstream JSON, or a translated error.
async fn handle_identify(
    client: web::Data<PlantNetClient>,
    query: web::Query<LocationParams>,
    mut payload: Multipart,
) -> Result<HttpResponse, Error> {
    let mut image: Option<UploadedImage> = None;

    while let Some(mut field) = payload.try_next().await? {
        if field.name() != Some("image") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or("upload")
            .to_string();
        let content_type = field
            .content_type()
            .map(|mime| mime.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk?;
            bytes.write_all(&data)?;
        }

        image = Some(UploadedImage {
            filename,
            content_type,
            bytes,
        });
        // First part named "image" wins.
        break;
    }

    let Some(image) = image else {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "No image file provided".to_string(),
        }));
    };

    let latitude = query.latitude.as_deref().unwrap_or("");
    let longitude = query.longitude.as_deref().unwrap_or("");
    if latitude.is_empty() || longitude.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "Missing location parameters".to_string(),
        }));
    }

    match client.identify(image, latitude, longitude).await {
        Ok(body) => {
            info!("PlantNet identification succeeded");
            Ok(HttpResponse::Ok().json(body))
        }
        Err(e) => {
            error!("PlantNet request failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse {
                error: e.to_string(),
            }))
        }
    }
}
